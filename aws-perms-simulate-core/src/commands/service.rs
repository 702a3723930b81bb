//! Permissions simulation service layer
//!
//! The service holds the identity and simulation clients and provides the
//! high-level operations (identity resolution, simulation) the CLI drives.

use crate::aws::config::load_profile_config;
use crate::aws::iam_client::AwsIamClient;
use crate::aws::sts::AwsStsClient;
use crate::aws::{CallerIdentityProvider, PolicySimulator};
use crate::error::PermsSimulateResult;
use aws_sdk_iam::Client as IamClient;
use aws_sdk_sts::Client as StsClient;

/// Main service struct that holds the AWS-facing clients
pub struct PermsSimulateService {
    pub(crate) identity: Box<dyn CallerIdentityProvider>,
    pub(crate) simulator: Box<dyn PolicySimulator>,
}

impl PermsSimulateService {
    /// Create a service backed by IAM and STS clients for `profile`.
    ///
    /// # Errors
    ///
    /// Returns a credential error if the profile cannot be loaded or its
    /// credentials do not resolve.
    pub async fn from_profile(profile: &str, region: Option<&str>) -> PermsSimulateResult<Self> {
        let config = load_profile_config(profile, region).await?;

        Ok(Self::with_clients(
            Box::new(AwsStsClient::new(StsClient::new(&config))),
            Box::new(AwsIamClient::new(IamClient::new(&config))),
        ))
    }

    /// Create a service from arbitrary client implementations
    pub fn with_clients(
        identity: Box<dyn CallerIdentityProvider>,
        simulator: Box<dyn PolicySimulator>,
    ) -> Self {
        Self {
            identity,
            simulator,
        }
    }

    // resolve_identity() is in resolve.rs
    // simulate() is in simulate.rs
}
