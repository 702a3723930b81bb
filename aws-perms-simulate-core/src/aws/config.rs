//! Loading the shared SDK configuration for a named credential profile

use crate::aws::{AwsError, AwsResult};
use aws_config::default_provider::region::Builder as DefaultRegionBuilder;
use aws_config::meta::region::RegionProviderChain;
use aws_config::profile::ProfileFileCredentialsProvider;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_sts::error::DisplayErrorContext;

/// IAM is a global service, any commercial region resolves its endpoint
pub const FALLBACK_REGION: &str = "us-east-1";

/// Load configuration for `profile` and make sure its credentials resolve.
///
/// Credentials come from the named profile only; environment credentials
/// and other providers of the default chain are never consulted.
///
/// Region precedence: `region` argument, then the regular environment/profile
/// chain for `profile`, then [`FALLBACK_REGION`].
pub async fn load_profile_config(profile: &str, region: Option<&str>) -> AwsResult<SdkConfig> {
    if profile.trim().is_empty() {
        return Err(AwsError::ConfigError(
            "profile name must not be empty".to_string(),
        ));
    }

    let region_provider = RegionProviderChain::first_try(region.map(|r| Region::new(r.to_string())))
        .or_else(DefaultRegionBuilder::default().profile_name(profile).build())
        .or_else(Region::from_static(FALLBACK_REGION));

    let credentials = ProfileFileCredentialsProvider::builder()
        .profile_name(profile)
        .build();

    let config = aws_config::defaults(BehaviorVersion::latest())
        .profile_name(profile)
        .credentials_provider(credentials)
        .region(region_provider)
        .load()
        .await;

    log::debug!(
        "Loaded AWS configuration for profile '{}' (region: {:?})",
        profile,
        config.region()
    );

    verify_credentials(&config, profile).await?;
    Ok(config)
}

/// Credentials are resolved lazily by the SDK; force resolution so a broken
/// profile is reported before any other work starts.
async fn verify_credentials(config: &SdkConfig, profile: &str) -> AwsResult<()> {
    let provider = config.credentials_provider().ok_or_else(|| {
        AwsError::CredentialError(format!(
            "no credentials provider available for profile '{profile}'"
        ))
    })?;

    provider.provide_credentials().await.map_err(|e| {
        AwsError::CredentialError(format!(
            "failed to load credentials for profile '{profile}': {}",
            DisplayErrorContext(&e)
        ))
    })?;

    Ok(())
}
