//! AWS SDK integration: profile loading, STS caller identity, IAM policy simulation, principal parsing.

pub mod config;
pub(crate) mod iam_client;
pub mod principal;
pub(crate) mod sts;

use crate::types::EvaluatedAction;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwsError {
    #[error("AWS configuration error: {0}")]
    ConfigError(String),
    #[error("Credential resolution error: {0}")]
    CredentialError(String),
    #[error("STS client error: {0}")]
    StsError(String),
    #[error("IAM client error: {0}")]
    IamError(String),
}

pub type AwsResult<T> = Result<T, AwsError>;

/// Source of the identity behind the active credentials
#[async_trait]
pub trait CallerIdentityProvider: Send + Sync {
    /// ARN of the principal the credentials belong to, if the service reported one
    async fn caller_arn(&self) -> AwsResult<Option<String>>;
}

/// Evaluates a batch of actions against the policies attached to a principal
#[async_trait]
pub trait PolicySimulator: Send + Sync {
    /// Returns one result per evaluated action, in the order the service reports them
    async fn simulate(
        &self,
        principal_arn: &str,
        actions: &[String],
    ) -> AwsResult<Vec<EvaluatedAction>>;
}
