//! Error types surfaced by the public API of this crate.

use crate::aws::AwsError;
use thiserror::Error;

/// Top-level error for identity resolution, catalog loading, and simulation.
#[derive(Error, Debug)]
pub enum PermsSimulateError {
    /// Bad or missing profile, unusable credentials, or an identity that cannot be resolved
    #[error("Credential error: {0}")]
    Credential(String),

    /// The simulation API rejected the call or could not be reached
    #[error("Remote call error: {0}")]
    RemoteCall(String),

    /// The action catalog could not be downloaded or parsed
    #[error("Action catalog error: {0}")]
    Catalog(String),

    /// User-supplied options that cannot be acted on
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PermsSimulateError {
    pub fn credential(message: impl Into<String>) -> Self {
        Self::Credential(message.into())
    }

    pub fn remote_call(message: impl Into<String>) -> Self {
        Self::RemoteCall(message.into())
    }

    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog(message.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// STS and credential failures belong to the identity side, everything IAM
/// returns belongs to the simulation call.
impl From<AwsError> for PermsSimulateError {
    fn from(err: AwsError) -> Self {
        match err {
            AwsError::ConfigError(_) | AwsError::CredentialError(_) | AwsError::StsError(_) => {
                Self::Credential(err.to_string())
            }
            AwsError::IamError(_) => Self::RemoteCall(err.to_string()),
        }
    }
}

pub type PermsSimulateResult<T> = Result<T, PermsSimulateError>;
