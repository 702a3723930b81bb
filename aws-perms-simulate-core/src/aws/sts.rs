//! STS caller identity lookup

use crate::aws::{AwsError, AwsResult, CallerIdentityProvider};
use async_trait::async_trait;
use aws_sdk_sts::error::DisplayErrorContext;
use aws_sdk_sts::Client as StsClient;

pub struct AwsStsClient {
    client: StsClient,
}

impl AwsStsClient {
    pub fn new(client: StsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CallerIdentityProvider for AwsStsClient {
    async fn caller_arn(&self) -> AwsResult<Option<String>> {
        let response = self
            .client
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| {
                AwsError::StsError(format!(
                    "Failed to get caller identity: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        log::debug!(
            "Caller identity: account={:?} user_id={:?}",
            response.account(),
            response.user_id()
        );

        Ok(response.arn().map(str::to_string))
    }
}
