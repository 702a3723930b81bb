//! AWS IAM client wrapper for policy simulation

use crate::aws::{AwsError, AwsResult, PolicySimulator};
use crate::types::{Decision, EvaluatedAction};
use async_trait::async_trait;
use aws_sdk_iam::error::DisplayErrorContext;
use aws_sdk_iam::types::EvaluationResult;
use aws_sdk_iam::Client as IamClient;

pub struct AwsIamClient {
    client: IamClient,
}

impl AwsIamClient {
    pub fn new(client: IamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PolicySimulator for AwsIamClient {
    async fn simulate(
        &self,
        principal_arn: &str,
        actions: &[String],
    ) -> AwsResult<Vec<EvaluatedAction>> {
        let mut results = Vec::with_capacity(actions.len());
        let mut marker: Option<String> = None;

        // A single batch can still come back in pages
        loop {
            let response = self
                .client
                .simulate_principal_policy()
                .policy_source_arn(principal_arn)
                .set_action_names(Some(actions.to_vec()))
                .set_marker(marker.take())
                .send()
                .await
                .map_err(|e| {
                    AwsError::IamError(format!(
                        "Failed to simulate principal policy for '{principal_arn}': {}",
                        DisplayErrorContext(&e)
                    ))
                })?;

            results.extend(response.evaluation_results().iter().map(to_evaluated_action));

            match (response.is_truncated(), response.marker()) {
                (true, Some(next)) => marker = Some(next.to_string()),
                _ => break,
            }
        }

        Ok(results)
    }
}

fn to_evaluated_action(result: &EvaluationResult) -> EvaluatedAction {
    EvaluatedAction::new(
        result.eval_action_name().to_string(),
        Decision::from(result.eval_decision().as_str()),
    )
}
