//! Batched policy simulation

use crate::aws::PolicySimulator;
use crate::error::{PermsSimulateError, PermsSimulateResult};
use crate::types::{EvaluatedAction, MAX_BATCH_SIZE};

/// Run `actions` through `simulator` in chunks of `batch_size`.
///
/// `on_batch` receives the number of actions in each completed batch. The
/// first failing call aborts the run and no results are returned.
pub async fn simulate_in_batches<F>(
    simulator: &dyn PolicySimulator,
    principal_arn: &str,
    actions: &[String],
    batch_size: usize,
    mut on_batch: F,
) -> PermsSimulateResult<Vec<EvaluatedAction>>
where
    F: FnMut(usize),
{
    if batch_size == 0 || batch_size > MAX_BATCH_SIZE {
        return Err(PermsSimulateError::invalid_input(format!(
            "batch size must be between 1 and {MAX_BATCH_SIZE}, got {batch_size}"
        )));
    }

    let batch_count = actions.len().div_ceil(batch_size);
    let mut results = Vec::with_capacity(actions.len());

    for (index, batch) in actions.chunks(batch_size).enumerate() {
        log::debug!(
            "Simulating batch {}/{} ({} actions)",
            index + 1,
            batch_count,
            batch.len()
        );
        let evaluated = simulator.simulate(principal_arn, batch).await?;
        results.extend(evaluated);
        on_batch(batch.len());
    }

    Ok(results)
}
