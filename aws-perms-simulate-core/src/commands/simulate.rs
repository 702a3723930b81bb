//! Simulation logic for the permissions service

use crate::catalog::ActionCatalog;
use crate::error::{PermsSimulateError, PermsSimulateResult};
use crate::simulation::simulate_in_batches;
use crate::types::{ResolvedIdentity, SimulationReport};

impl super::service::PermsSimulateService {
    /// Simulate every action in `catalog` for `identity`.
    ///
    /// The report holds exactly what the service returned, sorted by action.
    /// `on_batch` is called with the size of each completed batch.
    pub async fn simulate<F>(
        &self,
        identity: &ResolvedIdentity,
        catalog: &ActionCatalog,
        batch_size: usize,
        on_batch: F,
    ) -> PermsSimulateResult<SimulationReport>
    where
        F: FnMut(usize),
    {
        let actions = catalog.action_names();
        if actions.is_empty() {
            return Err(PermsSimulateError::invalid_input("no actions to simulate"));
        }

        log::info!(
            "Checking {} permissions for {}",
            actions.len(),
            identity.arn
        );

        let results = simulate_in_batches(
            self.simulator.as_ref(),
            &identity.arn,
            &actions,
            batch_size,
            on_batch,
        )
        .await?;

        Ok(SimulationReport::new(identity.arn.clone(), results))
    }
}
