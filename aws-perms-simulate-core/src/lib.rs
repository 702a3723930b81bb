//! This crate provides the core logic of aws-perms-simulate:
//! - Credential profile loading and caller identity resolution
//! - The AWS Policy Generator action catalog
//! - Batched IAM `SimulatePrincipalPolicy` calls
//!

mod aws;
pub mod catalog;
pub mod commands;
mod error;
mod simulation;
mod types;

// Re-exports for a small, focused public API
pub use aws::config::{load_profile_config, FALLBACK_REGION};
pub use aws::principal::{PrincipalArn, PrincipalKind};
pub use aws::{AwsError, AwsResult, CallerIdentityProvider, PolicySimulator};
pub use catalog::{ActionCatalog, PolicyGeneratorCatalog, DEFAULT_CATALOG_URL};
pub use commands::PermsSimulateService;
pub use error::{PermsSimulateError, PermsSimulateResult};
pub use simulation::simulate_in_batches;
pub use types::{
    Decision, EvaluatedAction, IdentitySource, ResolvedIdentity, SimulationReport,
    DEFAULT_BATCH_SIZE, MAX_BATCH_SIZE,
};
