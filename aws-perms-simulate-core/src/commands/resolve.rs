//! Identity resolution for the simulated principal

use crate::aws::principal::{PrincipalArn, PrincipalKind};
use crate::error::{PermsSimulateError, PermsSimulateResult};
use crate::types::{IdentitySource, ResolvedIdentity};

impl super::service::PermsSimulateService {
    /// Decide which principal to simulate.
    ///
    /// A non-blank `explicit_arn` is returned verbatim without contacting STS.
    /// Otherwise the caller identity of the active credentials is used, with
    /// assumed-role sessions mapped to their role.
    pub async fn resolve_identity(
        &self,
        explicit_arn: Option<&str>,
    ) -> PermsSimulateResult<ResolvedIdentity> {
        if let Some(arn) = explicit_arn.filter(|arn| !arn.trim().is_empty()) {
            log::info!("Using explicit principal {}", arn);
            return Ok(ResolvedIdentity {
                arn: arn.to_string(),
                source: IdentitySource::Explicit,
            });
        }

        let caller_arn = self
            .identity
            .caller_arn()
            .await?
            .filter(|arn| !arn.is_empty())
            .ok_or_else(|| {
                PermsSimulateError::credential(
                    "Unable to get the caller ARN from the active profile, please specify --arn",
                )
            })?;

        let principal = PrincipalArn::parse(&caller_arn)?;
        let arn = principal.simulation_source_arn()?;
        if principal.kind == PrincipalKind::AssumedRole {
            log::info!("Caller {} is a role session, simulating {}", caller_arn, arn);
        } else {
            log::info!("Using caller identity {}", arn);
        }

        Ok(ResolvedIdentity {
            arn,
            source: IdentitySource::Profile,
        })
    }
}
