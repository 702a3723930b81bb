//! Principal ARN parsing and conversion to a simulation source ARN

use crate::aws::{AwsError, AwsResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrincipalKind {
    User,
    Role,
    /// STS session of an assumed role (`assumed-role/<role>/<session>`)
    AssumedRole,
    Root,
    FederatedUser,
    Other,
}

/// A parsed `arn:<partition>:<service>:<region>:<account>:<resource>` principal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalArn {
    pub partition: String,
    pub service: String,
    pub region: String,
    pub account_id: String,
    pub resource: String,
    pub kind: PrincipalKind,
}

impl PrincipalArn {
    pub fn parse(arn: &str) -> AwsResult<Self> {
        let parts: Vec<&str> = arn.splitn(6, ':').collect();
        if parts.len() != 6 || parts[0] != "arn" {
            return Err(AwsError::CredentialError(format!(
                "'{arn}' is not a valid ARN"
            )));
        }

        let (partition, service, region, account_id, resource) =
            (parts[1], parts[2], parts[3], parts[4], parts[5]);
        if partition.is_empty() || service.is_empty() || resource.is_empty() {
            return Err(AwsError::CredentialError(format!(
                "'{arn}' is missing a partition, service, or resource"
            )));
        }

        let kind = match (service, resource.split('/').next().unwrap_or_default()) {
            ("iam", "root") => PrincipalKind::Root,
            ("iam", "user") => PrincipalKind::User,
            ("iam", "role") => PrincipalKind::Role,
            ("sts", "assumed-role") => PrincipalKind::AssumedRole,
            ("sts", "federated-user") => PrincipalKind::FederatedUser,
            _ => PrincipalKind::Other,
        };

        Ok(Self {
            partition: partition.to_string(),
            service: service.to_string(),
            region: region.to_string(),
            account_id: account_id.to_string(),
            resource: resource.to_string(),
            kind,
        })
    }

    /// The ARN policy simulation accepts for this principal.
    ///
    /// Assumed-role sessions map to `arn:<partition>:iam::<account>:role/<role>`.
    /// The role path is not part of a session ARN, so roles created under a
    /// non-default path still need an explicit ARN.
    pub fn simulation_source_arn(&self) -> AwsResult<String> {
        match self.kind {
            PrincipalKind::AssumedRole => {
                let role_name = self
                    .resource
                    .split('/')
                    .nth(1)
                    .filter(|name| !name.is_empty())
                    .ok_or_else(|| {
                        AwsError::CredentialError(format!(
                            "'{self}' does not name the assumed role"
                        ))
                    })?;
                Ok(format!(
                    "arn:{}:iam::{}:role/{}",
                    self.partition, self.account_id, role_name
                ))
            }
            _ => Ok(self.to_string()),
        }
    }
}

impl std::fmt::Display for PrincipalArn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "arn:{}:{}:{}:{}:{}",
            self.partition, self.service, self.region, self.account_id, self.resource
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_arn() {
        let arn = PrincipalArn::parse("arn:aws:iam::123456789012:user/alice").unwrap();
        assert_eq!(arn.kind, PrincipalKind::User);
        assert_eq!(arn.account_id, "123456789012");
        assert_eq!(
            arn.simulation_source_arn().unwrap(),
            "arn:aws:iam::123456789012:user/alice"
        );
    }

    #[test]
    fn test_parse_role_with_path() {
        let arn = PrincipalArn::parse("arn:aws:iam::123456789012:role/service/Deployer").unwrap();
        assert_eq!(arn.kind, PrincipalKind::Role);
        assert_eq!(
            arn.simulation_source_arn().unwrap(),
            "arn:aws:iam::123456789012:role/service/Deployer"
        );
    }

    #[test]
    fn test_assumed_role_maps_to_role_arn() {
        let arn = PrincipalArn::parse(
            "arn:aws:sts::123456789012:assumed-role/AdminRole/alice@example.com",
        )
        .unwrap();
        assert_eq!(arn.kind, PrincipalKind::AssumedRole);
        assert_eq!(
            arn.simulation_source_arn().unwrap(),
            "arn:aws:iam::123456789012:role/AdminRole"
        );
    }

    #[test]
    fn test_assumed_role_keeps_partition() {
        let arn =
            PrincipalArn::parse("arn:aws-us-gov:sts::123456789012:assumed-role/Ops/session")
                .unwrap();
        assert_eq!(
            arn.simulation_source_arn().unwrap(),
            "arn:aws-us-gov:iam::123456789012:role/Ops"
        );
    }

    #[test]
    fn test_assumed_role_without_role_name_is_rejected() {
        for session in [
            "arn:aws:sts::123456789012:assumed-role",
            "arn:aws:sts::123456789012:assumed-role/",
            "arn:aws:sts::123456789012:assumed-role//session",
        ] {
            let arn = PrincipalArn::parse(session).unwrap();
            assert_eq!(arn.kind, PrincipalKind::AssumedRole);
            assert!(
                matches!(arn.simulation_source_arn(), Err(AwsError::CredentialError(_))),
                "expected '{session}' to be rejected"
            );
        }
    }

    #[test]
    fn test_root_and_federated_kinds() {
        let root = PrincipalArn::parse("arn:aws:iam::123456789012:root").unwrap();
        assert_eq!(root.kind, PrincipalKind::Root);

        let federated =
            PrincipalArn::parse("arn:aws:sts::123456789012:federated-user/bob").unwrap();
        assert_eq!(federated.kind, PrincipalKind::FederatedUser);
    }

    #[test]
    fn test_parse_invalid_arn() {
        assert!(PrincipalArn::parse("not-an-arn").is_err());
        assert!(PrincipalArn::parse("arn:aws:iam").is_err());
        assert!(PrincipalArn::parse("arn:aws:iam::123456789012:").is_err());
    }
}
