//! Shared data types

use serde::{Serialize, Serializer};

/// Largest batch accepted for a single simulation call
pub const MAX_BATCH_SIZE: usize = 100;
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Decision reported by policy simulation for one action.
///
/// Displays and serializes as the exact string the service returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    ExplicitDeny,
    ImplicitDeny,
    /// Decision value this crate does not know about
    Other(String),
}

impl Decision {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Allowed => "allowed",
            Self::ExplicitDeny => "explicitDeny",
            Self::ImplicitDeny => "implicitDeny",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

impl From<&str> for Decision {
    fn from(raw: &str) -> Self {
        match raw {
            "allowed" => Self::Allowed,
            "explicitDeny" => Self::ExplicitDeny,
            "implicitDeny" => Self::ImplicitDeny,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Decision {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One (action, decision) pair from the simulation response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluatedAction {
    pub action: String,
    pub decision: Decision,
}

impl EvaluatedAction {
    pub fn new(action: String, decision: Decision) -> Self {
        Self { action, decision }
    }
}

/// Where the simulated principal came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IdentitySource {
    /// Passed in by the user and used as-is
    Explicit,
    /// Looked up from the credentials of the active profile
    Profile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedIdentity {
    pub arn: String,
    pub source: IdentitySource,
}

/// Every result of a simulation run, sorted by action name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub principal_arn: String,
    pub results: Vec<EvaluatedAction>,
}

impl SimulationReport {
    pub fn new(principal_arn: String, mut results: Vec<EvaluatedAction>) -> Self {
        results.sort_by(|a, b| a.action.cmp(&b.action));
        Self {
            principal_arn,
            results,
        }
    }

    pub fn allowed(&self) -> impl Iterator<Item = &EvaluatedAction> {
        self.results.iter().filter(|r| r.decision.is_allowed())
    }

    pub fn denied(&self) -> impl Iterator<Item = &EvaluatedAction> {
        self.results.iter().filter(|r| !r.decision.is_allowed())
    }

    /// Drop everything that was not allowed
    pub fn retain_allowed(&mut self) {
        self.results.retain(|r| r.decision.is_allowed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_round_trips_known_and_unknown_values() {
        assert_eq!(Decision::from("allowed"), Decision::Allowed);
        assert_eq!(Decision::from("implicitDeny").as_str(), "implicitDeny");
        let unknown = Decision::from("conditionalAllow");
        assert_eq!(unknown, Decision::Other("conditionalAllow".to_string()));
        assert_eq!(unknown.to_string(), "conditionalAllow");
        assert!(!unknown.is_allowed());
    }

    #[test]
    fn test_report_sorts_and_splits_results() {
        let report = SimulationReport::new(
            "arn:aws:iam::123456789012:user/alice".to_string(),
            vec![
                EvaluatedAction::new("s3:PutObject".into(), Decision::ImplicitDeny),
                EvaluatedAction::new("ec2:DescribeInstances".into(), Decision::Allowed),
                EvaluatedAction::new("s3:GetObject".into(), Decision::Allowed),
            ],
        );

        let names: Vec<&str> = report.results.iter().map(|r| r.action.as_str()).collect();
        assert_eq!(
            names,
            vec!["ec2:DescribeInstances", "s3:GetObject", "s3:PutObject"]
        );
        assert_eq!(report.allowed().count(), 2);
        assert_eq!(report.denied().count(), 1);
    }

    #[test]
    fn test_report_json_uses_api_decision_strings() {
        let report = SimulationReport::new(
            "arn:aws:iam::123456789012:role/Ops".to_string(),
            vec![EvaluatedAction::new(
                "iam:CreateUser".into(),
                Decision::ExplicitDeny,
            )],
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "principalArn": "arn:aws:iam::123456789012:role/Ops",
                "results": [{"action": "iam:CreateUser", "decision": "explicitDeny"}]
            })
        );
    }
}
