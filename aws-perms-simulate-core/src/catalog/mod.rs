//! Action catalog: the set of `service:Action` names to simulate.

pub mod policy_generator;

use crate::error::{PermsSimulateError, PermsSimulateResult};
use std::collections::{BTreeMap, BTreeSet};

pub use policy_generator::{parse_policy_generator_config, PolicyGeneratorCatalog, DEFAULT_CATALOG_URL};

/// Actions grouped by service prefix; both levels are sorted and de-duplicated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionCatalog {
    services: BTreeMap<String, BTreeSet<String>>,
}

impl ActionCatalog {
    /// Build a catalog from explicit `service:Action` names
    pub fn from_actions<I, S>(actions: I) -> PermsSimulateResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = Self::default();
        for action in actions {
            let action = action.as_ref().trim();
            let (service, name) = split_action(action).ok_or_else(|| {
                PermsSimulateError::invalid_input(format!(
                    "'{action}' is not a valid action, expected 'service:Action'"
                ))
            })?;
            catalog.insert(service, name);
        }
        Ok(catalog)
    }

    pub(crate) fn insert(&mut self, service: &str, action: &str) {
        self.services
            .entry(service.to_string())
            .or_default()
            .insert(action.to_string());
    }

    /// Keep only the given service prefixes, compared case-insensitively.
    /// Errors when nothing is left.
    pub fn filter_services<S: AsRef<str>>(self, prefixes: &[S]) -> PermsSimulateResult<Self> {
        if prefixes.is_empty() {
            return Ok(self);
        }

        let wanted: BTreeSet<String> = prefixes
            .iter()
            .map(|p| p.as_ref().trim().to_ascii_lowercase())
            .collect();

        let services: BTreeMap<_, _> = self
            .services
            .into_iter()
            .filter(|(service, _)| wanted.contains(&service.to_ascii_lowercase()))
            .collect();

        if services.is_empty() {
            let requested: Vec<&str> = wanted.iter().map(String::as_str).collect();
            return Err(PermsSimulateError::invalid_input(format!(
                "no actions found for service(s): {}",
                requested.join(", ")
            )));
        }

        Ok(Self { services })
    }

    /// All actions as sorted `service:Action` strings
    pub fn action_names(&self) -> Vec<String> {
        self.services
            .iter()
            .flat_map(|(service, actions)| {
                actions
                    .iter()
                    .map(move |action| format!("{service}:{action}"))
            })
            .collect()
    }

    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    pub fn len(&self) -> usize {
        self.services.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn split_action(action: &str) -> Option<(&str, &str)> {
    let (service, name) = action.split_once(':')?;
    if service.is_empty() || name.is_empty() || name.contains(':') {
        return None;
    }
    Some((service, name))
}
