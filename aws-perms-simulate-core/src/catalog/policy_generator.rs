//! Download of the AWS Policy Generator action list (`policies.js`)

use super::ActionCatalog;
use crate::error::{PermsSimulateError, PermsSimulateResult};
use serde::Deserialize;
use std::collections::HashMap;

pub const DEFAULT_CATALOG_URL: &str = "https://awspolicygen.s3.amazonaws.com/js/policies.js";

/// The file is a JavaScript assignment wrapping a JSON object
const JS_ASSIGNMENT_PREFIX: &str = "app.PolicyEditorConfig=";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PolicyEditorConfig {
    service_map: HashMap<String, ServiceEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ServiceEntry {
    string_prefix: String,
    #[serde(default)]
    actions: Vec<String>,
}

/// Remote action catalog published by the AWS Policy Generator
pub struct PolicyGeneratorCatalog {
    url: String,
    client: reqwest::Client,
}

impl PolicyGeneratorCatalog {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self) -> PermsSimulateResult<ActionCatalog> {
        log::debug!("Downloading action catalog from {}", self.url);

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            PermsSimulateError::catalog(format!("Unable to fetch {}: {e}", self.url))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PermsSimulateError::catalog(format!(
                "Unable to fetch {}: HTTP {status}",
                self.url
            )));
        }

        let body = response.text().await.map_err(|e| {
            PermsSimulateError::catalog(format!("Failed to read catalog body: {e}"))
        })?;

        let catalog = parse_policy_generator_config(&body)?;
        log::info!(
            "Loaded {} actions across {} services",
            catalog.len(),
            catalog.service_count()
        );
        Ok(catalog)
    }
}

/// Parse the contents of `policies.js`; the JS prefix is optional.
///
/// Several service entries can share one prefix, their actions are merged.
pub fn parse_policy_generator_config(body: &str) -> PermsSimulateResult<ActionCatalog> {
    let trimmed = body.trim();
    let json = trimmed
        .strip_prefix(JS_ASSIGNMENT_PREFIX)
        .unwrap_or(trimmed)
        .trim_end_matches(';');

    let config: PolicyEditorConfig = serde_json::from_str(json)
        .map_err(|e| PermsSimulateError::catalog(format!("Failed to parse catalog JSON: {e}")))?;

    let mut catalog = ActionCatalog::default();
    for entry in config.service_map.values() {
        for action in &entry.actions {
            catalog.insert(&entry.string_prefix, action);
        }
    }

    if catalog.is_empty() {
        return Err(PermsSimulateError::catalog("catalog contains no actions"));
    }

    Ok(catalog)
}
