use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::runtime::{ImageUnavailable, Runner};
use crate::service::{self, AddonContext};

/// A parsed compose document.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposeFile {
    root: Value,
}

impl ComposeFile {
    pub fn parse(raw: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_str(raw).context("compose file is not valid YAML")?;
        if !root.is_mapping() {
            bail!("compose file must be a mapping at the top level");
        }
        Ok(Self { root })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.root).context("failed to serialize compose file")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.root).context("failed to serialize compose file")
    }

    /// Service names in document order.
    pub fn service_names(&self) -> Vec<String> {
        self.services()
            .map(|services| {
                services
                    .keys()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn service(&self, name: &str) -> Option<&Mapping> {
        self.services()?.get(name)?.as_mapping()
    }

    /// Wrap every selected service (all of them when `only` is empty) in the
    /// addon's entrypoint script, in document order. Stops at the first image
    /// that cannot be made available; services before it stay rewritten.
    /// Returns the names of the services that were rewritten.
    pub fn rewrite_services<F>(
        &mut self,
        only: &[String],
        addon: &AddonContext,
        substitute: F,
        runner: &impl Runner,
    ) -> Result<Vec<String>, ImageUnavailable>
    where
        F: Fn(&str) -> String,
    {
        let mut rewritten = Vec::new();
        let Some(services) = self.root.get_mut("services").and_then(Value::as_mapping_mut) else {
            return Ok(rewritten);
        };

        for (name, definition) in services.iter_mut() {
            let Some(name) = name.as_str() else {
                continue;
            };
            if !only.is_empty() && !only.iter().any(|o| o == name) {
                continue;
            }
            let Some(definition) = definition.as_mapping_mut() else {
                debug!(service = name, "skipping service without a definition");
                continue;
            };
            if service::rewrite(definition, addon, &substitute, runner)? {
                rewritten.push(name.to_string());
            }
        }
        Ok(rewritten)
    }

    fn services(&self) -> Option<&Mapping> {
        self.root.get("services")?.as_mapping()
    }
}
