use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const CONFIG_FILE: &str = ".drakyep";

/// On-disk shape of `.drakyep`; every field is optional.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub runtime: Option<String>,
    pub addon_dir: Option<String>,
    pub compose: Option<String>,
    pub search_depth: Option<usize>,
}

impl FileConfig {
    /// Load config from a `.drakyep` file in the given directory.
    pub fn load(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: FileConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("invalid config in {}", path.display()))?;
        Ok(Some(config))
    }
}
