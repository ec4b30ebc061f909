use serde::{Deserialize, Serialize};

use crate::runtime::DEFAULT_RUNTIME;

/// Effective settings after the `.drakyep` file is merged over defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Runtime command line, e.g. `docker` or `sudo docker`.
    pub runtime: String,
    /// Addon directory relative to the project-config root.
    pub addon_dir: Option<String>,
    /// Explicit compose file; discovered when unset.
    pub compose: Option<String>,
    pub search_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runtime: DEFAULT_RUNTIME.to_string(),
            addon_dir: None,
            compose: None,
            search_depth: 3,
        }
    }
}
