mod loader;
mod types;

use std::path::Path;

use anyhow::Result;

pub use loader::{CONFIG_FILE, FileConfig};
pub use types::Config;

/// Load `.drakyep` from `dir` and merge it over the defaults.
pub fn load(dir: &Path) -> Result<Config> {
    let mut cfg = Config::default();
    let Some(file) = FileConfig::load(dir)? else {
        return Ok(cfg);
    };

    if let Some(runtime) = file.runtime {
        cfg.runtime = runtime;
    }
    if file.addon_dir.is_some() {
        cfg.addon_dir = file.addon_dir;
    }
    if file.compose.is_some() {
        cfg.compose = file.compose;
    }
    if let Some(depth) = file.search_depth {
        cfg.search_depth = depth;
    }
    Ok(cfg)
}
