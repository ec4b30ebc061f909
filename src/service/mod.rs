mod rewrite;
mod types;

pub use rewrite::rewrite;
pub use types::{AddonContext, PROJECT_CONFIG_ROOT_VAR, WRAPPER_PATH};
