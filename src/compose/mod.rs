mod diff;
mod discovery;
mod document;

pub use diff::unified_diff;
pub use discovery::{
    discover_compose, display_label, normalize_compose_path, resolve_compose_path,
};
pub use document::ComposeFile;
