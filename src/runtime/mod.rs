// Container runtime CLI: image availability and build-history scraping.

pub mod engine;
pub mod history;
pub mod image;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use engine::{CliRuntime, DEFAULT_RUNTIME, ensure_daemon};
pub use history::{Instruction, extract, parse_history};
pub use image::ensure_image;
pub use types::{CommandOutput, ImageUnavailable, Runner};
