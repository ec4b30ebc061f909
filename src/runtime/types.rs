use std::io;

use thiserror::Error;

/// Captured result of a runtime invocation whose output matters.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// Stdout decoded as UTF-8, replacing invalid sequences.
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}

/// Raised when an image is neither present locally nor pullable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' image is not available")]
pub struct ImageUnavailable(pub String);

impl ImageUnavailable {
    pub fn image(&self) -> &str {
        &self.0
    }
}

/// Process-execution seam for the container runtime CLI.
///
/// `args` never include the runtime program itself, only the subcommand and
/// its arguments (e.g. `["pull", "alpine:3"]`). Both calls block until the
/// process exits.
pub trait Runner {
    /// Name used in diagnostics.
    fn name(&self) -> &str {
        "container runtime"
    }

    /// Run and report whether the process exited successfully. Output is discarded.
    fn status(&self, args: &[&str]) -> io::Result<bool>;

    /// Run and capture stdout/stderr.
    fn output(&self, args: &[&str]) -> io::Result<CommandOutput>;
}
