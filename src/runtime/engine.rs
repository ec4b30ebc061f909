use std::io;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use tracing::debug;

use super::types::{CommandOutput, Runner};

pub const DEFAULT_RUNTIME: &str = "docker";

/// Container runtime CLI invoked as a blocking child process.
///
/// Holds the program plus any leading arguments, so `sudo docker` or
/// `podman --remote` work the same way as a bare `docker`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliRuntime {
    program: String,
    prefix: Vec<String>,
}

impl CliRuntime {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            prefix: Vec::new(),
        }
    }

    /// Parse a shell-quoted runtime command line, e.g. `"sudo docker"`.
    pub fn parse(command_line: &str) -> Result<Self> {
        let mut words = shell_words::split(command_line)
            .with_context(|| format!("invalid runtime command: {command_line}"))?
            .into_iter();
        let Some(program) = words.next() else {
            bail!("runtime command cannot be blank");
        };
        Ok(Self {
            program,
            prefix: words.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self, args: &[&str]) -> Command {
        debug!(program = %self.program, ?args, "invoking container runtime");
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.prefix).args(args);
        cmd
    }
}

impl Default for CliRuntime {
    fn default() -> Self {
        Self::new(DEFAULT_RUNTIME)
    }
}

impl Runner for CliRuntime {
    fn name(&self) -> &str {
        &self.program
    }

    fn status(&self, args: &[&str]) -> io::Result<bool> {
        let status = self
            .command(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        Ok(status.success())
    }

    fn output(&self, args: &[&str]) -> io::Result<CommandOutput> {
        let output = self.command(args).stdin(Stdio::null()).output()?;
        Ok(CommandOutput {
            success: output.status.success(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Verify that the runtime daemon is reachable.
pub fn ensure_daemon(runner: &impl Runner) -> Result<()> {
    let program = runner.name();
    let running = runner
        .status(&["version", "--format", "{{.Server.Version}}"])
        .with_context(|| format!("failed to invoke `{program}`; is it installed and on PATH?"))?;

    if !running {
        bail!("{program} daemon is not running");
    }
    Ok(())
}
