//! Scripted [`Runner`] for unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io;

use super::types::{CommandOutput, Runner};

/// Replays canned results keyed by subcommand (`inspect`, `pull`, `history`, ...)
/// and records every invocation. Unscripted subcommands succeed with empty output.
#[derive(Default)]
pub struct FakeRunner {
    statuses: HashMap<String, bool>,
    outputs: HashMap<String, CommandOutput>,
    broken: HashSet<String>,
    calls: RefCell<Vec<Vec<String>>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, subcommand: &str, success: bool) -> Self {
        self.statuses.insert(subcommand.to_string(), success);
        self
    }

    pub fn with_stdout(mut self, subcommand: &str, stdout: &str) -> Self {
        self.outputs.insert(
            subcommand.to_string(),
            CommandOutput {
                success: true,
                stdout: stdout.as_bytes().to_vec(),
                stderr: Vec::new(),
            },
        );
        self
    }

    /// Make the subcommand fail to spawn at all.
    pub fn with_spawn_error(mut self, subcommand: &str) -> Self {
        self.broken.insert(subcommand.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, subcommand: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.first().is_some_and(|c| c == subcommand))
            .count()
    }

    fn record(&self, args: &[&str]) -> io::Result<String> {
        self.calls
            .borrow_mut()
            .push(args.iter().map(|a| a.to_string()).collect());
        let sub = args.first().copied().unwrap_or_default().to_string();
        if self.broken.contains(&sub) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such program"));
        }
        Ok(sub)
    }
}

impl Runner for FakeRunner {
    fn status(&self, args: &[&str]) -> io::Result<bool> {
        let sub = self.record(args)?;
        Ok(self.statuses.get(&sub).copied().unwrap_or(true))
    }

    fn output(&self, args: &[&str]) -> io::Result<CommandOutput> {
        let sub = self.record(args)?;
        Ok(self.outputs.get(&sub).cloned().unwrap_or(CommandOutput {
            success: true,
            ..CommandOutput::default()
        }))
    }
}
