use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use super::types::Runner;

/// Dockerfile instructions whose resolved value is recovered from build history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Entrypoint,
    Cmd,
}

impl Instruction {
    pub fn keyword(&self) -> &'static str {
        match self {
            Instruction::Entrypoint => "ENTRYPOINT",
            Instruction::Cmd => "CMD",
        }
    }
}

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(.+?)""#).expect("quoted-string pattern is valid"));

/// Recover the arguments `instruction` resolved to when `image` was built.
///
/// Never fails: a runtime error, a non-zero exit or a history without the
/// instruction all yield an empty list.
pub fn extract(runner: &impl Runner, image: &str, instruction: Instruction) -> Vec<String> {
    let output = match runner.output(&["history", "--no-trunc", image]) {
        Ok(output) => output,
        Err(err) => {
            warn!(image, error = %err, "container runtime failed to start");
            return Vec::new();
        }
    };
    if !output.success {
        debug!(image, "history query exited unsuccessfully");
    }

    let args = parse_history(&output.stdout_lossy(), instruction.keyword());
    debug!(image, instruction = instruction.keyword(), ?args, "extracted from history");
    args
}

/// Find the first `KEYWORD [payload]` in history text and return every
/// double-quoted string inside the payload, in order.
///
/// The payload match is greedy up to the last `]` on the same line, and quoted
/// strings are matched non-greedily with no escape handling: `\"`, nested
/// brackets and empty strings (`""`) are not understood.
pub fn parse_history(text: &str, keyword: &str) -> Vec<String> {
    let pattern = format!(r"{} \[(.+)\]", regex::escape(keyword));
    let instruction = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(err) => {
            warn!(keyword, error = %err, "unusable instruction pattern");
            return Vec::new();
        }
    };

    let Some(payload) = instruction.captures(text).and_then(|caps| caps.get(1)) else {
        return Vec::new();
    };

    QUOTED
        .captures_iter(payload.as_str())
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
