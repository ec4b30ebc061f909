use std::fmt::Write as _;

use similar::{ChangeTag, TextDiff};

/// Render a unified diff between two serialized documents. Empty when equal.
pub fn unified_diff(old: &str, new: &str, label: &str) -> String {
    let text_diff = TextDiff::from_lines(old, new);
    let mut out = String::new();

    for hunk in text_diff.unified_diff().context_radius(3).iter_hunks() {
        if out.is_empty() {
            let _ = writeln!(out, "--- a/{label}\n+++ b/{label}");
        }
        let _ = writeln!(out, "{}", hunk.header());
        for change in hunk.iter_changes() {
            let sign = match change.tag() {
                ChangeTag::Equal => ' ',
                ChangeTag::Insert => '+',
                ChangeTag::Delete => '-',
            };
            let _ = writeln!(out, "{sign}{}", change.value().trim_end_matches('\n'));
        }
    }

    out
}
