//! Parser for raw checker output lines.
//!
//! The checker has emitted two line formats over time:
//! - old: `error[lint-name] path:line:column: message`
//! - new: `path:line:column: error[lint-name] message`
//!
//! Both are accepted. Lines that match neither are skipped; the checker
//! interleaves diagnostics with progress output and summaries.

use crate::models::{Diagnostic, Level};
use regex::Regex;

/// Turns raw checker output into diagnostics, optionally attaching a
/// GitHub source link when the project's repo location and commit are
/// known.
pub struct DiagnosticsParser {
    repo_location: Option<String>,
    repo_commit: Option<String>,
    old_format: Regex,
    new_format: Regex,
}

impl DiagnosticsParser {
    pub fn new(repo_location: Option<String>, repo_commit: Option<String>) -> Self {
        let old_format = Regex::new(
            r"^(?P<level>error|warning)\[(?P<lint_name>.+?)\] (?P<path>.+?):(?P<line>\d+):(?P<column>\d+): (?P<message>.+)$",
        )
        .expect("old diagnostic pattern is valid");
        let new_format = Regex::new(
            r"^(?P<path>.+?):(?P<line>\d+):(?P<column>\d+): (?P<level>error|warning)\[(?P<lint_name>.+?)\] (?P<message>.+)$",
        )
        .expect("new diagnostic pattern is valid");
        DiagnosticsParser {
            repo_location,
            repo_commit,
            old_format,
            new_format,
        }
    }

    /// Parse all diagnostic lines out of `content`, in input order.
    pub fn parse(&self, content: &str) -> Vec<Diagnostic> {
        content
            .lines()
            .filter_map(|line| self.parse_line(line.trim()))
            .collect()
    }

    fn parse_line(&self, line: &str) -> Option<Diagnostic> {
        if line.is_empty() {
            return None;
        }
        let caps = self
            .old_format
            .captures(line)
            .or_else(|| self.new_format.captures(line))?;

        let path = caps["path"].to_string();
        let line_num: u32 = caps["line"].parse().ok()?;
        let github_ref = match (&self.repo_location, &self.repo_commit) {
            (Some(location), Some(commit)) => {
                Some(format!("{location}/blob/{commit}/{path}#L{line_num}"))
            }
            _ => None,
        };

        Some(Diagnostic {
            level: match &caps["level"] {
                "warning" => Level::Warning,
                _ => Level::Error,
            },
            lint_name: caps["lint_name"].to_string(),
            path,
            line: line_num,
            column: caps["column"].parse().ok()?,
            message: caps["message"].to_string(),
            github_ref,
        })
    }
}
