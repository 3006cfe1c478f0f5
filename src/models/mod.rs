//! Shared data models for diagnostics, snapshots, and diff outputs.

pub mod diff;
pub mod snapshot;

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Severity of a diagnostic as reported by the checker.
pub enum Level {
    Error,
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A single reported finding from one type-checking run.
///
/// For diffing, identity is `(project, path, line)` then `lint_name`;
/// `column` and `message` are payload and may shift between checker
/// versions without the finding itself changing.
pub struct Diagnostic {
    pub level: Level,
    pub lint_name: String,
    pub path: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_ref: Option<String>,
}

#[cfg(test)]
pub(crate) fn diag(lint: &str, path: &str, line: u32, column: u32, message: &str) -> Diagnostic {
    Diagnostic {
        level: Level::Error,
        lint_name: lint.into(),
        path: path.into(),
        line,
        column,
        message: message.into(),
        github_ref: None,
    }
}
