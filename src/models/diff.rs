//! Output schema for the diff: the DiffTree, per-lint statistics, and the
//! report bundle handed to renderers.
//!
//! These are plain nested structures with a fixed shape; any renderer
//! (table, JSON, markup) can consume them without attribute probing. A
//! renderer must escape `message` and `path` itself (untrusted content) and
//! must treat `Statistics` as authoritative rather than re-deriving counts.

use crate::models::Diagnostic;
use serde::Serialize;

/// A whole project present on only one side of the diff, emitted with all
/// of its diagnostics.
#[derive(Debug, Serialize)]
pub struct ProjectDiagnostics {
    pub project: String,
    pub project_location: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// A whole file present on only one side within a common project.
#[derive(Debug, Serialize)]
pub struct FileDiagnostics {
    pub path: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// A whole line present on only one side within a common file.
#[derive(Debug, Serialize)]
pub struct LineDiagnostics {
    pub line: u32,
    pub diagnostics: Vec<Diagnostic>,
}

/// An old/new diagnostic pair on the same line with the same lint but a
/// different message. Both records are retained verbatim; no token-level
/// diff is computed, the renderer displays both full strings.
#[derive(Debug, Serialize)]
pub struct MessageChange {
    pub old: Diagnostic,
    pub new: Diagnostic,
}

/// Changes on one line of a common file.
#[derive(Debug, Default, Serialize)]
pub struct ModifiedLine {
    pub line: u32,
    pub text_diffs: Vec<MessageChange>,
    pub removed: Vec<Diagnostic>,
    pub added: Vec<Diagnostic>,
}

impl ModifiedLine {
    pub fn is_empty(&self) -> bool {
        self.text_diffs.is_empty() && self.removed.is_empty() && self.added.is_empty()
    }
}

/// Line-level changes within a file present in both snapshots.
#[derive(Debug, Default, Serialize)]
pub struct LineDiffs {
    pub added_lines: Vec<LineDiagnostics>,
    pub removed_lines: Vec<LineDiagnostics>,
    pub modified_lines: Vec<ModifiedLine>,
}

impl LineDiffs {
    pub fn is_empty(&self) -> bool {
        self.added_lines.is_empty()
            && self.removed_lines.is_empty()
            && self.modified_lines.is_empty()
    }
}

/// A common file whose lines changed.
#[derive(Debug, Serialize)]
pub struct ModifiedFile {
    pub path: String,
    pub diffs: LineDiffs,
}

/// File-level changes within a project present in both snapshots.
#[derive(Debug, Default, Serialize)]
pub struct FileDiffs {
    pub added_files: Vec<FileDiagnostics>,
    pub removed_files: Vec<FileDiagnostics>,
    pub modified_files: Vec<ModifiedFile>,
}

impl FileDiffs {
    pub fn is_empty(&self) -> bool {
        self.added_files.is_empty()
            && self.removed_files.is_empty()
            && self.modified_files.is_empty()
    }
}

/// A common project whose files changed.
#[derive(Debug, Serialize)]
pub struct ModifiedProject {
    pub project: String,
    pub project_location: Option<String>,
    pub diffs: FileDiffs,
}

/// The full hierarchical diff between two snapshots.
///
/// Invariant: no level ever contains an empty modified entry; unchanged
/// subtrees are pruned entirely.
#[derive(Debug, Default, Serialize)]
pub struct DiffTree {
    pub added_projects: Vec<ProjectDiagnostics>,
    pub removed_projects: Vec<ProjectDiagnostics>,
    pub modified_projects: Vec<ModifiedProject>,
}

impl DiffTree {
    pub fn is_empty(&self) -> bool {
        self.added_projects.is_empty()
            && self.removed_projects.is_empty()
            && self.modified_projects.is_empty()
    }
}

/// Per-lint change counts. `net_change` and `total_change` are derived and
/// carried for renderers; rows are sorted by `total_change` descending then
/// lint name.
#[derive(Debug, Serialize)]
pub struct LintStats {
    pub lint_name: String,
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
    pub net_change: i64,
    pub total_change: usize,
}

/// Fold of the whole DiffTree into per-lint rows plus totals. The totals
/// are the element-wise sum over all rows.
#[derive(Debug, Default, Serialize)]
pub struct Statistics {
    pub total_added: usize,
    pub total_removed: usize,
    pub total_changed: usize,
    pub lints: Vec<LintStats>,
}

/// Everything a renderer needs: the tree, the statistics, and the carried-
/// through branch/commit metadata (never interpreted by the engine).
#[derive(Debug, Serialize)]
pub struct DiffReport {
    pub old_branch: String,
    pub new_branch: String,
    pub old_commit: String,
    pub new_commit: String,
    pub old_total: usize,
    pub new_total: usize,
    pub diffs: DiffTree,
    pub statistics: Statistics,
}
