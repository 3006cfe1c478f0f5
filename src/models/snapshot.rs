//! Snapshot input schema and the three-level lookup index.
//!
//! A snapshot is the full set of diagnostics produced by one checker run
//! across the corpus, indexed project → path → line. Every level preserves
//! first-seen order from the input, so iterating a snapshot (and therefore
//! every report derived from it) is reproducible byte-for-byte given the
//! same input order. Set-membership tests are O(1) via position maps.

use crate::error::{EcodiffError, Result};
use crate::models::Diagnostic;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
/// One project's result within a snapshot file, as produced by the
/// diagnostic-collection side. `time_s`/`return_code` classify failed runs
/// at ingestion; the diff engine itself never sees them.
pub struct RunOutput {
    pub project: String,
    #[serde(default)]
    pub project_location: Option<String>,
    #[serde(default, alias = "ty_commit")]
    pub checker_commit: Option<String>,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
    #[serde(default)]
    pub time_s: Option<f64>,
    #[serde(default)]
    pub return_code: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// On-disk snapshot format: `{"outputs": [...]}`.
pub struct SnapshotFile {
    pub outputs: Vec<RunOutput>,
}

/// Diagnostics sharing one line of one file.
#[derive(Debug)]
pub struct LineEntry {
    pub line: u32,
    pub diagnostics: Vec<Diagnostic>,
}

/// All diagnostics of one file, bucketed by line in first-seen order.
#[derive(Debug)]
pub struct FileEntry {
    pub path: String,
    lines: Vec<LineEntry>,
    by_line: HashMap<u32, usize>,
}

impl FileEntry {
    fn new(path: String) -> Self {
        FileEntry {
            path,
            lines: Vec::new(),
            by_line: HashMap::new(),
        }
    }

    fn push(&mut self, diag: Diagnostic) {
        let idx = match self.by_line.get(&diag.line) {
            Some(&i) => i,
            None => {
                self.lines.push(LineEntry {
                    line: diag.line,
                    diagnostics: Vec::new(),
                });
                self.by_line.insert(diag.line, self.lines.len() - 1);
                self.lines.len() - 1
            }
        };
        self.lines[idx].diagnostics.push(diag);
    }

    pub fn lines(&self) -> &[LineEntry] {
        &self.lines
    }

    pub fn get_line(&self, line: u32) -> Option<&LineEntry> {
        self.by_line.get(&line).map(|&i| &self.lines[i])
    }

    /// All diagnostics of the file in line-bucket order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.lines.iter().flat_map(|l| l.diagnostics.iter())
    }
}

/// One project's diagnostics, bucketed by file in first-seen order.
#[derive(Debug)]
pub struct ProjectEntry {
    pub project: String,
    pub project_location: Option<String>,
    files: Vec<FileEntry>,
    by_path: HashMap<String, usize>,
}

impl ProjectEntry {
    fn push(&mut self, diag: Diagnostic) {
        let idx = match self.by_path.get(&diag.path) {
            Some(&i) => i,
            None => {
                self.files.push(FileEntry::new(diag.path.clone()));
                self.by_path
                    .insert(diag.path.clone(), self.files.len() - 1);
                self.files.len() - 1
            }
        };
        self.files[idx].push(diag);
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn get_file(&self, path: &str) -> Option<&FileEntry> {
        self.by_path.get(path).map(|&i| &self.files[i])
    }

    /// All diagnostics of the project in file/line-bucket order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.files.iter().flat_map(|f| f.diagnostics())
    }
}

/// An indexed, read-only snapshot. Construction is O(n) in the number of
/// diagnostics; lookups at each level are O(1).
#[derive(Debug, Default)]
pub struct Snapshot {
    projects: Vec<ProjectEntry>,
    by_project: HashMap<String, usize>,
}

impl Snapshot {
    /// Build the index from run outputs, validating every diagnostic.
    ///
    /// Validation is fail-fast: the first malformed record aborts the whole
    /// construction, naming the offending project and file.
    pub fn from_outputs(outputs: Vec<RunOutput>) -> Result<Snapshot> {
        let mut snapshot = Snapshot::default();
        for output in outputs {
            if output.project.is_empty() {
                return Err(EcodiffError::MalformedRecord {
                    project: String::from("<unnamed>"),
                    path: String::new(),
                    reason: "empty project name".into(),
                });
            }
            let idx = match snapshot.by_project.get(&output.project) {
                Some(&i) => i,
                None => {
                    snapshot.projects.push(ProjectEntry {
                        project: output.project.clone(),
                        project_location: output.project_location.clone(),
                        files: Vec::new(),
                        by_path: HashMap::new(),
                    });
                    snapshot
                        .by_project
                        .insert(output.project.clone(), snapshot.projects.len() - 1);
                    snapshot.projects.len() - 1
                }
            };
            for diag in output.diagnostics {
                validate(&output.project, &diag)?;
                snapshot.projects[idx].push(diag);
            }
        }
        Ok(snapshot)
    }

    pub fn projects(&self) -> &[ProjectEntry] {
        &self.projects
    }

    pub fn get(&self, project: &str) -> Option<&ProjectEntry> {
        self.by_project.get(project).map(|&i| &self.projects[i])
    }

    pub fn contains(&self, project: &str) -> bool {
        self.by_project.contains_key(project)
    }

    /// Total diagnostic count across the snapshot.
    pub fn total_diagnostics(&self) -> usize {
        self.projects
            .iter()
            .map(|p| p.diagnostics().count())
            .sum()
    }
}

fn validate(project: &str, diag: &Diagnostic) -> Result<()> {
    let reject = |reason: &str| EcodiffError::MalformedRecord {
        project: project.to_string(),
        path: diag.path.clone(),
        reason: reason.into(),
    };
    if diag.path.is_empty() {
        return Err(reject("empty path"));
    }
    if diag.lint_name.is_empty() {
        return Err(reject("empty lint_name"));
    }
    if diag.line == 0 {
        return Err(reject("line must be >= 1"));
    }
    Ok(())
}
