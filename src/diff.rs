//! Hierarchical diff builder: walks project → file → line across two
//! snapshots and produces the DiffTree.
//!
//! Subtrees present on one side only are emitted whole without any
//! matching (there is nothing to match against), and subtrees whose
//! recursive diff comes back empty are pruned entirely, so the tree never
//! contains an empty modified entry at any level. Presence tests go through
//! the snapshot index, keeping the whole construction O(n) in the combined
//! diagnostic count. Traversal follows the index's first-seen order:
//! removed entries in old-snapshot order, added and modified entries in
//! new-snapshot order.

use crate::matcher::match_line;
use crate::models::diff::{
    DiffReport, DiffTree, FileDiagnostics, FileDiffs, LineDiagnostics, LineDiffs, ModifiedFile,
    ModifiedProject, ProjectDiagnostics,
};
use crate::models::snapshot::{FileEntry, ProjectEntry, Snapshot};
use crate::stats::compute_statistics;
use rayon::prelude::*;

/// Branch/commit labels carried through to the report unchanged; the
/// engine never interprets them.
#[derive(Debug, Clone)]
pub struct DiffMeta {
    pub old_branch: String,
    pub new_branch: String,
    pub old_commit: String,
    pub new_commit: String,
}

/// Compute the full DiffTree between two snapshots.
pub fn diff_snapshots(old: &Snapshot, new: &Snapshot) -> DiffTree {
    let removed_projects = old
        .projects()
        .iter()
        .filter(|p| !new.contains(&p.project))
        .map(whole_project)
        .collect();

    let added_projects = new
        .projects()
        .iter()
        .filter(|p| !old.contains(&p.project))
        .map(whole_project)
        .collect();

    // Common projects are independent of one another; diff them in
    // parallel. par_iter keeps collection order, so output order still
    // follows the new snapshot's index.
    let modified_projects = new
        .projects()
        .par_iter()
        .filter_map(|new_proj| {
            let old_proj = old.get(&new_proj.project)?;
            let diffs = diff_files(old_proj, new_proj);
            if diffs.is_empty() {
                return None;
            }
            Some(ModifiedProject {
                project: new_proj.project.clone(),
                project_location: new_proj.project_location.clone(),
                diffs,
            })
        })
        .collect();

    DiffTree {
        added_projects,
        removed_projects,
        modified_projects,
    }
}

/// Diff two snapshots and bundle the tree, statistics, and totals with the
/// carried-through metadata into the renderer-facing report.
pub fn diff_report(old: &Snapshot, new: &Snapshot, meta: DiffMeta) -> DiffReport {
    let diffs = diff_snapshots(old, new);
    let statistics = compute_statistics(&diffs);
    DiffReport {
        old_branch: meta.old_branch,
        new_branch: meta.new_branch,
        old_commit: meta.old_commit,
        new_commit: meta.new_commit,
        old_total: old.total_diagnostics(),
        new_total: new.total_diagnostics(),
        diffs,
        statistics,
    }
}

fn whole_project(p: &ProjectEntry) -> ProjectDiagnostics {
    ProjectDiagnostics {
        project: p.project.clone(),
        project_location: p.project_location.clone(),
        diagnostics: p.diagnostics().cloned().collect(),
    }
}

fn whole_file(f: &FileEntry) -> FileDiagnostics {
    FileDiagnostics {
        path: f.path.clone(),
        diagnostics: f.diagnostics().cloned().collect(),
    }
}

fn diff_files(old: &ProjectEntry, new: &ProjectEntry) -> FileDiffs {
    let mut diffs = FileDiffs::default();
    for f in old.files() {
        if new.get_file(&f.path).is_none() {
            diffs.removed_files.push(whole_file(f));
        }
    }
    for f in new.files() {
        if old.get_file(&f.path).is_none() {
            diffs.added_files.push(whole_file(f));
        }
    }
    for new_file in new.files() {
        let Some(old_file) = old.get_file(&new_file.path) else {
            continue;
        };
        let line_diffs = diff_lines(old_file, new_file);
        if !line_diffs.is_empty() {
            diffs.modified_files.push(ModifiedFile {
                path: new_file.path.clone(),
                diffs: line_diffs,
            });
        }
    }
    diffs
}

fn diff_lines(old: &FileEntry, new: &FileEntry) -> LineDiffs {
    let mut diffs = LineDiffs::default();
    for l in old.lines() {
        if new.get_line(l.line).is_none() {
            diffs.removed_lines.push(LineDiagnostics {
                line: l.line,
                diagnostics: l.diagnostics.clone(),
            });
        }
    }
    for l in new.lines() {
        if old.get_line(l.line).is_none() {
            diffs.added_lines.push(LineDiagnostics {
                line: l.line,
                diagnostics: l.diagnostics.clone(),
            });
        }
    }
    for new_line in new.lines() {
        let Some(old_line) = old.get_line(new_line.line) else {
            continue;
        };
        let matched = match_line(new_line.line, &old_line.diagnostics, &new_line.diagnostics);
        if !matched.is_empty() {
            diffs.modified_lines.push(matched);
        }
    }
    diffs
}
