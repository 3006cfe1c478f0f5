//! Single-snapshot ecosystem report: a flat, filterable table of every
//! diagnostic with project/lint/level facet counts.
//!
//! This is a thin consumer of the same diagnostic type the diff engine
//! uses; rendering stays external and consumes the serialized schema.
//! Outlier projects with more diagnostics than the configured cap are
//! excluded from the table and listed by name instead.

use crate::models::snapshot::Snapshot;
use crate::models::Diagnostic;
use serde::Serialize;
use std::collections::BTreeMap;

/// One table row: a diagnostic annotated with the project it came from.
#[derive(Debug, Serialize)]
pub struct ReportRow {
    pub project: String,
    pub project_location: Option<String>,
    #[serde(flatten)]
    pub diagnostic: Diagnostic,
}

/// A facet value with its diagnostic count.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct FacetCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct EcosystemReport {
    pub checker_commit: String,
    pub total: usize,
    pub diagnostics: Vec<ReportRow>,
    /// Per-project counts, alphabetical.
    pub projects: Vec<FacetCount>,
    /// Per-lint counts, most frequent first.
    pub lints: Vec<FacetCount>,
    /// Per-level counts, alphabetical.
    pub levels: Vec<FacetCount>,
    /// Projects excluded for exceeding the diagnostics cap.
    pub skipped_projects: Vec<String>,
}

/// Build the flat report from an indexed snapshot.
pub fn build_report(
    snapshot: &Snapshot,
    checker_commit: &str,
    max_project_diagnostics: usize,
) -> EcosystemReport {
    let mut diagnostics = Vec::new();
    let mut skipped_projects = Vec::new();
    let mut projects: BTreeMap<String, usize> = BTreeMap::new();
    let mut lints: BTreeMap<String, usize> = BTreeMap::new();
    let mut levels: BTreeMap<String, usize> = BTreeMap::new();

    for project in snapshot.projects() {
        let count = project.diagnostics().count();
        if count > max_project_diagnostics {
            skipped_projects.push(project.project.clone());
            continue;
        }
        for diag in project.diagnostics() {
            *projects.entry(project.project.clone()).or_default() += 1;
            *lints.entry(diag.lint_name.clone()).or_default() += 1;
            *levels.entry(diag.level.to_string()).or_default() += 1;
            diagnostics.push(ReportRow {
                project: project.project.clone(),
                project_location: project.project_location.clone(),
                diagnostic: diag.clone(),
            });
        }
    }

    let facet = |map: BTreeMap<String, usize>| -> Vec<FacetCount> {
        map.into_iter()
            .map(|(name, count)| FacetCount { name, count })
            .collect()
    };
    let mut lint_facets = facet(lints);
    lint_facets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    EcosystemReport {
        checker_commit: checker_commit.to_string(),
        total: diagnostics.len(),
        diagnostics,
        projects: facet(projects),
        lints: lint_facets,
        levels: facet(levels),
        skipped_projects,
    }
}
