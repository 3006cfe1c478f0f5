//! Output rendering for diff and report commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form is the
//! fixed schema renderers consume; `compose_*` functions are pure so the
//! shape can be snapshot-tested. Human output is a terminal summary: the
//! full tree is meant for JSON consumers.

use crate::models::diff::{DiffReport, DiffTree};
use crate::report::EcosystemReport;
use crate::utils::use_colors;
use owo_colors::OwoColorize;
use serde_json::Value as JsonVal;

/// Print a diff report in the requested format.
pub fn print_diff(report: &DiffReport, output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_diff_json(report)).unwrap()
        ),
        _ => print_diff_human(report, use_colors()),
    }
}

fn print_diff_human(report: &DiffReport, color: bool) {
    let header = format!(
        "{} ({}) -> {} ({}): {} -> {} diagnostics",
        report.old_branch,
        report.old_commit,
        report.new_branch,
        report.new_commit,
        report.old_total,
        report.new_total
    );
    if color {
        println!("{}", header.bold());
    } else {
        println!("{}", header);
    }

    for p in &report.diffs.removed_projects {
        let line = format!("- {} ({} diagnostics)", p.project, p.diagnostics.len());
        if color {
            println!("{}", line.red());
        } else {
            println!("{}", line);
        }
    }
    for p in &report.diffs.added_projects {
        let line = format!("+ {} ({} diagnostics)", p.project, p.diagnostics.len());
        if color {
            println!("{}", line.green());
        } else {
            println!("{}", line);
        }
    }
    for p in &report.diffs.modified_projects {
        let line = format!(
            "~ {} (files: +{} -{} ~{})",
            p.project,
            p.diffs.added_files.len(),
            p.diffs.removed_files.len(),
            p.diffs.modified_files.len()
        );
        if color {
            println!("{}", line.yellow());
        } else {
            println!("{}", line);
        }
        for f in &p.diffs.modified_files {
            for l in &f.diffs.modified_lines {
                for pair in &l.text_diffs {
                    println!("    {}:{}: [{}]", f.path, l.line, pair.old.lint_name);
                    println!("      old: {}", pair.old.message);
                    println!("      new: {}", pair.new.message);
                }
            }
        }
    }

    if report.diffs.is_empty() {
        println!("no changes");
        return;
    }

    println!();
    for row in &report.statistics.lints {
        println!(
            "  {:>5} {:>5} {:>5}  {}",
            format!("+{}", row.added),
            format!("-{}", row.removed),
            format!("~{}", row.changed),
            row.lint_name
        );
    }
    let summary = format!(
        "— Summary — added={} removed={} changed={}",
        report.statistics.total_added,
        report.statistics.total_removed,
        report.statistics.total_changed
    );
    if color {
        println!("{}", summary.bold());
    } else {
        println!("{}", summary);
    }
}

/// Print an ecosystem report in the requested format.
pub fn print_report(report: &EcosystemReport, output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_report_json(report)).unwrap()
        ),
        _ => {
            let color = use_colors();
            let header = format!(
                "{} diagnostics across {} projects (checker commit {})",
                report.total,
                report.projects.len(),
                report.checker_commit
            );
            if color {
                println!("{}", header.bold());
            } else {
                println!("{}", header);
            }
            for lint in &report.lints {
                println!("  {:>6}  {}", lint.count, lint.name);
            }
            if !report.skipped_projects.is_empty() {
                println!("skipped (too many diagnostics): {}", report.skipped_projects.join(", "));
            }
        }
    }
}

/// Compose the diff JSON object (pure) for renderers and tests.
pub fn compose_diff_json(report: &DiffReport) -> JsonVal {
    serde_json::to_value(report).unwrap()
}

/// Compose only the tree, matching the on-disk `--out` format.
pub fn compose_tree_json(tree: &DiffTree) -> JsonVal {
    serde_json::to_value(tree).unwrap()
}

/// Compose the ecosystem report JSON object (pure) for renderers and tests.
pub fn compose_report_json(report: &EcosystemReport) -> JsonVal {
    serde_json::to_value(report).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{diff_report, DiffMeta};
    use crate::models::snapshot::{RunOutput, Snapshot};
    use crate::models::{diag, Diagnostic};
    use crate::report::build_report;

    fn snapshot(outputs: Vec<(&str, Vec<Diagnostic>)>) -> Snapshot {
        Snapshot::from_outputs(
            outputs
                .into_iter()
                .map(|(project, diagnostics)| RunOutput {
                    project: project.into(),
                    project_location: None,
                    checker_commit: None,
                    diagnostics,
                    time_s: Some(1.0),
                    return_code: Some(0),
                })
                .collect(),
        )
        .unwrap()
    }

    fn meta() -> DiffMeta {
        DiffMeta {
            old_branch: "main".into(),
            new_branch: "fix".into(),
            old_commit: "aaaa".into(),
            new_commit: "bbbb".into(),
        }
    }

    #[test]
    fn test_compose_diff_json_shape() {
        let old = snapshot(vec![("p", vec![diag("x", "a.py", 3, 0, "m1")])]);
        let new = snapshot(vec![("p", vec![diag("x", "a.py", 3, 0, "m2")])]);
        let out = compose_diff_json(&diff_report(&old, &new, meta()));
        assert_eq!(out["old_branch"], "main");
        assert_eq!(out["diffs"]["modified_projects"][0]["project"], "p");
        let line = &out["diffs"]["modified_projects"][0]["diffs"]["modified_files"][0]["diffs"]
            ["modified_lines"][0];
        assert_eq!(line["line"], 3);
        assert_eq!(line["text_diffs"][0]["old"]["message"], "m1");
        assert_eq!(line["text_diffs"][0]["new"]["message"], "m2");
        assert_eq!(out["statistics"]["total_changed"], 1);
        assert_eq!(out["statistics"]["lints"][0]["lint_name"], "x");
    }

    #[test]
    fn test_compose_tree_json_top_level_keys() {
        let old = snapshot(vec![]);
        let new = snapshot(vec![("p", vec![diag("x", "a.py", 1, 0, "m")])]);
        let out = compose_tree_json(&crate::diff::diff_snapshots(&old, &new));
        assert!(out["added_projects"].is_array());
        assert!(out["removed_projects"].is_array());
        assert!(out["modified_projects"].is_array());
        assert_eq!(out["added_projects"][0]["diagnostics"][0]["lint_name"], "x");
    }

    #[test]
    fn test_compose_report_json_shape() {
        let snap = snapshot(vec![("p", vec![diag("x", "a.py", 1, 0, "m")])]);
        let out = compose_report_json(&build_report(&snap, "abc", 1000));
        assert_eq!(out["total"], 1);
        assert_eq!(out["diagnostics"][0]["project"], "p");
        assert_eq!(out["diagnostics"][0]["lint_name"], "x");
        assert_eq!(out["lints"][0]["count"], 1);
    }
}
