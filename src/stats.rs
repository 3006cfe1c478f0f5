//! Statistics aggregator: folds a DiffTree into per-lint change counts.
//!
//! One pass over the tree, never re-reading the snapshots. Whole added or
//! removed projects and files count every contained diagnostic; each
//! modified pair contributes exactly 1 to its lint's `changed` count. Rows
//! come out sorted by total change descending, then lint name, so reports
//! are deterministic.

use crate::models::diff::{DiffTree, LintStats, Statistics};
use crate::models::Diagnostic;
use std::collections::HashMap;

#[derive(Default)]
struct Counts {
    added: usize,
    removed: usize,
    changed: usize,
}

fn count<'a>(
    diags: impl IntoIterator<Item = &'a Diagnostic>,
    by_lint: &mut HashMap<&'a str, Counts>,
    removed: bool,
) {
    for d in diags {
        let c = by_lint.entry(&d.lint_name).or_default();
        if removed {
            c.removed += 1;
        } else {
            c.added += 1;
        }
    }
}

/// Fold the entire DiffTree into per-lint rows plus a total row.
pub fn compute_statistics(tree: &DiffTree) -> Statistics {
    let mut by_lint: HashMap<&str, Counts> = HashMap::new();

    for p in &tree.added_projects {
        count(&p.diagnostics, &mut by_lint, false);
    }
    for p in &tree.removed_projects {
        count(&p.diagnostics, &mut by_lint, true);
    }
    for p in &tree.modified_projects {
        for f in &p.diffs.added_files {
            count(&f.diagnostics, &mut by_lint, false);
        }
        for f in &p.diffs.removed_files {
            count(&f.diagnostics, &mut by_lint, true);
        }
        for f in &p.diffs.modified_files {
            for l in &f.diffs.added_lines {
                count(&l.diagnostics, &mut by_lint, false);
            }
            for l in &f.diffs.removed_lines {
                count(&l.diagnostics, &mut by_lint, true);
            }
            for l in &f.diffs.modified_lines {
                for pair in &l.text_diffs {
                    // Old and new lint names agree by construction of the
                    // matcher.
                    by_lint.entry(&pair.old.lint_name).or_default().changed += 1;
                }
                count(&l.added, &mut by_lint, false);
                count(&l.removed, &mut by_lint, true);
            }
        }
    }

    let mut stats = Statistics::default();
    let mut lints: Vec<LintStats> = by_lint
        .into_iter()
        .map(|(lint_name, c)| LintStats {
            lint_name: lint_name.to_string(),
            added: c.added,
            removed: c.removed,
            changed: c.changed,
            net_change: c.added as i64 - c.removed as i64,
            total_change: c.added + c.removed + c.changed,
        })
        .collect();
    lints.sort_by(|a, b| {
        b.total_change
            .cmp(&a.total_change)
            .then_with(|| a.lint_name.cmp(&b.lint_name))
    });
    for row in &lints {
        stats.total_added += row.added;
        stats.total_removed += row.removed;
        stats.total_changed += row.changed;
    }
    stats.lints = lints;
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::diff_snapshots;
    use crate::models::snapshot::{RunOutput, Snapshot};
    use crate::models::{diag, Diagnostic};

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

    #[test]
    fn test_totals_equal_elementwise_sum_of_rows() {
        let old = snapshot(vec![
            ("gone", vec![diag("x", "a.py", 1, 0, "m"), diag("y", "a.py", 2, 0, "m")]),
            ("both", vec![diag("x", "b.py", 3, 0, "old")]),
        ]);
        let new = snapshot(vec![
            ("both", vec![diag("x", "b.py", 3, 0, "new"), diag("z", "c.py", 1, 0, "m")]),
            ("fresh", vec![diag("z", "d.py", 2, 0, "m")]),
        ]);
        let stats = compute_statistics(&diff_snapshots(&old, &new));
        let (mut added, mut removed, mut changed) = (0, 0, 0);
        for row in &stats.lints {
            added += row.added;
            removed += row.removed;
            changed += row.changed;
        }
        assert_eq!(stats.total_added, added);
        assert_eq!(stats.total_removed, removed);
        assert_eq!(stats.total_changed, changed);
        assert_eq!(stats.total_added, 2); // z in added file + z in added project
        assert_eq!(stats.total_removed, 2); // removed project "gone"
        assert_eq!(stats.total_changed, 1); // x message change
    }

    #[test]
    fn test_rows_sorted_by_total_change_then_name() {
        let old = snapshot(vec![("p", vec![
            diag("small", "a.py", 1, 0, "m"),
        ])]);
        let new = snapshot(vec![("p", vec![
            diag("small", "a.py", 1, 0, "m"),
            diag("big", "a.py", 2, 0, "m"),
            diag("big", "a.py", 3, 0, "m"),
            diag("also", "a.py", 4, 0, "m"),
        ])]);
        let stats = compute_statistics(&diff_snapshots(&old, &new));
        let names: Vec<_> = stats.lints.iter().map(|r| r.lint_name.as_str()).collect();
        assert_eq!(names, ["big", "also"]);
        assert_eq!(stats.lints[0].net_change, 2);
        assert_eq!(stats.lints[0].total_change, 2);
    }

    #[test]
    fn test_net_change_can_be_negative() {
        let old = snapshot(vec![("p", vec![
            diag("x", "a.py", 1, 0, "m"),
            diag("x", "b.py", 1, 0, "m"),
        ])]);
        let new = snapshot(vec![("p", vec![diag("x", "a.py", 1, 0, "m")])]);
        let stats = compute_statistics(&diff_snapshots(&old, &new));
        assert_eq!(stats.lints[0].net_change, -1);
        assert_eq!(stats.lints[0].removed, 1);
    }

    #[test]
    fn test_empty_tree_yields_all_zero_totals() {
        let stats = compute_statistics(&DiffTree::default());
        assert_eq!(stats.total_added, 0);
        assert_eq!(stats.total_removed, 0);
        assert_eq!(stats.total_changed, 0);
        assert!(stats.lints.is_empty());
    }
}
