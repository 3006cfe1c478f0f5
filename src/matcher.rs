//! Line-level matcher: classifies the diagnostics on one line of one file
//! as unchanged, modified, removed, or added between two snapshots.
//!
//! Diagnostics are grouped by lint and paired positionally within each
//! lint's group. Same-lint duplicates on one line are rare; pairing them by
//! position rather than by column or message similarity is a documented
//! simplification (see DESIGN.md), and the pairing is never second-guessed.
//! Cost is O(k) in diagnostics-per-line.

use crate::models::diff::{MessageChange, ModifiedLine};
use crate::models::Diagnostic;
use std::collections::HashMap;

/// Match the diagnostics on one line between the old and new snapshots.
///
/// Unchanged pairs (same lint, same message) are dropped. Pairs whose
/// messages differ become `text_diffs` entries carrying both records
/// verbatim. Unpaired diagnostics become `removed`/`added`. The result
/// `is_empty()` iff nothing on the line changed.
pub fn match_line(line: u32, old: &[Diagnostic], new: &[Diagnostic]) -> ModifiedLine {
    let old_by_lint = group_by_lint(old);
    let new_by_lint = group_by_lint(new);

    // Lints in first-seen order across old then new, so output order is
    // reproducible.
    let mut lints: Vec<&str> = Vec::new();
    for d in old.iter().chain(new) {
        if !lints.contains(&d.lint_name.as_str()) {
            lints.push(&d.lint_name);
        }
    }

    let mut result = ModifiedLine {
        line,
        ..Default::default()
    };
    let empty: Vec<&Diagnostic> = Vec::new();
    for lint in lints {
        let olds = old_by_lint.get(lint).unwrap_or(&empty);
        let news = new_by_lint.get(lint).unwrap_or(&empty);
        let paired = olds.len().min(news.len());
        for (o, n) in olds.iter().zip(news.iter()) {
            if o.message != n.message {
                result.text_diffs.push(MessageChange {
                    old: (*o).clone(),
                    new: (*n).clone(),
                });
            }
        }
        for o in &olds[paired..] {
            result.removed.push((*o).clone());
        }
        for n in &news[paired..] {
            result.added.push((*n).clone());
        }
    }
    result
}

fn group_by_lint(diags: &[Diagnostic]) -> HashMap<&str, Vec<&Diagnostic>> {
    let mut map: HashMap<&str, Vec<&Diagnostic>> = HashMap::new();
    for d in diags {
        map.entry(&d.lint_name).or_default().push(d);
    }
    map
}
