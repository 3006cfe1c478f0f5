//! Snapshot ingestion: load a snapshot JSON file, validate it, and build
//! the index the diff engine runs on.
//!
//! Ingestion is where everything that can fail, fails: unreadable files,
//! invalid JSON, malformed records, and snapshots mixing checker commits
//! all abort the load (no partial snapshots). Failed runs — timeouts and
//! abnormal exits — are excluded here and surfaced to the operator, so the
//! diff engine only ever sees successful, well-formed runs.

use crate::error::{EcodiffError, Result};
use crate::models::snapshot::{RunOutput, Snapshot, SnapshotFile};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Why a run was excluded from the snapshot.
pub enum RunStatus {
    /// No return code recorded: the checker was killed by the harness.
    Timeout,
    /// The checker exited with a code outside {0, 1} or recorded no timing.
    AbnormalExit,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Timeout => write!(f, "timeout"),
            RunStatus::AbnormalExit => write!(f, "abnormal exit"),
        }
    }
}

/// A project excluded at ingestion, for the operator note.
#[derive(Debug)]
pub struct SkippedRun {
    pub project: String,
    pub status: RunStatus,
}

/// The result of loading one snapshot file.
#[derive(Debug)]
pub struct LoadedSnapshot {
    pub snapshot: Snapshot,
    /// The single checker commit the snapshot was produced with, or
    /// `"unknown"` when none was recorded.
    pub checker_commit: String,
    pub skipped: Vec<SkippedRun>,
}

/// Classify a failed run, or `None` when the run succeeded.
fn run_failure(output: &RunOutput) -> Option<RunStatus> {
    match output.return_code {
        None => Some(RunStatus::Timeout),
        Some(code) if code != 0 && code != 1 => Some(RunStatus::AbnormalExit),
        Some(_) if output.time_s.is_none() => Some(RunStatus::AbnormalExit),
        Some(_) => None,
    }
}

/// Extract the single checker commit across all outputs.
///
/// `unknown` entries are discarded when a real commit is present; two
/// distinct real commits are an error, since diffing such a snapshot
/// against anything would be meaningless.
fn extract_commit(outputs: &[RunOutput]) -> Result<String> {
    let mut commits: BTreeSet<&str> = outputs
        .iter()
        .filter_map(|o| o.checker_commit.as_deref())
        .collect();
    commits.remove("unknown");
    match commits.len() {
        0 => Ok(String::from("unknown")),
        1 => Ok(commits.into_iter().next().unwrap_or_default().to_string()),
        _ => Err(EcodiffError::MixedCommits {
            commits: commits.into_iter().map(str::to_string).collect(),
        }),
    }
}

/// Load and index a snapshot file.
///
/// `ignore_messages` drops diagnostics whose message contains any of the
/// given substrings before indexing (known-bad checker output the operator
/// has configured away).
pub fn load_snapshot(path: &Path, ignore_messages: &[String]) -> Result<LoadedSnapshot> {
    let content = fs::read_to_string(path).map_err(|source| EcodiffError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let file: SnapshotFile =
        serde_json::from_str(&content).map_err(|source| EcodiffError::Json {
            path: path.display().to_string(),
            source,
        })?;
    from_file(file, ignore_messages)
}

/// Ingestion over already-parsed outputs; `load_snapshot` is the file
/// front-end for this.
pub fn from_file(file: SnapshotFile, ignore_messages: &[String]) -> Result<LoadedSnapshot> {
    let checker_commit = extract_commit(&file.outputs)?;

    let mut skipped = Vec::new();
    let mut kept = Vec::with_capacity(file.outputs.len());
    for mut output in file.outputs {
        if let Some(status) = run_failure(&output) {
            skipped.push(SkippedRun {
                project: output.project.clone(),
                status,
            });
            continue;
        }
        if !ignore_messages.is_empty() {
            output
                .diagnostics
                .retain(|d| !ignore_messages.iter().any(|m| d.message.contains(m)));
        }
        kept.push(output);
    }

    Ok(LoadedSnapshot {
        snapshot: Snapshot::from_outputs(kept)?,
        checker_commit,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::diag;
    use std::io::Write;
    use tempfile::tempdir;

    fn output(project: &str, commit: Option<&str>) -> RunOutput {
        RunOutput {
            project: project.into(),
            project_location: None,
            checker_commit: commit.map(str::to_string),
            diagnostics: vec![diag("x", "a.py", 1, 0, "some message")],
            time_s: Some(1.5),
            return_code: Some(0),
        }
    }

    #[test]
    fn test_load_snapshot_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("old.json");
        let mut f = fs::File::create(&path).unwrap();
        write!(
            f,
            "{}",
            r#"{"outputs": [{
                "project": "p",
                "project_location": "https://github.com/org/p",
                "ty_commit": "abc1234",
                "diagnostics": [{
                    "level": "error",
                    "lint_name": "unresolved-import",
                    "path": "a.py",
                    "line": 3,
                    "column": 7,
                    "message": "cannot resolve"
                }],
                "time_s": 2.5,
                "return_code": 1
            }]}"#
        )
        .unwrap();

        let loaded = load_snapshot(&path, &[]).unwrap();
        assert_eq!(loaded.checker_commit, "abc1234");
        assert_eq!(loaded.snapshot.total_diagnostics(), 1);
        assert!(loaded.skipped.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load_snapshot(&dir.path().join("nope.json"), &[]).unwrap_err();
        assert!(matches!(err, EcodiffError::Io { .. }));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        let err = load_snapshot(&path, &[]).unwrap_err();
        assert!(matches!(err, EcodiffError::Json { .. }));
    }

    #[test]
    fn test_failed_runs_are_skipped() {
        let timeout = RunOutput {
            return_code: None,
            ..output("slow", Some("abc"))
        };
        let crashed = RunOutput {
            return_code: Some(101),
            ..output("crashy", Some("abc"))
        };
        let loaded = from_file(
            SnapshotFile {
                outputs: vec![output("ok", Some("abc")), timeout, crashed],
            },
            &[],
        )
        .unwrap();
        assert_eq!(loaded.snapshot.projects().len(), 1);
        assert_eq!(loaded.skipped.len(), 2);
        assert_eq!(loaded.skipped[0].project, "slow");
        assert_eq!(loaded.skipped[0].status, RunStatus::Timeout);
        assert_eq!(loaded.skipped[1].status, RunStatus::AbnormalExit);
    }

    #[test]
    fn test_missing_time_with_clean_exit_is_abnormal() {
        let odd = RunOutput {
            time_s: None,
            ..output("odd", Some("abc"))
        };
        let loaded = from_file(SnapshotFile { outputs: vec![odd] }, &[]).unwrap();
        assert_eq!(loaded.skipped[0].status, RunStatus::AbnormalExit);
    }

    #[test]
    fn test_unknown_commits_are_discarded() {
        let loaded = from_file(
            SnapshotFile {
                outputs: vec![
                    output("p1", Some("unknown")),
                    output("p2", Some("abc1234")),
                    output("p3", None),
                ],
            },
            &[],
        )
        .unwrap();
        assert_eq!(loaded.checker_commit, "abc1234");
    }

    #[test]
    fn test_no_commit_at_all_is_unknown() {
        let loaded = from_file(
            SnapshotFile {
                outputs: vec![output("p", None)],
            },
            &[],
        )
        .unwrap();
        assert_eq!(loaded.checker_commit, "unknown");
    }

    #[test]
    fn test_mixed_commits_rejected() {
        let err = from_file(
            SnapshotFile {
                outputs: vec![output("p1", Some("aaa")), output("p2", Some("bbb"))],
            },
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, EcodiffError::MixedCommits { .. }));
    }

    #[test]
    fn test_ignore_messages_filters_before_indexing() {
        let mut o = output("p", Some("abc"));
        o.diagnostics.push(diag("x", "a.py", 2, 0, "known-bad overload noise"));
        let loaded = from_file(
            SnapshotFile { outputs: vec![o] },
            &[String::from("overload noise")],
        )
        .unwrap();
        assert_eq!(loaded.snapshot.total_diagnostics(), 1);
    }
}
