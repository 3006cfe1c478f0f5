//! Error types for snapshot ingestion.
//!
//! The diff and statistics computations are total over validated input and
//! never fail; everything that can go wrong happens at ingestion time and
//! aborts the load for that snapshot (no partial snapshots).

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EcodiffError>;

#[derive(Debug, Error)]
pub enum EcodiffError {
    /// A diagnostic failed validation. Carries enough context to point the
    /// operator at the upstream source.
    #[error("malformed diagnostic in project '{project}', file '{path}': {reason}")]
    MalformedRecord {
        project: String,
        path: String,
        reason: String,
    },

    /// A snapshot file mixes diagnostics from more than one checker commit.
    #[error("snapshot must contain diagnostics from a single checker commit, found: {commits:?}")]
    MixedCommits { commits: Vec<String> },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
