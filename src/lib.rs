//! ecodiff core library.
//!
//! This crate exposes programmatic APIs for comparing two snapshots of
//! type-checker diagnostics collected across a corpus of projects, and for
//! reporting on a single snapshot.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `ingest`: Snapshot loading, validation, and failed-run exclusion.
//! - `parse`: Raw checker output line parser.
//! - `matcher`: Line-level matching of diagnostics between snapshots.
//! - `diff`: Hierarchical project/file/line diff builder.
//! - `stats`: Per-lint statistics folded from the diff tree.
//! - `report`: Flat single-snapshot ecosystem report.
//! - `models`: Diagnostic, snapshot index, and diff output structs.
//! - `output`: Human/JSON printers for diff/report.
//! - `utils`: Supporting helpers.

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod ingest;
pub mod matcher;
pub mod models;
pub mod output;
pub mod parse;
pub mod report;
pub mod stats;
pub mod utils;

pub use diff::{diff_report, diff_snapshots, DiffMeta};
pub use error::{EcodiffError, Result};
pub use ingest::{load_snapshot, LoadedSnapshot};
pub use models::snapshot::Snapshot;
pub use models::{Diagnostic, Level};
pub use stats::compute_statistics;
