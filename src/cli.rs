//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ecodiff",
    version,
    about = "Diff type-checker diagnostics across an ecosystem of projects",
    long_about = "ecodiff — compare two snapshots of type-checker diagnostics collected across a corpus of projects and report what changed.\n\nConfiguration precedence: CLI > ecodiff.toml > defaults.",
    after_help = "Examples:\n  ecodiff diff old.json new.json --old-name main --new-name my-branch\n  ecodiff diff old.json new.json --output json --out diff.json\n  ecodiff report diagnostics.json --output json\n  ecodiff parse checker-output.txt --location https://github.com/org/proj --commit abc1234",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for diffing, reporting, and parsing.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current ecodiff version.")]
    Version,
    /// Diff two diagnostic snapshots
    #[command(
        about = "Diff two snapshots",
        long_about = "Compare an old and a new snapshot file and report added, removed, and modified diagnostics per project, file, and line, plus per-lint statistics.",
        after_help = "Examples:\n  ecodiff diff old.json new.json\n  ecodiff diff old.json new.json --old-name main --new-name fix --out diff.json"
    )]
    Diff {
        #[arg(help = "Old snapshot JSON file")]
        old: String,
        #[arg(help = "New snapshot JSON file")]
        new: String,
        #[arg(long, help = "Display name for the old snapshot (default: its commit)")]
        old_name: Option<String>,
        #[arg(long, help = "Display name for the new snapshot (default: its commit)")]
        new_name: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Also write the full diff report JSON to this file")]
        out: Option<String>,
        #[arg(long, help = "Directory to resolve ecodiff.toml from (default: current dir)")]
        dir: Option<String>,
    },
    /// Flat report over a single snapshot
    #[command(
        about = "Report on one snapshot",
        long_about = "Produce the flat filterable table of all diagnostics in one snapshot, with per-project, per-lint, and per-level counts.",
        after_help = "Examples:\n  ecodiff report diagnostics.json --output json --out report.json"
    )]
    Report {
        #[arg(help = "Snapshot JSON file")]
        snapshot: String,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Also write the report JSON to this file")]
        out: Option<String>,
        #[arg(long, help = "Directory to resolve ecodiff.toml from (default: current dir)")]
        dir: Option<String>,
    },
    /// Parse raw checker output into diagnostics
    #[command(
        about = "Parse raw checker output",
        long_about = "Parse diagnostic lines from raw checker output (both historical formats) and emit them as JSON.",
        after_help = "Examples:\n  ecodiff parse output.txt\n  ecodiff parse output.txt --location https://github.com/org/proj --commit abc1234"
    )]
    Parse {
        #[arg(help = "File with raw checker output")]
        input: String,
        #[arg(long, help = "Project repository URL, used to build source links")]
        location: Option<String>,
        #[arg(long, help = "Project commit hash, used to build source links")]
        commit: Option<String>,
    },
}
