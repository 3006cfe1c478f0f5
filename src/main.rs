//! ecodiff CLI binary entry point.
//! Delegates to modules for ingestion, diffing, and reporting, and prints
//! results.

mod cli;
mod config;
mod diff;
mod error;
mod ingest;
mod matcher;
mod models;
mod output;
mod parse;
mod report;
mod stats;
mod utils;

use clap::Parser;
use cli::{Cli, Commands};
use ingest::LoadedSnapshot;
use std::fs;

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Diff {
            old,
            new,
            old_name,
            new_name,
            output,
            out,
            dir,
        } => {
            let eff = config::resolve_effective(dir.as_deref(), output.as_deref());
            if eff.output != "json" && !eff.ignore_messages.is_empty() {
                eprintln!(
                    "{} {}",
                    utils::info_prefix(),
                    format!(
                        "Ignoring diagnostics with messages containing: [{}]",
                        eff.ignore_messages.join(", ")
                    )
                );
            }
            let old_loaded = load_or_exit(&old, &eff.ignore_messages);
            let new_loaded = load_or_exit(&new, &eff.ignore_messages);

            let meta = diff::DiffMeta {
                old_branch: old_name.unwrap_or_else(|| short(&old_loaded.checker_commit)),
                new_branch: new_name.unwrap_or_else(|| short(&new_loaded.checker_commit)),
                old_commit: old_loaded.checker_commit.clone(),
                new_commit: new_loaded.checker_commit.clone(),
            };
            let report = diff::diff_report(&old_loaded.snapshot, &new_loaded.snapshot, meta);
            output::print_diff(&report, &eff.output);

            if let Some(out_path) = out {
                write_json(&out_path, &output::compose_diff_json(&report));
            }
        }
        Commands::Report {
            snapshot,
            output,
            out,
            dir,
        } => {
            let eff = config::resolve_effective(dir.as_deref(), output.as_deref());
            let loaded = load_or_exit(&snapshot, &eff.ignore_messages);
            let report = report::build_report(
                &loaded.snapshot,
                &loaded.checker_commit,
                eff.max_project_diagnostics,
            );
            output::print_report(&report, &eff.output);

            if let Some(out_path) = out {
                write_json(&out_path, &output::compose_report_json(&report));
            }
        }
        Commands::Parse {
            input,
            location,
            commit,
        } => {
            let content = match fs::read_to_string(&input) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!(
                        "{} {}",
                        utils::error_prefix(),
                        format!("failed to read {}: {}", input, e)
                    );
                    std::process::exit(2);
                }
            };
            let parser = parse::DiagnosticsParser::new(location, commit);
            let diagnostics = parser.parse(&content);
            println!("{}", serde_json::to_string_pretty(&diagnostics).unwrap());
        }
    }
}

/// Load a snapshot, noting excluded failed runs; exit 2 on ingestion errors.
fn load_or_exit(path: &str, ignore_messages: &[String]) -> LoadedSnapshot {
    match ingest::load_snapshot(std::path::Path::new(path), ignore_messages) {
        Ok(loaded) => {
            for run in &loaded.skipped {
                eprintln!(
                    "{} {}",
                    utils::note_prefix(),
                    format!("excluding project '{}' ({})", run.project, run.status)
                );
            }
            loaded
        }
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            std::process::exit(2);
        }
    }
}

fn write_json(path: &str, value: &serde_json::Value) {
    let pretty = serde_json::to_string_pretty(value).unwrap();
    if let Err(e) = fs::write(path, pretty) {
        eprintln!(
            "{} {}",
            utils::error_prefix(),
            format!("failed to write {}: {}", path, e)
        );
        std::process::exit(2);
    }
}

fn short(commit: &str) -> String {
    commit.chars().take(7).collect()
}
