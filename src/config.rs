//! Configuration discovery and effective settings resolution.
//!
//! ecodiff reads `ecodiff.toml|yaml|yml` from the working directory (or
//! closest ancestor) and merges it with CLI flags.
//! Defaults:
//! - `output`: `human`
//! - `[filter].ignore_messages`: empty
//! - `[report].max_project_diagnostics`: 1000
//!
//! Overrides precedence: CLI > config file > defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_MAX_PROJECT_DIAGNOSTICS: usize = 1000;

#[derive(Debug, Default, Deserialize, Clone)]
/// Ingestion filters under `[filter]`.
pub struct FilterCfg {
    /// Diagnostics whose message contains any of these substrings are
    /// dropped at ingestion.
    pub ignore_messages: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Ecosystem-report settings under `[report]`.
pub struct ReportCfg {
    pub max_project_diagnostics: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `ecodiff.toml|yaml`.
pub struct EcodiffConfig {
    pub output: Option<String>,
    #[serde(default)]
    pub filter: Option<FilterCfg>,
    #[serde(default)]
    pub report: Option<ReportCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub root: PathBuf,
    pub output: String,
    pub ignore_messages: Vec<String>,
    pub max_project_diagnostics: usize,
}

/// Walk upward from `start` until an `ecodiff.toml|yaml|yml` or a `.git`
/// directory is found.
pub fn detect_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("ecodiff.toml").exists()
            || cur.join("ecodiff.yaml").exists()
            || cur.join("ecodiff.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `EcodiffConfig` from `ecodiff.toml` or `ecodiff.yaml|yml` if present.
pub fn load_config(root: &Path) -> Option<EcodiffConfig> {
    let toml_path = root.join("ecodiff.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: EcodiffConfig = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["ecodiff.yaml", "ecodiff.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: EcodiffConfig = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli_dir: Option<&str>, cli_output: Option<&str>) -> Effective {
    let start = PathBuf::from(cli_dir.unwrap_or("."));
    let root = detect_root(&start);
    let cfg = load_config(&root).unwrap_or_default();

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let ignore_messages = cfg
        .filter
        .as_ref()
        .and_then(|f| f.ignore_messages.clone())
        .unwrap_or_default();

    let max_project_diagnostics = cfg
        .report
        .as_ref()
        .and_then(|r| r.max_project_diagnostics)
        .unwrap_or(DEFAULT_MAX_PROJECT_DIAGNOSTICS);

    Effective {
        root,
        output,
        ignore_messages,
        max_project_diagnostics,
    }
}
