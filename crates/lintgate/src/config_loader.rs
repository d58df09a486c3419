//! Configuration loading and validation.
//!
//! Configuration problems are the only fatal error class: everything is
//! checked before the pipeline starts.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use lintgate_types::{AnalyzerKind, FileTypeConfig, ThresholdConfig};

/// The on-disk configuration file (`lintgate.toml`).
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Source path pattern files must match to be considered at all.
    /// Supports a trailing `*` (direct children) or `**` (descendants).
    pub source_path: String,

    /// Scan only the change list between two git refs instead of the
    /// whole repository.
    #[serde(default)]
    pub scan_changed_files_only: bool,

    /// Pass the analyzers' cache flags.
    #[serde(default)]
    pub enable_scan_cache: bool,

    /// Baseline snapshot to suppress already-known violations.
    #[serde(default)]
    pub previous_violations_file: Option<PathBuf>,

    #[serde(default)]
    pub thresholds: ThresholdConfig,

    #[serde(rename = "file_type")]
    pub file_types: Vec<FileTypeConfig>,
}

pub fn load_scan_config(path: Option<&Path>) -> Result<ScanConfig> {
    let path = path.unwrap_or_else(|| Path::new("lintgate.toml"));
    debug!("loading config from '{}'", path.display());

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;

    let config: ScanConfig =
        toml::from_str(&text).with_context(|| format!("parse config '{}'", path.display()))?;

    validate(&config)?;
    Ok(config)
}

fn validate(config: &ScanConfig) -> Result<()> {
    if config.source_path.is_empty() {
        bail!("source_path must not be empty");
    }
    if config.file_types.is_empty() {
        bail!("at least one [[file_type]] is required");
    }

    for file_type in &config.file_types {
        if file_type.name.is_empty() {
            bail!("every [[file_type]] needs a name");
        }
        if file_type.file_extensions.is_empty() {
            bail!("file type '{}' has no file_extensions", file_type.name);
        }
        // Unknown analyzers are a per-type warning at scan time, not a
        // configuration error.
        if file_type.analyzer == AnalyzerKind::Unknown {
            warn!(
                "file type '{}' names an analyzer lintgate does not support",
                file_type.name
            );
        }
    }

    Ok(())
}
