use std::process::Command;

use tracing::debug;

use lintgate_domain::normalize_pmd_report;
use lintgate_types::{AnalyzerKind, FileTypeConfig, PmdReport, Violation};

use crate::analyzer::{name_key, AnalyzerAdapter, AnalyzerError};

const TOOL: &str = "pmd";

/// Runs `pmd check` with a file list and parses its JSON report.
pub struct PmdAdapter;

impl AnalyzerAdapter for PmdAdapter {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Pmd
    }

    fn analyze(
        &self,
        file_type: &FileTypeConfig,
        files: &[String],
        cache_enabled: bool,
    ) -> Result<Vec<Violation>, AnalyzerError> {
        let scratch = tempfile::tempdir().map_err(|source| AnalyzerError::Scratch {
            tool: TOOL,
            source,
        })?;
        let key = name_key(file_type);

        let list_path = scratch.path().join(format!("{key}-files-to-scan.txt"));
        std::fs::write(&list_path, files.join("\n")).map_err(|source| AnalyzerError::FileList {
            tool: TOOL,
            file_type: file_type.name.clone(),
            source,
        })?;

        let report_path = scratch.path().join("pmd-report.json");

        let mut cmd = Command::new("pmd");
        cmd.arg("check")
            .arg("--file-list")
            .arg(&list_path)
            .args(["--format", "json", "--no-progress"])
            .arg("--report-file")
            .arg(&report_path);

        if !file_type.rule_config_paths.is_empty() {
            cmd.arg("--rulesets").arg(file_type.rule_config_paths.join(","));
        }

        if cache_enabled {
            let cache = std::env::temp_dir()
                .join(".pmd-cache")
                .join(format!("{key}-cache.bin"));
            cmd.arg("--cache").arg(&cache);
            debug!("pmd cache enabled at {}", cache.display());
        }

        debug!("running pmd on {} {} files", files.len(), file_type.name);

        // PMD exits non-zero when violations are found; the report file is
        // the contract.
        let output = cmd.output().map_err(|source| AnalyzerError::Invocation {
            tool: TOOL,
            file_type: file_type.name.clone(),
            source,
        })?;
        if !output.stderr.is_empty() {
            debug!("pmd stderr: {}", String::from_utf8_lossy(&output.stderr));
        }

        let raw = match std::fs::read_to_string(&report_path) {
            Ok(text) if !text.trim().is_empty() => text,
            _ => {
                // Some PMD setups write the report to stdout instead.
                let stdout = String::from_utf8_lossy(&output.stdout);
                if stdout.trim_start().starts_with('{') {
                    stdout.into_owned()
                } else {
                    return Ok(Vec::new());
                }
            }
        };

        let report: PmdReport =
            serde_json::from_str(&raw).map_err(|source| AnalyzerError::MalformedOutput {
                tool: TOOL,
                file_type: file_type.name.clone(),
                source,
            })?;

        Ok(normalize_pmd_report(&report, &file_type.source_path_prefix))
    }
}
