use std::process::Command;

use tracing::debug;

use lintgate_domain::normalize_eslint_result;
use lintgate_types::{AnalyzerKind, EslintFileResult, FileTypeConfig, Violation};

use crate::analyzer::{name_key, AnalyzerAdapter, AnalyzerError};

const TOOL: &str = "eslint";

/// Runs ESLint through `npx` and parses its `--format json` output.
pub struct EslintAdapter;

impl AnalyzerAdapter for EslintAdapter {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Eslint
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
        let result_path = scratch.path().join("eslint-results.json");

        let mut cmd = Command::new("npx");
        cmd.arg("eslint")
            .args(["--format", "json"])
            .arg("--output-file")
            .arg(&result_path)
            .arg("--no-error-on-unmatched-pattern");

        // The first configured ruleset wins; ESLint takes a single config.
        if let Some(config) = file_type.rule_config_paths.first() {
            cmd.arg("--config").arg(config).arg("--no-eslintrc");
        }

        if cache_enabled {
            let cache = std::env::temp_dir()
                .join(".eslint-cache")
                .join(format!("{}-cache", name_key(file_type)));
            cmd.arg("--cache").arg("--cache-location").arg(&cache);
            debug!("eslint cache enabled at {}", cache.display());
        }

        cmd.args(files);

        debug!("running eslint on {} {} files", files.len(), file_type.name);

        // A non-zero exit only signals findings; the report file is the
        // contract.
        let output = cmd.output().map_err(|source| AnalyzerError::Invocation {
            tool: TOOL,
            file_type: file_type.name.clone(),
            source,
        })?;
        if !output.stderr.is_empty() {
            debug!("eslint stderr: {}", String::from_utf8_lossy(&output.stderr));
        }

        let raw = match std::fs::read_to_string(&result_path) {
            Ok(text) if !text.trim().is_empty() => text,
            // Missing or empty output means nothing was scanned, not an error.
            _ => return Ok(Vec::new()),
        };

        let results: Vec<EslintFileResult> =
            serde_json::from_str(&raw).map_err(|source| AnalyzerError::MalformedOutput {
                tool: TOOL,
                file_type: file_type.name.clone(),
                source,
            })?;

        Ok(results
            .iter()
            .flat_map(|r| normalize_eslint_result(r, &file_type.source_path_prefix))
            .collect())
    }
}
