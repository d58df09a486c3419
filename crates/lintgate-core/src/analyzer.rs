use lintgate_types::{AnalyzerKind, FileTypeConfig, Violation};

use crate::eslint::EslintAdapter;
use crate::pmd::PmdAdapter;

/// A specific tool failed to run or produced unreadable output.
///
/// Recovered per file type: the orchestrator logs the error and treats
/// the type as having zero violations.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("failed to create scratch directory for {tool}: {source}")]
    Scratch {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {tool} file list for file type '{file_type}': {source}")]
    FileList {
        tool: &'static str,
        file_type: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to run {tool} for file type '{file_type}': {source}")]
    Invocation {
        tool: &'static str,
        file_type: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {tool} output for file type '{file_type}': {source}")]
    MalformedOutput {
        tool: &'static str,
        file_type: String,
        #[source]
        source: serde_json::Error,
    },
}

/// One external static-analysis tool.
///
/// Implementations invoke the tool over the given files, parse its raw
/// JSON output, and return normalized violations. Errors are recoverable:
/// the orchestrator logs them and continues with the next file type.
// TODO: bound analyzer runtime; a hung eslint or pmd process currently
// blocks the scan indefinitely.
pub trait AnalyzerAdapter {
    fn kind(&self) -> AnalyzerKind;

    fn analyze(
        &self,
        file_type: &FileTypeConfig,
        files: &[String],
        cache_enabled: bool,
    ) -> Result<Vec<Violation>, AnalyzerError>;
}

/// Closed dispatch from the configured kind to its adapter.
///
/// `None` is the explicit unsupported-variant branch: the orchestrator
/// turns it into a warning and zero violations instead of aborting.
pub fn adapter_for(kind: AnalyzerKind) -> Option<Box<dyn AnalyzerAdapter>> {
    match kind {
        AnalyzerKind::Eslint => Some(Box::new(EslintAdapter)),
        AnalyzerKind::Pmd => Some(Box::new(PmdAdapter)),
        AnalyzerKind::Unknown => None,
    }
}

/// Scratch-file key derived from the file type name, shared by adapters
/// for cache locations.
pub(crate) fn name_key(file_type: &FileTypeConfig) -> String {
    file_type
        .name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
