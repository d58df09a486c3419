//! Data types (config + violations + receipts) for lintgate.
//!
//! This crate is intentionally "dumb": pure DTOs with serde + schemars.

use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ── Schema Identifiers ─────────────────────────────────────────
pub const SCAN_SCHEMA_V1: &str = "lintgate.scan.v1";

/// Severity of a normalized violation.
///
/// `critical` and `high` share one gating bucket in every threshold
/// comparison; `low` and `info` never gate the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Info => "info",
        }
    }

    /// Whether this severity counts into the critical/high gating bucket.
    pub fn is_gating(self) -> bool {
        matches!(self, Severity::Critical | Severity::High)
    }
}

/// Which external analyzer a file type is routed to.
///
/// `Unknown` absorbs unrecognized kinds at deserialization time so a stray
/// config value surfaces as a per-type warning instead of aborting the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AnalyzerKind {
    Eslint,
    Pmd,
    #[serde(other)]
    Unknown,
}

impl AnalyzerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AnalyzerKind::Eslint => "eslint",
            AnalyzerKind::Pmd => "pmd",
            AnalyzerKind::Unknown => "unknown",
        }
    }
}

/// One configured grouping of source files, routed to a single analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FileTypeConfig {
    pub name: String,
    pub analyzer: AnalyzerKind,

    /// Plain path prefix files of this type must start with.
    pub source_path_prefix: String,

    /// Extensions (with leading dot) files of this type must end with.
    pub file_extensions: Vec<String>,

    /// Analyzer rule configuration files, in priority order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rule_config_paths: Vec<String>,
}

/// Change status reported by the version-control change list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChangeStatus {
    Added,
    Modified,
    Removed,
    Renamed,
}

impl ChangeStatus {
    pub fn is_added(self) -> bool {
        matches!(self, ChangeStatus::Added)
    }
}

/// One entry of a version-control change list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChangedFile {
    pub path: String,
    pub status: ChangeStatus,
}

/// Result of classifying a change list (or full repository listing)
/// against the configured source path.
///
/// Invariant: `new_files` and `modified_files` are disjoint, and
/// `filtered_files` is their union in new-then-modified order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ClassifiedFileSet {
    /// Raw size of the input listing, before source-path filtering.
    pub total_count: usize,
    pub new_files: BTreeSet<String>,
    pub modified_files: BTreeSet<String>,
    pub filtered_files: Vec<String>,
}

/// One normalized finding from a static-analysis tool.
///
/// Created only by the normalizer; immutable thereafter. The identity key
/// for baseline matching is (file, line, rule): message and severity
/// drift never block a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Violation {
    pub engine: String,
    pub rule: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ruleset: Option<String>,
    pub severity: Severity,
    pub message: String,
    pub file: String,
    pub line: u32,
    pub column: u32,
    #[serde(rename = "endline")]
    pub end_line: u32,
    #[serde(rename = "endcolumn")]
    pub end_column: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_url: Option<String>,
}

impl Violation {
    /// Identity key for deduplication and baseline matching.
    pub fn identity_key(&self) -> (String, u32, String) {
        (self.file.clone(), self.line, self.rule.clone())
    }
}

/// A previously recorded violation, loaded from baseline storage.
///
/// Only the identity key participates in matching, and every field
/// tolerates absence so partial or drifted records still parse.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct BaselineEntry {
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub rule: String,
}

impl BaselineEntry {
    pub fn identity_key(&self) -> (String, u32, String) {
        (self.file.clone(), self.line, self.rule.clone())
    }
}

/// Violation-count thresholds, split by file-change class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ThresholdConfig {
    #[serde(default)]
    pub max_critical_violations: u32,

    #[serde(default = "default_max_medium")]
    pub max_medium_violations: u32,

    #[serde(default)]
    pub strict_new_files: bool,

    #[serde(default = "default_max_modified")]
    pub max_violations_for_modified_files: u32,

    #[serde(default)]
    pub max_critical_violations_for_modified_files: u32,

    #[serde(default)]
    pub fail_on_quality_issues: bool,
}

fn default_max_medium() -> u32 {
    10
}

fn default_max_modified() -> u32 {
    10
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            max_critical_violations: 0,
            max_medium_violations: default_max_medium(),
            strict_new_files: false,
            max_violations_for_modified_files: default_max_modified(),
            max_critical_violations_for_modified_files: 0,
            fail_on_quality_issues: false,
        }
    }
}

/// Terminal output of the threshold evaluation.
///
/// `critical_count` sums critical and high severities; they share one
/// bucket in every comparison.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Verdict {
    pub total_violations: u32,
    pub critical_count: u32,
    pub medium_count: u32,
    pub new_file_violation_count: u32,
    pub modified_file_violation_count: u32,
    pub should_fail: bool,
    pub failure_reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// The JSON artifact a scan writes: violations plus the verdict.
///
/// A prior receipt's `violations` array is a valid baseline file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScanReceipt {
    pub schema: String,
    pub tool: ToolMeta,
    /// RFC 3339 timestamp of the run.
    pub generated_at: String,
    pub violations: Vec<Violation>,
    pub verdict: Verdict,
}

// ============================================================================
// Raw analyzer output shapes (parsed by the adapters, never re-emitted)
// ============================================================================

/// One file entry of ESLint's `--format json` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EslintFileResult {
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(default)]
    pub messages: Vec<EslintMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct EslintMessage {
    #[serde(default, rename = "ruleId")]
    pub rule_id: Option<String>,
    #[serde(default)]
    pub severity: u32,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub column: Option<u32>,
    #[serde(default, rename = "endLine")]
    pub end_line: Option<u32>,
    #[serde(default, rename = "endColumn")]
    pub end_column: Option<u32>,
}

/// PMD's `--format json` report envelope.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct PmdReport {
    #[serde(default)]
    pub files: Vec<PmdFileResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct PmdFileResult {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub violations: Vec<PmdViolation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct PmdViolation {
    #[serde(default)]
    pub rule: String,
    #[serde(default)]
    pub ruleset: Option<String>,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub beginline: Option<u32>,
    #[serde(default)]
    pub endline: Option<u32>,
    #[serde(default)]
    pub begincolumn: Option<u32>,
    #[serde(default)]
    pub endcolumn: Option<u32>,
    #[serde(default, rename = "externalInfoUrl")]
    pub external_info_url: Option<String>,
}
