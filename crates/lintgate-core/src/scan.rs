use std::path::PathBuf;

use tracing::{info, warn};

use lintgate_domain::{diff_against_baseline, evaluate_thresholds};
use lintgate_types::{
    ClassifiedFileSet, FileTypeConfig, ScanReceipt, ThresholdConfig, ToolMeta, Violation,
    SCAN_SCHEMA_V1,
};

use crate::baseline::{load_baseline, BaselineLoad};
use crate::orchestrate::run_analysis;

/// Everything a scan needs beyond the classified file set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPlan {
    pub file_types: Vec<FileTypeConfig>,
    pub thresholds: ThresholdConfig,
    pub cache_enabled: bool,
    pub previous_violations_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRun {
    pub receipt: ScanReceipt,
    pub new_file_violations: Vec<Violation>,
    pub modified_file_violations: Vec<Violation>,
}

/// The full pipeline: analysis, baseline suppression, file-class split,
/// threshold evaluation. Strictly sequential; no error after analysis
/// starts can prevent the verdict.
pub fn run_scan(plan: &ScanPlan, classified: &ClassifiedFileSet, generated_at: String) -> ScanRun {
    let violations = run_analysis(&plan.file_types, &classified.filtered_files, plan.cache_enabled);
    assemble_run(plan, classified, violations, generated_at)
}

fn assemble_run(
    plan: &ScanPlan,
    classified: &ClassifiedFileSet,
    mut violations: Vec<Violation>,
    generated_at: String,
) -> ScanRun {
    if let Some(baseline_path) = &plan.previous_violations_file {
        info!("comparing with baseline from {}", baseline_path.display());
        match load_baseline(baseline_path) {
            BaselineLoad::Loaded(entries) => {
                info!("loaded {} violations from baseline", entries.len());
                violations = diff_against_baseline(violations, &entries);
                info!("found {} new violations not in the baseline", violations.len());
            }
            BaselineLoad::Degraded { reason } => warn!("{reason}"),
        }
    }

    let new_file_violations = violations_for_files(&violations, &classified.new_files);
    let modified_file_violations = violations_for_files(&violations, &classified.modified_files);

    let verdict = evaluate_thresholds(
        &violations,
        &new_file_violations,
        &modified_file_violations,
        &plan.thresholds,
    );

    ScanRun {
        receipt: ScanReceipt {
            schema: SCAN_SCHEMA_V1.to_string(),
            tool: ToolMeta {
                name: "lintgate".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            generated_at,
            violations,
            verdict,
        },
        new_file_violations,
        modified_file_violations,
    }
}

fn violations_for_files(
    violations: &[Violation],
    files: &std::collections::BTreeSet<String>,
) -> Vec<Violation> {
    violations
        .iter()
        .filter(|v| files.iter().any(|f| belongs_to(&v.file, f)))
        .cloned()
        .collect()
}

/// Whether a normalized violation path refers to a classified file.
///
/// Tool paths can still carry prefixes the change list lacks, so a
/// suffix match backs up the exact comparison.
fn belongs_to(violation_file: &str, file: &str) -> bool {
    violation_file == file || violation_file.ends_with(file)
}
