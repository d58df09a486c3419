use tracing::{info, warn};

use lintgate_domain::filter_by_file_type;
use lintgate_types::{AnalyzerKind, FileTypeConfig, Severity, Violation};

use crate::analyzer::{adapter_for, AnalyzerAdapter, AnalyzerError};

/// Run every configured file type through its analyzer, in declaration
/// order, and concatenate the normalized violations.
///
/// One file type's failure never blocks the others: unsupported kinds and
/// adapter errors are logged and contribute zero violations.
pub fn run_analysis(
    file_types: &[FileTypeConfig],
    all_files: &[String],
    cache_enabled: bool,
) -> Vec<Violation> {
    run_analysis_with_dispatch(file_types, all_files, cache_enabled, adapter_for)
}

fn run_analysis_with_dispatch(
    file_types: &[FileTypeConfig],
    all_files: &[String],
    cache_enabled: bool,
    dispatch: impl Fn(AnalyzerKind) -> Option<Box<dyn AnalyzerAdapter>>,
) -> Vec<Violation> {
    let mut all_violations = Vec::new();

    info!("starting analysis of {} file types", file_types.len());

    for file_type in file_types {
        let files = filter_by_file_type(file_type, all_files);
        if files.is_empty() {
            info!("no {} files to scan", file_type.name);
            continue;
        }

        let Some(adapter) = dispatch(file_type.analyzer) else {
            warn!(
                "unknown analyzer '{}' for file type '{}'",
                file_type.analyzer.as_str(),
                file_type.name
            );
            continue;
        };

        match adapter.analyze(file_type, &files, cache_enabled) {
            Ok(violations) => {
                if violations.is_empty() {
                    info!("no violations found in {} files", file_type.name);
                }
                all_violations.extend(violations);
            }
            Err(err) => {
                warn!(
                    "error running {} on {} files: {err}",
                    file_type.analyzer.as_str(),
                    file_type.name
                );
            }
        }
    }

    report_severity_summary(&all_violations);

    all_violations
}

/// Side-effecting summary of the full set; not part of the return value.
fn report_severity_summary(violations: &[Violation]) {
    if violations.is_empty() {
        info!("no violations found across all file types");
        return;
    }

    let count = |s: Severity| violations.iter().filter(|v| v.severity == s).count();

    info!("summary of all violations:");
    let critical = count(Severity::Critical);
    if critical > 0 {
        warn!("critical: {critical}");
    }
    let high = count(Severity::High);
    if high > 0 {
        warn!("high: {high}");
    }
    let medium = count(Severity::Medium);
    if medium > 0 {
        info!("medium: {medium}");
    }
    let low = count(Severity::Low);
    if low > 0 {
        info!("low: {low}");
    }
    let info_count = count(Severity::Info);
    if info_count > 0 {
        info!("info: {info_count}");
    }
}
