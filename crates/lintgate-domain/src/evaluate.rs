use lintgate_types::{Severity, ThresholdConfig, Verdict, Violation};

fn gating_count(violations: &[Violation]) -> u32 {
    violations.iter().filter(|v| v.severity.is_gating()).count() as u32
}

fn medium_count(violations: &[Violation]) -> u32 {
    violations
        .iter()
        .filter(|v| v.severity == Severity::Medium)
        .count() as u32
}

/// Apply severity and file-class thresholds to the final violation set.
///
/// All checks run and their reasons accumulate; the global fallback (4)
/// only applies when none of the file-class checks failed and
/// `fail_on_quality_issues` is set. Critical and high share one bucket in
/// every comparison; low and info never gate the build. Pure: identical
/// inputs yield identical verdicts, reasons in a fixed order.
pub fn evaluate_thresholds(
    all: &[Violation],
    new_file: &[Violation],
    modified_file: &[Violation],
    config: &ThresholdConfig,
) -> Verdict {
    let critical_count = gating_count(all);
    let medium = medium_count(all);
    let modified_critical = gating_count(modified_file);

    let mut should_fail = false;
    let mut failure_reasons = Vec::new();

    if config.strict_new_files && !new_file.is_empty() {
        should_fail = true;
        failure_reasons.push(format!(
            "New files have {} violations (strict mode requires 0)",
            new_file.len()
        ));
    }

    if modified_critical > config.max_critical_violations_for_modified_files {
        should_fail = true;
        failure_reasons.push(format!(
            "Modified files have {} critical/high violations (threshold: {})",
            modified_critical, config.max_critical_violations_for_modified_files
        ));
    }

    if modified_file.len() as u32 > config.max_violations_for_modified_files {
        should_fail = true;
        failure_reasons.push(format!(
            "Modified files have {} total violations (threshold: {})",
            modified_file.len(),
            config.max_violations_for_modified_files
        ));
    }

    if config.fail_on_quality_issues && !should_fail {
        if critical_count > config.max_critical_violations {
            should_fail = true;
            failure_reasons.push(format!(
                "Overall critical/high violations: {} (threshold: {})",
                critical_count, config.max_critical_violations
            ));
        }

        if medium > config.max_medium_violations {
            should_fail = true;
            failure_reasons.push(format!(
                "Overall medium violations: {} (threshold: {})",
                medium, config.max_medium_violations
            ));
        }
    }

    Verdict {
        total_violations: all.len() as u32,
        critical_count,
        medium_count: medium,
        new_file_violation_count: new_file.len() as u32,
        modified_file_violation_count: modified_file.len() as u32,
        should_fail,
        failure_reasons,
    }
}
