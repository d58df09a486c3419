use lintgate_types::{ScanReceipt, Severity, Violation};

/// Markdown summary of a scan receipt, suitable for a PR comment body.
pub fn render_markdown_for_receipt(receipt: &ScanReceipt) -> String {
    let status = if receipt.verdict.should_fail { "FAIL" } else { "PASS" };

    let mut out = String::new();
    out.push_str(&format!("## lintgate — {status}\n\n"));

    out.push_str(&format!(
        "**{}** violation(s): {} critical/high, {} medium ({} in new files, {} in modified files)\n\n",
        receipt.verdict.total_violations,
        receipt.verdict.critical_count,
        receipt.verdict.medium_count,
        receipt.verdict.new_file_violation_count,
        receipt.verdict.modified_file_violation_count
    ));

    if !receipt.verdict.failure_reasons.is_empty() {
        out.push_str("**Failure reasons:**\n");
        for reason in &receipt.verdict.failure_reasons {
            out.push_str(&format!("- {reason}\n"));
        }
        out.push('\n');
    }

    if receipt.violations.is_empty() {
        out.push_str("No violations.\n");
        return out;
    }

    out.push_str("| Severity | Rule | Location | Message |\n");
    out.push_str("|---|---|---|---|\n");
    for v in &receipt.violations {
        out.push_str(&render_violation_row(v));
    }
    out.push('\n');

    out
}

fn render_violation_row(v: &Violation) -> String {
    let loc = format!("{}:{}", escape_md(&v.file), v.line);
    let rule = match &v.ruleset {
        Some(ruleset) => format!("{}/{}", escape_md(ruleset), escape_md(&v.rule)),
        None => escape_md(&v.rule),
    };

    format!(
        "| {sev} | `{rule}` | `{loc}` | {msg} |\n",
        sev = v.severity.as_str(),
        rule = rule,
        loc = loc,
        msg = escape_md(&v.message)
    )
}

fn escape_md(s: &str) -> String {
    s.replace('|', "\\|").replace('`', "\\`")
}

/// GitHub Actions workflow-command annotations, one per violation.
pub fn render_annotations(violations: &[Violation]) -> Vec<String> {
    violations
        .iter()
        .map(|v| {
            let level = match v.severity {
                Severity::Critical | Severity::High => "error",
                Severity::Medium => "warning",
                Severity::Low | Severity::Info => "notice",
            };
            format!(
                "::{level} file={file},line={line}::{rule} {msg}",
                level = level,
                file = v.file,
                line = v.line,
                rule = v.rule,
                msg = v.message
            )
        })
        .collect()
}
