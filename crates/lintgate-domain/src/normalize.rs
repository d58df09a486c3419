use lintgate_types::{EslintFileResult, PmdReport, Severity, Violation};

/// CI workspace roots stripped from tool-reported paths before
/// reconciliation. Tools report absolute or runner-relative paths; the
/// baseline and the reports need repository-relative ones.
pub const WORKSPACE_PREFIXES: &[&str] = &[
    "/home/runner/work/",
    "/github/workspace/",
    "/workspace/",
    "/app/",
    "/src/",
];

/// ESLint message severity: 2 is an error, 1 a warning. The tool has no
/// native critical or low level.
pub fn map_eslint_severity(severity: u32) -> Severity {
    match severity {
        2 => Severity::High,
        1 => Severity::Medium,
        _ => Severity::Info,
    }
}

/// PMD priorities 1-4 map onto critical/high/medium/low; anything else
/// (including absent) is informational.
pub fn map_pmd_priority(priority: Option<i64>) -> Severity {
    match priority {
        Some(1) => Severity::Critical,
        Some(2) => Severity::High,
        Some(3) => Severity::Medium,
        Some(4) => Severity::Low,
        _ => Severity::Info,
    }
}

/// Documentation URL for an ESLint rule ID.
///
/// Plain IDs point at the engine's rule docs; the LWC and Aura plugin
/// namespaces have their own doc repositories. Any other plugin prefix
/// has no known docs root.
pub fn eslint_doc_url(rule: &str) -> Option<String> {
    if let Some(name) = rule.strip_prefix("@lwc/lwc/") {
        return Some(format!(
            "https://github.com/salesforce/eslint-plugin-lwc/tree/master/docs/rules/{name}.md"
        ));
    }
    if let Some(name) = rule.strip_prefix("@salesforce/aura/") {
        return Some(format!(
            "https://github.com/forcedotcom/eslint-plugin-aura/tree/master/docs/rules/{name}.md"
        ));
    }
    if !rule.contains('/') && rule != "unknown" && !rule.is_empty() {
        return Some(format!("https://eslint.org/docs/latest/rules/{rule}"));
    }
    None
}

/// Rewrite a tool-reported path to a repository-relative one.
///
/// Order is fixed: workspace-prefix strip, repository-name segment drop,
/// then reconciliation against the configured source prefix. The last
/// step splices on the prefix by searching for its final path segment,
/// which can misfire when an unrelated directory shares that name; the
/// heuristic is kept as-is and the risk documented in tests.
pub fn normalize_path(raw: &str, source_prefix: &str) -> String {
    normalize_path_with(raw, WORKSPACE_PREFIXES, source_prefix)
}

fn normalize_path_with(raw: &str, workspace_prefixes: &[&str], source_prefix: &str) -> String {
    if raw.is_empty() {
        return raw.to_string();
    }

    let mut path = raw.to_string();

    for prefix in workspace_prefixes {
        if let Some(idx) = path.find(prefix) {
            path = path[idx + prefix.len()..].to_string();
            break;
        }
    }

    // Drop a leading repository-name segment (CI checkouts nest the repo
    // directory under the workspace root).
    if let Some((first, rest)) = path.split_once('/') {
        if first.contains('.') || first.contains('-') || first.contains('_') {
            path = rest.to_string();
        }
    }

    if source_prefix.is_empty() {
        return path;
    }

    match path.find(source_prefix) {
        Some(0) => path,
        Some(idx) => path[idx..].to_string(),
        None => {
            let last_segment = source_prefix.split('/').filter(|s| !s.is_empty()).next_back();
            if let Some(last) = last_segment {
                let needle = format!("{last}/");
                if let Some(idx) = path.find(&needle) {
                    let file_part = &path[idx + needle.len()..];
                    return join_path(source_prefix, file_part);
                }
            }
            join_path(source_prefix, &path)
        }
    }
}

fn join_path(prefix: &str, rest: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let rest = rest.trim_start_matches('/');
    match (prefix.is_empty(), rest.is_empty()) {
        (true, _) => rest.to_string(),
        (_, true) => prefix.to_string(),
        _ => format!("{prefix}/{rest}"),
    }
}

/// Map one file's ESLint JSON output onto canonical violations.
pub fn normalize_eslint_result(result: &EslintFileResult, source_prefix: &str) -> Vec<Violation> {
    let file = normalize_path(&result.file_path, source_prefix);

    result
        .messages
        .iter()
        .map(|msg| {
            let rule = msg
                .rule_id
                .as_deref()
                .filter(|r| !r.is_empty())
                .unwrap_or("unknown")
                .to_string();
            let doc_url = eslint_doc_url(&rule);

            Violation {
                engine: "eslint".to_string(),
                rule,
                ruleset: None,
                severity: map_eslint_severity(msg.severity),
                message: msg.message.clone(),
                file: file.clone(),
                line: msg.line.unwrap_or(1),
                column: msg.column.unwrap_or(1),
                end_line: msg.end_line.or(msg.line).unwrap_or(1),
                end_column: msg.end_column.or(msg.column).unwrap_or(1),
                doc_url,
            }
        })
        .collect()
}

/// Map a PMD JSON report onto canonical violations.
pub fn normalize_pmd_report(report: &PmdReport, source_prefix: &str) -> Vec<Violation> {
    let mut violations = Vec::new();

    for file in &report.files {
        if file.filename.is_empty() {
            continue;
        }
        let path = normalize_path(&file.filename, source_prefix);

        for v in &file.violations {
            violations.push(Violation {
                engine: "pmd".to_string(),
                rule: v.rule.clone(),
                ruleset: v.ruleset.clone(),
                severity: map_pmd_priority(v.priority),
                message: v.description.clone(),
                file: path.clone(),
                line: v.beginline.unwrap_or(1),
                column: v.begincolumn.unwrap_or(1),
                end_line: v.endline.or(v.beginline).unwrap_or(1),
                end_column: v.endcolumn.or(v.begincolumn).unwrap_or(1),
                doc_url: v.external_info_url.clone().filter(|u| !u.is_empty()),
            });
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintgate_types::{EslintMessage, PmdFileResult, PmdViolation};

    #[test]
    fn eslint_severity_mapping_is_fixed() {
        assert_eq!(map_eslint_severity(2), Severity::High);
        assert_eq!(map_eslint_severity(1), Severity::Medium);
        assert_eq!(map_eslint_severity(0), Severity::Info);
        assert_eq!(map_eslint_severity(3), Severity::Info);
    }

    #[test]
    fn pmd_priority_mapping_is_fixed() {
        assert_eq!(map_pmd_priority(Some(1)), Severity::Critical);
        assert_eq!(map_pmd_priority(Some(2)), Severity::High);
        assert_eq!(map_pmd_priority(Some(3)), Severity::Medium);
        assert_eq!(map_pmd_priority(Some(4)), Severity::Low);
        assert_eq!(map_pmd_priority(Some(5)), Severity::Info);
        assert_eq!(map_pmd_priority(Some(0)), Severity::Info);
        assert_eq!(map_pmd_priority(None), Severity::Info);
    }

    #[test]
    fn doc_url_for_plain_rule_ids() {
        assert_eq!(
            eslint_doc_url("no-console").as_deref(),
            Some("https://eslint.org/docs/latest/rules/no-console")
        );
        assert_eq!(eslint_doc_url("unknown"), None);
    }

    #[test]
    fn doc_url_strips_lwc_and_aura_prefixes() {
        assert_eq!(
            eslint_doc_url("@lwc/lwc/no-inner-html").as_deref(),
            Some("https://github.com/salesforce/eslint-plugin-lwc/tree/master/docs/rules/no-inner-html.md")
        );
        assert_eq!(
            eslint_doc_url("@salesforce/aura/no-js-in-markup").as_deref(),
            Some("https://github.com/forcedotcom/eslint-plugin-aura/tree/master/docs/rules/no-js-in-markup.md")
        );
    }

    #[test]
    fn doc_url_is_absent_for_other_plugins() {
        assert_eq!(eslint_doc_url("@typescript-eslint/no-explicit-any"), None);
        assert_eq!(eslint_doc_url("import/no-cycle"), None);
    }

    #[test]
    fn normalize_strips_workspace_prefix_and_repo_segment() {
        let path = normalize_path(
            "/home/runner/work/my-repo/my-repo/force-app/main/default/classes/Foo.cls",
            "force-app/main/default",
        );
        assert_eq!(path, "force-app/main/default/classes/Foo.cls");
    }

    #[test]
    fn normalize_cuts_leading_noise_before_the_source_prefix() {
        let path = normalize_path("checkout/force-app/main/default/lwc/cmp.js", "force-app/main/default");
        assert_eq!(path, "force-app/main/default/lwc/cmp.js");
    }

    #[test]
    fn normalize_splices_prefix_via_its_last_segment() {
        let path = normalize_path("sub/classes/Foo.cls", "force-app/main/default/classes");
        assert_eq!(path, "force-app/main/default/classes/Foo.cls");
    }

    #[test]
    fn normalize_prepends_prefix_when_nothing_matches() {
        assert_eq!(normalize_path("Foo.cls", "src"), "src/Foo.cls");
        assert_eq!(normalize_path("lwc/cmp.js", "force-app/"), "force-app/lwc/cmp.js");
    }

    // The last-segment search takes the first occurrence, so an unrelated
    // directory that shares the prefix's final segment name captures the
    // splice point. Known misfire, kept for parity with the baseline data
    // produced by earlier runs.
    #[test]
    fn normalize_splice_misfires_on_colliding_segment_names() {
        let path = normalize_path("cache/models/tmp/helper.js", "app/models");
        assert_eq!(path, "app/models/tmp/helper.js");
    }

    #[test]
    fn normalize_without_source_prefix_only_strips() {
        assert_eq!(
            normalize_path("/github/workspace/my.repo/src/a.js", ""),
            "src/a.js"
        );
    }

    #[test]
    fn normalize_keeps_plain_first_segment() {
        // "src" has no '.', '-' or '_', so it is not mistaken for a repo name.
        assert_eq!(normalize_path("src/a.js", ""), "src/a.js");
    }

    #[test]
    fn eslint_messages_normalize_with_defaults() {
        let result = EslintFileResult {
            file_path: "force-app/main/default/lwc/cmp.js".to_string(),
            messages: vec![
                EslintMessage {
                    rule_id: Some("no-console".to_string()),
                    severity: 2,
                    message: "Unexpected console statement.".to_string(),
                    line: Some(4),
                    column: Some(5),
                    end_line: Some(4),
                    end_column: Some(18),
                },
                EslintMessage {
                    rule_id: None,
                    severity: 1,
                    message: "Parsing error".to_string(),
                    line: None,
                    column: None,
                    end_line: None,
                    end_column: None,
                },
            ],
        };

        let violations = normalize_eslint_result(&result, "force-app/main/default");
        assert_eq!(violations.len(), 2);

        assert_eq!(violations[0].engine, "eslint");
        assert_eq!(violations[0].severity, Severity::High);
        assert!(violations[0].doc_url.as_deref().unwrap().ends_with("/no-console"));

        assert_eq!(violations[1].rule, "unknown");
        assert_eq!(violations[1].severity, Severity::Medium);
        assert_eq!(violations[1].line, 1);
        assert_eq!(violations[1].column, 1);
        assert_eq!(violations[1].end_line, 1);
        assert_eq!(violations[1].end_column, 1);
        assert_eq!(violations[1].doc_url, None);
    }

    #[test]
    fn eslint_end_positions_default_to_start_positions() {
        let result = EslintFileResult {
            file_path: "src/a.js".to_string(),
            messages: vec![EslintMessage {
                rule_id: Some("semi".to_string()),
                severity: 2,
                message: "Missing semicolon.".to_string(),
                line: Some(10),
                column: Some(22),
                end_line: None,
                end_column: None,
            }],
        };

        let violations = normalize_eslint_result(&result, "src");
        assert_eq!(violations[0].end_line, 10);
        assert_eq!(violations[0].end_column, 22);
    }

    #[test]
    fn pmd_report_normalizes_with_defaults() {
        let report = PmdReport {
            files: vec![
                PmdFileResult {
                    filename: "force-app/main/default/classes/Foo.cls".to_string(),
                    violations: vec![PmdViolation {
                        rule: "ApexCRUDViolation".to_string(),
                        ruleset: Some("Security".to_string()),
                        priority: Some(1),
                        description: "CRUD check missing".to_string(),
                        beginline: Some(12),
                        endline: None,
                        begincolumn: Some(9),
                        endcolumn: None,
                        external_info_url: Some("https://pmd.github.io/rule".to_string()),
                    }],
                },
                PmdFileResult {
                    filename: String::new(),
                    violations: vec![PmdViolation::default()],
                },
            ],
        };

        let violations = normalize_pmd_report(&report, "force-app/main/default");
        assert_eq!(violations.len(), 1, "nameless file entries are skipped");

        let v = &violations[0];
        assert_eq!(v.engine, "pmd");
        assert_eq!(v.severity, Severity::Critical);
        assert_eq!(v.ruleset.as_deref(), Some("Security"));
        assert_eq!(v.end_line, 12, "endline falls back to beginline");
        assert_eq!(v.end_column, 9, "endcolumn falls back to begincolumn");
        assert_eq!(v.doc_url.as_deref(), Some("https://pmd.github.io/rule"));
    }
}
