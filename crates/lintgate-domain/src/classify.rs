use std::collections::BTreeSet;

use lintgate_types::{ChangedFile, ClassifiedFileSet, FileTypeConfig};

/// How a configured source path matches candidate files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Plain prefix: the file path must start with the prefix.
    Exact,
    /// `prefix*`: the file must be a direct child (no further `/`).
    DirectChildren,
    /// `prefix**`: any descendant.
    Recursive,
}

/// A parsed source-path pattern with one of three matching modes.
///
/// The trailing `*`/`**` suffixes are the only special cases; everything
/// before them is a literal prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePathSpec {
    prefix: String,
    mode: MatchMode,
}

impl SourcePathSpec {
    pub fn parse(pattern: &str) -> Self {
        if let Some(prefix) = pattern.strip_suffix("**") {
            Self {
                prefix: prefix.to_string(),
                mode: MatchMode::Recursive,
            }
        } else if let Some(prefix) = pattern.strip_suffix('*') {
            Self {
                prefix: prefix.to_string(),
                mode: MatchMode::DirectChildren,
            }
        } else {
            Self {
                prefix: pattern.to_string(),
                mode: MatchMode::Exact,
            }
        }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn matches(&self, path: &str) -> bool {
        match self.mode {
            MatchMode::Exact | MatchMode::Recursive => path.starts_with(&self.prefix),
            MatchMode::DirectChildren => match path.strip_prefix(self.prefix.as_str()) {
                Some(rest) => !rest.is_empty() && !rest.contains('/'),
                None => false,
            },
        }
    }
}

/// Classify a version-control change list against the configured source path.
///
/// A file with status `added` is new; every other status is modified.
/// Unmatched files are dropped; `total_count` keeps the raw list size.
pub fn classify_changed(changes: &[ChangedFile], spec: &SourcePathSpec) -> ClassifiedFileSet {
    let mut new_files = BTreeSet::new();
    let mut modified_files = BTreeSet::new();
    let mut new_order = Vec::new();
    let mut modified_order = Vec::new();

    for change in changes {
        if !spec.matches(&change.path) {
            continue;
        }
        // First status wins for a path that somehow appears twice.
        if new_files.contains(&change.path) || modified_files.contains(&change.path) {
            continue;
        }
        if change.status.is_added() {
            new_files.insert(change.path.clone());
            new_order.push(change.path.clone());
        } else {
            modified_files.insert(change.path.clone());
            modified_order.push(change.path.clone());
        }
    }

    let mut filtered_files = new_order;
    filtered_files.extend(modified_order);

    ClassifiedFileSet {
        total_count: changes.len(),
        new_files,
        modified_files,
        filtered_files,
    }
}

/// Classify a full repository listing.
///
/// Without change context every matched file is treated as modified: we
/// cannot prove novelty, not that such files are safe.
pub fn classify_all(files: &[String], spec: &SourcePathSpec) -> ClassifiedFileSet {
    let mut modified_files = BTreeSet::new();
    let mut filtered_files = Vec::new();

    for path in files {
        if !spec.matches(path) || modified_files.contains(path) {
            continue;
        }
        modified_files.insert(path.clone());
        filtered_files.push(path.clone());
    }

    ClassifiedFileSet {
        total_count: files.len(),
        new_files: BTreeSet::new(),
        modified_files,
        filtered_files,
    }
}

/// Second-stage filter: files belonging to one configured file type.
///
/// A conjunction of a plain prefix match and an extension match, applied
/// after (and independent of) the source-path classification above.
pub fn filter_by_file_type(file_type: &FileTypeConfig, candidates: &[String]) -> Vec<String> {
    candidates
        .iter()
        .filter(|path| {
            path.starts_with(&file_type.source_path_prefix)
                && file_type.file_extensions.iter().any(|ext| path.ends_with(ext.as_str()))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintgate_types::{AnalyzerKind, ChangeStatus};

    fn changed(path: &str, status: ChangeStatus) -> ChangedFile {
        ChangedFile {
            path: path.to_string(),
            status,
        }
    }

    #[test]
    fn parse_selects_the_three_modes() {
        assert_eq!(SourcePathSpec::parse("src/").mode(), MatchMode::Exact);
        assert_eq!(SourcePathSpec::parse("src/*").mode(), MatchMode::DirectChildren);
        assert_eq!(SourcePathSpec::parse("src/**").mode(), MatchMode::Recursive);
    }

    #[test]
    fn exact_mode_is_a_plain_prefix() {
        let spec = SourcePathSpec::parse("force-app/main/default/");
        assert!(spec.matches("force-app/main/default/classes/Foo.cls"));
        assert!(!spec.matches("scripts/build.sh"));
    }

    #[test]
    fn direct_children_mode_rejects_nested_paths() {
        let spec = SourcePathSpec::parse("src/*");
        assert!(spec.matches("src/a.js"));
        assert!(!spec.matches("src/sub/b.js"));
        assert!(!spec.matches("src/"), "empty remainder is not a child");
        assert!(!spec.matches("other/a.js"));
    }

    #[test]
    fn recursive_mode_matches_any_descendant() {
        let spec = SourcePathSpec::parse("src/**");
        assert!(spec.matches("src/a.js"));
        assert!(spec.matches("src/deep/nested/b.js"));
        assert!(!spec.matches("lib/a.js"));
    }

    #[test]
    fn classify_changed_splits_by_added_status() {
        let spec = SourcePathSpec::parse("src/");
        let set = classify_changed(
            &[
                changed("src/new.js", ChangeStatus::Added),
                changed("src/old.js", ChangeStatus::Modified),
                changed("src/renamed.js", ChangeStatus::Renamed),
                changed("docs/readme.md", ChangeStatus::Added),
            ],
            &spec,
        );

        assert_eq!(set.total_count, 4);
        assert!(set.new_files.contains("src/new.js"));
        assert!(set.modified_files.contains("src/old.js"));
        assert!(
            set.modified_files.contains("src/renamed.js"),
            "non-added statuses classify as modified"
        );
        assert!(!set.filtered_files.iter().any(|f| f.starts_with("docs/")));
        assert_eq!(
            set.filtered_files,
            vec!["src/new.js", "src/old.js", "src/renamed.js"],
            "new files come first"
        );
    }

    #[test]
    fn classified_sets_are_disjoint_and_union_is_filtered() {
        let spec = SourcePathSpec::parse("src/");
        let set = classify_changed(
            &[
                changed("src/a.js", ChangeStatus::Added),
                changed("src/a.js", ChangeStatus::Modified),
                changed("src/b.js", ChangeStatus::Modified),
            ],
            &spec,
        );

        assert!(set.new_files.is_disjoint(&set.modified_files));
        assert_eq!(set.filtered_files.len(), set.new_files.len() + set.modified_files.len());
        assert!(set.new_files.contains("src/a.js"), "first status wins");
    }

    #[test]
    fn classify_all_reports_everything_as_modified() {
        let spec = SourcePathSpec::parse("src/**");
        let files = vec![
            "src/a.js".to_string(),
            "src/deep/b.js".to_string(),
            "test/c.js".to_string(),
        ];
        let set = classify_all(&files, &spec);

        assert_eq!(set.total_count, 3);
        assert!(set.new_files.is_empty());
        assert_eq!(set.filtered_files, vec!["src/a.js", "src/deep/b.js"]);
        assert_eq!(set.modified_files.len(), 2);
    }

    #[test]
    fn filter_by_file_type_is_a_prefix_and_extension_conjunction() {
        let file_type = FileTypeConfig {
            name: "JavaScript".to_string(),
            analyzer: AnalyzerKind::Eslint,
            source_path_prefix: "src/".to_string(),
            file_extensions: vec![".js".to_string()],
            rule_config_paths: vec![],
        };
        let files = vec!["src/a.js".to_string(), "test/b.js".to_string()];

        assert_eq!(filter_by_file_type(&file_type, &files), vec!["src/a.js"]);
    }

    #[test]
    fn filter_by_file_type_checks_every_extension() {
        let file_type = FileTypeConfig {
            name: "Apex".to_string(),
            analyzer: AnalyzerKind::Pmd,
            source_path_prefix: "force-app/".to_string(),
            file_extensions: vec![".cls".to_string(), ".trigger".to_string()],
            rule_config_paths: vec![],
        };
        let files = vec![
            "force-app/classes/A.cls".to_string(),
            "force-app/triggers/B.trigger".to_string(),
            "force-app/pages/C.page".to_string(),
        ];

        assert_eq!(
            filter_by_file_type(&file_type, &files),
            vec!["force-app/classes/A.cls", "force-app/triggers/B.trigger"]
        );
    }
}
