use std::collections::BTreeSet;

use lintgate_types::{BaselineEntry, Violation};

/// Remove violations already recorded in the baseline.
///
/// Matching is by identity key (file, line, rule) only: a rule firing at
/// the same file and line is "known" regardless of message or severity
/// drift. Order of the surviving violations is preserved, and an empty
/// baseline returns the input unchanged.
pub fn diff_against_baseline(current: Vec<Violation>, baseline: &[BaselineEntry]) -> Vec<Violation> {
    if baseline.is_empty() {
        return current;
    }

    let known: BTreeSet<(String, u32, String)> =
        baseline.iter().map(BaselineEntry::identity_key).collect();

    current
        .into_iter()
        .filter(|v| !known.contains(&v.identity_key()))
        .collect()
}
