//! Domain logic: classification, normalization, baseline diffing, thresholds.
//!
//! This crate is designed to be I/O-free and highly testable.

pub mod baseline;
pub mod classify;
pub mod evaluate;
pub mod normalize;

pub use baseline::diff_against_baseline;
pub use classify::{classify_all, classify_changed, filter_by_file_type, MatchMode, SourcePathSpec};
pub use evaluate::evaluate_thresholds;
pub use normalize::{
    eslint_doc_url, map_eslint_severity, map_pmd_priority, normalize_eslint_result,
    normalize_pmd_report, normalize_path, WORKSPACE_PREFIXES,
};
