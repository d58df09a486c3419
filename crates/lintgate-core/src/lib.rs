//! Pipeline layer: analyzer invocation + orchestration + verdict assembly.

mod analyzer;
mod baseline;
mod eslint;
mod orchestrate;
mod pmd;
mod render;
mod scan;

pub use analyzer::{adapter_for, AnalyzerAdapter, AnalyzerError};
pub use baseline::{load_baseline, BaselineLoad};
pub use eslint::EslintAdapter;
pub use orchestrate::run_analysis;
pub use pmd::PmdAdapter;
pub use render::{render_annotations, render_markdown_for_receipt};
pub use scan::{run_scan, ScanPlan, ScanRun};
