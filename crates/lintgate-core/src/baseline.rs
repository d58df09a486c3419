use std::path::Path;

use lintgate_types::BaselineEntry;

/// Result of loading a baseline snapshot.
///
/// Baseline absence is never a failure: every degradation path carries a
/// distinct human-readable reason and means "report all current
/// violations unsuppressed".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaselineLoad {
    Loaded(Vec<BaselineEntry>),
    Degraded { reason: String },
}

/// Read a baseline file: a JSON array of violation-shaped objects.
pub fn load_baseline(path: &Path) -> BaselineLoad {
    if !path.exists() {
        return BaselineLoad::Degraded {
            reason: format!(
                "Baseline file not found at {}. All violations will be reported.",
                path.display()
            ),
        };
    }

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            return BaselineLoad::Degraded {
                reason: format!("Failed to read baseline file: {err}. All violations will be reported."),
            };
        }
    };

    let value: serde_json::Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(err) => {
            return BaselineLoad::Degraded {
                reason: format!("Failed to parse baseline file: {err}. All violations will be reported."),
            };
        }
    };

    if !value.is_array() {
        return BaselineLoad::Degraded {
            reason: "Baseline file does not contain an array of violations. All violations will be reported."
                .to_string(),
        };
    }

    match serde_json::from_value::<Vec<BaselineEntry>>(value) {
        Ok(entries) => BaselineLoad::Loaded(entries),
        Err(err) => BaselineLoad::Degraded {
            reason: format!("Failed to parse baseline file: {err}. All violations will be reported."),
        },
    }
}
