//! Change-list and repository-listing collection via git.
//!
//! Thin glue around `git diff --name-status` and `git ls-files`; the
//! classifier owns all interpretation.

use std::process::Command;

use anyhow::{bail, Context, Result};
use tracing::debug;

use lintgate_types::{ChangeStatus, ChangedFile};

/// Files changed between two refs, with their change status.
pub fn changed_files(base: &str, head: &str) -> Result<Vec<ChangedFile>> {
    let range = format!("{base}...{head}");
    debug!("collecting change list for {range}");

    let output = Command::new("git")
        .args(["diff", "--name-status", "--no-renames", &range])
        .output()
        .context("run git diff")?;

    if !output.status.success() {
        bail!(
            "git diff {range} failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(parse_name_status(&String::from_utf8_lossy(&output.stdout)))
}

/// All tracked files in the repository.
pub fn tracked_files() -> Result<Vec<String>> {
    let output = Command::new("git")
        .args(["ls-files"])
        .output()
        .context("run git ls-files")?;

    if !output.status.success() {
        bail!(
            "git ls-files failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

fn parse_name_status(text: &str) -> Vec<ChangedFile> {
    text.lines()
        .filter_map(|line| {
            let mut parts = line.split('\t');
            let status = parts.next()?.trim();
            let path = parts.next()?.trim();
            if status.is_empty() || path.is_empty() {
                return None;
            }
            let status = match status.chars().next()? {
                'A' => ChangeStatus::Added,
                'D' => ChangeStatus::Removed,
                'R' => ChangeStatus::Renamed,
                _ => ChangeStatus::Modified,
            };
            Some(ChangedFile {
                path: path.to_string(),
                status,
            })
        })
        .collect()
}
