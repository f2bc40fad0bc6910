//! `sui move migrate` output: prompts and progress text around a unified diff.

use crate::extract::text::lenient_u64;
use crate::extract::types::ParseStatus;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static HUNK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -[0-9]+(?:,([0-9]+))? \+[0-9]+(?:,([0-9]+))? @@").expect("valid regex")
});

const COMPLETION_MARKERS: &[&str] = &["changes complete", "migration complete", "no changes"];
const PATCH_FILE_LABEL: &str = "Wrote patchfile out to:";
const UNKNOWN_PATH: &str = "<unknown>";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiff {
    pub path: String,
    pub hunks: u32,
    pub additions: u32,
    pub deletions: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationDiff {
    pub status: ParseStatus,
    pub files: Vec<FileDiff>,
    pub additions: u32,
    pub deletions: u32,
    /// Where the tool saved the patch, when it says so
    pub patch_file: Option<String>,
    pub raw_output: String,
}

/// Lines left in the current hunk, from its header counts
#[derive(Debug, Default)]
struct HunkBudget {
    old: u64,
    new: u64,
}

impl HunkBudget {
    fn open(&self) -> bool {
        self.old > 0 || self.new > 0
    }
}

pub fn parse(text: &str) -> MigrationDiff {
    let mut diff = MigrationDiff {
        raw_output: text.to_string(),
        ..Default::default()
    };
    let mut hunk = HunkBudget::default();
    let mut old_path: Option<String> = None;
    let mut completed = false;

    for line in text.lines() {
        if hunk.open() {
            match line.chars().next() {
                Some('+') => {
                    count_line(&mut diff, '+');
                    hunk.new = hunk.new.saturating_sub(1);
                    continue;
                }
                Some('-') => {
                    count_line(&mut diff, '-');
                    hunk.old = hunk.old.saturating_sub(1);
                    continue;
                }
                Some(' ') | None => {
                    hunk.old = hunk.old.saturating_sub(1);
                    hunk.new = hunk.new.saturating_sub(1);
                    continue;
                }
                Some('\\') => continue,
                // Anything else means the header counts lied
                _ => hunk = HunkBudget::default(),
            }
        }

        if let Some(rest) = line.strip_prefix("diff --git ") {
            let path = rest
                .split_whitespace()
                .last()
                .map(strip_side_prefix)
                .unwrap_or(UNKNOWN_PATH);
            diff.files.push(FileDiff {
                path: path.to_string(),
                ..Default::default()
            });
            old_path = None;
            continue;
        }

        if let Some(rest) = line.strip_prefix("--- ") {
            old_path = Some(strip_side_prefix(path_field(rest)).to_string());
            continue;
        }

        if let Some(rest) = line.strip_prefix("+++ ") {
            let new_path = strip_side_prefix(path_field(rest));
            let path = if new_path == "/dev/null" {
                old_path.take().unwrap_or_else(|| new_path.to_string())
            } else {
                new_path.to_string()
            };
            match diff.files.last_mut().filter(|f| is_untouched(f)) {
                Some(file) => file.path = path,
                None => diff.files.push(FileDiff {
                    path,
                    ..Default::default()
                }),
            }
            continue;
        }

        if let Some(caps) = HUNK_RE.captures(line) {
            if diff.files.is_empty() {
                diff.files.push(FileDiff {
                    path: UNKNOWN_PATH.to_string(),
                    ..Default::default()
                });
            }
            if let Some(file) = diff.files.last_mut() {
                file.hunks += 1;
            }
            // An omitted count means one line
            hunk = HunkBudget {
                old: caps.get(1).map_or(1, |m| lenient_u64(m.as_str())),
                new: caps.get(2).map_or(1, |m| lenient_u64(m.as_str())),
            };
            continue;
        }

        if let Some(rest) = line.trim().strip_prefix(PATCH_FILE_LABEL) {
            diff.patch_file = Some(rest.trim().to_string());
            continue;
        }

        let lower = line.to_lowercase();
        if COMPLETION_MARKERS.iter().any(|m| lower.contains(m)) {
            completed = true;
        }
    }

    diff.additions = diff.files.iter().map(|f| f.additions).sum();
    diff.deletions = diff.files.iter().map(|f| f.deletions).sum();
    diff.status = ParseStatus::from_found(completed || !diff.files.is_empty());
    diff
}

fn count_line(diff: &mut MigrationDiff, marker: char) {
    if let Some(file) = diff.files.last_mut() {
        match marker {
            '+' => file.additions += 1,
            _ => file.deletions += 1,
        }
    }
}

fn is_untouched(file: &FileDiff) -> bool {
    file.hunks == 0 && file.additions == 0 && file.deletions == 0
}

/// Drop the tab-separated timestamp some diff tools append
fn path_field(rest: &str) -> &str {
    rest.split('\t').next().unwrap_or(rest).trim()
}

fn strip_side_prefix(path: &str) -> &str {
    path.strip_prefix("a/")
        .or_else(|| path.strip_prefix("b/"))
        .unwrap_or(path)
}
