// Line-oriented helpers shared by the text scanners
#![allow(dead_code)]

use regex::Regex;
use std::sync::LazyLock;

static INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9][0-9,_]*").expect("valid regex"));

static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9][0-9,]*(?:\.[0-9]+)?").expect("valid regex"));

static HEX_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"0x[0-9a-fA-F]+(?:\.\.\.[0-9a-fA-F]+)?").expect("valid regex")
});

/// Table and tree drawing characters the CLI wraps its output in
const FRAME_CHARS: &[char] = &[
    '│', '┃', '|', '┌', '┐', '└', '┘', '├', '┤', '┬', '┴', '┼', '╭', '╮', '╰', '╯', '─', '━',
];

/// Strip surrounding whitespace and frame characters
pub fn clean_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || FRAME_CHARS.contains(&c))
}

/// A line made only of frame, `+`, `-` or `=` characters
pub fn is_border(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_whitespace() || FRAME_CHARS.contains(&c) || matches!(c, '+' | '-' | '='))
}

/// Text after `label` when the line starts with it (case-insensitive),
/// with an optional `:` separator removed.
///
/// `value_after_label("Storage Cost: 10", "storage cost")` is `Some("10")`.
/// The label must end at a word boundary, so `"Versions"` does not match
/// `"Version"`.
pub fn value_after_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let head = line.get(..label.len())?;
    if !head.eq_ignore_ascii_case(label) {
        return None;
    }
    let rest = &line[label.len()..];
    if rest.chars().next().is_some_and(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }
    let rest = rest.trim_start();
    Some(rest.strip_prefix(':').unwrap_or(rest).trim())
}

/// First of `labels` that prefixes the line, with its value
pub fn match_label<'a, 'l>(line: &'a str, labels: &[&'l str]) -> Option<(&'l str, &'a str)> {
    labels
        .iter()
        .find_map(|label| value_after_label(line, label).map(|value| (*label, value)))
}

/// First integer in `text`, separators allowed; zero when absent or out of range
pub fn lenient_u64(text: &str) -> u64 {
    INTEGER_RE
        .find(text)
        .map(|m| strip_separators(m.as_str()))
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(0)
}

/// First decimal number in `text`; zero when absent
pub fn lenient_f64(text: &str) -> f64 {
    DECIMAL_RE
        .find(text)
        .map(|m| strip_separators(m.as_str()))
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(0.0)
}

/// First `0x…` identifier (full or already shortened) in `text`
pub fn first_hex_id(text: &str) -> Option<&str> {
    HEX_ID_RE.find(text).map(|m| m.as_str())
}

/// Cells between the outer borders of a `│`-separated table row, trimmed.
///
/// Empty cells are kept so column positions stay meaningful.
pub fn table_cells(line: &str) -> Option<Vec<String>> {
    let trimmed = line.trim();
    let separator = if trimmed.contains('│') {
        '│'
    } else if trimmed.starts_with('|') {
        '|'
    } else {
        return None;
    };

    let segments: Vec<&str> = trimmed.split(separator).collect();
    if segments.len() < 3 {
        return None;
    }
    Some(
        segments[1..segments.len() - 1]
            .iter()
            .map(|cell| cell.trim().to_string())
            .collect(),
    )
}

fn strip_separators(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, ',' | '_')).collect()
}
