//! Positional assembly of object-change blocks.
//!
//! The CLI prints objects as loose `ID:` / `Owner:` / `Version:` lines with
//! no delimiter between records. An identifier opens a record and the
//! nearest following owner and version lines are attributed to it.

use crate::extract::text::{first_hex_id, lenient_u64, match_label};
use crate::extract::types::ObjectChangeRecord;
use regex::Regex;
use std::sync::LazyLock;

static BARE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^0x[0-9a-fA-F]+(?:\.\.\.[0-9a-fA-F]+)?$").expect("valid regex")
});

const ID_LABELS: &[&str] = &["Object ID", "ObjectID", "ID"];
const OWNER_LABELS: &[&str] = &["Owner"];
const VERSION_LABELS: &[&str] = &["Version"];

/// What a single cleaned line contributes to an object block
#[derive(Debug, PartialEq, Eq)]
pub enum ObjectLine<'a> {
    Id(&'a str),
    Owner(String),
    Version(u64),
}

/// Recognize an identifier, owner or version line
pub fn classify_object_line(line: &str) -> Option<ObjectLine<'_>> {
    if BARE_ID_RE.is_match(line) {
        return Some(ObjectLine::Id(line));
    }
    if let Some((_, value)) = match_label(line, ID_LABELS) {
        return Some(ObjectLine::Id(first_hex_id(value).unwrap_or(value)));
    }
    if let Some((_, value)) = match_label(line, OWNER_LABELS) {
        return Some(ObjectLine::Owner(normalize_owner(value)));
    }
    if let Some((_, value)) = match_label(line, VERSION_LABELS) {
        return Some(ObjectLine::Version(lenient_u64(value)));
    }
    None
}

/// `Account Address ( 0xabc )` becomes `0xabc`; `Shared( 7 )` becomes `Shared`
pub fn normalize_owner(value: &str) -> String {
    if let Some(id) = first_hex_id(value) {
        return id.to_string();
    }
    let word = value
        .split(|c: char| c == '(' || c == '{' || c.is_whitespace())
        .find(|part| !part.is_empty())
        .unwrap_or("");
    word.to_string()
}

#[derive(Debug)]
struct Pending {
    record: ObjectChangeRecord,
    has_owner: bool,
    has_version: bool,
}

/// Accumulates records for one section
#[derive(Debug, Default)]
pub struct ObjectBlocks {
    records: Vec<ObjectChangeRecord>,
    pending: Option<Pending>,
}

impl ObjectBlocks {
    /// Feed one line; returns whether it was an object line
    pub fn feed(&mut self, line: &str) -> bool {
        let Some(object_line) = classify_object_line(line) else {
            return false;
        };

        match object_line {
            ObjectLine::Id(id) => {
                self.flush();
                self.pending = Some(Pending {
                    record: ObjectChangeRecord {
                        id: id.to_string(),
                        ..Default::default()
                    },
                    has_owner: false,
                    has_version: false,
                });
            }
            ObjectLine::Owner(owner) => {
                if let Some(p) = self.pending.as_mut().filter(|p| !p.has_owner) {
                    p.record.owner = owner;
                    p.has_owner = true;
                }
            }
            ObjectLine::Version(version) => {
                if let Some(p) = self.pending.as_mut().filter(|p| !p.has_version) {
                    p.record.version = version;
                    p.has_version = true;
                }
            }
        }
        true
    }

    /// Close the open record, if any
    pub fn flush(&mut self) {
        if let Some(p) = self.pending.take() {
            self.records.push(p.record);
        }
    }

    pub fn finish(mut self) -> Vec<ObjectChangeRecord> {
        self.flush();
        self.records
    }
}
