//! Gas and object-change summary of a transaction (replay, publish, call).
//!
//! Accepts the `--json` effects document or the boxed text report, which
//! states gas either in one compact line
//! (`Gas Used: computation 1000000, storage 2000000, rebate 500000`) or as
//! separate `Computation Cost:` / `Storage Cost:` / `Storage Rebate:` lines.

use crate::extract::decode_or_scan;
use crate::extract::json::{json_payload, json_string, json_u64};
use crate::extract::objects::ObjectBlocks;
use crate::extract::text::{
    clean_line, first_hex_id, is_border, lenient_u64, match_label, value_after_label,
};
use crate::extract::types::{ObjectChangeRecord, ParseStatus};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

static COMPACT_GAS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(computation|storage|rebate|non-refundable)\b[\s:=]*([0-9][0-9,_]*)")
        .expect("valid regex")
});

static DIGEST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[1-9A-HJ-NP-Za-km-z]{32,44}|0x[0-9a-fA-F]{64})$").expect("valid regex")
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasSummary {
    pub status: ParseStatus,
    /// Failure detail reported by the tool, e.g. the abort code
    pub error: Option<String>,
    pub computation: u64,
    pub storage: u64,
    pub rebate: u64,
    pub non_refundable: u64,
    /// `computation + storage - rebate`, may be negative
    pub total: i128,
    pub created: Vec<ObjectChangeRecord>,
    pub mutated: Vec<ObjectChangeRecord>,
    pub gas_object: Vec<ObjectChangeRecord>,
    /// Object blocks found outside any labeled section
    pub objects: Vec<ObjectChangeRecord>,
    pub deleted: Vec<String>,
    pub dependencies: Vec<String>,
    pub raw_output: String,
}

impl GasSummary {
    fn with_total(mut self) -> Self {
        self.total =
            i128::from(self.computation) + i128::from(self.storage) - i128::from(self.rebate);
        self
    }
}

pub fn parse(text: &str) -> GasSummary {
    decode_or_scan(text, decode_json, scan_text)
}

/// Strict stage: the `--json` transaction effects document
pub fn decode_json(text: &str) -> Option<GasSummary> {
    let value = json_payload(text)?;
    let effects = value.get("effects").unwrap_or(&value);
    let gas = effects.get("gasUsed")?.as_object()?;

    let status = effects.get("status");
    let succeeded = status
        .and_then(|s| s.get("status"))
        .and_then(Value::as_str)
        .is_some_and(|s| s.eq_ignore_ascii_case("success"));

    let summary = GasSummary {
        status: ParseStatus::from_found(succeeded),
        error: json_string(status.and_then(|s| s.get("error"))),
        computation: json_u64(gas.get("computationCost")),
        storage: json_u64(gas.get("storageCost")),
        rebate: json_u64(gas.get("storageRebate")),
        non_refundable: json_u64(gas.get("nonRefundableStorageFee")),
        created: json_objects(effects.get("created")),
        mutated: json_objects(effects.get("mutated")),
        gas_object: effects.get("gasObject").and_then(json_object).into_iter().collect(),
        deleted: effects
            .get("deleted")
            .and_then(Value::as_array)
            .map(|refs| {
                refs.iter()
                    .filter_map(|r| json_string(r.get("objectId")))
                    .collect()
            })
            .unwrap_or_default(),
        dependencies: effects
            .get("dependencies")
            .and_then(Value::as_array)
            .map(|deps| deps.iter().filter_map(|d| json_string(Some(d))).collect())
            .unwrap_or_default(),
        raw_output: text.to_string(),
        ..Default::default()
    };
    Some(summary.with_total())
}

fn json_objects(value: Option<&Value>) -> Vec<ObjectChangeRecord> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(json_object).collect())
        .unwrap_or_default()
}

fn json_object(value: &Value) -> Option<ObjectChangeRecord> {
    let reference = value.get("reference")?;
    Some(ObjectChangeRecord {
        id: json_string(reference.get("objectId"))?,
        owner: json_owner(value.get("owner")),
        version: json_u64(reference.get("version")),
    })
}

/// `{"AddressOwner": "0x.."}` is the address, `{"Shared": {..}}` is `Shared`
fn json_owner(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Object(map)) => match map.iter().next() {
            Some((_, Value::String(addr))) => addr.clone(),
            Some((kind, _)) => kind.clone(),
            None => String::new(),
        },
        _ => String::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Unsectioned,
    Created,
    Mutated,
    GasObject,
    Deleted,
    Dependencies,
    /// A section whose object lines are not summarized
    Other,
}

const SECTION_LABELS: &[(&str, Section)] = &[
    ("Created Objects", Section::Created),
    ("Mutated Objects", Section::Mutated),
    ("Gas Object", Section::GasObject),
    ("Deleted Objects", Section::Deleted),
    ("Transaction Dependencies", Section::Dependencies),
    ("Dependencies", Section::Dependencies),
    ("Wrapped Objects", Section::Other),
    ("Unwrapped Objects", Section::Other),
    ("Unwrapped Then Deleted Objects", Section::Other),
    ("Shared Objects", Section::Other),
    ("Unchanged Shared Objects", Section::Other),
    ("Published Objects", Section::Other),
    ("Transaction Data", Section::Other),
    ("Transaction Effects", Section::Other),
    ("Transaction Block Events", Section::Other),
    ("Object Changes", Section::Other),
    ("Balance Changes", Section::Other),
    ("Gas Cost Summary", Section::Other),
];

const STATUS_LABELS: &[&str] = &["Execution Status", "Status"];

/// Heuristic stage: the boxed text report
pub fn scan_text(text: &str) -> GasSummary {
    let mut summary = GasSummary {
        raw_output: text.to_string(),
        ..Default::default()
    };
    let mut explicit_status: Option<ParseStatus> = None;
    let mut found_gas = false;

    let mut section = Section::Unsectioned;
    let mut blocks = ObjectBlocks::default();

    for raw_line in text.lines() {
        if is_border(raw_line) {
            continue;
        }
        let line = clean_line(raw_line);
        if line.is_empty() {
            continue;
        }

        if let Some(next) = section_header(line) {
            close_section(&mut summary, section, std::mem::take(&mut blocks));
            section = next;
            continue;
        }

        if let Some((_, value)) = match_label(line, STATUS_LABELS) {
            let (status, error) = parse_status(value);
            explicit_status = Some(status);
            if error.is_some() {
                summary.error = error;
            }
            continue;
        }

        if let Some(value) = value_after_label(line, "Gas Used") {
            found_gas |= parse_compact_gas(value, &mut summary);
            continue;
        }

        if parse_labeled_gas(line, &mut summary) {
            found_gas = true;
            continue;
        }

        match section {
            Section::Dependencies => {
                if DIGEST_RE.is_match(line) {
                    summary.dependencies.push(line.to_string());
                }
            }
            Section::Deleted => {
                if let Some(id) = first_hex_id(line) {
                    summary.deleted.push(id.to_string());
                }
            }
            Section::Other => {}
            _ => {
                blocks.feed(line);
            }
        }
    }
    close_section(&mut summary, section, blocks);

    let found_objects = !(summary.created.is_empty()
        && summary.mutated.is_empty()
        && summary.gas_object.is_empty()
        && summary.objects.is_empty());
    summary.status =
        explicit_status.unwrap_or(ParseStatus::from_found(found_gas || found_objects));

    summary.with_total()
}

/// A line naming a section and nothing else
fn section_header(line: &str) -> Option<Section> {
    SECTION_LABELS.iter().find_map(|(label, section)| {
        value_after_label(line, label)
            .filter(|value| value.is_empty())
            .map(|_| *section)
    })
}

fn close_section(summary: &mut GasSummary, section: Section, blocks: ObjectBlocks) {
    let records = blocks.finish();
    let target = match section {
        Section::Created => &mut summary.created,
        Section::Mutated => &mut summary.mutated,
        Section::GasObject => &mut summary.gas_object,
        Section::Unsectioned => &mut summary.objects,
        Section::Deleted | Section::Dependencies | Section::Other => return,
    };
    // The effects and object-changes views repeat the same objects
    for record in records {
        if !target.iter().any(|r| r.id == record.id) {
            target.push(record);
        }
    }
}

/// `Success`, or `Failure { error: "..." }` with the error text pulled out
fn parse_status(value: &str) -> (ParseStatus, Option<String>) {
    let lower = value.to_ascii_lowercase();
    if lower.starts_with("success") {
        return (ParseStatus::Success, None);
    }

    let detail = match lower.find("error:") {
        Some(pos) => value[pos + "error:".len()..].trim(),
        None => value
            .get("failure".len()..)
            .filter(|_| lower.starts_with("failure"))
            .unwrap_or(value)
            .trim(),
    };
    let detail = detail.strip_suffix('}').unwrap_or(detail).trim();
    let detail = detail.trim_matches('"').trim();

    let error = (!detail.is_empty()).then(|| detail.to_string());
    (ParseStatus::Failure, error)
}

/// `computation 1000000, storage 2000000, rebate 500000`
fn parse_compact_gas(value: &str, summary: &mut GasSummary) -> bool {
    let mut found = false;
    for caps in COMPACT_GAS_RE.captures_iter(value) {
        let amount = lenient_u64(&caps[2]);
        match caps[1].to_lowercase().as_str() {
            "computation" => summary.computation = amount,
            "storage" => summary.storage = amount,
            "rebate" => summary.rebate = amount,
            _ => summary.non_refundable = amount,
        }
        found = true;
    }
    found
}

/// One `Storage Cost: 2,000,000 MIST` style line
fn parse_labeled_gas(line: &str, summary: &mut GasSummary) -> bool {
    const LABELS: &[&str] = &[
        "Computation Cost",
        "Storage Cost",
        "Storage Rebate",
        "Non-refundable Storage Fee",
    ];
    let Some((label, value)) = match_label(line, LABELS) else {
        return false;
    };
    let amount = lenient_u64(value);
    match label {
        "Computation Cost" => summary.computation = amount,
        "Storage Cost" => summary.storage = amount,
        "Storage Rebate" => summary.rebate = amount,
        _ => summary.non_refundable = amount,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_gas_line() {
        let summary = parse("Gas Used: computation 1000000, storage 2000000, rebate 500000");
        assert_eq!(summary.computation, 1_000_000);
        assert_eq!(summary.storage, 2_000_000);
        assert_eq!(summary.rebate, 500_000);
        assert_eq!(summary.total, 2_500_000);
        assert_eq!(summary.status, ParseStatus::Success);
    }

    #[test]
    fn test_compact_gas_with_separators() {
        let summary = parse("Gas Used: computation 1,000,000, storage 2,000,000, rebate 0");
        assert_eq!(summary.computation, 1_000_000);
        assert_eq!(summary.storage, 2_000_000);
        assert_eq!(summary.total, 3_000_000);
    }

    #[test]
    fn test_missing_field_is_zero() {
        let summary = parse("Gas Used: computation 700, rebate 200");
        assert_eq!(summary.storage, 0);
        assert_eq!(summary.total, 500);
    }

    #[test]
    fn test_rebate_larger_than_cost() {
        let summary = parse("Gas Used: computation 10, storage 0, rebate 50");
        assert_eq!(summary.total, -40);
    }

    #[test]
    fn test_failure_status_detail() {
        let summary = parse(
            "Status: Failure { error: \"InsufficientCoinBalance in command 0\" }\nGas Used: computation 1000, storage 0, rebate 0",
        );
        assert_eq!(summary.status, ParseStatus::Failure);
        assert_eq!(
            summary.error.as_deref(),
            Some("InsufficientCoinBalance in command 0")
        );
        assert_eq!(summary.computation, 1000);
    }

    #[test]
    fn test_parse_status_forms() {
        assert_eq!(parse_status("Success"), (ParseStatus::Success, None));
        assert_eq!(
            parse_status("Failure InsufficientGas"),
            (ParseStatus::Failure, Some("InsufficientGas".to_string()))
        );
        assert_eq!(parse_status("failure"), (ParseStatus::Failure, None));
    }

    #[test]
    fn test_garbage_is_failure_with_raw() {
        let text = "totally unrelated\noutput";
        let summary = parse(text);
        assert_eq!(summary.status, ParseStatus::Failure);
        assert!(summary.created.is_empty());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.raw_output, text);
    }

    #[test]
    fn test_json_effects() {
        let text = r#"{
  "digest": "abc",
  "effects": {
    "status": { "status": "failure", "error": "MoveAbort in command 0" },
    "gasUsed": {
      "computationCost": "1000000",
      "storageCost": "2000000",
      "storageRebate": "500000",
      "nonRefundableStorageFee": "5050"
    },
    "created": [
      { "owner": { "AddressOwner": "0xaa" }, "reference": { "objectId": "0x01", "version": 4, "digest": "d1" } }
    ],
    "mutated": [
      { "owner": { "Shared": { "initial_shared_version": 1 } }, "reference": { "objectId": "0x02", "version": 4, "digest": "d2" } }
    ],
    "gasObject": { "owner": { "AddressOwner": "0xaa" }, "reference": { "objectId": "0x03", "version": 4, "digest": "d3" } },
    "deleted": [ { "objectId": "0x04", "version": 4, "digest": "d4" } ],
    "dependencies": [ "4Zg3xPZ2p8jVbJpKfL8iLqKQm6mKzW8bHVXWJcUZh9Wq" ]
  }
}"#;
        let summary = decode_json(text).unwrap();
        assert_eq!(summary.status, ParseStatus::Failure);
        assert_eq!(summary.error.as_deref(), Some("MoveAbort in command 0"));
        assert_eq!(summary.total, 2_500_000);
        assert_eq!(summary.non_refundable, 5050);
        assert_eq!(summary.created[0].owner, "0xaa");
        assert_eq!(summary.mutated[0].owner, "Shared");
        assert_eq!(summary.gas_object[0].id, "0x03");
        assert_eq!(summary.deleted, vec!["0x04"]);
        assert_eq!(summary.dependencies.len(), 1);
    }

    #[test]
    fn test_json_without_gas_falls_back_to_text() {
        assert!(decode_json(r#"{"digest": "abc"}"#).is_none());
        let summary = parse(r#"{"digest": "abc"}"#);
        assert_eq!(summary.status, ParseStatus::Failure);
    }
}
