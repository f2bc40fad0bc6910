//! `sui keytool list` output, as `--json` or as the boxed key table.

use crate::extract::decode_or_scan;
use crate::extract::json::{json_payload, json_string};
use crate::extract::text::{first_hex_id, table_cells};
use crate::extract::types::ParseStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEntry {
    pub address: String,
    pub alias: Option<String>,
    pub scheme: Option<String>,
    pub public_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyList {
    pub status: ParseStatus,
    pub keys: Vec<KeyEntry>,
    pub raw_output: String,
}

pub fn parse(text: &str) -> KeyList {
    decode_or_scan(text, decode_json, scan_text)
}

/// Strict stage: an array of key objects
pub fn decode_json(text: &str) -> Option<KeyList> {
    let value = json_payload(text)?;
    let items = value.as_array()?;

    let keys = items
        .iter()
        .map(|item| {
            Some(KeyEntry {
                address: json_string(item.get("suiAddress"))?,
                alias: json_string(item.get("alias")),
                scheme: json_string(item.get("keyScheme")),
                public_key: json_string(item.get("publicBase64Key")),
            })
        })
        .collect::<Option<Vec<_>>>()?;

    Some(KeyList {
        status: ParseStatus::Success,
        keys,
        raw_output: text.to_string(),
    })
}

/// Heuristic stage: `│ alias │ value │` rows, one block per key.
///
/// Without any table rows every line carrying a `0x` address becomes a key.
pub fn scan_text(text: &str) -> KeyList {
    let mut keys: Vec<KeyEntry> = Vec::new();
    let mut current: Option<KeyEntry> = None;
    let mut saw_rows = false;

    for line in text.lines() {
        let Some(cells) = table_cells(line) else {
            continue;
        };
        let cells: Vec<&str> = cells
            .iter()
            .map(String::as_str)
            .filter(|c| !c.is_empty())
            .collect();
        let [field, value] = cells[..] else {
            continue;
        };
        saw_rows = true;

        let entry = current.get_or_insert_with(KeyEntry::default);
        let already_set = match field {
            "alias" => entry.alias.is_some(),
            "suiAddress" => !entry.address.is_empty(),
            _ => false,
        };
        if already_set {
            keys.extend(current.take());
        }

        let entry = current.get_or_insert_with(KeyEntry::default);
        match field {
            "alias" => entry.alias = Some(value.to_string()),
            "suiAddress" => entry.address = value.to_string(),
            "keyScheme" => entry.scheme = Some(value.to_string()),
            "publicBase64Key" => entry.public_key = Some(value.to_string()),
            _ => {}
        }
    }
    keys.extend(current);
    keys.retain(|k| !k.address.is_empty());

    if !saw_rows {
        keys = text
            .lines()
            .filter_map(first_hex_id)
            .map(|addr| KeyEntry {
                address: addr.to_string(),
                ..Default::default()
            })
            .collect();
    }

    KeyList {
        status: ParseStatus::from_found(!keys.is_empty()),
        keys,
        raw_output: text.to_string(),
    }
}
