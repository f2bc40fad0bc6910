//! `sui client envs` output, as `--json` or as the alias/url/active table.

use crate::extract::decode_or_scan;
use crate::extract::json::{json_payload, json_string};
use crate::extract::text::table_cells;
use crate::extract::types::ParseStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvEntry {
    pub alias: String,
    pub url: String,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvList {
    pub status: ParseStatus,
    pub envs: Vec<EnvEntry>,
    pub raw_output: String,
}

impl EnvList {
    pub fn active(&self) -> Option<&EnvEntry> {
        self.envs.iter().find(|e| e.active)
    }
}

pub fn parse(text: &str) -> EnvList {
    decode_or_scan(text, decode_json, scan_text)
}

/// Strict stage: `[[{alias, rpc, ..}, ..], "active-alias"]`
pub fn decode_json(text: &str) -> Option<EnvList> {
    let value = json_payload(text)?;
    let [envs, active] = value.as_array()?.as_slice() else {
        return None;
    };
    let active = active.as_str();

    let envs = envs
        .as_array()?
        .iter()
        .map(|env| {
            let alias = json_string(env.get("alias"))?;
            Some(EnvEntry {
                active: active == Some(alias.as_str()),
                url: json_string(env.get("rpc")).unwrap_or_default(),
                alias,
            })
        })
        .collect::<Option<Vec<_>>>()?;

    Some(EnvList {
        status: ParseStatus::Success,
        envs,
        raw_output: text.to_string(),
    })
}

/// Heuristic stage: table rows after the `alias │ url │ active` header
pub fn scan_text(text: &str) -> EnvList {
    let envs: Vec<EnvEntry> = text
        .lines()
        .filter_map(table_cells)
        .filter_map(|cells| match cells.as_slice() {
            [alias, url, rest @ ..] if !alias.is_empty() && !alias.eq_ignore_ascii_case("alias") => {
                Some(EnvEntry {
                    alias: alias.clone(),
                    url: url.clone(),
                    active: rest.first().is_some_and(|c| c.contains('*')),
                })
            }
            _ => None,
        })
        .collect();

    EnvList {
        status: ParseStatus::from_found(!envs.is_empty()),
        envs,
        raw_output: text.to_string(),
    }
}
