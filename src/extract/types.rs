// Data types shared by the extractors

use serde::{Deserialize, Serialize};

/// Whether the extractor recovered a usable structure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStatus {
    Success,
    #[default]
    Failure,
}

impl ParseStatus {
    pub fn from_found(found: bool) -> Self {
        if found {
            ParseStatus::Success
        } else {
            ParseStatus::Failure
        }
    }
}

/// One created or mutated object, in the order the tool reported it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectChangeRecord {
    pub id: String,
    pub owner: String,
    pub version: u64,
}
