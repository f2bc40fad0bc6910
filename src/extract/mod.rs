// Extract module - fail-soft parsers turning CLI text into typed records
// Every parser keeps the untouched input in `raw_output` and never errors
#![allow(unused_imports)]

pub mod coverage;
pub mod disassembly;
pub mod envs;
pub mod gas;
pub mod json;
pub mod keys;
pub mod migration;
pub mod objects;
pub mod text;
pub mod types;

pub use coverage::CoverageReport;
pub use disassembly::Disassembly;
pub use envs::EnvList;
pub use gas::GasSummary;
pub use keys::KeyList;
pub use migration::MigrationDiff;
pub use types::{ObjectChangeRecord, ParseStatus};

use crate::classify::ExpectedKind;
use serde::Serialize;

/// Two-stage extraction: a strict structured decode, then the text heuristics.
///
/// Each stage is a plain function so it can be tested on its own.
pub fn decode_or_scan<T>(
    text: &str,
    decode: impl FnOnce(&str) -> Option<T>,
    scan: impl FnOnce(&str) -> T,
) -> T {
    decode(text).unwrap_or_else(|| scan(text))
}

/// Output of whichever extractor matched the expected kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Extracted {
    Gas(GasSummary),
    Coverage(CoverageReport),
    Migration(MigrationDiff),
    Disassembly(Disassembly),
    Keys(KeyList),
    Envs(EnvList),
    /// Kinds with no extractor pass stdout through untouched
    Raw { raw_output: String },
}

impl Extracted {
    pub fn status(&self) -> ParseStatus {
        match self {
            Extracted::Gas(s) => s.status,
            Extracted::Coverage(s) => s.status,
            Extracted::Migration(s) => s.status,
            Extracted::Disassembly(s) => s.status,
            Extracted::Keys(s) => s.status,
            Extracted::Envs(s) => s.status,
            Extracted::Raw { .. } => ParseStatus::Success,
        }
    }

    /// Specific failure text recovered from the output, if any
    pub fn failure_detail(&self) -> Option<&str> {
        match self {
            Extracted::Gas(s) => s.error.as_deref(),
            _ => None,
        }
    }

    pub fn raw_output(&self) -> &str {
        match self {
            Extracted::Gas(s) => &s.raw_output,
            Extracted::Coverage(s) => &s.raw_output,
            Extracted::Migration(s) => &s.raw_output,
            Extracted::Disassembly(s) => &s.raw_output,
            Extracted::Keys(s) => &s.raw_output,
            Extracted::Envs(s) => &s.raw_output,
            Extracted::Raw { raw_output } => raw_output,
        }
    }
}

/// Run the extractor for `kind` over `text`
pub fn extract(kind: ExpectedKind, text: &str) -> Extracted {
    match kind {
        // Publishing prints the same effects report as a replay
        ExpectedKind::Replay | ExpectedKind::Publish => Extracted::Gas(gas::parse(text)),
        ExpectedKind::Coverage => Extracted::Coverage(coverage::parse(text)),
        ExpectedKind::Migrate => Extracted::Migration(migration::parse(text)),
        ExpectedKind::Disassemble => Extracted::Disassembly(disassembly::parse(text)),
        ExpectedKind::Keys => Extracted::Keys(keys::parse(text)),
        ExpectedKind::Envs => Extracted::Envs(envs::parse(text)),
        ExpectedKind::Build | ExpectedKind::Walrus | ExpectedKind::Generic => Extracted::Raw {
            raw_output: text.to_string(),
        },
    }
}
