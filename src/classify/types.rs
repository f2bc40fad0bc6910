// Data types for Classify module

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Normalized classification of one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "message", rename_all = "snake_case")]
pub enum Outcome {
    Success,
    /// Substantively successful, with diagnostics worth showing
    Warning(String),
    /// The caller's input was wrong
    UserError(String),
    /// The external tool failed for reasons unrelated to input
    ToolError(String),
    Timeout,
}

impl Outcome {
    /// Success and Warning both carry usable output
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Success | Outcome::Warning(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Warning(m) | Outcome::UserError(m) | Outcome::ToolError(m) => Some(m),
            Outcome::Success | Outcome::Timeout => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Warning(_) => "warning",
            Outcome::UserError(_) => "user_error",
            Outcome::ToolError(_) => "tool_error",
            Outcome::Timeout => "timeout",
        }
    }
}

/// The subcommand family a caller expects output from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedKind {
    Replay,
    Coverage,
    Migrate,
    Disassemble,
    Publish,
    Build,
    Keys,
    Envs,
    Walrus,
    Generic,
}

impl ExpectedKind {
    pub const ALL: [ExpectedKind; 10] = [
        ExpectedKind::Replay,
        ExpectedKind::Coverage,
        ExpectedKind::Migrate,
        ExpectedKind::Disassemble,
        ExpectedKind::Publish,
        ExpectedKind::Build,
        ExpectedKind::Keys,
        ExpectedKind::Envs,
        ExpectedKind::Walrus,
        ExpectedKind::Generic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExpectedKind::Replay => "replay",
            ExpectedKind::Coverage => "coverage",
            ExpectedKind::Migrate => "migrate",
            ExpectedKind::Disassemble => "disassemble",
            ExpectedKind::Publish => "publish",
            ExpectedKind::Build => "build",
            ExpectedKind::Keys => "keys",
            ExpectedKind::Envs => "envs",
            ExpectedKind::Walrus => "walrus",
            ExpectedKind::Generic => "generic",
        }
    }
}

impl fmt::Display for ExpectedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpectedKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpectedKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown output kind: {s}"))
    }
}
