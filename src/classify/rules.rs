// Versioned classifier rule data
#![allow(dead_code)]

use crate::classify::error::Result;
use crate::classify::types::ExpectedKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Rules shipped with the binary, keyed to the current sui CLI output
pub const DEFAULT_RULES: &str = include_str!("default_rules.toml");

fn default_max_message_lines() -> usize {
    20
}

/// Marker text that identifies caller mistakes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserErrorMarkers {
    /// Checked for every kind
    #[serde(default)]
    pub common: Vec<String>,
    /// Extra markers per kind name (`publish`, `keys`, ...)
    #[serde(flatten)]
    pub by_kind: HashMap<String, Vec<String>>,
}

impl UserErrorMarkers {
    /// Common markers followed by the ones specific to `kind`
    pub fn for_kind(&self, kind: ExpectedKind) -> impl Iterator<Item = &str> {
        self.common
            .iter()
            .chain(self.by_kind.get(kind.as_str()).into_iter().flatten())
            .map(String::as_str)
    }
}

/// Classifier rule set, loadable from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierRules {
    /// Upstream tool version these markers were written against
    pub version: String,
    pub warning_pattern: String,
    pub error_code_pattern: String,
    #[serde(default)]
    pub diagnostic_markers: Vec<String>,
    #[serde(default = "default_max_message_lines")]
    pub max_message_lines: usize,
    #[serde(default)]
    pub user_error: UserErrorMarkers,
}

impl ClassifierRules {
    /// The embedded default rules
    pub fn builtin() -> Result<Self> {
        Ok(toml::from_str(DEFAULT_RULES)?)
    }

    /// Load rules from a TOML file, falling back to the builtin set when it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "rules file not found, using builtin rules");
            return Self::builtin();
        }

        let content = std::fs::read_to_string(path)?;
        let rules: ClassifierRules = toml::from_str(&content)?;

        debug!(
            path = %path.display(),
            version = %rules.version,
            "loaded classifier rules"
        );
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rules_parse() {
        let rules = ClassifierRules::builtin().unwrap();
        assert_eq!(rules.version, "sui-1.x");
        assert_eq!(rules.max_message_lines, 20);
        assert!(rules.user_error.common.iter().any(|m| m == "is required"));
    }

    #[test]
    fn test_markers_include_common_and_kind() {
        let rules = ClassifierRules::builtin().unwrap();
        let publish: Vec<&str> = rules.user_error.for_kind(ExpectedKind::Publish).collect();
        assert!(publish.contains(&"invalid package path"));
        assert!(publish.contains(&"unable to find package manifest"));

        let generic: Vec<&str> = rules.user_error.for_kind(ExpectedKind::Generic).collect();
        assert_eq!(generic.len(), rules.user_error.common.len());
    }

    #[test]
    fn test_missing_file_falls_back_to_builtin() {
        let rules = ClassifierRules::load(Path::new("/nonexistent/suiterm/rules.toml")).unwrap();
        assert_eq!(rules, ClassifierRules::builtin().unwrap());
    }

    #[test]
    fn test_partial_rules_use_defaults() {
        let rules: ClassifierRules = toml::from_str(
            r#"
version = "sui-2.0"
warning_pattern = 'WARN:'
error_code_pattern = 'ERR\d+'
"#,
        )
        .unwrap();
        assert_eq!(rules.max_message_lines, 20);
        assert!(rules.diagnostic_markers.is_empty());
        assert!(rules.user_error.common.is_empty());
    }
}
