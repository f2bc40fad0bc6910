// Error types for Classify module
#![allow(dead_code)]

use thiserror::Error;

/// Errors building a classifier from rule data
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Invalid pattern '{field}' in rules {version}: {reason}")]
    InvalidPattern {
        field: &'static str,
        version: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ClassifierError>;
