// Relay configuration

use crate::invoker::config::parse_env_var;
use crate::normalize::RedactOptions;
use std::path::PathBuf;

/// Relay configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Mask private keys and recovery phrases before anything is parsed or returned
    pub redact_secrets: bool,
    /// Also shorten full addresses (display only, breaks object ids in summaries)
    pub mask_addresses: bool,
    /// Classifier rules override file
    pub rules_path: PathBuf,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            redact_secrets: true,
            mask_addresses: false,
            rules_path: dirs::home_dir()
                .map(|p| p.join(".suiterm").join("rules.toml"))
                .unwrap_or_else(|| PathBuf::from(".suiterm/rules.toml")),
        }
    }
}

impl RelayConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = RelayConfig::default();

        config.redact_secrets = parse_env_var("SUITERM_REDACT", config.redact_secrets);
        config.mask_addresses = parse_env_var("SUITERM_MASK_ADDRESSES", config.mask_addresses);
        if let Ok(path) = std::env::var("SUITERM_RULES_PATH") {
            config.rules_path = PathBuf::from(path);
        }

        config
    }

    pub fn redact_options(&self) -> RedactOptions {
        RedactOptions {
            mask_addresses: self.mask_addresses,
        }
    }
}
