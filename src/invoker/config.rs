// Invoker configuration
#![allow(dead_code)]

use crate::invoker::types::RunOptions;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Parse an environment variable, logging a warning if the value is present but invalid.
pub fn parse_env_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(v) => match v.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(var = name, value = %v, "Invalid env var value, using default");
                default
            }
        },
        Err(_) => default,
    }
}

/// Invoker configuration
#[derive(Debug, Clone)]
pub struct InvokerConfig {
    /// Path or name of the sui binary
    pub sui_bin: String,
    /// Path or name of the walrus binary
    pub walrus_bin: String,
    /// Default per-call timeout in milliseconds
    pub timeout_ms: u64,
    /// Maximum bytes kept per stream (stdout and stderr each)
    pub max_output_bytes: usize,
    /// Default working directory for child processes
    pub working_dir: Option<PathBuf>,
    /// How long to keep draining pipes after a timeout kill
    pub kill_grace_ms: u64,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            sui_bin: String::from("sui"),
            walrus_bin: String::from("walrus"),
            timeout_ms: 60_000,
            max_output_bytes: 1048576, // 1MB
            working_dir: None,
            kill_grace_ms: 500,
        }
    }
}

impl InvokerConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = InvokerConfig::default();

        if let Ok(bin) = std::env::var("SUI_BIN") {
            config.sui_bin = bin;
        }
        if let Ok(bin) = std::env::var("WALRUS_BIN") {
            config.walrus_bin = bin;
        }
        config.timeout_ms = parse_env_var("SUITERM_TIMEOUT_MS", config.timeout_ms);
        config.max_output_bytes =
            parse_env_var("SUITERM_MAX_OUTPUT_BYTES", config.max_output_bytes);
        config.kill_grace_ms = parse_env_var("SUITERM_KILL_GRACE_MS", config.kill_grace_ms);
        config.working_dir = std::env::var("SUITERM_CWD").ok().map(PathBuf::from);

        config
    }

    /// Default options for a single call
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            timeout: Duration::from_millis(self.timeout_ms),
            cwd: self.working_dir.clone(),
        }
    }
}
