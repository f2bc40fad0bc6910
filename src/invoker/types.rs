// Data types for Invoker module
#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Everything observed about one external process invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExecutionResult {
    pub stdout: String,
    pub stderr: String,
    /// Process exit code, -1 when the process was killed or had no code
    pub exit_code: i32,
    pub duration_ms: u64,
    /// The process was killed after exceeding its timeout
    pub timed_out: bool,
    /// Output exceeded the capture limit and was cut
    #[serde(default)]
    pub truncated: bool,
}

impl RawExecutionResult {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            exit_code: 0,
            duration_ms: 0,
            timed_out: false,
            truncated: false,
        }
    }

    pub fn failure(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code,
            duration_ms: 0,
            timed_out: false,
            truncated: false,
        }
    }

    /// stdout followed by stderr, the text the classifier scans
    pub fn combined(&self) -> String {
        let mut text = String::with_capacity(self.stdout.len() + self.stderr.len() + 1);
        text.push_str(&self.stdout);
        if !self.stdout.is_empty() && !self.stderr.is_empty() && !self.stdout.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&self.stderr);
        text
    }
}

/// Per-call options
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Kill the child after this long
    pub timeout: Duration,
    /// Working directory for the child
    pub cwd: Option<PathBuf>,
}

impl RunOptions {
    pub fn with_timeout_ms(timeout_ms: u64) -> Self {
        Self {
            timeout: Duration::from_millis(timeout_ms),
            cwd: None,
        }
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::with_timeout_ms(60_000)
    }
}
