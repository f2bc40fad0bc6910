// Error types for Invoker module
#![allow(dead_code)]

use thiserror::Error;

/// Environment-level invoker faults.
///
/// A nonzero exit code or stderr output is never one of these; both are
/// captured in [`crate::invoker::RawExecutionResult`].
#[derive(Debug, Error)]
pub enum InvokerError {
    #[error("Executable not found: {0}")]
    NotFound(String),

    #[error("Failed to spawn '{0}': {1}")]
    SpawnFailed(String, String),

    #[error("Failed to capture output of '{0}': {1}")]
    OutputCaptureFailed(String, String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, InvokerError>;
