// Process invoker implementation
#![allow(dead_code)]

use crate::invoker::capture::{SharedCapture, drain_into, snapshot};
use crate::invoker::config::InvokerConfig;
use crate::invoker::error::{InvokerError, Result};
use crate::invoker::types::{RawExecutionResult, RunOptions};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Runs one external command and reports what happened as data.
///
/// Implementations must not fail on a nonzero exit status or on stderr
/// output; only environment faults (missing binary, spawn failure) are errors.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(
        &self,
        command: &str,
        args: &[String],
        options: &RunOptions,
    ) -> Result<RawExecutionResult>;
}

/// Spawns one OS process per call. No pooling, no retries.
pub struct Invoker {
    config: InvokerConfig,
}

impl Invoker {
    pub fn new(config: InvokerConfig) -> Self {
        debug!(
            timeout_ms = config.timeout_ms,
            max_output_bytes = config.max_output_bytes,
            sui_bin = %config.sui_bin,
            walrus_bin = %config.walrus_bin,
            "initializing invoker"
        );
        Self { config }
    }

    pub fn config(&self) -> &InvokerConfig {
        &self.config
    }
}

impl Default for Invoker {
    fn default() -> Self {
        Self::new(InvokerConfig::default())
    }
}

#[async_trait]
impl CommandRunner for Invoker {
    async fn run(
        &self,
        command: &str,
        args: &[String],
        options: &RunOptions,
    ) -> Result<RawExecutionResult> {
        let start = Instant::now();

        let mut cmd = Command::new(command);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(cwd) = &options.cwd {
            cmd.current_dir(cwd);
        }

        debug!(command = %command, args = ?args, "spawning child process");

        let mut child = cmd.spawn().map_err(|e| match e.kind() {
            ErrorKind::NotFound => InvokerError::NotFound(command.to_string()),
            _ => InvokerError::SpawnFailed(command.to_string(), e.to_string()),
        })?;

        let stdout = child.stdout.take().ok_or_else(|| {
            InvokerError::OutputCaptureFailed(command.to_string(), "stdout was not piped".into())
        })?;
        let stderr = child.stderr.take().ok_or_else(|| {
            InvokerError::OutputCaptureFailed(command.to_string(), "stderr was not piped".into())
        })?;

        let limit = self.config.max_output_bytes;
        let stdout_sink = SharedCapture::default();
        let stderr_sink = SharedCapture::default();
        let stdout_task = tokio::spawn(drain_into(stdout, stdout_sink.clone(), limit));
        let stderr_task = tokio::spawn(drain_into(stderr, stderr_sink.clone(), limit));

        let (exit_code, timed_out) = match timeout(options.timeout, child.wait()).await {
            Ok(status) => (status?.code().unwrap_or(-1), false),
            Err(_) => {
                warn!(
                    command = %command,
                    timeout_ms = options.timeout.as_millis() as u64,
                    "command timed out, killing"
                );
                if let Err(e) = child.kill().await {
                    warn!(command = %command, error = %e, "failed to kill timed out child");
                }
                (-1, true)
            }
        };

        // A killed child may leave grandchildren holding the pipes open, so
        // readers only get a grace period before we take what they have.
        let grace = Duration::from_millis(self.config.kill_grace_ms);
        finish_reader(command, stdout_task, grace).await;
        finish_reader(command, stderr_task, grace).await;

        let (stdout, stdout_discarded) = snapshot(&stdout_sink).await;
        let (stderr, stderr_discarded) = snapshot(&stderr_sink).await;
        let truncated = stdout_discarded > 0 || stderr_discarded > 0;
        if truncated {
            warn!(stdout_discarded, stderr_discarded, "output truncated");
        }

        let duration_ms = start.elapsed().as_millis() as u64;

        info!(
            command = %command,
            subcommand = %args.iter().take(2).cloned().collect::<Vec<_>>().join(" "),
            duration_ms = duration_ms,
            exit_code = exit_code,
            timed_out = timed_out,
            output_bytes = stdout.len() + stderr.len(),
            "command executed"
        );

        Ok(RawExecutionResult {
            stdout,
            stderr,
            exit_code,
            duration_ms,
            timed_out,
            truncated,
        })
    }
}

async fn finish_reader(
    command: &str,
    mut task: JoinHandle<std::io::Result<()>>,
    grace: Duration,
) {
    match timeout(grace, &mut task).await {
        Ok(Ok(Ok(()))) => {}
        Ok(Ok(Err(e))) => warn!(command = %command, error = %e, "pipe read failed"),
        Ok(Err(e)) => warn!(command = %command, error = %e, "pipe reader task failed"),
        Err(_) => {
            debug!(command = %command, "pipe still open after grace period, abandoning reader");
            task.abort();
        }
    }
}
