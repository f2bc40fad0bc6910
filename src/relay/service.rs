// Relay service: run, classify, extract, respond
#![allow(dead_code)]

use crate::classify::{Classifier, Outcome};
use crate::extract::{self, Extracted};
use crate::invoker::{CommandRunner, InvokerConfig, RawExecutionResult};
use crate::normalize::redact_secrets;
use crate::relay::command::{CommandRequest, Program};
use crate::relay::config::RelayConfig;
use crate::relay::response::{ApiResponse, ResponseData};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Composes one runner, one classifier and the extractors.
///
/// Holds no per-call state, so a single instance can serve concurrent requests.
pub struct Relay {
    runner: Arc<dyn CommandRunner>,
    classifier: Arc<Classifier>,
    invoker: InvokerConfig,
    config: RelayConfig,
}

impl Relay {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        classifier: Arc<Classifier>,
        invoker: InvokerConfig,
        config: RelayConfig,
    ) -> Self {
        debug!(
            rules_version = %classifier.rules().version,
            redact_secrets = config.redact_secrets,
            "initializing relay"
        );
        Self {
            runner,
            classifier,
            invoker,
            config,
        }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    pub async fn execute(&self, request: &CommandRequest) -> ApiResponse {
        if let Err(reason) = request.validate() {
            debug!(reason = %reason, "request rejected before spawn");
            return ApiResponse::bad_request(reason);
        }

        let program = match request.program() {
            Program::Sui => &self.invoker.sui_bin,
            Program::Walrus => &self.invoker.walrus_bin,
        };
        let args = request.args();
        let options = self.invoker.run_options();

        info!(program = %program, kind = %request.expected_kind(), "relaying command");

        match self.runner.run(program, &args, &options).await {
            Ok(raw) => self.respond(request, raw),
            Err(e) => {
                warn!(program = %program, error = %e, "command could not be run");
                ApiResponse::internal(self.scrub(&e.to_string()))
            }
        }
    }

    /// Classify and extract an already captured result
    pub fn respond(&self, request: &CommandRequest, mut raw: RawExecutionResult) -> ApiResponse {
        // A new key's recovery phrase is shown exactly once
        if !request.reveals_new_secret() {
            raw.stdout = self.scrub(&raw.stdout);
            raw.stderr = self.scrub(&raw.stderr);
        }

        let outcome = self.classifier.classify(&raw, request.expected_kind());
        let summary = extract::extract(request.extract_kind(), &raw.stdout);
        let outcome = refine(outcome, &summary);

        info!(
            outcome = outcome.label(),
            exit_code = raw.exit_code,
            duration_ms = raw.duration_ms,
            timed_out = raw.timed_out,
            "command finished"
        );

        let data = ResponseData::new(&outcome, summary, &raw);
        ApiResponse::from_outcome(&outcome, data)
    }

    fn scrub(&self, text: &str) -> String {
        if self.config.redact_secrets {
            redact_secrets(text, self.config.redact_options())
        } else {
            text.to_string()
        }
    }
}

/// A parsed failure reason beats the classifier's generic text
fn refine(outcome: Outcome, summary: &Extracted) -> Outcome {
    match (outcome, summary.failure_detail()) {
        (Outcome::ToolError(_), Some(detail)) if !detail.trim().is_empty() => {
            Outcome::ToolError(detail.to_string())
        }
        (outcome, _) => outcome,
    }
}
