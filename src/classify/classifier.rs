// Outcome classifier
#![allow(dead_code)]

use crate::classify::error::{ClassifierError, Result};
use crate::classify::rules::ClassifierRules;
use crate::classify::types::{ExpectedKind, Outcome};
use crate::invoker::RawExecutionResult;
use regex::{Regex, RegexBuilder};
use tracing::debug;

/// Heuristic classifier over stdout/stderr/exit code.
///
/// The wrapped CLI has no machine-readable status and returns nonzero for
/// lint warnings alone, so the exit code is only one signal among several.
/// Immutable once built; share it behind an `Arc`.
#[derive(Debug)]
pub struct Classifier {
    rules: ClassifierRules,
    warning_re: Regex,
    error_code_re: Regex,
}

impl Classifier {
    pub fn new(rules: ClassifierRules) -> Result<Self> {
        let warning_re = compile("warning_pattern", &rules.warning_pattern, &rules.version)?;
        let error_code_re =
            compile("error_code_pattern", &rules.error_code_pattern, &rules.version)?;

        debug!(version = %rules.version, "classifier rules compiled");

        Ok(Self {
            rules,
            warning_re,
            error_code_re,
        })
    }

    pub fn builtin() -> Result<Self> {
        Self::new(ClassifierRules::builtin()?)
    }

    pub fn rules(&self) -> &ClassifierRules {
        &self.rules
    }

    pub fn classify(&self, result: &RawExecutionResult, kind: ExpectedKind) -> Outcome {
        let outcome = self.classify_inner(result, kind);
        debug!(
            kind = %kind,
            exit_code = result.exit_code,
            outcome = outcome.label(),
            "classified result"
        );
        outcome
    }

    fn classify_inner(&self, result: &RawExecutionResult, kind: ExpectedKind) -> Outcome {
        if result.timed_out {
            return Outcome::Timeout;
        }

        let combined = result.combined();

        if let Some(diagnostic) = self.error_code_diagnostic(&combined) {
            return Outcome::ToolError(diagnostic);
        }

        let warnings: Vec<&str> = combined
            .lines()
            .filter(|line| self.warning_re.is_match(line))
            .map(str::trim)
            .take(self.rules.max_message_lines)
            .collect();
        if !warnings.is_empty() {
            return Outcome::Warning(warnings.join("\n"));
        }

        if result.exit_code == 0 {
            return Outcome::Success;
        }

        if let Some(line) = self.user_error_line(&combined, kind) {
            return Outcome::UserError(line);
        }

        Outcome::ToolError(self.best_message(result))
    }

    /// Lines from the first error-code diagnostic onward
    fn error_code_diagnostic(&self, text: &str) -> Option<String> {
        let lines: Vec<&str> = text.lines().collect();
        let first = lines.iter().position(|line| self.error_code_re.is_match(line))?;

        let block: Vec<&str> = lines[first..]
            .iter()
            .map(|line| line.trim_end())
            .take(self.rules.max_message_lines)
            .collect();
        Some(block.join("\n").trim().to_string())
    }

    fn user_error_line(&self, text: &str, kind: ExpectedKind) -> Option<String> {
        let markers: Vec<String> = self
            .rules
            .user_error
            .for_kind(kind)
            .map(str::to_lowercase)
            .collect();

        text.lines()
            .find(|line| {
                let lower = line.to_lowercase();
                markers.iter().any(|m| lower.contains(m.as_str()))
            })
            .map(|line| line.trim().to_string())
    }

    /// Most useful failure text available.
    ///
    /// stdout diagnostics win over stderr because the CLI often prints the
    /// real cause to stdout and only a generic line to stderr.
    fn best_message(&self, result: &RawExecutionResult) -> String {
        let max = self.rules.max_message_lines;

        let diagnostics: Vec<&str> = result
            .stdout
            .lines()
            .filter(|line| self.is_diagnostic(line))
            .map(str::trim)
            .take(max)
            .collect();
        if !diagnostics.is_empty() {
            return diagnostics.join("\n");
        }

        for stream in [&result.stderr, &result.stdout] {
            let trimmed = stream.trim();
            if !trimmed.is_empty() {
                return trimmed.lines().take(max).collect::<Vec<_>>().join("\n");
            }
        }

        format!("command exited with code {}", result.exit_code)
    }

    fn is_diagnostic(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        self.rules
            .diagnostic_markers
            .iter()
            .any(|m| lower.contains(&m.to_lowercase()))
    }
}

fn compile(field: &'static str, pattern: &str, version: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| ClassifierError::InvalidPattern {
            field,
            version: version.to_string(),
            reason: e.to_string(),
        })
}
