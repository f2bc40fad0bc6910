// Integration tests for Relay module
// This file should be run with cargo test --test test_relay

#[path = "../src/invoker/mod.rs"]
mod invoker;

#[path = "../src/classify/mod.rs"]
mod classify;

#[path = "../src/normalize/mod.rs"]
mod normalize;

#[path = "../src/extract/mod.rs"]
mod extract;

#[path = "../src/relay/mod.rs"]
mod relay;

use async_trait::async_trait;
use classify::Classifier;
use invoker::{CommandRunner, InvokerConfig, InvokerError, RawExecutionResult, RunOptions};
use relay::{CommandRequest, Relay, RelayConfig};
use std::sync::{Arc, Mutex};

fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    });
}

/// Returns a canned result and records every call
struct FakeRunner {
    result: Option<RawExecutionResult>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl FakeRunner {
    fn returning(result: RawExecutionResult) -> Arc<Self> {
        Arc::new(Self {
            result: Some(result),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn missing_binary() -> Arc<Self> {
        Arc::new(Self {
            result: None,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(
        &self,
        command: &str,
        args: &[String],
        _options: &RunOptions,
    ) -> invoker::Result<RawExecutionResult> {
        self.calls
            .lock()
            .unwrap()
            .push((command.to_string(), args.to_vec()));
        self.result
            .clone()
            .ok_or_else(|| InvokerError::NotFound(command.to_string()))
    }
}

fn relay_with(runner: Arc<FakeRunner>) -> Relay {
    let invoker = InvokerConfig {
        sui_bin: "/opt/sui/bin/sui".to_string(),
        walrus_bin: "/opt/walrus/bin/walrus".to_string(),
        ..Default::default()
    };
    Relay::new(
        runner,
        Arc::new(Classifier::builtin().unwrap()),
        invoker,
        RelayConfig::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test a successful replay returns 200 with the gas summary
    #[tokio::test]
    async fn test_success_envelope() {
        init_tracing();

        let runner = FakeRunner::returning(RawExecutionResult::success(
            "Status: Success\nGas Used: computation 1000000, storage 2000000, rebate 500000\n",
        ));
        let relay = relay_with(runner.clone());
        let response = relay
            .execute(&CommandRequest::Replay {
                digest: "4Zg3xPZ2p8jVbJpKfL8iLqKQm6mKzW8bHVXWJcUZh9Wq".into(),
            })
            .await;

        assert_eq!(response.status, 200);
        assert!(response.success);
        assert!(response.error.is_none());

        let value: serde_json::Value = serde_json::from_str(&response.to_json()).unwrap();
        assert_eq!(value["data"]["outcome"], "success");
        assert_eq!(value["data"]["summary"]["kind"], "gas");
        assert_eq!(value["data"]["summary"]["total"], 2_500_000);

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "/opt/sui/bin/sui");
        assert_eq!(
            calls[0].1,
            vec![
                "client",
                "replay-transaction",
                "--tx-digest",
                "4Zg3xPZ2p8jVbJpKfL8iLqKQm6mKzW8bHVXWJcUZh9Wq"
            ]
        );
    }

    /// Test missing arguments are rejected without spawning
    #[tokio::test]
    async fn test_validation_rejects_before_spawn() {
        init_tracing();

        let runner = FakeRunner::returning(RawExecutionResult::success(""));
        let relay = relay_with(runner.clone());
        let response = relay
            .execute(&CommandRequest::Coverage {
                package_path: String::new(),
            })
            .await;

        assert_eq!(response.status, 400);
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("package path is required"));
        assert!(runner.calls().is_empty());
    }

    /// Test a caller mistake reported by the tool is a 400
    #[tokio::test]
    async fn test_user_error_is_400() {
        init_tracing();

        let runner = FakeRunner::returning(RawExecutionResult::failure(
            1,
            "",
            "Error: Invalid package path: ./missing\n",
        ));
        let relay = relay_with(runner);
        let response = relay
            .execute(&CommandRequest::Publish {
                package_path: "./missing".into(),
                gas_budget: None,
            })
            .await;

        assert_eq!(response.status, 400);
        assert_eq!(
            response.error.as_deref(),
            Some("Error: Invalid package path: ./missing")
        );
    }

    /// Test the parsed abort reason replaces the generic tool error
    #[tokio::test]
    async fn test_failure_detail_replaces_message() {
        init_tracing();

        let runner = FakeRunner::returning(RawExecutionResult::failure(
            1,
            "Status: Failure { error: \"MoveAbort(0x2::balance, 2) in command 0\" }\n",
            "Error: transaction failed\n",
        ));
        let relay = relay_with(runner);
        let response = relay
            .execute(&CommandRequest::Publish {
                package_path: "./counter".into(),
                gas_budget: Some(50_000_000),
            })
            .await;

        assert_eq!(response.status, 500);
        assert_eq!(
            response.error.as_deref(),
            Some("MoveAbort(0x2::balance, 2) in command 0")
        );
        assert!(response.data.is_some());
    }

    /// Test warnings still succeed
    #[tokio::test]
    async fn test_warning_is_200() {
        init_tracing();

        let runner = FakeRunner::returning(RawExecutionResult::failure(
            1,
            "warning[W09002]: unused variable\nBUILDING counter\n",
            "",
        ));
        let relay = relay_with(runner);
        let response = relay
            .execute(&CommandRequest::Build {
                package_path: "./counter".into(),
            })
            .await;

        assert_eq!(response.status, 200);
        assert!(response.success);
        let data = response.data.unwrap();
        assert_eq!(data.outcome, "warning");
        assert_eq!(data.warning.as_deref(), Some("warning[W09002]: unused variable"));
    }

    /// Test a timeout maps to 500 with a message
    #[tokio::test]
    async fn test_timeout_is_500() {
        init_tracing();

        let mut result = RawExecutionResult::failure(-1, "partial", "");
        result.timed_out = true;
        let relay = relay_with(FakeRunner::returning(result));
        let response = relay.execute(&CommandRequest::Envs).await;

        assert_eq!(response.status, 500);
        assert_eq!(response.error.as_deref(), Some("command timed out"));
    }

    /// Test an environment fault becomes a 500
    #[tokio::test]
    async fn test_missing_binary_is_500() {
        init_tracing();

        let relay = relay_with(FakeRunner::missing_binary());
        let response = relay.execute(&CommandRequest::ListBlobs).await;

        assert_eq!(response.status, 500);
        assert!(response.error.unwrap().contains("/opt/walrus/bin/walrus"));
    }

    /// Test private keys never leave the relay
    #[tokio::test]
    async fn test_output_is_redacted() {
        init_tracing();

        let runner = FakeRunner::returning(RawExecutionResult::success(
            "[{\"alias\":\"a\",\"suiAddress\":\"0xaa\",\"publicBase64Key\":\"AK\",\"keyScheme\":\"ed25519\",\"flag\":0}]\nsuiprivkey1qqsecretsecret\n",
        ));
        let relay = relay_with(runner);
        let response = relay.execute(&CommandRequest::ListKeys).await;

        assert_eq!(response.status, 200);
        let json = response.to_json();
        assert!(!json.contains("suiprivkey"));
        assert!(json.contains("0xaa"));
    }

    /// Test a table-row recovery phrase is masked in listings
    #[tokio::test]
    async fn test_table_mnemonic_is_redacted() {
        init_tracing();

        let runner = FakeRunner::returning(RawExecutionResult::success(
            "│ mnemonic │ abandon ability able about above absent absorb abstract absurd abuse access accident │\n",
        ));
        let relay = relay_with(runner);
        let response = relay
            .execute(&CommandRequest::Raw {
                args: vec!["client".into(), "new-address".into(), "ed25519".into()],
            })
            .await;

        let json = response.to_json();
        assert!(!json.contains("abandon ability"));
        assert!(json.contains("[MNEMONIC]"));
    }

    /// Test a generated key's recovery phrase reaches the caller
    #[tokio::test]
    async fn test_generate_key_output_not_redacted() {
        init_tracing();

        let phrase = "abandon ability able about above absent absorb abstract absurd abuse access accident";
        let runner = FakeRunner::returning(RawExecutionResult::success(format!(
            "Created new keypair and saved it to file\nSecret Recovery Phrase : [{phrase}]\n"
        )));
        let relay = relay_with(runner.clone());
        let response = relay
            .execute(&CommandRequest::GenerateKey {
                scheme: "ed25519".into(),
                word_length: Some(12),
            })
            .await;

        assert_eq!(response.status, 200);
        assert!(response.to_json().contains(phrase));
        assert_eq!(
            runner.calls()[0].1,
            vec!["keytool", "generate", "ed25519", "--word-length", "12"]
        );
    }

    /// Test every failing envelope carries a non-empty error
    #[tokio::test]
    async fn test_failures_never_have_empty_error() {
        init_tracing();

        for code in [1, 2, 101, 255] {
            let relay = relay_with(FakeRunner::returning(RawExecutionResult::failure(
                code, "", "",
            )));
            let response = relay
                .execute(&CommandRequest::Raw {
                    args: vec!["client".into(), "gas".into()],
                })
                .await;
            assert!(!response.success);
            assert_eq!(
                response.error,
                Some(format!("command exited with code {code}"))
            );
        }
    }
}
