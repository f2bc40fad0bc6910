// Integration tests for Invoker module
// This file should be run with cargo test --test test_invoker

#[path = "../src/invoker/mod.rs"]
mod invoker;

use invoker::{CommandRunner, Invoker, InvokerConfig, InvokerError, RunOptions};

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

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|a| a.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test capturing stdout of a successful command
    #[tokio::test]
    async fn test_echo() {
        init_tracing();

        let invoker = Invoker::default();
        let result = invoker
            .run("echo", &args(&["hello"]), &RunOptions::default())
            .await;
        let result = tokio_test::assert_ok!(result);

        assert_eq!(result.stdout.trim(), "hello");
        assert_eq!(result.exit_code, 0);
        assert!(!result.timed_out);
        assert!(!result.truncated);
    }

    /// Test that a nonzero exit is data, not an error
    #[tokio::test]
    async fn test_nonzero_exit_is_captured() {
        init_tracing();

        let invoker = Invoker::default();
        let result = invoker
            .run(
                "sh",
                &args(&["-c", "echo out; echo err >&2; exit 3"]),
                &RunOptions::default(),
            )
            .await;
        let result = tokio_test::assert_ok!(result);

        assert_eq!(result.exit_code, 3);
        assert_eq!(result.stdout.trim(), "out");
        assert_eq!(result.stderr.trim(), "err");
    }

    /// Test missing binary
    #[tokio::test]
    async fn test_missing_binary() {
        init_tracing();

        let invoker = Invoker::default();
        let result = invoker
            .run("suiterm-no-such-binary", &[], &RunOptions::default())
            .await;

        match result {
            Err(InvokerError::NotFound(name)) => assert_eq!(name, "suiterm-no-such-binary"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    /// Test timeout kill keeps what was printed before
    #[tokio::test]
    async fn test_timeout_keeps_partial_output() {
        init_tracing();

        let invoker = Invoker::default();
        let options = RunOptions::with_timeout_ms(300);
        let start = std::time::Instant::now();
        let result = invoker
            .run("sh", &args(&["-c", "echo partial; exec sleep 5"]), &options)
            .await;
        let result = tokio_test::assert_ok!(result);

        assert!(result.timed_out);
        assert_eq!(result.exit_code, -1);
        assert!(result.stdout.contains("partial"));
        assert!(start.elapsed() < std::time::Duration::from_secs(4));
    }

    /// Test output beyond the capture limit is cut and flagged
    #[tokio::test]
    async fn test_output_truncated() {
        init_tracing();

        let config = InvokerConfig {
            max_output_bytes: 16,
            ..Default::default()
        };
        let invoker = Invoker::new(config);
        let result = invoker
            .run(
                "sh",
                &args(&["-c", "printf '0123456789abcdefghijklmnop'"]),
                &RunOptions::default(),
            )
            .await;
        let result = tokio_test::assert_ok!(result);

        assert!(result.truncated);
        assert_eq!(result.stdout, "0123456789abcdef");
    }

    /// Test working directory option
    #[tokio::test]
    async fn test_working_directory() {
        init_tracing();

        let dir = std::env::temp_dir();
        let invoker = Invoker::default();
        let options = RunOptions::default().cwd(&dir);
        let result = tokio_test::assert_ok!(invoker.run("pwd", &[], &options).await);

        let printed = std::path::PathBuf::from(result.stdout.trim());
        assert_eq!(
            printed.canonicalize().unwrap(),
            dir.canonicalize().unwrap()
        );
    }
}
