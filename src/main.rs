mod classify;
mod extract;
mod invoker;
mod normalize;
mod relay;
mod shell;

use clap::{Parser, Subcommand};
use classify::{Classifier, ClassifierRules, ExpectedKind};
use invoker::{CommandRunner, Invoker, InvokerConfig};
use normalize::redact_secrets;
use relay::response::STATUS_OK;
use relay::{CommandRequest, Relay, RelayConfig};
use std::io::Read;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::fmt;

/// CLI arguments
#[derive(Debug, Parser)]
#[command(name = "suiterm")]
#[command(about = "Run sui/walrus commands and get structured, classified results")]
struct Args {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Run one command and print the response envelope
    Run {
        /// Request as JSON, e.g. '{"command":"replay","digest":"..."}'
        #[arg(long, conflicts_with = "args")]
        json: Option<String>,

        /// Plain sui arguments, passed through as-is
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Extract a structured record from saved output
    Parse {
        /// replay, coverage, migrate, disassemble, publish, build, keys, envs, walrus, generic
        kind: ExpectedKind,

        /// Input file, stdin when omitted
        file: Option<PathBuf>,
    },
    /// Interactive shell
    Shell {
        /// History file path
        #[arg(long)]
        history_file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let invoker_config = InvokerConfig::from_env();
    let relay_config = RelayConfig::from_env();

    info!(
        sui_bin = %invoker_config.sui_bin,
        timeout_ms = invoker_config.timeout_ms,
        rules_path = %relay_config.rules_path.display(),
        "Configuration loaded"
    );

    let rules = ClassifierRules::load(&relay_config.rules_path)?;
    let classifier = Arc::new(Classifier::new(rules)?);

    match args.command {
        Cmd::Parse { kind, file } => {
            let text = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let text = if relay_config.redact_secrets {
                redact_secrets(&text, relay_config.redact_options())
            } else {
                text
            };
            let record = extract::extract(kind, &text);
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Cmd::Run { json, args } => {
            let request = match json {
                Some(json) => serde_json::from_str(&json)?,
                None => CommandRequest::Raw { args },
            };
            let relay = build_relay(invoker_config, relay_config, classifier);
            let response = relay.execute(&request).await;
            println!("{}", response.to_json());
            if response.status != STATUS_OK {
                process::exit(1);
            }
        }
        Cmd::Shell { history_file } => {
            let relay = build_relay(invoker_config, relay_config, classifier);
            shell::run_shell(&relay, shell::ShellConfig::new(history_file)).await?;
        }
    }

    Ok(())
}

fn build_relay(
    invoker_config: InvokerConfig,
    relay_config: RelayConfig,
    classifier: Arc<Classifier>,
) -> Relay {
    let runner = Arc::new(Invoker::new(invoker_config.clone())) as Arc<dyn CommandRunner>;
    Relay::new(runner, classifier, invoker_config, relay_config)
}
