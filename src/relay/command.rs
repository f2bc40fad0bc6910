// Supported CLI commands and their argument vectors
#![allow(dead_code)]

use crate::classify::ExpectedKind;
use serde::{Deserialize, Serialize};

const KEY_SCHEMES: &[&str] = &["ed25519", "secp256k1", "secp256r1"];
const WORD_LENGTHS: &[u32] = &[12, 15, 18, 21, 24];

/// Which external binary a command runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Program {
    Sui,
    Walrus,
}

/// A request the dashboard can make
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandRequest {
    Replay {
        digest: String,
    },
    Coverage {
        package_path: String,
    },
    Migrate {
        package_path: String,
    },
    Disassemble {
        module_path: String,
    },
    Build {
        package_path: String,
    },
    Publish {
        package_path: String,
        #[serde(default)]
        gas_budget: Option<u64>,
    },
    ListKeys,
    GenerateKey {
        scheme: String,
        #[serde(default)]
        word_length: Option<u32>,
    },
    SwitchAddress {
        address: String,
    },
    ActiveAddress,
    Envs,
    StoreBlob {
        path: String,
        #[serde(default)]
        epochs: Option<u32>,
    },
    ReadBlob {
        blob_id: String,
        #[serde(default)]
        out: Option<String>,
    },
    ListBlobs,
    /// Any other sui subcommand, passed through verbatim
    Raw {
        args: Vec<String>,
    },
}

impl CommandRequest {
    pub fn program(&self) -> Program {
        match self {
            CommandRequest::StoreBlob { .. }
            | CommandRequest::ReadBlob { .. }
            | CommandRequest::ListBlobs => Program::Walrus,
            _ => Program::Sui,
        }
    }

    /// Output carries a freshly generated secret meant for the caller
    pub fn reveals_new_secret(&self) -> bool {
        matches!(self, CommandRequest::GenerateKey { .. })
    }

    /// Kind used to pick user-error markers
    pub fn expected_kind(&self) -> ExpectedKind {
        match self {
            CommandRequest::Replay { .. } => ExpectedKind::Replay,
            CommandRequest::Coverage { .. } => ExpectedKind::Coverage,
            CommandRequest::Migrate { .. } => ExpectedKind::Migrate,
            CommandRequest::Disassemble { .. } => ExpectedKind::Disassemble,
            CommandRequest::Build { .. } => ExpectedKind::Build,
            CommandRequest::Publish { .. } => ExpectedKind::Publish,
            CommandRequest::ListKeys
            | CommandRequest::GenerateKey { .. }
            | CommandRequest::SwitchAddress { .. } => ExpectedKind::Keys,
            CommandRequest::Envs => ExpectedKind::Envs,
            CommandRequest::StoreBlob { .. }
            | CommandRequest::ReadBlob { .. }
            | CommandRequest::ListBlobs => ExpectedKind::Walrus,
            CommandRequest::ActiveAddress | CommandRequest::Raw { .. } => ExpectedKind::Generic,
        }
    }

    /// Kind used to pick the extractor; differs where the output is not a listing
    pub fn extract_kind(&self) -> ExpectedKind {
        match self {
            CommandRequest::SwitchAddress { .. } => ExpectedKind::Generic,
            other => other.expected_kind(),
        }
    }

    /// Reject caller mistakes before anything is spawned
    pub fn validate(&self) -> Result<(), String> {
        match self {
            CommandRequest::Replay { digest } => required("transaction digest", digest),
            CommandRequest::Coverage { package_path }
            | CommandRequest::Migrate { package_path }
            | CommandRequest::Build { package_path }
            | CommandRequest::Publish { package_path, .. } => {
                required("package path", package_path)
            }
            CommandRequest::Disassemble { module_path } => required("module path", module_path),
            CommandRequest::GenerateKey {
                scheme,
                word_length,
            } => {
                required("key scheme", scheme)?;
                if !KEY_SCHEMES.contains(&scheme.as_str()) {
                    return Err(format!(
                        "Invalid key scheme '{scheme}', expected one of {}",
                        KEY_SCHEMES.join(", ")
                    ));
                }
                match word_length {
                    Some(n) if !WORD_LENGTHS.contains(n) => Err(format!(
                        "Invalid word length {n}, expected one of 12, 15, 18, 21, 24"
                    )),
                    _ => Ok(()),
                }
            }
            CommandRequest::SwitchAddress { address } => {
                required("address", address)?;
                let hex = address.trim().strip_prefix("0x").unwrap_or("");
                if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err(format!("Invalid address '{address}', expected 0x-prefixed hex"));
                }
                Ok(())
            }
            CommandRequest::StoreBlob { path, .. } => required("file path", path),
            CommandRequest::ReadBlob { blob_id, .. } => required("blob id", blob_id),
            CommandRequest::Raw { args } => {
                if args.iter().all(|a| a.trim().is_empty()) {
                    Err("subcommand is required".to_string())
                } else {
                    Ok(())
                }
            }
            CommandRequest::ListKeys
            | CommandRequest::ActiveAddress
            | CommandRequest::Envs
            | CommandRequest::ListBlobs => Ok(()),
        }
    }

    /// Argument vector for the program
    pub fn args(&self) -> Vec<String> {
        let args: Vec<&str> = match self {
            CommandRequest::Replay { digest } => {
                vec!["client", "replay-transaction", "--tx-digest", digest.as_str()]
            }
            CommandRequest::Coverage { package_path } => {
                vec!["move", "coverage", "summary", "--path", package_path.as_str()]
            }
            CommandRequest::Migrate { package_path } => {
                vec!["move", "migrate", "--path", package_path.as_str()]
            }
            CommandRequest::Disassemble { module_path } => {
                vec!["move", "disassemble", module_path.as_str()]
            }
            CommandRequest::Build { package_path } => {
                vec!["move", "build", "--path", package_path.as_str()]
            }
            CommandRequest::Publish {
                package_path,
                gas_budget,
            } => {
                let mut args = vec!["client", "publish", package_path.as_str(), "--json"];
                let budget = gas_budget.map(|b| b.to_string());
                if let Some(budget) = &budget {
                    args.push("--gas-budget");
                    args.push(budget);
                }
                return owned(&args);
            }
            CommandRequest::ListKeys => vec!["keytool", "--json", "list"],
            CommandRequest::GenerateKey {
                scheme,
                word_length,
            } => {
                let mut args = vec!["keytool", "generate", scheme.as_str()];
                let length = word_length.map(|n| n.to_string());
                if let Some(length) = &length {
                    args.push("--word-length");
                    args.push(length);
                }
                return owned(&args);
            }
            CommandRequest::SwitchAddress { address } => {
                vec!["client", "switch", "--address", address.as_str()]
            }
            CommandRequest::ActiveAddress => vec!["client", "active-address"],
            CommandRequest::Envs => vec!["client", "envs", "--json"],
            CommandRequest::StoreBlob { path, epochs } => {
                let mut args = vec!["store", path.as_str()];
                let epochs = epochs.map(|e| e.to_string());
                if let Some(epochs) = &epochs {
                    args.push("--epochs");
                    args.push(epochs);
                }
                return owned(&args);
            }
            CommandRequest::ReadBlob { blob_id, out } => {
                let mut args = vec!["read", blob_id.as_str()];
                if let Some(out) = out {
                    args.push("--out");
                    args.push(out);
                }
                args
            }
            CommandRequest::ListBlobs => vec!["list-blobs"],
            CommandRequest::Raw { args } => return args.clone(),
        };
        owned(&args)
    }
}

fn required(name: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{name} is required"))
    } else {
        Ok(())
    }
}

fn owned(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}
