//! Interactive shell over the relay
//!
//! Each line is either a JSON request (`{"command": "envs"}`) or plain sui
//! arguments (`client gas`). Uses rustyline for editing and history.

use crate::relay::{CommandRequest, Relay};
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use std::io;
use std::path::PathBuf;
use tracing::warn;

/// Shell configuration
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub history_file: PathBuf,
}

impl ShellConfig {
    pub fn new(history_file: Option<PathBuf>) -> Self {
        let history_file = history_file.unwrap_or_else(|| {
            dirs::home_dir()
                .map(|p| p.join(".suiterm_history"))
                .unwrap_or_else(|| PathBuf::from(".suiterm_history"))
        });
        Self { history_file }
    }
}

/// Turn one input line into a request
pub fn parse_line(line: &str) -> Result<CommandRequest, String> {
    let input = line.trim();
    if input.starts_with('{') {
        return serde_json::from_str(input).map_err(|e| format!("Invalid request: {e}"));
    }
    let mut args: Vec<String> = input.split_whitespace().map(str::to_string).collect();
    // `sui` is implied
    if args.first().is_some_and(|a| a == "sui") {
        args.remove(0);
    }
    Ok(CommandRequest::Raw { args })
}

pub async fn run_shell(relay: &Relay, config: ShellConfig) -> io::Result<()> {
    let mut rl: Editor<(), FileHistory> = Editor::new().map_err(io::Error::other)?;

    if config.history_file.exists()
        && let Err(e) = rl.load_history(&config.history_file)
    {
        warn!(error = %e, "failed to load shell history");
    }

    println!("suiterm v{}", env!("CARGO_PKG_VERSION"));
    println!("Type sui arguments or a JSON request. Ctrl+D to quit.");
    println!();

    loop {
        match rl.readline("sui> ") {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(input);

                match parse_line(input) {
                    Ok(request) => {
                        let response = relay.execute(&request).await;
                        println!("{}", response.to_json());
                    }
                    Err(e) => println!("[error] {e}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("[error] Readline error: {e}");
                break;
            }
        }
    }

    if let Err(e) = rl.save_history(&config.history_file) {
        warn!(error = %e, "failed to save shell history");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_args_become_raw() {
        assert_eq!(
            parse_line("sui client  gas").unwrap(),
            CommandRequest::Raw {
                args: vec!["client".into(), "gas".into()]
            }
        );
    }

    #[test]
    fn test_json_line_becomes_request() {
        assert_eq!(
            parse_line(r#"{"command": "list_keys"}"#).unwrap(),
            CommandRequest::ListKeys
        );
        assert!(parse_line(r#"{"command": "nope"}"#).is_err());
    }
}
