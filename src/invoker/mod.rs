// Invoker module - runs the external CLI and captures its output as data
#![allow(unused_imports)]

pub mod capture;
pub mod config;
pub mod error;
pub mod runner;
pub mod types;

pub use config::InvokerConfig;
pub use error::{InvokerError, Result};
pub use runner::{CommandRunner, Invoker};
pub use types::{RawExecutionResult, RunOptions};
