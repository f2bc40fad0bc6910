// Relay module - composes invoker, classifier and extractors into API responses
#![allow(unused_imports)]

pub mod command;
pub mod config;
pub mod service;
pub mod response;

pub use command::{CommandRequest, Program};
pub use config::RelayConfig;
pub use service::Relay;
pub use response::{ApiResponse, ResponseData};
