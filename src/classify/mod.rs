// Classify module - maps raw process results to outcomes
// Marker rules are versioned data, see default_rules.toml
#![allow(unused_imports)]

pub mod classifier;
pub mod error;
pub mod rules;
pub mod types;

pub use classifier::Classifier;
pub use error::{ClassifierError, Result};
pub use rules::ClassifierRules;
pub use types::{ExpectedKind, Outcome};
