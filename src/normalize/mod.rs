// Normalize module - pure value formatting helpers shared by extractors and callers
#![allow(unused_imports)]

pub mod address;
pub mod percent;
pub mod sanitize;
pub mod units;

pub use address::{shorten_address, short_address};
pub use percent::{format_percent, percent_of};
pub use sanitize::{RedactOptions, redact_secrets};
pub use units::{
    MIST_PER_SUI, SUI_DECIMALS, format_units, format_units_fixed, mist_to_sui, parse_units,
    sui_to_mist,
};
