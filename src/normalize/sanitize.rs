// Secret redaction for text leaving the process
#![allow(dead_code)]

use crate::normalize::address::short_address;
use regex::Regex;
use std::sync::LazyLock;

static PRIVATE_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"suiprivkey[a-zA-Z0-9]+").expect("valid regex"));

// A run of 12..=24 short lowercase words on one line is a recovery phrase,
// whether alone, in a table cell or after a label
static MNEMONIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:[a-z]{3,8}[ \t]+){11,23}[a-z]{3,8}\b").expect("valid regex")
});

static FULL_ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"0x[a-fA-F0-9]{64}\b").expect("valid regex"));

pub const KEY_MASK: &str = "****";
pub const MNEMONIC_MASK: &str = "[MNEMONIC]";

#[derive(Debug, Clone, Copy, Default)]
pub struct RedactOptions {
    /// Also shorten full 32-byte addresses to `0x1234...abcd`
    pub mask_addresses: bool,
}

/// Mask private keys and recovery phrases, and optionally addresses
pub fn redact_secrets(text: &str, options: RedactOptions) -> String {
    let mut result = PRIVATE_KEY_RE.replace_all(text, KEY_MASK).into_owned();
    result = MNEMONIC_RE
        .replace_all(&result, MNEMONIC_MASK)
        .into_owned();

    if options.mask_addresses {
        result = FULL_ADDRESS_RE
            .replace_all(&result, |caps: &regex::Captures| short_address(&caps[0]))
            .into_owned();
    }

    result
}
