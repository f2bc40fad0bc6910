// Address shortening for display

/// Placeholder put where the middle of an address was elided
pub const ELISION: &str = "...";

/// Keep `head` hex digits after the `0x` prefix and the last `tail` digits.
///
/// Inputs too short to shorten, or not plain ASCII, come back unchanged.
pub fn shorten_address(addr: &str, head: usize, tail: usize) -> String {
    let trimmed = addr.trim();
    if !trimmed.is_ascii() {
        return trimmed.to_string();
    }

    let (prefix, body) = match trimmed.strip_prefix("0x") {
        Some(body) => ("0x", body),
        None => ("", trimmed),
    };
    if body.len() <= head.saturating_add(tail).saturating_add(ELISION.len()) {
        return trimmed.to_string();
    }

    format!(
        "{prefix}{}{ELISION}{}",
        &body[..head],
        &body[body.len() - tail..]
    )
}

/// `0x1234...abcd` form used across the dashboard
pub fn short_address(addr: &str) -> String {
    shorten_address(addr, 4, 4)
}
