//! Smallest-unit <-> display-unit conversion.
//!
//! Everything here is integer arithmetic on `u128`; no value ever passes
//! through a float, so `parse_units(format_units(x)) == x` for every input
//! that fits.

/// Decimal places of one SUI
pub const SUI_DECIMALS: u32 = 9;

/// MIST in one SUI
pub const MIST_PER_SUI: u128 = 1_000_000_000;

/// Format a smallest-unit integer string as a display decimal.
///
/// Thousands separators (`,` `_`) and surrounding whitespace are accepted,
/// as is a leading `-`. Trailing fractional zeros are trimmed, so
/// `"1500000000"` with 9 decimals is `"1.5"` and `"2000000000"` is `"2"`.
/// Returns `None` when the input is not an integer.
pub fn format_units(smallest: &str, decimals: u32) -> Option<String> {
    let (negative, value) = parse_signed(smallest)?;
    let divisor = 10u128.checked_pow(decimals)?;

    let whole = value / divisor;
    let frac = value % divisor;

    let mut out = String::new();
    if negative && value != 0 {
        out.push('-');
    }
    out.push_str(&whole.to_string());

    if frac != 0 {
        let digits = format!("{:0width$}", frac, width = decimals as usize);
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    Some(out)
}

/// Like [`format_units`] but always shows exactly `places` fractional
/// digits, truncating (never rounding) the rest.
pub fn format_units_fixed(smallest: &str, decimals: u32, places: u32) -> Option<String> {
    let (negative, value) = parse_signed(smallest)?;
    let divisor = 10u128.checked_pow(decimals)?;

    let whole = value / divisor;
    let frac = value % divisor;

    let mut out = String::new();
    if negative && value != 0 {
        out.push('-');
    }
    out.push_str(&whole.to_string());

    if places > 0 {
        let mut digits = format!("{:0width$}", frac, width = decimals as usize);
        digits.truncate(places as usize);
        while digits.len() < places as usize {
            digits.push('0');
        }
        out.push('.');
        out.push_str(&digits);
    }
    Some(out)
}

/// Parse a display decimal back into smallest units.
///
/// Rejects negatives, more fractional digits than `decimals`, and overflow.
pub fn parse_units(display: &str, decimals: u32) -> Option<u128> {
    let cleaned = strip_separators(display);
    let (whole, frac) = match cleaned.split_once('.') {
        Some((w, f)) => (w, f),
        None => (cleaned.as_str(), ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !all_digits(whole) || !all_digits(frac) || frac.len() > decimals as usize {
        return None;
    }

    let divisor = 10u128.checked_pow(decimals)?;
    let whole_value: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };

    let mut frac_digits = frac.to_string();
    while frac_digits.len() < decimals as usize {
        frac_digits.push('0');
    }
    let frac_value: u128 = if frac_digits.is_empty() {
        0
    } else {
        frac_digits.parse().ok()?
    };

    whole_value.checked_mul(divisor)?.checked_add(frac_value)
}

/// MIST integer string to SUI display string
pub fn mist_to_sui(mist: &str) -> Option<String> {
    format_units(mist, SUI_DECIMALS)
}

/// SUI display string to MIST
pub fn sui_to_mist(sui: &str) -> Option<u128> {
    parse_units(sui, SUI_DECIMALS)
}

fn strip_separators(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '_') && !c.is_whitespace())
        .collect()
}

fn all_digits(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_digit())
}

fn parse_signed(text: &str) -> Option<(bool, u128)> {
    let cleaned = strip_separators(text);
    let (negative, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };
    if digits.is_empty() || !all_digits(digits) {
        return None;
    }
    Some((negative, digits.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_whole_and_fraction() {
        assert_eq!(mist_to_sui("1500000000").as_deref(), Some("1.5"));
        assert_eq!(mist_to_sui("2000000000").as_deref(), Some("2"));
        assert_eq!(mist_to_sui("1").as_deref(), Some("0.000000001"));
        assert_eq!(mist_to_sui("0").as_deref(), Some("0"));
    }

    #[test]
    fn test_format_tolerates_separators() {
        assert_eq!(mist_to_sui(" 2,500,000 ").as_deref(), Some("0.0025"));
        assert_eq!(mist_to_sui("1_000_000_000").as_deref(), Some("1"));
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(mist_to_sui("-500000000").as_deref(), Some("-0.5"));
        assert_eq!(mist_to_sui("-0").as_deref(), Some("0"));
    }

    #[test]
    fn test_format_rejects_garbage() {
        assert_eq!(mist_to_sui("12abc"), None);
        assert_eq!(mist_to_sui(""), None);
        assert_eq!(mist_to_sui("1.5"), None);
    }

    #[test]
    fn test_format_fixed_truncates() {
        assert_eq!(
            format_units_fixed("1999999999", 9, 2).as_deref(),
            Some("1.99")
        );
        assert_eq!(format_units_fixed("1000000000", 9, 4).as_deref(), Some("1.0000"));
        assert_eq!(format_units_fixed("1234", 0, 2).as_deref(), Some("1234.00"));
        assert_eq!(format_units_fixed("1234", 9, 0).as_deref(), Some("0"));
    }

    #[test]
    fn test_parse_units() {
        assert_eq!(sui_to_mist("1.5"), Some(1_500_000_000));
        assert_eq!(sui_to_mist("0.000000001"), Some(1));
        assert_eq!(sui_to_mist(".25"), Some(250_000_000));
        assert_eq!(sui_to_mist("3"), Some(3 * MIST_PER_SUI));
        assert_eq!(sui_to_mist("1.0000000001"), None);
        assert_eq!(sui_to_mist("-1"), None);
        assert_eq!(sui_to_mist("."), None);
    }

    #[test]
    fn test_round_trip_bounds() {
        for value in [0u128, 1, 999_999_999, 1_000_000_000, 10u128.pow(18)] {
            let display = mist_to_sui(&value.to_string()).unwrap();
            assert_eq!(sui_to_mist(&display), Some(value), "value {value}");
        }
    }
}
