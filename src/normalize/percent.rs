// Percentage helpers

/// `part` as a percentage of `total`; zero when `total` is zero
pub fn percent_of(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / total as f64
}

/// Two-decimal display form, e.g. `"66.67%"`
pub fn format_percent(percent: f64) -> String {
    if !percent.is_finite() {
        return "0.00%".to_string();
    }
    format!("{percent:.2}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(1, 4), 25.0);
        assert_eq!(percent_of(5, 5), 100.0);
        assert_eq!(percent_of(3, 0), 0.0);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(percent_of(2, 3)), "66.67%");
        assert_eq!(format_percent(f64::NAN), "0.00%");
    }
}
