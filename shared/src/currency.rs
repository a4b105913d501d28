//! Rupiah formatting shared by table cells, chart labels and input fields.
//!
//! Amounts are always shown as whole numbers grouped by thousands with `.`,
//! e.g. `1234567` becomes `Rp 1.234.567`.

/// Fixed prefix placed in front of every formatted amount
pub const RUPIAH_PREFIX: &str = "Rp ";

/// Separator between thousands groups (id-ID convention)
pub const THOUSANDS_SEPARATOR: char = '.';

/// Group a string of ASCII digits in threes from the right.
///
/// Works on the text itself, so inputs longer than any integer type are fine.
pub fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}

/// Format an amount as Rupiah. Fractions are truncated toward zero and
/// negatives keep a leading `-`; non-finite amounts show as `Rp 0`.
pub fn format_rupiah(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("{}0", RUPIAH_PREFIX);
    }
    let whole = amount.trunc();
    let digits = format!("{:.0}", whole.abs());
    let sign = if whole < 0.0 { "-" } else { "" };
    format!(
        "{}{}{}",
        RUPIAH_PREFIX,
        sign,
        group_digits(&digits, THOUSANDS_SEPARATOR)
    )
}

/// Short axis form used by the server-side charts, e.g. `Rp1500K`.
pub fn format_rupiah_compact(amount: f64) -> String {
    format!("Rp{:.0}K", amount / 1000.0)
}

/// Normalise free text typed into a currency field.
///
/// Non-digits are stripped. An empty or all-zero result clears the field,
/// anything else becomes `Rp <grouped>`. Running it on its own output is a
/// no-op.
pub fn normalize_currency_input(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return String::new();
    }
    format!(
        "{}{}",
        RUPIAH_PREFIX,
        group_digits(significant, THOUSANDS_SEPARATOR)
    )
}

/// Recover the numeric amount from a formatted string, if it fits in a `u64`.
pub fn parse_rupiah(formatted: &str) -> Option<u64> {
    let digits: String = formatted.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("0", '.'), "0");
        assert_eq!(group_digits("999", '.'), "999");
        assert_eq!(group_digits("1000", '.'), "1.000");
        assert_eq!(group_digits("1234567", '.'), "1.234.567");
    }

    #[test]
    fn test_format_rupiah_negative_amounts() {
        assert_eq!(format_rupiah(-5000.0), "Rp -5.000");
        assert_eq!(format_rupiah(-0.5), "Rp 0");
    }

    #[test]
    fn test_format_rupiah_beyond_i64() {
        assert_eq!(format_rupiah(1e19), "Rp 10.000.000.000.000.000.000");
        assert_eq!(format_rupiah(-1e19), "Rp -10.000.000.000.000.000.000");
    }

    #[test]
    fn test_format_rupiah_truncates_fractions() {
        assert_eq!(format_rupiah(500000.0), "Rp 500.000");
        assert_eq!(format_rupiah(1999.99), "Rp 1.999");
        assert_eq!(format_rupiah(f64::NAN), "Rp 0");
    }

    #[test]
    fn test_format_rupiah_compact() {
        assert_eq!(format_rupiah_compact(1_500_000.0), "Rp1500K");
        assert_eq!(format_rupiah_compact(0.0), "Rp0K");
    }

    #[test]
    fn test_amount_survives_formatting() {
        for amount in [0u64, 7, 1000, 65_432, 1_000_000, 987_654_321_012] {
            let formatted = format_rupiah(amount as f64);
            assert_eq!(parse_rupiah(&formatted), Some(amount), "{}", formatted);
        }
    }

    #[test]
    fn test_normalize_currency_input() {
        assert_eq!(normalize_currency_input("1234567"), "Rp 1.234.567");
        assert_eq!(normalize_currency_input("Rp 12a3,4"), "Rp 1.234");
        assert_eq!(normalize_currency_input("0042000"), "Rp 42.000");
    }

    #[test]
    fn test_normalize_currency_input_clears_empty_values() {
        assert_eq!(normalize_currency_input(""), "");
        assert_eq!(normalize_currency_input("Rp "), "");
        assert_eq!(normalize_currency_input("abc"), "");
        assert_eq!(normalize_currency_input("0"), "");
        assert_eq!(normalize_currency_input("Rp 000"), "");
    }

    #[test]
    fn test_normalize_currency_input_is_idempotent() {
        for raw in ["", "5", "1000", "Rp 1.234.567", "12 345 678 901 234 567 890", "x9y"] {
            let once = normalize_currency_input(raw);
            assert_eq!(normalize_currency_input(&once), once);
        }
    }

    #[test]
    fn test_normalize_handles_values_beyond_u64() {
        assert_eq!(
            normalize_currency_input("123456789012345678901234"),
            "Rp 123.456.789.012.345.678.901.234"
        );
    }
}
