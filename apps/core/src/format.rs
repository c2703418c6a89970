//! Display formatting for money, counts and growth rates (en-US style).

/// Whole-dollar currency with thousands separators: `1234567.4` → `$1,234,567`.
/// Negative amounts keep the sign after the symbol (`$-1,200`).
pub fn format_currency(value: f64) -> String {
    format!("${}", format_number(value))
}

/// Rounds to a whole number and groups thousands: `48213.6` → `48,214`.
#[allow(clippy::cast_possible_truncation)]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// One decimal place with an explicit sign: `12.345` → `+12.3%`.
pub fn format_growth(growth: f64) -> String {
    format!("{growth:+.1}%")
}

/// Axis tick label: `$12.5k` from 1000 upward, plain dollars below.
pub fn compact_currency(value: f64) -> String {
    if value >= 1000.0 {
        format!("${}k", value / 1000.0)
    } else {
        format!("${value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands_without_decimals() {
        assert_eq!(format_currency(1_234_567.0), "$1,234,567");
        assert_eq!(format_currency(999.5), "$1,000");
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(12.49), "$12");
        assert_eq!(format_currency(-1200.0), "$-1,200");
    }

    #[test]
    fn numbers_group_at_every_power_of_thousand() {
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(123_456.0), "123,456");
        assert_eq!(format_number(1_000_000_000.0), "1,000,000,000");
        assert_eq!(format_number(f64::NAN), "0");
    }

    #[test]
    fn growth_has_sign_and_one_decimal() {
        assert_eq!(format_growth(12.345), "+12.3%");
        assert_eq!(format_growth(0.0), "+0.0%");
        assert_eq!(format_growth(-4.26), "-4.3%");
    }

    #[test]
    fn compact_currency_switches_at_one_thousand() {
        assert_eq!(compact_currency(950.0), "$950");
        assert_eq!(compact_currency(1000.0), "$1k");
        assert_eq!(compact_currency(12_500.0), "$12.5k");
    }
}
