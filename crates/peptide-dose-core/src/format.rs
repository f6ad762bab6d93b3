//! Display formatting for computed quantities.

/// Shown in place of a value that cannot be displayed.
pub const UNAVAILABLE: &str = "—";

/// Default number of fractional digits.
pub const DEFAULT_DECIMALS: usize = 3;

/// Most fractional digits [`format_number_with`] will render.
pub const MAX_DECIMALS: usize = 20;

/// Decimal separator convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberLocale {
    /// `1.25`
    #[default]
    Dot,
    /// `1,25` (Spanish and most of continental Europe)
    Comma,
}

impl NumberLocale {
    fn separator(&self) -> char {
        match self {
            NumberLocale::Dot => '.',
            NumberLocale::Comma => ',',
        }
    }
}

/// Format with at most `max_decimals` fractional digits, dot separator.
pub fn format_number(value: f64, max_decimals: usize) -> String {
    format_number_with(value, max_decimals, NumberLocale::Dot)
}

/// Format with at most `max_decimals` fractional digits.
///
/// Rounds the exact decimal value of `value`, with exact ties going away
/// from zero. Never uses exponent notation or digit grouping, and drops
/// trailing zeros. Non-finite values render as [`UNAVAILABLE`].
/// `max_decimals` is capped at [`MAX_DECIMALS`].
pub fn format_number_with(value: f64, max_decimals: usize, locale: NumberLocale) -> String {
    if !value.is_finite() {
        return UNAVAILABLE.to_string();
    }

    let decimals = max_decimals.min(MAX_DECIMALS);
    let mut text = if fractional_binary_digits(value) == decimals + 1 {
        round_tie_away(format!("{:.*}", decimals + 1, value))
    } else {
        format!("{:.*}", decimals, value)
    };

    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }

    match locale {
        NumberLocale::Dot => text,
        other => text.replace('.', &other.separator().to_string()),
    }
}

/// Number of fractional digits in the exact decimal expansion of `value`.
///
/// A binary fraction with `k` fractional bits has exactly `k` fractional
/// decimal digits, the last of which is 5.
fn fractional_binary_digits(value: f64) -> usize {
    let bits = value.abs().to_bits();
    let biased_exponent = (bits >> 52) as i32;
    let mut mantissa = bits & ((1u64 << 52) - 1);
    let exponent = if biased_exponent == 0 {
        -1074
    } else {
        mantissa |= 1u64 << 52;
        biased_exponent - 1075
    };
    if mantissa == 0 {
        return 0;
    }
    let exponent = exponent + mantissa.trailing_zeros() as i32;
    if exponent >= 0 {
        0
    } else {
        exponent.unsigned_abs() as usize
    }
}

/// Drop the trailing `5` of an exact expansion and round the magnitude up.
fn round_tie_away(mut text: String) -> String {
    text.pop();
    if text.ends_with('.') {
        text.pop();
    }

    let mut digits: Vec<u8> = text.into_bytes();
    let mut carry = true;
    for byte in digits.iter_mut().rev() {
        match *byte {
            b'9' => *byte = b'0',
            b'0'..=b'8' => {
                *byte += 1;
                carry = false;
                break;
            }
            _ => {}
        }
    }
    if carry {
        let at = usize::from(digits.first() == Some(&b'-'));
        digits.insert(at, b'1');
    }
    String::from_utf8(digits).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_trailing_zeros() {
        assert_eq!(format_number(1.2000, 3), "1.2");
        assert_eq!(format_number(5.0, 3), "5");
        assert_eq!(format_number(0.05, 3), "0.05");
        assert_eq!(format_number(100.0, 1), "100");
    }

    #[test]
    fn test_non_finite_is_unavailable() {
        assert_eq!(format_number(f64::NAN, 3), "—");
        assert_eq!(format_number(f64::INFINITY, 3), "—");
        assert_eq!(format_number(f64::NEG_INFINITY, 3), "—");
    }

    #[test]
    fn test_tiny_values_collapse_to_zero() {
        assert_eq!(format_number(0.00001, 3), "0");
        assert_eq!(format_number(1e-7, 3), "0");
        assert_eq!(format_number(-0.0001, 3), "0");
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(format_number(2.5, 0), "3");
        assert_eq!(format_number(0.0625, 3), "0.063");
        assert_eq!(format_number(1.23456, 3), "1.235");
        assert_eq!(format_number(2.46, 1), "2.5");
    }

    #[test]
    fn test_no_exponent_or_grouping() {
        assert_eq!(format_number(1234567.0, 3), "1234567");
        assert_eq!(format_number(250000.125, 3), "250000.125");
        assert_eq!(format_number(1e15, 3), "1000000000000000");
    }

    #[test]
    fn test_rounds_exact_decimal_value() {
        // Neither literal is a tie in binary; both sit just below the half
        assert_eq!(format_number(0.0045, 3), "0.004");
        assert_eq!(format_number(0.0135, 3), "0.013");
        assert_eq!(format_number(1.005, 2), "1");
    }

    #[test]
    fn test_exact_ties_round_away_from_zero() {
        assert_eq!(format_number(0.125, 2), "0.13");
        assert_eq!(format_number(-0.125, 2), "-0.13");
        assert_eq!(format_number(0.5, 0), "1");
        assert_eq!(format_number(9.5, 0), "10");
        assert_eq!(format_number(-99.5, 0), "-100");
        assert_eq!(format_number(0.375, 2), "0.38");
    }

    #[test]
    fn test_huge_decimals_are_capped() {
        assert_eq!(format_number(1.0, 70_000), "1");
        assert_eq!(format_number(2.5, usize::MAX), "2.5");
        assert_eq!(format_number(0.25, 70_000), "0.25");
    }

    #[test]
    fn test_comma_locale() {
        assert_eq!(format_number_with(1.25, 3, NumberLocale::Comma), "1,25");
        assert_eq!(format_number_with(3.0, 3, NumberLocale::Comma), "3");
        assert_eq!(format_number_with(0.02, 3, NumberLocale::Comma), "0,02");
    }
}
