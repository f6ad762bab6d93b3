//! Lenient numeric parsing for user-typed amounts.

/// Parse the longest numeric prefix of `text`.
///
/// Leading whitespace is skipped and trailing garbage ignored, so `"5mg"`
/// parses as 5 and `".5"` as 0.5. Empty, non-numeric and non-finite
/// text parses as 0.
pub fn parse_amount(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();

    let mut end = 0;
    if end < len && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut j = frac_start;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        mantissa_digits += j - frac_start;
        end = j;
    }

    if mantissa_digits == 0 {
        return 0.0;
    }

    if end < len && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut j = end + 1;
        if j < len && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    s[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Whether `text` is acceptable while typing an amount: empty, or digits
/// with at most one decimal point.
pub fn is_numeric_text(text: &str) -> bool {
    let mut seen_dot = false;
    for c in text.chars() {
        match c {
            '0'..='9' => {}
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    true
}
