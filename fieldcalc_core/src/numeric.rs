//! # Numeric Utilities
//!
//! String sanitization, parsing, rounding, display formatting, and angle
//! conversion. Pure functions, no state.
//!
//! The parsing contract is load-bearing for the whole input layer: text that
//! is not a complete decimal literal parses to *absent* (`None`), never to
//! zero and never to an error. Absent inputs are what drive the required-field
//! and partial-input policies in [`crate::eval`].

use crate::template::ResultValue;

/// Strip thousands separators (ASCII commas) and surrounding whitespace.
pub fn sanitize(raw: &str) -> String {
    raw.replace(',', "").trim().to_string()
}

/// Parse user-entered text into a number, or `None` when absent.
///
/// Parsing succeeds iff the *entire* sanitized string is consumable as a
/// floating-point literal (leading sign, decimal point, and exponent are all
/// accepted). Trailing garbage is never silently truncated: `"12abc"` is
/// absent, not 12. Literal `inf`/`NaN` spellings are also treated as absent,
/// since a non-finite value can never be a valid field entry.
///
/// ```rust
/// use fieldcalc_core::numeric::parse_number;
///
/// assert_eq!(parse_number("1,234.5"), Some(1234.5));
/// assert_eq!(parse_number("  -2e3 "), Some(-2000.0));
/// assert_eq!(parse_number("12abc"), None);
/// assert_eq!(parse_number(""), None);
/// ```
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = sanitize(raw);
    if s.is_empty() {
        return None;
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

/// Round to `places` decimal places, half away from zero.
pub fn round_to(x: f64, places: u32) -> f64 {
    let p = 10f64.powi(places as i32);
    (x * p).round() / p
}

/// Format a number for display at the configured precision.
///
/// The integer part is grouped in thousands with commas; trailing fractional
/// zeros are trimmed (a precision, not a padding). Non-finite values render
/// as the placeholder dash.
///
/// ```rust
/// use fieldcalc_core::numeric::format_number;
///
/// assert_eq!(format_number(1234567.8912, 3), "1,234,567.891");
/// assert_eq!(format_number(1.5, 3), "1.5");
/// assert_eq!(format_number(f64::NAN, 3), "-");
/// ```
pub fn format_number(x: f64, places: u32) -> String {
    if !x.is_finite() {
        return "-".to_string();
    }
    let y = round_to(x, places);
    let fixed = format!("{:.*}", places as usize, y.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut out = String::new();
    if y < 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Insert a comma every three digits, right to left.
fn group_thousands(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*b as char);
    }
    out
}

/// Render result values as copy/share text, one `label: value unit` per line.
///
/// Non-finite entries are skipped; callers only reach this with a complete
/// evaluation, so in practice nothing is dropped.
pub fn values_to_copy_text(values: &[ResultValue], places: u32) -> String {
    values
        .iter()
        .filter(|v| v.value.is_finite())
        .map(|v| {
            format!("{}: {} {}", v.label, format_number(v.value, places), v.unit)
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / std::f64::consts::PI
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_commas_and_whitespace() {
        assert_eq!(sanitize(" 1,234,567.8 "), "1234567.8");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_parse_accepts_full_literals() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("-3.5"), Some(-3.5));
        assert_eq!(parse_number("+0.5"), Some(0.5));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("1,000"), Some(1000.0));
    }

    #[test]
    fn test_parse_rejects_partial_literals() {
        assert_eq!(parse_number("12abc"), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("1.2.3"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("  "), None);
    }

    #[test]
    fn test_parse_rejects_nonfinite_spellings() {
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("-infinity"), None);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(954.9296, 2), 954.93);
        assert_eq!(round_to(1.0006, 3), 1.001);
        assert_eq!(round_to(-2.5, 0), -3.0);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(15.408845, 3), "15.409");
        assert_eq!(format_number(954.9296, 2), "954.93");
        assert_eq!(format_number(1234567.0, 3), "1,234,567");
        assert_eq!(format_number(-1234.5, 1), "-1,234.5");
        assert_eq!(format_number(0.0, 3), "0");
        assert_eq!(format_number(f64::INFINITY, 3), "-");
    }

    #[test]
    fn test_format_negative_rounding_to_zero() {
        // -0.0001 rounds to zero at 3 places; no stray minus sign
        assert_eq!(format_number(-0.0001, 3), "0");
    }

    #[test]
    fn test_copy_text_skips_nonfinite() {
        let values = vec![
            ResultValue::new("X", 12.5, "mm"),
            ResultValue::new("Y", f64::NAN, "mm"),
        ];
        assert_eq!(values_to_copy_text(&values, 2), "X: 12.5 mm");
    }

    #[test]
    fn test_angle_conversion() {
        assert!((deg_to_rad(180.0) - std::f64::consts::PI).abs() < 1e-12);
        assert!((rad_to_deg(std::f64::consts::PI / 2.0) - 90.0).abs() < 1e-12);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn parse_recovers_formatted_integers(n in -1_000_000_000i64..1_000_000_000i64) {
                let grouped = format_number(n as f64, 0);
                prop_assert_eq!(parse_number(&grouped), Some(n as f64));
            }

            #[test]
            fn format_then_parse_is_within_half_ulp_of_precision(
                x in -1e9f64..1e9f64,
                places in 0u32..6,
            ) {
                let text = format_number(x, places);
                let back = parse_number(&text).unwrap();
                let tol = 10f64.powi(-(places as i32));
                prop_assert!((back - x).abs() <= tol, "{} -> {} -> {}", x, text, back);
            }

            #[test]
            fn garbage_suffix_never_parses(x in -1e6f64..1e6f64) {
                let s = format!("{}abc", x);
                prop_assert_eq!(parse_number(&s), None);
            }
        }
    }
}
