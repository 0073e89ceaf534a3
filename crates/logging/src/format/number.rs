//! Floating-point renderings for the `e`, `f`, `g` and `%` presentation types
//! and for the default shortest-repr display.

/// Splits Rust's `{:e}` output (`"1.5e-7"`) into mantissa and exponent.
fn split_exponent(text: &str) -> (&str, i32) {
    match text.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse().unwrap_or(0)),
        None => (text, 0),
    }
}

fn exponent_suffix(exponent: i32, upper: bool) -> String {
    let marker = if upper { 'E' } else { 'e' };
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{marker}{sign}{:02}", exponent.unsigned_abs())
}

fn non_finite(value: f64, upper: bool) -> Option<String> {
    let text = if value.is_nan() {
        "nan"
    } else if value.is_infinite() {
        "inf"
    } else {
        return None;
    };
    Some(if upper {
        text.to_ascii_uppercase()
    } else {
        text.to_owned()
    })
}

/// Shortest text that round-trips `value`, switching to scientific notation
/// for exponents below -4 or at least 16 (`1e+16`, `1.5e-05`, `0.0001`).
///
/// The sign is included; fixed-point results always carry a fractional part.
pub(crate) fn float_repr(value: f64) -> String {
    if let Some(text) = non_finite(value, false) {
        return if value.is_sign_negative() && value.is_infinite() {
            format!("-{text}")
        } else {
            text
        };
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_owned();
    }
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = split_exponent(&scientific);
    if (-4..16).contains(&exponent) {
        let fixed = format!("{value}");
        if fixed.contains('.') {
            fixed
        } else {
            format!("{fixed}.0")
        }
    } else {
        format!("{mantissa}{}", exponent_suffix(exponent, false))
    }
}

/// Fixed-point digits of `|value|` with `precision` decimals.
pub(crate) fn fixed(value: f64, precision: usize, upper: bool, alternate: bool) -> String {
    if let Some(text) = non_finite(value, upper) {
        return text;
    }
    let mut text = format!("{:.*}", precision, value.abs());
    if alternate && precision == 0 {
        text.push('.');
    }
    text
}

/// Scientific digits of `|value|` with `precision` mantissa decimals.
pub(crate) fn exponent(value: f64, precision: usize, upper: bool, alternate: bool) -> String {
    if let Some(text) = non_finite(value, upper) {
        return text;
    }
    let scientific = format!("{:.*e}", precision, value.abs());
    let (mantissa, exponent) = split_exponent(&scientific);
    let mut text = mantissa.to_owned();
    if alternate && precision == 0 {
        text.push('.');
    }
    text.push_str(&exponent_suffix(exponent, upper));
    text
}

/// General format: fixed or scientific depending on the decimal exponent,
/// with insignificant trailing zeros removed unless `alternate` is set.
pub(crate) fn general(value: f64, precision: usize, upper: bool, alternate: bool) -> String {
    if let Some(text) = non_finite(value, upper) {
        return text;
    }
    let precision = precision.max(1);
    let exponent_of = if value == 0.0 {
        0
    } else {
        let probe = format!("{:.*e}", precision - 1, value.abs());
        split_exponent(&probe).1
    };

    let (mut body, suffix) = if exponent_of >= -4 && exponent_of < precision as i32 {
        let decimals = (precision as i32 - 1 - exponent_of).max(0) as usize;
        (format!("{:.*}", decimals, value.abs()), String::new())
    } else {
        let scientific = format!("{:.*e}", precision - 1, value.abs());
        let (mantissa, exponent) = split_exponent(&scientific);
        (mantissa.to_owned(), exponent_suffix(exponent, upper))
    };

    if !alternate && body.contains('.') {
        let trimmed = body.trim_end_matches('0').trim_end_matches('.').len();
        body.truncate(trimmed);
    }
    body.push_str(&suffix);
    body
}

/// Default float display when a precision is given without a type: like
/// [`general`], but fixed-point results keep at least one fractional digit.
pub(crate) fn general_with_point(value: f64, precision: usize) -> String {
    let mut text = general(value, precision, false, false);
    if value.is_finite() && !text.contains(['.', 'e']) {
        text.push_str(".0");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repr_switches_to_scientific_outside_window() {
        assert_eq!(float_repr(1e16), "1e+16");
        assert_eq!(float_repr(1e15), "1000000000000000.0");
        assert_eq!(float_repr(0.0001), "0.0001");
        assert_eq!(float_repr(0.000015), "1.5e-05");
        assert_eq!(float_repr(3.0), "3.0");
        assert_eq!(float_repr(-2.5), "-2.5");
    }

    #[test]
    fn fixed_pads_decimals() {
        assert_eq!(fixed(3.14159, 2, false, false), "3.14");
        assert_eq!(fixed(2.0, 0, false, true), "2.");
        assert_eq!(fixed(f64::INFINITY, 2, true, false), "INF");
    }

    #[test]
    fn exponent_uses_two_digit_signed_exponent() {
        assert_eq!(exponent(12345.678, 2, false, false), "1.23e+04");
        assert_eq!(exponent(0.00012, 1, true, false), "1.2E-04");
        assert_eq!(exponent(0.0, 3, false, false), "0.000e+00");
    }

    #[test]
    fn general_trims_trailing_zeros() {
        assert_eq!(general(3.0, 6, false, false), "3");
        assert_eq!(general(0.5, 6, false, false), "0.5");
        assert_eq!(general(1234567.0, 6, false, false), "1.23457e+06");
        assert_eq!(general(0.00001234, 3, false, false), "1.23e-05");
        assert_eq!(general(3.0, 6, false, true), "3.00000");
        assert_eq!(general(0.0, 6, false, false), "0");
    }

    #[test]
    fn general_with_point_keeps_fraction() {
        assert_eq!(general_with_point(3.0, 3), "3.0");
        assert_eq!(general_with_point(1234.5, 2), "1.2e+03");
        assert_eq!(general_with_point(3.14159, 3), "3.14");
    }
}
