//! Axis label text: the C `%g` conversion, so labels look like the classic
//! `printf("%g")` output operators are used to.

use crate::core::constants::LABEL_PRECISION;

/// Strip trailing zeros (and a dangling point) from a decimal mantissa.
fn strip_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Format `value` like C's `%g`: [`LABEL_PRECISION`] significant digits,
/// trailing zeros removed, exponent notation when the decimal exponent is
/// below -4 or at least the precision.
#[must_use]
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub fn format_label(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_owned();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_owned();
    }

    let precision = LABEL_PRECISION as i32;
    // exponent *after* rounding to the target precision
    let sci = format!("{:.*e}", LABEL_PRECISION - 1, value);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= precision {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", strip_zeros(mantissa), exp.unsigned_abs())
    } else {
        let decimals = (precision - 1 - exp) as usize;
        strip_zeros(&format!("{value:.decimals$}")).to_owned()
    }
}

/// Columns needed by one label.
#[inline]
#[must_use]
pub fn label_width(value: f64) -> usize {
    format_label(value).len()
}

/// Columns needed by the max, min and current-value labels together.
#[inline]
#[must_use]
pub fn margin_width(data_min: f64, data_max: f64, last: f64) -> usize {
    label_width(data_max)
        .max(label_width(data_min))
        .max(label_width(last))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_printf_g() {
        let cases: &[(f64, &str)] = &[
            (1.0, "1"),
            (-2.5, "-2.5"),
            (0.1, "0.1"),
            (100.0, "100"),
            (123_456.0, "123456"),
            (1_234_567.0, "1.23457e+06"),
            (0.0001, "0.0001"),
            (0.000_012_5, "1.25e-05"),
            (3.141_592_65, "3.14159"),
            (999_999.5, "1e+06"),
            (-0.000_01, "-1e-05"),
            (1e100, "1e+100"),
            (0.0, "0"),
        ];
        for &(v, want) in cases {
            assert_eq!(format_label(v), want, "formatting {v}");
        }
    }

    #[test]
    fn margin_is_widest_label() {
        assert_eq!(margin_width(1.0, 3.0, 2.0), 1);
        assert_eq!(margin_width(-10.0, 3.0, 2.5), 3);
        assert_eq!(margin_width(0.0, 1.0, 1_234_567.0), 11);
    }
}
