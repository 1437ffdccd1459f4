//! Hashable float literals.

use std::fmt;
use std::num::FpCategory;

/// An `f64` literal stored as raw bits.
///
/// Equality is bitwise, so `-0.0 != 0.0` and equal NaN payloads compare
/// equal. Displays like a C++ stream prints a double (`%g`).
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Float(u64);

impl Float {
    #[inline]
    pub const fn new(value: f64) -> Self {
        Float(value.to_bits())
    }

    #[inline]
    pub const fn get(self) -> f64 {
        f64::from_bits(self.0)
    }
}

impl From<f64> for Float {
    fn from(value: f64) -> Self {
        Float::new(value)
    }
}

impl fmt::Debug for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Float({})", self.get())
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_general(self.get()))
    }
}

/// Significant digits printed by `%g` without an explicit precision.
const SIGNIFICANT_DIGITS: usize = 6;

/// Render `x` the way `printf("%g", x)` does.
fn format_general(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if x.classify() == FpCategory::Zero {
        return if x.is_sign_negative() { "-0" } else { "0" }.to_string();
    }
    // Round to the significant digits first; the exponent may move.
    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, x);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
        let mantissa = trim_fraction(mantissa);
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
    } else {
        let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{x:.decimals$}")).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_general_format() {
        let cases = [
            (2.0, "2"),
            (0.5, "0.5"),
            (-1.25, "-1.25"),
            (1e6, "1e+06"),
            (123_456.0, "123456"),
            (1_234_567.0, "1.23457e+06"),
            (0.0001, "0.0001"),
            (0.00001, "1e-05"),
            (1.0 / 3.0, "0.333333"),
            (0.0, "0"),
        ];
        for (value, expected) in cases {
            assert_eq!(Float::new(value).to_string(), expected, "{value}");
        }
    }

    #[test]
    fn test_bitwise_identity() {
        assert_eq!(Float::new(1.5), Float::from(1.5));
        assert_ne!(Float::new(0.0), Float::new(-0.0));
        assert_eq!(Float::new(0.25).get(), 0.25);
    }
}
