//! Conversions to machine doubles and to display strings.
//!
//! Values are printed in the form C's `%.*e` produces: one leading digit,
//! `output_precision` digits after the point and an exponent of at least two
//! digits (`2.50000e+01`). Infinities print as `inf` / `-inf`.

use astro_float::BigFloat;

use crate::config::DERIVED_OUTPUT_PRECISION;
use crate::context::EvaluationContext;
use crate::errors::{ArithResult, DomainError};
use crate::value::Value;

/// Nearest `f64`, going through the decimal rendering of `x`.
pub(crate) fn big_to_f64(x: &BigFloat) -> Option<f64> {
    if x.is_inf_pos() {
        return Some(f64::INFINITY);
    }
    if x.is_inf_neg() {
        return Some(f64::NEG_INFINITY);
    }
    if x.is_zero() {
        return Some(0.0);
    }
    x.to_string().trim().parse().ok()
}

/// Decimal digits and exponent of a rendered number, `0.d1d2d3… · 10^exponent`.
#[derive(Debug, PartialEq, Eq)]
struct Decimal {
    negative: bool,
    digits: Vec<u8>,
    exponent: i64,
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    let (negative, unsigned) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let (mantissa, exponent) = match unsigned.find(|c| c == 'e' || c == 'E') {
        Some(pos) => (&unsigned[..pos], unsigned[pos + 1..].parse::<i64>().ok()?),
        None => (unsigned, 0),
    };
    let mut digits = Vec::with_capacity(mantissa.len());
    let mut point = None;
    for ch in mantissa.chars() {
        match ch {
            '.' if point.is_none() => point = Some(digits.len()),
            '0'..='9' => digits.push(ch as u8 - b'0'),
            _ => return None,
        }
    }
    if digits.is_empty() {
        return None;
    }
    let point = point.unwrap_or(digits.len()) as i64;
    let leading_zeros = digits.iter().take_while(|&&d| d == 0).count();
    digits.drain(..leading_zeros);
    Some(Decimal {
        negative,
        exponent: point - leading_zeros as i64 + exponent,
        digits,
    })
}

/// Reformat a decimal rendering into `%.*e` style with `fraction_digits`
/// digits after the point.
pub fn format_scientific(text: &str, fraction_digits: usize) -> Option<String> {
    let lowered = text.trim().to_ascii_lowercase();
    match lowered.trim_start_matches('+') {
        "inf" | "infinity" => return Some("inf".to_string()),
        "-inf" | "-infinity" => return Some("-inf".to_string()),
        "nan" | "-nan" => return Some("nan".to_string()),
        _ => {}
    }
    let Decimal {
        negative,
        mut digits,
        exponent,
    } = parse_decimal(text)?;
    let sign = if negative { "-" } else { "" };
    let significant = fraction_digits + 1;
    if digits.is_empty() {
        let zeros = "0".repeat(fraction_digits);
        let point = if fraction_digits == 0 { "" } else { "." };
        return Some(format!("{sign}0{point}{zeros}e+00"));
    }
    let mut exponent = exponent - 1;
    if digits.len() > significant {
        let round_up = digits[significant] >= 5;
        digits.truncate(significant);
        if round_up {
            let mut carry = true;
            for digit in digits.iter_mut().rev() {
                if *digit == 9 {
                    *digit = 0;
                } else {
                    *digit += 1;
                    carry = false;
                    break;
                }
            }
            if carry {
                digits.insert(0, 1);
                digits.truncate(significant);
                exponent += 1;
            }
        }
    }
    digits.resize(significant, 0);
    let mut out = String::with_capacity(significant + 8);
    out.push_str(sign);
    out.push(char::from(b'0' + digits[0]));
    if fraction_digits > 0 {
        out.push('.');
        out.extend(digits[1..].iter().map(|&d| char::from(b'0' + d)));
    }
    let exp_sign = if exponent < 0 { '-' } else { '+' };
    out.push_str(&format!("e{exp_sign}{:02}", exponent.unsigned_abs()));
    Some(out)
}

/// Drop trailing zeros of the fraction, and the point if nothing remains.
fn strip_fraction_zeros(formatted: &str) -> String {
    let Some(e_pos) = formatted.find('e') else {
        return formatted.to_string();
    };
    let (mantissa, exponent) = formatted.split_at(e_pos);
    if !mantissa.contains('.') {
        return formatted.to_string();
    }
    let trimmed = mantissa.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}{exponent}")
}

impl EvaluationContext {
    pub fn to_f64(&self, v: &Value) -> ArithResult<f64> {
        big_to_f64(v.as_big()).ok_or_else(|| DomainError::Backend(format!("cannot read {v}")))
    }

    /// Digits after the point used by [`EvaluationContext::format_value`].
    pub fn effective_output_digits(&self) -> usize {
        match self.output_precision() {
            DERIVED_OUTPUT_PRECISION => (self.precision() as f64 * std::f64::consts::LOG10_2) as usize,
            digits => digits.max(0) as usize,
        }
    }

    /// Render `v` with the configured output precision.
    pub fn format_value(&self, v: &Value) -> String {
        let digits = self.effective_output_digits();
        let formatted =
            format_scientific(&v.as_big().to_string(), digits).unwrap_or_else(|| v.to_string());
        if self.output_precision() == DERIVED_OUTPUT_PRECISION {
            strip_fraction_zeros(&formatted)
        } else {
            formatted
        }
    }

    /// Space-separated rendering of a vector of values.
    pub fn format_values(&self, values: &[Value]) -> String {
        values
            .iter()
            .map(|v| self.format_value(v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_scientific_pads_and_rounds() {
        assert_eq!(format_scientific("2.5e+1", 5).as_deref(), Some("2.50000e+01"));
        assert_eq!(format_scientific("25", 2).as_deref(), Some("2.50e+01"));
        assert_eq!(format_scientific("0.0001234567", 3).as_deref(), Some("1.235e-04"));
        assert_eq!(format_scientific("-9.9996e2", 3).as_deref(), Some("-1.000e+03"));
        assert_eq!(format_scientific("3.14159", 0).as_deref(), Some("3e+00"));
        assert_eq!(format_scientific("1.0e+123", 1).as_deref(), Some("1.0e+123"));
    }

    #[test]
    fn test_format_scientific_special_values() {
        assert_eq!(format_scientific("Inf", 5).as_deref(), Some("inf"));
        assert_eq!(format_scientific("-Inf", 5).as_deref(), Some("-inf"));
        assert_eq!(format_scientific("0.0", 2).as_deref(), Some("0.00e+00"));
        assert_eq!(format_scientific("abc", 2), None);
    }

    #[test]
    fn test_strip_fraction_zeros() {
        assert_eq!(strip_fraction_zeros("2.50000e+01"), "2.5e+01");
        assert_eq!(strip_fraction_zeros("1.000e+00"), "1e+00");
        assert_eq!(strip_fraction_zeros("inf"), "inf");
    }

    #[test]
    fn test_format_value_uses_output_precision() {
        let mut ctx = EvaluationContext::new().unwrap();
        let v = ctx.to_value_i64(25);
        assert_eq!(ctx.format_value(&v), "2.50000e+01");
        ctx.set_output_precision(1);
        assert_eq!(ctx.format_value(&ctx.to_value_f64(-0.126).unwrap()), "-1.3e-01");
        assert_eq!(ctx.format_value(&ctx.get_minus_infinity()), "-inf");
    }

    #[test]
    fn test_to_f64_round_trips_doubles() {
        let ctx = EvaluationContext::new().unwrap();
        for x in [0.0, 1.5, -3.25, 1e-10, 6.02e23] {
            let v = ctx.to_value_f64(x).unwrap();
            let back = ctx.to_f64(&v).unwrap();
            assert!((back - x).abs() <= x.abs() * 1e-9, "{x} read back as {back}");
        }
        assert_eq!(ctx.to_f64(&ctx.get_plus_infinity()).unwrap(), f64::INFINITY);
    }
}
