//! Elementary arithmetic on [`Value`]s.
//!
//! Operands are borrowed and every result is a freshly owned value rounded to
//! the working precision. Infinite operands follow the extended reals; the
//! combinations that have no value there fail with a [`DomainError`].

use std::cmp::Ordering;

use astro_float::BigFloat;

use crate::context::{EvaluationContext, ROUNDING};
use crate::errors::{division_by_zero, indeterminate, out_of_domain, ArithResult};
use crate::value::Value;

/// `2^exp` at `precision` bits. Exact for every exponent.
pub(crate) fn power_of_two(exp: i64, precision: usize) -> BigFloat {
    const STEP: i64 = 1000;
    let mut result = BigFloat::from_f64(1.0, precision);
    let mut remaining = exp;
    while remaining != 0 {
        let step = remaining.clamp(-STEP, STEP);
        let factor = BigFloat::from_f64(2f64.powi(step as i32), precision);
        result = result.mul(&factor, precision, ROUNDING);
        remaining -= step;
    }
    result
}

pub(crate) fn negated(x: &BigFloat) -> BigFloat {
    let mut negated = x.clone();
    negated.inv_sign();
    negated
}

/// Exact integer value of `x` if it is integral and fits an `i64` exactly.
pub(crate) fn as_exact_integer(x: &BigFloat) -> Option<i64> {
    const EXACT_LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53
    if x.is_inf() || x.is_nan() || x.floor() != *x {
        return None;
    }
    let as_double = crate::format::big_to_f64(x)?;
    (as_double.abs() < EXACT_LIMIT).then_some(as_double as i64)
}

fn signed_infinity(positive: bool, precision: usize) -> BigFloat {
    let inf = if positive { f64::INFINITY } else { f64::NEG_INFINITY };
    BigFloat::from_f64(inf, precision)
}

impl EvaluationContext {
    pub(crate) fn add_big(&mut self, a: &BigFloat, b: &BigFloat) -> ArithResult<BigFloat> {
        let p = self.backend_precision();
        match (a.is_inf(), b.is_inf()) {
            (true, true) if a.is_inf_pos() != b.is_inf_pos() => Err(indeterminate("addition")),
            (true, _) => Ok(a.clone()),
            (false, true) => Ok(b.clone()),
            (false, false) => {
                self.check_precision_on_add(a, b);
                Ok(a.add(b, p, ROUNDING))
            }
        }
    }

    pub fn add(&mut self, a: &Value, b: &Value) -> ArithResult<Value> {
        let sum = self.add_big(a.as_big(), b.as_big())?;
        self.checked("addition", &sum)
    }

    pub fn subtract(&mut self, a: &Value, b: &Value) -> ArithResult<Value> {
        let difference = self.add_big(a.as_big(), &negated(b.as_big()))?;
        self.checked("subtraction", &difference)
    }

    pub fn negate(&self, v: &Value) -> Value {
        self.wrap(&negated(v.as_big()))
    }

    pub fn abs(&self, v: &Value) -> Value {
        self.wrap(&v.as_big().abs())
    }

    pub fn multiply(&self, a: &Value, b: &Value) -> ArithResult<Value> {
        let p = self.backend_precision();
        let (x, y) = (a.as_big(), b.as_big());
        if x.is_inf() || y.is_inf() {
            if x.is_zero() || y.is_zero() {
                return Err(indeterminate("multiplication"));
            }
            let positive = a.is_positive() == b.is_positive();
            return Ok(Value::from_big(signed_infinity(positive, p)));
        }
        self.checked("multiplication", &x.mul(y, p, ROUNDING))
    }

    pub fn divide(&self, a: &Value, b: &Value) -> ArithResult<Value> {
        let p = self.backend_precision();
        if b.is_zero() {
            return Err(division_by_zero("division"));
        }
        match (a.is_infinite(), b.is_infinite()) {
            (true, true) => Err(indeterminate("division")),
            (false, true) => Ok(self.zero()),
            (true, false) => {
                let positive = a.is_positive() == b.is_positive();
                Ok(Value::from_big(signed_infinity(positive, p)))
            }
            (false, false) => {
                self.checked("division", &a.as_big().div(b.as_big(), p, ROUNDING))
            }
        }
    }

    /// `v · 2^exp`.
    pub fn multiply_2exp(&self, v: &Value, exp: i64) -> Value {
        if v.is_infinite() || exp == 0 {
            return v.clone();
        }
        let p = self.backend_precision();
        self.wrap(&v.as_big().mul(&power_of_two(exp, p), p, ROUNDING))
    }

    pub fn floor(&self, v: &Value) -> Value {
        if v.is_infinite() {
            return v.clone();
        }
        self.wrap(&v.as_big().floor())
    }

    /// Total order with `-inf < finite < +inf`.
    ///
    /// Operands within a factor of two of each other are compared through
    /// their difference so that cancellation is checked.
    pub fn compare(&mut self, a: &Value, b: &Value) -> Ordering {
        if let Some(ordering) = compare_infinities(a.as_big(), b.as_big()) {
            return ordering;
        }
        let (x, y) = (a.as_big(), b.as_big());
        if x == y {
            return Ordering::Equal;
        }
        let p = self.backend_precision();
        let half = x.mul(&power_of_two(-1, p), p, ROUNDING);
        let double = x.mul(&power_of_two(1, p), p, ROUNDING);
        let (low, high) = if double < half { (double, half) } else { (half, double) };
        let close = low < *y && *y < high;
        if !close {
            return x.partial_cmp(y).unwrap_or(Ordering::Equal);
        }
        match self.add_big(x, &negated(y)) {
            Ok(difference) if difference.is_zero() => Ordering::Equal,
            Ok(difference) if difference.is_negative() => Ordering::Less,
            Ok(_) => Ordering::Greater,
            Err(_) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        }
    }

    /// Cheap threshold comparison; never checks precision.
    pub fn compare_f64(&self, a: &Value, b: f64) -> Ordering {
        let other = BigFloat::from_f64(b, self.backend_precision());
        compare_infinities(a.as_big(), &other)
            .or_else(|| a.as_big().partial_cmp(&other))
            .unwrap_or(Ordering::Equal)
    }

    pub fn min(&mut self, a: &Value, b: &Value) -> Value {
        match self.compare(a, b) {
            Ordering::Greater => b.clone(),
            _ => a.clone(),
        }
    }

    pub fn max(&mut self, a: &Value, b: &Value) -> Value {
        match self.compare(a, b) {
            Ordering::Less => b.clone(),
            _ => a.clone(),
        }
    }

    /// `v^n` by repeated squaring.
    pub fn pow_i64(&mut self, v: &Value, n: i64) -> ArithResult<Value> {
        let p = self.backend_precision();
        if v.is_infinite() {
            return Ok(match n.cmp(&0) {
                Ordering::Less => self.zero(),
                Ordering::Equal => self.one(),
                Ordering::Greater => {
                    let positive = v.is_plus_infinity() || n % 2 == 0;
                    Value::from_big(signed_infinity(positive, p))
                }
            });
        }
        if n == 0 {
            return Ok(self.one());
        }
        let base = if n < 0 {
            self.divide(&self.one(), v)
                .map_err(|_| division_by_zero("negative power"))?
        } else {
            v.clone()
        };
        let exponent = n.unsigned_abs() as usize;
        self.checked("pow", &base.as_big().powi(exponent, p, ROUNDING))
    }

    pub fn pow_f64(&mut self, v: &Value, exponent: f64) -> ArithResult<Value> {
        let exponent = self.to_value_f64(exponent)?;
        self.pow(v, &exponent)
    }

    /// `v^e` for arbitrary exponents.
    ///
    /// Integral exponents are exact powers; a negative base with a
    /// fractional exponent is outside the domain.
    pub fn pow(&mut self, v: &Value, e: &Value) -> ArithResult<Value> {
        if e.is_infinite() {
            return Err(out_of_domain("pow exponent", e));
        }
        let integral = as_exact_integer(e.as_big());
        if v.is_infinite() {
            if let Some(n) = integral {
                return self.pow_i64(v, n);
            }
            return if e.is_negative() {
                Ok(self.zero())
            } else if v.is_plus_infinity() {
                Ok(v.clone())
            } else {
                Err(out_of_domain("pow of -inf", e))
            };
        }
        if e.is_zero() {
            return Ok(self.one());
        }
        if v.is_zero() {
            return if e.is_negative() {
                Err(division_by_zero("negative power of zero"))
            } else {
                Ok(self.zero())
            };
        }
        if self.compare_f64(v, 1.0) == Ordering::Equal {
            return Ok(self.one());
        }
        if let Some(n) = integral {
            return self.pow_i64(v, n);
        }
        let p = self.backend_precision();
        if v.is_negative() {
            if e.as_big().floor() == *e.as_big() {
                // Integral beyond 2^53: even, so the sign drops.
                let magnitude = v.as_big().abs();
                let result = magnitude.pow(e.as_big(), p, ROUNDING, &mut self.consts);
                return self.checked("pow", &result);
            }
            return Err(out_of_domain("pow with fractional exponent", v));
        }
        let result = v.as_big().pow(e.as_big(), p, ROUNDING, &mut self.consts);
        self.checked("pow", &result)
    }

    pub fn is_integral(&self, v: &Value) -> bool {
        !v.is_infinite() && v.as_big().floor() == *v.as_big()
    }
}

fn compare_infinities(x: &BigFloat, y: &BigFloat) -> Option<Ordering> {
    match (x.is_inf(), y.is_inf()) {
        (false, false) => None,
        (true, true) => Some(x.is_inf_pos().cmp(&y.is_inf_pos())),
        (true, false) => Some(if x.is_inf_pos() {
            Ordering::Greater
        } else {
            Ordering::Less
        }),
        (false, true) => Some(if y.is_inf_pos() {
            Ordering::Less
        } else {
            Ordering::Greater
        }),
    }
}
