//! Roots, exponentials, logarithms and trigonometric functions.

use std::cmp::Ordering;

use astro_float::BigFloat;

use crate::context::{EvaluationContext, ROUNDING};
use crate::errors::{division_by_zero, out_of_domain, ArithResult};
use crate::ops::{negated, power_of_two};
use crate::value::Value;

/// Magnitudes outside this range are folded by square roots before `log2`
/// is taken in double precision.
const LOG2_DOUBLE_LOW: f64 = 1e-300;
const LOG2_DOUBLE_HIGH: f64 = 1e300;

impl EvaluationContext {
    pub fn sqrt(&self, v: &Value) -> ArithResult<Value> {
        if v.is_negative() {
            return Err(out_of_domain("sqrt", v));
        }
        if v.is_infinite() || v.is_zero() {
            return Ok(v.clone());
        }
        let p = self.backend_precision();
        self.checked("sqrt", &v.as_big().sqrt(p, ROUNDING))
    }

    pub fn exp(&mut self, v: &Value) -> ArithResult<Value> {
        if v.is_plus_infinity() {
            return Ok(v.clone());
        }
        if v.is_minus_infinity() {
            return Ok(self.zero());
        }
        let p = self.backend_precision();
        let result = v.as_big().exp(p, ROUNDING, &mut self.consts);
        self.checked("exp", &result)
    }

    /// Natural logarithm; `log(0) = -inf`.
    pub fn log(&mut self, v: &Value) -> ArithResult<Value> {
        if v.is_negative() {
            return Err(out_of_domain("log", v));
        }
        if v.is_zero() {
            return Ok(self.get_minus_infinity());
        }
        if v.is_plus_infinity() {
            return Ok(v.clone());
        }
        let p = self.backend_precision();
        let result = v.as_big().ln(p, ROUNDING, &mut self.consts);
        self.checked("log", &result)
    }

    /// Binary logarithm at working precision.
    pub fn log2(&mut self, v: &Value) -> ArithResult<Value> {
        let ln = self.log(v)?;
        if ln.is_infinite() {
            return Ok(ln);
        }
        let p = self.backend_precision();
        let ln2 = BigFloat::from_u64(2, p).ln(p, ROUNDING, &mut self.consts);
        self.checked("log2", &ln.as_big().div(&ln2, p, ROUNDING))
    }

    /// Binary logarithm in double precision, usable for magnitudes far
    /// outside the `f64` range.
    pub fn log2_double(&mut self, v: &Value) -> ArithResult<f64> {
        if v.is_negative() {
            return Err(out_of_domain("log2dbl", v));
        }
        if v.is_zero() {
            return Ok(f64::NEG_INFINITY);
        }
        if v.is_plus_infinity() {
            return Ok(f64::INFINITY);
        }
        let mut folded = v.clone();
        let mut halvings = 0;
        while self.compare_f64(&folded, LOG2_DOUBLE_LOW) == Ordering::Less
            || self.compare_f64(&folded, LOG2_DOUBLE_HIGH) == Ordering::Greater
        {
            folded = self.sqrt(&folded)?;
            halvings += 1;
        }
        let log2 = self.to_f64(&folded)?.log2();
        Ok(log2 * 2f64.powi(halvings))
    }

    /// Reduce `x` into `[-pi, pi]` by subtracting a multiple of `2 pi`.
    ///
    /// The subtraction is checked for cancellation.
    fn reduce_angle(&mut self, x: &BigFloat) -> ArithResult<BigFloat> {
        let p = self.backend_precision();
        let pi = self.get_pi();
        if x.abs() <= *pi.as_big() {
            return Ok(x.clone());
        }
        let two_pi = pi.as_big().mul(&power_of_two(1, p), p, ROUNDING);
        let half = power_of_two(-1, p);
        let turns = x.div(&two_pi, p, ROUNDING).add(&half, p, ROUNDING).floor();
        let shift = negated(&turns.mul(&two_pi, p, ROUNDING));
        self.add_big(x, &shift)
    }

    fn trig_argument(&mut self, operation: &'static str, v: &Value) -> ArithResult<BigFloat> {
        if v.is_infinite() {
            return Err(out_of_domain(operation, v));
        }
        self.reduce_angle(v.as_big())
    }

    pub fn sin(&mut self, v: &Value) -> ArithResult<Value> {
        let x = self.trig_argument("sin", v)?;
        let p = self.backend_precision();
        let result = x.sin(p, ROUNDING, &mut self.consts);
        self.checked("sin", &result)
    }

    pub fn cos(&mut self, v: &Value) -> ArithResult<Value> {
        let x = self.trig_argument("cos", v)?;
        let p = self.backend_precision();
        let result = x.cos(p, ROUNDING, &mut self.consts);
        self.checked("cos", &result)
    }

    pub fn tan(&mut self, v: &Value) -> ArithResult<Value> {
        let sin = self.sin(v)?;
        let cos = self.cos(v)?;
        if cos.is_zero() {
            return Err(division_by_zero("tan"));
        }
        self.divide(&sin, &cos)
    }

    pub fn arcsin(&mut self, v: &Value) -> ArithResult<Value> {
        if v.is_infinite()
            || self.compare_f64(v, 1.0) == Ordering::Greater
            || self.compare_f64(v, -1.0) == Ordering::Less
        {
            return Err(out_of_domain("arcsin", v));
        }
        if self.compare_f64(&self.abs(v), 1.0) == Ordering::Equal {
            let pi = self.get_pi();
            let half_pi = self.multiply_2exp(&pi, -1);
            return Ok(if v.is_negative() {
                self.negate(&half_pi)
            } else {
                half_pi
            });
        }
        let p = self.backend_precision();
        let result = v.as_big().asin(p, ROUNDING, &mut self.consts);
        self.checked("arcsin", &result)
    }

    /// `pi/2 - arcsin(v)`; the subtraction is checked.
    pub fn arccos(&mut self, v: &Value) -> ArithResult<Value> {
        let arcsin = self.arcsin(v).map_err(|_| out_of_domain("arccos", v))?;
        let pi = self.get_pi();
        let half_pi = self.multiply_2exp(&pi, -1);
        self.subtract(&half_pi, &arcsin)
    }

    pub fn arctan(&mut self, v: &Value) -> ArithResult<Value> {
        if v.is_infinite() {
            let pi = self.get_pi();
            let half_pi = self.multiply_2exp(&pi, -1);
            return Ok(if v.is_minus_infinity() {
                self.negate(&half_pi)
            } else {
                half_pi
            });
        }
        let p = self.backend_precision();
        let result = v.as_big().atan(p, ROUNDING, &mut self.consts);
        self.checked("arctan", &result)
    }
}
