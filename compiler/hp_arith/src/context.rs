//! The evaluation context.
//!
//! Everything that would otherwise be process-wide mutable state lives here:
//! the working precision, the [`PrecisionConfig`] with its sticky advisory
//! flag, the default random source and the memoized constants. A context is
//! threaded by `&mut` through every evaluation, so independent contexts never
//! observe each other.

use astro_float::{BigFloat, Consts, RoundingMode};
use hp_rng::{RandomGenerator, RandomSource};

use crate::config::{CheckMode, PrecisionConfig};
use crate::errors::{not_a_number, ArithResult, DomainError};
use crate::value::Value;

pub(crate) const ROUNDING: RoundingMode = RoundingMode::ToEven;

/// Narrowest precision values are built at. Integer conversions below one
/// 64-bit word come back as NaN.
pub(crate) const MIN_BACKEND_PRECISION: usize = 64;

/// Guard bits above the backend precision at which additions are checked
/// for lost bits: one 64-bit limb.
const CHECK_HEADROOM: usize = 64;

/// Precision handed to the backend for a working precision of `bits`.
#[inline]
pub(crate) fn backend_bits(bits: usize) -> usize {
    bits.max(MIN_BACKEND_PRECISION)
}

/// A constant computed at some precision and rounded down on request.
#[derive(Default)]
struct ConstantCache {
    cached: Option<(usize, BigFloat)>,
}

impl ConstantCache {
    fn get(
        &mut self,
        precision: usize,
        compute: impl FnOnce(usize) -> BigFloat,
        name: &'static str,
    ) -> BigFloat {
        match &self.cached {
            Some((cached_precision, value)) if *cached_precision >= precision => {
                round_to(value, precision)
            }
            _ => {
                tracing::debug!(constant = name, precision, "recomputing cached constant");
                let value = compute(precision);
                let rounded = round_to(&value, precision);
                self.cached = Some((precision, value));
                rounded
            }
        }
    }
}

#[inline]
pub(crate) fn round_to(x: &BigFloat, precision: usize) -> BigFloat {
    x.add(&BigFloat::new(precision), precision, ROUNDING)
}

pub struct EvaluationContext {
    config: PrecisionConfig,
    precision: usize,
    statistics_depth: usize,
    default_rng: RandomGenerator,
    pub(crate) consts: Consts,
    pi: ConstantCache,
    e: ConstantCache,
}

impl EvaluationContext {
    /// A context with default settings and working precision equal to the
    /// default initial precision.
    pub fn new() -> ArithResult<Self> {
        let consts = Consts::new().map_err(|e| DomainError::Backend(format!("{e:?}")))?;
        let config = PrecisionConfig::default();
        Ok(EvaluationContext {
            precision: config.initial_precision,
            config,
            statistics_depth: 0,
            default_rng: RandomGenerator::standard_fast(0),
            consts,
            pi: ConstantCache::default(),
            e: ConstantCache::default(),
        })
    }

    /// Reset every setting to its default and reseed the default generator.
    ///
    /// Memoized constants survive; they are valid at any lower precision.
    pub fn init(&mut self) {
        self.config = PrecisionConfig::default();
        self.precision = self.config.initial_precision;
        self.statistics_depth = 0;
        self.default_rng = RandomGenerator::standard_fast(0);
    }

    // Working precision

    pub fn precision(&self) -> usize {
        self.precision
    }

    pub fn set_precision(&mut self, bits: usize) {
        self.precision = bits.max(1);
    }

    /// Precision values are actually computed at; never below
    /// [`MIN_BACKEND_PRECISION`].
    #[inline]
    pub(crate) fn backend_precision(&self) -> usize {
        backend_bits(self.precision)
    }

    // Precision configuration

    pub fn config(&self) -> &PrecisionConfig {
        &self.config
    }

    pub fn initial_precision(&self) -> usize {
        self.config.initial_precision
    }

    /// Set the initial precision; the first call also sets the safety margin
    /// to the same number of bits.
    pub fn set_initial_precision(&mut self, bits: usize) {
        self.config.initial_precision = bits;
        if !self.config.initial_precision_already_set {
            self.config.initial_precision_already_set = true;
            self.config.safety_margin = bits;
        }
    }

    pub fn is_initial_precision_already_set(&self) -> bool {
        self.config.initial_precision_already_set
    }

    pub fn safety_margin(&self) -> usize {
        self.config.safety_margin
    }

    pub fn set_safety_margin(&mut self, bits: usize) {
        self.config.safety_margin = bits;
    }

    pub fn check_mode(&self) -> CheckMode {
        self.config.check_mode
    }

    pub fn set_check_mode(&mut self, mode: CheckMode) {
        self.config.check_mode = mode;
    }

    pub fn check_probability(&self) -> f64 {
        self.config.check_probability
    }

    pub fn set_check_probability(&mut self, probability: f64) {
        self.config.check_probability = probability;
    }

    pub fn output_precision(&self) -> i32 {
        self.config.output_precision
    }

    pub fn set_output_precision(&mut self, digits: i32) {
        self.config.output_precision = digits;
    }

    // Advisory flag

    pub fn is_increase_precision_recommended(&self) -> bool {
        self.config.increase_recommended
    }

    pub fn reset_increase_precision_recommended(&mut self) {
        self.config.increase_recommended = false;
    }

    pub fn recommend_increase_precision(&mut self) {
        if !self.config.increase_recommended {
            tracing::debug!(precision = self.precision, "precision increase recommended");
        }
        self.config.increase_recommended = true;
    }

    // Statistics bracket

    /// Enter a statistic evaluation. Nested calls are counted.
    pub fn statistics_start(&mut self) {
        self.statistics_depth += 1;
    }

    pub fn statistics_end(&mut self) {
        self.statistics_depth = self.statistics_depth.saturating_sub(1);
    }

    pub fn in_statistics(&self) -> bool {
        self.statistics_depth > 0
    }

    // Default random source

    pub fn default_rng(&mut self) -> &mut RandomGenerator {
        &mut self.default_rng
    }

    pub fn set_default_rng(&mut self, rng: RandomGenerator) {
        self.default_rng = rng;
    }

    // Constants

    pub fn get_pi(&mut self) -> Value {
        let p = self.backend_precision();
        let consts = &mut self.consts;
        let pi = self.pi.get(p, |p| consts.pi(p, ROUNDING), "pi");
        Value::from_big(pi)
    }

    pub fn get_e(&mut self) -> Value {
        let p = self.backend_precision();
        let consts = &mut self.consts;
        let e = self.e.get(p, |p| consts.e(p, ROUNDING), "e");
        Value::from_big(e)
    }

    pub fn get_plus_infinity(&self) -> Value {
        Value::from_big(BigFloat::from_f64(f64::INFINITY, self.backend_precision()))
    }

    pub fn get_minus_infinity(&self) -> Value {
        Value::from_big(BigFloat::from_f64(f64::NEG_INFINITY, self.backend_precision()))
    }

    // Construction

    /// Round `x` to the working precision and take ownership.
    #[inline]
    pub(crate) fn wrap(&self, x: &BigFloat) -> Value {
        Value::from_big(round_to(x, self.backend_precision()))
    }

    /// Like [`EvaluationContext::wrap`], but a NaN produced by `operation`
    /// becomes a [`DomainError`].
    #[inline]
    pub(crate) fn checked(&self, operation: &'static str, x: &BigFloat) -> ArithResult<Value> {
        if x.is_nan() {
            return Err(not_a_number(operation));
        }
        Ok(self.wrap(x))
    }

    /// Round a raw float (for example a cached matrix entry) to the working
    /// precision.
    pub fn to_value_big(&self, x: &BigFloat) -> Value {
        self.wrap(x)
    }

    pub fn zero(&self) -> Value {
        Value::from_big(BigFloat::new(self.backend_precision()))
    }

    pub fn one(&self) -> Value {
        self.to_value_i64(1)
    }

    pub fn to_value_f64(&self, x: f64) -> ArithResult<Value> {
        if x.is_nan() {
            return Err(DomainError::Unparsable(x.to_string()));
        }
        Ok(Value::from_big(BigFloat::from_f64(x, self.backend_precision())))
    }

    pub fn to_value_i64(&self, x: i64) -> Value {
        Value::from_big(BigFloat::from_i64(x, self.backend_precision()))
    }

    pub fn to_value_u64(&self, x: u64) -> Value {
        Value::from_big(BigFloat::from_u64(x, self.backend_precision()))
    }

    /// Parse a decimal literal such as `-1.25e3` or `inf`.
    ///
    /// Finite literals are read at working precision, so magnitudes beyond
    /// the `f64` range stay finite.
    pub fn to_value_str(&mut self, text: &str) -> ArithResult<Value> {
        let trimmed = text.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        if unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity") {
            return Ok(if negative {
                self.get_minus_infinity()
            } else {
                self.get_plus_infinity()
            });
        }
        let well_formed = !unsigned.is_empty()
            && unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.')
            && unsigned.parse::<f64>().is_ok();
        if !well_formed {
            return Err(DomainError::Unparsable(text.to_string()));
        }
        let literal = if negative {
            format!("-{unsigned}")
        } else {
            unsigned.to_string()
        };
        let parsed = BigFloat::parse(
            &literal,
            astro_float::Radix::Dec,
            self.backend_precision(),
            ROUNDING,
            &mut self.consts,
        );
        if parsed.is_nan() || parsed.is_inf() {
            return Err(DomainError::Unparsable(text.to_string()));
        }
        Ok(Value::from_big(parsed))
    }

    // Precision checks

    /// Whether an addition of `a` and `b` should be checked for cancellation.
    fn should_check(&mut self, a: &BigFloat, b: &BigFloat) -> bool {
        let config = &self.config;
        if config.increase_recommended || config.check_probability <= 0.0 {
            return false;
        }
        let enabled = match config.check_mode {
            CheckMode::Always => true,
            CheckMode::AlwaysExceptStatistics => self.statistics_depth == 0,
            CheckMode::Never => false,
        };
        if !enabled || a.is_inf() || b.is_inf() {
            return false;
        }
        if config.check_probability < 1.0 {
            let threshold = BigFloat::from_f64(config.check_probability, 64);
            let draw = self.default_rng.next_uniform(self.precision);
            return draw < threshold;
        }
        true
    }

    /// Raise the advisory flag if `a + b` loses more than the safety margin.
    ///
    /// With the magnitudes `|a + b|`, `|a|`, `|b|` sorted ascending as
    /// `s <= m <= l`: an exact zero `s` is suspicious whenever `m != l`;
    /// otherwise the flag is raised when `l + s * 2^-margin` rounds to `l`.
    /// The check runs [`CHECK_HEADROOM`] bits above the backend precision,
    /// so a well-conditioned sum passes even when the margin equals the
    /// working precision.
    pub(crate) fn check_precision_on_add(&mut self, a: &BigFloat, b: &BigFloat) {
        if !self.should_check(a, b) {
            return;
        }
        let p = self.backend_precision() + CHECK_HEADROOM;
        let mut magnitudes = [a.add(b, p, ROUNDING).abs(), a.abs(), b.abs()];
        magnitudes.sort_by(|x, y| x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal));
        let [smallest, middle, largest] = magnitudes;
        let lost = if smallest.is_zero() {
            middle != largest
        } else {
            let margin = crate::ops::power_of_two(-(self.config.safety_margin as i64), p);
            let shifted = smallest.mul(&margin, p, ROUNDING);
            largest.add(&shifted, p, ROUNDING) == largest
        };
        if lost {
            self.recommend_increase_precision();
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
