//! Random values drawn through the evaluation context.

use std::cmp::Ordering;

use hp_rng::{RandomGenerator, RandomSource};

use crate::context::EvaluationContext;
use crate::errors::ArithResult;
use crate::value::Value;

impl EvaluationContext {
    /// Uniform value in `[0, 1)` from `rng` at working precision.
    pub fn uniform_value(&self, rng: &mut impl RandomSource) -> Value {
        self.wrap(&rng.next_uniform(self.precision()))
    }

    /// Uniform value from the default random source.
    pub fn default_uniform_value(&mut self) -> Value {
        let p = self.precision();
        let drawn = self.default_rng().next_uniform(p);
        self.wrap(&drawn)
    }

    /// Normally distributed value with mean `mu` and deviation `sigma`.
    ///
    /// Polar method: `u` uniform in `(0, 1]`, `(x, y)` uniform on the unit
    /// circle, result `mu + sigma * sqrt(-ln u) * (x + y)`.
    pub fn gaussian(
        &mut self,
        mu: f64,
        sigma: f64,
        rng: &mut RandomGenerator,
    ) -> ArithResult<Value> {
        let u = loop {
            let u = self.uniform_value(rng);
            if self.compare_f64(&u, 0.0) == Ordering::Greater {
                break u;
            }
        };
        let one = self.one();
        let (x, y, squared_length) = loop {
            let x = self.signed_unit_draw(rng, &one)?;
            let y = self.signed_unit_draw(rng, &one)?;
            let xx = self.multiply(&x, &x)?;
            let yy = self.multiply(&y, &y)?;
            let squared_length = self.add(&xx, &yy)?;
            if !squared_length.is_zero()
                && self.compare_f64(&squared_length, 1.0) != Ordering::Greater
            {
                break (x, y, squared_length);
            }
        };
        let length = self.sqrt(&squared_length)?;
        let inverse = self.divide(&one, &length)?;
        let x = self.multiply(&inverse, &x)?;
        let y = self.multiply(&inverse, &y)?;

        let log_u = self.log(&u)?;
        let minus_log_u = self.negate(&log_u);
        let radius = self.sqrt(&minus_log_u)?;
        let direction = self.add(&x, &y)?;
        let standard = self.multiply(&radius, &direction)?;
        let sigma = self.to_value_f64(sigma)?;
        let mu = self.to_value_f64(mu)?;
        let scaled = self.multiply(&standard, &sigma)?;
        self.add(&scaled, &mu)
    }

    /// Gaussian draw from the default random source.
    pub fn default_gaussian(&mut self, mu: f64, sigma: f64) -> ArithResult<Value> {
        let mut rng = self.default_rng().clone();
        let result = self.gaussian(mu, sigma, &mut rng);
        self.set_default_rng(rng);
        result
    }

    /// `2r - 1` for a uniform draw `r`.
    fn signed_unit_draw(&mut self, rng: &mut RandomGenerator, one: &Value) -> ArithResult<Value> {
        let r = self.uniform_value(rng);
        let doubled = self.multiply_2exp(&r, 1);
        self.subtract(&doubled, one)
    }
}
