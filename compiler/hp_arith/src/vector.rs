//! Helpers over slices of values.

use std::cmp::Ordering;

use crate::context::EvaluationContext;
use crate::errors::ArithResult;
use crate::value::Value;

impl EvaluationContext {
    /// Sum of all elements; zero for an empty slice.
    pub fn vec_sum(&mut self, values: &[Value]) -> ArithResult<Value> {
        let mut sum = self.zero();
        for v in values {
            sum = self.add(&sum, v)?;
        }
        Ok(sum)
    }

    /// Product of all elements; one for an empty slice.
    pub fn vec_product(&mut self, values: &[Value]) -> ArithResult<Value> {
        let mut product = self.one();
        for v in values {
            product = self.multiply(&product, v)?;
        }
        Ok(product)
    }

    /// Inner product of two equally long vectors.
    pub fn vec_dot(&mut self, a: &[Value], b: &[Value]) -> ArithResult<Value> {
        let mut sum = self.zero();
        for (x, y) in a.iter().zip(b) {
            let term = self.multiply(x, y)?;
            sum = self.add(&sum, &term)?;
        }
        Ok(sum)
    }

    pub fn vec_squared_length(&mut self, v: &[Value]) -> ArithResult<Value> {
        self.vec_dot(v, v)
    }

    pub fn vec_subtract(&mut self, a: &[Value], b: &[Value]) -> ArithResult<Vec<Value>> {
        a.iter().zip(b).map(|(x, y)| self.subtract(x, y)).collect()
    }

    /// Component of `v` along `direction`: `direction * <v, d> / <d, d>`.
    pub fn vec_orthogonal_projection(
        &mut self,
        v: &[Value],
        direction: &[Value],
    ) -> ArithResult<Vec<Value>> {
        let along = self.vec_dot(v, direction)?;
        let norm = self.vec_squared_length(direction)?;
        let factor = self.divide(&along, &norm)?;
        direction.iter().map(|d| self.multiply(d, &factor)).collect()
    }

    /// Ascending order; does not check precision.
    pub fn vec_sort(&self, mut values: Vec<Value>) -> Vec<Value> {
        values.sort_by(|a, b| self.compare_unchecked(a, b));
        values
    }

    /// Total order with `-inf < finite < +inf` that never checks precision.
    pub fn compare_unchecked(&self, a: &Value, b: &Value) -> Ordering {
        match (a.is_infinite(), b.is_infinite()) {
            (false, false) => a.as_big().partial_cmp(b.as_big()).unwrap_or(Ordering::Equal),
            _ => {
                let rank = |v: &Value| {
                    if v.is_minus_infinity() {
                        0
                    } else if v.is_plus_infinity() {
                        2
                    } else {
                        1
                    }
                };
                rank(a).cmp(&rank(b))
            }
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(ctx: &EvaluationContext, xs: &[f64]) -> Vec<Value> {
        xs.iter().map(|&x| ctx.to_value_f64(x).unwrap()).collect()
    }

    fn doubles(ctx: &EvaluationContext, vs: &[Value]) -> Vec<f64> {
        vs.iter().map(|v| ctx.to_f64(v).unwrap()).collect()
    }

    #[test]
    fn test_sum_product_dot() {
        let mut ctx = EvaluationContext::new().unwrap();
        ctx.set_precision(128);
        let a = values(&ctx, &[1.0, 2.0, 3.0]);
        let b = values(&ctx, &[4.0, -5.0, 6.0]);
        let results = [
            ctx.vec_sum(&a).unwrap(),
            ctx.vec_product(&b).unwrap(),
            ctx.vec_dot(&a, &b).unwrap(),
            ctx.vec_squared_length(&a).unwrap(),
        ];
        assert_eq!(doubles(&ctx, &results), vec![6.0, -120.0, 12.0, 14.0]);
        assert!(ctx.vec_sum(&[]).unwrap().is_zero());
    }

    #[test]
    fn test_projection_and_difference() {
        let mut ctx = EvaluationContext::new().unwrap();
        ctx.set_precision(128);
        let v = values(&ctx, &[3.0, 4.0]);
        let d = values(&ctx, &[2.0, 0.0]);
        let projected = ctx.vec_orthogonal_projection(&v, &d).unwrap();
        assert_eq!(doubles(&ctx, &projected), vec![3.0, 0.0]);
        let difference = ctx.vec_subtract(&v, &d).unwrap();
        assert_eq!(doubles(&ctx, &difference), vec![1.0, 4.0]);
    }

    #[test]
    fn test_sort_places_infinities_at_the_ends() {
        let ctx = EvaluationContext::new().unwrap();
        let mut unsorted = values(&ctx, &[2.0, -1.0, 0.5]);
        unsorted.push(ctx.get_minus_infinity());
        unsorted.insert(0, ctx.get_plus_infinity());
        let sorted = ctx.vec_sort(unsorted);
        assert_eq!(
            doubles(&ctx, &sorted),
            vec![f64::NEG_INFINITY, -1.0, 0.5, 2.0, f64::INFINITY]
        );
    }
}
