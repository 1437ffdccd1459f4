//! Distance from a position to the nearest local optimum along one axis.
//!
//! Functions with a known one-dimensional optimum answer in closed form.
//! Everything else runs a ternary search: a bracket is grown from the
//! position in steps that double while the value keeps improving, then
//! narrowed by probes at 40% or 60% of the interval.

use std::cmp::Ordering;

use hp_arith::{BigFloat, EvaluationContext, Value};
use hp_ir::{Function, StandardFunction};

use crate::errors::{index_out_of_range, EvalResult};
use crate::function::FunctionEvaluator;

/// First step of the bracket search.
const START_DISTANCE: f64 = 0.001;

/// Consecutive probes with an unchanged value after which the search stops.
const EQUAL_ROUNDS_LIMIT: usize = 10;

impl FunctionEvaluator {
    /// `|x_dim - y|` where `y` is the local optimum of `function` restricted
    /// to the line through `position` along dimension `dim`.
    #[tracing::instrument(level = "debug", skip_all, fields(dim = dim))]
    pub fn distance_to_local_optimum(
        &self,
        ctx: &mut EvaluationContext,
        function: &Function,
        position: &[Value],
        dim: usize,
    ) -> EvalResult<Value> {
        if dim >= position.len() {
            return Err(index_out_of_range(dim as i64, position.len()));
        }
        if let Function::Standard(standard) = function {
            if let Some(distance) = self.closed_form_distance(ctx, standard, position, dim)? {
                return Ok(distance);
            }
        }
        self.ternary_search(ctx, function, position, dim)
    }

    fn closed_form_distance(
        &self,
        ctx: &mut EvaluationContext,
        function: &StandardFunction,
        x: &[Value],
        d: usize,
    ) -> EvalResult<Option<Value>> {
        let distance = match function {
            StandardFunction::Norm2PowerK(_)
            | StandardFunction::Norm1
            | StandardFunction::NormInfinity
            | StandardFunction::Norm1Plus2PowerMinusK(_)
            | StandardFunction::SpherePlus
            | StandardFunction::ScaledSphere(_)
            | StandardFunction::ScaledSphereRandom(_) => ctx.abs(&x[d]),
            StandardFunction::MonoSphere if d == 0 => ctx.abs(&x[0]),
            StandardFunction::MonoSphere | StandardFunction::Sorting => ctx.zero(),
            StandardFunction::TwoCups => {
                let one = ctx.one();
                let offset = if ctx.compare_f64(&x[d], 0.0) == Ordering::Greater {
                    ctx.subtract(&x[d], &one)?
                } else {
                    ctx.add(&x[d], &one)?
                };
                ctx.abs(&offset)
            }
            StandardFunction::InclinedPlane | StandardFunction::InclinedPlaneAsym => {
                ctx.get_plus_infinity()
            }
            StandardFunction::Schwefel => {
                let dims = x.len();
                let weights: Vec<Value> = (0..dims)
                    .map(|d2| ctx.to_value_u64((dims - d.max(d2)) as u64))
                    .collect();
                let diagonal = ctx.to_value_u64((dims - d) as u64);
                linear_optimum_distance(ctx, &weights, &diagonal, x, d)?
            }
            StandardFunction::Diagonal(scale) => {
                let weight = ctx.to_value_f64(scale.get())?;
                let weights = vec![weight; x.len()];
                let diagonal = ctx.to_value_f64(scale.get() + 1.0)?;
                linear_optimum_distance(ctx, &weights, &diagonal, x, d)?
            }
            StandardFunction::HadamardRotatedSphere(_)
            | StandardFunction::RandomPositiveDefinite(_) => {
                let matrix = self.quadratic_matrix(ctx, function, x.len())?;
                let Some(row) = matrix.get(d) else {
                    return Err(index_out_of_range(d as i64, matrix.len()));
                };
                quadratic_optimum_distance(ctx, row, x, d)?
            }
            _ => return Ok(None),
        };
        Ok(Some(distance))
    }

    fn ternary_search(
        &self,
        ctx: &mut EvaluationContext,
        function: &Function,
        position: &[Value],
        d: usize,
    ) -> EvalResult<Value> {
        let (lower, upper) = self.bounds(function, position.len());
        let min_pos = ctx.to_value_f64(lower[d])?;
        let max_pos = ctx.to_value_f64(upper[d])?;
        let start = &position[d];
        if ctx.compare(&min_pos, start) == Ordering::Greater {
            return Ok(ctx.subtract(&min_pos, start)?);
        }
        if ctx.compare(&max_pos, start) == Ordering::Less {
            return Ok(ctx.subtract(start, &max_pos)?);
        }

        let mut probe = position.to_vec();
        let mut value = self.evaluate(ctx, function, position)?;
        let mut mid = start.clone();
        let mut diff = ctx.to_value_f64(START_DISTANCE)?;
        let mut bracket_low: Option<Value> = None;
        let mut bracket_high: Option<Value> = None;
        let mut first_step = true;

        let (mut low, mut high) = loop {
            if let (Some(low), Some(high)) = (&bracket_low, &bracket_high) {
                break (low.clone(), high.clone());
            }
            let may_double = !first_step;
            first_step = false;
            let upward = bracket_high.is_none();
            let next = if upward {
                ctx.add(&mid, &diff)?
            } else {
                ctx.subtract(&mid, &diff)?
            };
            if upward && ctx.compare(&next, &max_pos) == Ordering::Greater {
                bracket_high = Some(max_pos.clone());
                continue;
            }
            if !upward && ctx.compare(&next, &min_pos) == Ordering::Less {
                bracket_low = Some(min_pos.clone());
                continue;
            }
            probe[d] = next.clone();
            let next_value = self.evaluate(ctx, function, &probe)?;
            if ctx.compare_unchecked(&next_value, &value) == Ordering::Less {
                let previous = std::mem::replace(&mut mid, next);
                if upward {
                    bracket_low = Some(previous);
                } else {
                    bracket_high = Some(previous);
                }
                value = next_value;
                if may_double {
                    diff = ctx.multiply_2exp(&diff, 1);
                }
            } else if upward {
                bracket_high = Some(next);
            } else {
                bracket_low = Some(next);
            }
        };

        let near = ctx.to_value_f64(0.4)?;
        let far = ctx.to_value_f64(0.6)?;
        let mut equal_rounds = 0;
        for _ in 0..3 * ctx.precision() {
            if equal_rounds >= EQUAL_ROUNDS_LIMIT {
                break;
            }
            let width = ctx.subtract(&high, &low)?;
            let half = ctx.multiply_2exp(&width, -1);
            let interval_mid = ctx.add(&low, &half)?;
            let fraction = if ctx.compare_unchecked(&interval_mid, &mid) == Ordering::Less {
                &near
            } else {
                &far
            };
            let step = ctx.multiply(&width, fraction)?;
            let next = ctx.add(&step, &low)?;
            probe[d] = next.clone();
            let next_value = self.evaluate(ctx, function, &probe)?;
            let ordering = ctx.compare_unchecked(&next_value, &value);
            if ordering == Ordering::Equal {
                equal_rounds += 1;
            } else {
                equal_rounds = 0;
            }
            let discarded = if ordering == Ordering::Greater {
                next
            } else {
                value = next_value;
                std::mem::replace(&mut mid, next)
            };
            if ctx.compare_unchecked(&discarded, &mid) == Ordering::Less {
                low = discarded;
            } else {
                high = discarded;
            }
        }
        let offset = ctx.subtract(start, &mid)?;
        Ok(ctx.abs(&offset))
    }
}

/// `|B / diagonal + x_d|` with `B = sum_{d2 != d} weights[d2] * x_d2`.
fn linear_optimum_distance(
    ctx: &mut EvaluationContext,
    weights: &[Value],
    diagonal: &Value,
    x: &[Value],
    d: usize,
) -> EvalResult<Value> {
    let mut b = ctx.zero();
    for (d2, (weight, xd2)) in weights.iter().zip(x).enumerate() {
        if d2 == d {
            continue;
        }
        let term = ctx.multiply(weight, xd2)?;
        b = ctx.add(&term, &b)?;
    }
    let best = ctx.divide(&b, diagonal)?;
    let offset = ctx.add(&best, &x[d])?;
    Ok(ctx.abs(&offset))
}

/// Closed form for `x^T M x`, using row `d` of `M`.
fn quadratic_optimum_distance(
    ctx: &mut EvaluationContext,
    row: &[BigFloat],
    x: &[Value],
    d: usize,
) -> EvalResult<Value> {
    let weights: Vec<Value> = row.iter().map(|entry| ctx.to_value_big(entry)).collect();
    let diagonal = weights
        .get(d)
        .cloned()
        .ok_or_else(|| index_out_of_range(d as i64, weights.len()))?;
    linear_optimum_distance(ctx, &weights, &diagonal, x, d)
}
