//! Search space bounds and the treatment of positions outside them.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::ops::Range;

use hp_arith::{EvaluationContext, Value};
use hp_ir::Function;

use crate::errors::EvalResult;

/// Bounds of composite functions.
const COMPOSITE_BOUNDS: (f64, f64) = (-100.0, 100.0);

/// What [`FunctionEvaluator::evaluate`](crate::FunctionEvaluator::evaluate)
/// does with coordinates outside the search space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutOfBoundsBehavior {
    /// Replace each offending coordinate by the nearest bound.
    #[default]
    Clamp,
    /// Evaluate the position unchanged.
    Regular,
    /// Any offending coordinate makes the value `+inf`.
    Infinity,
    /// Wrap each offending coordinate into the bounds.
    Periodic,
}

impl OutOfBoundsBehavior {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "clamp" => Some(OutOfBoundsBehavior::Clamp),
            "normal" => Some(OutOfBoundsBehavior::Regular),
            "infinity" => Some(OutOfBoundsBehavior::Infinity),
            "periodic" => Some(OutOfBoundsBehavior::Periodic),
            _ => None,
        }
    }
}

/// Bounds `[lower, upper]` for the dimensions `from..=to`.
///
/// Indices outside `0..dims` are ignored when the override is applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundOverride {
    pub from: i32,
    pub to: i32,
    pub lower: f64,
    pub upper: f64,
}

impl BoundOverride {
    fn dimensions(&self, dims: usize) -> Range<usize> {
        let start = i64::from(self.from).max(0) as usize;
        let end = (i64::from(self.to) + 1).clamp(0, dims as i64) as usize;
        start..end.max(start)
    }
}

pub(crate) fn default_bounds(function: &Function) -> (f64, f64) {
    match function {
        Function::Standard(standard) => standard.default_bounds(),
        _ => COMPOSITE_BOUNDS,
    }
}

/// Per-dimension `(lower, upper)` after applying `overrides` in order.
pub(crate) fn resolve(
    function: &Function,
    overrides: &[BoundOverride],
    dims: usize,
) -> (Vec<f64>, Vec<f64>) {
    let (lo, hi) = default_bounds(function);
    let mut lower = vec![lo; dims];
    let mut upper = vec![hi; dims];
    for bound in overrides {
        for d in bound.dimensions(dims) {
            lower[d] = bound.lower;
            upper[d] = bound.upper;
        }
    }
    (lower, upper)
}

fn outside(ctx: &EvaluationContext, x: &Value, lower: f64, upper: f64) -> bool {
    ctx.compare_f64(x, lower) == Ordering::Less || ctx.compare_f64(x, upper) == Ordering::Greater
}

/// The position to evaluate, or `None` if the value is `+inf`.
pub(crate) fn apply<'a>(
    ctx: &mut EvaluationContext,
    behavior: OutOfBoundsBehavior,
    position: &'a [Value],
    lower: &[f64],
    upper: &[f64],
) -> EvalResult<Option<Cow<'a, [Value]>>> {
    if behavior == OutOfBoundsBehavior::Regular {
        return Ok(Some(Cow::Borrowed(position)));
    }
    let any_outside = position
        .iter()
        .zip(lower.iter().zip(upper))
        .any(|(x, (&lo, &hi))| outside(ctx, x, lo, hi));
    if !any_outside {
        return Ok(Some(Cow::Borrowed(position)));
    }
    if behavior == OutOfBoundsBehavior::Infinity {
        return Ok(None);
    }
    let mut moved = Vec::with_capacity(position.len());
    for (x, (&lo, &hi)) in position.iter().zip(lower.iter().zip(upper)) {
        let coordinate = if ctx.compare_f64(x, lo) == Ordering::Less {
            match behavior {
                OutOfBoundsBehavior::Periodic => wrap_periodic(ctx, x, lo, hi)?,
                _ => ctx.to_value_f64(lo)?,
            }
        } else if ctx.compare_f64(x, hi) == Ordering::Greater {
            match behavior {
                OutOfBoundsBehavior::Periodic => wrap_periodic(ctx, x, lo, hi)?,
                _ => ctx.to_value_f64(hi)?,
            }
        } else {
            x.clone()
        };
        moved.push(coordinate);
    }
    Ok(Some(Cow::Owned(moved)))
}

/// `x - floor((x - lo) / (hi - lo)) * (hi - lo)`, corrected into `[lo, hi]`.
fn wrap_periodic(ctx: &mut EvaluationContext, x: &Value, lo: f64, hi: f64) -> EvalResult<Value> {
    let lower = ctx.to_value_f64(lo)?;
    let upper = ctx.to_value_f64(hi)?;
    let width = ctx.subtract(&upper, &lower)?;
    let offset = ctx.subtract(x, &lower)?;
    let intervals = ctx.divide(&offset, &width)?;
    let turns = ctx.floor(&intervals);
    let shift = ctx.multiply(&turns, &width)?;
    let mut wrapped = ctx.subtract(x, &shift)?;
    while ctx.compare(&lower, &wrapped) == Ordering::Greater {
        wrapped = ctx.add(&wrapped, &width)?;
    }
    while ctx.compare(&wrapped, &upper) == Ordering::Greater {
        wrapped = ctx.subtract(&wrapped, &width)?;
    }
    Ok(wrapped)
}
