//! Objective function evaluation.
//!
//! [`FunctionEvaluator::evaluate`] applies the out-of-bounds behavior to the
//! position once and then walks the tree. Nested functions of `Operated` and
//! `Combine` nodes see the already bounded position; `functionEvaluation`
//! merges evaluate their function with bounds handling of its own.

use hp_arith::{EvaluationContext, Value};
use hp_ir::{Function, SpecificFunction, VectorMergeOperation};
use hp_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;

use crate::bounds::{self, BoundOverride, OutOfBoundsBehavior};
use crate::cache::FunctionCache;
use crate::errors::{empty_input, index_out_of_range, missing_objective, EvalResult};
use crate::operators::{
    evaluate_constant, evaluate_operation, evaluate_operation_vector, evaluate_pair,
    evaluate_pair_vectors,
};

/// Evaluates [`Function`] trees.
///
/// Holds the out-of-bounds behavior, per-function bound overrides and the
/// cache of per-dimension data. Evaluation itself takes `&self`.
#[derive(Default)]
pub struct FunctionEvaluator {
    behavior: OutOfBoundsBehavior,
    overrides: FxHashMap<Function, Vec<BoundOverride>>,
    pub(crate) cache: FunctionCache,
}

impl FunctionEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_behavior(behavior: OutOfBoundsBehavior) -> Self {
        FunctionEvaluator {
            behavior,
            ..Self::default()
        }
    }

    pub fn behavior(&self) -> OutOfBoundsBehavior {
        self.behavior
    }

    pub fn set_behavior(&mut self, behavior: OutOfBoundsBehavior) {
        self.behavior = behavior;
    }

    /// Override the bounds of `function` for the dimensions `from..=to`.
    ///
    /// Later overrides win where they overlap earlier ones.
    pub fn set_bounds(&mut self, function: &Function, from: i32, to: i32, lower: f64, upper: f64) {
        self.overrides
            .entry(function.clone())
            .or_default()
            .push(BoundOverride {
                from,
                to,
                lower,
                upper,
            });
    }

    pub fn lower_bound(&self, function: &Function, dims: usize) -> Vec<f64> {
        self.bounds(function, dims).0
    }

    pub fn upper_bound(&self, function: &Function, dims: usize) -> Vec<f64> {
        self.bounds(function, dims).1
    }

    pub(crate) fn bounds(&self, function: &Function, dims: usize) -> (Vec<f64>, Vec<f64>) {
        let overrides = self.overrides.get(function).map_or(&[][..], Vec::as_slice);
        bounds::resolve(function, overrides, dims)
    }

    /// Value of `function` at `position`, with bounds handling.
    #[tracing::instrument(level = "debug", skip_all, fields(dims = position.len()))]
    pub fn evaluate(
        &self,
        ctx: &mut EvaluationContext,
        function: &Function,
        position: &[Value],
    ) -> EvalResult<Value> {
        let (lower, upper) = self.bounds(function, position.len());
        match bounds::apply(ctx, self.behavior, position, &lower, &upper)? {
            Some(bounded) => self.evaluate_unbounded(ctx, function, &bounded),
            None => Ok(ctx.get_plus_infinity()),
        }
    }

    /// Value of `function` at `position`, ignoring bounds.
    pub fn evaluate_unbounded(
        &self,
        ctx: &mut EvaluationContext,
        function: &Function,
        position: &[Value],
    ) -> EvalResult<Value> {
        ensure_sufficient_stack(|| match function {
            Function::Operated(operation, inner) => {
                let value = self.evaluate_unbounded(ctx, inner, position)?;
                evaluate_operation(ctx, *operation, &value)
            }
            Function::Standard(standard) => self.evaluate_standard(ctx, standard, position),
            Function::Combine(op, left, right) => {
                let a = self.evaluate_unbounded(ctx, left, position)?;
                let b = self.evaluate_unbounded(ctx, right, position)?;
                evaluate_pair(ctx, *op, &a, &b)
            }
            Function::Merge(merge, specific) => {
                let values = evaluate_specific_function(ctx, specific, position)?;
                self.reduce(ctx, merge, &values, None)
            }
            Function::Constant(constant) => evaluate_constant(ctx, *constant),
        })
    }

    /// Reduce `values` to one value.
    ///
    /// `objective` backs `objectiveFunctionEvaluation`; without one that
    /// merge fails with [`EvalError::MissingObjective`](crate::EvalError).
    pub fn reduce(
        &self,
        ctx: &mut EvaluationContext,
        merge: &VectorMergeOperation,
        values: &[Value],
        objective: Option<&Function>,
    ) -> EvalResult<Value> {
        match merge {
            VectorMergeOperation::Specific(index) => {
                let i = checked_index(*index, values.len())?;
                Ok(values[i].clone())
            }
            VectorMergeOperation::IncreasingOrderNth(index) => {
                let i = checked_index(*index, values.len())?;
                let mut sorted = ctx.vec_sort(values.to_vec());
                Ok(sorted.swap_remove(i))
            }
            VectorMergeOperation::ArithmeticAverage => {
                if values.is_empty() {
                    return Err(empty_input("arithmetic average"));
                }
                let sum = ctx.vec_sum(values)?;
                let count = ctx.to_value_u64(values.len() as u64);
                Ok(ctx.divide(&sum, &count)?)
            }
            VectorMergeOperation::GeometricAverage => {
                if values.is_empty() {
                    return Err(empty_input("geometric average"));
                }
                let product = ctx.vec_product(values)?;
                Ok(ctx.pow_f64(&product, 1.0 / values.len() as f64)?)
            }
            VectorMergeOperation::Sum => Ok(ctx.vec_sum(values)?),
            VectorMergeOperation::Product => Ok(ctx.vec_product(values)?),
            VectorMergeOperation::Maximum => {
                let mut best = ctx.get_minus_infinity();
                for v in values {
                    best = ctx.max(&best, v);
                }
                Ok(best)
            }
            VectorMergeOperation::Minimum => {
                let mut best = ctx.get_plus_infinity();
                for v in values {
                    best = ctx.min(&best, v);
                }
                Ok(best)
            }
            VectorMergeOperation::FunctionEvaluation(function) => {
                self.evaluate(ctx, function, values)
            }
            VectorMergeOperation::ObjectiveFunctionEvaluation => {
                let objective = objective.ok_or_else(missing_objective)?;
                self.evaluate(ctx, objective, values)
            }
        }
    }
}

/// Apply a specific function element-wise to `position`.
pub fn evaluate_specific_function(
    ctx: &mut EvaluationContext,
    specific: &SpecificFunction,
    position: &[Value],
) -> EvalResult<Vec<Value>> {
    ensure_sufficient_stack(|| match specific {
        SpecificFunction::Operated(operation, inner) => {
            let values = evaluate_specific_function(ctx, inner, position)?;
            evaluate_operation_vector(ctx, *operation, &values)
        }
        SpecificFunction::Combine(op, left, right) => {
            let a = evaluate_specific_function(ctx, left, position)?;
            let b = evaluate_specific_function(ctx, right, position)?;
            evaluate_pair_vectors(ctx, *op, &a, &b)
        }
        SpecificFunction::Identity => Ok(position.to_vec()),
        SpecificFunction::Constant(constant) => {
            let value = evaluate_constant(ctx, *constant)?;
            Ok(vec![value; position.len()])
        }
    })
}

fn checked_index(index: i32, len: usize) -> EvalResult<usize> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or_else(|| index_out_of_range(i64::from(index), len))
}
