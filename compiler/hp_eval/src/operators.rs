//! Scalar operations, pair combinations and constants.
//!
//! Direct `match` dispatch over the closed operator sets of `hp_ir`.

use hp_arith::{EvaluationContext, Value};
use hp_ir::{ConstantEvaluation, Operation, PairOp};

use crate::errors::EvalResult;

/// Apply a unary operation to one value.
pub fn evaluate_operation(
    ctx: &mut EvaluationContext,
    operation: Operation,
    v: &Value,
) -> EvalResult<Value> {
    let result = match operation {
        Operation::Sqrt => ctx.sqrt(v)?,
        Operation::Pow(exponent) => ctx.pow_f64(v, exponent.get())?,
        Operation::Log2 => ctx.log2(v)?,
        Operation::Log2Double => {
            let log2 = ctx.log2_double(v)?;
            ctx.to_value_f64(log2)?
        }
        Operation::Abs => ctx.abs(v),
        Operation::Exp => ctx.exp(v)?,
        Operation::Sin => ctx.sin(v)?,
        Operation::Cos => ctx.cos(v)?,
        Operation::Tan => ctx.tan(v)?,
        Operation::Arcsin => ctx.arcsin(v)?,
        Operation::Arccos => ctx.arccos(v)?,
        Operation::Arctan => ctx.arctan(v)?,
        Operation::LogE => ctx.log(v)?,
    };
    Ok(result)
}

/// Combine two values.
pub fn evaluate_pair(
    ctx: &mut EvaluationContext,
    op: PairOp,
    a: &Value,
    b: &Value,
) -> EvalResult<Value> {
    let result = match op {
        PairOp::Add => ctx.add(a, b)?,
        PairOp::Sub => ctx.subtract(a, b)?,
        PairOp::Mul => ctx.multiply(a, b)?,
        PairOp::Div => ctx.divide(a, b)?,
        PairOp::Min => ctx.min(a, b),
        PairOp::Max => ctx.max(a, b),
    };
    Ok(result)
}

/// Materialize a constant at the working precision.
pub fn evaluate_constant(
    ctx: &mut EvaluationContext,
    constant: ConstantEvaluation,
) -> EvalResult<Value> {
    let result = match constant {
        ConstantEvaluation::E => ctx.get_e(),
        ConstantEvaluation::Pi => ctx.get_pi(),
        ConstantEvaluation::PlusInfinity => ctx.get_plus_infinity(),
        ConstantEvaluation::MinusInfinity => ctx.get_minus_infinity(),
        ConstantEvaluation::Number(x) => ctx.to_value_f64(x.get())?,
    };
    Ok(result)
}

/// Apply `op` element-wise to two equally long vectors.
pub(crate) fn evaluate_pair_vectors(
    ctx: &mut EvaluationContext,
    op: PairOp,
    left: &[Value],
    right: &[Value],
) -> EvalResult<Vec<Value>> {
    if left.len() != right.len() {
        return Err(crate::errors::dimension_mismatch(left.len(), right.len()));
    }
    left.iter()
        .zip(right)
        .map(|(a, b)| evaluate_pair(ctx, op, a, b))
        .collect()
}

/// Apply `operation` to each element.
pub(crate) fn evaluate_operation_vector(
    ctx: &mut EvaluationContext,
    operation: Operation,
    values: &[Value],
) -> EvalResult<Vec<Value>> {
    values
        .iter()
        .map(|v| evaluate_operation(ctx, operation, v))
        .collect()
}
