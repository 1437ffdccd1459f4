//! Evaluator tests, grouped by the module they exercise.

mod distance_tests;
mod operators_tests;
mod statistic_tests;

use hp_arith::{EvaluationContext, Value};
use hp_ir::{Function, StandardFunction};

use crate::FunctionEvaluator;

fn context() -> EvaluationContext {
    let mut ctx = EvaluationContext::new().unwrap();
    ctx.set_precision(128);
    ctx
}

fn values(ctx: &EvaluationContext, xs: &[f64]) -> Vec<Value> {
    xs.iter().map(|&x| ctx.to_value_f64(x).unwrap()).collect()
}

fn doubles(ctx: &EvaluationContext, vs: &[Value]) -> Vec<f64> {
    vs.iter().map(|v| ctx.to_f64(v).unwrap()).collect()
}

fn standard(function: StandardFunction) -> Function {
    Function::Standard(function)
}

fn sphere() -> Function {
    standard(StandardFunction::Norm2PowerK(1))
}

/// Evaluate `function` at `xs` and read the result back as a double.
fn eval(
    evaluator: &FunctionEvaluator,
    ctx: &mut EvaluationContext,
    function: &Function,
    xs: &[f64],
) -> f64 {
    let position = values(ctx, xs);
    let value = evaluator.evaluate(ctx, function, &position).unwrap();
    ctx.to_f64(&value).unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-12 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}
