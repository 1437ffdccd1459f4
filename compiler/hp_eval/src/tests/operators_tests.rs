//! Tests for scalar operations, pair combinations and constants.

use hp_arith::DomainError;
use hp_ir::{ConstantEvaluation, Float, Operation, PairOp};
use pretty_assertions::assert_eq;

use super::{assert_close, context};
use crate::{evaluate_constant, evaluate_operation, evaluate_pair, EvalError};

fn apply(operation: Operation, x: f64) -> Result<f64, EvalError> {
    let mut ctx = context();
    let v = ctx.to_value_f64(x).unwrap();
    let result = evaluate_operation(&mut ctx, operation, &v)?;
    Ok(ctx.to_f64(&result).unwrap())
}

fn combine(op: PairOp, a: f64, b: f64) -> Result<f64, EvalError> {
    let mut ctx = context();
    let a = ctx.to_value_f64(a).unwrap();
    let b = ctx.to_value_f64(b).unwrap();
    let result = evaluate_pair(&mut ctx, op, &a, &b)?;
    Ok(ctx.to_f64(&result).unwrap())
}

#[test]
fn test_unary_operations() {
    assert_eq!(apply(Operation::Sqrt, 16.0).unwrap(), 4.0);
    assert_eq!(apply(Operation::Pow(Float::new(3.0)), 2.0).unwrap(), 8.0);
    assert_eq!(apply(Operation::Abs, -2.5).unwrap(), 2.5);
    assert_eq!(apply(Operation::Log2Double, 8.0).unwrap(), 3.0);
    assert_close(apply(Operation::Pow(Float::new(0.5)), 9.0).unwrap(), 3.0);
    assert_close(apply(Operation::Log2, 1024.0).unwrap(), 10.0);
    assert_close(apply(Operation::LogE, std::f64::consts::E).unwrap(), 1.0);
    assert_close(apply(Operation::Exp, 0.0).unwrap(), 1.0);
    assert_close(apply(Operation::Sin, 0.5).unwrap(), 0.5f64.sin());
    assert_close(apply(Operation::Cos, 0.5).unwrap(), 0.5f64.cos());
    assert_close(apply(Operation::Tan, 0.5).unwrap(), 0.5f64.tan());
    assert_close(apply(Operation::Arcsin, 0.5).unwrap(), 0.5f64.asin());
    assert_close(apply(Operation::Arccos, 0.5).unwrap(), 0.5f64.acos());
    assert_close(apply(Operation::Arctan, 0.5).unwrap(), 0.5f64.atan());
}

#[test]
fn test_domain_errors_are_wrapped() {
    assert!(matches!(
        apply(Operation::Sqrt, -1.0),
        Err(EvalError::Domain(DomainError::OutOfDomain { .. }))
    ));
    assert!(matches!(
        combine(PairOp::Div, 1.0, 0.0),
        Err(EvalError::Domain(DomainError::DivisionByZero { .. }))
    ));
}

#[test]
fn test_pair_operations() {
    assert_eq!(combine(PairOp::Add, 2.0, 3.0).unwrap(), 5.0);
    assert_eq!(combine(PairOp::Sub, 2.0, 3.0).unwrap(), -1.0);
    assert_eq!(combine(PairOp::Mul, 2.0, 3.0).unwrap(), 6.0);
    assert_eq!(combine(PairOp::Div, 3.0, 2.0).unwrap(), 1.5);
    assert_eq!(combine(PairOp::Min, 2.0, -3.0).unwrap(), -3.0);
    assert_eq!(combine(PairOp::Max, 2.0, -3.0).unwrap(), 2.0);
}

#[test]
fn test_constants() {
    let mut ctx = context();
    let number = evaluate_constant(&mut ctx, ConstantEvaluation::Number(Float::new(2.5))).unwrap();
    assert_eq!(ctx.to_f64(&number).unwrap(), 2.5);
    let pi = evaluate_constant(&mut ctx, ConstantEvaluation::Pi).unwrap();
    assert_close(ctx.to_f64(&pi).unwrap(), std::f64::consts::PI);
    let e = evaluate_constant(&mut ctx, ConstantEvaluation::E).unwrap();
    assert_close(ctx.to_f64(&e).unwrap(), std::f64::consts::E);
    let inf = evaluate_constant(&mut ctx, ConstantEvaluation::PlusInfinity).unwrap();
    assert!(inf.is_plus_infinity());
    let minus_inf = evaluate_constant(&mut ctx, ConstantEvaluation::MinusInfinity).unwrap();
    assert!(minus_inf.is_minus_infinity());
}
