//! Tests for the distance to the nearest one-dimensional optimum.

use hp_ir::{Float, Function, Operation, StandardFunction};
use pretty_assertions::assert_eq;

use super::{context, sphere, standard, values};
use crate::{EvalError, FunctionEvaluator};

fn distance(function: &Function, xs: &[f64], dim: usize) -> Result<f64, EvalError> {
    let mut ctx = context();
    let evaluator = FunctionEvaluator::new();
    let position = values(&ctx, xs);
    let value = evaluator.distance_to_local_optimum(&mut ctx, function, &position, dim)?;
    Ok(ctx.to_f64(&value).unwrap())
}

#[test]
fn test_closed_forms() {
    assert_eq!(distance(&sphere(), &[-3.0, 4.0], 0).unwrap(), 3.0);
    assert_eq!(distance(&sphere(), &[-3.0, 4.0], 1).unwrap(), 4.0);

    let two_cups = standard(StandardFunction::TwoCups);
    assert_eq!(distance(&two_cups, &[0.5], 0).unwrap(), 0.5);
    assert_eq!(distance(&two_cups, &[-0.25], 0).unwrap(), 0.75);

    let mono = standard(StandardFunction::MonoSphere);
    assert_eq!(distance(&mono, &[-2.0, 9.0], 0).unwrap(), 2.0);
    assert_eq!(distance(&mono, &[-2.0, 9.0], 1).unwrap(), 0.0);

    let plane = standard(StandardFunction::InclinedPlane);
    assert!(distance(&plane, &[1.0], 0).unwrap().is_infinite());
}

#[test]
fn test_coupled_quadratics() {
    // f = x0^2 + (x0 + x1)^2 is minimal along x0 at -x1 / 2.
    let schwefel = standard(StandardFunction::Schwefel);
    assert_eq!(distance(&schwefel, &[1.0, 2.0], 0).unwrap(), 2.0);

    let diagonal = standard(StandardFunction::Diagonal(Float::new(1.0)));
    assert_eq!(distance(&diagonal, &[1.0, 2.0], 0).unwrap(), 2.0);

    let hadamard = standard(StandardFunction::HadamardRotatedSphere(Float::new(1.0)));
    assert_eq!(distance(&hadamard, &[1.0, 2.0], 1).unwrap(), 2.0);
}

#[test]
fn test_ternary_search_finds_the_optimum() {
    let root = Function::Operated(Operation::Sqrt, Box::new(sphere()));
    let found = distance(&root, &[3.0, 4.0], 0).unwrap();
    assert!((found - 3.0).abs() < 1e-6, "got {found}");
}

#[test]
fn test_ternary_search_outside_bounds() {
    let root = Function::Operated(Operation::Sqrt, Box::new(sphere()));
    assert_eq!(distance(&root, &[150.0, 0.0], 0).unwrap(), 50.0);
    assert_eq!(distance(&root, &[0.0, -130.0], 1).unwrap(), 30.0);
}

#[test]
fn test_dimension_out_of_range() {
    assert_eq!(
        distance(&sphere(), &[1.0, 2.0], 2),
        Err(EvalError::IndexOutOfRange { index: 2, len: 2 })
    );
}
