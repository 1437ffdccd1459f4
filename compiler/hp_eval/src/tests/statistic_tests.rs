//! Tests for statistics over a fixed swarm.

use hp_arith::{EvaluationContext, Value};
use hp_ir::{
    ConstantEvaluation, Float, Function, MergeAxis, Operation, PairOp, SpecificStatistic,
    Statistic, VectorMergeOperation,
};
use pretty_assertions::assert_eq;

use super::{context, doubles, sphere, values};
use crate::{EvalError, FunctionEvaluator, StatisticEvaluator, Swarm};

struct FixedSwarm {
    positions: Vec<Vec<Value>>,
    velocities: Vec<Vec<Value>>,
    best: Vec<Value>,
    objective: Option<Function>,
}

impl FixedSwarm {
    fn new(ctx: &EvaluationContext, objective: Option<Function>) -> Self {
        FixedSwarm {
            positions: vec![values(ctx, &[1.0, 2.0]), values(ctx, &[3.0, 4.0])],
            velocities: vec![values(ctx, &[1.0, -5.0]), values(ctx, &[0.5, 2.0])],
            best: values(ctx, &[1.0, 1.0]),
            objective,
        }
    }
}

impl Swarm for FixedSwarm {
    fn particle_count(&self) -> usize {
        self.positions.len()
    }

    fn dimensions(&self) -> usize {
        self.best.len()
    }

    fn position(&self, particle: usize) -> &[Value] {
        &self.positions[particle]
    }

    fn velocity(&self, particle: usize) -> &[Value] {
        &self.velocities[particle]
    }

    fn local_attractor(&self, particle: usize) -> &[Value] {
        &self.positions[particle]
    }

    fn global_attractor(&self, _particle: usize) -> &[Value] {
        &self.best
    }

    fn global_best_position(&self) -> &[Value] {
        &self.best
    }

    fn local_attractor_updates(&self) -> u64 {
        7
    }

    fn global_attractor_updates(&self) -> u64 {
        3
    }

    fn objective(&self) -> Option<&Function> {
        self.objective.as_ref()
    }
}

fn merged(axis: MergeAxis, operation: VectorMergeOperation, source: SpecificStatistic) -> Statistic {
    Statistic::Merge {
        axis,
        operation,
        source,
    }
}

fn number(x: f64) -> ConstantEvaluation {
    ConstantEvaluation::Number(Float::new(x))
}

fn run(statistic: &Statistic, objective: Option<Function>) -> Result<Vec<f64>, EvalError> {
    let mut ctx = context();
    let swarm = FixedSwarm::new(&ctx, objective);
    let functions = FunctionEvaluator::new();
    let result = StatisticEvaluator::new(&functions).evaluate(&mut ctx, statistic, &swarm);
    assert!(!ctx.in_statistics());
    let values = result?;
    Ok(doubles(&ctx, &values))
}

#[test]
fn test_merge_axes() {
    let per_dimension = merged(
        MergeAxis::Particle,
        VectorMergeOperation::Sum,
        SpecificStatistic::Position,
    );
    assert_eq!(run(&per_dimension, None).unwrap(), vec![4.0, 6.0]);

    let per_particle = merged(
        MergeAxis::Dimension,
        VectorMergeOperation::Maximum,
        SpecificStatistic::Velocity,
    );
    assert_eq!(run(&per_particle, None).unwrap(), vec![1.0, 2.0]);
}

#[test]
fn test_velocity_and_distance_combinations() {
    let linear = merged(
        MergeAxis::Dimension,
        VectorMergeOperation::Sum,
        SpecificStatistic::AbsVelocityPlusDistToGlobalAttractor(Float::new(2.0)),
    );
    assert_eq!(run(&linear, None).unwrap(), vec![13.0, 10.0]);

    let rooted = merged(
        MergeAxis::Particle,
        VectorMergeOperation::Sum,
        SpecificStatistic::SqrtAbsVelocityPlusSqrtDistToGlobalAttractor(Float::new(1.0)),
    );
    let sums = run(&rooted, None).unwrap();
    let expected_first = 1.0 + 0.0 + 0.5f64.sqrt() + 2.0f64.sqrt();
    assert!((sums[0] - expected_first).abs() < 1e-12);
}

#[test]
fn test_function_difference() {
    let statistic = merged(
        MergeAxis::Dimension,
        VectorMergeOperation::Sum,
        SpecificStatistic::FunctionDifference,
    );
    assert_eq!(run(&statistic, Some(sphere())).unwrap()[0], 8.0);
    assert_eq!(run(&statistic, None), Err(EvalError::MissingObjective));
}

#[test]
fn test_global_best_statistics() {
    assert_eq!(
        run(&Statistic::GlobalBestPosition, None).unwrap(),
        vec![1.0, 1.0]
    );
    assert_eq!(
        run(&Statistic::GlobalBestPositionFunctionEvaluation, Some(sphere())).unwrap(),
        vec![2.0]
    );
    assert_eq!(
        run(&Statistic::GlobalBestPositionDistanceTo1DOptimum, Some(sphere())).unwrap(),
        vec![1.0, 1.0]
    );
    assert_eq!(
        run(&Statistic::GlobalBestPositionFunctionEvaluation, None),
        Err(EvalError::MissingObjective)
    );
}

#[test]
fn test_scalar_statistics() {
    assert_eq!(run(&Statistic::LocalAttractorUpdates, None).unwrap(), vec![7.0]);
    assert_eq!(run(&Statistic::GlobalAttractorUpdates, None).unwrap(), vec![3.0]);
    assert_eq!(run(&Statistic::Precision, None).unwrap(), vec![128.0]);
    let constant = Statistic::Constant {
        dimensions: 3,
        value: number(2.0),
    };
    assert_eq!(run(&constant, None).unwrap(), vec![2.0, 2.0, 2.0]);
}

#[test]
fn test_operated_and_combined_statistics() {
    let root = Statistic::Operated(
        Operation::Sqrt,
        Box::new(Statistic::Constant {
            dimensions: 1,
            value: number(9.0),
        }),
    );
    assert_eq!(run(&root, None).unwrap(), vec![3.0]);

    let mismatch = Statistic::Combine(
        PairOp::Add,
        Box::new(Statistic::Constant {
            dimensions: 2,
            value: number(1.0),
        }),
        Box::new(Statistic::Constant {
            dimensions: 3,
            value: number(1.0),
        }),
    );
    assert_eq!(
        run(&mismatch, None),
        Err(EvalError::DimensionMismatch { left: 2, right: 3 })
    );

    let shifted = merged(
        MergeAxis::Particle,
        VectorMergeOperation::Minimum,
        SpecificStatistic::Combine(
            PairOp::Sub,
            Box::new(SpecificStatistic::Position),
            Box::new(SpecificStatistic::Constant(number(1.0))),
        ),
    );
    assert_eq!(run(&shifted, None).unwrap(), vec![0.0, 1.0]);
}
