//! Statistics over a snapshot of a particle swarm.
//!
//! A [`Statistic`] yields a vector of values; a [`SpecificStatistic`] yields
//! one value per particle and dimension, which a merge reduces along one
//! axis. Every evaluation runs inside `statistics_start`/`statistics_end`,
//! so the `AlwaysExceptStatistics` check mode skips its precision checks.

use hp_arith::{EvaluationContext, Value};
use hp_ir::{Function, MergeAxis, SpecificStatistic, Statistic};
use hp_stack::ensure_sufficient_stack;

use crate::errors::{dimension_mismatch, index_out_of_range, missing_objective, EvalResult};
use crate::function::FunctionEvaluator;
use crate::operators::{evaluate_constant, evaluate_operation_vector, evaluate_pair_vectors};

/// Read access to the state of a swarm.
///
/// Positions, velocities and attractors of one particle all have
/// [`Swarm::dimensions`] entries.
pub trait Swarm {
    fn particle_count(&self) -> usize;

    fn dimensions(&self) -> usize;

    fn position(&self, particle: usize) -> &[Value];

    fn velocity(&self, particle: usize) -> &[Value];

    fn local_attractor(&self, particle: usize) -> &[Value];

    /// Best position known to the neighborhood of `particle`.
    fn global_attractor(&self, particle: usize) -> &[Value];

    fn global_best_position(&self) -> &[Value];

    fn local_attractor_updates(&self) -> u64;

    fn global_attractor_updates(&self) -> u64;

    /// The objective function being optimized, if any.
    fn objective(&self) -> Option<&Function>;
}

/// Particles × dimensions.
type Table = Vec<Vec<Value>>;

/// Evaluates [`Statistic`] trees against a [`Swarm`].
pub struct StatisticEvaluator<'a> {
    functions: &'a FunctionEvaluator,
}

impl<'a> StatisticEvaluator<'a> {
    /// Objective evaluations go through `functions`, including its bounds
    /// handling.
    pub fn new(functions: &'a FunctionEvaluator) -> Self {
        StatisticEvaluator { functions }
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn evaluate(
        &self,
        ctx: &mut EvaluationContext,
        statistic: &Statistic,
        swarm: &dyn Swarm,
    ) -> EvalResult<Vec<Value>> {
        ctx.statistics_start();
        let result = self.evaluate_statistic(ctx, statistic, swarm);
        ctx.statistics_end();
        result
    }

    fn evaluate_statistic(
        &self,
        ctx: &mut EvaluationContext,
        statistic: &Statistic,
        swarm: &dyn Swarm,
    ) -> EvalResult<Vec<Value>> {
        ensure_sufficient_stack(|| match statistic {
            Statistic::Combine(op, left, right) => {
                let a = self.evaluate_statistic(ctx, left, swarm)?;
                let b = self.evaluate_statistic(ctx, right, swarm)?;
                evaluate_pair_vectors(ctx, *op, &a, &b)
            }
            Statistic::Operated(operation, inner) => {
                let values = self.evaluate_statistic(ctx, inner, swarm)?;
                evaluate_operation_vector(ctx, *operation, &values)
            }
            Statistic::Merge {
                axis,
                operation,
                source,
            } => {
                let table = self.evaluate_specific(ctx, source, swarm)?;
                let objective = swarm.objective();
                match axis {
                    MergeAxis::Particle => (0..swarm.dimensions())
                        .map(|d| {
                            let values = column(&table, d)?;
                            self.functions.reduce(ctx, operation, &values, objective)
                        })
                        .collect(),
                    MergeAxis::Dimension => table
                        .iter()
                        .map(|row| self.functions.reduce(ctx, operation, row, objective))
                        .collect(),
                }
            }
            Statistic::GlobalBestPosition => Ok(swarm.global_best_position().to_vec()),
            Statistic::GlobalBestPositionDistanceTo1DOptimum => {
                let objective = swarm.objective().ok_or_else(missing_objective)?;
                let best = swarm.global_best_position();
                (0..best.len())
                    .map(|d| {
                        self.functions
                            .distance_to_local_optimum(ctx, objective, best, d)
                    })
                    .collect()
            }
            Statistic::GlobalBestPositionFunctionEvaluation => {
                let objective = swarm.objective().ok_or_else(missing_objective)?;
                let value = self
                    .functions
                    .evaluate(ctx, objective, swarm.global_best_position())?;
                Ok(vec![value])
            }
            Statistic::LocalAttractorUpdates => {
                Ok(vec![ctx.to_value_u64(swarm.local_attractor_updates())])
            }
            Statistic::GlobalAttractorUpdates => {
                Ok(vec![ctx.to_value_u64(swarm.global_attractor_updates())])
            }
            Statistic::Precision => Ok(vec![ctx.to_value_u64(ctx.precision() as u64)]),
            Statistic::Constant { dimensions, value } => {
                let value = evaluate_constant(ctx, *value)?;
                Ok(vec![value; usize::try_from(*dimensions).unwrap_or_default()])
            }
        })
    }

    fn evaluate_specific(
        &self,
        ctx: &mut EvaluationContext,
        specific: &SpecificStatistic,
        swarm: &dyn Swarm,
    ) -> EvalResult<Table> {
        ensure_sufficient_stack(|| match specific {
            SpecificStatistic::Combine(op, left, right) => {
                let a = self.evaluate_specific(ctx, left, swarm)?;
                let b = self.evaluate_specific(ctx, right, swarm)?;
                if a.len() != b.len() {
                    return Err(dimension_mismatch(a.len(), b.len()));
                }
                a.iter()
                    .zip(&b)
                    .map(|(row_a, row_b)| evaluate_pair_vectors(ctx, *op, row_a, row_b))
                    .collect()
            }
            SpecificStatistic::Operated(operation, inner) => {
                let table = self.evaluate_specific(ctx, inner, swarm)?;
                table
                    .iter()
                    .map(|row| evaluate_operation_vector(ctx, *operation, row))
                    .collect()
            }
            SpecificStatistic::Position => Ok(rows(swarm, |s, p| s.position(p))),
            SpecificStatistic::Velocity => Ok(rows(swarm, |s, p| s.velocity(p))),
            SpecificStatistic::LocalAttractor => Ok(rows(swarm, |s, p| s.local_attractor(p))),
            SpecificStatistic::GlobalAttractor => Ok(rows(swarm, |s, p| s.global_attractor(p))),
            SpecificStatistic::FunctionDifference => {
                let objective = swarm.objective().ok_or_else(missing_objective)?;
                per_coordinate(ctx, swarm, |ctx, p, d| {
                    self.function_difference(ctx, objective, swarm, p, d)
                })
            }
            SpecificStatistic::AbsVelocityPlusDistToGlobalAttractor(scale) => {
                let scale = ctx.to_value_f64(scale.get())?;
                per_coordinate(ctx, swarm, |ctx, p, d| {
                    let speed = ctx.abs(&swarm.velocity(p)[d]);
                    let scaled = ctx.multiply(&speed, &scale)?;
                    let gap = ctx.subtract(&swarm.position(p)[d], &swarm.global_attractor(p)[d])?;
                    let distance = ctx.abs(&gap);
                    Ok(ctx.add(&scaled, &distance)?)
                })
            }
            SpecificStatistic::SqrtAbsVelocityPlusSqrtDistToGlobalAttractor(scale) => {
                let scale = ctx.to_value_f64(scale.get())?;
                per_coordinate(ctx, swarm, |ctx, p, d| {
                    let speed = ctx.abs(&swarm.velocity(p)[d]);
                    let root_speed = ctx.sqrt(&speed)?;
                    let scaled = ctx.multiply(&root_speed, &scale)?;
                    let gap = ctx.subtract(&swarm.position(p)[d], &swarm.global_attractor(p)[d])?;
                    let distance = ctx.abs(&gap);
                    let root_distance = ctx.sqrt(&distance)?;
                    Ok(ctx.add(&scaled, &root_distance)?)
                })
            }
            SpecificStatistic::Constant(constant) => {
                let value = evaluate_constant(ctx, *constant)?;
                let row = vec![value; swarm.dimensions()];
                Ok(vec![row; swarm.particle_count()])
            }
        })
    }

    /// `|f(x) - f(x + v_d e_d)|` for particle `p`.
    fn function_difference(
        &self,
        ctx: &mut EvaluationContext,
        objective: &Function,
        swarm: &dyn Swarm,
        p: usize,
        d: usize,
    ) -> EvalResult<Value> {
        let position = swarm.position(p);
        let before = self.functions.evaluate(ctx, objective, position)?;
        let mut moved = position.to_vec();
        moved[d] = ctx.add(&position[d], &swarm.velocity(p)[d])?;
        let after = self.functions.evaluate(ctx, objective, &moved)?;
        let difference = ctx.subtract(&before, &after)?;
        Ok(ctx.abs(&difference))
    }
}

fn rows(swarm: &dyn Swarm, row: fn(&dyn Swarm, usize) -> &[Value]) -> Table {
    (0..swarm.particle_count())
        .map(|p| row(swarm, p).to_vec())
        .collect()
}

fn per_coordinate(
    ctx: &mut EvaluationContext,
    swarm: &dyn Swarm,
    mut cell: impl FnMut(&mut EvaluationContext, usize, usize) -> EvalResult<Value>,
) -> EvalResult<Table> {
    let mut table = Vec::with_capacity(swarm.particle_count());
    for p in 0..swarm.particle_count() {
        let row = (0..swarm.dimensions())
            .map(|d| cell(ctx, p, d))
            .collect::<EvalResult<Vec<_>>>()?;
        table.push(row);
    }
    Ok(table)
}

fn column(table: &[Vec<Value>], d: usize) -> EvalResult<Vec<Value>> {
    table
        .iter()
        .map(|row| {
            row.get(d)
                .cloned()
                .ok_or_else(|| index_out_of_range(d as i64, row.len()))
        })
        .collect()
}
