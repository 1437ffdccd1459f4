//! The named benchmark functions.

use std::cmp::Ordering;
use std::sync::Arc;

use hp_arith::{ArithResult, BigFloat, EvaluationContext, Value};
use hp_ir::{DirectionMode, Float, StandardFunction};
use hp_rng::RandomSource;

use crate::cache::{Matrix, Row};
use crate::errors::{dimension_mismatch, empty_input, EvalResult};
use crate::function::FunctionEvaluator;

fn square(ctx: &EvaluationContext, v: &Value) -> ArithResult<Value> {
    ctx.multiply(v, v)
}

fn squares(ctx: &EvaluationContext, x: &[Value]) -> ArithResult<Vec<Value>> {
    x.iter().map(|v| square(ctx, v)).collect()
}

fn sphere(ctx: &mut EvaluationContext, x: &[Value]) -> ArithResult<Value> {
    let squared = squares(ctx, x)?;
    ctx.vec_sum(&squared)
}

fn norm_2_power_k(ctx: &mut EvaluationContext, k: i32, x: &[Value]) -> ArithResult<Value> {
    let mut current = x.to_vec();
    for _ in 0..k {
        current = squares(ctx, &current)?;
    }
    ctx.vec_sum(&current)
}

fn norm_infinity(ctx: &mut EvaluationContext, x: &[Value]) -> Value {
    let mut largest = ctx.zero();
    for v in x {
        let magnitude = ctx.abs(v);
        largest = ctx.max(&largest, &magnitude);
    }
    largest
}

/// `sum |x| * |x|^(2^-k)`, the root taken by `k` square roots.
fn norm_1_plus_2_power_minus_k(
    ctx: &mut EvaluationContext,
    k: i32,
    x: &[Value],
) -> ArithResult<Value> {
    let mut sum = ctx.zero();
    for v in x {
        let magnitude = ctx.abs(v);
        let mut root = ctx.sqrt(&magnitude)?;
        for _ in 1..k {
            root = ctx.sqrt(&root)?;
        }
        let term = ctx.multiply(&root, &magnitude)?;
        sum = ctx.add(&term, &sum)?;
    }
    Ok(sum)
}

fn rastrigin(ctx: &mut EvaluationContext, x: &[Value]) -> ArithResult<Value> {
    let pi = ctx.get_pi();
    let two_pi = ctx.add(&pi, &pi)?;
    let ten = ctx.to_value_i64(10);
    let mut terms = Vec::with_capacity(x.len());
    for v in x {
        let squared = square(ctx, v)?;
        let angle = ctx.multiply(v, &two_pi)?;
        let cos = ctx.cos(&angle)?;
        let wave = ctx.multiply(&cos, &ten)?;
        let difference = ctx.subtract(&squared, &wave)?;
        terms.push(ctx.add(&difference, &ten)?);
    }
    ctx.vec_sum(&terms)
}

/// `sum_{i < D-1} 100 (x_{i+1} - x_i^2)^2 + (1 - x_i)^2`.
fn rosenbrock(ctx: &mut EvaluationContext, x: &[Value]) -> ArithResult<Value> {
    let hundred = ctx.to_value_i64(100);
    let one = ctx.one();
    let mut terms = Vec::with_capacity(x.len().saturating_sub(1));
    for pair in x.windows(2) {
        let squared = square(ctx, &pair[0])?;
        let valley = ctx.subtract(&pair[1], &squared)?;
        let valley_squared = square(ctx, &valley)?;
        let steep = ctx.multiply(&hundred, &valley_squared)?;
        let offset = ctx.subtract(&one, &pair[0])?;
        let offset_squared = square(ctx, &offset)?;
        terms.push(ctx.add(&steep, &offset_squared)?);
    }
    ctx.vec_sum(&terms)
}

/// Rosenbrock with its optimum moved from `(1, …, 1)` to the origin.
fn moved_rosenbrock(ctx: &mut EvaluationContext, x: &[Value]) -> ArithResult<Value> {
    let one = ctx.one();
    let moved = x
        .iter()
        .map(|v| ctx.add(v, &one))
        .collect::<ArithResult<Vec<_>>>()?;
    rosenbrock(ctx, &moved)
}

/// Sum of the squared prefix sums.
fn schwefel(ctx: &mut EvaluationContext, x: &[Value]) -> ArithResult<Value> {
    let mut prefix = ctx.zero();
    let mut terms = Vec::with_capacity(x.len());
    for v in x {
        prefix = ctx.add(&prefix, v)?;
        terms.push(square(ctx, &prefix)?);
    }
    ctx.vec_sum(&terms)
}

fn schwefel2(ctx: &mut EvaluationContext, x: &[Value]) -> ArithResult<Value> {
    let mut terms = Vec::with_capacity(x.len());
    for v in x {
        let magnitude = ctx.abs(v);
        let root = ctx.sqrt(&magnitude)?;
        let sin = ctx.sin(&root)?;
        let product = ctx.multiply(v, &sin)?;
        terms.push(ctx.negate(&product));
    }
    ctx.vec_sum(&terms)
}

fn diagonal(ctx: &mut EvaluationContext, scale: f64, x: &[Value]) -> ArithResult<Value> {
    let sum = ctx.vec_sum(x)?;
    let sum_squared = square(ctx, &sum)?;
    let scale = ctx.to_value_f64(scale)?;
    let diagonal_part = ctx.multiply(&sum_squared, &scale)?;
    let sphere_part = sphere(ctx, x)?;
    ctx.add(&diagonal_part, &sphere_part)
}

fn sphere_plus(ctx: &mut EvaluationContext, x: &[Value]) -> ArithResult<Value> {
    if x.iter().any(Value::is_negative) {
        return Ok(ctx.get_plus_infinity());
    }
    sphere(ctx, x)
}

fn inclined_plane(ctx: &mut EvaluationContext, x: &[Value]) -> ArithResult<Value> {
    let sum = ctx.vec_sum(x)?;
    Ok(ctx.negate(&sum))
}

fn inclined_plane_asym(ctx: &mut EvaluationContext, x: &[Value]) -> ArithResult<Value> {
    let weighted = x
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let weight = ctx.to_value_u64(i as u64 + 1);
            ctx.multiply(v, &weight)
        })
        .collect::<ArithResult<Vec<_>>>()?;
    let sum = ctx.vec_sum(&weighted)?;
    Ok(ctx.negate(&sum))
}

/// `(x + 1)^2` left of zero, `(x - 1)^4` right of it.
fn two_cups(ctx: &mut EvaluationContext, x: &[Value]) -> ArithResult<Value> {
    let one = ctx.one();
    let mut sum = ctx.zero();
    for v in x {
        let term = if ctx.compare_f64(v, 0.0) == Ordering::Greater {
            let shifted = ctx.subtract(v, &one)?;
            ctx.pow_i64(&shifted, 4)?
        } else {
            let shifted = ctx.add(v, &one)?;
            ctx.pow_i64(&shifted, 2)?
        };
        sum = ctx.add(&term, &sum)?;
    }
    Ok(sum)
}

/// Number of pairs `j < i` with `x_i <= x_j`.
fn sorting(ctx: &mut EvaluationContext, x: &[Value]) -> Value {
    let mut inversions = 0u64;
    for i in 0..x.len() {
        for j in 0..i {
            if ctx.compare(&x[i], &x[j]) != Ordering::Greater {
                inversions += 1;
            }
        }
    }
    ctx.to_value_u64(inversions)
}

/// `sum (sin x - sqrt(1/2))^2`.
fn testing(ctx: &mut EvaluationContext, x: &[Value]) -> ArithResult<Value> {
    let half = ctx.to_value_f64(0.5)?;
    let shift = ctx.sqrt(&half)?;
    let mut terms = Vec::with_capacity(x.len());
    for v in x {
        let sin = ctx.sin(v)?;
        let moved = ctx.subtract(&sin, &shift)?;
        terms.push(square(ctx, &moved)?);
    }
    ctx.vec_sum(&terms)
}

fn mono_sphere(ctx: &EvaluationContext, x: &[Value]) -> EvalResult<Value> {
    let first = x.first().ok_or_else(|| empty_input("mono sphere"))?;
    Ok(square(ctx, first)?)
}

/// `sum s_i x_i^2`.
fn weighted_squares(ctx: &mut EvaluationContext, scales: &[BigFloat], x: &[Value]) -> ArithResult<Value> {
    let mut terms = Vec::with_capacity(x.len());
    for (scale, v) in scales.iter().zip(x) {
        let scale = ctx.to_value_big(scale);
        let squared = square(ctx, v)?;
        terms.push(ctx.multiply(&squared, &scale)?);
    }
    ctx.vec_sum(&terms)
}

/// `x^T M x`.
fn quadratic_form(ctx: &mut EvaluationContext, matrix: &[Row], x: &[Value]) -> ArithResult<Value> {
    let mut sum = ctx.zero();
    for (row, xi) in matrix.iter().zip(x) {
        for (entry, xj) in row.iter().zip(x) {
            let entry = ctx.to_value_big(entry);
            let partial = ctx.multiply(&entry, xi)?;
            let term = ctx.multiply(&partial, xj)?;
            sum = ctx.add(&term, &sum)?;
        }
    }
    Ok(sum)
}

/// `T T^T` for a square `T`.
fn gram(ctx: &mut EvaluationContext, t: &[Vec<Value>]) -> ArithResult<Matrix> {
    let mut matrix = Vec::with_capacity(t.len());
    for row_i in t {
        let mut row = Vec::with_capacity(t.len());
        for row_j in t {
            let entry = ctx.vec_dot(row_i, row_j)?;
            row.push(entry.as_big().clone());
        }
        matrix.push(row);
    }
    Ok(matrix)
}

fn raw(values: &[Value]) -> Row {
    values.iter().map(|v| v.as_big().clone()).collect()
}

/// Number of steps from the first to the last coordinate, at least one.
fn spread_steps(dims: usize) -> usize {
    dims.saturating_sub(1).max(1)
}

impl FunctionEvaluator {
    pub(crate) fn evaluate_standard(
        &self,
        ctx: &mut EvaluationContext,
        function: &StandardFunction,
        x: &[Value],
    ) -> EvalResult<Value> {
        let value = match function {
            StandardFunction::Norm2PowerK(k) => norm_2_power_k(ctx, *k, x)?,
            StandardFunction::Norm1 => {
                let magnitudes: Vec<Value> = x.iter().map(|v| ctx.abs(v)).collect();
                ctx.vec_sum(&magnitudes)?
            }
            StandardFunction::NormInfinity => norm_infinity(ctx, x),
            StandardFunction::Norm1Plus2PowerMinusK(k) => norm_1_plus_2_power_minus_k(ctx, *k, x)?,
            StandardFunction::Rosenbrock => rosenbrock(ctx, x)?,
            StandardFunction::MovedRosenbrock => moved_rosenbrock(ctx, x)?,
            StandardFunction::Rastrigin => rastrigin(ctx, x)?,
            StandardFunction::Schwefel => schwefel(ctx, x)?,
            StandardFunction::Schwefel2 => schwefel2(ctx, x)?,
            StandardFunction::Diagonal(scale) => diagonal(ctx, scale.get(), x)?,
            StandardFunction::SpherePlus => sphere_plus(ctx, x)?,
            StandardFunction::InclinedPlane => inclined_plane(ctx, x)?,
            StandardFunction::InclinedPlaneAsym => inclined_plane_asym(ctx, x)?,
            StandardFunction::TwoCups => two_cups(ctx, x)?,
            StandardFunction::Sorting => sorting(ctx, x),
            StandardFunction::Testing => testing(ctx, x)?,
            StandardFunction::MonoSphere => mono_sphere(ctx, x)?,
            StandardFunction::ScaledSphere(_) | StandardFunction::ScaledSphereRandom(_) => {
                let scales = self.scales(ctx, function, x.len())?;
                weighted_squares(ctx, &scales, x)?
            }
            StandardFunction::HadamardRotatedSphere(_)
            | StandardFunction::RandomPositiveDefinite(_) => {
                let matrix = self.quadratic_matrix(ctx, function, x.len())?;
                quadratic_form(ctx, &matrix, x)?
            }
            StandardFunction::SingleDifferentDirection {
                single_exponent,
                remaining_exponent,
                ..
            } => {
                let direction = self.special_direction(ctx, function, x.len())?;
                single_different_direction(ctx, &direction, *single_exponent, *remaining_exponent, x)?
            }
        };
        Ok(value)
    }

    /// Per-dimension scales of the scaled sphere variants.
    pub(crate) fn scales(
        &self,
        ctx: &mut EvaluationContext,
        function: &StandardFunction,
        dims: usize,
    ) -> EvalResult<Arc<Row>> {
        let precision = ctx.precision();
        self.cache.vector(function, dims, precision, || {
            let scales: Vec<Value> = match function {
                StandardFunction::ScaledSphere(max) => geometric_scales(ctx, *max, dims)?,
                StandardFunction::ScaledSphereRandom(rng) => {
                    let mut rng = rng.clone();
                    (0..dims)
                        .map(|_| ctx.to_value_i64(rng.next_integer().max(1)))
                        .collect()
                }
                _ => Vec::new(),
            };
            Ok(raw(&scales))
        })
    }

    /// The matrix `M` of the quadratic form `x^T M x`.
    pub(crate) fn quadratic_matrix(
        &self,
        ctx: &mut EvaluationContext,
        function: &StandardFunction,
        dims: usize,
    ) -> EvalResult<Arc<Matrix>> {
        let precision = ctx.precision();
        self.cache.matrix(function, dims, precision, || {
            let factor = match function {
                StandardFunction::HadamardRotatedSphere(max) => hadamard_factor(ctx, *max, dims)?,
                StandardFunction::RandomPositiveDefinite(rng) => {
                    let mut rng = rng.clone();
                    random_factor(ctx, &mut rng, dims)
                }
                _ => Vec::new(),
            };
            Ok(gram(ctx, &factor)?)
        })
    }

    fn special_direction(
        &self,
        ctx: &mut EvaluationContext,
        function: &StandardFunction,
        dims: usize,
    ) -> EvalResult<Arc<Row>> {
        let StandardFunction::SingleDifferentDirection { direction, .. } = function else {
            return Ok(Arc::new(Vec::new()));
        };
        let precision = ctx.precision();
        self.cache.vector(function, dims, precision, || {
            let coordinates: Vec<Value> = match direction {
                DirectionMode::FirstDimension => (0..dims)
                    .map(|d| if d == 0 { ctx.one() } else { ctx.zero() })
                    .collect(),
                DirectionMode::Diagonal => (0..dims).map(|_| ctx.one()).collect(),
                DirectionMode::Random(rng) => {
                    let mut rng = rng.clone();
                    (0..dims)
                        .map(|_| ctx.gaussian(0.0, 1.0, &mut rng))
                        .collect::<ArithResult<Vec<_>>>()?
                }
            };
            Ok(raw(&coordinates))
        })
    }
}

/// `s_0 = 1`, `s_i = s_{i-1} * max^(1 / max(1, D - 1))`.
fn geometric_scales(ctx: &mut EvaluationContext, max: Float, dims: usize) -> ArithResult<Vec<Value>> {
    let base = ctx.to_value_f64(max.get())?;
    let multiplier = ctx.pow_f64(&base, 1.0 / spread_steps(dims) as f64)?;
    let mut scales = Vec::with_capacity(dims);
    let mut current = ctx.one();
    for _ in 0..dims {
        let next = ctx.multiply(&current, &multiplier)?;
        scales.push(std::mem::replace(&mut current, next));
    }
    Ok(scales)
}

/// `T[j][i] = ±mult^i` with the sign of `(-1)^popcount(i & j)` and
/// `mult = max^(1 / (2 max(1, D - 1)))`.
fn hadamard_factor(ctx: &mut EvaluationContext, max: Float, dims: usize) -> ArithResult<Vec<Vec<Value>>> {
    let base = ctx.to_value_f64(max.get())?;
    let multiplier = ctx.pow_f64(&base, 1.0 / (2 * spread_steps(dims)) as f64)?;
    let powers = (0..dims)
        .map(|i| ctx.pow_i64(&multiplier, i as i64))
        .collect::<ArithResult<Vec<_>>>()?;
    Ok((0..dims)
        .map(|j| {
            powers
                .iter()
                .enumerate()
                .map(|(i, power)| {
                    if (i & j).count_ones() % 2 == 1 {
                        ctx.negate(power)
                    } else {
                        power.clone()
                    }
                })
                .collect()
        })
        .collect())
}

/// Entries drawn from `rng`: one draw decides the sign by its parity, the
/// next gives the magnitude.
fn random_factor(
    ctx: &EvaluationContext,
    rng: &mut impl RandomSource,
    dims: usize,
) -> Vec<Vec<Value>> {
    (0..dims)
        .map(|_| {
            (0..dims)
                .map(|_| {
                    let negative = rng.next_integer() & 1 == 1;
                    let magnitude = rng.next_integer();
                    ctx.to_value_i64(if negative { magnitude.wrapping_neg() } else { magnitude })
                })
                .collect()
        })
        .collect()
}

/// `|proj|^(2 p1) + |orth|^(2 p2)` for the projection onto `direction`.
fn single_different_direction(
    ctx: &mut EvaluationContext,
    direction: &[BigFloat],
    single_exponent: Float,
    remaining_exponent: Float,
    x: &[Value],
) -> EvalResult<Value> {
    if direction.len() != x.len() {
        return Err(dimension_mismatch(direction.len(), x.len()));
    }
    let direction: Vec<Value> = direction.iter().map(|d| ctx.to_value_big(d)).collect();
    let projection = ctx.vec_orthogonal_projection(x, &direction)?;
    let orthogonal = ctx.vec_subtract(x, &projection)?;
    let mut along = ctx.vec_squared_length(&projection)?;
    let mut across = ctx.vec_squared_length(&orthogonal)?;
    let one = Float::new(1.0);
    if single_exponent != one {
        along = ctx.pow_f64(&along, single_exponent.get())?;
    }
    if remaining_exponent != one {
        across = ctx.pow_f64(&across, remaining_exponent.get())?;
    }
    Ok(ctx.add(&along, &across)?)
}
