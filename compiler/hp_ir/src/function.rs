//! Function Nodes
//!
//! A [`Function`] maps a position vector to one value; a
//! [`SpecificFunction`] maps it to another vector of the same length.

use std::fmt;

use hp_rng::RandomGenerator;

use crate::{ConstantEvaluation, Float, Operation, PairOp, VectorMergeOperation};

/// Vector-to-vector function, applied element-wise.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum SpecificFunction {
    Operated(Operation, Box<SpecificFunction>),
    Combine(PairOp, Box<SpecificFunction>, Box<SpecificFunction>),
    Identity,
    /// A vector of the input's length filled with the constant.
    Constant(ConstantEvaluation),
}

impl SpecificFunction {
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SpecificFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecificFunction::Operated(op, inner) => write!(f, "{op}{inner}"),
            SpecificFunction::Combine(op, left, right) => write!(f, "{op}{left}{right}"),
            SpecificFunction::Identity => f.write_str("x"),
            SpecificFunction::Constant(constant) => write!(f, "{constant}"),
        }
    }
}

/// Objective function: position vector to a single value.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Function {
    Operated(Operation, Box<Function>),
    Standard(StandardFunction),
    Combine(PairOp, Box<Function>, Box<Function>),
    Merge(VectorMergeOperation, SpecificFunction),
    Constant(ConstantEvaluation),
}

impl Function {
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Visit this node and every nested function, including those inside
    /// merge operations.
    pub fn walk(&self, visit: &mut impl FnMut(&Function)) {
        visit(self);
        match self {
            Function::Operated(_, inner) => inner.walk(visit),
            Function::Combine(_, left, right) => {
                left.walk(visit);
                right.walk(visit);
            }
            Function::Merge(VectorMergeOperation::FunctionEvaluation(inner), _) => {
                inner.walk(visit);
            }
            Function::Standard(_) | Function::Merge(..) | Function::Constant(_) => {}
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Function::Operated(op, inner) => write!(f, "{op}{inner}"),
            Function::Standard(standard) => write!(f, "{standard}"),
            Function::Combine(op, left, right) => write!(f, "{op}{left}{right}"),
            Function::Merge(merge, specific) => write!(f, "{merge}{specific}"),
            Function::Constant(constant) => write!(f, "{constant}"),
        }
    }
}

/// Direction singled out by [`StandardFunction::SingleDifferentDirection`].
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum DirectionMode {
    /// The first unit vector.
    FirstDimension,
    /// The all-ones vector.
    Diagonal,
    /// Gaussian coordinates drawn from the generator.
    Random(RandomGenerator),
}

impl DirectionMode {
    /// Numeric tag used in names.
    pub const fn tag(&self) -> u8 {
        match self {
            DirectionMode::FirstDimension => 0,
            DirectionMode::Diagonal => 1,
            DirectionMode::Random(_) => 2,
        }
    }
}

/// Default maximal scale of the scaled sphere variants.
pub const DEFAULT_SCALE_MAX: f64 = 1e6;

/// The catalogue of named benchmark functions.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum StandardFunction {
    /// Sum of each coordinate squared `k` times (`sphere` is `k = 1`).
    Norm2PowerK(i32),
    Norm1,
    NormInfinity,
    /// `sum |x| * |x|^(2^-k)`.
    Norm1Plus2PowerMinusK(i32),
    Rosenbrock,
    MovedRosenbrock,
    Rastrigin,
    Schwefel,
    Schwefel2,
    Diagonal(Float),
    SpherePlus,
    InclinedPlane,
    InclinedPlaneAsym,
    TwoCups,
    Sorting,
    Testing,
    MonoSphere,
    ScaledSphere(Float),
    HadamardRotatedSphere(Float),
    RandomPositiveDefinite(RandomGenerator),
    ScaledSphereRandom(RandomGenerator),
    SingleDifferentDirection {
        single_exponent: Float,
        remaining_exponent: Float,
        direction: DirectionMode,
    },
}

impl StandardFunction {
    /// Search space bounds used when none are overridden.
    pub fn default_bounds(&self) -> (f64, f64) {
        match self {
            StandardFunction::Rastrigin => (-5.12, 5.12),
            StandardFunction::Rosenbrock => (-30.0, 30.0),
            StandardFunction::MovedRosenbrock => (-31.0, 29.0),
            StandardFunction::Schwefel2 => (-500.0, 500.0),
            _ => (-100.0, 100.0),
        }
    }
}

impl fmt::Display for StandardFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StandardFunction::Norm2PowerK(k) if (0..=3).contains(k) => write!(f, "{}N", 1 << k),
            StandardFunction::Norm2PowerK(k) => write!(f, "2p{k}N"),
            StandardFunction::Norm1 => f.write_str("1N"),
            StandardFunction::NormInfinity => f.write_str("ooN"),
            StandardFunction::Norm1Plus2PowerMinusK(k) => write!(f, "1+2p-{k}N"),
            StandardFunction::Rosenbrock => f.write_str("Rosenbrock"),
            StandardFunction::MovedRosenbrock => f.write_str("MovedRosenbrock"),
            StandardFunction::Rastrigin => f.write_str("Rastrigin"),
            StandardFunction::Schwefel => f.write_str("Schwefel"),
            StandardFunction::Schwefel2 => f.write_str("Schw2"),
            StandardFunction::Diagonal(scale) => write!(f, "DiagV{scale}"),
            StandardFunction::SpherePlus => f.write_str("spherePlus"),
            StandardFunction::InclinedPlane => f.write_str("inclinedPlane"),
            StandardFunction::InclinedPlaneAsym => f.write_str("inclinedPlaneAsym"),
            StandardFunction::TwoCups => f.write_str("twoCups"),
            StandardFunction::Sorting => f.write_str("Sort"),
            StandardFunction::Testing => f.write_str("Test"),
            StandardFunction::MonoSphere => f.write_str("MS"),
            StandardFunction::ScaledSphere(max) => write!(f, "Sc2NV{max}"),
            StandardFunction::HadamardRotatedSphere(max) => write!(f, "ScHadRot2NV{max}"),
            StandardFunction::RandomPositiveDefinite(_) => f.write_str("RandPosDef"),
            StandardFunction::ScaledSphereRandom(_) => f.write_str("Sc2NRand"),
            StandardFunction::SingleDifferentDirection {
                single_exponent,
                remaining_exponent,
                direction,
            } => write!(
                f,
                "SinDiffDir{single_exponent}_{remaining_exponent}_{}",
                direction.tag()
            ),
        }
    }
}
