//! Statistic Nodes
//!
//! A [`SpecificStatistic`] produces a particles × dimensions matrix from a
//! swarm snapshot; a [`Statistic`] produces a vector.

use std::fmt;

use crate::{ConstantEvaluation, Float, Operation, PairOp, VectorMergeOperation};

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum SpecificStatistic {
    Combine(PairOp, Box<SpecificStatistic>, Box<SpecificStatistic>),
    Operated(Operation, Box<SpecificStatistic>),
    Position,
    Velocity,
    LocalAttractor,
    GlobalAttractor,
    /// `|f(x) - f(x + v_d e_d)|` per particle and dimension.
    FunctionDifference,
    /// `s * |v| + |x - g|`.
    AbsVelocityPlusDistToGlobalAttractor(Float),
    /// `s * sqrt|v| + sqrt|x - g|`.
    SqrtAbsVelocityPlusSqrtDistToGlobalAttractor(Float),
    Constant(ConstantEvaluation),
}

impl SpecificStatistic {
    pub fn from_keyword(keyword: &str) -> Option<SpecificStatistic> {
        match keyword {
            "position" => Some(SpecificStatistic::Position),
            "velocity" => Some(SpecificStatistic::Velocity),
            "localAttractor" => Some(SpecificStatistic::LocalAttractor),
            "globalAttractor" => Some(SpecificStatistic::GlobalAttractor),
            "functionDifference" => Some(SpecificStatistic::FunctionDifference),
            _ => None,
        }
    }
}

impl fmt::Display for SpecificStatistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecificStatistic::Combine(op, left, right) => write!(f, "{op}{left}{right}"),
            SpecificStatistic::Operated(op, inner) => write!(f, "{op}{inner}"),
            SpecificStatistic::Position => f.write_str("Pos"),
            SpecificStatistic::Velocity => f.write_str("Vel"),
            SpecificStatistic::LocalAttractor => f.write_str("LocAt"),
            SpecificStatistic::GlobalAttractor => f.write_str("GloAt"),
            SpecificStatistic::FunctionDifference => f.write_str("FD"),
            SpecificStatistic::AbsVelocityPlusDistToGlobalAttractor(scale) => {
                write!(f, "VpG{scale}")
            }
            SpecificStatistic::SqrtAbsVelocityPlusSqrtDistToGlobalAttractor(_) => {
                f.write_str("SqVpSqP")
            }
            SpecificStatistic::Constant(constant) => write!(f, "{constant}"),
        }
    }
}

/// Which axis of a specific statistic's matrix a merge reduces.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MergeAxis {
    /// Reduce over particles: one value per dimension.
    Particle,
    /// Reduce over dimensions: one value per particle.
    Dimension,
}

impl fmt::Display for MergeAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MergeAxis::Particle => "P",
            MergeAxis::Dimension => "D",
        })
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Statistic {
    Combine(PairOp, Box<Statistic>, Box<Statistic>),
    Operated(Operation, Box<Statistic>),
    Merge {
        axis: MergeAxis,
        operation: VectorMergeOperation,
        source: SpecificStatistic,
    },
    GlobalBestPosition,
    GlobalBestPositionDistanceTo1DOptimum,
    GlobalBestPositionFunctionEvaluation,
    LocalAttractorUpdates,
    GlobalAttractorUpdates,
    /// The working precision in bits.
    Precision,
    Constant {
        dimensions: i32,
        value: ConstantEvaluation,
    },
}

impl Statistic {
    pub fn name(&self) -> String {
        self.to_string()
    }

    pub fn from_keyword(keyword: &str) -> Option<Statistic> {
        match keyword {
            "globalBestPosition" => Some(Statistic::GlobalBestPosition),
            "globalBestPositionDistanceTo1DOptimum" => {
                Some(Statistic::GlobalBestPositionDistanceTo1DOptimum)
            }
            "globalBestPositionFunctionEvaluation" => {
                Some(Statistic::GlobalBestPositionFunctionEvaluation)
            }
            "localAttractorUpdates" => Some(Statistic::LocalAttractorUpdates),
            "globalAttractorUpdates" => Some(Statistic::GlobalAttractorUpdates),
            "precision" => Some(Statistic::Precision),
            _ => None,
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statistic::Combine(op, left, right) => write!(f, "{op}{left}{right}"),
            Statistic::Operated(op, inner) => write!(f, "{op}{inner}"),
            Statistic::Merge {
                axis,
                operation,
                source,
            } => write!(f, "{axis}{operation}{source}"),
            Statistic::GlobalBestPosition => f.write_str("GlBest"),
            Statistic::GlobalBestPositionDistanceTo1DOptimum => f.write_str("GlBestDistTo1DOpt"),
            Statistic::GlobalBestPositionFunctionEvaluation => f.write_str("GlBestFuncValue"),
            Statistic::LocalAttractorUpdates => f.write_str("LocAttUpd"),
            Statistic::GlobalAttractorUpdates => f.write_str("GloAttUpd"),
            Statistic::Precision => f.write_str("Prec"),
            Statistic::Constant { value, .. } => write!(f, "{value}"),
        }
    }
}
