//! Vector merge operations: reduce a vector of values to one value.

use std::fmt;

use crate::Function;

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum VectorMergeOperation {
    /// Element at an index.
    Specific(i32),
    /// Element at an index after sorting ascending.
    IncreasingOrderNth(i32),
    ArithmeticAverage,
    /// `product^(1/n)`.
    GeometricAverage,
    Sum,
    Product,
    Maximum,
    Minimum,
    FunctionEvaluation(Box<Function>),
    /// The swarm's objective function applied to the vector.
    ObjectiveFunctionEvaluation,
}

impl VectorMergeOperation {
    pub fn from_keyword(keyword: &str) -> Option<VectorMergeOperation> {
        match keyword {
            "arithmeticAverage" => Some(VectorMergeOperation::ArithmeticAverage),
            "geometricAverage" => Some(VectorMergeOperation::GeometricAverage),
            "sum" => Some(VectorMergeOperation::Sum),
            "product" => Some(VectorMergeOperation::Product),
            "maximum" => Some(VectorMergeOperation::Maximum),
            "minimum" => Some(VectorMergeOperation::Minimum),
            "objectiveFunctionEvaluation" => Some(VectorMergeOperation::ObjectiveFunctionEvaluation),
            _ => None,
        }
    }
}

impl fmt::Display for VectorMergeOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorMergeOperation::Specific(index) => write!(f, "Id{index}"),
            VectorMergeOperation::IncreasingOrderNth(index) => write!(f, "Id{index}Sorted"),
            VectorMergeOperation::ArithmeticAverage => f.write_str("ArithAv"),
            VectorMergeOperation::GeometricAverage => f.write_str("GeomAv"),
            VectorMergeOperation::Sum => f.write_str("Sum"),
            VectorMergeOperation::Product => f.write_str("Product"),
            VectorMergeOperation::Maximum => f.write_str("Max"),
            VectorMergeOperation::Minimum => f.write_str("Min"),
            VectorMergeOperation::FunctionEvaluation(function) => write!(f, "FuncEval{function}"),
            VectorMergeOperation::ObjectiveFunctionEvaluation => f.write_str("ObFunc"),
        }
    }
}
