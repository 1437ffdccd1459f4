//! Scalar Operations and Constants
//!
//! Leaves shared by every node category: unary operations that wrap a
//! subtree, pair combinations that join two subtrees, and constants.

use std::fmt;

use crate::Float;

/// Unary operation applied to every value a subtree produces.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Operation {
    Sqrt,
    Pow(Float),
    Log2,
    /// `log2` computed in double precision. Not allowed inside a function.
    Log2Double,
    Abs,
    Exp,
    Sin,
    Cos,
    Tan,
    Arcsin,
    Arccos,
    Arctan,
    LogE,
}

impl Operation {
    /// Keywords of the operations that take no parameter.
    pub const PLAIN: [(&'static str, Operation); 12] = [
        ("sqrt", Operation::Sqrt),
        ("log2", Operation::Log2),
        ("log2dbl", Operation::Log2Double),
        ("abs", Operation::Abs),
        ("exp", Operation::Exp),
        ("sin", Operation::Sin),
        ("cos", Operation::Cos),
        ("tan", Operation::Tan),
        ("arcsin", Operation::Arcsin),
        ("arccos", Operation::Arccos),
        ("arctan", Operation::Arctan),
        ("logE", Operation::LogE),
    ];

    pub fn from_keyword(keyword: &str) -> Option<Operation> {
        Self::PLAIN
            .iter()
            .find(|(name, _)| *name == keyword)
            .map(|&(_, op)| op)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Sqrt => f.write_str("Sqrt"),
            Operation::Pow(exponent) => write!(f, "Pow{exponent}"),
            Operation::Log2 => f.write_str("Log2"),
            Operation::Log2Double => f.write_str("Log2dbl"),
            Operation::Abs => f.write_str("Abs"),
            Operation::Exp => f.write_str("Exp"),
            Operation::Sin => f.write_str("Sin"),
            Operation::Cos => f.write_str("Cos"),
            Operation::Tan => f.write_str("Tan"),
            Operation::Arcsin => f.write_str("Arcsin"),
            Operation::Arccos => f.write_str("Arccos"),
            Operation::Arctan => f.write_str("Arctan"),
            Operation::LogE => f.write_str("LogE"),
        }
    }
}

/// Binary operation joining two subtrees element by element.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PairOp {
    Add,
    Sub,
    Mul,
    Div,
    Min,
    Max,
}

impl PairOp {
    pub fn from_keyword(keyword: &str) -> Option<PairOp> {
        match keyword {
            "+" => Some(PairOp::Add),
            "-" => Some(PairOp::Sub),
            "*" => Some(PairOp::Mul),
            "/" => Some(PairOp::Div),
            "min" => Some(PairOp::Min),
            "max" => Some(PairOp::Max),
            _ => None,
        }
    }

    pub const fn as_symbol(self) -> &'static str {
        match self {
            PairOp::Add => "+",
            PairOp::Sub => "-",
            PairOp::Mul => "*",
            PairOp::Div => "/",
            PairOp::Min => "min",
            PairOp::Max => "max",
        }
    }
}

impl fmt::Display for PairOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PairOp::Add => "Add",
            PairOp::Sub => "Sub",
            PairOp::Mul => "Mul",
            PairOp::Div => "Div",
            PairOp::Min => "Min",
            PairOp::Max => "Max",
        })
    }
}

/// A constant, evaluated at the working precision.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ConstantEvaluation {
    E,
    Pi,
    PlusInfinity,
    MinusInfinity,
    Number(Float),
}

impl ConstantEvaluation {
    pub fn from_keyword(keyword: &str) -> Option<ConstantEvaluation> {
        match keyword {
            "E" => Some(ConstantEvaluation::E),
            "Pi" => Some(ConstantEvaluation::Pi),
            "plusInfinity" => Some(ConstantEvaluation::PlusInfinity),
            "minusInfinity" => Some(ConstantEvaluation::MinusInfinity),
            _ => None,
        }
    }
}

impl fmt::Display for ConstantEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantEvaluation::E => f.write_str("E"),
            ConstantEvaluation::Pi => f.write_str("Pi"),
            ConstantEvaluation::PlusInfinity => f.write_str("oo"),
            ConstantEvaluation::MinusInfinity => f.write_str("-oo"),
            ConstantEvaluation::Number(value) => write!(f, "{value}"),
        }
    }
}
