use super::*;
use hp_rng::RandomGenerator;
use pretty_assertions::assert_eq;

fn sphere() -> Function {
    Function::Standard(StandardFunction::Norm2PowerK(1))
}

#[test]
fn test_standard_names() {
    let cases = [
        (StandardFunction::Norm2PowerK(1), "2N"),
        (StandardFunction::Norm2PowerK(3), "8N"),
        (StandardFunction::Norm2PowerK(5), "2p5N"),
        (StandardFunction::Norm1Plus2PowerMinusK(2), "1+2p-2N"),
        (StandardFunction::Diagonal(Float::new(0.5)), "DiagV0.5"),
        (StandardFunction::ScaledSphere(Float::new(DEFAULT_SCALE_MAX)), "Sc2NV1e+06"),
        (StandardFunction::Schwefel2, "Schw2"),
        (
            StandardFunction::RandomPositiveDefinite(RandomGenerator::standard_fast(1)),
            "RandPosDef",
        ),
        (
            StandardFunction::SingleDifferentDirection {
                single_exponent: Float::new(1.0),
                remaining_exponent: Float::new(2.5),
                direction: DirectionMode::Diagonal,
            },
            "SinDiffDir1_2.5_1",
        ),
    ];
    for (function, expected) in cases {
        assert_eq!(function.to_string(), expected);
    }
}

#[test]
fn test_composite_function_names() {
    let combined = Function::Combine(
        PairOp::Add,
        Box::new(sphere()),
        Box::new(Function::Standard(StandardFunction::Norm1)),
    );
    assert_eq!(combined.name(), "Add2N1N");

    let operated = Function::Operated(Operation::Pow(Float::new(0.5)), Box::new(sphere()));
    assert_eq!(operated.name(), "Pow0.52N");

    let merged = Function::Merge(
        VectorMergeOperation::Sum,
        SpecificFunction::Operated(Operation::Abs, Box::new(SpecificFunction::Identity)),
    );
    assert_eq!(merged.name(), "SumAbsx");

    let constant = Function::Constant(ConstantEvaluation::MinusInfinity);
    assert_eq!(constant.name(), "-oo");
}

#[test]
fn test_statistic_names() {
    let merged = Statistic::Merge {
        axis: MergeAxis::Particle,
        operation: VectorMergeOperation::IncreasingOrderNth(2),
        source: SpecificStatistic::AbsVelocityPlusDistToGlobalAttractor(Float::new(2.0)),
    };
    assert_eq!(merged.name(), "PId2SortedVpG2");

    let combined = Statistic::Combine(
        PairOp::Div,
        Box::new(Statistic::Operated(
            Operation::Log2,
            Box::new(Statistic::GlobalBestPositionFunctionEvaluation),
        )),
        Box::new(Statistic::Precision),
    );
    assert_eq!(combined.name(), "DivLog2GlBestFuncValuePrec");

    let evaluated = VectorMergeOperation::FunctionEvaluation(Box::new(sphere()));
    assert_eq!(evaluated.to_string(), "FuncEval2N");
}

#[test]
fn test_keyword_tables() {
    assert_eq!(Operation::from_keyword("logE"), Some(Operation::LogE));
    assert_eq!(Operation::from_keyword("pow"), None);
    assert_eq!(PairOp::from_keyword("max"), Some(PairOp::Max));
    assert_eq!(PairOp::from_keyword("min").map(PairOp::as_symbol), Some("min"));
    assert_eq!(ConstantEvaluation::from_keyword("Pi"), Some(ConstantEvaluation::Pi));
    assert_eq!(ConstantEvaluation::from_keyword("pi"), None);
    assert_eq!(
        Statistic::from_keyword("precision"),
        Some(Statistic::Precision)
    );
    assert_eq!(
        SpecificStatistic::from_keyword("velocity"),
        Some(SpecificStatistic::Velocity)
    );
}

#[test]
fn test_walk_visits_nested_functions() {
    let nested = Function::Combine(
        PairOp::Mul,
        Box::new(Function::Operated(Operation::Sqrt, Box::new(sphere()))),
        Box::new(Function::Merge(
            VectorMergeOperation::FunctionEvaluation(Box::new(Function::Standard(
                StandardFunction::Rastrigin,
            ))),
            SpecificFunction::Identity,
        )),
    );
    let mut standard = Vec::new();
    nested.walk(&mut |f| {
        if let Function::Standard(s) = f {
            standard.push(s.to_string());
        }
    });
    assert_eq!(standard, vec!["2N".to_string(), "Rastrigin".to_string()]);
}

#[test]
fn test_default_bounds() {
    assert_eq!(StandardFunction::Rastrigin.default_bounds(), (-5.12, 5.12));
    assert_eq!(StandardFunction::MovedRosenbrock.default_bounds(), (-31.0, 29.0));
    assert_eq!(StandardFunction::Norm1.default_bounds(), (-100.0, 100.0));
}

#[test]
fn test_nodes_hash_structurally() {
    use std::collections::HashSet;
    let mut seen = HashSet::new();
    assert!(seen.insert(sphere()));
    assert!(!seen.insert(sphere()));
    assert!(seen.insert(Function::Standard(StandardFunction::Diagonal(Float::new(1.0)))));
}
