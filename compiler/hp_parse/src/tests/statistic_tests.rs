use hp_ir::{
    ConstantEvaluation, Float, MergeAxis, Operation, PairOp, SpecificStatistic, Statistic,
    VectorMergeOperation,
};
use pretty_assertions::assert_eq;

use super::tokens;
use crate::{parse_statistic, parse_statistic_command, ParseErrorKind};

fn statistic(command: &str) -> Statistic {
    parse_statistic_command(&tokens(command)).unwrap()
}

#[test]
fn test_direct_statistics() {
    let cases = [
        ("globalBestPosition", Statistic::GlobalBestPosition),
        (
            "globalBestPositionDistanceTo1DOptimum",
            Statistic::GlobalBestPositionDistanceTo1DOptimum,
        ),
        (
            "globalBestPositionFunctionEvaluation",
            Statistic::GlobalBestPositionFunctionEvaluation,
        ),
        ("localAttractorUpdates", Statistic::LocalAttractorUpdates),
        ("globalAttractorUpdates", Statistic::GlobalAttractorUpdates),
        ("precision", Statistic::Precision),
    ];
    for (command, expected) in cases {
        assert_eq!(statistic(command), expected);
    }
    assert_eq!(
        statistic("constant 3 Pi"),
        Statistic::Constant {
            dimensions: 3,
            value: ConstantEvaluation::Pi,
        }
    );
}

#[test]
fn test_merged_statistics() {
    assert_eq!(
        statistic("merge particle arithmeticAverage position"),
        Statistic::Merge {
            axis: MergeAxis::Particle,
            operation: VectorMergeOperation::ArithmeticAverage,
            source: SpecificStatistic::Position,
        }
    );
    assert_eq!(
        statistic("merge dimension maximum absVelocityPlusDistToGlobalAttractor 0.5"),
        Statistic::Merge {
            axis: MergeAxis::Dimension,
            operation: VectorMergeOperation::Maximum,
            source: SpecificStatistic::AbsVelocityPlusDistToGlobalAttractor(Float::new(0.5)),
        }
    );
    assert_eq!(
        statistic(
            "merge particle objectiveFunctionEvaluation \
             combine - localAttractor globalAttractor"
        )
        .name(),
        "PObFuncSubLocAtGloAt"
    );
    assert_eq!(
        statistic("merge dimension sum sqrtAbsVelocityPlusSqrtDistToGlobalAttractor 2").name(),
        "DSumSqVpSqP"
    );
}

#[test]
fn test_composite_statistics() {
    assert_eq!(
        statistic("combine - globalBestPosition constant 2 1"),
        Statistic::Combine(
            PairOp::Sub,
            Box::new(Statistic::GlobalBestPosition),
            Box::new(Statistic::Constant {
                dimensions: 2,
                value: ConstantEvaluation::Number(Float::new(1.0)),
            }),
        )
    );
    assert_eq!(
        statistic("log2 merge particle minimum abs velocity"),
        Statistic::Operated(
            Operation::Log2,
            Box::new(Statistic::Merge {
                axis: MergeAxis::Particle,
                operation: VectorMergeOperation::Minimum,
                source: SpecificStatistic::Operated(
                    Operation::Abs,
                    Box::new(SpecificStatistic::Velocity)
                ),
            }),
        )
    );
    assert_eq!(
        statistic("merge dimension product functionDifference").name(),
        "DProductFD"
    );
}

#[test]
fn test_malformed_statistics() {
    let cases = [
        ("merge sideways sum position", ParseErrorKind::UnexpectedToken, 1),
        ("merge particle sum", ParseErrorKind::UnexpectedEnd, 3),
        ("merge particle sum speed", ParseErrorKind::UnexpectedToken, 3),
        ("constant 1.5 Pi", ParseErrorKind::UnexpectedToken, 1),
        ("constant 2", ParseErrorKind::UnexpectedEnd, 2),
        (
            "merge particle sum absVelocityPlusDistToGlobalAttractor",
            ParseErrorKind::UnexpectedEnd,
            4,
        ),
        ("combine max precision", ParseErrorKind::UnexpectedEnd, 3),
    ];
    for (command, kind, position) in cases {
        let error = parse_statistic(&tokens(command)).unwrap_err();
        assert_eq!((error.kind, error.position), (kind, position), "for `{command}`");
    }
}

#[test]
fn test_specific_statistic_is_not_a_statistic() {
    let error = parse_statistic(&tokens("position")).unwrap_err();
    assert_eq!(error.kind, ParseErrorKind::UnexpectedToken);
    assert_eq!(error.position, 0);
}
