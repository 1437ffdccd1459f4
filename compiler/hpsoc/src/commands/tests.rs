use hp_rng::{RandomGenerator, RandomSource};
use pretty_assertions::assert_eq;

use super::*;
use crate::parse_options;

fn options(line: &str) -> Options {
    let args: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    parse_options(&args).unwrap()
}

#[test]
fn test_function_output() {
    let out = run_function(&options("--precision=128 --at=3,4 standard sphere")).unwrap();
    assert_eq!(out, "2N 2.50000e+01\n");

    let out = run_function(&options(
        "--precision=128 --output-precision=2 --at=3,4 pow 0.5 standard sphere",
    ))
    .unwrap();
    assert_eq!(out, "Pow0.52N 5.00e+00\n");

    let out = run_function(&options(
        "--precision=128 --at=3,4 combine + standard sphere standard norm1",
    ))
    .unwrap();
    assert_eq!(out, "Add2N1N 3.20000e+01\n");
}

#[test]
fn test_function_verify_reports_agreement() {
    let out =
        run_function(&options("--precision=128 --at=3,4 --verify standard sphere")).unwrap();
    assert_eq!(out, "2N 2.50000e+01\nverify: identical at 128 and 256 bits\n");

    let out = run_function(&options("--precision=64 --at=1 --verify exp standard norm1")).unwrap();
    let verify_line = out.lines().nth(1).unwrap();
    assert!(verify_line.starts_with("verify: "), "{out}");
    assert!(verify_line.ends_with("bits agree between 64 and 128 bits"), "{out}");
}

#[test]
fn test_function_bounds_flag() {
    let out = run_function(&options("--at=200 --bounds=infinity standard sphere")).unwrap();
    assert_eq!(out, "2N inf\n");
    let out = run_function(&options("--at=200 standard sphere")).unwrap();
    assert_eq!(out, "2N 1.00000e+04\n");
}

#[test]
fn test_cancellation_raises_the_advisory() {
    let out = run_function(&options(
        "--safety-margin=120 --at=0 combine + constant 1 constant -1.0000001",
    ))
    .unwrap();
    assert!(
        out.ends_with("warning: significant bits were lost; increase the precision\n"),
        "{out}"
    );

    let out = run_function(&options(
        "--safety-margin=120 --at=0 --check-precision=never \
         combine + constant 1 constant -1.0000001",
    ))
    .unwrap();
    assert!(!out.contains("warning:"), "{out}");
}

#[test]
fn test_well_conditioned_sums_stay_quiet() {
    for line in [
        "--precision=128 --at=3,4 standard sphere",
        "--precision=256 --at=0.1,-7,1e5 standard rastrigin",
        "--at=1,2 standard rosenbrock",
    ] {
        let out = run_function(&options(line)).unwrap();
        assert!(!out.contains("warning:"), "`{line}` printed {out}");
    }
}

#[test]
fn test_default_precision_gives_numbers() {
    let cases = [
        ("--at=1,2 standard rosenbrock", "Rosenbrock 1.00000e+02\n"),
        ("--at=3,4 standard rastrigin", "Rastrigin 2.50000e+01\n"),
        ("--at=2 pow -1 standard sphere", "Pow-12N 2.50000e-01\n"),
        ("--at=3,5 merge arithmeticAverage identity", "ArithAvx 4.00000e+00\n"),
    ];
    for (line, expected) in cases {
        assert_eq!(run_function(&options(line)).unwrap(), expected, "for `{line}`");
    }
}

#[test]
fn test_uninterpretable_command_message() {
    let error = run_function(&options("--at=1 standard spheer")).unwrap_err();
    assert_eq!(
        error.to_string(),
        "One of the specified commands in the configuration file can not be interpreted:\n\
         \"standard spheer\""
    );

    let error = run_function(&options("--at=1 standard sphere extra")).unwrap_err();
    assert!(matches!(error, CommandError::Uninterpretable { .. }));
}

#[test]
fn test_missing_point_is_a_usage_error() {
    let error = run_function(&options("standard sphere")).unwrap_err();
    assert!(matches!(error, CommandError::Usage(_)));
    let error = run_operation(&options("--at=1,2 sqrt")).unwrap_err();
    assert!(matches!(error, CommandError::Usage(_)));
}

#[test]
fn test_distance_output() {
    let out = run_distance(&options("--at=3,4 --dim=1 standard sphere")).unwrap();
    assert_eq!(out, "Dist2N 1 4.00000e+00\n");
    let error = run_distance(&options("--at=3,4 --dim=2 standard sphere")).unwrap_err();
    assert!(matches!(
        error,
        CommandError::Eval(EvalError::IndexOutOfRange { index: 2, len: 2 })
    ));
}

#[test]
fn test_operation_output() {
    let out = run_operation(&options("--precision=64 --output-precision=3 --at=2 sqrt")).unwrap();
    assert_eq!(out, "Sqrt 1.414e+00\n");
    let error = run_operation(&options("--at=-1 sqrt")).unwrap_err();
    assert!(matches!(error, CommandError::Eval(EvalError::Domain(_))));
}

#[test]
fn test_rng_output() {
    let out = run_rng(&options("--draws=3 linearCongruenceRNG 42 standard fast")).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "FLCRNG_2P63_Seed0042");
    let mut reference = RandomGenerator::standard_fast(42);
    for (draw, line) in lines[1..].iter().enumerate() {
        let expected = format!("{draw} {} ", reference.next_integer());
        assert!(line.starts_with(&expected), "{line}");
    }
}

#[test]
fn test_check_reports_name_and_consumed() {
    let cases = [
        ("function standard sphere trailing", "2N 2\n"),
        ("specific combine + identity constant 1", "Addx1 5\n"),
        ("statistic merge particle sum velocity", "PSumVel 4\n"),
        ("operation pow 3", "Pow3 2\n"),
        ("rng 7", "FLCRNG_2P63_Seed0007 1\n"),
    ];
    for (line, expected) in cases {
        assert_eq!(run_check(&options(line)).unwrap(), expected, "for `{line}`");
    }
    assert!(matches!(
        run_check(&options("formula standard sphere")).unwrap_err(),
        CommandError::Usage(_)
    ));
}
