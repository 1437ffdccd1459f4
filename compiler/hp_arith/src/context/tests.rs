use super::*;
use crate::value::LeakCheck;
use pretty_assertions::assert_eq;

fn ctx() -> EvaluationContext {
    EvaluationContext::new().unwrap()
}

#[test]
fn test_defaults() {
    let ctx = ctx();
    assert_eq!(ctx.precision(), 32);
    assert_eq!(ctx.initial_precision(), 32);
    assert_eq!(ctx.safety_margin(), 32);
    assert_eq!(ctx.check_mode(), CheckMode::AlwaysExceptStatistics);
    assert_eq!(ctx.check_probability(), 1.0);
    assert_eq!(ctx.output_precision(), 5);
    assert!(!ctx.is_increase_precision_recommended());
    assert!(!ctx.is_initial_precision_already_set());
}

#[test]
fn test_first_initial_precision_sets_safety_margin() {
    let mut ctx = ctx();
    ctx.set_initial_precision(100);
    assert_eq!(ctx.safety_margin(), 100);
    ctx.set_initial_precision(200);
    assert_eq!(ctx.initial_precision(), 200);
    assert_eq!(ctx.safety_margin(), 100);
}

#[test]
fn test_init_resets_everything() {
    let mut ctx = ctx();
    ctx.set_precision(512);
    ctx.set_initial_precision(64);
    ctx.set_check_mode(CheckMode::Never);
    ctx.set_output_precision(12);
    ctx.recommend_increase_precision();
    ctx.default_rng().next_integer();
    ctx.init();
    assert_eq!(ctx.config(), &PrecisionConfig::default());
    assert_eq!(ctx.precision(), 32);
    assert_eq!(ctx.default_rng(), &mut RandomGenerator::standard_fast(0));
}

#[test]
fn test_advisory_flag_is_sticky() {
    let mut ctx = ctx();
    ctx.recommend_increase_precision();
    let a = ctx.to_value_i64(3);
    let b = ctx.to_value_i64(4);
    ctx.add(&a, &b).unwrap();
    assert!(ctx.is_increase_precision_recommended());
    ctx.reset_increase_precision_recommended();
    assert!(!ctx.is_increase_precision_recommended());
}

#[test]
fn test_cancellation_raises_flag() {
    let mut ctx = ctx();
    ctx.set_precision(64);
    ctx.set_safety_margin(100);
    let a = ctx.to_value_f64(1.0).unwrap();
    let b = ctx.to_value_f64(-1.0 + 2f64.powi(-40)).unwrap();
    ctx.add(&a, &b).unwrap();
    assert!(ctx.is_increase_precision_recommended());
}

#[test]
fn test_margin_equal_to_precision_keeps_ordinary_sums_quiet() {
    let mut ctx = ctx();
    ctx.set_initial_precision(256);
    ctx.set_precision(256);
    assert_eq!(ctx.safety_margin(), 256);
    let a = ctx.to_value_f64(9.0).unwrap();
    let b = ctx.to_value_f64(16.0).unwrap();
    let sum = ctx.add(&a, &b).unwrap();
    assert_eq!(ctx.to_f64(&sum).unwrap(), 25.0);
    assert!(!ctx.is_increase_precision_recommended());

    let one = ctx.one();
    let tiny = ctx.to_value_f64(2f64.powi(-100)).unwrap();
    ctx.add(&one, &tiny).unwrap();
    assert!(ctx.is_increase_precision_recommended(), "2^-100 vanishes next to 1");
}

#[test]
fn test_well_conditioned_addition_keeps_flag_clear() {
    let mut ctx = ctx();
    ctx.set_precision(128);
    let a = ctx.to_value_f64(1.0).unwrap();
    let b = ctx.to_value_f64(2.5).unwrap();
    let sum = ctx.add(&a, &b).unwrap();
    assert_eq!(ctx.to_f64(&sum).unwrap(), 3.5);
    assert!(!ctx.is_increase_precision_recommended());
}

#[test]
fn test_default_precision_builds_numbers() {
    let mut ctx = ctx();
    assert_eq!(ctx.precision(), 32);
    let one = ctx.one();
    let ten = ctx.to_value_i64(10);
    let hundred = ctx.to_value_u64(100);
    assert_eq!(ctx.to_f64(&one).unwrap(), 1.0);
    assert_eq!(ctx.to_f64(&hundred).unwrap(), 100.0);
    let sum = ctx.add(&one, &ten).unwrap();
    assert_eq!(ctx.to_f64(&sum).unwrap(), 11.0);
    let quotient = ctx.divide(&one, &ten).unwrap();
    assert!((ctx.to_f64(&quotient).unwrap() - 0.1).abs() < 1e-9);
    assert_eq!(ctx.compare_f64(&ten, 10.0), std::cmp::Ordering::Equal);
    assert!(!ctx.is_increase_precision_recommended());
}

#[test]
fn test_nan_becomes_domain_error() {
    let ctx = ctx();
    let nan = BigFloat::from_f64(f64::NAN, 64);
    assert_eq!(
        ctx.checked("sqrt", &nan),
        Err(DomainError::NotANumber { operation: "sqrt" })
    );
    assert_eq!(
        ctx.checked("sqrt", &BigFloat::from_f64(2.0, 64)).unwrap(),
        ctx.to_value_i64(2)
    );
}

#[test]
fn test_exact_cancellation_keeps_flag_clear() {
    let mut ctx = ctx();
    let a = ctx.to_value_i64(7);
    let b = ctx.to_value_i64(-7);
    let sum = ctx.add(&a, &b).unwrap();
    assert!(sum.is_zero());
    assert!(!ctx.is_increase_precision_recommended(), "|a| == |b| is exact");

    let c = ctx.to_value_i64(0);
    ctx.add(&a, &c).unwrap();
    assert!(!ctx.is_increase_precision_recommended());
}

#[test]
fn test_check_modes() {
    let mut ctx = ctx();
    ctx.set_precision(64);
    ctx.set_safety_margin(100);
    let a = ctx.to_value_f64(1.0).unwrap();
    let b = ctx.to_value_f64(-1.0 + 2f64.powi(-40)).unwrap();

    ctx.set_check_mode(CheckMode::Never);
    ctx.add(&a, &b).unwrap();
    assert!(!ctx.is_increase_precision_recommended());

    ctx.set_check_mode(CheckMode::AlwaysExceptStatistics);
    ctx.statistics_start();
    ctx.add(&a, &b).unwrap();
    assert!(!ctx.is_increase_precision_recommended());
    ctx.statistics_end();
    ctx.add(&a, &b).unwrap();
    assert!(ctx.is_increase_precision_recommended());

    ctx.reset_increase_precision_recommended();
    ctx.set_check_mode(CheckMode::Always);
    ctx.statistics_start();
    ctx.add(&a, &b).unwrap();
    assert!(ctx.is_increase_precision_recommended());
}

#[test]
fn test_zero_probability_disables_checks() {
    let mut ctx = ctx();
    ctx.set_precision(64);
    ctx.set_check_probability(0.0);
    let a = ctx.to_value_f64(1.0).unwrap();
    let b = ctx.to_value_f64(-1.0 + 2f64.powi(-40)).unwrap();
    let before = ctx.default_rng().state();
    ctx.add(&a, &b).unwrap();
    assert!(!ctx.is_increase_precision_recommended());
    assert_eq!(ctx.default_rng().state(), before);
}

#[test]
fn test_fractional_probability_draws_from_default_source() {
    let mut ctx = ctx();
    ctx.set_precision(64);
    ctx.set_check_probability(0.5);
    let a = ctx.to_value_f64(1.0).unwrap();
    let b = ctx.to_value_f64(2.0).unwrap();
    let before = ctx.default_rng().state();
    ctx.add(&a, &b).unwrap();
    assert_ne!(ctx.default_rng().state(), before);
}

#[test]
fn test_constants_are_memoized_per_precision() {
    let mut ctx = ctx();
    ctx.set_precision(256);
    let pi_high = ctx.get_pi();
    ctx.set_precision(64);
    let pi_low = ctx.get_pi();
    let reference = ctx.to_value_f64(std::f64::consts::PI).unwrap();
    let diff = ctx.subtract(&pi_low, &reference).unwrap();
    assert!(ctx.to_f64(&diff).unwrap().abs() < 1e-15);
    assert!((ctx.to_f64(&pi_high).unwrap() - std::f64::consts::PI).abs() < 1e-15);

    let e = ctx.get_e();
    assert!((ctx.to_f64(&e).unwrap() - std::f64::consts::E).abs() < 1e-15);
}

#[test]
fn test_infinity_constants() {
    let ctx = ctx();
    assert!(ctx.get_plus_infinity().is_plus_infinity());
    assert!(ctx.get_minus_infinity().is_minus_infinity());
}

#[test]
fn test_string_conversion() {
    let mut ctx = ctx();
    ctx.set_precision(128);
    let v = ctx.to_value_str("-1.25e3").unwrap();
    assert_eq!(ctx.to_f64(&v).unwrap(), -1250.0);
    assert!(ctx.to_value_str("inf").unwrap().is_plus_infinity());
    assert!(ctx.to_value_str("-Infinity").unwrap().is_minus_infinity());
    assert!(ctx.to_value_str("nan").is_err());
    assert!(ctx.to_value_str("1.5x").is_err());
    assert_eq!(
        ctx.to_value_str("twelve"),
        Err(DomainError::Unparsable("twelve".to_string()))
    );
    assert!(ctx.to_value_f64(f64::NAN).is_err());
}

#[test]
fn test_literals_beyond_double_range_stay_finite() {
    let mut ctx = ctx();
    ctx.set_precision(128);
    let huge = ctx.to_value_str("1e400").unwrap();
    assert!(!huge.is_infinite());
    let log2 = ctx.log2_double(&huge).unwrap();
    assert!((log2 - 400.0 * std::f64::consts::LOG2_10).abs() < 1e-6, "{log2}");
    let tiny = ctx.to_value_str("-1e-400").unwrap();
    assert!(tiny.is_negative());
}

#[test]
fn test_conversions_do_not_leak() {
    let check = LeakCheck::start();
    {
        let mut ctx = ctx();
        let a = ctx.to_value_u64(u64::MAX);
        let b = ctx.to_value_i64(-5);
        let c = ctx.add(&a, &b).unwrap();
        let _pi = ctx.get_pi();
        drop(c);
    }
    assert_eq!(check.outstanding(), 0);
}
