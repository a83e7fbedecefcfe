use exact_predicates::rational::Rational;
use exact_predicates::scientific::{FixedScientific, Scientific};
use exact_predicates::{DynRational, DynScientific, Sign};
use ntest::timeout;
use num_bigint::{BigInt, Sign as BigSign};
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use quickcheck::{QuickCheck, TestResult};
use quickcheck_macros::quickcheck;

const QC_TESTS: u64 = 500;
const QC_MAX_TESTS: u64 = 20_000;

fn big_of(value: &DynScientific) -> BigRational {
    let magnitude = value
        .mantissa()
        .words()
        .iter()
        .rev()
        .fold(BigInt::zero(), |acc, &w| (acc << 64u32) + BigInt::from(w));
    let signed = match value.sign() {
        Sign::Negative => -magnitude,
        _ => magnitude,
    };
    let exponent = value.exponent();
    let scale = BigInt::one() << exponent.unsigned_abs();
    if exponent >= 0 {
        BigRational::from_integer(signed * scale)
    } else {
        BigRational::new(signed, scale)
    }
}

fn big_sign(value: &BigRational) -> Sign {
    match value.numer().sign() {
        BigSign::Plus => Sign::Positive,
        BigSign::Minus => Sign::Negative,
        BigSign::NoSign => Sign::Zero,
    }
}

fn exact(x: f64) -> BigRational {
    BigRational::from_float(x).expect("finite")
}

fn run_qc(prop: fn(f64, f64) -> TestResult) {
    QuickCheck::new()
        .tests(QC_TESTS)
        .max_tests(QC_MAX_TESTS)
        .quickcheck(prop);
}

fn property_arithmetic(a: f64, b: f64) -> TestResult {
    if !a.is_finite() || !b.is_finite() {
        return TestResult::discard();
    }
    let x = DynScientific::from(a);
    let y = DynScientific::from(b);
    let (ea, eb) = (exact(a), exact(b));
    let sum = &x + &y;
    let difference = &x - &y;
    let product = &x * &y;
    TestResult::from_bool(
        big_of(&x) == ea
            && big_of(&sum) == &ea + &eb
            && big_of(&difference) == &ea - &eb
            && big_of(&product) == &ea * &eb
            && sum.check_invariants().is_ok()
            && difference.check_invariants().is_ok()
            && product.check_invariants().is_ok(),
    )
}

#[test]
#[timeout(5000)]
fn quickcheck_arithmetic_matches_bigrational() {
    run_qc(property_arithmetic);
}

#[test]
fn property_handles_far_apart_operands() {
    assert!(!property_arithmetic(1.0, 2f64.powi(-54)).is_failure());
    assert!(!property_arithmetic(f64::MAX, -f64::from_bits(1)).is_failure());
}

#[quickcheck]
fn quickcheck_negation_cancels(x: f64) -> TestResult {
    if !x.is_finite() {
        return TestResult::discard();
    }
    let value = DynScientific::from(x);
    let negated = value.negated();
    TestResult::from_bool(
        negated.sign() == -value.sign() && (&value + &negated).is_zero() && value.abs() >= value,
    )
}

fn property_ordering(a: f64, b: f64) -> TestResult {
    if !a.is_finite() || !b.is_finite() {
        return TestResult::discard();
    }
    let x = DynScientific::from(a);
    let y = DynScientific::from(b);
    let expected = exact(a).cmp(&exact(b));
    TestResult::from_bool(
        x.cmp(&y) == expected && Sign::from_ordering(expected) == (&x - &y).sign(),
    )
}

#[test]
#[timeout(5000)]
fn quickcheck_ordering_matches_difference_sign() {
    run_qc(property_ordering);
}

fn property_fixed_agrees_with_growable(a: f64, b: f64) -> TestResult {
    if !a.is_finite() || !b.is_finite() {
        return TestResult::discard();
    }
    let x: FixedScientific<40> = Scientific::from_float(a);
    let y: FixedScientific<40> = Scientific::from_float(b);
    let dyn_product = DynScientific::from(a) * DynScientific::from(b);
    let dyn_sum = DynScientific::from(a) + DynScientific::from(b);
    let fixed_product: DynScientific = (&x * &y).try_convert().expect("growable store");
    let fixed_sum: DynScientific = (&x + &y).try_convert().expect("growable store");
    TestResult::from_bool(fixed_product == dyn_product && fixed_sum == dyn_sum)
}

#[test]
#[timeout(5000)]
fn quickcheck_fixed_agrees_with_growable() {
    run_qc(property_fixed_agrees_with_growable);
}

fn property_rational_ordering(a: f64, b: f64, c: u8, d: u8) -> TestResult {
    if !a.is_finite() || !b.is_finite() || c == 0 || d == 0 {
        return TestResult::discard();
    }
    let p = DynRational::from(a) / DynRational::from(i64::from(c));
    let q = DynRational::from(b) / DynRational::from(i64::from(d));
    let bp = exact(a) / BigRational::from_integer(BigInt::from(c));
    let bq = exact(b) / BigRational::from_integer(BigInt::from(d));
    let difference = &p - &q;
    TestResult::from_bool(
        p.cmp(&q) == bp.cmp(&bq)
            && difference.sign() == big_sign(&(&bp - &bq))
            && difference.check_invariants().is_ok(),
    )
}

#[test]
#[timeout(5000)]
fn quickcheck_rational_ordering_matches_bigrational() {
    QuickCheck::new()
        .tests(QC_TESTS)
        .max_tests(QC_MAX_TESTS)
        .quickcheck(property_rational_ordering as fn(f64, f64, u8, u8) -> TestResult);
}

#[test]
fn extreme_magnitudes_are_exact() {
    let max = DynScientific::from(f64::MAX);
    let min = DynScientific::from(f64::from_bits(1));
    let product = &max * &min;
    assert_eq!(big_of(&product), exact(f64::MAX) * exact(f64::from_bits(1)));
    let sum = &max + &min;
    assert!(sum > max);
    assert_eq!(&sum - &max, min);
    assert_eq!(big_of(&(&max - &max)), BigRational::zero());
}

#[test]
fn rounding_error_of_a_sum_is_visible() {
    let a = DynScientific::from(0.1);
    let b = DynScientific::from(0.2);
    let c = DynScientific::from(0.30000000000000004);
    let residue = &(&a + &b) - &c;
    // The rounded f64 sum sits above the exact one.
    assert_eq!(residue.sign(), Sign::Negative);
    assert!(big_of(&residue).is_negative());
    assert!((&a - &a).is_zero());
}

#[test]
fn rational_thirds_compare_exactly() {
    let third = DynRational::new(1i64.into(), 3i64.into());
    let sum = &(&third + &third) + &third;
    assert_eq!(sum, DynRational::from(1i64));
    assert!(third.to_scientific().is_none());
    assert_eq!(
        DynRational::from(0.75).to_scientific(),
        Some(DynScientific::from(0.75))
    );
    assert!(Rational::from_float(0.3333333333333333) < third);
}
