use exact_predicates::interval::Interval;
use exact_predicates::{DynScientific, IntervalSign, PredicateKind};
use ntest::timeout;
use quickcheck::{QuickCheck, TestResult};

const QC_TESTS: u64 = 500;
const QC_MAX_TESTS: u64 = 20_000;

const LCG_A: u64 = 6364136223846793005;
const LCG_C: u64 = 1;

fn lcg_step(state: &mut u64) -> u64 {
    *state = state.wrapping_mul(LCG_A).wrapping_add(LCG_C);
    *state >> 32
}

fn lcg_next(state: &mut u64) -> f64 {
    let val = (lcg_step(state) as f64) / (u32::MAX as f64);
    (val * 2.0) - 1.0
}

fn property_single_ops_enclose(a: f64, b: f64) -> TestResult {
    if !a.is_finite() || !b.is_finite() {
        return TestResult::discard();
    }
    let (x, y) = (Interval::point(a), Interval::point(b));
    let (ea, eb) = (DynScientific::from(a), DynScientific::from(b));
    TestResult::from_bool(
        (x + y).encloses(&(&ea + &eb))
            && (x - y).encloses(&(&ea - &eb))
            && (x * y).encloses(&(&ea * &eb)),
    )
}

#[test]
#[timeout(5000)]
fn quickcheck_single_ops_enclose_exact_results() {
    QuickCheck::new()
        .tests(QC_TESTS)
        .max_tests(QC_MAX_TESTS)
        .quickcheck(property_single_ops_enclose as fn(f64, f64) -> TestResult);
}

/// Coordinates drawn from a scale that varies per seed, including scales
/// where products overflow or underflow.
fn scaled_coords(kind: PredicateKind, seed: &mut u64) -> Vec<f64> {
    const SCALES: [f64; 7] = [1.0, 1.0e-3, 1.0e3, 1.0e100, 1.0e-100, 1.0e200, 1.0e-300];
    let scale = SCALES[(lcg_step(seed) as usize) % SCALES.len()];
    let snap = lcg_step(seed) % 2 == 0;
    (0..kind.inputs())
        .map(|_| {
            let x = lcg_next(seed) * 4.0;
            if snap { x.round() * scale } else { x * scale }
        })
        .collect()
}

fn property_program_enclosure(seed: u64) -> TestResult {
    let mut state = seed;
    let kind = PredicateKind::ALL[(seed % PredicateKind::ALL.len() as u64) as usize];
    let coords = scaled_coords(kind, &mut state);
    let program = kind.program();
    let enclosure = program.enclose(coords.iter().copied());
    let inputs: Vec<DynScientific> = coords.iter().map(|&c| DynScientific::from(c)).collect();
    let exact = match program.run(&inputs) {
        Ok(value) => value,
        Err(_) => return TestResult::failed(),
    };
    let sign_ok = match enclosure.sign().decided() {
        Some(sign) => sign == exact.sign(),
        None => true,
    };
    TestResult::from_bool(enclosure.encloses(&exact) && sign_ok)
}

#[test]
#[timeout(20000)]
fn quickcheck_program_enclosure_contains_exact_value() {
    QuickCheck::new()
        .tests(QC_TESTS)
        .max_tests(QC_MAX_TESTS)
        .quickcheck(property_program_enclosure as fn(u64) -> TestResult);
}

#[test]
fn exact_zero_is_never_decided() {
    let colinear = [0.0, 0.0, 1.0, 1.0, 3.0, 3.0];
    let enclosure = PredicateKind::Orient2d.program().enclose(colinear);
    assert_eq!(enclosure.sign(), IntervalSign::Ambiguous);
    assert!(enclosure.contains(0.0));
}

#[test]
fn classification_needs_strict_separation() {
    assert_eq!(Interval::new(1.0, 2.0).sign(), IntervalSign::Positive);
    assert_eq!(Interval::new(-2.0, -1.0).sign(), IntervalSign::Negative);
    assert_eq!(Interval::new(0.0, 2.0).sign(), IntervalSign::Ambiguous);
    assert_eq!(Interval::new(-2.0, 0.0).sign(), IntervalSign::Ambiguous);
    assert_eq!(Interval::ENTIRE.sign(), IntervalSign::Ambiguous);
}

#[test]
fn overflowing_products_widen_to_infinity() {
    let big = Interval::point(f64::MAX);
    let product = big * big;
    assert_eq!(product.hi(), f64::INFINITY);
    assert_eq!(product.lo(), f64::MAX);
    assert_eq!(product.sign(), IntervalSign::Positive);
}

#[test]
fn underflowing_products_straddle_zero() {
    let tiny = Interval::point(f64::from_bits(1));
    let exact = DynScientific::from(f64::from_bits(1));
    for product in [tiny * tiny, -tiny * tiny] {
        assert!(product.lo() < 0.0 && product.hi() > 0.0);
        assert_eq!(product.sign(), IntervalSign::Ambiguous);
    }
    assert!((tiny * tiny).encloses(&(&exact * &exact)));
}
