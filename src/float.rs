//! IEEE-754 helpers shared by the interval filter and the exact importers.

use crate::budget::Precision;
use std::fmt::{Debug, Display};

/// Exact sum `a + b = sum + err` (Knuth's TWO-SUM), valid whenever `sum` is finite.
#[inline]
pub(crate) fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let sum = a + b;
    let b_virtual = sum - a;
    let a_virtual = sum - b_virtual;
    let b_roundoff = b - b_virtual;
    let a_roundoff = a - a_virtual;
    let err = a_roundoff + b_roundoff;
    (sum, err)
}

/// Product with the rounding error recovered through a fused multiply-add.
///
/// The error term is exact unless the product lies in the underflow range
/// (see [`PRODUCT_EXACT_THRESHOLD`]); its sign is always correct or zero.
#[inline]
pub(crate) fn two_product(a: f64, b: f64) -> (f64, f64) {
    let product = a * b;
    let err = a.mul_add(b, -product);
    (product, err)
}

/// Products smaller than this may have an inexact FMA error term.
pub(crate) const PRODUCT_EXACT_THRESHOLD: f64 = f64::MIN_POSITIVE * (1u64 << 54) as f64;

/// Smallest float strictly greater than `x`.
#[inline]
pub(crate) fn next_up(x: f64) -> f64 {
    if x.is_nan() || x == f64::INFINITY {
        return x;
    }
    if x == 0.0 {
        return f64::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

/// Largest float strictly less than `x`.
#[inline]
pub(crate) fn next_down(x: f64) -> f64 {
    -next_up(-x)
}

/// Computes `x * 2^exponent`, stepping in chunks so intermediate powers never
/// overflow or flush to zero before the final scale.
pub(crate) fn scale_by_power_of_two(mut x: f64, mut exponent: i64) -> f64 {
    let up = 2f64.powi(1000);
    let down = 2f64.powi(-1000);
    while exponent > 1000 && x.is_finite() && x != 0.0 {
        x *= up;
        exponent -= 1000;
    }
    while exponent < -1000 && x != 0.0 {
        x *= down;
        exponent += 1000;
    }
    x * 2f64.powi(exponent as i32)
}

/// A finite float split into its exact integer parts:
/// `value = (-1)^negative * mantissa * 2^exponent`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decomposed {
    pub negative: bool,
    pub mantissa: u64,
    pub exponent: i32,
}

mod private {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Floating-point types accepted as predicate inputs.
///
/// Each type carries the [`Precision`] of its finite values, which selects
/// the row of the offline capacity table.
pub trait InputFloat:
    Copy + PartialOrd + Debug + Display + Send + Sync + 'static + private::Sealed
{
    /// Mantissa width and exponent range of every finite value of the type.
    const PRECISION: Precision;
    const NAME: &'static str;
    const ZERO: Self;

    /// Exact widening conversion.
    fn to_f64(self) -> f64;

    fn is_finite(self) -> bool;

    /// Splits a finite value into sign, integer mantissa and exponent.
    /// The result for non-finite input is meaningless.
    fn decompose(self) -> Decomposed;
}

impl InputFloat for f64 {
    const PRECISION: Precision = Precision::new(53, -1074, 1024);
    const NAME: &'static str = "f64";
    const ZERO: Self = 0.0;

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }

    fn decompose(self) -> Decomposed {
        let bits = self.to_bits();
        let negative = bits >> 63 == 1;
        let biased = ((bits >> 52) & 0x7ff) as i32;
        let fraction = bits & ((1u64 << 52) - 1);
        if biased == 0 {
            Decomposed {
                negative,
                mantissa: fraction,
                exponent: -1074,
            }
        } else {
            Decomposed {
                negative,
                mantissa: fraction | (1u64 << 52),
                exponent: biased - 1075,
            }
        }
    }
}

impl InputFloat for f32 {
    const PRECISION: Precision = Precision::new(24, -149, 128);
    const NAME: &'static str = "f32";
    const ZERO: Self = 0.0;

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }

    fn decompose(self) -> Decomposed {
        let bits = self.to_bits();
        let negative = bits >> 31 == 1;
        let biased = ((bits >> 23) & 0xff) as i32;
        let fraction = u64::from(bits & ((1u32 << 23) - 1));
        if biased == 0 {
            Decomposed {
                negative,
                mantissa: fraction,
                exponent: -149,
            }
        } else {
            Decomposed {
                negative,
                mantissa: fraction | (1u64 << 23),
                exponent: biased - 150,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recompose(d: Decomposed) -> f64 {
        let magnitude = scale_by_power_of_two(d.mantissa as f64, i64::from(d.exponent));
        if d.negative { -magnitude } else { magnitude }
    }

    #[test]
    fn decompose_round_trips_edge_values() {
        for value in [
            1.0,
            -1.5,
            0.1,
            f64::MAX,
            f64::MIN_POSITIVE,
            f64::from_bits(1),
            -f64::from_bits(0x000f_ffff_ffff_ffff),
            123456789.0e-300,
        ] {
            assert_eq!(recompose(value.decompose()), value, "value {value:e}");
        }
    }

    #[test]
    fn decompose_f32_subnormal() {
        let tiny = f32::from_bits(3);
        let d = tiny.decompose();
        assert_eq!(d.mantissa, 3);
        assert_eq!(d.exponent, -149);
        assert_eq!(recompose(d), f64::from(tiny));
    }

    #[test]
    fn next_up_and_down_step_one_ulp() {
        assert_eq!(next_up(1.0), 1.0 + f64::EPSILON);
        assert_eq!(next_down(1.0), 1.0 - f64::EPSILON / 2.0);
        assert_eq!(next_up(0.0), f64::from_bits(1));
        assert_eq!(next_down(0.0), -f64::from_bits(1));
        assert_eq!(next_up(f64::MAX), f64::INFINITY);
        assert_eq!(next_up(f64::NEG_INFINITY), f64::MIN);
    }

    #[test]
    fn two_product_error_is_exact() {
        let a = 1.0 + f64::EPSILON;
        let (p, e) = two_product(a, a);
        assert_eq!(p, 1.0 + 2.0 * f64::EPSILON);
        assert_eq!(e, f64::EPSILON * f64::EPSILON);
    }

    #[test]
    fn two_sum_recovers_lost_bits() {
        let (s, e) = two_sum(1.0e16, 1.0);
        assert_eq!(s, 1.0e16);
        assert_eq!(e, 1.0);
    }
}
