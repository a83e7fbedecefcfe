//! Conservative interval arithmetic over `f64`: the first tier of every predicate.
//!
//! Each bound is computed in round-to-nearest. The sign of its rounding error is
//! then recovered with an error-free transformation, and the bound is pushed
//! one ulp outward only when the error points that way. The enclosure stays
//! tight without touching the FPU rounding mode.

use crate::extint::WordStore;
use crate::float::{next_down, next_up, two_product, two_sum, PRODUCT_EXACT_THRESHOLD};
use crate::scientific::{DynScientific, Scientific};
use crate::sign::IntervalSign;
use std::ops::{Add, Mul, Neg, Sub};

/// A closed interval `[lo, hi]` known to contain an exact real value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    lo: f64,
    hi: f64,
}

impl Interval {
    /// Encloses every real number.
    pub const ENTIRE: Interval = Interval {
        lo: f64::NEG_INFINITY,
        hi: f64::INFINITY,
    };

    /// The degenerate interval `[x, x]`.
    #[inline(always)]
    pub const fn point(x: f64) -> Self {
        Self { lo: x, hi: x }
    }

    /// # Panics
    ///
    /// If either bound is NaN or `lo > hi`.
    pub fn new(lo: f64, hi: f64) -> Self {
        assert!(lo <= hi, "invalid interval [{lo}, {hi}]");
        Self { lo, hi }
    }

    #[inline(always)]
    pub const fn lo(&self) -> f64 {
        self.lo
    }

    #[inline(always)]
    pub const fn hi(&self) -> f64 {
        self.hi
    }

    pub fn contains(&self, x: f64) -> bool {
        self.lo <= x && x <= self.hi
    }

    /// Reports whether the exact value lies inside the enclosure.
    pub fn encloses<W: WordStore>(&self, value: &Scientific<W>) -> bool {
        let Ok(value) = value.try_convert::<Vec<u64>>() else {
            return false;
        };
        let above_lo = self.lo == f64::NEG_INFINITY
            || (self.lo.is_finite() && DynScientific::from(self.lo) <= value);
        let below_hi =
            self.hi == f64::INFINITY || (self.hi.is_finite() && value <= DynScientific::from(self.hi));
        above_lo && below_hi
    }

    /// Classifies the enclosed value. Touching zero is `Ambiguous`.
    #[inline(always)]
    pub fn sign(&self) -> IntervalSign {
        if self.lo > 0.0 {
            IntervalSign::Positive
        } else if self.hi < 0.0 {
            IntervalSign::Negative
        } else {
            IntervalSign::Ambiguous
        }
    }

    #[inline(always)]
    pub fn add(self, rhs: Self) -> Self {
        Self {
            lo: add_down(self.lo, rhs.lo),
            hi: add_up(self.hi, rhs.hi),
        }
    }

    #[inline(always)]
    pub fn sub(self, rhs: Self) -> Self {
        Self {
            lo: add_down(self.lo, -rhs.hi),
            hi: add_up(self.hi, -rhs.lo),
        }
    }

    #[inline(always)]
    pub fn mul(self, rhs: Self) -> Self {
        let corners = [
            (self.lo, rhs.lo),
            (self.lo, rhs.hi),
            (self.hi, rhs.lo),
            (self.hi, rhs.hi),
        ];
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for (a, b) in corners {
            lo = lo.min(mul_down(a, b));
            hi = hi.max(mul_up(a, b));
        }
        Self { lo, hi }
    }

    #[inline(always)]
    pub fn neg(self) -> Self {
        Self {
            lo: -self.hi,
            hi: -self.lo,
        }
    }
}

/// Lower bound of `a + b`.
#[inline(always)]
fn add_down(a: f64, b: f64) -> f64 {
    let (sum, err) = two_sum(a, b);
    if sum.is_nan() {
        return f64::NEG_INFINITY;
    }
    if sum == f64::INFINITY {
        return f64::MAX;
    }
    if sum.is_infinite() || err >= 0.0 {
        sum
    } else {
        next_down(sum)
    }
}

/// Upper bound of `a + b`.
#[inline(always)]
fn add_up(a: f64, b: f64) -> f64 {
    let (sum, err) = two_sum(a, b);
    if sum.is_nan() {
        return f64::INFINITY;
    }
    if sum == f64::NEG_INFINITY {
        return f64::MIN;
    }
    if sum.is_infinite() || err <= 0.0 {
        sum
    } else {
        next_up(sum)
    }
}

/// Lower bound of `a * b`.
#[inline(always)]
fn mul_down(a: f64, b: f64) -> f64 {
    if a == 0.0 || b == 0.0 {
        return 0.0;
    }
    let (product, err) = two_product(a, b);
    if product.is_nan() {
        return f64::NEG_INFINITY;
    }
    if product == f64::INFINITY {
        return f64::MAX;
    }
    if product.is_infinite() {
        return product;
    }
    if product.abs() < PRODUCT_EXACT_THRESHOLD || err < 0.0 {
        next_down(product)
    } else {
        product
    }
}

/// Upper bound of `a * b`.
#[inline(always)]
fn mul_up(a: f64, b: f64) -> f64 {
    if a == 0.0 || b == 0.0 {
        return 0.0;
    }
    let (product, err) = two_product(a, b);
    if product.is_nan() {
        return f64::INFINITY;
    }
    if product == f64::NEG_INFINITY {
        return f64::MIN;
    }
    if product.is_infinite() {
        return product;
    }
    if product.abs() < PRODUCT_EXACT_THRESHOLD || err > 0.0 {
        next_up(product)
    } else {
        product
    }
}

impl From<f64> for Interval {
    fn from(x: f64) -> Self {
        Interval::point(x)
    }
}

macro_rules! interval_binop {
    ($trait:ident, $method:ident) => {
        impl $trait for Interval {
            type Output = Interval;

            #[inline(always)]
            fn $method(self, rhs: Interval) -> Interval {
                Interval::$method(self, rhs)
            }
        }

        impl<'a> $trait<&'a Interval> for &Interval {
            type Output = Interval;

            #[inline(always)]
            fn $method(self, rhs: &'a Interval) -> Interval {
                Interval::$method(*self, *rhs)
            }
        }

        impl<'a> $trait<&'a Interval> for Interval {
            type Output = Interval;

            #[inline(always)]
            fn $method(self, rhs: &'a Interval) -> Interval {
                Interval::$method(self, *rhs)
            }
        }

        impl $trait<Interval> for &Interval {
            type Output = Interval;

            #[inline(always)]
            fn $method(self, rhs: Interval) -> Interval {
                Interval::$method(*self, rhs)
            }
        }
    };
}

interval_binop!(Add, add);
interval_binop!(Sub, sub);
interval_binop!(Mul, mul);

impl Neg for Interval {
    type Output = Interval;

    #[inline(always)]
    fn neg(self) -> Interval {
        Interval::neg(self)
    }
}

impl Neg for &Interval {
    type Output = Interval;

    #[inline(always)]
    fn neg(self) -> Interval {
        Interval::neg(*self)
    }
}
