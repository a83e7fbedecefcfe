//! Offline bit budgets for the exact fallback.
//!
//! Every value that can appear in a predicate program is an integer multiple
//! of a power of two. A [`Precision`] bounds such a value from three sides:
//!
//! - `min_exponent`: the lowest possible exponent of its least significant bit;
//! - `max_exponent`: an exclusive bound on `log2 |v|`, so `|v| < 2^max_exponent`;
//! - `bits`: the widest odd mantissa it can carry.
//!
//! The rules that push a bound through one operation are:
//!
//! | op | `max_exponent` | `min_exponent` | `bits` |
//! |---|---|---|---|
//! | `a ± b` | `max(a, b) + 1` | `min(a, b)` | `max_exponent - min_exponent` |
//! | `a * b` | `a + b` | `a + b` | `min(a.bits + b.bits, max_exponent - min_exponent)` |
//!
//! For a sum, the aligned operands and the result all fit between the lowest
//! LSB and the carry bit. For a product, the mantissas multiply. Folding
//! these rules over a [`Program`](crate::program::Program) from the
//! input type's precision gives a bound for every slot. The largest slot,
//! rounded up to 64-bit words, is the scratch capacity. That number is a
//! property of the (predicate, input type) pair, so it is fixed at
//! compile time below and [`Evaluator::new`](crate::predicates::Evaluator::new)
//! refuses to build with a smaller capacity.
//!
//! Worked example, `orient2d` over `f64` (53 bits, LSB exponent >= -1074,
//! magnitude < 2^1024):
//!
//! ```text
//! ax - cx            max 1025  min -1074  bits 2099
//! (..) * (..)        max 2050  min -2148  bits 4198
//! (..) - (..)        max 2051  min -2148  bits 4199   -> 66 words
//! ```

use crate::float::InputFloat;
use crate::predicates::{
    CmpDist, Det2, Det3, Det4, Evaluator, InCircle, InSphere, Orient2d, Orient2dDirection,
    Orient3d, Predicate,
};

/// Static bound on the values a program slot can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Precision {
    pub bits: u32,
    pub min_exponent: i32,
    pub max_exponent: i32,
}

impl Precision {
    pub const ZERO: Precision = Precision::new(0, 0, 0);

    pub const fn new(bits: u32, min_exponent: i32, max_exponent: i32) -> Self {
        Self {
            bits,
            min_exponent,
            max_exponent,
        }
    }

    /// Bound for `self ± rhs`.
    pub const fn add(self, rhs: Self) -> Self {
        let max_exponent = max_i32(self.max_exponent, rhs.max_exponent) + 1;
        let min_exponent = min_i32(self.min_exponent, rhs.min_exponent);
        Self::new(
            (max_exponent - min_exponent) as u32,
            min_exponent,
            max_exponent,
        )
    }

    /// Bound for `self * rhs`.
    pub const fn mul(self, rhs: Self) -> Self {
        let max_exponent = self.max_exponent + rhs.max_exponent;
        let min_exponent = self.min_exponent + rhs.min_exponent;
        let span = (max_exponent - min_exponent) as u32;
        let product_bits = self.bits + rhs.bits;
        let bits = if product_bits < span {
            product_bits
        } else {
            span
        };
        Self::new(bits, min_exponent, max_exponent)
    }

    /// 64-bit words needed to hold a mantissa of this width.
    pub const fn words(self) -> usize {
        (self.bits as usize).div_ceil(64)
    }
}

const fn max_i32(a: i32, b: i32) -> i32 {
    if a > b { a } else { b }
}

const fn min_i32(a: i32, b: i32) -> i32 {
    if a < b { a } else { b }
}

/// Scratch words required by predicate `P` on inputs of type `F`.
pub const fn capacity_words<P: Predicate, F: InputFloat>() -> usize {
    P::PROGRAM.capacity_words(F::PRECISION)
}

macro_rules! budget_table {
    ($($(#[$doc:meta])* $alias:ident, $words:ident => $pred:ty, $float:ty;)*) => {
        $(
            #[doc = concat!("Scratch capacity, in words, of [`", stringify!($alias), "`].")]
            pub const $words: usize = capacity_words::<$pred, $float>();

            $(#[$doc])*
            pub type $alias = Evaluator<$pred, $float, { $words }>;
        )*
    };
}

budget_table! {
    /// Orientation / colinearity / point-vs-line evaluator over `f64`.
    Orient2dF64, ORIENT2D_F64_WORDS => Orient2d, f64;
    /// Orientation / colinearity / point-vs-line evaluator over `f32`.
    Orient2dF32, ORIENT2D_F32_WORDS => Orient2d, f32;
    Orient2dDirectionF64, ORIENT2D_DIRECTION_F64_WORDS => Orient2dDirection, f64;
    Orient2dDirectionF32, ORIENT2D_DIRECTION_F32_WORDS => Orient2dDirection, f32;
    /// Point-vs-plane evaluator over `f64`.
    Orient3dF64, ORIENT3D_F64_WORDS => Orient3d, f64;
    /// Point-vs-plane evaluator over `f32`.
    Orient3dF32, ORIENT3D_F32_WORDS => Orient3d, f32;
    Det2F64, DET2_F64_WORDS => Det2, f64;
    Det2F32, DET2_F32_WORDS => Det2, f32;
    Det3F64, DET3_F64_WORDS => Det3, f64;
    Det3F32, DET3_F32_WORDS => Det3, f32;
    Det4F64, DET4_F64_WORDS => Det4, f64;
    Det4F32, DET4_F32_WORDS => Det4, f32;
    InCircleF64, INCIRCLE_F64_WORDS => InCircle, f64;
    InCircleF32, INCIRCLE_F32_WORDS => InCircle, f32;
    /// Point-vs-circumsphere evaluator over `f64`.
    InSphereF64, INSPHERE_F64_WORDS => InSphere, f64;
    /// Point-vs-circumsphere evaluator over `f32`.
    InSphereF32, INSPHERE_F32_WORDS => InSphere, f32;
    CmpDistF64, CMP_DIST_F64_WORDS => CmpDist, f64;
    CmpDistF32, CMP_DIST_F32_WORDS => CmpDist, f32;
}
