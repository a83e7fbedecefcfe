//! Exact signed binary numbers: `sign * mantissa * 2^exponent`.
//!
//! Nothing here ever rounds. Every operation either produces the exact result
//! or reports that the word store ran out of room.

mod ops;

use crate::budget::Precision;
use crate::error::ExactError;
use crate::extint::{shifted_word, ArrayWords, ExtInt, WordStore};
use crate::float::{scale_by_power_of_two, InputFloat};
use crate::sign::Sign;
use std::cmp::Ordering;
use std::fmt;

/// An exact dyadic number.
///
/// Nonzero values keep an odd mantissa, so each value has exactly one
/// representation. Zero has an empty mantissa and exponent `0`.
#[derive(Clone)]
pub struct Scientific<W = Vec<u64>> {
    sign: Sign,
    exponent: i64,
    mantissa: ExtInt<W>,
}

/// Scientific number over growable words.
pub type DynScientific = Scientific<Vec<u64>>;

/// Scientific number whose mantissa holds at most `N` words.
pub type FixedScientific<const N: usize> = Scientific<ArrayWords<N>>;

impl<W: WordStore> Scientific<W> {
    pub fn zero() -> Self {
        Self {
            sign: Sign::Zero,
            exponent: 0,
            mantissa: ExtInt::zero(),
        }
    }

    /// Builds `sign * mantissa * 2^exponent`, folding trailing zero bits
    /// into the exponent. A zero mantissa or a zero sign gives zero.
    pub fn from_parts(sign: Sign, mantissa: ExtInt<W>, exponent: i64) -> Self {
        let mut value = Self {
            sign,
            exponent,
            mantissa,
        };
        value.normalize();
        value
    }

    /// Imports a finite float bit for bit.
    pub fn try_from_float<F: InputFloat>(value: F) -> Result<Self, ExactError> {
        if !value.is_finite() {
            return Err(ExactError::NonFinite(value.to_f64()));
        }
        let parts = value.decompose();
        let sign = if parts.negative {
            Sign::Negative
        } else {
            Sign::Positive
        };
        let mantissa = ExtInt::try_from_u64(parts.mantissa)?;
        Ok(Self::from_parts(sign, mantissa, i64::from(parts.exponent)))
    }

    /// Imports a finite float, panicking on NaN, infinities or a store too
    /// small for one word.
    pub fn from_float<F: InputFloat>(value: F) -> Self {
        Self::try_from_float(value)
            .unwrap_or_else(|err| panic!("cannot import {value} as a scientific number: {err}"))
    }

    #[inline(always)]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    #[inline(always)]
    pub fn is_zero(&self) -> bool {
        self.sign == Sign::Zero
    }

    /// Exponent of the least significant (always set) mantissa bit.
    #[inline(always)]
    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    #[inline(always)]
    pub fn mantissa(&self) -> &ExtInt<W> {
        &self.mantissa
    }

    #[inline(always)]
    pub fn num_bits(&self) -> usize {
        self.mantissa.num_bits()
    }

    /// Reports whether this value is representable by an input type of the
    /// given precision, so the offline budget covers it.
    pub fn fits(&self, precision: Precision) -> bool {
        if self.is_zero() {
            return true;
        }
        let bits = self.num_bits() as i64;
        bits <= i64::from(precision.bits)
            && self.exponent >= i64::from(precision.min_exponent)
            && self.exponent + bits <= i64::from(precision.max_exponent)
    }

    pub fn try_add(&self, rhs: &Self) -> Result<Self, ExactError> {
        self.signed_sum(rhs, rhs.sign)
    }

    pub fn try_sub(&self, rhs: &Self) -> Result<Self, ExactError> {
        self.signed_sum(rhs, -rhs.sign)
    }

    pub fn try_mul(&self, rhs: &Self) -> Result<Self, ExactError> {
        let sign = self.sign.product(rhs.sign);
        if sign == Sign::Zero {
            return Ok(Self::zero());
        }
        let mantissa = self.mantissa.try_mul(&rhs.mantissa)?;
        Ok(Self::from_parts(
            sign,
            mantissa,
            self.exponent + rhs.exponent,
        ))
    }

    pub fn negated(&self) -> Self {
        Self {
            sign: -self.sign,
            exponent: self.exponent,
            mantissa: self.mantissa.clone(),
        }
    }

    pub fn abs(&self) -> Self {
        let mut result = self.clone();
        if result.sign == Sign::Negative {
            result.sign = Sign::Positive;
        }
        result
    }

    /// Copies the value into another word store.
    pub fn try_convert<V: WordStore>(&self) -> Result<Scientific<V>, ExactError> {
        Ok(Scientific {
            sign: self.sign,
            exponent: self.exponent,
            mantissa: self.mantissa.try_convert()?,
        })
    }

    /// Nearby `f64`, for diagnostics only. Not correctly rounded.
    pub fn approx(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        let bits = self.num_bits();
        let drop = bits.saturating_sub(64);
        let top = self.mantissa.shr(drop);
        let leading = top.words().first().copied().unwrap_or(0) as f64;
        let magnitude = scale_by_power_of_two(leading, self.exponent + drop as i64);
        if self.sign == Sign::Negative {
            -magnitude
        } else {
            magnitude
        }
    }

    pub fn check_invariants(&self) -> Result<(), &'static str> {
        self.mantissa.check_invariants()?;
        match self.sign {
            Sign::Zero => {
                if !self.mantissa.is_zero() || self.exponent != 0 {
                    return Err("zero must have an empty mantissa and exponent 0");
                }
            }
            _ => {
                if !self.mantissa.bit(0) {
                    return Err("nonzero mantissa must be odd");
                }
            }
        }
        Ok(())
    }

    /// Compares magnitudes by aligning both mantissas on the lower exponent,
    /// without materializing either shift.
    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }
        let top = self.exponent + self.num_bits() as i64;
        let other_top = other.exponent + other.num_bits() as i64;
        if top != other_top {
            return top.cmp(&other_top);
        }
        let low = self.exponent.min(other.exponent);
        let shift = (self.exponent - low) as usize;
        let other_shift = (other.exponent - low) as usize;
        let len = ((top - low) as usize).div_ceil(64);
        for index in (0..len).rev() {
            let a = shifted_word(self.mantissa.words(), shift, index);
            let b = shifted_word(other.mantissa.words(), other_shift, index);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                ordering => return ordering,
            }
        }
        Ordering::Equal
    }

    /// `self + s * |rhs|` where `s` is `rhs_sign`.
    fn signed_sum(&self, rhs: &Self, rhs_sign: Sign) -> Result<Self, ExactError> {
        if rhs_sign == Sign::Zero {
            return Ok(self.clone());
        }
        if self.is_zero() {
            let mut result = rhs.clone();
            result.sign = rhs_sign;
            return Ok(result);
        }
        let (low, low_sign, high, high_sign) = if self.exponent <= rhs.exponent {
            (self, self.sign, rhs, rhs_sign)
        } else {
            (rhs, rhs_sign, self, self.sign)
        };
        let shifted = high
            .mantissa
            .try_shl((high.exponent - low.exponent) as usize)?;
        let (sign, mantissa) = if low_sign == high_sign {
            (low_sign, low.mantissa.try_add(&shifted)?)
        } else {
            match low.mantissa.cmp(&shifted) {
                Ordering::Greater => (low_sign, low.mantissa.try_sub(&shifted)?),
                Ordering::Less => (high_sign, shifted.try_sub(&low.mantissa)?),
                Ordering::Equal => return Ok(Self::zero()),
            }
        };
        Ok(Self::from_parts(sign, mantissa, low.exponent))
    }

    fn normalize(&mut self) {
        match self.mantissa.trailing_zeros() {
            Some(shift) if self.sign != Sign::Zero => {
                if shift > 0 {
                    self.mantissa.shr_in_place(shift);
                    self.exponent += shift as i64;
                }
            }
            _ => {
                self.sign = Sign::Zero;
                self.exponent = 0;
                self.mantissa = ExtInt::zero();
            }
        }
        debug_assert!(self.check_invariants().is_ok());
    }
}

impl<W: WordStore> Default for Scientific<W> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<W: WordStore> PartialEq for Scientific<W> {
    fn eq(&self, other: &Self) -> bool {
        self.sign == other.sign && self.exponent == other.exponent && self.mantissa == other.mantissa
    }
}

impl<W: WordStore> Eq for Scientific<W> {}

impl<W: WordStore> PartialOrd for Scientific<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Agrees with `(self - other).sign()` but never allocates.
impl<W: WordStore> Ord for Scientific<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.sign != other.sign {
            return self.sign.cmp(&other.sign);
        }
        match self.sign {
            Sign::Zero => Ordering::Equal,
            Sign::Positive => self.cmp_magnitude(other),
            Sign::Negative => self.cmp_magnitude(other).reverse(),
        }
    }
}

impl<W: WordStore> fmt::Debug for Scientific<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scientific({self})")
    }
}

/// Hex-float style: `-0x3p-2` is `-3 * 2^-2`.
impl<W: WordStore> fmt::Display for Scientific<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sign {
            Sign::Zero => f.write_str("0"),
            Sign::Negative => write!(f, "-{:#x}p{}", self.mantissa, self.exponent),
            Sign::Positive => write!(f, "{:#x}p{}", self.mantissa, self.exponent),
        }
    }
}

impl From<f64> for DynScientific {
    fn from(value: f64) -> Self {
        Self::from_float(value)
    }
}

impl From<f32> for DynScientific {
    fn from(value: f32) -> Self {
        Self::from_float(value)
    }
}

impl From<i64> for DynScientific {
    fn from(value: i64) -> Self {
        let sign = Sign::from_ordering(value.cmp(&0));
        Self::from_parts(sign, ExtInt::from(value.unsigned_abs()), 0)
    }
}

impl<W: WordStore> num_traits::Zero for Scientific<W> {
    fn zero() -> Self {
        Scientific::zero()
    }

    fn is_zero(&self) -> bool {
        Scientific::is_zero(self)
    }
}

impl<W: WordStore> num_traits::One for Scientific<W> {
    fn one() -> Self {
        let mantissa = ExtInt::try_from_u64(1)
            .unwrap_or_else(|err| panic!("Scientific one does not fit: {err}"));
        Self::from_parts(Sign::Positive, mantissa, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sci(value: f64) -> DynScientific {
        DynScientific::from(value)
    }

    #[test]
    fn import_is_normalized() {
        let value = sci(12.0);
        assert_eq!(value.mantissa().words(), &[3]);
        assert_eq!(value.exponent(), 2);
        assert_eq!(value.sign(), Sign::Positive);
        assert!(sci(0.0).is_zero());
        assert!(sci(-0.0).is_zero());
        assert_eq!(sci(-0.0).exponent(), 0);
    }

    #[test]
    fn non_finite_import_is_rejected() {
        assert_eq!(
            DynScientific::try_from_float(f64::NAN).map(|_| ()).unwrap_err().to_string(),
            "non-finite input NaN"
        );
        assert!(DynScientific::try_from_float(f32::INFINITY).is_err());
    }

    #[test]
    fn addition_aligns_exponents() {
        let sum = &sci(1.0e16) + &sci(1.0);
        assert_eq!(sum, DynScientific::from(10_000_000_000_000_001i64));
        assert_eq!(sum.exponent(), 0);
    }

    #[test]
    fn opposite_signs_cancel_to_canonical_zero() {
        let a = sci(0.1);
        let zero = &a - &a;
        assert!(zero.is_zero());
        assert_eq!(zero, DynScientific::zero());
        assert!(zero.check_invariants().is_ok());
    }

    #[test]
    fn subtraction_picks_the_larger_magnitude_sign() {
        let diff = &sci(0.25) - &sci(3.0);
        assert_eq!(diff, sci(-2.75));
        let diff = &sci(-3.0) - &sci(-0.25);
        assert_eq!(diff, sci(-2.75));
    }

    #[test]
    fn product_of_extremes_is_exact() {
        let tiny = sci(f64::from_bits(1));
        let product = &tiny * &sci(f64::MAX);
        assert_eq!(product.exponent(), -1074 + 971);
        assert_eq!(product.num_bits(), 53);
        assert_eq!(product.approx(), f64::MAX * f64::from_bits(1));
    }

    #[test]
    fn ordering_uses_alignment() {
        let mut values = vec![sci(3.0), sci(-0.5), sci(0.0), sci(2.5), sci(-7.0), sci(3.0)];
        values.sort();
        let approx: Vec<f64> = values.iter().map(Scientific::approx).collect();
        assert_eq!(approx, vec![-7.0, -0.5, 0.0, 2.5, 3.0, 3.0]);
        assert!(sci(1.0 + f64::EPSILON) > sci(1.0));
        assert!(sci(1.5) > sci(1.25));
    }

    #[test]
    fn fits_input_precision() {
        assert!(sci(f64::MAX).fits(<f64 as InputFloat>::PRECISION));
        assert!(sci(f64::from_bits(1)).fits(<f64 as InputFloat>::PRECISION));
        assert!(!sci(f64::MAX).fits(<f32 as InputFloat>::PRECISION));
        let wide = &sci(1.0) + &sci(f64::EPSILON * f64::EPSILON);
        assert!(!wide.fits(<f64 as InputFloat>::PRECISION));
    }

    #[test]
    fn fixed_capacity_overflow_is_reported() {
        let a = FixedScientific::<1>::from_float(1.0 + f64::EPSILON);
        assert!(matches!(
            a.try_mul(&a),
            Err(ExactError::CapacityExceeded { .. })
        ));
        let b = FixedScientific::<1>::from_float(3.0);
        assert_eq!(b.try_mul(&b).unwrap().approx(), 9.0);
    }

    #[test]
    fn display_is_hex_float() {
        assert_eq!(sci(-0.75).to_string(), "-0x3p-2");
        assert_eq!(sci(0.0).to_string(), "0");
    }
}
