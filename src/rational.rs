//! Exact ratios of scientific numbers.
//!
//! Rationals carry coordinates that were produced exactly elsewhere (for
//! example a cached intersection point) into the predicates. Nothing here
//! divides: comparison and arithmetic cross-multiply.

use crate::error::ExactError;
use crate::extint::WordStore;
use crate::float::InputFloat;
use crate::scientific::Scientific;
use crate::sign::Sign;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// `numerator / denominator` with a positive denominator.
#[derive(Clone)]
pub struct Rational<W = Vec<u64>> {
    numerator: Scientific<W>,
    denominator: Scientific<W>,
}

/// Rational over growable words.
pub type DynRational = Rational<Vec<u64>>;

impl<W: WordStore> Rational<W> {
    /// Builds `numerator / denominator`, moving the denominator's sign to
    /// the numerator.
    pub fn try_new(
        numerator: Scientific<W>,
        denominator: Scientific<W>,
    ) -> Result<Self, ExactError> {
        match denominator.sign() {
            Sign::Zero => Err(ExactError::ZeroDenominator),
            Sign::Positive => Ok(Self {
                numerator,
                denominator,
            }),
            Sign::Negative => Ok(Self {
                numerator: numerator.negated(),
                denominator: denominator.negated(),
            }),
        }
    }

    pub fn new(numerator: Scientific<W>, denominator: Scientific<W>) -> Self {
        Self::try_new(numerator, denominator)
            .unwrap_or_else(|err| panic!("invalid rational: {err}"))
    }

    /// `value / 1`.
    pub fn from_scientific(value: Scientific<W>) -> Self {
        Self {
            numerator: value,
            denominator: num_traits::One::one(),
        }
    }

    pub fn try_from_float<F: InputFloat>(value: F) -> Result<Self, ExactError> {
        Ok(Self::from_scientific(Scientific::try_from_float(value)?))
    }

    pub fn from_float<F: InputFloat>(value: F) -> Self {
        Self::from_scientific(Scientific::from_float(value))
    }

    pub fn numerator(&self) -> &Scientific<W> {
        &self.numerator
    }

    pub fn denominator(&self) -> &Scientific<W> {
        &self.denominator
    }

    pub fn sign(&self) -> Sign {
        self.numerator.sign()
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    /// The value as a scientific number, when the denominator is a power of two.
    pub fn to_scientific(&self) -> Option<Scientific<W>> {
        let mantissa = self.denominator.mantissa().words();
        if mantissa != [1] {
            return None;
        }
        let exponent = self.numerator.exponent() - self.denominator.exponent();
        Some(Scientific::from_parts(
            self.numerator.sign(),
            self.numerator.mantissa().clone(),
            exponent,
        ))
    }

    pub fn try_add(&self, rhs: &Self) -> Result<Self, ExactError> {
        if self.denominator == rhs.denominator {
            return Ok(Self {
                numerator: self.numerator.try_add(&rhs.numerator)?,
                denominator: self.denominator.clone(),
            });
        }
        let lhs = self.numerator.try_mul(&rhs.denominator)?;
        let rhs_scaled = rhs.numerator.try_mul(&self.denominator)?;
        Ok(Self {
            numerator: lhs.try_add(&rhs_scaled)?,
            denominator: self.denominator.try_mul(&rhs.denominator)?,
        })
    }

    pub fn try_sub(&self, rhs: &Self) -> Result<Self, ExactError> {
        self.try_add(&rhs.negated())
    }

    pub fn try_mul(&self, rhs: &Self) -> Result<Self, ExactError> {
        Ok(Self {
            numerator: self.numerator.try_mul(&rhs.numerator)?,
            denominator: self.denominator.try_mul(&rhs.denominator)?,
        })
    }

    pub fn try_div(&self, rhs: &Self) -> Result<Self, ExactError> {
        Self::try_new(
            self.numerator.try_mul(&rhs.denominator)?,
            self.denominator.try_mul(&rhs.numerator)?,
        )
    }

    pub fn negated(&self) -> Self {
        Self {
            numerator: self.numerator.negated(),
            denominator: self.denominator.clone(),
        }
    }

    /// Exact comparison: `sign(p * s - r * q)` for `p/q` and `r/s`.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, ExactError> {
        if self.denominator == other.denominator {
            return Ok(self.numerator.cmp(&other.numerator));
        }
        let lhs = self.numerator.try_mul(&other.denominator)?;
        let rhs = other.numerator.try_mul(&self.denominator)?;
        Ok(lhs.cmp(&rhs))
    }

    /// Nearby `f64`, for diagnostics only.
    pub fn approx(&self) -> f64 {
        self.numerator.approx() / self.denominator.approx()
    }

    pub fn try_convert<V: WordStore>(&self) -> Result<Rational<V>, ExactError> {
        Ok(Rational {
            numerator: self.numerator.try_convert()?,
            denominator: self.denominator.try_convert()?,
        })
    }

    pub fn check_invariants(&self) -> Result<(), &'static str> {
        self.numerator.check_invariants()?;
        self.denominator.check_invariants()?;
        if self.denominator.sign() != Sign::Positive {
            return Err("rational denominator must be positive");
        }
        Ok(())
    }
}

impl<W: WordStore> Default for Rational<W> {
    fn default() -> Self {
        Self::from_scientific(Scientific::zero())
    }
}

impl<W: WordStore> From<Scientific<W>> for Rational<W> {
    fn from(value: Scientific<W>) -> Self {
        Self::from_scientific(value)
    }
}

impl From<f64> for DynRational {
    fn from(value: f64) -> Self {
        Self::from_float(value)
    }
}

impl From<f32> for DynRational {
    fn from(value: f32) -> Self {
        Self::from_float(value)
    }
}

impl From<i64> for DynRational {
    fn from(value: i64) -> Self {
        Self::from_scientific(value.into())
    }
}

impl<W: WordStore> PartialEq for Rational<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W: WordStore> Eq for Rational<W> {}

impl<W: WordStore> PartialOrd for Rational<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: WordStore> Ord for Rational<W> {
    /// Cross-multiplies in growable words, so fixed stores compare too.
    fn cmp(&self, other: &Self) -> Ordering {
        let widen = |value: &Self| -> Rational<Vec<u64>> {
            value
                .try_convert()
                .unwrap_or_else(|err| panic!("cannot widen rational: {err}"))
        };
        widen(self)
            .try_cmp(&widen(other))
            .unwrap_or_else(|err| panic!("growable rational comparison failed: {err}"))
    }
}

impl<W: WordStore> fmt::Debug for Rational<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({self})")
    }
}

impl<W: WordStore> fmt::Display for Rational<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.numerator, self.denominator)
    }
}

impl<W: WordStore> num_traits::Zero for Rational<W> {
    fn zero() -> Self {
        Self::from_scientific(Scientific::zero())
    }

    fn is_zero(&self) -> bool {
        Rational::is_zero(self)
    }
}

impl<W: WordStore> num_traits::One for Rational<W> {
    fn one() -> Self {
        Self::from_scientific(num_traits::One::one())
    }
}

macro_rules! rational_binop {
    ($trait:ident, $method:ident, $try_method:ident, $message:literal) => {
        impl<'b, W: WordStore> $trait<&'b Rational<W>> for &Rational<W> {
            type Output = Rational<W>;

            #[inline(always)]
            fn $method(self, rhs: &'b Rational<W>) -> Self::Output {
                self.$try_method(rhs)
                    .unwrap_or_else(|err| panic!(concat!($message, ": {}"), err))
            }
        }

        impl<W: WordStore> $trait for Rational<W> {
            type Output = Rational<W>;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self::Output {
                (&self).$method(&rhs)
            }
        }
    };
}

rational_binop!(Add, add, try_add, "Rational addition overflow: increase capacity");
rational_binop!(Sub, sub, try_sub, "Rational subtraction overflow: increase capacity");
rational_binop!(Mul, mul, try_mul, "Rational multiplication overflow: increase capacity");
rational_binop!(Div, div, try_div, "Rational division failed");

impl<W: WordStore> Neg for &Rational<W> {
    type Output = Rational<W>;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl<W: WordStore> Neg for Rational<W> {
    type Output = Rational<W>;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scientific::DynScientific;

    fn ratio(p: i64, q: i64) -> DynRational {
        DynRational::new(DynScientific::from(p), DynScientific::from(q))
    }

    #[test]
    fn denominator_sign_moves_to_numerator() {
        let value = ratio(3, -4);
        assert_eq!(value.sign(), Sign::Negative);
        assert_eq!(value.denominator().sign(), Sign::Positive);
        assert!(value.check_invariants().is_ok());
        assert_eq!(value, ratio(-3, 4));
    }

    #[test]
    fn zero_denominator_is_rejected() {
        let result = DynRational::try_new(DynScientific::from(1i64), DynScientific::zero());
        assert!(matches!(result, Err(ExactError::ZeroDenominator)));
    }

    #[test]
    fn comparison_cross_multiplies() {
        assert!(ratio(1, 3) < ratio(1, 2));
        assert!(ratio(-1, 3) > ratio(-1, 2));
        assert_eq!(ratio(2, 6), ratio(1, 3));
        assert!(ratio(1, 3) > DynRational::from(0.333));
    }

    #[test]
    fn arithmetic_matches_fractions() {
        let sum = &ratio(1, 3) + &ratio(1, 6);
        assert_eq!(sum, ratio(1, 2));
        let product = &ratio(2, 3) * &ratio(9, 4);
        assert_eq!(product, ratio(3, 2));
        let quotient = &ratio(1, 3) / &ratio(-2, 3);
        assert_eq!(quotient, ratio(-1, 2));
        let diff = &ratio(1, 3) - &ratio(1, 3);
        assert!(diff.is_zero());
    }

    #[test]
    fn power_of_two_denominators_become_scientific() {
        let value = ratio(3, 8);
        assert_eq!(value.to_scientific(), Some(DynScientific::from(0.375)));
        assert_eq!(ratio(1, 3).to_scientific(), None);
        assert_eq!(
            DynRational::from(-2.5).to_scientific(),
            Some(DynScientific::from(-2.5))
        );
    }
}
