//! Arbitrary-magnitude unsigned integers over pluggable word storage.

mod arith;
mod words;

pub(crate) use arith::shifted_word;
pub use words::{ArrayWords, WordStore};

use crate::error::ExactError;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Shl, Shr, Sub};

/// Unsigned integer stored as little-endian `u64` words.
///
/// The highest live word is never zero, so zero has no words at all.
#[derive(Clone, Default)]
pub struct ExtInt<W = Vec<u64>> {
    words: W,
}

/// Growable extended integer.
pub type DynInt = ExtInt<Vec<u64>>;

/// Extended integer with room for `N` words.
pub type FixedInt<const N: usize> = ExtInt<ArrayWords<N>>;

impl<W: WordStore> ExtInt<W> {
    pub fn zero() -> Self {
        Self {
            words: W::default(),
        }
    }

    pub fn try_from_u64(value: u64) -> Result<Self, ExactError> {
        Self::try_from_words(&[value])
    }

    /// Builds a value from little-endian words. Leading zero words are dropped.
    pub fn try_from_words(words: &[u64]) -> Result<Self, ExactError> {
        let len = arith::significant_len(words);
        let mut result = Self::zero();
        result.words.try_resize(len)?;
        result.words.words_mut().copy_from_slice(&words[..len]);
        Ok(result)
    }

    #[inline(always)]
    pub fn is_zero(&self) -> bool {
        self.words.is_empty()
    }

    /// Live words, least significant first.
    #[inline(always)]
    pub fn words(&self) -> &[u64] {
        self.words.words()
    }

    /// Bit length: position of the highest set bit plus one.
    #[inline(always)]
    pub fn num_bits(&self) -> usize {
        arith::bit_len(self.words())
    }

    pub fn bit(&self, index: usize) -> bool {
        self.words()
            .get(index / 64)
            .is_some_and(|word| (word >> (index % 64)) & 1 == 1)
    }

    /// Number of trailing zero bits, `None` for zero.
    pub fn trailing_zeros(&self) -> Option<usize> {
        if self.is_zero() {
            None
        } else {
            Some(arith::trailing_zeros(self.words()))
        }
    }

    pub fn try_add(&self, rhs: &Self) -> Result<Self, ExactError> {
        let len = self.words().len().max(rhs.words().len());
        let mut result = Self::zero();
        result.words.try_resize(len)?;
        let carry = arith::add_into(result.words.words_mut(), self.words(), rhs.words());
        if carry != 0 {
            result.words.try_resize(len + 1)?;
            result.words.words_mut()[len] = carry;
        }
        Ok(result)
    }

    /// `self - rhs`, failing when `rhs > self`.
    pub fn try_sub(&self, rhs: &Self) -> Result<Self, ExactError> {
        if self < rhs {
            return Err(ExactError::NegativeMagnitude);
        }
        let mut result = Self::zero();
        result.words.try_resize(self.words().len())?;
        arith::sub_into(result.words.words_mut(), self.words(), rhs.words());
        result.normalize();
        Ok(result)
    }

    pub fn try_mul(&self, rhs: &Self) -> Result<Self, ExactError> {
        if self.is_zero() || rhs.is_zero() {
            return Ok(Self::zero());
        }
        // The product is below 2^(bits(a) + bits(b)).
        let len = (self.num_bits() + rhs.num_bits()).div_ceil(64);
        let mut result = Self::zero();
        result.words.try_resize(len)?;
        arith::mul_into(result.words.words_mut(), self.words(), rhs.words());
        result.normalize();
        Ok(result)
    }

    pub fn try_shl(&self, bits: usize) -> Result<Self, ExactError> {
        if self.is_zero() {
            return Ok(Self::zero());
        }
        let len = (self.num_bits() + bits).div_ceil(64);
        let mut result = Self::zero();
        result.words.try_resize(len)?;
        arith::shl_into(result.words.words_mut(), self.words(), bits);
        Ok(result)
    }

    pub fn shr_in_place(&mut self, bits: usize) {
        arith::shr_in_place(self.words.words_mut(), bits);
        self.normalize();
    }

    pub fn shr(&self, bits: usize) -> Self {
        let mut result = self.clone();
        result.shr_in_place(bits);
        result
    }

    /// Copies the value into another storage type.
    pub fn try_convert<V: WordStore>(&self) -> Result<ExtInt<V>, ExactError> {
        ExtInt::try_from_words(self.words())
    }

    /// Verifies the internal representation is normalized.
    pub fn check_invariants(&self) -> Result<(), &'static str> {
        if self.words().last() == Some(&0) {
            return Err("extended integer has a leading zero word");
        }
        if let Some(capacity) = W::CAPACITY {
            if self.words().len() > capacity {
                return Err("extended integer exceeds its word capacity");
            }
        }
        Ok(())
    }

    fn normalize(&mut self) {
        let len = arith::significant_len(self.words());
        self.words.truncate(len);
        debug_assert!(self.check_invariants().is_ok());
    }
}

impl<W: WordStore, V: WordStore> PartialEq<ExtInt<V>> for ExtInt<W> {
    fn eq(&self, other: &ExtInt<V>) -> bool {
        self.words() == other.words()
    }
}

impl<W: WordStore> Eq for ExtInt<W> {}

impl<W: WordStore> PartialOrd for ExtInt<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: WordStore> Ord for ExtInt<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        arith::cmp_words(self.words(), other.words())
    }
}

impl<W: WordStore> fmt::LowerHex for ExtInt<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        let mut words = self.words().iter().rev();
        match words.next() {
            Some(top) => write!(f, "{top:x}")?,
            None => return f.write_str("0"),
        }
        for word in words {
            write!(f, "{word:016x}")?;
        }
        Ok(())
    }
}

impl<W: WordStore> fmt::Debug for ExtInt<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExtInt({self:#x})")
    }
}

impl From<u64> for DynInt {
    fn from(value: u64) -> Self {
        let words = if value == 0 { Vec::new() } else { vec![value] };
        Self { words }
    }
}

macro_rules! extint_binop {
    ($trait:ident, $method:ident, $try_method:ident, $message:literal) => {
        impl<'b, W: WordStore> $trait<&'b ExtInt<W>> for &ExtInt<W> {
            type Output = ExtInt<W>;

            #[inline(always)]
            fn $method(self, rhs: &'b ExtInt<W>) -> Self::Output {
                self.$try_method(rhs)
                    .unwrap_or_else(|err| panic!(concat!($message, ": {}"), err))
            }
        }

        impl<W: WordStore> $trait for ExtInt<W> {
            type Output = ExtInt<W>;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self::Output {
                (&self).$method(&rhs)
            }
        }

        impl<'b, W: WordStore> $trait<&'b ExtInt<W>> for ExtInt<W> {
            type Output = ExtInt<W>;

            #[inline(always)]
            fn $method(self, rhs: &'b ExtInt<W>) -> Self::Output {
                (&self).$method(rhs)
            }
        }

        impl<W: WordStore> $trait<ExtInt<W>> for &ExtInt<W> {
            type Output = ExtInt<W>;

            #[inline(always)]
            fn $method(self, rhs: ExtInt<W>) -> Self::Output {
                self.$method(&rhs)
            }
        }
    };
}

extint_binop!(Add, add, try_add, "ExtInt addition overflow: increase capacity");
extint_binop!(Sub, sub, try_sub, "ExtInt subtraction failed");
extint_binop!(Mul, mul, try_mul, "ExtInt multiplication overflow: increase capacity");

impl<W: WordStore> Shl<usize> for &ExtInt<W> {
    type Output = ExtInt<W>;

    fn shl(self, bits: usize) -> Self::Output {
        self.try_shl(bits)
            .unwrap_or_else(|err| panic!("ExtInt shift overflow: increase capacity: {err}"))
    }
}

impl<W: WordStore> Shl<usize> for ExtInt<W> {
    type Output = ExtInt<W>;

    fn shl(self, bits: usize) -> Self::Output {
        &self << bits
    }
}

impl<W: WordStore> Shr<usize> for &ExtInt<W> {
    type Output = ExtInt<W>;

    fn shr(self, bits: usize) -> Self::Output {
        ExtInt::shr(self, bits)
    }
}

impl<W: WordStore> Shr<usize> for ExtInt<W> {
    type Output = ExtInt<W>;

    fn shr(mut self, bits: usize) -> Self::Output {
        self.shr_in_place(bits);
        self
    }
}
