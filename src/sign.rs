//! Sign results returned by the predicates and the interval filter.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;

/// Exact sign of a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum Sign {
    Negative = -1,
    Zero = 0,
    Positive = 1,
}

impl Sign {
    /// Returns `-1`, `0` or `1`.
    pub const fn to_i32(self) -> i32 {
        self as i8 as i32
    }

    pub const fn from_ordering(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Sign::Negative,
            Ordering::Equal => Sign::Zero,
            Ordering::Greater => Sign::Positive,
        }
    }

    /// The ordering of the signed value against zero.
    pub const fn to_ordering(self) -> Ordering {
        match self {
            Sign::Negative => Ordering::Less,
            Sign::Zero => Ordering::Equal,
            Sign::Positive => Ordering::Greater,
        }
    }

    /// Sign of a product of values with signs `self` and `other`.
    pub const fn product(self, other: Sign) -> Sign {
        match (self, other) {
            (Sign::Zero, _) | (_, Sign::Zero) => Sign::Zero,
            (Sign::Positive, Sign::Positive) | (Sign::Negative, Sign::Negative) => Sign::Positive,
            _ => Sign::Negative,
        }
    }

    pub const fn is_zero(self) -> bool {
        matches!(self, Sign::Zero)
    }

    pub const fn is_positive(self) -> bool {
        matches!(self, Sign::Positive)
    }

    pub const fn is_negative(self) -> bool {
        matches!(self, Sign::Negative)
    }
}

impl Neg for Sign {
    type Output = Sign;

    fn neg(self) -> Sign {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        }
    }
}

impl From<Ordering> for Sign {
    fn from(ordering: Ordering) -> Self {
        Sign::from_ordering(ordering)
    }
}

impl From<Sign> for Ordering {
    fn from(sign: Sign) -> Self {
        sign.to_ordering()
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Sign::Negative => "negative",
            Sign::Zero => "zero",
            Sign::Positive => "positive",
        };
        f.write_str(text)
    }
}

/// Classification of an interval enclosure.
///
/// `Ambiguous` means the interval touches or straddles zero. It is not a
/// zero result: the value may still be strictly positive or negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntervalSign {
    Negative,
    Positive,
    Ambiguous,
}

impl IntervalSign {
    /// The sign, when the enclosure settles it.
    pub const fn decided(self) -> Option<Sign> {
        match self {
            IntervalSign::Negative => Some(Sign::Negative),
            IntervalSign::Positive => Some(Sign::Positive),
            IntervalSign::Ambiguous => None,
        }
    }

    pub const fn is_ambiguous(self) -> bool {
        matches!(self, IntervalSign::Ambiguous)
    }
}
