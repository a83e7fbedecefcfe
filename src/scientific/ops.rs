use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::Scientific;
use crate::extint::WordStore;

macro_rules! scientific_binop {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $try_method:ident, $message:literal) => {
        impl<'b, W: WordStore> $trait<&'b Scientific<W>> for &Scientific<W> {
            type Output = Scientific<W>;

            #[inline(always)]
            fn $method(self, rhs: &'b Scientific<W>) -> Self::Output {
                self.$try_method(rhs)
                    .unwrap_or_else(|err| panic!(concat!($message, ": {}"), err))
            }
        }

        impl<W: WordStore> $trait for Scientific<W> {
            type Output = Scientific<W>;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self::Output {
                (&self).$method(&rhs)
            }
        }

        impl<'b, W: WordStore> $trait<&'b Scientific<W>> for Scientific<W> {
            type Output = Scientific<W>;

            #[inline(always)]
            fn $method(self, rhs: &'b Scientific<W>) -> Self::Output {
                (&self).$method(rhs)
            }
        }

        impl<W: WordStore> $trait<Scientific<W>> for &Scientific<W> {
            type Output = Scientific<W>;

            #[inline(always)]
            fn $method(self, rhs: Scientific<W>) -> Self::Output {
                self.$method(&rhs)
            }
        }

        impl<W: WordStore> $assign_trait<&Scientific<W>> for Scientific<W> {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: &Scientific<W>) {
                *self = (&*self).$method(rhs);
            }
        }

        impl<W: WordStore> $assign_trait for Scientific<W> {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: Self) {
                self.$assign_method(&rhs);
            }
        }
    };
}

scientific_binop!(
    Add,
    add,
    AddAssign,
    add_assign,
    try_add,
    "Scientific addition overflow: increase capacity"
);
scientific_binop!(
    Sub,
    sub,
    SubAssign,
    sub_assign,
    try_sub,
    "Scientific subtraction overflow: increase capacity"
);
scientific_binop!(
    Mul,
    mul,
    MulAssign,
    mul_assign,
    try_mul,
    "Scientific multiplication overflow: increase capacity"
);

impl<W: WordStore> Neg for Scientific<W> {
    type Output = Scientific<W>;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl<W: WordStore> Neg for &Scientific<W> {
    type Output = Scientific<W>;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        self.negated()
    }
}

#[cfg(test)]
mod tests {
    use crate::scientific::{DynScientific, FixedScientific};

    #[test]
    fn compound_assignment() {
        let mut acc = DynScientific::from(1.5);
        acc += DynScientific::from(2.0);
        acc *= &DynScientific::from(-2.0);
        acc -= DynScientific::from(0.5);
        assert_eq!(acc, DynScientific::from(-7.5));
        assert_eq!(-acc, DynScientific::from(7.5));
    }

    #[test]
    #[should_panic(expected = "Scientific multiplication overflow: increase capacity")]
    fn fixed_overflow_panics() {
        let a = FixedScientific::<1>::from_float(1.0 + f64::EPSILON);
        let _ = &a * &a;
    }
}
