use std::fmt;
use std::marker::PhantomData;

use super::{check_arity, check_inputs, Predicate};
use crate::budget::capacity_words;
use crate::float::InputFloat;
use crate::rational::DynRational;
use crate::scientific::{FixedScientific, Scientific};
use crate::sign::{IntervalSign, Sign};

/// Where an [`Evaluator`] is in its current call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// No call has finished yet, or the interval filter is running.
    Filtering,
    /// The filter was ambiguous and the exact replay is running.
    ExactFallback,
    /// The last call settled on this sign.
    Resolved(Sign),
}

/// Which tier decided a sign.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Path {
    Filter,
    Exact,
    Cached,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub sign: Sign,
    pub path: Path,
}

/// Reusable two-tier evaluator for predicate `P` on inputs of type `F`.
///
/// The exact tier works in a scratch of `N`-word scientific numbers, one per
/// program slot. `N` must cover the offline budget; the aliases in
/// [`crate::budget`] pick the smallest such `N`, and anything smaller fails
/// to compile.
///
/// ```
/// use exact_predicates::budget::Orient2dF64;
/// use exact_predicates::predicates::Path;
/// use exact_predicates::Sign;
///
/// let mut orient = Orient2dF64::new();
/// let tiny = 2f64.powi(-48);
/// let resolution = orient.evaluate(&[0.5, 0.5, 12.0, 12.0, 24.0, 24.0 + tiny]);
/// assert_eq!(resolution.sign, Sign::Positive);
/// assert_eq!(resolution.path, Path::Exact);
/// ```
pub struct Evaluator<P: Predicate, F: InputFloat, const N: usize> {
    scratch: Vec<FixedScientific<N>>,
    stage: Stage,
    marker: PhantomData<fn() -> (P, F)>,
}

impl<P: Predicate, F: InputFloat, const N: usize> Evaluator<P, F, N> {
    pub fn new() -> Self {
        const {
            assert!(
                N >= capacity_words::<P, F>(),
                "evaluator word capacity is below the predicate's bit budget"
            )
        };
        log::debug!(
            "{} evaluator over {}: {} slots of {} words",
            P::KIND,
            F::NAME,
            P::PROGRAM.slots(),
            N
        );
        Self {
            scratch: vec![Scientific::zero(); P::PROGRAM.slots()],
            stage: Stage::Filtering,
            marker: PhantomData,
        }
    }

    /// Words per scratch slot.
    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Runs only the interval tier.
    pub fn filter(&self, coords: &[F]) -> IntervalSign {
        self.validate(coords);
        P::PROGRAM
            .enclose(coords.iter().map(|c| c.to_f64()))
            .sign()
    }

    /// Exact sign, reporting which tier decided it.
    ///
    /// # Panics
    ///
    /// If `coords` has the wrong length or holds NaN or an infinity.
    pub fn evaluate(&mut self, coords: &[F]) -> Resolution {
        self.stage = Stage::Filtering;
        if let Some(sign) = self.filter(coords).decided() {
            self.stage = Stage::Resolved(sign);
            return Resolution {
                sign,
                path: Path::Filter,
            };
        }
        log::trace!("{}: filter ambiguous, replaying exactly", P::KIND);
        Resolution {
            sign: self.exact_sign(coords),
            path: Path::Exact,
        }
    }

    pub fn sign(&mut self, coords: &[F]) -> Sign {
        self.evaluate(coords).sign
    }

    /// Runs only the exact tier.
    pub fn exact_sign(&mut self, coords: &[F]) -> Sign {
        self.validate(coords);
        self.stage = Stage::ExactFallback;
        for (slot, &coord) in self.scratch.iter_mut().zip(coords) {
            *slot = Scientific::try_from_float(coord).unwrap_or_else(|err| overflow::<P>(N, err));
        }
        self.replay()
    }

    /// Exact sign at cached rational coordinates. The filter is skipped.
    ///
    /// Coordinates with power-of-two denominators that an `F` could have
    /// produced load straight into the scratch. Otherwise the program runs in
    /// growable rational arithmetic.
    ///
    /// # Panics
    ///
    /// If `coords` has the wrong length.
    pub fn evaluate_cached(&mut self, coords: &[&DynRational]) -> Resolution {
        if let Err(err) = check_arity(P::KIND, coords.len()) {
            panic!("{}: {err}", P::KIND);
        }
        self.stage = Stage::ExactFallback;
        let loaded = coords.iter().zip(self.scratch.iter_mut()).all(|(coord, slot)| {
            let value = coord
                .to_scientific()
                .filter(|value| value.fits(F::PRECISION))
                .and_then(|value| value.try_convert().ok());
            match value {
                Some(value) => {
                    *slot = value;
                    true
                }
                None => false,
            }
        });
        let sign = if loaded {
            self.replay()
        } else {
            log::trace!("{}: cached inputs exceed {}, using rationals", P::KIND, F::NAME);
            let inputs: Vec<DynRational> = coords.iter().map(|&c| c.clone()).collect();
            let sign = P::PROGRAM
                .run(&inputs)
                .unwrap_or_else(|err| panic!("{}: rational evaluation failed: {err}", P::KIND))
                .sign();
            self.stage = Stage::Resolved(sign);
            sign
        };
        Resolution {
            sign,
            path: Path::Cached,
        }
    }

    pub fn sign_cached(&mut self, coords: &[&DynRational]) -> Sign {
        self.evaluate_cached(coords).sign
    }

    fn validate(&self, coords: &[F]) {
        if let Err(err) = check_inputs(P::KIND, coords) {
            panic!("{}: {err}", P::KIND);
        }
    }

    fn replay(&mut self) -> Sign {
        if let Err(err) = P::PROGRAM.replay(&mut self.scratch) {
            overflow::<P>(N, err);
        }
        let sign = self.scratch[P::PROGRAM.result().index()].sign();
        self.stage = Stage::Resolved(sign);
        sign
    }
}

/// The budget is proven for every finite input, so running out of words is
/// a defect in the budget derivation.
#[cold]
fn overflow<P: Predicate>(capacity: usize, err: impl fmt::Display) -> ! {
    panic!(
        "{} exact evaluation exceeded its {capacity}-word budget: {err}",
        P::KIND
    )
}

impl<P: Predicate, F: InputFloat, const N: usize> Default for Evaluator<P, F, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Predicate, F: InputFloat, const N: usize> fmt::Debug for Evaluator<P, F, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator")
            .field("predicate", &P::KIND)
            .field("input", &F::NAME)
            .field("words", &N)
            .field("slots", &self.scratch.len())
            .field("stage", &self.stage)
            .finish()
    }
}
