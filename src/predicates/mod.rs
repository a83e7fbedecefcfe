//! Exact sign predicates.
//!
//! Every predicate runs in two tiers. The program is first replayed over
//! [`Interval`](crate::interval::Interval)s; if the enclosure excludes zero
//! its sign is the answer. Otherwise the inputs are imported exactly and the
//! same program is replayed over [`Scientific`](crate::scientific::Scientific)
//! numbers, whose result sign is authoritative.
//!
//! [`sign`] and [`sign_cached`] are one-shot entry points. An [`Evaluator`]
//! keeps a fixed-capacity scratch and reuses it across calls.

mod evaluator;
mod programs;

pub use evaluator::{Evaluator, Path, Resolution, Stage};
pub use programs::{
    CmpDist, Det2, Det3, Det4, InCircle, InSphere, Orient2d, Orient2dDirection, Orient3d,
};

use crate::error::ExactError;
use crate::float::InputFloat;
use crate::program::Program;
use crate::rational::DynRational;
use crate::scientific::DynScientific;
use crate::sign::Sign;
use std::fmt;

/// The predicate polynomials this crate decides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PredicateKind {
    Orient2d,
    Orient2dDirection,
    Orient3d,
    Det2,
    Det3,
    Det4,
    InCircle,
    InSphere,
    CmpDist,
}

impl PredicateKind {
    pub const ALL: [PredicateKind; 9] = [
        PredicateKind::Orient2d,
        PredicateKind::Orient2dDirection,
        PredicateKind::Orient3d,
        PredicateKind::Det2,
        PredicateKind::Det3,
        PredicateKind::Det4,
        PredicateKind::InCircle,
        PredicateKind::InSphere,
        PredicateKind::CmpDist,
    ];

    pub fn program(self) -> &'static Program {
        match self {
            PredicateKind::Orient2d => &programs::ORIENT2D,
            PredicateKind::Orient2dDirection => &programs::ORIENT2D_DIRECTION,
            PredicateKind::Orient3d => &programs::ORIENT3D,
            PredicateKind::Det2 => &programs::DET2,
            PredicateKind::Det3 => &programs::DET3,
            PredicateKind::Det4 => &programs::DET4,
            PredicateKind::InCircle => &programs::INCIRCLE,
            PredicateKind::InSphere => &programs::INSPHERE,
            PredicateKind::CmpDist => &programs::CMP_DIST,
        }
    }

    /// Number of coordinates the predicate reads.
    pub fn inputs(self) -> usize {
        self.program().inputs()
    }

    pub const fn name(self) -> &'static str {
        match self {
            PredicateKind::Orient2d => "orient2d",
            PredicateKind::Orient2dDirection => "orient2d_direction",
            PredicateKind::Orient3d => "orient3d",
            PredicateKind::Det2 => "det2",
            PredicateKind::Det3 => "det3",
            PredicateKind::Det4 => "det4",
            PredicateKind::InCircle => "incircle",
            PredicateKind::InSphere => "insphere",
            PredicateKind::CmpDist => "cmp_dist",
        }
    }
}

impl fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A predicate with a compile-time program, used to size [`Evaluator`]s.
pub trait Predicate: 'static {
    const KIND: PredicateKind;
    const PROGRAM: Program;
}

pub(crate) fn check_arity(kind: PredicateKind, found: usize) -> Result<(), ExactError> {
    let expected = kind.inputs();
    if expected != found {
        return Err(ExactError::ArityMismatch { expected, found });
    }
    Ok(())
}

pub(crate) fn check_inputs<F: InputFloat>(
    kind: PredicateKind,
    coords: &[F],
) -> Result<(), ExactError> {
    check_arity(kind, coords.len())?;
    match coords.iter().find(|c| !c.is_finite()) {
        Some(bad) => Err(ExactError::NonFinite(bad.to_f64())),
        None => Ok(()),
    }
}

/// Exact sign of `kind` at `coords`, or an error for the wrong arity or a
/// non-finite coordinate.
pub fn try_sign<F: InputFloat>(kind: PredicateKind, coords: &[F]) -> Result<Sign, ExactError> {
    check_inputs(kind, coords)?;
    let program = kind.program();
    let enclosure = program.enclose(coords.iter().map(|c| c.to_f64()));
    if let Some(sign) = enclosure.sign().decided() {
        return Ok(sign);
    }
    log::trace!(
        "{kind}: filter ambiguous on [{}, {}], evaluating exactly",
        enclosure.lo(),
        enclosure.hi()
    );
    let inputs = coords
        .iter()
        .map(|&c| DynScientific::try_from_float(c))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(program.run(&inputs)?.sign())
}

/// Exact sign of `kind` at `coords`.
///
/// # Panics
///
/// If `coords` has the wrong length or holds NaN or an infinity.
pub fn sign<F: InputFloat>(kind: PredicateKind, coords: &[F]) -> Sign {
    try_sign(kind, coords).unwrap_or_else(|err| panic!("{kind}: {err}"))
}

/// Exact sign of `kind` at cached rational coordinates. The filter is
/// skipped. Power-of-two denominators are evaluated as scientific numbers,
/// anything else in rational arithmetic.
pub fn try_sign_cached(kind: PredicateKind, coords: &[&DynRational]) -> Result<Sign, ExactError> {
    check_arity(kind, coords.len())?;
    let program = kind.program();
    let dyadic = coords
        .iter()
        .map(|c| c.to_scientific())
        .collect::<Option<Vec<_>>>();
    match dyadic {
        Some(inputs) => Ok(program.run(&inputs)?.sign()),
        None => {
            log::trace!("{kind}: general rational inputs, evaluating in rational arithmetic");
            let inputs: Vec<DynRational> = coords.iter().map(|&c| c.clone()).collect();
            Ok(program.run(&inputs)?.sign())
        }
    }
}

/// Exact sign of `kind` at cached rational coordinates.
///
/// # Panics
///
/// If `coords` has the wrong length.
pub fn sign_cached(kind: PredicateKind, coords: &[&DynRational]) -> Sign {
    try_sign_cached(kind, coords).unwrap_or_else(|err| panic!("{kind}: {err}"))
}
