//! Straight-line expression programs.
//!
//! A predicate polynomial is written once as a [`Program`]: a list of
//! `Add`/`Sub`/`Mul` ops in SSA form over numbered slots. Slots
//! `0..inputs` hold the coordinates, op `i` writes slot `inputs + i`, and
//! the last slot is the result. The interval filter, the fixed-capacity exact
//! path and the rational path all replay the same program, and
//! [`crate::budget`] folds precision bounds over it at compile time.
//!
//! Programs are built in `const` context:
//!
//! ```
//! use exact_predicates::program::{Program, ProgramBuilder};
//!
//! const CROSS: Program = {
//!     let mut b = ProgramBuilder::new();
//!     let [ux, uy, vx, vy] = b.inputs::<4>();
//!     let l = b.mul(ux, vy);
//!     let r = b.mul(uy, vx);
//!     b.sub(l, r);
//!     b.finish()
//! };
//! assert_eq!(CROSS.inputs(), 4);
//! assert_eq!(CROSS.slots(), 7);
//! ```

use crate::budget::Precision;
use crate::error::ExactError;
use crate::extint::WordStore;
use crate::interval::Interval;
use crate::rational::Rational;
use crate::scientific::Scientific;
use std::convert::Infallible;

pub const MAX_INPUTS: usize = 16;
pub const MAX_OPS: usize = 128;
pub const MAX_SLOTS: usize = MAX_INPUTS + MAX_OPS;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
    Add,
    Sub,
    Mul,
}

/// Index of a value in a program's scratch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(u16);

impl Slot {
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Op {
    pub kind: OpKind,
    pub lhs: Slot,
    pub rhs: Slot,
}

impl Op {
    const NOP: Op = Op {
        kind: OpKind::Add,
        lhs: Slot(0),
        rhs: Slot(0),
    };
}

#[derive(Clone, Copy, Debug)]
pub struct Program {
    inputs: usize,
    len: usize,
    ops: [Op; MAX_OPS],
}

impl Program {
    /// Number of coordinates the program reads.
    #[inline(always)]
    pub const fn inputs(&self) -> usize {
        self.inputs
    }

    /// Number of scratch slots: inputs plus one per op.
    #[inline(always)]
    pub const fn slots(&self) -> usize {
        self.inputs + self.len
    }

    #[inline(always)]
    pub const fn result(&self) -> Slot {
        Slot((self.slots() - 1) as u16)
    }

    #[inline(always)]
    pub const fn ops(&self) -> &[Op] {
        self.ops.split_at(self.len).0
    }

    /// Precision bound of every slot when each input has precision `input`.
    /// Entries past [`Program::slots`] are [`Precision::ZERO`].
    pub const fn precisions(&self, input: Precision) -> [Precision; MAX_SLOTS] {
        let mut out = [Precision::ZERO; MAX_SLOTS];
        let mut i = 0;
        while i < self.inputs {
            out[i] = input;
            i += 1;
        }
        let mut j = 0;
        while j < self.len {
            let op = self.ops[j];
            let lhs = out[op.lhs.index()];
            let rhs = out[op.rhs.index()];
            out[self.inputs + j] = match op.kind {
                OpKind::Add | OpKind::Sub => lhs.add(rhs),
                OpKind::Mul => lhs.mul(rhs),
            };
            j += 1;
        }
        out
    }

    pub const fn result_precision(&self, input: Precision) -> Precision {
        self.precisions(input)[self.slots() - 1]
    }

    /// Words needed by the widest slot.
    pub const fn capacity_words(&self, input: Precision) -> usize {
        let precisions = self.precisions(input);
        let mut words = 0;
        let mut i = 0;
        while i < self.slots() {
            let slot_words = precisions[i].words();
            if slot_words > words {
                words = slot_words;
            }
            i += 1;
        }
        words
    }

    /// Replays the ops over `scratch`, whose first [`Program::inputs`] slots
    /// must already hold the inputs.
    pub fn replay<T: Evaluate>(&self, scratch: &mut [T]) -> Result<(), T::Error> {
        debug_assert!(scratch.len() >= self.slots());
        for (i, op) in self.ops().iter().enumerate() {
            let (done, rest) = scratch.split_at_mut(self.inputs + i);
            rest[0] = T::apply(op.kind, &done[op.lhs.index()], &done[op.rhs.index()])?;
        }
        Ok(())
    }

    /// Evaluates the program on `inputs`, allocating a fresh scratch.
    pub fn run<T: Evaluate + Clone + Default>(&self, inputs: &[T]) -> Result<T, T::Error> {
        assert_eq!(inputs.len(), self.inputs, "program arity mismatch");
        let mut scratch = Vec::with_capacity(self.slots());
        scratch.extend_from_slice(inputs);
        scratch.resize(self.slots(), T::default());
        self.replay(&mut scratch)?;
        Ok(scratch.swap_remove(self.result().index()))
    }

    /// Interval replay on the stack.
    pub fn enclose(&self, inputs: impl IntoIterator<Item = f64>) -> Interval {
        let mut scratch = [Interval::point(0.0); MAX_SLOTS];
        for (slot, x) in scratch.iter_mut().zip(inputs).take(self.inputs) {
            *slot = Interval::point(x);
        }
        match self.replay(&mut scratch[..self.slots()]) {
            Ok(()) => scratch[self.result().index()],
            Err(never) => match never {},
        }
    }
}

/// Number types a [`Program`] can be replayed over.
pub trait Evaluate: Sized {
    type Error;

    fn apply(kind: OpKind, lhs: &Self, rhs: &Self) -> Result<Self, Self::Error>;
}

impl Evaluate for Interval {
    type Error = Infallible;

    #[inline(always)]
    fn apply(kind: OpKind, lhs: &Self, rhs: &Self) -> Result<Self, Infallible> {
        Ok(match kind {
            OpKind::Add => lhs.add(*rhs),
            OpKind::Sub => lhs.sub(*rhs),
            OpKind::Mul => lhs.mul(*rhs),
        })
    }
}

impl<W: WordStore> Evaluate for Scientific<W> {
    type Error = ExactError;

    #[inline(always)]
    fn apply(kind: OpKind, lhs: &Self, rhs: &Self) -> Result<Self, ExactError> {
        match kind {
            OpKind::Add => lhs.try_add(rhs),
            OpKind::Sub => lhs.try_sub(rhs),
            OpKind::Mul => lhs.try_mul(rhs),
        }
    }
}

impl<W: WordStore> Evaluate for Rational<W> {
    type Error = ExactError;

    fn apply(kind: OpKind, lhs: &Self, rhs: &Self) -> Result<Self, ExactError> {
        match kind {
            OpKind::Add => lhs.try_add(rhs),
            OpKind::Sub => lhs.try_sub(rhs),
            OpKind::Mul => lhs.try_mul(rhs),
        }
    }
}

/// Const builder for [`Program`]s.
pub struct ProgramBuilder {
    program: Program,
}

impl ProgramBuilder {
    pub const fn new() -> Self {
        Self {
            program: Program {
                inputs: 0,
                len: 0,
                ops: [Op::NOP; MAX_OPS],
            },
        }
    }

    /// Declares the `K` input slots. Must be called once, before any op.
    pub const fn inputs<const K: usize>(&mut self) -> [Slot; K] {
        assert!(self.program.inputs == 0, "inputs declared twice");
        assert!(self.program.len == 0, "inputs must be declared before ops");
        assert!(K > 0 && K <= MAX_INPUTS, "input count out of range");
        self.program.inputs = K;
        let mut slots = [Slot(0); K];
        let mut i = 0;
        while i < K {
            slots[i] = Slot(i as u16);
            i += 1;
        }
        slots
    }

    pub const fn add(&mut self, lhs: Slot, rhs: Slot) -> Slot {
        self.push(OpKind::Add, lhs, rhs)
    }

    pub const fn sub(&mut self, lhs: Slot, rhs: Slot) -> Slot {
        self.push(OpKind::Sub, lhs, rhs)
    }

    pub const fn mul(&mut self, lhs: Slot, rhs: Slot) -> Slot {
        self.push(OpKind::Mul, lhs, rhs)
    }

    pub const fn square(&mut self, x: Slot) -> Slot {
        self.push(OpKind::Mul, x, x)
    }

    pub const fn finish(self) -> Program {
        assert!(self.program.inputs > 0, "program has no inputs");
        assert!(self.program.len > 0, "program has no ops");
        self.program
    }

    const fn push(&mut self, kind: OpKind, lhs: Slot, rhs: Slot) -> Slot {
        assert!(self.program.inputs > 0, "declare inputs before ops");
        assert!(self.program.len < MAX_OPS, "too many ops");
        let out = self.program.inputs + self.program.len;
        assert!(
            lhs.index() < out && rhs.index() < out,
            "op reads a slot that is not written yet"
        );
        self.program.ops[self.program.len] = Op { kind, lhs, rhs };
        self.program.len += 1;
        Slot(out as u16)
    }
}

impl Default for ProgramBuilder {
    fn default() -> Self {
        Self::new()
    }
}
