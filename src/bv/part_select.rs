// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
//
// A writable view of `hi..=lo` inside a bit-vector.

use crate::{BitVecMutOps, BitVecOps, BitVector, Operand, WidthInt};

/// Clamps `pos` to `width - 1`.
#[inline]
pub(crate) fn clamp_index(pos: WidthInt, width: WidthInt) -> WidthInt {
    let msb = width - 1;
    if pos > msb {
        tracing::debug!("bit index {pos} clamped to {msb} for a {width}-bit vector");
        msb
    } else {
        pos
    }
}

/// Clamps both ends into `0..width` and swaps them if `hi < lo`.
#[inline]
pub(crate) fn clamp_range(hi: WidthInt, lo: WidthInt, width: WidthInt) -> (WidthInt, WidthInt) {
    let (hi, lo) = (clamp_index(hi, width), clamp_index(lo, width));
    if hi < lo {
        tracing::debug!("range [{hi}:{lo}] swapped to [{lo}:{hi}]");
        (lo, hi)
    } else {
        (hi, lo)
    }
}

/// Mutable window onto the bits `hi..=lo` of a [`BitVector`].
///
/// The view borrows its parent exclusively, so a value read from the same vector has to be
/// materialized before a view for writing can be created:
/// ```
/// # use logicvec::*;
/// let mut bv = BitVector::from_u64(0xABCD_1234, 32);
/// let low = bv.slice(15, 0);
/// let high = bv.slice(31, 16);
/// bv.select(31, 16).assign(low);
/// bv.select(15, 0).assign(high);
/// assert_eq!(bv.to_u64(), Some(0x1234_ABCD));
/// ```
pub struct PartSelect<'a> {
    parent: &'a mut BitVector,
    hi: WidthInt,
    lo: WidthInt,
}

impl<'a> PartSelect<'a> {
    pub(crate) fn new(parent: &'a mut BitVector, hi: WidthInt, lo: WidthInt) -> Self {
        let (hi, lo) = clamp_range(hi, lo, parent.width());
        Self { parent, hi, lo }
    }

    pub fn width(&self) -> WidthInt {
        self.hi - self.lo + 1
    }

    /// `(hi, lo)` after clamping.
    pub fn range(&self) -> (WidthInt, WidthInt) {
        (self.hi, self.lo)
    }

    /// Copies the selected bits out into a new value.
    pub fn get(&self) -> BitVector {
        self.parent.slice(self.hi, self.lo)
    }

    pub fn to_u64(&self) -> Option<u64> {
        self.get().to_u64()
    }

    /// Writes the lsbs of `value` into the selected bits. Scalars adopt the width of the view.
    pub fn assign<'b>(&mut self, value: impl Into<Operand<'b>>) {
        let value = value.into().resolve(self.width());
        self.parent.assign_range(self.hi, self.lo, &*value);
    }

    /// Read-modify-write of the selected bits.
    pub fn update(&mut self, f: impl FnOnce(BitVector) -> BitVector) {
        let value = f(self.get());
        self.parent.assign_range(self.hi, self.lo, &value);
    }
}

impl std::fmt::Debug for PartSelect<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PartSelect[{}:{}] = {:?}", self.hi, self.lo, self.get())
    }
}
