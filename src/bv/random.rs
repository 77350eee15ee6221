// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
//
// Random stimulus generation.

use crate::{BitVecMutOps, BitVector, States, WidthInt};
use rand::Rng;

impl BitVector {
    /// Uniformly distributed two-state value.
    pub fn random<R: Rng>(width: WidthInt, rng: &mut R) -> Self {
        let mut out = Self::zero(width);
        rng.fill(out.words_mut());
        out.mask_msb();
        out
    }

    /// Four-state value where every bit is equally likely to be `0`, `1`, `X` or `Z`.
    pub fn random_four_state<R: Rng>(width: WidthInt, rng: &mut R) -> Self {
        let mut out = Self::zero_with(width, States::FourState);
        let (a, b) = out.channels_mut();
        rng.fill(a);
        rng.fill(b);
        out.mask_msb();
        out
    }
}
