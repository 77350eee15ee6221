// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
//
// Conversion between bit-vector words and the VPI vector value layout.

use crate::bv::arithmetic::{self, words_for};
use crate::{States, WidthInt, Word};

/// One 32-bit chunk of a simulator signal as laid out by `s_vpi_vecval`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub struct VecVal {
    pub aval: u32,
    pub bval: u32,
}

impl VecVal {
    pub const fn new(aval: u32, bval: u32) -> Self {
        Self { aval, bval }
    }
}

/// Copies raw simulator words into `aval`/`bval` channels for a `width` bit vector.
/// Missing entries count as zero, surplus entries are ignored, the msb word is masked and
/// `X`/`Z` bits are dropped for [`States::TwoState`].
pub fn import_words(raw: &[VecVal], width: WidthInt, states: States) -> (Vec<Word>, Vec<Word>) {
    let words = words_for(width);
    if raw.len() != words {
        tracing::trace!(
            "importing {} simulator words into a {width}-bit vector that needs {words}",
            raw.len()
        );
    }
    let mut aval = vec![0; words];
    let mut bval = vec![0; words];
    for ((a, b), v) in aval.iter_mut().zip(bval.iter_mut()).zip(raw.iter()) {
        *a = v.aval;
        *b = v.bval;
    }
    if !states.is_four_state() {
        arithmetic::coerce_to_two_state(&mut aval, &mut bval);
    }
    arithmetic::mask_msb(&mut aval, width);
    arithmetic::mask_msb(&mut bval, width);
    (aval, bval)
}

/// Zips both channels into simulator words, least significant word first.
pub fn export_words(aval: &[Word], bval: &[Word]) -> Vec<VecVal> {
    debug_assert_eq!(aval.len(), bval.len());
    aval.iter()
        .zip(bval.iter())
        .map(|(a, b)| VecVal::new(*a, *b))
        .collect()
}
