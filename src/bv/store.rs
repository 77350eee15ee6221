// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
//
// Word storage for one bit-vector: two channels of `ceil(width / 32)` words each.

use crate::bv::arithmetic::{self, words_for};
use crate::{BitVecError, Logic, States, WidthInt, Word};

/// Fixed-capacity `aval`/`bval` word arrays for one logical bit-width.
///
/// Invariants:
/// - `width > 0`
/// - `aval.len() == bval.len() == ceil(width / 32)`
/// - bits at or above `width` are zero in both channels
/// - in [`States::TwoState`] mode, every `bval` word is zero
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub struct WordStore {
    width: WidthInt,
    states: States,
    aval: Vec<Word>,
    bval: Vec<Word>,
}

impl WordStore {
    /// All-zero storage.
    pub fn new(width: WidthInt, states: States) -> crate::Result<Self> {
        if width == 0 {
            return Err(BitVecError::InvalidWidth { width });
        }
        let words = words_for(width);
        Ok(Self {
            width,
            states,
            aval: vec![0; words],
            bval: vec![0; words],
        })
    }

    #[inline]
    pub fn width(&self) -> WidthInt {
        self.width
    }

    #[inline]
    pub fn states(&self) -> States {
        self.states
    }

    #[inline]
    pub fn word_count(&self) -> usize {
        self.aval.len()
    }

    #[inline]
    pub fn word_index_of(bit_pos: WidthInt) -> usize {
        arithmetic::word_index_of(bit_pos)
    }

    #[inline]
    pub fn bit_shift_of(bit_pos: WidthInt) -> WidthInt {
        arithmetic::bit_shift_of(bit_pos)
    }

    #[inline]
    pub fn aval(&self) -> &[Word] {
        &self.aval
    }

    #[inline]
    pub fn bval(&self) -> &[Word] {
        &self.bval
    }

    /// Mutable access to both channels. Callers must restore the invariants,
    /// usually by calling [`WordStore::apply_mask`].
    #[inline]
    pub fn channels_mut(&mut self) -> (&mut [Word], &mut [Word]) {
        (&mut self.aval, &mut self.bval)
    }

    /// Zeroes all bits above `width` in both channels and drops `X`/`Z` bits in two-state mode.
    pub fn apply_mask(&mut self) {
        if self.states == States::TwoState {
            arithmetic::coerce_to_two_state(&mut self.aval, &mut self.bval);
        }
        arithmetic::mask_msb(&mut self.aval, self.width);
        arithmetic::mask_msb(&mut self.bval, self.width);
    }

    /// Switches the value domain. Going to two-state turns all `X` and `Z` bits into `0`.
    pub fn set_states(&mut self, states: States) {
        self.states = states;
        self.apply_mask();
    }

    /// Changes the width. New high bits are zero.
    pub fn resize(&mut self, new_width: WidthInt) -> crate::Result<()> {
        self.resize_with(new_width, Logic::Zero)
    }

    /// Changes the width. New high bits are set to `fill` (coerced in two-state mode).
    /// Shrinking truncates high-order bits.
    pub fn resize_with(&mut self, new_width: WidthInt, fill: Logic) -> crate::Result<()> {
        if new_width == 0 {
            return Err(BitVecError::InvalidWidth { width: new_width });
        }
        if new_width == self.width {
            return Ok(());
        }
        tracing::trace!("resize bit-vector from {} to {} bits", self.width, new_width);
        let old_width = self.width;
        let words = words_for(new_width);
        self.aval.resize(words, 0);
        self.bval.resize(words, 0);
        self.width = new_width;
        if new_width > old_width {
            let fill = if self.states.is_four_state() {
                fill
            } else {
                fill.to_two_state()
            };
            let (a, b) = fill.to_bits();
            if a {
                arithmetic::set_range(&mut self.aval, new_width - 1, old_width);
            }
            if b {
                arithmetic::set_range(&mut self.bval, new_width - 1, old_width);
            }
        }
        self.apply_mask();
        Ok(())
    }

    /// Extracts `hi..=lo` of the `aval` channel. At most 32 bits, may straddle two words.
    #[inline]
    pub fn get_bits(&self, hi: WidthInt, lo: WidthInt) -> Word {
        debug_assert!(hi < self.width);
        arithmetic::get_bits(&self.aval, hi, lo)
    }

    /// Extracts `hi..=lo` of the `bval` channel.
    #[inline]
    pub fn get_bval_bits(&self, hi: WidthInt, lo: WidthInt) -> Word {
        debug_assert!(hi < self.width);
        arithmetic::get_bits(&self.bval, hi, lo)
    }

    /// `true` iff any bit is `X` or `Z`.
    #[inline]
    pub fn has_unknown(&self) -> bool {
        arithmetic::any_set(&self.bval)
    }

    /// Leaves behind an empty-but-valid 1-bit zero store and returns the previous contents.
    pub(crate) fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

impl Default for WordStore {
    fn default() -> Self {
        Self {
            width: 1,
            states: States::TwoState,
            aval: vec![0],
            bval: vec![0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bv::arithmetic::assert_unused_bits_zero;

    fn filled(width: WidthInt, states: States) -> WordStore {
        let mut store = WordStore::new(width, states).unwrap();
        let (a, b) = store.channels_mut();
        arithmetic::set(a);
        arithmetic::set(b);
        store.apply_mask();
        store
    }

    #[test]
    fn test_zero_width_is_rejected() {
        assert_eq!(
            WordStore::new(0, States::TwoState).unwrap_err(),
            BitVecError::InvalidWidth { width: 0 }
        );
        let mut store = WordStore::new(8, States::TwoState).unwrap();
        assert!(store.resize(0).is_err());
        assert_eq!(store.width(), 8);
    }

    #[test]
    fn test_word_count() {
        for (width, words) in [(1, 1), (32, 1), (33, 2), (64, 2), (65, 3), (128, 4)] {
            let store = WordStore::new(width, States::FourState).unwrap();
            assert_eq!(store.word_count(), words);
            assert_eq!(store.bval().len(), words);
        }
    }

    #[test]
    fn test_apply_mask_two_state_coerces() {
        let store = filled(33, States::TwoState);
        // X bits become 0
        assert_eq!(store.aval(), &[0, 0]);
        assert_eq!(store.bval(), &[0, 0]);
        let store = filled(33, States::FourState);
        assert_eq!(store.aval(), &[Word::MAX, 1]);
        assert_eq!(store.bval(), &[Word::MAX, 1]);
    }

    #[test]
    fn test_resize_grow_and_shrink() {
        let mut store = WordStore::new(8, States::FourState).unwrap();
        store.channels_mut().0[0] = 0xAB;
        store.resize_with(40, Logic::X).unwrap();
        assert_eq!(store.aval(), &[0xFFFF_FFAB, 0xFF]);
        assert_eq!(store.bval(), &[0xFFFF_FF00, 0xFF]);
        store.resize(4).unwrap();
        assert_eq!(store.aval(), &[0xB]);
        assert_eq!(store.bval(), &[0]);
        assert_unused_bits_zero(store.aval(), 4);
    }

    #[test]
    fn test_straddling_reads() {
        let mut store = WordStore::new(64, States::FourState).unwrap();
        assert_eq!(WordStore::word_index_of(35), 1);
        assert_eq!(WordStore::bit_shift_of(35), 3);
        let (a, b) = store.channels_mut();
        a[0] = 0xF000_0000;
        a[1] = 0x3;
        b[1] = 0x2;
        assert_eq!(store.get_bits(33, 28), 0x3F);
        assert_eq!(store.get_bval_bits(33, 28), 0x20);
        assert!(store.has_unknown());
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut once = filled(70, States::FourState);
        once.resize(37).unwrap();
        let mut twice = once.clone();
        twice.resize(37).unwrap();
        assert_eq!(once.aval(), twice.aval());
        assert_eq!(once.bval(), twice.bval());
        assert_eq!(once.width(), twice.width());
    }

    #[test]
    fn test_take_leaves_valid_store() {
        let mut store = filled(100, States::FourState);
        let taken = store.take();
        assert_eq!(taken.width(), 100);
        assert_eq!(store.width(), 1);
        assert_eq!(store.aval(), &[0]);
    }
}
