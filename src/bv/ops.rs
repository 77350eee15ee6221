// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
//
// Traits for operations on bit-vectors.

use crate::bv::arithmetic::{self, words_for};
use crate::bv::io::strings::{FormatConfig, ParseIntError};
use crate::bv::owned::u128_to_words;
use crate::bv::part_select::{clamp_index, clamp_range};
use crate::{BitVecError, BitVector, Logic, States, WidthInt, Word};
use std::borrow::Cow;
use std::cmp::Ordering;

/// Returns `words` zero extended (or truncated) to exactly `len` words.
#[inline]
fn aligned(words: &[Word], len: usize) -> Cow<'_, [Word]> {
    if words.len() == len {
        Cow::Borrowed(words)
    } else {
        let mut out = vec![0; len];
        arithmetic::zero_extend(&mut out, words);
        Cow::Owned(out)
    }
}

type ShiftFn = fn(&mut [Word], &[Word], Option<WidthInt>, WidthInt);

fn shift_by<S: BitVecOps + ?Sized, R: BitVecOps + ?Sized>(
    value: &S,
    amount: &R,
    op: ShiftFn,
) -> BitVector {
    let width = value.width();
    if amount.has_unknown() {
        return BitVector::xs(width);
    }
    let amount = arithmetic::get_shift_amount(amount.words(), width);
    let mut out = BitVector::zero_with(width, value.states());
    let (a, b) = out.channels_mut();
    (op)(a, value.words(), amount, width);
    (op)(b, value.bval(), amount, width);
    out
}

/// Declares an arithmetic function which takes in two bitvectors and yields a
/// bitvector as wide as the wider operand. Any `X` or `Z` input bit makes the whole result `X`.
macro_rules! declare_arith_bin_fn {
    ($name:ident) => {
        fn $name<R: BitVecOps + ?Sized>(&self, rhs: &R) -> BitVector {
            let width = std::cmp::max(self.width(), rhs.width());
            if self.has_unknown() || rhs.has_unknown() {
                return BitVector::xs(width);
            }
            let mut out = BitVector::zero_with(width, self.states().join(rhs.states()));
            let len = out.words().len();
            if len == 1 {
                // specialized for 1-word case
                crate::bv::arithmetic::$name(
                    &mut out.words_mut()[0..1],
                    &self.words()[0..1],
                    &rhs.words()[0..1],
                    width,
                );
            } else {
                let (a, b) = (aligned(self.words(), len), aligned(rhs.words(), len));
                crate::bv::arithmetic::$name(out.words_mut(), &a, &b, width);
            }
            out
        }
    };
}

/// Declares a four-state bitwise function which takes in two bitvectors and yields a
/// bitvector as wide as the wider operand.
macro_rules! declare_bit_arith_bin_fn {
    ($name:ident) => {
        fn $name<R: BitVecOps + ?Sized>(&self, rhs: &R) -> BitVector {
            let width = std::cmp::max(self.width(), rhs.width());
            let mut out = BitVector::zero_with(width, self.states().join(rhs.states()));
            let len = out.words().len();
            let (la, lb) = (aligned(self.words(), len), aligned(self.bval(), len));
            let (ra, rb) = (aligned(rhs.words(), len), aligned(rhs.bval(), len));
            crate::bv::arithmetic::$name(out.channels_mut(), (&*la, &*lb), (&*ra, &*rb), width);
            out
        }
    };
}

/// Operations over immutable bit-vector values.
pub trait BitVecOps {
    fn width(&self) -> WidthInt;
    fn states(&self) -> States;
    /// The `aval` channel, least significant word first.
    fn words(&self) -> &[Word];
    /// The `bval` channel, least significant word first. All zero for two-state values.
    fn bval(&self) -> &[Word];

    /// Convert to a string of `0`, `1`, `x` and `z`.
    fn to_bit_str(&self) -> String {
        crate::bv::io::strings::to_bit_str(self.words(), self.bval(), self.width())
    }

    /// Convert to a string of 1s and 0s with a `-` if the value is negative.
    fn to_bit_str_signed(&self) -> String {
        crate::bv::io::strings::to_bit_str_signed(self.words(), self.bval(), self.width())
    }

    /// Convert to a string of hex characters
    fn to_hex_str(&self) -> String {
        crate::bv::io::strings::to_hex_str(self.words(), self.bval(), self.width())
    }

    /// Convert to a string of hex characters with a `-` if the value is negative.
    fn to_hex_str_signed(&self) -> String {
        crate::bv::io::strings::to_hex_str_signed(self.words(), self.bval(), self.width())
    }

    /// Convert to a string of a decimal number. No leading zeros.
    fn to_dec_str(&self) -> String {
        crate::bv::io::strings::to_dec_str(self.words(), self.bval(), self.width())
    }

    /// Renders the value according to `config`.
    fn format(&self, config: &FormatConfig) -> String {
        crate::bv::io::strings::format(self.words(), self.bval(), self.width(), config)
    }

    /// Two's complement value. Fails if any bit is `X` or `Z`.
    #[cfg(feature = "bigint")]
    fn to_big_int(&self) -> crate::Result<num_bigint::BigInt> {
        if self.has_unknown() {
            return Err(BitVecError::IndeterminateOperand { op: "convert to BigInt" });
        }
        Ok(crate::bv::io::bigint::to_big_int(self.words(), self.width()))
    }

    #[cfg(feature = "bigint")]
    fn to_big_uint(&self) -> crate::Result<num_bigint::BigUint> {
        if self.has_unknown() {
            return Err(BitVecError::IndeterminateOperand { op: "convert to BigUint" });
        }
        Ok(crate::bv::io::bigint::to_big_uint(self.words()))
    }

    /// `true` iff any bit is `X` or `Z`.
    fn has_unknown(&self) -> bool {
        arithmetic::any_set(self.bval())
    }

    /// Returns value as a bool iff the value is a known 1-bit value.
    fn to_bool(&self) -> Option<bool> {
        if self.width() == 1 && !self.has_unknown() {
            Some(arithmetic::word_to_bool(self.words()[0]))
        } else {
            None
        }
    }

    /// Returns the value as a 64-bit unsigned integer if the value can be represented
    fn to_u64(&self) -> Option<u64> {
        self.try_to_u64().ok()
    }

    fn try_to_u64(&self) -> crate::Result<u64> {
        if self.has_unknown() {
            return Err(BitVecError::IndeterminateOperand { op: "convert to u64" });
        }
        let words = self.words();
        if words.iter().skip(2).any(|w| *w != 0) {
            return Err(BitVecError::ExceedsWidth { width: u64::BITS });
        }
        let lsb = words[0] as u64;
        let msb = words.get(1).cloned().unwrap_or(0) as u64;
        Ok((msb << Word::BITS) | lsb)
    }

    fn to_u32(&self) -> Option<u32> {
        self.to_u64().and_then(|v| u32::try_from(v).ok())
    }

    /// Returns the value as a 64-bit signed integer if the value can be represented
    fn to_i64(&self) -> Option<i64> {
        if self.has_unknown() {
            return None;
        }
        let width = self.width();
        if width <= i64::BITS {
            let raw = self.to_u64()?;
            if self.is_negative() && width < i64::BITS {
                let extra_sign_bits = u64::MAX << width;
                Some((raw | extra_sign_bits) as i64)
            } else {
                Some(raw as i64)
            }
        } else {
            // bit 63 and everything above it need to agree
            let upper = self.slice(width - 1, i64::BITS - 1);
            if upper.is_zero() || upper.is_all_ones() {
                Some(self.slice(i64::BITS - 1, 0).to_u64()? as i64)
            } else {
                None
            }
        }
    }

    fn is_true(&self) -> bool {
        self.to_bool() == Some(true)
    }

    fn is_false(&self) -> bool {
        self.to_bool() == Some(false)
    }

    fn is_zero(&self) -> bool {
        !self.has_unknown() && self.words().iter().all(|w| *w == 0)
    }

    fn is_one(&self) -> bool {
        let msbs_are_zero = self.words().iter().skip(1).all(|w| *w == 0);
        !self.has_unknown() && msbs_are_zero && self.words()[0] == 1
    }

    fn is_all_ones(&self) -> bool {
        let words = self.words();
        let lsbs_are_max = words
            .iter()
            .take(words.len() - 1)
            .all(|w| *w == Word::MAX);
        let msb_is_max = words.last() == Some(&arithmetic::mask(self.width() % Word::BITS));
        !self.has_unknown() && lsbs_are_max && msb_is_max
    }

    /// `true` iff the most significant bit is a known one.
    fn is_negative(&self) -> bool {
        self.bit(self.width() - 1) == Logic::One
    }

    /// The bit at `pos`. Out of range positions are clamped to the msb.
    fn bit(&self, pos: WidthInt) -> Logic {
        let pos = clamp_index(pos, self.width());
        Logic::from_bits(
            arithmetic::is_bit_set(self.words(), pos),
            arithmetic::is_bit_set(self.bval(), pos),
        )
    }

    /// Extracts up to one word of `aval` starting at `lo`. Ranges wider than a word are cut
    /// down to the 32 bits starting at `lo`.
    fn get_bits(&self, hi: WidthInt, lo: WidthInt) -> Word {
        let (hi, lo) = clamp_range(hi, lo, self.width());
        let hi = std::cmp::min(hi, lo + Word::BITS - 1);
        arithmetic::get_bits(self.words(), hi, lo)
    }

    /// Word `index` of the `aval` channel. Out of range indices are clamped to the msb word.
    fn word(&self, index: usize) -> Word {
        let index = std::cmp::min(index, self.words().len() - 1);
        let lo = index as WidthInt * Word::BITS;
        // the top word may be partial
        let hi = std::cmp::min(lo + Word::BITS - 1, self.width() - 1);
        arithmetic::get_bits(self.words(), hi, lo)
    }

    declare_arith_bin_fn!(add);
    declare_arith_bin_fn!(sub);
    declare_arith_bin_fn!(mul);

    declare_bit_arith_bin_fn!(and);
    declare_bit_arith_bin_fn!(or);
    declare_bit_arith_bin_fn!(xor);

    fn shift_left<R: BitVecOps + ?Sized>(&self, amount: &R) -> BitVector {
        shift_by(self, amount, arithmetic::shift_left)
    }

    fn shift_right<R: BitVecOps + ?Sized>(&self, amount: &R) -> BitVector {
        shift_by(self, amount, arithmetic::shift_right)
    }

    fn arithmetic_shift_right<R: BitVecOps + ?Sized>(&self, amount: &R) -> BitVector {
        shift_by(self, amount, arithmetic::arithmetic_shift_right)
    }

    fn shift_left_by(&self, amount: WidthInt) -> BitVector {
        self.shift_left(&BitVector::from_u64(amount as u64, WidthInt::BITS))
    }

    fn shift_right_by(&self, amount: WidthInt) -> BitVector {
        self.shift_right(&BitVector::from_u64(amount as u64, WidthInt::BITS))
    }

    /// Bitwise complement. `X` and `Z` turn into `X`.
    fn not(&self) -> BitVector {
        let mut out = BitVector::zero_with(self.width(), self.states());
        arithmetic::not(out.channels_mut(), (self.words(), self.bval()), self.width());
        out
    }

    /// Two's complement negation.
    fn negate(&self) -> BitVector {
        if self.has_unknown() {
            return BitVector::xs(self.width());
        }
        let mut out = BitVector::zero_with(self.width(), self.states());
        arithmetic::negate(out.words_mut(), self.words(), self.width());
        out
    }

    /// Case equality: both channels need to match bit for bit, the narrower operand is zero
    /// extended.
    fn is_equal<R: BitVecOps + ?Sized>(&self, rhs: &R) -> bool {
        let len = std::cmp::max(self.words().len(), rhs.words().len());
        if self.words().len() == len && rhs.words().len() == len {
            // same number of words, no extension needed
            arithmetic::cmp_equal(self.words(), rhs.words())
                && arithmetic::cmp_equal(self.bval(), rhs.bval())
        } else {
            arithmetic::cmp_equal(&aligned(self.words(), len), &aligned(rhs.words(), len))
                && arithmetic::cmp_equal(&aligned(self.bval(), len), &aligned(rhs.bval(), len))
        }
    }

    fn is_not_equal<R: BitVecOps + ?Sized>(&self, rhs: &R) -> bool {
        !self.is_equal(rhs)
    }

    /// Logical equality: `X` if either operand contains `X` or `Z`.
    fn logic_eq<R: BitVecOps + ?Sized>(&self, rhs: &R) -> Logic {
        if self.has_unknown() || rhs.has_unknown() {
            Logic::X
        } else {
            Logic::from(self.is_equal(rhs))
        }
    }

    /// Unsigned magnitude comparison. `None` if either operand contains `X` or `Z`.
    fn compare<R: BitVecOps + ?Sized>(&self, rhs: &R) -> Option<Ordering> {
        if self.has_unknown() || rhs.has_unknown() {
            return None;
        }
        let len = std::cmp::max(self.words().len(), rhs.words().len());
        Some(arithmetic::cmp(
            &aligned(self.words(), len),
            &aligned(rhs.words(), len),
        ))
    }

    /// Two's complement comparison. The narrower operand is sign extended.
    fn compare_signed<R: BitVecOps + ?Sized>(&self, rhs: &R) -> Option<Ordering> {
        if self.has_unknown() || rhs.has_unknown() {
            return None;
        }
        let width = std::cmp::max(self.width(), rhs.width());
        let a = self.sign_extend(width - self.width());
        let b = rhs.sign_extend(width - rhs.width());
        Some(arithmetic::cmp_signed(a.words(), b.words(), width))
    }

    fn is_greater<R: BitVecOps + ?Sized>(&self, rhs: &R) -> bool {
        self.compare(rhs) == Some(Ordering::Greater)
    }

    fn is_greater_or_equal<R: BitVecOps + ?Sized>(&self, rhs: &R) -> bool {
        matches!(self.compare(rhs), Some(Ordering::Greater | Ordering::Equal))
    }

    fn is_less<R: BitVecOps + ?Sized>(&self, rhs: &R) -> bool {
        // a < b <=> b > a
        rhs.is_greater(self)
    }

    fn is_less_or_equal<R: BitVecOps + ?Sized>(&self, rhs: &R) -> bool {
        // a <= b <=> b >= a
        rhs.is_greater_or_equal(self)
    }

    fn is_greater_signed<R: BitVecOps + ?Sized>(&self, rhs: &R) -> bool {
        self.compare_signed(rhs) == Some(Ordering::Greater)
    }

    fn is_greater_or_equal_signed<R: BitVecOps + ?Sized>(&self, rhs: &R) -> bool {
        matches!(
            self.compare_signed(rhs),
            Some(Ordering::Greater | Ordering::Equal)
        )
    }

    fn is_less_signed<R: BitVecOps + ?Sized>(&self, rhs: &R) -> bool {
        // a < b <=> b > a
        rhs.is_greater_signed(self)
    }

    fn is_less_or_equal_signed<R: BitVecOps + ?Sized>(&self, rhs: &R) -> bool {
        // a <= b <=> b >= a
        rhs.is_greater_or_equal_signed(self)
    }

    /// `&` over all bits.
    fn reduce_and(&self) -> Logic {
        let mut any_unknown = false;
        for pos in 0..self.width() {
            match self.bit(pos) {
                Logic::Zero => return Logic::Zero,
                Logic::One => {}
                _ => any_unknown = true,
            }
        }
        if any_unknown {
            Logic::X
        } else {
            Logic::One
        }
    }

    /// `|` over all bits.
    fn reduce_or(&self) -> Logic {
        // a known one is a set aval bit with a cleared bval bit
        let any_one = self
            .words()
            .iter()
            .zip(self.bval().iter())
            .any(|(a, b)| a & !b != 0);
        if any_one {
            Logic::One
        } else if self.has_unknown() {
            Logic::X
        } else {
            Logic::Zero
        }
    }

    /// `^` over all bits.
    fn reduce_xor(&self) -> Logic {
        if self.has_unknown() {
            Logic::X
        } else {
            let ones: u32 = self.words().iter().map(|w| w.count_ones()).sum();
            Logic::from(ones % 2 == 1)
        }
    }

    /// Extracts `msb..=lsb` into a new value. Indices are clamped into range.
    fn slice(&self, msb: WidthInt, lsb: WidthInt) -> BitVector {
        let (msb, lsb) = clamp_range(msb, lsb, self.width());
        let out_width = msb - lsb + 1;
        let mut out = BitVector::zero_with(out_width, self.states());
        let (a, b) = out.channels_mut();
        arithmetic::slice(a, self.words(), msb, lsb);
        arithmetic::slice(b, self.bval(), msb, lsb);
        out
    }

    fn sign_extend(&self, by: WidthInt) -> BitVector {
        let out_width = self.width() + by;
        let mut out = BitVector::zero_with(out_width, self.states());
        let (a, b) = out.channels_mut();
        arithmetic::sign_extend(a, self.words(), self.width(), out_width);
        arithmetic::sign_extend(b, self.bval(), self.width(), out_width);
        out
    }

    fn zero_extend(&self, by: WidthInt) -> BitVector {
        let out_width = self.width() + by;
        let mut out = BitVector::zero_with(out_width, self.states());
        let (a, b) = out.channels_mut();
        arithmetic::zero_extend(a, self.words());
        arithmetic::zero_extend(b, self.bval());
        out
    }

    /// `{self, rhs}`: `self` ends up in the msbs.
    fn concat<R: BitVecOps + ?Sized>(&self, rhs: &R) -> BitVector {
        let out_width = self.width() + rhs.width();
        let mut out = BitVector::zero_with(out_width, self.states().join(rhs.states()));
        let (a, b) = out.channels_mut();
        arithmetic::concat(a, self.words(), rhs.words(), rhs.width());
        arithmetic::concat(b, self.bval(), rhs.bval(), rhs.width());
        out
    }
}

/// Operations over mutable bit-vector values.
pub trait BitVecMutOps: BitVecOps {
    fn channels_mut(&mut self) -> (&mut [Word], &mut [Word]);

    /// Restores the masking invariant: all unused bits in the most significant word are
    /// zero and two-state values hold no `X` or `Z`.
    fn mask_msb(&mut self);

    fn words_mut(&mut self) -> &mut [Word] {
        self.channels_mut().0
    }

    fn bval_mut(&mut self) -> &mut [Word] {
        self.channels_mut().1
    }

    /// Assigns `value`, truncating or zero extending it to our width.
    fn assign<R: BitVecOps + ?Sized>(&mut self, value: &R) {
        let (a, b) = self.channels_mut();
        arithmetic::zero_extend(a, value.words());
        arithmetic::zero_extend(b, value.bval());
        self.mask_msb();
    }

    /// sets all bits to zero
    fn clear(&mut self) {
        let (a, b) = self.channels_mut();
        arithmetic::clear(a);
        arithmetic::clear(b);
    }

    /// sets all bits to one
    fn assign_ones(&mut self) {
        self.assign_logic(Logic::One);
    }

    /// Sets every bit to `value`.
    fn assign_logic(&mut self, value: Logic) {
        let (a, b) = value.to_words();
        let (aval, bval) = self.channels_mut();
        aval.iter_mut().for_each(|w| *w = a);
        bval.iter_mut().for_each(|w| *w = b);
        self.mask_msb();
    }

    /// Assigns `value` truncated to our width.
    fn assign_from_u64(&mut self, value: u64) {
        self.clear();
        let words = [value as Word, (value >> Word::BITS) as Word];
        arithmetic::assign(self.words_mut(), &words);
        self.mask_msb();
    }

    fn assign_from_u128(&mut self, value: u128) {
        self.clear();
        arithmetic::assign(self.words_mut(), &u128_to_words(value));
        self.mask_msb();
    }

    /// Assigns `value` sign extended or truncated to our width.
    fn assign_from_i64(&mut self, value: i64) {
        self.clear();
        let width = self.width();
        let words = [value as Word, ((value as u64) >> Word::BITS) as Word];
        let dst = self.words_mut();
        if dst.len() > words.len() {
            arithmetic::sign_extend(dst, &words, i64::BITS, width);
        } else {
            arithmetic::assign(dst, &words);
        }
        self.mask_msb();
    }

    fn assign_from_str_radix(&mut self, value: &str, radix: u32) -> Result<(), ParseIntError> {
        let width = self.width();
        let (a, b) = self.channels_mut();
        crate::bv::io::strings::from_str_radix(value, radix, a, b, width)?;
        self.mask_msb();
        Ok(())
    }

    /// Sets the bit at `pos` (clamped to the msb) to `value`.
    fn set_bit(&mut self, pos: WidthInt, value: Logic) {
        let pos = clamp_index(pos, self.width());
        let (a, b) = value.to_bits();
        let (aval, bval) = self.channels_mut();
        if a {
            arithmetic::set_bit(aval, pos);
        } else {
            arithmetic::clear_bit(aval, pos);
        }
        if b {
            arithmetic::set_bit(bval, pos);
        } else {
            arithmetic::clear_bit(bval, pos);
        }
        self.mask_msb();
    }

    fn clear_bit(&mut self, pos: WidthInt) {
        self.set_bit(pos, Logic::Zero);
    }

    /// Writes the lsbs of `value` into `hi..=lo`, leaving all other bits untouched.
    /// Missing high bits of a narrower `value` are written as zero.
    fn assign_range<R: BitVecOps + ?Sized>(&mut self, hi: WidthInt, lo: WidthInt, value: &R) {
        let (hi, lo) = clamp_range(hi, lo, self.width());
        let len = words_for(hi - lo + 1);
        let (src_a, src_b) = (aligned(value.words(), len), aligned(value.bval(), len));
        let (a, b) = self.channels_mut();
        arithmetic::write_slice(a, &src_a, hi, lo);
        arithmetic::write_slice(b, &src_b, hi, lo);
        self.mask_msb();
    }
}
