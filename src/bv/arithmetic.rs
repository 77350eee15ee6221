// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
//
// basic arithmetic implementations on slices of words

use crate::{DoubleWord, WidthInt, Word};
use std::cmp::Ordering;

#[inline]
pub fn mask(bits: WidthInt) -> Word {
    if bits == Word::BITS || bits == 0 {
        Word::MAX
    } else {
        assert!(bits < Word::BITS);
        ((1 as Word) << bits) - 1
    }
}

/// Number of words needed to store `width` bits.
#[inline]
pub(crate) fn words_for(width: WidthInt) -> usize {
    width.div_ceil(Word::BITS) as usize
}

#[inline]
pub(crate) fn word_index_of(pos: WidthInt) -> usize {
    (pos / Word::BITS) as usize
}

#[inline]
pub(crate) fn bit_shift_of(pos: WidthInt) -> WidthInt {
    pos % Word::BITS
}

#[inline]
pub(crate) fn clear(dst: &mut [Word]) {
    for w in dst.iter_mut() {
        *w = 0;
    }
}

#[inline]
pub(crate) fn set(dst: &mut [Word]) {
    for w in dst.iter_mut() {
        *w = Word::MAX;
    }
}

#[inline]
pub(crate) fn assign(dst: &mut [Word], source: &[Word]) {
    for (d, s) in dst.iter_mut().zip(source.iter()) {
        *d = *s;
    }
}

#[inline]
pub(crate) fn zero_extend(dst: &mut [Word], source: &[Word]) {
    // copy source to dst
    assign(dst, source);
    // zero out remaining words
    if dst.len() > source.len() {
        clear(&mut dst[source.len()..]);
    }
}

#[inline]
pub(crate) fn sign_extend(
    dst: &mut [Word],
    source: &[Word],
    src_width: WidthInt,
    dst_width: WidthInt,
) {
    // copy source to dst
    assign(dst, source);
    if is_neg(source, src_width) {
        // set source msbs in destination
        let lsbs_in_msb = src_width % Word::BITS;
        if lsbs_in_msb > 0 {
            let msbs_in_msb = Word::BITS - lsbs_in_msb;
            dst[source.len() - 1] |= mask(msbs_in_msb) << lsbs_in_msb;
        }
        // set other dst words to all 1s
        set(&mut dst[source.len()..]);
        // clear destination msbs
        mask_msb(dst, dst_width);
    } else {
        clear(&mut dst[source.len()..]);
    }
}

#[inline]
pub(crate) fn mask_msb(dst: &mut [Word], width: WidthInt) {
    debug_assert_eq!(words_for(width), dst.len());
    let m = mask(width % Word::BITS);
    if let Some(msb) = dst.last_mut() {
        *msb &= m;
    }
}

#[inline]
pub(crate) fn is_bit_set(source: &[Word], pos: WidthInt) -> bool {
    (source[word_index_of(pos)] >> bit_shift_of(pos)) & 1 == 1
}

#[inline]
pub(crate) fn set_bit(dst: &mut [Word], pos: WidthInt) {
    dst[word_index_of(pos)] |= 1 << bit_shift_of(pos);
}

#[inline]
pub(crate) fn clear_bit(dst: &mut [Word], pos: WidthInt) {
    dst[word_index_of(pos)] &= !(1 << bit_shift_of(pos));
}

/// Sets all bits in `hi..=lo` to one.
pub(crate) fn set_range(dst: &mut [Word], hi: WidthInt, lo: WidthInt) {
    debug_assert!(hi >= lo);
    let mut pos = lo;
    while pos <= hi {
        let offset = bit_shift_of(pos);
        let bits = std::cmp::min(Word::BITS - offset, hi - pos + 1);
        dst[word_index_of(pos)] |= mask(bits) << offset;
        pos += bits;
    }
}

/// Extracts `hi..=lo` (at most one word wide) from `source`. The range may straddle
/// two adjacent words.
#[inline]
pub(crate) fn get_bits(source: &[Word], hi: WidthInt, lo: WidthInt) -> Word {
    debug_assert!(hi >= lo);
    let bits = hi - lo + 1;
    debug_assert!(bits <= Word::BITS, "get_bits returns at most one word");
    let lo_word = word_index_of(lo);
    let hi_word = word_index_of(hi);
    let offset = bit_shift_of(lo);
    let value = if lo_word == hi_word {
        source[lo_word] >> offset
    } else {
        // offset cannot be zero here, otherwise the range would fit into `lo_word`
        (source[lo_word] >> offset) | (source[hi_word] << (Word::BITS - offset))
    };
    value & mask(bits)
}

#[inline]
pub(crate) fn slice(dst: &mut [Word], source: &[Word], hi: WidthInt, lo: WidthInt) {
    let lo_offset = lo % Word::BITS;
    let hi_word = (hi / Word::BITS) as usize;
    let lo_word = (lo / Word::BITS) as usize;
    let src = &source[lo_word..(hi_word + 1)];

    let shift_right = lo_offset;
    if shift_right == 0 {
        assign(dst, src);
    } else {
        // assign with a shift
        let shift_left = Word::BITS - shift_right;
        let m = mask(shift_right);
        let mut prev = src[0] >> shift_right;
        // We append a zero to the src iter in case src.len() == dst.len().
        // If src.len() == dst.len() + 1, then the 0 will just be ignored by `zip`.
        for (d, s) in dst.iter_mut().zip(src.iter().skip(1).chain([0].iter())) {
            *d = prev | ((*s) & m) << shift_left;
            prev = (*s) >> shift_right;
        }
    }
    // mask the result msb
    mask_msb(dst, hi - lo + 1);
}

/// Copies the `hi - lo + 1` lsbs of `source` into `dst[hi..=lo]`. All other bits of `dst`
/// are left untouched.
pub(crate) fn write_slice(dst: &mut [Word], source: &[Word], hi: WidthInt, lo: WidthInt) {
    debug_assert!(hi >= lo);
    let width = hi - lo + 1;
    debug_assert!(source.len() >= words_for(width));
    let mut done = 0;
    while done < width {
        let pos = lo + done;
        let offset = bit_shift_of(pos);
        let bits = std::cmp::min(Word::BITS - offset, width - done);
        let chunk = get_bits(source, done + bits - 1, done);
        let m = mask(bits) << offset;
        let d = &mut dst[word_index_of(pos)];
        *d = (*d & !m) | (chunk << offset);
        done += bits;
    }
}

#[inline]
pub(crate) fn concat(dst: &mut [Word], msb: &[Word], lsb: &[Word], lsb_width: WidthInt) {
    // copy lsb to dst
    assign(dst, lsb);

    let lsb_offset = lsb_width % Word::BITS;
    if lsb_offset == 0 {
        // copy msb to dst
        for (d, m) in dst.iter_mut().skip(lsb.len()).zip(msb.iter()) {
            *d = *m;
        }
    } else {
        // copy a shifted version of the msb to dst
        let shift_right = Word::BITS - lsb_offset;
        let m = mask(shift_right);
        let mut prev = dst[lsb.len() - 1]; // the msb of the lsb
        for (d, s) in dst
            .iter_mut()
            .skip(lsb.len() - 1)
            .zip(msb.iter().chain([0].iter()))
        {
            *d = prev | ((*s) & m) << lsb_offset;
            prev = (*s) >> shift_right;
        }
    }
}

//////////////////////////
// four-state bitwise ops
//////////////////////////
//
// Every bit is encoded as an (aval, bval) pair: 0=(0,0), 1=(1,0), X=(1,1), Z=(0,1).
// Z inputs behave like X.

#[inline]
fn known_zero(a: Word, b: Word) -> Word {
    !a & !b
}

#[inline]
fn known_one(a: Word, b: Word) -> Word {
    a & !b
}

#[inline]
fn and_word(la: Word, lb: Word, ra: Word, rb: Word) -> (Word, Word) {
    // a zero on either side dominates, otherwise any unknown makes the result X
    let not_zero = !(known_zero(la, lb) | known_zero(ra, rb));
    let one = known_one(la, lb) & known_one(ra, rb);
    (not_zero, not_zero & !one)
}

#[inline]
fn or_word(la: Word, lb: Word, ra: Word, rb: Word) -> (Word, Word) {
    // a one on either side dominates, otherwise any unknown makes the result X
    let one = known_one(la, lb) | known_one(ra, rb);
    let zero = known_zero(la, lb) & known_zero(ra, rb);
    (!zero, !zero & !one)
}

#[inline]
fn xor_word(la: Word, lb: Word, ra: Word, rb: Word) -> (Word, Word) {
    let unknown = lb | rb;
    ((la ^ ra) | unknown, unknown)
}

type FourStateWordOp = fn(Word, Word, Word, Word) -> (Word, Word);

#[inline]
fn bitwise_bin_op(
    dst: (&mut [Word], &mut [Word]),
    l: (&[Word], &[Word]),
    r: (&[Word], &[Word]),
    width: WidthInt,
    op: FourStateWordOp,
) {
    let (dst_a, dst_b) = dst;
    let words = l.0.iter().zip(l.1.iter()).zip(r.0.iter().zip(r.1.iter()));
    for ((da, db), ((la, lb), (ra, rb))) in dst_a.iter_mut().zip(dst_b.iter_mut()).zip(words) {
        let (a, b) = (op)(*la, *lb, *ra, *rb);
        *da = a;
        *db = b;
    }
    mask_msb(dst_a, width);
    mask_msb(dst_b, width);
}

#[inline]
pub(crate) fn and(
    dst: (&mut [Word], &mut [Word]),
    l: (&[Word], &[Word]),
    r: (&[Word], &[Word]),
    width: WidthInt,
) {
    bitwise_bin_op(dst, l, r, width, and_word)
}

#[inline]
pub(crate) fn or(
    dst: (&mut [Word], &mut [Word]),
    l: (&[Word], &[Word]),
    r: (&[Word], &[Word]),
    width: WidthInt,
) {
    bitwise_bin_op(dst, l, r, width, or_word)
}

#[inline]
pub(crate) fn xor(
    dst: (&mut [Word], &mut [Word]),
    l: (&[Word], &[Word]),
    r: (&[Word], &[Word]),
    width: WidthInt,
) {
    bitwise_bin_op(dst, l, r, width, xor_word)
}

/// Bitwise complement. `X` and `Z` both turn into `X`.
#[inline]
pub(crate) fn not(dst: (&mut [Word], &mut [Word]), source: (&[Word], &[Word]), width: WidthInt) {
    let (dst_a, dst_b) = dst;
    for ((da, db), (sa, sb)) in dst_a
        .iter_mut()
        .zip(dst_b.iter_mut())
        .zip(source.0.iter().zip(source.1.iter()))
    {
        *da = !*sa | *sb;
        *db = *sb;
    }
    mask_msb(dst_a, width);
    mask_msb(dst_b, width);
}

/// Turns every `X` or `Z` bit into a `0`.
#[inline]
pub(crate) fn coerce_to_two_state(aval: &mut [Word], bval: &mut [Word]) {
    for (a, b) in aval.iter_mut().zip(bval.iter_mut()) {
        *a &= !*b;
        *b = 0;
    }
}

#[inline]
pub(crate) fn any_set(words: &[Word]) -> bool {
    words.iter().any(|w| *w != 0)
}

//////////////////////////
// arithmetic
//////////////////////////

#[inline]
fn adc(dst: &mut Word, carry: u8, a: Word, b: Word) -> u8 {
    let sum = carry as DoubleWord + a as DoubleWord + b as DoubleWord;
    let new_carry = (sum >> Word::BITS) as u8;
    *dst = sum as Word;
    new_carry
}

/// Add function inspired by the num-bigint implementation: https://docs.rs/num-bigint/0.4.4/src/num_bigint/biguint/addition.rs.html
#[inline]
pub(crate) fn add(dst: &mut [Word], a: &[Word], b: &[Word], width: WidthInt) {
    let mut carry = 0;
    for (dd, (aa, bb)) in dst.iter_mut().zip(a.iter().zip(b.iter())) {
        carry = adc(dd, carry, *aa, *bb);
    }
    mask_msb(dst, width);
}

/// Sub function inspired by the num-bigint implementation: https://docs.rs/num-bigint/0.4.4/src/num_bigint/biguint/subtraction.rs.html
#[inline]
pub(crate) fn sub(dst: &mut [Word], a: &[Word], b: &[Word], width: WidthInt) {
    // we add one by setting the input carry to one
    let mut carry = 1;
    for (dd, (aa, bb)) in dst.iter_mut().zip(a.iter().zip(b.iter())) {
        // we invert b which in addition to adding 1 turns it into `-b`
        carry = adc(dd, carry, *aa, !(*bb));
    }
    mask_msb(dst, width);
}

/// Schoolbook multiplication, truncated to `dst.len()` words.
#[inline]
pub(crate) fn mul(dst: &mut [Word], a: &[Word], b: &[Word], width: WidthInt) {
    clear(dst);
    for (ii, &aa) in a.iter().enumerate() {
        if aa == 0 {
            continue;
        }
        let mut carry: DoubleWord = 0;
        for (jj, &bb) in b.iter().enumerate() {
            let Some(d) = dst.get_mut(ii + jj) else {
                break;
            };
            // (2^32 - 1)^2 + 2 * (2^32 - 1) == 2^64 - 1, thus this can never overflow
            let t = aa as DoubleWord * bb as DoubleWord + *d as DoubleWord + carry;
            *d = t as Word;
            carry = t >> Word::BITS;
        }
        if let Some(d) = dst.get_mut(ii + b.len()) {
            *d = carry as Word;
        }
    }
    mask_msb(dst, width);
}

/// Only the least significant word of `b` is used as the amount.
/// Returns `None` if we are shifting by `width` or more.
#[inline]
pub(crate) fn get_shift_amount(b: &[Word], width: WidthInt) -> Option<WidthInt> {
    let shift_amount = b[0];
    if shift_amount >= width as Word {
        None
    } else {
        Some(shift_amount as WidthInt)
    }
}

#[inline]
pub(crate) fn shift_right(dst: &mut [Word], a: &[Word], amount: Option<WidthInt>, width: WidthInt) {
    // clear the destination
    clear(dst);

    // over shift => all zeros
    let Some(shift_amount) = amount else {
        return;
    };

    // otherwise we actually perform the shift by converting it to a slice
    let hi = width - 1;
    let lo = shift_amount;
    let result_width = hi - lo + 1;
    let result_words = words_for(result_width);
    slice(&mut dst[..result_words], a, hi, lo);
}

#[inline]
pub(crate) fn arithmetic_shift_right(
    dst: &mut [Word],
    a: &[Word],
    amount: Option<WidthInt>,
    width: WidthInt,
) {
    // perform shift
    shift_right(dst, a, amount, width);

    // pad with sign bit if necessary
    if is_neg(a, width) {
        match amount {
            None => {
                // over shift => we just need to set everything to 1
                set(dst);
                mask_msb(dst, width);
            }
            Some(amount) => {
                if amount > 0 {
                    let res_width = width - amount;
                    let local_msb = (res_width - 1) % Word::BITS;
                    let msb_word = ((res_width - 1) / Word::BITS) as usize;
                    if local_msb < (Word::BITS - 1) {
                        let msb_word_mask = mask(Word::BITS - (local_msb + 1));
                        dst[msb_word] |= msb_word_mask << (local_msb + 1);
                    }
                    set(&mut dst[(msb_word + 1)..]);
                    mask_msb(dst, width);
                }
            }
        }
    }
}

#[inline]
pub(crate) fn shift_left(dst: &mut [Word], a: &[Word], amount: Option<WidthInt>, width: WidthInt) {
    // over shift => all zeros
    let Some(shift_amount) = amount else {
        clear(dst);
        return;
    };

    let shift_left = shift_amount % Word::BITS;
    let shift_words = shift_amount / Word::BITS;
    let shift_right = Word::BITS - shift_left;
    let zeros = std::iter::repeat(&(0 as Word)).take(shift_words as usize);
    let mut prev = 0;
    for (d, s) in dst.iter_mut().zip(zeros.chain(a.iter())) {
        if shift_left == 0 {
            *d = *s;
        } else {
            *d = (*s << shift_left) | prev;
            prev = *s >> shift_right;
        }
    }
    // whole-word moves can also carry bits past the msb
    mask_msb(dst, width);
}

#[inline]
pub(crate) fn negate(dst: &mut [Word], b: &[Word], width: WidthInt) {
    dst.clone_from_slice(b);
    negate_in_place(dst, width);
}

#[inline]
pub(crate) fn negate_in_place(dst: &mut [Word], width: WidthInt) {
    // we add one by setting the input carry to one
    let mut carry = 1;
    for dd in dst.iter_mut() {
        // we invert b which in addition to adding 1 turns it into `-b`
        let b = !(*dd);
        carry = adc(dd, carry, 0, b);
    }
    mask_msb(dst, width);
}

/// Multiplies `dst` by `factor` and adds `addend`. Returns the carry out of the msb word.
#[inline]
pub(crate) fn mul_add_small(dst: &mut [Word], factor: Word, addend: Word) -> Word {
    let mut carry = addend as DoubleWord;
    for d in dst.iter_mut() {
        let t = *d as DoubleWord * factor as DoubleWord + carry;
        *d = t as Word;
        carry = t >> Word::BITS;
    }
    carry as Word
}

/// Divides `dst` in place by `divisor` and returns the remainder.
#[inline]
pub(crate) fn div_rem_small(dst: &mut [Word], divisor: Word) -> Word {
    debug_assert_ne!(divisor, 0);
    let mut rem: DoubleWord = 0;
    for d in dst.iter_mut().rev() {
        let cur = (rem << Word::BITS) | *d as DoubleWord;
        *d = (cur / divisor as DoubleWord) as Word;
        rem = cur % divisor as DoubleWord;
    }
    rem as Word
}

//////////////////////////
// comparisons
//////////////////////////

#[inline]
pub(crate) fn cmp_equal(a: &[Word], b: &[Word]) -> bool {
    a.iter().zip(b.iter()).all(|(a, b)| a == b)
}

/// Multi-word unsigned comparison, starting at the most significant word.
#[inline]
pub(crate) fn cmp(a: &[Word], b: &[Word]) -> Ordering {
    debug_assert_eq!(a.len(), b.len());
    for (a, b) in a.iter().rev().zip(b.iter().rev()) {
        match a.cmp(b) {
            Ordering::Equal => {} // continue
            other => return other,
        }
    }
    Ordering::Equal
}

#[inline]
pub(crate) fn is_neg(src: &[Word], width: WidthInt) -> bool {
    let msb_bit_id = (width - 1) % Word::BITS;
    match src.last() {
        Some(msb_word) => ((msb_word >> msb_bit_id) & 1) == 1,
        None => false,
    }
}

/// Two's complement comparison of two values of equal width.
#[inline]
pub(crate) fn cmp_signed(a: &[Word], b: &[Word], width: WidthInt) -> Ordering {
    match (is_neg(a, width), is_neg(b, width)) {
        (true, false) => Ordering::Less,    // -|a| < |b|
        (false, true) => Ordering::Greater, // |a| > -|b|
        // with equal signs, the unsigned order of the bit patterns matches the signed order
        _ => cmp(a, b),
    }
}

#[inline]
pub(crate) fn word_to_bool(value: Word) -> bool {
    (value & 1) == 1
}

#[cfg(test)]
pub(crate) fn assert_unused_bits_zero(value: &[Word], width: WidthInt) {
    let offset = width % Word::BITS;
    if offset > 0 {
        let msb = *value.last().unwrap();
        let m = !mask(offset);
        let unused = msb & m;
        assert_eq!(unused, 0, "unused msb bits need to be zero!")
    }
}
