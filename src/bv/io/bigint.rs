// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>

use crate::bv::arithmetic::{is_neg, mask_msb, negate_in_place, sign_extend, zero_extend};
use crate::{WidthInt, Word};
use num_bigint::{BigInt, BigUint, Sign};

pub(crate) fn to_big_uint(words: &[Word]) -> BigUint {
    BigUint::from_slice(words)
}

pub(crate) fn to_big_int(words: &[Word], width: WidthInt) -> BigInt {
    if is_neg(words, width) {
        let mut magnitude = Vec::from(words);
        negate_in_place(&mut magnitude, width);
        BigInt::from_biguint(Sign::Minus, BigUint::from_slice(&magnitude))
    } else {
        BigInt::from_biguint(Sign::Plus, BigUint::from_slice(words))
    }
}

/// Writes `value` truncated to `width` bits into `out`.
pub(crate) fn from_big_uint(value: &BigUint, width: WidthInt, out: &mut [Word]) {
    zero_extend(out, &value.to_u32_digits());
    mask_msb(out, width);
}

/// Writes `value` as a two's complement number, sign extended or truncated to `width` bits.
pub(crate) fn from_big_int(value: &BigInt, width: WidthInt, out: &mut [Word]) {
    let (sign, digits) = value.to_u32_digits();
    if digits.is_empty() {
        zero_extend(out, &[]);
        return;
    }
    // negate with one extra bit of headroom so the sign survives
    let digits_width = digits.len() as WidthInt * Word::BITS + 1;
    let mut extended = vec![0; digits.len() + 1];
    zero_extend(&mut extended, &digits);
    if sign == Sign::Minus {
        negate_in_place(&mut extended, digits_width);
    }
    if out.len() >= extended.len() {
        sign_extend(out, &extended, digits_width, width);
    } else {
        zero_extend(out, &extended);
    }
    mask_msb(out, width);
}
