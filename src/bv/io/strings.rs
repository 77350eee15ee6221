// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>

use crate::bv::arithmetic::{
    self, div_rem_small, get_bits, is_bit_set, is_neg, mask, mul_add_small, negate_in_place,
    set_range, words_for,
};
use crate::{Logic, WidthInt, Word};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct ParseIntError {
    pub kind: IntErrorKind,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntErrorKind {
    /// An invalid digit was encountered.
    #[error("invalid digit found in string")]
    InvalidDigit,
    /// The integer does not fit into the size of the bitvector.
    #[error("number too large to fit in target width")]
    ExceedsWidth,
    /// A Verilog literal without a valid size or base.
    #[error("malformed literal")]
    InvalidLiteral,
}

impl From<IntErrorKind> for ParseIntError {
    fn from(kind: IntErrorKind) -> Self {
        ParseIntError { kind }
    }
}

/// Digit base used when rendering a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub enum Radix {
    Binary,
    #[default]
    Hex,
    Decimal,
}

/// Presentation options for [`crate::BitVecOps::format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatConfig {
    pub radix: Radix,
    /// Render all digits the width calls for, including leading zeros.
    pub zero_pad: bool,
    /// `0b` or `0x` in front of binary or hex digits.
    pub prefix: bool,
    /// `_` every 32 binary or 8 hex digits, counted from the lsb.
    pub word_divider: bool,
    /// `,` every 3 decimal digits.
    pub group_thousands: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            radix: Radix::Hex,
            zero_pad: true,
            prefix: false,
            word_divider: false,
            group_thousands: false,
        }
    }
}

impl FormatConfig {
    pub fn hex() -> Self {
        Self::default()
    }

    pub fn binary() -> Self {
        Self {
            radix: Radix::Binary,
            ..Self::default()
        }
    }

    pub fn decimal() -> Self {
        Self {
            radix: Radix::Decimal,
            zero_pad: false,
            ..Self::default()
        }
    }

    pub fn with_prefix(self, prefix: bool) -> Self {
        Self { prefix, ..self }
    }

    pub fn with_zero_pad(self, zero_pad: bool) -> Self {
        Self { zero_pad, ..self }
    }

    pub fn with_word_divider(self, word_divider: bool) -> Self {
        Self {
            word_divider,
            ..self
        }
    }

    pub fn with_group_thousands(self, group_thousands: bool) -> Self {
        Self {
            group_thousands,
            ..self
        }
    }
}

#[inline]
fn logic_at(aval: &[Word], bval: &[Word], pos: WidthInt) -> Logic {
    Logic::from_bits(is_bit_set(aval, pos), is_bit_set(bval, pos))
}

/// Renders a group of bits as a single character: `x`/`z` if all bits are X/Z,
/// `X`/`Z` if only some are. `None` if all bits are known.
#[inline]
fn unknown_digit(a: Word, b: Word, m: Word) -> Option<char> {
    if b == 0 {
        None
    } else if b == m && a == m {
        Some('x')
    } else if b == m && a == 0 {
        Some('z')
    } else if a & b != 0 {
        Some('X')
    } else {
        Some('Z')
    }
}

pub(crate) fn to_bit_str(aval: &[Word], bval: &[Word], width: WidthInt) -> String {
    let out = String::with_capacity(width as usize);
    to_bit_str_internal(aval, bval, width, out)
}

fn to_bit_str_internal(aval: &[Word], bval: &[Word], width: WidthInt, mut out: String) -> String {
    for pos in (0..width).rev() {
        out.push(logic_at(aval, bval, pos).to_char());
    }
    out
}

/// Interprets the bits as a two's complement integer.
pub(crate) fn to_bit_str_signed(aval: &[Word], bval: &[Word], width: WidthInt) -> String {
    match signed_magnitude(aval, bval, width) {
        Some((true, magnitude, mag_width)) => {
            let mut out = String::with_capacity(mag_width as usize + 1);
            out.push('-');
            to_bit_str_internal(&magnitude, &vec![0; magnitude.len()], mag_width, out)
        }
        Some((false, _, mag_width)) => to_bit_str(aval, bval, mag_width),
        None => to_bit_str(aval, bval, width),
    }
}

/// Splits a known value into sign and magnitude. The magnitude drops the sign bit unless
/// it is needed, which only happens for the most negative value.
fn signed_magnitude(
    aval: &[Word],
    bval: &[Word],
    width: WidthInt,
) -> Option<(bool, Vec<Word>, WidthInt)> {
    if arithmetic::any_set(bval) {
        return None;
    }
    let positive_width = std::cmp::max(width - 1, 1);
    if is_neg(aval, width) {
        let mut magnitude = Vec::from(aval);
        negate_in_place(&mut magnitude, width);
        let mag_width = if is_bit_set(&magnitude, width - 1) {
            width
        } else {
            positive_width
        };
        Some((true, magnitude, mag_width))
    } else {
        Some((false, Vec::new(), positive_width))
    }
}

/// 4 bits fit into a single hex digit
const BITS_PER_HEX_DIGIT: u32 = 4;
const WORD_HEX_DIGITS: u32 = Word::BITS / BITS_PER_HEX_DIGIT;

pub(crate) fn to_hex_str(aval: &[Word], bval: &[Word], width: WidthInt) -> String {
    let out = String::with_capacity(width.div_ceil(BITS_PER_HEX_DIGIT) as usize);
    to_hex_str_internal(aval, bval, width, out)
}

fn to_hex_str_internal(aval: &[Word], bval: &[Word], width: WidthInt, mut out: String) -> String {
    let digits = width.div_ceil(BITS_PER_HEX_DIGIT);
    for digit in (0..digits).rev() {
        let lo = digit * BITS_PER_HEX_DIGIT;
        let hi = std::cmp::min(lo + BITS_PER_HEX_DIGIT - 1, width - 1);
        let a = get_bits(aval, hi, lo);
        let b = get_bits(bval, hi, lo);
        match unknown_digit(a, b, mask(hi - lo + 1)) {
            Some(c) => out.push(c),
            // a is at most 15
            None => out.push(char::from_digit(a, 16).unwrap_or('?')),
        }
    }
    out
}

/// Interprets the bits as a two's complement integer.
pub(crate) fn to_hex_str_signed(aval: &[Word], bval: &[Word], width: WidthInt) -> String {
    match signed_magnitude(aval, bval, width) {
        Some((true, magnitude, mag_width)) => {
            let mut out = String::with_capacity(mag_width.div_ceil(BITS_PER_HEX_DIGIT) as usize + 1);
            out.push('-');
            to_hex_str_internal(&magnitude, &vec![0; magnitude.len()], mag_width, out)
        }
        Some((false, _, mag_width)) => to_hex_str(aval, bval, mag_width),
        None => to_hex_str(aval, bval, width),
    }
}

pub(crate) fn to_dec_str(aval: &[Word], bval: &[Word], width: WidthInt) -> String {
    let used = &bval[..words_for(width)];
    let m = mask(width % Word::BITS);
    let all_unknown = used
        .iter()
        .enumerate()
        .all(|(ii, b)| *b == if ii + 1 == used.len() { m } else { Word::MAX });
    if arithmetic::any_set(used) {
        let all_x = all_unknown && arithmetic::cmp_equal(&aval[..used.len()], used);
        let all_z = all_unknown && aval.iter().take(used.len()).all(|a| *a == 0);
        let any_x = aval.iter().zip(used.iter()).any(|(a, b)| a & b != 0);
        let c = match (all_x, all_z, any_x) {
            (true, _, _) => 'x',
            (_, true, _) => 'z',
            (_, _, true) => 'X',
            _ => 'Z',
        };
        return c.to_string();
    }
    let out = String::with_capacity((width * 3 / 10 + 1) as usize);
    to_dec_str_internal(&aval[..used.len()], out)
}

/// Returns the number of lsb words that are non-zero
#[inline]
fn words_used(words: &[Word]) -> usize {
    let mut len = words.len();
    for &w in words.iter().rev() {
        if w != 0 {
            return len;
        }
        len -= 1;
    }
    0 // all words are zero
}

#[inline]
fn words_to_u64(words: &[Word]) -> u64 {
    debug_assert!(words.len() >= 2);
    ((words[1] as u64) << Word::BITS) | words[0] as u64
}

fn to_dec_str_internal(values: &[Word], mut out: String) -> String {
    // see how many words are actually used
    let words_used = words_used(values);

    match words_used {
        0 => out.push('0'),
        1 => out.push_str(&values[0].to_string()),
        2 => out.push_str(&words_to_u64(values).to_string()),
        _ => to_dec_str_wide(&values[0..words_used], &mut out),
    }
    out
}

/// Repeatedly divides by the largest power of ten that fits into a word.
fn to_dec_str_wide(words: &[Word], out: &mut String) {
    const CHUNK: Word = 1_000_000_000;
    let mut value = Vec::from(words);
    let mut chunks = Vec::new();
    while arithmetic::any_set(&value) {
        chunks.push(div_rem_small(&mut value, CHUNK));
    }
    let mut chunks = chunks.iter().rev();
    if let Some(msb) = chunks.next() {
        out.push_str(&msb.to_string());
    }
    for chunk in chunks {
        out.push_str(&format!("{chunk:09}"));
    }
}

/// Renders the value according to `config`.
pub(crate) fn format(aval: &[Word], bval: &[Word], width: WidthInt, config: &FormatConfig) -> String {
    let digits = match config.radix {
        Radix::Binary => to_bit_str(aval, bval, width),
        Radix::Hex => to_hex_str(aval, bval, width),
        Radix::Decimal => {
            let digits = to_dec_str(aval, bval, width);
            if config.zero_pad && !arithmetic::any_set(bval) {
                let max_digits = max_dec_digits(width);
                let missing = max_digits.saturating_sub(digits.len());
                "0".repeat(missing) + &digits
            } else {
                digits
            }
        }
    };
    let digits = if config.zero_pad {
        digits
    } else {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    };
    let digits = match config.radix {
        Radix::Binary if config.word_divider => group_from_lsb(&digits, Word::BITS as usize, '_'),
        Radix::Hex if config.word_divider => group_from_lsb(&digits, WORD_HEX_DIGITS as usize, '_'),
        Radix::Decimal if config.group_thousands => group_from_lsb(&digits, 3, ','),
        _ => digits,
    };
    match (config.prefix, config.radix) {
        (true, Radix::Binary) => format!("0b{digits}"),
        (true, Radix::Hex) => format!("0x{digits}"),
        _ => digits,
    }
}

/// Number of decimal digits of the largest unsigned value of `width` bits.
fn max_dec_digits(width: WidthInt) -> usize {
    let mut ones = vec![Word::MAX; words_for(width)];
    arithmetic::mask_msb(&mut ones, width);
    to_dec_str_internal(&ones, String::new()).len()
}

fn group_from_lsb(digits: &str, group: usize, divider: char) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut out = String::with_capacity(chars.len() + chars.len() / group);
    for (ii, c) in chars.iter().enumerate() {
        let remaining = chars.len() - ii;
        if ii > 0 && remaining % group == 0 {
            out.push(divider);
        }
        out.push(*c);
    }
    out
}

#[inline]
fn bits_per_digit(radix: u32) -> Option<WidthInt> {
    match radix {
        2 => Some(1),
        8 => Some(3),
        16 => Some(4),
        _ => None,
    }
}

#[inline]
fn is_unknown_digit(c: u8) -> bool {
    matches!(c, b'x' | b'X' | b'z' | b'Z' | b'?')
}

/// `true` if the string contains at least one `x`, `z` or `?` digit.
pub(crate) fn has_unknown_digits(value: &str) -> bool {
    value.bytes().any(is_unknown_digit)
}

/// Number of bits needed to hold all digits of a binary, octal or hex string. A leading minus
/// adds one bit for the sign.
pub(crate) fn determine_width_from_str_radix(value: &str, radix: u32) -> WidthInt {
    debug_assert!(
        bits_per_digit(radix).is_some(),
        "only works for 2, 8 or 16 bit basis"
    );
    let starts_with_minus = value.starts_with('-');
    let num_digits = value
        .bytes()
        .filter(|c| !matches!(c, b'+' | b'-' | b'_'))
        .count() as WidthInt;
    let base_width = num_digits * bits_per_digit(radix).unwrap_or(BITS_PER_HEX_DIGIT);
    base_width + starts_with_minus as WidthInt
}

/// Value of one digit as an `(aval, bval)` pair of `bits` wide words.
#[inline]
fn digit_bits(digit: u8, radix: u32, bits: WidthInt) -> Result<(Word, Word), ParseIntError> {
    let all = mask(bits);
    match digit {
        b'x' | b'X' => Ok((all, all)),
        b'z' | b'Z' | b'?' => Ok((0, all)),
        _ => match (digit as char).to_digit(radix) {
            Some(value) => Ok((value, 0)),
            None => Err(IntErrorKind::InvalidDigit.into()),
        },
    }
}

/// Converts number string into bit vector value. Similar to `from_str_radix` in the Rust standard
/// library, but also accepts `x`, `z` and `?` digits as well as `_` separators.
/// If the most significant digit is `x` or `z`, the remaining high bits are filled with it.
pub(crate) fn from_str_radix(
    value: &str,
    radix: u32,
    aval: &mut [Word],
    bval: &mut [Word],
    width: WidthInt,
) -> Result<(), ParseIntError> {
    arithmetic::clear(aval);
    arithmetic::clear(bval);

    // The empty string becomes zero.
    if value.is_empty() {
        return Ok(());
    }

    // remove any sign
    let (is_negative, value) = match value.as_bytes() {
        [b'-', ..] => (true, &value[1..]),
        [b'+', ..] => (false, &value[1..]),
        _ => (false, value),
    };
    let digits: Vec<u8> = value.bytes().filter(|c| *c != b'_').collect();
    if digits.is_empty() {
        return Err(IntErrorKind::InvalidDigit.into());
    }

    let parsed_bits = match bits_per_digit(radix) {
        Some(bits) => parse_power_of_two(&digits, radix, bits, aval, bval, width)?,
        None if radix == 10 => parse_base_10(&digits, aval, bval, width)?,
        None => return Err(IntErrorKind::InvalidLiteral.into()),
    };

    // an unknown msb digit extends to the full width
    if is_unknown_digit(digits[0]) && parsed_bits < width {
        let (a, _) = digit_bits(digits[0], radix, 1)?;
        set_range(bval, width - 1, parsed_bits);
        if a != 0 {
            set_range(aval, width - 1, parsed_bits);
        }
    }

    if is_negative {
        if arithmetic::any_set(bval) {
            return Err(IntErrorKind::InvalidDigit.into());
        }
        negate_in_place(aval, width);
    }
    Ok(())
}

/// Binary, octal and hex digits map onto a fixed number of bits each.
fn parse_power_of_two(
    digits: &[u8],
    radix: u32,
    bits: WidthInt,
    aval: &mut [Word],
    bval: &mut [Word],
    width: WidthInt,
) -> Result<WidthInt, ParseIntError> {
    let mut pos: WidthInt = 0;
    // read from right to left
    for &c in digits.iter().rev() {
        let (a, b) = digit_bits(c, radix, bits)?;
        for bit in 0..bits {
            let (a_set, b_set) = ((a >> bit) & 1 == 1, (b >> bit) & 1 == 1);
            let target = pos + bit;
            if target >= width {
                // unknown digits may be truncated, known ones may not
                if a_set && !b_set {
                    return Err(IntErrorKind::ExceedsWidth.into());
                }
                continue;
            }
            if a_set {
                arithmetic::set_bit(aval, target);
            }
            if b_set {
                arithmetic::set_bit(bval, target);
            }
        }
        pos += bits;
    }
    Ok(std::cmp::min(pos, width))
}

fn parse_base_10(
    digits: &[u8],
    aval: &mut [Word],
    bval: &mut [Word],
    width: WidthInt,
) -> Result<WidthInt, ParseIntError> {
    // a decimal literal is either a single unknown digit or made up of known digits only
    if let [c] = digits {
        if is_unknown_digit(*c) {
            let (a, _) = digit_bits(*c, 10, 1)?;
            arithmetic::set(bval);
            if a != 0 {
                arithmetic::set(aval);
            }
            arithmetic::mask_msb(aval, width);
            arithmetic::mask_msb(bval, width);
            return Ok(width);
        }
    }
    for &c in digits {
        let value = match (c as char).to_digit(10) {
            Some(value) => value,
            None => return Err(IntErrorKind::InvalidDigit.into()),
        };
        if mul_add_small(aval, 10, value) != 0 {
            return Err(IntErrorKind::ExceedsWidth.into());
        }
    }
    let m = mask(width % Word::BITS);
    if aval.last().is_some_and(|msb| msb & !m != 0) {
        return Err(IntErrorKind::ExceedsWidth.into());
    }
    Ok(width)
}

/// A Verilog integer literal split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct VerilogLiteral<'a> {
    pub digits: &'a str,
    pub radix: u32,
    pub width: WidthInt,
}

/// Width of literals without a size.
const UNSIZED_WIDTH: WidthInt = 32;

/// Splits `8'hA5`, `'b1x`, `4'sd3` or a plain decimal number like `42`.
pub(crate) fn parse_verilog_literal(value: &str) -> Result<VerilogLiteral<'_>, ParseIntError> {
    let value = value.trim();
    let Some((size, rest)) = value.split_once('\'') else {
        if value.is_empty() {
            return Err(IntErrorKind::InvalidLiteral.into());
        }
        return Ok(VerilogLiteral {
            digits: value,
            radix: 10,
            width: UNSIZED_WIDTH,
        });
    };
    let width = match size.trim() {
        "" => UNSIZED_WIDTH,
        size => match size.replace('_', "").parse::<WidthInt>() {
            Ok(width) if width > 0 => width,
            _ => return Err(IntErrorKind::InvalidLiteral.into()),
        },
    };
    // the signed marker does not change the bits
    let rest = rest
        .strip_prefix('s')
        .or_else(|| rest.strip_prefix('S'))
        .unwrap_or(rest);
    let mut chars = rest.chars();
    let radix = match chars.next() {
        Some('b' | 'B') => 2,
        Some('o' | 'O') => 8,
        Some('d' | 'D') => 10,
        Some('h' | 'H') => 16,
        _ => return Err(IntErrorKind::InvalidLiteral.into()),
    };
    let digits = chars.as_str().trim();
    if digits.is_empty() {
        return Err(IntErrorKind::InvalidLiteral.into());
    }
    Ok(VerilogLiteral {
        digits,
        radix,
        width,
    })
}
