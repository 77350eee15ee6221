// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
use crate::bv::io::strings::{FormatConfig, ParseIntError};
use crate::bv::store::WordStore;
use crate::{BitVecMutOps, BitVecOps, Logic, PartSelect, States, WidthInt, Word};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Owned bit-vector value of arbitrary width in two- or four-state mode.
///
/// Equality and ordering are defined over the value only: the name and the state mode
/// do not take part, and operands of different widths are compared as if the narrower
/// one was zero extended.
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub struct BitVector {
    store: WordStore,
    name: Option<String>,
}

impl BitVector {
    fn from_store(store: WordStore) -> Self {
        Self { store, name: None }
    }

    /// Zero-filled value. Returns an error for a zero width.
    pub fn try_zero(width: WidthInt, states: States) -> crate::Result<Self> {
        Ok(Self::from_store(WordStore::new(width, states)?))
    }

    /// Zero-filled two-state value. Panics if `width` is zero.
    pub fn zero(width: WidthInt) -> Self {
        Self::zero_with(width, States::TwoState)
    }

    /// Zero-filled value. Panics if `width` is zero.
    pub fn zero_with(width: WidthInt, states: States) -> Self {
        match Self::try_zero(width, states) {
            Ok(value) => value,
            Err(_) => panic!("zero bit is not supported!"),
        }
    }

    pub fn ones(width: WidthInt) -> Self {
        let mut out = Self::zero(width);
        out.assign_ones();
        out
    }

    /// Four-state value with every bit set to `X`.
    pub fn xs(width: WidthInt) -> Self {
        Self::filled(width, Logic::X)
    }

    /// Four-state value with every bit set to `Z`.
    pub fn zs(width: WidthInt) -> Self {
        Self::filled(width, Logic::Z)
    }

    /// Four-state value with every bit set to `value`.
    pub fn filled(width: WidthInt, value: Logic) -> Self {
        let mut out = Self::zero_with(width, States::FourState);
        out.assign_logic(value);
        out
    }

    /// Two-state value holding `value` truncated to `width` bits.
    pub fn from_u64(value: u64, width: WidthInt) -> Self {
        let mut out = Self::zero(width);
        out.assign_from_u64(value);
        out
    }

    /// Two-state value holding `value` sign extended or truncated to `width` bits.
    pub fn from_i64(value: i64, width: WidthInt) -> Self {
        let mut out = Self::zero(width);
        out.assign_from_i64(value);
        out
    }

    pub fn from_u128(value: u128, width: WidthInt) -> Self {
        let mut out = Self::zero(width);
        out.assign_from_u128(value);
        out
    }

    pub fn from_bool(value: bool) -> Self {
        Self::from_u64(value as u64, 1)
    }

    /// 1-bit value. `X` and `Z` produce a four-state value.
    pub fn from_logic(value: Logic) -> Self {
        let states = if value.is_known() {
            States::TwoState
        } else {
            States::FourState
        };
        let mut out = Self::zero_with(1, states);
        out.assign_logic(value);
        out
    }

    /// Builds a two-state value from little-endian `aval` words. Missing words are zero,
    /// extra words and bits are dropped.
    pub fn from_words(words: &[Word], width: WidthInt) -> Self {
        let mut out = Self::zero(width);
        crate::bv::arithmetic::assign(out.words_mut(), words);
        out.mask_msb();
        out
    }

    /// Builds a four-state value from little-endian `aval` and `bval` words.
    pub fn from_channels(aval: &[Word], bval: &[Word], width: WidthInt) -> Self {
        let mut out = Self::zero_with(width, States::FourState);
        let (a, b) = out.channels_mut();
        crate::bv::arithmetic::assign(a, aval);
        crate::bv::arithmetic::assign(b, bval);
        out.mask_msb();
        out
    }

    #[cfg(feature = "bigint")]
    pub fn from_big_int(value: &num_bigint::BigInt, width: WidthInt) -> Self {
        let mut out = Self::zero(width);
        crate::bv::io::bigint::from_big_int(value, width, out.words_mut());
        out
    }

    #[cfg(feature = "bigint")]
    pub fn from_big_uint(value: &num_bigint::BigUint, width: WidthInt) -> Self {
        let mut out = Self::zero(width);
        crate::bv::io::bigint::from_big_uint(value, width, out.words_mut());
        out
    }

    /// Parse a string of `0`, `1`, `x` and `z` digits. The width of the resulting value is the
    /// number of digits. A value with `x` or `z` digits is four-state.
    pub fn from_bit_str(value: &str) -> Result<Self, ParseIntError> {
        let width = crate::bv::io::strings::determine_width_from_str_radix(value, 2);
        Self::from_str_radix(value, 2, width)
    }

    /// Parse a string of hex digits. The width of the resulting value is the number of digits times 4.
    pub fn from_hex_str(value: &str) -> Result<Self, ParseIntError> {
        let width = crate::bv::io::strings::determine_width_from_str_radix(value, 16);
        Self::from_str_radix(value, 16, width)
    }

    pub fn from_str_radix(value: &str, radix: u32, width: WidthInt) -> Result<Self, ParseIntError> {
        // the empty string is the only way to get a width of zero, it turns into a single zero bit
        let width = std::cmp::max(width, 1);
        let states = if crate::bv::io::strings::has_unknown_digits(value) {
            States::FourState
        } else {
            States::TwoState
        };
        let mut out = Self::zero_with(width, states);
        out.assign_from_str_radix(value, radix)?;
        Ok(out)
    }

    /// Attaches a display label.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Converts into `states`. Converting to two-state turns `X` and `Z` into `0`.
    pub fn with_states(mut self, states: States) -> Self {
        self.store.set_states(states);
        self
    }

    pub fn set_states(&mut self, states: States) {
        self.store.set_states(states);
    }

    /// Two-state copy with all `X` and `Z` bits turned into `0`.
    pub fn to_two_state(&self) -> Self {
        self.clone().with_states(States::TwoState)
    }

    /// Moves the value out, leaving `self` as an empty-but-valid 1-bit zero.
    pub fn take(&mut self) -> Self {
        Self {
            store: self.store.take(),
            name: self.name.take(),
        }
    }

    /// Changes the width in place. New high bits are zero.
    pub fn resize(&mut self, width: WidthInt) -> crate::Result<()> {
        self.store.resize(width)
    }

    /// Changes the width in place. New high bits are set to `fill`.
    pub fn resize_with(&mut self, width: WidthInt, fill: Logic) -> crate::Result<()> {
        self.store.resize_with(width, fill)
    }

    /// Direct access to the underlying word storage.
    pub fn store(&self) -> &WordStore {
        &self.store
    }

    /// A view of `hi..=lo` that can be read or written. Indices are clamped into range.
    pub fn select(&mut self, hi: WidthInt, lo: WidthInt) -> PartSelect<'_> {
        PartSelect::new(self, hi, lo)
    }

    /// Copies `src_hi..=src_lo` into `dst_hi..=dst_lo`. The source range is read completely
    /// before the destination is written, so the two ranges may overlap.
    pub fn copy_range(
        &mut self,
        dst_hi: WidthInt,
        dst_lo: WidthInt,
        src_hi: WidthInt,
        src_lo: WidthInt,
    ) {
        let value = self.slice(src_hi, src_lo);
        self.select(dst_hi, dst_lo).assign(value);
    }

    /// Words of both channels with the zero words at the top removed. Values that compare equal
    /// produce the same trimmed words.
    fn trimmed(&self) -> (&[Word], &[Word]) {
        let used = self
            .words()
            .iter()
            .zip(self.bval().iter())
            .rposition(|(a, b)| *a != 0 || *b != 0)
            .map(|ii| ii + 1)
            .unwrap_or(0);
        (&self.words()[..used], &self.bval()[..used])
    }
}

pub(super) const fn u128_to_words(value: u128) -> [Word; 4] {
    // lsb first, then msb
    [
        value as Word,
        (value >> Word::BITS) as Word,
        (value >> (2 * Word::BITS)) as Word,
        (value >> (3 * Word::BITS)) as Word,
    ]
}

impl<O: BitVecOps + ?Sized> PartialEq<O> for BitVector {
    fn eq(&self, other: &O) -> bool {
        self.is_equal(other)
    }
}

impl Eq for BitVector {}

impl PartialEq<u64> for BitVector {
    fn eq(&self, other: &u64) -> bool {
        !self.has_unknown() && self.to_u64() == Some(*other)
    }
}

impl Hash for BitVector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (aval, bval) = self.trimmed();
        aval.hash(state);
        bval.hash(state);
    }
}

impl<O: BitVecOps + ?Sized> PartialOrd<O> for BitVector {
    /// Unsigned magnitude order. `None` if either side contains `X` or `Z` bits.
    fn partial_cmp(&self, other: &O) -> Option<Ordering> {
        self.compare(other)
    }
}

impl From<bool> for BitVector {
    fn from(value: bool) -> Self {
        BitVector::from_bool(value)
    }
}

impl From<Logic> for BitVector {
    fn from(value: Logic) -> Self {
        BitVector::from_logic(value)
    }
}

impl<'a> From<PartSelect<'a>> for BitVector {
    fn from(value: PartSelect<'a>) -> Self {
        value.get()
    }
}

impl std::str::FromStr for BitVector {
    type Err = ParseIntError;

    /// Parses a Verilog style literal like `8'hA5`, `4'b10xz`, `12'd100` or `'h1f`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lit = crate::bv::io::strings::parse_verilog_literal(s)?;
        Self::from_str_radix(lit.digits, lit.radix, lit.width)
    }
}

impl std::fmt::Debug for BitVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "BitVector({name} = {}'b{})", self.width(), self.to_bit_str()),
            None => write!(f, "BitVector({}'b{})", self.width(), self.to_bit_str()),
        }
    }
}

impl std::fmt::Display for BitVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format(&FormatConfig::default()))
    }
}

impl std::fmt::LowerHex for BitVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let config = FormatConfig::hex().with_prefix(f.alternate());
        f.write_str(&self.format(&config))
    }
}

impl std::fmt::Binary for BitVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let config = FormatConfig::binary().with_prefix(f.alternate());
        f.write_str(&self.format(&config))
    }
}

impl BitVecOps for BitVector {
    fn width(&self) -> WidthInt {
        self.store.width()
    }

    fn states(&self) -> States {
        self.store.states()
    }

    fn words(&self) -> &[Word] {
        self.store.aval()
    }

    fn bval(&self) -> &[Word] {
        self.store.bval()
    }
}

impl BitVecMutOps for BitVector {
    fn channels_mut(&mut self) -> (&mut [Word], &mut [Word]) {
        self.store.channels_mut()
    }

    fn mask_msb(&mut self) {
        self.store.apply_mask();
    }
}
