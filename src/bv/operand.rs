// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>

use crate::{BitVecMutOps, BitVector, Logic, PartSelect, WidthInt, Word};
use std::borrow::Cow;

/// Right-hand side of a bit-vector operator: a plain integer or another vector.
///
/// Integers have no width of their own. They take on the width of the vector they are
/// combined with, unsigned values truncated and signed values sign extended.
#[derive(Debug, Clone)]
pub enum Operand<'a> {
    Unsigned(u64),
    Signed(i64),
    Vector(Cow<'a, BitVector>),
}

impl<'a> Operand<'a> {
    /// Turns the operand into a vector. Integers become `width` bits wide, vectors keep their
    /// own width.
    pub fn resolve(self, width: WidthInt) -> Cow<'a, BitVector> {
        match self {
            Operand::Unsigned(value) => Cow::Owned(BitVector::from_u64(value, width)),
            Operand::Signed(value) => {
                let mut out = BitVector::zero(width);
                out.assign_from_i64(value);
                Cow::Owned(out)
            }
            Operand::Vector(value) => value,
        }
    }

    /// Shift amount operand. Vectors are used as they are. Integers are treated as unsigned
    /// and saturate at one word, so an amount that does not fit still shifts everything out.
    pub fn into_shift_amount(self) -> Cow<'a, BitVector> {
        match self {
            Operand::Unsigned(value) => Cow::Owned(saturated_word(value)),
            Operand::Signed(value) => Cow::Owned(saturated_word(value as u64)),
            Operand::Vector(value) => value,
        }
    }

    /// `true` for integer operands.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Operand::Vector(_))
    }
}

fn saturated_word(value: u64) -> BitVector {
    let amount = std::cmp::min(value, Word::MAX as u64);
    BitVector::from_u64(amount, Word::BITS)
}

macro_rules! impl_unsigned_operand {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Operand<'_> {
                fn from(value: $ty) -> Self {
                    Operand::Unsigned(value as u64)
                }
            }
        )*
    };
}

macro_rules! impl_signed_operand {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Operand<'_> {
                fn from(value: $ty) -> Self {
                    Operand::Signed(value as i64)
                }
            }
        )*
    };
}

impl_unsigned_operand!(u8, u16, u32, u64, usize, bool);
impl_signed_operand!(i8, i16, i32, i64, isize);

impl<'a> From<&'a BitVector> for Operand<'a> {
    fn from(value: &'a BitVector) -> Self {
        Operand::Vector(Cow::Borrowed(value))
    }
}

impl From<BitVector> for Operand<'_> {
    fn from(value: BitVector) -> Self {
        Operand::Vector(Cow::Owned(value))
    }
}

impl From<Logic> for Operand<'_> {
    fn from(value: Logic) -> Self {
        Operand::Vector(Cow::Owned(BitVector::from_logic(value)))
    }
}

impl From<PartSelect<'_>> for Operand<'_> {
    fn from(value: PartSelect<'_>) -> Self {
        Operand::Vector(Cow::Owned(value.get()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BitVecOps;

    #[test]
    fn test_scalars_adopt_width() {
        let a = Operand::from(0x1FFu32).resolve(8);
        assert_eq!(a.width(), 8);
        assert_eq!(a.to_u64(), Some(0xFF));
        let b = Operand::from(-2i8).resolve(70);
        assert_eq!(b.width(), 70);
        assert_eq!(b.to_i64(), Some(-2));
    }

    #[test]
    fn test_vectors_keep_width() {
        let v = BitVector::from_u64(3, 12);
        let op = Operand::from(&v);
        assert!(!op.is_scalar());
        assert_eq!(op.resolve(64).width(), 12);
    }

    #[test]
    fn test_shift_amount_saturates() {
        assert_eq!(Operand::from(5u8).into_shift_amount().to_u64(), Some(5));
        let big = Operand::from(0x1_0000_0001u64).into_shift_amount();
        assert_eq!(big.to_u64(), Some(Word::MAX as u64));
        let neg = Operand::from(-1i32).into_shift_amount();
        assert_eq!(neg.to_u64(), Some(Word::MAX as u64));
        let v = BitVector::from_u64(0x1_0000_0001, 64);
        assert_eq!(Operand::from(&v).into_shift_amount().width(), 64);
    }
}
