// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>

use crate::Word;

/// A single four-state bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub enum Logic {
    #[default]
    Zero,
    One,
    /// unknown
    X,
    /// high impedance
    Z,
}

impl Logic {
    /// Decodes an `(aval, bval)` bit pair.
    #[inline]
    pub fn from_bits(aval: bool, bval: bool) -> Self {
        match (aval, bval) {
            (false, false) => Logic::Zero,
            (true, false) => Logic::One,
            (true, true) => Logic::X,
            (false, true) => Logic::Z,
        }
    }

    /// Encodes as an `(aval, bval)` bit pair.
    #[inline]
    pub fn to_bits(self) -> (bool, bool) {
        match self {
            Logic::Zero => (false, false),
            Logic::One => (true, false),
            Logic::X => (true, true),
            Logic::Z => (false, true),
        }
    }

    /// Returns a word with all bits set to `self`, one word per channel.
    #[inline]
    pub(crate) fn to_words(self) -> (Word, Word) {
        let (a, b) = self.to_bits();
        (
            if a { Word::MAX } else { 0 },
            if b { Word::MAX } else { 0 },
        )
    }

    #[inline]
    pub fn is_known(self) -> bool {
        matches!(self, Logic::Zero | Logic::One)
    }

    #[inline]
    pub fn to_bool(self) -> Option<bool> {
        match self {
            Logic::Zero => Some(false),
            Logic::One => Some(true),
            _ => None,
        }
    }

    /// What a two-state variable holds after this value was assigned to it.
    #[inline]
    pub fn to_two_state(self) -> Self {
        match self {
            Logic::One => Logic::One,
            _ => Logic::Zero,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Logic::Zero => '0',
            Logic::One => '1',
            Logic::X => 'x',
            Logic::Z => 'z',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Logic::Zero),
            '1' => Some(Logic::One),
            'x' | 'X' => Some(Logic::X),
            'z' | 'Z' | '?' => Some(Logic::Z),
            _ => None,
        }
    }

    fn apply(
        self,
        rhs: Logic,
        op: fn((&mut [Word], &mut [Word]), (&[Word], &[Word]), (&[Word], &[Word]), u32),
    ) -> Logic {
        let (la, lb) = self.to_bits();
        let (ra, rb) = rhs.to_bits();
        let (mut a, mut b) = ([0 as Word], [0 as Word]);
        (op)(
            (&mut a[..], &mut b[..]),
            (&[la as Word][..], &[lb as Word][..]),
            (&[ra as Word][..], &[rb as Word][..]),
            1,
        );
        Logic::from_bits(a[0] == 1, b[0] == 1)
    }
}

impl From<bool> for Logic {
    fn from(value: bool) -> Self {
        if value {
            Logic::One
        } else {
            Logic::Zero
        }
    }
}

impl std::fmt::Display for Logic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl std::ops::Not for Logic {
    type Output = Logic;

    fn not(self) -> Self::Output {
        match self {
            Logic::Zero => Logic::One,
            Logic::One => Logic::Zero,
            _ => Logic::X,
        }
    }
}

impl std::ops::BitAnd for Logic {
    type Output = Logic;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.apply(rhs, crate::bv::arithmetic::and)
    }
}

impl std::ops::BitOr for Logic {
    type Output = Logic;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.apply(rhs, crate::bv::arithmetic::or)
    }
}

impl std::ops::BitXor for Logic {
    type Output = Logic;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.apply(rhs, crate::bv::arithmetic::xor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_round_trip() {
        for l in [Logic::Zero, Logic::One, Logic::X, Logic::Z] {
            let (a, b) = l.to_bits();
            assert_eq!(Logic::from_bits(a, b), l);
            assert_eq!(Logic::from_char(l.to_char()), Some(l));
        }
    }

    #[test]
    fn test_truth_tables() {
        use Logic::*;
        assert_eq!(Zero & X, Zero);
        assert_eq!(One & X, X);
        assert_eq!(One & Z, X);
        assert_eq!(One & One, One);
        assert_eq!(One | X, One);
        assert_eq!(Zero | Z, X);
        assert_eq!(Zero | Zero, Zero);
        assert_eq!(One ^ One, Zero);
        assert_eq!(One ^ X, X);
        assert_eq!(!Z, X);
    }
}
