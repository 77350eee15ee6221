// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
//
// Two- and four-state bit-vector values as seen by a Verilog testbench.

mod bv;
mod error;
pub mod mirror;

/// This type restricts the maximum width that a bit-vector type is allowed to have.
pub type WidthInt = u32;

/// Word size for values. Matches the 32-bit `aval`/`bval` words of the VPI vector encoding.
pub type Word = u32;

pub type DoubleWord = u64;

const _: () = assert!(Word::BITS * 2 == DoubleWord::BITS);

/// Value domain of a bit-vector.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub enum States {
    /// Every bit is `0` or `1`. The `bval` channel is always zero.
    #[default]
    TwoState,
    /// Every bit is `0`, `1`, `X` or `Z`.
    FourState,
}

impl States {
    /// The state mode of a result computed from operands in modes `self` and `other`.
    #[inline]
    pub fn join(self, other: States) -> States {
        if self == States::FourState || other == States::FourState {
            States::FourState
        } else {
            States::TwoState
        }
    }

    #[inline]
    pub fn is_four_state(self) -> bool {
        self == States::FourState
    }
}

pub use bv::*;
pub use error::{BitVecError, Result};
pub use mirror::{Mirrored, SignalTransport};
