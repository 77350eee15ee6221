// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>

use crate::bv::ParseIntError;
use crate::WidthInt;
use thiserror::Error;

/// Errors reported by bit-vector operations that can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BitVecError {
    /// Bit-vectors need to be at least one bit wide.
    #[error("invalid bit-vector width: {width}")]
    InvalidWidth { width: WidthInt },

    /// A numeric value was requested from a vector that contains `X` or `Z` bits.
    #[error("cannot {op}: operand contains X or Z bits")]
    IndeterminateOperand { op: &'static str },

    /// The value does not fit into the requested integer type.
    #[error("value does not fit into {width} bits")]
    ExceedsWidth { width: WidthInt },

    #[error("failed to parse bit-vector: {0}")]
    Parse(#[from] ParseIntError),

    /// Reported by a [`crate::SignalTransport`].
    #[error("signal transport: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, BitVecError>;
