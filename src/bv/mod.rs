// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>

pub(crate) mod arithmetic;
mod io;
mod logic;
mod operand;
mod ops;
mod owned;
mod part_select;
#[cfg(feature = "rand1")]
mod random;
mod std_ops;
mod store;

pub use arithmetic::mask;
pub use io::strings::{FormatConfig, IntErrorKind, ParseIntError, Radix};
pub use io::words::{export_words, import_words, VecVal};
pub use logic::Logic;
pub use operand::Operand;
pub use ops::{BitVecMutOps, BitVecOps};
pub use owned::BitVector;
pub use part_select::PartSelect;
pub use store::WordStore;
