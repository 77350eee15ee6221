// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>

#[cfg(feature = "bigint")]
pub(crate) mod bigint;
pub(crate) mod strings;
pub(crate) mod words;
