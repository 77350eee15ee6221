// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
//
// Keeps a bit-vector in step with a signal inside a simulator.

use crate::{
    export_words, import_words, BitVecMutOps, BitVecOps, BitVector, Operand, States, VecVal,
    WidthInt, Word,
};

/// Reads and writes the raw words of one simulator signal.
pub trait SignalTransport {
    /// Current value of the signal, least significant word first.
    fn read(&mut self) -> crate::Result<Vec<VecVal>>;
    /// Drives `words` onto the signal.
    fn write(&mut self, words: &[VecVal]) -> crate::Result<()>;
}

impl<T: SignalTransport + ?Sized> SignalTransport for &mut T {
    fn read(&mut self) -> crate::Result<Vec<VecVal>> {
        (**self).read()
    }

    fn write(&mut self, words: &[VecVal]) -> crate::Result<()> {
        (**self).write(words)
    }
}

/// A [`BitVector`] mirrored onto a simulator signal.
///
/// Reads go to the local copy, which is refreshed with [`Mirrored::sync`]. All writes go
/// through [`Mirrored::set`] or [`Mirrored::modify`] which push the new value to the
/// transport, so the local copy never holds a value the simulator has not seen.
#[derive(Debug)]
pub struct Mirrored<T> {
    value: BitVector,
    transport: T,
}

impl<T: SignalTransport> Mirrored<T> {
    /// Wraps `value` without touching the signal.
    pub fn new(value: BitVector, transport: T) -> Self {
        Self { value, transport }
    }

    /// Creates a zero value of `width` bits and pulls the current signal value into it.
    pub fn attach(width: WidthInt, states: States, transport: T) -> crate::Result<Self> {
        let mut out = Self::new(BitVector::try_zero(width, states)?, transport);
        out.sync()?;
        Ok(out)
    }

    pub fn value(&self) -> &BitVector {
        &self.value
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Pulls the current signal value.
    pub fn sync(&mut self) -> crate::Result<&BitVector> {
        let raw = self.transport.read()?;
        let width = self.value.width();
        tracing::trace!("sync {width}-bit mirror from {} words", raw.len());
        let (aval, bval) = import_words(&raw, width, self.value.states());
        let (a, b) = self.value.channels_mut();
        a.copy_from_slice(&aval);
        b.copy_from_slice(&bval);
        Ok(&self.value)
    }

    /// Assigns `value` (truncated or extended to our width) and pushes it.
    /// The local value is left untouched if the push fails.
    pub fn set<'a>(&mut self, value: impl Into<Operand<'a>>) -> crate::Result<()> {
        let value = value.into().resolve(self.value.width());
        self.modify(|bv| bv.assign(&*value))
    }

    /// Runs `f` on the local value and pushes the result. If the push fails, the value
    /// `f` started from is restored.
    pub fn modify<R>(&mut self, f: impl FnOnce(&mut BitVector) -> R) -> crate::Result<R> {
        let previous = self.value.clone();
        let result = f(&mut self.value);
        if let Err(e) = self.push() {
            tracing::debug!("push failed, restoring previous {}-bit value", previous.width());
            self.value = previous;
            return Err(e);
        }
        Ok(result)
    }

    /// Writes the local value to the signal.
    pub fn push(&mut self) -> crate::Result<()> {
        let raw = export_words(self.value.words(), self.value.bval());
        tracing::trace!("push {}-bit mirror as {} words", self.value.width(), raw.len());
        self.transport.write(&raw)
    }

    pub fn into_parts(self) -> (BitVector, T) {
        (self.value, self.transport)
    }
}

impl<T> BitVecOps for Mirrored<T> {
    fn width(&self) -> WidthInt {
        self.value.width()
    }

    fn states(&self) -> States {
        self.value.states()
    }

    fn words(&self) -> &[Word] {
        self.value.words()
    }

    fn bval(&self) -> &[Word] {
        self.value.bval()
    }
}
