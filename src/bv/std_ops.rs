// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
//
// Operator overloading for `BitVector`. The right hand side can be anything that converts
// into an `Operand`: another vector (borrowed or owned), a part-select, a `Logic` or an integer.

use crate::{BitVecMutOps, BitVecOps, BitVector, Operand};

/// Binary operators whose scalar operands adopt the width of the left hand side. The
/// result is as wide as the wider operand; the `*Assign` variants keep the lhs width.
macro_rules! impl_bin_op {
    ($tr:ident, $method:ident) => {
        paste::paste! {
            impl<'a, R: Into<Operand<'a>>> std::ops::$tr<R> for &BitVector {
                type Output = BitVector;

                fn [<$tr:lower>](self, rhs: R) -> BitVector {
                    let rhs = rhs.into().resolve(self.width());
                    BitVecOps::$method(self, &*rhs)
                }
            }

            impl<'a, R: Into<Operand<'a>>> std::ops::$tr<R> for BitVector {
                type Output = BitVector;

                fn [<$tr:lower>](self, rhs: R) -> BitVector {
                    std::ops::$tr::[<$tr:lower>](&self, rhs)
                }
            }

            impl<'a, R: Into<Operand<'a>>> std::ops::[<$tr Assign>]<R> for BitVector {
                fn [<$tr:lower _assign>](&mut self, rhs: R) {
                    let result = std::ops::$tr::[<$tr:lower>](&*self, rhs);
                    self.assign(&result);
                }
            }
        }
    };
}

/// Shift operators. The result always has the width of the value being shifted.
macro_rules! impl_shift_op {
    ($tr:ident, $method:ident) => {
        paste::paste! {
            impl<'a, R: Into<Operand<'a>>> std::ops::$tr<R> for &BitVector {
                type Output = BitVector;

                fn [<$tr:lower>](self, rhs: R) -> BitVector {
                    let amount = rhs.into().into_shift_amount();
                    BitVecOps::$method(self, &*amount)
                }
            }

            impl<'a, R: Into<Operand<'a>>> std::ops::$tr<R> for BitVector {
                type Output = BitVector;

                fn [<$tr:lower>](self, rhs: R) -> BitVector {
                    std::ops::$tr::[<$tr:lower>](&self, rhs)
                }
            }

            impl<'a, R: Into<Operand<'a>>> std::ops::[<$tr Assign>]<R> for BitVector {
                fn [<$tr:lower _assign>](&mut self, rhs: R) {
                    let result = std::ops::$tr::[<$tr:lower>](&*self, rhs);
                    self.assign(&result);
                }
            }
        }
    };
}

impl_bin_op!(Add, add);
impl_bin_op!(Sub, sub);
impl_bin_op!(Mul, mul);
impl_bin_op!(BitAnd, and);
impl_bin_op!(BitOr, or);
impl_bin_op!(BitXor, xor);
impl_shift_op!(Shl, shift_left);
impl_shift_op!(Shr, shift_right);

impl std::ops::Not for &BitVector {
    type Output = BitVector;

    fn not(self) -> BitVector {
        BitVecOps::not(self)
    }
}

impl std::ops::Not for BitVector {
    type Output = BitVector;

    fn not(self) -> BitVector {
        BitVecOps::not(&self)
    }
}

impl std::ops::Neg for &BitVector {
    type Output = BitVector;

    fn neg(self) -> BitVector {
        BitVecOps::negate(self)
    }
}

impl std::ops::Neg for BitVector {
    type Output = BitVector;

    fn neg(self) -> BitVector {
        BitVecOps::negate(&self)
    }
}
