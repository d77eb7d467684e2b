// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

//! Operator forwarding.
//!
//! Arithmetic types implement each operator once, on references.  The
//! macros here derive the owned and half-owned forms from that one impl.

/// Derive `T op &U`, `&T op U` and `T op U` from `&T op &U`.
macro_rules! forward_binop_by_ref {
    ($op:ident, $method:ident, $lhs:ty, $rhs:ty, $out:ty) => {
        impl<'r> $op<&'r $rhs> for $lhs {
            type Output = $out;
            #[inline]
            fn $method(self, other: &'r $rhs) -> $out {
                $op::$method(&self, other)
            }
        }

        impl<'l> $op<$rhs> for &'l $lhs {
            type Output = $out;
            #[inline]
            fn $method(self, other: $rhs) -> $out {
                $op::$method(self, &other)
            }
        }

        impl $op<$rhs> for $lhs {
            type Output = $out;
            #[inline]
            fn $method(self, other: $rhs) -> $out {
                $op::$method(&self, &other)
            }
        }
    };
}

/// Derive `T op= U` from `T op= &U`.
macro_rules! forward_assign_by_ref {
    ($op:ident, $method:ident, $lhs:ty, $rhs:ty) => {
        impl $op<$rhs> for $lhs {
            #[inline]
            fn $method(&mut self, other: $rhs) {
                $op::$method(self, &other)
            }
        }
    };
}

macro_rules! define_add_variants {
    (LHS = $lhs:ty, RHS = $rhs:ty, Output = $out:ty) => {
        forward_binop_by_ref!(Add, add, $lhs, $rhs, $out);
    };
}

macro_rules! define_add_assign_variants {
    (LHS = $lhs:ty, RHS = $rhs:ty) => {
        forward_assign_by_ref!(AddAssign, add_assign, $lhs, $rhs);
    };
}

macro_rules! define_sub_variants {
    (LHS = $lhs:ty, RHS = $rhs:ty, Output = $out:ty) => {
        forward_binop_by_ref!(Sub, sub, $lhs, $rhs, $out);
    };
}

macro_rules! define_sub_assign_variants {
    (LHS = $lhs:ty, RHS = $rhs:ty) => {
        forward_assign_by_ref!(SubAssign, sub_assign, $lhs, $rhs);
    };
}

macro_rules! define_mul_variants {
    (LHS = $lhs:ty, RHS = $rhs:ty, Output = $out:ty) => {
        forward_binop_by_ref!(Mul, mul, $lhs, $rhs, $out);
    };
}

macro_rules! define_mul_assign_variants {
    (LHS = $lhs:ty, RHS = $rhs:ty) => {
        forward_assign_by_ref!(MulAssign, mul_assign, $lhs, $rhs);
    };
}

/// Owned `Neg`, through the borrowed impl.
macro_rules! define_neg_variant {
    ($t:ty) => {
        impl Neg for $t {
            type Output = $t;
            #[inline]
            fn neg(self) -> $t {
                Neg::neg(&self)
            }
        }
    };
}
