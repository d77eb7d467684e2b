// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

//! Traits implemented by several point types.
//!
//! `EdwardsPoint` and `RistrettoPoint` implement all of the public ones;
//! `MontgomeryPoint` only has an identity.

#![allow(non_snake_case)]

use core::borrow::Borrow;

use subtle::ConstantTimeEq;

use crate::scalar::Scalar;

/// Types with a neutral element.
pub trait Identity {
    /// The neutral element of the group.
    fn identity() -> Self;
}

/// Comparison against the neutral element.
pub trait IsIdentity {
    /// `true` exactly when `self` is the neutral element.
    fn is_identity(&self) -> bool;
}

/// Every type with a constant-time equality and an identity gets
/// `is_identity` for free.
impl<T> IsIdentity for T
where
    T: ConstantTimeEq + Identity,
{
    fn is_identity(&self) -> bool {
        bool::from(self.ct_eq(&T::identity()))
    }
}

/// A table of multiples of one fixed point, used for fast constant-time
/// fixed-base multiplication.
pub trait BasepointTable {
    /// Point type the table holds multiples of.
    type Point;

    /// Build the table for `basepoint`.
    fn create(basepoint: &Self::Point) -> Self;

    /// The point the table was built for.
    fn basepoint(&self) -> Self::Point;

    /// `[scalar]B` for the table's basepoint `B`.  Constant time.
    fn mul_base(&self, scalar: &Scalar) -> Self::Point;
}

/// Constant-time linear combinations \\( \sum_i c_i P_i \\).
///
/// The scalars may be secret; the points are treated as public.  The two
/// iterators must have the same length.
///
/// ```
/// # #[cfg(feature = "alloc")]
/// # {
/// use curve25519_arith::constants::RISTRETTO_BASEPOINT_POINT as B;
/// use curve25519_arith::traits::MultiscalarMul;
/// use curve25519_arith::{RistrettoPoint, Scalar};
///
/// let weights = [Scalar::from(3u64), Scalar::from(5u64)];
/// let points = [B, B + B];
///
/// // Borrowed or owned scalars are both accepted.
/// let sum = RistrettoPoint::multiscalar_mul(&weights, &points);
/// let negated = RistrettoPoint::multiscalar_mul(weights.iter().map(|w| -w), &points);
///
/// assert_eq!(sum, B * Scalar::from(13u64));
/// assert_eq!(sum, -negated);
/// # }
/// ```
pub trait MultiscalarMul {
    /// Point type being combined.
    type Point;

    /// Compute \\( c_1 P_1 + \cdots + c_n P_n \\).
    fn multiscalar_mul<I, J>(scalars: I, points: J) -> Self::Point
    where
        I: IntoIterator,
        I::Item: Borrow<Scalar>,
        J: IntoIterator,
        J::Item: Borrow<Self::Point>;
}

/// Variable-time linear combinations, for public scalars only.
///
/// The two iterators must have the same length.
pub trait VartimeMultiscalarMul {
    /// Point type being combined.
    type Point;

    /// Like `vartime_multiscalar_mul`, but over points that may be
    /// missing.  Returns `None` as soon as any point is `None`, which lets
    /// callers feed `decompress().ok()` straight in.
    fn optional_multiscalar_mul<I, J>(scalars: I, points: J) -> Option<Self::Point>
    where
        I: IntoIterator,
        I::Item: Borrow<Scalar>,
        J: IntoIterator<Item = Option<Self::Point>>;

    /// Compute \\( c_1 P_1 + \cdots + c_n P_n \\) in variable time.
    fn vartime_multiscalar_mul<I, J>(scalars: I, points: J) -> Self::Point
    where
        I: IntoIterator,
        I::Item: Borrow<Scalar>,
        J: IntoIterator,
        J::Item: Borrow<Self::Point>,
        Self::Point: Clone,
    {
        let present = points.into_iter().map(|P| Some(P.borrow().clone()));
        Self::optional_multiscalar_mul(scalars, present)
            .unwrap_or_else(|| unreachable!("every point was supplied"))
    }
}

/// On-curve check for internal representations.  Variable time; only
/// used in debug assertions and tests.
#[allow(dead_code)]
pub(crate) trait ValidityCheck {
    fn is_valid(&self) -> bool;
}
