// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

//! Precomputed multiples of a point.
//!
//! [`LookupTable`] holds \\( P, 2P, \ldots, 8P \\) and is read in
//! constant time with a signed radix-16 digit.  The NAF tables hold odd
//! multiples and are indexed directly by public digits.

#![allow(non_snake_case)]

use core::fmt::Debug;

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use crate::backend::serial::curve_models::AffineNielsPoint;
use crate::backend::CurveBackend;
use crate::edwards::EdwardsPoint;
use crate::traits::Identity;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// \\( [P, 2P, \ldots, 8P] \\) for some point \\( P \\).
///
/// There is deliberately no `Index` impl: secret digits must go through
/// [`LookupTable::select`].  The field is visible to the crate only so the
/// basepoint tables can be written as constants.
#[derive(Copy, Clone)]
pub(crate) struct LookupTable<T>(pub(crate) [T; 8]);

impl<T> LookupTable<T>
where
    T: Identity + ConditionallySelectable + ConditionallyNegatable,
{
    /// \\( xP \\) for \\( -8 \leq x \leq 8 \\), touching every entry.
    pub(crate) fn select(&self, x: i8) -> T {
        debug_assert!((-8..=8).contains(&x));

        let magnitude = x.unsigned_abs();
        let negative = Choice::from((x as u8) >> 7);

        let mut picked = T::identity();
        for (multiple, entry) in (1u8..).zip(self.0.iter()) {
            picked.conditional_assign(entry, magnitude.ct_eq(&multiple));
        }
        picked.conditional_negate(negative);
        picked
    }
}

impl<T: Copy> LookupTable<T> {
    /// Build the table in the cached form of backend `B`.
    pub(crate) fn from_backend_point<B>(P: &B::Point) -> LookupTable<T>
    where
        B: CurveBackend<Cached = T>,
    {
        LookupTable(multiples::<B, T, 8>(P, P))
    }
}

/// `N` cached points `P, P + step, P + 2 step, ...`.
fn multiples<B, T, const N: usize>(P: &B::Point, step: &B::Point) -> [T; N]
where
    B: CurveBackend<Cached = T>,
    T: Copy,
{
    let mut entries = [B::to_cached(P); N];
    for i in 1..N {
        entries[i] = B::to_cached(&B::add_cached(step, &entries[i - 1]));
    }
    entries
}

impl<T: Copy + Default> Default for LookupTable<T> {
    fn default() -> LookupTable<T> {
        LookupTable([T::default(); 8])
    }
}

impl<T: Debug> Debug for LookupTable<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("LookupTable").field(&self.0).finish()
    }
}

#[cfg(feature = "zeroize")]
impl<T: Zeroize> Zeroize for LookupTable<T> {
    fn zeroize(&mut self) {
        self.0.iter_mut().for_each(Zeroize::zeroize);
    }
}

impl<'a> From<&'a EdwardsPoint> for LookupTable<AffineNielsPoint> {
    fn from(P: &'a EdwardsPoint) -> Self {
        let mut entries = [P.as_affine_niels(); 8];
        for i in 1..8 {
            entries[i] = (P + &entries[i - 1]).as_extended().as_affine_niels();
        }
        LookupTable(entries)
    }
}

/// Odd multiples of a point, addressed by a positive odd NAF digit.
pub(crate) trait OddMultipleTable<T> {
    /// \\( xA \\) for odd \\( x \\) within the table.
    fn select(&self, x: usize) -> T;
}

/// \\( [A, 3A, \ldots, 15A] \\), for width-5 NAF digits.
#[derive(Copy, Clone)]
pub(crate) struct NafLookupTable5<T>(pub(crate) [T; 8]);

/// \\( [A, 3A, \ldots, 127A] \\), for width-8 NAF digits.
///
/// Big enough to be worth keeping only for points used many times: the
/// basepoints and expanded points.
#[derive(Copy, Clone)]
pub(crate) struct NafLookupTable8<T>(pub(crate) [T; 64]);

macro_rules! impl_odd_multiples {
    ($table:ident, $len:literal) => {
        impl<T: Copy> OddMultipleTable<T> for $table<T> {
            fn select(&self, x: usize) -> T {
                debug_assert!(x % 2 == 1 && x < 2 * $len);
                self.0[x / 2]
            }
        }

        impl<T: Copy> $table<T> {
            /// Build the table in the cached form of backend `B`.
            pub(crate) fn from_backend_point<B>(A: &B::Point) -> $table<T>
            where
                B: CurveBackend<Cached = T>,
            {
                $table(multiples::<B, T, $len>(A, &B::double(A)))
            }
        }

        impl<T: Debug> Debug for $table<T> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_tuple(stringify!($table)).field(&self.0).finish()
            }
        }
    };
}

impl_odd_multiples!(NafLookupTable5, 8);
impl_odd_multiples!(NafLookupTable8, 64);

#[cfg(test)]
mod test {
    use super::*;
    use crate::backend::serial::curve_models::ProjectiveNielsPoint;
    use crate::backend::serial::SerialBackend;
    use crate::constants::ED25519_BASEPOINT_POINT as B;
    use crate::scalar::Scalar;

    fn niels_to_edwards(p: &ProjectiveNielsPoint) -> EdwardsPoint {
        (&EdwardsPoint::identity() + p).as_extended()
    }

    #[test]
    fn lookup_table_selects_signed_multiples() {
        let table = LookupTable::<ProjectiveNielsPoint>::from_backend_point::<SerialBackend>(&B);
        for x in -8i8..=8 {
            let expected = B * Scalar::from(x.unsigned_abs());
            let expected = if x < 0 { -expected } else { expected };
            assert_eq!(niels_to_edwards(&table.select(x)), expected);
        }
    }

    #[test]
    fn affine_lookup_table_matches_projective() {
        let affine = LookupTable::<AffineNielsPoint>::from(&B);
        let projective =
            LookupTable::<ProjectiveNielsPoint>::from_backend_point::<SerialBackend>(&B);
        for x in -8i8..=8 {
            let a = (&EdwardsPoint::identity() + &affine.select(x)).as_extended();
            assert_eq!(a, niels_to_edwards(&projective.select(x)));
        }
    }

    #[test]
    fn naf_tables_hold_odd_multiples() {
        let t5 = NafLookupTable5::<ProjectiveNielsPoint>::from_backend_point::<SerialBackend>(&B);
        let t8 = NafLookupTable8::<ProjectiveNielsPoint>::from_backend_point::<SerialBackend>(&B);
        for x in (1..16).step_by(2) {
            let expected = B * Scalar::from(x as u64);
            assert_eq!(niels_to_edwards(&t5.select(x)), expected);
            assert_eq!(niels_to_edwards(&t8.select(x)), expected);
        }
        assert_eq!(niels_to_edwards(&t8.select(127)), B * Scalar::from(127u64));
    }
}
