// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

//! **INTERNALS:** Pluggable implementations for different architectures.
//!
//! The backend code is split into two parts: a serial backend,
//! and a parallel backend.
//!
//! The [`serial`] backend contains 32- and 64-bit implementations of
//! field arithmetic and scalar arithmetic, as well as implementations
//! of point operations using the mixed-model strategy (passing
//! between different curve models depending on the operation).
//!
//! The [`parallel`] backend contains the four-lane formulas of Hisil,
//! Wong, Carter, and Dawson, where each point operation is phrased as
//! a short sequence of lane-wise vector operations.
//!
//! Every scalar multiplication algorithm in [`scalar_mul`] is written
//! once against the [`CurveBackend`] trait and instantiated with the
//! backend chosen by the `curve25519_arith_backend` cfg.

#![allow(non_snake_case)]

use core::borrow::Borrow;

use cfg_if::cfg_if;

use subtle::{ConditionallyNegatable, ConditionallySelectable};

use crate::edwards::EdwardsPoint;
use crate::scalar::Scalar;
use crate::traits::Identity;

#[cfg(feature = "precomputed-tables")]
use crate::window::NafLookupTable8;

pub(crate) mod serial;

#[cfg_attr(not(any(test, curve25519_arith_backend = "parallel")), allow(dead_code))]
pub(crate) mod parallel;

pub(crate) mod scalar_mul;

/// The point operations a scalar multiplication algorithm needs.
///
/// `Point` is the working representation that accumulates results and
/// `Cached` is the representation of a point that is added to it over
/// and over again.  Every conversion back to an `EdwardsPoint` is
/// explicit.
pub(crate) trait CurveBackend {
    /// Accumulator representation.
    type Point: Copy + Identity + 'static;

    /// Readdition representation, stored in lookup tables.
    type Cached: Copy + Identity + ConditionallySelectable + ConditionallyNegatable + 'static;

    /// Move an `EdwardsPoint` into the working representation.
    fn from_edwards(point: &EdwardsPoint) -> Self::Point;

    /// Move a working point back to an `EdwardsPoint`.
    fn to_edwards(point: &Self::Point) -> EdwardsPoint;

    /// Prepare a point for repeated additions.
    fn to_cached(point: &Self::Point) -> Self::Cached;

    /// Compute `[2]P`.
    fn double(point: &Self::Point) -> Self::Point;

    /// Compute `P + Q`.
    fn add_cached(point: &Self::Point, other: &Self::Cached) -> Self::Point;

    /// Compute `P - Q`.
    fn sub_cached(point: &Self::Point, other: &Self::Cached) -> Self::Point;

    /// Compute `[2^k]P` by successive doublings. Requires `k > 0`.
    fn mul_by_pow_2(point: &Self::Point, k: u32) -> Self::Point {
        debug_assert!(k > 0);
        let mut r = *point;
        for _ in 0..k {
            r = Self::double(&r);
        }
        r
    }

    /// The odd multiples `[B, 3B, 5B, ..., 127B]` of the Ed25519 basepoint.
    #[cfg(feature = "precomputed-tables")]
    fn odd_multiples_of_basepoint() -> &'static NafLookupTable8<Self::Cached>;

    /// The odd multiples of `[2^128]B`.
    #[cfg(feature = "precomputed-tables")]
    fn odd_multiples_of_basepoint_shl_128() -> &'static NafLookupTable8<Self::Cached>;
}

cfg_if! {
    if #[cfg(curve25519_arith_backend = "parallel")] {
        /// The backend every public entry point runs on.
        pub(crate) type SelectedBackend = parallel::ParallelBackend;
    } else {
        /// The backend every public entry point runs on.
        pub(crate) type SelectedBackend = serial::SerialBackend;
    }
}

/// Cached representation of the selected backend.
pub(crate) type SelectedCached = <SelectedBackend as CurveBackend>::Cached;

/// Perform constant-time, variable-base scalar multiplication.
pub(crate) fn variable_base_mul(point: &EdwardsPoint, scalar: &Scalar) -> EdwardsPoint {
    scalar_mul::variable_base::mul::<SelectedBackend>(point, scalar)
}

/// Compute \\(aA + bB\\) in variable time, where \\(B\\) is the Ed25519 basepoint.
pub(crate) fn vartime_double_base_mul(a: &Scalar, A: &EdwardsPoint, b: &Scalar) -> EdwardsPoint {
    scalar_mul::vartime_double_base::mul::<SelectedBackend>(a, A, b)
}

/// Compute \\(aA + bB\\) in variable time with a prepared table for \\(A\\).
pub(crate) fn vartime_double_base_mul_expanded(
    a: &Scalar,
    A_table: &scalar_mul::OddMultiples<SelectedCached>,
    b: &Scalar,
) -> EdwardsPoint {
    scalar_mul::vartime_double_base::mul_with_table::<SelectedBackend>(a, A_table, b)
}

/// Compute \\([\delta a]A + [\delta b]B - [\delta]C\\) in variable time,
/// for some small nonzero \\(\delta\\).
pub(crate) fn vartime_triple_base_mul(
    a: &Scalar,
    A: &EdwardsPoint,
    b: &Scalar,
    C: &EdwardsPoint,
) -> EdwardsPoint {
    scalar_mul::abglsv_pornin::mul::<SelectedBackend>(a, A, b, C)
}

/// As [`vartime_triple_base_mul`], with a prepared table for \\(A\\).
pub(crate) fn vartime_triple_base_mul_expanded(
    a: &Scalar,
    A_table: &scalar_mul::OddMultiples<SelectedCached>,
    b: &Scalar,
    C: &EdwardsPoint,
) -> EdwardsPoint {
    scalar_mul::abglsv_pornin::mul_with_table::<SelectedBackend>(a, A_table, b, C)
}

/// Constant-time Straus multiscalar multiplication.
#[cfg(feature = "alloc")]
pub(crate) fn straus_multiscalar_mul<I, J>(scalars: I, points: J) -> EdwardsPoint
where
    I: IntoIterator,
    I::Item: Borrow<Scalar>,
    J: IntoIterator,
    J::Item: Borrow<EdwardsPoint>,
{
    scalar_mul::straus::multiscalar_mul::<SelectedBackend, I, J>(scalars, points)
}

/// Variable-time Straus multiscalar multiplication.
#[cfg(feature = "alloc")]
pub(crate) fn straus_optional_multiscalar_mul<I, J>(scalars: I, points: J) -> Option<EdwardsPoint>
where
    I: IntoIterator,
    I::Item: Borrow<Scalar>,
    J: IntoIterator<Item = Option<EdwardsPoint>>,
{
    scalar_mul::straus::optional_multiscalar_mul::<SelectedBackend, I, J>(scalars, points)
}

/// Variable-time Pippenger multiscalar multiplication.
#[cfg(feature = "alloc")]
pub(crate) fn pippenger_optional_multiscalar_mul<I, J>(
    scalars: I,
    points: J,
) -> Option<EdwardsPoint>
where
    I: IntoIterator,
    I::Item: Borrow<Scalar>,
    J: IntoIterator<Item = Option<EdwardsPoint>>,
{
    scalar_mul::pippenger::optional_multiscalar_mul::<SelectedBackend, I, J>(scalars, points)
}

/// Variable-time multiscalar multiplication mixing prepared and plain points.
#[cfg(feature = "alloc")]
pub(crate) fn straus_mixed_multiscalar_mul<I, J, K, L>(
    static_scalars: I,
    static_tables: J,
    dynamic_scalars: K,
    dynamic_points: L,
) -> Option<EdwardsPoint>
where
    I: IntoIterator,
    I::Item: Borrow<Scalar>,
    J: IntoIterator,
    J::Item: Borrow<scalar_mul::OddMultiples<SelectedCached>>,
    K: IntoIterator,
    K::Item: Borrow<Scalar>,
    L: IntoIterator<Item = Option<EdwardsPoint>>,
{
    scalar_mul::straus::optional_mixed_multiscalar_mul::<SelectedBackend, I, J, K, L>(
        static_scalars,
        static_tables,
        dynamic_scalars,
        dynamic_points,
    )
}

/// Build the prepared table of odd multiples of `point`.
pub(crate) fn odd_multiples(point: &EdwardsPoint) -> scalar_mul::OddMultiples<SelectedCached> {
    scalar_mul::OddMultiples::from_backend_point::<SelectedBackend>(
        &<SelectedBackend as CurveBackend>::from_edwards(point),
    )
}
