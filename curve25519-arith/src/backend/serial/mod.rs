// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

//! Serial implementations of field, scalar, point arithmetic.
//!
//! When the parallel backend is selected, the serial field and scalar
//! arithmetic is still used: the parallel backend only reshapes the
//! point formulas.

use cfg_if::cfg_if;

#[cfg(feature = "precomputed-tables")]
use spin::Lazy;

use crate::backend::CurveBackend;
use crate::edwards::EdwardsPoint;

#[cfg(feature = "precomputed-tables")]
use crate::constants;
#[cfg(feature = "precomputed-tables")]
use crate::window::NafLookupTable8;

use curve_models::ProjectiveNielsPoint;

cfg_if! {
    if #[cfg(curve25519_arith_bits = "64")] {
        pub(crate) mod u64;
    } else {
        pub(crate) mod u32;
    }
}

pub mod curve_models;

/// Point arithmetic in the mixed-model strategy: extended coordinates
/// accumulate, projective Niels coordinates are re-added, and
/// doublings pass through the \\( \mathbb P\^2 \\) model.
#[derive(Copy, Clone, Debug)]
pub(crate) struct SerialBackend;

#[cfg(feature = "precomputed-tables")]
static ODD_MULTIPLES_OF_BASEPOINT: Lazy<NafLookupTable8<ProjectiveNielsPoint>> = Lazy::new(|| {
    NafLookupTable8::from_backend_point::<SerialBackend>(&constants::ED25519_BASEPOINT_POINT)
});

#[cfg(feature = "precomputed-tables")]
static ODD_MULTIPLES_OF_BASEPOINT_SHL_128: Lazy<NafLookupTable8<ProjectiveNielsPoint>> =
    Lazy::new(|| {
        NafLookupTable8::from_backend_point::<SerialBackend>(
            &constants::ED25519_BASEPOINT_POINT.mul_by_pow_2(128),
        )
    });

impl CurveBackend for SerialBackend {
    type Point = EdwardsPoint;
    type Cached = ProjectiveNielsPoint;

    #[inline]
    fn from_edwards(point: &EdwardsPoint) -> EdwardsPoint {
        *point
    }

    #[inline]
    fn to_edwards(point: &EdwardsPoint) -> EdwardsPoint {
        *point
    }

    #[inline]
    fn to_cached(point: &EdwardsPoint) -> ProjectiveNielsPoint {
        point.as_projective_niels()
    }

    #[inline]
    fn double(point: &EdwardsPoint) -> EdwardsPoint {
        point.double()
    }

    #[inline]
    fn add_cached(point: &EdwardsPoint, other: &ProjectiveNielsPoint) -> EdwardsPoint {
        (point + other).as_extended()
    }

    #[inline]
    fn sub_cached(point: &EdwardsPoint, other: &ProjectiveNielsPoint) -> EdwardsPoint {
        (point - other).as_extended()
    }

    #[inline]
    fn mul_by_pow_2(point: &EdwardsPoint, k: u32) -> EdwardsPoint {
        point.mul_by_pow_2(k)
    }

    #[cfg(feature = "precomputed-tables")]
    fn odd_multiples_of_basepoint() -> &'static NafLookupTable8<ProjectiveNielsPoint> {
        &ODD_MULTIPLES_OF_BASEPOINT
    }

    #[cfg(feature = "precomputed-tables")]
    fn odd_multiples_of_basepoint_shl_128() -> &'static NafLookupTable8<ProjectiveNielsPoint> {
        &ODD_MULTIPLES_OF_BASEPOINT_SHL_128
    }
}
