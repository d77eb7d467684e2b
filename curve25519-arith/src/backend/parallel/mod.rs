// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

//! Four-lane point arithmetic.
//!
//! The point formulas are written as vector programs over
//! `FieldElementx4`, the layout a SIMD implementation would operate
//! on, and evaluated lane by lane with the portable field arithmetic.

#[cfg(feature = "precomputed-tables")]
use spin::Lazy;

use crate::backend::CurveBackend;
use crate::edwards::EdwardsPoint;

#[cfg(feature = "precomputed-tables")]
use crate::constants;
#[cfg(feature = "precomputed-tables")]
use crate::window::NafLookupTable8;

pub(crate) mod edwards;
pub(crate) mod field;

pub(crate) use self::edwards::{CachedPoint, ExtendedPoint};

/// Point arithmetic on the four-lane extended model.
#[derive(Copy, Clone, Debug)]
pub(crate) struct ParallelBackend;

#[cfg(feature = "precomputed-tables")]
static ODD_MULTIPLES_OF_BASEPOINT: Lazy<NafLookupTable8<CachedPoint>> = Lazy::new(|| {
    NafLookupTable8::from_backend_point::<ParallelBackend>(&ExtendedPoint::from(
        constants::ED25519_BASEPOINT_POINT,
    ))
});

#[cfg(feature = "precomputed-tables")]
static ODD_MULTIPLES_OF_BASEPOINT_SHL_128: Lazy<NafLookupTable8<CachedPoint>> = Lazy::new(|| {
    NafLookupTable8::from_backend_point::<ParallelBackend>(
        &ExtendedPoint::from(constants::ED25519_BASEPOINT_POINT).mul_by_pow_2(128),
    )
});

impl CurveBackend for ParallelBackend {
    type Point = ExtendedPoint;
    type Cached = CachedPoint;

    #[inline]
    fn from_edwards(point: &EdwardsPoint) -> ExtendedPoint {
        ExtendedPoint::from(*point)
    }

    #[inline]
    fn to_edwards(point: &ExtendedPoint) -> EdwardsPoint {
        EdwardsPoint::from(*point)
    }

    #[inline]
    fn to_cached(point: &ExtendedPoint) -> CachedPoint {
        CachedPoint::from(*point)
    }

    #[inline]
    fn double(point: &ExtendedPoint) -> ExtendedPoint {
        point.double()
    }

    #[inline]
    fn add_cached(point: &ExtendedPoint, other: &CachedPoint) -> ExtendedPoint {
        point + other
    }

    #[inline]
    fn sub_cached(point: &ExtendedPoint, other: &CachedPoint) -> ExtendedPoint {
        point - other
    }

    #[inline]
    fn mul_by_pow_2(point: &ExtendedPoint, k: u32) -> ExtendedPoint {
        point.mul_by_pow_2(k)
    }

    #[cfg(feature = "precomputed-tables")]
    fn odd_multiples_of_basepoint() -> &'static NafLookupTable8<CachedPoint> {
        &ODD_MULTIPLES_OF_BASEPOINT
    }

    #[cfg(feature = "precomputed-tables")]
    fn odd_multiples_of_basepoint_shl_128() -> &'static NafLookupTable8<CachedPoint> {
        &ODD_MULTIPLES_OF_BASEPOINT_SHL_128
    }
}
