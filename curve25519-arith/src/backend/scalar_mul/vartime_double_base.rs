// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

#![allow(non_snake_case)]

use crate::backend::scalar_mul::{add_naf_digit, highest_nonzero_digit, OddMultiples};
use crate::backend::CurveBackend;
use crate::edwards::EdwardsPoint;
use crate::scalar::Scalar;
use crate::traits::Identity;
use crate::window::{NafLookupTable5, OddMultipleTable};

#[cfg(not(feature = "precomputed-tables"))]
use crate::constants;

/// Width of the NAF used for the basepoint scalar, matched to the size
/// of the basepoint table.
#[cfg(feature = "precomputed-tables")]
const BASEPOINT_NAF_WIDTH: usize = 8;
#[cfg(not(feature = "precomputed-tables"))]
const BASEPOINT_NAF_WIDTH: usize = 5;

/// Compute \\(aA + bB\\) in variable time, where \\(B\\) is the Ed25519 basepoint.
pub(crate) fn mul<B: CurveBackend>(a: &Scalar, A: &EdwardsPoint, b: &Scalar) -> EdwardsPoint {
    let a_naf = a.non_adjacent_form(5);
    let table_A = NafLookupTable5::<B::Cached>::from_backend_point::<B>(&B::from_edwards(A));

    mul_inner::<B, _>(&a_naf, &table_A, b)
}

/// Compute \\(aA + bB\\) in variable time, with the odd multiples of
/// \\(A\\) already prepared.
pub(crate) fn mul_with_table<B: CurveBackend>(
    a: &Scalar,
    table_A: &OddMultiples<B::Cached>,
    b: &Scalar,
) -> EdwardsPoint {
    let a_naf = a.non_adjacent_form(8);

    mul_inner::<B, _>(&a_naf, table_A, b)
}

fn mul_inner<B, T>(a_naf: &[i8; 256], table_A: &T, b: &Scalar) -> EdwardsPoint
where
    B: CurveBackend,
    T: OddMultipleTable<B::Cached>,
{
    let b_naf = b.non_adjacent_form(BASEPOINT_NAF_WIDTH);

    // Find starting index
    let mut i = highest_nonzero_digit(&[a_naf, &b_naf]);

    #[cfg(feature = "precomputed-tables")]
    let table_B = B::odd_multiples_of_basepoint();

    #[cfg(not(feature = "precomputed-tables"))]
    let table_B = &NafLookupTable5::<B::Cached>::from_backend_point::<B>(&B::from_edwards(
        &constants::ED25519_BASEPOINT_POINT,
    ));

    let mut r = B::Point::identity();
    loop {
        r = B::double(&r);
        r = add_naf_digit::<B, _>(&r, a_naf[i], table_A);
        r = add_naf_digit::<B, _>(&r, b_naf[i], table_B);

        if i == 0 {
            break;
        }
        i -= 1;
    }

    B::to_edwards(&r)
}
