// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

//! Variable-time computation of \\( [\delta a]A + [\delta b]B - [\delta]C \\)
//! with a short \\( \delta \\), following
//! [Antipa et al 2005](http://cacr.uwaterloo.ca/techreports/2005/cacr2005-28.pdf)
//! and Pornin's lattice basis reduction.

#![allow(non_snake_case)]

use crate::backend::scalar_mul::{add_naf_digit, highest_nonzero_digit, OddMultiples};
use crate::backend::CurveBackend;
use crate::edwards::EdwardsPoint;
use crate::scalar::{lattice_reduction::find_short_vector, Scalar};
use crate::traits::Identity;
use crate::window::{NafLookupTable5, OddMultipleTable};

#[cfg(not(feature = "precomputed-tables"))]
use crate::constants;

#[cfg(feature = "precomputed-tables")]
const BASEPOINT_NAF_WIDTH: usize = 8;
#[cfg(not(feature = "precomputed-tables"))]
const BASEPOINT_NAF_WIDTH: usize = 5;

/// Computes \\([δa]A + [δb]B - [δ]C\\) in variable time.
///
/// - \\(B\\) is the Ed25519 basepoint.
/// - \\(δ\\) is a value invertible \\( \mod \ell \\), which is selected internally to
///   this function.
pub(crate) fn mul<B: CurveBackend>(
    a: &Scalar,
    A: &EdwardsPoint,
    b: &Scalar,
    C: &EdwardsPoint,
) -> EdwardsPoint {
    let table_A = NafLookupTable5::<B::Cached>::from_backend_point::<B>(&B::from_edwards(A));
    mul_inner::<B, _>(a, 5, &table_A, b, C)
}

/// As [`mul`], with the odd multiples of \\(A\\) already prepared.
pub(crate) fn mul_with_table<B: CurveBackend>(
    a: &Scalar,
    table_A: &OddMultiples<B::Cached>,
    b: &Scalar,
    C: &EdwardsPoint,
) -> EdwardsPoint {
    mul_inner::<B, _>(a, 8, table_A, b, C)
}

/// Width-`w` NAF of the signed integer \\( \pm m \\).
fn signed_naf(magnitude: u128, negative: bool, w: usize) -> [i8; 256] {
    let mut naf = Scalar::from(magnitude).non_adjacent_form(w);
    if negative {
        for digit in naf.iter_mut() {
            *digit = -*digit;
        }
    }
    naf
}

fn mul_inner<B, T>(
    a: &Scalar,
    a_width: usize,
    table_A: &T,
    b: &Scalar,
    C: &EdwardsPoint,
) -> EdwardsPoint
where
    B: CurveBackend,
    T: OddMultipleTable<B::Cached>,
{
    // Starting with
    //
    //     [(δa mod l)]A + [(δb mod l)]B - [δ]C
    //
    // split δb mod l into its low 128 bits e_0 and high 125 bits e_1:
    //
    //     [(δa mod l)]A + [e_0]B + [e_1][2^128]B - [δ]C
    //
    // Both halves of the basepoint term then need only 128 doublings.
    // Choosing (d_0, d_1) = (δa mod l, δ) as a short vector of the
    // lattice generated by (l, 0) and (a, 1) shortens the other two
    // terms the same way.
    let (d_0, d_1) = find_short_vector(a);

    // δ as an element of the scalar field.
    let delta = {
        let magnitude = Scalar::from(d_1.unsigned_abs());
        if d_1 < 0 {
            -magnitude
        } else {
            magnitude
        }
    };

    let (e_0, e_1) = {
        let db = b * delta;
        let mut e_0 = [0u8; 32];
        let mut e_1 = [0u8; 32];
        e_0[..16].copy_from_slice(&db.as_bytes()[..16]);
        e_1[..16].copy_from_slice(&db.as_bytes()[16..]);
        (Scalar { bytes: e_0 }, Scalar { bytes: e_1 })
    };

    // Signs are carried by the digits so that the tables always hold
    // multiples of the points as given.
    let d_0_naf = signed_naf(d_0.unsigned_abs(), d_0 < 0, a_width);
    let e_0_naf = e_0.non_adjacent_form(BASEPOINT_NAF_WIDTH);
    let e_1_naf = e_1.non_adjacent_form(BASEPOINT_NAF_WIDTH);
    // The C term is -δ.
    let d_1_naf = signed_naf(d_1.unsigned_abs(), d_1 > 0, 5);

    let mut i = highest_nonzero_digit(&[&d_0_naf, &e_0_naf, &e_1_naf, &d_1_naf]);

    #[cfg(feature = "precomputed-tables")]
    let (table_B, table_B_SHL_128) = (
        B::odd_multiples_of_basepoint(),
        B::odd_multiples_of_basepoint_shl_128(),
    );

    #[cfg(not(feature = "precomputed-tables"))]
    let basepoint = B::from_edwards(&constants::ED25519_BASEPOINT_POINT);
    #[cfg(not(feature = "precomputed-tables"))]
    let table_B = &NafLookupTable5::<B::Cached>::from_backend_point::<B>(&basepoint);
    #[cfg(not(feature = "precomputed-tables"))]
    let table_B_SHL_128 = &NafLookupTable5::<B::Cached>::from_backend_point::<B>(
        &B::mul_by_pow_2(&basepoint, 128),
    );

    let table_C = NafLookupTable5::<B::Cached>::from_backend_point::<B>(&B::from_edwards(C));

    let mut r = B::Point::identity();
    loop {
        r = B::double(&r);
        r = add_naf_digit::<B, _>(&r, d_0_naf[i], table_A);
        r = add_naf_digit::<B, _>(&r, e_0_naf[i], table_B);
        r = add_naf_digit::<B, _>(&r, e_1_naf[i], table_B_SHL_128);
        r = add_naf_digit::<B, _>(&r, d_1_naf[i], &table_C);

        if i == 0 {
            break;
        }
        i -= 1;
    }

    B::to_edwards(&r)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::backend::serial::SerialBackend;
    use crate::constants::ED25519_BASEPOINT_POINT;
    use crate::scalar::test::random_scalar;
    use crate::traits::IsIdentity;
    use crate::window::NafLookupTable8;

    #[test]
    fn identity_relation_is_preserved() {
        let a = Scalar::from(2u8);
        let A = ED25519_BASEPOINT_POINT.double(); // [2]B
        let b = Scalar::from(4u8);
        let C = A.double().double(); // [8]B

        // The relation evaluates to the identity, so δ has no effect.
        assert_eq!(
            mul::<SerialBackend>(&a, &A, &b, &C),
            (A * a) + (ED25519_BASEPOINT_POINT * b) - C
        );
    }

    #[test]
    fn random_relations() {
        let mut rng = rand::thread_rng();

        for _ in 0..32 {
            let a = random_scalar(&mut rng);
            let A = ED25519_BASEPOINT_POINT * random_scalar(&mut rng);
            let b = random_scalar(&mut rng);

            // With a correctly-constructed C, we get the identity.
            let C = (A * a) + (ED25519_BASEPOINT_POINT * b);
            assert!(mul::<SerialBackend>(&a, &A, &b, &C).is_identity());

            // With a random C, with high probability we do not.
            let C = ED25519_BASEPOINT_POINT * random_scalar(&mut rng);
            assert!(!mul::<SerialBackend>(&a, &A, &b, &C).is_identity());
        }
    }

    #[test]
    fn prepared_table_matches_plain() {
        let mut rng = rand::thread_rng();

        for _ in 0..8 {
            let a = random_scalar(&mut rng);
            let A = ED25519_BASEPOINT_POINT * random_scalar(&mut rng);
            let b = random_scalar(&mut rng);
            let table = NafLookupTable8::from_backend_point::<SerialBackend>(&A);

            let C = (A * a) + (ED25519_BASEPOINT_POINT * b);
            assert!(mul_with_table::<SerialBackend>(&a, &table, &b, &C).is_identity());

            // δ depends only on a, so both paths agree exactly.
            let C = ED25519_BASEPOINT_POINT * random_scalar(&mut rng);
            assert_eq!(
                mul_with_table::<SerialBackend>(&a, &table, &b, &C),
                mul::<SerialBackend>(&a, &A, &b, &C)
            );
        }
    }
}
