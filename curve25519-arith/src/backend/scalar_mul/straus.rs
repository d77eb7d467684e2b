// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

//! Implementation of the interleaved window method, also known as Straus' method.

#![allow(non_snake_case)]

use alloc::vec::Vec;

use core::borrow::Borrow;

use crate::backend::scalar_mul::{add_naf_digit, highest_nonzero_digit, OddMultiples};
use crate::backend::CurveBackend;
use crate::edwards::EdwardsPoint;
use crate::scalar::Scalar;
use crate::traits::Identity;
use crate::window::{LookupTable, NafLookupTable5};

/// Constant-time multiscalar multiplication using Straus' method.
///
/// Given scalars \\( a\_i \\) written in radix 16 with signed digits
/// \\( a\_{i,j} \in [-8, 8) \\),
/// $$
/// Q = \sum\_i a\_i P\_i
///   = P\_1 a\_{1,0} + \cdots + P\_n a\_{n,0}
///   + 16 (P\_1 a\_{1,1} + \cdots + 16 (P\_1 a\_{1,63} + \cdots + P\_n a\_{n,63}) \cdots ),
/// $$
/// so one run of 252 doublings is shared by all \\( n \\) terms, and
/// each term costs one table lookup and one addition per digit.  The
/// lookups scan the whole table of \\( P\_i, \ldots, 8P\_i \\), so the
/// memory access pattern does not depend on the scalars.
///
/// The two iterators must have the same length.
pub(crate) fn multiscalar_mul<B, I, J>(scalars: I, points: J) -> EdwardsPoint
where
    B: CurveBackend,
    I: IntoIterator,
    I::Item: Borrow<Scalar>,
    J: IntoIterator,
    J::Item: Borrow<EdwardsPoint>,
{
    let lookup_tables: Vec<_> = points
        .into_iter()
        .map(|point| {
            LookupTable::<B::Cached>::from_backend_point::<B>(&B::from_edwards(point.borrow()))
        })
        .collect();

    // The scalar digits are secret and live on the heap; they are
    // erased before returning.
    #[cfg_attr(not(feature = "zeroize"), allow(unused_mut))]
    let mut scalar_digits: Vec<_> = scalars
        .into_iter()
        .map(|s| s.borrow().as_radix_16())
        .collect();

    debug_assert_eq!(scalar_digits.len(), lookup_tables.len());

    let mut Q = B::Point::identity();
    for j in (0..64).rev() {
        Q = B::mul_by_pow_2(&Q, 4);
        let it = scalar_digits.iter().zip(lookup_tables.iter());
        for (s_i, lookup_table_i) in it {
            // R_i = s_{i,j} * P_i
            let R_i = lookup_table_i.select(s_i[j]);
            // Q = Q + R_i
            Q = B::add_cached(&Q, &R_i);
        }
    }

    #[cfg(feature = "zeroize")]
    zeroize::Zeroize::zeroize(&mut scalar_digits);

    B::to_edwards(&Q)
}

/// Variable-time multiscalar multiplication using Straus' method with
/// width-5 NAF digits.
///
/// Returns `None` if any of the points is `None`.
pub(crate) fn optional_multiscalar_mul<B, I, J>(scalars: I, points: J) -> Option<EdwardsPoint>
where
    B: CurveBackend,
    I: IntoIterator,
    I::Item: Borrow<Scalar>,
    J: IntoIterator<Item = Option<EdwardsPoint>>,
{
    let nafs: Vec<_> = scalars
        .into_iter()
        .map(|c| c.borrow().non_adjacent_form(5))
        .collect();

    let lookup_tables = points
        .into_iter()
        .map(|P_opt| {
            P_opt.map(|P| {
                NafLookupTable5::<B::Cached>::from_backend_point::<B>(&B::from_edwards(&P))
            })
        })
        .collect::<Option<Vec<_>>>()?;

    debug_assert_eq!(nafs.len(), lookup_tables.len());

    let mut r = B::Point::identity();
    for i in (0..256).rev() {
        r = B::double(&r);
        for (naf, lookup_table) in nafs.iter().zip(lookup_tables.iter()) {
            r = add_naf_digit::<B, _>(&r, naf[i], lookup_table);
        }
    }

    Some(B::to_edwards(&r))
}

/// Variable-time multiscalar multiplication where some of the points
/// come with prepared odd-multiples tables.
///
/// The prepared terms use width-8 NAF digits against their tables and
/// the remaining terms use width-5 NAF digits against tables built
/// here.  Returns `None` if any dynamic point is `None`.
pub(crate) fn optional_mixed_multiscalar_mul<B, I, J, K, L>(
    static_scalars: I,
    static_tables: J,
    dynamic_scalars: K,
    dynamic_points: L,
) -> Option<EdwardsPoint>
where
    B: CurveBackend,
    I: IntoIterator,
    I::Item: Borrow<Scalar>,
    J: IntoIterator,
    J::Item: Borrow<OddMultiples<B::Cached>>,
    K: IntoIterator,
    K::Item: Borrow<Scalar>,
    L: IntoIterator<Item = Option<EdwardsPoint>>,
{
    let static_nafs: Vec<_> = static_scalars
        .into_iter()
        .map(|c| c.borrow().non_adjacent_form(8))
        .collect();
    let static_tables: Vec<_> = static_tables.into_iter().collect();

    let dynamic_nafs: Vec<_> = dynamic_scalars
        .into_iter()
        .map(|c| c.borrow().non_adjacent_form(5))
        .collect();
    let dynamic_tables = dynamic_points
        .into_iter()
        .map(|P_opt| {
            P_opt.map(|P| {
                NafLookupTable5::<B::Cached>::from_backend_point::<B>(&B::from_edwards(&P))
            })
        })
        .collect::<Option<Vec<_>>>()?;

    debug_assert_eq!(static_nafs.len(), static_tables.len());
    debug_assert_eq!(dynamic_nafs.len(), dynamic_tables.len());

    let all_nafs: Vec<&[i8; 256]> = static_nafs.iter().chain(dynamic_nafs.iter()).collect();
    let mut i = highest_nonzero_digit(&all_nafs);

    let mut r = B::Point::identity();
    loop {
        r = B::double(&r);
        for (naf, table) in static_nafs.iter().zip(static_tables.iter()) {
            let table: &OddMultiples<B::Cached> = table.borrow();
            r = add_naf_digit::<B, _>(&r, naf[i], table);
        }
        for (naf, table) in dynamic_nafs.iter().zip(dynamic_tables.iter()) {
            r = add_naf_digit::<B, _>(&r, naf[i], table);
        }

        if i == 0 {
            break;
        }
        i -= 1;
    }

    Some(B::to_edwards(&r))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::backend::serial::SerialBackend;
    use crate::constants::ED25519_BASEPOINT_POINT as B;
    use crate::scalar::test::random_scalar;

    fn naive(scalars: &[Scalar], points: &[EdwardsPoint]) -> EdwardsPoint {
        scalars
            .iter()
            .zip(points.iter())
            .fold(EdwardsPoint::identity(), |acc, (s, P)| acc + P * s)
    }

    #[test]
    fn constant_time_matches_naive_sum() {
        let mut rng = rand::thread_rng();
        let scalars: Vec<Scalar> = (0..12).map(|_| random_scalar(&mut rng)).collect();
        let points: Vec<EdwardsPoint> = (0..12).map(|_| B * random_scalar(&mut rng)).collect();

        let expected = naive(&scalars, &points);
        assert_eq!(
            multiscalar_mul::<SerialBackend, _, _>(&scalars, &points),
            expected
        );
    }

    #[test]
    fn vartime_matches_naive_sum() {
        let mut rng = rand::thread_rng();
        let scalars: Vec<Scalar> = (0..12).map(|_| random_scalar(&mut rng)).collect();
        let points: Vec<EdwardsPoint> = (0..12).map(|_| B * random_scalar(&mut rng)).collect();

        let expected = naive(&scalars, &points);
        let result = optional_multiscalar_mul::<SerialBackend, _, _>(
            &scalars,
            points.iter().map(|P| Some(*P)),
        );
        assert_eq!(result, Some(expected));
    }

    #[test]
    fn missing_point_gives_none() {
        let scalars = [Scalar::ONE, Scalar::ONE];
        let points = [Some(B), None];
        assert!(optional_multiscalar_mul::<SerialBackend, _, _>(&scalars, points).is_none());
    }

    #[test]
    fn empty_input_gives_identity() {
        let scalars: [Scalar; 0] = [];
        let points: [EdwardsPoint; 0] = [];
        assert_eq!(
            multiscalar_mul::<SerialBackend, _, _>(&scalars, &points),
            EdwardsPoint::identity()
        );
    }

    #[test]
    fn mixed_matches_naive_sum() {
        let mut rng = rand::thread_rng();
        let scalars: Vec<Scalar> = (0..10).map(|_| random_scalar(&mut rng)).collect();
        let points: Vec<EdwardsPoint> = (0..10).map(|_| B * random_scalar(&mut rng)).collect();
        let expected = naive(&scalars, &points);

        let tables: Vec<OddMultiples<_>> = points[..4]
            .iter()
            .map(|P| OddMultiples::from_backend_point::<SerialBackend>(P))
            .collect();

        let result = optional_mixed_multiscalar_mul::<SerialBackend, _, _, _, _>(
            &scalars[..4],
            &tables,
            &scalars[4..],
            points[4..].iter().map(|P| Some(*P)),
        );
        assert_eq!(result, Some(expected));
    }
}
