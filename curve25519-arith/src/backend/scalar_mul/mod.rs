// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

//! Implementations of various scalar multiplication algorithms.
//!
//! Every algorithm here is generic over a [`CurveBackend`], so the
//! serial and parallel point formulas share one implementation of
//! each.

#![allow(non_snake_case)]

use core::cmp::Ordering;

use crate::backend::CurveBackend;
use crate::window::{NafLookupTable8, OddMultipleTable};

pub(crate) mod variable_base;

pub(crate) mod vartime_double_base;

pub(crate) mod abglsv_pornin;

#[cfg(feature = "alloc")]
pub(crate) mod straus;

#[cfg(feature = "alloc")]
pub(crate) mod pippenger;

/// The odd multiples \\( A, 3A, \ldots, 127A \\) of a point, prepared
/// once and reused by every variable-time algorithm that takes it.
pub(crate) type OddMultiples<T> = NafLookupTable8<T>;

/// Add \\( \mathrm{digit} \cdot A \\) to `Q`, where `digit` is a
/// nonzero odd NAF digit or zero, and `table` holds odd multiples of
/// \\( A \\).
#[inline(always)]
pub(crate) fn add_naf_digit<B, T>(Q: &B::Point, digit: i8, table: &T) -> B::Point
where
    B: CurveBackend,
    T: OddMultipleTable<B::Cached> + ?Sized,
{
    match digit.cmp(&0) {
        Ordering::Greater => B::add_cached(Q, &table.select(digit as usize)),
        Ordering::Less => B::sub_cached(Q, &table.select(-digit as usize)),
        Ordering::Equal => *Q,
    }
}

/// Index of the most significant nonzero digit over all `nafs`, or zero.
#[inline]
pub(crate) fn highest_nonzero_digit(nafs: &[&[i8; 256]]) -> usize {
    (0..256)
        .rev()
        .find(|&i| nafs.iter().any(|naf| naf[i] != 0))
        .unwrap_or(0)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::backend::parallel::ParallelBackend;
    use crate::backend::serial::SerialBackend;
    use crate::constants::ED25519_BASEPOINT_POINT as B;
    use crate::edwards::EdwardsPoint;
    use crate::scalar::test::random_scalar;
    use crate::scalar::Scalar;

    fn agree(a: &Scalar, A: &EdwardsPoint, b: &Scalar, C: &EdwardsPoint) {
        let serial = variable_base::mul::<SerialBackend>(A, a);
        let parallel = variable_base::mul::<ParallelBackend>(A, a);
        assert_eq!(serial, parallel);

        let serial = vartime_double_base::mul::<SerialBackend>(a, A, b);
        let parallel = vartime_double_base::mul::<ParallelBackend>(a, A, b);
        assert_eq!(serial, parallel);

        let serial = abglsv_pornin::mul::<SerialBackend>(a, A, b, C);
        let parallel = abglsv_pornin::mul::<ParallelBackend>(a, A, b, C);
        assert_eq!(serial, parallel);
    }

    #[test]
    fn serial_and_parallel_backends_agree() {
        let mut rng = rand::thread_rng();
        for _ in 0..4 {
            let a = random_scalar(&mut rng);
            let b = random_scalar(&mut rng);
            let A = B * random_scalar(&mut rng);
            let C = B * random_scalar(&mut rng);
            agree(&a, &A, &b, &C);
        }
    }

    #[test]
    #[cfg(feature = "alloc")]
    fn serial_and_parallel_multiscalar_agree() {
        use alloc::vec::Vec;

        let mut rng = rand::thread_rng();
        let scalars: Vec<Scalar> = (0..20).map(|_| random_scalar(&mut rng)).collect();
        let points: Vec<EdwardsPoint> = (0..20).map(|_| B * random_scalar(&mut rng)).collect();

        let serial = straus::multiscalar_mul::<SerialBackend, _, _>(&scalars, &points);
        let parallel = straus::multiscalar_mul::<ParallelBackend, _, _>(&scalars, &points);
        assert_eq!(serial, parallel);

        let serial = pippenger::optional_multiscalar_mul::<SerialBackend, _, _>(
            &scalars,
            points.iter().map(|P| Some(*P)),
        );
        let parallel = pippenger::optional_multiscalar_mul::<ParallelBackend, _, _>(
            &scalars,
            points.iter().map(|P| Some(*P)),
        );
        assert_eq!(serial, parallel);
    }

    #[test]
    fn highest_digit_of_zero_nafs_is_zero() {
        let zero = [0i8; 256];
        let mut one_at_top = [0i8; 256];
        one_at_top[200] = 1;
        assert_eq!(highest_nonzero_digit(&[&zero, &zero]), 0);
        assert_eq!(highest_nonzero_digit(&[&zero, &one_at_top]), 200);
    }
}
