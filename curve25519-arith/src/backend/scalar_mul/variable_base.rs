// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

#![allow(non_snake_case)]

use crate::backend::CurveBackend;
use crate::edwards::EdwardsPoint;
use crate::scalar::Scalar;
use crate::traits::Identity;
use crate::window::LookupTable;

/// Constant-time \\( sP \\) for an arbitrary point.
///
/// Horner evaluation over the 64 signed radix-16 digits of `scalar`, most
/// significant first: four doublings, then one table read per digit.  The
/// digit range \\( [-8, 8] \\) needs \\( s < 2^{255} \\), which every
/// reduced scalar satisfies.
pub(crate) fn mul<B: CurveBackend>(point: &EdwardsPoint, scalar: &Scalar) -> EdwardsPoint {
    let table = LookupTable::<B::Cached>::from_backend_point::<B>(&B::from_edwards(point));

    #[cfg_attr(not(feature = "zeroize"), allow(unused_mut))]
    let mut digits = scalar.as_radix_16();

    let mut acc = B::add_cached(&B::Point::identity(), &table.select(digits[63]));
    for &digit in digits[..63].iter().rev() {
        acc = B::add_cached(&B::mul_by_pow_2(&acc, 4), &table.select(digit));
    }

    #[cfg(feature = "zeroize")]
    zeroize::Zeroize::zeroize(&mut digits);

    B::to_edwards(&acc)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::backend::serial::SerialBackend;
    use crate::constants::ED25519_BASEPOINT_POINT as B;

    #[test]
    fn small_multiples_match_repeated_addition() {
        let mut expected = EdwardsPoint::identity();
        for k in 0u64..20 {
            assert_eq!(mul::<SerialBackend>(&B, &Scalar::from(k)), expected);
            expected = &expected + &B;
        }
    }

    #[test]
    fn order_minus_one_is_negation() {
        let minus_one = -Scalar::ONE;
        assert_eq!(mul::<SerialBackend>(&B, &minus_one), -B);
    }
}
