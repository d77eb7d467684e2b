// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

//! Basepoints, torsion points and curve parameters.
//!
//! Field constants are stored in whichever limb layout the build selected;
//! this module re-exports them and adds the layout-independent encodings.

#![allow(non_snake_case)]

use cfg_if::cfg_if;

use crate::edwards::{CompressedEdwardsY, EdwardsPoint};
use crate::montgomery::MontgomeryPoint;
use crate::ristretto::{CompressedRistretto, RistrettoPoint};
use crate::scalar::Scalar;

#[cfg(feature = "precomputed-tables")]
use spin::Lazy;

#[cfg(feature = "precomputed-tables")]
use crate::edwards::EdwardsBasepointTable;
#[cfg(feature = "precomputed-tables")]
use crate::ristretto::RistrettoBasepointTable;
#[cfg(feature = "precomputed-tables")]
use crate::traits::BasepointTable;

cfg_if! {
    if #[cfg(curve25519_arith_bits = "64")] {
        use crate::backend::serial::u64::constants as limb_constants;
    } else {
        use crate::backend::serial::u32::constants as limb_constants;
    }
}

pub(crate) use limb_constants::{
    APLUS2_OVER_FOUR, EDWARDS_D, EDWARDS_D2, EDWARDS_D_MINUS_ONE_SQUARED, INVSQRT_A_MINUS_D,
    ONE_MINUS_EDWARDS_D_SQUARED, SQRT_AD_MINUS_ONE, SQRT_M1,
};

/// The Ed25519 basepoint \\( B = (x, 4/5) \\) with \\( x \\) even.
///
/// Multiplying by it through [`ED25519_BASEPOINT_TABLE`] is much faster
/// than through this point.
pub const ED25519_BASEPOINT_POINT: EdwardsPoint = limb_constants::ED25519_BASEPOINT_POINT;

/// \\( [0]T, [1]T, \ldots, [7]T \\) for a generator \\( T \\) of the
/// cyclic torsion subgroup \\( \mathcal E[8] \\).
///
/// The even entries form \\( \mathcal E[4] \\) and entries 0 and 4 form
/// \\( \mathcal E[2] \\).
pub const EIGHT_TORSION: [EdwardsPoint; 8] = limb_constants::EIGHT_TORSION;

/// [`ED25519_BASEPOINT_POINT`] compressed: \\( 4/5 \bmod p \\) with a
/// clear sign bit.
pub const ED25519_BASEPOINT_COMPRESSED: CompressedEdwardsY = CompressedEdwardsY({
    let mut y = [0x66; 32];
    y[0] = 0x58;
    y
});

/// \\( u = 9 \\), the image of the Ed25519 basepoint.
pub const X25519_BASEPOINT: MontgomeryPoint = MontgomeryPoint({
    let mut u = [0u8; 32];
    u[0] = 9;
    u
});

/// Encoding of [`RISTRETTO_BASEPOINT_POINT`].
pub const RISTRETTO_BASEPOINT_COMPRESSED: CompressedRistretto = CompressedRistretto([
    0xe2, 0xf2, 0xae, 0x0a, 0x6a, 0xbc, 0x4e, 0x71, 0xa8, 0x84, 0xa9, 0x61, 0xc5, 0x00, 0x51, 0x5f,
    0x58, 0xe3, 0x0b, 0x6a, 0xa5, 0x82, 0xdd, 0x8d, 0xb6, 0xa6, 0x59, 0x45, 0xe0, 0x8d, 0x2d, 0x76,
]);

/// The coset of the Ed25519 basepoint, used as the Ristretto generator.
pub const RISTRETTO_BASEPOINT_POINT: RistrettoPoint = RistrettoPoint(ED25519_BASEPOINT_POINT);

/// \\( \ell \\) itself.  It reduces to zero, so it is not a valid public
/// `Scalar` and only serves tests that multiply by the group order.
pub(crate) const BASEPOINT_ORDER_PRIVATE: Scalar = Scalar {
    bytes: {
        let mut ell = [0u8; 32];
        let low = 0x14def9dea2f79cd65812631a5cf5d3edu128.to_le_bytes();
        let mut i = 0;
        while i < 16 {
            ell[i] = low[i];
            i += 1;
        }
        ell[31] = 0x10;
        ell
    },
};

/// Multiples of [`ED25519_BASEPOINT_POINT`] for fixed-base multiplication,
/// built on first use.
#[cfg(feature = "precomputed-tables")]
pub static ED25519_BASEPOINT_TABLE: Lazy<EdwardsBasepointTable> =
    Lazy::new(|| EdwardsBasepointTable::create(&ED25519_BASEPOINT_POINT));

/// Multiples of [`RISTRETTO_BASEPOINT_POINT`], built on first use.
#[cfg(feature = "precomputed-tables")]
pub static RISTRETTO_BASEPOINT_TABLE: Lazy<RistrettoBasepointTable> =
    Lazy::new(|| RistrettoBasepointTable::create(&RISTRETTO_BASEPOINT_POINT));

#[cfg(test)]
mod test {
    use super::*;
    use crate::field::FieldElement;
    use crate::traits::{IsIdentity, ValidityCheck};

    fn small(n: u32) -> FieldElement {
        let mut bytes = [0u8; 32];
        bytes[..4].copy_from_slice(&n.to_le_bytes());
        FieldElement::from_bytes(&bytes)
    }

    #[test]
    fn torsion_points_have_their_orders() {
        for (i, T) in EIGHT_TORSION.iter().enumerate() {
            assert!(T.is_valid());
            // [i]T has order 8 / gcd(i, 8).
            let order_log2 = 3 - (i | 8).trailing_zeros();
            if order_log2 == 0 {
                assert!(T.is_identity());
                continue;
            }
            assert!(T.mul_by_pow_2(order_log2).is_identity());
            let half_order = match order_log2 {
                1 => *T,
                k => T.mul_by_pow_2(k - 1),
            };
            assert!(!half_order.is_identity());
        }
    }

    #[test]
    fn square_roots_of_minus_one() {
        let minus_one = FieldElement::MINUS_ONE;
        assert_eq!(SQRT_M1.square(), minus_one);
        assert!(!bool::from(SQRT_M1.is_negative()));

        let (is_square, root) = minus_one.invsqrt();
        assert!(bool::from(is_square));
        assert_eq!(&root * &SQRT_M1, minus_one);
    }

    #[test]
    fn curve_parameters_derive_from_d() {
        let one = FieldElement::ONE;
        let minus_one = FieldElement::MINUS_ONE;
        let d = &-&small(121665) * &small(121666).invert();

        assert_eq!(EDWARDS_D, d);
        assert_eq!(EDWARDS_D2, &d + &d);
        assert_eq!(SQRT_AD_MINUS_ONE.square(), &(&minus_one * &d) - &one);
        assert_eq!(&INVSQRT_A_MINUS_D.square() * &(&minus_one - &d), one);
        assert_eq!(ONE_MINUS_EDWARDS_D_SQUARED, &one - &d.square());
        assert_eq!(EDWARDS_D_MINUS_ONE_SQUARED, (&d - &one).square());
        // (486662 + 2) / 4
        assert_eq!(APLUS2_OVER_FOUR, small(121666));
    }

    #[test]
    fn basepoint_encodings_agree() {
        assert_eq!(ED25519_BASEPOINT_POINT.compress(), ED25519_BASEPOINT_COMPRESSED);
        assert_eq!(RISTRETTO_BASEPOINT_POINT.compress(), RISTRETTO_BASEPOINT_COMPRESSED);
        assert_eq!(ED25519_BASEPOINT_POINT.to_montgomery(), X25519_BASEPOINT);
        assert_eq!(ED25519_BASEPOINT_COMPRESSED.decompress(), Ok(ED25519_BASEPOINT_POINT));
    }

    #[test]
    fn group_order_annihilates_basepoint() {
        assert!((ED25519_BASEPOINT_POINT * BASEPOINT_ORDER_PRIVATE).is_identity());
        assert_eq!(
            BASEPOINT_ORDER_PRIVATE.as_bytes()[..16],
            [0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde, 0x14]
        );
    }

    #[test]
    #[cfg(feature = "precomputed-tables")]
    fn basepoint_tables_hold_the_basepoints() {
        assert_eq!(ED25519_BASEPOINT_TABLE.basepoint(), ED25519_BASEPOINT_POINT);
        assert_eq!(RISTRETTO_BASEPOINT_TABLE.basepoint(), RISTRETTO_BASEPOINT_POINT);
    }
}
