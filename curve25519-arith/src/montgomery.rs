// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

//! The Montgomery \\(u\\)-line of Curve25519 and the Montgomery ladder.
//!
//! Coordinates here are named \\(u, v\\) so they do not collide with the
//! Edwards \\(x, y\\).  A [`MontgomeryPoint`] stores only the affine
//! \\(u\\), which forgets the sign of \\(v\\) and makes no distinction
//! between the curve and its quadratic twist; the point at infinity is
//! written \\(u = 0\\).  Costello and Smith, [_Montgomery curves and
//! their arithmetic_](https://eprint.iacr.org/2017/212.pdf), cover the
//! \\(u\\)-line model in detail.
//!
//! Multiplication is the ladder, via `*` with a [`Scalar`] or
//! [`MontgomeryPoint::mul_bits_be`] for raw bit strings.  Moving between
//! models uses the birational map: `EdwardsPoint::to_montgomery` goes
//! one way, and [`MontgomeryPoint::to_edwards`] comes back given the
//! sign of the Edwards \\(x\\), refusing twist points.

#![allow(non_snake_case)]

use core::hash::{Hash, Hasher};
use core::ops::{Mul, MulAssign};

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::constants::APLUS2_OVER_FOUR;
use crate::edwards::{CompressedEdwardsY, EdwardsPoint};
use crate::errors::Error;
use crate::field::FieldElement;
use crate::scalar::Scalar;
use crate::traits::Identity;

/// The \\(u\\)-coordinate of a point on Curve25519 or its twist, as 32
/// little-endian bytes.
///
/// Bytes are not reduced on construction.  Equality and hashing work on
/// the value mod \\(p\\) with bit 255 ignored, so `[255; 32]` equals
/// \\(u = 18\\).
#[derive(Copy, Clone, Debug, Default)]
pub struct MontgomeryPoint(pub [u8; 32]);

impl MontgomeryPoint {
    fn u(&self) -> FieldElement {
        FieldElement::from_bytes(&self.0)
    }

    /// The stored bytes, by reference.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The stored bytes, by value.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// `scalar` times the basepoint \\(u = 9\\).
    ///
    /// Computed on the Edwards side with the fixed-base method and mapped
    /// across, which beats running the ladder.
    pub fn mul_base(scalar: &Scalar) -> Self {
        EdwardsPoint::mul_base(scalar).to_montgomery()
    }

    /// \\(u([n]P)\\) for `self` \\(= u(P)\\) and \\(n\\) given as bits,
    /// most significant first.
    ///
    /// The running time depends only on how many bits there are.  The
    /// result is well defined for twist points too.  Nothing is clamped:
    /// X25519-style callers clear and set the usual bits themselves.
    pub fn mul_bits_be(&self, bits: impl Iterator<Item = bool>) -> MontgomeryPoint {
        let u = self.u();
        let mut r0 = ProjectivePoint::identity();
        let mut r1 = ProjectivePoint {
            U: u,
            W: FieldElement::ONE,
        };

        // Invariant: r1 - r0 = P.  Swaps are deferred and merged, so each
        // step only swaps when the bit differs from the previous one.
        let mut pending = 0u8;
        for bit in bits {
            let bit = bit as u8;
            ProjectivePoint::conditional_swap(&mut r0, &mut r1, Choice::from(pending ^ bit));
            ladder_step(&mut r0, &mut r1, &u);
            pending = bit;
        }
        ProjectivePoint::conditional_swap(&mut r0, &mut r1, Choice::from(pending));

        #[cfg(feature = "zeroize")]
        pending.zeroize();

        r0.as_affine()
    }

    /// Lift to the Edwards point whose \\(x\\) has the given sign
    /// (`0` nonnegative, `1` negative).
    ///
    /// # Errors
    ///
    /// * [`Error::PointOnTwist`] for \\(u = -1\\), where the birational map
    ///   \\(y = (u - 1)/(u + 1)\\) is undefined.  That \\(u\\) is on the twist.
    /// * [`Error::PointDecompression`] when the resulting \\(y\\) has no
    ///   curve point, which is the case for every other twist point.
    pub fn to_edwards(&self, sign: u8) -> Result<EdwardsPoint, Error> {
        let u = self.u();
        if u == FieldElement::MINUS_ONE {
            return Err(Error::PointOnTwist);
        }

        let one = FieldElement::ONE;
        let y = &(&u - &one) * &(&u + &one).invert();

        let mut encoded = y.as_bytes();
        encoded[31] |= (sign & 1) << 7;
        CompressedEdwardsY(encoded).decompress()
    }
}

impl ConstantTimeEq for MontgomeryPoint {
    fn ct_eq(&self, other: &MontgomeryPoint) -> Choice {
        self.u().ct_eq(&other.u())
    }
}

impl PartialEq for MontgomeryPoint {
    fn eq(&self, other: &MontgomeryPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for MontgomeryPoint {}

impl Hash for MontgomeryPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Hash the reduced encoding so equal points hash alike.
        self.u().as_bytes().hash(state);
    }
}

impl Identity for MontgomeryPoint {
    /// \\(u = 0\\), the image of both the point at infinity and the
    /// 2-torsion point \\((0, 0)\\).
    fn identity() -> MontgomeryPoint {
        MontgomeryPoint([0; 32])
    }
}

impl TryFrom<&[u8]> for MontgomeryPoint {
    type Error = Error;

    /// Fails with [`Error::BytesLength`] unless `slice` is 32 bytes.
    /// Twist coordinates are accepted.
    fn try_from(slice: &[u8]) -> Result<MontgomeryPoint, Error> {
        <[u8; 32]>::try_from(slice)
            .map(MontgomeryPoint)
            .map_err(|_| Error::BytesLength {
                name: "MontgomeryPoint",
                length: 32,
            })
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for MontgomeryPoint {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MontgomeryPoint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::serde_fixed::serialize(&self.0, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MontgomeryPoint {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        crate::serde_fixed::deserialize(deserializer, "a Montgomery u-coordinate")
            .map(MontgomeryPoint)
    }
}

/// \\((U : W)\\) on the projective line, standing for \\(u = U/W\\).
#[derive(Copy, Clone, Debug)]
struct ProjectivePoint {
    U: FieldElement,
    W: FieldElement,
}

impl Identity for ProjectivePoint {
    fn identity() -> ProjectivePoint {
        ProjectivePoint {
            U: FieldElement::ONE,
            W: FieldElement::ZERO,
        }
    }
}

impl ConditionallySelectable for ProjectivePoint {
    fn conditional_select(a: &ProjectivePoint, b: &ProjectivePoint, choice: Choice) -> ProjectivePoint {
        ProjectivePoint {
            U: FieldElement::conditional_select(&a.U, &b.U, choice),
            W: FieldElement::conditional_select(&a.W, &b.W, choice),
        }
    }
}

impl ProjectivePoint {
    /// \\(U/W\\), or \\(0\\) when \\(W = 0\\) since zero inverts to zero.
    fn as_affine(&self) -> MontgomeryPoint {
        MontgomeryPoint((&self.U * &self.W.invert()).as_bytes())
    }
}

/// One ladder step: \\(P \gets [2]P\\) and \\(Q \gets P + Q\\), given the
/// affine \\(u(Q - P)\\).
///
/// Algorithm 8 of Costello-Smith with \\(a_{24} = (A + 2)/4\\).
fn ladder_step(P: &mut ProjectivePoint, Q: &mut ProjectivePoint, u_diff: &FieldElement) {
    let p_plus = &P.U + &P.W;
    let p_minus = &P.U - &P.W;
    let q_plus = &Q.U + &Q.W;
    let q_minus = &Q.U - &Q.W;

    let p_plus_sq = p_plus.square();
    let p_minus_sq = p_minus.square();
    // 4 U_P W_P
    let four_uw = &p_plus_sq - &p_minus_sq;

    let cross_1 = &p_plus * &q_minus;
    let cross_2 = &p_minus * &q_plus;

    Q.U = (&cross_1 + &cross_2).square();
    Q.W = u_diff * &(&cross_1 - &cross_2).square();

    P.U = &p_plus_sq * &p_minus_sq;
    P.W = &four_uw * &(&p_minus_sq + &(&APLUS2_OVER_FOUR * &four_uw));
}

impl<'a, 'b> Mul<&'b Scalar> for &'a MontgomeryPoint {
    type Output = MontgomeryPoint;

    fn mul(self, scalar: &'b Scalar) -> MontgomeryPoint {
        // Bit 255 of a scalar is always clear.
        self.mul_bits_be(scalar.bits_le().rev().skip(1))
    }
}

impl<'a, 'b> Mul<&'b MontgomeryPoint> for &'a Scalar {
    type Output = MontgomeryPoint;

    fn mul(self, point: &'b MontgomeryPoint) -> MontgomeryPoint {
        point * self
    }
}

impl<'b> MulAssign<&'b Scalar> for MontgomeryPoint {
    fn mul_assign(&mut self, scalar: &'b Scalar) {
        *self = &*self * scalar;
    }
}

define_mul_variants!(
    LHS = MontgomeryPoint,
    RHS = Scalar,
    Output = MontgomeryPoint
);
define_mul_variants!(
    LHS = Scalar,
    RHS = MontgomeryPoint,
    Output = MontgomeryPoint
);
define_mul_assign_variants!(LHS = MontgomeryPoint, RHS = Scalar);

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::{ED25519_BASEPOINT_POINT, X25519_BASEPOINT};
    use crate::scalar::test::random_scalar;
    use crate::traits::IsIdentity;

    use rand::Rng;

    fn bytes32(hex_str: &str) -> [u8; 32] {
        hex::decode(hex_str).unwrap().try_into().unwrap()
    }

    fn random_subgroup_point<R: rand::RngCore>(rng: &mut R) -> EdwardsPoint {
        EdwardsPoint::mul_base(&random_scalar(rng))
    }

    /// Bits of a little-endian byte string, most significant first.
    fn bits_be(bytes: &[u8]) -> impl Iterator<Item = bool> + Clone + '_ {
        (0..bytes.len() * 8)
            .rev()
            .map(move |i| (bytes[i / 8] >> (i % 8)) & 1 == 1)
    }

    fn x25519(k: [u8; 32], u: [u8; 32]) -> [u8; 32] {
        let mut clamped = k;
        clamped[0] &= 0xf8;
        clamped[31] &= 0x7f;
        clamped[31] |= 0x40;
        MontgomeryPoint(u).mul_bits_be(bits_be(&clamped)).to_bytes()
    }

    #[test]
    fn rfc7748_x25519_vectors() {
        let vectors = [
            (
                "a546e36bf0527c9d3b16154b82465edd62144c0ac1fc5a18506a2244ba449ac4",
                "e6db6867583030db3594c1a424b15f7c726624ec26b3353b10a903a6d0ab1c4c",
                "c3da55379de9c6908e94ea4df28d084f32eccf03491c71f754b4075577a28552",
            ),
            // This u has bit 255 set, which must be ignored.
            (
                "4b66e9d4d1b4673c5ad22691957d6af5c11b6421e0ea01d42ca4169e7918ba0d",
                "e5210f12786811d3f4b7959d0538ae2c31dbe7106fc03c3efc4cd549c715a493",
                "95cbde9476e8907d7aade45cb4b873f88b595a68799fa152e6f8f7647aac7957",
            ),
        ];
        for (k, u, expected) in vectors {
            assert_eq!(x25519(bytes32(k), bytes32(u)), bytes32(expected));
        }
    }

    #[test]
    fn identity_agrees_across_models() {
        assert_eq!(ProjectivePoint::identity().as_affine(), MontgomeryPoint::identity());
        assert_eq!(EdwardsPoint::identity().to_montgomery(), MontgomeryPoint::identity());
        assert!(MontgomeryPoint::default().is_identity());
    }

    #[test]
    fn basepoints_correspond() {
        assert_eq!(ED25519_BASEPOINT_POINT.to_montgomery(), X25519_BASEPOINT);
        assert_eq!(X25519_BASEPOINT.to_edwards(0), Ok(ED25519_BASEPOINT_POINT));
        assert_eq!(X25519_BASEPOINT.to_edwards(1), Ok(-ED25519_BASEPOINT_POINT));
    }

    #[test]
    fn twist_points_do_not_lift() {
        // u = 2 is on the twist.
        let mut two = [0u8; 32];
        two[0] = 2;
        assert_eq!(MontgomeryPoint(two).to_edwards(0), Err(Error::PointDecompression));

        // u = -1 is the pole of the birational map.
        let minus_one = MontgomeryPoint(FieldElement::MINUS_ONE.as_bytes());
        for sign in 0..2 {
            assert_eq!(minus_one.to_edwards(sign), Err(Error::PointOnTwist));
        }
    }

    #[test]
    fn lifting_recovers_the_edwards_point() {
        let mut rng = rand::thread_rng();
        for _ in 0..16 {
            let P = random_subgroup_point(&mut rng);
            let sign = P.compress().as_bytes()[31] >> 7;
            assert_eq!(P.to_montgomery().to_edwards(sign), Ok(P));
            assert_eq!(P.to_montgomery().to_edwards(sign ^ 1), Ok(-P));
        }
    }

    #[test]
    fn equality_and_hash_reduce_mod_p() {
        use std::collections::hash_map::DefaultHasher;

        fn digest(p: &MontgomeryPoint) -> u64 {
            let mut hasher = DefaultHasher::new();
            p.hash(&mut hasher);
            hasher.finish()
        }

        let mut eighteen = [0u8; 32];
        eighteen[0] = 18;
        let reduced = MontgomeryPoint(eighteen);
        let unreduced = MontgomeryPoint([0xff; 32]);

        assert_eq!(reduced, unreduced);
        assert_eq!(digest(&reduced), digest(&unreduced));
        assert_ne!(reduced, X25519_BASEPOINT);
    }

    #[test]
    fn ladder_agrees_with_edwards() {
        let mut rng = rand::thread_rng();
        for _ in 0..64 {
            let P = random_subgroup_point(&mut rng);
            let s = random_scalar(&mut rng);
            assert_eq!(P.to_montgomery() * s, (P * s).to_montgomery());
        }
    }

    #[test]
    fn wide_bit_strings_reduce_on_the_subgroup() {
        let mut rng = rand::thread_rng();
        for _ in 0..32 {
            let P = random_subgroup_point(&mut rng);
            let mut wide = [0u8; 64];
            rng.fill(&mut wide[..]);

            let expected = P * Scalar::from_bytes_mod_order_wide(&wide);
            assert_eq!(
                P.to_montgomery().mul_bits_be(bits_be(&wide)),
                expected.to_montgomery()
            );
        }
    }

    #[test]
    fn ladder_commutes_on_arbitrary_u() {
        let mut rng = rand::thread_rng();
        for _ in 0..32 {
            // Random bytes land on the curve or the twist about equally.
            let mut u = [0u8; 32];
            rng.fill(&mut u);
            let P = MontgomeryPoint(u);

            let mut a = [0u8; 40];
            let mut b = [0u8; 40];
            rng.fill(&mut a[..]);
            rng.fill(&mut b[..]);

            let ab = P.mul_bits_be(bits_be(&a)).mul_bits_be(bits_be(&b));
            let ba = P.mul_bits_be(bits_be(&b)).mul_bits_be(bits_be(&a));
            assert_eq!(ab, ba);
        }
    }

    #[test]
    fn mul_base_agrees_with_ladder() {
        let mut rng = rand::thread_rng();
        for _ in 0..16 {
            let s = random_scalar(&mut rng);
            assert_eq!(MontgomeryPoint::mul_base(&s), X25519_BASEPOINT * s);
        }
    }

    #[test]
    fn degenerate_scalars_and_points() {
        let s = random_scalar(&mut rand::thread_rng());

        assert!((MontgomeryPoint::identity() * s).is_identity());
        assert!((X25519_BASEPOINT * Scalar::ZERO).is_identity());
        assert!((X25519_BASEPOINT * crate::constants::BASEPOINT_ORDER_PRIVATE).is_identity());
        assert_eq!(X25519_BASEPOINT * Scalar::ONE, X25519_BASEPOINT);
        assert!(X25519_BASEPOINT.mul_bits_be(core::iter::empty()).is_identity());
    }

    #[test]
    fn operator_forms_agree() {
        let s = Scalar::from(12345u64);
        let expected = X25519_BASEPOINT * s;

        let mut P = X25519_BASEPOINT;
        P *= s;
        assert_eq!(P, expected);
        assert_eq!(&s * &X25519_BASEPOINT, expected);
        assert_eq!(s * X25519_BASEPOINT, expected);
    }

    #[test]
    fn slice_conversion_checks_length() {
        let bytes = X25519_BASEPOINT.to_bytes();
        assert_eq!(MontgomeryPoint::try_from(&bytes[..]), Ok(X25519_BASEPOINT));
        assert_eq!(
            MontgomeryPoint::try_from(&[0u8; 33][..]),
            Err(Error::BytesLength {
                name: "MontgomeryPoint",
                length: 32
            })
        );
    }

    #[test]
    #[cfg(feature = "serde")]
    fn serde_keeps_raw_bytes() {
        let encoded = bincode::serialize(&X25519_BASEPOINT).unwrap();
        assert_eq!(&encoded[..], X25519_BASEPOINT.as_bytes());

        // Twist coordinates and unreduced bytes survive unchanged.
        let raw = [0xffu8; 32];
        let decoded: MontgomeryPoint = bincode::deserialize(&raw).unwrap();
        assert_eq!(decoded.to_bytes(), raw);
        assert!(bincode::deserialize::<MontgomeryPoint>(&raw[..31]).is_err());
    }
}
