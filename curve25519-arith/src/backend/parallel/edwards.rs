// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

//! Parallel Edwards point arithmetic, implementing the formulas of
//! Hisil, Wong, Carter, and Dawson.
//!
//! # Representations
//!
//! An `ExtendedPoint` stores the extended coordinates
//! \\( (X:Y:Z:T) \\) as one `FieldElementx4`.  A `CachedPoint` stores
//! \\( (Y - X, Y + X, 2Z, 2dT) \\) scaled by \\( 121666 \\), so that
//! the curve constant \\( d = -121665/121666 \\) becomes a pair of
//! small integers.
//!
//! # Doubling
//!
//! With \\( S\_1 = X\^2, S\_2 = Y\^2, S\_3 = Z\^2, S\_4 = (X+Y)\^2 \\),
//! the doubling is
//! $$
//! \begin{aligned}
//! (S\_5, S\_6, S\_8, S\_9) &= (S\_1 + S\_2, S\_1 - S\_2, S\_1 + 2S\_3 - S\_2, S\_1 + S\_2 - S\_4) \\\\
//! (X\_3, Y\_3, Z\_3, T\_3) &= (S\_8 S\_9, S\_5 S\_6, S\_8 S\_6, S\_5 S\_9)
//! \end{aligned}
//! $$
//! which needs one vector squaring and one vector multiplication.
//!
//! # Readdition
//!
//! Adding a `CachedPoint` costs two vector multiplications: one to
//! form \\( (S\_8, S\_9, S\_{10}, S\_{11}) \\), the products of the
//! paired coordinates, and one to produce the extended result from
//! their differences and sums.

#![allow(non_snake_case)]

use core::ops::{Add, Neg, Sub};

use subtle::Choice;
use subtle::ConditionallySelectable;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::edwards;
use crate::field::FieldElement;
use crate::traits::Identity;

use super::field::{FieldElementx4, Lanes, Shuffle};

/// A point on Curve25519, using the parallel extended coordinates.
#[derive(Copy, Clone, Debug)]
pub(crate) struct ExtendedPoint(pub(crate) FieldElementx4);

#[cfg(feature = "zeroize")]
impl Zeroize for ExtendedPoint {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl From<edwards::EdwardsPoint> for ExtendedPoint {
    fn from(P: edwards::EdwardsPoint) -> ExtendedPoint {
        ExtendedPoint(FieldElementx4::new(&P.X, &P.Y, &P.Z, &P.T))
    }
}

impl From<ExtendedPoint> for edwards::EdwardsPoint {
    fn from(P: ExtendedPoint) -> edwards::EdwardsPoint {
        let [X, Y, Z, T] = P.0.split();
        edwards::EdwardsPoint { X, Y, Z, T }
    }
}

impl ConditionallySelectable for ExtendedPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        ExtendedPoint(FieldElementx4::conditional_select(&a.0, &b.0, choice))
    }

    fn conditional_assign(&mut self, other: &Self, choice: Choice) {
        self.0.conditional_assign(&other.0, choice);
    }
}

impl Default for ExtendedPoint {
    fn default() -> ExtendedPoint {
        ExtendedPoint::identity()
    }
}

impl Identity for ExtendedPoint {
    fn identity() -> ExtendedPoint {
        ExtendedPoint(FieldElementx4::new(
            &FieldElement::ZERO,
            &FieldElement::ONE,
            &FieldElement::ONE,
            &FieldElement::ZERO,
        ))
    }
}

/// The lane-wise curve constants \\( (121666, 121666, 2 \cdot 121666, 2 \cdot 121665) \\).
fn curve_constants() -> FieldElementx4 {
    let small = |x: u32| {
        let mut bytes = [0u8; 32];
        bytes[..4].copy_from_slice(&x.to_le_bytes());
        FieldElement::from_bytes(&bytes)
    };
    FieldElementx4::new(
        &small(121666),
        &small(121666),
        &small(2 * 121666),
        &small(2 * 121665),
    )
}

impl ExtendedPoint {
    /// Compute the double of this point.
    pub(crate) fn double(&self) -> ExtendedPoint {
        // (X1 Y1 Z1 T1) -> (X1 Y1 X1 Y1)
        let mut tmp0 = self.0.shuffle(Shuffle::ABAB);

        // (X1 Y1 X1 Y1) -> (Y1 X1 Y1 X1)
        let mut tmp1 = tmp0.shuffle(Shuffle::BADC);

        // tmp0 = (X1 Y1 Z1 X1+Y1)
        tmp0 = self.0.blend(tmp0 + tmp1, Lanes::D);

        // tmp1 = (S1 S2 S3 -S4)
        tmp1 = tmp0.square_and_negate_D();

        let zero = FieldElementx4::ZERO;

        // S_1 = (S1 S1 S1 S1), S_2 = (S2 S2 S2 S2)
        let S_1 = tmp1.shuffle(Shuffle::AAAA);
        let S_2 = tmp1.shuffle(Shuffle::BBBB);

        // tmp0 = (0 0 2S3 -S4)
        tmp0 = zero.blend(tmp1 + tmp1, Lanes::C);
        tmp0 = tmp0.blend(tmp1, Lanes::D);

        // tmp0 = (S1 S1 S1+2S3 S1-S4)
        tmp0 = tmp0 + S_1;

        // tmp0 = (S1+S2 S1 S1+2S3 S1+S2-S4)
        tmp0 = tmp0 + zero.blend(S_2, Lanes::AD);

        // tmp0 = (S5 S6 S8 S9) = (S1+S2 S1-S2 S1-S2+2S3 S1+S2-S4)
        tmp0 = tmp0 + zero.blend(S_2.negate_lazy(), Lanes::BC);

        // (S8 S5 S8 S5) * (S9 S6 S6 S9) = (X3 Y3 Z3 T3)
        let tmp2 = tmp0.shuffle(Shuffle::CACA);
        let tmp3 = tmp0.shuffle(Shuffle::DBBD);

        ExtendedPoint(&tmp2.reduce() * &tmp3.reduce())
    }

    /// Compute \\( 2\^k \\) times this point by repeated doubling.
    pub(crate) fn mul_by_pow_2(&self, k: u32) -> ExtendedPoint {
        let mut tmp: ExtendedPoint = *self;
        for _ in 0..k {
            tmp = tmp.double();
        }
        tmp
    }
}

/// A cached point with some precomputed variables used for readdition.
#[derive(Copy, Clone, Debug)]
pub(crate) struct CachedPoint(pub(crate) FieldElementx4);

#[cfg(feature = "zeroize")]
impl Zeroize for CachedPoint {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl From<ExtendedPoint> for CachedPoint {
    fn from(P: ExtendedPoint) -> CachedPoint {
        let mut x = P.0;

        // x = (Y-X, Y+X, Z, T)
        x = x.blend(x.diff_sum(), Lanes::AB);

        // x = 121666 * (Y-X, Y+X, 2Z, 2T) with the sign of d still missing
        x = &x * &curve_constants();

        // x = 121666 * (Y-X, Y+X, 2Z, 2dT)
        x = x.blend(x.negate_lazy(), Lanes::D);

        CachedPoint(x)
    }
}

impl Default for CachedPoint {
    fn default() -> CachedPoint {
        CachedPoint::identity()
    }
}

impl Identity for CachedPoint {
    fn identity() -> CachedPoint {
        CachedPoint::from(ExtendedPoint::identity())
    }
}

impl ConditionallySelectable for CachedPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        CachedPoint(FieldElementx4::conditional_select(&a.0, &b.0, choice))
    }

    fn conditional_assign(&mut self, other: &Self, choice: Choice) {
        self.0.conditional_assign(&other.0, choice);
    }
}

impl<'a> Neg for &'a CachedPoint {
    type Output = CachedPoint;

    /// Swap \\( Y - X \\) with \\( Y + X \\) and negate the \\( T \\) lane.
    fn neg(self) -> CachedPoint {
        CachedPoint(self.0.blend(self.0.negate_lazy(), Lanes::D).shuffle(Shuffle::BACD))
    }
}

impl<'a, 'b> Add<&'b CachedPoint> for &'a ExtendedPoint {
    type Output = ExtendedPoint;

    /// Add an `ExtendedPoint` and a `CachedPoint`.
    fn add(self, other: &'b CachedPoint) -> ExtendedPoint {
        let mut tmp = self.0;

        // tmp = (Y1-X1 Y1+X1 Z1 T1) = (S0 S1 Z1 T1)
        tmp = tmp.blend(tmp.diff_sum(), Lanes::AB);

        // tmp = (S0*S2' S1*S3' Z1*Z2' T1*T2') = (S8 S9 S10 S11)
        tmp = &tmp * &other.0;

        // tmp = (S8 S9 S11 S10)
        tmp = tmp.shuffle(Shuffle::ABDC);

        // tmp = (S9-S8 S9+S8 S10-S11 S10+S11) = (S12 S13 S14 S15)
        let tmp = tmp.diff_sum();

        // t0 = (S12 S15 S15 S12)
        let t0 = tmp.shuffle(Shuffle::ADDA);
        // t1 = (S14 S13 S14 S13)
        let t1 = tmp.shuffle(Shuffle::CBCB);

        // Return (S12*S14 S15*S13 S15*S14 S12*S13) = (X3 Y3 Z3 T3)
        ExtendedPoint(&t0 * &t1)
    }
}

impl<'a, 'b> Sub<&'b CachedPoint> for &'a ExtendedPoint {
    type Output = ExtendedPoint;

    /// Implement subtraction by negating the point and adding.
    fn sub(self, other: &'b CachedPoint) -> ExtendedPoint {
        self + &(-other)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::ED25519_BASEPOINT_POINT as B;
    use crate::edwards::EdwardsPoint;
    use crate::scalar::Scalar;

    #[test]
    fn conversion_round_trips() {
        let P = ExtendedPoint::from(B);
        assert_eq!(EdwardsPoint::from(P), B);
    }

    #[test]
    fn double_matches_serial() {
        let P = ExtendedPoint::from(B);
        assert_eq!(EdwardsPoint::from(P.double()), B.double());
        assert_eq!(
            EdwardsPoint::from(P.mul_by_pow_2(5)),
            B * Scalar::from(32u64)
        );
    }

    #[test]
    fn add_and_sub_match_serial() {
        let P = ExtendedPoint::from(B);
        let Q = ExtendedPoint::from(B.double());
        let cached_Q = CachedPoint::from(Q);

        assert_eq!(EdwardsPoint::from(&P + &cached_Q), B * Scalar::from(3u64));
        assert_eq!(EdwardsPoint::from(&P - &cached_Q), -B);
    }

    #[test]
    fn identity_is_neutral() {
        let P = ExtendedPoint::from(B);
        let sum = &P + &CachedPoint::identity();
        assert_eq!(EdwardsPoint::from(sum), B);

        let twice_identity = ExtendedPoint::identity().double();
        assert_eq!(EdwardsPoint::from(twice_identity), EdwardsPoint::identity());
    }

    #[test]
    fn negated_cached_point_cancels() {
        let P = ExtendedPoint::from(B);
        let neg = -&CachedPoint::from(P);
        assert_eq!(EdwardsPoint::from(&P + &neg), EdwardsPoint::identity());
    }
}
