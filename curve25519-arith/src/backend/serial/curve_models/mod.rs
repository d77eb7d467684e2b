// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

//! Coordinate systems used inside the serial point arithmetic.
//!
//! The curve is \\( -x\^2 + y\^2 = 1 + dx\^2y\^2 \\).  Each formula
//! reads one model and writes another, so algorithms state every
//! conversion they pay for:
//!
//! | model                  | coordinates                     | role                        |
//! |------------------------|---------------------------------|-----------------------------|
//! | `EdwardsPoint`         | \\( (X:Y:Z:T) \\), \\(XY = ZT\\) | addition input              |
//! | `ProjectivePoint`      | \\( (X:Y:Z) \\)                 | doubling input              |
//! | `CompletedPoint`       | \\( ((X:Z),(Y:T)) \\)           | output of add and double    |
//! | `ProjectiveNielsPoint` | \\( (Y+X, Y-X, Z, 2dT) \\)      | cached addend               |
//! | `AffineNielsPoint`     | \\( (y+x, y-x, 2dxy) \\)        | cached addend, `Z = 1`      |
//!
//! From a `CompletedPoint`, go to `ProjectivePoint` (3M) when the next
//! step is a doubling and to `EdwardsPoint` (4M) when it is an addition.

#![allow(non_snake_case)]

use core::fmt::{self, Debug};
use core::ops::{Add, Neg, Sub};

use subtle::{Choice, ConditionallySelectable};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::constants;
use crate::edwards::EdwardsPoint;
use crate::field::FieldElement;
use crate::traits::{Identity, ValidityCheck};

/// \\( (X:Y:Z) \\), the affine point \\( (X/Z, Y/Z) \\).
#[allow(missing_docs)]
#[derive(Copy, Clone)]
pub struct ProjectivePoint {
    pub X: FieldElement,
    pub Y: FieldElement,
    pub Z: FieldElement,
}

/// \\( ((X:Z),(Y:T)) \\), the affine point \\( (X/Z, Y/T) \\).
#[allow(missing_docs)]
#[derive(Copy, Clone)]
pub struct CompletedPoint {
    pub X: FieldElement,
    pub Y: FieldElement,
    pub Z: FieldElement,
    pub T: FieldElement,
}

/// An affine point cached as \\( (y+x, y-x, 2dxy) \\).
// One representative per point, so structural equality is point equality.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct AffineNielsPoint {
    pub y_plus_x: FieldElement,
    pub y_minus_x: FieldElement,
    pub xy2d: FieldElement,
}

/// An extended point cached as \\( (Y+X, Y-X, Z, 2dT) \\).
#[derive(Copy, Clone)]
pub struct ProjectiveNielsPoint {
    pub(crate) Y_plus_X: FieldElement,
    pub(crate) Y_minus_X: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T2d: FieldElement,
}

#[cfg(feature = "zeroize")]
impl Zeroize for AffineNielsPoint {
    fn zeroize(&mut self) {
        for coordinate in [&mut self.y_plus_x, &mut self.y_minus_x, &mut self.xy2d] {
            coordinate.zeroize();
        }
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for ProjectiveNielsPoint {
    fn zeroize(&mut self) {
        for coordinate in [
            &mut self.Y_plus_X,
            &mut self.Y_minus_X,
            &mut self.Z,
            &mut self.T2d,
        ] {
            coordinate.zeroize();
        }
    }
}

impl Identity for ProjectivePoint {
    fn identity() -> ProjectivePoint {
        ProjectivePoint {
            X: FieldElement::ZERO,
            Y: FieldElement::ONE,
            Z: FieldElement::ONE,
        }
    }
}

// (0, 1) has y + x = y - x = 1 and xy = 0.
impl Identity for ProjectiveNielsPoint {
    fn identity() -> ProjectiveNielsPoint {
        ProjectiveNielsPoint {
            Y_plus_X: FieldElement::ONE,
            Y_minus_X: FieldElement::ONE,
            Z: FieldElement::ONE,
            T2d: FieldElement::ZERO,
        }
    }
}

impl Identity for AffineNielsPoint {
    fn identity() -> AffineNielsPoint {
        AffineNielsPoint {
            y_plus_x: FieldElement::ONE,
            y_minus_x: FieldElement::ONE,
            xy2d: FieldElement::ZERO,
        }
    }
}

impl Default for ProjectiveNielsPoint {
    fn default() -> ProjectiveNielsPoint {
        Identity::identity()
    }
}

impl Default for AffineNielsPoint {
    fn default() -> AffineNielsPoint {
        Identity::identity()
    }
}

impl ValidityCheck for ProjectivePoint {
    fn is_valid(&self) -> bool {
        // Z^2 (Y^2 - X^2) = Z^4 + d X^2 Y^2
        let x2 = self.X.square();
        let y2 = self.Y.square();
        let z2 = self.Z.square();
        let lhs = &z2 * &(&y2 - &x2);
        let rhs = &z2.square() + &(&(&x2 * &y2) * &constants::EDWARDS_D);
        lhs == rhs
    }
}

impl ConditionallySelectable for ProjectiveNielsPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let pick = |x: &FieldElement, y: &FieldElement| FieldElement::conditional_select(x, y, choice);
        ProjectiveNielsPoint {
            Y_plus_X: pick(&a.Y_plus_X, &b.Y_plus_X),
            Y_minus_X: pick(&a.Y_minus_X, &b.Y_minus_X),
            Z: pick(&a.Z, &b.Z),
            T2d: pick(&a.T2d, &b.T2d),
        }
    }
}

impl ConditionallySelectable for AffineNielsPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let pick = |x: &FieldElement, y: &FieldElement| FieldElement::conditional_select(x, y, choice);
        AffineNielsPoint {
            y_plus_x: pick(&a.y_plus_x, &b.y_plus_x),
            y_minus_x: pick(&a.y_minus_x, &b.y_minus_x),
            xy2d: pick(&a.xy2d, &b.xy2d),
        }
    }
}

impl ProjectivePoint {
    /// To the extended model, 3M + 1S.
    pub fn as_extended(&self) -> EdwardsPoint {
        EdwardsPoint {
            X: &self.X * &self.Z,
            Y: &self.Y * &self.Z,
            Z: self.Z.square(),
            T: &self.X * &self.Y,
        }
    }

    /// `[2]self`, 3S + 1 double-square.
    pub fn double(&self) -> CompletedPoint {
        let x2 = self.X.square();
        let y2 = self.Y.square();
        let two_z2 = self.Z.square2();
        let sum_sq = (&self.X + &self.Y).square();
        let y2_plus_x2 = &y2 + &x2;
        let y2_minus_x2 = &y2 - &x2;

        CompletedPoint {
            X: &sum_sq - &y2_plus_x2,
            Y: y2_plus_x2,
            Z: y2_minus_x2,
            T: &two_z2 - &y2_minus_x2,
        }
    }
}

impl CompletedPoint {
    /// To the projective model, 3M.
    pub fn as_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            X: &self.X * &self.T,
            Y: &self.Y * &self.Z,
            Z: &self.Z * &self.T,
        }
    }

    /// To the extended model, 4M.
    pub fn as_extended(&self) -> EdwardsPoint {
        let ProjectivePoint { X, Y, Z } = self.as_projective();
        EdwardsPoint {
            X,
            Y,
            Z,
            T: &self.X * &self.Y,
        }
    }
}

impl EdwardsPoint {
    pub(crate) fn as_projective_niels(&self) -> ProjectiveNielsPoint {
        ProjectiveNielsPoint {
            Y_plus_X: &self.Y + &self.X,
            Y_minus_X: &self.Y - &self.X,
            Z: self.Z,
            T2d: &self.T * &constants::EDWARDS_D2,
        }
    }

    pub(crate) const fn as_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            X: self.X,
            Y: self.Y,
            Z: self.Z,
        }
    }

    /// Cached affine form.  Pays for one inversion.
    pub(crate) fn as_affine_niels(&self) -> AffineNielsPoint {
        let z_inv = self.Z.invert();
        let x = &self.X * &z_inv;
        let y = &self.Y * &z_inv;
        AffineNielsPoint {
            y_plus_x: &y + &x,
            y_minus_x: &y - &x,
            xy2d: &(&x * &y) * &constants::EDWARDS_D2,
        }
    }

    /// Shared body of the four readdition formulas.  `plus` and `minus`
    /// are the cached `y+x` and `y-x` factors (swapped for subtraction),
    /// `two_z` is \\( 2 Z_1 Z_2 \\) and `t` is the \\( 2dT_1T_2 \\) term,
    /// which subtraction enters with the opposite sign.
    #[inline]
    fn readd(
        &self,
        plus: &FieldElement,
        minus: &FieldElement,
        two_z: &FieldElement,
        t: &FieldElement,
        subtract: bool,
    ) -> CompletedPoint {
        let a = &(&self.Y + &self.X) * plus;
        let b = &(&self.Y - &self.X) * minus;
        let (z, t) = if subtract {
            (two_z - t, two_z + t)
        } else {
            (two_z + t, two_z - t)
        };
        CompletedPoint {
            X: &a - &b,
            Y: &a + &b,
            Z: z,
            T: t,
        }
    }
}

impl<'a, 'b> Add<&'b ProjectiveNielsPoint> for &'a EdwardsPoint {
    type Output = CompletedPoint;

    fn add(self, q: &'b ProjectiveNielsPoint) -> CompletedPoint {
        let zz = &self.Z * &q.Z;
        let t = &self.T * &q.T2d;
        self.readd(&q.Y_plus_X, &q.Y_minus_X, &(&zz + &zz), &t, false)
    }
}

impl<'a, 'b> Sub<&'b ProjectiveNielsPoint> for &'a EdwardsPoint {
    type Output = CompletedPoint;

    fn sub(self, q: &'b ProjectiveNielsPoint) -> CompletedPoint {
        let zz = &self.Z * &q.Z;
        let t = &self.T * &q.T2d;
        self.readd(&q.Y_minus_X, &q.Y_plus_X, &(&zz + &zz), &t, true)
    }
}

impl<'a, 'b> Add<&'b AffineNielsPoint> for &'a EdwardsPoint {
    type Output = CompletedPoint;

    fn add(self, q: &'b AffineNielsPoint) -> CompletedPoint {
        let t = &self.T * &q.xy2d;
        self.readd(&q.y_plus_x, &q.y_minus_x, &(&self.Z + &self.Z), &t, false)
    }
}

impl<'a, 'b> Sub<&'b AffineNielsPoint> for &'a EdwardsPoint {
    type Output = CompletedPoint;

    fn sub(self, q: &'b AffineNielsPoint) -> CompletedPoint {
        let t = &self.T * &q.xy2d;
        self.readd(&q.y_minus_x, &q.y_plus_x, &(&self.Z + &self.Z), &t, true)
    }
}

// -(x, y) = (-x, y) swaps y+x with y-x and flips the sign of xy.
impl<'a> Neg for &'a ProjectiveNielsPoint {
    type Output = ProjectiveNielsPoint;

    fn neg(self) -> ProjectiveNielsPoint {
        ProjectiveNielsPoint {
            Y_plus_X: self.Y_minus_X,
            Y_minus_X: self.Y_plus_X,
            Z: self.Z,
            T2d: -&self.T2d,
        }
    }
}

impl<'a> Neg for &'a AffineNielsPoint {
    type Output = AffineNielsPoint;

    fn neg(self) -> AffineNielsPoint {
        AffineNielsPoint {
            y_plus_x: self.y_minus_x,
            y_minus_x: self.y_plus_x,
            xy2d: -&self.xy2d,
        }
    }
}

impl Debug for ProjectivePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectivePoint")
            .field("X", &self.X)
            .field("Y", &self.Y)
            .field("Z", &self.Z)
            .finish()
    }
}

impl Debug for CompletedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletedPoint")
            .field("X", &self.X)
            .field("Y", &self.Y)
            .field("Z", &self.Z)
            .field("T", &self.T)
            .finish()
    }
}

impl Debug for AffineNielsPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AffineNielsPoint")
            .field("y_plus_x", &self.y_plus_x)
            .field("y_minus_x", &self.y_minus_x)
            .field("xy2d", &self.xy2d)
            .finish()
    }
}

impl Debug for ProjectiveNielsPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectiveNielsPoint")
            .field("Y_plus_X", &self.Y_plus_X)
            .field("Y_minus_X", &self.Y_minus_X)
            .field("Z", &self.Z)
            .field("T2d", &self.T2d)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::ED25519_BASEPOINT_POINT as B;

    #[test]
    fn projective_double_matches_extended_add() {
        let doubled = B.as_projective().double().as_extended();
        let added = (&B + &B.as_projective_niels()).as_extended();
        assert_eq!(doubled, added);
        assert!(doubled.as_projective().is_valid());
    }

    #[test]
    fn affine_and_projective_niels_agree() {
        let two_b = B.double();
        let via_projective = (&two_b + &B.as_projective_niels()).as_extended();
        let via_affine = (&two_b + &B.as_affine_niels()).as_extended();
        assert_eq!(via_projective, via_affine);

        let back_p = (&via_projective - &B.as_projective_niels()).as_extended();
        let back_a = (&via_affine - &B.as_affine_niels()).as_extended();
        assert_eq!(back_p, two_b);
        assert_eq!(back_a, two_b);
    }

    #[test]
    fn niels_negation_subtracts() {
        let neg = -&B.as_projective_niels();
        assert_eq!((&B + &neg).as_extended(), EdwardsPoint::identity());
        assert_eq!(
            (&B - &B.as_projective_niels()).as_extended(),
            EdwardsPoint::identity()
        );

        let neg_affine = -&B.as_affine_niels();
        assert_eq!((&B + &neg_affine).as_extended(), EdwardsPoint::identity());
    }

    #[test]
    fn niels_identity_is_neutral() {
        let p = (&B + &ProjectiveNielsPoint::identity()).as_extended();
        assert_eq!(p, B);
        let q = (&B + &AffineNielsPoint::identity()).as_extended();
        assert_eq!(q, B);
    }

    #[test]
    fn selection_picks_by_choice() {
        let b = B.as_affine_niels();
        let id = AffineNielsPoint::identity();
        assert_eq!(AffineNielsPoint::conditional_select(&id, &b, Choice::from(1)), b);
        assert_eq!(AffineNielsPoint::conditional_select(&id, &b, Choice::from(0)), id);
    }
}
