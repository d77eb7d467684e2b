// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

//! Points on the twisted Edwards curve \\( -x\^2 + y\^2 = 1 + dx\^2y\^2 \\).
//!
//! The full group \\( \mathcal E \\) has order \\( 8\ell \\) and splits as
//! \\( \mathcal E\[8\] \times \mathcal E\[\ell\] \\).  Nothing here projects
//! away the small-order part: an `EdwardsPoint` may carry torsion, and
//! [`EdwardsPoint::is_small_order`], [`EdwardsPoint::is_torsion_free`] and
//! [`EdwardsPoint::mul_by_cofactor`] are there to inspect or clear it.  Use
//! [`crate::ristretto`] for a prime-order group.
//!
//! Points travel as a [`CompressedEdwardsY`]: the 255-bit \\( y \\) with
//! the sign of \\( x \\) in the top bit.  An `EdwardsPoint` can only come
//! from a successful decompression or from arithmetic on other points, so
//! every value of the type lies on the curve.
//!
//! Multiplication comes in several forms:
//!
//! | operation                                    | timing   |
//! |----------------------------------------------|----------|
//! | `point * scalar`                             | constant |
//! | [`EdwardsPoint::mul_base`], `&table * scalar` | constant |
//! | [`crate::traits::MultiscalarMul`]            | constant |
//! | [`crate::traits::VartimeMultiscalarMul`]     | variable |
//! | `vartime_{double,triple}_scalar_mul_basepoint` | variable |
//! | [`ExpandedEdwardsPoint`] methods             | variable |
//!
//! Internally a point is kept in extended coordinates \\( (X:Y:Z:T) \\)
//! with \\( x = X/Z \\), \\( y = Y/Z \\) and \\( xy = T/Z \\).

#![allow(non_snake_case)]

use core::borrow::Borrow;
use core::fmt::{self, Debug};
use core::hash::{Hash, Hasher};
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use subtle::{Choice, ConditionallyNegatable, ConditionallySelectable, ConstantTimeEq};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::backend;
use crate::backend::scalar_mul::OddMultiples;
use crate::backend::serial::curve_models::AffineNielsPoint;
use crate::backend::SelectedCached;
use crate::constants;
use crate::errors::Error;
use crate::field::FieldElement;
use crate::montgomery::MontgomeryPoint;
use crate::scalar::Scalar;
#[allow(unused_imports)]
use crate::traits::ValidityCheck;
use crate::traits::{BasepointTable, Identity, IsIdentity};
#[cfg(feature = "alloc")]
use crate::traits::{MultiscalarMul, VartimeMultiscalarMul};
use crate::window::LookupTable;

/// Variable-time multiscalar calls switch from Straus to Pippenger at
/// this many terms.
#[cfg(feature = "alloc")]
const PIPPENGER_THRESHOLD: usize = 190;

/// The wire form of an Edwards point: little-endian \\( y \\) in bits
/// 0..255 and the sign (low bit) of \\( x \\) in bit 255.
#[allow(clippy::derived_hash_with_manual_eq)]
#[derive(Copy, Clone, Hash)]
pub struct CompressedEdwardsY(pub [u8; 32]);

/// The encodings of \\( (0, 1) \\) and \\( (0, -1) \\) with the sign bit
/// set.  They decode, but no point compresses to them.
const NEGATIVE_ZERO_X: [[u8; 32]; 2] = {
    let mut y_one = [0u8; 32];
    y_one[0] = 0x01;
    y_one[31] = 0x80;
    let mut y_minus_one = [0xffu8; 32];
    y_minus_one[0] = 0xec;
    [y_one, y_minus_one]
};

impl ConstantTimeEq for CompressedEdwardsY {
    fn ct_eq(&self, other: &CompressedEdwardsY) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for CompressedEdwardsY {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl Eq for CompressedEdwardsY {}

impl Debug for CompressedEdwardsY {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompressedEdwardsY").field(&self.0).finish()
    }
}

impl CompressedEdwardsY {
    /// Borrow the encoding.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy out the encoding.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Recover the point.
    ///
    /// A \\( y \geq p \\) is reduced rather than rejected, matching
    /// Ed25519 verifiers; [`CompressedEdwardsY::is_canonical`] is the
    /// strict check.  Fails with [`Error::PointDecompression`] when no
    /// curve point has this \\( y \\).
    pub fn decompress(&self) -> Result<EdwardsPoint, Error> {
        let y = FieldElement::from_bytes(&self.0);
        let y2 = y.square();

        // x^2 = (y^2 - 1) / (d y^2 + 1)
        let numerator = &y2 - &FieldElement::ONE;
        let denominator = &(&y2 * &constants::EDWARDS_D) + &FieldElement::ONE;
        let (on_curve, mut x) = FieldElement::sqrt_ratio_i(&numerator, &denominator);
        if !bool::from(on_curve) {
            return Err(Error::PointDecompression);
        }

        // `x` is the nonnegative root; bit 255 asks for the other one.
        x.conditional_negate(Choice::from(self.0[31] >> 7));

        Ok(EdwardsPoint {
            X: x,
            Y: y,
            Z: FieldElement::ONE,
            T: &x * &y,
        })
    }

    /// Whether this is the exact byte string some point compresses to.
    /// Variable time.
    ///
    /// Rejects \\( y \geq p \\), and the sign bit set on the two points
    /// with \\( x = 0 \\).
    pub fn is_canonical(&self) -> bool {
        let b = &self.0;
        // y >= p only when the low byte is at least 0xed and every other
        // bit below 255 is set.
        let y_reduced = b[0] < 0xed || b[1..31].iter().any(|&x| x != 0xff) || b[31] & 0x7f != 0x7f;
        y_reduced && !NEGATIVE_ZERO_X.contains(b)
    }
}

impl TryFrom<&[u8]> for CompressedEdwardsY {
    type Error = Error;

    /// Fails with [`Error::BytesLength`] unless `bytes` has 32 entries.
    fn try_from(bytes: &[u8]) -> Result<CompressedEdwardsY, Error> {
        <[u8; 32]>::try_from(bytes)
            .map(CompressedEdwardsY)
            .map_err(|_| Error::BytesLength {
                name: "CompressedEdwardsY",
                length: 32,
            })
    }
}

impl Identity for CompressedEdwardsY {
    fn identity() -> CompressedEdwardsY {
        let mut y_one = [0u8; 32];
        y_one[0] = 1;
        CompressedEdwardsY(y_one)
    }
}

impl Default for CompressedEdwardsY {
    fn default() -> CompressedEdwardsY {
        CompressedEdwardsY::identity()
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for CompressedEdwardsY {
    /// Overwrite with the encoding of the identity.
    fn zeroize(&mut self) {
        self.0.zeroize();
        self.0[0] = 1;
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CompressedEdwardsY {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::serde_fixed::serialize(&self.0, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CompressedEdwardsY {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        crate::serde_fixed::deserialize(deserializer, "an Edwards y-coordinate and sign")
            .map(CompressedEdwardsY)
    }
}

/// Points serialize as their compressed form and are decompressed,
/// with validation, on the way back in.
#[cfg(feature = "serde")]
impl serde::Serialize for EdwardsPoint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::serde_fixed::serialize(self.compress().as_bytes(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for EdwardsPoint {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = crate::serde_fixed::deserialize(deserializer, "an Edwards point")?;
        CompressedEdwardsY(bytes)
            .decompress()
            .map_err(serde::de::Error::custom)
    }
}

/// A point on the Edwards curve, in extended coordinates.
#[derive(Copy, Clone)]
pub struct EdwardsPoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

impl Identity for EdwardsPoint {
    fn identity() -> EdwardsPoint {
        EdwardsPoint {
            X: FieldElement::ZERO,
            Y: FieldElement::ONE,
            Z: FieldElement::ONE,
            T: FieldElement::ZERO,
        }
    }
}

impl Default for EdwardsPoint {
    fn default() -> EdwardsPoint {
        EdwardsPoint::identity()
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for EdwardsPoint {
    /// Overwrite with the identity.
    fn zeroize(&mut self) {
        self.X.zeroize();
        self.T.zeroize();
        self.Y = FieldElement::ONE;
        self.Z = FieldElement::ONE;
    }
}

impl ValidityCheck for EdwardsPoint {
    fn is_valid(&self) -> bool {
        // On the curve, and T consistent with X, Y, Z.
        self.as_projective().is_valid() && &self.X * &self.Y == &self.Z * &self.T
    }
}

impl ConditionallySelectable for EdwardsPoint {
    fn conditional_select(a: &EdwardsPoint, b: &EdwardsPoint, choice: Choice) -> EdwardsPoint {
        let pick = |x: &FieldElement, y: &FieldElement| FieldElement::conditional_select(x, y, choice);
        EdwardsPoint {
            X: pick(&a.X, &b.X),
            Y: pick(&a.Y, &b.Y),
            Z: pick(&a.Z, &b.Z),
            T: pick(&a.T, &b.T),
        }
    }
}

impl ConstantTimeEq for EdwardsPoint {
    /// Cross-multiplied comparison of \\( x \\) and \\( y \\), with no
    /// inversion.
    fn ct_eq(&self, other: &EdwardsPoint) -> Choice {
        let same_x = (&self.X * &other.Z).ct_eq(&(&other.X * &self.Z));
        let same_y = (&self.Y * &other.Z).ct_eq(&(&other.Y * &self.Z));
        same_x & same_y
    }
}

impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &EdwardsPoint) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl Eq for EdwardsPoint {}

impl Hash for EdwardsPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.compress().0.hash(state);
    }
}

impl EdwardsPoint {
    /// The Montgomery \\( u = (1 + y)/(1 - y) \\) of this point.
    ///
    /// The sign of \\( x \\) is lost.  The identity, where the
    /// denominator vanishes, maps to \\( u = 0 \\).
    pub fn to_montgomery(&self) -> MontgomeryPoint {
        // (Z + Y)/(Z - Y); inverting zero gives zero.
        let u = &(&self.Z + &self.Y) * &(&self.Z - &self.Y).invert();
        MontgomeryPoint(u.as_bytes())
    }

    /// The canonical 32-byte encoding.
    pub fn compress(&self) -> CompressedEdwardsY {
        let z_inv = self.Z.invert();
        let x = &self.X * &z_inv;
        let mut bytes = (&self.Y * &z_inv).as_bytes();
        bytes[31] |= x.is_negative().unwrap_u8() << 7;
        CompressedEdwardsY(bytes)
    }

    pub(crate) fn double(&self) -> EdwardsPoint {
        self.as_projective().double().as_extended()
    }

    /// \\( [2\^k]P \\) for \\( k > 0 \\), staying projective between
    /// doublings.
    pub(crate) fn mul_by_pow_2(&self, k: u32) -> EdwardsPoint {
        debug_assert!(k > 0);
        let mut acc = self.as_projective();
        for _ in 1..k {
            acc = acc.double().as_projective();
        }
        acc.double().as_extended()
    }
}

impl<'a, 'b> Add<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    fn add(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        (self + &other.as_projective_niels()).as_extended()
    }
}

define_add_variants!(
    LHS = EdwardsPoint,
    RHS = EdwardsPoint,
    Output = EdwardsPoint
);

impl<'b> AddAssign<&'b EdwardsPoint> for EdwardsPoint {
    fn add_assign(&mut self, other: &'b EdwardsPoint) {
        *self = &*self + other;
    }
}

define_add_assign_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint);

impl<'a, 'b> Sub<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    fn sub(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        (self - &other.as_projective_niels()).as_extended()
    }
}

define_sub_variants!(
    LHS = EdwardsPoint,
    RHS = EdwardsPoint,
    Output = EdwardsPoint
);

impl<'b> SubAssign<&'b EdwardsPoint> for EdwardsPoint {
    fn sub_assign(&mut self, other: &'b EdwardsPoint) {
        *self = &*self - other;
    }
}

define_sub_assign_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint);

impl<T: Borrow<EdwardsPoint>> Sum<T> for EdwardsPoint {
    fn sum<I: Iterator<Item = T>>(iter: I) -> Self {
        iter.fold(EdwardsPoint::identity(), |total, p| total + p.borrow())
    }
}

impl<'a> Neg for &'a EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        EdwardsPoint {
            X: -&self.X,
            Y: self.Y,
            Z: self.Z,
            T: -&self.T,
        }
    }
}

define_neg_variant!(EdwardsPoint);

impl<'a, 'b> Mul<&'b Scalar> for &'a EdwardsPoint {
    type Output = EdwardsPoint;

    /// Constant-time variable-base multiplication.  For the basepoint,
    /// [`EdwardsPoint::mul_base`] is several times faster.
    fn mul(self, scalar: &'b Scalar) -> EdwardsPoint {
        backend::variable_base_mul(self, scalar)
    }
}

impl<'a, 'b> Mul<&'b EdwardsPoint> for &'a Scalar {
    type Output = EdwardsPoint;

    fn mul(self, point: &'b EdwardsPoint) -> EdwardsPoint {
        point * self
    }
}

define_mul_variants!(LHS = EdwardsPoint, RHS = Scalar, Output = EdwardsPoint);
define_mul_variants!(LHS = Scalar, RHS = EdwardsPoint, Output = EdwardsPoint);

impl<'b> MulAssign<&'b Scalar> for EdwardsPoint {
    fn mul_assign(&mut self, scalar: &'b Scalar) {
        *self = &*self * scalar;
    }
}

define_mul_assign_variants!(LHS = EdwardsPoint, RHS = Scalar);

impl EdwardsPoint {
    /// `[scalar]B` for the Ed25519 basepoint, in constant time.
    ///
    /// Reads the global basepoint table under `precomputed-tables` and
    /// falls back to the variable-base ladder otherwise.
    pub fn mul_base(scalar: &Scalar) -> Self {
        #[cfg(feature = "precomputed-tables")]
        let product = &*constants::ED25519_BASEPOINT_TABLE * scalar;

        #[cfg(not(feature = "precomputed-tables"))]
        let product = constants::ED25519_BASEPOINT_POINT * scalar;

        product
    }

    /// Variable-time \\( aA + bB \\) with \\( B \\) the Ed25519 basepoint.
    pub fn vartime_double_scalar_mul_basepoint(
        a: &Scalar,
        A: &EdwardsPoint,
        b: &Scalar,
    ) -> EdwardsPoint {
        backend::vartime_double_base_mul(a, A, b)
    }

    /// Variable-time test of \\( aA + bB = C \\).
    ///
    /// Returns \\( [\delta a]A + [\delta b]B - [\delta]C \\) for a nonzero
    /// \\( \delta \\) of about 128 bits picked from the inputs.  That
    /// is the identity exactly when the relation holds; any other use of
    /// the result is meaningless.
    pub fn vartime_triple_scalar_mul_basepoint(
        a: &Scalar,
        A: &EdwardsPoint,
        b: &Scalar,
        C: &EdwardsPoint,
    ) -> EdwardsPoint {
        backend::vartime_triple_base_mul(a, A, b, C)
    }

    /// \\( [8]P \\).
    pub fn mul_by_cofactor(&self) -> EdwardsPoint {
        self.mul_by_pow_2(3)
    }

    /// Whether \\( P \in \mathcal E\[8\] \\).
    pub fn is_small_order(&self) -> bool {
        self.mul_by_cofactor().is_identity()
    }

    /// Whether \\( P \in \mathcal E\[\ell\] \\), that is, whether its
    /// torsion component is trivial.
    pub fn is_torsion_free(&self) -> bool {
        (self * constants::BASEPOINT_ORDER_PRIVATE).is_identity()
    }
}

/// Both iterators must report the same exact length.
#[cfg(feature = "alloc")]
fn exact_common_len(scalars: (usize, Option<usize>), points: (usize, Option<usize>)) -> usize {
    assert_eq!(
        scalars, points,
        "scalar and point iterators have different lengths"
    );
    assert_eq!(scalars.1, Some(scalars.0), "iterator length is not exact");
    scalars.0
}

#[cfg(feature = "alloc")]
impl MultiscalarMul for EdwardsPoint {
    type Point = EdwardsPoint;

    fn multiscalar_mul<I, J>(scalars: I, points: J) -> EdwardsPoint
    where
        I: IntoIterator,
        I::Item: Borrow<Scalar>,
        J: IntoIterator,
        J::Item: Borrow<EdwardsPoint>,
    {
        let scalars = scalars.into_iter();
        let points = points.into_iter();
        exact_common_len(scalars.size_hint(), points.size_hint());

        backend::straus_multiscalar_mul(scalars, points)
    }
}

#[cfg(feature = "alloc")]
impl VartimeMultiscalarMul for EdwardsPoint {
    type Point = EdwardsPoint;

    fn optional_multiscalar_mul<I, J>(scalars: I, points: J) -> Option<EdwardsPoint>
    where
        I: IntoIterator,
        I::Item: Borrow<Scalar>,
        J: IntoIterator<Item = Option<EdwardsPoint>>,
    {
        let scalars = scalars.into_iter();
        let points = points.into_iter();
        let n = exact_common_len(scalars.size_hint(), points.size_hint());

        if n >= PIPPENGER_THRESHOLD {
            backend::pippenger_optional_multiscalar_mul(scalars, points)
        } else {
            backend::straus_optional_multiscalar_mul(scalars, points)
        }
    }
}

/// A point bundled with its odd multiples \\( P, 3P, \ldots, 127P \\).
///
/// Building one costs 64 additions.  After that, every variable-time
/// product against the point uses width-8 NAF digits instead of
/// building a width-5 table on the fly.  Worth it for keys that are
/// verified against many times.
#[derive(Clone)]
pub struct ExpandedEdwardsPoint {
    pub(crate) point: EdwardsPoint,
    pub(crate) table: OddMultiples<SelectedCached>,
}

impl ExpandedEdwardsPoint {
    /// Precompute the odd multiples of `point`.
    pub fn new(point: &EdwardsPoint) -> ExpandedEdwardsPoint {
        ExpandedEdwardsPoint {
            point: *point,
            table: backend::odd_multiples(point),
        }
    }

    /// The underlying point.
    pub fn point(&self) -> EdwardsPoint {
        self.point
    }

    /// Variable-time \\( aA + bB \\), as
    /// [`EdwardsPoint::vartime_double_scalar_mul_basepoint`].
    pub fn vartime_double_scalar_mul_basepoint(
        a: &Scalar,
        A: &ExpandedEdwardsPoint,
        b: &Scalar,
    ) -> EdwardsPoint {
        backend::vartime_double_base_mul_expanded(a, &A.table, b)
    }

    /// Variable-time test of \\( aA + bB = C \\), as
    /// [`EdwardsPoint::vartime_triple_scalar_mul_basepoint`].
    pub fn vartime_triple_scalar_mul_basepoint(
        a: &Scalar,
        A: &ExpandedEdwardsPoint,
        b: &Scalar,
        C: &EdwardsPoint,
    ) -> EdwardsPoint {
        backend::vartime_triple_base_mul_expanded(a, &A.table, b, C)
    }

    /// Variable-time \\( \sum_i a_i A_i + \sum_j b_j P_j \\) over
    /// expanded points \\( A_i \\) and plain points \\( P_j \\).
    ///
    /// `None` if any plain point is `None`.
    #[cfg(feature = "alloc")]
    pub fn optional_mixed_multiscalar_mul<I, J, K, L>(
        static_scalars: I,
        static_points: J,
        dynamic_scalars: K,
        dynamic_points: L,
    ) -> Option<EdwardsPoint>
    where
        I: IntoIterator,
        I::Item: Borrow<Scalar>,
        J: IntoIterator,
        J::Item: Borrow<ExpandedEdwardsPoint>,
        K: IntoIterator,
        K::Item: Borrow<Scalar>,
        L: IntoIterator<Item = Option<EdwardsPoint>>,
    {
        // The tables are borrowed, so the expanded points have to be held
        // somewhere for the duration of the call.
        let held: Vec<J::Item> = static_points.into_iter().collect();
        let tables = held
            .iter()
            .map(|p| &Borrow::<ExpandedEdwardsPoint>::borrow(p).table);

        backend::straus_mixed_multiscalar_mul(static_scalars, tables, dynamic_scalars, dynamic_points)
    }

    /// [`ExpandedEdwardsPoint::optional_mixed_multiscalar_mul`] with every
    /// plain point present.
    #[cfg(feature = "alloc")]
    pub fn vartime_mixed_multiscalar_mul<I, J, K, L>(
        static_scalars: I,
        static_points: J,
        dynamic_scalars: K,
        dynamic_points: L,
    ) -> EdwardsPoint
    where
        I: IntoIterator,
        I::Item: Borrow<Scalar>,
        J: IntoIterator,
        J::Item: Borrow<ExpandedEdwardsPoint>,
        K: IntoIterator,
        K::Item: Borrow<Scalar>,
        L: IntoIterator,
        L::Item: Borrow<EdwardsPoint>,
    {
        let present = dynamic_points.into_iter().map(|P| Some(*P.borrow()));
        Self::optional_mixed_multiscalar_mul(static_scalars, static_points, dynamic_scalars, present)
            .unwrap_or_else(|| unreachable!("every dynamic point was supplied"))
    }
}

impl<'a> From<&'a EdwardsPoint> for ExpandedEdwardsPoint {
    fn from(point: &'a EdwardsPoint) -> ExpandedEdwardsPoint {
        ExpandedEdwardsPoint::new(point)
    }
}

impl Debug for ExpandedEdwardsPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpandedEdwardsPoint")
            .field("point", &self.point)
            .finish_non_exhaustive()
    }
}

/// Multiples \\( j \cdot 256\^i B \\) for \\( 0 \le i < 32 \\),
/// \\( 1 \le j \le 8 \\), in affine Niels form.
///
/// With the scalar in signed radix 16, \\( aB = \sum_k a_k 16\^k B \\).
/// Odd-indexed digits are looked up and summed first, the sum is
/// multiplied by 16, and then the even-indexed digits are added.  That
/// makes 64 constant-time lookups and additions plus four doublings.
#[derive(Clone)]
#[repr(transparent)]
pub struct EdwardsBasepointTable(pub(crate) [LookupTable<AffineNielsPoint>; 32]);

impl BasepointTable for EdwardsBasepointTable {
    type Point = EdwardsPoint;

    fn create(basepoint: &EdwardsPoint) -> EdwardsBasepointTable {
        let mut rows = [LookupTable::default(); 32];
        let mut row_base = *basepoint;
        for row in rows.iter_mut() {
            *row = LookupTable::from(&row_base);
            row_base = row_base.mul_by_pow_2(8);
        }
        EdwardsBasepointTable(rows)
    }

    fn basepoint(&self) -> EdwardsPoint {
        // Entry 1 of row 0 is 1 * 256^0 * B.
        (&EdwardsPoint::identity() + &self.0[0].select(1)).as_extended()
    }

    fn mul_base(&self, scalar: &Scalar) -> EdwardsPoint {
        #[cfg_attr(not(feature = "zeroize"), allow(unused_mut))]
        let mut digits = scalar.as_radix_16();

        let add_row = |acc: EdwardsPoint, k: usize| {
            (&acc + &self.0[k / 2].select(digits[k])).as_extended()
        };
        let odd = (1..64).step_by(2).fold(EdwardsPoint::identity(), add_row);
        let product = (0..64).step_by(2).fold(odd.mul_by_pow_2(4), add_row);

        #[cfg(feature = "zeroize")]
        digits.zeroize();

        product
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a EdwardsBasepointTable {
    type Output = EdwardsPoint;

    fn mul(self, scalar: &'b Scalar) -> EdwardsPoint {
        self.mul_base(scalar)
    }
}

impl<'a, 'b> Mul<&'a EdwardsBasepointTable> for &'b Scalar {
    type Output = EdwardsPoint;

    fn mul(self, table: &'a EdwardsBasepointTable) -> EdwardsPoint {
        table.mul_base(self)
    }
}

impl Debug for EdwardsBasepointTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EdwardsBasepointTable").field(&self.0).finish()
    }
}

impl Debug for EdwardsPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdwardsPoint")
            .field("X", &self.X)
            .field("Y", &self.Y)
            .field("Z", &self.Z)
            .field("T", &self.T)
            .finish()
    }
}
