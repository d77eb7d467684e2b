// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

#![allow(non_snake_case)]

//! The Ristretto group: a prime-order group built on Curve25519.
//!
//! The Edwards curve has order \\(8\ell\\).  Ristretto takes the even
//! points \\(2\mathcal E\\) modulo the 4-torsion \\(\mathcal E\[4\]\\),
//! which leaves a group of prime order \\(\ell\\) while still doing all
//! arithmetic with the complete Edwards formulas.  See
//! <https://ristretto.group/> for the construction and its rationale.
//!
//! A [`RistrettoPoint`] holds one Edwards representative of its coset.
//! Addition, negation and multiplication act on the representative; only
//! three operations have to know about the quotient:
//!
//! | operation | quotient-aware behavior |
//! |-----------|-------------------------|
//! | `==` / `ct_eq` | two representatives of one coset compare equal, with no inversion |
//! | [`RistrettoPoint::compress`] | every representative of a coset yields the same 32 bytes |
//! | [`CompressedRistretto::decompress`] | only that canonical encoding is accepted |
//!
//! Encoding needs an inverse square root per point, so it cannot be
//! batched directly.  [`RistrettoPoint::double_and_compress_batch`]
//! encodes the doubles of a batch with a single shared inversion instead.
//!
//! Uniform points come from the Ristretto-flavored Elligator map:
//! [`RistrettoPoint::from_uniform_bytes`] maps 64 bytes, and the
//! `rand_core` and `digest` features add `random` and `hash_from_bytes`
//! on top of it.  The map on a single field element is not public.
//!
//! Multiplication follows the Edwards module: `Scalar * RistrettoPoint`,
//! `Scalar * &RistrettoBasepointTable`, the
//! [`MultiscalarMul`](crate::traits::MultiscalarMul) and
//! [`VartimeMultiscalarMul`](crate::traits::VartimeMultiscalarMul)
//! traits, and [`ExpandedRistrettoPoint`] for points reused across many
//! variable-time combinations.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use core::borrow::Borrow;
use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

#[cfg(any(test, feature = "rand_core"))]
use rand_core::CryptoRngCore;

#[cfg(feature = "digest")]
use digest::{generic_array::typenum::U64, Digest};

use subtle::{Choice, ConditionallyNegatable, ConditionallySelectable, ConstantTimeEq};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::backend::serial::curve_models::CompletedPoint;
use crate::constants;
use crate::edwards::{EdwardsBasepointTable, EdwardsPoint, ExpandedEdwardsPoint};
use crate::errors::Error;
use crate::field::FieldElement;
use crate::scalar::Scalar;
use crate::traits::{BasepointTable, Identity};
#[cfg(feature = "alloc")]
use crate::traits::{MultiscalarMul, VartimeMultiscalarMul};

/// The 32-byte Ristretto encoding of a group element.
///
/// Encodings are canonical: equal elements have equal bytes, so the
/// derived `Eq` and `Hash` agree with equality in the group.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct CompressedRistretto(pub [u8; 32]);

impl CompressedRistretto {
    /// The encoding as an owned array.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// The encoding as a borrowed array.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Decode into a [`RistrettoPoint`].
    ///
    /// # Errors
    ///
    /// [`Error::PointDecompression`] unless the bytes are the canonical
    /// encoding of some group element.  That rules out field encodings
    /// of values \\(\geq p\\), a set high bit, a negative \\(s\\), and
    /// every \\(s\\) whose lift fails the square-root or sign checks.
    pub fn decompress(&self) -> Result<RistrettoPoint, Error> {
        let s = FieldElement::from_bytes(&self.0);
        // `from_bytes` ignores bit 255 and reduces mod p; re-encoding
        // exposes both.
        let canonical = s.as_bytes()[..].ct_eq(&self.0[..]);
        if bool::from(!canonical | s.is_negative()) {
            return Err(Error::PointDecompression);
        }

        let (valid, point) = RistrettoPoint::lift_s(&s);
        if bool::from(valid) {
            Ok(point)
        } else {
            Err(Error::PointDecompression)
        }
    }
}

impl ConstantTimeEq for CompressedRistretto {
    fn ct_eq(&self, other: &CompressedRistretto) -> Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

impl Identity for CompressedRistretto {
    fn identity() -> CompressedRistretto {
        CompressedRistretto([0; 32])
    }
}

impl Default for CompressedRistretto {
    fn default() -> CompressedRistretto {
        CompressedRistretto::identity()
    }
}

impl TryFrom<&[u8]> for CompressedRistretto {
    type Error = Error;

    /// Fails with [`Error::BytesLength`] unless `slice` is 32 bytes.
    fn try_from(slice: &[u8]) -> Result<CompressedRistretto, Error> {
        <[u8; 32]>::try_from(slice)
            .map(CompressedRistretto)
            .map_err(|_| Error::BytesLength {
                name: "CompressedRistretto",
                length: 32,
            })
    }
}

impl fmt::Debug for CompressedRistretto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompressedRistretto").field(&self.0).finish()
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for CompressedRistretto {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CompressedRistretto {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::serde_fixed::serialize(&self.0, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CompressedRistretto {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        crate::serde_fixed::deserialize(deserializer, "a Ristretto encoding")
            .map(CompressedRistretto)
    }
}

/// Points go over the wire in their canonical encoding and are
/// validated on the way back in.
#[cfg(feature = "serde")]
impl serde::Serialize for RistrettoPoint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::serde_fixed::serialize(self.compress().as_bytes(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RistrettoPoint {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = crate::serde_fixed::deserialize(deserializer, "a Ristretto point")?;
        CompressedRistretto(bytes)
            .decompress()
            .map_err(serde::de::Error::custom)
    }
}

/// An element of the Ristretto group.
///
/// Wraps an [`EdwardsPoint`] representative, so group operations cost
/// exactly what the Edwards ones do.
#[derive(Copy, Clone)]
pub struct RistrettoPoint(pub(crate) EdwardsPoint);

impl RistrettoPoint {
    /// Lift a canonical, nonnegative \\(s\\) to a representative.
    ///
    /// The returned `Choice` is false when \\(s\\) is not the encoding of
    /// any element: the ratio has no square root, \\(t\\) comes out
    /// negative, or \\(y = 0\\).
    fn lift_s(s: &FieldElement) -> (Choice, RistrettoPoint) {
        let one = FieldElement::ONE;
        let s2 = s.square();
        // With a = -1: num = 1 + a s^2, den = 1 - a s^2.
        let num = &one - &s2;
        let den = &one + &s2;
        let den2 = den.square();

        // v = a d num^2 - den^2
        let v = &(&(-&constants::EDWARDS_D) * &num.square()) - &den2;
        let (is_square, inv) = (&v * &den2).invsqrt();
        let inv_x = &inv * &den;
        let inv_y = &inv * &(&inv_x * &v);

        let mut x = &(s + s) * &inv_x;
        let x_negative = x.is_negative();
        x.conditional_negate(x_negative);
        let y = &num * &inv_y;
        let t = &x * &y;

        let valid = is_square & !t.is_negative() & !y.is_zero();
        (
            valid,
            RistrettoPoint(EdwardsPoint {
                X: x,
                Y: y,
                Z: one,
                T: t,
            }),
        )
    }

    /// The canonical 32-byte encoding of this element.
    pub fn compress(&self) -> CompressedRistretto {
        let EdwardsPoint { X, Y, Z, T } = self.0;

        let u1 = &(&Z + &Y) * &(&Z - &Y);
        let u2 = &X * &Y;
        // u1 * u2^2 is square for every point on the curve.
        let (_, inv) = (&u1 * &u2.square()).invsqrt();
        let den1 = &inv * &u1;
        let den2 = &inv * &u2;
        let z_inv = &den1 * &(&den2 * &T);

        // Pick the representative of the coset with nonnegative x*y.
        let rotate = (&T * &z_inv).is_negative();
        let x = FieldElement::conditional_select(&X, &(&Y * &constants::SQRT_M1), rotate);
        let mut y = FieldElement::conditional_select(&Y, &(&X * &constants::SQRT_M1), rotate);
        let den_inv = FieldElement::conditional_select(
            &den2,
            &(&den1 * &constants::INVSQRT_A_MINUS_D),
            rotate,
        );

        y.conditional_negate((&x * &z_inv).is_negative());

        let mut s = &den_inv * &(&Z - &y);
        let s_negative = s.is_negative();
        s.conditional_negate(s_negative);

        CompressedRistretto(s.as_bytes())
    }

    /// Encode \\([2]P\\) for every \\(P\\) in `points`, sharing one field
    /// inversion across the whole batch.
    ///
    /// ```
    /// # use curve25519_arith::ristretto::RistrettoPoint;
    /// let points: Vec<RistrettoPoint> = (0..8u8)
    ///     .map(|seed| RistrettoPoint::from_uniform_bytes(&[seed; 64]))
    ///     .collect();
    ///
    /// let doubled = RistrettoPoint::double_and_compress_batch(&points);
    ///
    /// assert_eq!(doubled.len(), points.len());
    /// assert_eq!(doubled[3], (points[3] + points[3]).compress());
    /// ```
    #[cfg(feature = "alloc")]
    pub fn double_and_compress_batch<'a, I>(points: I) -> Vec<CompressedRistretto>
    where
        I: IntoIterator<Item = &'a RistrettoPoint>,
    {
        // The doubling of (X:Y:Z:T) in completed form, plus the two
        // products whose inverses give 1/Z and 1/T of the double.
        #[derive(Copy, Clone)]
        struct Doubled {
            e: FieldElement,
            f: FieldElement,
            g: FieldElement,
            h: FieldElement,
            eg: FieldElement,
            fh: FieldElement,
        }

        let doubled: Vec<Doubled> = points
            .into_iter()
            .map(|point| {
                let p = &point.0;
                let x2 = p.X.square();
                let y2 = p.Y.square();
                let z2 = p.Z.square();
                let d_t2 = &p.T.square() * &constants::EDWARDS_D;

                let e = &p.X * &(&p.Y + &p.Y);
                let f = &z2 + &d_t2;
                let g = &y2 + &x2;
                let h = &z2 - &d_t2;
                Doubled {
                    eg: &e * &g,
                    fh: &f * &h,
                    e,
                    f,
                    g,
                    h,
                }
            })
            .collect();

        let mut inverses: Vec<FieldElement> = doubled.iter().map(|d| &d.eg * &d.fh).collect();
        FieldElement::batch_invert(&mut inverses);

        doubled
            .iter()
            .zip(&inverses)
            .map(|(d, inverse)| {
                let z_inv = &d.eg * inverse;
                let t_inv = &d.fh * inverse;

                let rotate = (&d.eg * &z_inv).is_negative();
                let e = FieldElement::conditional_select(&d.e, &d.g, rotate);
                let mut g = FieldElement::conditional_select(&d.g, &(-&d.e), rotate);
                let h = FieldElement::conditional_select(
                    &d.h,
                    &(&d.f * &constants::SQRT_M1),
                    rotate,
                );
                let scale = FieldElement::conditional_select(
                    &constants::INVSQRT_A_MINUS_D,
                    &constants::SQRT_M1,
                    rotate,
                );

                g.conditional_negate((&(&h * &e) * &z_inv).is_negative());

                let mut s = &(&h - &g) * &(&scale * &(&g * &t_inv));
                let s_negative = s.is_negative();
                s.conditional_negate(s_negative);

                CompressedRistretto(s.as_bytes())
            })
            .collect()
    }

    /// The four Edwards representatives \\(P + \mathcal E\[4\]\\).
    fn coset4(&self) -> [EdwardsPoint; 4] {
        let torsion = &constants::EIGHT_TORSION;
        [
            self.0,
            self.0 + torsion[2],
            self.0 + torsion[4],
            self.0 + torsion[6],
        ]
    }

    /// The Ristretto-flavored Elligator map from one field element to
    /// the group (the `MAP` function of RFC 9496, section 4.3.4).
    pub(crate) fn elligator_ristretto_flavor(r0: &FieldElement) -> RistrettoPoint {
        let one = FieldElement::ONE;
        let d = &constants::EDWARDS_D;

        let r = &constants::SQRT_M1 * &r0.square();
        let numer_s = &(&r + &one) * &constants::ONE_MINUS_EDWARDS_D_SQUARED;
        let mut c = FieldElement::MINUS_ONE;
        let denom = &(&c - &(d * &r)) * &(&r + d);

        let (is_square, mut s) = FieldElement::sqrt_ratio_i(&numer_s, &denom);
        let mut s_alt = &s * r0;
        let s_alt_nonnegative = !s_alt.is_negative();
        s_alt.conditional_negate(s_alt_nonnegative);
        s.conditional_assign(&s_alt, !is_square);
        c.conditional_assign(&r, !is_square);

        let numer_t =
            &(&(&c * &(&r - &one)) * &constants::EDWARDS_D_MINUS_ONE_SQUARED) - &denom;
        let s2 = s.square();

        // The Jacobi-quartic point maps to P1xP1 coordinates directly.
        let completed = CompletedPoint {
            X: &(&s + &s) * &denom,
            Y: &one - &s2,
            Z: &numer_t * &constants::SQRT_AD_MINUS_ONE,
            T: &one + &s2,
        };
        RistrettoPoint(completed.as_extended())
    }

    /// A uniformly random element drawn from `rng`.
    #[cfg(any(test, feature = "rand_core"))]
    pub fn random<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Self {
        let mut seed = [0u8; 64];
        rng.fill_bytes(&mut seed);
        RistrettoPoint::from_uniform_bytes(&seed)
    }

    /// Hash `input` to the group with a 64-byte-output digest `D`.
    ///
    /// ```
    /// # use curve25519_arith::ristretto::RistrettoPoint;
    /// use sha2::Sha512;
    ///
    /// let P = RistrettoPoint::hash_from_bytes::<Sha512>(b"domain separated input");
    /// let Q = RistrettoPoint::hash_from_bytes::<Sha512>(b"domain separated input");
    /// assert_eq!(P, Q);
    /// ```
    #[cfg(feature = "digest")]
    pub fn hash_from_bytes<D>(input: &[u8]) -> RistrettoPoint
    where
        D: Digest<OutputSize = U64> + Default,
    {
        let mut hasher = D::default();
        hasher.update(input);
        RistrettoPoint::from_hash(hasher)
    }

    /// Finish `hash` and map its 64-byte output to the group.  Useful
    /// when the input is streamed into the digest.
    #[cfg(feature = "digest")]
    pub fn from_hash<D>(hash: D) -> RistrettoPoint
    where
        D: Digest<OutputSize = U64> + Default,
    {
        let mut digest = [0u8; 64];
        digest.copy_from_slice(&hash.finalize());
        RistrettoPoint::from_uniform_bytes(&digest)
    }

    /// Map 64 bytes to the group.
    ///
    /// Each 32-byte half is read as a field element (bit 255 dropped),
    /// sent through the Elligator map, and the two images are added.
    /// Uniform input gives a uniform element with unknown discrete log.
    pub fn from_uniform_bytes(bytes: &[u8; 64]) -> RistrettoPoint {
        let mut halves = [[0u8; 32]; 2];
        halves[0].copy_from_slice(&bytes[..32]);
        halves[1].copy_from_slice(&bytes[32..]);

        let [lo, hi] = halves.map(|half| {
            RistrettoPoint::elligator_ristretto_flavor(&FieldElement::from_bytes(&half))
        });
        lo + hi
    }

    /// As [`RistrettoPoint::from_uniform_bytes`], for a slice.
    ///
    /// # Errors
    ///
    /// [`Error::BytesLength`] unless `bytes` is 64 bytes long.
    pub fn from_uniform_slice(bytes: &[u8]) -> Result<RistrettoPoint, Error> {
        let bytes = <&[u8; 64]>::try_from(bytes).map_err(|_| Error::BytesLength {
            name: "RistrettoPoint",
            length: 64,
        })?;
        Ok(RistrettoPoint::from_uniform_bytes(bytes))
    }

    /// `scalar` times the Ristretto basepoint, through the static table
    /// when `precomputed-tables` is on.
    pub fn mul_base(scalar: &Scalar) -> Self {
        #[cfg(feature = "precomputed-tables")]
        let product = scalar * &*constants::RISTRETTO_BASEPOINT_TABLE;
        #[cfg(not(feature = "precomputed-tables"))]
        let product = scalar * constants::RISTRETTO_BASEPOINT_POINT;
        product
    }

    /// \\(aA + bB\\) for the Ristretto basepoint \\(B\\).  Variable time.
    pub fn vartime_double_scalar_mul_basepoint(
        a: &Scalar,
        A: &RistrettoPoint,
        b: &Scalar,
    ) -> RistrettoPoint {
        RistrettoPoint(EdwardsPoint::vartime_double_scalar_mul_basepoint(a, &A.0, b))
    }

    /// \\([\delta a]A + [\delta b]B - [\delta]C\\) for the Ristretto
    /// basepoint \\(B\\) and an internally chosen nonzero \\(\delta\\).
    /// Variable time.
    ///
    /// The result is the identity exactly when \\(aA + bB = C\\) in the
    /// group, whichever representative `C` carries.
    pub fn vartime_triple_scalar_mul_basepoint(
        a: &Scalar,
        A: &RistrettoPoint,
        b: &Scalar,
        C: &RistrettoPoint,
    ) -> RistrettoPoint {
        RistrettoPoint(EdwardsPoint::vartime_triple_scalar_mul_basepoint(
            a, &A.0, b, &C.0,
        ))
    }
}

impl Identity for RistrettoPoint {
    fn identity() -> RistrettoPoint {
        RistrettoPoint(EdwardsPoint::identity())
    }
}

impl Default for RistrettoPoint {
    fn default() -> RistrettoPoint {
        RistrettoPoint::identity()
    }
}

impl ConstantTimeEq for RistrettoPoint {
    /// Representatives \\((X_1:Y_1)\\) and \\((X_2:Y_2)\\) lie in one
    /// coset iff \\(X_1Y_2 = Y_1X_2\\) or \\(X_1X_2 = Y_1Y_2\\).
    fn ct_eq(&self, other: &RistrettoPoint) -> Choice {
        let (p, q) = (&self.0, &other.0);
        let same_ratio = (&p.X * &q.Y).ct_eq(&(&p.Y * &q.X));
        let rotated_ratio = (&p.X * &q.X).ct_eq(&(&p.Y * &q.Y));
        same_ratio | rotated_ratio
    }
}

impl PartialEq for RistrettoPoint {
    fn eq(&self, other: &RistrettoPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for RistrettoPoint {}

impl core::hash::Hash for RistrettoPoint {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.compress().0.hash(state);
    }
}

impl ConditionallySelectable for RistrettoPoint {
    fn conditional_select(a: &RistrettoPoint, b: &RistrettoPoint, choice: Choice) -> RistrettoPoint {
        RistrettoPoint(EdwardsPoint::conditional_select(&a.0, &b.0, choice))
    }
}

impl fmt::Debug for RistrettoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RistrettoPoint")
            .field("coset", &self.coset4())
            .finish()
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for RistrettoPoint {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<'a, 'b> Add<&'b RistrettoPoint> for &'a RistrettoPoint {
    type Output = RistrettoPoint;

    fn add(self, rhs: &'b RistrettoPoint) -> RistrettoPoint {
        RistrettoPoint(self.0 + rhs.0)
    }
}

define_add_variants!(
    LHS = RistrettoPoint,
    RHS = RistrettoPoint,
    Output = RistrettoPoint
);

impl<'b> AddAssign<&'b RistrettoPoint> for RistrettoPoint {
    fn add_assign(&mut self, rhs: &'b RistrettoPoint) {
        self.0 += rhs.0;
    }
}

define_add_assign_variants!(LHS = RistrettoPoint, RHS = RistrettoPoint);

impl<'a, 'b> Sub<&'b RistrettoPoint> for &'a RistrettoPoint {
    type Output = RistrettoPoint;

    fn sub(self, rhs: &'b RistrettoPoint) -> RistrettoPoint {
        RistrettoPoint(self.0 - rhs.0)
    }
}

define_sub_variants!(
    LHS = RistrettoPoint,
    RHS = RistrettoPoint,
    Output = RistrettoPoint
);

impl<'b> SubAssign<&'b RistrettoPoint> for RistrettoPoint {
    fn sub_assign(&mut self, rhs: &'b RistrettoPoint) {
        self.0 -= rhs.0;
    }
}

define_sub_assign_variants!(LHS = RistrettoPoint, RHS = RistrettoPoint);

impl<'a> Neg for &'a RistrettoPoint {
    type Output = RistrettoPoint;

    fn neg(self) -> RistrettoPoint {
        RistrettoPoint(-&self.0)
    }
}

define_neg_variant!(RistrettoPoint);

impl<T: Borrow<RistrettoPoint>> Sum<T> for RistrettoPoint {
    fn sum<I: Iterator<Item = T>>(iter: I) -> Self {
        RistrettoPoint(iter.map(|p| p.borrow().0).sum())
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a RistrettoPoint {
    type Output = RistrettoPoint;

    fn mul(self, scalar: &'b Scalar) -> RistrettoPoint {
        RistrettoPoint(self.0 * scalar)
    }
}

impl<'a, 'b> Mul<&'b RistrettoPoint> for &'a Scalar {
    type Output = RistrettoPoint;

    fn mul(self, point: &'b RistrettoPoint) -> RistrettoPoint {
        point * self
    }
}

define_mul_variants!(
    LHS = RistrettoPoint,
    RHS = Scalar,
    Output = RistrettoPoint
);
define_mul_variants!(
    LHS = Scalar,
    RHS = RistrettoPoint,
    Output = RistrettoPoint
);

impl<'b> MulAssign<&'b Scalar> for RistrettoPoint {
    fn mul_assign(&mut self, scalar: &'b Scalar) {
        self.0 *= scalar;
    }
}

define_mul_assign_variants!(LHS = RistrettoPoint, RHS = Scalar);

// Multiscalar products unwrap to the Edwards representatives; the
// quotient commutes with every linear combination.
#[cfg(feature = "alloc")]
impl MultiscalarMul for RistrettoPoint {
    type Point = RistrettoPoint;

    fn multiscalar_mul<I, J>(scalars: I, points: J) -> RistrettoPoint
    where
        I: IntoIterator,
        I::Item: Borrow<Scalar>,
        J: IntoIterator,
        J::Item: Borrow<RistrettoPoint>,
    {
        let representatives = points.into_iter().map(|p| p.borrow().0);
        RistrettoPoint(EdwardsPoint::multiscalar_mul(scalars, representatives))
    }
}

#[cfg(feature = "alloc")]
impl VartimeMultiscalarMul for RistrettoPoint {
    type Point = RistrettoPoint;

    fn optional_multiscalar_mul<I, J>(scalars: I, points: J) -> Option<RistrettoPoint>
    where
        I: IntoIterator,
        I::Item: Borrow<Scalar>,
        J: IntoIterator<Item = Option<RistrettoPoint>>,
    {
        let representatives = points.into_iter().map(|p| p.map(|p| p.0));
        EdwardsPoint::optional_multiscalar_mul(scalars, representatives).map(RistrettoPoint)
    }
}

/// A [`RistrettoPoint`] with its odd-multiples table built once, for
/// reuse across many variable-time products.  See
/// [`ExpandedEdwardsPoint`].
#[derive(Clone)]
pub struct ExpandedRistrettoPoint(pub(crate) ExpandedEdwardsPoint);

impl ExpandedRistrettoPoint {
    /// Build the table for `point`.
    pub fn new(point: &RistrettoPoint) -> ExpandedRistrettoPoint {
        ExpandedRistrettoPoint(ExpandedEdwardsPoint::new(&point.0))
    }

    /// The point the table was built from.
    pub fn point(&self) -> RistrettoPoint {
        RistrettoPoint(self.0.point())
    }

    /// [`RistrettoPoint::vartime_double_scalar_mul_basepoint`] with a
    /// prepared \\(A\\).
    pub fn vartime_double_scalar_mul_basepoint(
        a: &Scalar,
        A: &ExpandedRistrettoPoint,
        b: &Scalar,
    ) -> RistrettoPoint {
        RistrettoPoint(ExpandedEdwardsPoint::vartime_double_scalar_mul_basepoint(
            a, &A.0, b,
        ))
    }

    /// [`RistrettoPoint::vartime_triple_scalar_mul_basepoint`] with a
    /// prepared \\(A\\).
    pub fn vartime_triple_scalar_mul_basepoint(
        a: &Scalar,
        A: &ExpandedRistrettoPoint,
        b: &Scalar,
        C: &RistrettoPoint,
    ) -> RistrettoPoint {
        RistrettoPoint(ExpandedEdwardsPoint::vartime_triple_scalar_mul_basepoint(
            a, &A.0, b, &C.0,
        ))
    }

    /// \\(\sum_i a_i A_i + \sum_j b_j P_j\\) over prepared \\(A_i\\) and
    /// plain \\(P_j\\).  Variable time.
    ///
    /// `None` if any dynamic point is `None`.
    #[cfg(feature = "alloc")]
    pub fn optional_mixed_multiscalar_mul<I, J, K, L>(
        static_scalars: I,
        static_points: J,
        dynamic_scalars: K,
        dynamic_points: L,
    ) -> Option<RistrettoPoint>
    where
        I: IntoIterator,
        I::Item: Borrow<Scalar>,
        J: IntoIterator,
        J::Item: Borrow<ExpandedRistrettoPoint>,
        K: IntoIterator,
        K::Item: Borrow<Scalar>,
        L: IntoIterator<Item = Option<RistrettoPoint>>,
    {
        let prepared: Vec<J::Item> = static_points.into_iter().collect();
        let prepared = prepared
            .iter()
            .map(|p| &Borrow::<ExpandedRistrettoPoint>::borrow(p).0);

        ExpandedEdwardsPoint::optional_mixed_multiscalar_mul(
            static_scalars,
            prepared,
            dynamic_scalars,
            dynamic_points.into_iter().map(|p| p.map(|p| p.0)),
        )
        .map(RistrettoPoint)
    }

    /// [`ExpandedRistrettoPoint::optional_mixed_multiscalar_mul`] with
    /// every dynamic point present.
    #[cfg(feature = "alloc")]
    pub fn vartime_mixed_multiscalar_mul<I, J, K, L>(
        static_scalars: I,
        static_points: J,
        dynamic_scalars: K,
        dynamic_points: L,
    ) -> RistrettoPoint
    where
        I: IntoIterator,
        I::Item: Borrow<Scalar>,
        J: IntoIterator,
        J::Item: Borrow<ExpandedRistrettoPoint>,
        K: IntoIterator,
        K::Item: Borrow<Scalar>,
        L: IntoIterator,
        L::Item: Borrow<RistrettoPoint>,
    {
        Self::optional_mixed_multiscalar_mul(
            static_scalars,
            static_points,
            dynamic_scalars,
            dynamic_points.into_iter().map(|p| Some(*p.borrow())),
        )
        .unwrap_or_else(|| unreachable!("every dynamic point was supplied"))
    }
}

impl<'a> From<&'a RistrettoPoint> for ExpandedRistrettoPoint {
    fn from(point: &'a RistrettoPoint) -> ExpandedRistrettoPoint {
        ExpandedRistrettoPoint::new(point)
    }
}

impl fmt::Debug for ExpandedRistrettoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ExpandedRistrettoPoint")
            .field(&self.point())
            .finish()
    }
}

/// Radix-16 table of multiples of a fixed point, for constant-time
/// fixed-base multiplication.
///
/// The crate ships one for the Ristretto basepoint:
///
/// ```
/// use curve25519_arith::constants::{RISTRETTO_BASEPOINT_POINT, RISTRETTO_BASEPOINT_TABLE};
/// use curve25519_arith::scalar::Scalar;
///
/// let k = Scalar::from(0x5eed_u64);
/// assert_eq!(&k * &*RISTRETTO_BASEPOINT_TABLE, RISTRETTO_BASEPOINT_POINT * k);
/// ```
#[derive(Clone)]
#[repr(transparent)]
pub struct RistrettoBasepointTable(pub(crate) EdwardsBasepointTable);

impl BasepointTable for RistrettoBasepointTable {
    type Point = RistrettoPoint;

    fn create(basepoint: &RistrettoPoint) -> RistrettoBasepointTable {
        RistrettoBasepointTable(EdwardsBasepointTable::create(&basepoint.0))
    }

    fn basepoint(&self) -> RistrettoPoint {
        RistrettoPoint(self.0.basepoint())
    }

    fn mul_base(&self, scalar: &Scalar) -> RistrettoPoint {
        RistrettoPoint(self.0.mul_base(scalar))
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a RistrettoBasepointTable {
    type Output = RistrettoPoint;

    fn mul(self, scalar: &'b Scalar) -> RistrettoPoint {
        self.mul_base(scalar)
    }
}

impl<'a, 'b> Mul<&'a RistrettoBasepointTable> for &'b Scalar {
    type Output = RistrettoPoint;

    fn mul(self, table: &'a RistrettoBasepointTable) -> RistrettoPoint {
        table.mul_base(self)
    }
}

impl fmt::Debug for RistrettoBasepointTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RistrettoBasepointTable")
            .field("basepoint", &self.basepoint())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::{RISTRETTO_BASEPOINT_COMPRESSED, RISTRETTO_BASEPOINT_POINT as B};
    use crate::edwards::CompressedEdwardsY;
    use crate::scalar::test::random_scalar;
    use crate::traits::IsIdentity;

    use rand_core::OsRng;

    fn bytes<const N: usize>(hex_str: &str) -> [u8; N] {
        let decoded = hex::decode(hex_str).unwrap();
        decoded.try_into().unwrap()
    }

    fn encoding(hex_str: &str) -> CompressedRistretto {
        CompressedRistretto(bytes(hex_str))
    }

    /// Encodings of \\([i]B\\) for \\(i = 0, \ldots, 15\\).
    const SMALL_MULTIPLES: [&str; 16] = [
        "0000000000000000000000000000000000000000000000000000000000000000",
        "e2f2ae0a6abc4e71a884a961c500515f58e30b6aa582dd8db6a65945e08d2d76",
        "6a493210f7499cd17fecb510ae0cea23a110e8d5b901f8acadd3095c73a3b919",
        "94741f5d5d52755ece4f23f044ee27d5d1ea1e2bd196b462166b16152a9d0259",
        "da80862773358b466ffadfe0b3293ab3d9fd53c5ea6c955358f568322daf6a57",
        "e882b131016b52c1d3337080187cf768423efccbb517bb495ab812c4160ff44e",
        "f64746d3c92b13050ed8d80236a7f0007c3b3f962f5ba793d19a601ebb1df403",
        "44f53520926ec81fbd5a387845beb7df85a96a24ece18738bdcfa6a7822a176d",
        "903293d8f2287ebe10e2374dc1a53e0bc887e592699f02d077d5263cdd55601c",
        "02622ace8f7303a31cafc63f8fc48fdc16e1c8c8d234b2f0d6685282a9076031",
        "20706fd788b2720a1ed2a5dad4952b01f413bcf0e7564de8cdc816689e2db95f",
        "bce83f8ba5dd2fa572864c24ba1810f9522bc6004afe95877ac73241cafdab42",
        "e4549ee16b9aa03099ca208c67adafcafa4c3f3e4e5303de6026e3ca8ff84460",
        "aa52e000df2e16f55fb1032fc33bc42742dad6bd5a8fc0be0167436c5948501f",
        "46376b80f409b29dc2b5f6f0c52591990896e5716f41477cd30085ab7f10301e",
        "e0c418f7c8d9c4cdd7395b93ea124f3ad99021bb681dfc3302a9d99a2e53e64e",
    ];

    /// Strings that must not decode, grouped as: non-canonical field
    /// elements, negative field elements, then values whose lift fails
    /// (non-square, negative t, or y = 0).
    const BAD_ENCODINGS: [&str; 28] = [
        "00ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f",
        "f3ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f",
        "edffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f",
        "0100000000000000000000000000000000000000000000000000000000000000",
        "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f",
        "ed57ffd8c914fb201471d1c3d245ce3c746fcbe63a3679d51b6a516ebebe0e20",
        "c34c4e1826e5d403b78e246e88aa051c36ccf0aafebffe137d148a2bf9104562",
        "c940e5a4404157cfb1628b108db051a8d439e1a421394ec4ebccb9ec92a8ac78",
        "47cfc5497c53dc8e61c91d17fd626ffb1c49e2bca94eed052281b510b1117a24",
        "f1c6165d33367351b0da8f6e4511010c68174a03b6581212c71c0e1d026c3c72",
        "87260f7a2f12495118360f02c26a470f450dadf34a413d21042b43b9d93e1309",
        "26948d35ca62e643e26a83177332e6b6afeb9d08e4268b650f1f5bbd8d81d371",
        "4eac077a713c57b4f4397629a4145982c661f48044dd3f96427d40b147d9742f",
        "de6a7b00deadc788eb6b6c8d20c0ae96c2f2019078fa604fee5b87d6e989ad7b",
        "bcab477be20861e01e4a0e295284146a510150d9817763caf1a6f4b422d67042",
        "2a292df7e32cababbd9de088d1d1abec9fc0440f637ed2fba145094dc14bea08",
        "f4a9e534fc0d216c44b218fa0c42d99635a0127ee2e53c712f70609649fdff22",
        "8268436f8c4126196cf64b3c7ddbda90746a378625f9813dd9b8457077256731",
        "2810e5cbc2cc4d4eece54f61c6f69758e289aa7ab440b3cbeaa21995c2f4232b",
        "3eb858e78f5a7254d8c9731174a94f76755fd3941c0ac93735c07ba14579630e",
        "a45fdc55c76448c049a1ab33f17023edfb2be3581e9c7aade8a6125215e04220",
        "d483fe813c6ba647ebbfd3ec41adca1c6130c2beeee9d9bf065c8d151c5f396e",
        "8a2e1d30050198c65a54483123960ccc38aef6848e1ec8f5f780e8523769ba32",
        "32888462f8b486c68ad7dd9610be5192bbeaf3b443951ac1a8118419d9fa097b",
        "227142501b9d4355ccba290404bde41575b037693cef1f438c47f8fbf35d1165",
        "5c37cc491da847cfeb9281d407efc41e15144c876e0170b499a96a22ed31e01e",
        "445425117cb8c90edcbc7c1cc0e74f747f2c1efa5630a967c64f287792a48a4b",
    ];

    #[test]
    fn small_multiples_of_basepoint() {
        let mut multiple = RistrettoPoint::identity();
        for hex_str in SMALL_MULTIPLES {
            let expected = encoding(hex_str);
            assert_eq!(multiple.compress(), expected);
            assert_eq!(expected.decompress(), Ok(multiple));
            multiple += B;
        }
    }

    #[test]
    fn bad_encodings_are_rejected() {
        for hex_str in BAD_ENCODINGS {
            assert_eq!(
                encoding(hex_str).decompress(),
                Err(Error::PointDecompression),
                "{} decoded",
                hex_str
            );
        }
        // d is negative, so its bytes are never a valid s.
        let negative = CompressedRistretto(constants::EDWARDS_D.as_bytes());
        assert_eq!(negative.decompress(), Err(Error::PointDecompression));
    }

    #[test]
    fn slice_conversions_check_length() {
        assert_eq!(
            CompressedRistretto::try_from(&[0u8; 31][..]),
            Err(Error::BytesLength {
                name: "CompressedRistretto",
                length: 32
            })
        );
        assert_eq!(
            CompressedRistretto::try_from(RISTRETTO_BASEPOINT_COMPRESSED.as_bytes().as_slice()),
            Ok(RISTRETTO_BASEPOINT_COMPRESSED)
        );
        assert_eq!(
            RistrettoPoint::from_uniform_slice(&[7u8; 63]),
            Err(Error::BytesLength {
                name: "RistrettoPoint",
                length: 64
            })
        );
        assert_eq!(
            RistrettoPoint::from_uniform_slice(&[7u8; 64]),
            Ok(RistrettoPoint::from_uniform_bytes(&[7u8; 64]))
        );
    }

    #[test]
    fn identity_encodes_as_zero() {
        assert_eq!(RistrettoPoint::identity().compress(), CompressedRistretto::identity());

        let decoded = CompressedRistretto::default().decompress().unwrap();
        assert!(decoded.is_identity());
        assert!(decoded
            .coset4()
            .iter()
            .any(|p| p.compress() == CompressedEdwardsY::identity()));
    }

    #[test]
    fn decoded_basepoint_differs_by_four_torsion() {
        let decoded = RISTRETTO_BASEPOINT_COMPRESSED.decompress().unwrap();
        assert_eq!(decoded, B);
        let offset = B.0 - decoded.0;
        assert!(offset.mul_by_pow_2(2).is_identity());
    }

    #[test]
    fn coset_representatives_are_one_element() {
        let mut rng = rand::thread_rng();
        for P in [B, RistrettoPoint::mul_base(&random_scalar(&mut rng))] {
            let expected = P.compress();
            for representative in P.coset4() {
                let Q = RistrettoPoint(representative);
                assert_eq!(Q, P);
                assert_eq!(Q.compress(), expected);
            }
        }
    }

    #[test]
    fn encoding_round_trips() {
        let mut rng = OsRng;
        for _ in 0..64 {
            let P = RistrettoPoint::mul_base(&Scalar::random(&mut rng));
            assert_eq!(P.compress().decompress(), Ok(P));

            let Q = RistrettoPoint::random(&mut rng);
            assert_eq!(Q.compress().decompress(), Ok(Q));
            assert!((Q * constants::BASEPOINT_ORDER_PRIVATE).is_identity());
        }
    }

    #[test]
    fn elligator_map_vectors() {
        // Inputs keep bit 255 clear; the map itself ignores it.
        let vectors = [
            (
                "b8f98731fd7b597143a006ef0769d329c0f9b939096646c60f7f071aa0668647",
                "b09ded61421d8ca6a85e1a9dd4d8e5a0c3f6e8efa9703fc1402098450bbef656",
            ),
            (
                "e50ef1e34b09763c8099e215b7d95b886200e79c7c4d528b8e86a4a9a93efa34",
                "ea8d4dcbb5e1fa4aab3e0f764ed49613830ebceec2f48d8aa6a2537ae4c9131a",
            ),
            (
                "736d24dcb4df6306cca9131da9445417156dbd957fcd5b66ac2370238645ba22",
                "e8e7335c05a85024adb36844ba9544288caa1b67638c15f22b3efa86d0ff3d59",
            ),
            (
                "1031606babc7a4098110403ef13f84add1a070d769329d51fd69019ae5197853",
                "d0788c81b1b3ed9ffca01c0dce05d3f1c0da016182f114a9772ef61d4f504d54",
            ),
            (
                "9c83a1a2ecfb05bba7ab11b294d25acf56154fa1a7d7ea0188f2b6f826554f56",
                "ca0bec913a0cb59dd106d5584b930b77bf8b2f8e212499c1dfb7b208cd78f86e",
            ),
            (
                "fbb17c3612654bebf5ba132e859de5400a88b5b94e90fea789316b0a3d0a1519",
                "1a42e743cbaf748220883efdd72e05d6a6f86cedd847f4ad488552068ff06829",
            ),
            (
                "e8c11444f04dba4db7282c56961fc6d44c5103d9c5087e807e98a4d0992cbd4d",
                "289d6660c9dfc8c596b56a53677e8f2191e64e06ab92d28f7005f517b78a1278",
            ),
            (
                "ade595b125e61e453d38acbedb73a7c247863b4b1cf4761aa26140100fbd1e40",
                "dc251bcbefc4b0832542bcf3b9fa7117a7d39af3a8d736ab9f24c3510d962b2b",
            ),
            (
                "6a473d6bfa752a975bcad46434bcbe157dda1f12fdf1a08539f203a4bd446f4b",
                "e879b0deb7c49f5aeec1693465a7f4aa7972c406439850b9dd075369b0d0e079",
            ),
            (
                "70ccb65adcc67849ad6bc111e328a224968deb37acb70c27c2882b99f4765b59",
                "e2b5b734f1a33db3ddcfdc49f5f219ec4354b3dea73ea7b620095c1ea57fcc44",
            ),
            (
                "6f18cb7bfebd0ba233c4a388cc8f0ade217051cd222308425a06a43aaab12219",
                "e27710f2c88bf0570bde5c929cf32e77413b01f85cb732af5728ce35d0dc940d",
            ),
            (
                "e1b71e34ec5206b76d19e3b5195229c1504da150f2cb4fcc88f5836eed6a033a",
                "46f04f70369de4924a7ad858e83e9e0d0e927375b0de5ae1f4175ebe96078860",
            ),
            (
                "cff626381e56b05a1bc83d2add1b38d24fb2bd7844c178a74db935c57c80bf7e",
                "1647f1672dc1c390b7659a322744316e332c3e00e5714851a81d496a66288418",
            ),
            (
                "0188d750f02e3f9310f4e6cf52bd4a326aa98a561e83d6caa67dfbe462182415",
                "c4856b0b82694a21ccab85ddaec1f12426b3c46bdbb9b5fde42f9b2ae749294e",
            ),
            (
                "d2cfe4389b74cf3654c3fbd7f9c7744b6defc4fbc2f6fce446929c231927f104",
                "3affe1c573d0a08f27c552458feb5caa4a28390babe31ab9d9cf5ab9c5be233c",
            ),
            (
                "22747b0908285dbd0967396742e303029d6b86dbca4ae69a4e6bdbc3d60e5450",
                "582b5c76df886991eeba7308d67099fd266ccde69d820b426555fd6e6e0e9470",
            ),
        ];
        for (input, image) in vectors {
            let r0 = FieldElement::from_bytes(&bytes(input));
            assert_eq!(
                RistrettoPoint::elligator_ristretto_flavor(&r0).compress(),
                encoding(image)
            );
        }
    }

    #[test]
    fn uniform_bytes_vectors() {
        // RFC 9496, appendix A.3.  The last two inputs differ only in
        // bits the map discards and share an image.
        let vectors = [
            (
                "5d1be09e3d0c82fc538112490e35701979d99e06ca3e2b5b54bffe8b4dc772c14d98b696a1bbfb5ca32c436cc61c16563790306c79eaca7705668b47dffe5bb6",
                "3066f82a1a747d45120d1740f14358531a8f04bbffe6a819f86dfe50f44a0a46",
            ),
            (
                "f116b34b8f17ceb56e8732a60d913dd10cce47a6d53bee9204be8b44f6678b270102a56902e2488c46120e9276cfe54638286b9e4b3cdb470b542d46c2068d38",
                "f26e5b6f7d362d2d2a94c5d0e7602cb4773c95a2e5c31a64f133189fa76ed61b",
            ),
            (
                "8422e1bbdaab52938b81fd602effb6f89110e1e57208ad12d9ad767e2e25510c27140775f9337088b982d83d7fcf0b2fa1edffe51952cbe7365e95c86eaf325c",
                "006ccd2a9e6867e6a2c5cea83d3302cc9de128dd2a9a57dd8ee7b9d7ffe02826",
            ),
            (
                "ac22415129b61427bf464e17baee8db65940c233b98afce8d17c57beeb7876c2150d15af1cb1fb824bbd14955f2b57d08d388aab431a391cfc33d5bafb5dbbaf",
                "f8f0c87cf237953c5890aec3998169005dae3eca1fbb04548c635953c817f92a",
            ),
            (
                "165d697a1ef3d5cf3c38565beefcf88c0f282b8e7dbd28544c483432f1cec7675debea8ebb4e5fe7d6f6e5db15f15587ac4d4d4a1de7191e0c1ca6664abcc413",
                "ae81e7dedf20a497e10c304a765c1767a42d6e06029758d2d7e8ef7cc4c41179",
            ),
            (
                "edffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff1200000000000000000000000000000000000000000000000000000000000000",
                "304282791023b73128d277bdcb5c7746ef2eac08dde9f2983379cb8e5ef0517f",
            ),
            (
                "0000000000000000000000000000000000000000000000000000000000000080ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f",
                "304282791023b73128d277bdcb5c7746ef2eac08dde9f2983379cb8e5ef0517f",
            ),
        ];
        for (input, image) in vectors {
            let uniform: [u8; 64] = bytes(input);
            assert_eq!(
                RistrettoPoint::from_uniform_bytes(&uniform).compress(),
                encoding(image)
            );
        }
    }

    #[test]
    #[cfg(feature = "digest")]
    fn hashing_paths_agree() {
        use sha2::{Digest, Sha512};

        let msg = b"curve25519-arith hash to group";
        let P = RistrettoPoint::hash_from_bytes::<Sha512>(msg);

        let mut streamed = Sha512::new();
        streamed.update(&msg[..10]);
        streamed.update(&msg[10..]);
        assert_eq!(RistrettoPoint::from_hash(streamed), P);

        assert_eq!(RistrettoPoint::from_uniform_slice(&Sha512::digest(msg)), Ok(P));
    }

    #[test]
    #[cfg(feature = "alloc")]
    fn batch_double_and_compress() {
        let mut rng = OsRng;
        let mut points: Vec<RistrettoPoint> =
            (0..256).map(|_| RistrettoPoint::random(&mut rng)).collect();
        points[17] = RistrettoPoint::identity();
        points[18] = B;

        let doubled = RistrettoPoint::double_and_compress_batch(&points);
        assert_eq!(doubled.len(), points.len());
        for (P, encoded) in points.iter().zip(&doubled) {
            assert_eq!(*encoded, (P + P).compress());
        }
        assert!(RistrettoPoint::double_and_compress_batch(&points[..0]).is_empty());
    }

    #[test]
    fn operators_and_sum() {
        let a = Scalar::from(999u64);
        let b = Scalar::from(333u64);
        let (P, Q) = (B * a, B * b);

        assert_eq!(a * B, P);
        assert_eq!(P + Q, B * (a + b));
        assert_eq!(P - Q, B * (a - b));
        assert_eq!(-P + P, RistrettoPoint::identity());

        let mut R = P;
        R += Q;
        R -= P;
        R *= Scalar::from(3u64);
        assert_eq!(R, Q + Q + Q);

        let points = [P, Q];
        assert_eq!(points.iter().sum::<RistrettoPoint>(), P + Q);
        assert_eq!(points.iter().map(|p| p * b).sum::<RistrettoPoint>(), (P + Q) * b);
        assert_eq!(
            core::iter::empty::<RistrettoPoint>().sum::<RistrettoPoint>(),
            RistrettoPoint::identity()
        );
    }

    #[test]
    fn conditional_select_and_hash() {
        use std::collections::HashSet;

        let id = RistrettoPoint::identity();
        assert_eq!(RistrettoPoint::conditional_select(&id, &B, Choice::from(0)), id);
        assert_eq!(RistrettoPoint::conditional_select(&id, &B, Choice::from(1)), B);

        let representatives: HashSet<RistrettoPoint> =
            B.coset4().into_iter().map(RistrettoPoint).collect();
        assert_eq!(representatives.len(), 1);
    }

    #[test]
    fn basepoint_tables_match_variable_base() {
        let mut rng = rand::thread_rng();
        let table = RistrettoBasepointTable::create(&B);
        assert_eq!(table.basepoint(), B);
        for _ in 0..8 {
            let s = random_scalar(&mut rng);
            let expected = B * s;
            assert_eq!(&table * &s, expected);
            assert_eq!(&s * &table, expected);
            assert_eq!(RistrettoPoint::mul_base(&s), expected);
        }
    }

    #[test]
    fn double_and_triple_base() {
        let mut rng = rand::thread_rng();
        let a = random_scalar(&mut rng);
        let b = random_scalar(&mut rng);
        let A = RistrettoPoint::random(&mut rng);
        let C = A * a + RistrettoPoint::mul_base(&b);

        assert_eq!(RistrettoPoint::vartime_double_scalar_mul_basepoint(&a, &A, &b), C);
        assert!(RistrettoPoint::vartime_triple_scalar_mul_basepoint(&a, &A, &b, &C).is_identity());

        // Another representative of C names the same element.
        let C_shifted = RistrettoPoint(C.0 + constants::EIGHT_TORSION[2]);
        assert!(
            RistrettoPoint::vartime_triple_scalar_mul_basepoint(&a, &A, &b, &C_shifted)
                .is_identity()
        );

        let prepared = ExpandedRistrettoPoint::from(&A);
        assert_eq!(prepared.point(), A);
        assert_eq!(
            ExpandedRistrettoPoint::vartime_double_scalar_mul_basepoint(&a, &prepared, &b),
            C
        );
        assert!(
            ExpandedRistrettoPoint::vartime_triple_scalar_mul_basepoint(&a, &prepared, &b, &C)
                .is_identity()
        );
        assert!(
            !ExpandedRistrettoPoint::vartime_triple_scalar_mul_basepoint(&a, &prepared, &b, &A)
                .is_identity()
        );
    }

    #[test]
    #[cfg(feature = "alloc")]
    fn mixed_multiscalar_matches_known_discrete_logs() {
        let mut rng = rand::thread_rng();
        let logs: Vec<Scalar> = (0..96).map(|_| random_scalar(&mut rng)).collect();
        let weights: Vec<Scalar> = (0..96).map(|_| random_scalar(&mut rng)).collect();
        let points: Vec<RistrettoPoint> = logs.iter().map(RistrettoPoint::mul_base).collect();

        let expected_log: Scalar = logs.iter().zip(&weights).map(|(l, w)| l * w).sum();
        let expected = RistrettoPoint::mul_base(&expected_log);

        let (fixed, rest) = points.split_at(40);
        let prepared: Vec<ExpandedRistrettoPoint> =
            fixed.iter().map(ExpandedRistrettoPoint::new).collect();

        let mixed = ExpandedRistrettoPoint::vartime_mixed_multiscalar_mul(
            &weights[..40],
            &prepared,
            &weights[40..],
            rest,
        );
        assert_eq!(mixed, expected);
        assert_eq!(RistrettoPoint::vartime_multiscalar_mul(&weights, &points), expected);
        assert_eq!(RistrettoPoint::multiscalar_mul(&weights, &points), expected);

        let missing = ExpandedRistrettoPoint::optional_mixed_multiscalar_mul(
            &weights[..40],
            &prepared,
            &weights[40..42],
            [Some(rest[0]), None],
        );
        assert!(missing.is_none());
    }

    #[test]
    #[cfg(feature = "serde")]
    fn serde_uses_the_canonical_encoding() {
        let as_point = bincode::serialize(&B).unwrap();
        let as_compressed = bincode::serialize(&RISTRETTO_BASEPOINT_COMPRESSED).unwrap();
        assert_eq!(as_point, as_compressed);
        assert_eq!(&as_point[..], RISTRETTO_BASEPOINT_COMPRESSED.as_bytes());

        let point: RistrettoPoint = bincode::deserialize(&as_point).unwrap();
        let compressed: CompressedRistretto = bincode::deserialize(&as_point).unwrap();
        assert_eq!(point, B);
        assert_eq!(compressed, RISTRETTO_BASEPOINT_COMPRESSED);

        let negative = constants::EDWARDS_D.as_bytes();
        assert!(bincode::deserialize::<RistrettoPoint>(&negative).is_err());
        assert!(bincode::deserialize::<CompressedRistretto>(&negative).is_ok());
        assert!(bincode::deserialize::<RistrettoPoint>(&as_point[..31]).is_err());
    }
}
