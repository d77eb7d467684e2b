// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

//! Integers modulo the prime order of the basepoint.
//!
//! Ed25519's basepoint and every Ristretto point generate a group of order
//! \\( \ell = 2\^{252} + 27742317777372353535851937790883648493 \\), so a
//! [`Scalar`] is an element of \\( \mathbb Z / \ell \mathbb Z \\).  The
//! stored bytes are always the reduced little-endian representative:
//!
//! * [`Scalar::from_canonical_bytes`] rejects any encoding that is not
//!   already reduced, including those with bit 255 set;
//! * [`Scalar::from_bytes_mod_order`] and
//!   [`Scalar::from_bytes_mod_order_wide`] accept 256- and 512-bit
//!   integers and reduce them.
//!
//! X25519-style clamping has no meaning mod \\( \ell \\); callers that
//! need it pass raw bit strings to
//! [`MontgomeryPoint::mul_bits_be`](crate::montgomery::MontgomeryPoint::mul_bits_be)
//! instead.
//!
//! ```
//! use curve25519_arith::scalar::Scalar;
//!
//! // ℓ + 5, written out little-endian.
//! let mut bytes = Scalar::ZERO.to_bytes();
//! bytes[..16].copy_from_slice(&0x14def9dea2f79cd65812631a5cf5d3f2u128.to_le_bytes());
//! bytes[31] = 0x10;
//!
//! assert!(Scalar::from_canonical_bytes(bytes).is_err());
//! assert_eq!(Scalar::from_bytes_mod_order(bytes), Scalar::from(5u8));
//! ```

use core::borrow::Borrow;
use core::fmt::Debug;
use core::iter::{Product, Sum};
use core::ops::Index;
use core::ops::Neg;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Sub, SubAssign};

use cfg_if::cfg_if;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

#[cfg(any(test, feature = "rand_core"))]
use rand_core::CryptoRngCore;

#[cfg(feature = "digest")]
use digest::generic_array::typenum::U64;
#[cfg(feature = "digest")]
use digest::Digest;

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::backend;
use crate::errors::Error;

pub(crate) mod lattice_reduction;

cfg_if! {
    if #[cfg(curve25519_arith_bits = "64")] {
        /// Limb form of a scalar used for arithmetic.
        type UnpackedScalar = backend::serial::u64::scalar::Scalar52;
        use backend::serial::u64::constants::R;
    } else {
        /// Limb form of a scalar used for arithmetic.
        type UnpackedScalar = backend::serial::u32::scalar::Scalar29;
        use backend::serial::u32::constants::R;
    }
}

/// An element of \\( \mathbb Z / \ell \mathbb Z \\), stored as its reduced
/// 32-byte little-endian representative.
#[allow(clippy::derived_hash_with_manual_eq)]
#[derive(Copy, Clone, Hash)]
pub struct Scalar {
    /// Little-endian representative.  Only crate-internal constructors
    /// may leave it unreduced.
    pub(crate) bytes: [u8; 32],
}

impl Scalar {
    /// The scalar \\( 0 \\).
    pub const ZERO: Self = Self { bytes: [0u8; 32] };

    /// The scalar \\( 1 \\).
    pub const ONE: Self = {
        let mut bytes = [0u8; 32];
        bytes[0] = 1;
        Self { bytes }
    };

    /// Reduce a 256-bit little-endian integer mod \\( \ell \\).
    pub fn from_bytes_mod_order(bytes: [u8; 32]) -> Scalar {
        let reduced = Scalar { bytes }.reduce();
        debug_assert_eq!(reduced.bytes[31] >> 7, 0);
        reduced
    }

    /// Reduce a 512-bit little-endian integer mod \\( \ell \\).
    ///
    /// Feeding 64 uniform bytes through this gives a scalar whose bias is
    /// negligible, which is how [`Scalar::random`] and the hash
    /// constructors work.
    pub fn from_bytes_mod_order_wide(input: &[u8; 64]) -> Scalar {
        UnpackedScalar::from_bytes_wide(input).pack()
    }

    /// Decode a scalar that must already be reduced.
    ///
    /// Fails with [`Error::NonCanonicalScalar`] when `bytes` encodes an
    /// integer \\( \geq \ell \\).  Bit 255 is not masked off first.
    pub fn from_canonical_bytes(bytes: [u8; 32]) -> Result<Scalar, Error> {
        let candidate = Scalar { bytes };
        let top_bit_clear = Choice::from(1 ^ (bytes[31] >> 7));

        if bool::from(top_bit_clear & candidate.is_canonical()) {
            Ok(candidate)
        } else {
            Err(Error::NonCanonicalScalar)
        }
    }
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scalar")
            .field("bytes", &self.bytes)
            .finish()
    }
}

impl Eq for Scalar {}
impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.bytes.ct_eq(&other.bytes)
    }
}

impl Index<usize> for Scalar {
    type Output = u8;

    /// Read-only access to byte `index` of the representative.
    fn index(&self, index: usize) -> &u8 {
        &self.bytes[index]
    }
}

// Every `Scalar` is reduced, and the limb routines keep reduced inputs
// reduced, so the operators never need a final reduction.

impl<'a, 'b> Add<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn add(self, rhs: &'b Scalar) -> Scalar {
        UnpackedScalar::add(&self.unpack(), &rhs.unpack()).pack()
    }
}

define_add_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl<'b> AddAssign<&'b Scalar> for Scalar {
    fn add_assign(&mut self, rhs: &'b Scalar) {
        *self = &*self + rhs;
    }
}

define_add_assign_variants!(LHS = Scalar, RHS = Scalar);

impl<'a, 'b> Sub<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn sub(self, rhs: &'b Scalar) -> Scalar {
        UnpackedScalar::sub(&self.unpack(), &rhs.unpack()).pack()
    }
}

define_sub_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl<'b> SubAssign<&'b Scalar> for Scalar {
    fn sub_assign(&mut self, rhs: &'b Scalar) {
        *self = &*self - rhs;
    }
}

define_sub_assign_variants!(LHS = Scalar, RHS = Scalar);

impl<'a, 'b> Mul<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn mul(self, rhs: &'b Scalar) -> Scalar {
        UnpackedScalar::mul(&self.unpack(), &rhs.unpack()).pack()
    }
}

define_mul_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl<'b> MulAssign<&'b Scalar> for Scalar {
    fn mul_assign(&mut self, rhs: &'b Scalar) {
        *self = &*self * rhs;
    }
}

define_mul_assign_variants!(LHS = Scalar, RHS = Scalar);

impl<'a> Neg for &'a Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        UnpackedScalar::sub(&UnpackedScalar::ZERO, &self.unpack()).pack()
    }
}

define_neg_variant!(Scalar);

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut bytes = a.bytes;
        for (byte, other) in bytes.iter_mut().zip(b.bytes.iter()) {
            byte.conditional_assign(other, choice);
        }
        Scalar { bytes }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Scalar {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::serde_fixed::serialize(&self.bytes, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Scalar {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = crate::serde_fixed::deserialize(deserializer, "a reduced scalar")?;
        Scalar::from_canonical_bytes(bytes).map_err(serde::de::Error::custom)
    }
}

impl<T: Borrow<Scalar>> Sum<T> for Scalar {
    fn sum<I: Iterator<Item = T>>(iter: I) -> Self {
        iter.fold(Scalar::ZERO, |total, term| total + term.borrow())
    }
}

impl<T: Borrow<Scalar>> Product<T> for Scalar {
    fn product<I: Iterator<Item = T>>(iter: I) -> Self {
        iter.fold(Scalar::ONE, |total, factor| total * factor.borrow())
    }
}

impl Default for Scalar {
    fn default() -> Scalar {
        Scalar::ZERO
    }
}

/// Unsigned integers are all below \\( \ell \\), so their little-endian
/// bytes zero-extended to 32 are already canonical.
macro_rules! impl_from_unsigned {
    ($($int:ty),*) => {$(
        impl From<$int> for Scalar {
            fn from(x: $int) -> Scalar {
                let le = x.to_le_bytes();
                let mut bytes = [0u8; 32];
                bytes[..le.len()].copy_from_slice(&le);
                Scalar { bytes }
            }
        }
    )*};
}

impl_from_unsigned!(u8, u16, u32, u64, u128);

impl TryFrom<&[u8]> for Scalar {
    type Error = Error;

    /// Decode a canonical scalar from a slice that must be 32 bytes long.
    fn try_from(slice: &[u8]) -> Result<Scalar, Error> {
        let bytes: [u8; 32] = slice.try_into().map_err(|_| Error::BytesLength {
            name: "Scalar",
            length: 32,
        })?;
        Scalar::from_canonical_bytes(bytes)
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

impl Scalar {
    /// Sample a uniformly distributed scalar.
    ///
    /// ```
    /// use curve25519_arith::scalar::Scalar;
    /// use rand_core::OsRng;
    ///
    /// let k = Scalar::random(&mut OsRng);
    /// assert_eq!(k * Scalar::ONE, k);
    /// ```
    #[cfg(any(test, feature = "rand_core"))]
    pub fn random<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Self {
        let mut wide = [0u8; 64];
        rng.fill_bytes(&mut wide);
        Scalar::from_bytes_mod_order_wide(&wide)
    }

    /// Hash `input` with a 64-byte digest `D` and reduce the output.
    #[cfg(feature = "digest")]
    pub fn hash_from_bytes<D>(input: &[u8]) -> Scalar
    where
        D: Digest<OutputSize = U64> + Default,
    {
        Scalar::from_hash(D::new_with_prefix(input))
    }

    /// Finalize a 64-byte digest that has already absorbed its input and
    /// reduce the output.
    ///
    /// ```
    /// use curve25519_arith::scalar::Scalar;
    /// use sha2::{Digest, Sha512};
    ///
    /// let mut streamed = Sha512::new();
    /// streamed.update(b"domain separator");
    /// streamed.update(b"message");
    ///
    /// assert_eq!(
    ///     Scalar::from_hash(streamed),
    ///     Scalar::hash_from_bytes::<Sha512>(b"domain separatormessage"),
    /// );
    /// ```
    #[cfg(feature = "digest")]
    pub fn from_hash<D>(hash: D) -> Scalar
    where
        D: Digest<OutputSize = U64>,
    {
        let mut wide = [0u8; 64];
        wide.copy_from_slice(&hash.finalize());
        Scalar::from_bytes_mod_order_wide(&wide)
    }

    /// The 32-byte little-endian encoding.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.bytes
    }

    /// Borrow the 32-byte little-endian encoding.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// The multiplicative inverse of a nonzero scalar.
    ///
    /// Runs in constant time.  Zero has no inverse; passing it returns
    /// zero, so callers must rule it out themselves.
    pub fn invert(&self) -> Scalar {
        self.unpack().invert().pack()
    }

    /// Invert every element of `inputs` in place with a single field
    /// inversion, returning the product of all the inverses.
    ///
    /// All inputs must be nonzero; debug builds panic otherwise.  An empty
    /// slice returns [`Scalar::ONE`].
    #[cfg(feature = "alloc")]
    pub fn batch_invert(inputs: &mut [Scalar]) -> Scalar {
        // The prefix products stay in Montgomery form so the backward pass
        // needs no conversions.
        let mut running = Scalar::ONE.unpack().as_montgomery();
        let mut prefixes: Vec<UnpackedScalar> = Vec::with_capacity(inputs.len());

        for input in inputs.iter_mut() {
            prefixes.push(running);
            let in_montgomery = input.unpack().as_montgomery();
            *input = in_montgomery.pack();
            running = UnpackedScalar::montgomery_mul(&running, &in_montgomery);
        }

        debug_assert!(running.pack() != Scalar::ZERO);

        let mut inverse = running.montgomery_invert().from_montgomery();
        let all_inverses = inverse.pack();

        for (input, prefix) in inputs.iter_mut().zip(prefixes.iter()).rev() {
            let in_montgomery = input.unpack();
            *input = UnpackedScalar::montgomery_mul(&inverse, prefix).pack();
            inverse = UnpackedScalar::montgomery_mul(&inverse, &in_montgomery);
        }

        #[cfg(feature = "zeroize")]
        Zeroize::zeroize(&mut prefixes);

        all_inverses
    }

    /// The 256 bits of the representative, least significant first.
    pub fn bits_le(&self) -> impl DoubleEndedIterator<Item = bool> + '_ {
        (0..256).map(move |i| (self.bytes[i / 8] >> (i % 8)) & 1 == 1)
    }

    /// Whether the representative is odd.
    ///
    /// This is the sign convention used by the field's square-root
    /// selection, lifted to scalars.
    pub fn is_negative(&self) -> Choice {
        Choice::from(self.bytes[0] & 1)
    }

    /// The representative as five little-endian `u64` limbs.  The fifth
    /// limb is always zero so that windows near the top can read one limb
    /// past the last.
    fn padded_limbs(&self) -> [u64; 5] {
        let mut limbs = [0u64; 5];
        for (limb, chunk) in limbs.iter_mut().zip(self.bytes.chunks_exact(8)) {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            *limb = u64::from_le_bytes(word);
        }
        limbs
    }

    /// Width-\\( w \\) non-adjacent form.
    ///
    /// Returns digits \\( n_i \\) with \\( \sum n_i 2^i \\) equal to the
    /// scalar.  Each nonzero digit is odd with
    /// \\( |n_i| < 2^{w-1} \\), and any \\( w \\) consecutive digits hold
    /// at most one nonzero.  Requires \\( 2 \leq w \leq 8 \\).
    ///
    /// The scan keeps a carry instead of subtracting the emitted digit: an
    /// odd window \\( k \\) at or above \\( 2^{w-1} \\) emits
    /// \\( k - 2^w \\) and carries one into the next window.  Even
    /// windows emit nothing and advance a single bit.
    pub(crate) fn non_adjacent_form(&self, w: usize) -> [i8; 256] {
        debug_assert!((2..=8).contains(&w));

        let limbs = self.padded_limbs();
        let width = 1u64 << w;

        let mut naf = [0i8; 256];
        let mut carry = 0u64;
        let mut pos = 0;
        while pos < 256 {
            let window = carry + window_bits(&limbs, pos, w);

            if window & 1 == 0 {
                pos += 1;
                continue;
            }

            if window < width / 2 {
                carry = 0;
                naf[pos] = window as i8;
            } else {
                carry = 1;
                naf[pos] = (window as i8).wrapping_sub(width as i8);
            }
            pos += w;
        }

        naf
    }

    /// Signed radix-16 digits \\( a_i \\) with
    /// \\( \sum a_i 16^i \\) equal to the scalar.
    ///
    /// The low 63 digits lie in \\( [-8, 8) \\) and the top one in
    /// \\( [-8, 8] \\).  Requires bit 255 to be clear, which holds for
    /// every reduced scalar.
    pub(crate) fn as_radix_16(&self) -> [i8; 64] {
        debug_assert!(self.bytes[31] <= 127);

        let mut digits = [0i8; 64];
        for (pair, byte) in digits.chunks_exact_mut(2).zip(self.bytes.iter()) {
            pair[0] = (byte & 0x0f) as i8;
            pair[1] = (byte >> 4) as i8;
        }

        // Recenter each nibble from [0, 16) to [-8, 8), pushing the carry
        // into the next digit.
        for i in 0..63 {
            let carry = (digits[i] + 8) >> 4;
            digits[i] -= carry << 4;
            digits[i + 1] += carry;
        }

        digits
    }

    /// Number of digits [`Scalar::as_radix_2w`] produces for window `w`.
    pub(crate) fn to_radix_2w_size_hint(w: usize) -> usize {
        debug_assert!((4..=8).contains(&w));

        let digits = (256 + w - 1) / w;
        // An 8-bit digit cannot absorb the final carry, so it spills.
        if w == 8 {
            digits + 1
        } else {
            digits
        }
    }

    /// Signed radix-\\( 2^w \\) digits for \\( 4 \leq w \leq 8 \\).
    ///
    /// Digits lie in \\( [-2^{w-1}, 2^{w-1}) \\) apart from the last,
    /// which may reach \\( 2^{w-1} \\).  Only the first
    /// [`Scalar::to_radix_2w_size_hint`] entries are meaningful.
    pub(crate) fn as_radix_2w(&self, w: usize) -> [i8; 64] {
        debug_assert!((4..=8).contains(&w));

        if w == 4 {
            return self.as_radix_16();
        }

        let limbs = self.padded_limbs();
        let radix = 1u64 << w;
        let count = (256 + w - 1) / w;

        let mut digits = [0i8; 64];
        let mut carry = 0u64;
        for (i, digit) in digits.iter_mut().take(count).enumerate() {
            let coefficient = carry + window_bits(&limbs, i * w, w);
            carry = (coefficient + radix / 2) >> w;
            *digit = (coefficient as i64 - (carry << w) as i64) as i8;
        }

        if w == 8 {
            digits[count] += carry as i8;
        } else {
            digits[count - 1] += (carry << w) as i8;
        }

        digits
    }

    pub(crate) fn unpack(&self) -> UnpackedScalar {
        UnpackedScalar::from_bytes(&self.bytes)
    }

    /// Reduce mod \\( \ell \\) by a Montgomery multiplication with
    /// \\( R^2 \\), which cancels the \\( R^{-1} \\) the reduction adds.
    fn reduce(&self) -> Scalar {
        let wide = UnpackedScalar::mul_internal(&self.unpack(), &R);
        UnpackedScalar::montgomery_reduce(&wide).pack()
    }

    /// Whether the stored bytes are the reduced representative.
    ///
    /// Public constructors only produce reduced scalars, so this can only
    /// fail for values assembled inside the crate.
    pub fn is_canonical(&self) -> Choice {
        self.ct_eq(&self.reduce())
    }
}

/// `w` bits of a little-endian integer starting at bit `pos`, where the
/// window may straddle two limbs.
fn window_bits(limbs: &[u64; 5], pos: usize, w: usize) -> u64 {
    let (index, shift) = (pos / 64, pos % 64);
    let mut bits = limbs[index] >> shift;
    if shift + w > 64 {
        bits |= limbs[index + 1] << (64 - shift);
    }
    bits & ((1 << w) - 1)
}

impl UnpackedScalar {
    fn pack(&self) -> Scalar {
        Scalar {
            bytes: self.as_bytes(),
        }
    }

    /// Inverse of a scalar in Montgomery form, computed as
    /// \\( x^{\ell - 2} \\) with a fixed addition chain.
    #[rustfmt::skip] // keep alignment of addition chain and squarings
    #[allow(clippy::just_underscores_and_digits)]
    pub(crate) fn montgomery_invert(&self) -> UnpackedScalar {
        // Chain from https://briansmith.org/ecc-inversion-addition-chains-01#curve25519_scalar_inversion
        let    _1 = *self;
        let   _10 = _1.montgomery_square();
        let  _100 = _10.montgomery_square();
        let   _11 = UnpackedScalar::montgomery_mul(&_10,     &_1);
        let  _101 = UnpackedScalar::montgomery_mul(&_10,    &_11);
        let  _111 = UnpackedScalar::montgomery_mul(&_10,   &_101);
        let _1001 = UnpackedScalar::montgomery_mul(&_10,   &_111);
        let _1011 = UnpackedScalar::montgomery_mul(&_10,  &_1001);
        let _1111 = UnpackedScalar::montgomery_mul(&_100, &_1011);

        let mut acc = UnpackedScalar::montgomery_mul(&_1111, &_1);

        // (squarings, multiplier) pairs
        let steps: [(usize, &UnpackedScalar); 27] = [
            (126, &_101),  (4, &_11),    (5, &_1111),  (5, &_1111),
            (4, &_1001),   (2, &_11),    (5, &_1111),  (4, &_101),
            (6, &_101),    (3, &_111),   (5, &_1111),  (5, &_111),
            (4, &_11),     (5, &_1011),  (6, &_1011),  (10, &_1001),
            (4, &_11),     (5, &_11),    (5, &_11),    (5, &_1001),
            (4, &_111),    (6, &_1111),  (5, &_1011),  (3, &_101),
            (6, &_1111),   (3, &_101),   (3, &_11),
        ];
        for (squarings, multiplier) in steps {
            for _ in 0..squarings {
                acc = acc.montgomery_square();
            }
            acc = UnpackedScalar::montgomery_mul(&acc, multiplier);
        }

        acc
    }

    pub(crate) fn invert(&self) -> UnpackedScalar {
        self.as_montgomery().montgomery_invert().from_montgomery()
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    use std::vec::Vec;

    /// A uniformly random scalar, for tests.
    pub(crate) fn random_scalar<R: rand::RngCore>(rng: &mut R) -> Scalar {
        let mut bytes = [0u8; 64];
        rng.fill_bytes(&mut bytes);
        Scalar::from_bytes_mod_order_wide(&bytes)
    }

    /// Build a scalar from little-endian hex without reducing it.
    fn raw(hex_str: &str) -> Scalar {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hex::decode(hex_str).unwrap());
        Scalar { bytes }
    }

    // 2238329342913194256032495932344128051776374960164957527413114840482143558222
    const A: &str = "4e5ab4345d4708845913b4641bc27d5252a585101bcc4244d449f4a879d9f204";
    // 1 / A
    const A_INVERSE: &str = "1cdc17fce0e9a5bbd9247e56bb016347bbba31edd5a9bb96d50bcd7a3f962a0f";
    // 2592331292931086675770238855846338635550719849568364935475441891787804997264
    const B: &str = "907633fe1c4b66a4a28d2dd7678386c353d0de5455d4fc9de8ef7ac31f35bb05";
    // A * B
    const A_TIMES_B: &str = "6c3374a1894f62210aaa2fe186a6f92ce0aa75c2779581c295fc08179a73940c";
    // A + 2^256 A mod ℓ
    const A_WIDE_REDUCED: &str = "d89ab38bd279024745639ed817ad3f64cc005b32db9939f91c521fc564a5c008";
    // 2^256 - 1 mod ℓ
    const ALL_ONES_REDUCED: &str = "1c95988d7431ecd670cf7d73f45befc6feffffffffffffffffffffffffffff0f";
    // ℓ - 1
    const ELL_MINUS_ONE: &str = "ecd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010";

    const NAF_INPUT: &str = "1a0e978a90f6622d3747023f8ad8264da758aa1b88e040d1589e7b7f2376ef09";
    // Nonzero width-5 NAF digits of NAF_INPUT, as (position, digit).
    const NAF_DIGITS: [(usize, i8); 44] = [
        (1, 13), (9, 7), (16, -9), (21, -11), (26, 3), (31, 1), (36, 9), (41, -5),
        (48, 3), (53, 11), (58, 11), (64, -9), (70, -3), (75, 9), (81, 1), (88, -1),
        (94, 9), (99, -15), (104, -7), (109, -9), (115, 5), (120, 13), (126, -3),
        (131, -11), (136, -7), (141, -13), (146, 11), (151, -9), (157, 1), (163, -15),
        (168, 1), (173, 7), (182, 5), (188, 13), (195, 11), (201, 15), (207, -9),
        (215, -1), (223, 7), (229, -15), (235, 15), (240, 15), (245, 15), (251, 1),
    ];

    fn from_digit(d: i8) -> Scalar {
        let magnitude = Scalar::from(d.unsigned_abs());
        if d < 0 {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Horner evaluation of little-endian signed digits in base `2^shift`.
    fn evaluate(digits: &[i8], shift: u32) -> Scalar {
        let base = Scalar::from(1u64 << shift);
        digits
            .iter()
            .rev()
            .fold(Scalar::ZERO, |acc, &d| acc * base + from_digit(d))
    }

    fn edge_scalars() -> [Scalar; 4] {
        [
            Scalar::ZERO,
            Scalar::ONE,
            raw(ELL_MINUS_ONE),
            raw(ALL_ONES_REDUCED),
        ]
    }

    #[test]
    fn products_inverses_and_wide_reduction_match_vectors() {
        let a = raw(A);
        assert_eq!(a * raw(B), raw(A_TIMES_B));
        assert_eq!(a.invert(), raw(A_INVERSE));
        assert_eq!(a * a.invert(), Scalar::ONE);
        assert_eq!(a.unpack().square().pack(), a * a);

        let mut wide = [0u8; 64];
        wide[..32].copy_from_slice(a.as_bytes());
        wide[32..].copy_from_slice(a.as_bytes());
        assert_eq!(Scalar::from_bytes_mod_order_wide(&wide), raw(A_WIDE_REDUCED));
        assert_eq!(Scalar::from_bytes_mod_order([0xff; 32]), raw(ALL_ONES_REDUCED));
    }

    #[test]
    fn arithmetic_wraps_at_the_group_order() {
        let ell_minus_one = raw(ELL_MINUS_ONE);
        assert_eq!(ell_minus_one + Scalar::ONE, Scalar::ZERO);
        assert_eq!(Scalar::ZERO - Scalar::ONE, ell_minus_one);
        assert_eq!(-Scalar::ONE, ell_minus_one);
        assert_eq!(ell_minus_one * ell_minus_one, Scalar::ONE);

        let a = raw(A);
        assert_eq!(-(-a), a);
        assert_eq!(a - a, Scalar::ZERO);

        let mut acc = a;
        acc += raw(B);
        acc -= raw(B);
        acc *= raw(B);
        assert_eq!(acc, raw(A_TIMES_B));
    }

    #[test]
    fn sums_and_products_fold_over_borrowed_and_owned() {
        let (a, b) = (raw(A), raw(B));
        assert_eq!([a, b].iter().product::<Scalar>(), raw(A_TIMES_B));
        assert_eq!([a, b].into_iter().sum::<Scalar>(), a + b);

        let empty: [Scalar; 0] = [];
        assert_eq!(empty.iter().product::<Scalar>(), Scalar::ONE);
        assert_eq!(empty.iter().sum::<Scalar>(), Scalar::ZERO);

        let powers = (0..10).map(|i| Scalar::from(1u64 << i));
        assert_eq!(powers.product::<Scalar>(), Scalar::from(1u64 << 45));
        let counts = (1..=100u64).map(Scalar::from);
        assert_eq!(counts.sum::<Scalar>(), Scalar::from(5050u64));
    }

    #[test]
    fn integer_conversions_are_little_endian() {
        let s = Scalar::from(0x0102_0304_0506_0708u64);
        assert_eq!(&s.as_bytes()[..9], &[8, 7, 6, 5, 4, 3, 2, 1, 0]);
        assert_eq!(s[0], 8);

        assert_eq!(Scalar::from(200u8) + Scalar::ONE, Scalar::from(201u16));
        assert_eq!(
            Scalar::from(u32::MAX) + Scalar::ONE,
            Scalar::from(1u64 << 32)
        );
        assert_eq!(
            Scalar::from(u64::MAX) + Scalar::ONE,
            Scalar::from(1u128 << 64)
        );
        let big = u128::MAX - 7;
        assert_eq!(Scalar::from(big) + Scalar::from(7u8), Scalar::from(u128::MAX));
        assert_eq!(Scalar::default(), Scalar::ZERO);
    }

    #[test]
    fn canonical_decoding_rejects_unreduced_and_high_bit() {
        let ell_minus_one = raw(ELL_MINUS_ONE);
        assert_eq!(
            Scalar::from_canonical_bytes(ell_minus_one.to_bytes()),
            Ok(ell_minus_one)
        );

        let mut ell = ell_minus_one.to_bytes();
        ell[0] += 1;
        assert_eq!(
            Scalar::from_canonical_bytes(ell),
            Err(Error::NonCanonicalScalar)
        );

        let mut high_bit = [0u8; 32];
        high_bit[31] = 0x80;
        assert_eq!(
            Scalar::from_canonical_bytes(high_bit),
            Err(Error::NonCanonicalScalar)
        );

        assert!(bool::from(ell_minus_one.is_canonical()));
        assert!(!bool::from(Scalar { bytes: ell }.is_canonical()));
        assert!(!bool::from(
            crate::constants::BASEPOINT_ORDER_PRIVATE.is_canonical()
        ));
    }

    #[test]
    fn slice_conversion_checks_length() {
        let a = raw(A);
        assert_eq!(Scalar::try_from(&a.as_bytes()[..]), Ok(a));
        assert_eq!(
            Scalar::try_from(&a.as_bytes()[1..]),
            Err(Error::BytesLength {
                name: "Scalar",
                length: 32
            })
        );
        assert_eq!(
            Scalar::try_from(&[0xffu8; 32][..]),
            Err(Error::NonCanonicalScalar)
        );
    }

    #[test]
    fn limbs_round_trip() {
        let limbs = raw(A).unpack();
        assert_eq!(UnpackedScalar::from_bytes(&limbs.as_bytes()).0, limbs.0);
    }

    #[test]
    fn bits_and_parity() {
        for s in edge_scalars().into_iter().chain([raw(A), raw(B)]) {
            let rebuilt = s
                .bits_le()
                .rev()
                .fold(Scalar::ZERO, |acc, bit| acc + acc + Scalar::from(bit as u8));
            assert_eq!(rebuilt, s);
            assert_eq!(s.bits_le().last(), Some(false));
            assert_eq!(bool::from(s.is_negative()), s.bits_le().next() == Some(true));
        }
    }

    #[test]
    fn width_five_naf_matches_vector() {
        let mut expected = [0i8; 256];
        for (pos, digit) in NAF_DIGITS {
            expected[pos] = digit;
        }
        assert_eq!(raw(NAF_INPUT).non_adjacent_form(5), expected);
    }

    fn check_naf(s: &Scalar, w: usize) {
        let naf = s.non_adjacent_form(w);
        assert_eq!(evaluate(&naf, 1), *s, "w = {}", w);

        let bound = 1i16 << (w - 1);
        let nonzero: Vec<usize> = (0..256).filter(|&i| naf[i] != 0).collect();
        for &i in &nonzero {
            assert_eq!(naf[i] & 1, 1);
            assert!(i16::from(naf[i]).abs() < bound);
        }
        for gap in nonzero.windows(2) {
            assert!(gap[1] - gap[0] >= w);
        }
    }

    #[test]
    fn naf_is_sparse_and_exact() {
        let mut rng = rand::thread_rng();
        for s in edge_scalars() {
            for w in 2..=8 {
                check_naf(&s, w);
            }
        }
        for _ in 0..500 {
            let s = random_scalar(&mut rng);
            for w in [2, 5, 6, 7, 8] {
                check_naf(&s, w);
            }
        }
    }

    #[test]
    fn radix_16_digits_are_centred() {
        let mut rng = rand::thread_rng();
        let randoms = (0..100).map(|_| random_scalar(&mut rng));
        for s in edge_scalars().into_iter().chain(randoms) {
            let digits = s.as_radix_16();
            assert_eq!(evaluate(&digits, 4), s);
            assert!(digits[..63].iter().all(|d| (-8..8).contains(d)));
            assert!((-8..=8).contains(&digits[63]));
        }
    }

    fn check_radix_2w_recoding(s: Scalar, w: usize) {
        let count = Scalar::to_radix_2w_size_hint(w);
        let digits = s.as_radix_2w(w);
        assert_eq!(evaluate(&digits[..count], w as u32), s, "w = {}", w);
        assert!(digits[count..].iter().all(|&d| d == 0));
    }

    #[test]
    fn radix_2w_recodes_edge_and_dense_scalars() {
        // Inverses of small integers have dense, unstructured bit patterns.
        let dense = (2..100u64).map(|k| Scalar::from(k).invert());
        for s in edge_scalars().into_iter().chain(dense) {
            for w in 4..=8 {
                check_radix_2w_recoding(s, w);
            }
        }
    }

    #[test]
    fn radix_2w_size_hints() {
        let hints: Vec<usize> = (4..=8).map(Scalar::to_radix_2w_size_hint).collect();
        assert_eq!(hints, [64, 52, 43, 37, 33]);
    }

    #[test]
    fn conditional_select_and_debug() {
        let (a, b) = (raw(A), raw(B));
        assert_eq!(Scalar::conditional_select(&a, &b, Choice::from(0)), a);
        assert_eq!(Scalar::conditional_select(&a, &b, Choice::from(1)), b);
        assert!(format!("{:?}", Scalar::ONE).starts_with("Scalar { bytes: [1, 0"));
    }

    #[test]
    #[cfg(feature = "digest")]
    fn hashing_is_wide_reduction_of_the_digest() {
        use sha2::{Digest, Sha512};

        let msg = b"curve25519-arith scalar";
        let mut wide = [0u8; 64];
        wide.copy_from_slice(&Sha512::digest(msg));
        assert_eq!(
            Scalar::hash_from_bytes::<Sha512>(msg),
            Scalar::from_bytes_mod_order_wide(&wide)
        );
    }

    #[test]
    #[cfg(feature = "serde")]
    fn serde_uses_the_canonical_encoding() {
        let a = raw(A);
        let encoded = bincode::serialize(&a).unwrap();
        assert_eq!(encoded, a.to_bytes());
        assert_eq!(bincode::deserialize::<Scalar>(&encoded).unwrap(), a);
        assert!(bincode::deserialize::<Scalar>(&[0xff; 32]).is_err());
        assert!(bincode::deserialize::<Scalar>(&encoded[..31]).is_err());
    }

    #[test]
    #[cfg(feature = "alloc")]
    fn batch_invert_matches_single_inversions() {
        let mut rng = rand::thread_rng();
        let originals: Vec<Scalar> = (0..16).map(|_| random_scalar(&mut rng)).collect();
        let mut inverted = originals.clone();

        let all = Scalar::batch_invert(&mut inverted);

        assert_eq!(all, originals.iter().product::<Scalar>().invert());
        for (x, x_inv) in originals.iter().zip(&inverted) {
            assert_eq!(*x_inv, x.invert());
        }
        assert_eq!(Scalar::batch_invert(&mut []), Scalar::ONE);
    }

    #[cfg(all(debug_assertions, feature = "alloc"))]
    #[test]
    #[should_panic]
    fn batch_invert_rejects_zero() {
        let mut xs = vec![Scalar::from(3u8); 5];
        xs[2] = Scalar::ZERO;
        Scalar::batch_invert(&mut xs);
    }
}
