// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

//! Arithmetic mod \\(2\^{252} + 27742317777372353535851937790883648493\\)
//! with nine \\(29\\)-bit unsigned limbs.
//!
//! The largest limb in a \\(9\times 9\\) product of \\(29\\)-bit limbs is
//! `(0x1fffffff^2) * 9 = 0x23fffffdc0000009` (62 bits), so every column
//! fits in a `u64`.

use core::fmt::Debug;
use core::ops::{Index, IndexMut};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use super::constants;

/// The `Scalar29` struct represents an element in \\(\mathbb{Z} / \ell\mathbb{Z}\\) as 9 29-bit
/// limbs
#[derive(Copy, Clone)]
pub(crate) struct Scalar29(pub(crate) [u32; 9]);

const LOW_29_BIT_MASK: u32 = (1u32 << 29) - 1;

impl Debug for Scalar29 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Scalar29: {:?}", &self.0[..])
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for Scalar29 {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Index<usize> for Scalar29 {
    type Output = u32;
    fn index(&self, index: usize) -> &u32 {
        &(self.0[index])
    }
}

impl IndexMut<usize> for Scalar29 {
    fn index_mut(&mut self, index: usize) -> &mut u32 {
        &mut (self.0[index])
    }
}

/// u32 * u32 = u64 multiply helper
#[inline(always)]
fn m(x: u32, y: u32) -> u64 {
    (x as u64) * (y as u64)
}

/// Read `N` little-endian 32-bit words out of `4 * N` bytes.
#[inline(always)]
fn load_words<const N: usize>(bytes: &[u8]) -> [u32; N] {
    let mut words = [0u32; N];
    for (i, word) in words.iter_mut().enumerate() {
        for j in 0..4 {
            *word |= (bytes[(i * 4) + j] as u32) << (j * 8);
        }
    }
    words
}

impl Scalar29 {
    /// The scalar \\( 0 \\).
    pub(crate) const ZERO: Scalar29 = Scalar29([0, 0, 0, 0, 0, 0, 0, 0, 0]);

    /// Unpack a 32 byte / 256 bit scalar into 9 29-bit limbs.
    #[rustfmt::skip] // keep alignment of s[*] calculations
    pub(crate) fn from_bytes(bytes: &[u8; 32]) -> Scalar29 {
        let words: [u32; 8] = load_words(bytes);
        let top_mask = (1u32 << 24) - 1;

        let mut s = Scalar29::ZERO;
        s[0] =   words[0]                            & LOW_29_BIT_MASK;
        s[1] = ((words[0] >> 29) | (words[1] <<  3)) & LOW_29_BIT_MASK;
        s[2] = ((words[1] >> 26) | (words[2] <<  6)) & LOW_29_BIT_MASK;
        s[3] = ((words[2] >> 23) | (words[3] <<  9)) & LOW_29_BIT_MASK;
        s[4] = ((words[3] >> 20) | (words[4] << 12)) & LOW_29_BIT_MASK;
        s[5] = ((words[4] >> 17) | (words[5] << 15)) & LOW_29_BIT_MASK;
        s[6] = ((words[5] >> 14) | (words[6] << 18)) & LOW_29_BIT_MASK;
        s[7] = ((words[6] >> 11) | (words[7] << 21)) & LOW_29_BIT_MASK;
        s[8] =  (words[7] >>  8)                     & top_mask;

        s
    }

    /// Reduce a 64 byte / 512 bit scalar mod l.
    #[rustfmt::skip] // keep alignment of lo[*] calculations
    pub(crate) fn from_bytes_wide(bytes: &[u8; 64]) -> Scalar29 {
        let words: [u32; 16] = load_words(bytes);

        let mut lo = Scalar29::ZERO;
        let mut hi = Scalar29::ZERO;

        lo[0] =   words[ 0]                             & LOW_29_BIT_MASK;
        lo[1] = ((words[ 0] >> 29) | (words[ 1] <<  3)) & LOW_29_BIT_MASK;
        lo[2] = ((words[ 1] >> 26) | (words[ 2] <<  6)) & LOW_29_BIT_MASK;
        lo[3] = ((words[ 2] >> 23) | (words[ 3] <<  9)) & LOW_29_BIT_MASK;
        lo[4] = ((words[ 3] >> 20) | (words[ 4] << 12)) & LOW_29_BIT_MASK;
        lo[5] = ((words[ 4] >> 17) | (words[ 5] << 15)) & LOW_29_BIT_MASK;
        lo[6] = ((words[ 5] >> 14) | (words[ 6] << 18)) & LOW_29_BIT_MASK;
        lo[7] = ((words[ 6] >> 11) | (words[ 7] << 21)) & LOW_29_BIT_MASK;
        lo[8] = ((words[ 7] >>  8) | (words[ 8] << 24)) & LOW_29_BIT_MASK;
        hi[0] = ((words[ 8] >>  5) | (words[ 9] << 27)) & LOW_29_BIT_MASK;
        hi[1] =  (words[ 9] >>  2)                      & LOW_29_BIT_MASK;
        hi[2] = ((words[ 9] >> 31) | (words[10] <<  1)) & LOW_29_BIT_MASK;
        hi[3] = ((words[10] >> 28) | (words[11] <<  4)) & LOW_29_BIT_MASK;
        hi[4] = ((words[11] >> 25) | (words[12] <<  7)) & LOW_29_BIT_MASK;
        hi[5] = ((words[12] >> 22) | (words[13] << 10)) & LOW_29_BIT_MASK;
        hi[6] = ((words[13] >> 19) | (words[14] << 13)) & LOW_29_BIT_MASK;
        hi[7] = ((words[14] >> 16) | (words[15] << 16)) & LOW_29_BIT_MASK;
        hi[8] =   words[15] >> 13                                         ;

        lo = Scalar29::montgomery_mul(&lo, &constants::R);  // (lo * R) / R = lo
        hi = Scalar29::montgomery_mul(&hi, &constants::RR); // (hi * R^2) / R = hi * R

        Scalar29::add(&hi, &lo) // (hi * R) + lo
    }

    /// Pack the limbs of this `Scalar29` into 32 bytes.
    #[rustfmt::skip] // keep alignment of s[*] calculations
    #[allow(clippy::identity_op)]
    pub(crate) fn as_bytes(&self) -> [u8; 32] {
        let mut s = [0u8; 32];

        s[ 0] =  (self.0[0] >>  0)                      as u8;
        s[ 1] =  (self.0[0] >>  8)                      as u8;
        s[ 2] =  (self.0[0] >> 16)                      as u8;
        s[ 3] = ((self.0[0] >> 24) | (self.0[1] << 5))  as u8;
        s[ 4] =  (self.0[1] >>  3)                      as u8;
        s[ 5] =  (self.0[1] >> 11)                      as u8;
        s[ 6] =  (self.0[1] >> 19)                      as u8;
        s[ 7] = ((self.0[1] >> 27) | (self.0[2] << 2))  as u8;
        s[ 8] =  (self.0[2] >>  6)                      as u8;
        s[ 9] =  (self.0[2] >> 14)                      as u8;
        s[10] = ((self.0[2] >> 22) | (self.0[3] << 7))  as u8;
        s[11] =  (self.0[3] >>  1)                      as u8;
        s[12] =  (self.0[3] >>  9)                      as u8;
        s[13] =  (self.0[3] >> 17)                      as u8;
        s[14] = ((self.0[3] >> 25) | (self.0[4] << 4))  as u8;
        s[15] =  (self.0[4] >>  4)                      as u8;
        s[16] =  (self.0[4] >> 12)                      as u8;
        s[17] =  (self.0[4] >> 20)                      as u8;
        s[18] = ((self.0[4] >> 28) | (self.0[5] << 1))  as u8;
        s[19] =  (self.0[5] >>  7)                      as u8;
        s[20] =  (self.0[5] >> 15)                      as u8;
        s[21] = ((self.0[5] >> 23) | (self.0[6] << 6))  as u8;
        s[22] =  (self.0[6] >>  2)                      as u8;
        s[23] =  (self.0[6] >> 10)                      as u8;
        s[24] =  (self.0[6] >> 18)                      as u8;
        s[25] = ((self.0[6] >> 26) | (self.0[7] << 3))  as u8;
        s[26] =  (self.0[7] >>  5)                      as u8;
        s[27] =  (self.0[7] >> 13)                      as u8;
        s[28] =  (self.0[7] >> 21)                      as u8;
        s[29] =  (self.0[8] >>  0)                      as u8;
        s[30] =  (self.0[8] >>  8)                      as u8;
        s[31] =  (self.0[8] >> 16)                      as u8;

        s
    }

    /// Compute `a + b` (mod l).
    pub(crate) fn add(a: &Scalar29, b: &Scalar29) -> Scalar29 {
        let mut sum = Scalar29::ZERO;

        // a + b
        let mut carry: u32 = 0;
        for i in 0..9 {
            carry = a[i] + b[i] + (carry >> 29);
            sum[i] = carry & LOW_29_BIT_MASK;
        }

        // subtract l if the sum is >= l
        Scalar29::sub(&sum, &constants::L)
    }

    /// Compute `a - b` (mod l).
    pub(crate) fn sub(a: &Scalar29, b: &Scalar29) -> Scalar29 {
        let mut difference = Scalar29::ZERO;

        // a - b
        let mut borrow: u32 = 0;
        for i in 0..9 {
            borrow = a[i].wrapping_sub(b[i] + (borrow >> 31));
            difference[i] = borrow & LOW_29_BIT_MASK;
        }

        // conditionally add l if the difference is negative
        let underflow_mask = ((borrow >> 31) ^ 1).wrapping_sub(1);
        let mut carry: u32 = 0;
        for i in 0..9 {
            carry = (carry >> 29) + difference[i] + (constants::L[i] & underflow_mask);
            difference[i] = carry & LOW_29_BIT_MASK;
        }

        difference
    }

    /// Compute `a * b` as seventeen unreduced 58-bit columns.
    #[inline(always)]
    pub(crate) fn mul_internal(a: &Scalar29, b: &Scalar29) -> [u64; 17] {
        let mut z = [0u64; 17];
        for i in 0..9 {
            for j in 0..9 {
                z[i + j] += m(a[i], b[j]);
            }
        }
        z
    }

    /// Compute `a^2`, doubling the cross terms.
    #[inline(always)]
    fn square_internal(a: &Scalar29) -> [u64; 17] {
        let mut z = [0u64; 17];
        for i in 0..9 {
            z[2 * i] += m(a[i], a[i]);
            for j in (i + 1)..9 {
                z[i + j] += m(2 * a[i], a[j]);
            }
        }
        z
    }

    /// Compute `limbs/R` (mod l), where R is the Montgomery modulus 2^261
    #[inline(always)]
    #[rustfmt::skip] // keep alignment of part1() and part2() computations
    pub(crate) fn montgomery_reduce(limbs: &[u64; 17]) -> Scalar29 {

        #[inline(always)]
        fn part1(sum: u64) -> (u64, u32) {
            let p = (sum as u32).wrapping_mul(constants::LFACTOR) & LOW_29_BIT_MASK;
            ((sum + m(p, constants::L[0])) >> 29, p)
        }

        #[inline(always)]
        fn part2(sum: u64) -> (u64, u32) {
            let w = (sum as u32) & LOW_29_BIT_MASK;
            (sum >> 29, w)
        }

        // note: l5,l6,l7 are zero, so their multiplies can be skipped
        let l = &constants::L;

        // the first half computes the Montgomery adjustment factor n, and begins adding n*l to make limbs divisible by R
        let (carry, n0) = part1(        limbs[ 0]);
        let (carry, n1) = part1(carry + limbs[ 1] + m(n0, l[1]));
        let (carry, n2) = part1(carry + limbs[ 2] + m(n0, l[2]) + m(n1, l[1]));
        let (carry, n3) = part1(carry + limbs[ 3] + m(n0, l[3]) + m(n1, l[2]) + m(n2, l[1]));
        let (carry, n4) = part1(carry + limbs[ 4] + m(n0, l[4]) + m(n1, l[3]) + m(n2, l[2]) + m(n3, l[1]));
        let (carry, n5) = part1(carry + limbs[ 5]               + m(n1, l[4]) + m(n2, l[3]) + m(n3, l[2]) + m(n4, l[1]));
        let (carry, n6) = part1(carry + limbs[ 6]                             + m(n2, l[4]) + m(n3, l[3]) + m(n4, l[2]) + m(n5, l[1]));
        let (carry, n7) = part1(carry + limbs[ 7]                                           + m(n3, l[4]) + m(n4, l[3]) + m(n5, l[2]) + m(n6, l[1]));
        let (carry, n8) = part1(carry + limbs[ 8] + m(n0, l[8])                                           + m(n4, l[4]) + m(n5, l[3]) + m(n6, l[2]) + m(n7, l[1]));

        // limbs is divisible by R now, so we can divide by R by simply storing the upper half as the result
        let (carry, r0) = part2(carry + limbs[ 9]               + m(n1, l[8])                                           + m(n5, l[4]) + m(n6, l[3]) + m(n7, l[2]) + m(n8, l[1]));
        let (carry, r1) = part2(carry + limbs[10]                             + m(n2, l[8])                                           + m(n6, l[4]) + m(n7, l[3]) + m(n8, l[2]));
        let (carry, r2) = part2(carry + limbs[11]                                           + m(n3, l[8])                                           + m(n7, l[4]) + m(n8, l[3]));
        let (carry, r3) = part2(carry + limbs[12]                                                         + m(n4, l[8])                                           + m(n8, l[4]));
        let (carry, r4) = part2(carry + limbs[13]                                                                       + m(n5, l[8])                                          );
        let (carry, r5) = part2(carry + limbs[14]                                                                                     + m(n6, l[8])                            );
        let (carry, r6) = part2(carry + limbs[15]                                                                                                   + m(n7, l[8])              );
        let (carry, r7) = part2(carry + limbs[16]                                                                                                                 + m(n8, l[8]));
        let         r8 = carry as u32;

        // result may be >= l, so attempt to subtract l
        Scalar29::sub(&Scalar29([r0, r1, r2, r3, r4, r5, r6, r7, r8]), l)
    }

    /// Compute `a * b` (mod l).
    #[inline(never)]
    pub(crate) fn mul(a: &Scalar29, b: &Scalar29) -> Scalar29 {
        let ab = Scalar29::montgomery_reduce(&Scalar29::mul_internal(a, b));
        Scalar29::montgomery_reduce(&Scalar29::mul_internal(&ab, &constants::RR))
    }

    /// Compute `a^2` (mod l).
    #[inline(never)]
    pub(crate) fn square(&self) -> Scalar29 {
        let aa = Scalar29::montgomery_reduce(&Scalar29::square_internal(self));
        Scalar29::montgomery_reduce(&Scalar29::mul_internal(&aa, &constants::RR))
    }

    /// Compute `(a * b) / R` (mod l), where R is the Montgomery modulus 2^261
    #[inline(never)]
    pub(crate) fn montgomery_mul(a: &Scalar29, b: &Scalar29) -> Scalar29 {
        Scalar29::montgomery_reduce(&Scalar29::mul_internal(a, b))
    }

    /// Compute `(a^2) / R` (mod l) in Montgomery form, where R is the Montgomery modulus 2^261
    #[inline(never)]
    pub(crate) fn montgomery_square(&self) -> Scalar29 {
        Scalar29::montgomery_reduce(&Scalar29::square_internal(self))
    }

    /// Puts a Scalar29 in to Montgomery form, i.e. computes `a*R (mod l)`
    #[inline(never)]
    pub(crate) fn as_montgomery(&self) -> Scalar29 {
        Scalar29::montgomery_mul(self, &constants::RR)
    }

    /// Takes a Scalar29 out of Montgomery form, i.e. computes `a/R (mod l)`
    #[allow(clippy::wrong_self_convention)]
    pub(crate) fn from_montgomery(&self) -> Scalar29 {
        let mut limbs = [0u64; 17];
        for (wide, limb) in limbs.iter_mut().zip(self.0.iter()) {
            *wide = *limb as u64;
        }
        Scalar29::montgomery_reduce(&limbs)
    }
}
