// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

//! Two-dimensional lattice basis reduction, used to shorten the
//! scalars of a double-base multiplication.
//!
//! This is Algorithm 4 of Thomas Pornin,
//! "Optimized Lattice Basis Reduction In Dimension 2, and Fast
//! Schnorr and EdDSA Signature Verification",
//! <https://eprint.iacr.org/2020/454>.

#![allow(non_snake_case)]

use core::cmp::Ordering;
use core::mem;
use core::ops::{Add, AddAssign, Shl, Sub, SubAssign};

use crate::{constants::BASEPOINT_ORDER_PRIVATE, scalar::Scalar};

/// The low 128 bits of \\( \ell \\); the high part is \\( 2\^{252} \\).
const ELL_LOWER_HALF: i128 = 0x14de_f9de_a2f7_9cd6_5812_631a_5cf5_d3ed;

/// Bit length of \\( \ell \\), plus one.
const TARGET_BITS: usize = 254;

/// Find a short nonzero vector \\( (d\_0, d\_1) \\) of the lattice
/// spanned by \\( (\ell, 0) \\) and \\( (k, 1) \\).
///
/// The result satisfies \\( d\_0 \equiv d\_1 k \pmod \ell \\) and both
/// coordinates fit in an `i128`.
///
/// Runs in variable time, so `k` must not be secret.
pub(crate) fn find_short_vector(k: &Scalar) -> (i128, i128) {
    // The basis vectors u, v are tracked through their squared norms
    // N_u, N_v and their inner product p. Only the low 128 bits of the
    // coordinates themselves are kept, since the answer fits there.
    let mut N_u = BigInt::ELL_SQUARED;
    let mut N_v = BigInt::mul(k, k) + BigInt::ONE;
    let mut p = BigInt::mul(&BASEPOINT_ORDER_PRIVATE, k);

    let (mut u_0, mut u_1): (i128, i128) = (ELL_LOWER_HALF, 0);
    let (mut v_0, mut v_1): (i128, i128) = (low_i128(k), 1);

    loop {
        if N_u < N_v {
            mem::swap(&mut u_0, &mut v_0);
            mem::swap(&mut u_1, &mut v_1);
            mem::swap(&mut N_u, &mut N_v);
        }

        let len_N_v = N_v.bit_len();
        if len_N_v <= TARGET_BITS {
            return (v_0, v_1);
        }

        let s = p.bit_len().saturating_sub(len_N_v);
        if p > BigInt::ZERO {
            u_0 = u_0.wrapping_sub(v_0.wrapping_shl(s as u32));
            u_1 = u_1.wrapping_sub(v_1.wrapping_shl(s as u32));
            N_u += (N_v << (2 * s)) - (p << (s + 1));
            p -= N_v << s;
        } else {
            u_0 = u_0.wrapping_add(v_0.wrapping_shl(s as u32));
            u_1 = u_1.wrapping_add(v_1.wrapping_shl(s as u32));
            N_u += (N_v << (2 * s)) + (p << (s + 1));
            p += N_v << s;
        }
    }
}

/// The low 16 bytes of `k` as a (wrapping) `i128`.
fn low_i128(k: &Scalar) -> i128 {
    let mut low = [0u8; 16];
    low.copy_from_slice(&k.as_bytes()[..16]);
    i128::from_le_bytes(low)
}

/// A 512-bit two's complement integer, little-endian limbs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct BigInt([u64; 8]);

impl BigInt {
    const ZERO: BigInt = BigInt([0; 8]);

    const ONE: BigInt = BigInt([1, 0, 0, 0, 0, 0, 0, 0]);

    /// \\( \ell\^2 \\).
    const ELL_SQUARED: BigInt = BigInt([
        0xe2ed_f685_ab12_8969,
        0x6803_9276_2298_a31d,
        0x3dce_ec73_d217_f5be,
        0xa1b3_9941_1b7c_309a,
        0xcb02_4c63_4b9e_ba7d,
        0x029b_df3b_d45e_f39a,
        0x0000_0000_0000_0000,
        0x0100_0000_0000_0000,
    ]);

    fn is_negative(&self) -> bool {
        (self.0[7] as i64) < 0
    }

    /// Length in bits of the two's complement encoding, excluding the
    /// sign bit. Negative values are measured through their complement,
    /// so `-1` has length zero.
    fn bit_len(&self) -> usize {
        let fill = if self.is_negative() { u64::MAX } else { 0 };

        for i in (0..8).rev() {
            let w = self.0[i] ^ fill;
            if w != 0 {
                return (i + 1) * 64 - w.leading_zeros() as usize;
            }
        }
        0
    }

    /// The full 512-bit product of two scalars.
    fn mul(a: &Scalar, b: &Scalar) -> BigInt {
        let a = limbs(a);
        let b = limbs(b);

        let mut w = [0u64; 8];
        for i in 0..4 {
            let mut carry: u64 = 0;
            for j in 0..4 {
                let t = (w[i + j] as u128) + (a[i] as u128) * (b[j] as u128) + (carry as u128);
                w[i + j] = t as u64;
                carry = (t >> 64) as u64;
            }
            w[i + 4] = carry;
        }

        // Both factors are below 2^253.
        debug_assert_eq!(w[7] >> 57, 0);

        BigInt(w)
    }
}

fn limbs(s: &Scalar) -> [u64; 4] {
    let mut out = [0u64; 4];
    for (limb, chunk) in out.iter_mut().zip(s.as_bytes().chunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        *limb = u64::from_le_bytes(word);
    }
    out
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            // Same sign: two's complement order is unsigned limb order.
            _ => self.0.iter().rev().cmp(other.0.iter().rev()),
        }
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &BigInt) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl AddAssign for BigInt {
    fn add_assign(&mut self, rhs: BigInt) {
        let mut carry = false;
        for (x, y) in self.0.iter_mut().zip(rhs.0.iter()) {
            let (t, c0) = x.overflowing_add(*y);
            let (t, c1) = t.overflowing_add(carry as u64);
            *x = t;
            carry = c0 | c1;
        }
    }
}

impl Add for BigInt {
    type Output = BigInt;

    fn add(mut self, rhs: BigInt) -> BigInt {
        self += rhs;
        self
    }
}

impl SubAssign for BigInt {
    fn sub_assign(&mut self, rhs: BigInt) {
        let mut borrow = false;
        for (x, y) in self.0.iter_mut().zip(rhs.0.iter()) {
            let (t, b0) = x.overflowing_sub(*y);
            let (t, b1) = t.overflowing_sub(borrow as u64);
            *x = t;
            borrow = b0 | b1;
        }
    }
}

impl Sub for BigInt {
    type Output = BigInt;

    fn sub(mut self, rhs: BigInt) -> BigInt {
        self -= rhs;
        self
    }
}

impl Shl<usize> for BigInt {
    type Output = BigInt;

    /// Logical left shift; bits shifted past bit 511 are lost.
    fn shl(self, s: usize) -> BigInt {
        let words = s / 64;
        let bits = s % 64;

        let mut out = [0u64; 8];
        for i in words..8 {
            let src = i - words;
            out[i] = self.0[src] << bits;
            if bits > 0 && src > 0 {
                out[i] |= self.0[src - 1] >> (64 - bits);
            }
        }
        BigInt(out)
    }
}
