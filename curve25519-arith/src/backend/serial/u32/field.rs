// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

//! Field arithmetic modulo \\(p = 2\^{255} - 19\\), using \\(32\\)-bit
//! limbs with \\(64\\)-bit products.

use core::fmt::Debug;
use core::ops::Neg;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Sub, SubAssign};

use subtle::Choice;
use subtle::ConditionallySelectable;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// A `FieldElement2625` represents an element of the field
/// \\( \mathbb Z / (2\^{255} - 19)\\).
///
/// In the 32-bit implementation, a `FieldElement` is represented in
/// radix \\(2\^{25.5}\\) as ten `u32`s:
/// $$
/// x = \sum\_{i=0}\^9 x\_i 2\^{\lceil i \frac {51} 2 \rceil}
///   = x\_0 + x\_1 2\^{26} + x\_2 2\^{51} + x\_3 2\^{77} + \cdots + x\_9 2\^{230};
/// $$
/// the coefficients are alternately bounded by \\(2\^{26}\\) and
/// \\(2\^{25}\\), and may grow up to \\(2\^{26+b}\\) or \\(2\^{25+b}\\)
/// with \\(b = 1.75\\) between reductions.
#[derive(Copy, Clone)]
pub(crate) struct FieldElement2625(pub(crate) [u32; 10]);

const LOW_25_BITS: u64 = (1 << 25) - 1;
const LOW_26_BITS: u64 = (1 << 26) - 1;

/// \\(16p\\), limb by limb.
const SIXTEEN_P: [u32; 10] = [
    0x3ffffed << 4,
    0x1ffffff << 4,
    0x3ffffff << 4,
    0x1ffffff << 4,
    0x3ffffff << 4,
    0x1ffffff << 4,
    0x3ffffff << 4,
    0x1ffffff << 4,
    0x3ffffff << 4,
    0x1ffffff << 4,
];

impl Debug for FieldElement2625 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FieldElement2625({:?})", &self.0[..])
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for FieldElement2625 {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<'b> AddAssign<&'b FieldElement2625> for FieldElement2625 {
    fn add_assign(&mut self, rhs: &'b FieldElement2625) {
        for (lhs, rhs) in self.0.iter_mut().zip(rhs.0.iter()) {
            *lhs += *rhs;
        }
    }
}

impl<'a, 'b> Add<&'b FieldElement2625> for &'a FieldElement2625 {
    type Output = FieldElement2625;
    fn add(self, rhs: &'b FieldElement2625) -> FieldElement2625 {
        let mut output = *self;
        output += rhs;
        output
    }
}

impl<'b> SubAssign<&'b FieldElement2625> for FieldElement2625 {
    fn sub_assign(&mut self, rhs: &'b FieldElement2625) {
        let result = &*self - rhs;
        self.0 = result.0;
    }
}

impl<'a, 'b> Sub<&'b FieldElement2625> for &'a FieldElement2625 {
    type Output = FieldElement2625;
    fn sub(self, rhs: &'b FieldElement2625) -> FieldElement2625 {
        // Compute a - b as ((a + 2^4 * p) - b) to avoid underflow.
        let mut z = [0u64; 10];
        for i in 0..10 {
            z[i] = ((self.0[i] + SIXTEEN_P[i]) - rhs.0[i]) as u64;
        }
        FieldElement2625::reduce(z)
    }
}

impl<'b> MulAssign<&'b FieldElement2625> for FieldElement2625 {
    fn mul_assign(&mut self, rhs: &'b FieldElement2625) {
        let result = &*self * rhs;
        self.0 = result.0;
    }
}

/// Helper function to multiply two 32-bit integers with 64 bits
/// of output.
#[inline(always)]
fn m(x: u32, y: u32) -> u64 {
    (x as u64) * (y as u64)
}

impl<'a, 'b> Mul<&'b FieldElement2625> for &'a FieldElement2625 {
    type Output = FieldElement2625;

    #[rustfmt::skip] // keep alignment of z* calculations
    fn mul(self, rhs: &'b FieldElement2625) -> FieldElement2625 {
        let x: &[u32; 10] = &self.0;
        let y: &[u32; 10] = &rhs.0;

        // Products of two odd-indexed limbs land half a bit too low in the
        // radix-2^25.5 layout, so one factor of each such pair is doubled.
        // Columns past 2^255 wrap around with a factor of 19.

        let y1_19 = 19 * y[1];
        let y2_19 = 19 * y[2];
        let y3_19 = 19 * y[3];
        let y4_19 = 19 * y[4];
        let y5_19 = 19 * y[5];
        let y6_19 = 19 * y[6];
        let y7_19 = 19 * y[7];
        let y8_19 = 19 * y[8];
        let y9_19 = 19 * y[9];

        let x1_2 = 2 * x[1];
        let x3_2 = 2 * x[3];
        let x5_2 = 2 * x[5];
        let x7_2 = 2 * x[7];
        let x9_2 = 2 * x[9];

        let z0 = m(x[0], y[0]) + m(x1_2, y9_19) + m(x[2], y8_19) + m(x3_2, y7_19) + m(x[4], y6_19) + m(x5_2, y5_19) + m(x[6], y4_19) + m(x7_2, y3_19) + m(x[8], y2_19) + m(x9_2, y1_19);
        let z1 = m(x[0], y[1]) + m(x[1],  y[0]) + m(x[2], y9_19) + m(x[3], y8_19) + m(x[4], y7_19) + m(x[5], y6_19) + m(x[6], y5_19) + m(x[7], y4_19) + m(x[8], y3_19) + m(x[9], y2_19);
        let z2 = m(x[0], y[2]) + m(x1_2,  y[1]) + m(x[2],  y[0]) + m(x3_2, y9_19) + m(x[4], y8_19) + m(x5_2, y7_19) + m(x[6], y6_19) + m(x7_2, y5_19) + m(x[8], y4_19) + m(x9_2, y3_19);
        let z3 = m(x[0], y[3]) + m(x[1],  y[2]) + m(x[2],  y[1]) + m(x[3],  y[0]) + m(x[4], y9_19) + m(x[5], y8_19) + m(x[6], y7_19) + m(x[7], y6_19) + m(x[8], y5_19) + m(x[9], y4_19);
        let z4 = m(x[0], y[4]) + m(x1_2,  y[3]) + m(x[2],  y[2]) + m(x3_2,  y[1]) + m(x[4],  y[0]) + m(x5_2, y9_19) + m(x[6], y8_19) + m(x7_2, y7_19) + m(x[8], y6_19) + m(x9_2, y5_19);
        let z5 = m(x[0], y[5]) + m(x[1],  y[4]) + m(x[2],  y[3]) + m(x[3],  y[2]) + m(x[4],  y[1]) + m(x[5],  y[0]) + m(x[6], y9_19) + m(x[7], y8_19) + m(x[8], y7_19) + m(x[9], y6_19);
        let z6 = m(x[0], y[6]) + m(x1_2,  y[5]) + m(x[2],  y[4]) + m(x3_2,  y[3]) + m(x[4],  y[2]) + m(x5_2,  y[1]) + m(x[6],  y[0]) + m(x7_2, y9_19) + m(x[8], y8_19) + m(x9_2, y7_19);
        let z7 = m(x[0], y[7]) + m(x[1],  y[6]) + m(x[2],  y[5]) + m(x[3],  y[4]) + m(x[4],  y[3]) + m(x[5],  y[2]) + m(x[6],  y[1]) + m(x[7],  y[0]) + m(x[8], y9_19) + m(x[9], y8_19);
        let z8 = m(x[0], y[8]) + m(x1_2,  y[7]) + m(x[2],  y[6]) + m(x3_2,  y[5]) + m(x[4],  y[4]) + m(x5_2,  y[3]) + m(x[6],  y[2]) + m(x7_2,  y[1]) + m(x[8],  y[0]) + m(x9_2, y9_19);
        let z9 = m(x[0], y[9]) + m(x[1],  y[8]) + m(x[2],  y[7]) + m(x[3],  y[6]) + m(x[4],  y[5]) + m(x[5],  y[4]) + m(x[6],  y[3]) + m(x[7],  y[2]) + m(x[8],  y[1]) + m(x[9],  y[0]);

        FieldElement2625::reduce([z0, z1, z2, z3, z4, z5, z6, z7, z8, z9])
    }
}

impl<'a> Neg for &'a FieldElement2625 {
    type Output = FieldElement2625;
    fn neg(self) -> FieldElement2625 {
        let mut output = *self;
        output.negate();
        output
    }
}

impl ConditionallySelectable for FieldElement2625 {
    fn conditional_select(
        a: &FieldElement2625,
        b: &FieldElement2625,
        choice: Choice,
    ) -> FieldElement2625 {
        let mut limbs = [0u32; 10];
        for i in 0..10 {
            limbs[i] = u32::conditional_select(&a.0[i], &b.0[i], choice);
        }
        FieldElement2625(limbs)
    }

    fn conditional_assign(&mut self, other: &FieldElement2625, choice: Choice) {
        for i in 0..10 {
            self.0[i].conditional_assign(&other.0[i], choice);
        }
    }

    fn conditional_swap(a: &mut FieldElement2625, b: &mut FieldElement2625, choice: Choice) {
        for i in 0..10 {
            u32::conditional_swap(&mut a.0[i], &mut b.0[i], choice);
        }
    }
}

impl FieldElement2625 {
    pub(crate) const fn from_limbs(limbs: [u32; 10]) -> FieldElement2625 {
        FieldElement2625(limbs)
    }

    /// The scalar \\( 0 \\).
    pub(crate) const ZERO: FieldElement2625 = FieldElement2625::from_limbs([0; 10]);
    /// The scalar \\( 1 \\).
    pub(crate) const ONE: FieldElement2625 =
        FieldElement2625::from_limbs([1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    /// The scalar \\( -1 \\).
    pub(crate) const MINUS_ONE: FieldElement2625 = FieldElement2625::from_limbs([
        0x3ffffec, 0x1ffffff, 0x3ffffff, 0x1ffffff, 0x3ffffff, 0x1ffffff, 0x3ffffff, 0x1ffffff,
        0x3ffffff, 0x1ffffff,
    ]);

    /// Invert the sign of this field element
    pub(crate) fn negate(&mut self) {
        // Compute -b as ((2^4 * p) - b) to avoid underflow.
        let mut z = [0u64; 10];
        for i in 0..10 {
            z[i] = (SIXTEEN_P[i] - self.0[i]) as u64;
        }
        self.0 = FieldElement2625::reduce(z).0;
    }

    /// Carry the limbs once, bringing their excess back under \\(0.007\\) bits.
    pub(crate) fn weak_reduce(&self) -> FieldElement2625 {
        let mut z = [0u64; 10];
        for (wide, limb) in z.iter_mut().zip(self.0.iter()) {
            *wide = *limb as u64;
        }
        FieldElement2625::reduce(z)
    }

    /// Given `k > 0`, return `self^(2^k)`.
    pub(crate) fn pow2k(&self, k: u32) -> FieldElement2625 {
        debug_assert!(k > 0);
        let mut z = self.square();
        for _ in 1..k {
            z = z.square();
        }
        z
    }

    /// Given unreduced coefficients `z[0], ..., z[9]` of any size,
    /// carry and reduce them mod p to obtain a `FieldElement2625`
    /// whose coefficients have excess `b < 0.007`.
    #[rustfmt::skip] // keep alignment of carry chain
    fn reduce(mut z: [u64; 10]) -> FieldElement2625 {
        /// Carry the value from limb i = 0..8 to limb i+1
        #[inline(always)]
        fn carry(z: &mut [u64; 10], i: usize) {
            debug_assert!(i < 9);
            if i % 2 == 0 {
                // Even limbs have 26 bits
                z[i + 1] += z[i] >> 26;
                z[i] &= LOW_26_BITS;
            } else {
                // Odd limbs have 25 bits
                z[i + 1] += z[i] >> 25;
                z[i] &= LOW_25_BITS;
            }
        }

        // Perform two halves of the carry chain in parallel.
        carry(&mut z, 0); carry(&mut z, 4);
        carry(&mut z, 1); carry(&mut z, 5);
        carry(&mut z, 2); carry(&mut z, 6);
        carry(&mut z, 3); carry(&mut z, 7);
        // z[4] < 2^26 + 2^39 after the first pass
        carry(&mut z, 4); carry(&mut z, 8);
        // z[4] < 2^26 and z[5] < 2^25.0004

        // Last carry has a multiplication by 19:
        z[0] += 19 * (z[9] >> 25);
        z[9] &= LOW_25_BITS;

        // z[0] + 19*c < 2^43.249
        carry(&mut z, 0);
        // z[1] < 2^25.007

        let mut out = [0u32; 10];
        for (limb, wide) in out.iter_mut().zip(z.iter()) {
            *limb = *wide as u32;
        }
        FieldElement2625(out)
    }

    /// Load a `FieldElement2625` from the low 255 bits of a 256-bit
    /// input.
    ///
    /// # Warning
    ///
    /// This function does not check that the input used the canonical
    /// representative.  It masks the high bit, but it will happily
    /// decode 2^255 - 18 to 1.
    #[rustfmt::skip] // keep alignment of h[*] values
    pub(crate) fn from_bytes(data: &[u8; 32]) -> FieldElement2625 {
        #[inline]
        fn load3(b: &[u8]) -> u64 {
            (b[0] as u64) | ((b[1] as u64) << 8) | ((b[2] as u64) << 16)
        }

        #[inline]
        fn load4(b: &[u8]) -> u64 {
            (b[0] as u64) | ((b[1] as u64) << 8) | ((b[2] as u64) << 16) | ((b[3] as u64) << 24)
        }

        const LOW_23_BITS: u64 = (1 << 23) - 1;

        let mut h = [0u64; 10];
        h[0] =  load4(&data[ 0..]);
        h[1] =  load3(&data[ 4..]) << 6;
        h[2] =  load3(&data[ 7..]) << 5;
        h[3] =  load3(&data[10..]) << 3;
        h[4] =  load3(&data[13..]) << 2;
        h[5] =  load4(&data[16..]);
        h[6] =  load3(&data[20..]) << 7;
        h[7] =  load3(&data[23..]) << 5;
        h[8] =  load3(&data[26..]) << 4;
        h[9] = (load3(&data[29..]) & LOW_23_BITS) << 2;

        FieldElement2625::reduce(h)
    }

    /// Serialize this `FieldElement2625` to a 32-byte array.  The
    /// encoding is canonical.
    #[rustfmt::skip] // keep alignment of s[*] calculations
    #[allow(clippy::identity_op)]
    pub(crate) fn as_bytes(&self) -> [u8; 32] {
        // Reduce the value represented by the limbs to the range [0,2*p)
        let mut h: [u32; 10] = self.weak_reduce().0;

        // h >= p exactly when h + 19 carries into bit 255, so q is that carry.
        let mut q: u32 = (h[0] + 19) >> 26;
        q = (h[1] + q) >> 25;
        q = (h[2] + q) >> 26;
        q = (h[3] + q) >> 25;
        q = (h[4] + q) >> 26;
        q = (h[5] + q) >> 25;
        q = (h[6] + q) >> 26;
        q = (h[7] + q) >> 25;
        q = (h[8] + q) >> 26;
        q = (h[9] + q) >> 25;

        debug_assert!(q == 0 || q == 1);

        // r = h - pq = h + 19q - 2^255q
        const LOW_25: u32 = (1 << 25) - 1;
        const LOW_26: u32 = (1 << 26) - 1;

        h[0] += 19 * q;

        h[1] += h[0] >> 26;
        h[0] &= LOW_26;
        h[2] += h[1] >> 25;
        h[1] &= LOW_25;
        h[3] += h[2] >> 26;
        h[2] &= LOW_26;
        h[4] += h[3] >> 25;
        h[3] &= LOW_25;
        h[5] += h[4] >> 26;
        h[4] &= LOW_26;
        h[6] += h[5] >> 25;
        h[5] &= LOW_25;
        h[7] += h[6] >> 26;
        h[6] &= LOW_26;
        h[8] += h[7] >> 25;
        h[7] &= LOW_25;
        h[9] += h[8] >> 26;
        h[8] &= LOW_26;

        // Discard the 2^255q carry out of the top limb.
        debug_assert!((h[9] >> 25) == 0 || (h[9] >> 25) == 1);
        h[9] &= LOW_25;

        let mut s = [0u8; 32];
        s[ 0] =  (h[0] >>  0)                as u8;
        s[ 1] =  (h[0] >>  8)                as u8;
        s[ 2] =  (h[0] >> 16)                as u8;
        s[ 3] = ((h[0] >> 24) | (h[1] << 2)) as u8;
        s[ 4] =  (h[1] >>  6)                as u8;
        s[ 5] =  (h[1] >> 14)                as u8;
        s[ 6] = ((h[1] >> 22) | (h[2] << 3)) as u8;
        s[ 7] =  (h[2] >>  5)                as u8;
        s[ 8] =  (h[2] >> 13)                as u8;
        s[ 9] = ((h[2] >> 21) | (h[3] << 5)) as u8;
        s[10] =  (h[3] >>  3)                as u8;
        s[11] =  (h[3] >> 11)                as u8;
        s[12] = ((h[3] >> 19) | (h[4] << 6)) as u8;
        s[13] =  (h[4] >>  2)                as u8;
        s[14] =  (h[4] >> 10)                as u8;
        s[15] =  (h[4] >> 18)                as u8;
        s[16] =  (h[5] >>  0)                as u8;
        s[17] =  (h[5] >>  8)                as u8;
        s[18] =  (h[5] >> 16)                as u8;
        s[19] = ((h[5] >> 24) | (h[6] << 1)) as u8;
        s[20] =  (h[6] >>  7)                as u8;
        s[21] =  (h[6] >> 15)                as u8;
        s[22] = ((h[6] >> 23) | (h[7] << 3)) as u8;
        s[23] =  (h[7] >>  5)                as u8;
        s[24] =  (h[7] >> 13)                as u8;
        s[25] = ((h[7] >> 21) | (h[8] << 4)) as u8;
        s[26] =  (h[8] >>  4)                as u8;
        s[27] =  (h[8] >> 12)                as u8;
        s[28] = ((h[8] >> 20) | (h[9] << 6)) as u8;
        s[29] =  (h[9] >>  2)                as u8;
        s[30] =  (h[9] >> 10)                as u8;
        s[31] =  (h[9] >> 18)                as u8;

        // Check that high bit is cleared
        debug_assert!((s[31] & 0b1000_0000u8) == 0u8);

        s
    }

    #[rustfmt::skip] // keep alignment of z* calculations
    fn square_inner(&self) -> [u64; 10] {
        // Same column structure as multiplication, with the symmetric
        // cross terms merged.
        let x = &self.0;
        let x0_2  =  2 * x[0];
        let x1_2  =  2 * x[1];
        let x2_2  =  2 * x[2];
        let x3_2  =  2 * x[3];
        let x4_2  =  2 * x[4];
        let x5_2  =  2 * x[5];
        let x6_2  =  2 * x[6];
        let x7_2  =  2 * x[7];
        let x5_19 = 19 * x[5];
        let x6_19 = 19 * x[6];
        let x7_19 = 19 * x[7];
        let x8_19 = 19 * x[8];
        let x9_19 = 19 * x[9];

        // A 32-bit multiplication by 38 would leave under one bit of
        // headroom, so the doubling is done on the 64-bit products instead.
        let mut z = [0u64; 10];
        z[0] = m(x[0], x[0]) + m(x2_2, x8_19) + m(x4_2, x6_19) + (m(x1_2, x9_19) +  m(x3_2, x7_19) + m(x[5], x5_19)) * 2;
        z[1] = m(x0_2, x[1]) + m(x3_2, x8_19) + m(x5_2, x6_19) + (m(x[2], x9_19) +  m(x[4], x7_19)                 ) * 2;
        z[2] = m(x0_2, x[2]) + m(x1_2,  x[1]) + m(x4_2, x8_19) +  m(x[6], x6_19) + (m(x3_2, x9_19) + m(x5_2, x7_19)) * 2;
        z[3] = m(x0_2, x[3]) + m(x1_2,  x[2]) + m(x5_2, x8_19) + (m(x[4], x9_19) +  m(x[6], x7_19)                 ) * 2;
        z[4] = m(x0_2, x[4]) + m(x1_2,  x3_2) + m(x[2],  x[2]) +  m(x6_2, x8_19) + (m(x5_2, x9_19) + m(x[7], x7_19)) * 2;
        z[5] = m(x0_2, x[5]) + m(x1_2,  x[4]) + m(x2_2,  x[3]) +  m(x7_2, x8_19) +  m(x[6], x9_19)                   * 2;
        z[6] = m(x0_2, x[6]) + m(x1_2,  x5_2) + m(x2_2,  x[4]) +  m(x3_2,  x[3]) +  m(x[8], x8_19) + m(x7_2, x9_19)  * 2;
        z[7] = m(x0_2, x[7]) + m(x1_2,  x[6]) + m(x2_2,  x[5]) +  m(x3_2,  x[4]) +  m(x[8], x9_19)                   * 2;
        z[8] = m(x0_2, x[8]) + m(x1_2,  x7_2) + m(x2_2,  x[6]) +  m(x3_2,  x5_2) +  m(x[4],  x[4]) + m(x[9], x9_19)  * 2;
        z[9] = m(x0_2, x[9]) + m(x1_2,  x[8]) + m(x2_2,  x[7]) +  m(x3_2,  x[6]) +  m(x4_2,  x[5])                      ;

        z
    }

    /// Compute `self^2`.
    pub(crate) fn square(&self) -> FieldElement2625 {
        FieldElement2625::reduce(self.square_inner())
    }

    /// Compute `2*self^2`.
    pub(crate) fn square2(&self) -> FieldElement2625 {
        let mut coeffs = self.square_inner();
        for coeff in &mut coeffs {
            *coeff += *coeff;
        }
        FieldElement2625::reduce(coeffs)
    }
}
