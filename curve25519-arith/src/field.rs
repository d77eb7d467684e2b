// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

//! The prime field GF(p), \\(p = 2\^{255} - 19\\).
//!
//! Limb arithmetic (addition, multiplication, squaring, reduction and
//! the byte encoding) lives with the limb layouts under
//! `backend::serial::{u64,u32}`.  This module adds what is built from
//! those primitives: exponentiation chains, inversion, square roots and
//! the sign convention.

#![allow(unused_qualifications)]

use core::cmp::{Eq, PartialEq};

use cfg_if::cfg_if;

use subtle::{Choice, ConditionallyNegatable, ConditionallySelectable, ConstantTimeEq};

use crate::backend;
use crate::constants;

cfg_if! {
    if #[cfg(curve25519_arith_bits = "64")] {
        /// An element of GF(2^255 - 19) in five 51-bit limbs.
        pub(crate) type FieldElement = backend::serial::u64::field::FieldElement51;
    } else {
        /// An element of GF(2^255 - 19) in ten alternating 26/25-bit limbs.
        pub(crate) type FieldElement = backend::serial::u32::field::FieldElement2625;
    }
}

impl Eq for FieldElement {}

impl PartialEq for FieldElement {
    fn eq(&self, other: &FieldElement) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl ConstantTimeEq for FieldElement {
    /// Limbs are not unique, so both sides are compared through their
    /// canonical encodings.
    fn ct_eq(&self, other: &FieldElement) -> Choice {
        self.as_bytes().ct_eq(&other.as_bytes())
    }
}

impl FieldElement {
    /// The sign used by the point encodings: odd canonical values are
    /// negative.
    pub(crate) fn is_negative(&self) -> Choice {
        Choice::from(self.as_bytes()[0] & 1)
    }

    pub(crate) fn is_zero(&self) -> Choice {
        self.as_bytes().ct_eq(&[0u8; 32])
    }

    /// Returns `(self^(2^250 - 1), self^11)`, the shared prefix of the
    /// inversion and square-root exponents.
    fn pow_2_250_minus_1(&self) -> (FieldElement, FieldElement) {
        // `pN` holds self^(2^N - 1).
        let x2 = self.square();
        let x9 = self * &x2.pow2k(2);
        let x11 = &x9 * &x2;
        let p5 = &x11.square() * &x9;
        let p10 = &p5.pow2k(5) * &p5;
        let p20 = &p10.pow2k(10) * &p10;
        let p40 = &p20.pow2k(20) * &p20;
        let p50 = &p40.pow2k(10) * &p10;
        let p100 = &p50.pow2k(50) * &p50;
        let p200 = &p100.pow2k(100) * &p100;
        let p250 = &p200.pow2k(50) * &p50;

        (p250, x11)
    }

    /// Invert every nonzero entry of `inputs` in place with a single
    /// field inversion.  Zero entries stay zero.
    #[cfg(feature = "alloc")]
    pub(crate) fn batch_invert(inputs: &mut [FieldElement]) {
        // Prefix products, with each zero entry counted as one.
        let mut prefix = vec![FieldElement::ONE; inputs.len()];
        let mut running = FieldElement::ONE;
        for (x, slot) in inputs.iter().zip(prefix.iter_mut()) {
            *slot = running;
            let factor = FieldElement::conditional_select(x, &FieldElement::ONE, x.is_zero());
            running = &running * &factor;
        }

        debug_assert!(bool::from(!running.is_zero()));

        // `running` now holds the inverse of the product of every entry
        // not yet visited from the back.
        running = running.invert();
        for (x, before) in inputs.iter_mut().rev().zip(prefix.into_iter().rev()) {
            let zero = x.is_zero();
            let factor = FieldElement::conditional_select(x, &FieldElement::ONE, zero);
            let inverse = &running * &before;
            running = &running * &factor;
            x.conditional_assign(&inverse, !zero);
        }
    }

    /// Returns `self^(p - 2)`: the inverse for nonzero input, and zero
    /// for zero.
    pub(crate) fn invert(&self) -> FieldElement {
        // p - 2 = (2^250 - 1) * 2^5 + 11
        let (p250, x11) = self.pow_2_250_minus_1();
        &p250.pow2k(5) * &x11
    }

    /// Returns `self^((p - 5) / 8)`.
    fn pow_p58(&self) -> FieldElement {
        // (p - 5) / 8 = (2^250 - 1) * 2^2 + 1
        let (p250, _) = self.pow_2_250_minus_1();
        self * &p250.pow2k(2)
    }

    /// Compute the nonnegative `sqrt(u/v)` or, when `u/v` is not a
    /// square, the nonnegative `sqrt(i*u/v)`.  Constant time.
    ///
    /// | input                  | flag | root            |
    /// |------------------------|------|-----------------|
    /// | `u = 0`                | 1    | 0               |
    /// | `v = 0`, `u ≠ 0`       | 0    | 0               |
    /// | `u/v` a nonzero square | 1    | `+sqrt(u/v)`    |
    /// | `u/v` a nonsquare      | 0    | `+sqrt(i*u/v)`  |
    pub(crate) fn sqrt_ratio_i(u: &FieldElement, v: &FieldElement) -> (Choice, FieldElement) {
        // Candidate root r = u v^3 (u v^7)^((p-5)/8).  For square u/v,
        // v r^2 is u or -u; the second case is fixed by a factor of
        // sqrt(-1).  A nonsquare u/v gives v r^2 = -i u instead.
        let v3 = &v.square() * v;
        let v7 = &v3.square() * v;
        let mut root = &(u * &v3) * &(u * &v7).pow_p58();

        let v_root_sq = v * &root.square();
        let neg_u = -u;
        let found_root = v_root_sq.ct_eq(u);
        let found_neg_root = v_root_sq.ct_eq(&neg_u);
        let found_neg_i_root = v_root_sq.ct_eq(&(&neg_u * &constants::SQRT_M1));

        let rotated = &constants::SQRT_M1 * &root;
        root.conditional_assign(&rotated, found_neg_root | found_neg_i_root);

        let negative = root.is_negative();
        root.conditional_negate(negative);

        (found_root | found_neg_root, root)
    }

    /// `sqrt_ratio_i(1, self)`: the nonnegative `1/sqrt(self)`, with the
    /// flag clear when `self` is zero or a nonsquare.
    pub(crate) fn invsqrt(&self) -> (Choice, FieldElement) {
        FieldElement::sqrt_ratio_i(&FieldElement::ONE, self)
    }
}
