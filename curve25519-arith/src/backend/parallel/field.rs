// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

//! Four lanes of field elements, operated on together.
//!
//! A `FieldElementx4` holds \\( (a, b, c, d) \\) and every operation
//! applies lane by lane, so that a point operation reads as a short
//! program of shuffles, blends and one wide multiplication.  Each lane
//! is an ordinary serial `FieldElement`.

use core::ops::{Add, Mul, Neg};

use subtle::Choice;
use subtle::ConditionallySelectable;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::field::FieldElement;

/// Which lanes a `blend` takes from its second argument.
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug)]
pub(crate) enum Lanes {
    C,
    D,
    AB,
    AD,
    BC,
}

impl Lanes {
    #[inline(always)]
    fn mask(self) -> [bool; 4] {
        match self {
            Lanes::C => [false, false, true, false],
            Lanes::D => [false, false, false, true],
            Lanes::AB => [true, true, false, false],
            Lanes::AD => [true, false, false, true],
            Lanes::BC => [false, true, true, false],
        }
    }
}

/// Lane permutations, named by the source lane of each output lane.
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug)]
pub(crate) enum Shuffle {
    AAAA,
    BBBB,
    ABAB,
    BADC,
    BACD,
    ADDA,
    CBCB,
    ABDC,
    CACA,
    DBBD,
}

impl Shuffle {
    #[inline(always)]
    fn indices(self) -> [usize; 4] {
        match self {
            Shuffle::AAAA => [0, 0, 0, 0],
            Shuffle::BBBB => [1, 1, 1, 1],
            Shuffle::ABAB => [0, 1, 0, 1],
            Shuffle::BADC => [1, 0, 3, 2],
            Shuffle::BACD => [1, 0, 2, 3],
            Shuffle::ADDA => [0, 3, 3, 0],
            Shuffle::CBCB => [2, 1, 2, 1],
            Shuffle::ABDC => [0, 1, 3, 2],
            Shuffle::CACA => [2, 0, 2, 0],
            Shuffle::DBBD => [3, 1, 1, 3],
        }
    }
}

/// A vector of four field elements.
#[derive(Copy, Clone, Debug)]
pub(crate) struct FieldElementx4(pub(crate) [FieldElement; 4]);

#[cfg(feature = "zeroize")]
impl Zeroize for FieldElementx4 {
    fn zeroize(&mut self) {
        for lane in self.0.iter_mut() {
            lane.zeroize();
        }
    }
}

impl ConditionallySelectable for FieldElementx4 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        FieldElementx4([
            FieldElement::conditional_select(&a.0[0], &b.0[0], choice),
            FieldElement::conditional_select(&a.0[1], &b.0[1], choice),
            FieldElement::conditional_select(&a.0[2], &b.0[2], choice),
            FieldElement::conditional_select(&a.0[3], &b.0[3], choice),
        ])
    }

    fn conditional_assign(&mut self, other: &Self, choice: Choice) {
        for (lane, other) in self.0.iter_mut().zip(other.0.iter()) {
            lane.conditional_assign(other, choice);
        }
    }
}

impl FieldElementx4 {
    /// The vector \\( (0, 0, 0, 0) \\).
    pub(crate) const ZERO: FieldElementx4 = FieldElementx4([FieldElement::ZERO; 4]);

    /// Pack four field elements into lanes `(A, B, C, D)`.
    #[inline]
    pub(crate) fn new(
        x0: &FieldElement,
        x1: &FieldElement,
        x2: &FieldElement,
        x3: &FieldElement,
    ) -> FieldElementx4 {
        FieldElementx4([*x0, *x1, *x2, *x3])
    }

    /// Unpack the four lanes.
    #[inline]
    pub(crate) fn split(&self) -> [FieldElement; 4] {
        self.0
    }

    /// Rearrange the lanes according to `control`.
    #[inline]
    pub(crate) fn shuffle(&self, control: Shuffle) -> FieldElementx4 {
        let idx = control.indices();
        FieldElementx4([self.0[idx[0]], self.0[idx[1]], self.0[idx[2]], self.0[idx[3]]])
    }

    /// Take the lanes named by `control` from `other` and the rest
    /// from `self`.
    #[inline]
    pub(crate) fn blend(&self, other: FieldElementx4, control: Lanes) -> FieldElementx4 {
        let mask = control.mask();
        let mut out = *self;
        for i in 0..4 {
            if mask[i] {
                out.0[i] = other.0[i];
            }
        }
        out
    }

    /// Map \\( (a, b, c, d) \\) to \\( (b - a, b + a, d - c, d + c) \\).
    #[inline]
    pub(crate) fn diff_sum(&self) -> FieldElementx4 {
        let [a, b, c, d] = self.0;
        FieldElementx4([&b - &a, (&b + &a).weak_reduce(), &d - &c, (&d + &c).weak_reduce()])
    }

    /// Negate every lane.
    #[inline]
    pub(crate) fn negate_lazy(&self) -> FieldElementx4 {
        FieldElementx4([-&self.0[0], -&self.0[1], -&self.0[2], -&self.0[3]])
    }

    /// Square every lane and negate lane `D`.
    #[inline]
    #[allow(non_snake_case)]
    pub(crate) fn square_and_negate_D(&self) -> FieldElementx4 {
        let [a, b, c, d] = self.0;
        FieldElementx4([a.square(), b.square(), c.square(), -&d.square()])
    }

    /// Bring every lane back into the loose bound the multiplier expects.
    #[inline]
    pub(crate) fn reduce(&self) -> FieldElementx4 {
        FieldElementx4([
            self.0[0].weak_reduce(),
            self.0[1].weak_reduce(),
            self.0[2].weak_reduce(),
            self.0[3].weak_reduce(),
        ])
    }
}

impl Add<FieldElementx4> for FieldElementx4 {
    type Output = FieldElementx4;

    #[inline]
    fn add(self, rhs: FieldElementx4) -> FieldElementx4 {
        FieldElementx4([
            (&self.0[0] + &rhs.0[0]).weak_reduce(),
            (&self.0[1] + &rhs.0[1]).weak_reduce(),
            (&self.0[2] + &rhs.0[2]).weak_reduce(),
            (&self.0[3] + &rhs.0[3]).weak_reduce(),
        ])
    }
}

impl<'a, 'b> Mul<&'b FieldElementx4> for &'a FieldElementx4 {
    type Output = FieldElementx4;

    #[inline]
    fn mul(self, rhs: &'b FieldElementx4) -> FieldElementx4 {
        FieldElementx4([
            &self.0[0] * &rhs.0[0],
            &self.0[1] * &rhs.0[1],
            &self.0[2] * &rhs.0[2],
            &self.0[3] * &rhs.0[3],
        ])
    }
}

impl<'a> Neg for &'a FieldElementx4 {
    type Output = FieldElementx4;

    #[inline]
    fn neg(self) -> FieldElementx4 {
        self.negate_lazy()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn lanes(a: u64, b: u64, c: u64, d: u64) -> FieldElementx4 {
        let fe = |x: u64| {
            let mut bytes = [0u8; 32];
            bytes[..8].copy_from_slice(&x.to_le_bytes());
            FieldElement::from_bytes(&bytes)
        };
        FieldElementx4::new(&fe(a), &fe(b), &fe(c), &fe(d))
    }

    #[test]
    fn shuffle_and_blend_move_lanes() {
        let x = lanes(1, 2, 3, 4);
        let y = lanes(5, 6, 7, 8);

        assert_eq!(x.shuffle(Shuffle::DBBD).split(), lanes(4, 2, 2, 4).split());
        assert_eq!(x.shuffle(Shuffle::CACA).split(), lanes(3, 1, 3, 1).split());
        assert_eq!(x.blend(y, Lanes::AD).split(), lanes(5, 2, 3, 8).split());
        assert_eq!(x.blend(y, Lanes::BC).split(), lanes(1, 6, 7, 4).split());
    }

    #[test]
    fn diff_sum_pairs_lanes() {
        let x = lanes(1, 5, 2, 9);
        assert_eq!(x.diff_sum().split(), lanes(4, 6, 7, 11).split());
    }

    #[test]
    fn square_and_negate_d_negates_last_lane() {
        let x = lanes(2, 3, 4, 5);
        let y = x.square_and_negate_D().split();
        assert_eq!(y[..3], lanes(4, 9, 16, 0).split()[..3]);
        assert_eq!(y[3], -&lanes(0, 0, 0, 25).split()[3]);
    }

    #[test]
    fn mul_and_add_are_lanewise() {
        let x = lanes(2, 3, 4, 5);
        let y = lanes(7, 11, 13, 17);
        assert_eq!((&x * &y).split(), lanes(14, 33, 52, 85).split());
        assert_eq!((x + y).split(), lanes(9, 14, 17, 22).split());
    }
}
