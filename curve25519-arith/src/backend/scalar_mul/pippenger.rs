// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

//! Bucket-method multiscalar multiplication for large inputs.

#![allow(non_snake_case)]

use alloc::vec::Vec;

use core::borrow::Borrow;

use crate::backend::CurveBackend;
use crate::edwards::EdwardsPoint;
use crate::scalar::Scalar;
use crate::traits::Identity;

/// Variable-time \\( \sum_i s_i P_i \\) by Pippenger's bucket method
/// (section 4 of <https://eprint.iacr.org/2012/549.pdf>).
///
/// Each scalar is recoded into signed radix-\\( 2^w \\) digits.  Working
/// from the most significant digit position down, every point is dropped
/// into the bucket for its digit's magnitude, negated if the digit is
/// negative.  The buckets are then weighted by their index with a running
/// suffix sum, which costs two additions per bucket instead of a
/// multiplication, and the column result is folded into the total after
/// `w` doublings.
///
/// Per column the cost is about \\( n \\) additions for the sorting plus
/// \\( 2^w \\) for the weighting, so `w` grows slowly with `n`; see
/// [`window_width`].
///
/// `None` if any point is `None`.
pub(crate) fn optional_multiscalar_mul<B, I, J>(scalars: I, points: J) -> Option<EdwardsPoint>
where
    B: CurveBackend,
    I: IntoIterator,
    I::Item: Borrow<Scalar>,
    J: IntoIterator<Item = Option<EdwardsPoint>>,
{
    let scalars = scalars.into_iter();
    let w = window_width(scalars.size_hint().0);
    let columns = Scalar::to_radix_2w_size_hint(w);

    // Every column scans all terms, so recode and prepare them once.
    let terms = scalars
        .zip(points)
        .map(|(s, P)| Some((s.borrow().as_radix_2w(w), B::to_cached(&B::from_edwards(&P?)))))
        .collect::<Option<Vec<_>>>()?;

    // Digit magnitudes run up to 2^(w-1); bucket k holds the terms with
    // magnitude k + 1.
    let mut buckets = vec![B::Point::identity(); 1 << (w - 1)];

    let mut total = B::Point::identity();
    for column in (0..columns).rev() {
        total = B::mul_by_pow_2(&total, w as u32);

        buckets.iter_mut().for_each(|b| *b = B::Point::identity());
        for (digits, P) in &terms {
            let digit = i16::from(digits[column]);
            if digit > 0 {
                let k = (digit - 1) as usize;
                buckets[k] = B::add_cached(&buckets[k], P);
            } else if digit < 0 {
                let k = (-digit - 1) as usize;
                buckets[k] = B::sub_cached(&buckets[k], P);
            }
        }

        total = B::add_cached(&total, &B::to_cached(&weighted_sum::<B>(&buckets)));
    }

    Some(B::to_edwards(&total))
}

/// \\( \sum_k (k + 1) \cdot \text{buckets}_k \\) using suffix sums:
/// the running sum from the top bucket down is added into the result once
/// per bucket.
fn weighted_sum<B: CurveBackend>(buckets: &[B::Point]) -> B::Point {
    let mut suffix = B::Point::identity();
    let mut sum = B::Point::identity();
    for bucket in buckets.iter().rev() {
        suffix = B::add_cached(&suffix, &B::to_cached(bucket));
        sum = B::add_cached(&sum, &B::to_cached(&suffix));
    }
    sum
}

/// Digit width in bits for `size` terms.
///
/// Wider digits mean fewer point additions but exponentially more
/// buckets to combine.
fn window_width(size: usize) -> usize {
    match size {
        0..=499 => 6,
        500..=799 => 7,
        _ => 8,
    }
}
