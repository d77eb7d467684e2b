// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// See LICENSE for licensing information.

#![allow(non_snake_case)]

use rand::rngs::OsRng;
use rand::thread_rng;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

use curve25519_arith::constants;
use curve25519_arith::edwards::{EdwardsPoint, ExpandedEdwardsPoint};
use curve25519_arith::scalar::Scalar;

fn scalars(n: usize) -> Vec<Scalar> {
    let mut rng = thread_rng();
    (0..n).map(|_| Scalar::random(&mut rng)).collect()
}

fn points(n: usize) -> Vec<EdwardsPoint> {
    scalars(n).iter().map(EdwardsPoint::mul_base).collect()
}

mod double_base {
    use super::*;

    /// aA + bB with A in plain and in expanded form.
    fn double_base(c: &mut Criterion) {
        let A = points(1)[0];
        let A_expanded = ExpandedEdwardsPoint::new(&A);

        let mut group = c.benchmark_group("aA + bB");
        group.bench_function("plain", |bench| {
            bench.iter_batched(
                || (scalars(1)[0], scalars(1)[0]),
                |(a, b)| EdwardsPoint::vartime_double_scalar_mul_basepoint(&a, &A, &b),
                BatchSize::SmallInput,
            )
        });
        group.bench_function("expanded", |bench| {
            bench.iter_batched(
                || (scalars(1)[0], scalars(1)[0]),
                |(a, b)| ExpandedEdwardsPoint::vartime_double_scalar_mul_basepoint(&a, &A_expanded, &b),
                BatchSize::SmallInput,
            )
        });
        group.finish();
    }

    /// The aA + bB = C check, whose inputs are all public.
    fn triple_base(c: &mut Criterion) {
        let A = points(1)[0];
        let A_expanded = ExpandedEdwardsPoint::new(&A);
        let instance = || {
            let ab = scalars(2);
            let C = EdwardsPoint::vartime_double_scalar_mul_basepoint(&ab[0], &A, &ab[1]);
            (ab[0], ab[1], C)
        };

        let mut group = c.benchmark_group("aA + bB == C");
        group.bench_function("plain", |bench| {
            bench.iter_batched(
                instance,
                |(a, b, C)| EdwardsPoint::vartime_triple_scalar_mul_basepoint(&a, &A, &b, &C),
                BatchSize::SmallInput,
            )
        });
        group.bench_function("expanded", |bench| {
            bench.iter_batched(
                instance,
                |(a, b, C)| {
                    ExpandedEdwardsPoint::vartime_triple_scalar_mul_basepoint(&a, &A_expanded, &b, &C)
                },
                BatchSize::SmallInput,
            )
        });
        group.finish();
    }

    criterion_group!(benches, double_base, triple_base);
}

mod multiscalar {
    use super::*;

    use curve25519_arith::traits::VartimeMultiscalarMul;

    // Straddles the switch from Straus to Pippenger.
    const SIZES: [usize; 7] = [8, 32, 128, 190, 256, 512, 1024];

    fn dynamic_only(c: &mut Criterion) {
        let mut group = c.benchmark_group("vartime multiscalar");
        for &n in SIZES.iter() {
            let P = points(n);
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, &n| {
                bench.iter_batched(
                    || scalars(n),
                    |s| EdwardsPoint::vartime_multiscalar_mul(&s, &P),
                    BatchSize::SmallInput,
                )
            });
        }
        group.finish();
    }

    /// Mixed sums where `percent_dynamic` of the terms have no expansion.
    fn mixed(c: &mut Criterion, percent_dynamic: usize) {
        let mut group = c.benchmark_group(format!("vartime mixed, {}% dynamic", percent_dynamic));
        for &n in SIZES.iter() {
            let dynamic = n * percent_dynamic / 100;
            let expanded: Vec<ExpandedEdwardsPoint> =
                points(n - dynamic).iter().map(ExpandedEdwardsPoint::new).collect();
            let plain = points(dynamic);

            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, &n| {
                bench.iter_batched(
                    || (scalars(n - dynamic), scalars(dynamic)),
                    |(a, b)| {
                        ExpandedEdwardsPoint::vartime_mixed_multiscalar_mul(&a, &expanded, &b, &plain)
                    },
                    BatchSize::SmallInput,
                )
            });
        }
        group.finish();
    }

    fn mixed_all_expanded(c: &mut Criterion) {
        mixed(c, 0);
    }

    fn mixed_quarter_dynamic(c: &mut Criterion) {
        mixed(c, 25);
    }

    criterion_group! {
        name = benches;
        config = Criterion::default().sample_size(15);
        targets = dynamic_only, mixed_all_expanded, mixed_quarter_dynamic,
    }
}

mod ristretto {
    use super::*;

    use curve25519_arith::ristretto::RistrettoPoint;

    fn from_uniform_bytes(c: &mut Criterion) {
        c.bench_function("ristretto from 64 uniform bytes", |bench| {
            bench.iter_batched(
                || {
                    let mut bytes = [0u8; 64];
                    rand::RngCore::fill_bytes(&mut OsRng, &mut bytes);
                    bytes
                },
                |bytes| RistrettoPoint::from_uniform_bytes(&bytes),
                BatchSize::SmallInput,
            )
        });
    }

    fn batch_double_and_compress(c: &mut Criterion) {
        let mut group = c.benchmark_group("ristretto batch double-and-compress");
        for n in [1usize, 4, 16, 64] {
            let P: Vec<RistrettoPoint> = (0..n).map(|_| RistrettoPoint::random(&mut OsRng)).collect();
            group.bench_with_input(BenchmarkId::from_parameter(n), &P, |bench, P| {
                bench.iter(|| RistrettoPoint::double_and_compress_batch(P))
            });
        }
        group.finish();
    }

    criterion_group!(benches, from_uniform_bytes, batch_double_and_compress);
}

mod montgomery {
    use super::*;

    use curve25519_arith::montgomery::MontgomeryPoint;

    /// Fixed-base multiplication through the Edwards table against the
    /// ladder on the same basepoint.
    fn fixed_base(c: &mut Criterion) {
        let k = scalars(1)[0];
        let mut group = c.benchmark_group("montgomery k * basepoint");
        group.bench_function("edwards table", |bench| {
            bench.iter(|| MontgomeryPoint::mul_base(&k))
        });
        group.bench_function("ladder", |bench| {
            bench.iter(|| constants::X25519_BASEPOINT * k)
        });
        group.finish();
    }

    criterion_group!(benches, fixed_base);
}

criterion_main!(
    double_base::benches,
    multiscalar::benches,
    ristretto::benches,
    montgomery::benches,
);
