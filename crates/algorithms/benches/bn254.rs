//! Benchmarks for BN254 group operations and the pairing

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mpin_algorithms::ec::bn254::{
    ate, ate2, fexp, pairing, G1Affine, G1Projective, G2Affine, G2Projective, Gt, Scalar,
};
use rand_core::OsRng;

fn bench_g1(c: &mut Criterion) {
    let mut group = c.benchmark_group("bn254_g1");
    let p = G1Projective::random(&mut OsRng);
    let q = G1Projective::random(&mut OsRng);
    let e = Scalar::random(&mut OsRng);

    group.bench_function("add", |bench| bench.iter(|| black_box(p) + black_box(q)));
    group.bench_function("double", |bench| bench.iter(|| black_box(p).double()));
    group.bench_function("multiply", |bench| {
        bench.iter(|| black_box(p).multiply(black_box(&e)))
    });
    group.bench_function("pinmul", |bench| bench.iter(|| black_box(p).pinmul(1234, 14)));
    group.bench_function("to_affine", |bench| bench.iter(|| black_box(p).to_affine()));

    group.finish();
}

fn bench_g2(c: &mut Criterion) {
    let mut group = c.benchmark_group("bn254_g2");
    let p = G2Projective::random(&mut OsRng);
    let e = Scalar::random(&mut OsRng);

    group.bench_function("multiply", |bench| {
        bench.iter(|| black_box(p).multiply(black_box(&e)))
    });

    group.finish();
}

fn bench_pairing(c: &mut Criterion) {
    let mut group = c.benchmark_group("bn254_pairing");
    let p = G1Affine::from(G1Projective::random(&mut OsRng));
    let q = G2Affine::from(G2Projective::random(&mut OsRng));
    let s = G1Affine::from(G1Projective::random(&mut OsRng));
    let r = G2Affine::from(G2Projective::random(&mut OsRng));
    let m = ate(&q, &p);
    let g = Gt::random(&mut OsRng);
    let e = Scalar::random(&mut OsRng);

    group.bench_function("ate", |bench| bench.iter(|| ate(black_box(&q), black_box(&p))));
    group.bench_function("ate2", |bench| {
        bench.iter(|| ate2(black_box(&q), black_box(&p), black_box(&r), black_box(&s)))
    });
    group.bench_function("fexp", |bench| bench.iter(|| fexp(black_box(&m))));
    group.bench_function("pairing", |bench| {
        bench.iter(|| pairing(black_box(&q), black_box(&p)))
    });
    group.bench_function("gt_pow", |bench| bench.iter(|| black_box(g).pow(black_box(&e))));

    group.finish();
}

criterion_group!(benches, bench_g1, bench_g2, bench_pairing);
criterion_main!(benches);
