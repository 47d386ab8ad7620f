//! Benchmarks for big-number and prime field arithmetic

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mpin_algorithms::bignum::Big;
use mpin_algorithms::field::{Bn254Modulus, FieldElement, FieldModulus, Gm252, Mf254, Pm255};
use rand_core::OsRng;

fn bench_big(c: &mut Criterion) {
    let mut group = c.benchmark_group("big");
    let p = Bn254Modulus::modulus();
    let a = Big::randomnum(&p, &mut OsRng);
    let b = Big::randomnum(&p, &mut OsRng);

    group.bench_function("mul", |bench| {
        bench.iter(|| Big::mul(black_box(&a), black_box(&b)))
    });

    group.bench_function("modmul", |bench| {
        bench.iter(|| Big::modmul(black_box(&a), black_box(&b), &p))
    });

    group.bench_function("invmodp", |bench| {
        bench.iter(|| {
            let mut t = black_box(a);
            t.invmodp(&p);
            t
        })
    });

    group.finish();
}

fn bench_field<M: FieldModulus>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("field_{}", M::NAME));
    let a = FieldElement::<M>::random(&mut OsRng);
    let b = FieldElement::<M>::random(&mut OsRng);

    group.bench_function("mul", |bench| {
        bench.iter(|| black_box(a) * black_box(b))
    });

    group.bench_function("square", |bench| {
        bench.iter(|| black_box(a).square())
    });

    group.bench_function("invert", |bench| {
        bench.iter(|| black_box(a).invert())
    });

    group.bench_function("sqrt", |bench| {
        bench.iter(|| black_box(a).sqrt())
    });

    group.finish();
}

fn bench_fields(c: &mut Criterion) {
    bench_field::<Bn254Modulus>(c);
    bench_field::<Pm255>(c);
    bench_field::<Mf254>(c);
    bench_field::<Gm252>(c);
}

criterion_group!(benches, bench_big, bench_fields);
criterion_main!(benches);
