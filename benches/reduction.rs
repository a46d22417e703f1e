use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cull::{
    correlation_matrix, decompose, kernel_matrix, reduce, KernelConfig, ReductionConfig,
    SampleMatrix,
};
use rand::prelude::*;

/// `n` samples of `m` objectives built from `k` latent factors plus noise, so
/// the objectives form roughly `k` correlated blocks.
fn latent_samples(rng: &mut StdRng, n: usize, m: usize, k: usize) -> SampleMatrix {
    let rows: Vec<Vec<f64>> = (0..n)
        .map(|_| {
            let factors: Vec<f64> = (0..k).map(|_| rng.random::<f64>()).collect();
            (0..m)
                .map(|j| factors[j % k] + 0.1 * rng.random::<f64>())
                .collect()
        })
        .collect();
    SampleMatrix::try_new(&rows).unwrap()
}

fn bench_reduction(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduction");
    let mut rng = StdRng::seed_from_u64(42);

    let samples = latent_samples(&mut rng, 500, 20, 4);
    let corr = correlation_matrix(&samples).unwrap();

    group.bench_function("correlation_n500_m20", |b| {
        b.iter(|| correlation_matrix(black_box(&samples)).unwrap())
    });

    group.bench_function("rbf_kernel_n500_m20", |b| {
        let config = KernelConfig::default();
        b.iter(|| kernel_matrix(black_box(&samples), &config).unwrap())
    });

    group.bench_function("jacobi_m20", |b| {
        b.iter(|| decompose(black_box(&corr)).unwrap())
    });

    let config = ReductionConfig::default();
    group.bench_function("reduce_n500_m20", |b| {
        b.iter(|| reduce(black_box(&samples), &config).unwrap())
    });

    // Wide case: tens of objectives, as in many-objective benchmarks.
    let wide = latent_samples(&mut rng, 200, 50, 5);
    group.bench_function("reduce_n200_m50", |b| {
        b.iter(|| reduce(black_box(&wide), &config).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_reduction);
criterion_main!(benches);
