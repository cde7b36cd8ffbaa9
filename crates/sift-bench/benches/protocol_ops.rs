//! Criterion benchmarks for whole runs and the collectives they use.

use std::hint::black_box;
use std::thread;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use sift_bench::{profile_matrix, reference_profile};
use sift_comm::{ChannelComm, Communicator};
use sift_engine::run;

/// Benchmark: full reference run (10^7) at increasing worker counts.
fn bench_reference_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("reference_run");
    group.sample_size(10);
    for workers in [1, 2, 4, 8] {
        let cfg = reference_profile(workers);
        group.bench_with_input(BenchmarkId::from_parameter(workers), &cfg, |b, cfg| {
            b.iter(|| black_box(run(cfg).unwrap().prime_count));
        });
    }
    group.finish();
}

/// Benchmark: every protocol/layout pairing at 10^6 over 4 workers.
fn bench_protocol_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("protocol_matrix_1m_p4");
    group.sample_size(20);
    for (label, cfg) in profile_matrix(1_000_000, 4) {
        group.bench_function(label, |b| {
            b.iter(|| black_box(run(&cfg).unwrap().prime_count));
        });
    }
    group.finish();
}

/// Benchmark: 1000 broadcasts through a 4-worker channel world.
fn bench_broadcast_rounds(c: &mut Criterion) {
    c.bench_function("broadcast_1000_rounds_p4", |b| {
        b.iter(|| {
            let handles: Vec<_> = ChannelComm::world(4)
                .into_iter()
                .map(|comm| {
                    thread::spawn(move || {
                        let mut last = 0;
                        for round in 0..1000u64 {
                            last = comm.broadcast(round).unwrap();
                        }
                        last
                    })
                })
                .collect();
            for h in handles {
                black_box(h.join().unwrap());
            }
        });
    });
}

criterion_group!(
    benches,
    bench_reference_scaling,
    bench_protocol_matrix,
    bench_broadcast_rounds
);
criterion_main!(benches);
