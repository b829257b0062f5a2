//! Slate Quote Benchmarks
//!
//! - Single quote through the engine boundary
//! - Production packages of increasing length
//! - Rate card fingerprinting

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal_macros::dec;
use slate_common::{BugReward, PhaseRequest, QuoteRequest, RateCard, ResourceRequirements};
use slate_quote::QuoteEngine;

fn busy_requirements() -> ResourceRequirements {
    ResourceRequirements::default()
        .with_owner_seats(4)
        .with_collaborative_seats(30)
        .with_active_projects(12)
        .with_project_seats(8, 14)
        .with_storage(dec!(42.5), dec!(120))
        .with_bandwidth(dec!(18250))
}

fn bench_single_quote(c: &mut Criterion) {
    let engine = QuoteEngine::default();
    let request = QuoteRequest::new("studio")
        .with_requirements(busy_requirements())
        .annual()
        .with_bug_reward(BugReward::HalfBase);

    c.bench_function("quote/single", |b| {
        b.iter(|| engine.quote(black_box(&request)).unwrap())
    });
}

fn bench_packages(c: &mut Criterion) {
    let mut group = c.benchmark_group("quote/package");
    let engine = QuoteEngine::default();

    for phases in [1usize, 4, 12, 36].iter() {
        group.throughput(Throughput::Elements(*phases as u64));
        let request = (0..*phases).fold(QuoteRequest::new("enterprise"), |req, i| {
            req.with_phase(PhaseRequest::new(
                format!("Phase {}", i + 1),
                (i % 4) as u32 + 1,
                busy_requirements().with_collaborative_seats(20 + i as u32),
            ))
        });

        group.bench_with_input(BenchmarkId::new("phases", phases), &request, |b, req| {
            b.iter(|| engine.quote(black_box(req)).unwrap())
        });
    }

    group.finish();
}

fn bench_fingerprint(c: &mut Criterion) {
    let card = RateCard::builtin();
    c.bench_function("rate_card/fingerprint", |b| {
        b.iter(|| black_box(&card).fingerprint())
    });
}

criterion_group!(benches, bench_single_quote, bench_packages, bench_fingerprint);
criterion_main!(benches);
