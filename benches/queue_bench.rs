//! Benchmarks for the transcode queue scheduler.
//!
//! Benchmarks cover:
//! - Membership operations (bulk add, clear)
//! - Sorting the live sequence
//! - Statistics over a mixed-status queue
//! - End-to-end runs with a no-op handler

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use std::hint::black_box;

use prometheus_transcode_queue::config::QueueConfig;
use prometheus_transcode_queue::core::{
    handler_fn, HandlerError, Job, JobHandler, JobOutcome, Scheduler,
};

use tokio::runtime::Runtime;

// ============================================================================
// Helper Functions
// ============================================================================

fn noop_handler() -> impl JobHandler {
    handler_fn(|job: Job, progress, _cancel| async move {
        progress.report(100);
        Ok::<_, HandlerError>(JobOutcome::succeeded(Some(job.file_size_bytes() / 2)))
    })
}

fn random_jobs(count: u64) -> Vec<Job> {
    let mut rng = rand::rng();
    (0..count)
        .map(|i| {
            Job::new(format!("/media/clip-{i}.mov"), rng.random_range(1..=4_000_000_000))
                .with_priority(rng.random_range(1..=5))
                .starred(rng.random_bool(0.1))
        })
        .collect()
}

fn scheduler_with(rt: &Runtime, count: u64, max_concurrent: usize) -> Scheduler {
    let _guard = rt.enter();
    let scheduler = Scheduler::new(
        QueueConfig::default().with_max_concurrent(max_concurrent),
        noop_handler(),
    )
    .unwrap();
    scheduler.add_items(random_jobs(count)).unwrap();
    scheduler
}

// ============================================================================
// Membership
// ============================================================================

fn bench_add_items(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_items");
    let rt = Runtime::new().unwrap();

    for size in [100_u64, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let scheduler = scheduler_with(&rt, 0, 2);
            b.iter(|| {
                scheduler.add_items(random_jobs(size)).unwrap();
                black_box(scheduler.clear_queue())
            });
        });
    }
    group.finish();
}

// ============================================================================
// Ordering
// ============================================================================

fn bench_sorting(c: &mut Criterion) {
    let mut group = c.benchmark_group("sorting");
    let rt = Runtime::new().unwrap();

    for size in [100_u64, 1_000, 10_000] {
        let scheduler = scheduler_with(&rt, size, 2);
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("priority", size), &size, |b, _| {
            b.iter(|| {
                scheduler.sort_by_size();
                scheduler.sort_by_priority();
            });
        });
        group.bench_with_input(BenchmarkId::new("added_date", size), &size, |b, _| {
            b.iter(|| {
                scheduler.sort_by_duration();
                scheduler.sort_by_added_date();
            });
        });
    }
    group.finish();
}

// ============================================================================
// Statistics
// ============================================================================

fn bench_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");
    let rt = Runtime::new().unwrap();

    for size in [100_u64, 1_000, 10_000] {
        let scheduler = scheduler_with(&rt, size, 8);
        rt.block_on(scheduler.run());
        // Half completed, half pending.
        scheduler.add_items(random_jobs(size)).unwrap();

        group.throughput(Throughput::Elements(size * 2));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(scheduler.statistics()));
        });
    }
    group.finish();
}

// ============================================================================
// End-to-End
// ============================================================================

fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_run");
    group.sample_size(20);

    for max_concurrent in [1_usize, 4, 8] {
        group.throughput(Throughput::Elements(200));
        group.bench_with_input(
            BenchmarkId::from_parameter(max_concurrent),
            &max_concurrent,
            |b, &max_concurrent| {
                b.to_async(Runtime::new().unwrap()).iter(|| async move {
                    let scheduler = Scheduler::new(
                        QueueConfig::default().with_max_concurrent(max_concurrent),
                        noop_handler(),
                    )
                    .unwrap();
                    scheduler.add_items(random_jobs(200)).unwrap();
                    scheduler.run().await;
                    black_box(scheduler.statistics())
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_add_items,
    bench_sorting,
    bench_statistics,
    bench_full_run,
);
criterion_main!(benches);
