mod common;

use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tokio::runtime::Runtime;
use txwatch::prelude::*;

use common::generate_stream;

/// Smallest possible work item: measures hand-off cost only
struct Noop(Arc<AtomicU64>);

#[async_trait]
impl Work for Noop {
    async fn execute(self: Box<Self>, _ctx: WorkContext) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

/// Benchmark synchronous hand-off throughput for different pool sizes
fn bench_submit_noop(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit_noop");
    let runtime = Runtime::new().unwrap();
    let items = 10_000;

    for workers in [1, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &workers| {
            b.to_async(&runtime).iter_batched(
                || WorkerPool::new(workers).unwrap(),
                |pool| async move {
                    let done = Arc::new(AtomicU64::new(0));
                    for _ in 0..items {
                        pool.submit(Box::new(Noop(Arc::clone(&done)))).await.unwrap();
                    }
                    pool.shutdown().await.unwrap();
                    black_box(done.load(Ordering::Relaxed));
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// Benchmark the whole consumer path: read, submit, classify, persist in memory
fn bench_consume_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("consume_buffer");
    let runtime = Runtime::new().unwrap();

    for (size_name, records) in [("small_1k", 1_000), ("medium_10k", 10_000)] {
        group.bench_with_input(BenchmarkId::from_parameter(size_name), &records, |b, &records| {
            b.to_async(&runtime).iter_batched(
                || generate_stream(records, 10),
                |stream| async move {
                    let source: Box<dyn RecordSource> =
                        Box::new(LineSource::new(Cursor::new(stream), "bench"));
                    let stats = Arc::new(ConsumerStats::new());
                    let outcome = consume(
                        source,
                        Arc::new(MemoryStore::new()),
                        Arc::clone(&stats),
                        4,
                        std::future::pending(),
                    )
                    .await
                    .unwrap();
                    black_box((outcome.trigger, stats.snapshot()));
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_submit_noop, bench_consume_buffer);
criterion_main!(benches);
