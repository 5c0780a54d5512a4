mod common;

use std::sync::Arc;

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::runtime::Runtime;
use txwatch::prelude::*;

use common::generate_payloads;

/// Benchmark payload decoding and the threshold check
fn bench_classify(c: &mut Criterion) {
    let payloads = generate_payloads(1_000, 10);

    c.bench_function("classify_1k", |b| {
        b.iter(|| {
            let mut suspicious = 0;
            for payload in &payloads {
                if let Ok(transaction) = Transaction::from_slice(payload) {
                    suspicious += usize::from(transaction.is_suspicious());
                }
            }
            black_box(suspicious)
        });
    });
}

/// Benchmark executing work items directly, by suspicious share
fn bench_execute(c: &mut Criterion) {
    let mut group = c.benchmark_group("transaction_work_execute");
    let runtime = Runtime::new().unwrap();

    for (name, suspicious_every) in [("none", 0), ("tenth", 10), ("all", 1)] {
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &suspicious_every,
            |b, &suspicious_every| {
                b.to_async(&runtime).iter_batched(
                    || generate_payloads(1_000, suspicious_every),
                    |payloads| async move {
                        let stats = Arc::new(ConsumerStats::new());
                        let store: Arc<dyn SuspiciousStore> = Arc::new(MemoryStore::new());
                        for payload in payloads {
                            let work = TransactionWork::new(
                                payload,
                                Arc::clone(&stats),
                                Arc::clone(&store),
                            );
                            Box::new(work).execute(WorkContext::default()).await;
                        }
                        black_box(stats.snapshot());
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

/// Benchmark synthetic transaction generation
fn bench_generate(c: &mut Criterion) {
    let factory = TransactionFactory::new(StdRng::seed_from_u64(42), txwatch::workers::SystemClock);
    let range = AmountRange::new(10.0, 20_000.0).unwrap();

    c.bench_function("generate_transaction", |b| {
        b.iter(|| black_box(factory.generate(range)));
    });
}

criterion_group!(benches, bench_classify, bench_execute, bench_generate);
criterion_main!(benches);
