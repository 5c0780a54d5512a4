use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use txwatch::prelude::*;

const SUSPICIOUS: &str = r#"{"transaction_id":5699757367,"account_number":215489034,"transaction_type":"withdrawal","transaction_amount":11308.58,"transaction_time":"2023-06-05T03:05:12.495058-03:00","location":"Fort Worth, TX"}"#;
const ORDINARY: &str = r#"{"transaction_id":5699757368,"account_number":215489034,"transaction_type":"withdrawal","transaction_amount":308.58,"transaction_time":"2023-06-05T03:05:12.495058-03:00","location":"Fort Worth, TX"}"#;
const AT_THRESHOLD: &str = r#"{"transaction_id":5699757369,"account_number":215489034,"transaction_type":"withdrawal","transaction_amount":10000.00,"transaction_time":"2023-06-05T03:05:12.495058-03:00","location":"Fort Worth, TX"}"#;

/// Store that rejects every insert
struct RejectingStore;

#[async_trait]
impl SuspiciousStore for RejectingStore {
    async fn insert(&self, _document: &SuspiciousTransaction) -> Result<(), StoreError> {
        Err(StoreError::Rejected("store unavailable".to_string()))
    }
}

fn buffer_source(lines: &[&str]) -> Box<dyn RecordSource> {
    let mut input = lines.join("\n");
    input.push('\n');
    Box::new(LineSource::new(Cursor::new(input.into_bytes()), "buffer"))
}

/// Resolves once `stats` has counted `total` records
async fn processed(stats: Arc<ConsumerStats>, total: u64) {
    while stats.read(Metric::TotalTransactions) < total {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

#[tokio::test]
async fn end_of_stream_stops_the_consumer_with_an_error() {
    let store = Arc::new(MemoryStore::new());
    let stats = Arc::new(ConsumerStats::new());

    let outcome = consume(
        buffer_source(&[SUSPICIOUS, ORDINARY, "blabla", AT_THRESHOLD]),
        store.clone(),
        Arc::clone(&stats),
        4,
        std::future::pending(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.trigger, ShutdownTrigger::IngestionFailure);
    assert_eq!(outcome.state, CoordinatorState::Stopped);
    assert!(matches!(
        outcome.result,
        Err(AppError::Ingest(IngestError::Read(SourceError::EndOfStream)))
    ));

    assert_eq!(
        stats.snapshot(),
        StatsSnapshot {
            total_transactions: 4,
            suspicious_transactions: 1,
            malformed_messages: 1,
            persistence_errors: 0,
            elapsed: Duration::ZERO,
        }
    );
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(5699757367).unwrap().transaction_amount, 11308.58);
}

#[tokio::test]
async fn termination_drains_in_flight_work() {
    let (client, mut server) = tokio::io::duplex(4096);
    let source: Box<dyn RecordSource> = Box::new(LineSource::new(client, "duplex"));
    let store = Arc::new(MemoryStore::new());
    let stats = Arc::new(ConsumerStats::new());

    for line in [SUSPICIOUS, ORDINARY, ORDINARY] {
        server.write_all(format!("{line}\n").as_bytes()).await.unwrap();
    }

    let outcome = consume(
        source,
        store.clone(),
        Arc::clone(&stats),
        2,
        processed(Arc::clone(&stats), 3),
    )
    .await
    .unwrap();

    assert_eq!(outcome.trigger, ShutdownTrigger::Termination);
    assert!(outcome.result.is_ok());
    assert_eq!(stats.read(Metric::TotalTransactions), 3);
    assert_eq!(stats.read(Metric::SuspiciousTransactions), 1);
    assert_eq!(store.len(), 1);
    drop(server);
}

#[tokio::test]
async fn store_failures_are_counted_not_fatal() {
    let stats = Arc::new(ConsumerStats::new());

    let outcome = consume(
        buffer_source(&[SUSPICIOUS, SUSPICIOUS, ORDINARY]),
        Arc::new(RejectingStore),
        Arc::clone(&stats),
        3,
        std::future::pending(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.trigger, ShutdownTrigger::IngestionFailure);
    assert_eq!(stats.read(Metric::TotalTransactions), 3);
    assert_eq!(stats.read(Metric::SuspiciousTransactions), 2);
    assert_eq!(stats.read(Metric::PersistenceErrors), 2);
}

#[tokio::test]
async fn consumes_from_tcp_into_file_store() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        for line in [SUSPICIOUS, ORDINARY] {
            socket.write_all(format!("{line}\n").as_bytes()).await.unwrap();
        }
        socket.shutdown().await.unwrap();
    });

    let data_dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        source_addr: Some(addr),
        data_dir: data_dir.path().to_path_buf(),
        database: Some("frauds".to_string()),
        ..Settings::default()
    };
    settings.validate().unwrap();

    let store = txwatch::app::connect_store(&settings).await.unwrap();
    let source = txwatch::app::open_source(&settings).await.unwrap();
    let stats = Arc::new(ConsumerStats::new());

    let outcome = consume(source, store, Arc::clone(&stats), 2, std::future::pending())
        .await
        .unwrap();
    server.await.unwrap();

    assert!(matches!(
        outcome.result,
        Err(AppError::Ingest(IngestError::Read(SourceError::EndOfStream)))
    ));

    let collection = data_dir
        .path()
        .join("frauds")
        .join(format!("{SUSPICIOUS_COLLECTION}.jsonl"));
    let contents = tokio::fs::read_to_string(collection).await.unwrap();
    let documents: Vec<SuspiciousTransaction> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].transaction_id, 5699757367);
    assert_eq!(documents[0].location, "Fort Worth, TX");
}

#[tokio::test]
async fn unreachable_source_fails_at_startup() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    drop(listener);

    let settings = Settings {
        source_addr: Some(addr),
        ..Settings::default()
    };

    assert!(matches!(
        txwatch::app::open_source(&settings).await,
        Err(AppError::Source(SourceError::Connect { .. }))
    ));
}

#[tokio::test]
async fn generated_file_feeds_the_consumer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("transactions.jsonl");

    let params = GenerateParams {
        lower: AmountRange::new(1.0, 9_000.0).unwrap(),
        upper: AmountRange::new(10_000.01, 50_000.0).unwrap(),
        percentage: 0.75,
        total: 40,
        path: path.clone(),
    };
    let summary = generate(params, Arc::new(TransactionFactory::from_entropy()), 4)
        .await
        .unwrap();
    assert_eq!(summary, GenerateSummary { lower_count: 30, upper_count: 10 });

    let source: Box<dyn RecordSource> = Box::new(LineSource::open(&path).await.unwrap());
    let store = Arc::new(MemoryStore::new());
    let stats = Arc::new(ConsumerStats::new());

    let outcome = consume(source, store.clone(), Arc::clone(&stats), 4, std::future::pending())
        .await
        .unwrap();

    assert_eq!(outcome.trigger, ShutdownTrigger::IngestionFailure);
    assert_eq!(stats.read(Metric::TotalTransactions), 40);
    assert_eq!(stats.read(Metric::SuspiciousTransactions), 10);
    assert_eq!(stats.read(Metric::MalformedMessages), 0);
    assert_eq!(store.len(), 10);
}

/// Publish `path` to the first client of `listener`
async fn serve_file(
    listener: TcpListener,
    path: std::path::PathBuf,
    stats: Arc<ProducerStats>,
) -> Result<PublishEnd, AppError> {
    let sink = LineSink::accept(&listener).await?;
    let source = LineSource::open(&path).await?;
    produce(Box::new(source), Box::new(sink), stats, std::future::pending()).await
}

#[tokio::test]
async fn producer_streams_file_to_consumer_over_tcp() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.jsonl");
    tokio::fs::write(&path, format!("{SUSPICIOUS}\n{ORDINARY}\nnot json\n{AT_THRESHOLD}\n"))
        .await
        .unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let producer_stats = Arc::new(ProducerStats::new());

    let producer = tokio::spawn(serve_file(listener, path, Arc::clone(&producer_stats)));

    let source: Box<dyn RecordSource> = Box::new(LineSource::connect(&addr).await.unwrap());
    let store = Arc::new(MemoryStore::new());
    let consumer_stats = Arc::new(ConsumerStats::new());
    let outcome = consume(source, store.clone(), Arc::clone(&consumer_stats), 2, std::future::pending())
        .await
        .unwrap();

    assert_eq!(producer.await.unwrap().unwrap(), PublishEnd::Exhausted);
    assert_eq!(producer_stats.published(), 4);
    assert_eq!(producer_stats.failed_deliveries(), 0);

    assert_eq!(outcome.trigger, ShutdownTrigger::IngestionFailure);
    assert_eq!(consumer_stats.read(Metric::TotalTransactions), 4);
    assert_eq!(consumer_stats.read(Metric::MalformedMessages), 1);
    assert_eq!(consumer_stats.read(Metric::SuspiciousTransactions), 1);
    assert_eq!(store.len(), 1);
}
