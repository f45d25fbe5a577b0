use aws_config::BehaviorVersion;
use aws_lambda_events::kinesis::{KinesisEvent, KinesisEventRecord};
use domain::sales::{self, SaleEntry, SaleRecord, SalesStore, WriteFailurePolicy};
use lambda_runtime::{service_fn, Error, LambdaEvent};

const KINESIS_EVENT_SOURCE: &str = "aws:kinesis";

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
    let dynamodb_client = aws_sdk_dynamodb::Client::new(&config);

    let store = sales::store::init(dynamodb_client);
    let policy = WriteFailurePolicy::from_env();

    lambda_runtime::run(service_fn(|event: LambdaEvent<KinesisEvent>| async {
        handle(event.payload, &store, policy).await
    }))
    .await
}

async fn handle(
    event: KinesisEvent,
    store: &impl SalesStore,
    policy: WriteFailurePolicy,
) -> Result<&'static str, Error> {
    tracing::info!("event = {:?}", event);
    tracing::info!("Total number of records in the event: {}", event.records.len());

    // The transport delivers single-source batches, so the first record's
    // tag stands for all of them.
    let source = event.records.first().and_then(|r| r.event_source.as_deref());
    if source != Some(KINESIS_EVENT_SOURCE) {
        tracing::info!("Unknown event source, skipping batch");
        tracing::info!("Total number of records processed: 0");
        return Ok("success");
    }

    let mut processed = 0;
    for record in &event.records {
        match ingest_record(record, store, policy).await {
            Ok(true) => processed += 1,
            Ok(false) => {}
            Err(e) => {
                tracing::error!("Aborting batch: {}", e);
                return Err(e);
            }
        }
    }

    tracing::info!("Total number of records processed: {}", processed);
    Ok("success")
}

async fn ingest_record(
    record: &KinesisEventRecord,
    store: &impl SalesStore,
    policy: WriteFailurePolicy,
) -> Result<bool, Error> {
    let sale = SaleRecord::decode(&record.kinesis.data)?;
    let entry = SaleEntry::from(sale);

    let existed = entry_exists(store, &entry.partition_key, &entry.sort_key).await;

    match store.put(&entry).await {
        Ok(()) => {
            if existed {
                tracing::info!(
                    "Updated the existing item ({}, {})",
                    entry.partition_key,
                    entry.sort_key
                );
            } else {
                tracing::info!(
                    "Inserted the new item ({}, {})",
                    entry.partition_key,
                    entry.sort_key
                );
            }
            Ok(true)
        }
        Err(e) => {
            tracing::error!(
                "Failed to write ({}, {}): {}",
                entry.partition_key,
                entry.sort_key,
                e
            );

            match policy {
                WriteFailurePolicy::AbortBatch => Err(e.into()),
                WriteFailurePolicy::SkipRecord => Ok(false),
            }
        }
    }
}

/// Observational only: the caller writes regardless of the outcome, and a
/// failed lookup counts as not-found.
async fn entry_exists(store: &impl SalesStore, partition_key: &str, sort_key: &str) -> bool {
    match store.get(partition_key, sort_key).await {
        Ok(Some(entry)) => {
            tracing::info!("Found existing entry: {:?}", entry);
            true
        }
        Ok(None) => {
            tracing::info!("No entry for ({}, {}) yet", partition_key, sort_key);
            false
        }
        Err(e) => {
            tracing::error!("Existence check failed: {}", e);
            false
        }
    }
}
