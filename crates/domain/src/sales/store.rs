use std::env;

use async_trait::async_trait;
use aws_sdk_dynamodb::{error::SdkError, types::AttributeValue};
use derive_new::new;
use serde_dynamo::aws_sdk_dynamodb_1::{from_item, to_item};
use thiserror::Error;

use super::SaleEntry;

/// Failure classes reported by the store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Parameter validation error: {message}")]
    Validation { message: String },

    #[error("Client error: {message}")]
    Client { message: String },
}

impl<E> From<SdkError<E>> for StoreError
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(err: SdkError<E>) -> Self {
        match &err {
            SdkError::ConstructionFailure(_) => Self::Validation {
                message: err.to_string(),
            },
            _ => Self::Client {
                message: err.to_string(),
            },
        }
    }
}

/// What to do with a record whose upsert fails.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WriteFailurePolicy {
    /// Fail the invocation so the stream redrives the whole batch.
    AbortBatch,

    /// Log the failure, leave the record uncounted, keep going.
    SkipRecord,
}

impl WriteFailurePolicy {
    /// Reads `WRITE_FAILURE_POLICY`; any value other than `skip-record`
    /// keeps the batch-aborting default.
    pub fn from_env() -> Self {
        match env::var("WRITE_FAILURE_POLICY").as_deref() {
            Ok("skip-record") => Self::SkipRecord,
            _ => Self::AbortBatch,
        }
    }
}

/// Point lookups and upserts against the sales table.
#[async_trait]
pub trait SalesStore: Send + Sync {
    /// Exact-match lookup on both key parts.
    async fn get(
        &self,
        partition_key: &str,
        sort_key: &str,
    ) -> Result<Option<SaleEntry>, StoreError>;

    /// Full-item insert-or-replace.
    async fn put(&self, entry: &SaleEntry) -> Result<(), StoreError>;
}

#[derive(Clone, new)]
pub struct DynamoSalesStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

pub fn init(client: aws_sdk_dynamodb::Client) -> DynamoSalesStore {
    let table_name = env::var("DYNAMODB_TABLE").unwrap_or("retail-sales".to_string());

    DynamoSalesStore::new(client, table_name)
}

#[async_trait]
impl SalesStore for DynamoSalesStore {
    async fn get(
        &self,
        partition_key: &str,
        sort_key: &str,
    ) -> Result<Option<SaleEntry>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("partitionKey", AttributeValue::S(partition_key.to_string()))
            .key("sortKey", AttributeValue::S(sort_key.to_string()))
            .send()
            .await?;

        match output.item {
            Some(item) => {
                let entry = from_item(item).map_err(|e| StoreError::Validation {
                    message: e.to_string(),
                })?;

                Ok(Some(entry))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, entry: &SaleEntry) -> Result<(), StoreError> {
        let item = to_item(entry).map_err(|e| StoreError::Validation {
            message: e.to_string(),
        })?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await?;

        Ok(())
    }
}
