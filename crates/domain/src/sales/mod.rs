/// Incoming invoice line records
pub mod record;

/// Stored entry (composite key derivation)
pub mod entry;

/// Key-value store access
pub mod store;

pub use entry::SaleEntry;
pub use record::SaleRecord;
pub use store::{DynamoSalesStore, SalesStore, StoreError, WriteFailurePolicy};
