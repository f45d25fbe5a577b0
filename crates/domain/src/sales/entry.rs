use serde::{Deserialize, Serialize};

use super::SaleRecord;

/// Entry persisted in the sales table.
///
/// `(partitionKey, sortKey)` uniquely identifies an entry; a put for an
/// existing pair replaces the whole item. Serde renames keep the table's
/// attribute casing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SaleEntry {
    #[serde(rename = "partitionKey")]
    pub partition_key: String,

    #[serde(rename = "sortKey")]
    pub sort_key: String,

    #[serde(rename = "Description")]
    pub description: String,

    #[serde(rename = "Quantity")]
    pub quantity: i64,

    #[serde(rename = "InvoiceDate")]
    pub invoice_date: String,

    #[serde(rename = "UnitPrice")]
    pub unit_price: f64,

    #[serde(rename = "Country")]
    pub country: String,
}

impl From<SaleRecord> for SaleEntry {
    fn from(record: SaleRecord) -> Self {
        Self {
            partition_key: format!("{}_{}", record.customer, record.invoice_no),
            sort_key: record.stock_code,
            description: record.description,
            quantity: record.quantity,
            invoice_date: record.invoice_date,
            unit_price: record.unit_price,
            country: record.country,
        }
    }
}
