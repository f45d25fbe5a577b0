use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// One invoice line as carried on the stream.
///
/// Payloads arrive as UTF-8 JSON with every field present. Anything less is
/// rejected at decode time instead of surfacing later as a failed field
/// lookup.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct SaleRecord {
    pub customer: String,
    pub invoice_no: String,
    pub stock_code: String,
    pub description: String,
    pub quantity: i64,
    pub invoice_date: String,
    pub unit_price: f64,
    pub country: String,
}

impl SaleRecord {
    /// Parses a decoded stream payload into a record.
    pub fn decode(payload: &[u8]) -> Result<Self, Error> {
        let text = std::str::from_utf8(payload).map_err(|e| Error::MalformedPayload {
            message: e.to_string(),
        })?;

        serde_json::from_str(text).map_err(|e| Error::MalformedPayload {
            message: e.to_string(),
        })
    }
}
