//! Decoder traits

use crate::error::Result;
use serde_json::Value;

/// Trait for turning one decoded page into the records it contributes
pub trait RecordDecoder: Send + Sync {
    /// Split a decoded page into records, in server order
    fn records(&self, page: Value) -> Result<Vec<Value>>;

    /// Decode a raw body and split it into records
    fn decode(&self, url: &str, body: &str) -> Result<Vec<Value>> {
        let page = super::decode_json(url, body)?;
        self.records(page)
    }
}
