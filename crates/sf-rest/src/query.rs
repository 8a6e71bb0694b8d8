//! SOQL query envelope.

use serde::{Deserialize, Serialize};

/// Result of a SOQL query (one page).
///
/// Only the first page is ever fetched; `next_records_url` is surfaced for
/// callers that want to follow it themselves.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryResult<T> {
    /// Total number of records matching the query.
    #[serde(rename = "totalSize")]
    pub total_size: u64,

    /// Whether all records are returned (no more pages).
    pub done: bool,

    /// URL to fetch next batch of results.
    #[serde(rename = "nextRecordsUrl", default)]
    pub next_records_url: Option<String>,

    /// The records.
    pub records: Vec<T>,
}
