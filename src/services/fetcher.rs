use crate::models::product::Product;
use crate::models::query::{SearchRequest, PAGE_SIZE};
use crate::models::storage::{ProductStore, StorageError};
use crate::services::query_builder::{build_match_count_query, build_query, total_count_query};
use chrono::DateTime;
use thiserror::Error;
use tracing::warn;

/// Display layout of the latest-update timestamp.
pub const TIMESTAMP_FORMAT: &str = "%d-%b-%Y %H:%M:%S";

#[derive(Error, Debug, PartialEq)]
#[error("Unparseable timestamp '{value}': {reason}")]
pub struct TimestampError {
    pub value: String,
    pub reason: String,
}

/// Raw results of one listing request, before pagination bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    pub rows: Vec<Product>,
    pub count: u64,
    pub matches: u64,
    /// Stored value of the latest `timestamp`, unformatted.
    pub latest_timestamp: Option<String>,
}

/// Reformats an RFC 3339 timestamp as `DD-Mon-YYYY HH:MM:SS`.
pub fn format_timestamp(value: &str) -> Result<String, TimestampError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|parsed| parsed.format(TIMESTAMP_FORMAT).to_string())
        .map_err(|e| TimestampError {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Runs the page query and both aggregates against the store.
pub async fn fetch(
    store: &(dyn ProductStore + Send + Sync),
    request: &SearchRequest,
) -> Result<FetchedPage, StorageError> {
    let mut rows = store.fetch_products(&build_query(request)).await?;

    if rows.len() > PAGE_SIZE as usize {
        warn!(
            "Store returned {} rows for a page of {}, truncating",
            rows.len(),
            PAGE_SIZE
        );
        rows.truncate(PAGE_SIZE as usize);
    }

    let count = store.fetch_count(&total_count_query()).await?;
    let matches = if request.terms().is_all() {
        count
    } else {
        store
            .fetch_count(&build_match_count_query(request.terms()))
            .await?
    };
    let latest_timestamp = store.fetch_latest_timestamp().await?;

    Ok(FetchedPage {
        rows,
        count,
        matches,
        latest_timestamp,
    })
}
