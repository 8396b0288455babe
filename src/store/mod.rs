pub mod remote;

pub use remote::RemoteStore;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info};

use crate::models::{RawTradeRecord, TradeRecord};

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch one page of raw records for a user, starting at `offset`.
    async fn fetch_page(
        &mut self,
        user_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<RawTradeRecord>>;
}

/// Drain the store page by page until a short page signals exhaustion.
///
/// Streaks and monthly consistency are completeness-sensitive, so a partial
/// page set must never reach aggregation: any fetch or parse failure aborts
/// the whole drain instead of returning what was gathered so far.
pub async fn fetch_all_trade_records(
    store: &mut dyn RecordStore,
    user_id: &str,
    page_size: usize,
) -> Result<Vec<TradeRecord>> {
    let page_size = page_size.max(1);
    let mut all: Vec<TradeRecord> = Vec::new();
    let mut offset = 0usize;

    loop {
        let page = store.fetch_page(user_id, offset, page_size).await?;
        let fetched = page.len();
        for raw in &page {
            all.push(TradeRecord::parse(raw)?);
        }
        debug!("Page at offset {}: {} records", offset, fetched);
        if fetched < page_size {
            break;
        }
        offset += fetched;
    }

    info!("Fetched {} trade records for user {}", all.len(), user_id);
    Ok(all)
}
