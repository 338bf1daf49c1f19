use anyhow::Result;
use async_trait::async_trait;

use crate::types::HistoryEntry;

/// Source of an account's recent operation history.
///
/// Implementations return the most recent `limit` entries in original
/// (oldest-first) order; there is no pagination beyond that window.
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &'static str;

    /// Fetch the most recent `limit` history entries for `account`.
    async fn account_history(&self, account: &str, limit: u32) -> Result<Vec<HistoryEntry>>;
}
