use anyhow::Result;
use async_trait::async_trait;

use crate::types::BlogEntry;

/// Read access to an account's public blog feed.
///
/// Used only for point-in-time membership checks; callers must re-query per
/// event rather than cache results, since external state can change between
/// fetch and dispatch.
#[async_trait]
pub trait BlogSource: Send + Sync {
    /// Fetch up to `limit` blog entries for `account`, counting down from
    /// entry id `start_entry`. A start id far past the head yields the
    /// newest entries.
    async fn blog_entries(&self, account: &str, start_entry: u32, limit: u32)
        -> Result<Vec<BlogEntry>>;
}
