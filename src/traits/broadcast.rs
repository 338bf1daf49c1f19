use anyhow::Result;
use async_trait::async_trait;

/// Dispatcher for the reblog side effect.
///
/// Fire-and-verify: one attempt per event per cycle, no in-cycle retry. The
/// side effect is external and not transactional with the checkpoint store;
/// the pacer awaits the confirmation before advancing the checkpoint.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// Broadcaster name for logging.
    fn name(&self) -> &'static str;

    /// Broadcast a reblog of `@author/permlink` on behalf of `account`.
    async fn reblog(&self, account: &str, author: &str, permlink: &str) -> Result<()>;
}
