use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::traits::Broadcaster;

/// Noop broadcaster that logs what would be reblogged and succeeds.
/// Selected by --dry-run.
pub struct NoopBroadcaster;

#[async_trait]
impl Broadcaster for NoopBroadcaster {
    fn name(&self) -> &'static str {
        "noop-broadcast"
    }

    async fn reblog(&self, account: &str, author: &str, permlink: &str) -> Result<()> {
        info!(
            "Dry run: would reblog @{}/{} as {}",
            author, permlink, account
        );
        Ok(())
    }
}
