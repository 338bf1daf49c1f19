use anyhow::Result;
use async_trait::async_trait;

use super::mock::MockBroadcaster;
use super::noop::NoopBroadcaster;
use super::signer::SignerBroadcaster;
use crate::traits::Broadcaster;

/// Enum representing all possible broadcaster implementations.
pub enum BroadcastVariant {
    Signer(SignerBroadcaster),
    Noop(NoopBroadcaster),
    Mock(MockBroadcaster),
}

#[async_trait]
impl Broadcaster for BroadcastVariant {
    fn name(&self) -> &'static str {
        match self {
            BroadcastVariant::Signer(inner) => inner.name(),
            BroadcastVariant::Noop(inner) => inner.name(),
            BroadcastVariant::Mock(inner) => inner.name(),
        }
    }

    async fn reblog(&self, account: &str, author: &str, permlink: &str) -> Result<()> {
        match self {
            BroadcastVariant::Signer(inner) => inner.reblog(account, author, permlink).await,
            BroadcastVariant::Noop(inner) => inner.reblog(account, author, permlink).await,
            BroadcastVariant::Mock(inner) => inner.reblog(account, author, permlink).await,
        }
    }
}
