use anyhow::Result;
use async_trait::async_trait;

use super::condenser::CondenserClient;
use super::mock::MockNode;
use crate::traits::{BlogSource, HistorySource};
use crate::types::{BlogEntry, HistoryEntry};

/// Enum representing all possible node implementations.
/// A node serves both the history and the blog boundary.
pub enum NodeVariant {
    Condenser(CondenserClient),
    Mock(MockNode),
}

#[async_trait]
impl HistorySource for NodeVariant {
    fn name(&self) -> &'static str {
        match self {
            NodeVariant::Condenser(inner) => inner.name(),
            NodeVariant::Mock(inner) => inner.name(),
        }
    }

    async fn account_history(&self, account: &str, limit: u32) -> Result<Vec<HistoryEntry>> {
        match self {
            NodeVariant::Condenser(inner) => inner.account_history(account, limit).await,
            NodeVariant::Mock(inner) => inner.account_history(account, limit).await,
        }
    }
}

#[async_trait]
impl BlogSource for NodeVariant {
    async fn blog_entries(
        &self,
        account: &str,
        start_entry: u32,
        limit: u32,
    ) -> Result<Vec<BlogEntry>> {
        match self {
            NodeVariant::Condenser(inner) => inner.blog_entries(account, start_entry, limit).await,
            NodeVariant::Mock(inner) => inner.blog_entries(account, start_entry, limit).await,
        }
    }
}
