use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::traits::{BlogSource, HistorySource};
use crate::types::{BlogEntry, HistoryEntry};

/// JSON-RPC 2.0 client for a condenser-API node.
///
/// Serves both boundary roles: account history (`get_account_history`) and
/// the public blog feed (`get_blog_entries`).
pub struct CondenserClient {
    url: String,
    client: reqwest::Client,
}

impl CondenserClient {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }

    /// Issue one JSON-RPC call and unwrap its `result`.
    /// An `error` object in the response body is surfaced as a failure.
    async fn call(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
        let request = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1,
        });

        debug!("JSON-RPC call: {} -> {}", method, self.url);

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.url))?
            .error_for_status()
            .with_context(|| format!("{} returned an error status", method))?;

        let body: serde_json::Value = response
            .json()
            .await
            .with_context(|| format!("{} returned a non-JSON body", method))?;

        if let Some(error) = body.get("error") {
            anyhow::bail!("{} failed: {}", method, error);
        }

        body.get("result")
            .cloned()
            .with_context(|| format!("{} response missing result", method))
    }
}

#[async_trait]
impl HistorySource for CondenserClient {
    fn name(&self) -> &'static str {
        "condenser"
    }

    async fn account_history(&self, account: &str, limit: u32) -> Result<Vec<HistoryEntry>> {
        // start = -1 asks for the most recent window.
        let result = self
            .call(
                "condenser_api.get_account_history",
                json!([account, -1, limit]),
            )
            .await?;

        // Wire shape is [[index, entry], ...]; the index is discarded.
        let entries: Vec<(i64, HistoryEntry)> =
            serde_json::from_value(result).context("unexpected account history shape")?;

        Ok(entries.into_iter().map(|(_, entry)| entry).collect())
    }
}

#[async_trait]
impl BlogSource for CondenserClient {
    async fn blog_entries(
        &self,
        account: &str,
        start_entry: u32,
        limit: u32,
    ) -> Result<Vec<BlogEntry>> {
        let result = self
            .call(
                "condenser_api.get_blog_entries",
                json!([account, start_entry, limit]),
            )
            .await?;

        let entries: Vec<BlogEntry> =
            serde_json::from_value(result).context("unexpected blog entries shape")?;

        Ok(entries)
    }
}
