use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::traits::Broadcaster;

/// Broadcaster that POSTs the reblog operation to a HiveSigner-compatible
/// broadcast endpoint, authorized with a posting-scoped access token.
/// Transaction signing is delegated to the endpoint.
pub struct SignerBroadcaster {
    url: String,
    token: String,
    client: reqwest::Client,
}

impl SignerBroadcaster {
    pub fn new(url: String, token: String) -> Self {
        Self {
            url,
            token,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Broadcaster for SignerBroadcaster {
    fn name(&self) -> &'static str {
        "signer"
    }

    async fn reblog(&self, account: &str, author: &str, permlink: &str) -> Result<()> {
        // The reblog payload rides inside a custom_json "follow" operation,
        // with the json field double-encoded as the chain expects.
        let payload = serde_json::to_string(&json!([
            "reblog",
            { "account": account, "author": author, "permlink": permlink }
        ]))
        .context("failed to encode reblog payload")?;

        let operation = json!([
            "custom_json",
            {
                "required_auths": [],
                "required_posting_auths": [account],
                "id": "follow",
                "json": payload,
            }
        ]);

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", self.token.as_str())
            .json(&json!({ "operations": [operation] }))
            .send()
            .await
            .with_context(|| format!("broadcast request to {} failed", self.url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("broadcast endpoint returned {}: {}", status, body);
        }

        let body: serde_json::Value = response
            .json()
            .await
            .context("broadcast endpoint returned a non-JSON body")?;
        if let Some(error) = body.get("error") {
            anyhow::bail!("broadcast rejected: {}", error);
        }

        info!("Reblog broadcast accepted for @{}/{}", author, permlink);
        Ok(())
    }
}
