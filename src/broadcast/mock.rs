use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use crate::traits::Broadcaster;

/// Mock broadcaster for testing.
/// Records every dispatch; individual targets can be made to fail.
#[derive(Clone, Default)]
pub struct MockBroadcaster {
    /// Recorded `(account, author, permlink)` of each dispatch.
    pub reblogs: Arc<Mutex<Vec<(String, String, String)>>>,
    /// `(author, permlink)` targets whose dispatch fails.
    pub fail_targets: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make dispatches for `@author/permlink` fail.
    pub fn fail_on(&self, author: &str, permlink: &str) {
        self.fail_targets
            .lock()
            .unwrap()
            .push((author.to_string(), permlink.to_string()));
    }

    /// Get all recorded dispatches (for testing/verification).
    pub fn get_reblogs(&self) -> Vec<(String, String, String)> {
        self.reblogs.lock().unwrap().clone()
    }
}

#[async_trait]
impl Broadcaster for MockBroadcaster {
    fn name(&self) -> &'static str {
        "mock-broadcast"
    }

    async fn reblog(&self, account: &str, author: &str, permlink: &str) -> Result<()> {
        let failing = self
            .fail_targets
            .lock()
            .unwrap()
            .iter()
            .any(|(a, p)| a == author && p == permlink);
        if failing {
            anyhow::bail!("mock broadcast failure for @{}/{}", author, permlink);
        }

        self.reblogs.lock().unwrap().push((
            account.to_string(),
            author.to_string(),
            permlink.to_string(),
        ));
        Ok(())
    }
}
