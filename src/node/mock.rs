use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use crate::traits::{BlogSource, HistorySource};
use crate::types::{BlogEntry, HistoryEntry};

/// Mock node for testing.
/// Serves scripted history and blog responses and records every query.
#[derive(Clone, Default)]
pub struct MockNode {
    pub history: Arc<Mutex<Vec<HistoryEntry>>>,
    pub blog: Arc<Mutex<Vec<BlogEntry>>>,
    pub fail_history: Arc<Mutex<bool>>,
    pub fail_blog: Arc<Mutex<bool>>,
    /// Recorded `(account, start_entry, limit)` of each blog query.
    pub blog_queries: Arc<Mutex<Vec<(String, u32, u32)>>>,
    pub history_queries: Arc<Mutex<Vec<(String, u32)>>>,
}

impl MockNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_history(&self, entries: Vec<HistoryEntry>) {
        *self.history.lock().unwrap() = entries;
    }

    pub fn set_blog(&self, entries: Vec<BlogEntry>) {
        *self.blog.lock().unwrap() = entries;
    }

    pub fn set_fail_history(&self, fail: bool) {
        *self.fail_history.lock().unwrap() = fail;
    }

    pub fn set_fail_blog(&self, fail: bool) {
        *self.fail_blog.lock().unwrap() = fail;
    }

    /// Get recorded blog queries (for testing/verification).
    pub fn get_blog_queries(&self) -> Vec<(String, u32, u32)> {
        self.blog_queries.lock().unwrap().clone()
    }

    /// Get recorded history queries (for testing/verification).
    pub fn get_history_queries(&self) -> Vec<(String, u32)> {
        self.history_queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl HistorySource for MockNode {
    fn name(&self) -> &'static str {
        "mock-node"
    }

    async fn account_history(&self, account: &str, limit: u32) -> Result<Vec<HistoryEntry>> {
        self.history_queries
            .lock()
            .unwrap()
            .push((account.to_string(), limit));

        if *self.fail_history.lock().unwrap() {
            anyhow::bail!("mock history failure");
        }

        Ok(self.history.lock().unwrap().clone())
    }
}

#[async_trait]
impl BlogSource for MockNode {
    async fn blog_entries(
        &self,
        account: &str,
        start_entry: u32,
        limit: u32,
    ) -> Result<Vec<BlogEntry>> {
        self.blog_queries
            .lock()
            .unwrap()
            .push((account.to_string(), start_entry, limit));

        if *self.fail_blog.lock().unwrap() {
            anyhow::bail!("mock blog failure");
        }

        Ok(self.blog.lock().unwrap().clone())
    }
}
