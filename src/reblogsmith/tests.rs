//! Unit tests for the cycle logic.
//!
//! These tests drive the "*_once" functions in tasks.rs directly through
//! mocks, without the timer loop.

use anyhow::Result;
use serde_json::json;

use super::tasks;
use crate::broadcast::MockBroadcaster;
use crate::checkpoint::MockCheckpointStore;
use crate::config::Config;
use crate::node::MockNode;
use crate::types::{BlogEntry, Checkpoint, EventOutcome, HistoryEntry, VoteEvent};

// ==================== TEST HELPERS ====================

fn test_config() -> Config {
    Config {
        account: "curator".to_string(),
        posting_token: "token".to_string(),
        node_url: "http://localhost".to_string(),
        broadcast_url: "http://localhost".to_string(),
        checkpoint_path: "./checkpoint.json".to_string(),
        history_window: 50,
        poll_interval_secs: 180,
        settle_delay_secs: 0,
        blog_probe: 20,
        dry_run: false,
    }
}

fn vote_entry(
    trx_id: &str,
    block: u64,
    voter: &str,
    author: &str,
    permlink: &str,
    weight: i32,
) -> HistoryEntry {
    HistoryEntry {
        block,
        trx_id: trx_id.to_string(),
        op: (
            "vote".to_string(),
            json!({
                "voter": voter,
                "author": author,
                "permlink": permlink,
                "weight": weight,
            }),
        ),
    }
}

fn transfer_entry(trx_id: &str, block: u64) -> HistoryEntry {
    HistoryEntry {
        block,
        trx_id: trx_id.to_string(),
        op: (
            "transfer".to_string(),
            json!({ "from": "alice", "to": "bob", "amount": "1.000 HIVE" }),
        ),
    }
}

fn malformed_vote_entry(trx_id: &str, block: u64) -> HistoryEntry {
    HistoryEntry {
        block,
        trx_id: trx_id.to_string(),
        op: ("vote".to_string(), json!({ "voter": "curator" })),
    }
}

fn vote_event(trx_id: &str, block: u64, author: &str, permlink: &str) -> VoteEvent {
    VoteEvent {
        trx_id: trx_id.to_string(),
        block,
        author: author.to_string(),
        permlink: permlink.to_string(),
    }
}

fn checkpoint_at(block: u64, trx_id: &str) -> Checkpoint {
    Checkpoint {
        block,
        trx_id: trx_id.to_string(),
    }
}

// ==================== TESTS: filter_votes ====================

#[test]
fn test_filter_votes_keeps_positive_votes_by_tracked_account() {
    let entries = vec![
        vote_entry("t1", 100, "curator", "alice", "post1", 5),
        vote_entry("t2", 101, "curator", "bob", "post2", -3),
        vote_entry("t3", 102, "someone-else", "carol", "post3", 5),
    ];

    let events = tasks::filter_votes(&entries, "curator");

    assert_eq!(events, vec![vote_event("t1", 100, "alice", "post1")]);
}

#[test]
fn test_filter_votes_excludes_zero_weight() {
    let entries = vec![vote_entry("t1", 100, "curator", "alice", "post1", 0)];

    assert!(tasks::filter_votes(&entries, "curator").is_empty());
}

#[test]
fn test_filter_votes_skips_other_ops_and_malformed_payloads() {
    let entries = vec![
        transfer_entry("t1", 100),
        malformed_vote_entry("t2", 101),
        vote_entry("t3", 102, "curator", "alice", "post1", 100),
    ];

    let events = tasks::filter_votes(&entries, "curator");

    assert_eq!(events, vec![vote_event("t3", 102, "alice", "post1")]);
}

#[test]
fn test_filter_votes_preserves_order() {
    let entries = vec![
        vote_entry("t1", 100, "curator", "alice", "post1", 10),
        transfer_entry("t2", 101),
        vote_entry("t3", 102, "curator", "bob", "post2", 10),
        vote_entry("t4", 103, "curator", "carol", "post3", 10),
    ];

    let events = tasks::filter_votes(&entries, "curator");

    let trx_ids: Vec<&str> = events.iter().map(|e| e.trx_id.as_str()).collect();
    assert_eq!(trx_ids, vec!["t1", "t3", "t4"]);
}

// ==================== TESTS: newer_than ====================

#[test]
fn test_newer_than_returns_strict_suffix() {
    let events = vec![
        vote_event("t1", 100, "alice", "post1"),
        vote_event("t2", 101, "bob", "post2"),
        vote_event("t3", 102, "carol", "post3"),
    ];

    let pending = tasks::newer_than(events, &checkpoint_at(100, "t1"));

    let trx_ids: Vec<&str> = pending.iter().map(|e| e.trx_id.as_str()).collect();
    assert_eq!(trx_ids, vec!["t2", "t3"]);
}

#[test]
fn test_newer_than_checkpoint_at_last_event_returns_empty() {
    let events = vec![
        vote_event("t1", 100, "alice", "post1"),
        vote_event("t2", 101, "bob", "post2"),
    ];

    let pending = tasks::newer_than(events, &checkpoint_at(101, "t2"));

    assert!(pending.is_empty());
}

#[test]
fn test_newer_than_fail_open_when_checkpoint_missing() {
    let events = vec![
        vote_event("t5", 200, "alice", "post1"),
        vote_event("t6", 201, "bob", "post2"),
    ];

    let pending = tasks::newer_than(events.clone(), &checkpoint_at(100, "t1"));

    // Checkpoint is beyond the fetch horizon: the whole window comes back.
    assert_eq!(pending, events);
}

// ==================== TESTS: already_reblogged ====================

#[tokio::test]
async fn test_already_reblogged_membership() -> Result<()> {
    let node = MockNode::new();
    node.set_blog(vec![
        BlogEntry {
            author: "alice".to_string(),
            permlink: "post1".to_string(),
        },
        BlogEntry {
            author: "bob".to_string(),
            permlink: "post2".to_string(),
        },
    ]);

    assert!(tasks::already_reblogged(&node, "curator", "alice", "post1", 20).await?);
    assert!(!tasks::already_reblogged(&node, "curator", "carol", "post3", 20).await?);

    Ok(())
}

#[tokio::test]
async fn test_already_reblogged_queries_newest_window() -> Result<()> {
    let node = MockNode::new();

    tasks::already_reblogged(&node, "curator", "alice", "post1", 20).await?;

    assert_eq!(
        node.get_blog_queries(),
        vec![("curator".to_string(), 999_999, 20)]
    );
    Ok(())
}

// ==================== TESTS: process_event_once ====================

#[tokio::test]
async fn test_process_event_dispatches_and_saves() -> Result<()> {
    let config = test_config();
    let node = MockNode::new();
    let broadcaster = MockBroadcaster::new();
    let store = MockCheckpointStore::new();
    let event = vote_event("t2", 101, "alice", "post1");

    let outcome =
        tasks::process_event_once(&node, &broadcaster, &store, &config, &event).await?;

    assert_eq!(outcome, EventOutcome::Reblogged);
    assert_eq!(
        broadcaster.get_reblogs(),
        vec![(
            "curator".to_string(),
            "alice".to_string(),
            "post1".to_string()
        )]
    );
    assert_eq!(store.get_saves(), vec![checkpoint_at(101, "t2")]);
    Ok(())
}

#[tokio::test]
async fn test_process_event_skips_dispatch_when_already_on_blog() -> Result<()> {
    let config = test_config();
    let node = MockNode::new();
    node.set_blog(vec![BlogEntry {
        author: "alice".to_string(),
        permlink: "post1".to_string(),
    }]);
    let broadcaster = MockBroadcaster::new();
    let store = MockCheckpointStore::new();
    let event = vote_event("t2", 101, "alice", "post1");

    let outcome =
        tasks::process_event_once(&node, &broadcaster, &store, &config, &event).await?;

    // No dispatch, but the checkpoint still advances past the event.
    assert_eq!(outcome, EventOutcome::AlreadyReblogged);
    assert!(broadcaster.get_reblogs().is_empty());
    assert_eq!(store.get_saves(), vec![checkpoint_at(101, "t2")]);
    Ok(())
}

#[tokio::test]
async fn test_process_event_failed_dispatch_leaves_checkpoint() {
    let config = test_config();
    let node = MockNode::new();
    let broadcaster = MockBroadcaster::new();
    broadcaster.fail_on("alice", "post1");
    let store = MockCheckpointStore::new();
    let event = vote_event("t2", 101, "alice", "post1");

    let result = tasks::process_event_once(&node, &broadcaster, &store, &config, &event).await;

    assert!(result.is_err());
    assert!(store.get_saves().is_empty());
}

#[tokio::test]
async fn test_process_event_guard_failure_blocks_dispatch() {
    let config = test_config();
    let node = MockNode::new();
    node.set_fail_blog(true);
    let broadcaster = MockBroadcaster::new();
    let store = MockCheckpointStore::new();
    let event = vote_event("t2", 101, "alice", "post1");

    let result = tasks::process_event_once(&node, &broadcaster, &store, &config, &event).await;

    // Without a trustworthy idempotency answer nothing is dispatched.
    assert!(result.is_err());
    assert!(broadcaster.get_reblogs().is_empty());
    assert!(store.get_saves().is_empty());
}

// ==================== TESTS: run_cycle_once ====================

#[tokio::test]
async fn test_cycle_processes_events_in_order_with_monotonic_checkpoints() -> Result<()> {
    let config = test_config();
    let node = MockNode::new();
    node.set_history(vec![
        vote_entry("t1", 100, "curator", "alice", "post1", 10),
        vote_entry("t2", 101, "curator", "bob", "post2", 10),
        vote_entry("t3", 102, "curator", "carol", "post3", 10),
    ]);
    let broadcaster = MockBroadcaster::new();
    let store = MockCheckpointStore::seeded(checkpoint_at(99, "t0"));

    let advanced = tasks::run_cycle_once(&node, &broadcaster, &store, &config).await?;

    // Stale checkpoint fails open: all three events are processed, and the
    // checkpoint advances once per event, in history order.
    assert_eq!(advanced, 3);
    assert_eq!(
        store.get_saves(),
        vec![
            checkpoint_at(100, "t1"),
            checkpoint_at(101, "t2"),
            checkpoint_at(102, "t3"),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_cycle_resumes_strictly_after_checkpoint() -> Result<()> {
    let config = test_config();
    let node = MockNode::new();
    node.set_history(vec![
        vote_entry("t1", 100, "curator", "alice", "post1", 10),
        vote_entry("t2", 101, "curator", "bob", "post2", 10),
        vote_entry("t3", 102, "curator", "carol", "post3", 10),
    ]);
    let broadcaster = MockBroadcaster::new();
    let store = MockCheckpointStore::seeded(checkpoint_at(101, "t2"));

    let advanced = tasks::run_cycle_once(&node, &broadcaster, &store, &config).await?;

    assert_eq!(advanced, 1);
    assert_eq!(
        broadcaster.get_reblogs(),
        vec![(
            "curator".to_string(),
            "carol".to_string(),
            "post3".to_string()
        )]
    );
    assert_eq!(store.get_saves(), vec![checkpoint_at(102, "t3")]);
    Ok(())
}

#[tokio::test]
async fn test_cycle_continues_past_failed_dispatch() -> Result<()> {
    let config = test_config();
    let node = MockNode::new();
    node.set_history(vec![
        vote_entry("t1", 100, "curator", "alice", "post1", 10),
        vote_entry("t2", 101, "curator", "bob", "post2", 10),
        vote_entry("t3", 102, "curator", "carol", "post3", 10),
    ]);
    let broadcaster = MockBroadcaster::new();
    broadcaster.fail_on("bob", "post2");
    let store = MockCheckpointStore::seeded(checkpoint_at(99, "t0"));

    let advanced = tasks::run_cycle_once(&node, &broadcaster, &store, &config).await?;

    // The failed event is skipped without aborting the cycle; its checkpoint
    // is never written, so a later scan retries it.
    assert_eq!(advanced, 2);
    assert_eq!(
        store.get_saves(),
        vec![checkpoint_at(100, "t1"), checkpoint_at(102, "t3")]
    );
    Ok(())
}

#[tokio::test]
async fn test_cycle_aborts_without_checkpoint() {
    let config = test_config();
    let node = MockNode::new();
    let broadcaster = MockBroadcaster::new();
    let store = MockCheckpointStore::new();

    let result = tasks::run_cycle_once(&node, &broadcaster, &store, &config).await;

    // No known starting point: nothing is fetched, nothing dispatched.
    assert!(result.is_err());
    assert!(node.get_history_queries().is_empty());
    assert!(broadcaster.get_reblogs().is_empty());
}

#[tokio::test]
async fn test_cycle_aborts_on_corrupt_checkpoint() {
    let config = test_config();
    let node = MockNode::new();
    let broadcaster = MockBroadcaster::new();
    let store = MockCheckpointStore::seeded(checkpoint_at(100, "t1"));
    store.set_corrupt(true);

    let result = tasks::run_cycle_once(&node, &broadcaster, &store, &config).await;

    assert!(result.is_err());
    assert!(node.get_history_queries().is_empty());
}

#[tokio::test]
async fn test_cycle_fetch_failure_aborts_before_dispatch() {
    let config = test_config();
    let node = MockNode::new();
    node.set_fail_history(true);
    let broadcaster = MockBroadcaster::new();
    let store = MockCheckpointStore::seeded(checkpoint_at(100, "t1"));

    let result = tasks::run_cycle_once(&node, &broadcaster, &store, &config).await;

    assert!(result.is_err());
    assert!(broadcaster.get_reblogs().is_empty());
    assert!(store.get_saves().is_empty());
}

#[tokio::test]
async fn test_cycle_nothing_new_returns_zero() -> Result<()> {
    let config = test_config();
    let node = MockNode::new();
    node.set_history(vec![vote_entry("t1", 100, "curator", "alice", "post1", 10)]);
    let broadcaster = MockBroadcaster::new();
    let store = MockCheckpointStore::seeded(checkpoint_at(100, "t1"));

    let advanced = tasks::run_cycle_once(&node, &broadcaster, &store, &config).await?;

    assert_eq!(advanced, 0);
    assert!(node.get_blog_queries().is_empty());
    assert!(broadcaster.get_reblogs().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_cycle_requeries_blog_per_event() -> Result<()> {
    let config = test_config();
    let node = MockNode::new();
    node.set_history(vec![
        vote_entry("t1", 100, "curator", "alice", "post1", 10),
        vote_entry("t2", 101, "curator", "bob", "post2", 10),
    ]);
    let broadcaster = MockBroadcaster::new();
    let store = MockCheckpointStore::seeded(checkpoint_at(99, "t0"));

    tasks::run_cycle_once(&node, &broadcaster, &store, &config).await?;

    // One membership check per event, at dispatch time.
    assert_eq!(node.get_blog_queries().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_cycle_example_scenario() -> Result<()> {
    let config = test_config();
    let node = MockNode::new();
    node.set_history(vec![
        vote_entry("t1", 100, "curator", "dave", "oldpost", 10),
        vote_entry("t2", 101, "curator", "alice", "post1", 10),
        vote_entry("t3", 102, "curator", "erin", "downvoted", -1),
    ]);
    let broadcaster = MockBroadcaster::new();
    let store = MockCheckpointStore::seeded(checkpoint_at(100, "t1"));

    let advanced = tasks::run_cycle_once(&node, &broadcaster, &store, &config).await?;

    // Only t2 qualifies: t1 is the checkpoint, t3 is a downvote.
    assert_eq!(advanced, 1);
    assert_eq!(
        node.get_blog_queries(),
        vec![("curator".to_string(), 999_999, 20)]
    );
    assert_eq!(
        broadcaster.get_reblogs(),
        vec![(
            "curator".to_string(),
            "alice".to_string(),
            "post1".to_string()
        )]
    );
    assert_eq!(store.get_saves(), vec![checkpoint_at(101, "t2")]);
    Ok(())
}
