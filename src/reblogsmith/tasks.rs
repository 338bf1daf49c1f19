//! Cycle orchestration: the periodic poll loop and the per-event pacer.
//!
//! The free functions here hold all of the cycle logic so tests can drive
//! them directly through mocks; `run` only owns the timer and the shutdown
//! signal.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, span, warn, Level};

use super::core::ReblogSmith;
use crate::config::Config;
use crate::traits::{BlogSource, Broadcaster, CheckpointStore, HistorySource};
use crate::types::{Checkpoint, EventOutcome, HistoryEntry, VoteEvent, VoteOp};

impl ReblogSmith {
    /// Run the daemon: one cycle immediately, then one per poll interval,
    /// until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        let span = span!(Level::INFO, "poll_loop");
        let _enter = span.enter();

        let ReblogSmith {
            node,
            broadcaster,
            checkpoint,
            config,
        } = self;

        info!(
            "Starting poll loop (node={}, broadcaster={}, store={}, interval={}s)",
            node.name(),
            broadcaster.name(),
            checkpoint.name(),
            config.poll_interval_secs
        );

        let mut ticker = tokio::time::interval(Duration::from_secs(config.poll_interval_secs));
        // A tick that elapses while a cycle is still in flight is skipped,
        // so cycles never overlap and never read a stale checkpoint.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match run_cycle_once(&node, &broadcaster, &checkpoint, &config).await {
                        Ok(0) => debug!("Cycle complete: nothing new"),
                        Ok(count) => info!("Cycle complete: {} event(s) processed", count),
                        Err(e) => error!("Cycle failed: {:#}", e),
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }

        Ok(())
    }
}

/// Run one full poll cycle: load the checkpoint, fetch the history window,
/// filter, cut at the checkpoint, then pace through the pending events.
///
/// Returns the number of events whose checkpoint advanced. A missing or
/// corrupt checkpoint aborts the cycle before any network call; a per-event
/// failure is logged and the next event is still attempted.
pub async fn run_cycle_once<N, B, S>(
    node: &N,
    broadcaster: &B,
    store: &S,
    config: &Config,
) -> Result<usize>
where
    N: HistorySource + BlogSource,
    B: Broadcaster,
    S: CheckpointStore,
{
    let checkpoint = store
        .load()
        .context("cannot establish a starting point")?;
    debug!(
        "Loaded checkpoint: block={}, trx_id={}",
        checkpoint.block, checkpoint.trx_id
    );

    let entries = node
        .account_history(&config.account, config.history_window)
        .await
        .context("account history fetch failed")?;

    let votes = filter_votes(&entries, &config.account);
    let pending = newer_than(votes, &checkpoint);
    if pending.is_empty() {
        return Ok(0);
    }

    info!(
        "{} new vote(s) since block {}",
        pending.len(),
        checkpoint.block
    );

    let mut advanced = 0;
    for event in &pending {
        // Let the external log settle before acting on the event.
        tokio::time::sleep(Duration::from_secs(config.settle_delay_secs)).await;

        match process_event_once(node, broadcaster, store, config, event).await {
            Ok(EventOutcome::Reblogged) => {
                advanced += 1;
                info!(
                    "Reblogged @{}/{} (trx {})",
                    event.author, event.permlink, event.trx_id
                );
            }
            Ok(EventOutcome::AlreadyReblogged) => {
                advanced += 1;
                info!(
                    "@{}/{} already on the blog, checkpoint advanced",
                    event.author, event.permlink
                );
            }
            Err(e) => {
                // The checkpoint did not advance, so a later scan picks this
                // event up again; keep going with the rest of the queue.
                warn!("Skipping @{}/{}: {:#}", event.author, event.permlink, e);
            }
        }
    }

    Ok(advanced)
}

/// Process a single vote event: idempotency check, dispatch, checkpoint.
///
/// The checkpoint advances when the reblog was dispatched or already present
/// on the blog; it stays put when dispatch fails, and the error propagates
/// to the cycle loop.
pub async fn process_event_once<N, B, S>(
    node: &N,
    broadcaster: &B,
    store: &S,
    config: &Config,
    event: &VoteEvent,
) -> Result<EventOutcome>
where
    N: BlogSource,
    B: Broadcaster,
    S: CheckpointStore,
{
    let done = already_reblogged(
        node,
        &config.account,
        &event.author,
        &event.permlink,
        config.blog_probe,
    )
    .await?;

    let outcome = if done {
        EventOutcome::AlreadyReblogged
    } else {
        broadcaster
            .reblog(&config.account, &event.author, &event.permlink)
            .await
            .context("reblog dispatch failed")?;
        EventOutcome::Reblogged
    };

    store
        .save(&Checkpoint {
            block: event.block,
            trx_id: event.trx_id.clone(),
        })
        .context("checkpoint save failed")?;

    Ok(outcome)
}

/// Narrow raw history entries to positive votes cast by `voter`,
/// preserving input order. Malformed payloads are skipped, not errored.
///
/// The cut against the checkpoint is deliberately not applied here; that is
/// `newer_than`'s job.
pub fn filter_votes(entries: &[HistoryEntry], voter: &str) -> Vec<VoteEvent> {
    entries
        .iter()
        .filter_map(|entry| {
            let (op_name, payload) = &entry.op;
            if op_name != "vote" {
                return None;
            }

            let vote: VoteOp = serde_json::from_value(payload.clone()).ok()?;
            if vote.voter != voter || vote.weight <= 0 {
                return None;
            }

            Some(VoteEvent {
                trx_id: entry.trx_id.clone(),
                block: entry.block,
                author: vote.author,
                permlink: vote.permlink,
            })
        })
        .collect()
}

/// Return the events strictly after the checkpointed one, in original order.
///
/// When the checkpointed trx_id is not in the window (window too short, or
/// checkpoint stale beyond the fetch horizon) the entire input is returned:
/// reprocessing is preferable to silently stalling forever, and duplicates
/// are caught by the idempotency check.
pub fn newer_than(events: Vec<VoteEvent>, checkpoint: &Checkpoint) -> Vec<VoteEvent> {
    match events
        .iter()
        .position(|event| event.trx_id == checkpoint.trx_id)
    {
        Some(position) => events.into_iter().skip(position + 1).collect(),
        None => events,
    }
}

/// Start id far past any real blog entry; the feed clamps it to the head,
/// so the query returns the newest entries.
const BLOG_HEAD_START: u32 = 999_999;

/// Query the blog feed and check whether `@author/permlink` is already on it.
///
/// Called once per event at dispatch time; results are never cached, since
/// the blog can change between fetch and dispatch.
pub async fn already_reblogged<B: BlogSource>(
    blog: &B,
    account: &str,
    author: &str,
    permlink: &str,
    probe: u32,
) -> Result<bool> {
    let entries = blog
        .blog_entries(account, BLOG_HEAD_START, probe)
        .await
        .context("blog feed fetch failed")?;

    Ok(entries
        .iter()
        .any(|entry| entry.author == author && entry.permlink == permlink))
}
