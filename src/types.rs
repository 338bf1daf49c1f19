use serde::{Deserialize, Serialize};

/// Durable marker of the last fully processed vote.
///
/// Written only after a reblog is confirmed dispatched (or confirmed already
/// present on the blog), so a restart resumes strictly after this position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Block that contained the checkpointed transaction.
    pub block: u64,
    /// Transaction id of the checkpointed vote.
    pub trx_id: String,
}

/// One raw account-history item as reported by the node.
///
/// The operation payload stays opaque until the filter inspects it; entries
/// carry many operation kinds and only `"vote"` ever matters here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub block: u64,
    pub trx_id: String,
    /// `(op_name, op_payload)` exactly as serialized on the wire.
    pub op: (String, serde_json::Value),
}

/// Payload of a `"vote"` operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteOp {
    pub voter: String,
    pub author: String,
    pub permlink: String,
    pub weight: i32,
}

/// A qualifying vote by the tracked account, projected out of a raw entry.
/// Ephemeral; never persisted independently of the checkpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteEvent {
    pub trx_id: String,
    pub block: u64,
    pub author: String,
    pub permlink: String,
}

/// One public blog item, used for point-in-time membership checks only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogEntry {
    pub author: String,
    pub permlink: String,
}

/// How a single vote event was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// The reblog was broadcast this cycle.
    Reblogged,
    /// The blog already carried the post; nothing was broadcast.
    AlreadyReblogged,
}
