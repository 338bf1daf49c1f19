// Library exports for testing and external use

pub mod broadcast;
pub mod checkpoint;
pub mod config;
pub mod node;
pub mod reblogsmith;
pub mod telemetry;
pub mod traits;
pub mod types;

// Re-export commonly used types and traits
pub use config::Config;
pub use reblogsmith::ReblogSmith;
pub use traits::{BlogSource, Broadcaster, CheckpointError, CheckpointStore, HistorySource};
pub use types::{BlogEntry, Checkpoint, EventOutcome, HistoryEntry, VoteEvent, VoteOp};

// Re-export variant enums for convenience
pub use broadcast::{BroadcastVariant, MockBroadcaster};
pub use checkpoint::{CheckpointVariant, MockCheckpointStore};
pub use node::{MockNode, NodeVariant};
