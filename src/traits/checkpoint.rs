use thiserror::Error;

use crate::types::Checkpoint;

/// Errors from checkpoint persistence.
///
/// `NotFound` and `Corrupt` both abort the current cycle: processing never
/// starts without a known position, and a guessed position could silently
/// skip or reprocess events.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("no checkpoint recorded; seed the checkpoint file before starting")]
    NotFound,

    #[error("checkpoint is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Durable store for the single `(block, trx_id)` checkpoint.
pub trait CheckpointStore: Send + Sync {
    /// Store name for logging.
    fn name(&self) -> &'static str;

    /// Read the persisted checkpoint.
    fn load(&self) -> Result<Checkpoint, CheckpointError>;

    /// Overwrite the persisted checkpoint.
    ///
    /// The new value must be durable before this returns; a subsequent
    /// `load`, even after a process restart, sees it.
    fn save(&self, checkpoint: &Checkpoint) -> Result<(), CheckpointError>;
}
