use std::sync::{Arc, Mutex};

use crate::traits::{CheckpointError, CheckpointStore};
use crate::types::Checkpoint;

/// Mock checkpoint store for testing.
/// Keeps the checkpoint in memory and records every save for verification.
#[derive(Clone)]
pub struct MockCheckpointStore {
    pub current: Arc<Mutex<Option<Checkpoint>>>,
    pub saves: Arc<Mutex<Vec<Checkpoint>>>,
    pub corrupt: Arc<Mutex<bool>>,
}

impl MockCheckpointStore {
    /// Empty store: `load` reports `NotFound`.
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(None)),
            saves: Arc::new(Mutex::new(Vec::new())),
            corrupt: Arc::new(Mutex::new(false)),
        }
    }

    /// Store seeded with an existing checkpoint.
    pub fn seeded(checkpoint: Checkpoint) -> Self {
        let store = Self::new();
        *store.current.lock().unwrap() = Some(checkpoint);
        store
    }

    /// Make subsequent `load` calls report a corrupt checkpoint.
    pub fn set_corrupt(&self, corrupt: bool) {
        *self.corrupt.lock().unwrap() = corrupt;
    }

    /// Get all recorded saves (for testing/verification).
    pub fn get_saves(&self) -> Vec<Checkpoint> {
        self.saves.lock().unwrap().clone()
    }
}

impl Default for MockCheckpointStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckpointStore for MockCheckpointStore {
    fn name(&self) -> &'static str {
        "mock-checkpoint"
    }

    fn load(&self) -> Result<Checkpoint, CheckpointError> {
        if *self.corrupt.lock().unwrap() {
            let parse_err = serde_json::from_str::<Checkpoint>("not a checkpoint")
                .expect_err("literal is not valid JSON");
            return Err(CheckpointError::Corrupt(parse_err));
        }

        self.current
            .lock()
            .unwrap()
            .clone()
            .ok_or(CheckpointError::NotFound)
    }

    fn save(&self, checkpoint: &Checkpoint) -> Result<(), CheckpointError> {
        *self.current.lock().unwrap() = Some(checkpoint.clone());
        self.saves.lock().unwrap().push(checkpoint.clone());
        Ok(())
    }
}
