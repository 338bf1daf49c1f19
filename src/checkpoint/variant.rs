use super::file::FileCheckpointStore;
use super::mock::MockCheckpointStore;
use crate::traits::{CheckpointError, CheckpointStore};
use crate::types::Checkpoint;

/// Enum representing all possible checkpoint store implementations.
pub enum CheckpointVariant {
    File(FileCheckpointStore),
    Mock(MockCheckpointStore),
}

impl CheckpointStore for CheckpointVariant {
    fn name(&self) -> &'static str {
        match self {
            CheckpointVariant::File(inner) => inner.name(),
            CheckpointVariant::Mock(inner) => inner.name(),
        }
    }

    fn load(&self) -> Result<Checkpoint, CheckpointError> {
        match self {
            CheckpointVariant::File(inner) => inner.load(),
            CheckpointVariant::Mock(inner) => inner.load(),
        }
    }

    fn save(&self, checkpoint: &Checkpoint) -> Result<(), CheckpointError> {
        match self {
            CheckpointVariant::File(inner) => inner.save(checkpoint),
            CheckpointVariant::Mock(inner) => inner.save(checkpoint),
        }
    }
}
