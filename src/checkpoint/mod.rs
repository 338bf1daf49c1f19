pub mod file;
pub mod mock;
pub mod variant;

pub use file::FileCheckpointStore;
pub use mock::MockCheckpointStore;
pub use variant::CheckpointVariant;
