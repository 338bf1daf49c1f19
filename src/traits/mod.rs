pub mod blog;
pub mod broadcast;
pub mod checkpoint;
pub mod history;

pub use blog::BlogSource;
pub use broadcast::Broadcaster;
pub use checkpoint::CheckpointError;
pub use checkpoint::CheckpointStore;
pub use history::HistorySource;
