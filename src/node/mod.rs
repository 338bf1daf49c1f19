pub mod condenser;
pub mod mock;
pub mod variant;

pub use condenser::CondenserClient;
pub use mock::MockNode;
pub use variant::NodeVariant;
