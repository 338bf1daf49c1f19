pub mod mock;
pub mod noop;
pub mod signer;
pub mod variant;

pub use mock::MockBroadcaster;
pub use noop::NoopBroadcaster;
pub use signer::SignerBroadcaster;
pub use variant::BroadcastVariant;
