//! Core ReblogSmith struct and initialization - no business logic.

use anyhow::Result;
use tracing::info;

use crate::broadcast::{BroadcastVariant, NoopBroadcaster, SignerBroadcaster};
use crate::checkpoint::{CheckpointVariant, FileCheckpointStore};
use crate::config::Config;
use crate::node::{CondenserClient, NodeVariant};

/// Main application orchestrator.
pub struct ReblogSmith {
    /// Node serving account history and the blog feed.
    pub node: NodeVariant,

    /// Dispatcher for the reblog side effect.
    pub broadcaster: BroadcastVariant,

    /// Durable checkpoint store.
    pub checkpoint: CheckpointVariant,

    /// Global configuration.
    pub config: Config,
}

impl ReblogSmith {
    /// Create a new ReblogSmith.
    pub fn new(
        node: NodeVariant,
        broadcaster: BroadcastVariant,
        checkpoint: CheckpointVariant,
        config: Config,
    ) -> Self {
        Self {
            node,
            broadcaster,
            checkpoint,
            config,
        }
    }

    /// Wire up the production implementations from configuration.
    pub fn initialize(config: Config) -> Result<Self> {
        let node = NodeVariant::Condenser(CondenserClient::new(config.node_url.clone()));

        let broadcaster = if config.dry_run {
            info!("Dry run: broadcasts are disabled");
            BroadcastVariant::Noop(NoopBroadcaster)
        } else {
            BroadcastVariant::Signer(SignerBroadcaster::new(
                config.broadcast_url.clone(),
                config.posting_token.clone(),
            ))
        };

        let checkpoint =
            CheckpointVariant::File(FileCheckpointStore::new(config.checkpoint_path.clone()));

        Ok(Self::new(node, broadcaster, checkpoint, config))
    }
}
