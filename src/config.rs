use clap::Parser;

/// Daemon configuration, parsed from CLI arguments with environment fallbacks.
#[derive(Parser, Debug, Clone)]
#[command(name = "reblogsmith", about = "Reblog every post the tracked account upvotes")]
pub struct Config {
    /// Account whose votes are tracked and on whose behalf reblogs are broadcast.
    #[arg(long, env = "REBLOG_ACCOUNT")]
    pub account: String,

    /// Posting-scoped access token for the broadcast endpoint.
    #[arg(long, env = "REBLOG_POSTING_TOKEN", default_value = "", hide_env_values = true)]
    pub posting_token: String,

    /// Condenser-API node used for account history and blog lookups.
    #[arg(long, env = "REBLOG_NODE_URL", default_value = "https://api.hive.blog")]
    pub node_url: String,

    /// Broadcast endpoint that signs and submits the reblog operation.
    #[arg(
        long,
        env = "REBLOG_BROADCAST_URL",
        default_value = "https://hivesigner.com/api/broadcast"
    )]
    pub broadcast_url: String,

    /// Path of the durable checkpoint file.
    #[arg(long, env = "REBLOG_CHECKPOINT_PATH", default_value = "./checkpoint.json")]
    pub checkpoint_path: String,

    /// How many recent history entries to fetch each cycle.
    #[arg(long, env = "REBLOG_HISTORY_WINDOW", default_value_t = 50)]
    pub history_window: u32,

    /// Seconds between polling cycles.
    #[arg(long, env = "REBLOG_POLL_INTERVAL_SECS", default_value_t = 180)]
    pub poll_interval_secs: u64,

    /// Seconds to wait before acting on each event, letting the log stabilize.
    #[arg(long, env = "REBLOG_SETTLE_DELAY_SECS", default_value_t = 3)]
    pub settle_delay_secs: u64,

    /// How many recent blog entries to probe for the idempotency check.
    #[arg(long, env = "REBLOG_BLOG_PROBE", default_value_t = 20)]
    pub blog_probe: u32,

    /// Log what would be reblogged without broadcasting anything.
    #[arg(long, env = "REBLOG_DRY_RUN", default_value_t = false)]
    pub dry_run: bool,
}
