use async_trait::async_trait;

pub mod discord;
pub mod discord_slash;

pub use discord::DiscordAdapter;

/// All channel adapters implement this trait.
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    /// Human-readable adapter name for logging.
    fn name(&self) -> &str;

    /// Connect and serve interactions until the connection ends.
    async fn start(&self) -> anyhow::Result<()>;
}
