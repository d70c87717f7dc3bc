// Outbound chat port: the delivery seam the platform adapter implements.

use anyhow::Result;
use async_trait::async_trait;

use crate::platform::types::ChannelId;
use crate::report::Report;

/// Trait for delivering pipeline output to the chat platform.
///
/// Implementations are expected to decorate reports with the bot's own
/// author tag at send time, since the adapter owns the bot identity and
/// the pipeline doesn't. Delivery failures (deleted channel, missing
/// permissions) surface as errors and are logged by the caller; nothing
/// is retried.
#[async_trait]
pub trait ChatPort: Send + Sync {
    /// Deliver a formatted moderation report to a channel.
    async fn send_report(&self, channel: &ChannelId, report: &Report) -> Result<()>;

    /// Send a plain text message to a channel.
    async fn send_text(&self, channel: &ChannelId, text: &str) -> Result<()>;
}
