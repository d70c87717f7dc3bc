// Administrative command handlers.
//
// The platform adapter owns command registration and invocation plumbing;
// it calls these with the already-extracted option values and sends the
// returned reply text back to the invoker.

use std::future::Future;

use anyhow::Result;
use tracing::{error, info};

use crate::platform::types::ChannelId;
use crate::report::ReportChannelStore;

/// Reply sent when a command handler errors out. The real failure stays
/// in the server log.
pub const COMMAND_FAILED_REPLY: &str = "There was an error while executing this command!";

/// `/setup <channel>`: point moderation reports at a text channel.
///
/// Overwrites any previously configured destination. Returns the reply
/// text naming the chosen channel.
pub fn setup(store: &ReportChannelStore, channel: ChannelId, channel_name: &str) -> String {
    info!(channel = %channel, name = channel_name, "Report channel configured");
    store.set(channel);
    format!("The channel that will be used for logging will be: {channel_name}.")
}

/// Run a command handler, containing any failure.
///
/// An `Err` is logged server-side and turned into a generic failure
/// reply. A broken command must never take the bot down or leak its
/// error to the channel.
pub async fn dispatch<F, Fut>(command_name: &str, run: F) -> String
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<String>>,
{
    match run().await {
        Ok(reply) => reply,
        Err(error) => {
            error!(command = command_name, error = %error, "Command execution failed");
            COMMAND_FAILED_REPLY.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_stores_the_channel_and_names_it_in_the_reply() {
        let store = ReportChannelStore::new();
        let reply = setup(&store, ChannelId::new("9001"), "mod-logs");

        assert_eq!(store.get(), Some(ChannelId::new("9001")));
        assert!(reply.contains("mod-logs"));
    }

    #[tokio::test]
    async fn dispatch_passes_successful_replies_through() {
        let reply = dispatch("setup", || async { Ok("done".to_string()) }).await;
        assert_eq!(reply, "done");
    }

    #[tokio::test]
    async fn dispatch_contains_handler_failures() {
        let reply = dispatch("setup", || async { anyhow::bail!("boom") }).await;
        assert_eq!(reply, COMMAND_FAILED_REPLY);
    }
}
