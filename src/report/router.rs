// Verdict routing: decides what, if anything, leaves the process.
//
// Flagged and unanalyzable media produce a report to the configured
// destination. With no destination configured, message-sourced media gets
// a setup reminder in its origin channel; avatar checks have no origin
// channel and degrade to a server-side log. Appropriate media produces
// nothing but a diagnostic entry.

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::platform::port::ChatPort;
use crate::platform::types::{ChannelId, UserId};
use crate::verdict::Verdict;

use super::store::ReportChannelStore;
use super::{Report, SETUP_REMINDER};

/// What the pipeline concluded about one media reference.
#[derive(Debug)]
pub enum Disposition {
    /// Attachment flagged inappropriate.
    FlaggedImage {
        user: UserId,
        channel: ChannelId,
        verdict: Verdict,
    },
    /// Attachment failed the validity check.
    InvalidMedia { user: UserId, channel: ChannelId },
    /// Avatar flagged inappropriate.
    FlaggedAvatar { user: UserId, verdict: Verdict },
}

impl Disposition {
    fn origin_channel(&self) -> Option<&ChannelId> {
        match self {
            Disposition::FlaggedImage { channel, .. }
            | Disposition::InvalidMedia { channel, .. } => Some(channel),
            Disposition::FlaggedAvatar { .. } => None,
        }
    }

    fn into_report(self) -> Report {
        match self {
            Disposition::FlaggedImage {
                user,
                channel,
                verdict,
            } => Report::inappropriate_image(&user, &channel, &verdict),
            Disposition::InvalidMedia { user, channel } => Report::invalid_media(&user, &channel),
            Disposition::FlaggedAvatar { user, verdict } => {
                Report::inappropriate_avatar(&user, &verdict)
            }
        }
    }
}

/// Deliver a disposition to the configured report channel, or fall back
/// to the setup reminder when none is configured.
///
/// Delivery failures (bad channel id, missing permissions) surface as
/// errors; the caller logs and contains them.
pub async fn deliver(
    port: &dyn ChatPort,
    store: &ReportChannelStore,
    disposition: Disposition,
) -> Result<()> {
    let Some(destination) = store.get() else {
        return remind_setup(port, disposition).await;
    };

    let report = disposition.into_report();
    info!(
        channel = %destination,
        title = %report.title,
        "Delivering moderation report"
    );
    port.send_report(&destination, &report).await
}

async fn remind_setup(port: &dyn ChatPort, disposition: Disposition) -> Result<()> {
    match disposition.origin_channel() {
        Some(origin) => {
            debug!(channel = %origin, "No report channel configured, sending setup reminder");
            port.send_text(origin, SETUP_REMINDER).await
        }
        None => {
            // Avatar checks have nowhere to put the reminder.
            warn!("No report channel configured, dropping avatar report");
            Ok(())
        }
    }
}
