// Message-attachment handling: fan out over attachments with bounded
// concurrency.
//
// Each attachment is an independent check with no ordering guarantee
// relative to its siblings. The bound keeps an attachment burst from
// turning into an unbounded burst of outbound classification calls.

use futures::stream::{self, StreamExt};
use tracing::info;

use crate::media::{MediaReference, MediaSource};
use crate::platform::types::MessageEvent;

use super::{CheckOutcome, Moderator};

impl Moderator {
    /// Check every attachment on a message. Returns the per-attachment
    /// outcomes (unordered).
    pub async fn handle_message(&self, event: &MessageEvent) -> Vec<CheckOutcome> {
        if event.attachment_urls.is_empty() {
            return Vec::new();
        }

        let outcomes: Vec<CheckOutcome> =
            stream::iter(event.attachment_urls.iter().map(|url| {
                let media = MediaReference {
                    url: url.clone(),
                    user: event.author.clone(),
                    source: MediaSource::Attachment {
                        channel: event.channel.clone(),
                    },
                };
                self.check_media(media)
            }))
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let flagged = count(&outcomes, CheckOutcome::Flagged);
        let unavailable = count(&outcomes, CheckOutcome::Unavailable);
        info!(
            attachments = outcomes.len(),
            flagged,
            invalid = count(&outcomes, CheckOutcome::Invalid),
            unavailable,
            "Message attachments checked"
        );

        outcomes
    }
}

fn count(outcomes: &[CheckOutcome], which: CheckOutcome) -> usize {
    outcomes.iter().filter(|o| **o == which).count()
}
