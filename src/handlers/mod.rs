// Inbound event handlers: the pipeline entry points a platform adapter
// calls into.
//
// `Moderator` owns the injected dependencies (classifier, chat port,
// report channel store) so multiple configurations can coexist in tests.
// Failures are contained per media item: one failing check never
// propagates out of a handler.

pub mod commands;
pub mod member;
pub mod message;

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::classifier::ImageClassifier;
use crate::media::{self, MediaReference, MediaSource};
use crate::platform::port::ChatPort;
use crate::report::router::Disposition;
use crate::report::{self, ReportChannelStore};
use crate::verdict::Verdict;

/// How one media check concluded. Used for per-message summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Flagged,
    Clean,
    Invalid,
    /// The classifier could not be reached or errored. The verdict is
    /// indeterminate and no report is produced.
    Unavailable,
}

/// The moderation pipeline with its dependencies injected.
pub struct Moderator {
    classifier: Arc<dyn ImageClassifier>,
    port: Arc<dyn ChatPort>,
    store: ReportChannelStore,
    /// Max concurrent classification calls per message.
    concurrency: usize,
}

impl Moderator {
    pub fn new(
        classifier: Arc<dyn ImageClassifier>,
        port: Arc<dyn ChatPort>,
        store: ReportChannelStore,
        concurrency: usize,
    ) -> Self {
        Self {
            classifier,
            port,
            store,
            // A zero limit would stall the attachment stream forever.
            concurrency: concurrency.max(1),
        }
    }

    pub fn store(&self) -> &ReportChannelStore {
        &self.store
    }

    /// Run one media reference through the full pipeline:
    /// validity filter -> classifier -> aggregation -> routing.
    ///
    /// Never fails: classifier and delivery errors are logged and
    /// contained here.
    pub async fn check_media(&self, media: MediaReference) -> CheckOutcome {
        info!(url = %media.url, source = ?media.source, "Received image");

        if !media::is_valid_image(&media.url) {
            return self.handle_invalid(media).await;
        }

        let classification = match self.classifier.classify(&media.url).await {
            Ok(classification) => classification,
            Err(error) => {
                warn!(url = %media.url, error = %error, "Classification unavailable");
                return CheckOutcome::Unavailable;
            }
        };

        let verdict = Verdict::from_classification(classification);
        if !verdict.inappropriate {
            debug!(url = %media.url, "Image is appropriate");
            return CheckOutcome::Clean;
        }

        let disposition = match media.source {
            MediaSource::Attachment { channel } => Disposition::FlaggedImage {
                user: media.user,
                channel,
                verdict,
            },
            MediaSource::Avatar => Disposition::FlaggedAvatar {
                user: media.user,
                verdict,
            },
        };
        self.route(disposition).await;
        CheckOutcome::Flagged
    }

    async fn handle_invalid(&self, media: MediaReference) -> CheckOutcome {
        match media.source {
            MediaSource::Attachment { channel } => {
                self.route(Disposition::InvalidMedia {
                    user: media.user,
                    channel,
                })
                .await;
            }
            MediaSource::Avatar => {
                // No invalid-avatar report shape and no origin channel to
                // remind; record it and move on.
                warn!(url = %media.url, user = %media.user, "Avatar URL is not a supported image");
            }
        }
        CheckOutcome::Invalid
    }

    async fn route(&self, disposition: Disposition) {
        if let Err(error) = report::deliver(self.port.as_ref(), &self.store, disposition).await {
            warn!(error = %error, "Failed to deliver moderation report");
        }
    }
}
