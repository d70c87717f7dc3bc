// Candidate media references and the validity pre-filter.
//
// The filter is a syntactic check on the reference string, not content
// verification; content verification is the classifier's job. A string
// that isn't a well-formed URL but ends in a listed suffix still passes.

use crate::platform::types::{ChannelId, UserId};

/// Image suffixes the pipeline will submit for classification.
pub const IMAGE_FILE_TYPES: [&str; 5] = ["jpeg", "jpg", "png", "webp", "gif"];

/// Where a candidate image came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// A file attached to a message in a channel.
    Attachment { channel: ChannelId },
    /// A member's profile picture, checked on join.
    Avatar,
}

/// A candidate image for one classification request.
///
/// Ephemeral: constructed from an inbound event and dropped once the
/// verdict has been routed.
#[derive(Debug, Clone)]
pub struct MediaReference {
    pub url: String,
    pub user: UserId,
    pub source: MediaSource,
}

impl MediaReference {
    /// The origin channel, when the media came from a message.
    pub fn channel(&self) -> Option<&ChannelId> {
        match &self.source {
            MediaSource::Attachment { channel } => Some(channel),
            MediaSource::Avatar => None,
        }
    }
}

/// Check whether a reference string plausibly names a supported image.
///
/// Case-insensitive suffix match against [`IMAGE_FILE_TYPES`]. Accepts any
/// string; anything that doesn't end in a listed suffix is simply false.
pub fn is_valid_image(reference: &str) -> bool {
    let lower = reference.to_lowercase();
    IMAGE_FILE_TYPES.iter().any(|ext| lower.ends_with(ext))
}
