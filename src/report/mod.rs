// Moderation reports: the formatted payloads delivered to the report channel.
//
// Three shapes exist: a flagged attachment, an attachment that failed the
// validity check, and a flagged avatar. Severity is carried as a color:
// red for confirmed-inappropriate content, amber for content that could
// not be analyzed.

pub mod router;
pub mod store;

use chrono::{DateTime, Utc};

use crate::platform::types::{ChannelId, UserId};
use crate::verdict::Verdict;

pub use router::{deliver, Disposition};
pub use store::ReportChannelStore;

/// Confirmed-inappropriate severity.
pub const COLOR_RED: u32 = 0xFF0000;
/// Could-not-analyze severity.
pub const COLOR_AMBER: u32 = 0xFFBF00;

/// Reminder sent to the origin channel when no report channel is set.
pub const SETUP_REMINDER: &str =
    "Please set up the logging channel with the /setup command. \
     You may need a staff member to do this.";

/// A formatted moderation report.
///
/// The platform adapter renders this as an embed and attaches its own
/// author tag at send time.
#[derive(Debug, Clone)]
pub struct Report {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub detected_at: DateTime<Utc>,
}

impl Report {
    /// An attachment confirmed inappropriate by the classifier.
    pub fn inappropriate_image(user: &UserId, channel: &ChannelId, verdict: &Verdict) -> Self {
        Self {
            title: "Inappropriate image detected".to_string(),
            description: format!(
                "Inappropriate image detected posted in the channel: {}\n\
                 Posted by: {}\n\
                 API response: {}",
                channel.mention(),
                user.mention(),
                verdict.classification.audit_json(),
            ),
            color: COLOR_RED,
            detected_at: Utc::now(),
        }
    }

    /// An attachment that failed the validity check.
    pub fn invalid_media(user: &UserId, channel: &ChannelId) -> Self {
        Self {
            title: "Image unable to be analyzed".to_string(),
            description: format!(
                "Invalid image type detected, posted in the channel: {}\n\
                 The image was posted by: {} and was unable to be analyzed.",
                channel.mention(),
                user.mention(),
            ),
            color: COLOR_AMBER,
            detected_at: Utc::now(),
        }
    }

    /// A member avatar confirmed inappropriate by the classifier.
    pub fn inappropriate_avatar(user: &UserId, verdict: &Verdict) -> Self {
        Self {
            title: "Inappropriate avatar detected".to_string(),
            description: format!(
                "Inappropriate avatar of: {}\n\
                 API response: {}",
                user.mention(),
                verdict.classification.audit_json(),
            ),
            color: COLOR_RED,
            detected_at: Utc::now(),
        }
    }
}
