// Avatar checking on member join.

use crate::media::{MediaReference, MediaSource};
use crate::platform::types::MemberJoinEvent;

use super::{CheckOutcome, Moderator};

impl Moderator {
    /// Check a joining member's display avatar.
    pub async fn handle_member_join(&self, event: &MemberJoinEvent) -> CheckOutcome {
        let media = MediaReference {
            url: event.avatar_url.clone(),
            user: event.user.clone(),
            source: MediaSource::Avatar,
        };
        self.check_media(media).await
    }
}
