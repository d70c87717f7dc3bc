// Platform id newtypes and inbound event shapes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A platform user id (snowflake, carried as a string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

/// A platform channel id (snowflake, carried as a string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Inline mention in the platform's message syntax.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.0)
    }
}

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Inline mention in the platform's message syntax.
    pub fn mention(&self) -> String {
        format!("<#{}>", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A message with attachments, as translated by the platform adapter.
///
/// Only the fields the pipeline consumes: author, origin channel, and the
/// attachment URLs. Message text is never inspected.
#[derive(Debug, Clone)]
pub struct MessageEvent {
    pub author: UserId,
    pub channel: ChannelId,
    pub attachment_urls: Vec<String>,
}

/// A member joining, carrying their display-avatar URL.
#[derive(Debug, Clone)]
pub struct MemberJoinEvent {
    pub user: UserId,
    pub avatar_url: String,
}
