// Report channel store: the single piece of runtime-mutable configuration.
//
// Holds the destination channel for moderation reports. Unset at process
// start; set by the /setup command; read on every routing decision.
// Volatile, in-memory only; a restart forgets it. Cloned handles share
// one destination, so the store is injected into the handlers and the
// command path rather than living in a process global.

use std::sync::{Arc, RwLock};

use crate::platform::types::ChannelId;

/// Shared handle to the configured report destination.
#[derive(Clone, Default)]
pub struct ReportChannelStore {
    inner: Arc<RwLock<Option<ChannelId>>>,
}

impl ReportChannelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the destination. Writes are rare and human-triggered;
    /// last write wins.
    pub fn set(&self, channel: ChannelId) {
        let mut slot = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(channel);
    }

    /// The current destination, if one has been configured.
    pub fn get(&self) -> Option<ChannelId> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
