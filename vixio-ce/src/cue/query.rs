//! Read-only view for executors and dashboards
//!
//! Holds no mutation capability; safe for any number of concurrent pollers.

use std::sync::Arc;

use super::playhead::{PlayheadState, PlayheadTracker};
use super::registry::CueRegistry;
use super::types::CueItem;

#[derive(Clone)]
pub struct QueryView {
    registry: Arc<CueRegistry>,
    playhead: Arc<PlayheadTracker>,
}

impl QueryView {
    pub fn new(registry: Arc<CueRegistry>, playhead: Arc<PlayheadTracker>) -> Self {
        Self { registry, playhead }
    }

    /// Every pending cue in dispatch order
    pub async fn list_pending(&self) -> Vec<CueItem> {
        self.registry.snapshot().await
    }

    /// The next `limit` cues in dispatch order
    pub async fn peek_pending(&self, limit: usize) -> Vec<CueItem> {
        self.registry.peek(limit).await
    }

    pub async fn pending_count(&self) -> usize {
        self.registry.len().await
    }

    pub async fn current_playhead(&self) -> PlayheadState {
        self.playhead.read().await
    }
}
