//! Cue data model

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Opaque caller-supplied cue document
pub type CuePayload = Map<String, Value>;

/// Dispatch precedence, 0..=100; higher dispatches first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Priority(u8);

impl Priority {
    pub const MIN: Priority = Priority(0);
    pub const MAX: Priority = Priority(100);
    pub const DEFAULT: Priority = Priority(50);

    /// Clamp an arbitrary integer into range
    pub fn clamped(value: i64) -> Self {
        Priority(value.clamp(Self::MIN.0 as i64, Self::MAX.0 as i64) as u8)
    }

    /// Exact conversion, `None` when out of range
    pub fn new(value: i64) -> Option<Self> {
        if (Self::MIN.0 as i64..=Self::MAX.0 as i64).contains(&value) {
            Some(Priority(value as u8))
        } else {
            None
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cue lifecycle state
///
/// Only `Pending` is modeled here. Fired/cancelled states belong to the
/// executor that claimed the cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CueState {
    Pending,
}

impl fmt::Display for CueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CueState::Pending => write!(f, "pending"),
        }
    }
}

/// A pending cue held by the registry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CueItem {
    pub id: Uuid,
    pub priority: Priority,
    /// Insertion order; the tie-break among equal priorities
    pub sequence: u64,
    pub state: CueState,
    /// Wall-clock insertion time, for observability only
    pub enqueued_at: DateTime<Utc>,
    pub payload: CuePayload,
}

/// Result of a registry insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertReceipt {
    pub id: Uuid,
    pub sequence: u64,
    /// Pending count immediately after the insert
    pub queue_size: usize,
}
