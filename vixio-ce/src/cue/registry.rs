//! Cue registry
//!
//! Ordered store of pending cues. Order is priority descending, then
//! insertion sequence ascending. Wall-clock time never participates in the
//! order, so equal-priority cues stay FIFO across clock adjustments.
//!
//! Pending cues live in a `BTreeMap` keyed by `(Reverse(priority), sequence)`:
//! - insert: O(log n)
//! - claim (pop head): O(log n)
//! - peek first k: O(log n + k)
//! - snapshot: O(n)
//!
//! The sequence counter sits inside the same lock as the map, so sequence
//! assignment and insertion are a single atomic step.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::types::{CueItem, CuePayload, CueState, InsertReceipt, Priority};

/// Sort key: higher priority first, then lower sequence first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct OrderKey {
    rank: Reverse<Priority>,
    sequence: u64,
}

impl OrderKey {
    fn of(item: &CueItem) -> Self {
        Self {
            rank: Reverse(item.priority),
            sequence: item.sequence,
        }
    }
}

struct RegistryInner {
    /// Next sequence to hand out; starts at 1
    next_sequence: u64,
    pending: BTreeMap<OrderKey, CueItem>,
}

/// The process-wide ordered set of pending cues
///
/// Created once at startup and shared by `Arc`; there is no global instance.
pub struct CueRegistry {
    inner: RwLock<RegistryInner>,
}

impl CueRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(RegistryInner {
                next_sequence: 1,
                pending: BTreeMap::new(),
            }),
        }
    }

    /// Insert a cue, assigning its id and sequence
    ///
    /// Never fails. Existing cues keep their relative order.
    pub async fn insert(&self, priority: Priority, payload: CuePayload) -> InsertReceipt {
        // Everything that does not need the lock is prepared up front
        let id = Uuid::new_v4();
        let enqueued_at = vixio_common::time::now();

        let mut inner = self.inner.write().await;
        let sequence = inner.next_sequence;
        inner.next_sequence += 1;

        let item = CueItem {
            id,
            priority,
            sequence,
            state: CueState::Pending,
            enqueued_at,
            payload,
        };
        inner.pending.insert(OrderKey::of(&item), item);
        let queue_size = inner.pending.len();
        drop(inner);

        debug!(
            "Inserted cue {} (priority {}, sequence {}), {} pending",
            id, priority, sequence, queue_size
        );

        InsertReceipt {
            id,
            sequence,
            queue_size,
        }
    }

    /// Remove and return the head of the order
    ///
    /// Concurrent callers serialize on the write lock, so each cue is handed
    /// to at most one claimant. Returns `None` when nothing is pending.
    pub async fn claim(&self) -> Option<CueItem> {
        let claimed = self.inner.write().await.pending.pop_first().map(|(_, item)| item);

        if let Some(item) = &claimed {
            debug!(
                "Claimed cue {} (priority {}, sequence {})",
                item.id, item.priority, item.sequence
            );
        }

        claimed
    }

    /// Consistent ordered copy of every pending cue
    pub async fn snapshot(&self) -> Vec<CueItem> {
        self.inner.read().await.pending.values().cloned().collect()
    }

    /// First `limit` pending cues in order
    pub async fn peek(&self, limit: usize) -> Vec<CueItem> {
        self.inner
            .read()
            .await
            .pending
            .values()
            .take(limit)
            .cloned()
            .collect()
    }

    /// Number of pending cues
    pub async fn len(&self) -> usize {
        self.inner.read().await.pending.len()
    }

    /// Check if no cues are pending
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.pending.is_empty()
    }
}

impl Default for CueRegistry {
    fn default() -> Self {
        Self::new()
    }
}
