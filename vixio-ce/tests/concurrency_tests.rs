//! Concurrency and ordering tests for the cue registry
//!
//! Tests cover:
//! - Randomized priority sequences snapshot in (-priority, sequence) order
//! - Concurrent inserts: no losses, no duplicate ids or sequences
//! - Concurrent claims: every cue handed to exactly one claimant
//! - Snapshots taken during inserts are always internally ordered

use rand::Rng;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinSet;
use vixio_ce::cue::{CueItem, CuePayload, CueRegistry, Priority, TriggerIntake};

fn payload(n: usize) -> CuePayload {
    let mut map = CuePayload::new();
    map.insert("n".to_string(), json!(n));
    map
}

fn assert_ordered(items: &[CueItem]) {
    for pair in items.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let in_order = a.priority > b.priority
            || (a.priority == b.priority && a.sequence < b.sequence);
        assert!(
            in_order,
            "out of order: (p{}, s{}) before (p{}, s{})",
            a.priority, a.sequence, b.priority, b.sequence
        );
    }
}

#[tokio::test]
async fn test_random_priorities_snapshot_in_sorted_order() {
    let registry = CueRegistry::new();
    let mut rng = rand::thread_rng();

    let mut expected = Vec::new();
    for n in 0..500 {
        let priority = Priority::clamped(rng.gen_range(0..=100));
        let receipt = registry.insert(priority, payload(n)).await;
        expected.push((priority, receipt.sequence));
    }

    // Reference order: stable sort by priority descending keeps sequence order
    expected.sort_by(|a, b| b.0.cmp(&a.0));

    let snapshot = registry.snapshot().await;
    let actual: Vec<(Priority, u64)> = snapshot.iter().map(|c| (c.priority, c.sequence)).collect();
    assert_eq!(actual, expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_inserts_lose_nothing() {
    const TASKS: usize = 16;
    const PER_TASK: usize = 100;

    let registry = Arc::new(CueRegistry::new());
    let intake = TriggerIntake::new(Arc::clone(&registry));

    let mut tasks = JoinSet::new();
    for t in 0..TASKS {
        let intake = intake.clone();
        tasks.spawn(async move {
            for i in 0..PER_TASK {
                let priority = ((t * 7 + i) % 101) as i64;
                intake
                    .submit(json!({"priority": priority, "task": t, "i": i}))
                    .await
                    .expect("trigger should be accepted");
            }
        });
    }
    while let Some(result) = tasks.join_next().await {
        result.expect("task panicked");
    }

    let snapshot = registry.snapshot().await;
    assert_eq!(snapshot.len(), TASKS * PER_TASK);

    let ids: HashSet<_> = snapshot.iter().map(|c| c.id).collect();
    let sequences: HashSet<_> = snapshot.iter().map(|c| c.sequence).collect();
    assert_eq!(ids.len(), TASKS * PER_TASK);
    assert_eq!(sequences.len(), TASKS * PER_TASK);
    assert_eq!(sequences.iter().max().copied(), Some((TASKS * PER_TASK) as u64));

    assert_ordered(&snapshot);

    // Per-task FIFO survives interleaving within each priority
    for t in 0..TASKS {
        let mine: Vec<&CueItem> = snapshot.iter().filter(|c| c.payload["task"] == t).collect();
        for pair in mine.windows(2) {
            if pair[0].priority == pair[1].priority {
                assert!(pair[0].payload["i"].as_u64() < pair[1].payload["i"].as_u64());
            }
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_claims_are_exclusive() {
    const CUES: usize = 1000;
    const CLAIMANTS: usize = 8;

    let registry = Arc::new(CueRegistry::new());
    for n in 0..CUES {
        registry.insert(Priority::clamped((n % 101) as i64), payload(n)).await;
    }

    let mut tasks = JoinSet::new();
    for _ in 0..CLAIMANTS {
        let registry = Arc::clone(&registry);
        tasks.spawn(async move {
            let mut claimed = Vec::new();
            while let Some(cue) = registry.claim().await {
                claimed.push(cue.id);
            }
            claimed
        });
    }

    let mut all = Vec::new();
    while let Some(result) = tasks.join_next().await {
        all.extend(result.expect("task panicked"));
    }

    let unique: HashSet<_> = all.iter().copied().collect();
    assert_eq!(all.len(), CUES, "every cue claimed exactly once");
    assert_eq!(unique.len(), CUES, "no cue claimed twice");
    assert!(registry.snapshot().await.is_empty());
    assert!(registry.claim().await.is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_claimed_cues_never_reappear_in_snapshots() {
    let registry = Arc::new(CueRegistry::new());
    for n in 0..200 {
        registry.insert(Priority::clamped((n % 5) as i64 * 20), payload(n)).await;
    }

    let claimer = {
        let registry = Arc::clone(&registry);
        tokio::spawn(async move {
            let mut claimed = HashSet::new();
            while let Some(cue) = registry.claim().await {
                claimed.insert(cue.id);
                // Any snapshot after the claim must exclude everything claimed so far
                let snapshot = registry.snapshot().await;
                assert!(snapshot.iter().all(|c| !claimed.contains(&c.id)));
            }
            claimed.len()
        })
    };

    assert_eq!(claimer.await.unwrap(), 200);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_snapshots_during_inserts_are_ordered() {
    let registry = Arc::new(CueRegistry::new());

    let writer = {
        let registry = Arc::clone(&registry);
        tokio::spawn(async move {
            for n in 0..2000 {
                registry.insert(Priority::clamped((n * 37 % 101) as i64), payload(n)).await;
            }
        })
    };

    let reader = {
        let registry = Arc::clone(&registry);
        tokio::spawn(async move {
            let mut last_len = 0;
            for _ in 0..200 {
                let snapshot = registry.snapshot().await;
                assert_ordered(&snapshot);
                // Nothing is claimed here, so the registry only grows
                assert!(snapshot.len() >= last_len);
                last_len = snapshot.len();
                tokio::task::yield_now().await;
            }
        })
    };

    writer.await.unwrap();
    reader.await.unwrap();
    assert_eq!(registry.len().await, 2000);
}
