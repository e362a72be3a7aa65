//! Leaderboard ranking and push subscriptions.

use super::lock;
use super::types::{LeaderboardCallback, LeaderboardEntry};
use std::sync::{Arc, Mutex, Weak};

#[derive(Default)]
struct HubInner {
    next_id: u64,
    subscribers: Vec<(u64, LeaderboardCallback)>,
}

/// Fan-out of leaderboard changes to subscribers.
///
/// Callbacks run while the hub is locked, so they must not subscribe or
/// unsubscribe from inside the callback.
#[derive(Clone, Default)]
pub struct LeaderboardHub {
    inner: Arc<Mutex<HubInner>>,
}

impl LeaderboardHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` and immediately hands it `current`.
    pub fn subscribe(&self, callback: LeaderboardCallback, current: &[LeaderboardEntry]) -> Subscription {
        callback(current);
        let mut inner = lock(&self.inner);
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push((id, callback));
        Subscription {
            id,
            hub: Arc::downgrade(&self.inner),
        }
    }

    pub fn publish(&self, entries: &[LeaderboardEntry]) {
        let inner = lock(&self.inner);
        for (_, callback) in &inner.subscribers {
            callback(entries);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner).subscribers.len()
    }
}

/// Handle returned by `subscribe`. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    hub: Weak<Mutex<HubInner>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.hub.upgrade() {
            lock(&inner).subscribers.retain(|(id, _)| *id != self.id);
        }
    }
}

/// Inserts `entry` keeping `entries` sorted by score (ties go to the earlier
/// submission) and at most `size` long. Returns the entry's 1-based rank if it
/// survived the cut.
pub fn insert_ranked(entries: &mut Vec<LeaderboardEntry>, entry: LeaderboardEntry, size: usize) -> Option<u32> {
    let id = entry.id.clone();
    entries.push(entry);
    entries.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(a.submitted_at.cmp(&b.submitted_at))
    });
    entries.truncate(size);
    entries
        .iter()
        .position(|e| e.id == id)
        .map(|index| index as u32 + 1)
}
