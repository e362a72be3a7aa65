//! In-process store. Used when no home directory is available and in tests.

use super::leaderboard::{insert_ranked, LeaderboardHub, Subscription};
use super::lock;
use super::types::{
    LeaderboardCallback, LeaderboardEntry, LeaderboardStore, ProfileStore, ProfileUpdate,
};
use crate::core::constants::LEADERBOARD_SIZE;
use crate::progression::PlayerProfile;
use crate::session::SessionResult;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct MemoryInner {
    profiles: HashMap<String, PlayerProfile>,
    entries: Vec<LeaderboardEntry>,
    fail_saves: bool,
    fail_submits: bool,
    save_count: usize,
}

/// Clones share the same underlying data.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
    hub: LeaderboardHub,
    leaderboard_size: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn key(account_id: Option<&str>) -> String {
    account_id.unwrap_or_default().to_string()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryInner::default())),
            hub: LeaderboardHub::new(),
            leaderboard_size: LEADERBOARD_SIZE,
        }
    }

    pub fn with_leaderboard_size(mut self, size: usize) -> Self {
        self.leaderboard_size = size.max(1);
        self
    }

    /// Seeds a stored profile.
    pub fn insert_profile(&self, account_id: Option<&str>, profile: PlayerProfile) {
        lock(&self.inner).profiles.insert(key(account_id), profile);
    }

    pub fn stored_profile(&self, account_id: Option<&str>) -> Option<PlayerProfile> {
        lock(&self.inner).profiles.get(&key(account_id)).cloned()
    }

    /// Makes every following `save_profile` fail.
    pub fn set_fail_saves(&self, fail: bool) {
        lock(&self.inner).fail_saves = fail;
    }

    /// Makes every following `submit_entry` fail.
    pub fn set_fail_submits(&self, fail: bool) {
        lock(&self.inner).fail_submits = fail;
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        lock(&self.inner).save_count
    }
}

impl ProfileStore for MemoryStore {
    fn load_profile(&self, account_id: Option<&str>) -> PlayerProfile {
        self.stored_profile(account_id)
            .map(PlayerProfile::validated)
            .unwrap_or_default()
    }

    fn save_profile(&self, account_id: Option<&str>, update: &ProfileUpdate) -> io::Result<()> {
        let mut inner = lock(&self.inner);
        if inner.fail_saves {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "profile store unavailable",
            ));
        }
        let stored = inner.profiles.remove(&key(account_id)).unwrap_or_default();
        inner
            .profiles
            .insert(key(account_id), update.apply_to(stored));
        inner.save_count += 1;
        Ok(())
    }
}

impl LeaderboardStore for MemoryStore {
    fn submit_entry(
        &self,
        profile: &PlayerProfile,
        result: &SessionResult,
    ) -> io::Result<Option<u32>> {
        let mut inner = lock(&self.inner);
        if inner.fail_submits {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "leaderboard unavailable",
            ));
        }
        let rank = insert_ranked(
            &mut inner.entries,
            LeaderboardEntry::from_result(profile, result),
            self.leaderboard_size,
        );
        let snapshot = inner.entries.clone();
        drop(inner);
        self.hub.publish(&snapshot);
        Ok(rank)
    }

    fn top_entries(&self) -> Vec<LeaderboardEntry> {
        lock(&self.inner).entries.clone()
    }

    fn subscribe(&self, callback: LeaderboardCallback) -> Subscription {
        let current = self.top_entries();
        self.hub.subscribe(callback, &current)
    }
}
