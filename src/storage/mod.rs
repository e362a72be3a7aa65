//! Profile and leaderboard persistence behind the `ProfileStore` and
//! `LeaderboardStore` traits.

#![allow(unused_imports)]

pub mod background;
pub mod json;
pub mod leaderboard;
pub mod memory;
pub mod types;

pub use background::{BackgroundLeaderboard, BackgroundSaver};
pub use json::JsonStore;
pub use leaderboard::{insert_ranked, LeaderboardHub, Subscription};
pub use memory::MemoryStore;
pub use types::*;

use std::sync::{Mutex, MutexGuard};

/// Locks `mutex`, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
