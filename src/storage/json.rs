//! Local JSON saves under `~/.reelcast/`.

use super::leaderboard::{insert_ranked, LeaderboardHub, Subscription};
use super::lock;
use super::types::{
    LeaderboardCallback, LeaderboardEntry, LeaderboardStore, ProfileStore, ProfileUpdate,
};
use crate::core::constants::{
    ACCOUNT_ID_MAX_LENGTH, DATA_DIR_NAME, LEADERBOARD_FILE, LEADERBOARD_SIZE, PROFILE_FILE,
};
use crate::progression::PlayerProfile;
use crate::session::SessionResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Get the ~/.reelcast/ directory path, creating it if needed.
pub fn data_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(DATA_DIR_NAME);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// File-backed profile and leaderboard store.
pub struct JsonStore {
    dir: PathBuf,
    leaderboard_size: usize,
    hub: LeaderboardHub,
    // Serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl JsonStore {
    /// Store rooted at `~/.reelcast/`.
    pub fn new() -> io::Result<Self> {
        Ok(Self::with_dir(data_dir()?))
    }

    /// Store rooted at `dir`, created on first write.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            leaderboard_size: LEADERBOARD_SIZE,
            hub: LeaderboardHub::new(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_leaderboard_size(mut self, size: usize) -> Self {
        self.leaderboard_size = size.max(1);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `profile.json` for the local player, `profile-<account>.json` otherwise.
    pub fn profile_path(&self, account_id: Option<&str>) -> PathBuf {
        match account_id.map(sanitize_account_id) {
            Some(id) if !id.is_empty() => {
                let stem = PROFILE_FILE.trim_end_matches(".json");
                self.dir.join(format!("{}-{}.json", stem, id))
            }
            _ => self.dir.join(PROFILE_FILE),
        }
    }

    pub fn leaderboard_path(&self) -> PathBuf {
        self.dir.join(LEADERBOARD_FILE)
    }

    fn read_leaderboard(&self) -> Vec<LeaderboardEntry> {
        read_json_or_default(&self.leaderboard_path())
    }
}

impl ProfileStore for JsonStore {
    fn load_profile(&self, account_id: Option<&str>) -> PlayerProfile {
        let profile: PlayerProfile = read_json_or_default(&self.profile_path(account_id));
        profile.validated()
    }

    fn save_profile(&self, account_id: Option<&str>, update: &ProfileUpdate) -> io::Result<()> {
        let _guard = lock(&self.write_lock);
        let path = self.profile_path(account_id);
        let stored: PlayerProfile = read_json_or_default(&path);
        let merged = update.apply_to(stored);
        write_json_atomic(&path, &merged)?;
        debug!(path = %path.display(), "profile saved");
        Ok(())
    }
}

impl LeaderboardStore for JsonStore {
    fn submit_entry(
        &self,
        profile: &PlayerProfile,
        result: &SessionResult,
    ) -> io::Result<Option<u32>> {
        let _guard = lock(&self.write_lock);
        let mut entries = self.read_leaderboard();
        let rank = insert_ranked(
            &mut entries,
            LeaderboardEntry::from_result(profile, result),
            self.leaderboard_size,
        );
        write_json_atomic(&self.leaderboard_path(), &entries)?;
        self.hub.publish(&entries);
        Ok(rank)
    }

    fn top_entries(&self) -> Vec<LeaderboardEntry> {
        self.read_leaderboard()
    }

    fn subscribe(&self, callback: LeaderboardCallback) -> Subscription {
        self.hub.subscribe(callback, &self.read_leaderboard())
    }
}

/// Keeps `[A-Za-z0-9_-]`, truncated to `ACCOUNT_ID_MAX_LENGTH`.
pub fn sanitize_account_id(account_id: &str) -> String {
    account_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .take(ACCOUNT_ID_MAX_LENGTH)
        .collect()
}

/// Reads `path` as JSON. Missing files give the default; corrupt files are
/// logged and also give the default.
fn read_json_or_default<T: Default + DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt save file, using defaults");
                T::default()
            }
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => T::default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "unreadable save file, using defaults");
            T::default()
        }
    }
}

/// Writes pretty JSON to a sibling temp file, then renames it over `path`.
fn write_json_atomic<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_store() -> JsonStore {
        let n = TEST_DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "reelcast_json_test_{}_{}",
            std::process::id(),
            n
        ));
        let _ = fs::remove_dir_all(&dir);
        JsonStore::with_dir(dir)
    }

    fn result(score: u64) -> SessionResult {
        SessionResult {
            score,
            total_catches: 2,
            longest_streak: 2,
            duration_seconds: 60,
        }
    }

    #[test]
    fn test_missing_profile_loads_default() {
        let store = temp_store();
        assert_eq!(store.load_profile(None), PlayerProfile::default());
    }

    #[test]
    fn test_save_then_load_merges_update() {
        let store = temp_store();
        let update = ProfileUpdate {
            currency: Some(250),
            total_catches: Some(3),
            ..ProfileUpdate::default()
        };
        store.save_profile(None, &update).unwrap();
        store
            .save_profile(
                None,
                &ProfileUpdate {
                    xp: Some(120),
                    ..ProfileUpdate::default()
                },
            )
            .unwrap();

        let loaded = store.load_profile(None);
        assert_eq!(loaded.currency, 250);
        assert_eq!(loaded.total_catches, 3);
        assert_eq!(loaded.xp(), 120);
        assert_eq!(loaded.level(), 2);
        fs::remove_dir_all(store.dir()).ok();
    }

    #[test]
    fn test_accounts_use_separate_files() {
        let store = temp_store();
        let update = ProfileUpdate {
            currency: Some(9),
            ..ProfileUpdate::default()
        };
        store.save_profile(Some("alice"), &update).unwrap();
        assert_eq!(store.load_profile(Some("alice")).currency, 9);
        assert_eq!(store.load_profile(None).currency, 0);
        assert!(store
            .profile_path(Some("alice"))
            .ends_with("profile-alice.json"));
        fs::remove_dir_all(store.dir()).ok();
    }

    #[test]
    fn test_account_id_is_sanitized() {
        assert_eq!(sanitize_account_id("../../etc/passwd"), "etcpasswd");
        assert_eq!(sanitize_account_id("a_b-C9"), "a_b-C9");
        let store = temp_store();
        assert!(store.profile_path(Some("///")).ends_with(PROFILE_FILE));
    }

    #[test]
    fn test_corrupt_profile_falls_back_to_default() {
        let store = temp_store();
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.profile_path(None), "{ not json").unwrap();
        assert_eq!(store.load_profile(None), PlayerProfile::default());
        fs::remove_dir_all(store.dir()).ok();
    }

    #[test]
    fn test_leaderboard_persists_and_ranks() {
        let store = temp_store().with_leaderboard_size(2);
        let profile = PlayerProfile::default();
        assert_eq!(store.submit_entry(&profile, &result(40)).unwrap(), Some(1));
        assert_eq!(store.submit_entry(&profile, &result(90)).unwrap(), Some(1));
        assert_eq!(store.submit_entry(&profile, &result(10)).unwrap(), None);

        let reopened = JsonStore::with_dir(store.dir().to_path_buf());
        let scores: Vec<u64> = reopened.top_entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![90, 40]);
        fs::remove_dir_all(store.dir()).ok();
    }
}
