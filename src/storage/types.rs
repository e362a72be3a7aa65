//! Persistence contracts used by the session.

use super::leaderboard::Subscription;
use crate::achievements::AchievementId;
use crate::fishing::FishInstance;
use crate::progression::PlayerProfile;
use crate::session::SessionResult;
use serde::{Deserialize, Serialize};
use std::io;

/// Called with the current top entries on subscribe and on every change.
pub type LeaderboardCallback = Box<dyn Fn(&[LeaderboardEntry]) + Send>;

/// Load and upsert player profiles.
pub trait ProfileStore {
    /// Stored profile for `account_id`, or a fresh default. Never fails.
    fn load_profile(&self, account_id: Option<&str>) -> PlayerProfile;

    /// Merges the `Some` fields of `update` into the stored profile.
    fn save_profile(&self, account_id: Option<&str>, update: &ProfileUpdate) -> io::Result<()>;

    /// Failures from writes that completed after `save_profile` returned.
    fn drain_warnings(&self) -> Vec<String> {
        Vec::new()
    }
}

impl<T: ProfileStore + ?Sized> ProfileStore for Box<T> {
    fn load_profile(&self, account_id: Option<&str>) -> PlayerProfile {
        (**self).load_profile(account_id)
    }

    fn save_profile(&self, account_id: Option<&str>, update: &ProfileUpdate) -> io::Result<()> {
        (**self).save_profile(account_id, update)
    }

    fn drain_warnings(&self) -> Vec<String> {
        (**self).drain_warnings()
    }
}

/// Ranked match results with push updates.
pub trait LeaderboardStore {
    /// Records a finished match. Returns the 1-based rank if it made the top N.
    fn submit_entry(&self, profile: &PlayerProfile, result: &SessionResult)
        -> io::Result<Option<u32>>;

    fn top_entries(&self) -> Vec<LeaderboardEntry>;

    fn subscribe(&self, callback: LeaderboardCallback) -> Subscription;

    /// Outcomes of submits that finished after `submit_entry` returned.
    fn drain_reports(&self) -> Vec<RankReport> {
        Vec::new()
    }
}

impl<T: LeaderboardStore + ?Sized> LeaderboardStore for Box<T> {
    fn submit_entry(
        &self,
        profile: &PlayerProfile,
        result: &SessionResult,
    ) -> io::Result<Option<u32>> {
        (**self).submit_entry(profile, result)
    }

    fn top_entries(&self) -> Vec<LeaderboardEntry> {
        (**self).top_entries()
    }

    fn subscribe(&self, callback: LeaderboardCallback) -> Subscription {
        (**self).subscribe(callback)
    }

    fn drain_reports(&self) -> Vec<RankReport> {
        (**self).drain_reports()
    }
}

/// A leaderboard submit that completed off the caller's thread.
#[derive(Debug)]
pub struct RankReport {
    pub result: SessionResult,
    pub rank: io::Result<Option<u32>>,
}

/// A partial profile. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xp: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Vec<FishInstance>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievements: Option<Vec<AchievementId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_catches: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_fish_sold: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owned_environments: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owned_upgrades: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_purchases: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub games_played: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_play_time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_score: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longest_streak: Option<u32>,
}

impl ProfileUpdate {
    /// Every field of `profile`.
    pub fn full(profile: &PlayerProfile) -> Self {
        Self {
            display_name: Some(profile.display_name.clone()),
            total_play_time: Some(profile.total_play_time),
            games_played: Some(profile.games_played),
            best_score: Some(profile.best_score),
            ..Self::economy(profile).merged(Self::after_catch(profile))
        }
    }

    /// Fields touched by landing a fish.
    pub fn after_catch(profile: &PlayerProfile) -> Self {
        Self {
            xp: Some(profile.xp()),
            currency: Some(profile.currency),
            inventory: Some(profile.inventory.clone()),
            achievements: Some(profile.achievements.clone()),
            total_catches: Some(profile.total_catches),
            longest_streak: Some(profile.longest_streak),
            ..Self::default()
        }
    }

    /// Fields touched by a sale, purchase, or environment change.
    pub fn economy(profile: &PlayerProfile) -> Self {
        Self {
            currency: Some(profile.currency),
            inventory: Some(profile.inventory.clone()),
            achievements: Some(profile.achievements.clone()),
            total_fish_sold: Some(profile.total_fish_sold),
            owned_environments: Some(profile.owned_environments.clone()),
            owned_upgrades: Some(profile.owned_upgrades.clone()),
            current_environment: Some(profile.current_environment.clone()),
            total_purchases: Some(profile.total_purchases),
            ..Self::default()
        }
    }

    /// Play statistics written when a match ends.
    pub fn after_match(profile: &PlayerProfile) -> Self {
        Self {
            games_played: Some(profile.games_played),
            total_play_time: Some(profile.total_play_time),
            best_score: Some(profile.best_score),
            longest_streak: Some(profile.longest_streak),
            ..Self::default()
        }
    }

    /// Fields set in `other` override fields set in `self`.
    pub fn merged(self, other: ProfileUpdate) -> Self {
        Self {
            display_name: other.display_name.or(self.display_name),
            xp: other.xp.or(self.xp),
            currency: other.currency.or(self.currency),
            inventory: other.inventory.or(self.inventory),
            achievements: other.achievements.or(self.achievements),
            total_catches: other.total_catches.or(self.total_catches),
            total_fish_sold: other.total_fish_sold.or(self.total_fish_sold),
            owned_environments: other.owned_environments.or(self.owned_environments),
            owned_upgrades: other.owned_upgrades.or(self.owned_upgrades),
            current_environment: other.current_environment.or(self.current_environment),
            total_purchases: other.total_purchases.or(self.total_purchases),
            games_played: other.games_played.or(self.games_played),
            total_play_time: other.total_play_time.or(self.total_play_time),
            best_score: other.best_score.or(self.best_score),
            longest_streak: other.longest_streak.or(self.longest_streak),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Writes the `Some` fields onto `profile` and re-validates it.
    pub fn apply_to(&self, mut profile: PlayerProfile) -> PlayerProfile {
        if let Some(name) = &self.display_name {
            profile.display_name = name.clone();
        }
        if let Some(xp) = self.xp {
            profile.set_xp(xp);
        }
        if let Some(currency) = self.currency {
            profile.currency = currency;
        }
        if let Some(inventory) = &self.inventory {
            profile.inventory = inventory.clone();
        }
        if let Some(achievements) = &self.achievements {
            profile.achievements = achievements.clone();
        }
        if let Some(n) = self.total_catches {
            profile.total_catches = n;
        }
        if let Some(n) = self.total_fish_sold {
            profile.total_fish_sold = n;
        }
        if let Some(envs) = &self.owned_environments {
            profile.owned_environments = envs.clone();
        }
        if let Some(upgrades) = &self.owned_upgrades {
            profile.owned_upgrades = upgrades.clone();
        }
        if let Some(env) = &self.current_environment {
            profile.current_environment = env.clone();
        }
        if let Some(n) = self.total_purchases {
            profile.total_purchases = n;
        }
        if let Some(n) = self.games_played {
            profile.games_played = n;
        }
        if let Some(n) = self.total_play_time {
            profile.total_play_time = n;
        }
        if let Some(n) = self.best_score {
            profile.best_score = n;
        }
        if let Some(n) = self.longest_streak {
            profile.longest_streak = n;
        }
        profile.validated()
    }
}

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: String,
    pub player_name: String,
    pub score: u64,
    pub total_catches: u32,
    pub longest_streak: u32,
    pub level: u32,
    /// Unix milliseconds; earlier submissions rank first on equal score
    pub submitted_at: i64,
}

impl LeaderboardEntry {
    pub fn from_result(profile: &PlayerProfile, result: &SessionResult) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            player_name: profile.display_name.clone(),
            score: result.score,
            total_catches: result.total_catches,
            longest_streak: result.longest_streak,
            level: profile.level(),
            submitted_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}
