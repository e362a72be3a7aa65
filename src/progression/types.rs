//! Player profile and progression outcomes.

use super::levels::level_for_xp;
use crate::achievements::AchievementId;
use crate::core::constants::{STARTING_CURRENCY, STARTING_ENVIRONMENT};
use crate::fishing::FishInstance;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DISPLAY_NAME: &str = "Angler";

/// Persistent player aggregate.
///
/// `level` is derived from `xp` and only changes through [`PlayerProfile::add_xp`],
/// [`PlayerProfile::set_xp`], or [`PlayerProfile::validated`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerProfile {
    pub display_name: String,
    level: u32,
    xp: u64,
    pub currency: u64,
    pub inventory: Vec<FishInstance>,
    pub achievements: Vec<AchievementId>,
    pub total_catches: u64,
    pub total_fish_sold: u64,
    pub owned_environments: Vec<String>,
    pub owned_upgrades: Vec<String>,
    pub current_environment: String,
    pub total_purchases: u32,
    pub games_played: u32,
    /// Seconds spent in matches
    pub total_play_time: u64,
    pub best_score: u64,
    pub longest_streak: u32,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            level: 1,
            xp: 0,
            currency: STARTING_CURRENCY,
            inventory: Vec::new(),
            achievements: Vec::new(),
            total_catches: 0,
            total_fish_sold: 0,
            owned_environments: vec![STARTING_ENVIRONMENT.to_string()],
            owned_upgrades: Vec::new(),
            current_environment: STARTING_ENVIRONMENT.to_string(),
            total_purchases: 0,
            games_played: 0,
            total_play_time: 0,
            best_score: 0,
            longest_streak: 0,
        }
    }
}

impl PlayerProfile {
    /// A fresh profile holding `xp`, with the matching level.
    pub fn with_xp(xp: u64) -> Self {
        let mut profile = Self::default();
        profile.set_xp(xp);
        profile
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn xp(&self) -> u64 {
        self.xp
    }

    /// Adds XP and recomputes the level. Returns true if the level rose.
    pub fn add_xp(&mut self, amount: u64) -> bool {
        let before = self.level;
        self.set_xp(self.xp.saturating_add(amount));
        self.level > before
    }

    pub fn set_xp(&mut self, xp: u64) {
        self.xp = xp;
        self.level = level_for_xp(xp);
    }

    pub fn has_achievement(&self, id: AchievementId) -> bool {
        self.achievements.contains(&id)
    }

    pub fn owns_environment(&self, id: &str) -> bool {
        self.owned_environments.iter().any(|e| e == id)
    }

    pub fn owns_upgrade(&self, id: &str) -> bool {
        self.owned_upgrades.iter().any(|u| u == id)
    }

    /// Repairs a loaded profile: recomputes the level from XP, removes
    /// duplicate ids, and makes sure the selected environment is owned.
    pub fn validated(mut self) -> Self {
        self.level = level_for_xp(self.xp);

        dedup_in_order(&mut self.achievements);
        dedup_in_order(&mut self.owned_environments);
        dedup_in_order(&mut self.owned_upgrades);

        if !self.owns_environment(STARTING_ENVIRONMENT) {
            self.owned_environments
                .insert(0, STARTING_ENVIRONMENT.to_string());
        }
        if !self.owns_environment(&self.current_environment) {
            self.current_environment = STARTING_ENVIRONMENT.to_string();
        }
        if self.display_name.trim().is_empty() {
            self.display_name = DEFAULT_DISPLAY_NAME.to_string();
        }
        self
    }
}

fn dedup_in_order<T: PartialEq + Clone>(items: &mut Vec<T>) {
    let mut seen: Vec<T> = Vec::with_capacity(items.len());
    items.retain(|item| {
        if seen.contains(item) {
            false
        } else {
            seen.push(item.clone());
            true
        }
    });
}

/// Result of landing a fish.
#[derive(Debug, Clone, PartialEq)]
pub struct CatchOutcome {
    pub fish: FishInstance,
    pub score_delta: u64,
    pub xp_gained: u64,
    pub leveled_up: bool,
    pub new_level: u32,
    pub achievements_unlocked: Vec<AchievementId>,
    /// Coins credited by newly unlocked achievements
    pub achievement_coins: u64,
}

/// Why a sale, purchase, or environment change was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclineReason {
    UnknownItem(String),
    AlreadyOwned,
    InsufficientCurrency { price: u64, available: u64 },
    LevelTooLow { required: u32, current: u32 },
    FishNotInInventory,
    EmptyInventory,
    EnvironmentNotOwned,
    NotAnEnvironment,
}

impl DeclineReason {
    /// User-facing status message.
    pub fn message(&self) -> String {
        match self {
            DeclineReason::UnknownItem(id) => format!("No shop item called '{}'.", id),
            DeclineReason::AlreadyOwned => "You already own that.".to_string(),
            DeclineReason::InsufficientCurrency { price, available } => format!(
                "Not enough coins: costs {}, you have {}.",
                price, available
            ),
            DeclineReason::LevelTooLow { required, current } => format!(
                "Requires level {} (you are level {}).",
                required, current
            ),
            DeclineReason::FishNotInInventory => "That fish is not in your inventory.".to_string(),
            DeclineReason::EmptyInventory => "You have no fish to sell.".to_string(),
            DeclineReason::EnvironmentNotOwned => "You have not unlocked that spot yet.".to_string(),
            DeclineReason::NotAnEnvironment => "That item is not a fishing spot.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaleOutcome {
    Sold {
        fish: Vec<FishInstance>,
        coins_earned: u64,
        achievements_unlocked: Vec<AchievementId>,
        achievement_coins: u64,
    },
    Declined {
        reason: DeclineReason,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PurchaseOutcome {
    Purchased {
        item_id: String,
        price: u64,
        achievements_unlocked: Vec<AchievementId>,
        achievement_coins: u64,
    },
    Declined {
        reason: DeclineReason,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnvironmentOutcome {
    Changed { environment: String },
    Declined { reason: DeclineReason },
}

impl SaleOutcome {
    pub fn message(&self) -> String {
        match self {
            SaleOutcome::Sold {
                fish, coins_earned, ..
            } => format!("Sold {} fish for {} coins.", fish.len(), coins_earned),
            SaleOutcome::Declined { reason } => reason.message(),
        }
    }
}

impl PurchaseOutcome {
    pub fn message(&self) -> String {
        match self {
            PurchaseOutcome::Purchased { item_id, price, .. } => {
                format!("Bought {} for {} coins.", item_id, price)
            }
            PurchaseOutcome::Declined { reason } => reason.message(),
        }
    }
}

impl EnvironmentOutcome {
    pub fn message(&self) -> String {
        match self {
            EnvironmentOutcome::Changed { environment } => format!("Now fishing at {}.", environment),
            EnvironmentOutcome::Declined { reason } => reason.message(),
        }
    }
}
