//! Achievement identifiers, unlock conditions, and definitions.

use crate::fishing::FishRarity;
use crate::progression::PlayerProfile;
use serde::{Deserialize, Serialize};

/// Unique identifier for each achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    // Catch counts
    FirstCatch,
    AnglerI,   // 10 fish
    AnglerII,  // 50 fish
    AnglerIII, // 250 fish
    // Rarity
    RareFind,
    LegendHunter,
    // Level
    LevelFive,
    LevelTen,
    // Selling
    FirstSale,
    Fishmonger, // 100 fish sold
    // Wealth
    Saver,  // 500 coins
    Tycoon, // 5,000 coins
    // Purchases
    FirstPurchase,
    Outfitter, // 5 purchases
}

/// What must be true of a profile for an achievement to unlock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AchievementCondition {
    CatchCount(u64),
    ReachLevel(u32),
    CurrencyAtLeast(u64),
    /// The fish that triggered the scan has at least this rarity
    CaughtRarity(FishRarity),
    FishSold(u64),
    PurchaseCount(u32),
}

impl AchievementCondition {
    /// Tests the condition against a profile snapshot.
    ///
    /// `last_caught` is the rarity of the fish caught in the current update,
    /// or `None` when the scan follows a sale or purchase.
    pub fn is_met(&self, profile: &PlayerProfile, last_caught: Option<FishRarity>) -> bool {
        match *self {
            AchievementCondition::CatchCount(n) => profile.total_catches >= n,
            AchievementCondition::ReachLevel(level) => profile.level() >= level,
            AchievementCondition::CurrencyAtLeast(amount) => profile.currency >= amount,
            AchievementCondition::CaughtRarity(rarity) => {
                last_caught.map_or(false, |caught| caught >= rarity)
            }
            AchievementCondition::FishSold(n) => profile.total_fish_sold >= n,
            AchievementCondition::PurchaseCount(n) => profile.total_purchases >= n,
        }
    }
}

/// Static definition of an achievement.
#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub condition: AchievementCondition,
    /// Coins credited on unlock
    pub reward: u64,
}
