//! Progression rules applied on catch, sale, and purchase.
//!
//! Each operation validates first and only then mutates the profile, so a
//! declined request leaves it untouched. Every successful operation ends with
//! the same achievement scan.

use super::types::{
    CatchOutcome, DeclineReason, EnvironmentOutcome, PlayerProfile, PurchaseOutcome, SaleOutcome,
};
use crate::achievements::{AchievementDef, AchievementId};
use crate::core::constants::XP_PER_RARITY;
use crate::core::GameData;
use crate::fishing::{FishInstance, FishRarity};
use crate::shop::{ShopItemKind, UpgradeModifiers};

/// Score for a catch: base points plus a streak bonus once the streak passes 1.
///
/// `streak` counts the catch being scored.
pub fn score_for_catch(fish: &FishInstance, streak: u32, streak_bonus_factor: u32) -> u64 {
    let bonus = if streak > 1 {
        streak as u64 * streak_bonus_factor as u64
    } else {
        0
    };
    fish.base_points as u64 + bonus
}

/// XP for a catch of `rarity`, floored after the multiplier.
pub fn xp_for_catch(rarity: FishRarity, xp_multiplier: f64) -> u64 {
    (XP_PER_RARITY[rarity.index()] as f64 * xp_multiplier.max(0.0)).floor() as u64
}

/// Unlocks every achievement whose condition now holds and credits its reward.
///
/// Rescans until nothing new unlocks, so a reward that crosses a currency
/// threshold is picked up in the same update.
pub fn unlock_achievements(
    profile: &mut PlayerProfile,
    defs: &[AchievementDef],
    last_caught: Option<FishRarity>,
) -> (Vec<AchievementId>, u64) {
    let mut unlocked = Vec::new();
    let mut coins = 0u64;

    loop {
        let mut changed = false;
        for def in defs {
            if profile.has_achievement(def.id) {
                continue;
            }
            if def.condition.is_met(profile, last_caught) {
                profile.achievements.push(def.id);
                profile.currency = profile.currency.saturating_add(def.reward);
                coins = coins.saturating_add(def.reward);
                unlocked.push(def.id);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    (unlocked, coins)
}

/// Lands `fish`: awards XP, stores the fish, and runs the achievement scan.
pub fn apply_catch(
    profile: &mut PlayerProfile,
    mut fish: FishInstance,
    streak: u32,
    data: &GameData,
) -> CatchOutcome {
    let mods = UpgradeModifiers::from_profile(profile, &data.shop);

    let score_delta = score_for_catch(&fish, streak, data.config.streak_bonus_factor);
    let xp_gained = xp_for_catch(fish.rarity, mods.xp);
    let leveled_up = profile.add_xp(xp_gained);

    if fish.caught_at.is_none() {
        fish.caught_at = Some(chrono::Utc::now().timestamp());
    }
    profile.total_catches += 1;
    profile.longest_streak = profile.longest_streak.max(streak);
    profile.inventory.push(fish.clone());

    let (achievements_unlocked, achievement_coins) =
        unlock_achievements(profile, &data.achievements, Some(fish.rarity));

    CatchOutcome {
        fish,
        score_delta,
        xp_gained,
        leveled_up,
        new_level: profile.level(),
        achievements_unlocked,
        achievement_coins,
    }
}

fn sale_price(fish: &FishInstance, mods: &UpgradeModifiers) -> u64 {
    (fish.sale_value as f64 * mods.sale).floor() as u64
}

/// Sells one fish from the inventory.
pub fn apply_sale(profile: &mut PlayerProfile, fish_id: &str, data: &GameData) -> SaleOutcome {
    let Some(index) = profile.inventory.iter().position(|f| f.id == fish_id) else {
        return SaleOutcome::Declined {
            reason: DeclineReason::FishNotInInventory,
        };
    };

    let mods = UpgradeModifiers::from_profile(profile, &data.shop);
    let fish = profile.inventory.remove(index);
    let coins_earned = sale_price(&fish, &mods);
    profile.currency = profile.currency.saturating_add(coins_earned);
    profile.total_fish_sold += 1;

    let (achievements_unlocked, achievement_coins) =
        unlock_achievements(profile, &data.achievements, None);

    SaleOutcome::Sold {
        fish: vec![fish],
        coins_earned,
        achievements_unlocked,
        achievement_coins,
    }
}

/// Sells the whole inventory in one update.
pub fn apply_sell_all(profile: &mut PlayerProfile, data: &GameData) -> SaleOutcome {
    if profile.inventory.is_empty() {
        return SaleOutcome::Declined {
            reason: DeclineReason::EmptyInventory,
        };
    }

    let mods = UpgradeModifiers::from_profile(profile, &data.shop);
    let fish: Vec<FishInstance> = profile.inventory.drain(..).collect();
    let coins_earned: u64 = fish.iter().map(|f| sale_price(f, &mods)).sum();
    profile.currency = profile.currency.saturating_add(coins_earned);
    profile.total_fish_sold += fish.len() as u64;

    let (achievements_unlocked, achievement_coins) =
        unlock_achievements(profile, &data.achievements, None);

    SaleOutcome::Sold {
        fish,
        coins_earned,
        achievements_unlocked,
        achievement_coins,
    }
}

/// Buys a shop item after checking ownership, price, and level gate, in that order.
pub fn apply_purchase(profile: &mut PlayerProfile, item_id: &str, data: &GameData) -> PurchaseOutcome {
    let Some(item) = data.shop.find(item_id) else {
        return PurchaseOutcome::Declined {
            reason: DeclineReason::UnknownItem(item_id.to_string()),
        };
    };

    let owned = match item.kind {
        ShopItemKind::Environment => profile.owns_environment(item.id),
        ShopItemKind::Upgrade => profile.owns_upgrade(item.id),
    };
    if owned {
        return PurchaseOutcome::Declined {
            reason: DeclineReason::AlreadyOwned,
        };
    }
    if profile.currency < item.price {
        return PurchaseOutcome::Declined {
            reason: DeclineReason::InsufficientCurrency {
                price: item.price,
                available: profile.currency,
            },
        };
    }
    if profile.level() < item.required_level {
        return PurchaseOutcome::Declined {
            reason: DeclineReason::LevelTooLow {
                required: item.required_level,
                current: profile.level(),
            },
        };
    }

    profile.currency -= item.price;
    match item.kind {
        ShopItemKind::Environment => profile.owned_environments.push(item.id.to_string()),
        ShopItemKind::Upgrade => profile.owned_upgrades.push(item.id.to_string()),
    }
    profile.total_purchases += 1;

    let (achievements_unlocked, achievement_coins) =
        unlock_achievements(profile, &data.achievements, None);

    PurchaseOutcome::Purchased {
        item_id: item.id.to_string(),
        price: item.price,
        achievements_unlocked,
        achievement_coins,
    }
}

/// Selects an owned environment as the current fishing spot.
pub fn apply_environment_change(
    profile: &mut PlayerProfile,
    environment_id: &str,
    data: &GameData,
) -> EnvironmentOutcome {
    let Some(item) = data.shop.find(environment_id) else {
        return EnvironmentOutcome::Declined {
            reason: DeclineReason::UnknownItem(environment_id.to_string()),
        };
    };
    if item.kind != ShopItemKind::Environment {
        return EnvironmentOutcome::Declined {
            reason: DeclineReason::NotAnEnvironment,
        };
    }
    if !profile.owns_environment(item.id) {
        return EnvironmentOutcome::Declined {
            reason: DeclineReason::EnvironmentNotOwned,
        };
    }

    profile.current_environment = item.id.to_string();
    EnvironmentOutcome::Changed {
        environment: item.id.to_string(),
    }
}
