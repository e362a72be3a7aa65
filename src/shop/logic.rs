//! Effects of owned shop items on play.

use super::types::{ItemEffect, ShopCatalog};
use crate::progression::PlayerProfile;

/// Combined multipliers from every owned upgrade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpgradeModifiers {
    pub reel_power: f64,
    pub escape: f64,
    pub xp: f64,
    pub sale: f64,
}

impl Default for UpgradeModifiers {
    fn default() -> Self {
        Self {
            reel_power: 1.0,
            escape: 1.0,
            xp: 1.0,
            sale: 1.0,
        }
    }
}

impl UpgradeModifiers {
    /// Stacks the effects of the profile's owned upgrades multiplicatively.
    /// Unknown ids are ignored.
    pub fn from_profile(profile: &PlayerProfile, shop: &ShopCatalog) -> Self {
        let mut mods = Self::default();
        for id in &profile.owned_upgrades {
            let Some(item) = shop.find(id) else {
                continue;
            };
            match item.effect {
                ItemEffect::ReelPower(m) => mods.reel_power *= m,
                ItemEffect::EscapeReduction(m) => mods.escape *= m,
                ItemEffect::XpMultiplier(m) => mods.xp *= m,
                ItemEffect::SaleMultiplier(m) => mods.sale *= m,
                ItemEffect::RarityBonus(_) => {}
            }
        }
        mods
    }
}

/// Rarity bonus of the currently selected environment.
pub fn environment_rarity_bonus(profile: &PlayerProfile, shop: &ShopCatalog) -> f64 {
    match shop.find(&profile.current_environment).map(|item| item.effect) {
        Some(ItemEffect::RarityBonus(bonus)) => bonus,
        _ => 0.0,
    }
}
