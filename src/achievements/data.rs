//! Static achievement definitions.

use super::types::{AchievementCondition, AchievementDef, AchievementId};
use crate::fishing::FishRarity;

/// All achievement definitions in display order.
pub const ALL_ACHIEVEMENTS: &[AchievementDef] = &[
    // ═══════════════════════════════════════════════════════════════
    // CATCHES
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::FirstCatch,
        name: "First Bite",
        description: "Land your first fish",
        condition: AchievementCondition::CatchCount(1),
        reward: 10,
    },
    AchievementDef {
        id: AchievementId::AnglerI,
        name: "Angler I",
        description: "Land 10 fish",
        condition: AchievementCondition::CatchCount(10),
        reward: 25,
    },
    AchievementDef {
        id: AchievementId::AnglerII,
        name: "Angler II",
        description: "Land 50 fish",
        condition: AchievementCondition::CatchCount(50),
        reward: 100,
    },
    AchievementDef {
        id: AchievementId::AnglerIII,
        name: "Angler III",
        description: "Land 250 fish",
        condition: AchievementCondition::CatchCount(250),
        reward: 300,
    },
    AchievementDef {
        id: AchievementId::RareFind,
        name: "Rare Find",
        description: "Land a Rare fish",
        condition: AchievementCondition::CaughtRarity(FishRarity::Rare),
        reward: 50,
    },
    AchievementDef {
        id: AchievementId::LegendHunter,
        name: "Legend Hunter",
        description: "Land a Legendary fish",
        condition: AchievementCondition::CaughtRarity(FishRarity::Legendary),
        reward: 200,
    },
    // ═══════════════════════════════════════════════════════════════
    // PROGRESSION
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::LevelFive,
        name: "Seasoned",
        description: "Reach level 5",
        condition: AchievementCondition::ReachLevel(5),
        reward: 50,
    },
    AchievementDef {
        id: AchievementId::LevelTen,
        name: "Old Salt",
        description: "Reach level 10",
        condition: AchievementCondition::ReachLevel(10),
        reward: 150,
    },
    // ═══════════════════════════════════════════════════════════════
    // ECONOMY
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::FirstSale,
        name: "Open for Business",
        description: "Sell your first fish",
        condition: AchievementCondition::FishSold(1),
        reward: 5,
    },
    AchievementDef {
        id: AchievementId::Fishmonger,
        name: "Fishmonger",
        description: "Sell 100 fish",
        condition: AchievementCondition::FishSold(100),
        reward: 100,
    },
    AchievementDef {
        id: AchievementId::Saver,
        name: "Nest Egg",
        description: "Hold 500 coins",
        condition: AchievementCondition::CurrencyAtLeast(500),
        reward: 50,
    },
    AchievementDef {
        id: AchievementId::Tycoon,
        name: "Tycoon",
        description: "Hold 5,000 coins",
        condition: AchievementCondition::CurrencyAtLeast(5_000),
        reward: 250,
    },
    AchievementDef {
        id: AchievementId::FirstPurchase,
        name: "Gearing Up",
        description: "Buy something from the shop",
        condition: AchievementCondition::PurchaseCount(1),
        reward: 20,
    },
    AchievementDef {
        id: AchievementId::Outfitter,
        name: "Outfitter",
        description: "Make 5 shop purchases",
        condition: AchievementCondition::PurchaseCount(5),
        reward: 100,
    },
];

/// Look up an achievement definition by ID.
pub fn get_achievement_def(id: AchievementId) -> Option<&'static AchievementDef> {
    ALL_ACHIEVEMENTS.iter().find(|a| a.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = ALL_ACHIEVEMENTS.iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), ALL_ACHIEVEMENTS.len());
    }

    #[test]
    fn test_lookup_returns_definition() {
        let def = get_achievement_def(AchievementId::LegendHunter).unwrap();
        assert_eq!(def.name, "Legend Hunter");
        assert!(def.reward > 0);
    }
}
