//! Static shop table.

use super::types::{ItemEffect, ShopItem, ShopItemKind};

pub const SHOP_ITEMS: &[ShopItem] = &[
    // Environments
    ShopItem {
        id: "lake",
        name: "Quiet Lake",
        description: "Where every angler starts",
        kind: ShopItemKind::Environment,
        price: 0,
        required_level: 1,
        effect: ItemEffect::RarityBonus(0.0),
    },
    ShopItem {
        id: "river",
        name: "Rushing River",
        description: "Faster water, better fish",
        kind: ShopItemKind::Environment,
        price: 300,
        required_level: 3,
        effect: ItemEffect::RarityBonus(0.15),
    },
    ShopItem {
        id: "ocean",
        name: "Open Ocean",
        description: "Big water, big catches",
        kind: ShopItemKind::Environment,
        price: 1_200,
        required_level: 6,
        effect: ItemEffect::RarityBonus(0.35),
    },
    ShopItem {
        id: "deep_sea",
        name: "Deep Sea Trench",
        description: "Legends lurk below",
        kind: ShopItemKind::Environment,
        price: 4_000,
        required_level: 10,
        effect: ItemEffect::RarityBonus(0.6),
    },
    // Upgrades
    ShopItem {
        id: "carbon_rod",
        name: "Carbon Rod",
        description: "+25% reel power",
        kind: ShopItemKind::Upgrade,
        price: 250,
        required_level: 2,
        effect: ItemEffect::ReelPower(1.25),
    },
    ShopItem {
        id: "sharp_hooks",
        name: "Sharp Hooks",
        description: "Hooked fish slip away 20% slower",
        kind: ShopItemKind::Upgrade,
        price: 400,
        required_level: 3,
        effect: ItemEffect::EscapeReduction(0.8),
    },
    ShopItem {
        id: "lucky_lure",
        name: "Lucky Lure",
        description: "+50% XP per catch",
        kind: ShopItemKind::Upgrade,
        price: 600,
        required_level: 4,
        effect: ItemEffect::XpMultiplier(1.5),
    },
    ShopItem {
        id: "fish_market_pass",
        name: "Fish Market Pass",
        description: "+50% coins when selling",
        kind: ShopItemKind::Upgrade,
        price: 800,
        required_level: 5,
        effect: ItemEffect::SaleMultiplier(1.5),
    },
];
