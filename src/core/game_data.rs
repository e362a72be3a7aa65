//! Immutable game tables bundled for injection into a session.

use super::config::GameConfig;
use crate::achievements::{AchievementDef, ALL_ACHIEVEMENTS};
use crate::fishing::FishCatalog;
use crate::shop::ShopCatalog;

#[derive(Debug, Clone)]
pub struct GameData {
    pub config: GameConfig,
    pub fish: FishCatalog,
    pub shop: ShopCatalog,
    pub achievements: Vec<AchievementDef>,
}

impl GameData {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config: config.sanitized(),
            ..Self::default()
        }
    }

    /// Same tables with a different species list.
    pub fn with_fish(mut self, fish: FishCatalog) -> Self {
        self.fish = fish;
        self
    }
}

impl Default for GameData {
    fn default() -> Self {
        Self {
            config: GameConfig::default(),
            fish: FishCatalog::default(),
            shop: ShopCatalog::default(),
            achievements: ALL_ACHIEVEMENTS.to_vec(),
        }
    }
}
