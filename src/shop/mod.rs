//! Shop catalog: environments and upgrades.

pub mod data;
pub mod logic;
pub mod types;

pub use logic::{environment_rarity_bonus, UpgradeModifiers};
pub use types::{ItemEffect, ShopCatalog, ShopItem, ShopItemKind};
