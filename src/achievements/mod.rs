//! Achievement definitions and unlock conditions.

pub mod data;
pub mod types;

pub use data::{get_achievement_def, ALL_ACHIEVEMENTS};
pub use types::{AchievementCondition, AchievementDef, AchievementId};
