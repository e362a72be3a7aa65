//! Fish catalog, rarity model, and difficulty scaling.

#![allow(unused_imports)]

pub mod data;
pub mod difficulty;
pub mod generation;
pub mod types;

pub use difficulty::{level_to_difficulty, DifficultyProfile};
pub use generation::*;
pub use types::*;
