//! Tuning constants, configuration, and injected game tables.

#![allow(unused_imports)]

pub mod config;
pub mod constants;
pub mod game_data;

pub use config::GameConfig;
pub use constants::*;
pub use game_data::GameData;
