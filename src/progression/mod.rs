//! Player profile, levels, and the rules applied on catch, sale, and purchase.

#![allow(unused_imports)]

pub mod levels;
pub mod logic;
pub mod types;

pub use levels::{level_for_xp, xp_for_level, xp_to_next_level, LEVEL_REQUIREMENTS, MAX_LEVEL};
pub use logic::*;
pub use types::*;
