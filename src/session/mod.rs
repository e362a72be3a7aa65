//! Match state machine: casting, bites, the reel challenge, and the countdown.

#![allow(unused_imports)]

pub mod logic;
pub mod types;

pub use logic::{clamp_progress, GameSession};
pub use types::*;
