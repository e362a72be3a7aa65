//! Reelcast - terminal fishing mini-game library.
//!
//! Exposes the session state machine, fish and difficulty model, progression
//! rules, and persistence adapters for the binary and for tests.

pub mod achievements;
pub mod build_info;
pub mod core;
pub mod fishing;
pub mod progression;
pub mod session;
pub mod shop;
pub mod storage;
pub mod ui;
