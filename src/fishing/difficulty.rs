//! Level-based difficulty scaling for the reel challenge.
//!
//! Every component grows with level and stops at its cap, so a maxed-out
//! player still faces a winnable challenge.

use crate::core::constants::{
    BITE_WINDOW_REDUCTION_CAP, BITE_WINDOW_REDUCTION_PER_LEVEL, DECAY_BOOST_CAP,
    DECAY_BOOST_PER_LEVEL, RARITY_BIAS_CAP, RARITY_BIAS_PER_LEVEL, REEL_POWER_REDUCTION_CAP,
    REEL_POWER_REDUCTION_PER_LEVEL, START_PENALTY_CAP, START_PENALTY_PER_LEVEL,
};

/// Difficulty modifiers derived from player level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    /// Multiplier on reel power per tap, in `[1 - REEL_POWER_REDUCTION_CAP, 1]`
    pub reel_power_mod: f64,
    /// Multiplier on progress lost per decay tick, in `[1, 1 + DECAY_BOOST_CAP]`
    pub decay_mod: f64,
    /// Points subtracted from the starting reel progress, in `[0, START_PENALTY_CAP]`
    pub initial_progress_penalty: f64,
    /// Pushes odds toward rarer tiers, in `[0, RARITY_BIAS_CAP]`
    pub rarity_bias: f64,
    /// Multiplier on the bite delay, in `[1 - BITE_WINDOW_REDUCTION_CAP, 1]`
    pub bite_window_mod: f64,
}

/// Maps a player level to its difficulty profile.
///
/// Levels below 1 are treated as level 1.
pub fn level_to_difficulty(level: u32) -> DifficultyProfile {
    let steps = level.max(1).saturating_sub(1) as f64;

    let reel_reduction = (steps * REEL_POWER_REDUCTION_PER_LEVEL).min(REEL_POWER_REDUCTION_CAP);
    let decay_boost = (steps * DECAY_BOOST_PER_LEVEL).min(DECAY_BOOST_CAP);
    let bite_reduction =
        (steps * BITE_WINDOW_REDUCTION_PER_LEVEL).min(BITE_WINDOW_REDUCTION_CAP);

    DifficultyProfile {
        reel_power_mod: 1.0 - reel_reduction,
        decay_mod: 1.0 + decay_boost,
        initial_progress_penalty: (steps * START_PENALTY_PER_LEVEL).min(START_PENALTY_CAP),
        rarity_bias: (steps * RARITY_BIAS_PER_LEVEL).min(RARITY_BIAS_CAP),
        bite_window_mod: 1.0 - bite_reduction,
    }
}
