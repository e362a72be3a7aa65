// Match timing
pub const MATCH_DURATION_SECS: u64 = 60;
pub const MAX_MATCH_DURATION_SECS: u64 = 3_600;
pub const UI_FRAME_MS: u64 = 16;

// Bite window (before the level-based bite window modifier)
pub const BITE_DELAY_MIN_MS: u64 = 600;
pub const BITE_DELAY_MAX_MS: u64 = 1600;

// Reel challenge
pub const DECAY_INTERVAL_MS: u64 = 130;
pub const CELEBRATE_MS: u64 = 1800;
pub const BASE_REEL_POWER: f64 = 18.0;
pub const BASE_DECAY: f64 = 2.0;
/// Fraction of reel power lost per unit of fish difficulty (difficulty 1.0 keeps 40%).
pub const REEL_DIFFICULTY_DAMPING: f64 = 0.6;
pub const START_PROGRESS_MIN: f64 = 25.0;
pub const START_PROGRESS_MAX: f64 = 40.0;
pub const MIN_START_PROGRESS: f64 = 10.0;
pub const REEL_PROGRESS_MAX: f64 = 100.0;

// Difficulty scaling per level above 1, with caps
pub const REEL_POWER_REDUCTION_PER_LEVEL: f64 = 0.03;
pub const REEL_POWER_REDUCTION_CAP: f64 = 0.45;
pub const DECAY_BOOST_PER_LEVEL: f64 = 0.06;
pub const DECAY_BOOST_CAP: f64 = 0.85;
pub const START_PENALTY_PER_LEVEL: f64 = 2.0;
pub const START_PENALTY_CAP: f64 = 20.0;
pub const RARITY_BIAS_PER_LEVEL: f64 = 0.08;
pub const RARITY_BIAS_CAP: f64 = 1.2;
pub const BITE_WINDOW_REDUCTION_PER_LEVEL: f64 = 0.02;
pub const BITE_WINDOW_REDUCTION_CAP: f64 = 0.3;

// Rarity roulette
/// Base weights: Common, Uncommon, Rare, Legendary
pub const RARITY_BASE_WEIGHTS: [f64; 4] = [60.0, 25.0, 12.0, 3.0];
/// How strongly the rarity bias moves each tier's weight
pub const RARITY_BIAS_FACTORS: [f64; 4] = [-0.5, 0.3, 0.8, 1.5];
/// Lowest multiplier any tier's weight can be pushed down to
pub const RARITY_WEIGHT_FLOOR: f64 = 0.2;

// Scoring and XP
pub const STREAK_BONUS_FACTOR: u32 = 5;
/// XP per catch: Common, Uncommon, Rare, Legendary
pub const XP_PER_RARITY: [u32; 4] = [15, 30, 60, 150];

// Economy
pub const STARTING_CURRENCY: u64 = 0;
pub const STARTING_ENVIRONMENT: &str = "lake";

// Leaderboard
pub const LEADERBOARD_SIZE: usize = 10;

// Save files
pub const DATA_DIR_NAME: &str = ".reelcast";
pub const PROFILE_FILE: &str = "profile.json";
pub const LEADERBOARD_FILE: &str = "leaderboard.json";
pub const CONFIG_FILE: &str = "config.toml";
pub const LOG_FILE: &str = "reelcast.log";
pub const ACCOUNT_ID_MAX_LENGTH: usize = 32;
