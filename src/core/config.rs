//! Tunable game-balance configuration.
//!
//! Defaults come from `core::constants`. A `config.toml` in the data directory
//! may override any subset of fields.

use super::constants::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Reel, bite, and match tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub match_duration_secs: u64,
    pub bite_delay_min_ms: u64,
    pub bite_delay_max_ms: u64,
    pub decay_interval_ms: u64,
    pub celebrate_ms: u64,
    pub base_reel_power: f64,
    pub base_decay: f64,
    pub start_progress_min: f64,
    pub start_progress_max: f64,
    pub min_start_progress: f64,
    pub streak_bonus_factor: u32,
    pub leaderboard_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            match_duration_secs: MATCH_DURATION_SECS,
            bite_delay_min_ms: BITE_DELAY_MIN_MS,
            bite_delay_max_ms: BITE_DELAY_MAX_MS,
            decay_interval_ms: DECAY_INTERVAL_MS,
            celebrate_ms: CELEBRATE_MS,
            base_reel_power: BASE_REEL_POWER,
            base_decay: BASE_DECAY,
            start_progress_min: START_PROGRESS_MIN,
            start_progress_max: START_PROGRESS_MAX,
            min_start_progress: MIN_START_PROGRESS,
            streak_bonus_factor: STREAK_BONUS_FACTOR,
            leaderboard_size: LEADERBOARD_SIZE,
        }
    }
}

impl GameConfig {
    /// Parses a TOML document. Missing fields keep their defaults.
    pub fn from_toml_str(text: &str) -> io::Result<Self> {
        let config: GameConfig =
            toml::from_str(text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(config.sanitized())
    }

    /// Loads from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> io::Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Repairs non-finite numbers, inverted ranges, and zero or oversized
    /// intervals so timers always make progress and clock math cannot overflow.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        finite_or(&mut self.start_progress_min, defaults.start_progress_min);
        finite_or(&mut self.start_progress_max, defaults.start_progress_max);
        finite_or(&mut self.min_start_progress, defaults.min_start_progress);
        finite_or(&mut self.base_reel_power, defaults.base_reel_power);
        finite_or(&mut self.base_decay, defaults.base_decay);

        if self.bite_delay_min_ms > self.bite_delay_max_ms {
            std::mem::swap(&mut self.bite_delay_min_ms, &mut self.bite_delay_max_ms);
        }
        if self.start_progress_min > self.start_progress_max {
            std::mem::swap(&mut self.start_progress_min, &mut self.start_progress_max);
        }
        self.start_progress_min = self.start_progress_min.clamp(0.0, REEL_PROGRESS_MAX);
        self.start_progress_max = self.start_progress_max.clamp(0.0, REEL_PROGRESS_MAX);
        self.min_start_progress = self.min_start_progress.clamp(1.0, REEL_PROGRESS_MAX);
        self.match_duration_secs = self.match_duration_secs.clamp(1, MAX_MATCH_DURATION_SECS);
        self.decay_interval_ms = self.decay_interval_ms.clamp(1, MAX_MATCH_DURATION_SECS * 1000);
        self.celebrate_ms = self.celebrate_ms.min(MAX_MATCH_DURATION_SECS * 1000);
        self.bite_delay_min_ms = self.bite_delay_min_ms.max(1);
        self.bite_delay_max_ms = self.bite_delay_max_ms.clamp(1, MAX_MATCH_DURATION_SECS * 1000);
        self.bite_delay_min_ms = self.bite_delay_min_ms.min(self.bite_delay_max_ms);
        self.base_reel_power = self.base_reel_power.max(0.0);
        self.base_decay = self.base_decay.max(0.0);
        self.leaderboard_size = self.leaderboard_size.max(1);
        self
    }

    pub fn match_duration_ms(&self) -> u64 {
        self.match_duration_secs.saturating_mul(1000)
    }
}

fn finite_or(value: &mut f64, default: f64) {
    if !value.is_finite() {
        *value = default;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let config = GameConfig::default();
        assert_eq!(config.match_duration_secs, MATCH_DURATION_SECS);
        assert_eq!(config.decay_interval_ms, DECAY_INTERVAL_MS);
        assert_eq!(config.celebrate_ms, CELEBRATE_MS);
        assert_eq!(config.match_duration_ms(), 60_000);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml_str("match_duration_secs = 90\n").unwrap();
        assert_eq!(config.match_duration_secs, 90);
        assert_eq!(config.bite_delay_min_ms, BITE_DELAY_MIN_MS);
        assert_eq!(config.streak_bonus_factor, STREAK_BONUS_FACTOR);
    }

    #[test]
    fn test_malformed_toml_is_invalid_data() {
        let err = GameConfig::from_toml_str("match_duration_secs = \"soon\"").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_sanitized_swaps_inverted_ranges() {
        let config = GameConfig {
            bite_delay_min_ms: 2000,
            bite_delay_max_ms: 500,
            start_progress_min: 50.0,
            start_progress_max: 20.0,
            decay_interval_ms: 0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.bite_delay_min_ms, 500);
        assert_eq!(config.bite_delay_max_ms, 2000);
        assert_eq!(config.start_progress_min, 20.0);
        assert_eq!(config.start_progress_max, 50.0);
        assert_eq!(config.decay_interval_ms, 1);
    }

    #[test]
    fn test_huge_match_duration_is_capped() {
        let config = GameConfig::from_toml_str("match_duration_secs = 9223372036854775807").unwrap();
        assert_eq!(config.match_duration_secs, MAX_MATCH_DURATION_SECS);
        assert_eq!(config.match_duration_ms(), MAX_MATCH_DURATION_SECS * 1000);

        let raw = GameConfig {
            match_duration_secs: u64::MAX,
            ..Default::default()
        };
        assert_eq!(raw.match_duration_ms(), u64::MAX);
    }

    #[test]
    fn test_non_finite_floats_fall_back_to_defaults() {
        let config = GameConfig::from_toml_str(
            "start_progress_min = nan\nstart_progress_max = inf\nmin_start_progress = -inf\nbase_reel_power = nan\nbase_decay = nan\n",
        )
        .unwrap();
        assert_eq!(config.start_progress_min, START_PROGRESS_MIN);
        assert_eq!(config.start_progress_max, START_PROGRESS_MAX);
        assert_eq!(config.min_start_progress, MIN_START_PROGRESS);
        assert_eq!(config.base_reel_power, BASE_REEL_POWER);
        assert_eq!(config.base_decay, BASE_DECAY);
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let path = std::env::temp_dir().join("reelcast-no-such-config-98765.toml");
        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config, GameConfig::default());
    }
}
