//! Randomized operation sequences against the session invariants:
//! reel progress stays in [0, 100], a fish is held only while hooked,
//! escapes never touch XP or currency, and catches never lower them.

use reelcast::core::GameData;
use reelcast::fishing::level_to_difficulty;
use reelcast::progression::PlayerProfile;
use reelcast::session::{GameSession, SessionEvent, SessionPhase};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

const SEQUENCES: usize = 10_000;
const OPS_PER_SEQUENCE: usize = 40;
const EPSILON: f64 = 1e-9;

fn create_test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(12345)
}

fn assert_invariants(session: &GameSession) {
    let state = session.state();
    assert!(
        (0.0..=100.0).contains(&state.reel_progress),
        "reel progress {} out of range",
        state.reel_progress
    );
    assert_eq!(
        state.current_fish.is_some(),
        state.phase == SessionPhase::Hooked,
        "fish held in phase {:?}",
        state.phase
    );
    assert!(state.longest_streak >= state.streak);
    if state.phase == SessionPhase::Ended {
        assert!(session.pending_timers().is_empty());
        assert_eq!(state.streak, 0);
    }
}

#[test]
fn test_reel_progress_clamped_over_random_sequences() {
    let mut rng = create_test_rng();
    let data = Arc::new(GameData::default());

    for _ in 0..SEQUENCES {
        let xp = rng.gen_range(0..25_000);
        let mut session = GameSession::new(Arc::clone(&data), PlayerProfile::with_xp(xp));
        session.start_game();
        let mut last_longest = 0;

        for _ in 0..OPS_PER_SEQUENCE {
            let xp_before = session.profile().xp();
            let level_before = session.profile().level();
            let currency_before = session.profile().currency;

            let events = match rng.gen_range(0..10) {
                0..=1 => session.cast(&mut rng),
                2..=5 => session.reel(),
                6..=8 => {
                    let dt = rng.gen_range(0..700);
                    session.advance(dt, &mut rng)
                }
                _ => {
                    let dt = rng.gen_range(0..20_000);
                    session.advance(dt, &mut rng)
                }
            };

            assert_invariants(&session);

            let caught = events
                .iter()
                .any(|e| matches!(e, SessionEvent::Caught { .. }));
            let escaped = events
                .iter()
                .any(|e| matches!(e, SessionEvent::Escaped { .. }));

            if caught {
                assert!(session.profile().xp() > xp_before);
                assert!(session.profile().level() >= level_before);
                assert!(session.profile().currency >= currency_before);
            } else if escaped {
                assert_eq!(session.profile().xp(), xp_before);
                assert_eq!(session.profile().currency, currency_before);
            }

            if session.state().phase != SessionPhase::Ended {
                assert!(session.state().longest_streak >= last_longest);
                last_longest = session.state().longest_streak;
            }
        }
    }
}

#[test]
fn test_difficulty_caps_hold_for_all_levels() {
    let mut previous = level_to_difficulty(1);
    for level in 1..=1_000 {
        let profile = level_to_difficulty(level);
        assert!(profile.reel_power_mod >= 0.55 - EPSILON && profile.reel_power_mod <= 1.0);
        assert!(profile.decay_mod >= 1.0 && profile.decay_mod <= 1.85 + EPSILON);
        assert!((0.0..=20.0).contains(&profile.initial_progress_penalty));
        assert!((0.0..=1.2).contains(&profile.rarity_bias));
        assert!(profile.bite_window_mod >= 0.7 - EPSILON && profile.bite_window_mod <= 1.0);

        assert!(profile.reel_power_mod <= previous.reel_power_mod);
        assert!(profile.decay_mod >= previous.decay_mod);
        assert!(profile.initial_progress_penalty >= previous.initial_progress_penalty);
        assert!(profile.rarity_bias >= previous.rarity_bias);
        assert!(profile.bite_window_mod <= previous.bite_window_mod);
        previous = profile;
    }
}
