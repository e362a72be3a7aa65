//! The match state machine.
//!
//! A `GameSession` owns its timers and a millisecond clock. Callers drive it
//! with `advance` (elapsed time) plus the player actions `cast` and `reel`.
//! Every call returns the events it produced, in order.
//!
//! # Phases
//! 1. **Ready** - line out of the water
//! 2. **Waiting** - bite timer pending (600-1600ms, shortened by level)
//! 3. **Hooked** - decay ticks drain reel progress, taps refill it
//! 4. **Celebrate** - fish landed, returns to Ready after a fixed delay
//!
//! The match deadline is checked before any timer due at the same instant,
//! so a fish hooked when time runs out is lost.

use super::types::{
    SessionEvent, SessionPhase, SessionResult, SessionState, SessionTimers, Timer, TimerKind,
};
use crate::core::constants::{REEL_DIFFICULTY_DAMPING, REEL_PROGRESS_MAX};
use crate::core::GameData;
use crate::fishing::{level_to_difficulty, pick_fish_with_bias, DifficultyProfile, FishInstance};
use crate::progression::{
    apply_catch, apply_environment_change, apply_purchase, apply_sale, apply_sell_all,
    EnvironmentOutcome, PlayerProfile, PurchaseOutcome, SaleOutcome,
};
use crate::shop::{environment_rarity_bonus, UpgradeModifiers};
use crate::storage::{LeaderboardStore, ProfileStore, ProfileUpdate};
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Clamps reel progress into `[0, 100]`. NaN becomes 0.
pub fn clamp_progress(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, REEL_PROGRESS_MAX)
    }
}

pub struct GameSession {
    data: Arc<GameData>,
    profile: PlayerProfile,
    account_id: Option<String>,
    state: SessionState,
    timers: SessionTimers,
    clock_ms: u64,
    match_started_ms: u64,
    match_deadline_ms: Option<u64>,
    generation: u64,
    difficulty: DifficultyProfile,
    profile_store: Option<Box<dyn ProfileStore>>,
    leaderboard: Option<Box<dyn LeaderboardStore>>,
    // Events raised outside an event-returning call, delivered with the next one
    deferred: Vec<SessionEvent>,
}

impl GameSession {
    pub fn new(data: Arc<GameData>, profile: PlayerProfile) -> Self {
        let profile = profile.validated();
        let difficulty = level_to_difficulty(profile.level());
        Self {
            data,
            profile,
            account_id: None,
            state: SessionState::default(),
            timers: SessionTimers::default(),
            clock_ms: 0,
            match_started_ms: 0,
            match_deadline_ms: None,
            generation: 0,
            difficulty,
            profile_store: None,
            leaderboard: None,
            deferred: Vec::new(),
        }
    }

    /// Loads the profile for `account_id` from `store` and saves every change back to it.
    pub fn load(
        data: Arc<GameData>,
        store: Box<dyn ProfileStore>,
        account_id: Option<String>,
    ) -> Self {
        let profile = store.load_profile(account_id.as_deref());
        let mut session = Self::new(data, profile);
        session.account_id = account_id;
        session.profile_store = Some(store);
        session
    }

    pub fn with_profile_store(mut self, store: Box<dyn ProfileStore>, account_id: Option<String>) -> Self {
        self.profile_store = Some(store);
        self.account_id = account_id;
        self
    }

    pub fn with_leaderboard(mut self, leaderboard: Box<dyn LeaderboardStore>) -> Self {
        self.leaderboard = Some(leaderboard);
        self
    }

    // ═══════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Owned copy of the state for rendering.
    pub fn snapshot(&self) -> SessionState {
        self.state.clone()
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    pub fn data(&self) -> &GameData {
        &self.data
    }

    pub fn difficulty(&self) -> DifficultyProfile {
        self.difficulty
    }

    pub fn pending_timers(&self) -> Vec<Timer> {
        self.timers.pending()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn match_deadline_ms(&self) -> Option<u64> {
        self.match_deadline_ms
    }

    /// Tears the session down without recording a result.
    ///
    /// Pending timers and the deadline are dropped, any hooked fish is
    /// released, and a match in progress returns to `Idle`. Timers handed out
    /// before the call stay stale. `start_game` begins a fresh match.
    pub fn cancel_all(&mut self) {
        self.timers.cancel_all();
        self.generation += 1;
        self.match_deadline_ms = None;
        self.state.current_fish = None;
        self.state.reel_progress = 0.0;
        self.state.streak = 0;
        if self.state.phase.in_match() {
            self.state.phase = SessionPhase::Idle;
        }
        self.update_time_left();
        debug!(generation = self.generation, "session torn down");
    }

    /// Persistence warnings raised since the last event-returning call.
    ///
    /// Shop and inventory operations return outcomes rather than events, so
    /// callers that stop after one of them collect save failures here.
    pub fn take_warnings(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();
        for event in self.flush(Vec::new()) {
            match event {
                SessionEvent::PersistenceWarning(message) => warnings.push(message),
                other => self.deferred.push(other),
            }
        }
        warnings
    }

    // ═══════════════════════════════════════════════════════════════════
    // Match lifecycle
    // ═══════════════════════════════════════════════════════════════════

    /// Starts a match from `Idle` or `Ended`. Ignored mid-match.
    pub fn start_game(&mut self) -> Vec<SessionEvent> {
        if self.state.phase.in_match() {
            return self.flush(Vec::new());
        }

        self.timers.cancel_all();
        self.generation += 1;
        self.difficulty = level_to_difficulty(self.profile.level());

        let duration_ms = self.data.config.match_duration_ms();
        self.match_started_ms = self.clock_ms;
        self.match_deadline_ms = Some(self.clock_ms.saturating_add(duration_ms));
        self.state = SessionState {
            phase: SessionPhase::Ready,
            time_left_seconds: self.data.config.match_duration_secs,
            ..SessionState::default()
        };

        info!(
            generation = self.generation,
            level = self.profile.level(),
            environment = %self.profile.current_environment,
            "match started"
        );
        self.flush(vec![SessionEvent::GameStarted])
    }

    /// Casts the line. Only valid in `Ready`.
    pub fn cast(&mut self, rng: &mut impl Rng) -> Vec<SessionEvent> {
        if self.state.phase != SessionPhase::Ready {
            return self.flush(Vec::new());
        }

        let config = &self.data.config;
        let raw_delay = rng.gen_range(config.bite_delay_min_ms..=config.bite_delay_max_ms);
        let bite_in_ms = ((raw_delay as f64 * self.difficulty.bite_window_mod).round() as u64).max(1);

        self.timers.schedule(Timer {
            kind: TimerKind::Bite,
            due_at_ms: self.clock_ms.saturating_add(bite_in_ms),
            generation: self.generation,
        });
        self.state.phase = SessionPhase::Waiting;

        self.flush(vec![SessionEvent::Cast { bite_in_ms }])
    }

    /// One reel tap. Only valid in `Hooked`.
    pub fn reel(&mut self) -> Vec<SessionEvent> {
        if self.state.phase != SessionPhase::Hooked {
            return self.flush(Vec::new());
        }
        let Some(fish) = self.state.current_fish.as_ref() else {
            return self.flush(Vec::new());
        };

        let power = self.reel_power(fish);
        self.state.reel_progress = clamp_progress(self.state.reel_progress + power);

        let mut events = vec![SessionEvent::Reeled {
            progress: self.state.reel_progress,
        }];
        if self.state.reel_progress >= REEL_PROGRESS_MAX {
            events.extend(self.land_fish());
        }
        self.flush(events)
    }

    /// Moves the session clock forward by `dt_ms`, firing everything that
    /// falls due on the way.
    pub fn advance(&mut self, dt_ms: u64, rng: &mut impl Rng) -> Vec<SessionEvent> {
        let target = self.clock_ms.saturating_add(dt_ms);
        let mut events = Vec::new();

        loop {
            let deadline = self.match_deadline_ms.filter(|d| *d <= target);
            let timer = self.timers.next_due().filter(|t| t.due_at_ms <= target);

            match (deadline, timer) {
                (Some(d), Some(t)) if d <= t.due_at_ms => {
                    self.clock_ms = d;
                    events.extend(self.finish_match());
                }
                (Some(d), None) => {
                    self.clock_ms = d;
                    events.extend(self.finish_match());
                }
                (_, Some(t)) => {
                    self.clock_ms = self.clock_ms.max(t.due_at_ms);
                    events.extend(self.fire_timer(t, rng));
                }
                (None, None) => break,
            }
        }

        self.clock_ms = target;
        self.update_time_left();
        self.flush(events)
    }

    /// Fires `timer` if it is still the pending timer of its kind for the
    /// current generation. Anything else is stale and ignored.
    pub fn fire_timer(&mut self, timer: Timer, rng: &mut impl Rng) -> Vec<SessionEvent> {
        if timer.generation != self.generation || self.timers.get(timer.kind) != Some(timer) {
            debug!(kind = ?timer.kind, generation = timer.generation, "stale timer ignored");
            return Vec::new();
        }
        self.timers.cancel(timer.kind);

        match (timer.kind, self.state.phase) {
            (TimerKind::Bite, SessionPhase::Waiting) => self.hook_fish(rng),
            (TimerKind::Decay, SessionPhase::Hooked) => self.decay_tick(timer),
            (TimerKind::Celebrate, SessionPhase::Celebrate) => {
                self.state.phase = SessionPhase::Ready;
                vec![SessionEvent::BackToReady]
            }
            _ => Vec::new(),
        }
    }

    /// Ends the match now. A hooked fish is lost. Ignored outside a match.
    pub fn end_game(&mut self) -> Vec<SessionEvent> {
        if !self.state.phase.in_match() {
            return self.flush(Vec::new());
        }
        let events = self.finish_match();
        self.update_time_left();
        self.flush(events)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Shop and inventory
    // ═══════════════════════════════════════════════════════════════════

    pub fn sell_fish(&mut self, fish_id: &str) -> SaleOutcome {
        let outcome = apply_sale(&mut self.profile, fish_id, &self.data);
        if matches!(outcome, SaleOutcome::Sold { .. }) {
            self.persist(ProfileUpdate::economy(&self.profile));
        }
        outcome
    }

    pub fn sell_all(&mut self) -> SaleOutcome {
        let outcome = apply_sell_all(&mut self.profile, &self.data);
        if matches!(outcome, SaleOutcome::Sold { .. }) {
            self.persist(ProfileUpdate::economy(&self.profile));
        }
        outcome
    }

    pub fn purchase(&mut self, item_id: &str) -> PurchaseOutcome {
        let outcome = apply_purchase(&mut self.profile, item_id, &self.data);
        if matches!(outcome, PurchaseOutcome::Purchased { .. }) {
            self.persist(ProfileUpdate::economy(&self.profile));
        }
        outcome
    }

    pub fn change_environment(&mut self, environment_id: &str) -> EnvironmentOutcome {
        let outcome = apply_environment_change(&mut self.profile, environment_id, &self.data);
        if matches!(outcome, EnvironmentOutcome::Changed { .. }) {
            self.persist(ProfileUpdate::economy(&self.profile));
        }
        outcome
    }

    // ═══════════════════════════════════════════════════════════════════
    // Transitions
    // ═══════════════════════════════════════════════════════════════════

    fn reel_power(&self, fish: &FishInstance) -> f64 {
        let mods = UpgradeModifiers::from_profile(&self.profile, &self.data.shop);
        let resistance = (1.0 - fish.difficulty * REEL_DIFFICULTY_DAMPING).max(0.0);
        self.data.config.base_reel_power * resistance * self.difficulty.reel_power_mod * mods.reel_power
    }

    fn decay_amount(&self, fish: &FishInstance) -> f64 {
        let mods = UpgradeModifiers::from_profile(&self.profile, &self.data.shop);
        self.data.config.base_decay * fish.escape_rate * self.difficulty.decay_mod * mods.escape
    }

    fn hook_fish(&mut self, rng: &mut impl Rng) -> Vec<SessionEvent> {
        let bias = self.difficulty.rarity_bias
            + environment_rarity_bonus(&self.profile, &self.data.shop);
        let fish = pick_fish_with_bias(&self.data.fish, bias, rng);

        let config = &self.data.config;
        let rolled = rng.gen_range(config.start_progress_min..=config.start_progress_max);
        let start = (rolled - self.difficulty.initial_progress_penalty).max(config.min_start_progress);

        self.state.reel_progress = clamp_progress(start);
        self.state.current_fish = Some(fish.clone());
        self.state.phase = SessionPhase::Hooked;
        self.timers.schedule(Timer {
            kind: TimerKind::Decay,
            due_at_ms: self.clock_ms.saturating_add(config.decay_interval_ms.max(1)),
            generation: self.generation,
        });

        debug!(species = %fish.species, rarity = fish.rarity.name(), "fish hooked");
        vec![SessionEvent::Bite { fish }]
    }

    fn decay_tick(&mut self, timer: Timer) -> Vec<SessionEvent> {
        let Some(fish) = self.state.current_fish.as_ref() else {
            return Vec::new();
        };
        let amount = self.decay_amount(fish);
        self.state.reel_progress = clamp_progress(self.state.reel_progress - amount);

        if self.state.reel_progress <= 0.0 {
            return self.escape();
        }

        self.timers.schedule(Timer {
            kind: TimerKind::Decay,
            due_at_ms: timer
                .due_at_ms
                .saturating_add(self.data.config.decay_interval_ms.max(1)),
            generation: self.generation,
        });
        Vec::new()
    }

    fn escape(&mut self) -> Vec<SessionEvent> {
        self.timers.cancel(TimerKind::Decay);
        self.state.streak = 0;
        self.state.reel_progress = 0.0;
        self.state.phase = SessionPhase::Ready;
        match self.state.current_fish.take() {
            Some(fish) => {
                debug!(species = %fish.species, "fish escaped");
                vec![SessionEvent::Escaped { fish }]
            }
            None => Vec::new(),
        }
    }

    fn land_fish(&mut self) -> Vec<SessionEvent> {
        let Some(fish) = self.state.current_fish.take() else {
            return Vec::new();
        };
        self.timers.cancel(TimerKind::Decay);

        self.state.streak += 1;
        self.state.longest_streak = self.state.longest_streak.max(self.state.streak);

        let outcome = apply_catch(&mut self.profile, fish, self.state.streak, &self.data);
        if outcome.leveled_up {
            self.difficulty = level_to_difficulty(self.profile.level());
            info!(level = outcome.new_level, "level up");
        }

        self.state.score += outcome.score_delta;
        self.state.total_catches += 1;
        self.state.last_catch = Some(outcome.fish.clone());
        self.state.phase = SessionPhase::Celebrate;
        self.timers.schedule(Timer {
            kind: TimerKind::Celebrate,
            due_at_ms: self.clock_ms.saturating_add(self.data.config.celebrate_ms),
            generation: self.generation,
        });

        self.persist(ProfileUpdate::after_catch(&self.profile));
        vec![SessionEvent::Caught {
            outcome,
            score: self.state.score,
        }]
    }

    fn finish_match(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        self.timers.cancel_all();
        if let Some(fish) = self.state.current_fish.take() {
            events.push(SessionEvent::Escaped { fish });
        }
        self.state.reel_progress = 0.0;
        self.state.streak = 0;
        self.state.phase = SessionPhase::Ended;
        self.generation += 1;
        self.match_deadline_ms = None;

        let elapsed_ms = self.clock_ms.saturating_sub(self.match_started_ms);
        let result = SessionResult {
            score: self.state.score,
            total_catches: self.state.total_catches,
            longest_streak: self.state.longest_streak,
            duration_seconds: (elapsed_ms + 500) / 1000,
        };

        self.profile.games_played += 1;
        self.profile.total_play_time += result.duration_seconds;
        self.profile.best_score = self.profile.best_score.max(result.score);
        self.profile.longest_streak = self.profile.longest_streak.max(result.longest_streak);
        self.persist(ProfileUpdate::after_match(&self.profile));

        let rank = self.submit_result(&result);
        info!(
            score = result.score,
            catches = result.total_catches,
            longest_streak = result.longest_streak,
            rank = ?rank,
            "match ended"
        );

        events.push(SessionEvent::MatchEnded { result, rank });
        events
    }

    fn submit_result(&mut self, result: &SessionResult) -> Option<u32> {
        let leaderboard = self.leaderboard.as_ref()?;
        match leaderboard.submit_entry(&self.profile, result) {
            Ok(rank) => rank,
            Err(e) => {
                warn!(error = %e, "leaderboard submit failed");
                self.deferred.push(SessionEvent::PersistenceWarning(format!(
                    "Leaderboard submit failed: {}",
                    e
                )));
                None
            }
        }
    }

    fn persist(&mut self, update: ProfileUpdate) {
        let Some(store) = self.profile_store.as_ref() else {
            return;
        };
        if let Err(e) = store.save_profile(self.account_id.as_deref(), &update) {
            warn!(error = %e, "profile save failed");
            self.deferred.push(SessionEvent::PersistenceWarning(format!(
                "Profile save failed: {}",
                e
            )));
        }
    }

    fn update_time_left(&mut self) {
        self.state.time_left_seconds = match self.match_deadline_ms {
            Some(deadline) => {
                let remaining = deadline.saturating_sub(self.clock_ms);
                remaining.div_ceil(1000)
            }
            None => 0,
        };
    }

    /// Appends deferred events and whatever the stores reported since the last call.
    fn flush(&mut self, mut events: Vec<SessionEvent>) -> Vec<SessionEvent> {
        events.append(&mut self.deferred);
        if let Some(leaderboard) = self.leaderboard.as_ref() {
            for report in leaderboard.drain_reports() {
                match report.rank {
                    Ok(rank) => events.push(SessionEvent::Ranked {
                        result: report.result,
                        rank,
                    }),
                    Err(e) => {
                        warn!(error = %e, "queued leaderboard submit failed");
                        events.push(SessionEvent::PersistenceWarning(format!(
                            "Leaderboard submit failed: {}",
                            e
                        )));
                    }
                }
            }
        }
        if let Some(store) = self.profile_store.as_ref() {
            events.extend(
                store
                    .drain_warnings()
                    .into_iter()
                    .map(SessionEvent::PersistenceWarning),
            );
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::MAX_MATCH_DURATION_SECS;
    use crate::core::GameConfig;
    use crate::fishing::FishCatalog;
    use crate::storage::MemoryStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn single_species_data(name: &str) -> Arc<GameData> {
        let catalog = FishCatalog::default();
        let species = catalog.find(name).unwrap().clone();
        let fish = FishCatalog::new(vec![species]).unwrap();
        Arc::new(GameData::default().with_fish(fish))
    }

    fn hooked_session(name: &str, rng: &mut ChaCha8Rng) -> GameSession {
        let mut session = GameSession::new(single_species_data(name), PlayerProfile::default());
        session.start_game();
        session.cast(rng);
        let bite = session.pending_timers()[0];
        let dt = bite.due_at_ms - session.clock_ms();
        session.advance(dt, rng);
        assert_eq!(session.state().phase, SessionPhase::Hooked);
        session
    }

    #[test]
    fn test_clamp_progress() {
        assert_eq!(clamp_progress(-5.0), 0.0);
        assert_eq!(clamp_progress(150.0), 100.0);
        assert_eq!(clamp_progress(f64::NAN), 0.0);
        assert_eq!(clamp_progress(42.5), 42.5);
    }

    #[test]
    fn test_actions_ignored_in_wrong_phase() {
        let mut rng = create_test_rng();
        let mut session = GameSession::new(Arc::new(GameData::default()), PlayerProfile::default());
        assert!(session.cast(&mut rng).is_empty());
        assert!(session.reel().is_empty());
        assert!(session.end_game().is_empty());
        assert_eq!(session.state().phase, SessionPhase::Idle);
    }

    #[test]
    fn test_start_game_resets_state() {
        let mut session = GameSession::new(Arc::new(GameData::default()), PlayerProfile::default());
        let events = session.start_game();
        assert_eq!(events, vec![SessionEvent::GameStarted]);
        assert_eq!(session.state().phase, SessionPhase::Ready);
        assert_eq!(session.state().time_left_seconds, 60);
        assert_eq!(session.generation(), 1);
        // Second start mid-match is ignored
        assert!(session.start_game().is_empty());
        assert_eq!(session.generation(), 1);
    }

    #[test]
    fn test_cast_schedules_bite_within_window() {
        let mut rng = create_test_rng();
        let mut session = GameSession::new(Arc::new(GameData::default()), PlayerProfile::default());
        session.start_game();
        let events = session.cast(&mut rng);
        let bite_in_ms = match events.as_slice() {
            [SessionEvent::Cast { bite_in_ms }] => *bite_in_ms,
            other => panic!("unexpected events {:?}", other),
        };
        assert!((600..=1600).contains(&bite_in_ms));
        assert_eq!(session.state().phase, SessionPhase::Waiting);
    }

    #[test]
    fn test_bite_hooks_fish_and_starts_decay() {
        let mut rng = create_test_rng();
        let session = hooked_session("Bluegill", &mut rng);
        let state = session.state();
        assert_eq!(state.current_fish.as_ref().map(|f| f.species.as_str()), Some("Bluegill"));
        assert!((10.0..=40.0).contains(&state.reel_progress));
        let pending = session.pending_timers();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].kind, TimerKind::Decay);
    }

    #[test]
    fn test_high_level_starts_lower() {
        let mut rng = create_test_rng();
        let data = single_species_data("Bluegill");
        let mut session = GameSession::new(data, PlayerProfile::with_xp(22_000));
        session.start_game();
        session.cast(&mut rng);
        let bite = session.pending_timers()[0];
        session.advance(bite.due_at_ms - session.clock_ms(), &mut rng);
        assert_eq!(session.state().phase, SessionPhase::Hooked);
        // 25..40 minus the capped 20 point penalty, floored at 10
        let progress = session.state().reel_progress;
        assert!((10.0..=20.0).contains(&progress), "progress {}", progress);
    }

    #[test]
    fn test_reel_lands_fish_then_celebrates() {
        let mut rng = create_test_rng();
        let mut session = hooked_session("Bluegill", &mut rng);

        let mut taps = 0;
        while session.state().phase == SessionPhase::Hooked {
            session.reel();
            taps += 1;
            assert!(taps <= 10, "fish never landed");
        }
        assert_eq!(session.state().phase, SessionPhase::Celebrate);
        assert!(session.state().current_fish.is_none());
        assert_eq!(session.state().score, 10);
        assert_eq!(session.state().streak, 1);
        assert_eq!(session.profile().inventory.len(), 1);

        let events = session.advance(1_800, &mut rng);
        assert!(events.contains(&SessionEvent::BackToReady));
        assert_eq!(session.state().phase, SessionPhase::Ready);
    }

    #[test]
    fn test_untouched_fish_escapes() {
        let mut rng = create_test_rng();
        let mut session = hooked_session("Golden Marlin", &mut rng);
        let xp_before = session.profile().xp();

        let events = session.advance(5_000, &mut rng);
        assert!(events
            .iter()
            .any(|e| matches!(e, SessionEvent::Escaped { .. })));
        assert_eq!(session.state().phase, SessionPhase::Ready);
        assert_eq!(session.state().streak, 0);
        assert_eq!(session.state().reel_progress, 0.0);
        assert!(session.pending_timers().is_empty());
        assert_eq!(session.profile().xp(), xp_before);
        assert!(session.profile().inventory.is_empty());
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let mut rng = create_test_rng();
        let mut session = hooked_session("Golden Marlin", &mut rng);
        let stale = session.pending_timers()[0];

        session.end_game();
        session.start_game();
        let progress = session.state().reel_progress;
        assert!(session.fire_timer(stale, &mut rng).is_empty());
        assert_eq!(session.state().phase, SessionPhase::Ready);
        assert_eq!(session.state().reel_progress, progress);
    }

    #[test]
    fn test_deadline_wins_tie_with_decay() {
        let mut rng = create_test_rng();
        let mut session = hooked_session("Bluegill", &mut rng);
        let deadline = session.match_deadline_ms().unwrap();

        // Put the decay tick exactly on the deadline
        let decay = session.pending_timers()[0];
        session.timers.schedule(Timer {
            due_at_ms: deadline,
            ..decay
        });
        let dt = deadline - session.clock_ms();
        let events = session.advance(dt, &mut rng);

        assert_eq!(session.state().phase, SessionPhase::Ended);
        assert!(session.pending_timers().is_empty());
        assert!(matches!(
            events.last(),
            Some(SessionEvent::MatchEnded { .. })
        ));
    }

    #[test]
    fn test_match_end_updates_profile_stats() {
        let mut rng = create_test_rng();
        let mut session = hooked_session("Bluegill", &mut rng);
        while session.state().phase == SessionPhase::Hooked {
            session.reel();
        }
        session.advance(120_000, &mut rng);

        let profile = session.profile();
        assert_eq!(profile.games_played, 1);
        assert_eq!(profile.total_play_time, 60);
        assert_eq!(profile.best_score, 10);
        assert_eq!(profile.longest_streak, 1);
        assert_eq!(session.state().time_left_seconds, 0);
        assert_eq!(session.state().streak, 0);
    }

    #[test]
    fn test_time_left_counts_down() {
        let mut rng = create_test_rng();
        let mut session = GameSession::new(Arc::new(GameData::default()), PlayerProfile::default());
        session.start_game();
        session.advance(1, &mut rng);
        assert_eq!(session.state().time_left_seconds, 60);
        session.advance(999, &mut rng);
        assert_eq!(session.state().time_left_seconds, 59);
    }

    #[test]
    fn test_failed_save_surfaces_warning() {
        let mut rng = create_test_rng();
        let store = MemoryStore::new();
        store.set_fail_saves(true);
        let mut session = hooked_session("Bluegill", &mut rng)
            .with_profile_store(Box::new(store.clone()), None);

        let mut events = Vec::new();
        while session.state().phase == SessionPhase::Hooked {
            events.extend(session.reel());
        }
        assert!(events
            .iter()
            .any(|e| matches!(e, SessionEvent::PersistenceWarning(_))));
        // Local state still reflects the catch
        assert_eq!(session.profile().total_catches, 1);
    }

    #[test]
    fn test_purchase_persists_economy_fields() {
        let store = MemoryStore::new();
        let mut profile = PlayerProfile::with_xp(300);
        profile.currency = 400;
        store.insert_profile(None, profile);

        let mut session =
            GameSession::load(Arc::new(GameData::default()), Box::new(store.clone()), None);
        let outcome = session.purchase("river");
        assert!(matches!(outcome, PurchaseOutcome::Purchased { .. }));
        let stored = store.stored_profile(None).unwrap();
        assert!(stored.owns_environment("river"));
        assert_eq!(stored.currency, session.profile().currency);
    }

    #[test]
    fn test_failed_purchase_save_is_collected_by_take_warnings() {
        let store = MemoryStore::new();
        let mut profile = PlayerProfile::with_xp(300);
        profile.currency = 300;
        store.insert_profile(None, profile);
        store.set_fail_saves(true);

        let mut session =
            GameSession::load(Arc::new(GameData::default()), Box::new(store.clone()), None);
        let outcome = session.purchase("river");
        assert!(matches!(outcome, PurchaseOutcome::Purchased { .. }));
        assert!(session.profile().owns_environment("river"));

        let warnings = session.take_warnings();
        assert_eq!(warnings.len(), 1);
        assert!(!store.stored_profile(None).unwrap().owns_environment("river"));
        assert!(session.take_warnings().is_empty());
    }

    #[test]
    fn test_take_warnings_keeps_other_deferred_events() {
        let store = MemoryStore::new();
        let mut profile = PlayerProfile::with_xp(300);
        profile.currency = 300;
        store.insert_profile(None, profile);
        store.set_fail_saves(true);
        let mut session =
            GameSession::load(Arc::new(GameData::default()), Box::new(store), None);
        session.deferred.push(SessionEvent::BackToReady);
        session.purchase("river");

        assert_eq!(session.take_warnings().len(), 1);
        let events = session.reel();
        assert_eq!(events, vec![SessionEvent::BackToReady]);
    }

    #[test]
    fn test_oversized_match_duration_does_not_overflow() {
        let mut rng = create_test_rng();
        let config = GameConfig {
            match_duration_secs: u64::MAX,
            ..GameConfig::default()
        };
        let mut session =
            GameSession::new(Arc::new(GameData::new(config)), PlayerProfile::default());
        session.start_game();
        assert_eq!(
            session.match_deadline_ms(),
            Some(MAX_MATCH_DURATION_SECS * 1000)
        );

        // Unsanitized tables saturate instead of wrapping
        let mut data = GameData::default();
        data.config.match_duration_secs = u64::MAX;
        let mut session = GameSession::new(Arc::new(data), PlayerProfile::default());
        session.start_game();
        assert_eq!(session.match_deadline_ms(), Some(u64::MAX));
        session.cast(&mut rng);
        assert_eq!(session.state().phase, SessionPhase::Waiting);
    }

    #[test]
    fn test_nan_start_progress_falls_back_when_hooking() {
        let mut rng = create_test_rng();
        let config = GameConfig {
            start_progress_min: f64::NAN,
            ..GameConfig::default()
        };
        let species = FishCatalog::default().find("Bluegill").unwrap().clone();
        let data = GameData::new(config).with_fish(FishCatalog::new(vec![species]).unwrap());
        let mut session = GameSession::new(Arc::new(data), PlayerProfile::default());
        session.start_game();
        session.cast(&mut rng);
        let bite = session.pending_timers()[0];
        session.advance(bite.due_at_ms - session.clock_ms(), &mut rng);

        assert_eq!(session.state().phase, SessionPhase::Hooked);
        let progress = session.state().reel_progress;
        assert!((25.0..=40.0).contains(&progress), "progress {}", progress);
    }

    #[test]
    fn test_cancel_all_releases_hooked_fish() {
        let mut rng = create_test_rng();
        let mut session = hooked_session("Bluegill", &mut rng);
        let decay = session.pending_timers()[0];

        session.cancel_all();
        assert_eq!(session.state().phase, SessionPhase::Idle);
        assert!(session.state().current_fish.is_none());
        assert_eq!(session.state().reel_progress, 0.0);
        assert!(session.pending_timers().is_empty());
        assert_eq!(session.match_deadline_ms(), None);

        assert!(session.fire_timer(decay, &mut rng).is_empty());
        assert!(session.advance(120_000, &mut rng).is_empty());
        assert_eq!(session.profile().games_played, 0);

        assert_eq!(session.start_game(), vec![SessionEvent::GameStarted]);
        assert_eq!(session.state().phase, SessionPhase::Ready);
    }
}
