//! Session phases, state, timers, and events.

use crate::fishing::FishInstance;
use crate::progression::CatchOutcome;
use serde::{Deserialize, Serialize};

/// Lifecycle of a match.
///
/// `Idle -> Ready -> Waiting -> Hooked -> (Celebrate | escape) -> Ready ... -> Ended`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Idle,
    Ready,
    Waiting,
    Hooked,
    Celebrate,
    Ended,
}

impl SessionPhase {
    pub fn name(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "Idle",
            SessionPhase::Ready => "Ready",
            SessionPhase::Waiting => "Waiting",
            SessionPhase::Hooked => "Hooked",
            SessionPhase::Celebrate => "Celebrate",
            SessionPhase::Ended => "Ended",
        }
    }

    /// True while the match clock is running.
    pub fn in_match(&self) -> bool {
        !matches!(self, SessionPhase::Idle | SessionPhase::Ended)
    }
}

/// Per-match state. Only the session mutates it; renderers get a clone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub time_left_seconds: u64,
    pub score: u64,
    pub total_catches: u32,
    pub streak: u32,
    pub longest_streak: u32,
    /// Set only while `phase == Hooked`
    pub current_fish: Option<FishInstance>,
    /// Always within `[0, 100]`
    pub reel_progress: f64,
    /// Most recently landed fish, for the celebrate screen
    pub last_catch: Option<FishInstance>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Idle,
            time_left_seconds: 0,
            score: 0,
            total_catches: 0,
            streak: 0,
            longest_streak: 0,
            current_fish: None,
            reel_progress: 0.0,
            last_catch: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Bite,
    Decay,
    Celebrate,
}

/// A scheduled callback. Stale once the session generation moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub kind: TimerKind,
    pub due_at_ms: u64,
    pub generation: u64,
}

/// At most one pending timer per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTimers {
    bite: Option<Timer>,
    decay: Option<Timer>,
    celebrate: Option<Timer>,
}

impl SessionTimers {
    fn slot(&mut self, kind: TimerKind) -> &mut Option<Timer> {
        match kind {
            TimerKind::Bite => &mut self.bite,
            TimerKind::Decay => &mut self.decay,
            TimerKind::Celebrate => &mut self.celebrate,
        }
    }

    /// Schedules `timer`, replacing any pending timer of the same kind.
    pub fn schedule(&mut self, timer: Timer) {
        *self.slot(timer.kind) = Some(timer);
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.slot(kind).take();
    }

    pub fn cancel_all(&mut self) {
        self.bite = None;
        self.decay = None;
        self.celebrate = None;
    }

    pub fn get(&self, kind: TimerKind) -> Option<Timer> {
        match kind {
            TimerKind::Bite => self.bite,
            TimerKind::Decay => self.decay,
            TimerKind::Celebrate => self.celebrate,
        }
    }

    /// Pending timers, earliest first.
    pub fn pending(&self) -> Vec<Timer> {
        let mut timers: Vec<Timer> = [self.bite, self.decay, self.celebrate]
            .into_iter()
            .flatten()
            .collect();
        timers.sort_by_key(|t| t.due_at_ms);
        timers
    }

    pub fn next_due(&self) -> Option<Timer> {
        self.pending().into_iter().next()
    }

    pub fn is_empty(&self) -> bool {
        self.bite.is_none() && self.decay.is_none() && self.celebrate.is_none()
    }
}

/// Summary of a finished match, submitted to the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub score: u64,
    pub total_catches: u32,
    pub longest_streak: u32,
    pub duration_seconds: u64,
}

/// What happened during a session call, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    GameStarted,
    Cast { bite_in_ms: u64 },
    Bite { fish: FishInstance },
    Reeled { progress: f64 },
    Caught { outcome: CatchOutcome, score: u64 },
    Escaped { fish: FishInstance },
    BackToReady,
    /// `rank` is `None` when the result missed the board, or when the
    /// leaderboard ranks queued submits later through `Ranked`.
    MatchEnded { result: SessionResult, rank: Option<u32> },
    /// A queued leaderboard submit finished.
    Ranked { result: SessionResult, rank: Option<u32> },
    /// A save or leaderboard write failed. Local state is unaffected.
    PersistenceWarning(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer(kind: TimerKind, due_at_ms: u64) -> Timer {
        Timer {
            kind,
            due_at_ms,
            generation: 1,
        }
    }

    #[test]
    fn test_default_state_is_idle() {
        let state = SessionState::default();
        assert_eq!(state.phase, SessionPhase::Idle);
        assert!(state.current_fish.is_none());
        assert!(!state.phase.in_match());
    }

    #[test]
    fn test_pending_sorted_by_deadline() {
        let mut timers = SessionTimers::default();
        timers.schedule(timer(TimerKind::Celebrate, 900));
        timers.schedule(timer(TimerKind::Decay, 130));
        let pending = timers.pending();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].kind, TimerKind::Decay);
        assert_eq!(timers.next_due().map(|t| t.kind), Some(TimerKind::Decay));
    }

    #[test]
    fn test_schedule_replaces_same_kind() {
        let mut timers = SessionTimers::default();
        timers.schedule(timer(TimerKind::Decay, 130));
        timers.schedule(timer(TimerKind::Decay, 260));
        assert_eq!(timers.pending().len(), 1);
        assert_eq!(timers.get(TimerKind::Decay).map(|t| t.due_at_ms), Some(260));
    }

    #[test]
    fn test_cancel_all_clears_everything() {
        let mut timers = SessionTimers::default();
        timers.schedule(timer(TimerKind::Bite, 700));
        timers.schedule(timer(TimerKind::Decay, 130));
        timers.cancel_all();
        assert!(timers.is_empty());
        assert!(timers.next_due().is_none());
    }
}
