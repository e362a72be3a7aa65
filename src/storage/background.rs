//! Fire-and-forget profile writes and leaderboard submits on worker threads.

use super::leaderboard::Subscription;
use super::lock;
use super::types::{
    LeaderboardCallback, LeaderboardEntry, LeaderboardStore, ProfileStore, ProfileUpdate,
    RankReport,
};
use crate::progression::PlayerProfile;
use crate::session::SessionResult;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use tracing::warn;

struct SaveJob {
    account_id: Option<String>,
    update: ProfileUpdate,
}

/// Wraps a store so `save_profile` returns as soon as the write is queued.
///
/// Failed writes are logged and reported through `drain_warnings`. Dropping
/// the saver waits for queued writes to finish.
pub struct BackgroundSaver<S: ProfileStore + Send + Sync + 'static> {
    store: Arc<S>,
    jobs: Option<Sender<SaveJob>>,
    warnings: Mutex<Receiver<String>>,
    worker: Option<JoinHandle<()>>,
}

impl<S: ProfileStore + Send + Sync + 'static> BackgroundSaver<S> {
    pub fn new(store: S) -> io::Result<Self> {
        let store = Arc::new(store);
        let (job_tx, job_rx) = mpsc::channel::<SaveJob>();
        let (warn_tx, warn_rx) = mpsc::channel::<String>();

        let worker_store = Arc::clone(&store);
        let worker = thread::Builder::new()
            .name("reelcast-saver".to_string())
            .spawn(move || {
                for job in job_rx {
                    if let Err(e) = worker_store.save_profile(job.account_id.as_deref(), &job.update) {
                        warn!(error = %e, "background profile save failed");
                        // The saver may already be gone
                        let _ = warn_tx.send(format!("Profile save failed: {}", e));
                    }
                }
            })?;

        Ok(Self {
            store,
            jobs: Some(job_tx),
            warnings: Mutex::new(warn_rx),
            worker: Some(worker),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: ProfileStore + Send + Sync + 'static> ProfileStore for BackgroundSaver<S> {
    fn load_profile(&self, account_id: Option<&str>) -> PlayerProfile {
        self.store.load_profile(account_id)
    }

    fn save_profile(&self, account_id: Option<&str>, update: &ProfileUpdate) -> io::Result<()> {
        let job = SaveJob {
            account_id: account_id.map(str::to_string),
            update: update.clone(),
        };
        match &self.jobs {
            Some(tx) => tx
                .send(job)
                .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "save worker stopped")),
            None => Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "save worker stopped",
            )),
        }
    }

    fn drain_warnings(&self) -> Vec<String> {
        let mut drained = self.store.drain_warnings();
        drained.extend(lock(&self.warnings).try_iter());
        drained
    }
}

impl<S: ProfileStore + Send + Sync + 'static> Drop for BackgroundSaver<S> {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop once the queue is empty
        self.jobs.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

struct SubmitJob {
    profile: PlayerProfile,
    result: SessionResult,
}

/// Wraps a leaderboard so `submit_entry` returns as soon as the submit is
/// queued, always with no rank.
///
/// The rank or failure of each submit comes back through `drain_reports`.
/// Dropping the wrapper waits for queued submits to finish.
pub struct BackgroundLeaderboard<S: LeaderboardStore + Send + Sync + 'static> {
    store: Arc<S>,
    jobs: Option<Sender<SubmitJob>>,
    reports: Mutex<Receiver<RankReport>>,
    worker: Option<JoinHandle<()>>,
}

impl<S: LeaderboardStore + Send + Sync + 'static> BackgroundLeaderboard<S> {
    pub fn new(store: S) -> io::Result<Self> {
        let store = Arc::new(store);
        let (job_tx, job_rx) = mpsc::channel::<SubmitJob>();
        let (report_tx, report_rx) = mpsc::channel::<RankReport>();

        let worker_store = Arc::clone(&store);
        let worker = thread::Builder::new()
            .name("reelcast-leaderboard".to_string())
            .spawn(move || {
                for job in job_rx {
                    let rank = worker_store.submit_entry(&job.profile, &job.result);
                    if let Err(e) = &rank {
                        warn!(error = %e, "background leaderboard submit failed");
                    }
                    let _ = report_tx.send(RankReport {
                        result: job.result,
                        rank,
                    });
                }
            })?;

        Ok(Self {
            store,
            jobs: Some(job_tx),
            reports: Mutex::new(report_rx),
            worker: Some(worker),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: LeaderboardStore + Send + Sync + 'static> LeaderboardStore for BackgroundLeaderboard<S> {
    fn submit_entry(
        &self,
        profile: &PlayerProfile,
        result: &SessionResult,
    ) -> io::Result<Option<u32>> {
        let job = SubmitJob {
            profile: profile.clone(),
            result: result.clone(),
        };
        match &self.jobs {
            Some(tx) => tx
                .send(job)
                .map(|_| None)
                .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "leaderboard worker stopped")),
            None => Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "leaderboard worker stopped",
            )),
        }
    }

    fn top_entries(&self) -> Vec<LeaderboardEntry> {
        self.store.top_entries()
    }

    fn subscribe(&self, callback: LeaderboardCallback) -> Subscription {
        self.store.subscribe(callback)
    }

    fn drain_reports(&self) -> Vec<RankReport> {
        let mut drained = self.store.drain_reports();
        drained.extend(lock(&self.reports).try_iter());
        drained
    }
}

impl<S: LeaderboardStore + Send + Sync + 'static> Drop for BackgroundLeaderboard<S> {
    fn drop(&mut self) {
        self.jobs.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_queued_saves_land_before_drop_returns() {
        let memory = MemoryStore::new();
        let saver = BackgroundSaver::new(memory.clone()).unwrap();
        for currency in 1..=5 {
            saver
                .save_profile(
                    None,
                    &ProfileUpdate {
                        currency: Some(currency),
                        ..ProfileUpdate::default()
                    },
                )
                .unwrap();
        }
        drop(saver);
        assert_eq!(memory.save_count(), 5);
        assert_eq!(memory.load_profile(None).currency, 5);
    }

    #[test]
    fn test_worker_failures_become_warnings() {
        let memory = MemoryStore::new();
        memory.set_fail_saves(true);
        let saver = BackgroundSaver::new(memory.clone()).unwrap();
        assert!(saver.save_profile(None, &ProfileUpdate::default()).is_ok());

        let mut warnings = Vec::new();
        for _ in 0..200 {
            warnings.extend(saver.drain_warnings());
            if !warnings.is_empty() {
                break;
            }
            thread::sleep(std::time::Duration::from_millis(5));
        }
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Profile save failed"));
    }

    fn result(score: u64) -> SessionResult {
        SessionResult {
            score,
            total_catches: 1,
            longest_streak: 1,
            duration_seconds: 60,
        }
    }

    fn wait_for_reports<S: LeaderboardStore + Send + Sync + 'static>(
        board: &BackgroundLeaderboard<S>,
        count: usize,
    ) -> Vec<RankReport> {
        let mut reports = Vec::new();
        for _ in 0..200 {
            reports.extend(board.drain_reports());
            if reports.len() >= count {
                break;
            }
            thread::sleep(std::time::Duration::from_millis(5));
        }
        reports
    }

    #[test]
    fn test_queued_submits_report_ranks() {
        let memory = MemoryStore::new();
        let board = BackgroundLeaderboard::new(memory.clone()).unwrap();
        let profile = PlayerProfile::default();

        assert_eq!(board.submit_entry(&profile, &result(10)).unwrap(), None);
        assert_eq!(board.submit_entry(&profile, &result(30)).unwrap(), None);

        let reports = wait_for_reports(&board, 2);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].result.score, 10);
        assert_eq!(reports[0].rank.as_ref().unwrap(), &Some(1));
        assert_eq!(reports[1].result.score, 30);
        assert_eq!(reports[1].rank.as_ref().unwrap(), &Some(1));
        assert_eq!(board.top_entries().len(), 2);
    }

    #[test]
    fn test_queued_submit_failure_is_reported() {
        let memory = MemoryStore::new();
        memory.set_fail_submits(true);
        let board = BackgroundLeaderboard::new(memory.clone()).unwrap();

        assert!(board
            .submit_entry(&PlayerProfile::default(), &result(5))
            .is_ok());
        let reports = wait_for_reports(&board, 1);
        assert_eq!(reports.len(), 1);
        assert!(reports[0].rank.is_err());
        assert!(memory.top_entries().is_empty());
    }

    #[test]
    fn test_drop_waits_for_queued_submits() {
        let memory = MemoryStore::new();
        let board = BackgroundLeaderboard::new(memory.clone()).unwrap();
        for score in 1..=5 {
            board
                .submit_entry(&PlayerProfile::default(), &result(score))
                .unwrap();
        }
        drop(board);
        assert_eq!(memory.top_entries().len(), 5);
    }
}
