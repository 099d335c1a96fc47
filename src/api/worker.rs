//! Runs `BackendSync` on its own thread.
//!
//! The frame loop queues jobs and picks up replies with `poll`; a slow or
//! dead server only delays the sync, never a frame.

use super::error::ApiResult;
use super::sync::{BackendSync, SyncSnapshot};
use super::types::{LeaderboardEntry, Score};
use crate::achievements::AchievementId;
use crate::tacklebox::types::TackleboxItem;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

#[derive(Debug, Clone)]
pub enum SyncJob {
    Catch(SyncSnapshot, TackleboxItem),
    Achievements(SyncSnapshot, Vec<AchievementId>),
    Level(SyncSnapshot),
    Lure(SyncSnapshot, usize),
    Prestige(SyncSnapshot),
    CompleteDaily(SyncSnapshot),
    SessionScore(SyncSnapshot),
    Leaderboard(usize),
}

/// Replies the front-end cares about. Everything else is only logged.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    Leaderboard(ApiResult<Vec<LeaderboardEntry>>),
    SessionSubmitted(Score),
    Prestige(u32),
}

pub struct SyncWorker {
    jobs: Option<Sender<SyncJob>>,
    events: Receiver<SyncEvent>,
    handle: Option<JoinHandle<()>>,
}

fn run_job(sync: &mut BackendSync, job: SyncJob) -> Option<SyncEvent> {
    match job {
        SyncJob::Catch(snapshot, item) => {
            if let Err(e) = sync.push_catch(snapshot, &item) {
                log::debug!("catch not synced: {}", e);
            }
        }
        SyncJob::Achievements(snapshot, ids) => {
            if let Err(e) = sync.push_achievements(snapshot, &ids) {
                log::debug!("achievements not synced: {}", e);
            }
        }
        SyncJob::Level(snapshot) => {
            if let Err(e) = sync.push_level(snapshot) {
                log::debug!("level not synced: {}", e);
            }
        }
        SyncJob::Lure(snapshot, lure) => {
            if let Err(e) = sync.push_lure(snapshot, lure) {
                log::debug!("lure not synced: {}", e);
            }
        }
        SyncJob::Prestige(snapshot) => match sync.push_prestige(snapshot) {
            Ok(prestige) => return Some(SyncEvent::Prestige(prestige)),
            Err(e) => log::debug!("prestige not synced: {}", e),
        },
        SyncJob::CompleteDaily(snapshot) => {
            if let Err(e) = sync.complete_daily(snapshot) {
                log::debug!("daily challenge not synced: {}", e);
            }
        }
        SyncJob::SessionScore(snapshot) => match sync.submit_session_score(snapshot) {
            Ok(Some(score)) => return Some(SyncEvent::SessionSubmitted(score)),
            Ok(None) => {}
            Err(e) => log::debug!("session score not submitted: {}", e),
        },
        SyncJob::Leaderboard(limit) => {
            return Some(SyncEvent::Leaderboard(sync.leaderboard(limit)));
        }
    }
    None
}

impl SyncWorker {
    /// Moves `sync` onto a new thread. Jobs run in the order they are sent.
    pub fn spawn(mut sync: BackendSync) -> Self {
        let (job_tx, job_rx) = mpsc::channel::<SyncJob>();
        let (event_tx, event_rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            for job in job_rx {
                if let Some(event) = run_job(&mut sync, job) {
                    // Nobody listening any more; keep draining the queue
                    let _ = event_tx.send(event);
                }
            }
            log::debug!("sync worker finished");
        });
        Self {
            jobs: Some(job_tx),
            events: event_rx,
            handle: Some(handle),
        }
    }

    /// Queues a job without waiting for it.
    pub fn submit(&self, job: SyncJob) {
        if let Some(jobs) = &self.jobs {
            if jobs.send(job).is_err() {
                log::warn!("sync worker stopped, job dropped");
            }
        }
    }

    /// Replies that arrived since the last call.
    pub fn poll(&self) -> Vec<SyncEvent> {
        self.events.try_iter().collect()
    }

    /// Runs the queued jobs to completion and stops the thread.
    pub fn shutdown(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("sync worker panicked");
            }
        }
    }
}

impl Drop for SyncWorker {
    fn drop(&mut self) {
        self.finish();
    }
}
