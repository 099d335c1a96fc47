//! Keeps the local profile and the backend in step.
//!
//! Every call goes through a circuit breaker so a dead server costs one
//! timeout, not one per catch. Bootstrap also retries. Nothing here is fatal:
//! the game keeps running on local state when the backend is away.

use super::error::{ApiError, ApiResult};
use super::resilience::{with_retry, CircuitBreaker, RetryPolicy};
use super::types::{LeaderboardEntry, NewFish, Score, ScoreSubmission, TackleboxResponse};
use super::GameApi;
use crate::achievements::{get_achievement_def, AchievementId};
use crate::core::game_state::GameState;
use crate::tacklebox::types::TackleboxItem;

/// What bootstrap managed to pull from the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub user_id: Option<String>,
    pub lures_merged: usize,
    pub achievements_merged: usize,
    pub weather: bool,
    pub daily_challenge: bool,
}

/// The slice of `GameState` the pushes read, small enough to hand to the
/// sync thread.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSnapshot {
    pub user_id: Option<String>,
    pub username: String,
    pub high_score: u64,
    pub level: u32,
    pub session_score: u64,
    pub session_catches: u64,
    pub stage: usize,
}

impl From<&GameState> for SyncSnapshot {
    fn from(state: &GameState) -> Self {
        Self {
            user_id: state.user_id.clone(),
            username: state.username.clone(),
            high_score: state.high_score,
            level: state.level,
            session_score: state.session_score,
            session_catches: state.session_catches,
            stage: state.current_stage,
        }
    }
}

impl From<&mut GameState> for SyncSnapshot {
    fn from(state: &mut GameState) -> Self {
        Self::from(&*state)
    }
}

pub struct BackendSync {
    api: Box<dyn GameApi>,
    breaker: CircuitBreaker,
    retry: RetryPolicy,
}

fn user_id(snapshot: &SyncSnapshot) -> ApiResult<String> {
    snapshot
        .user_id
        .clone()
        .ok_or_else(|| ApiError::NotFound("User".to_string()))
}

impl BackendSync {
    pub fn new(api: Box<dyn GameApi>) -> Self {
        Self::with_policy(api, RetryPolicy::default())
    }

    pub fn with_policy(api: Box<dyn GameApi>, retry: RetryPolicy) -> Self {
        Self {
            api,
            breaker: CircuitBreaker::default(),
            retry,
        }
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    fn call<T>(&mut self, op: impl FnOnce(&mut dyn GameApi) -> ApiResult<T>) -> ApiResult<T> {
        let api = self.api.as_mut();
        self.breaker.call(|| op(api))
    }

    fn call_with_retry<T>(
        &mut self,
        mut op: impl FnMut(&mut dyn GameApi) -> ApiResult<T>,
    ) -> ApiResult<T> {
        let Self {
            api,
            breaker,
            retry,
        } = self;
        breaker.call(|| with_retry(retry, || op(api.as_mut())))
    }

    /// Fetches or creates the user and folds the server's view into `state`.
    pub fn bootstrap(&mut self, state: &mut GameState) -> BootstrapReport {
        let mut report = BootstrapReport::default();
        let device_id = state.device_id.clone();
        let username = state.username.clone();

        let user = match self.call_with_retry(|api| api.get_user(&device_id)) {
            Err(ApiError::NotFound(_)) => {
                self.call_with_retry(|api| api.create_user(&device_id, &username))
            }
            other => other,
        };
        match user {
            Ok(user) => {
                report.lures_merged = user
                    .unlocked_lures
                    .iter()
                    .filter(|&&lure| state.unlock_lure(lure))
                    .count();
                report.achievements_merged = state
                    .achievements
                    .merge_remote(&user.achievements, Some(username.as_str()));
                state.high_score = state.high_score.max(user.high_score);
                log::info!(
                    "signed in as {} ({} lures, {} achievements merged)",
                    user.id,
                    report.lures_merged,
                    report.achievements_merged
                );
                state.user_id = Some(user.id.clone());
                report.user_id = Some(user.id);

                if let Ok(challenge) = self.call(|api| api.daily_challenge()) {
                    let done_today = user.daily_challenge_completed
                        && user.daily_challenge_date.as_deref() == Some(challenge.date.as_str());
                    state.set_daily_challenge(challenge);
                    state.daily.completed |= done_today;
                    report.daily_challenge = true;
                }
            }
            Err(e) => log::warn!("backend unavailable, playing offline: {}", e),
        }

        match self.call(|api| api.weather()) {
            Ok(weather) => {
                state.weather = Some(weather);
                report.weather = true;
            }
            Err(e) => log::warn!("weather unavailable: {}", e),
        }
        report
    }

    /// Records a landed fish upstream.
    pub fn push_catch(
        &mut self,
        state: impl Into<SyncSnapshot>,
        item: &TackleboxItem,
    ) -> ApiResult<()> {
        let state = state.into();
        let id = user_id(&state)?;
        let fish = NewFish {
            name: item.name.clone(),
            size: item.size,
            points: item.points,
            color: item.color.clone(),
        };
        let high_score = state.high_score;
        self.call(|api| {
            api.increment_catches(&id, 1)?;
            api.add_fish(&id, &fish)?;
            api.update_high_score(&id, high_score)?;
            Ok(())
        })
    }

    /// Pushes unlocks the backend knows about; local-only ones are skipped.
    pub fn push_achievements(
        &mut self,
        state: impl Into<SyncSnapshot>,
        ids: &[AchievementId],
    ) -> ApiResult<()> {
        let id = user_id(&state.into())?;
        let shared: Vec<&'static str> = ids
            .iter()
            .filter(|a| get_achievement_def(**a).map_or(false, |d| d.shared))
            .map(|a| a.wire_id())
            .collect();
        for wire_id in shared {
            self.call(|api| api.unlock_achievement(&id, wire_id))?;
        }
        Ok(())
    }

    pub fn push_level(&mut self, state: impl Into<SyncSnapshot>) -> ApiResult<()> {
        let state = state.into();
        let id = user_id(&state)?;
        let level = state.level;
        self.call(|api| api.set_level(&id, level)).map(|_| ())
    }

    pub fn push_lure(&mut self, state: impl Into<SyncSnapshot>, lure: usize) -> ApiResult<()> {
        let id = user_id(&state.into())?;
        self.call(|api| api.unlock_lure(&id, lure)).map(|_| ())
    }

    pub fn push_prestige(&mut self, state: impl Into<SyncSnapshot>) -> ApiResult<u32> {
        let id = user_id(&state.into())?;
        self.call(|api| api.prestige(&id)).map(|r| r.prestige)
    }

    pub fn complete_daily(&mut self, state: impl Into<SyncSnapshot>) -> ApiResult<()> {
        let id = user_id(&state.into())?;
        self.call(|api| api.complete_daily(&id)).map(|_| ())
    }

    /// Posts the session's score. Sessions without points are not submitted.
    pub fn submit_session_score(
        &mut self,
        state: impl Into<SyncSnapshot>,
    ) -> ApiResult<Option<Score>> {
        let state = state.into();
        if state.session_score == 0 {
            return Ok(None);
        }
        let submission = ScoreSubmission {
            user_id: user_id(&state)?,
            username: state.username,
            score: state.session_score,
            level: state.level,
            catches: state.session_catches,
            stage: state.stage,
        };
        self.call(|api| api.submit_score(&submission)).map(Some)
    }

    pub fn leaderboard(&mut self, limit: usize) -> ApiResult<Vec<LeaderboardEntry>> {
        self.call(|api| api.leaderboard(limit))
    }

    pub fn remote_tacklebox(
        &mut self,
        state: impl Into<SyncSnapshot>,
        limit: usize,
    ) -> ApiResult<TackleboxResponse> {
        let id = user_id(&state.into())?;
        self.call(|api| api.tacklebox(&id, limit))
    }
}
