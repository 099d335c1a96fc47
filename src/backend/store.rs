//! `LocalBackend`: users, scores and tackleboxes held in memory.

use super::catalog::{achievement_catalog, daily_challenge_for};
use super::weather::{FixedWeather, WeatherService, WeatherSource};
use crate::api::error::{ApiError, ApiResult};
use crate::api::types::*;
use crate::api::GameApi;
use crate::environment::weather::WeatherReport;
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub type BackendClock = Box<dyn Fn() -> DateTime<Utc> + Send>;

pub struct LocalBackend {
    users: Vec<User>,
    scores: Vec<Score>,
    fish: Vec<TackleboxFish>,
    weather: WeatherService,
    clock: BackendClock,
}

impl Default for LocalBackend {
    fn default() -> Self {
        Self::new(Box::new(FixedWeather(WeatherReport::fallback())))
    }
}

impl LocalBackend {
    pub fn new(weather: Box<dyn WeatherSource>) -> Self {
        Self {
            users: Vec::new(),
            scores: Vec::new(),
            fish: Vec::new(),
            weather: WeatherService::new(weather),
            clock: Box::new(Utc::now),
        }
    }

    pub fn with_clock(mut self, clock: BackendClock) -> Self {
        self.clock = clock;
        self
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    fn user_mut(&mut self, user_id: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == user_id)
    }

    fn require_user(&mut self, user_id: &str) -> ApiResult<&mut User> {
        self.user_mut(user_id)
            .ok_or_else(|| ApiError::NotFound("User".to_string()))
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

impl GameApi for LocalBackend {
    fn create_user(&mut self, device_id: &str, username: &str) -> ApiResult<User> {
        if let Some(existing) = self.users.iter().find(|u| u.device_id == device_id) {
            return Ok(existing.clone());
        }
        let user = User {
            id: Uuid::new_v4().to_string(),
            device_id: device_id.to_string(),
            username: username.to_string(),
            unlocked_lures: vec![0],
            high_score: 0,
            total_catches: 0,
            level: 1,
            prestige: 0,
            achievements: Vec::new(),
            daily_challenge_completed: false,
            daily_challenge_date: None,
            created_at: self.now().to_rfc3339(),
        };
        log::info!("created user {} for device {}", user.id, device_id);
        self.users.push(user.clone());
        Ok(user)
    }

    fn get_user(&mut self, device_id: &str) -> ApiResult<User> {
        self.users
            .iter()
            .find(|u| u.device_id == device_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("User".to_string()))
    }

    fn unlock_lure(&mut self, user_id: &str, lure_id: usize) -> ApiResult<UnlockLureResponse> {
        let user = self.require_user(user_id)?;
        if !user.unlocked_lures.contains(&lure_id) {
            user.unlocked_lures.push(lure_id);
        }
        Ok(UnlockLureResponse {
            success: true,
            unlocked_lures: user.unlocked_lures.clone(),
        })
    }

    // The next three succeed for unknown users, matching the server
    fn update_high_score(&mut self, user_id: &str, score: u64) -> ApiResult<SuccessResponse> {
        if let Some(user) = self.user_mut(user_id) {
            user.high_score = score;
        }
        Ok(SuccessResponse { success: true })
    }

    fn increment_catches(&mut self, user_id: &str, count: u64) -> ApiResult<SuccessResponse> {
        if let Some(user) = self.user_mut(user_id) {
            user.total_catches += count;
        }
        Ok(SuccessResponse { success: true })
    }

    fn set_level(&mut self, user_id: &str, level: u32) -> ApiResult<SuccessResponse> {
        if let Some(user) = self.user_mut(user_id) {
            user.level = level;
        }
        Ok(SuccessResponse { success: true })
    }

    fn prestige(&mut self, user_id: &str) -> ApiResult<PrestigeResponse> {
        let user = self.require_user(user_id)?;
        user.prestige += 1;
        user.level = 1;
        Ok(PrestigeResponse {
            success: true,
            prestige: user.prestige,
        })
    }

    fn unlock_achievement(
        &mut self,
        user_id: &str,
        achievement_id: &str,
    ) -> ApiResult<UnlockAchievementResponse> {
        let user = self.require_user(user_id)?;
        if !user.achievements.iter().any(|a| a == achievement_id) {
            user.achievements.push(achievement_id.to_string());
        }
        Ok(UnlockAchievementResponse {
            success: true,
            achievements: user.achievements.clone(),
        })
    }

    fn complete_daily(&mut self, user_id: &str) -> ApiResult<SuccessResponse> {
        let today = self.now().format("%Y-%m-%d").to_string();
        if let Some(user) = self.user_mut(user_id) {
            user.daily_challenge_completed = true;
            user.daily_challenge_date = Some(today);
        }
        Ok(SuccessResponse { success: true })
    }

    fn submit_score(&mut self, submission: &ScoreSubmission) -> ApiResult<Score> {
        let score = Score {
            id: Uuid::new_v4().to_string(),
            user_id: submission.user_id.clone(),
            username: submission.username.clone(),
            score: submission.score,
            level: submission.level,
            catches: submission.catches,
            stage: submission.stage,
            timestamp: self.now().to_rfc3339(),
        };
        self.scores.push(score.clone());
        if let Some(user) = self.user_mut(&submission.user_id) {
            if submission.score > user.high_score {
                user.high_score = submission.score;
            }
        }
        Ok(score)
    }

    fn leaderboard(&mut self, limit: usize) -> ApiResult<Vec<LeaderboardEntry>> {
        let mut scores: Vec<&Score> = self.scores.iter().collect();
        scores.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(scores
            .into_iter()
            .take(limit)
            .map(LeaderboardEntry::from)
            .collect())
    }

    fn weather(&mut self) -> ApiResult<WeatherReport> {
        let now = self.now();
        Ok(self.weather.current(now))
    }

    fn add_fish(&mut self, user_id: &str, fish: &NewFish) -> ApiResult<AddFishResponse> {
        let record = TackleboxFish {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: fish.name.clone(),
            size: fish.size,
            points: fish.points,
            color: fish.color.clone(),
            caught_at: self.now().to_rfc3339(),
        };
        let fish_id = record.id.clone();
        self.fish.push(record);
        Ok(AddFishResponse {
            success: true,
            fish_id,
        })
    }

    fn tacklebox(&mut self, user_id: &str, limit: usize) -> ApiResult<TackleboxResponse> {
        // Reverse first so equal timestamps list the later insert first
        let mut fish: Vec<TackleboxFish> = self
            .fish
            .iter()
            .rev()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect();
        fish.sort_by(|a, b| b.caught_at.cmp(&a.caught_at));
        fish.truncate(limit);
        let count = fish.len();
        Ok(TackleboxResponse { fish, count })
    }

    fn daily_challenge(&mut self) -> ApiResult<DailyChallenge> {
        Ok(daily_challenge_for(self.now().date_naive()))
    }

    fn achievements(&mut self) -> ApiResult<AchievementCatalog> {
        Ok(achievement_catalog())
    }
}
