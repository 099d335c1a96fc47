//! REST client for the GO FISH! backend.
//!
//! `GameApi` mirrors the backend routes one method per call. `HttpApi` talks
//! to a real server; `backend::LocalBackend` answers in-process.

#![allow(unused_imports)]

pub mod error;
pub mod http;
pub mod resilience;
pub mod sync;
pub mod types;
pub mod worker;

pub use error::*;
pub use http::*;
pub use resilience::*;
pub use sync::*;
pub use types::*;
pub use worker::*;

use crate::environment::weather::WeatherReport;

pub trait GameApi: Send {
    /// Returns the existing user for `device_id` or creates one.
    fn create_user(&mut self, device_id: &str, username: &str) -> ApiResult<User>;
    fn get_user(&mut self, device_id: &str) -> ApiResult<User>;
    fn unlock_lure(&mut self, user_id: &str, lure_id: usize) -> ApiResult<UnlockLureResponse>;
    fn update_high_score(&mut self, user_id: &str, score: u64) -> ApiResult<SuccessResponse>;
    fn increment_catches(&mut self, user_id: &str, count: u64) -> ApiResult<SuccessResponse>;
    fn set_level(&mut self, user_id: &str, level: u32) -> ApiResult<SuccessResponse>;
    fn prestige(&mut self, user_id: &str) -> ApiResult<PrestigeResponse>;
    fn unlock_achievement(
        &mut self,
        user_id: &str,
        achievement_id: &str,
    ) -> ApiResult<UnlockAchievementResponse>;
    fn complete_daily(&mut self, user_id: &str) -> ApiResult<SuccessResponse>;
    fn submit_score(&mut self, submission: &ScoreSubmission) -> ApiResult<Score>;
    fn leaderboard(&mut self, limit: usize) -> ApiResult<Vec<LeaderboardEntry>>;
    fn weather(&mut self) -> ApiResult<WeatherReport>;
    fn add_fish(&mut self, user_id: &str, fish: &NewFish) -> ApiResult<AddFishResponse>;
    fn tacklebox(&mut self, user_id: &str, limit: usize) -> ApiResult<TackleboxResponse>;
    fn daily_challenge(&mut self) -> ApiResult<DailyChallenge>;
    fn achievements(&mut self) -> ApiResult<AchievementCatalog>;
}
