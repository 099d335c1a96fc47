//! `GameApi` over HTTP with ureq.

use super::error::{ApiError, ApiResult};
use super::types::*;
use super::GameApi;
use crate::environment::weather::WeatherReport;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

const USER_AGENT: &str = concat!("gofish/", env!("CARGO_PKG_VERSION"));

pub struct HttpApi {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpApi {
    /// `backend_url` is the server root; routes live under `/api`.
    pub fn new(backend_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build();
        Self {
            agent,
            base_url: api_base(backend_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        what: &str,
    ) -> ApiResult<T> {
        let mut request = self.agent.get(&self.url(path));
        for (key, value) in query {
            request = request.query(key, value);
        }
        log::debug!("GET {}", path);
        decode(request.call(), what)
    }

    fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: Option<&impl Serialize>,
        what: &str,
    ) -> ApiResult<T> {
        let mut request = self.agent.post(&self.url(path));
        for (key, value) in query {
            request = request.query(key, value);
        }
        log::debug!("POST {}", path);
        let response = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };
        decode(response, what)
    }
}

/// Strips trailing slashes and appends `/api`.
pub fn api_base(backend_url: &str) -> String {
    format!("{}/api", backend_url.trim_end_matches('/'))
}

fn decode<T: DeserializeOwned>(
    response: Result<ureq::Response, ureq::Error>,
    what: &str,
) -> ApiResult<T> {
    match response {
        Ok(response) => response
            .into_json()
            .map_err(|e| ApiError::Decode(e.to_string())),
        Err(ureq::Error::Status(404, _)) => Err(ApiError::NotFound(what.to_string())),
        Err(ureq::Error::Status(status, response)) => Err(ApiError::Status {
            status,
            body: response.into_string().unwrap_or_default(),
        }),
        Err(ureq::Error::Transport(transport)) => Err(ApiError::Transport(transport.to_string())),
    }
}

const NO_BODY: Option<&()> = None;

impl GameApi for HttpApi {
    fn create_user(&mut self, device_id: &str, username: &str) -> ApiResult<User> {
        let body = UserCreate {
            device_id: device_id.to_string(),
            username: username.to_string(),
        };
        self.post("/user", &[], Some(&body), "User")
    }

    fn get_user(&mut self, device_id: &str) -> ApiResult<User> {
        self.get(&format!("/user/{}", device_id), &[], "User")
    }

    fn unlock_lure(&mut self, user_id: &str, lure_id: usize) -> ApiResult<UnlockLureResponse> {
        let body = LurePurchase {
            user_id: user_id.to_string(),
            lure_id,
        };
        self.post(
            &format!("/user/{}/unlock-lure", user_id),
            &[],
            Some(&body),
            "User",
        )
    }

    fn update_high_score(&mut self, user_id: &str, score: u64) -> ApiResult<SuccessResponse> {
        self.post(
            &format!("/user/{}/update-high-score", user_id),
            &[("score", score.to_string())],
            NO_BODY,
            "User",
        )
    }

    fn increment_catches(&mut self, user_id: &str, count: u64) -> ApiResult<SuccessResponse> {
        self.post(
            &format!("/user/{}/increment-catches", user_id),
            &[("count", count.to_string())],
            NO_BODY,
            "User",
        )
    }

    fn set_level(&mut self, user_id: &str, level: u32) -> ApiResult<SuccessResponse> {
        self.post(
            &format!("/user/{}/set-level", user_id),
            &[("level", level.to_string())],
            NO_BODY,
            "User",
        )
    }

    fn prestige(&mut self, user_id: &str) -> ApiResult<PrestigeResponse> {
        self.post(&format!("/user/{}/prestige", user_id), &[], NO_BODY, "User")
    }

    fn unlock_achievement(
        &mut self,
        user_id: &str,
        achievement_id: &str,
    ) -> ApiResult<UnlockAchievementResponse> {
        let body = AchievementUnlock {
            achievement_id: achievement_id.to_string(),
        };
        self.post(
            &format!("/user/{}/unlock-achievement", user_id),
            &[],
            Some(&body),
            "User",
        )
    }

    fn complete_daily(&mut self, user_id: &str) -> ApiResult<SuccessResponse> {
        self.post(
            &format!("/user/{}/complete-daily", user_id),
            &[],
            NO_BODY,
            "User",
        )
    }

    fn submit_score(&mut self, submission: &ScoreSubmission) -> ApiResult<Score> {
        self.post("/score", &[], Some(submission), "Score")
    }

    fn leaderboard(&mut self, limit: usize) -> ApiResult<Vec<LeaderboardEntry>> {
        self.get(
            "/leaderboard",
            &[("limit", limit.to_string())],
            "Leaderboard",
        )
    }

    fn weather(&mut self) -> ApiResult<WeatherReport> {
        self.get("/weather", &[], "Weather")
    }

    fn add_fish(&mut self, user_id: &str, fish: &NewFish) -> ApiResult<AddFishResponse> {
        self.post(
            &format!("/tacklebox/{}/add-fish", user_id),
            &[],
            Some(fish),
            "Tacklebox",
        )
    }

    fn tacklebox(&mut self, user_id: &str, limit: usize) -> ApiResult<TackleboxResponse> {
        self.get(
            &format!("/tacklebox/{}", user_id),
            &[("limit", limit.to_string())],
            "Tacklebox",
        )
    }

    fn daily_challenge(&mut self) -> ApiResult<DailyChallenge> {
        self.get("/daily-challenge", &[], "Daily challenge")
    }

    fn achievements(&mut self) -> ApiResult<AchievementCatalog> {
        self.get("/achievements", &[], "Achievements")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base() {
        assert_eq!(api_base("http://localhost:8001"), "http://localhost:8001/api");
        assert_eq!(api_base("https://fish.example/"), "https://fish.example/api");
    }

    #[test]
    fn test_unreachable_server_is_transport_error() {
        // Port 9 (discard) on localhost is closed in test environments
        let mut api = HttpApi::new("http://127.0.0.1:9", Duration::from_millis(200));
        match api.leaderboard(10) {
            Err(ApiError::Transport(_)) => {}
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
