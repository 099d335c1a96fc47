//! JSON bodies exchanged with the backend.

use serde::{Deserialize, Serialize};

fn default_username() -> String {
    "Angler".to_string()
}

fn default_lures() -> Vec<usize> {
    vec![0]
}

fn default_level() -> u32 {
    1
}

/// A player record as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub device_id: String,
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_lures")]
    pub unlocked_lures: Vec<usize>,
    #[serde(default)]
    pub high_score: u64,
    #[serde(default)]
    pub total_catches: u64,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub prestige: u32,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub daily_challenge_completed: bool,
    #[serde(default)]
    pub daily_challenge_date: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCreate {
    pub device_id: String,
    #[serde(default = "default_username")]
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub user_id: String,
    pub username: String,
    pub score: u64,
    pub level: u32,
    pub catches: u64,
    pub stage: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub score: u64,
    pub level: u32,
    pub catches: u64,
    pub stage: usize,
    /// RFC 3339
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: u64,
    pub level: u32,
    pub catches: u64,
    pub timestamp: String,
}

impl From<&Score> for LeaderboardEntry {
    fn from(s: &Score) -> Self {
        Self {
            username: s.username.clone(),
            score: s.score,
            level: s.level,
            catches: s.catches,
            timestamp: s.timestamp.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LurePurchase {
    pub user_id: String,
    pub lure_id: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementUnlock {
    pub achievement_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockLureResponse {
    pub success: bool,
    pub unlocked_lures: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrestigeResponse {
    pub success: bool,
    pub prestige: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockAchievementResponse {
    pub success: bool,
    pub achievements: Vec<String>,
}

/// A fish sent to the remote tacklebox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFish {
    pub name: String,
    pub size: u32,
    pub points: u64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddFishResponse {
    pub success: bool,
    pub fish_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TackleboxFish {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub size: u32,
    pub points: u64,
    pub color: String,
    pub caught_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TackleboxResponse {
    pub fish: Vec<TackleboxFish>,
    pub count: usize,
}

/// The server's challenge of the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyChallenge {
    #[serde(rename = "type")]
    pub kind: String,
    pub target: u64,
    pub description: String,
    pub reward: u64,
    /// `YYYY-MM-DD`
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementCatalog {
    pub achievements: Vec<AchievementInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_defaults_on_sparse_json() {
        let user: User = serde_json::from_str(r#"{"id":"u1","device_id":"d1"}"#).unwrap();
        assert_eq!(user.username, "Angler");
        assert_eq!(user.unlocked_lures, vec![0]);
        assert_eq!(user.level, 1);
        assert!(user.achievements.is_empty());
    }

    #[test]
    fn test_daily_challenge_type_field() {
        let json = r#"{"type":"catch_count","target":50,"description":"Catch 50 fish today","reward":500,"date":"2025-01-01"}"#;
        let challenge: DailyChallenge = serde_json::from_str(json).unwrap();
        assert_eq!(challenge.kind, "catch_count");
        let back = serde_json::to_value(&challenge).unwrap();
        assert_eq!(back["type"], "catch_count");
    }

    #[test]
    fn test_user_create_default_username() {
        let create: UserCreate = serde_json::from_str(r#"{"device_id":"d1"}"#).unwrap();
        assert_eq!(create.username, "Angler");
    }
}
