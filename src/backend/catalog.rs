//! Fixed server content: the daily challenge rotation and the achievement
//! catalog.

use crate::achievements::shared_achievements;
use crate::api::types::{AchievementCatalog, AchievementInfo, DailyChallenge};
use chrono::{Datelike, NaiveDate};

struct ChallengeEntry {
    kind: &'static str,
    target: u64,
    description: &'static str,
    reward: u64,
}

const DAILY_ROTATION: [ChallengeEntry; 5] = [
    ChallengeEntry {
        kind: "catch_count",
        target: 50,
        description: "Catch 50 fish today",
        reward: 500,
    },
    ChallengeEntry {
        kind: "catch_legendary",
        target: 1,
        description: "Catch a Golden Koi",
        reward: 1000,
    },
    ChallengeEntry {
        kind: "level_up",
        target: 5,
        description: "Level up 5 times",
        reward: 750,
    },
    ChallengeEntry {
        kind: "score",
        target: 5000,
        description: "Score 5000 points",
        reward: 600,
    },
    ChallengeEntry {
        kind: "perfect_catches",
        target: 10,
        description: "Get 10 perfect catches",
        reward: 800,
    },
];

/// The challenge for a UTC calendar date, keyed on `yyyymmdd mod 5`.
pub fn daily_challenge_for(date: NaiveDate) -> DailyChallenge {
    let seed = date.year() as i64 * 10000 + date.month() as i64 * 100 + date.day() as i64;
    let entry = &DAILY_ROTATION[seed.rem_euclid(DAILY_ROTATION.len() as i64) as usize];
    DailyChallenge {
        kind: entry.kind.to_string(),
        target: entry.target,
        description: entry.description.to_string(),
        reward: entry.reward,
        date: date.format("%Y-%m-%d").to_string(),
    }
}

pub fn achievement_catalog() -> AchievementCatalog {
    AchievementCatalog {
        achievements: shared_achievements()
            .into_iter()
            .map(|def| AchievementInfo {
                id: def.id.wire_id().to_string(),
                name: def.name.to_string(),
                description: def.description.to_string(),
                icon: def.icon.to_string(),
            })
            .collect(),
    }
}
