//! Achievement system module.
//!
//! Tracks fishing milestones for the player. The twelve shared achievements use
//! the same ids as the backend catalog; the rest are local only. State is saved
//! with the profile.

pub mod data;
pub mod types;

pub use data::{get_achievement_def, get_achievements_by_category, shared_achievements};
pub use types::{
    AchievementCategory, AchievementId, AchievementReward, AchievementTier, Achievements,
    CatchSummary,
};
