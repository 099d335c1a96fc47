//! Achievement system types and data structures.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Achievement categories for organization in the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementCategory {
    Catching,
    Skill,
    Discovery,
    Size,
    Progression,
    Events,
}

impl AchievementCategory {
    /// All categories in display order.
    pub const ALL: [AchievementCategory; 6] = [
        AchievementCategory::Catching,
        AchievementCategory::Skill,
        AchievementCategory::Discovery,
        AchievementCategory::Size,
        AchievementCategory::Progression,
        AchievementCategory::Events,
    ];

    /// Display name for the category.
    pub fn name(&self) -> &'static str {
        match self {
            AchievementCategory::Catching => "Catching",
            AchievementCategory::Skill => "Skill",
            AchievementCategory::Discovery => "Discovery",
            AchievementCategory::Size => "Size",
            AchievementCategory::Progression => "Progression",
            AchievementCategory::Events => "Events",
        }
    }
}

/// How hard an achievement is to earn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AchievementTier {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl AchievementTier {
    pub const ALL: [AchievementTier; 5] = [
        AchievementTier::Common,
        AchievementTier::Uncommon,
        AchievementTier::Rare,
        AchievementTier::Epic,
        AchievementTier::Legendary,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AchievementTier::Common => "Common",
            AchievementTier::Uncommon => "Uncommon",
            AchievementTier::Rare => "Rare",
            AchievementTier::Epic => "Epic",
            AchievementTier::Legendary => "Legendary",
        }
    }
}

/// Unique identifier for each achievement.
///
/// The serialized form is the id shared with the backend (`first_catch`, `catch_100`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    // Shared with the backend catalog
    #[serde(rename = "first_catch")]
    FirstCatch,
    #[serde(rename = "catch_100")]
    Catch100,
    #[serde(rename = "catch_1000")]
    Catch1000,
    #[serde(rename = "golden_koi")]
    GoldenKoi,
    #[serde(rename = "level_10")]
    Level10,
    #[serde(rename = "level_50")]
    Level50,
    #[serde(rename = "level_100")]
    Level100,
    #[serde(rename = "prestige_1")]
    Prestige1,
    #[serde(rename = "all_lures")]
    AllLures,
    #[serde(rename = "perfect_10")]
    Perfect10,
    #[serde(rename = "whale_watcher")]
    WhaleWatcher,
    #[serde(rename = "storm_fisher")]
    StormFisher,

    // Local only
    #[serde(rename = "catch_10")]
    Catch10,
    #[serde(rename = "catch_50")]
    Catch50,
    #[serde(rename = "catch_500")]
    Catch500,
    #[serde(rename = "perfect_first")]
    PerfectFirst,
    #[serde(rename = "perfect_50")]
    Perfect50,
    #[serde(rename = "combo_3")]
    Combo3,
    #[serde(rename = "combo_5")]
    Combo5,
    #[serde(rename = "combo_10")]
    Combo10,
    #[serde(rename = "combo_20")]
    Combo20,
    #[serde(rename = "big_fish")]
    BigFish,
    #[serde(rename = "huge_fish")]
    HugeFish,
    #[serde(rename = "rare_first")]
    RareFirst,
}

impl AchievementId {
    /// The id string used on the wire.
    pub fn wire_id(&self) -> &'static str {
        match self {
            AchievementId::FirstCatch => "first_catch",
            AchievementId::Catch100 => "catch_100",
            AchievementId::Catch1000 => "catch_1000",
            AchievementId::GoldenKoi => "golden_koi",
            AchievementId::Level10 => "level_10",
            AchievementId::Level50 => "level_50",
            AchievementId::Level100 => "level_100",
            AchievementId::Prestige1 => "prestige_1",
            AchievementId::AllLures => "all_lures",
            AchievementId::Perfect10 => "perfect_10",
            AchievementId::WhaleWatcher => "whale_watcher",
            AchievementId::StormFisher => "storm_fisher",
            AchievementId::Catch10 => "catch_10",
            AchievementId::Catch50 => "catch_50",
            AchievementId::Catch500 => "catch_500",
            AchievementId::PerfectFirst => "perfect_first",
            AchievementId::Perfect50 => "perfect_50",
            AchievementId::Combo3 => "combo_3",
            AchievementId::Combo5 => "combo_5",
            AchievementId::Combo10 => "combo_10",
            AchievementId::Combo20 => "combo_20",
            AchievementId::BigFish => "big_fish",
            AchievementId::HugeFish => "huge_fish",
            AchievementId::RareFirst => "rare_first",
        }
    }

    pub fn from_wire_id(id: &str) -> Option<AchievementId> {
        super::data::ALL_ACHIEVEMENTS
            .iter()
            .map(|def| def.id)
            .find(|a| a.wire_id() == id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementReward {
    pub coins: u64,
    pub xp: u64,
}

/// Static definition of an achievement.
#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub category: AchievementCategory,
    pub tier: AchievementTier,
    pub secret: bool,
    /// Part of the catalog served by the backend
    pub shared: bool,
    pub icon: &'static str,
    pub reward: AchievementReward,
}

impl AchievementDef {
    /// Name as shown in the browser; secret achievements stay hidden until unlocked.
    pub fn display_name(&self, unlocked: bool) -> &'static str {
        if self.secret && !unlocked {
            "???"
        } else {
            self.name
        }
    }

    pub fn display_description(&self, unlocked: bool) -> &'static str {
        if self.secret && !unlocked {
            "Discover this secret achievement"
        } else {
            self.description
        }
    }
}

/// Progress on a single achievement (for multi-stage achievements).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AchievementProgress {
    pub current: u64,
    pub target: u64,
}

/// Record of an unlocked achievement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockedAchievement {
    pub unlocked_at: i64,
    pub username: Option<String>,
}

/// What the game knows right after a catch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CatchSummary {
    pub total_catches: u64,
    pub perfect_catches: u64,
    pub combo: u32,
    pub size: u32,
    pub rarity: u8,
    pub golden_koi: bool,
    pub storm_catches: u64,
}

/// Achievement state (saved with the profile).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Achievements {
    /// Map of unlocked achievements.
    pub unlocked: HashMap<AchievementId, UnlockedAchievement>,
    /// Progress tracking for multi-stage achievements.
    pub progress: HashMap<AchievementId, AchievementProgress>,

    pub best_combo: u32,
    pub largest_fish: u32,
    pub rare_fish_caught: u64,
    pub highest_level: u32,
    pub highest_prestige: u32,
}

impl Achievements {
    /// Check if an achievement is unlocked.
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.contains_key(&id)
    }

    /// Unlock an achievement. Returns true if newly unlocked.
    pub fn unlock(&mut self, id: AchievementId, username: Option<String>) -> bool {
        if self.is_unlocked(id) {
            return false;
        }
        self.unlocked.insert(
            id,
            UnlockedAchievement {
                unlocked_at: chrono::Utc::now().timestamp(),
                username,
            },
        );
        log::info!("achievement unlocked: {}", id.wire_id());
        true
    }

    /// Update progress on a tracked achievement.
    pub fn update_progress(&mut self, id: AchievementId, current: u64, target: u64) {
        self.progress
            .insert(id, AchievementProgress { current, target });
    }

    /// Get the progress for an achievement, if any.
    pub fn get_progress(&self, id: AchievementId) -> Option<&AchievementProgress> {
        self.progress.get(&id)
    }

    /// Get the total number of achievements.
    pub fn total_count(&self) -> usize {
        use super::data::ALL_ACHIEVEMENTS;
        ALL_ACHIEVEMENTS.len()
    }

    /// Get the number of unlocked achievements.
    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    /// Get unlock percentage (0.0 - 100.0).
    pub fn unlock_percentage(&self) -> f32 {
        let total = self.total_count();
        if total == 0 {
            return 0.0;
        }
        (self.unlocked_count() as f32 / total as f32) * 100.0
    }

    /// Get count of unlocked/total by category.
    pub fn count_by_category(&self, category: AchievementCategory) -> (usize, usize) {
        use super::data::ALL_ACHIEVEMENTS;

        let category_achievements: Vec<_> = ALL_ACHIEVEMENTS
            .iter()
            .filter(|a| a.category == category)
            .collect();

        let unlocked = category_achievements
            .iter()
            .filter(|a| self.is_unlocked(a.id))
            .count();

        (unlocked, category_achievements.len())
    }

    pub fn count_by_tier(&self, tier: AchievementTier) -> (usize, usize) {
        use super::data::ALL_ACHIEVEMENTS;

        let in_tier: Vec<_> = ALL_ACHIEVEMENTS.iter().filter(|a| a.tier == tier).collect();
        let unlocked = in_tier.iter().filter(|a| self.is_unlocked(a.id)).count();
        (unlocked, in_tier.len())
    }

    /// Wire ids of everything unlocked, sorted for stable output.
    pub fn unlocked_wire_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .unlocked
            .keys()
            .map(|id| id.wire_id().to_string())
            .collect();
        ids.sort();
        ids
    }

    /// Marks achievements the backend already knows about. Unknown ids are ignored.
    pub fn merge_remote(&mut self, ids: &[String], username: Option<&str>) -> usize {
        ids.iter()
            .filter_map(|id| AchievementId::from_wire_id(id))
            .filter(|id| self.unlock(*id, username.map(|s| s.to_string())))
            .count()
    }

    fn unlock_if(
        &mut self,
        reached: bool,
        id: AchievementId,
        username: Option<&str>,
        newly: &mut Vec<AchievementId>,
    ) {
        if reached && self.unlock(id, username.map(|s| s.to_string())) {
            newly.push(id);
        }
    }

    // =========================================================================
    // Event Handlers (called from game logic)
    // =========================================================================

    /// Called after every landed fish. Returns the achievements it unlocked.
    pub fn on_catch(&mut self, c: &CatchSummary, username: Option<&str>) -> Vec<AchievementId> {
        let mut newly = Vec::new();

        self.best_combo = self.best_combo.max(c.combo);
        self.largest_fish = self.largest_fish.max(c.size);
        if c.rarity >= 2 {
            self.rare_fish_caught += 1;
        }

        // Catch count milestones
        let t = c.total_catches;
        self.unlock_if(t >= 1, AchievementId::FirstCatch, username, &mut newly);
        self.unlock_if(t >= 10, AchievementId::Catch10, username, &mut newly);
        self.unlock_if(t >= 50, AchievementId::Catch50, username, &mut newly);
        self.unlock_if(t >= 100, AchievementId::Catch100, username, &mut newly);
        self.unlock_if(t >= 500, AchievementId::Catch500, username, &mut newly);
        self.unlock_if(t >= 1000, AchievementId::Catch1000, username, &mut newly);
        self.update_progress(AchievementId::Catch1000, t.min(1000), 1000);

        // Perfect catches
        let p = c.perfect_catches;
        self.unlock_if(p >= 1, AchievementId::PerfectFirst, username, &mut newly);
        self.unlock_if(p >= 10, AchievementId::Perfect10, username, &mut newly);
        self.unlock_if(p >= 50, AchievementId::Perfect50, username, &mut newly);
        self.update_progress(AchievementId::Perfect50, p.min(50), 50);

        // Combos
        let combo = c.combo;
        self.unlock_if(combo >= 3, AchievementId::Combo3, username, &mut newly);
        self.unlock_if(combo >= 5, AchievementId::Combo5, username, &mut newly);
        self.unlock_if(combo >= 10, AchievementId::Combo10, username, &mut newly);
        self.unlock_if(combo >= 20, AchievementId::Combo20, username, &mut newly);

        // Size and rarity
        self.unlock_if(c.size > 50, AchievementId::BigFish, username, &mut newly);
        self.unlock_if(c.size > 100, AchievementId::HugeFish, username, &mut newly);
        self.unlock_if(c.rarity >= 2, AchievementId::RareFirst, username, &mut newly);
        self.unlock_if(c.golden_koi, AchievementId::GoldenKoi, username, &mut newly);

        self.unlock_if(
            c.storm_catches >= 50,
            AchievementId::StormFisher,
            username,
            &mut newly,
        );
        self.update_progress(AchievementId::StormFisher, c.storm_catches.min(50), 50);

        newly
    }

    /// Called when the player reaches a new level.
    pub fn on_level_up(&mut self, level: u32, username: Option<&str>) -> Vec<AchievementId> {
        let mut newly = Vec::new();
        self.highest_level = self.highest_level.max(level);
        self.unlock_if(level >= 10, AchievementId::Level10, username, &mut newly);
        self.unlock_if(level >= 50, AchievementId::Level50, username, &mut newly);
        self.unlock_if(level >= 100, AchievementId::Level100, username, &mut newly);
        newly
    }

    pub fn on_prestige(&mut self, prestige: u32, username: Option<&str>) -> Vec<AchievementId> {
        let mut newly = Vec::new();
        self.highest_prestige = self.highest_prestige.max(prestige);
        self.unlock_if(prestige >= 1, AchievementId::Prestige1, username, &mut newly);
        newly
    }

    /// Called with the number of lures now owned.
    pub fn on_lure_unlocked(
        &mut self,
        owned: usize,
        total: usize,
        username: Option<&str>,
    ) -> Vec<AchievementId> {
        let mut newly = Vec::new();
        self.unlock_if(owned >= total, AchievementId::AllLures, username, &mut newly);
        newly
    }

    pub fn on_whale_seen(&mut self, whales_seen: u64, username: Option<&str>) -> Vec<AchievementId> {
        let mut newly = Vec::new();
        self.update_progress(AchievementId::WhaleWatcher, whales_seen.min(10), 10);
        self.unlock_if(
            whales_seen >= 10,
            AchievementId::WhaleWatcher,
            username,
            &mut newly,
        );
        newly
    }
}
