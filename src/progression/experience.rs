//! Angler experience: level curve, skill points, level rewards and prestige.

use crate::environment::weather::WeatherCondition;
use crate::tacklebox::types::TackleboxItem;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MAX_LEVEL: u32 = 100;
pub const PRESTIGE_MIN_LEVEL: u32 = 50;
pub const MAX_SKILL_RANK: u32 = 20;

/// Cumulative experience needed to leave each level.
///
/// `curve[0] == 0`; leaving level `n` needs `curve[n]` total experience.
pub fn level_curve(max_level: u32) -> Vec<u64> {
    let mut curve = Vec::with_capacity(max_level as usize + 1);
    curve.push(0u64);
    for i in 1..=max_level as u64 {
        let step = (100.0 * (i as f64).powf(1.5) + i as f64 * 50.0).floor() as u64;
        let prev = curve[curve.len() - 1];
        curve.push(prev + step);
    }
    curve
}

/// Milestone levels get more skill points.
pub fn skill_points_for_level(level: u32) -> u32 {
    if level % 10 == 0 {
        3
    } else if level % 5 == 0 {
        2
    } else {
        1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LevelReward {
    Coins(u64),
    Rod(&'static str),
    Lure(&'static str),
    Title(&'static str),
    Stage(&'static str),
    XpBoost(f64),
    PrestigeUnlock,
}

impl LevelReward {
    pub fn describe(&self) -> String {
        match self {
            LevelReward::Coins(n) => format!("{} coins", n),
            LevelReward::Rod(id) => format!("Rod: {}", id),
            LevelReward::Lure(id) => format!("Lure: {}", id),
            LevelReward::Title(id) => format!("Title: {}", id),
            LevelReward::Stage(id) => format!("Stage: {}", id),
            LevelReward::XpBoost(m) => format!("Permanent XP x{:.1}", m),
            LevelReward::PrestigeUnlock => "Prestige unlocked".to_string(),
        }
    }
}

/// Rewards granted on reaching `level`: coins every level plus milestone extras.
pub fn level_rewards(level: u32) -> Vec<LevelReward> {
    let mut rewards = vec![LevelReward::Coins(level as u64 * 100)];
    match level {
        5 => rewards.push(LevelReward::Rod("fiberglass")),
        10 => {
            rewards.push(LevelReward::Lure("spinner"));
            rewards.push(LevelReward::Title("novice_angler"));
        }
        15 => rewards.push(LevelReward::Lure("neon_orange_bobber")),
        20 => {
            rewards.push(LevelReward::Rod("carbon"));
            rewards.push(LevelReward::Title("skilled_fisher"));
        }
        25 => rewards.push(LevelReward::Stage("deep_ocean")),
        30 => {
            rewards.push(LevelReward::XpBoost(1.1));
            rewards.push(LevelReward::Title("expert_angler"));
        }
        40 => {
            rewards.push(LevelReward::Rod("graphite_pro"));
            rewards.push(LevelReward::Title("master_fisher"));
        }
        50 => {
            rewards.push(LevelReward::Lure("golden_minnow"));
            rewards.push(LevelReward::Title("legendary_angler"));
            rewards.push(LevelReward::PrestigeUnlock);
        }
        75 => {
            rewards.push(LevelReward::Rod("dragon_slayer"));
            rewards.push(LevelReward::Title("mythic_fisher"));
        }
        100 => {
            rewards.push(LevelReward::Rod("poseidons_trident"));
            rewards.push(LevelReward::Title("god_of_fishing"));
        }
        _ => {}
    }
    rewards
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Multipliers {
    pub xp: f64,
    pub coins: f64,
    pub rarity: f64,
    pub luck: f64,
}

impl Default for Multipliers {
    fn default() -> Self {
        Self {
            xp: 1.0,
            coins: 1.0,
            rarity: 1.0,
            luck: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    Casting,
    Reeling,
    Patience,
    Strength,
    Luck,
}

impl Skill {
    pub const ALL: [Skill; 5] = [
        Skill::Casting,
        Skill::Reeling,
        Skill::Patience,
        Skill::Strength,
        Skill::Luck,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Skill::Casting => "Casting",
            Skill::Reeling => "Reeling",
            Skill::Patience => "Patience",
            Skill::Strength => "Strength",
            Skill::Luck => "Luck",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skills {
    pub casting: u32,
    pub reeling: u32,
    pub patience: u32,
    pub strength: u32,
    pub luck: u32,
}

impl Skills {
    pub fn get(&self, skill: Skill) -> u32 {
        match skill {
            Skill::Casting => self.casting,
            Skill::Reeling => self.reeling,
            Skill::Patience => self.patience,
            Skill::Strength => self.strength,
            Skill::Luck => self.luck,
        }
    }

    fn get_mut(&mut self, skill: Skill) -> &mut u32 {
        match skill {
            Skill::Casting => &mut self.casting,
            Skill::Reeling => &mut self.reeling,
            Skill::Patience => &mut self.patience,
            Skill::Strength => &mut self.strength,
            Skill::Luck => &mut self.luck,
        }
    }
}

/// Gameplay multipliers derived from skill ranks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillBonus {
    /// Extra cast distance
    pub cast_distance: f64,
    pub reel_speed: f64,
    pub bite_chance: f64,
    /// Multiplies tension rise; below 1 is better
    pub tension_resist: f64,
    pub rare_chance: f64,
}

pub fn skill_bonus(skills: &Skills) -> SkillBonus {
    SkillBonus {
        cast_distance: skills.casting as f64 * 5.0,
        reel_speed: 1.0 + skills.reeling as f64 * 0.05,
        bite_chance: 1.0 + skills.patience as f64 * 0.02,
        tension_resist: 1.0 - skills.strength as f64 * 0.03,
        rare_chance: 1.0 + skills.luck as f64 * 0.01,
    }
}

/// Lifetime fishing statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressStats {
    pub fish_caught: u64,
    pub total_weight: u64,
    pub largest_fish: u32,
    pub perfect_catches: u64,
    pub combo_max: u32,
    pub times_fished: u64,
    pub rare_fish_caught: u64,
    pub legendary_fish_caught: u64,
    pub money_earned: u64,
    pub money_spent: u64,
    pub fish_types: BTreeMap<String, u64>,
    pub stages_fished: BTreeMap<usize, u64>,
    pub weather_fished: BTreeMap<String, u64>,
    pub time_fished: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelUp {
    pub level: u32,
    pub skill_points: u32,
    pub rewards: Vec<LevelReward>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct XpGain {
    pub amount: u64,
    pub level_ups: Vec<LevelUp>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrestigeBonus {
    pub prestige: u32,
    pub xp_multiplier: f64,
    pub coin_multiplier: f64,
    pub rarity_bonus: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub level: u32,
    /// Experience within the current prestige
    pub experience: u64,
    pub total_experience: u64,
    pub prestige: u32,
    pub skill_points: u32,
    pub total_skill_points: u32,
    pub skills: Skills,
    pub multipliers: Multipliers,
    pub stats: ProgressStats,
    #[serde(skip, default = "default_curve")]
    curve: Vec<u64>,
}

fn default_curve() -> Vec<u64> {
    level_curve(MAX_LEVEL)
}

impl Default for Experience {
    fn default() -> Self {
        Self::new()
    }
}

impl Experience {
    pub fn new() -> Self {
        Self {
            level: 1,
            experience: 0,
            total_experience: 0,
            prestige: 0,
            skill_points: 0,
            total_skill_points: 0,
            skills: Skills::default(),
            multipliers: Multipliers::default(),
            stats: ProgressStats::default(),
            curve: default_curve(),
        }
    }

    fn max_level(&self) -> u32 {
        self.curve.len() as u32 - 1
    }

    /// Adds experience scaled by the xp multiplier, levelling up as needed.
    pub fn add_experience(&mut self, amount: u64, source: &str) -> XpGain {
        let gained = (amount as f64 * self.multipliers.xp).floor() as u64;
        self.experience += gained;
        self.total_experience += gained;

        let mut level_ups = Vec::new();
        while let Some(next) = self.xp_for_next_level() {
            if self.experience < next {
                break;
            }
            level_ups.push(self.level_up());
        }

        log::debug!(
            "xp +{} from {} (level {}, {} xp)",
            gained,
            source,
            self.level,
            self.experience
        );
        XpGain {
            amount: gained,
            level_ups,
        }
    }

    /// Total experience needed to leave the current level; `None` at the cap.
    pub fn xp_for_next_level(&self) -> Option<u64> {
        if self.level >= self.max_level() {
            None
        } else {
            Some(self.curve[self.level as usize])
        }
    }

    /// Fraction of the way through the current level, 0.0..=1.0.
    pub fn level_progress(&self) -> f64 {
        let Some(next) = self.xp_for_next_level() else {
            return 1.0;
        };
        let current = if self.level > 1 {
            self.curve[self.level as usize - 1]
        } else {
            0
        };
        let span = next.saturating_sub(current).max(1) as f64;
        ((self.experience as f64 - current as f64) / span).clamp(0.0, 1.0)
    }

    fn level_up(&mut self) -> LevelUp {
        self.level += 1;
        let points = skill_points_for_level(self.level);
        self.skill_points += points;
        self.total_skill_points += points;
        let rewards = level_rewards(self.level);
        for reward in &rewards {
            if let LevelReward::XpBoost(m) = reward {
                self.multipliers.xp *= m;
            }
        }
        log::info!("reached angler level {}", self.level);
        LevelUp {
            level: self.level,
            skill_points: points,
            rewards,
        }
    }

    /// Spends one skill point. Fails without points or at the rank cap.
    pub fn spend_skill_point(&mut self, skill: Skill) -> bool {
        if self.skill_points == 0 || self.skills.get(skill) >= MAX_SKILL_RANK {
            return false;
        }
        self.skill_points -= 1;
        *self.skills.get_mut(skill) += 1;
        true
    }

    pub fn skill_bonus(&self) -> SkillBonus {
        skill_bonus(&self.skills)
    }

    pub fn can_prestige(&self) -> bool {
        self.level >= PRESTIGE_MIN_LEVEL
    }

    /// Resets level and experience for permanent multipliers.
    pub fn prestige(&mut self) -> Option<PrestigeBonus> {
        if !self.can_prestige() {
            return None;
        }
        self.prestige += 1;
        self.multipliers.xp += 0.05;
        self.multipliers.coins += 0.05;
        self.multipliers.rarity += 0.02;
        self.level = 1;
        self.experience = 0;
        self.skill_points = self.total_skill_points / 10;
        Some(PrestigeBonus {
            prestige: self.prestige,
            xp_multiplier: 0.05,
            coin_multiplier: 0.05,
            rarity_bonus: 0.02,
        })
    }

    /// Records a landed fish in the lifetime statistics.
    pub fn track_catch(&mut self, item: &TackleboxItem, combo: u32, period: &str) {
        let stats = &mut self.stats;
        stats.fish_caught += 1;
        stats.times_fished += 1;
        stats.total_weight += item.size as u64;
        stats.largest_fish = stats.largest_fish.max(item.size);
        stats.combo_max = stats.combo_max.max(combo);
        stats.money_earned += item.points;
        if item.is_perfect {
            stats.perfect_catches += 1;
        }
        if item.rarity >= 2 {
            stats.rare_fish_caught += 1;
        }
        if item.rarity >= 3 {
            stats.legendary_fish_caught += 1;
        }
        *stats.fish_types.entry(item.name.clone()).or_insert(0) += 1;
        *stats.stages_fished.entry(item.stage).or_insert(0) += 1;
        let weather = item.weather.unwrap_or(WeatherCondition::Clear);
        *stats.weather_fished.entry(weather.name().to_string()).or_insert(0) += 1;
        *stats.time_fished.entry(period.to_string()).or_insert(0) += 1;
    }

    pub fn track_spend(&mut self, amount: u64) {
        self.stats.money_spent += amount;
    }

    /// Coins after the prestige coin multiplier.
    pub fn scale_coins(&self, coins: u64) -> u64 {
        (coins as f64 * self.multipliers.coins).floor() as u64
    }
}
