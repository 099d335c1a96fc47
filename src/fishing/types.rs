//! Fishing data types: tackle, fish, stages and difficulty.

use serde::{Deserialize, Serialize};

/// Coarse time of day used for fish preferences and stage lighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    #[default]
    Day,
    Dusk,
    Night,
}

impl TimeOfDay {
    /// 07:00-16:59 is day, 17:00-19:59 dusk, anything else night.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            7..=16 => TimeOfDay::Day,
            17..=19 => TimeOfDay::Dusk,
            _ => TimeOfDay::Night,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TimeOfDay::Day => "day",
            TimeOfDay::Dusk => "dusk",
            TimeOfDay::Night => "night",
        }
    }
}

/// When a fish species is willing to bite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePreference {
    Any,
    Day,
    Dusk,
    Night,
}

impl TimePreference {
    pub fn allows(&self, time: TimeOfDay) -> bool {
        match self {
            TimePreference::Any => true,
            TimePreference::Day => time == TimeOfDay::Day,
            TimePreference::Dusk => time == TimeOfDay::Dusk,
            TimePreference::Night => time == TimeOfDay::Night,
        }
    }
}

/// A fishing rod. Colors are `#RRGGBB` strings.
#[derive(Debug, Clone)]
pub struct Rod {
    pub name: &'static str,
    pub cast_distance: f64,
    pub reel_speed: f64,
    pub color: &'static str,
    pub durability: u32,
}

/// A lure. `stage_bonus` lists stage indices where the lure attracts better.
#[derive(Debug, Clone)]
pub struct Lure {
    pub name: &'static str,
    pub attraction: f64,
    pub wobble: f64,
    pub price: u64,
    pub unlock_level: u32,
    pub color: &'static str,
    pub stage_bonus: &'static [usize],
}

/// A catchable species.
#[derive(Debug, Clone)]
pub struct FishType {
    pub name: &'static str,
    /// Base size in centimetres
    pub size: u32,
    /// 0 = common .. 3 = legendary
    pub rarity: u8,
    pub points: u64,
    pub color: &'static str,
    pub time: TimePreference,
}

impl FishType {
    /// How hard the fish pulls on the line while reeling.
    pub fn resistance(&self) -> f64 {
        0.2 + self.rarity as f64 * 0.1
    }

    pub fn is_legendary(&self) -> bool {
        self.rarity >= 3
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageFeatures {
    pub lily: bool,
    pub boat: bool,
    pub rain: bool,
    pub lightning: bool,
}

/// A fishing location.
#[derive(Debug, Clone)]
pub struct Stage {
    pub name: &'static str,
    pub sky_colors: [&'static str; 2],
    pub water_colors: [&'static str; 2],
    pub time_of_day: TimeOfDay,
    pub features: StageFeatures,
}

#[derive(Debug, Clone)]
pub struct Difficulty {
    pub name: &'static str,
    pub fish_per_level: u32,
    pub tension_multiplier: f64,
}

#[derive(Debug, Clone)]
pub struct BoatType {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    pub points: u64,
}

/// Bonus points and a title granted on reaching a level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelMilestone {
    pub level: u32,
    pub reward: u64,
    pub title: &'static str,
}

/// Multipliers derived from the live weather report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherModifiers {
    pub cast: f64,
    pub bite: f64,
    pub resist: f64,
    pub visibility: f64,
}

impl Default for WeatherModifiers {
    fn default() -> Self {
        Self {
            cast: 1.0,
            bite: 1.0,
            resist: 0.0,
            visibility: 1.0,
        }
    }
}

/// A fish on the hook, before it is landed.
#[derive(Debug, Clone, PartialEq)]
pub struct HookedFish {
    /// Index into `FISH_TYPES`
    pub kind: usize,
    pub name: String,
    pub size: u32,
    pub rarity: u8,
    pub points: u64,
    pub color: String,
    pub resistance: f64,
}
