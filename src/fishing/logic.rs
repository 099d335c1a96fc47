//! Fishing rules: weather effects, fish selection, line tension and scoring.
//!
//! Everything here is a pure function of its inputs and the supplied RNG so
//! the game loop, the simulator and tests share one implementation.

use super::data::{FISH_TYPES, GOLDEN_KOI};
use super::types::{FishType, HookedFish, Lure, Rod, TimeOfDay, WeatherModifiers};
use crate::core::constants::{
    BITE_DELAY_MIN_MS, BITE_DELAY_SPREAD_MS, COMBO_STEP, GOLDEN_KOI_CHANCE, PERFECT_MULTIPLIER,
    PERFECT_TENSION, SIZE_MULTIPLIER_MIN, SIZE_MULTIPLIER_SPREAD, STAGE_BONUS_ATTRACTION,
    TENSION_RELIEF_FACTOR, TENSION_RISE_FACTOR, TENSION_SPIKE, TENSION_SPIKE_CHANCE,
};
use crate::environment::weather::{WeatherCondition, WeatherReport};
use rand::Rng;

/// Converts a weather report into fishing multipliers.
///
/// Without a report every modifier is neutral.
pub fn weather_modifiers(weather: Option<&WeatherReport>) -> WeatherModifiers {
    let Some(w) = weather else {
        return WeatherModifiers::default();
    };
    WeatherModifiers {
        cast: (1.0 - w.wind_speed / 30.0).max(0.5),
        bite: match w.condition {
            WeatherCondition::Rain => 1.6,
            WeatherCondition::Storm => 0.5,
            _ => 1.0,
        },
        resist: w.wind_speed / 25.0 + if w.precipitation > 40.0 { 0.4 } else { 0.0 },
        visibility: (1.0 - w.cloud_cover / 120.0).max(0.4),
    }
}

/// Lure attraction, boosted on the stages the lure is suited to.
pub fn effective_attraction(lure: &Lure, stage_index: usize) -> f64 {
    if lure.stage_bonus.contains(&stage_index) {
        lure.attraction * STAGE_BONUS_ATTRACTION
    } else {
        lure.attraction
    }
}

/// Picks a species index into `FISH_TYPES`.
///
/// A tiny flat chance yields the Golden Koi. Otherwise a draw scaled by the
/// lure's attraction picks a tier; if that species refuses to bite at this
/// time of day the next tier down is tried.
pub fn select_random_fish(
    lure: &Lure,
    stage_index: usize,
    time: TimeOfDay,
    koi_chance_multiplier: f64,
    rng: &mut impl Rng,
) -> usize {
    if rng.gen::<f64>() < GOLDEN_KOI_CHANCE * koi_chance_multiplier.max(0.0) {
        return GOLDEN_KOI;
    }

    let weighted = rng.gen::<f64>() * effective_attraction(lure, stage_index) * 2.0;
    let tier = if weighted > 2.8 {
        4
    } else if weighted > 2.0 {
        3
    } else if weighted > 1.2 {
        2
    } else if weighted > 0.6 {
        1
    } else {
        0
    };

    (0..=tier)
        .rev()
        .find(|&i| FISH_TYPES[i].time.allows(time))
        .unwrap_or(0)
}

/// Size varies from 80% up to (but excluding) 150% of the species' base size.
pub fn calculate_fish_size(base: u32, rng: &mut impl Rng) -> u32 {
    let multiplier = SIZE_MULTIPLIER_MIN + rng.gen::<f64>() * SIZE_MULTIPLIER_SPREAD;
    (base as f64 * multiplier).round() as u32
}

pub fn is_perfect_catch(tension: f64) -> bool {
    tension < PERFECT_TENSION
}

/// Milliseconds until a fish bites. Better lures and friendlier weather shorten it.
pub fn bite_delay_ms(attraction: f64, bite_multiplier: f64, rng: &mut impl Rng) -> u64 {
    let base = rng.gen::<f64>() * BITE_DELAY_SPREAD_MS + BITE_DELAY_MIN_MS;
    let speed = (attraction * bite_multiplier).max(0.05);
    (base / speed).round() as u64
}

/// Puts a fresh fish of species `kind` on the hook.
pub fn hook_fish(kind: usize, rng: &mut impl Rng) -> HookedFish {
    let fish: &FishType = &FISH_TYPES[kind.min(FISH_TYPES.len() - 1)];
    HookedFish {
        kind,
        name: fish.name.to_string(),
        size: calculate_fish_size(fish.size, rng),
        rarity: fish.rarity,
        points: fish.points,
        color: fish.color.to_string(),
        resistance: fish.resistance(),
    }
}

/// Inputs to one reeling frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReelParams {
    pub resistance: f64,
    pub reel_speed: f64,
    /// Difficulty tension multiplier
    pub tension_multiplier: f64,
    /// Extra pull from wind and rain
    pub resist_modifier: f64,
}

impl ReelParams {
    pub fn new(fish: &HookedFish, rod: &Rod, tension_multiplier: f64, resist_modifier: f64) -> Self {
        Self {
            resistance: fish.resistance,
            reel_speed: rod.reel_speed,
            tension_multiplier,
            resist_modifier,
        }
    }
}

/// Advances line tension by one reeling frame, clamped to 0.0..=1.0.
///
/// The fish always pulls; the reel only relieves tension while `reeling`.
/// Occasionally the fish makes a sudden run.
pub fn reel_step(tension: f64, params: &ReelParams, reeling: bool, rng: &mut impl Rng) -> f64 {
    let mut t = tension
        + params.resistance
            * TENSION_RISE_FACTOR
            * params.tension_multiplier
            * (1.0 + params.resist_modifier);
    if reeling {
        t = (t - params.reel_speed * TENSION_RELIEF_FACTOR).max(0.0);
    }
    if rng.gen::<f64>() < TENSION_SPIKE_CHANCE {
        t += TENSION_SPIKE;
    }
    t.clamp(0.0, 1.0)
}

/// Points for a landed fish: +10% per combo step, doubled when perfect.
pub fn catch_points(base_points: u64, combo: u32, perfect: bool) -> u64 {
    let points = (base_points as f64 * (1.0 + combo as f64 * COMBO_STEP)).round() as u64;
    if perfect {
        points * PERFECT_MULTIPLIER
    } else {
        points
    }
}

/// Streak feedback shown alongside the score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComboBonus {
    pub multiplier: f64,
    pub bonus_points: u64,
    pub on_fire: bool,
    pub legendary: bool,
}

pub fn combo_bonus(combo: u32, perfect: bool) -> ComboBonus {
    let base = (combo as f64 * 0.1).min(2.0);
    let perfect_multiplier = if perfect { 1.5 } else { 1.0 };
    let streak = if combo >= 10 {
        0.5
    } else if combo >= 5 {
        0.25
    } else {
        0.0
    };
    ComboBonus {
        multiplier: 1.0 + base * perfect_multiplier + streak,
        bonus_points: (combo as f64 * 10.0 * perfect_multiplier).floor() as u64,
        on_fire: combo >= 5,
        legendary: combo >= 10,
    }
}
