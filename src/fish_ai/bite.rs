//! Decides whether a fish takes the lure.

use super::brain::FishBrain;
use crate::environment::day_night::TimePeriod;
use crate::environment::weather::WeatherCondition;
use crate::fishing::types::Lure;
use rand::Rng;

const BASE_CHANCE: f64 = 0.1;
const OPTIMAL_WATER_TEMP: f64 = 18.0;

/// Conditions at the fishing spot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiteEnvironment {
    pub weather: WeatherCondition,
    pub water_clarity: f64,
    pub water_temp: f64,
    pub period: TimePeriod,
}

impl Default for BiteEnvironment {
    fn default() -> Self {
        Self {
            weather: WeatherCondition::Clear,
            water_clarity: 0.7,
            water_temp: OPTIMAL_WATER_TEMP,
            period: TimePeriod::Day,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiteDecision {
    pub will_bite: bool,
    /// The computed bite chance
    pub confidence: f64,
    pub roll: f64,
    pub hesitation_ms: u64,
    pub strike_force: f64,
    /// A smart fish mouthed the lure without committing
    pub test_nibble: bool,
}

/// Lure appeal for this fish; roughly -0.2..0.6.
pub fn evaluate_lure(lure: &Lure, fish: &FishBrain) -> f64 {
    let mut score = (lure.attraction - 1.0) * 0.25;
    // Lively lures draw curious fish, subtle ones suit cautious fish
    if lure.wobble >= 1.0 {
        score += if fish.traits.curiosity > 0.5 { 0.25 } else { -0.1 };
    } else if fish.traits.caution > 0.6 {
        score += 0.2;
    }
    score
}

pub fn environment_modifier(env: &BiteEnvironment) -> f64 {
    let mut modifier = match env.weather {
        WeatherCondition::Rain => 1.3,
        WeatherCondition::Storm => 0.7,
        WeatherCondition::Cloudy => 1.1,
        WeatherCondition::Clear => 1.0,
    };
    if env.water_clarity < 0.5 {
        modifier *= 0.8;
    }
    let temp_diff = (env.water_temp - OPTIMAL_WATER_TEMP).abs();
    modifier * (1.0 - temp_diff * 0.02).max(0.5)
}

pub fn time_modifier(period: TimePeriod) -> f64 {
    match period {
        TimePeriod::Dawn | TimePeriod::Sunrise => 1.4,
        TimePeriod::Day | TimePeriod::Afternoon => 0.9,
        TimePeriod::Noon => 0.7,
        TimePeriod::Sunset | TimePeriod::Dusk => 1.5,
        TimePeriod::Night => 1.2,
    }
}

pub fn experience_modifier(fish: &FishBrain) -> f64 {
    let hooks = fish.recent_hooks();
    if hooks == 0 {
        1.0
    } else {
        (1.0 - hooks as f64 * 0.3).max(0.1)
    }
}

/// Probability in 0.01..=0.95 that `fish` bites `lure`.
pub fn bite_chance(fish: &FishBrain, lure: &Lure, env: &BiteEnvironment) -> f64 {
    let mut chance = BASE_CHANCE;
    chance *= 1.0 + evaluate_lure(lure, fish);
    chance *= 0.5 + fish.hunger / 100.0 * 1.5;
    chance *= fish.mood.bite_modifier();
    chance *= environment_modifier(env);
    chance *= time_modifier(env.period);
    chance *= 1.0 - fish.traits.intelligence * 0.5;
    chance *= experience_modifier(fish);
    chance.clamp(0.01, 0.95)
}

pub fn decide_bite(
    fish: &FishBrain,
    lure: &Lure,
    env: &BiteEnvironment,
    rng: &mut impl Rng,
) -> BiteDecision {
    let chance = bite_chance(fish, lure, env);
    let roll = rng.gen::<f64>();
    let mut decision = BiteDecision {
        will_bite: roll < chance,
        confidence: chance,
        roll,
        hesitation_ms: if chance > 0.5 {
            0
        } else {
            ((1.0 - chance) * 2000.0) as u64
        },
        strike_force: fish.traits.aggression,
        test_nibble: false,
    };
    if fish.traits.intelligence > 0.6 && roll >= chance && roll < chance * 1.5 {
        decision.test_nibble = true;
        decision.will_bite = false;
    }
    decision
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fish_ai::types::{Mood, Traits};
    use crate::fishing::data::LURES;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn neutral_fish() -> FishBrain {
        FishBrain::new(0, Traits::default())
    }

    #[test]
    fn test_chance_is_clamped() {
        let mut fish = neutral_fish();
        fish.mood = Mood::Scared;
        fish.hunger = 0.0;
        fish.traits.intelligence = 1.0;
        let storm = BiteEnvironment {
            weather: WeatherCondition::Storm,
            water_clarity: 0.2,
            water_temp: 40.0,
            period: TimePeriod::Noon,
        };
        assert_eq!(bite_chance(&fish, &LURES[0], &storm), 0.01);

        fish.mood = Mood::Hungry;
        fish.hunger = 100.0;
        fish.traits.intelligence = 0.0;
        fish.traits.curiosity = 0.9;
        let dusk = BiteEnvironment {
            weather: WeatherCondition::Rain,
            period: TimePeriod::Dusk,
            ..BiteEnvironment::default()
        };
        // 0.1 * 1.55 * 2.0 * 2.0 * 1.3 * 1.5 = 1.209
        assert_eq!(bite_chance(&fish, &LURES[2], &dusk), 0.95);
    }

    #[test]
    fn test_neutral_chance_matches_formula() {
        let fish = neutral_fish();
        // Bobber: attraction 1.0, wobble 0.5, caution 0.4 -> lure score 0
        let chance = bite_chance(&fish, &LURES[0], &BiteEnvironment::default());
        let expected = 0.1 * 1.0 * (0.5 + 0.5 * 1.5) * 1.0 * 1.0 * 0.9 * (1.0 - 0.3 * 0.5);
        assert!((chance - expected).abs() < 1e-12);
    }

    #[test]
    fn test_hooks_make_fish_wary() {
        let mut fish = neutral_fish();
        let fresh = bite_chance(&fish, &LURES[0], &BiteEnvironment::default());
        fish.record_hook();
        fish.mood = Mood::Neutral;
        let wary = bite_chance(&fish, &LURES[0], &BiteEnvironment::default());
        assert!((wary - fresh * 0.7).abs() < 1e-12);

        for _ in 0..5 {
            fish.record_hook();
        }
        assert_eq!(experience_modifier(&fish), 0.1);
    }

    #[test]
    fn test_smart_fish_nibble_instead_of_biting() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let mut fish = neutral_fish();
        fish.traits.intelligence = 0.9;
        let env = BiteEnvironment::default();
        let mut nibbles = 0;
        for _ in 0..2000 {
            let decision = decide_bite(&fish, &LURES[0], &env, &mut rng);
            if decision.test_nibble {
                nibbles += 1;
                assert!(!decision.will_bite);
                assert!(decision.roll >= decision.confidence);
            }
            assert!(decision.hesitation_ms > 0);
        }
        assert!(nibbles > 0);
    }

    #[test]
    fn test_temperature_penalty_floors_at_half() {
        let env = BiteEnvironment {
            water_temp: -30.0,
            ..BiteEnvironment::default()
        };
        assert_eq!(environment_modifier(&env), 0.5);
    }
}
