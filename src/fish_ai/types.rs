//! Fish AI types.

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Hungry,
    Aggressive,
    Curious,
    #[default]
    Neutral,
    Cautious,
    Scared,
    Tired,
}

impl Mood {
    /// How much the mood scales the chance of taking a lure.
    pub fn bite_modifier(&self) -> f64 {
        match self {
            Mood::Hungry => 2.0,
            Mood::Aggressive => 1.5,
            Mood::Curious => 1.2,
            Mood::Neutral => 1.0,
            Mood::Cautious => 0.5,
            Mood::Scared => 0.1,
            Mood::Tired => 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BrainState {
    #[default]
    Idle,
    Wandering,
    Hunting,
    Striking,
    Fleeing,
    CautiousReturn,
    Resting,
    Searching,
    Investigating,
}

/// Personality, each trait 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Traits {
    pub aggression: f64,
    pub curiosity: f64,
    pub caution: f64,
    pub persistence: f64,
    pub intelligence: f64,
}

impl Traits {
    /// Random personality; rarer species are warier and smarter.
    pub fn roll(rarity: u8, rng: &mut impl Rng) -> Self {
        let r = rarity as f64;
        Self {
            aggression: (0.3 + rng.gen::<f64>() * 0.5).min(1.0),
            curiosity: (0.5 + rng.gen::<f64>() * 0.5 - r * 0.1).clamp(0.0, 1.0),
            caution: (0.4 + r * 0.1 + rng.gen::<f64>() * 0.5).min(1.0),
            persistence: (0.5 + rng.gen::<f64>() * 0.5).min(1.0),
            intelligence: (0.3 + r * 0.15 + rng.gen::<f64>() * 0.3).min(1.0),
        }
    }
}

impl Default for Traits {
    fn default() -> Self {
        Self {
            aggression: 0.3,
            curiosity: 0.5,
            caution: 0.4,
            persistence: 0.5,
            intelligence: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(&self, other: Vec2) -> f64 {
        (other - *self).length()
    }

    /// Unit vector, or zero for a zero vector.
    pub fn normalized(&self) -> Vec2 {
        let len = self.length();
        if len == 0.0 {
            Vec2::ZERO
        } else {
            Vec2::new(self.x / len, self.y / len)
        }
    }

    pub fn scale(&self, s: f64) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }

    pub fn clamp_length(&self, max: f64) -> Vec2 {
        let len = self.length();
        if len > max && len > 0.0 {
            self.scale(max / len)
        } else {
            *self
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

/// Something that happened to a fish, stamped with game time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MemoryEvent {
    StateChange { state: BrainState, mood: Mood },
    Hooked,
    Nibbled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub at_ms: u64,
    pub event: MemoryEvent,
}

/// What the fish currently perceives.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Senses {
    /// 0.0 (calm) to 1.0 (predator at point blank)
    pub threat_level: f64,
    /// Distance to the nearest lure or food, if any is in range
    pub food_distance: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_rolled_traits_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        for rarity in 0..=3 {
            for _ in 0..50 {
                let t = Traits::roll(rarity, &mut rng);
                for v in [t.aggression, t.curiosity, t.caution, t.persistence, t.intelligence] {
                    assert!((0.0..=1.0).contains(&v));
                }
            }
        }
    }

    #[test]
    fn test_vec2_helpers() {
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(v.length(), 5.0);
        assert_eq!(v.normalized(), Vec2::new(0.6, 0.8));
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
        assert!((v.clamp_length(1.0).length() - 1.0).abs() < 1e-9);
    }
}
