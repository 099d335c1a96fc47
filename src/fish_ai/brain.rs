//! Needs, mood and behaviour state machine for a single fish.

use super::types::{BrainState, Memory, MemoryEvent, Mood, Senses, Traits};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

const MAX_MEMORY: usize = 50;
/// Hook experiences older than this no longer make the fish wary.
pub const HOOK_MEMORY_MS: u64 = 300_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FishBrain {
    /// Index into `FISH_TYPES`
    pub species: usize,
    pub traits: Traits,
    pub mood: Mood,
    pub state: BrainState,
    /// 0-100
    pub energy: f64,
    /// 0-100
    pub hunger: f64,
    pub state_timer_ms: u64,
    /// Game time of the last update
    pub clock_ms: u64,
    pub memory: VecDeque<Memory>,
}

impl FishBrain {
    pub fn new(species: usize, traits: Traits) -> Self {
        Self {
            species,
            traits,
            mood: Mood::Neutral,
            state: BrainState::Idle,
            energy: 100.0,
            hunger: 50.0,
            state_timer_ms: 0,
            clock_ms: 0,
            memory: VecDeque::new(),
        }
    }

    pub fn spawn(species: usize, rarity: u8, rng: &mut impl Rng) -> Self {
        Self::new(species, Traits::roll(rarity, rng))
    }

    /// Advances needs, mood and behaviour by `dt_ms`.
    pub fn update(&mut self, dt_ms: u64, senses: &Senses, rng: &mut impl Rng) {
        self.clock_ms += dt_ms;
        self.state_timer_ms += dt_ms;
        self.update_needs(dt_ms);
        self.update_mood(senses);

        let previous = self.state;
        self.update_state(dt_ms, senses, rng);
        if previous != self.state {
            self.state_timer_ms = 0;
            self.remember(MemoryEvent::StateChange {
                state: self.state,
                mood: self.mood,
            });
        }
    }

    fn update_needs(&mut self, dt_ms: u64) {
        let dt = dt_ms as f64 / 1000.0;
        let moving = matches!(
            self.state,
            BrainState::Wandering | BrainState::Hunting | BrainState::Fleeing | BrainState::Striking
        );
        let drain = if moving { 0.5 } else { 0.1 };
        self.energy = (self.energy - drain * dt).max(0.0);
        self.hunger = (self.hunger + 1.0 * dt).min(100.0);
        if self.state == BrainState::Resting {
            self.energy = (self.energy + 5.0 * dt).min(100.0);
        }
    }

    fn update_mood(&mut self, senses: &Senses) {
        let food = senses.food_distance.is_some();
        self.mood = if senses.threat_level > 0.7 {
            Mood::Scared
        } else if self.hunger > 80.0 && food {
            Mood::Hungry
        } else if senses.threat_level > 0.3 {
            Mood::Cautious
        } else if self.energy < 30.0 {
            Mood::Tired
        } else if food && self.traits.curiosity > 0.5 {
            Mood::Curious
        } else if self.traits.aggression > 0.7 && self.energy > 70.0 {
            Mood::Aggressive
        } else {
            Mood::Neutral
        };
    }

    fn update_state(&mut self, dt_ms: u64, senses: &Senses, rng: &mut impl Rng) {
        let threat = senses.threat_level;
        let food = senses.food_distance;
        let timer = self.state_timer_ms;
        let hungry_with_food = self.mood == Mood::Hungry && food.is_some();

        self.state = match self.state {
            BrainState::Idle if threat > 0.5 => BrainState::Fleeing,
            BrainState::Idle if hungry_with_food => BrainState::Hunting,
            BrainState::Idle if self.energy < 20.0 => BrainState::Resting,
            BrainState::Idle if food.is_some() && self.traits.curiosity > 0.5 => {
                BrainState::Investigating
            }
            BrainState::Idle if rng.gen::<f64>() < 0.0001 * dt_ms as f64 => {
                BrainState::Wandering
            }
            BrainState::Wandering if threat > 0.5 => BrainState::Fleeing,
            BrainState::Wandering if hungry_with_food => BrainState::Hunting,
            BrainState::Wandering if timer > 5000 + rng.gen_range(0..5000) => BrainState::Idle,
            BrainState::Hunting if threat > 0.7 => BrainState::Fleeing,
            BrainState::Hunting if food.is_none() => BrainState::Searching,
            BrainState::Hunting if food.is_some_and(|d| d < 10.0) => BrainState::Striking,
            BrainState::Striking if timer > 500 => {
                if food.is_some() {
                    BrainState::Hunting
                } else {
                    BrainState::Idle
                }
            }
            BrainState::Fleeing if threat < 0.2 && timer > 3000 => BrainState::CautiousReturn,
            BrainState::CautiousReturn if threat > 0.5 => BrainState::Fleeing,
            BrainState::CautiousReturn if timer > 5000 => BrainState::Idle,
            BrainState::Resting if threat > 0.6 => BrainState::Fleeing,
            BrainState::Resting if self.energy > 80.0 => BrainState::Idle,
            BrainState::Searching if threat > 0.5 => BrainState::Fleeing,
            BrainState::Searching if food.is_some() => BrainState::Hunting,
            BrainState::Searching if timer > 10_000 => BrainState::Idle,
            BrainState::Investigating if threat > 0.5 => BrainState::Fleeing,
            BrainState::Investigating if timer > 3000 => {
                if self.mood == Mood::Hungry {
                    BrainState::Hunting
                } else {
                    BrainState::Idle
                }
            }
            unchanged => unchanged,
        };
    }

    pub fn remember(&mut self, event: MemoryEvent) {
        self.memory.push_back(Memory {
            at_ms: self.clock_ms,
            event,
        });
        if self.memory.len() > MAX_MEMORY {
            self.memory.pop_front();
        }
    }

    /// The fish was hooked and got away.
    pub fn record_hook(&mut self) {
        self.remember(MemoryEvent::Hooked);
        self.mood = Mood::Scared;
        self.state = BrainState::Fleeing;
        self.state_timer_ms = 0;
    }

    /// A bite satisfies some hunger.
    pub fn feed(&mut self, amount: f64) {
        self.hunger = (self.hunger - amount).max(0.0);
    }

    pub fn recent_hooks(&self) -> usize {
        self.memory
            .iter()
            .filter(|m| {
                m.event == MemoryEvent::Hooked
                    && self.clock_ms.saturating_sub(m.at_ms) < HOOK_MEMORY_MS
            })
            .count()
    }
}
