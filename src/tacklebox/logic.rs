//! Storing catches and answering tacklebox queries.

use super::types::{SortBy, TackleboxFilter, TackleboxItem, TackleboxStats};
use crate::core::constants::{RARE_FISH_RARITY, TACKLEBOX_CAPACITY};
use crate::environment::weather::WeatherCondition;
use crate::fishing::types::{HookedFish, TimeOfDay};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `fish_<millis>_<9 random base-36 chars>`
pub fn generate_fish_id(now_ms: i64, rng: &mut impl Rng) -> String {
    let suffix: String = (0..9)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("fish_{}_{}", now_ms, suffix)
}

/// Where and how a fish was caught.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatchContext {
    pub stage: usize,
    pub is_perfect: bool,
    pub weather: Option<WeatherCondition>,
    pub time_of_day: TimeOfDay,
    /// Unix milliseconds
    pub now_ms: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tacklebox {
    /// Oldest first; trimmed to the newest `capacity` entries
    pub items: Vec<TackleboxItem>,
    pub capacity: usize,
    pub total_fish_caught: u64,
    pub rare_fish_count: u64,
    pub largest_fish: Option<TackleboxItem>,
    pub smallest_fish: Option<TackleboxItem>,
    pub fish_by_type: BTreeMap<String, u64>,
    pub fish_by_stage: BTreeMap<usize, u64>,
    pub total_value: u64,
}

impl Default for Tacklebox {
    fn default() -> Self {
        Self::new()
    }
}

impl Tacklebox {
    pub fn new() -> Self {
        Self::with_capacity(TACKLEBOX_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
            total_fish_caught: 0,
            rare_fish_count: 0,
            largest_fish: None,
            smallest_fish: None,
            fish_by_type: BTreeMap::new(),
            fish_by_stage: BTreeMap::new(),
            total_value: 0,
        }
    }

    /// Stores a landed fish and returns the new record.
    pub fn add(
        &mut self,
        fish: &HookedFish,
        ctx: &CatchContext,
        rng: &mut impl Rng,
    ) -> TackleboxItem {
        let item = TackleboxItem {
            id: generate_fish_id(ctx.now_ms, rng),
            name: fish.name.clone(),
            size: fish.size,
            rarity: fish.rarity,
            points: fish.points,
            color: fish.color.clone(),
            caught_at: ctx.now_ms,
            stage: ctx.stage,
            is_perfect: ctx.is_perfect,
            weather: ctx.weather,
            time_of_day: ctx.time_of_day,
        };
        self.insert(item.clone());
        item
    }

    /// Stores an existing record, updating every counter.
    pub fn insert(&mut self, item: TackleboxItem) {
        self.total_fish_caught += 1;
        *self.fish_by_type.entry(item.name.clone()).or_insert(0) += 1;
        *self.fish_by_stage.entry(item.stage).or_insert(0) += 1;
        if item.rarity >= RARE_FISH_RARITY {
            self.rare_fish_count += 1;
        }
        self.total_value += item.points;

        if self.largest_fish.as_ref().map_or(true, |l| item.size > l.size) {
            self.largest_fish = Some(item.clone());
        }
        if self.smallest_fish.as_ref().map_or(true, |s| item.size < s.size) {
            self.smallest_fish = Some(item.clone());
        }

        self.items.push(item);
        if self.items.len() > self.capacity {
            let excess = self.items.len() - self.capacity;
            self.items.drain(..excess);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&TackleboxItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Filters, sorts descending and truncates.
    pub fn query(&self, filter: &TackleboxFilter) -> Vec<&TackleboxItem> {
        let mut result: Vec<&TackleboxItem> = self
            .items
            .iter()
            .filter(|i| filter.fish_type.as_ref().map_or(true, |t| &i.name == t))
            .filter(|i| filter.min_rarity.map_or(true, |r| i.rarity >= r))
            .filter(|i| filter.stage.map_or(true, |s| i.stage == s))
            .collect();

        match filter.sort_by.unwrap_or_default() {
            SortBy::Size => result.sort_by(|a, b| b.size.cmp(&a.size)),
            SortBy::Points => result.sort_by(|a, b| b.points.cmp(&a.points)),
            SortBy::Rarity => result.sort_by(|a, b| b.rarity.cmp(&a.rarity)),
            // Stable sort keeps later insertions first among equal timestamps
            SortBy::Recent => {
                result.reverse();
                result.sort_by(|a, b| b.caught_at.cmp(&a.caught_at));
            }
        }

        if let Some(limit) = filter.limit {
            result.truncate(limit);
        }
        result
    }

    pub fn stats(&self) -> TackleboxStats {
        TackleboxStats {
            total_items: self.items.len(),
            capacity: self.capacity,
            total_fish_caught: self.total_fish_caught,
            rare_fish_count: self.rare_fish_count,
            largest_fish: self.largest_fish.clone(),
            smallest_fish: self.smallest_fish.clone(),
            fish_by_type: self.fish_by_type.clone(),
            fish_by_stage: self.fish_by_stage.clone(),
            total_value: self.total_value,
            unique_types: self.fish_by_type.len(),
        }
    }

    /// Empties the box for a prestige. Lifetime totals and records survive.
    pub fn clear(&mut self) {
        self.items.clear();
        self.fish_by_type.clear();
        self.fish_by_stage.clear();
        self.total_value = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fish(name: &str, size: u32, rarity: u8, points: u64) -> HookedFish {
        HookedFish {
            kind: 0,
            name: name.to_string(),
            size,
            rarity,
            points,
            color: "#FFFFFF".to_string(),
            resistance: 0.2,
        }
    }

    fn ctx(stage: usize, now_ms: i64) -> CatchContext {
        CatchContext {
            stage,
            is_perfect: false,
            weather: None,
            time_of_day: TimeOfDay::Day,
            now_ms,
        }
    }

    #[test]
    fn test_fish_id_format() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let id = generate_fish_id(1_700_000_000_000, &mut rng);
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts[0], "fish");
        assert_eq!(parts[1], "1700000000000");
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_add_updates_counters() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let mut tb = Tacklebox::new();
        tb.add(&fish("Bass", 70, 1, 40), &ctx(0, 1), &mut rng);
        tb.add(&fish("Golden Koi", 130, 3, 300), &ctx(2, 2), &mut rng);
        tb.add(&fish("Bass", 60, 1, 40), &ctx(0, 3), &mut rng);

        assert_eq!(tb.total_fish_caught, 3);
        assert_eq!(tb.rare_fish_count, 1);
        assert_eq!(tb.total_value, 380);
        assert_eq!(tb.fish_by_type["Bass"], 2);
        assert_eq!(tb.fish_by_stage[&0], 2);
        assert_eq!(tb.largest_fish.as_ref().unwrap().size, 130);
        assert_eq!(tb.smallest_fish.as_ref().unwrap().size, 60);
    }

    #[test]
    fn test_ties_keep_first_record() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let mut tb = Tacklebox::new();
        let first = tb.add(&fish("Bass", 70, 1, 40), &ctx(0, 1), &mut rng);
        tb.add(&fish("Perch", 70, 1, 25), &ctx(0, 2), &mut rng);
        assert_eq!(tb.largest_fish.as_ref().unwrap().id, first.id);
        assert_eq!(tb.smallest_fish.as_ref().unwrap().id, first.id);
    }

    #[test]
    fn test_capacity_trims_oldest() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let mut tb = Tacklebox::with_capacity(3);
        for i in 0..5 {
            tb.add(&fish("Minnow", 30 + i, 0, 10), &ctx(0, i as i64), &mut rng);
        }
        assert_eq!(tb.len(), 3);
        assert_eq!(tb.items[0].caught_at, 2);
        assert_eq!(tb.total_fish_caught, 5);
    }

    #[test]
    fn test_query_filters_and_sorts() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let mut tb = Tacklebox::new();
        tb.add(&fish("Minnow", 30, 0, 10), &ctx(0, 1), &mut rng);
        tb.add(&fish("Pike", 110, 2, 120), &ctx(1, 2), &mut rng);
        tb.add(&fish("Catfish", 95, 2, 80), &ctx(2, 3), &mut rng);

        let recent = tb.query(&TackleboxFilter::default());
        assert_eq!(recent[0].name, "Catfish");

        let by_size = tb.query(&TackleboxFilter {
            min_rarity: Some(2),
            sort_by: Some(SortBy::Size),
            ..Default::default()
        });
        let names: Vec<&str> = by_size.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Pike", "Catfish"]);

        let limited = tb.query(&TackleboxFilter {
            sort_by: Some(SortBy::Points),
            limit: Some(1),
            ..Default::default()
        });
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].name, "Pike");

        let stage_two = tb.query(&TackleboxFilter {
            stage: Some(2),
            ..Default::default()
        });
        assert_eq!(stage_two.len(), 1);
    }

    #[test]
    fn test_clear_keeps_lifetime_stats() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let mut tb = Tacklebox::new();
        tb.add(&fish("Golden Koi", 130, 3, 300), &ctx(3, 1), &mut rng);
        tb.clear();

        let stats = tb.stats();
        assert_eq!(stats.total_items, 0);
        assert_eq!(stats.total_value, 0);
        assert_eq!(stats.unique_types, 0);
        assert_eq!(stats.total_fish_caught, 1);
        assert_eq!(stats.rare_fish_count, 1);
        assert!(stats.largest_fish.is_some());
    }
}
