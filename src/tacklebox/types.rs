//! Tacklebox records and query types.

use crate::environment::weather::WeatherCondition;
use crate::fishing::types::TimeOfDay;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A landed fish as stored in the tacklebox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TackleboxItem {
    /// `fish_<millis>_<9 base-36 chars>`
    pub id: String,
    pub name: String,
    pub size: u32,
    pub rarity: u8,
    pub points: u64,
    pub color: String,
    /// Unix milliseconds
    pub caught_at: i64,
    pub stage: usize,
    pub is_perfect: bool,
    pub weather: Option<WeatherCondition>,
    pub time_of_day: TimeOfDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortBy {
    Size,
    Points,
    Rarity,
    #[default]
    Recent,
}

impl SortBy {
    pub const ALL: [SortBy; 4] = [SortBy::Recent, SortBy::Size, SortBy::Points, SortBy::Rarity];

    pub fn name(&self) -> &'static str {
        match self {
            SortBy::Size => "Size",
            SortBy::Points => "Points",
            SortBy::Rarity => "Rarity",
            SortBy::Recent => "Recent",
        }
    }

    /// Cycles to the next sort order (used by the tacklebox screen).
    pub fn next(&self) -> SortBy {
        let i = SortBy::ALL.iter().position(|s| s == self).unwrap_or(0);
        SortBy::ALL[(i + 1) % SortBy::ALL.len()]
    }
}

/// Narrows a tacklebox listing. Unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TackleboxFilter {
    pub fish_type: Option<String>,
    pub min_rarity: Option<u8>,
    pub stage: Option<usize>,
    pub sort_by: Option<SortBy>,
    pub limit: Option<usize>,
}

/// Summary shown on the tacklebox screen.
#[derive(Debug, Clone, PartialEq)]
pub struct TackleboxStats {
    pub total_items: usize,
    pub capacity: usize,
    pub total_fish_caught: u64,
    pub rare_fish_count: u64,
    pub largest_fish: Option<TackleboxItem>,
    pub smallest_fish: Option<TackleboxItem>,
    pub fish_by_type: BTreeMap<String, u64>,
    pub fish_by_stage: BTreeMap<usize, u64>,
    pub total_value: u64,
    pub unique_types: usize,
}
