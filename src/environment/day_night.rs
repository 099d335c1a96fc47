//! Day/night cycle, time periods and seasons.

use crate::fishing::types::TimeOfDay;
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Fine-grained period of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimePeriod {
    Dawn,
    Sunrise,
    Day,
    Noon,
    Afternoon,
    Sunset,
    Dusk,
    Night,
}

impl TimePeriod {
    pub fn from_hour(hour: f64) -> Self {
        let h = hour.rem_euclid(24.0);
        if (5.0..6.0).contains(&h) {
            TimePeriod::Dawn
        } else if (6.0..8.0).contains(&h) {
            TimePeriod::Sunrise
        } else if (8.0..11.0).contains(&h) {
            TimePeriod::Day
        } else if (11.0..14.0).contains(&h) {
            TimePeriod::Noon
        } else if (14.0..17.0).contains(&h) {
            TimePeriod::Afternoon
        } else if (17.0..19.0).contains(&h) {
            TimePeriod::Sunset
        } else if (19.0..21.0).contains(&h) {
            TimePeriod::Dusk
        } else {
            TimePeriod::Night
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TimePeriod::Dawn => "Dawn",
            TimePeriod::Sunrise => "Sunrise",
            TimePeriod::Day => "Day",
            TimePeriod::Noon => "Noon",
            TimePeriod::Afternoon => "Afternoon",
            TimePeriod::Sunset => "Sunset",
            TimePeriod::Dusk => "Dusk",
            TimePeriod::Night => "Night",
        }
    }

    pub fn bite_multiplier(&self) -> f64 {
        match self {
            TimePeriod::Dawn => 1.4,
            TimePeriod::Sunrise => 1.2,
            TimePeriod::Day => 1.0,
            TimePeriod::Noon => 0.8,
            TimePeriod::Afternoon => 1.0,
            TimePeriod::Sunset => 1.5,
            TimePeriod::Dusk => 1.3,
            TimePeriod::Night => 1.1,
        }
    }

    pub fn rarity_bonus(&self) -> f64 {
        match self {
            TimePeriod::Dawn => 0.15,
            TimePeriod::Sunrise => 0.1,
            TimePeriod::Sunset => 0.2,
            TimePeriod::Dusk => 0.15,
            TimePeriod::Night => 0.25,
            TimePeriod::Day | TimePeriod::Noon | TimePeriod::Afternoon => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// Northern-hemisphere meteorological seasons; `month` is 1-12.
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        }
    }
}

/// Clock-derived environment snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clock {
    pub time_of_day: TimeOfDay,
    pub period: TimePeriod,
    pub season: Season,
}

impl Clock {
    pub fn at(now: NaiveDateTime) -> Self {
        let hour = now.hour();
        Self {
            time_of_day: TimeOfDay::from_hour(hour),
            period: TimePeriod::from_hour(hour as f64 + now.minute() as f64 / 60.0),
            season: Season::from_month(now.month()),
        }
    }

    pub fn now() -> Self {
        Self::at(chrono::Local::now().naive_local())
    }
}

/// A continuously advancing in-game clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayNightCycle {
    /// Fractional hour, 0.0..24.0
    pub hour: f64,
    /// In-game hours per real hour
    pub time_speed: f64,
    pub paused: bool,
}

impl DayNightCycle {
    pub fn new(start_hour: f64) -> Self {
        Self {
            hour: start_hour.rem_euclid(24.0),
            time_speed: 1.0,
            paused: false,
        }
    }

    pub fn update(&mut self, dt_ms: u64) {
        if self.paused {
            return;
        }
        let hours = dt_ms as f64 * self.time_speed / (60.0 * 60.0 * 1000.0);
        self.hour = (self.hour + hours).rem_euclid(24.0);
    }

    pub fn set_time(&mut self, hour: f64) {
        self.hour = hour.rem_euclid(24.0);
    }

    pub fn period(&self) -> TimePeriod {
        TimePeriod::from_hour(self.hour)
    }

    /// -1.0 at midnight, 1.0 at noon.
    pub fn sun_elevation(&self) -> f64 {
        (self.hour / 24.0 * PI * 2.0 - PI / 2.0).sin()
    }

    pub fn sun_intensity(&self) -> f64 {
        self.sun_elevation().max(0.0)
    }

    pub fn moon_elevation(&self) -> f64 {
        -self.sun_elevation()
    }

    pub fn star_visibility(&self) -> f64 {
        (-self.sun_elevation()).max(0.0)
    }

    /// Overall scene brightness, 0.08 (deep night) to 1.0.
    pub fn light_intensity(&self) -> f64 {
        let sun = self.sun_elevation();
        if sun > 0.0 {
            0.3 + sun.sqrt() * 0.7
        } else {
            let moon = self.moon_elevation().max(0.0);
            if moon > 0.0 {
                0.1 + moon * 0.2
            } else {
                0.08
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_period_boundaries() {
        assert_eq!(TimePeriod::from_hour(4.99), TimePeriod::Night);
        assert_eq!(TimePeriod::from_hour(5.0), TimePeriod::Dawn);
        assert_eq!(TimePeriod::from_hour(7.5), TimePeriod::Sunrise);
        assert_eq!(TimePeriod::from_hour(12.0), TimePeriod::Noon);
        assert_eq!(TimePeriod::from_hour(18.0), TimePeriod::Sunset);
        assert_eq!(TimePeriod::from_hour(20.9), TimePeriod::Dusk);
        assert_eq!(TimePeriod::from_hour(21.0), TimePeriod::Night);
    }

    #[test]
    fn test_period_effects() {
        assert_eq!(TimePeriod::Sunset.bite_multiplier(), 1.5);
        assert_eq!(TimePeriod::Noon.bite_multiplier(), 0.8);
        assert_eq!(TimePeriod::Night.rarity_bonus(), 0.25);
        assert_eq!(TimePeriod::Afternoon.rarity_bonus(), 0.0);
    }

    #[test]
    fn test_seasons() {
        assert_eq!(Season::from_month(1), Season::Winter);
        assert_eq!(Season::from_month(3), Season::Spring);
        assert_eq!(Season::from_month(8), Season::Summer);
        assert_eq!(Season::from_month(11), Season::Autumn);
        assert_eq!(Season::from_month(12), Season::Winter);
    }

    #[test]
    fn test_clock_snapshot() {
        let evening = NaiveDate::from_ymd_opt(2025, 10, 3)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap();
        let clock = Clock::at(evening);
        assert_eq!(clock.time_of_day, TimeOfDay::Dusk);
        assert_eq!(clock.period, TimePeriod::Sunset);
        assert_eq!(clock.season, Season::Autumn);
    }

    #[test]
    fn test_sun_elevation_extremes() {
        let noon = DayNightCycle::new(12.0);
        let midnight = DayNightCycle::new(0.0);
        assert!((noon.sun_elevation() - 1.0).abs() < 1e-9);
        assert!((midnight.sun_elevation() + 1.0).abs() < 1e-9);
        assert!((midnight.star_visibility() - 1.0).abs() < 1e-9);
        assert!(noon.light_intensity() > midnight.light_intensity());
    }

    #[test]
    fn test_cycle_wraps_around_midnight() {
        let mut cycle = DayNightCycle::new(23.5);
        cycle.time_speed = 60.0; // one game hour per real minute
        cycle.update(60_000);
        assert!((cycle.hour - 0.5).abs() < 1e-9);

        cycle.paused = true;
        cycle.update(60_000);
        assert!((cycle.hour - 0.5).abs() < 1e-9);
    }
}
