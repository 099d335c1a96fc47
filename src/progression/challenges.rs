//! Rotating daily and weekly challenges.

use crate::environment::weather::WeatherCondition;
use crate::fishing::data::STAGES;
use crate::fishing::types::TimeOfDay;
use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DAILY_CHALLENGE_COUNT: usize = 3;
pub const WEEKLY_CHALLENGE_COUNT: usize = 2;
const CONTEXT_TARGET: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChallengeKind {
    CatchFish,
    PerfectCatches,
    /// Best combo reached; progress is a high-water mark
    Combo,
    RareFish,
    SpecificStage,
    WeatherFish,
    TimeFish,
    LegendaryFish,
    /// Distinct stages fished
    AllStages,
    /// Summed fish size in centimetres
    TotalWeight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeScope {
    Daily,
    Weekly,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeReward {
    pub coins: u64,
    pub xp: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct ChallengeTemplate {
    pub kind: ChallengeKind,
    /// `None` for templates bound to a rolled stage, weather or time
    pub target: Option<u64>,
    pub reward: ChallengeReward,
}

const fn template(kind: ChallengeKind, target: Option<u64>, coins: u64, xp: u64) -> ChallengeTemplate {
    ChallengeTemplate {
        kind,
        target,
        reward: ChallengeReward { coins, xp },
    }
}

pub const DAILY_TEMPLATES: &[ChallengeTemplate] = &[
    template(ChallengeKind::CatchFish, Some(10), 500, 250),
    template(ChallengeKind::CatchFish, Some(20), 1000, 500),
    template(ChallengeKind::PerfectCatches, Some(3), 300, 150),
    template(ChallengeKind::PerfectCatches, Some(5), 500, 250),
    template(ChallengeKind::Combo, Some(5), 400, 200),
    template(ChallengeKind::Combo, Some(10), 800, 400),
    template(ChallengeKind::RareFish, Some(1), 750, 375),
    template(ChallengeKind::SpecificStage, None, 300, 150),
    template(ChallengeKind::WeatherFish, None, 400, 200),
    template(ChallengeKind::TimeFish, None, 350, 175),
];

pub const WEEKLY_TEMPLATES: &[ChallengeTemplate] = &[
    template(ChallengeKind::CatchFish, Some(100), 5000, 2500),
    template(ChallengeKind::PerfectCatches, Some(20), 3000, 1500),
    template(ChallengeKind::LegendaryFish, Some(1), 10000, 5000),
    template(ChallengeKind::AllStages, None, 7500, 3750),
    template(ChallengeKind::TotalWeight, Some(1000), 4000, 2000),
];

/// Where a progress event happened.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChallengeContext {
    pub stage: Option<usize>,
    pub weather: Option<WeatherCondition>,
    pub time: Option<TimeOfDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub scope: ChallengeScope,
    pub kind: ChallengeKind,
    pub target: u64,
    pub progress: u64,
    pub completed: bool,
    pub claimed: bool,
    /// Unix milliseconds
    pub expires_at: i64,
    pub reward: ChallengeReward,
    pub stage: Option<usize>,
    pub weather: Option<WeatherCondition>,
    pub time: Option<TimeOfDay>,
    /// Stages already counted towards `AllStages`
    pub stages_seen: Vec<usize>,
}

impl Challenge {
    pub fn description(&self) -> String {
        match self.kind {
            ChallengeKind::CatchFish => format!("Catch {} fish", self.target),
            ChallengeKind::PerfectCatches => format!("Land {} perfect catches", self.target),
            ChallengeKind::Combo => format!("Reach a {}x combo", self.target),
            ChallengeKind::RareFish => format!("Catch {} rare fish", self.target),
            ChallengeKind::LegendaryFish => format!("Catch {} legendary fish", self.target),
            ChallengeKind::TotalWeight => format!("Catch {} cm of fish", self.target),
            ChallengeKind::AllStages => format!("Fish on {} different stages", self.target),
            ChallengeKind::SpecificStage => {
                let stage = self
                    .stage
                    .and_then(|s| STAGES.get(s))
                    .map_or("any stage", |s| s.name);
                format!("Catch {} fish at {}", self.target, stage)
            }
            ChallengeKind::WeatherFish => format!(
                "Catch {} fish in {} weather",
                self.target,
                self.weather.unwrap_or_default().name()
            ),
            ChallengeKind::TimeFish => format!(
                "Catch {} fish at {}",
                self.target,
                self.time.unwrap_or_default().name()
            ),
        }
    }

    pub fn progress_fraction(&self) -> f64 {
        if self.target == 0 {
            return 1.0;
        }
        (self.progress as f64 / self.target as f64).min(1.0)
    }

    fn matches(&self, ctx: &ChallengeContext) -> bool {
        match self.kind {
            ChallengeKind::SpecificStage => ctx.stage == self.stage,
            ChallengeKind::WeatherFish => ctx.weather == self.weather,
            ChallengeKind::TimeFish => ctx.time == self.time,
            _ => true,
        }
    }
}

fn midnight_millis<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .and_then(|n| tz.from_local_datetime(&n).earliest())
        .map_or(i64::MAX, |d| d.timestamp_millis())
}

/// Next local midnight after `now`.
pub fn next_daily_reset<Tz: TimeZone>(now: &DateTime<Tz>) -> i64 {
    match now.date_naive().succ_opt() {
        Some(tomorrow) => midnight_millis(&now.timezone(), tomorrow),
        None => i64::MAX,
    }
}

/// Next Monday 00:00 strictly after today.
pub fn next_weekly_reset<Tz: TimeZone>(now: &DateTime<Tz>) -> i64 {
    let from_sunday = now.weekday().num_days_from_sunday() as u64;
    let days = match (8 - from_sunday) % 7 {
        0 => 7,
        d => d,
    };
    match now.date_naive().checked_add_days(chrono::Days::new(days)) {
        Some(monday) => midnight_millis(&now.timezone(), monday),
        None => i64::MAX,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Challenges {
    pub daily: Vec<Challenge>,
    pub weekly: Vec<Challenge>,
    /// Ids of claimed challenges
    pub completed: Vec<String>,
    pub last_daily_reset: Option<i64>,
    pub last_weekly_reset: Option<i64>,
}

impl Challenges {
    pub fn new() -> Self {
        Self::default()
    }

    fn instantiate(
        scope: ChallengeScope,
        tpl: &ChallengeTemplate,
        index: usize,
        now_ms: i64,
        expires_at: i64,
        rng: &mut impl Rng,
    ) -> Challenge {
        let prefix = match scope {
            ChallengeScope::Daily => "daily",
            ChallengeScope::Weekly => "weekly",
        };
        let mut challenge = Challenge {
            id: format!("{}_{}_{}", prefix, now_ms, index),
            scope,
            kind: tpl.kind,
            target: tpl.target.unwrap_or(CONTEXT_TARGET),
            progress: 0,
            completed: false,
            claimed: false,
            expires_at,
            reward: tpl.reward,
            stage: None,
            weather: None,
            time: None,
            stages_seen: Vec::new(),
        };
        match tpl.kind {
            ChallengeKind::SpecificStage => challenge.stage = Some(rng.gen_range(0..STAGES.len())),
            ChallengeKind::WeatherFish => {
                let options = [
                    WeatherCondition::Clear,
                    WeatherCondition::Cloudy,
                    WeatherCondition::Rain,
                ];
                challenge.weather = options.choose(rng).copied();
            }
            ChallengeKind::TimeFish => {
                let options = [TimeOfDay::Day, TimeOfDay::Dusk, TimeOfDay::Night];
                challenge.time = options.choose(rng).copied();
            }
            ChallengeKind::AllStages => challenge.target = STAGES.len() as u64,
            _ => {}
        }
        challenge
    }

    pub fn generate_daily<Tz: TimeZone>(&mut self, now: &DateTime<Tz>, rng: &mut impl Rng) {
        let now_ms = now.timestamp_millis();
        let expires = next_daily_reset(now);
        self.daily = DAILY_TEMPLATES
            .choose_multiple(rng, DAILY_CHALLENGE_COUNT)
            .copied()
            .collect::<Vec<_>>()
            .iter()
            .enumerate()
            .map(|(i, tpl)| Self::instantiate(ChallengeScope::Daily, tpl, i, now_ms, expires, rng))
            .collect();
        self.last_daily_reset = Some(now_ms);
        log::info!("generated {} daily challenges", self.daily.len());
    }

    pub fn generate_weekly<Tz: TimeZone>(&mut self, now: &DateTime<Tz>, rng: &mut impl Rng) {
        let now_ms = now.timestamp_millis();
        let expires = next_weekly_reset(now);
        self.weekly = WEEKLY_TEMPLATES
            .choose_multiple(rng, WEEKLY_CHALLENGE_COUNT)
            .copied()
            .collect::<Vec<_>>()
            .iter()
            .enumerate()
            .map(|(i, tpl)| Self::instantiate(ChallengeScope::Weekly, tpl, i, now_ms, expires, rng))
            .collect();
        self.last_weekly_reset = Some(now_ms);
        log::info!("generated {} weekly challenges", self.weekly.len());
    }

    /// Regenerates any set that was never rolled or has expired.
    /// Returns `(daily_reset, weekly_reset)`.
    pub fn check_resets<Tz: TimeZone>(
        &mut self,
        now: &DateTime<Tz>,
        rng: &mut impl Rng,
    ) -> (bool, bool) {
        let now_ms = now.timestamp_millis();
        let expired = |set: &[Challenge]| set.first().map_or(true, |c| now_ms >= c.expires_at);

        let daily = self.last_daily_reset.is_none() || expired(&self.daily);
        if daily {
            self.generate_daily(now, rng);
        }
        let weekly = self.last_weekly_reset.is_none() || expired(&self.weekly);
        if weekly {
            self.generate_weekly(now, rng);
        }
        (daily, weekly)
    }

    pub fn all(&self) -> impl Iterator<Item = &Challenge> {
        self.daily.iter().chain(self.weekly.iter())
    }

    /// Applies a progress event and returns the challenges it completed.
    pub fn update_progress(
        &mut self,
        kind: ChallengeKind,
        amount: u64,
        ctx: &ChallengeContext,
    ) -> Vec<Challenge> {
        let mut completed = Vec::new();
        for challenge in self.daily.iter_mut().chain(self.weekly.iter_mut()) {
            if challenge.completed || challenge.kind != kind || !challenge.matches(ctx) {
                continue;
            }
            match kind {
                ChallengeKind::Combo => challenge.progress = challenge.progress.max(amount),
                ChallengeKind::AllStages => {
                    if let Some(stage) = ctx.stage {
                        if !challenge.stages_seen.contains(&stage) {
                            challenge.stages_seen.push(stage);
                        }
                    }
                    challenge.progress = challenge.stages_seen.len() as u64;
                }
                _ => challenge.progress += amount,
            }
            if challenge.progress >= challenge.target {
                challenge.completed = true;
                log::info!("challenge complete: {}", challenge.description());
                completed.push(challenge.clone());
            }
        }
        completed
    }

    /// Marks a completed challenge claimed and returns its reward, once.
    pub fn claim_reward(&mut self, id: &str) -> Option<ChallengeReward> {
        let challenge = self
            .daily
            .iter_mut()
            .chain(self.weekly.iter_mut())
            .find(|c| c.id == id)?;
        if !challenge.completed || challenge.claimed {
            return None;
        }
        challenge.claimed = true;
        self.completed.push(id.to_string());
        Some(challenge.reward)
    }

    /// Milliseconds until the daily and weekly sets expire.
    pub fn reset_in<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> (i64, i64) {
        let now_ms = now.timestamp_millis();
        (
            next_daily_reset(now) - now_ms,
            next_weekly_reset(now) - now_ms,
        )
    }
}
