//! The fishing loop: cast, wait, bite, reel, land.
//!
//! `FishingGame` owns the `GameState` plus everything that only lives for a
//! session (the line, the resident fish, weather and scenery). Both the
//! terminal front-end and the headless simulator drive it through `GameLoop`.

use crate::achievements::{get_achievement_def, AchievementId, CatchSummary};
use crate::core::constants::*;
use crate::core::game_state::{GameState, ShopError};
use crate::cutscene::CatchCutscene;
use crate::environment::day_night::DayNightCycle;
use crate::environment::events::{AmbientEvent, AmbientEvents};
use crate::environment::water::WaterSurface;
use crate::environment::weather::{WeatherCondition, WeatherReport, WeatherSystem};
use crate::fish_ai::bite::{decide_bite, BiteDecision, BiteEnvironment};
use crate::fish_ai::brain::FishBrain;
use crate::fish_ai::school::FishSchool;
use crate::fish_ai::types::{MemoryEvent, Senses, Traits, Vec2};
use crate::fishing::data::{difficulty, lure, rod, stage, BOAT_TYPES, FISH_TYPES, GOLDEN_KOI};
use crate::fishing::logic::{
    bite_delay_ms, catch_points, combo_bonus, effective_attraction, hook_fish,
    is_perfect_catch, reel_step, select_random_fish, weather_modifiers, ComboBonus, ReelParams,
};
use crate::fishing::types::{HookedFish, LevelMilestone, TimeOfDay};
use crate::progression::challenges::{Challenge, ChallengeContext, ChallengeKind};
use crate::progression::experience::LevelUp;
use crate::tacklebox::logic::CatchContext;
use crate::tacklebox::types::TackleboxItem;
use chrono::{Local, TimeZone};
use rand::Rng;

const WATER_RESOLUTION: usize = 64;
/// The school swims in a 400 x 100 box under the surface
const SCHOOL_WIDTH: f64 = 400.0;
const SCHOOL_DEPTH: f64 = 100.0;
const SCHOOL_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FishingPhase {
    #[default]
    Idle,
    Casting,
    Waiting,
    Bite,
    Reeling,
    Caught,
    Lost,
}

impl FishingPhase {
    pub fn label(&self) -> &'static str {
        match self {
            FishingPhase::Idle => "Ready to cast",
            FishingPhase::Casting => "Casting...",
            FishingPhase::Waiting => "Waiting for a bite...",
            FishingPhase::Bite => "BITE! Reel in!",
            FishingPhase::Reeling => "Reeling...",
            FishingPhase::Caught => "Caught!",
            FishingPhase::Lost => "Line broke!",
        }
    }
}

/// The line in the water.
#[derive(Debug, Clone, Default)]
pub struct FishingSession {
    pub phase: FishingPhase,
    /// 0.0..=1.0 while casting
    pub cast_progress: f64,
    pub cast_distance: f64,
    /// Counts down to the bite, then through the bite window
    pub bite_timer_ms: u64,
    pub nibbled: bool,
    /// The fish circled the lure once before committing
    pub hesitated: bool,
    pub fish: Option<HookedFish>,
    pub tension: f64,
    pub reel_elapsed_ms: u64,
    pub reel_params: Option<ReelParams>,
    /// Remaining time the reel keeps turning after a key press
    pub reel_hold_ms: u64,
    /// Counts down the caught/lost display
    pub phase_timer_ms: u64,
    pub recast_timer_ms: Option<u64>,
    frame_acc_ms: u64,
}

impl FishingSession {
    pub fn is_reeling(&self) -> bool {
        self.reel_hold_ms > 0
    }

    fn enter(&mut self, phase: FishingPhase) {
        self.phase = phase;
        self.frame_acc_ms = 0;
    }
}

#[derive(Debug, Clone)]
pub struct CatchReport {
    pub item: TackleboxItem,
    pub fish: HookedFish,
    pub points: u64,
    pub perfect: bool,
    /// Combo after this catch
    pub combo: u32,
    pub bonus: ComboBonus,
}

#[derive(Debug, Clone, Copy)]
pub struct LevelUpReport {
    pub level: u32,
    pub milestone: Option<&'static LevelMilestone>,
}

/// Result of one game tick - captures everything that happened.
///
/// The UI turns these into messages, sounds and overlays; the simulator
/// only counts them.
#[derive(Debug, Clone, Default)]
pub struct TickResult {
    /// Human readable log lines
    pub messages: Vec<String>,
    pub cast_splash: bool,
    /// A fish tested the lure without biting
    pub nibble: bool,
    pub bite: bool,
    /// The bite window passed without a reel
    pub missed: bool,
    pub caught: Option<CatchReport>,
    pub line_broke: bool,
    pub level_up: Option<LevelUpReport>,
    pub xp_gained: u64,
    /// Angler (experience) levels gained
    pub angler_level_ups: Vec<LevelUp>,
    pub achievements_unlocked: Vec<AchievementId>,
    pub challenges_completed: Vec<Challenge>,
    /// Reward of the server's daily challenge if it completed
    pub daily_completed: Option<u64>,
    pub ambient: Vec<AmbientEvent>,
    pub whale_sighted: bool,
    pub can_prestige: bool,
}

/// Core game loop trait - implemented by the game engine.
pub trait GameLoop {
    /// Advance the game by `dt_ms` milliseconds. Returns what happened.
    fn tick(&mut self, dt_ms: u64, rng: &mut impl Rng) -> TickResult;

    /// Perform prestige reset.
    fn prestige(&mut self);

    /// Get current game state (read-only).
    fn state(&self) -> &GameState;

    /// Get current game state (mutable).
    fn state_mut(&mut self) -> &mut GameState;

    /// Check if can prestige.
    fn can_prestige(&self) -> bool;
}

pub struct FishingGame {
    state: GameState,
    session: FishingSession,
    brain: FishBrain,
    school: FishSchool,
    events: AmbientEvents,
    day_night: DayNightCycle,
    water: WaterSurface,
    weather: WeatherSystem,
    cutscene: Option<CatchCutscene>,
    /// Unix milliseconds, advanced by `tick`
    clock_ms: i64,
    /// Achievements unlocked outside `tick`, reported on the next one
    pending_achievements: Vec<AchievementId>,
}

/// What the fish does when the wait runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BiteOutcome {
    Nibble,
    Hesitate(u64),
    Strike,
}

/// Each cast allows one nibble and one hesitation; after that the fish strikes.
fn bite_outcome(decision: &BiteDecision, nibbled: bool, hesitated: bool) -> BiteOutcome {
    if decision.test_nibble && !nibbled {
        BiteOutcome::Nibble
    } else if !decision.will_bite && !hesitated && decision.hesitation_ms > 0 {
        BiteOutcome::Hesitate(decision.hesitation_ms)
    } else {
        BiteOutcome::Strike
    }
}

/// Milliseconds to feed `tick` for a real frame, capped at `MAX_FRAME_MS`.
pub fn frame_dt_ms(elapsed: std::time::Duration) -> u64 {
    (elapsed.as_millis() as u64).min(MAX_FRAME_MS)
}

fn start_hour(time: TimeOfDay) -> f64 {
    match time {
        TimeOfDay::Day => 12.0,
        TimeOfDay::Dusk => 18.0,
        TimeOfDay::Night => 23.0,
    }
}

impl FishingGame {
    pub fn new(state: GameState) -> Self {
        Self::with_clock(state, chrono::Utc::now().timestamp_millis())
    }

    /// Starts the game clock at `now_ms` instead of the wall clock.
    pub fn with_clock(state: GameState, now_ms: i64) -> Self {
        let weather = state
            .weather
            .as_ref()
            .map(WeatherSystem::from_report)
            .unwrap_or_default();
        let time = state.time_of_day;
        Self {
            state,
            session: FishingSession::default(),
            brain: FishBrain::new(0, Traits::default()),
            school: FishSchool::empty(SCHOOL_WIDTH, SCHOOL_DEPTH),
            events: AmbientEvents::new(),
            day_night: DayNightCycle::new(start_hour(time)),
            water: WaterSurface::new(WATER_RESOLUTION),
            weather,
            cutscene: None,
            clock_ms: now_ms,
            pending_achievements: Vec::new(),
        }
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn session(&self) -> &FishingSession {
        &self.session
    }

    pub fn phase(&self) -> FishingPhase {
        self.session.phase
    }

    pub fn events(&self) -> &AmbientEvents {
        &self.events
    }

    pub fn day_night(&self) -> &DayNightCycle {
        &self.day_night
    }

    pub fn water(&self) -> &WaterSurface {
        &self.water
    }

    pub fn weather_system(&self) -> &WeatherSystem {
        &self.weather
    }

    pub fn brain(&self) -> &FishBrain {
        &self.brain
    }

    pub fn school(&self) -> &FishSchool {
        &self.school
    }

    pub fn cutscene(&self) -> Option<&CatchCutscene> {
        self.cutscene.as_ref()
    }

    pub fn skip_cutscene(&mut self) {
        if let Some(c) = self.cutscene.as_mut() {
            c.skip();
        }
    }

    pub fn clock_ms(&self) -> i64 {
        self.clock_ms
    }

    // =========================================================================
    // Session control
    // =========================================================================

    /// Enters the fishing screen on `stage_index`.
    pub fn start(&mut self, stage_index: usize, rng: &mut impl Rng) {
        self.state.set_stage(stage_index);
        self.state.playing = true;
        self.state.session_catches = 0;
        self.state.session_score = 0;
        self.state.reset_combo();
        self.state.time_of_day = stage(self.state.current_stage).time_of_day;
        self.day_night = DayNightCycle::new(start_hour(self.state.time_of_day));
        self.events = AmbientEvents::new();
        self.session = FishingSession::default();
        self.cutscene = None;
        self.spawn_brain(rng);
        self.school = FishSchool::new(SCHOOL_SIZE, SCHOOL_WIDTH, SCHOOL_DEPTH, rng);
        log::info!("fishing at {}", stage(self.state.current_stage).name);
    }

    /// Leaves the fishing screen; a fish on the line is lost.
    pub fn stop(&mut self) {
        self.state.playing = false;
        self.session = FishingSession::default();
        self.cutscene = None;
    }

    pub fn set_weather(&mut self, report: WeatherReport) {
        self.weather = WeatherSystem::from_report(&report);
        self.state.weather = Some(report);
    }

    /// Buys a lure, reporting any achievement on the next tick.
    pub fn buy_lure(&mut self, index: usize) -> Result<(), ShopError> {
        let unlocked = self.state.buy_lure(index)?;
        self.pending_achievements.extend(unlocked);
        Ok(())
    }

    fn spawn_brain(&mut self, rng: &mut impl Rng) {
        let species = rng.gen_range(0..GOLDEN_KOI);
        self.brain = FishBrain::spawn(species, FISH_TYPES[species].rarity, rng);
    }

    /// Starts a cast. Only from Idle and with a usable rod.
    pub fn cast(&mut self) -> bool {
        if self.session.phase != FishingPhase::Idle || self.state.rod_durability == 0 {
            return false;
        }
        self.session = FishingSession::default();
        self.session.enter(FishingPhase::Casting);
        true
    }

    /// Hooks the fish during a bite, or keeps the reel turning while reeling.
    pub fn reel(&mut self, rng: &mut impl Rng) -> bool {
        match self.session.phase {
            FishingPhase::Bite => {
                self.hook(rng);
                true
            }
            FishingPhase::Reeling => {
                self.session.reel_hold_ms = REEL_HOLD_MS;
                true
            }
            _ => false,
        }
    }

    fn hook(&mut self, rng: &mut impl Rng) {
        let bonus = self.state.experience.skill_bonus();
        let koi_multiplier = bonus.rare_chance * self.state.experience.multipliers.rarity;
        let kind = select_random_fish(
            lure(self.state.selected_lure),
            self.state.current_stage,
            self.state.time_of_day,
            koi_multiplier,
            rng,
        );
        let fish = hook_fish(kind, rng);

        let mods = weather_modifiers(self.state.weather.as_ref());
        let tension_multiplier =
            difficulty(self.state.difficulty).tension_multiplier * bonus.tension_resist;
        let mut params = ReelParams::new(
            &fish,
            rod(self.state.selected_rod),
            tension_multiplier,
            mods.resist,
        );
        params.reel_speed *= bonus.reel_speed;

        self.brain.feed(20.0);
        self.session.fish = Some(fish);
        self.session.reel_params = Some(params);
        self.session.tension = TENSION_START;
        self.session.reel_elapsed_ms = 0;
        self.session.reel_hold_ms = REEL_HOLD_MS;
        self.session.enter(FishingPhase::Reeling);
    }

    // =========================================================================
    // Phases
    // =========================================================================

    fn update_casting(&mut self, dt_ms: u64, rng: &mut impl Rng, result: &mut TickResult) {
        self.session.frame_acc_ms += dt_ms;
        while self.session.frame_acc_ms >= CAST_FRAME_MS {
            self.session.frame_acc_ms -= CAST_FRAME_MS;
            self.session.cast_progress += CAST_PROGRESS_PER_FRAME;
            if self.session.cast_progress >= 1.0 {
                self.splash(rng, result);
                return;
            }
        }
    }

    fn splash(&mut self, rng: &mut impl Rng, result: &mut TickResult) {
        let bonus = self.state.experience.skill_bonus();
        let mods = weather_modifiers(self.state.weather.as_ref());
        let rod = rod(self.state.selected_rod);
        let distance = (rod.cast_distance + bonus.cast_distance) * mods.cast;
        let attraction = effective_attraction(lure(self.state.selected_lure), self.state.current_stage);

        self.session.cast_progress = 1.0;
        self.session.cast_distance = distance;
        self.session.bite_timer_ms =
            bite_delay_ms(attraction, mods.bite * bonus.bite_chance, rng);
        self.session.enter(FishingPhase::Waiting);
        self.water.disturb((distance / 400.0).clamp(0.0, 1.0), 3.0, 4);
        result.cast_splash = true;
    }

    fn update_waiting(&mut self, dt_ms: u64, rng: &mut impl Rng, result: &mut TickResult) {
        self.session.bite_timer_ms = self.session.bite_timer_ms.saturating_sub(dt_ms);
        if self.session.bite_timer_ms > 0 {
            return;
        }

        let env = BiteEnvironment {
            weather: self
                .state
                .weather
                .as_ref()
                .map_or(WeatherCondition::Clear, |w| w.condition),
            water_clarity: self.water.clarity,
            water_temp: self.weather.state.temperature,
            period: self.day_night.period(),
        };
        let decision = decide_bite(&self.brain, lure(self.state.selected_lure), &env, rng);

        match bite_outcome(&decision, self.session.nibbled, self.session.hesitated) {
            BiteOutcome::Nibble => {
                self.session.nibbled = true;
                self.session.bite_timer_ms = NIBBLE_DELAY_MS;
                self.brain.remember(MemoryEvent::Nibbled);
                result.nibble = true;
                return;
            }
            BiteOutcome::Hesitate(ms) => {
                self.session.hesitated = true;
                self.session.bite_timer_ms = ms;
                log::trace!("fish hesitating for {} ms", ms);
                return;
            }
            BiteOutcome::Strike => {}
        }

        self.session.bite_timer_ms = BITE_WINDOW_MS;
        self.session.enter(FishingPhase::Bite);
        // Aggressive fish hit the lure hard
        let at = (self.session.cast_distance / 400.0).clamp(0.0, 1.0);
        self.water.disturb(at, 1.0 + decision.strike_force * 2.0, 2);
        result.bite = true;
        result.messages.push("Something's biting!".to_string());
    }

    fn update_bite(&mut self, dt_ms: u64, rng: &mut impl Rng, result: &mut TickResult) {
        if self.state.settings.auto_reel {
            self.hook(rng);
            return;
        }
        self.session.bite_timer_ms = self.session.bite_timer_ms.saturating_sub(dt_ms);
        if self.session.bite_timer_ms == 0 {
            self.state.reset_combo();
            self.session.enter(FishingPhase::Idle);
            result.missed = true;
            result.messages.push("Missed! The fish got away.".to_string());
        }
    }

    fn update_reeling(&mut self, dt_ms: u64, rng: &mut impl Rng, result: &mut TickResult) {
        let Some(params) = self.session.reel_params else {
            self.session.enter(FishingPhase::Idle);
            return;
        };

        self.session.frame_acc_ms += dt_ms;
        while self.session.frame_acc_ms >= REEL_FRAME_MS {
            self.session.frame_acc_ms -= REEL_FRAME_MS;
            let reeling = self.state.settings.auto_reel || self.session.is_reeling();
            self.session.tension = reel_step(self.session.tension, &params, reeling, rng);
            self.session.reel_elapsed_ms += REEL_FRAME_MS;
            self.session.reel_hold_ms = self.session.reel_hold_ms.saturating_sub(REEL_FRAME_MS);

            if self.session.tension >= 1.0 {
                self.snap_line(result);
                return;
            }
            let elapsed = self.session.reel_elapsed_ms;
            if elapsed >= REEL_MAX_MS
                || (elapsed >= REEL_MIN_MS && self.session.tension < TENSION_SAFE_LIMIT)
            {
                self.land_fish(rng, result);
                return;
            }
        }
    }

    fn snap_line(&mut self, result: &mut TickResult) {
        self.state.reset_combo();
        self.state.decrease_rod_durability(ROD_WEAR_PER_SNAP);
        self.brain.record_hook();
        self.session.fish = None;
        self.session.phase_timer_ms = LOST_DISPLAY_MS;
        self.session.enter(FishingPhase::Lost);
        result.line_broke = true;
        result.messages.push("Line broke!".to_string());
        log::debug!("line snapped, rod at {}", self.state.rod_durability);
    }

    fn land_fish(&mut self, rng: &mut impl Rng, result: &mut TickResult) {
        let Some(fish) = self.session.fish.take() else {
            self.session.enter(FishingPhase::Idle);
            return;
        };
        let state = &mut self.state;
        let perfect = is_perfect_catch(self.session.tension);
        let points = catch_points(fish.points, state.combo, perfect);
        let weather = state.weather.as_ref().map(|w| w.condition);
        let stage_info = stage(state.current_stage);

        let item = state.tacklebox.add(
            &fish,
            &CatchContext {
                stage: state.current_stage,
                is_perfect: perfect,
                weather,
                time_of_day: state.time_of_day,
                now_ms: self.clock_ms,
            },
            rng,
        );
        state.add_score(points);
        state.increment_catches();
        state.increment_combo();
        if perfect {
            state.increment_perfect_catches();
        }
        if weather == Some(WeatherCondition::Storm) || stage_info.features.lightning {
            state.increment_storm_catches();
        }
        state.decrease_rod_durability(ROD_WEAR_PER_CATCH);

        let mut unlocked = Vec::new();
        let mut daily = Vec::new();
        if let Some((level, milestone)) = state.count_fish() {
            result.level_up = Some(LevelUpReport { level, milestone });
            unlocked.extend(state.achievements.on_level_up(level, Some(state.username.as_str())));
            daily.push(("level_up", 1));
            result.messages.push(match milestone {
                Some(m) => format!("Level {}! {} (+{})", level, m.title, m.reward),
                None => format!("Level {}!", level),
            });
        }

        let period = self.day_night.period();
        let gain = state.experience.add_experience(points, "catch");
        state.experience.track_catch(&item, state.combo, period.name());
        result.xp_gained += gain.amount;
        result.angler_level_ups.extend(gain.level_ups);

        let ctx = ChallengeContext {
            stage: Some(state.current_stage),
            weather,
            time: Some(state.time_of_day),
        };
        let mut progress = vec![
            (ChallengeKind::CatchFish, 1),
            (ChallengeKind::Combo, state.combo as u64),
            (ChallengeKind::SpecificStage, 1),
            (ChallengeKind::WeatherFish, 1),
            (ChallengeKind::TimeFish, 1),
            (ChallengeKind::AllStages, 1),
            (ChallengeKind::TotalWeight, fish.size as u64),
        ];
        if perfect {
            progress.push((ChallengeKind::PerfectCatches, 1));
        }
        if fish.rarity >= 2 {
            progress.push((ChallengeKind::RareFish, 1));
        }
        if fish.rarity >= 3 {
            progress.push((ChallengeKind::LegendaryFish, 1));
        }
        for (kind, amount) in progress {
            for challenge in state.challenges.update_progress(kind, amount, &ctx) {
                if let Some(reward) = state.challenges.claim_reward(&challenge.id) {
                    let coins = state.experience.scale_coins(reward.coins);
                    state.add_score(coins);
                    let gain = state.experience.add_experience(reward.xp, "challenge");
                    result.xp_gained += gain.amount;
                    result.angler_level_ups.extend(gain.level_ups);
                }
                result
                    .messages
                    .push(format!("Challenge complete: {}", challenge.description()));
                result.challenges_completed.push(challenge);
            }
        }

        daily.push(("catch_count", 1));
        daily.push(("score", points));
        if perfect {
            daily.push(("perfect_catches", 1));
        }
        if fish.rarity >= 3 {
            daily.push(("catch_legendary", 1));
        }
        for (kind, amount) in daily {
            if let Some(reward) = state.record_daily(kind, amount) {
                result.daily_completed = Some(reward);
                result
                    .messages
                    .push(format!("Daily challenge complete! +{}", reward));
            }
        }

        unlocked.extend(state.achievements.on_catch(
            &CatchSummary {
                total_catches: state.total_catches,
                perfect_catches: state.perfect_catches,
                combo: state.combo,
                size: fish.size,
                rarity: fish.rarity,
                golden_koi: fish.kind == GOLDEN_KOI,
                storm_catches: state.storm_catches,
            },
            Some(state.username.as_str()),
        ));
        result
            .achievements_unlocked
            .extend(state.grant_achievements(unlocked));

        let bonus = combo_bonus(state.combo, perfect);
        result.messages.push(format!(
            "Caught a {} ({} cm)! +{}{}",
            fish.name,
            fish.size,
            points,
            if perfect { " PERFECT" } else { "" }
        ));
        log::info!(
            "caught {} {}cm for {} (combo {})",
            fish.name,
            fish.size,
            points,
            state.combo
        );

        result.caught = Some(CatchReport {
            item,
            fish: fish.clone(),
            points,
            perfect,
            combo: state.combo,
            bonus,
        });
        self.cutscene = Some(CatchCutscene::new(fish, perfect, points, rng));
        self.spawn_brain(rng);
        self.session.phase_timer_ms = CAUGHT_DISPLAY_MS;
        self.session.enter(FishingPhase::Caught);
    }

    fn update_result(&mut self, dt_ms: u64) {
        self.session.phase_timer_ms = self.session.phase_timer_ms.saturating_sub(dt_ms);
        if self.session.phase_timer_ms > 0 {
            return;
        }
        let landed = self.session.phase == FishingPhase::Caught;
        self.session = FishingSession::default();
        if landed && self.state.playing {
            self.session.recast_timer_ms = Some(AUTO_RECAST_MS);
        }
    }

    fn update_recast(&mut self, dt_ms: u64) {
        let Some(timer) = self.session.recast_timer_ms else {
            return;
        };
        let timer = timer.saturating_sub(dt_ms);
        if timer > 0 {
            self.session.recast_timer_ms = Some(timer);
            return;
        }
        self.session.recast_timer_ms = None;
        if self.state.playing {
            self.cast();
        }
    }

    fn update_scenery(&mut self, dt_ms: u64, rng: &mut impl Rng, result: &mut TickResult) {
        self.day_night.update(dt_ms);
        self.weather.advance_transition(dt_ms);
        self.water.update(dt_ms);
        self.water.apply_weather(
            self.weather.state.rain_intensity,
            self.weather.state.wind_speed,
            rng,
        );
        if let Some(cutscene) = self.cutscene.as_mut() {
            if cutscene.update(dt_ms) {
                self.cutscene = None;
            }
        }

        let senses = Senses {
            threat_level: if self.session.phase == FishingPhase::Reeling {
                0.6
            } else {
                0.0
            },
            food_distance: match self.session.phase {
                FishingPhase::Waiting | FishingPhase::Bite => Some(self.session.cast_distance / 100.0),
                _ => None,
            },
        };
        self.brain.update(dt_ms, &senses, rng);

        // A fish fighting the line scares the school off
        let threats = if self.session.phase == FishingPhase::Reeling {
            vec![Vec2::new(self.session.cast_distance.min(SCHOOL_WIDTH), 0.0)]
        } else {
            Vec::new()
        };
        self.school.update(dt_ms, &threats);

        if !self.state.playing {
            return;
        }
        let stage_index = self.state.current_stage;
        let lightning = stage(stage_index).features.lightning;
        for event in self.events.update(dt_ms, stage_index, lightning, rng) {
            match event {
                AmbientEvent::BoatArrived(kind) => {
                    let boat = &BOAT_TYPES[kind];
                    result.messages.push(format!("A {} sails by", boat.name));
                }
                AmbientEvent::WhaleSurfaced => {
                    self.state.increment_whales_seen();
                    let whales = self.state.whales_seen;
                    let unlocked = self
                        .state
                        .achievements
                        .on_whale_seen(whales, Some(self.state.username.as_str()));
                    result
                        .achievements_unlocked
                        .extend(self.state.grant_achievements(unlocked));
                    result.whale_sighted = true;
                    result.messages.push("A whale surfaces!".to_string());
                }
                _ => {}
            }
            result.ambient.push(event);
        }
    }

    fn check_challenge_resets(&mut self, rng: &mut impl Rng) {
        if let Some(now) = Local.timestamp_millis_opt(self.clock_ms).single() {
            self.state.challenges.check_resets(&now, rng);
        }
    }
}

impl GameLoop for FishingGame {
    fn tick(&mut self, dt_ms: u64, rng: &mut impl Rng) -> TickResult {
        let mut result = TickResult::default();
        self.clock_ms += dt_ms as i64;
        self.check_challenge_resets(rng);

        match self.session.phase {
            FishingPhase::Idle => self.update_recast(dt_ms),
            FishingPhase::Casting => self.update_casting(dt_ms, rng, &mut result),
            FishingPhase::Waiting => self.update_waiting(dt_ms, rng, &mut result),
            FishingPhase::Bite => self.update_bite(dt_ms, rng, &mut result),
            FishingPhase::Reeling => self.update_reeling(dt_ms, rng, &mut result),
            FishingPhase::Caught | FishingPhase::Lost => self.update_result(dt_ms),
        }
        self.update_scenery(dt_ms, rng, &mut result);

        for id in self.pending_achievements.drain(..) {
            result.achievements_unlocked.push(id);
        }
        for id in &result.achievements_unlocked {
            if let Some(def) = get_achievement_def(*id) {
                result
                    .messages
                    .push(format!("Achievement unlocked: {} {}", def.icon, def.name));
            }
        }
        result.can_prestige = self.can_prestige();
        result
    }

    /// Requires the level gate; the angler experience prestiges too when eligible.
    fn prestige(&mut self) {
        if !self.can_prestige() {
            return;
        }
        self.stop();
        self.state.prestige();
        if let Some(bonus) = self.state.experience.prestige() {
            log::info!(
                "angler prestige {} (+{:.2} xp)",
                bonus.prestige,
                bonus.xp_multiplier
            );
        }
        let prestige = self.state.prestige;
        let unlocked = self
            .state
            .achievements
            .on_prestige(prestige, Some(self.state.username.as_str()));
        let unlocked = self.state.grant_achievements(unlocked);
        self.pending_achievements.extend(unlocked);
    }

    fn state(&self) -> &GameState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    fn can_prestige(&self) -> bool {
        self.state.can_prestige()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const START_MS: i64 = 1_735_732_800_000;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn create_game(rng: &mut ChaCha8Rng) -> FishingGame {
        let mut game = FishingGame::with_clock(GameState::new("term_test".to_string()), START_MS);
        game.start(0, rng);
        game
    }

    /// Steps in 50 ms ticks until `done` holds or `max_ms` passes.
    fn run_until(
        game: &mut FishingGame,
        rng: &mut ChaCha8Rng,
        max_ms: u64,
        mut done: impl FnMut(&FishingGame, &TickResult) -> bool,
    ) -> Option<TickResult> {
        let mut elapsed = 0;
        while elapsed < max_ms {
            let result = game.tick(50, rng);
            elapsed += 50;
            if done(game, &result) {
                return Some(result);
            }
        }
        None
    }

    fn decision(will_bite: bool, hesitation_ms: u64, test_nibble: bool) -> BiteDecision {
        BiteDecision {
            will_bite,
            confidence: 0.2,
            roll: 0.5,
            hesitation_ms,
            strike_force: 0.5,
            test_nibble,
        }
    }

    #[test]
    fn test_frame_dt_is_capped() {
        use std::time::Duration;
        assert_eq!(frame_dt_ms(Duration::from_millis(40)), 40);
        assert_eq!(frame_dt_ms(Duration::from_secs(3)), MAX_FRAME_MS);
    }

    #[test]
    fn test_stalled_frame_does_not_expire_the_bite() {
        let mut rng = create_test_rng();
        let mut game = create_game(&mut rng);
        game.cast();
        run_until(&mut game, &mut rng, 30_000, |g, _| g.phase() == FishingPhase::Bite)
            .expect("a fish bites");

        // A 1.8 s stall reaches the game as one capped frame
        let result = game.tick(frame_dt_ms(std::time::Duration::from_millis(1800)), &mut rng);
        assert!(!result.missed);
        assert_eq!(game.phase(), FishingPhase::Bite);
    }

    // =========================================================================
    // Bite outcomes
    // =========================================================================

    #[test]
    fn test_committed_fish_strikes() {
        assert_eq!(
            bite_outcome(&decision(true, 0, false), false, false),
            BiteOutcome::Strike
        );
    }

    #[test]
    fn test_unsure_fish_hesitates_once() {
        let unsure = decision(false, 1600, false);
        assert_eq!(bite_outcome(&unsure, false, false), BiteOutcome::Hesitate(1600));
        assert_eq!(bite_outcome(&unsure, false, true), BiteOutcome::Strike);
    }

    #[test]
    fn test_nibble_comes_before_hesitation() {
        let smart = decision(false, 1600, true);
        assert_eq!(bite_outcome(&smart, false, false), BiteOutcome::Nibble);
        assert_eq!(bite_outcome(&smart, true, false), BiteOutcome::Hesitate(1600));
        assert_eq!(bite_outcome(&smart, true, true), BiteOutcome::Strike);
    }

    #[test]
    fn test_hesitation_delays_the_bite() {
        let mut rng = create_test_rng();
        let mut game = create_game(&mut rng);
        assert!(game.cast());
        run_until(&mut game, &mut rng, 5_000, |g, _| g.phase() == FishingPhase::Waiting)
            .expect("cast lands");

        let mut waited = 0;
        while game.phase() == FishingPhase::Waiting && waited < 30_000 {
            game.tick(50, &mut rng);
            waited += 50;
        }
        // The bite always comes, hesitation or not
        assert_eq!(game.phase(), FishingPhase::Bite);
        assert_eq!(game.session().bite_timer_ms, BITE_WINDOW_MS);
    }

    #[test]
    fn test_school_swims_while_fishing() {
        let mut rng = create_test_rng();
        let mut game = create_game(&mut rng);
        assert_eq!(game.school().members.len(), SCHOOL_SIZE);
        let before: Vec<_> = game.school().members.iter().map(|m| m.position).collect();

        run_until(&mut game, &mut rng, 2_000, |_, _| false);
        let school = game.school();
        assert!(school
            .members
            .iter()
            .zip(&before)
            .any(|(m, start)| m.position != *start));
        for m in &school.members {
            assert!((0.0..SCHOOL_WIDTH).contains(&m.position.x));
            assert!((0.0..=SCHOOL_DEPTH).contains(&m.position.y));
        }
    }

    // =========================================================================
    // Casting
    // =========================================================================

    #[test]
    fn test_cast_only_from_idle() {
        let mut rng = create_test_rng();
        let mut game = create_game(&mut rng);
        assert!(game.cast());
        assert_eq!(game.phase(), FishingPhase::Casting);
        assert!(!game.cast());
    }

    #[test]
    fn test_cast_needs_durability() {
        let mut rng = create_test_rng();
        let mut game = create_game(&mut rng);
        game.state_mut().rod_durability = 0;
        assert!(!game.cast());
        game.state_mut().repair_rod();
        assert!(game.cast());
    }

    #[test]
    fn test_cast_takes_seventeen_frames() {
        let mut rng = create_test_rng();
        let mut game = create_game(&mut rng);
        game.cast();
        let result = game.tick(16 * CAST_FRAME_MS, &mut rng);
        assert!(!result.cast_splash);
        assert_eq!(game.phase(), FishingPhase::Casting);

        let result = game.tick(CAST_FRAME_MS, &mut rng);
        assert!(result.cast_splash);
        assert_eq!(game.phase(), FishingPhase::Waiting);
        assert!(game.session().cast_distance > 0.0);
        assert!(game.session().bite_timer_ms >= 1500 / 2);
    }

    // =========================================================================
    // Bites
    // =========================================================================

    #[test]
    fn test_bite_arrives_and_can_be_missed() {
        let mut rng = create_test_rng();
        let mut game = create_game(&mut rng);
        game.state_mut().increment_combo();
        game.cast();

        let bite = run_until(&mut game, &mut rng, 30_000, |g, _| g.phase() == FishingPhase::Bite);
        assert!(bite.is_some());

        let missed = run_until(&mut game, &mut rng, 2_000, |_, r| r.missed);
        assert!(missed.is_some());
        assert_eq!(game.phase(), FishingPhase::Idle);
        assert_eq!(game.state().combo, 0);
    }

    #[test]
    fn test_reel_outside_bite_does_nothing() {
        let mut rng = create_test_rng();
        let mut game = create_game(&mut rng);
        assert!(!game.reel(&mut rng));
        game.cast();
        assert!(!game.reel(&mut rng));
    }

    // =========================================================================
    // Reeling
    // =========================================================================

    fn hook_a_fish(game: &mut FishingGame, rng: &mut ChaCha8Rng) {
        game.cast();
        run_until(game, rng, 30_000, |g, _| g.phase() == FishingPhase::Bite)
            .expect("fish should bite");
        assert!(game.reel(rng));
        assert_eq!(game.phase(), FishingPhase::Reeling);
    }

    #[test]
    fn test_reeled_fish_is_landed() {
        let mut rng = create_test_rng();
        let mut game = create_game(&mut rng);
        game.state_mut().settings.auto_reel = true;
        hook_a_fish(&mut game, &mut rng);

        let result = run_until(&mut game, &mut rng, 3_000, |_, r| r.caught.is_some())
            .expect("fish should be landed");
        let report = result.caught.unwrap();
        let state = game.state();

        assert_eq!(game.phase(), FishingPhase::Caught);
        assert_eq!(state.total_catches, 1);
        assert_eq!(state.session_catches, 1);
        assert_eq!(state.combo, 1);
        assert_eq!(state.tacklebox.len(), 1);
        assert_eq!(state.remaining, state.fish_per_level - 1);
        assert_eq!(state.rod_durability, ROD_MAX_DURABILITY - ROD_WEAR_PER_CATCH);
        assert!(state.score >= report.points);
        assert!(state.achievements.is_unlocked(AchievementId::FirstCatch));
        assert!(result.achievements_unlocked.contains(&AchievementId::FirstCatch));
        assert!(result.xp_gained > 0);
        assert!(game.cutscene().is_some());
    }

    #[test]
    fn test_catch_schedules_auto_recast() {
        let mut rng = create_test_rng();
        let mut game = create_game(&mut rng);
        game.state_mut().settings.auto_reel = true;
        hook_a_fish(&mut game, &mut rng);
        run_until(&mut game, &mut rng, 3_000, |_, r| r.caught.is_some()).unwrap();

        run_until(&mut game, &mut rng, CAUGHT_DISPLAY_MS + 100, |g, _| {
            g.phase() == FishingPhase::Idle
        })
        .unwrap();
        assert!(game.session().recast_timer_ms.is_some());

        let recast = run_until(&mut game, &mut rng, AUTO_RECAST_MS + 100, |g, _| {
            g.phase() == FishingPhase::Casting
        });
        assert!(recast.is_some());
    }

    #[test]
    fn test_line_breaks_at_full_tension() {
        let mut rng = create_test_rng();
        let mut game = create_game(&mut rng);
        game.state_mut().increment_combo();
        hook_a_fish(&mut game, &mut rng);
        game.session.tension = 1.0;
        game.session.reel_hold_ms = 0;

        let result = game.tick(REEL_FRAME_MS, &mut rng);
        assert!(result.line_broke);
        assert_eq!(game.phase(), FishingPhase::Lost);
        assert_eq!(game.state().combo, 0);
        assert_eq!(game.state().rod_durability, ROD_MAX_DURABILITY - ROD_WEAR_PER_SNAP);
        assert_eq!(game.brain().recent_hooks(), 1);

        run_until(&mut game, &mut rng, LOST_DISPLAY_MS + 100, |g, _| {
            g.phase() == FishingPhase::Idle
        })
        .unwrap();
        assert!(game.session().recast_timer_ms.is_none());
    }

    #[test]
    fn test_last_fish_of_level_levels_up() {
        let mut rng = create_test_rng();
        let mut game = create_game(&mut rng);
        game.state_mut().settings.auto_reel = true;
        game.state_mut().set_level_for_testing(9);
        game.state_mut().remaining = 1;
        hook_a_fish(&mut game, &mut rng);

        let result = run_until(&mut game, &mut rng, 3_000, |_, r| r.caught.is_some()).unwrap();
        let level_up = result.level_up.expect("level up");
        assert_eq!(level_up.level, 10);
        assert_eq!(level_up.milestone.map(|m| m.reward), Some(1000));
        assert_eq!(game.state().remaining, game.state().fish_per_level);
        assert!(result.achievements_unlocked.contains(&AchievementId::Level10));
    }

    // =========================================================================
    // Scenery
    // =========================================================================

    #[test]
    fn test_first_boat_after_ten_seconds() {
        let mut rng = create_test_rng();
        let mut game = create_game(&mut rng);
        let result = run_until(&mut game, &mut rng, 10_500, |_, r| {
            r.ambient.contains(&AmbientEvent::BoatArrived(0))
        });
        assert!(result.is_some());
    }

    #[test]
    fn test_whale_counts_sightings_on_deep_stages() {
        let mut rng = create_test_rng();
        let mut game = FishingGame::with_clock(GameState::new("term_test".to_string()), START_MS);
        game.start(2, &mut rng);
        let result = run_until(&mut game, &mut rng, WHALE_INTERVAL_MS + 100, |_, r| r.whale_sighted);
        assert!(result.is_some());
        assert_eq!(game.state().whales_seen, 1);
    }

    #[test]
    fn test_no_scenery_off_screen() {
        let mut rng = create_test_rng();
        let mut game = create_game(&mut rng);
        game.stop();
        assert!(run_until(&mut game, &mut rng, 12_000, |_, r| !r.ambient.is_empty()).is_none());
    }

    #[test]
    fn test_stage_sets_time_of_day() {
        let mut rng = create_test_rng();
        let mut game = create_game(&mut rng);
        game.start(1, &mut rng);
        assert_eq!(game.state().time_of_day, TimeOfDay::Dusk);
        game.start(2, &mut rng);
        assert_eq!(game.state().time_of_day, TimeOfDay::Night);
    }

    // =========================================================================
    // Prestige
    // =========================================================================

    #[test]
    fn test_prestige_requires_level() {
        let mut rng = create_test_rng();
        let mut game = create_game(&mut rng);
        game.prestige();
        assert_eq!(game.state().prestige, 0);

        game.state_mut().set_level_for_testing(50);
        assert!(game.can_prestige());
        game.prestige();
        assert_eq!(game.state().prestige, 1);
        assert_eq!(game.state().level, 1);
        assert!(!game.state().playing);

        let result = game.tick(50, &mut rng);
        assert!(result.achievements_unlocked.contains(&AchievementId::Prestige1));
    }

    #[test]
    fn test_challenges_roll_on_first_tick() {
        let mut rng = create_test_rng();
        let mut game = create_game(&mut rng);
        game.tick(50, &mut rng);
        assert_eq!(game.state().challenges.all().count(), 5);
    }
}
