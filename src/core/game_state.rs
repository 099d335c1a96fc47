//! The game store: progress, equipment, session stats and the persisted
//! `Profile` subset.

use crate::achievements::{get_achievement_def, AchievementId, Achievements};
use crate::api::types::DailyChallenge;
use crate::core::constants::ROD_MAX_DURABILITY;
use crate::environment::weather::WeatherReport;
use crate::fishing::data::{
    difficulty, milestone_for_level, DEFAULT_DIFFICULTY, DIFFICULTY_LEVELS, FISH_TYPES, LURES, RODS,
    STAGES,
};
use crate::fishing::logic::hook_fish;
use crate::fishing::types::{LevelMilestone, TimeOfDay};
use crate::progression::challenges::Challenges;
use crate::progression::experience::{Experience, PRESTIGE_MIN_LEVEL};
use crate::save::settings::Settings;
use crate::tacklebox::logic::{CatchContext, Tacklebox};
use crate::tacklebox::types::TackleboxItem;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a lure purchase was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShopError {
    #[error("no such lure")]
    UnknownLure,

    #[error("lure already owned")]
    AlreadyOwned,

    #[error("reach level {required} to buy this lure")]
    LevelTooLow { required: u32 },

    #[error("costs {price} points")]
    NotEnoughPoints { price: u64 },
}

/// The server's challenge of the day and local progress on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyChallengeState {
    pub challenge: Option<DailyChallenge>,
    pub progress: u64,
    pub completed: bool,
}

/// Main game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub device_id: String,
    pub user_id: Option<String>,
    pub username: String,

    pub score: u64,
    pub high_score: u64,
    pub level: u32,
    /// Fish left before the next level
    pub remaining: u32,
    pub total_catches: u64,
    pub prestige: u32,

    pub tacklebox: Tacklebox,

    pub selected_rod: usize,
    pub selected_lure: usize,
    pub unlocked_lures: Vec<usize>,
    pub rod_durability: u32,

    /// On the fishing screen (auto-recast only happens while playing)
    pub playing: bool,
    pub current_stage: usize,
    pub difficulty: usize,
    pub fish_per_level: u32,
    pub weather: Option<WeatherReport>,
    pub time_of_day: TimeOfDay,

    pub combo: u32,
    pub max_combo: u32,
    pub perfect_catches: u64,
    pub session_catches: u64,
    pub session_score: u64,
    pub whales_seen: u64,
    pub storm_catches: u64,
    pub achievements: Achievements,

    pub daily: DailyChallengeState,
    pub settings: Settings,

    pub experience: Experience,
    pub challenges: Challenges,
}

impl GameState {
    pub fn new(device_id: String) -> Self {
        let fish_per_level = difficulty(DEFAULT_DIFFICULTY).fish_per_level;
        Self {
            device_id,
            user_id: None,
            username: "Angler".to_string(),
            score: 0,
            high_score: 0,
            level: 1,
            remaining: fish_per_level,
            total_catches: 0,
            prestige: 0,
            tacklebox: Tacklebox::new(),
            selected_rod: 0,
            selected_lure: 0,
            unlocked_lures: vec![0],
            rod_durability: ROD_MAX_DURABILITY,
            playing: false,
            current_stage: 0,
            difficulty: DEFAULT_DIFFICULTY,
            fish_per_level,
            weather: None,
            time_of_day: TimeOfDay::Day,
            combo: 0,
            max_combo: 0,
            perfect_catches: 0,
            session_catches: 0,
            session_score: 0,
            whales_seen: 0,
            storm_catches: 0,
            achievements: Achievements::default(),
            daily: DailyChallengeState::default(),
            settings: Settings::default(),
            experience: Experience::new(),
            challenges: Challenges::new(),
        }
    }

    // =========================================================================
    // Score and level
    // =========================================================================

    pub fn add_score(&mut self, points: u64) {
        self.score += points;
        self.session_score += points;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    pub fn set_level(&mut self, level: u32) {
        self.level = level.max(1);
    }

    pub fn increment_catches(&mut self) {
        self.total_catches += 1;
        self.session_catches += 1;
    }

    /// Counts one fish towards the level. Returns the new level when it
    /// rolls over, paying out any milestone reward.
    pub fn count_fish(&mut self) -> Option<(u32, Option<&'static LevelMilestone>)> {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return None;
        }
        self.level += 1;
        self.remaining = self.fish_per_level;
        let milestone = milestone_for_level(self.level);
        if let Some(m) = milestone {
            self.add_score(m.reward);
        }
        log::info!("reached level {}", self.level);
        Some((self.level, milestone))
    }

    // =========================================================================
    // Equipment
    // =========================================================================

    pub fn select_rod(&mut self, rod: usize) {
        self.selected_rod = rod.min(RODS.len() - 1);
    }

    /// Only owned lures can be selected.
    pub fn select_lure(&mut self, lure: usize) -> bool {
        if !self.unlocked_lures.contains(&lure) {
            return false;
        }
        self.selected_lure = lure;
        true
    }

    /// Adds a lure to the owned list. Returns false if already owned.
    pub fn unlock_lure(&mut self, lure: usize) -> bool {
        if self.unlocked_lures.contains(&lure) {
            return false;
        }
        self.unlocked_lures.push(lure);
        true
    }

    pub fn can_buy_lure(&self, index: usize) -> Result<u64, ShopError> {
        let lure = LURES.get(index).ok_or(ShopError::UnknownLure)?;
        if self.unlocked_lures.contains(&index) {
            return Err(ShopError::AlreadyOwned);
        }
        if self.level < lure.unlock_level {
            return Err(ShopError::LevelTooLow {
                required: lure.unlock_level,
            });
        }
        if self.score < lure.price {
            return Err(ShopError::NotEnoughPoints { price: lure.price });
        }
        Ok(lure.price)
    }

    /// Spends points on a lure. Returns any achievements this unlocked.
    pub fn buy_lure(&mut self, index: usize) -> Result<Vec<AchievementId>, ShopError> {
        let price = self.can_buy_lure(index)?;
        self.score -= price;
        self.experience.track_spend(price);
        self.unlock_lure(index);
        log::info!("bought {} for {}", LURES[index].name, price);
        let ids = self.achievements.on_lure_unlocked(
            self.unlocked_lures.len(),
            LURES.len(),
            Some(self.username.as_str()),
        );
        Ok(self.grant_achievements(ids))
    }

    pub fn decrease_rod_durability(&mut self, amount: u32) {
        self.rod_durability = self.rod_durability.saturating_sub(amount);
    }

    pub fn repair_rod(&mut self) {
        self.rod_durability = ROD_MAX_DURABILITY;
    }

    // =========================================================================
    // Session
    // =========================================================================

    pub fn set_stage(&mut self, stage: usize) {
        self.current_stage = stage.min(STAGES.len() - 1);
    }

    /// Sets the difficulty and restarts the level count.
    pub fn set_difficulty(&mut self, index: usize) {
        let d = difficulty(index);
        self.difficulty = index.min(DIFFICULTY_LEVELS.len() - 1);
        self.fish_per_level = d.fish_per_level;
        self.remaining = d.fish_per_level;
    }

    pub fn increment_combo(&mut self) {
        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
    }

    pub fn reset_combo(&mut self) {
        self.combo = 0;
    }

    pub fn increment_perfect_catches(&mut self) {
        self.perfect_catches += 1;
    }

    pub fn increment_whales_seen(&mut self) {
        self.whales_seen += 1;
    }

    pub fn increment_storm_catches(&mut self) {
        self.storm_catches += 1;
    }

    /// Marks an achievement by wire id. Returns false if already held or unknown.
    pub fn add_achievement(&mut self, wire_id: &str) -> bool {
        match AchievementId::from_wire_id(wire_id) {
            Some(id) => self.achievements.unlock(id, Some(self.username.clone())),
            None => false,
        }
    }

    /// Pays out the rewards of freshly unlocked achievements.
    pub fn grant_achievements(&mut self, ids: Vec<AchievementId>) -> Vec<AchievementId> {
        for id in &ids {
            if let Some(def) = get_achievement_def(*id) {
                self.add_score(def.reward.coins);
                self.experience
                    .add_experience(def.reward.xp, &format!("achievement:{}", id.wire_id()));
            }
        }
        ids
    }

    pub fn toggle_sound(&mut self) {
        self.settings.sound_enabled = !self.settings.sound_enabled;
    }

    pub fn toggle_music(&mut self) {
        self.settings.music_enabled = !self.settings.music_enabled;
    }

    pub fn toggle_vibration(&mut self) {
        self.settings.vibration_enabled = !self.settings.vibration_enabled;
    }

    pub fn toggle_auto_reel(&mut self) {
        self.settings.auto_reel = !self.settings.auto_reel;
    }

    // =========================================================================
    // Daily challenge
    // =========================================================================

    /// Installs today's challenge; progress restarts when the date changes.
    pub fn set_daily_challenge(&mut self, challenge: DailyChallenge) {
        let same_day = self
            .daily
            .challenge
            .as_ref()
            .map_or(false, |c| c.date == challenge.date && c.kind == challenge.kind);
        if !same_day {
            self.daily.progress = 0;
            self.daily.completed = false;
        }
        self.daily.challenge = Some(challenge);
    }

    /// Adds progress to the daily challenge if `kind` matches. Returns the
    /// reward when this completes it.
    pub fn record_daily(&mut self, kind: &str, amount: u64) -> Option<u64> {
        let challenge = self.daily.challenge.as_ref()?;
        if self.daily.completed || challenge.kind != kind || amount == 0 {
            return None;
        }
        let (target, reward) = (challenge.target, challenge.reward);
        self.daily.progress = (self.daily.progress + amount).min(target);
        if self.daily.progress < target {
            return None;
        }
        self.daily.completed = true;
        self.add_score(reward);
        log::info!("daily challenge complete, +{}", reward);
        Some(reward)
    }

    // =========================================================================
    // Resets
    // =========================================================================

    pub fn can_prestige(&self) -> bool {
        self.level >= PRESTIGE_MIN_LEVEL
    }

    /// Starts over at level 1 one prestige higher. The tacklebox empties but
    /// keeps its lifetime records.
    pub fn prestige(&mut self) {
        self.prestige += 1;
        self.level = 1;
        self.score = 0;
        self.remaining = self.fish_per_level;
        self.session_catches = 0;
        self.session_score = 0;
        self.combo = 0;
        self.tacklebox.clear();
        log::info!("prestige {}", self.prestige);
    }

    /// Back to level 1 for a new run; lifetime stats stay.
    pub fn reset_game(&mut self) {
        self.score = 0;
        self.level = 1;
        self.remaining = self.fish_per_level;
        self.session_catches = 0;
        self.session_score = 0;
        self.combo = 0;
    }

    /// Wipes all progress; identity, equipment choices and settings survive.
    pub fn full_reset(&mut self) {
        self.score = 0;
        self.high_score = 0;
        self.level = 1;
        self.remaining = self.fish_per_level;
        self.total_catches = 0;
        self.prestige = 0;
        self.combo = 0;
        self.max_combo = 0;
        self.perfect_catches = 0;
        self.session_catches = 0;
        self.session_score = 0;
        self.whales_seen = 0;
        self.storm_catches = 0;
        self.achievements = Achievements::default();
        self.rod_durability = ROD_MAX_DURABILITY;
        self.tacklebox = Tacklebox::new();
        self.experience = Experience::new();
        self.challenges = Challenges::new();
        self.daily = DailyChallengeState::default();
    }

    // =========================================================================
    // Dev helpers
    // =========================================================================

    /// Lands a fish of species `kind` without playing the minigame.
    pub fn simulate_catch(&mut self, kind: usize, now_ms: i64, rng: &mut impl Rng) -> TackleboxItem {
        let mut fish = hook_fish(kind.min(FISH_TYPES.len() - 1), rng);
        fish.size = FISH_TYPES[fish.kind].size + rng.gen_range(0..30);
        let ctx = CatchContext {
            stage: self.current_stage,
            is_perfect: rng.gen::<f64>() < 0.3,
            weather: self.weather.as_ref().map(|w| w.condition),
            time_of_day: self.time_of_day,
            now_ms,
        };
        let item = self.tacklebox.add(&fish, &ctx, rng);
        self.add_score(fish.points);
        self.increment_catches();
        self.count_fish();
        item
    }

    pub fn set_level_for_testing(&mut self, level: u32) {
        self.set_level(level);
        self.remaining = self.fish_per_level;
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    pub fn to_profile(&self) -> Profile {
        Profile {
            device_id: self.device_id.clone(),
            user_id: self.user_id.clone(),
            username: self.username.clone(),
            high_score: self.high_score,
            total_catches: self.total_catches,
            unlocked_lures: self.unlocked_lures.clone(),
            achievements: self.achievements.clone(),
            prestige: self.prestige,
            whales_seen: self.whales_seen,
            storm_catches: self.storm_catches,
            perfect_catches: self.perfect_catches,
            max_combo: self.max_combo,
            settings: self.settings,
            tacklebox: self.tacklebox.clone(),
            experience: self.experience.clone(),
            challenges: self.challenges.clone(),
            selected_lure: self.selected_lure,
            difficulty: self.difficulty,
        }
    }

    pub fn from_profile(profile: Profile) -> Self {
        let mut state = Self::new(profile.device_id);
        state.user_id = profile.user_id;
        state.username = profile.username;
        state.high_score = profile.high_score;
        state.total_catches = profile.total_catches;
        state.unlocked_lures = profile.unlocked_lures;
        if !state.unlocked_lures.contains(&0) {
            state.unlocked_lures.insert(0, 0);
        }
        state.achievements = profile.achievements;
        state.prestige = profile.prestige;
        state.whales_seen = profile.whales_seen;
        state.storm_catches = profile.storm_catches;
        state.perfect_catches = profile.perfect_catches;
        state.max_combo = profile.max_combo;
        state.settings = profile.settings;
        state.tacklebox = profile.tacklebox;
        state.experience = profile.experience;
        state.challenges = profile.challenges;
        state.set_difficulty(profile.difficulty);
        state.select_lure(profile.selected_lure);
        state
    }

    /// Starts from the saved profile, settings included. Without one, a fresh
    /// angler on `difficulty` takes `fallback_settings`.
    pub fn restore(
        saved: std::io::Result<Profile>,
        device_id: String,
        difficulty: usize,
        fallback_settings: impl FnOnce() -> Settings,
    ) -> Self {
        match saved {
            Ok(profile) => Self::from_profile(profile),
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("profile unreadable, starting fresh: {}", e);
                }
                let mut state = Self::new(device_id);
                state.set_difficulty(difficulty);
                state.settings = fallback_settings();
                state
            }
        }
    }
}

/// What survives between sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub device_id: String,
    pub user_id: Option<String>,
    pub username: String,
    pub high_score: u64,
    pub total_catches: u64,
    pub unlocked_lures: Vec<usize>,
    pub achievements: Achievements,
    pub prestige: u32,
    pub whales_seen: u64,
    pub storm_catches: u64,
    pub perfect_catches: u64,
    pub max_combo: u32,
    pub settings: Settings,
    pub tacklebox: Tacklebox,
    pub experience: Experience,
    pub challenges: Challenges,
    pub selected_lure: usize,
    pub difficulty: usize,
}

impl Profile {
    pub fn new(device_id: String) -> Self {
        GameState::new(device_id).to_profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn state() -> GameState {
        GameState::new("term_test".to_string())
    }

    #[test]
    fn test_new_game_state() {
        let s = state();
        assert_eq!(s.level, 1);
        assert_eq!(s.remaining, 200);
        assert_eq!(s.fish_per_level, 200);
        assert_eq!(s.unlocked_lures, vec![0]);
        assert_eq!(s.rod_durability, 100);
        assert_eq!(s.username, "Angler");
    }

    #[test]
    fn test_set_difficulty_resets_remaining() {
        let mut s = state();
        for (index, count) in [(0, 100), (1, 150), (2, 200), (3, 250)] {
            s.remaining = 7;
            s.set_difficulty(index);
            assert_eq!(s.fish_per_level, count);
            assert_eq!(s.remaining, count);
        }
    }

    #[test]
    fn test_combo_tracks_max() {
        let mut s = state();
        s.increment_combo();
        s.increment_combo();
        s.reset_combo();
        s.increment_combo();
        assert_eq!(s.combo, 1);
        assert_eq!(s.max_combo, 2);
    }

    #[test]
    fn test_rod_durability_floor_and_repair() {
        let mut s = state();
        s.decrease_rod_durability(60);
        s.decrease_rod_durability(60);
        assert_eq!(s.rod_durability, 0);
        s.repair_rod();
        assert_eq!(s.rod_durability, 100);
    }

    #[test]
    fn test_unlock_lure_idempotent() {
        let mut s = state();
        assert!(s.unlock_lure(2));
        assert!(!s.unlock_lure(2));
        assert_eq!(s.unlocked_lures, vec![0, 2]);
        assert!(s.select_lure(2));
        assert!(!s.select_lure(1));
        assert_eq!(s.selected_lure, 2);
    }

    #[test]
    fn test_add_achievement_idempotent() {
        let mut s = state();
        assert!(s.add_achievement("first_catch"));
        assert!(!s.add_achievement("first_catch"));
        assert!(!s.add_achievement("not_a_thing"));
    }

    #[test]
    fn test_buy_lure_rules() {
        let mut s = state();
        assert_eq!(s.buy_lure(1), Err(ShopError::LevelTooLow { required: 5 }));
        s.level = 5;
        assert_eq!(s.buy_lure(1), Err(ShopError::NotEnoughPoints { price: 500 }));
        s.score = 600;
        assert!(s.buy_lure(1).is_ok());
        assert_eq!(s.score, 100);
        assert_eq!(s.buy_lure(1), Err(ShopError::AlreadyOwned));
        assert_eq!(s.buy_lure(9), Err(ShopError::UnknownLure));
        assert_eq!(s.experience.stats.money_spent, 500);
    }

    #[test]
    fn test_buying_every_lure_unlocks_collector() {
        let mut s = state();
        s.level = 10;
        s.score = 1500;
        s.buy_lure(1).unwrap();
        let unlocked = s.buy_lure(2).unwrap();
        assert_eq!(unlocked, vec![AchievementId::AllLures]);
        // Collector pays 2000 coins
        assert_eq!(s.score, 2000);
    }

    #[test]
    fn test_restore_keeps_profile_settings() {
        let mut saved = state();
        saved.settings.auto_reel = true;
        saved.settings.sound_enabled = false;
        let restored = GameState::restore(Ok(saved.to_profile()), "term_other".to_string(), 0, || {
            panic!("settings file read for a saved profile")
        });
        assert!(restored.settings.auto_reel);
        assert!(!restored.settings.sound_enabled);
        assert_eq!(restored.device_id, "term_test");
    }

    #[test]
    fn test_restore_without_profile_uses_settings_file() {
        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "no save");
        let restored = GameState::restore(Err(missing), "term_new".to_string(), 0, || Settings {
            auto_reel: true,
            ..Default::default()
        });
        assert_eq!(restored.device_id, "term_new");
        assert_eq!(restored.difficulty, 0);
        assert_eq!(restored.fish_per_level, 100);
        assert!(restored.settings.auto_reel);
    }

    #[test]
    fn test_count_fish_levels_up_with_milestone() {
        let mut s = state();
        s.set_difficulty(0);
        s.level = 9;
        s.remaining = 2;
        assert_eq!(s.count_fish(), None);
        let (level, milestone) = s.count_fish().unwrap();
        assert_eq!(level, 10);
        assert_eq!(milestone.unwrap().reward, 1000);
        assert_eq!(s.remaining, 100);
        assert_eq!(s.score, 1000);
    }

    #[test]
    fn test_prestige_keeps_lifetime_stats() {
        let mut s = state();
        let mut rng = create_test_rng();
        for _ in 0..5 {
            s.simulate_catch(2, 1_000, &mut rng);
        }
        s.increment_combo();
        s.prestige();

        assert_eq!(s.prestige, 1);
        assert_eq!(s.level, 1);
        assert_eq!(s.score, 0);
        assert_eq!(s.combo, 0);
        assert_eq!(s.session_catches, 0);
        assert_eq!(s.remaining, s.fish_per_level);
        assert!(s.tacklebox.is_empty());
        assert_eq!(s.tacklebox.total_fish_caught, 5);
        assert_eq!(s.total_catches, 5);
        assert!(s.high_score > 0);
    }

    #[test]
    fn test_simulate_catch() {
        let mut s = state();
        let mut rng = create_test_rng();
        let item = s.simulate_catch(1, 42, &mut rng);
        assert_eq!(item.name, "Perch");
        assert!((50..80).contains(&item.size));
        assert_eq!(s.score, 25);
        assert_eq!(s.total_catches, 1);
        assert_eq!(s.remaining, 199);
    }

    #[test]
    fn test_daily_challenge_progress() {
        let mut s = state();
        s.set_daily_challenge(DailyChallenge {
            kind: "perfect_catches".to_string(),
            target: 2,
            description: "Get 2 perfect catches".to_string(),
            reward: 800,
            date: "2025-01-04".to_string(),
        });
        assert_eq!(s.record_daily("catch_count", 1), None);
        assert_eq!(s.record_daily("perfect_catches", 1), None);
        assert_eq!(s.record_daily("perfect_catches", 1), Some(800));
        assert!(s.daily.completed);
        assert_eq!(s.record_daily("perfect_catches", 1), None);
        assert_eq!(s.score, 800);
    }

    #[test]
    fn test_full_reset() {
        let mut s = state();
        let mut rng = create_test_rng();
        s.simulate_catch(0, 1, &mut rng);
        s.add_achievement("first_catch");
        s.unlock_lure(1);
        s.full_reset();
        assert_eq!(s.total_catches, 0);
        assert_eq!(s.high_score, 0);
        assert_eq!(s.achievements.unlocked_count(), 0);
        assert_eq!(s.tacklebox.total_fish_caught, 0);
        assert_eq!(s.unlocked_lures, vec![0, 1]);
    }

    #[test]
    fn test_profile_roundtrip() {
        let mut s = state();
        let mut rng = create_test_rng();
        s.user_id = Some("user-1".to_string());
        s.simulate_catch(4, 1, &mut rng);
        s.unlock_lure(2);
        s.select_lure(2);
        s.set_difficulty(3);
        s.increment_whales_seen();
        s.toggle_auto_reel();

        let restored = GameState::from_profile(s.to_profile());
        assert_eq!(restored.user_id.as_deref(), Some("user-1"));
        assert_eq!(restored.high_score, s.high_score);
        assert_eq!(restored.unlocked_lures, vec![0, 2]);
        assert_eq!(restored.selected_lure, 2);
        assert_eq!(restored.fish_per_level, 250);
        assert_eq!(restored.whales_seen, 1);
        assert!(restored.settings.auto_reel);
        assert_eq!(restored.tacklebox.len(), 1);
        // Session values start fresh
        assert_eq!(restored.score, 0);
        assert_eq!(restored.level, 1);
    }
}
