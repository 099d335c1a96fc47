// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 40;
/// Longest frame fed to a tick; a stalled terminal does not fast-forward the game
pub const MAX_FRAME_MS: u64 = 250;
pub const AUTOSAVE_INTERVAL_SECONDS: u64 = 60;

// Casting
pub const CAST_FRAME_MS: u64 = 40;
pub const CAST_PROGRESS_PER_FRAME: f64 = 0.06;

// Waiting for a bite
pub const BITE_DELAY_MIN_MS: f64 = 1500.0;
pub const BITE_DELAY_SPREAD_MS: f64 = 2500.0;
pub const BITE_WINDOW_MS: u64 = 1500;
pub const NIBBLE_DELAY_MS: u64 = 700;

// Reeling
pub const REEL_FRAME_MS: u64 = 150;
pub const TENSION_START: f64 = 0.15;
pub const TENSION_RISE_FACTOR: f64 = 0.03;
pub const TENSION_RELIEF_FACTOR: f64 = 0.08;
pub const TENSION_SPIKE_CHANCE: f64 = 0.04;
pub const TENSION_SPIKE: f64 = 0.06;
pub const TENSION_SAFE_LIMIT: f64 = 0.9;
pub const PERFECT_TENSION: f64 = 0.3;
pub const REEL_MIN_MS: u64 = 1500;
pub const REEL_MAX_MS: u64 = 2000;
/// A key press keeps the reel turning this long (terminals report no key release)
pub const REEL_HOLD_MS: u64 = 400;

// Result display
pub const CAUGHT_DISPLAY_MS: u64 = 2000;
pub const LOST_DISPLAY_MS: u64 = 1200;
pub const AUTO_RECAST_MS: u64 = 1000;

// Fish selection
pub const GOLDEN_KOI_CHANCE: f64 = 0.001;
pub const STAGE_BONUS_ATTRACTION: f64 = 1.2;
pub const SIZE_MULTIPLIER_MIN: f64 = 0.8;
pub const SIZE_MULTIPLIER_SPREAD: f64 = 0.7;

// Scoring
pub const COMBO_STEP: f64 = 0.1;
pub const PERFECT_MULTIPLIER: u64 = 2;

// Rod wear
pub const ROD_MAX_DURABILITY: u32 = 100;
pub const ROD_WEAR_PER_CATCH: u32 = 1;
pub const ROD_WEAR_PER_SNAP: u32 = 5;

// Tacklebox
pub const TACKLEBOX_CAPACITY: usize = 10_000;
pub const RARE_FISH_RARITY: u8 = 3;

// Ambient events
pub const BOAT_INTERVAL_MS: u64 = 60_000;
pub const BOAT_FIRST_MS: u64 = 10_000;
pub const BOAT_VISIBLE_MS: u64 = 25_000;
pub const WHALE_INTERVAL_MS: u64 = 180_000;
pub const WHALE_VISIBLE_MS: u64 = 20_000;
pub const WHALE_MIN_STAGE: usize = 2;
pub const LIGHTNING_CHANCE_PER_SECOND: f64 = 0.08;
pub const LIGHTNING_FLASH_MS: u64 = 150;

// Backend
pub const WEATHER_CACHE_SECONDS: i64 = 30 * 60;
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 100;
pub const DEFAULT_TACKLEBOX_LIMIT: usize = 1000;
pub const REQUEST_TIMEOUT_MS: u64 = 10_000;

// Save file magic number ("GOFISH" + format version 3)
pub const SAVE_VERSION_MAGIC: u64 = 0x474F_4649_5348_0003;
