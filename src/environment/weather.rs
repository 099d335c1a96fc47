//! Weather: the backend's weather report and a local simulation that
//! drifts between presets with eased transitions.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Coarse condition reported by the weather endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    #[default]
    Clear,
    Cloudy,
    Rain,
    Storm,
}

impl WeatherCondition {
    /// Maps a WMO weather interpretation code.
    pub fn from_wmo_code(code: i64) -> Self {
        if code < 4 {
            WeatherCondition::Clear
        } else if code < 50 {
            WeatherCondition::Cloudy
        } else if code < 70 {
            WeatherCondition::Rain
        } else {
            WeatherCondition::Storm
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "clear",
            WeatherCondition::Cloudy => "cloudy",
            WeatherCondition::Rain => "rain",
            WeatherCondition::Storm => "storm",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "☀",
            WeatherCondition::Cloudy => "☁",
            WeatherCondition::Rain => "☂",
            WeatherCondition::Storm => "⚡",
        }
    }
}

/// Weather as exchanged with the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub condition: WeatherCondition,
    /// Degrees Celsius
    pub temperature: f64,
    /// km/h
    pub wind_speed: f64,
    /// Percent, 0-100
    pub cloud_cover: f64,
    /// Precipitation probability, percent
    pub precipitation: f64,
}

impl WeatherReport {
    /// What the backend serves when the upstream provider fails.
    pub fn fallback() -> Self {
        Self {
            condition: WeatherCondition::Clear,
            temperature: 18.0,
            wind_speed: 8.0,
            cloud_cover: 30.0,
            precipitation: 0.0,
        }
    }

    pub fn is_storm(&self) -> bool {
        self.condition == WeatherCondition::Storm
    }
}

impl Default for WeatherReport {
    fn default() -> Self {
        Self::fallback()
    }
}

/// Simulated weather presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherKind {
    Sunny,
    Cloudy,
    Overcast,
    LightRain,
    Rain,
    HeavyRain,
    Storm,
    Foggy,
    LightSnow,
    Snow,
    Blizzard,
}

impl WeatherKind {
    pub const ALL: [WeatherKind; 11] = [
        WeatherKind::Sunny,
        WeatherKind::Cloudy,
        WeatherKind::Overcast,
        WeatherKind::LightRain,
        WeatherKind::Rain,
        WeatherKind::HeavyRain,
        WeatherKind::Storm,
        WeatherKind::Foggy,
        WeatherKind::LightSnow,
        WeatherKind::Snow,
        WeatherKind::Blizzard,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WeatherKind::Sunny => "Sunny",
            WeatherKind::Cloudy => "Cloudy",
            WeatherKind::Overcast => "Overcast",
            WeatherKind::LightRain => "Light Rain",
            WeatherKind::Rain => "Rain",
            WeatherKind::HeavyRain => "Heavy Rain",
            WeatherKind::Storm => "Storm",
            WeatherKind::Foggy => "Foggy",
            WeatherKind::LightSnow => "Light Snow",
            WeatherKind::Snow => "Snow",
            WeatherKind::Blizzard => "Blizzard",
        }
    }

    pub fn preset(&self) -> WeatherState {
        let p = |cloud_cover, rain_intensity, wind_speed, temperature, humidity, visibility, pressure, fog_density, lightning_chance, snow_intensity| WeatherState {
            cloud_cover,
            rain_intensity,
            wind_speed,
            temperature,
            humidity,
            visibility,
            pressure,
            fog_density,
            lightning_chance,
            snow_intensity,
        };
        match self {
            WeatherKind::Sunny => p(0.1, 0.0, 5.0, 25.0, 40.0, 1.0, 1020.0, 0.0, 0.0, 0.0),
            WeatherKind::Cloudy => p(0.6, 0.0, 10.0, 20.0, 60.0, 0.9, 1010.0, 0.1, 0.0, 0.0),
            WeatherKind::Overcast => p(0.9, 0.0, 15.0, 18.0, 70.0, 0.8, 1005.0, 0.2, 0.0, 0.0),
            WeatherKind::LightRain => p(0.8, 0.3, 12.0, 16.0, 80.0, 0.7, 1000.0, 0.15, 0.05, 0.0),
            WeatherKind::Rain => p(0.95, 0.6, 20.0, 14.0, 90.0, 0.5, 995.0, 0.3, 0.1, 0.0),
            WeatherKind::HeavyRain => p(1.0, 1.0, 30.0, 12.0, 98.0, 0.3, 985.0, 0.4, 0.15, 0.0),
            WeatherKind::Storm => p(1.0, 0.9, 50.0, 10.0, 95.0, 0.2, 975.0, 0.5, 0.4, 0.0),
            WeatherKind::Foggy => p(0.4, 0.0, 3.0, 12.0, 95.0, 0.2, 1008.0, 0.9, 0.0, 0.0),
            WeatherKind::LightSnow => p(0.8, 0.0, 10.0, -2.0, 70.0, 0.6, 1015.0, 0.1, 0.0, 0.3),
            WeatherKind::Snow => p(0.9, 0.0, 15.0, -5.0, 80.0, 0.4, 1010.0, 0.2, 0.0, 0.7),
            WeatherKind::Blizzard => p(1.0, 0.0, 60.0, -15.0, 85.0, 0.1, 990.0, 0.6, 0.0, 1.0),
        }
    }

    /// Candidate next presets; repeats weight the draw.
    pub fn transitions(&self) -> &'static [WeatherKind] {
        use WeatherKind::*;
        match self {
            Sunny => &[Sunny, Sunny, Cloudy, Foggy],
            Cloudy => &[Sunny, Cloudy, Overcast, LightRain],
            Overcast => &[Cloudy, Overcast, LightRain, Rain],
            LightRain => &[Cloudy, Overcast, Rain],
            Rain => &[LightRain, Rain, HeavyRain, Storm],
            HeavyRain => &[Rain, HeavyRain, Storm],
            Storm => &[HeavyRain, Rain, Storm],
            Foggy => &[Sunny, Cloudy, Foggy],
            LightSnow => &[Cloudy, LightSnow, Snow],
            Snow => &[LightSnow, Snow, Blizzard],
            Blizzard => &[Snow, Blizzard],
        }
    }

    /// Closest preset for a backend report.
    pub fn from_report(report: &WeatherReport) -> Self {
        match report.condition {
            WeatherCondition::Clear => WeatherKind::Sunny,
            WeatherCondition::Cloudy if report.cloud_cover >= 80.0 => WeatherKind::Overcast,
            WeatherCondition::Cloudy => WeatherKind::Cloudy,
            WeatherCondition::Rain if report.precipitation < 40.0 => WeatherKind::LightRain,
            WeatherCondition::Rain => WeatherKind::Rain,
            WeatherCondition::Storm => WeatherKind::Storm,
        }
    }
}

/// Continuous weather parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherState {
    pub cloud_cover: f64,
    pub rain_intensity: f64,
    pub wind_speed: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub visibility: f64,
    pub pressure: f64,
    pub fog_density: f64,
    pub lightning_chance: f64,
    pub snow_intensity: f64,
}

impl WeatherState {
    fn lerp(from: &WeatherState, to: &WeatherState, t: f64) -> WeatherState {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        WeatherState {
            cloud_cover: mix(from.cloud_cover, to.cloud_cover),
            rain_intensity: mix(from.rain_intensity, to.rain_intensity),
            wind_speed: mix(from.wind_speed, to.wind_speed),
            temperature: mix(from.temperature, to.temperature),
            humidity: mix(from.humidity, to.humidity),
            visibility: mix(from.visibility, to.visibility),
            pressure: mix(from.pressure, to.pressure),
            fog_density: mix(from.fog_density, to.fog_density),
            lightning_chance: mix(from.lightning_chance, to.lightning_chance),
            snow_intensity: mix(from.snow_intensity, to.snow_intensity),
        }
    }
}

/// How the current weather changes fishing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FishingEffects {
    pub bite_multiplier: f64,
    pub rarity_bonus: f64,
    pub tension_multiplier: f64,
    pub visibility_factor: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeatherEvent {
    Changed { from: WeatherKind, to: WeatherKind },
    Lightning { intensity: f64, duration_ms: u64 },
}

pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

const TRANSITION_SPEED_PER_MS: f64 = 0.001;
const RANDOM_CHANGE_PER_MS: f64 = 0.0001;
const MAX_HISTORY: usize = 24;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSystem {
    pub current: WeatherKind,
    pub target: WeatherKind,
    pub transition_progress: f64,
    pub state: WeatherState,
    pub history: VecDeque<WeatherKind>,
}

impl Default for WeatherSystem {
    fn default() -> Self {
        Self::new(WeatherKind::Sunny)
    }
}

impl WeatherSystem {
    pub fn new(kind: WeatherKind) -> Self {
        Self {
            current: kind,
            target: kind,
            transition_progress: 1.0,
            state: kind.preset(),
            history: VecDeque::new(),
        }
    }

    pub fn from_report(report: &WeatherReport) -> Self {
        let mut system = Self::new(WeatherKind::from_report(report));
        system.state.temperature = report.temperature;
        system.state.wind_speed = report.wind_speed;
        system.state.cloud_cover = (report.cloud_cover / 100.0).clamp(0.0, 1.0);
        system
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition_progress < 1.0
    }

    /// Starts a transition toward `kind`. Returns false if already heading there.
    pub fn set_weather(&mut self, kind: WeatherKind, instant: bool) -> bool {
        if kind == self.target && !instant {
            return false;
        }
        self.current = self.target;
        self.target = kind;
        self.transition_progress = if instant { 1.0 } else { 0.0 };
        if instant {
            self.interpolate();
        }
        self.history.push_back(kind);
        if self.history.len() > MAX_HISTORY {
            self.history.pop_front();
        }
        true
    }

    /// Advances the simulation by `dt_ms` milliseconds.
    pub fn update(&mut self, dt_ms: u64, rng: &mut impl Rng) -> Vec<WeatherEvent> {
        let mut events = Vec::new();
        let dt = dt_ms as f64;

        self.advance_transition(dt_ms);
        self.add_variation(dt, rng);

        if self.state.lightning_chance > 0.0
            && rng.gen::<f64>() < self.state.lightning_chance * dt * 0.001
        {
            events.push(WeatherEvent::Lightning {
                intensity: 0.5 + rng.gen::<f64>() * 0.5,
                duration_ms: 100 + rng.gen_range(0..200),
            });
        }

        if rng.gen::<f64>() < RANDOM_CHANGE_PER_MS * dt {
            let options = self.target.transitions();
            let next = options[rng.gen_range(0..options.len())];
            let from = self.target;
            if next != from && self.set_weather(next, false) {
                log::debug!("weather changing {} -> {}", from.name(), next.name());
                events.push(WeatherEvent::Changed { from, to: next });
            }
        }

        events
    }

    /// Moves the blend between presets forward without any random drift.
    pub fn advance_transition(&mut self, dt_ms: u64) {
        if self.is_transitioning() {
            self.transition_progress =
                (self.transition_progress + TRANSITION_SPEED_PER_MS * dt_ms as f64).min(1.0);
            self.interpolate();
        }
    }

    fn interpolate(&mut self) {
        let t = ease_in_out_cubic(self.transition_progress);
        self.state = WeatherState::lerp(&self.current.preset(), &self.target.preset(), t);
    }

    fn add_variation(&mut self, dt: f64, rng: &mut impl Rng) {
        let variation = dt * 0.0001;
        self.state.wind_speed =
            (self.state.wind_speed + (rng.gen::<f64>() - 0.5) * variation * 10.0).max(0.0);
        self.state.temperature += (rng.gen::<f64>() - 0.5) * variation * 0.5;
        self.state.cloud_cover =
            (self.state.cloud_cover + (rng.gen::<f64>() - 0.5) * variation).clamp(0.0, 1.0);
        if self.state.rain_intensity > 0.0 {
            self.state.rain_intensity = (self.state.rain_intensity
                + (rng.gen::<f64>() - 0.5) * variation * 2.0)
                .clamp(0.0, 1.0);
        }
    }

    pub fn fishing_effects(&self) -> FishingEffects {
        let s = &self.state;

        let mut bite = 1.0;
        if s.rain_intensity > 0.2 && s.rain_intensity < 0.5 {
            bite *= 1.3;
        }
        if s.cloud_cover > 0.6 && s.cloud_cover < 0.9 {
            bite *= 1.15;
        }
        if s.wind_speed > 40.0 {
            bite *= 0.6;
        }
        if s.fog_density > 0.5 {
            bite *= 1.1;
        }
        if s.pressure < 1000.0 {
            bite *= 1.2;
        }

        let mut rarity = 0.0;
        match self.target {
            WeatherKind::Storm => rarity += 0.3,
            WeatherKind::Blizzard => rarity += 0.4,
            _ => {}
        }
        if s.rain_intensity > 0.5 {
            rarity += 0.15;
        }
        if s.fog_density > 0.7 {
            rarity += 0.2;
        }

        FishingEffects {
            bite_multiplier: bite,
            rarity_bonus: rarity,
            tension_multiplier: 1.0 + s.wind_speed * 0.01 + s.rain_intensity * 0.2,
            visibility_factor: s.visibility,
        }
    }

    /// Summarises the simulated state in the backend's report shape.
    pub fn to_report(&self) -> WeatherReport {
        let s = &self.state;
        let condition = match self.target {
            WeatherKind::Storm | WeatherKind::Blizzard => WeatherCondition::Storm,
            _ if s.rain_intensity > 0.2 || s.snow_intensity > 0.2 => WeatherCondition::Rain,
            _ if s.cloud_cover > 0.5 => WeatherCondition::Cloudy,
            _ => WeatherCondition::Clear,
        };
        WeatherReport {
            condition,
            temperature: s.temperature,
            wind_speed: s.wind_speed,
            cloud_cover: s.cloud_cover * 100.0,
            precipitation: s.rain_intensity.max(s.snow_intensity) * 100.0,
        }
    }
}
