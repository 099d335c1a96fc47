//! Player toggles, kept in ~/.gofish/settings.json.

use crate::utils::persistence::{load_json_or_default, save_json};
use serde::{Deserialize, Serialize};
use std::io;

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sound_enabled: bool,
    pub music_enabled: bool,
    /// Terminal bell on a bite
    pub vibration_enabled: bool,
    /// Reel automatically while a fish is on the line
    pub auto_reel: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_enabled: false,
            vibration_enabled: true,
            auto_reel: false,
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        load_json_or_default(SETTINGS_FILE)
    }

    pub fn save(&self) -> io::Result<()> {
        save_json(SETTINGS_FILE, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.sound_enabled);
        assert!(!settings.music_enabled);
        assert!(settings.vibration_enabled);
        assert!(!settings.auto_reel);
    }

    #[test]
    fn test_missing_fields_fill_from_default() {
        let settings: Settings = serde_json::from_str(r#"{"auto_reel": true}"#).unwrap();
        assert!(settings.auto_reel);
        assert!(settings.sound_enabled);
    }
}
