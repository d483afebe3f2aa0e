use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub const MIN_WPM: u32 = 5;
pub const MAX_WPM: u32 = 60;
pub const MIN_TONE_HZ: f32 = 300.0;
pub const MAX_TONE_HZ: f32 = 1200.0;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_wpm")]
    pub wpm: u32,
    #[serde(default = "default_tone_hz")]
    pub tone_hz: f32,
    #[serde(default = "default_volume")]
    pub volume: f32,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_mute")]
    pub mute: bool,
}

fn default_wpm() -> u32 {
    20
}
fn default_tone_hz() -> f32 {
    600.0
}
fn default_volume() -> f32 {
    1.0
}
fn default_theme() -> String {
    "classic-dark".to_string()
}
fn default_mute() -> bool {
    false
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wpm: default_wpm(),
            tone_hz: default_tone_hz(),
            volume: default_volume(),
            theme: default_theme(),
            mute: default_mute(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cwdr")
            .join("config.toml")
    }

    /// Clamp numeric settings into their supported ranges. Call after
    /// deserialization and again after CLI overrides.
    pub fn normalize(&mut self) {
        self.wpm = self.wpm.clamp(MIN_WPM, MAX_WPM);
        self.tone_hz = self.tone_hz.clamp(MIN_TONE_HZ, MAX_TONE_HZ);
        self.volume = self.volume.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.wpm, 20);
        assert_eq!(config.tone_hz, 600.0);
        assert_eq!(config.volume, 1.0);
        assert_eq!(config.theme, "classic-dark");
        assert_eq!(config.mute, false);
    }

    #[test]
    fn test_config_serde_defaults_from_partial() {
        // Simulates a config file written before newer fields existed
        let toml_str = r#"
wpm = 28
theme = "classic-light"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.wpm, 28);
        assert_eq!(config.theme, "classic-light");
        assert_eq!(config.tone_hz, 600.0);
        assert_eq!(config.volume, 1.0);
        assert_eq!(config.mute, false);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.wpm, deserialized.wpm);
        assert_eq!(config.tone_hz, deserialized.tone_hz);
        assert_eq!(config.volume, deserialized.volume);
        assert_eq!(config.theme, deserialized.theme);
        assert_eq!(config.mute, deserialized.mute);
    }

    #[test]
    fn test_normalize_clamps_out_of_range() {
        let mut config = Config {
            wpm: 0,
            tone_hz: 50.0,
            volume: 2.0,
            ..Config::default()
        };
        config.normalize();
        assert_eq!(config.wpm, MIN_WPM);
        assert_eq!(config.tone_hz, MIN_TONE_HZ);
        assert_eq!(config.volume, 1.0);

        config.wpm = 500;
        config.tone_hz = 9000.0;
        config.volume = -0.5;
        config.normalize();
        assert_eq!(config.wpm, MAX_WPM);
        assert_eq!(config.tone_hz, MAX_TONE_HZ);
        assert_eq!(config.volume, 0.0);
    }

    #[test]
    fn test_normalize_keeps_valid_values() {
        let mut config = Config {
            wpm: 25,
            tone_hz: 700.0,
            volume: 0.5,
            ..Config::default()
        };
        config.normalize();
        assert_eq!(config.wpm, 25);
        assert_eq!(config.tone_hz, 700.0);
        assert_eq!(config.volume, 0.5);
    }
}
