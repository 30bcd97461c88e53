use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::language::Language;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "showreel";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Language code; skips the selector screen when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_muted: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduced_motion: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Case-insensitive substring of the output device name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "yes" | "on" => Ok(true),
        "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("Invalid value for {key}: {value}. Must be 'true' or 'false'."),
    }
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `showreel config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# Showreel configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn language(&self) -> Option<Language> {
        self.defaults
            .as_ref()?
            .language
            .as_deref()
            .and_then(Language::from_code)
    }

    pub fn start_muted(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.start_muted)
            .unwrap_or(false)
    }

    pub fn reduced_motion(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.reduced_motion)
            .unwrap_or(false)
    }

    pub fn audio_device(&self) -> Option<&str> {
        self.audio.as_ref()?.device.as_deref()
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.language" => {
                let Some(lang) = Language::from_code(value) else {
                    anyhow::bail!(
                        "Invalid language: {value}. Must be 'en-us', 'es', or 'pt-br'."
                    );
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .language = Some(lang.code().to_string());
            }
            "defaults.start_muted" => {
                let muted = parse_bool(key, value)?;
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .start_muted = Some(muted);
            }
            "defaults.reduced_motion" => {
                let reduced = parse_bool(key, value)?;
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .reduced_motion = Some(reduced);
            }
            "audio.device" => {
                if value.trim().is_empty() {
                    anyhow::bail!("Invalid audio.device: must not be empty.");
                }
                self.audio.get_or_insert_with(AudioConfig::default).device =
                    Some(value.trim().to_string());
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: defaults.language, defaults.start_muted, defaults.reduced_motion, audio.device"
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_validates_keys_and_values() {
        let mut config = Config::default();
        config.set("defaults.language", "PT").unwrap();
        assert_eq!(config.language(), Some(Language::PtBr));

        config.set("defaults.start_muted", "yes").unwrap();
        assert!(config.start_muted());

        config.set("audio.device", "  USB DAC ").unwrap();
        assert_eq!(config.audio_device(), Some("USB DAC"));

        assert!(config.set("defaults.language", "fr").is_err());
        assert!(config.set("defaults.reduced_motion", "maybe").is_err());
        assert!(config.set("audio.device", " ").is_err());
        assert!(config.set("defaults.theme", "dark").is_err());
    }

    #[test]
    fn empty_config_has_defaults() {
        let config = Config::default();
        assert_eq!(config.language(), None);
        assert!(!config.start_muted());
        assert!(!config.reduced_motion());
        assert_eq!(config.audio_device(), None);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("showreel-config-{}", std::process::id()));
        let path = dir.join(FILENAME);

        let mut config = Config::default();
        config.set("defaults.reduced_motion", "true").unwrap();
        config.set("defaults.language", "es").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(loaded.reduced_motion());
        assert_eq!(loaded.language(), Some(Language::Es));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_file_points_at_config_show() {
        let err = Config::load_from(Path::new("/nonexistent/showreel/config.yaml")).unwrap_err();
        assert!(err.to_string().contains("showreel config show"));
    }
}
