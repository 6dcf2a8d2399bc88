use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Folder name under the platform config directory
pub const APP_DIR_NAME: &str = "GameAudio";

const CONFIG_FILE_NAME: &str = "audio.json";

/// Default cap on a single real-time frame delta, in seconds
pub const DEFAULT_MAX_FRAME_DELTA_SECS: f32 = 0.25;

/// Largest frame delta cap `validate` accepts, in seconds
pub const MAX_FRAME_DELTA_LIMIT_SECS: f32 = 10.0;

/// How the manager decides which music deck is "active"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelSelection {
    /// Ask the decks which one is playing (A wins, A when neither is)
    #[default]
    Polling,

    /// Remember the deck the last operation made current
    Tracked,
}

/// Which deck receives the new clip in a cross-fade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossFadeMode {
    /// New clip goes on the active deck, which is then faded out and stopped
    #[default]
    Legacy,

    /// New clip goes on the other deck, which fades in and becomes current
    Handoff,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Transition length used when callers don't pass one
    pub default_transition_secs: f32,

    /// Clamp volume inputs to [0, 1] instead of passing them through
    pub clamp_volumes: bool,

    pub channel_selection: ChannelSelection,

    pub cross_fade_mode: CrossFadeMode,

    /// Upper bound on a single real-time frame delta (stalls, debugger pauses)
    pub max_frame_delta_secs: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            default_transition_secs: 1.0,
            clamp_volumes: false,
            channel_selection: ChannelSelection::Polling,
            cross_fade_mode: CrossFadeMode::Legacy,
            max_frame_delta_secs: DEFAULT_MAX_FRAME_DELTA_SECS,
        }
    }
}

impl AudioConfig {
    /// Load configuration from the platform config directory.
    /// Creates a default config file if it doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let config = Self::load_from(&config_path)?;
            tracing::info!("Loaded audio config from: {}", config_path.display());
            Ok(config)
        } else {
            let config = AudioConfig::default();
            config.save_to(&config_path)?;
            tracing::info!("Created default audio config at: {}", config_path.display());
            Ok(config)
        }
    }

    /// Load and validate configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |source: Box<dyn std::error::Error + Send + Sync>| {
            ConfigError::LoadFailed {
                path: path.display().to_string(),
                source,
            }
        };

        let content = fs::read_to_string(path).map_err(|e| load_failed(Box::new(e)))?;
        let config: AudioConfig =
            serde_json::from_str(&content).map_err(|e| load_failed(Box::new(e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the platform config directory
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::DirectoryCreationFailed {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let save_failed = |source: Box<dyn std::error::Error + Send + Sync>| {
            ConfigError::SaveFailed {
                path: path.display().to_string(),
                source,
            }
        };

        let json = serde_json::to_string_pretty(self).map_err(|e| save_failed(Box::new(e)))?;
        fs::write(path, json).map_err(|e| save_failed(Box::new(e)))?;

        Ok(())
    }

    /// Reject values the manager cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_transition_secs.is_finite() || self.default_transition_secs < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "default_transition_secs must be a non-negative number, got {}",
                self.default_transition_secs
            )));
        }

        if !(self.max_frame_delta_secs > 0.0
            && self.max_frame_delta_secs <= MAX_FRAME_DELTA_LIMIT_SECS)
        {
            return Err(ConfigError::Invalid(format!(
                "max_frame_delta_secs must be in (0, {}], got {}",
                MAX_FRAME_DELTA_LIMIT_SECS, self.max_frame_delta_secs
            )));
        }

        Ok(())
    }

    /// Directory holding the config file and logs
    pub fn app_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::app_dir()?.join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path(tag: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("game_audio_config_{}_{}", tag, std::process::id()))
            .join(CONFIG_FILE_NAME)
    }

    #[test]
    fn test_default_config() {
        let config = AudioConfig::default();
        assert_eq!(config.default_transition_secs, 1.0);
        assert!(!config.clamp_volumes);
        assert_eq!(config.channel_selection, ChannelSelection::Polling);
        assert_eq!(config.cross_fade_mode, CrossFadeMode::Legacy);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AudioConfig {
            cross_fade_mode: CrossFadeMode::Handoff,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"handoff\""));

        let deserialized: AudioConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: AudioConfig = serde_json::from_str(r#"{ "clamp_volumes": true }"#).unwrap();
        assert!(config.clamp_volumes);
        assert_eq!(config.default_transition_secs, 1.0);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = temp_config_path("roundtrip");
        let config = AudioConfig {
            default_transition_secs: 2.5,
            channel_selection: ChannelSelection::Tracked,
            ..Default::default()
        };

        config.save_to(&path).unwrap();
        let loaded = AudioConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let path = temp_config_path("invalid");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{ "max_frame_delta_secs": 0.0 }"#).unwrap();

        match AudioConfig::load_from(&path) {
            Err(ConfigError::Invalid(msg)) => assert!(msg.contains("max_frame_delta_secs")),
            other => panic!("expected Invalid, got {:?}", other),
        }

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_frame_delta_cap_bounds() {
        let huge = AudioConfig {
            max_frame_delta_secs: 1e30,
            ..Default::default()
        };
        assert!(matches!(huge.validate(), Err(ConfigError::Invalid(_))));

        let nan = AudioConfig {
            max_frame_delta_secs: f32::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());

        let limit = AudioConfig {
            max_frame_delta_secs: MAX_FRAME_DELTA_LIMIT_SECS,
            ..Default::default()
        };
        assert!(limit.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = AudioConfig::load_from(Path::new("/nonexistent/game_audio/audio.json"));
        assert!(matches!(result, Err(ConfigError::LoadFailed { .. })));
    }
}
