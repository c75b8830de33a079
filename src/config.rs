//! Player configuration.
//! Read from a JSON file when one is present; every field has a default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use crate::core::time;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "DISC_PLAYER_CONFIG";
/// Config file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "disc_player.json";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Audio file the player opens
    pub audio_path: PathBuf,
    /// Album art painted on the disc; the note glyph is shown without it
    pub cover_path: Option<PathBuf>,
    /// Period of the elapsed-time ticker
    pub elapsed_tick_secs: f64,
    /// Period of the disc rotation ticker
    pub rotation_tick_secs: f64,
    /// Time for one full disc revolution
    pub revolution_secs: f64,
    pub window_title: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            audio_path: PathBuf::from("assets/song.mp3"),
            cover_path: Some(PathBuf::from("assets/album_cover.png")),
            elapsed_tick_secs: 1.0,
            rotation_tick_secs: 0.02,
            revolution_secs: 10.0,
            window_title: "Player".to_string(),
        }
    }
}

impl PlayerConfig {
    /// Read and validate a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: PlayerConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Locate and load the config.
    ///
    /// An explicit path (from [`CONFIG_ENV`]) wins, then [`DEFAULT_CONFIG_FILE`]
    /// in the working directory. Unreadable or invalid files fall back to defaults.
    pub fn discover(explicit: Option<PathBuf>) -> Self {
        let candidate = explicit.or_else(|| {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            local.exists().then_some(local)
        });

        let Some(path) = candidate else {
            return Self::default();
        };

        match Self::from_file(&path) {
            Ok(config) => {
                info!(path = %path.display(), "loaded config");
                config
            }
            Err(err) => {
                warn!(error = %err, "using default config");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            ("elapsed_tick_secs", self.elapsed_tick_secs),
            ("rotation_tick_secs", self.rotation_tick_secs),
            ("revolution_secs", self.revolution_secs),
        ];
        for (name, value) in periods {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive number of seconds, got {value}"
                )));
            }
        }
        if self.audio_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("audio_path is empty".to_string()));
        }
        Ok(())
    }

    /// Replace the audio file, e.g. from the command line
    pub fn with_audio_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.audio_path = path.into();
        self
    }

    pub fn elapsed_tick(&self) -> Duration {
        time::to_duration(self.elapsed_tick_secs)
    }

    pub fn rotation_tick(&self) -> Duration {
        time::to_duration(self.rotation_tick_secs)
    }

    pub fn revolution(&self) -> Duration {
        time::to_duration(self.revolution_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_player_timing() {
        let config = PlayerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.elapsed_tick(), Duration::from_secs(1));
        assert_eq!(config.rotation_tick(), Duration::from_millis(20));
        assert_eq!(config.revolution(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("player.json");
        fs::write(&path, r#"{ "audio_path": "music/track.mp3" }"#).unwrap();

        let config = PlayerConfig::from_file(&path).unwrap();
        assert_eq!(config.audio_path, PathBuf::from("music/track.mp3"));
        assert_eq!(config.revolution_secs, 10.0);
        assert_eq!(config.window_title, "Player");
    }

    #[test]
    fn test_rejects_non_positive_periods() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("player.json");
        fs::write(&path, r#"{ "rotation_tick_secs": 0 }"#).unwrap();

        let err = PlayerConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("player.json");
        fs::write(&path, "{ not json").unwrap();

        let err = PlayerConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PlayerConfig::from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_discover_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("player.json");
        fs::write(&path, r#"{ "revolution_secs": -4 }"#).unwrap();

        assert_eq!(PlayerConfig::discover(Some(path)), PlayerConfig::default());
    }

    #[test]
    fn test_discover_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("player.json");
        fs::write(&path, r#"{ "revolution_secs": 20.0, "window_title": "Spin" }"#).unwrap();

        let config = PlayerConfig::discover(Some(path));
        assert_eq!(config.revolution(), Duration::from_secs(20));
        assert_eq!(config.window_title, "Spin");
    }

    #[test]
    fn test_cover_path_can_be_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("player.json");
        fs::write(&path, r#"{ "cover_path": null }"#).unwrap();

        let config = PlayerConfig::from_file(&path).unwrap();
        assert_eq!(config.cover_path, None);
        assert_eq!(
            PlayerConfig::default().cover_path,
            Some(PathBuf::from("assets/album_cover.png"))
        );
    }

    #[test]
    fn test_with_audio_path_overrides() {
        let config = PlayerConfig::default().with_audio_path("other.ogg");
        assert_eq!(config.audio_path, PathBuf::from("other.ogg"));
    }
}
