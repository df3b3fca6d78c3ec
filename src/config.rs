//! Configuration for termwin sessions.
//!
//! This module provides:
//! - TOML configuration file loading from `~/.termwin/config.toml`
//! - Conversion into the session state and scroll policy used by a `Screen`
//!
//! # Configuration File
//!
//! ```toml
//! [input]
//! mode = "cbreak"          # cooked, cbreak or raw
//! echo = false
//! auto_cr = true
//! halfdelay = 0            # tenths of a second, 0 = off
//! poll_interval_ms = 50
//! line_buffer = 512
//! pushback = 256
//!
//! [scroll]
//! use_window_background = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::linebuf::INBUFSIZ;
use crate::core::modes::{InputMode, SessionState, POLL_INTERVAL};
use crate::core::pushback::NUNGETCH;
use crate::core::window::BlankPolicy;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not determine config path")]
    NoPath,
}

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input pipeline settings
    pub input: InputConfig,
    /// Scroll engine settings
    pub scroll: ScrollConfig,
}

/// Input pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub mode: InputMode,
    pub echo: bool,
    pub auto_cr: bool,
    /// Half-delay in tenths of a second
    pub halfdelay: u32,
    pub poll_interval_ms: u64,
    /// Cooked-mode line buffer size
    pub line_buffer: usize,
    /// Pushback stack size
    pub pushback: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mode: InputMode::Cooked,
            echo: true,
            auto_cr: true,
            halfdelay: 0,
            poll_interval_ms: POLL_INTERVAL.as_millis() as u64,
            line_buffer: INBUFSIZ,
            pushback: NUNGETCH,
        }
    }
}

impl InputConfig {
    /// Build the session state a `Screen` starts with. Zero line buffer
    /// and poll interval settings are raised to one.
    pub fn to_session(&self) -> SessionState {
        SessionState {
            mode: if self.halfdelay > 0 && self.mode == InputMode::Cooked {
                InputMode::Cbreak
            } else {
                self.mode
            },
            echo: self.echo,
            auto_cr: self.auto_cr,
            delay_tenths: self.halfdelay.min(255),
            poll_interval: Duration::from_millis(self.poll_interval_ms.max(1)),
            line_capacity: self.line_buffer.max(1),
            pushback_capacity: self.pushback,
            ..SessionState::default()
        }
    }
}

/// Scroll engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Blank vacated rows with the window background instead of the
    /// window's current attributes
    pub use_window_background: bool,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            use_window_background: true,
        }
    }
}

impl ScrollConfig {
    pub fn policy(&self) -> BlankPolicy {
        BlankPolicy {
            use_window_background: self.use_window_background,
        }
    }
}

impl Config {
    /// Load configuration from the default file, falling back to defaults
    pub fn load() -> Self {
        match Self::get_config_path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                tracing::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Save configuration to the default file
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::get_config_path().ok_or(ConfigError::NoPath)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn get_config_path() -> Option<PathBuf> {
        home_dir().map(|home| home.join(".termwin").join("config.toml"))
    }
}

/// Get home directory
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE")
        .or_else(|| std::env::var_os("HOME"))
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());

        let session = config.input.to_session();
        assert!(session.is_cooked());
        assert!(session.echo);
        assert_eq!(session.poll_interval, Duration::from_millis(50));
        assert_eq!(session.line_capacity, INBUFSIZ);
        assert_eq!(session.pushback_capacity, NUNGETCH);
        assert!(config.scroll.policy().use_window_background);
    }

    #[test]
    fn test_parse_sections() {
        let config = Config::from_toml_str(
            r#"
            [input]
            mode = "raw"
            echo = false
            poll_interval_ms = 10
            pushback = 4

            [scroll]
            use_window_background = false
            "#,
        )
        .unwrap();

        let session = config.input.to_session();
        assert!(session.is_raw());
        assert!(!session.echo);
        assert!(session.auto_cr);
        assert_eq!(session.poll_interval, Duration::from_millis(10));
        assert_eq!(session.pushback_capacity, 4);
        assert!(!config.scroll.policy().use_window_background);
    }

    #[test]
    fn test_halfdelay_implies_cbreak() {
        let config = Config::from_toml_str("[input]\nhalfdelay = 3\n").unwrap();
        let session = config.input.to_session();
        assert!(session.is_cbreak());
        assert_eq!(session.delay_tenths, 3);
        assert_eq!(session.wait_count(0), 6);
    }

    #[test]
    fn test_zero_sizes_are_raised() {
        let config =
            Config::from_toml_str("[input]\nline_buffer = 0\npoll_interval_ms = 0\n").unwrap();
        let session = config.input.to_session();
        assert_eq!(session.line_capacity, 1);
        assert_eq!(session.poll_interval, Duration::from_millis(1));
    }

    #[test]
    fn test_bad_mode_is_an_error() {
        let err = Config::from_toml_str("[input]\nmode = \"sideways\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_serialize_round_trip() {
        let mut config = Config::default();
        config.input.mode = InputMode::Cbreak;
        config.scroll.use_window_background = false;

        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("mode = \"cbreak\""));
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }
}
