//! Configuration settings for studybuddy.
//!
//! Settings are loaded from `~/.studybuddy/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::StudyError;
use crate::features::focus::SessionConfig;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Focus timer settings.
    pub focus: FocusConfig,
    /// Log file settings.
    pub logging: LoggingConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply the setting to `colored`'s global override.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Focus timer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FocusConfig {
    /// Focus phase length in minutes.
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,
    /// Short break length in minutes.
    #[serde(default = "default_short_break")]
    pub short_break_minutes: u32,
    /// Long break length in minutes.
    #[serde(default = "default_long_break")]
    pub long_break_minutes: u32,
    /// Completed focus intervals before a long break.
    #[serde(default = "default_intervals_before_long_break")]
    pub intervals_before_long_break: u32,
    /// Seconds between a natural phase end and the automatic resume.
    #[serde(default = "default_auto_resume_delay")]
    pub auto_resume_delay_seconds: u32,
    /// Ring the terminal bell when a phase ends.
    #[serde(default = "default_true")]
    pub bell: bool,
}

/// Log file settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Write logs to `~/.studybuddy/logs/`.
    #[serde(default = "default_true")]
    pub file: bool,
}

const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

const fn default_focus_minutes() -> u32 {
    25
}

const fn default_short_break() -> u32 {
    5
}

const fn default_long_break() -> u32 {
    15
}

const fn default_intervals_before_long_break() -> u32 {
    4
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn default_auto_resume_delay() -> u32 {
    crate::features::focus::machine::DEFAULT_AUTO_RESUME_DELAY_SECS as u32
}

const fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            short_break_minutes: default_short_break(),
            long_break_minutes: default_long_break(),
            intervals_before_long_break: default_intervals_before_long_break(),
            auto_resume_delay_seconds: default_auto_resume_delay(),
            bell: default_true(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_true(),
        }
    }
}

impl FocusConfig {
    /// Build a validated timer configuration.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::InvalidConfig` if any value is zero or overflows.
    pub fn session_config(&self) -> Result<SessionConfig, StudyError> {
        SessionConfig::new(
            minutes_to_seconds("focus_minutes", self.focus_minutes)?,
            minutes_to_seconds("short_break_minutes", self.short_break_minutes)?,
            minutes_to_seconds("long_break_minutes", self.long_break_minutes)?,
            self.intervals_before_long_break,
        )
    }

    /// Delay before the timer resumes after a phase ends.
    #[must_use]
    pub fn auto_resume_delay(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::from(self.auto_resume_delay_seconds))
    }
}

fn minutes_to_seconds(field: &str, minutes: u32) -> Result<u32, StudyError> {
    minutes
        .checked_mul(60)
        .ok_or_else(|| StudyError::InvalidConfig(format!("{field} is too large: {minutes}")))
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, StudyError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, StudyError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            StudyError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            StudyError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), StudyError> {
        std::fs::write(path, self.to_yaml()?).map_err(|e| {
            StudyError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, StudyError> {
        serde_yaml::to_string(self)
            .map_err(|e| StudyError::Config(format!("Failed to serialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.general.color, ColorSetting::Auto);
        assert_eq!(config.focus.focus_minutes, 25);
        assert_eq!(config.focus.short_break_minutes, 5);
        assert_eq!(config.focus.long_break_minutes, 15);
        assert_eq!(config.focus.intervals_before_long_break, 4);
        assert_eq!(config.focus.auto_resume_delay_seconds, 1);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_default_session_config() {
        let session = Config::default().focus.session_config().unwrap();
        assert_eq!(session, SessionConfig::default());
    }

    #[test]
    fn test_zero_minutes_rejected() {
        let focus = FocusConfig {
            short_break_minutes: 0,
            ..FocusConfig::default()
        };
        assert!(matches!(
            focus.session_config(),
            Err(StudyError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_overflowing_minutes_rejected() {
        let focus = FocusConfig {
            focus_minutes: u32::MAX,
            ..FocusConfig::default()
        };
        assert!(focus.session_config().is_err());
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();
        assert_eq!(config.focus, FocusConfig::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.focus.focus_minutes = 50;
        config.logging.file = false;

        config.save_to_path(&config_path).unwrap();
        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.focus.focus_minutes, 50);
        assert!(!loaded.logging.file);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r"
focus:
  focus_minutes: 45
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.focus.focus_minutes, 45);
        assert_eq!(config.focus.short_break_minutes, 5);
        assert!(config.focus.bell);
        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "focus: [not, a, map]").unwrap();

        assert!(matches!(
            Config::load_from_path(&config_path),
            Err(StudyError::Config(_))
        ));
    }
}
