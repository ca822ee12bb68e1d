use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "IPTVREC_CONFIG";

/// Top-level `config.toml` schema.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub clock: ClockConfig,
    pub fields: FieldsConfig,
}

/// Window chrome text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub title: String,
    pub header: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "IPTV Stream download".into(),
            header: "Time".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockModeConfig {
    #[default]
    Clock,
    Countdown,
}

/// Clock label behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockConfig {
    pub mode: ClockModeConfig,
    /// Only read in countdown mode.
    pub threshold_seconds: u64,
    pub stopped_label: String,
    pub finished_label: String,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            mode: ClockModeConfig::Clock,
            threshold_seconds: 8100,
            stopped_label: "Stopped".into(),
            finished_label: "Timer Finished".into(),
        }
    }
}

/// Placeholder text for the entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldsConfig {
    pub username: String,
    pub password: String,
    pub url: String,
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            username: "Username".into(),
            password: "Password".into(),
            url: "URL".into(),
        }
    }
}

impl AppConfig {
    /// Parse and validate config TOML.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input).context("failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;

        Self::from_toml_str(&raw).with_context(|| format!("invalid config at {}", path.display()))
    }

    /// Resolve and load the active configuration.
    ///
    /// `IPTVREC_CONFIG` must point at a readable file when set. Otherwise the
    /// platform default path is used if present, and built-in defaults if not.
    pub fn load() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            let path = PathBuf::from(path);
            tracing::info!(path = %path.display(), "loading config from {}", CONFIG_ENV);
            return Self::from_path(&path);
        }

        match default_path() {
            Some(path) if path.is_file() => {
                tracing::info!(path = %path.display(), "loading config");
                Self::from_path(&path)
            }
            _ => {
                tracing::debug!("no config file found; using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Validate semantic constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        validate_nonempty("window.title", &self.window.title)?;
        validate_nonempty("clock.stopped_label", &self.clock.stopped_label)?;
        validate_nonempty("clock.finished_label", &self.clock.finished_label)?;
        validate_nonempty("fields.username", &self.fields.username)?;
        validate_nonempty("fields.password", &self.fields.password)?;
        validate_nonempty("fields.url", &self.fields.url)?;

        if self.clock.mode == ClockModeConfig::Countdown && self.clock.threshold_seconds == 0 {
            bail!("clock.threshold_seconds must be greater than zero in countdown mode");
        }

        Ok(())
    }
}

/// `<config dir>/iptvrec/config.toml`, when the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("iptvrec").join("config.toml"))
}

fn validate_nonempty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        bail!("{field} must not be empty")
    }
    Ok(())
}
