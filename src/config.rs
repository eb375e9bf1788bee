//! Configuration file handling for sunspot-levels.
//!
//! Loads configuration from `<config_dir>/sunspot-levels/config.toml` or a
//! custom path.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::overlay::{OverlayStyle, DEFAULT_HIGHLIGHT, DEFAULT_LABEL_OFFSET, DEFAULT_NEUTRAL};
use crate::tone::{LevelParams, GAMMA_MAX, GAMMA_MIN};

/// Configuration file structure.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    /// Initial tone parameters
    #[serde(default)]
    pub levels: LevelParams,
    #[serde(default)]
    pub overlay: OverlayConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OverlayConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_highlight")]
    pub highlight: [u8; 3],
    #[serde(default = "default_neutral")]
    pub neutral: [u8; 3],
    #[serde(default = "default_label_offset")]
    pub label_offset: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            highlight: DEFAULT_HIGHLIGHT,
            neutral: DEFAULT_NEUTRAL,
            label_offset: DEFAULT_LABEL_OFFSET,
        }
    }
}

impl OverlayConfig {
    pub fn style(&self) -> OverlayStyle {
        OverlayStyle {
            highlight: self.highlight,
            neutral: self.neutral,
            label_offset: self.label_offset,
            ..OverlayStyle::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct ExportConfig {
    /// Where exports without an explicit path go; the working directory if unset
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl ExportConfig {
    pub fn directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

fn default_true() -> bool {
    true
}

fn default_highlight() -> [u8; 3] {
    DEFAULT_HIGHLIGHT
}

fn default_neutral() -> [u8; 3] {
    DEFAULT_NEUTRAL
}

fn default_label_offset() -> f32 {
    DEFAULT_LABEL_OFFSET
}

/// Commented starting point written by `config init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# sunspot-levels configuration

[levels]
# Input intensity mapped to pure black (0-255)
black = 0
# Input intensity mapped to pure white (0-255)
white = 255
# Midtone curve exponent (0.1-5.0); above 1 brightens
gamma = 1.0

[overlay]
# Draw the compass and latitude/longitude grid
enabled = true
highlight = [255, 215, 0]
neutral = [160, 160, 160]
# Distance in pixels from the disk edge to the N/E/S/W letters
label_offset = 20.0

[export]
# Directory for timestamped exports (defaults to the working directory)
# directory = "/path/to/exports"
"#;

impl Config {
    /// Load configuration from a file path.
    ///
    /// With no path, the default location is used and a missing file yields
    /// the defaults. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (default_path(), false),
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigError::NotFound { path });
            }
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        config.validate(&path)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let gamma = self.levels.gamma;
        if !(GAMMA_MIN..=GAMMA_MAX).contains(&gamma) {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                reason: format!(
                    "levels.gamma must be between {} and {}, got {}",
                    GAMMA_MIN, GAMMA_MAX, gamma
                ),
            });
        }
        if !self.overlay.label_offset.is_finite() {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                reason: "overlay.label_offset must be a finite number".to_string(),
            });
        }
        Ok(())
    }

    /// Effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }
}

/// Write [`DEFAULT_CONFIG_TEMPLATE`] to `path` (or the default location),
/// creating parent directories. Refuses to overwrite an existing file.
pub fn write_default(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let path = path.map(PathBuf::from).unwrap_or_else(default_path);
    if path.exists() {
        return Err(ConfigError::AlreadyExists { path });
    }
    let io_err = |source| ConfigError::Io {
        path: path.clone(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(&path, DEFAULT_CONFIG_TEMPLATE).map_err(io_err)?;
    Ok(path)
}

/// Errors that can occur when loading or writing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file '{}' not found", path.display())]
    NotFound { path: PathBuf },

    #[error("Config file '{}' already exists", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("Failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid config file '{}': {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sunspot-levels")
        .join("config.toml")
}
