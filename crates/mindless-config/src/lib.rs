//! Configuration for the mindless splash.
//!
//! Settings live in `config.toml` under the platform config directory
//! (`~/.config/mindless/` on Linux). Every key is optional; a missing file
//! means defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use mindless_core::{CellMetrics, DeviceClass, Viewport};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Caption typed out below the wordmark.
pub const DEFAULT_CAPTION: &str = "COMING SOON";
/// Primary part of the wordmark, drawn in white.
pub const DEFAULT_WORDMARK: &str = "MINDLESS";
/// Accent suffix of the wordmark, drawn in blue.
pub const DEFAULT_WORDMARK_ACCENT: &str = ".PR";

/// Errors raised while loading or saving the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// How the device class is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceSetting {
    /// Classify from the viewport width at mount.
    #[default]
    Auto,
    Desktop,
    Mobile,
}

impl DeviceSetting {
    /// Resolve to a concrete device class for `viewport`.
    pub fn resolve(self, viewport: Viewport) -> DeviceClass {
        match self {
            DeviceSetting::Auto => DeviceClass::detect(viewport),
            DeviceSetting::Desktop => DeviceClass::Desktop,
            DeviceSetting::Mobile => DeviceClass::Mobile,
        }
    }
}

/// Typewriter timing in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    pub type_ms: u64,
    pub delete_ms: u64,
    pub pause_after_type_ms: u64,
    pub pause_after_delete_ms: u64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            type_ms: 100,
            delete_ms: 50,
            pause_after_type_ms: 2000,
            pause_after_delete_ms: 500,
        }
    }
}

impl TypewriterConfig {
    pub fn type_interval(&self) -> Duration {
        Duration::from_millis(self.type_ms)
    }

    pub fn delete_interval(&self) -> Duration {
        Duration::from_millis(self.delete_ms)
    }

    pub fn pause_after_type(&self) -> Duration {
        Duration::from_millis(self.pause_after_type_ms)
    }

    pub fn pause_after_delete(&self) -> Duration {
        Duration::from_millis(self.pause_after_delete_ms)
    }
}

/// Which optional overlay layers are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayersConfig {
    pub grain: bool,
    #[serde(rename = "static")]
    pub static_noise: bool,
    pub scanlines: bool,
}

impl Default for LayersConfig {
    fn default() -> Self {
        Self {
            grain: true,
            static_noise: true,
            scanlines: true,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Caption cycled by the typewriter.
    pub caption: String,
    /// Wordmark text drawn in white.
    pub wordmark: String,
    /// Wordmark suffix drawn in the accent color.
    pub wordmark_accent: String,
    /// Optional logo image shown above the wordmark.
    pub logo: Option<PathBuf>,
    /// Device class selection.
    pub device: DeviceSetting,
    /// Pixel width of one terminal cell.
    pub cell_width: u16,
    /// Pixel height of one terminal cell.
    pub cell_height: u16,
    /// Leave the splash automatically after this many seconds.
    pub dismiss_after_secs: Option<f64>,
    /// Write tracing output to this file.
    pub log_file: Option<PathBuf>,
    pub typewriter: TypewriterConfig,
    pub layers: LayersConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            caption: DEFAULT_CAPTION.to_string(),
            wordmark: DEFAULT_WORDMARK.to_string(),
            wordmark_accent: DEFAULT_WORDMARK_ACCENT.to_string(),
            logo: None,
            device: DeviceSetting::Auto,
            cell_width: 8,
            cell_height: 16,
            dismiss_after_secs: None,
            log_file: None,
            typewriter: TypewriterConfig::default(),
            layers: LayersConfig::default(),
        }
    }
}

impl Config {
    /// Path of the default config file, if a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("pr", "mindless", "mindless")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load the default config file, falling back to defaults if it is absent.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                tracing::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, self.to_toml()?).map_err(io_err)
    }

    /// Cell metrics used to map effect pixels onto the terminal grid.
    pub fn cell_metrics(&self) -> CellMetrics {
        CellMetrics::new(self.cell_width, self.cell_height)
    }

    /// Auto-dismiss delay, ignoring non-positive values and values too large
    /// for a `Duration`.
    pub fn dismiss_after(&self) -> Option<Duration> {
        self.dismiss_after_secs
            .filter(|secs| *secs > 0.0)
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.caption, "COMING SOON");
        assert_eq!(config.typewriter.type_ms, 100);
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config = Config::parse(
            r#"
            caption = "SOON"
            device = "mobile"

            [typewriter]
            delete_ms = 25

            [layers]
            static = false
            "#,
        )
        .unwrap();

        assert_eq!(config.caption, "SOON");
        assert_eq!(config.device, DeviceSetting::Mobile);
        assert_eq!(config.typewriter.delete_ms, 25);
        assert_eq!(config.typewriter.pause_after_type_ms, 2000);
        assert!(!config.layers.static_noise);
        assert!(config.layers.grain);
    }

    #[test]
    fn unknown_device_is_rejected() {
        assert!(Config::parse(r#"device = "tablet""#).is_err());
    }

    #[test]
    fn device_is_written_as_a_lowercase_setting() {
        let config = Config {
            device: DeviceSetting::Mobile,
            ..Config::default()
        };
        let text = config.to_toml().unwrap();
        assert!(text.contains(r#"device = "mobile""#), "{text}");
        assert_eq!(Config::parse(&text).unwrap().device, DeviceSetting::Mobile);
    }

    #[test]
    fn save_then_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            caption: "LAUNCHING".into(),
            logo: Some(PathBuf::from("/tmp/logo.webp")),
            dismiss_after_secs: Some(3.5),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "caption = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn device_setting_resolution() {
        let narrow = Viewport::new(640, 384);
        assert_eq!(DeviceSetting::Auto.resolve(narrow), DeviceClass::Mobile);
        assert_eq!(DeviceSetting::Desktop.resolve(narrow), DeviceClass::Desktop);
    }

    #[test]
    fn dismiss_after_filters_bad_values() {
        let mut config = Config::default();
        assert_eq!(config.dismiss_after(), None);
        config.dismiss_after_secs = Some(-1.0);
        assert_eq!(config.dismiss_after(), None);
        config.dismiss_after_secs = Some(2.0);
        assert_eq!(config.dismiss_after(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn huge_or_infinite_dismiss_delay_is_ignored() {
        let config = Config::parse("dismiss_after_secs = 1e20").unwrap();
        assert_eq!(config.dismiss_after(), None);

        let mut config = Config::default();
        config.dismiss_after_secs = Some(f64::INFINITY);
        assert_eq!(config.dismiss_after(), None);
        config.dismiss_after_secs = Some(f64::NAN);
        assert_eq!(config.dismiss_after(), None);
    }
}
