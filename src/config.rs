use crate::error::{Result, SimError};
use log::{info, warn, LevelFilter};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub robot: RobotConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct GridConfig {
    #[serde(default = "default_rows")]
    pub rows: i32,
    #[serde(default = "default_cols")]
    pub cols: i32,
    #[serde(default = "default_barrier_probability")]
    pub barrier_probability: f64,
    /// Seed for reproducible random grids
    #[serde(default)]
    pub seed: Option<u64>,
    /// Interior matrix text file; takes precedence over random generation
    #[serde(default)]
    pub file: Option<String>,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct RobotConfig {
    #[serde(default = "default_radius")]
    pub radius: i32,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_movement_log_path")]
    pub movement_log_path: String,
    #[serde(default = "default_level")]
    pub level: String,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct DisplayConfig {
    #[serde(default = "default_color")]
    pub color: bool,
}

// Default values
fn default_rows() -> i32 { 10 }
fn default_cols() -> i32 { 10 }
fn default_barrier_probability() -> f64 { 0.2 }
fn default_radius() -> i32 { 3 }
fn default_movement_log_path() -> String { "./robot_path.json".to_string() }
fn default_level() -> String { "info".to_string() }
fn default_color() -> bool { true }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            barrier_probability: default_barrier_probability(),
            seed: None,
            file: None,
        }
    }
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            movement_log_path: default_movement_log_path(),
            level: default_level(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration from `config.toml` in the working directory
    pub fn load() -> Self {
        Self::load_or_default(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from file, or use defaults if it is missing or malformed
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let (config, source) = Self::read(path);
        source.log(path);
        config
    }

    /// Like [`Config::load_or_default`] but without logging, so the caller can
    /// report the outcome once a logger is installed
    pub fn read<P: AsRef<Path>>(path: P) -> (Self, ConfigSource) {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return (Config::default(), ConfigSource::Missing)
            }
            Err(e) => return (Config::default(), ConfigSource::Invalid(e.into())),
        };

        match Self::from_toml(&contents) {
            Ok(config) => (config, ConfigSource::File),
            Err(e) => (Config::default(), ConfigSource::Invalid(e)),
        }
    }

    /// Configured log level, `None` when the value is not a level name
    pub fn log_level(&self) -> Option<LevelFilter> {
        self.logging.level.parse().ok()
    }
}

/// Where a loaded configuration came from
#[derive(Debug)]
pub enum ConfigSource {
    File,
    Missing,
    /// Unreadable or malformed file; defaults were used
    Invalid(SimError),
}

impl ConfigSource {
    pub fn log(&self, path: &Path) {
        match self {
            ConfigSource::File => info!("Loaded configuration from {}", path.display()),
            ConfigSource::Missing => {
                info!("No {} found, using default configuration", path.display())
            }
            ConfigSource::Invalid(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
                warn!("Using default configuration");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml(
            r#"
            [grid]
            rows = 4
            seed = 99

            [robot]
            radius = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.grid.rows, 4);
        assert_eq!(config.grid.cols, 10);
        assert_eq!(config.grid.seed, Some(99));
        assert_eq!(config.robot.radius, 2);
        assert_eq!(config.logging.movement_log_path, "./robot_path.json");
        assert!(config.display.color);
    }

    #[test]
    fn test_malformed_config() {
        assert!(matches!(Config::from_toml("[grid]\nrows = \"many\""), Err(SimError::Config(_))));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("gridbot-config-that-does-not-exist.toml");
        assert_eq!(Config::load_or_default(path), Config::default());
    }

    #[test]
    fn test_read_reports_source() {
        let path = std::env::temp_dir()
            .join(format!("gridbot-config-{}.toml", std::process::id()));

        fs::write(&path, "[robot]\nradius = 5\n").unwrap();
        let (config, source) = Config::read(&path);
        assert!(matches!(source, ConfigSource::File));
        assert_eq!(config.robot.radius, 5);

        fs::write(&path, "[robot]\nradius = \"far\"\n").unwrap();
        let (config, source) = Config::read(&path);
        assert!(matches!(source, ConfigSource::Invalid(SimError::Config(_))));
        assert_eq!(config, Config::default());

        fs::remove_file(&path).ok();
        assert!(matches!(Config::read(&path).1, ConfigSource::Missing));
    }

    #[test]
    fn test_log_level() {
        let mut config = Config::default();
        assert_eq!(config.log_level(), Some(LevelFilter::Info));

        config.logging.level = "DEBUG".to_string();
        assert_eq!(config.log_level(), Some(LevelFilter::Debug));

        config.logging.level = "chatty".to_string();
        assert_eq!(config.log_level(), None);
    }
}
