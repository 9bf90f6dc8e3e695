//! Data location and grouping settings.
//!
//! Read from an optional TOML file; `TRAFFIC_MAP_DATA_ROOT` overrides the
//! data root.

use std::path::Path;

use serde::Deserialize;
use traffic_map_aggregate::PeakWindow;
use traffic_map_ingest::DataSource;

/// Environment variable that overrides [`AppConfig::data_root`].
pub const DATA_ROOT_ENV: &str = "TRAFFIC_MAP_DATA_ROOT";

/// Errors loading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for [`AppConfig`].
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The peak window is inverted or out of range.
    #[error("Invalid peak window: {start}..={end}")]
    PeakWindow {
        /// Configured first hour.
        start: u32,
        /// Configured last hour.
        end: u32,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory or base URL holding the data files.
    pub data_root: String,
    /// Subdirectory of `data_root` holding lane-count files.
    pub lane_dir: String,
    /// Subdirectory of `data_root` holding supply/demand files.
    pub supply_demand_dir: String,
    /// First hour kept when grouping supply/demand records.
    pub peak_start_hour: u32,
    /// Last hour kept when grouping supply/demand records.
    pub peak_end_hour: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_root: "data".to_string(),
            lane_dir: String::new(),
            supply_demand_dir: "supplydemand".to_string(),
            peak_start_hour: PeakWindow::MORNING.start_hour,
            peak_end_hour: PeakWindow::MORNING.end_hour,
        }
    }
}

impl AppConfig {
    /// Loads the configuration from `path` (defaults if `None`) and applies
    /// the environment override.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or the
    /// peak window is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::parse(&std::fs::read_to_string(path)?)?,
            None => Self::default(),
        };

        if let Ok(root) = std::env::var(DATA_ROOT_ENV) {
            log::debug!("Using data root from {DATA_ROOT_ENV}: {root}");
            config.data_root = root;
        }

        Ok(config)
    }

    /// Parses configuration TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the TOML is malformed or the peak window
    /// is invalid.
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::de::from_str(toml_str)?;
        config.peak_window()?;
        Ok(config)
    }

    /// The configured peak window.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PeakWindow`] if the hours are out of order or
    /// past 23.
    pub fn peak_window(&self) -> Result<PeakWindow, ConfigError> {
        if self.peak_start_hour > self.peak_end_hour || self.peak_end_hour > 23 {
            return Err(ConfigError::PeakWindow {
                start: self.peak_start_hour,
                end: self.peak_end_hour,
            });
        }
        Ok(PeakWindow {
            start_hour: self.peak_start_hour,
            end_hour: self.peak_end_hour,
        })
    }

    /// Resolves a lane-count file argument.
    #[must_use]
    pub fn lane_source(&self, file: &str) -> DataSource {
        self.resolve(&self.lane_dir, file)
    }

    /// Resolves a supply/demand file argument.
    #[must_use]
    pub fn supply_demand_source(&self, file: &str) -> DataSource {
        self.resolve(&self.supply_demand_dir, file)
    }

    /// URLs and absolute paths are used as given; anything else is looked
    /// up under `data_root/dir`.
    fn resolve(&self, dir: &str, file: &str) -> DataSource {
        let direct = DataSource::parse(file);
        let use_as_given = match &direct {
            DataSource::Url(_) => true,
            DataSource::Path(path) => path.is_absolute(),
        };
        if use_as_given {
            return direct;
        }

        let root = DataSource::parse(&self.data_root);
        if dir.is_empty() {
            root.join(file)
        } else {
            root.join(dir).join(file)
        }
    }
}
