//! Application configuration.
//!
//! Settings are read from a TOML file (every section and key is optional),
//! then `HOST` and `PORT` from the environment override the server section.
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 3000
//!
//! [layout]
//! margin = 15.0
//! row_pitch = 30.0
//!
//! [labels]
//! day_labels = ["Mo", "Di", "Mi", "Do", "Fr", "Sa"]
//! default_class = "HF ET 23F-26F 1. Sem Klasse A"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TimetableError};
use crate::timetable::{LabelConfig, LayoutConfig, PageSize, WeekModel};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "TIMETABLE_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub layout: LayoutConfig,
    pub labels: LabelConfig,
    pub week: WeekModel,
    pub page: PageSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Page size and document title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    pub width_mm: f64,
    pub height_mm: f64,
    pub title: String,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            width_mm: PageSize::A4_LANDSCAPE.width,
            height_mm: PageSize::A4_LANDSCAPE.height,
            title: "Semesterplan".to_string(),
        }
    }
}

impl PageSettings {
    pub fn size(&self) -> PageSize {
        PageSize {
            width: self.width_mm,
            height: self.height_mm,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// `Configuration` if the file cannot be read, parsed, or fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            TimetableError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content).map_err(|e| {
            TimetableError::Configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `timetable.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self> {
        match default_config_path() {
            Some(path) => Self::from_file(path),
            None => Err(TimetableError::Configuration(
                "No timetable.toml found in standard locations".to_string(),
            )),
        }
    }

    /// Resolve the configuration the server starts with.
    ///
    /// `TIMETABLE_CONFIG` wins over the default search; with neither present
    /// the built-in defaults are used. `HOST` and `PORT` are applied last.
    pub fn load() -> Result<Self> {
        let mut config = match env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => match default_config_path() {
                Some(path) => Self::from_file(path)?,
                None => Self::default(),
            },
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Override server settings from `HOST` / `PORT`.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            self.server.port = port.parse().map_err(|_| {
                TimetableError::Configuration(format!("PORT must be a valid port number, got '{}'", port))
            })?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !(1..=7).contains(&self.week.visible_days) {
            return Err(TimetableError::Configuration(format!(
                "week.visible_days must be between 1 and 7, got {}",
                self.week.visible_days
            )));
        }
        if self.page.width_mm <= 2.0 * self.layout.margin || self.page.height_mm <= 0.0 {
            return Err(TimetableError::Configuration(
                "page must be wider than both margins".to_string(),
            ));
        }
        if self.layout.row_height <= 0.0 {
            return Err(TimetableError::Configuration(
                "layout.row_height must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_config_path() -> Option<PathBuf> {
    [
        PathBuf::from("timetable.toml"),
        PathBuf::from("backend/timetable.toml"),
        PathBuf::from("../timetable.toml"),
    ]
    .into_iter()
    .find(|path| path.exists())
}
