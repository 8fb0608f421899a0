use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{warn, Level};

use heatwatch_energy::{
    EnergyConfig, Lookback, DEFAULT_MAX_STRIDE, DEFAULT_NOISE_FLOOR, DEFAULT_TIMEZONE,
};

use crate::data::TableLayout;

const APP_DIR: &str = "heatwatch";
const MIN_REFRESH_SECS: u64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "off" | "none" => LogLevel::Off,
            "error" => LogLevel::Error,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            "trace" => LogLevel::Trace,
            _ => LogLevel::Warn,
        }
    }

    pub fn as_tracing_level(&self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

/// Energy math tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergySettings {
    /// Raw CT units below which the channel counts as idle.
    pub noise_floor: f64,
    pub max_stride: usize,
    /// Price per kWh before surcharges.
    pub base_rate: f64,
    /// Flat per-kWh surcharge (energy efficiency charge).
    pub surcharge: f64,
}

impl Default for EnergySettings {
    fn default() -> Self {
        Self {
            noise_floor: DEFAULT_NOISE_FLOOR,
            max_stride: DEFAULT_MAX_STRIDE,
            base_rate: 0.18,
            surcharge: 0.01,
        }
    }
}

impl EnergySettings {
    pub fn cost_per_kwh(&self) -> f64 {
        self.base_rate + self.surcharge
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub database: PathBuf,
    pub table: String,
    pub timestamp_column: String,
    pub channel: String,
    pub refresh_secs: u64,
    pub default_days: u32,
    pub timezone: String,
    pub log_level: LogLevel,
    pub energy: EnergySettings,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("/ctdata/heatpumpctdata.sqlite"),
            table: "housectdata".to_string(),
            timestamp_column: "DateTime".to_string(),
            channel: "ct3".to_string(),
            refresh_secs: 60,
            default_days: 1,
            timezone: DEFAULT_TIMEZONE.name().to_string(),
            log_level: LogLevel::default(),
            energy: EnergySettings::default(),
        }
    }
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join(APP_DIR)
}

pub fn runtime_dir() -> PathBuf {
    dirs::runtime_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(APP_DIR)
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

pub fn ensure_dirs() -> std::io::Result<()> {
    fs::create_dir_all(config_dir())?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl UserConfig {
    /// Loads the user config. A broken file yields defaults plus the error,
    /// so the caller can report it once logging is up.
    pub fn load() -> (Self, Option<ConfigError>) {
        match Self::try_load_from(&config_path()) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Reads `path`. A missing file means defaults; a file that exists and
    /// cannot be read or parsed is an error.
    pub fn try_load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self) -> std::io::Result<()> {
        let _ = ensure_dirs();
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        fs::write(path, content)
    }

    /// Applies command line overrides for this session only.
    pub fn merge_with_args(
        &mut self,
        days: Option<u32>,
        refresh_secs: Option<u64>,
        database: Option<PathBuf>,
    ) {
        if let Some(days) = days {
            self.default_days = days;
        }
        if let Some(secs) = refresh_secs {
            self.refresh_secs = secs;
        }
        if let Some(path) = database {
            self.database = path;
        }
    }

    pub fn lookback(&self) -> Lookback {
        Lookback::clamped(self.default_days)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.max(MIN_REFRESH_SECS))
    }

    /// Display time zone, or US Eastern when the configured name is unknown.
    pub fn timezone(&self) -> Tz {
        self.timezone.parse::<Tz>().unwrap_or_else(|_| {
            warn!(timezone = %self.timezone, "Unknown time zone, using {}", DEFAULT_TIMEZONE.name());
            DEFAULT_TIMEZONE
        })
    }

    pub fn energy_config(&self) -> EnergyConfig {
        EnergyConfig {
            noise_floor: self.energy.noise_floor,
            max_stride: self.energy.max_stride,
            cost_per_kwh: self.energy.cost_per_kwh(),
            timezone: self.timezone(),
        }
    }

    pub fn table_layout(&self) -> TableLayout {
        TableLayout {
            table: self.table.clone(),
            timestamp_column: self.timestamp_column.clone(),
            channel: self.channel.clone(),
        }
    }
}
