use crate::activity::NewActivity;
use crate::error::{ChronosError, Result};
use crate::io;
use crate::paths;
use crate::types::{ClockTime, DayOfWeek};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ServerConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

// ---------------------------------------------------------------------------
// StorageConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite file; relative paths resolve under `.chronos/`.
    #[serde(default = "default_database")]
    pub database: String,
}

fn default_database() -> String {
    paths::DEFAULT_DATABASE.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
        }
    }
}

// ---------------------------------------------------------------------------
// ClockConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Seconds between status recomputation ticks.
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: u64,
}

fn default_tick_seconds() -> u64 {
    30
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_seconds: default_tick_seconds(),
        }
    }
}

// ---------------------------------------------------------------------------
// DraftConfig
// ---------------------------------------------------------------------------

/// Window pre-filled into a fresh activity form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftConfig {
    #[serde(default = "default_draft_start")]
    pub start_time: ClockTime,
    #[serde(default = "default_draft_end")]
    pub end_time: ClockTime,
}

fn default_draft_start() -> ClockTime {
    ClockTime::from_parts(9, 0)
}

fn default_draft_end() -> ClockTime {
    ClockTime::from_parts(10, 0)
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            start_time: default_draft_start(),
            end_time: default_draft_end(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub draft: DraftConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            version: default_version(),
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            clock: ClockConfig::default(),
            draft: DraftConfig::default(),
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(ChronosError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        io::atomic_write(&paths::config_path(root), data.as_bytes())
    }

    /// Create `.chronos/` and a default config unless one exists.
    /// Returns the effective config and whether it was newly written.
    pub fn init(root: &Path) -> Result<(Config, bool)> {
        io::ensure_dir(&paths::chronos_dir(root))?;
        let data = serde_yaml::to_string(&Config::new())?;
        let created = io::write_if_missing(&paths::config_path(root), data.as_bytes())?;
        Ok((Config::load(root)?, created))
    }

    pub fn database_path(&self, root: &Path) -> PathBuf {
        paths::database_path(root, &self.storage.database)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(self.clock.tick_seconds.max(1))
    }

    /// Blank activity form for `day`.
    pub fn draft_for(&self, day: DayOfWeek) -> NewActivity {
        NewActivity::draft(day, self.draft.start_time, self.draft.end_time)
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.storage.database.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "storage.database must not be empty".to_string(),
            });
        }

        if self.clock.tick_seconds == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "clock.tick_seconds must be at least 1".to_string(),
            });
        } else if self.clock.tick_seconds > 60 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "clock.tick_seconds={} refreshes statuses less than once a minute",
                    self.clock.tick_seconds
                ),
            });
        }

        if self.draft.end_time < self.draft.start_time {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "draft window ends ({}) before it starts ({})",
                    self.draft.end_time, self.draft.start_time
                ),
            });
        }

        warnings
    }
}
