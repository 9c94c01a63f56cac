//! Runtime configuration
//!
//! Paths come from environment variables with sensible fallbacks. Launcher
//! behaviour (player name, delays, toast timing, ambience) comes from an
//! optional YAML settings file; every field has a default so a partial file
//! or no file at all is fine.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Temp directory for the log file. Override with `CRAFTLAUNCH_TMP_DIR`.
pub fn tmp_dir() -> PathBuf {
    std::env::var("CRAFTLAUNCH_TMP_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

/// Path to the log file.
pub fn log_file() -> PathBuf {
    tmp_dir().join("craftlaunch.log")
}

/// Settings file. Override with `CRAFTLAUNCH_CONFIG`.
pub fn settings_file() -> PathBuf {
    if let Ok(path) = std::env::var("CRAFTLAUNCH_CONFIG") {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("craftlaunch")
        .join("launcher.yaml")
}

/// Launcher settings
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LauncherSettings {
    /// Name shown on the login control once logged in
    pub player_name: String,
    /// Version shown in the status bar
    pub version: String,
    /// Accent colour override, `#rrggbb`
    pub accent: Option<String>,
    pub timings: Timings,
    pub toasts: ToastTimings,
    pub ambience: AmbienceSettings,
    pub feeds: FeedSettings,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            player_name: "Player123".to_string(),
            version: "v1.2.3".to_string(),
            accent: None,
            timings: Timings::default(),
            toasts: ToastTimings::default(),
            ambience: AmbienceSettings::default(),
            feeds: FeedSettings::default(),
        }
    }
}

impl LauncherSettings {
    /// Load from the default settings location
    pub fn load() -> Result<Self> {
        Self::load_from(&settings_file())
    }

    /// Load from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing settings file {}", path.display()))
    }

    /// Parse a YAML document; missing fields take defaults
    pub fn parse(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a defaulted struct
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Login and launch sequence delays
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Timings {
    pub login_delay_ms: u64,
    /// Time spent "checking game files"
    pub check_files_ms: u64,
    /// Time from launching to running
    pub launch_ms: u64,
    /// How long a simulated game session lasts
    pub session_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            login_delay_ms: 1500,
            check_files_ms: 1000,
            launch_ms: 1000,
            session_ms: 10_000,
        }
    }
}

impl Timings {
    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }

    pub fn check_files(&self) -> Duration {
        Duration::from_millis(self.check_files_ms)
    }

    pub fn launch(&self) -> Duration {
        Duration::from_millis(self.launch_ms)
    }

    pub fn session(&self) -> Duration {
        Duration::from_millis(self.session_ms)
    }
}

/// Toast lifecycle timing
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToastTimings {
    pub display_delay_ms: u64,
    pub fade_in_ms: u64,
    /// Measured from creation
    pub dwell_ms: u64,
    pub fade_out_ms: u64,
}

impl Default for ToastTimings {
    fn default() -> Self {
        Self {
            display_delay_ms: 100,
            fade_in_ms: 300,
            dwell_ms: 3000,
            fade_out_ms: 300,
        }
    }
}

impl ToastTimings {
    pub fn display_delay(&self) -> Duration {
        Duration::from_millis(self.display_delay_ms)
    }

    pub fn fade_in(&self) -> Duration {
        Duration::from_millis(self.fade_in_ms)
    }

    pub fn dwell(&self) -> Duration {
        Duration::from_millis(self.dwell_ms)
    }

    pub fn fade_out(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AmbienceSettings {
    pub block_count: usize,
    pub particle_batch: usize,
    pub particle_interval_ms: u64,
    pub particle_lifetime_ms: u64,
}

impl Default for AmbienceSettings {
    fn default() -> Self {
        Self {
            block_count: 5,
            particle_batch: 3,
            particle_interval_ms: 3000,
            particle_lifetime_ms: 8000,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedSettings {
    /// Maximum entries kept per feed
    pub capacity: usize,
    pub announcement_delay_ms: u64,
    pub update_delay_ms: u64,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            capacity: 8,
            announcement_delay_ms: 2000,
            update_delay_ms: 5000,
        }
    }
}
