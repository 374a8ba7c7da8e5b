use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_dirs::AppDirs;
use crate::error::{ConfigError, PersistenceError};
use crate::i18n::Language;

pub const MIN_DIGITS: u8 = 1;
pub const MAX_DIGITS: u8 = 9;
pub const MIN_DISPLAY_SECS: f64 = 0.1;
pub const MAX_DISPLAY_SECS: f64 = 5.0;

/// Optional special ranges. Any active flag replaces the standard
/// digit-count pool instead of adding to it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NumberRanges {
    pub range_10_19: bool,
    pub round_10_90: bool,
    pub round_100_900: bool,
}

impl NumberRanges {
    pub fn any(&self) -> bool {
        self.range_10_19 || self.round_10_90 || self.round_100_900
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub digit_count: u8,
    pub display_time_secs: f64,
    pub total_examples: u32,
    pub series_count: u32,
    pub number_ranges: NumberRanges,
    pub language: Language,
    pub sound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            digit_count: 3,
            display_time_secs: 1.0,
            total_examples: 10,
            series_count: 1,
            number_ranges: NumberRanges::default(),
            language: Language::default(),
            sound: true,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&self.digit_count) {
            return Err(ConfigError::DigitCount(self.digit_count));
        }
        if !(MIN_DISPLAY_SECS..=MAX_DISPLAY_SECS).contains(&self.display_time_secs) {
            return Err(ConfigError::DisplayTime(self.display_time_secs));
        }
        if self.total_examples == 0 {
            return Err(ConfigError::TotalExamples);
        }
        if self.series_count == 0 {
            return Err(ConfigError::SeriesCount);
        }
        Ok(())
    }

    pub fn is_series(&self) -> bool {
        self.series_count > 1
    }

    pub fn display_time(&self) -> Duration {
        Duration::from_secs_f64(self.display_time_secs.max(0.0))
    }
}

pub trait SettingsStore {
    fn load(&self) -> Option<Settings>;
    fn save(&self, settings: &Settings) -> Result<(), PersistenceError>;
}

#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::settings_path().unwrap_or_else(|| PathBuf::from("abacus_flash.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileSettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Option<Settings> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!("no stored settings at {}: {e}", self.path.display());
                return None;
            }
        };
        let settings = match serde_json::from_slice::<Settings>(&bytes) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("ignoring unreadable settings {}: {e}", self.path.display());
                return None;
            }
        };
        match settings.validate() {
            Ok(()) => Some(settings),
            Err(e) => {
                tracing::warn!("ignoring stored settings: {e}");
                None
            }
        }
    }

    fn save(&self, settings: &Settings) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(settings)?;
        fs::write(&self.path, data)?;
        tracing::debug!("settings saved to {}", self.path.display());
        Ok(())
    }
}
