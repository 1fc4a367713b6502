use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{ContributionSetting, ContributionType};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write settings file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("invalid contribution rate: must be a non-negative number")]
    NegativeRate,
    #[error("percentage cannot exceed 100%")]
    PercentageOverflow,
}

/// On-disk shape of the saved election, matching the historical
/// `data.json` format.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSettings {
    pub contribution_type: ContributionType,
    pub contribution_rate: f64,
    pub last_updated: DateTime<Utc>,
}

impl StoredSettings {
    pub fn setting(&self) -> ContributionSetting {
        ContributionSetting::new(self.contribution_type, self.contribution_rate)
    }
}

impl Default for StoredSettings {
    fn default() -> Self {
        let setting = ContributionSetting::default();
        Self {
            contribution_type: setting.kind,
            contribution_rate: setting.rate,
            last_updated: Utc::now(),
        }
    }
}

/// A one-key JSON settings file. Reads degrade to defaults; only writes can
/// fail loudly.
#[derive(Clone, Debug)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved election. A missing, unreadable or corrupt file is not
    /// an error; the defaults come back instead.
    pub fn load(&self) -> StoredSettings {
        match fs::read_to_string(&self.path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!(
                        "corrupt settings file {}, falling back to defaults: {e}",
                        self.path.display()
                    );
                    StoredSettings::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => StoredSettings::default(),
            Err(e) => {
                log::warn!(
                    "unreadable settings file {}, falling back to defaults: {e}",
                    self.path.display()
                );
                StoredSettings::default()
            }
        }
    }

    /// Validate and persist an election, stamping the update time.
    pub fn save(&self, setting: ContributionSetting) -> Result<StoredSettings, StoreError> {
        if !setting.rate.is_finite() || setting.rate < 0.0 {
            return Err(StoreError::NegativeRate);
        }
        if setting.kind == ContributionType::Percentage && setting.rate > 100.0 {
            return Err(StoreError::PercentageOverflow);
        }

        let settings = StoredSettings {
            contribution_type: setting.kind,
            contribution_rate: setting.rate,
            last_updated: Utc::now(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&settings)?)?;
        log::info!(
            "saved contribution settings to {}: {:?} at {}",
            self.path.display(),
            settings.contribution_type,
            settings.contribution_rate
        );
        Ok(settings)
    }
}
