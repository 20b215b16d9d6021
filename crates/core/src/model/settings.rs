use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("site name must not be empty")]
    EmptySiteName,

    #[error("unknown backup frequency: {0}")]
    InvalidBackupFrequency(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl BackupFrequency {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BackupFrequency::Daily => "daily",
            BackupFrequency::Weekly => "weekly",
            BackupFrequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for BackupFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackupFrequency {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(BackupFrequency::Daily),
            "weekly" => Ok(BackupFrequency::Weekly),
            "monthly" => Ok(BackupFrequency::Monthly),
            other => Err(SettingsError::InvalidBackupFrequency(other.to_string())),
        }
    }
}

/// Site-wide settings, persisted as a single record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSettings {
    pub site_name: String,
    pub maintenance_mode: bool,
    pub registration_enabled: bool,
    pub email_notifications: bool,
    pub max_users_per_day: u32,
    pub session_timeout_minutes: u32,
    pub backup_frequency: BackupFrequency,
}

impl SystemSettings {
    /// Check invariants before persisting.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` on an empty site name.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.site_name.trim().is_empty() {
            return Err(SettingsError::EmptySiteName);
        }
        Ok(())
    }
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            site_name: "AyurVeda Wellness".into(),
            maintenance_mode: false,
            registration_enabled: true,
            email_notifications: true,
            max_users_per_day: 100,
            session_timeout_minutes: 30,
            backup_frequency: BackupFrequency::Daily,
        }
    }
}
