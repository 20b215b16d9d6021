use std::sync::Arc;

use prakriti_core::model::SystemSettings;
use storage::repository::SettingsRepository;

use crate::error::SettingsServiceError;

/// Loads and saves the single site-wide settings record.
#[derive(Clone)]
pub struct SettingsService {
    settings: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    #[must_use]
    pub fn new(settings: Arc<dyn SettingsRepository>) -> Self {
        Self { settings }
    }

    /// Current settings, falling back to defaults when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError::Storage` on repository failures.
    pub async fn load(&self) -> Result<SystemSettings, SettingsServiceError> {
        let settings = self.settings.get_settings().await?.unwrap_or_default();
        Ok(settings)
    }

    /// Validate and persist new settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError::Settings` if validation fails; the
    /// stored record is untouched in that case.
    pub async fn save(&self, settings: &SystemSettings) -> Result<(), SettingsServiceError> {
        settings.validate()?;
        self.settings.save_settings(settings).await?;
        Ok(())
    }
}
