use std::str::FromStr;

use async_trait::async_trait;
use prakriti_core::model::{BackupFrequency, SystemSettings};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::ser;
use crate::repository::{SettingsRepository, StorageError};

#[async_trait]
impl SettingsRepository for SqliteRepository {
    async fn get_settings(&self) -> Result<Option<SystemSettings>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT
                site_name,
                maintenance_mode,
                registration_enabled,
                email_notifications,
                max_users_per_day,
                session_timeout_minutes,
                backup_frequency
            FROM system_settings
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let flag = |name: &str| -> Result<bool, StorageError> {
            Ok(row.try_get::<i64, _>(name).map_err(ser)? != 0)
        };
        let count = |name: &str| -> Result<u32, StorageError> {
            u32::try_from(row.try_get::<i64, _>(name).map_err(ser)?)
                .map_err(|_| StorageError::Serialization(format!("{name} overflow")))
        };

        Ok(Some(SystemSettings {
            site_name: row.try_get("site_name").map_err(ser)?,
            maintenance_mode: flag("maintenance_mode")?,
            registration_enabled: flag("registration_enabled")?,
            email_notifications: flag("email_notifications")?,
            max_users_per_day: count("max_users_per_day")?,
            session_timeout_minutes: count("session_timeout_minutes")?,
            backup_frequency: BackupFrequency::from_str(
                &row.try_get::<String, _>("backup_frequency").map_err(ser)?,
            )
            .map_err(ser)?,
        }))
    }

    async fn save_settings(&self, settings: &SystemSettings) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO system_settings (
                id,
                site_name,
                maintenance_mode,
                registration_enabled,
                email_notifications,
                max_users_per_day,
                session_timeout_minutes,
                backup_frequency
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(id) DO UPDATE SET
                site_name = excluded.site_name,
                maintenance_mode = excluded.maintenance_mode,
                registration_enabled = excluded.registration_enabled,
                email_notifications = excluded.email_notifications,
                max_users_per_day = excluded.max_users_per_day,
                session_timeout_minutes = excluded.session_timeout_minutes,
                backup_frequency = excluded.backup_frequency
            ",
        )
        .bind(1_i64)
        .bind(&settings.site_name)
        .bind(i64::from(settings.maintenance_mode))
        .bind(i64::from(settings.registration_enabled))
        .bind(i64::from(settings.email_notifications))
        .bind(i64::from(settings.max_users_per_day))
        .bind(i64::from(settings.session_timeout_minutes))
        .bind(settings.backup_frequency.as_str())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
