use prakriti_core::model::AdminAccount;
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{admin_id_from_i64, ser};
use crate::repository::{AdminRepository, CredentialedAdmin, NewAdminRecord, StorageError};

#[async_trait::async_trait]
impl AdminRepository for SqliteRepository {
    async fn insert_admin(
        &self,
        record: NewAdminRecord,
    ) -> Result<prakriti_core::model::AdminId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO admin_accounts (email, credential_hash, name)
            VALUES (?1, ?2, ?3)
            ",
        )
        .bind(record.email)
        .bind(record.credential_hash)
        .bind(record.name)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => StorageError::Conflict,
            _ => StorageError::Connection(e.to_string()),
        })?;

        admin_id_from_i64(res.last_insert_rowid())
    }

    async fn find_admin_by_email(
        &self,
        email: &str,
    ) -> Result<Option<CredentialedAdmin>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, email, credential_hash, name
            FROM admin_accounts WHERE email = ?1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id = admin_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?;
        let email: String = row.try_get("email").map_err(ser)?;
        let name: String = row.try_get("name").map_err(ser)?;
        let credential_hash: String = row.try_get("credential_hash").map_err(ser)?;

        Ok(Some(CredentialedAdmin {
            admin: AdminAccount::new(id, email, name),
            credential_hash,
        }))
    }

    async fn count_admins(&self) -> Result<u64, StorageError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM admin_accounts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let n: i64 = row.try_get("n").map_err(ser)?;
        u64::try_from(n).map_err(|_| StorageError::Serialization("negative count".into()))
    }
}
