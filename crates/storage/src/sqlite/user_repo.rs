use prakriti_core::model::{User, UserId, UserUpdate};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::SqliteRepository;
use super::mapping::{gender_from_str, ser, user_id_from_i64, user_id_to_i64};
use crate::repository::{CredentialedUser, NewUserRecord, StorageError, UserRepository};

#[async_trait::async_trait]
impl UserRepository for SqliteRepository {
    async fn insert_new_user(&self, record: NewUserRecord) -> Result<UserId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO users (name, email, credential_hash, age, gender, occupation, location, joined_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ",
        )
        .bind(record.name)
        .bind(record.email)
        .bind(record.credential_hash)
        .bind(i64::from(record.age))
        .bind(record.gender.as_str())
        .bind(record.occupation)
        .bind(record.location)
        .bind(record.joined_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => StorageError::Conflict,
            _ => StorageError::Connection(e.to_string()),
        })?;

        user_id_from_i64(res.last_insert_rowid())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, name, email, age, gender, occupation, location, joined_at
            FROM users WHERE id = ?1
            ",
        )
        .bind(user_id_to_i64(id)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row {
            Some(row) => user_from_row(&row).map(Some),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<CredentialedUser>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, name, email, credential_hash, age, gender, occupation, location, joined_at
            FROM users WHERE email = ?1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row {
            Some(row) => {
                let credential_hash: String = row.try_get("credential_hash").map_err(ser)?;
                Ok(Some(CredentialedUser {
                    user: user_from_row(&row)?,
                    credential_hash,
                }))
            }
            None => Ok(None),
        }
    }

    async fn update_user(&self, id: UserId, update: &UserUpdate) -> Result<User, StorageError> {
        let mut user = self.get_user(id).await?.ok_or(StorageError::NotFound)?;
        user.apply_update(update)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        sqlx::query(
            r"
            UPDATE users
            SET name = ?2, age = ?3, gender = ?4, occupation = ?5, location = ?6
            WHERE id = ?1
            ",
        )
        .bind(user_id_to_i64(id)?)
        .bind(user.name())
        .bind(i64::from(user.age()))
        .bind(user.gender().as_str())
        .bind(user.occupation())
        .bind(user.location())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(user)
    }

    async fn list_users(&self, limit: u32) -> Result<Vec<User>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, name, email, age, gender, occupation, location, joined_at
            FROM users
            ORDER BY id ASC
            LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut users = Vec::with_capacity(rows.len());
        for row in rows {
            users.push(user_from_row(&row)?);
        }
        Ok(users)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), StorageError> {
        // assessment_results and follow_ups cascade via foreign keys.
        let res = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(user_id_to_i64(id)?)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}

fn user_from_row(row: &SqliteRow) -> Result<User, StorageError> {
    let age = u32::try_from(row.try_get::<i64, _>("age").map_err(ser)?)
        .map_err(|_| StorageError::Serialization("age overflow".into()))?;
    let gender = gender_from_str(&row.try_get::<String, _>("gender").map_err(ser)?)?;

    User::from_persisted(
        user_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        row.try_get::<String, _>("name").map_err(ser)?,
        row.try_get::<String, _>("email").map_err(ser)?,
        age,
        gender,
        row.try_get::<String, _>("occupation").map_err(ser)?,
        row.try_get::<String, _>("location").map_err(ser)?,
        row.try_get("joined_at").map_err(ser)?,
    )
    .map_err(|e| StorageError::Serialization(e.to_string()))
}
