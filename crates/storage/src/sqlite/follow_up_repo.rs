use prakriti_core::model::{FollowUp, FollowUpId, Rating, UserId};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::SqliteRepository;
use super::mapping::{
    decode_list, encode_list, follow_up_id_from_i64, follow_up_id_to_i64, ser, user_id_from_i64,
    user_id_to_i64,
};
use crate::repository::{FollowUpRepository, StorageError};

#[async_trait::async_trait]
impl FollowUpRepository for SqliteRepository {
    async fn append_follow_up(&self, follow_up: &FollowUp) -> Result<FollowUpId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO follow_ups
                (user_id, recorded_at, symptoms, improvements, concerns, energy, sleep, digestion, notes)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ",
        )
        .bind(user_id_to_i64(follow_up.user_id())?)
        .bind(follow_up.recorded_at())
        .bind(encode_list(follow_up.symptoms())?)
        .bind(encode_list(follow_up.improvements())?)
        .bind(encode_list(follow_up.concerns())?)
        .bind(i64::from(follow_up.energy().value()))
        .bind(i64::from(follow_up.sleep().value()))
        .bind(i64::from(follow_up.digestion().value()))
        .bind(follow_up.notes())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        follow_up_id_from_i64(res.last_insert_rowid())
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<FollowUp>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, recorded_at, symptoms, improvements, concerns,
                   energy, sleep, digestion, notes
            FROM follow_ups
            WHERE user_id = ?1
            ORDER BY recorded_at DESC
            ",
        )
        .bind(user_id_to_i64(user_id)?)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        rows.iter().map(follow_up_from_row).collect()
    }

    async fn list_all(&self, limit: u32) -> Result<Vec<FollowUp>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, recorded_at, symptoms, improvements, concerns,
                   energy, sleep, digestion, notes
            FROM follow_ups
            ORDER BY recorded_at DESC
            LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        rows.iter().map(follow_up_from_row).collect()
    }

    async fn delete_follow_up(&self, id: FollowUpId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM follow_ups WHERE id = ?1")
            .bind(follow_up_id_to_i64(id)?)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn count_for_user(&self, user_id: UserId) -> Result<u64, StorageError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM follow_ups WHERE user_id = ?1")
            .bind(user_id_to_i64(user_id)?)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let n: i64 = row.try_get("n").map_err(ser)?;
        u64::try_from(n).map_err(|_| StorageError::Serialization("negative count".into()))
    }
}

fn follow_up_from_row(row: &SqliteRow) -> Result<FollowUp, StorageError> {
    let rating = |name: &str| -> Result<Rating, StorageError> {
        let raw = u32::try_from(row.try_get::<i64, _>(name).map_err(ser)?)
            .map_err(|_| StorageError::Serialization(format!("{name} out of range")))?;
        Rating::new(raw).map_err(ser)
    };

    Ok(FollowUp::from_persisted(
        follow_up_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        user_id_from_i64(row.try_get::<i64, _>("user_id").map_err(ser)?)?,
        row.try_get("recorded_at").map_err(ser)?,
        decode_list(&row.try_get::<String, _>("symptoms").map_err(ser)?)?,
        decode_list(&row.try_get::<String, _>("improvements").map_err(ser)?)?,
        decode_list(&row.try_get::<String, _>("concerns").map_err(ser)?)?,
        rating("energy")?,
        rating("sleep")?,
        rating("digestion")?,
        row.try_get::<String, _>("notes").map_err(ser)?,
    ))
}
