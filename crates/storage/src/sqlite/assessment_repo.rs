use prakriti_core::model::{DoshaResult, UserId};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{dosha_from_str, ser, user_id_to_i64};
use crate::repository::{AssessmentRepository, DoshaCounts, StorageError};

#[async_trait::async_trait]
impl AssessmentRepository for SqliteRepository {
    async fn save_result(
        &self,
        user_id: UserId,
        result: &DoshaResult,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO assessment_results (user_id, vata, pitta, kapha, dominant)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(user_id) DO UPDATE SET
                vata = excluded.vata,
                pitta = excluded.pitta,
                kapha = excluded.kapha,
                dominant = excluded.dominant
            ",
        )
        .bind(user_id_to_i64(user_id)?)
        .bind(i64::from(result.vata))
        .bind(i64::from(result.pitta))
        .bind(i64::from(result.kapha))
        .bind(result.dominant.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn get_result(&self, user_id: UserId) -> Result<Option<DoshaResult>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT vata, pitta, kapha, dominant
            FROM assessment_results WHERE user_id = ?1
            ",
        )
        .bind(user_id_to_i64(user_id)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let percent = |name: &str| -> Result<u8, StorageError> {
            u8::try_from(row.try_get::<i64, _>(name).map_err(ser)?)
                .map_err(|_| StorageError::Serialization(format!("{name} out of range")))
        };

        Ok(Some(DoshaResult {
            vata: percent("vata")?,
            pitta: percent("pitta")?,
            kapha: percent("kapha")?,
            dominant: dosha_from_str(&row.try_get::<String, _>("dominant").map_err(ser)?)?,
        }))
    }

    async fn delete_result(&self, user_id: UserId) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM assessment_results WHERE user_id = ?1")
            .bind(user_id_to_i64(user_id)?)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(())
    }

    async fn count_results(&self) -> Result<u64, StorageError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM assessment_results")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let n: i64 = row.try_get("n").map_err(ser)?;
        u64::try_from(n).map_err(|_| StorageError::Serialization("negative count".into()))
    }

    async fn dominant_counts(&self) -> Result<DoshaCounts, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT dominant, COUNT(*) AS n
            FROM assessment_results
            GROUP BY dominant
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut counts = DoshaCounts::default();
        for row in rows {
            let dominant = dosha_from_str(&row.try_get::<String, _>("dominant").map_err(ser)?)?;
            let n = u32::try_from(row.try_get::<i64, _>("n").map_err(ser)?)
                .map_err(|_| StorageError::Serialization("count overflow".into()))?;
            match dominant {
                prakriti_core::model::Dosha::Vata => counts.vata = n,
                prakriti_core::model::Dosha::Pitta => counts.pitta = n,
                prakriti_core::model::Dosha::Kapha => counts.kapha = n,
            }
        }
        Ok(counts)
    }
}
