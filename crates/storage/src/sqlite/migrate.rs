use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

/// Runs a single, consolidated migration for the current schema.
///
/// Creates the full schema (users, admin accounts, assessment results,
/// follow-ups, settings, and indexes).
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
            .bind(version)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
            ",
    )
    .execute(pool)
    .await?;

    // Version 1: full schema.
    if !is_applied(pool, 1).await? {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS users (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    email TEXT NOT NULL UNIQUE,
                    credential_hash TEXT NOT NULL,
                    age INTEGER NOT NULL CHECK (age BETWEEN 1 AND 120),
                    gender TEXT NOT NULL,
                    occupation TEXT NOT NULL,
                    location TEXT NOT NULL,
                    joined_at TEXT NOT NULL
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS admin_accounts (
                    id INTEGER PRIMARY KEY,
                    email TEXT NOT NULL UNIQUE,
                    credential_hash TEXT NOT NULL,
                    name TEXT NOT NULL
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS assessment_results (
                    user_id INTEGER PRIMARY KEY,
                    vata INTEGER NOT NULL CHECK (vata BETWEEN 0 AND 100),
                    pitta INTEGER NOT NULL CHECK (pitta BETWEEN 0 AND 100),
                    kapha INTEGER NOT NULL CHECK (kapha BETWEEN 0 AND 100),
                    dominant TEXT NOT NULL,
                    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS follow_ups (
                    id INTEGER PRIMARY KEY,
                    user_id INTEGER NOT NULL,
                    recorded_at TEXT NOT NULL,
                    symptoms TEXT NOT NULL,
                    improvements TEXT NOT NULL,
                    concerns TEXT NOT NULL,
                    energy INTEGER NOT NULL CHECK (energy BETWEEN 1 AND 10),
                    sleep INTEGER NOT NULL CHECK (sleep BETWEEN 1 AND 10),
                    digestion INTEGER NOT NULL CHECK (digestion BETWEEN 1 AND 10),
                    notes TEXT NOT NULL,
                    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS system_settings (
                    id INTEGER PRIMARY KEY,
                    site_name TEXT NOT NULL,
                    maintenance_mode INTEGER NOT NULL,
                    registration_enabled INTEGER NOT NULL,
                    email_notifications INTEGER NOT NULL,
                    max_users_per_day INTEGER NOT NULL CHECK (max_users_per_day >= 0),
                    session_timeout_minutes INTEGER NOT NULL CHECK (session_timeout_minutes >= 0),
                    backup_frequency TEXT NOT NULL
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE INDEX IF NOT EXISTS idx_follow_ups_user_recorded
                    ON follow_ups (user_id, recorded_at);
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE INDEX IF NOT EXISTS idx_users_joined_at
                    ON users (joined_at);
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                INSERT INTO schema_migrations (version, applied_at)
                VALUES (?1, ?2)
                ON CONFLICT(version) DO NOTHING
            ",
        )
        .bind(1_i64)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
    }

    Ok(())
}
