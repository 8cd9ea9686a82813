use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

/// Schema version the store is migrated to.
pub const SCHEMA_VERSION: i64 = 1;

/// Ordered migrations: version and the statements that create it.
const MIGRATIONS: &[(i64, &[&str])] = &[(
    1,
    &[r"
        CREATE TABLE IF NOT EXISTS question_results (
            question_index INTEGER PRIMARY KEY CHECK (question_index >= 0),
            correct_count INTEGER NOT NULL DEFAULT 0 CHECK (correct_count >= 0),
            incorrect_count INTEGER NOT NULL DEFAULT 0 CHECK (incorrect_count >= 0)
        );
    "],
)];

async fn ensure_bookkeeping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
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
    Ok(())
}

pub(crate) async fn applied_version(pool: &SqlitePool) -> Result<i64, SqliteInitError> {
    ensure_bookkeeping(pool).await?;
    let version: Option<i64> = sqlx::query_scalar("SELECT MAX(version) FROM schema_migrations")
        .fetch_one(pool)
        .await?;
    Ok(version.unwrap_or(0))
}

/// Applies every migration above the stored version, each in its own transaction.
pub(crate) async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    let current = applied_version(pool).await?;

    for &(version, statements) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        let mut tx = pool.begin().await?;
        for statement in statements {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        sqlx::query(
            r"
                INSERT INTO schema_migrations (version, applied_at)
                VALUES (?1, ?2)
                ON CONFLICT(version) DO NOTHING
            ",
        )
        .bind(version)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        tracing::info!(version, "applied result store migration");
    }

    Ok(())
}
