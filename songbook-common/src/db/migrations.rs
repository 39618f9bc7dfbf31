//! Database schema migrations
//!
//! Migrations are an ordered list of SQL batches. Each pending batch runs in
//! its own transaction together with the `schema_version` row recording it,
//! so a failed migration leaves the previous version intact. Never modify an
//! existing entry; append a new one.

use crate::Result;
use sqlx::SqlitePool;
use tracing::{info, warn};

/// One schema step
struct Migration {
    version: i32,
    description: &'static str,
    statements: &'static [&'static str],
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "songs table",
        statements: &[r#"
            CREATE TABLE IF NOT EXISTS songs (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL CHECK (length(trim(title)) > 0),
                artist TEXT NOT NULL CHECK (length(trim(artist)) > 0),
                album TEXT NOT NULL CHECK (length(trim(album)) > 0),
                genre TEXT NOT NULL CHECK (length(trim(genre)) > 0),
                created_at TIMESTAMP NOT NULL,
                updated_at TIMESTAMP NOT NULL
            )
            "#],
    },
    Migration {
        version: 2,
        description: "listing and snapshot indexes",
        statements: &[
            "CREATE INDEX IF NOT EXISTS idx_songs_artist ON songs (artist)",
            "CREATE INDEX IF NOT EXISTS idx_songs_album ON songs (album)",
            "CREATE INDEX IF NOT EXISTS idx_songs_genre ON songs (genre)",
            "CREATE INDEX IF NOT EXISTS idx_songs_created_at ON songs (created_at, id)",
        ],
    },
];

/// Schema version this build expects; the last entry of the migration list
pub const CURRENT_SCHEMA_VERSION: i32 = 2;

/// Create the schema_version tracking table
pub async fn create_schema_version_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Highest applied migration, 0 for a fresh database
///
/// Expects [`create_schema_version_table`] to have run.
pub async fn schema_version(pool: &SqlitePool) -> Result<i32> {
    let version: i32 = sqlx::query_scalar("SELECT COALESCE(MAX(version), 0) FROM schema_version")
        .fetch_one(pool)
        .await?;
    Ok(version)
}

/// Apply every migration newer than the stored version
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    let stored = schema_version(pool).await?;

    if stored > CURRENT_SCHEMA_VERSION {
        warn!(
            "Database schema v{} is newer than this build (v{}); leaving it untouched",
            stored, CURRENT_SCHEMA_VERSION
        );
        return Ok(());
    }

    let pending: Vec<&Migration> = MIGRATIONS.iter().filter(|m| m.version > stored).collect();
    if pending.is_empty() {
        info!("Database schema is up to date (v{})", stored);
        return Ok(());
    }

    for migration in pending {
        let mut tx = pool.begin().await?;
        for statement in migration.statements {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        sqlx::query("INSERT INTO schema_version (version) VALUES (?)")
            .bind(migration.version)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!(
            "Applied migration v{}: {}",
            migration.version, migration.description
        );
    }

    Ok(())
}
