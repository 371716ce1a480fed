use anyhow::Result;
use sqlx::SqlitePool;

pub async fn init_db(database_url: &str) -> Result<SqlitePool> {
    let pool = SqlitePool::connect(database_url).await?;
    init_tables(&pool).await?;
    Ok(pool)
}

/// No migration tooling here; the store bootstraps itself with
/// idempotent CREATE TABLE statements on startup.
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    // Append-only event log. No uniqueness constraint: duplicate
    // submissions are stored as distinct rows.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            employee TEXT NOT NULL DEFAULT '',
            type TEXT NOT NULL DEFAULT '',
            date TEXT NOT NULL DEFAULT '',
            time TEXT NOT NULL DEFAULT '',
            latitude REAL,
            longitude REAL,
            location TEXT NOT NULL DEFAULT '',
            selfie_url TEXT,
            office TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Seeded externally; this service only reads them
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS offices (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            latitude REAL NOT NULL DEFAULT 0,
            longitude REAL NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            otp_code TEXT,
            otp_expires_at TEXT,
            is_verified INTEGER NOT NULL DEFAULT 0,
            last_login TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database tables initialized (attendance, employees, offices, users)");

    Ok(())
}
