// Database - SQLite connection pool, schema bootstrap and units of work

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, SqliteConnection};
use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use tracing::{error, info};

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};

/// A unit of work: one pooled connection inside `BEGIN IMMEDIATE`.
///
/// The write lock is taken up front, so concurrent units of work queue on
/// the busy timeout instead of failing when a read-first transaction tries
/// to upgrade. Dropping it without `commit` rolls every write back.
pub struct UnitOfWork {
    // `None` only once committed or handed to the rollback task.
    conn: Option<PoolConnection<Sqlite>>,
}

impl UnitOfWork {
    pub async fn commit(mut self) -> AppResult<()> {
        sqlx::query("COMMIT")
            .execute(&mut *self)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to commit transaction: {}", e)))?;
        // Committed; the connection goes back to the pool as is.
        self.conn.take();
        Ok(())
    }
}

impl Deref for UnitOfWork {
    type Target = SqliteConnection;

    fn deref(&self) -> &SqliteConnection {
        self.conn.as_deref().expect("unit of work used after commit")
    }
}

impl DerefMut for UnitOfWork {
    fn deref_mut(&mut self) -> &mut SqliteConnection {
        self.conn.as_deref_mut().expect("unit of work used after commit")
    }
}

impl Drop for UnitOfWork {
    fn drop(&mut self) {
        let Some(mut conn) = self.conn.take() else {
            return;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = sqlx::query("ROLLBACK").execute(&mut *conn).await {
                        error!(error = %e, "Failed to roll back unit of work, closing connection");
                        let _ = conn.close().await;
                    }
                });
            }
            // Without a runtime the connection is closed, which discards the transaction.
            Err(_) => drop(conn.detach()),
        }
    }
}

/// One table per entity. Owned sub-records and memberships cascade with
/// their event at the store level; whether memberships may be cascaded at
/// all is decided by the event catalog before it deletes.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS event_categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        name_folded TEXT NOT NULL,
        code TEXT NOT NULL,
        image TEXT,
        priority INTEGER NOT NULL DEFAULT 0,
        status TEXT NOT NULL,
        created_user INTEGER NOT NULL,
        updated_user INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS job_categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS events (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        name_folded TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        scheduled_status TEXT NOT NULL,
        venue TEXT NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        location TEXT NOT NULL,
        points INTEGER NOT NULL DEFAULT 0,
        maximum_attendee INTEGER NOT NULL,
        status TEXT NOT NULL,
        job_category_id INTEGER REFERENCES job_categories(id) ON DELETE SET NULL,
        category_id INTEGER REFERENCES event_categories(id) ON DELETE SET NULL,
        created_user INTEGER NOT NULL,
        updated_user INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS event_images (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        event_id INTEGER NOT NULL REFERENCES events(id) ON DELETE CASCADE,
        image TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS event_agendas (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        event_id INTEGER NOT NULL REFERENCES events(id) ON DELETE CASCADE,
        session_name TEXT NOT NULL,
        speaker_name TEXT NOT NULL,
        start_time TEXT NOT NULL,
        end_time TEXT NOT NULL,
        venue_name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS event_members (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        event_id INTEGER NOT NULL REFERENCES events(id) ON DELETE CASCADE,
        user_id INTEGER NOT NULL,
        attend_status TEXT NOT NULL,
        status TEXT NOT NULL,
        created_user INTEGER NOT NULL,
        updated_user INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS event_user_wishlists (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        event_id INTEGER NOT NULL REFERENCES events(id) ON DELETE CASCADE,
        user_id INTEGER NOT NULL,
        status TEXT NOT NULL,
        created_user INTEGER NOT NULL,
        updated_user INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS user_coins (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        gain_type TEXT NOT NULL,
        gain_coin INTEGER NOT NULL,
        status TEXT NOT NULL,
        created_user INTEGER NOT NULL,
        updated_user INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_events_status ON events(status)",
    "CREATE INDEX IF NOT EXISTS idx_event_images_event ON event_images(event_id)",
    "CREATE INDEX IF NOT EXISTS idx_event_agendas_event ON event_agendas(event_id)",
    "CREATE INDEX IF NOT EXISTS idx_event_members_event ON event_members(event_id)",
    "CREATE INDEX IF NOT EXISTS idx_event_members_attend ON event_members(attend_status)",
    "CREATE INDEX IF NOT EXISTS idx_wishlists_event ON event_user_wishlists(event_id)",
    "CREATE INDEX IF NOT EXISTS idx_user_coins_user ON user_coins(user_id)",
];

/// Async SQLite database with an SQLx connection pool
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let in_memory = is_in_memory(&config.url);
        let mut options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| {
                AppError::ConfigurationError(format!("Invalid DATABASE_URL {}: {}", config.url, e))
            })?
            .create_if_missing(true)
            .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new();
        if in_memory {
            // Every connection would otherwise see its own private database.
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            let filename = options.clone().get_filename();
            if let Some(parent) = filename.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        AppError::ConfigurationError(format!(
                            "Failed to create database directory {}: {}",
                            parent.display(),
                            e
                        ))
                    })?;
                }
            }
            options = options.journal_mode(SqliteJournalMode::Wal);
            pool_options = pool_options.max_connections(config.max_connections.max(1));
        }

        let pool = pool_options.connect_with(options).await.map_err(|e| {
            AppError::DatabaseError(format!("Failed to connect to {}: {}", config.url, e))
        })?;

        info!(url = %config.url, in_memory, "Connected to database");
        Ok(Self { pool })
    }

    /// Fresh in-memory database with the schema applied
    pub async fn new_in_memory() -> AppResult<Self> {
        let db = Self::connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        })
        .await?;
        db.init().await?;
        Ok(db)
    }

    /// Create every table and index that does not exist yet
    pub async fn init(&self) -> AppResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::DatabaseError(format!("Failed to apply schema: {}", e)))?;
        }
        Ok(())
    }

    pub async fn begin(&self) -> AppResult<UnitOfWork> {
        let mut conn = self.acquire().await?;
        sqlx::query("BEGIN IMMEDIATE")
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to begin transaction: {}", e)))?;
        Ok(UnitOfWork { conn: Some(conn) })
    }

    pub async fn acquire(&self) -> AppResult<PoolConnection<Sqlite>> {
        self.pool
            .acquire()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to acquire connection: {}", e)))
    }

    /// Health check to verify database connectivity
    pub async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Database health check failed: {}", e)))?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

pub async fn commit(tx: UnitOfWork) -> AppResult<()> {
    tx.commit().await
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}
