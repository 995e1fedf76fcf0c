//! SQLite storage gateway.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sea_query::{InsertStatement, SqliteQueryBuilder};
use sea_query_binder::SqlxBinder;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::schema::CREATE_USERS_TABLE_SQLITE;
use super::{from_sqlx, Executed, Result, StorageGateway};
use crate::config::SqliteConfig;

/// SQLite implementation of StorageGateway.
pub struct SqliteGateway {
    pool: SqlitePool,
    statement_timeout: Duration,
}

impl SqliteGateway {
    pub fn new(pool: SqlitePool, statement_timeout: Duration) -> Self {
        Self {
            pool,
            statement_timeout,
        }
    }

    /// Open the configured database and create the schema.
    ///
    /// `statement_timeout` bounds both waiting for a pooled connection and
    /// waiting on SQLite's write lock. A statement that gives up on the lock
    /// was never applied.
    ///
    /// An in-memory database lives only as long as its connection, so the
    /// pool is pinned to a single connection that never expires.
    pub async fn connect(config: &SqliteConfig, statement_timeout: Duration) -> Result<Self> {
        let options = if config.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            if let Some(parent) = Path::new(&config.path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            SqlitePoolOptions::new()
        };

        let connect_options =
            SqliteConnectOptions::from_str(&config.uri())?.busy_timeout(statement_timeout);
        let pool = options
            .acquire_timeout(statement_timeout)
            .connect_with(connect_options)
            .await?;
        info!(path = %config.path, "SQLite storage opened");

        let gateway = Self::new(pool, statement_timeout);
        gateway.init().await?;
        Ok(gateway)
    }

    /// Create the users table if it does not exist.
    pub async fn init(&self) -> Result<()> {
        sqlx::query(CREATE_USERS_TABLE_SQLITE)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl StorageGateway for SqliteGateway {
    async fn execute(&self, stmt: InsertStatement) -> Result<Executed> {
        let (sql, values) = stmt.build_sqlx(SqliteQueryBuilder);
        debug!(%sql, "Executing statement");

        let done = sqlx::query_with(&sql, values)
            .execute(&self.pool)
            .await
            .map_err(|e| from_sqlx(e, self.statement_timeout))?;

        let rows_affected = done.rows_affected();
        Ok(Executed {
            rows_affected,
            last_insert_id: (rows_affected > 0).then(|| done.last_insert_rowid()),
        })
    }
}
