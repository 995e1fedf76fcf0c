//! Storage gateway: parameterized writes against a relational store.
//!
//! The gateway is the only component that talks to the database. It takes a
//! typed `sea_query` statement, renders it with bound parameters and executes
//! it once. Failures are reported to the caller, never retried.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sea_query::InsertStatement;
use tracing::info;

use crate::config::{StorageConfig, StorageType};

pub mod mock;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod schema;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use mock::MockStorageGateway;
#[cfg(feature = "postgres")]
pub use postgres::PostgresGateway;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteGateway;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Query build error: {0}")]
    Query(#[from] sea_query::error::Error),

    #[error("Statement timed out after {0:?}")]
    Timeout(Duration),

    #[error("Storage did not report a generated id for table '{table}'")]
    MissingGeneratedId { table: String },

    #[error("Id already assigned: {id}")]
    IdAlreadyAssigned { id: i64 },

    #[error("Write interrupted: {0}")]
    Interrupted(String),

    #[error("Storage backend not enabled: {0}")]
    UnsupportedBackend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// The store could not be reached or handed out no connection.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            StorageError::Database(
                sqlx::Error::Io(_)
                    | sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::WorkerCrashed
            )
        )
    }

    /// The statement was rejected by a table constraint.
    pub fn is_constraint_violation(&self) -> bool {
        use sqlx::error::ErrorKind;

        match self {
            StorageError::Database(sqlx::Error::Database(db)) => matches!(
                db.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            ),
            _ => false,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, StorageError::Timeout(_))
    }
}

/// Outcome of a successful write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Executed {
    /// Rows written by the statement.
    pub rows_affected: u64,
    /// Identifier generated by the store, when the backend surfaces one.
    pub last_insert_id: Option<i64>,
}

/// Executes a single parameterized insert against the relational store.
///
/// Implementations:
/// - `SqliteGateway`: SQLite via sqlx
/// - `PostgresGateway`: PostgreSQL via sqlx
/// - `MockStorageGateway`: in-memory, for tests
#[async_trait]
pub trait StorageGateway: Send + Sync {
    /// Execute `stmt` once. Every value is sent as a bound parameter.
    async fn execute(&self, stmt: InsertStatement) -> Result<Executed>;
}

/// Error codes a backend reports when it gave up on a statement without
/// applying it: SQLite `SQLITE_BUSY` and its extended forms, PostgreSQL
/// `query_canceled`.
const STATEMENT_TIMEOUT_CODES: &[&str] = &["5", "261", "517", "773", "57014"];

/// Classify a driver error. A statement the database abandoned because it
/// ran past `timeout` becomes `Timeout`; the write was not applied.
pub(crate) fn from_sqlx(err: sqlx::Error, timeout: Duration) -> StorageError {
    let timed_out = match &err {
        sqlx::Error::Database(db) => db
            .code()
            .is_some_and(|code| STATEMENT_TIMEOUT_CODES.iter().any(|c| *c == code)),
        _ => false,
    };
    if timed_out {
        StorageError::Timeout(timeout)
    } else {
        StorageError::Database(err)
    }
}

/// Initialize storage based on configuration.
///
/// Opens the configured backend and makes sure the `users` table exists.
pub async fn connect(config: &StorageConfig) -> Result<Arc<dyn StorageGateway>> {
    info!(
        storage_type = ?config.storage_type,
        statement_timeout = ?config.statement_timeout(),
        "Connecting storage"
    );

    match config.storage_type {
        StorageType::Sqlite => connect_sqlite(config).await,
        StorageType::Postgres => connect_postgres(config).await,
    }
}

#[cfg(feature = "sqlite")]
async fn connect_sqlite(config: &StorageConfig) -> Result<Arc<dyn StorageGateway>> {
    let gateway = SqliteGateway::connect(&config.sqlite, config.statement_timeout()).await?;
    Ok(Arc::new(gateway))
}

#[cfg(not(feature = "sqlite"))]
async fn connect_sqlite(_config: &StorageConfig) -> Result<Arc<dyn StorageGateway>> {
    Err(StorageError::UnsupportedBackend("sqlite".to_string()))
}

#[cfg(feature = "postgres")]
async fn connect_postgres(config: &StorageConfig) -> Result<Arc<dyn StorageGateway>> {
    let gateway = PostgresGateway::connect(&config.postgres, config.statement_timeout()).await?;
    Ok(Arc::new(gateway))
}

#[cfg(not(feature = "postgres"))]
async fn connect_postgres(_config: &StorageConfig) -> Result<Arc<dyn StorageGateway>> {
    Err(StorageError::UnsupportedBackend("postgres".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sqlx_keeps_pool_errors() {
        let err = from_sqlx(sqlx::Error::PoolTimedOut, Duration::from_secs(1));

        assert!(matches!(err, StorageError::Database(sqlx::Error::PoolTimedOut)));
        assert!(err.is_unavailable());
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_missing_id_is_neither_unavailable_nor_constraint() {
        let err = StorageError::MissingGeneratedId {
            table: "users".to_string(),
        };
        assert!(!err.is_unavailable());
        assert!(!err.is_constraint_violation());
        assert_eq!(
            err.to_string(),
            "Storage did not report a generated id for table 'users'"
        );
    }
}
