//! In-memory storage gateway for testing.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use sea_query::{InsertStatement, SqliteQueryBuilder, Value};
use tokio::sync::RwLock;

use super::{Executed, Result, StorageError, StorageGateway};

/// A statement the mock has accepted.
#[derive(Debug, Clone)]
pub struct RecordedStatement {
    /// SQL text with placeholders.
    pub sql: String,
    /// Values bound to the placeholders, in order.
    pub values: Vec<Value>,
    /// Identifier handed out for the row.
    pub id: i64,
}

/// Mock storage gateway.
///
/// Records every statement it executes and hands out sequential ids.
pub struct MockStorageGateway {
    statements: RwLock<Vec<RecordedStatement>>,
    next_id: AtomicI64,
    fail: AtomicBool,
    report_id: bool,
    latency: Option<Duration>,
}

impl MockStorageGateway {
    pub fn new() -> Self {
        Self {
            statements: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
            fail: AtomicBool::new(false),
            report_id: true,
            latency: None,
        }
    }

    /// Accept writes but never surface a generated id.
    pub fn without_generated_id(mut self) -> Self {
        self.report_id = false;
        self
    }

    /// Delay every write by `latency` before recording it.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make subsequent writes fail as if the store were unreachable.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub async fn statements(&self) -> Vec<RecordedStatement> {
        self.statements.read().await.clone()
    }

    pub async fn row_count(&self) -> usize {
        self.statements.read().await.len()
    }
}

impl Default for MockStorageGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageGateway for MockStorageGateway {
    async fn execute(&self, stmt: InsertStatement) -> Result<Executed> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if self.fail.load(Ordering::SeqCst) {
            return Err(StorageError::Database(sqlx::Error::PoolTimedOut));
        }

        let (sql, values) = stmt.build(SqliteQueryBuilder);
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.statements.write().await.push(RecordedStatement {
            sql,
            values: values.0,
            id,
        });

        Ok(Executed {
            rows_affected: 1,
            last_insert_id: self.report_id.then_some(id),
        })
    }
}
