//! PostgreSQL storage gateway.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sea_query::{Alias, InsertStatement, PostgresQueryBuilder};
use sea_query_binder::SqlxBinder;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgPool, Row};
use tracing::{debug, info};

use super::schema::{CREATE_USERS_TABLE_POSTGRES, ID_COLUMN};
use super::{from_sqlx, Executed, Result, StorageGateway};
use crate::config::PostgresConfig;

/// PostgreSQL implementation of StorageGateway.
///
/// Postgres has no connection-level last insert id, so every insert is
/// issued with `RETURNING id`.
pub struct PostgresGateway {
    pool: PgPool,
    statement_timeout: Duration,
}

impl PostgresGateway {
    pub fn new(pool: PgPool, statement_timeout: Duration) -> Self {
        Self {
            pool,
            statement_timeout,
        }
    }

    /// Connect with `statement_timeout` applied as the server-side
    /// `statement_timeout` of every session, so an overrunning insert is
    /// cancelled and rolled back by PostgreSQL itself.
    pub async fn connect(config: &PostgresConfig, statement_timeout: Duration) -> Result<Self> {
        let connect_options = PgConnectOptions::from_str(&config.uri)?.options([(
            "statement_timeout",
            statement_timeout.as_millis().to_string(),
        )]);
        let pool = PgPoolOptions::new()
            .acquire_timeout(statement_timeout)
            .connect_with(connect_options)
            .await?;
        info!("PostgreSQL storage opened");

        let gateway = Self::new(pool, statement_timeout);
        gateway.init().await?;
        Ok(gateway)
    }

    pub async fn init(&self) -> Result<()> {
        sqlx::query(CREATE_USERS_TABLE_POSTGRES)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl StorageGateway for PostgresGateway {
    async fn execute(&self, mut stmt: InsertStatement) -> Result<Executed> {
        stmt.returning_col(Alias::new(ID_COLUMN));
        let (sql, values) = stmt.build_sqlx(PostgresQueryBuilder);
        debug!(%sql, "Executing statement");

        let row = sqlx::query_with(&sql, values)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| from_sqlx(e, self.statement_timeout))?;

        match row {
            Some(row) => Ok(Executed {
                rows_affected: 1,
                last_insert_id: Some(row.try_get::<i64, _>(0)?),
            }),
            None => Ok(Executed {
                rows_affected: 0,
                last_insert_id: None,
            }),
        }
    }
}
