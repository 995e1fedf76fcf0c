//! Storage configuration types.

use std::time::Duration;

use serde::Deserialize;

/// Storage type discriminator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    #[default]
    Sqlite,
    Postgres,
}

/// Storage configuration (discriminated union).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage type discriminator.
    #[serde(rename = "type")]
    pub storage_type: StorageType,
    /// SQLite-specific configuration.
    pub sqlite: SqliteConfig,
    /// PostgreSQL-specific configuration.
    pub postgres: PostgresConfig,
    /// Upper bound on a single statement, in milliseconds.
    pub statement_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_type: StorageType::Sqlite,
            sqlite: SqliteConfig::default(),
            postgres: PostgresConfig::default(),
            statement_timeout_ms: 5_000,
        }
    }
}

impl StorageConfig {
    pub fn statement_timeout(&self) -> Duration {
        Duration::from_millis(self.statement_timeout_ms)
    }
}

/// SQLite-specific configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SqliteConfig {
    /// Path to the database file, or `:memory:`.
    pub path: String,
}

impl SqliteConfig {
    pub const IN_MEMORY: &'static str = ":memory:";

    /// Connection string for sqlx. Files are created on first use.
    pub fn uri(&self) -> String {
        if self.is_in_memory() {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite:{}?mode=rwc", self.path)
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.path == Self::IN_MEMORY
    }
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: "./data/mall.db".to_string(),
        }
    }
}

/// PostgreSQL-specific configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PostgresConfig {
    /// PostgreSQL connection URI.
    pub uri: String,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            uri: "postgres://localhost:5432/mall".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_default() {
        let storage = StorageConfig::default();
        assert_eq!(storage.storage_type, StorageType::Sqlite);
        assert_eq!(storage.sqlite.path, "./data/mall.db");
        assert_eq!(storage.postgres.uri, "postgres://localhost:5432/mall");
        assert_eq!(storage.statement_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_sqlite_uri() {
        let file = SqliteConfig {
            path: "/var/lib/mall/mall.db".to_string(),
        };
        assert_eq!(file.uri(), "sqlite:/var/lib/mall/mall.db?mode=rwc");

        let memory = SqliteConfig {
            path: SqliteConfig::IN_MEMORY.to_string(),
        };
        assert!(memory.is_in_memory());
        assert_eq!(memory.uri(), "sqlite::memory:");
    }
}
