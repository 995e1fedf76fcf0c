//! Service context: dependencies shared by every request.

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::repository::{UserRepo, UserRepository};
use crate::storage::{self, StorageError};

/// Process-wide dependencies, built once at startup and shared read-only.
pub struct ServiceContext {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
}

impl ServiceContext {
    /// Connect storage from `config` and wire the repositories.
    pub async fn new(config: Config) -> Result<Self, StorageError> {
        let gateway = storage::connect(&config.storage).await?;
        info!(service = %config.name, mode = %config.mode, "Service context ready");

        Ok(Self {
            config,
            user_repo: Arc::new(UserRepo::new(gateway)),
        })
    }

    /// Build a context around an existing repository.
    pub fn with_repository(config: Config, user_repo: Arc<dyn UserRepository>) -> Self {
        Self { config, user_repo }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;

    #[tokio::test]
    async fn test_new_with_in_memory_sqlite() {
        let ctx = ServiceContext::new(Config::for_test()).await.unwrap();

        let mut user = User::new("alice", "F");
        ctx.user_repo.save(&mut user).await.unwrap();

        assert_eq!(user.id(), Some(1));
    }
}
