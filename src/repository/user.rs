//! User repository.
//!
//! Turns a `User` into a parameterized insert and hands it to the storage
//! gateway. The statement carries no caller text; name and gender travel as
//! bound values only.

use std::sync::Arc;

use async_trait::async_trait;
use sea_query::{Iden, Query};
use tracing::debug;

use crate::model::User;
use crate::storage::schema::Users;
use crate::storage::{Result, StorageError, StorageGateway};

/// Persistence operations for users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert `user` and record the generated id on it.
    ///
    /// On error the user is left without an id.
    async fn save(&self, user: &mut User) -> Result<()>;
}

/// Repository backed by a relational `StorageGateway`.
pub struct UserRepo {
    gateway: Arc<dyn StorageGateway>,
}

impl UserRepo {
    pub fn new(gateway: Arc<dyn StorageGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl UserRepository for UserRepo {
    async fn save(&self, user: &mut User) -> Result<()> {
        let stmt = Query::insert()
            .into_table(Users::Table)
            .columns([Users::Name, Users::Gender])
            .values([user.name().into(), user.gender().into()])?
            .to_owned();

        let executed = self.gateway.execute(stmt).await?;

        let id = executed
            .last_insert_id
            .ok_or_else(|| StorageError::MissingGeneratedId {
                table: Users::Table.to_string(),
            })?;
        user.assign_id(id)?;

        debug!(id, "User saved");
        Ok(())
    }
}
