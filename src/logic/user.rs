//! User business logic.

use std::sync::Arc;

use mall_client::proto::{IdRequest, UserRequest, UserResponse};
use sea_query::Iden;
use tracing::{debug, Instrument};

use crate::error::Error;
use crate::model::User;
use crate::storage::schema::Users;
use crate::storage::StorageError;
use crate::svc::ServiceContext;

const PLACEHOLDER_NAME: &str = "hello user name";
const PLACEHOLDER_GENDER: &str = "Man";

pub struct UserLogic {
    svc: Arc<ServiceContext>,
}

impl UserLogic {
    pub fn new(svc: Arc<ServiceContext>) -> Self {
        Self { svc }
    }

    /// Fetch a user by id.
    ///
    /// No lookup is performed yet: the requested id is echoed with a fixed
    /// name and gender.
    pub fn get_user(&self, request: &IdRequest) -> UserResponse {
        UserResponse {
            id: request.id.clone(),
            name: PLACEHOLDER_NAME.to_string(),
            gender: PLACEHOLDER_GENDER.to_string(),
        }
    }

    /// Persist a new user and return it with its generated id.
    ///
    /// The write runs on its own task. Once started it completes even if the
    /// caller goes away, so a cancelled request may still leave a row behind.
    pub async fn save_user(&self, request: UserRequest) -> Result<UserResponse, Error> {
        let repo = Arc::clone(&self.svc.user_repo);
        let mut user = User::new(request.name, request.gender);

        let write = tokio::spawn(
            async move {
                repo.save(&mut user).await?;
                Ok::<_, StorageError>(user)
            }
            .in_current_span(),
        );

        let user = write
            .await
            .map_err(|e| StorageError::Interrupted(e.to_string()))??;

        let id = user
            .id()
            .ok_or_else(|| StorageError::MissingGeneratedId {
                table: Users::Table.to_string(),
            })?;
        debug!(id, "User created");

        Ok(UserResponse {
            id: id.to_string(),
            name: user.name().to_string(),
            gender: user.gender().to_string(),
        })
    }
}
