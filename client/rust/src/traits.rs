//! Client traits for the user service.
//!
//! Callers depend on [`UserRpc`] rather than the tonic client so the
//! backend can be swapped for an in-process fake in tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::proto::{IdRequest, UserRequest, UserResponse};

/// Operations exposed by the `user.User` gRPC service.
#[async_trait]
pub trait UserRpc: Send + Sync {
    /// Fetch a user by identifier.
    async fn get_user(&self, request: IdRequest) -> Result<UserResponse>;

    /// Create a user; the server assigns the identifier.
    async fn save_user(&self, request: UserRequest) -> Result<UserResponse>;
}
