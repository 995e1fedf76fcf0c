//! Wire types and typed gRPC client for the mall `user` service.
//!
//! The generated protobuf types are shared by the RPC server (which
//! implements [`proto::user_server::User`]) and by callers such as the HTTP
//! gateway, which talk to it through [`UserRpc`].
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use mall_client::{UserRpc, UserRpcClient};
//! use mall_client::proto::IdRequest;
//!
//! async fn example() -> mall_client::Result<()> {
//!     let client = UserRpcClient::connect_lazy("127.0.0.1:8080", Duration::from_secs(2))?;
//!     let user = client.get_user(IdRequest { id: "42".into() }).await?;
//!     println!("{}", user.name);
//!     Ok(())
//! }
//! ```
//!
//! # Mocking for Tests
//!
//! Implement [`UserRpc`] to stand in for the backend:
//!
//! ```rust,ignore
//! use async_trait::async_trait;
//! use mall_client::proto::{IdRequest, UserRequest, UserResponse};
//!
//! struct FixedUser;
//!
//! #[async_trait]
//! impl mall_client::UserRpc for FixedUser {
//!     async fn get_user(&self, req: IdRequest) -> mall_client::Result<UserResponse> {
//!         Ok(UserResponse { id: req.id, ..Default::default() })
//!     }
//!     async fn save_user(&self, _req: UserRequest) -> mall_client::Result<UserResponse> {
//!         Ok(UserResponse::default())
//!     }
//! }
//! ```

pub mod client;
pub mod error;
pub mod proto;
pub mod traits;

pub use client::UserRpcClient;
pub use error::{ClientError, Result};
pub use traits::UserRpc;
