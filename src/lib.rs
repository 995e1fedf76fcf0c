//! Mall user service.
//!
//! Two processes share this library:
//! - `mall-user`: gRPC server for the `user.User` service, persisting users
//!   to a relational store
//! - `mall-userapi`: HTTP gateway that translates JSON requests into RPCs

pub mod config;
pub mod discovery;
pub mod error;
pub mod gateway;
pub mod logic;
pub mod model;
pub mod repository;
pub mod server;
pub mod storage;
pub mod svc;
pub mod utils;

pub use error::{Error, Result};
pub use mall_client::proto;
