//! Business logic, one type per RPC service.

mod user;

pub use user::UserLogic;
