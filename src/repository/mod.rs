//! Domain repositories.

mod user;

pub use user::{UserRepo, UserRepository};
