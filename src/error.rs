//! Error taxonomy shared by the RPC server and the gateway.

use mall_client::ClientError;
use tonic::Status;

use crate::storage::StorageError;

pub type Result<T> = std::result::Result<T, Error>;

/// Every failure a request can end in.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request was rejected before any work was done.
    #[error("invalid request: {reason}")]
    Validation { reason: String },

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The gateway could not complete the RPC.
    #[error(transparent)]
    Transport(#[from] ClientError),
}

impl Error {
    pub fn validation(reason: impl Into<String>) -> Self {
        Error::Validation {
            reason: reason.into(),
        }
    }
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        let message = err.to_string();
        match err {
            Error::Validation { .. } => Status::invalid_argument(message),
            Error::Storage(e) if e.is_timeout() => Status::deadline_exceeded(message),
            Error::Storage(e) if e.is_unavailable() => Status::unavailable(message),
            Error::Storage(e) if e.is_constraint_violation() => {
                Status::failed_precondition(message)
            }
            Error::Storage(_) => Status::internal(message),
            Error::Transport(ClientError::Grpc(status)) => *status,
            Error::Transport(e) if e.is_connection_error() => Status::unavailable(message),
            Error::Transport(_) => Status::internal(message),
        }
    }
}
