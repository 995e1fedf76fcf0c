//! Error types for the mall client library.

use tonic::{Code, Status};

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while calling the user service.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The endpoint could not be turned into a channel.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Transport-level error from tonic.
    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    /// gRPC error status returned by (or on behalf of) the server.
    #[error("grpc error: {0}")]
    Grpc(Box<Status>),
}

impl From<Status> for ClientError {
    fn from(status: Status) -> Self {
        ClientError::Grpc(Box::new(status))
    }
}

impl ClientError {
    /// Returns the error message.
    pub fn message(&self) -> String {
        match self {
            ClientError::Connection(msg) => msg.clone(),
            ClientError::Transport(e) => e.to_string(),
            ClientError::Grpc(s) => s.message().to_string(),
        }
    }

    /// Returns the gRPC status code if this is a gRPC error.
    pub fn code(&self) -> Option<Code> {
        match self {
            ClientError::Grpc(s) => Some(s.code()),
            _ => None,
        }
    }

    /// Returns the underlying gRPC Status if this is a gRPC error.
    pub fn status(&self) -> Option<&Status> {
        match self {
            ClientError::Grpc(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if this is an "invalid argument" error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self.code(), Some(Code::InvalidArgument))
    }

    /// Returns true if the backend could not be reached.
    ///
    /// Lazily-connected channels report an unreachable backend as an
    /// `Unavailable` status on the first call, so that counts too.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, ClientError::Connection(_) | ClientError::Transport(_))
            || matches!(self.code(), Some(Code::Unavailable))
    }

    /// Returns true if the call ran out of time.
    ///
    /// tonic reports a client-side `Endpoint::timeout` as `Cancelled`, a
    /// server-enforced `grpc-timeout` as `DeadlineExceeded`.
    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(
            self.code(),
            Some(Code::DeadlineExceeded) | Some(Code::Cancelled)
        )
    }
}
