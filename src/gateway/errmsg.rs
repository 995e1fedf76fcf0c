//! Error message constants for gateway responses.
//!
//! User-facing error messages are sanitized to avoid leaking infrastructure
//! details. Full error details are logged internally.

/// Backend could not be reached (sanitized - no address details).
pub const SERVICE_UNAVAILABLE: &str = "Service temporarily unavailable";

/// Backend did not answer within the configured deadline.
pub const DEADLINE_EXCEEDED: &str = "Request timed out";

/// Backend storage rejected the write.
pub const CONFLICT: &str = "Request conflicts with stored data";

/// Internal error (sanitized).
pub const INTERNAL_ERROR: &str = "Internal service error";

/// Request body was not valid JSON for this endpoint.
pub const MALFORMED_BODY: &str = "Malformed request body";

/// `name` is required when creating a user.
pub const NAME_REQUIRED: &str = "name must not be empty";
