//! Generated protobuf types for the `user` package.

tonic::include_proto!("user");

/// Encoded file descriptor set for `user.proto`, served by gRPC reflection.
pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("user_descriptor");

/// Fully-qualified gRPC service name.
pub const USER_SERVICE_NAME: &str = "user.User";
