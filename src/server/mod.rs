//! RPC server: hosts the `user.User` service over gRPC.
//!
//! The router carries a health service, optional reflection (dev and test
//! modes only) and a trace layer that opens a span per call.

mod user;

pub use user::UserService;

use std::future::Future;
use std::sync::Arc;

use mall_client::proto::user_server::UserServer;
use mall_client::proto::FILE_DESCRIPTOR_SET;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tokio_stream::Stream;
use tonic::transport::server::Connected;
use tonic::transport::Server;
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing::{info, Level};

use crate::config::ConfigError;
use crate::svc::ServiceContext;

/// Errors that stop the RPC server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to bind listener: {0}")]
    Bind(#[from] std::io::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("Reflection setup failed: {0}")]
    Reflection(#[from] tonic_reflection::server::Error),
}

/// Bind `server.listen_on` and serve until `shutdown` resolves.
pub async fn serve<F>(svc: Arc<ServiceContext>, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send,
{
    let addr = svc.config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(address = %listener.local_addr()?, "Starting rpc server");

    serve_with_incoming(svc, TcpListenerStream::new(listener), shutdown).await
}

/// Serve connections from `incoming` until `shutdown` resolves.
pub async fn serve_with_incoming<I, IO, IE, F>(
    svc: Arc<ServiceContext>,
    incoming: I,
    shutdown: F,
) -> Result<(), ServerError>
where
    I: Stream<Item = Result<IO, IE>>,
    IO: AsyncRead + AsyncWrite + Connected + Unpin + Send + 'static,
    IE: Into<tower::BoxError>,
    F: Future<Output = ()> + Send,
{
    let mode = svc.config.mode;

    let (mut health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_serving::<UserServer<UserService>>()
        .await;

    let (reflection_v1, reflection_v1alpha) = if mode.introspection_enabled() {
        let v1 = tonic_reflection::server::Builder::configure()
            .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
            .register_encoded_file_descriptor_set(tonic_health::pb::FILE_DESCRIPTOR_SET)
            .build_v1()?;
        let v1alpha = tonic_reflection::server::Builder::configure()
            .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
            .register_encoded_file_descriptor_set(tonic_health::pb::FILE_DESCRIPTOR_SET)
            .build_v1alpha()?;
        (Some(v1), Some(v1alpha))
    } else {
        (None, None)
    };
    info!(
        service = %svc.config.name,
        %mode,
        reflection = mode.introspection_enabled(),
        "RPC server ready"
    );

    let mut reporter = health_reporter.clone();
    let shutdown = async move {
        shutdown.await;
        reporter.set_not_serving::<UserServer<UserService>>().await;
        info!("Shutdown signal received, draining rpc server");
    };

    Server::builder()
        .layer(TraceLayer::new_for_grpc().make_span_with(DefaultMakeSpan::new().level(Level::INFO)))
        .add_service(health_service)
        .add_optional_service(reflection_v1)
        .add_optional_service(reflection_v1alpha)
        .add_service(UserServer::new(UserService::new(svc)))
        .serve_with_incoming_shutdown(incoming, shutdown)
        .await?;

    info!("RPC server stopped");
    Ok(())
}
