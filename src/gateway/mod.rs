//! HTTP gateway: JSON over HTTP in front of the user RPC service.

pub mod errmsg;
mod handler;
mod svc;

pub use handler::{ApiError, ErrorBody, SaveUserBody, UserHandler, UserReply};
pub use svc::{GatewayContext, GatewayError};

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

/// Serve the gateway on `listener` until `shutdown` resolves.
pub async fn serve<F>(
    ctx: Arc<GatewayContext>,
    listener: TcpListener,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!(
        service = %ctx.config.name,
        address = %listener.local_addr()?,
        "Starting gateway"
    );
    let app = UserHandler::new(ctx).router();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
