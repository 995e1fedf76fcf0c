//! Shared utilities for integration tests.
//!
//! Starts the user RPC server in-process on an ephemeral port.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mall::config::Config;
use mall::server;
use mall::svc::ServiceContext;
use mall_client::UserRpcClient;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::TcpListenerStream;

/// Per-call deadline used by test clients.
pub const CLIENT_TIMEOUT: Duration = Duration::from_secs(2);

/// A user RPC server running on a background task.
pub struct RunningServer {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<Result<(), server::ServerError>>,
}

impl RunningServer {
    /// `host:port` of the listener.
    pub fn endpoint(&self) -> String {
        self.addr.to_string()
    }

    pub fn client(&self) -> UserRpcClient {
        self.client_with_timeout(CLIENT_TIMEOUT)
    }

    pub fn client_with_timeout(&self, timeout: Duration) -> UserRpcClient {
        UserRpcClient::connect_lazy(&self.endpoint(), timeout).expect("valid endpoint")
    }

    /// Signal shutdown and wait for the server to drain.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle
            .await
            .expect("server task panicked")
            .expect("server exited with error");
    }
}

/// Serve `svc` on `127.0.0.1:0`.
pub async fn start_server(svc: ServiceContext) -> RunningServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let (tx, rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(server::serve_with_incoming(
        Arc::new(svc),
        TcpListenerStream::new(listener),
        async {
            let _ = rx.await;
        },
    ));

    RunningServer {
        addr,
        shutdown: Some(tx),
        handle,
    }
}

/// Serve a fresh in-memory SQLite backed service with `config`.
pub async fn start_sqlite_server(config: Config) -> RunningServer {
    let svc = ServiceContext::new(config)
        .await
        .expect("in-memory sqlite service");
    start_server(svc).await
}
