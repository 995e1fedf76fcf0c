//! mall-userapi: HTTP gateway for the user service.
//!
//! Resolves the user RPC backend, then serves the JSON API on `host:port`
//! until Ctrl+C or SIGTERM.

use std::sync::Arc;

use clap::Parser;
use mall::config::{GatewayConfig, DEFAULT_GATEWAY_CONFIG_FILE};
use mall::gateway::{self, GatewayContext};
use mall::utils::bootstrap::{init_tracing, shutdown_signal};
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "mall-userapi", about = "User HTTP gateway")]
struct Args {
    /// Path to the YAML config file.
    #[arg(short = 'f', long = "config", default_value = DEFAULT_GATEWAY_CONFIG_FILE)]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = GatewayConfig::load(Some(args.config.as_str()))?;
    init_tracing(&config.log);

    let addr = config.addr();
    let ctx = GatewayContext::new(config).await.map_err(|e| {
        error!(error = %e, "Failed to reach user rpc");
        e
    })?;

    let listener = TcpListener::bind(&addr).await?;
    gateway::serve(Arc::new(ctx), listener, shutdown_signal()).await?;

    info!("Gateway stopped");
    Ok(())
}
