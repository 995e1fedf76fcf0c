//! mall-user: gRPC server for the user service.
//!
//! Loads `etc/user.yaml` (or the file given with `-f`), connects storage and
//! serves `user.User` until Ctrl+C or SIGTERM.

use std::sync::Arc;

use clap::Parser;
use mall::config::{Config, DEFAULT_RPC_CONFIG_FILE};
use mall::server;
use mall::svc::ServiceContext;
use mall::utils::bootstrap::{init_tracing, shutdown_signal};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "mall-user", about = "User RPC service")]
struct Args {
    /// Path to the YAML config file.
    #[arg(short = 'f', long = "config", default_value = DEFAULT_RPC_CONFIG_FILE)]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = Config::load(Some(args.config.as_str()))?;
    init_tracing(&config.log);

    info!(
        config = %args.config,
        listen_on = %config.server.listen_on,
        "Starting {}",
        config.name
    );

    let svc = ServiceContext::new(config).await.map_err(|e| {
        error!(error = %e, "Failed to initialize storage");
        e
    })?;

    server::serve(Arc::new(svc), shutdown_signal()).await?;
    Ok(())
}
