//! Scoring API - Main Entry Point

mod logging;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use logging::{init_logging, LogFormat};
use scoring_api_rpc::{server::RpcServerConfig, RpcServer};
use scoring_core::application::{Dispatcher, Settings};
use scoring_core::port::id_provider::UuidProvider;
use scoring_core::port::time_provider::SystemTimeProvider;
use scoring_infra::BasicScorer;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "scoring-api")]
#[command(about = "HTTP scoring API", version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "SCORING_PORT", default_value_t = 8080)]
    port: u16,

    /// Interface to bind
    #[arg(long, env = "SCORING_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Write logs to this file instead of stdout
    #[arg(short, long, env = "SCORING_LOG_FILE")]
    log: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Logging (guard flushes the file writer on drop)
    let _log_guard = init_logging(LogFormat::from_env(), args.log.as_deref())?;

    info!("Scoring API v{} starting...", VERSION);

    // 2. Configuration
    let settings = Arc::new(Settings::from_env()?);
    info!(admin_login = %settings.admin_login(), "Settings loaded");

    // 3. DI wiring
    let dispatcher = Arc::new(Dispatcher::new(
        settings,
        Arc::new(BasicScorer::new()),
        Arc::new(SystemTimeProvider),
    ));

    let rpc_config = RpcServerConfig {
        host: args.host,
        port: args.port,
    };
    let mut handle = RpcServer::new(rpc_config, dispatcher, Arc::new(UuidProvider))
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("Server start failed: {}", e))?;

    info!(addr = %handle.local_addr(), "Ready. Press Ctrl+C to shutdown");

    // 4. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received. Exiting gracefully...");

    handle
        .stop()
        .map_err(|e| anyhow::anyhow!("Server stop failed: {}", e))?;
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), handle.stopped()).await;

    info!("Shutdown complete.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["scoring-api"]).unwrap();
        assert_eq!(args.port, 8080);
        assert_eq!(args.host, "127.0.0.1");
        assert!(args.log.is_none());
    }

    #[test]
    fn test_args_overrides() {
        let args =
            Args::try_parse_from(["scoring-api", "-p", "9000", "--host", "0.0.0.0", "-l", "api.log"])
                .unwrap();
        assert_eq!(args.port, 9000);
        assert_eq!(args.host, "0.0.0.0");
        assert_eq!(args.log, Some(PathBuf::from("api.log")));
    }
}
