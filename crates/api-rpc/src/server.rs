//! HTTP Server
//!
//! One tokio task per connection, HTTP/1.1 via hyper. Requests share nothing
//! but the immutable dispatcher.

use crate::error::ServerError;
use crate::handler::RpcHandler;
use crate::shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::TokioIo;
use scoring_core::application::Dispatcher;
use scoring_core::port::IdProvider;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

/// Server Configuration
#[derive(Debug, Clone)]
pub struct RpcServerConfig {
    pub host: String,
    /// 0 picks a free port
    pub port: u16,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Handle to a running server
///
/// Dropping the handle without calling [`ServerHandle::stop`] also shuts the
/// server down: the shutdown sender goes with it, which the accept loop and
/// open connections treat as a stop request. Keep the handle alive for as
/// long as the server should run.
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown: Option<ShutdownSender>,
    task: JoinHandle<()>,
}

impl ServerHandle {
    /// Address the listener is bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Ask the accept loop and open connections to stop
    pub fn stop(&mut self) -> Result<(), ServerError> {
        let sender = self.shutdown.take().ok_or(ServerError::AlreadyStopped)?;
        sender.shutdown();
        Ok(())
    }

    /// Wait for the accept loop to exit
    pub async fn stopped(self) -> Result<(), ServerError> {
        self.task
            .await
            .map_err(|e| ServerError::Join(e.to_string()))
    }
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

impl RpcServer {
    pub fn new(
        config: RpcServerConfig,
        dispatcher: Arc<Dispatcher>,
        id_provider: Arc<dyn IdProvider>,
    ) -> Self {
        Self {
            config,
            handler: Arc::new(RpcHandler::new(dispatcher, id_provider)),
        }
    }

    /// Bind the listener and start accepting connections in the background
    pub async fn start(self) -> Result<ServerHandle, ServerError> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let local_addr = listener.local_addr().map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

        info!(addr = %local_addr, "Scoring API listening");

        let (shutdown_tx, shutdown_rx) = shutdown_channel();
        let task = tokio::spawn(accept_loop(listener, self.handler, shutdown_rx));

        Ok(ServerHandle {
            local_addr,
            shutdown: Some(shutdown_tx),
            task,
        })
    }
}

async fn accept_loop(listener: TcpListener, handler: Arc<RpcHandler>, mut shutdown: ShutdownToken) {
    loop {
        tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok((stream, remote_addr)) => {
                        let handler = Arc::clone(&handler);
                        let shutdown = shutdown.clone();
                        tokio::spawn(async move {
                            if let Err(e) = serve_connection(stream, handler, shutdown).await {
                                error!("Connection error from {}: {}", remote_addr, e);
                            }
                        });
                    }
                    Err(e) => {
                        error!("Failed to accept connection: {}", e);
                    }
                }
            }

            _ = shutdown.wait() => {
                info!("Shutdown signal received, stopping server");
                break;
            }
        }
    }
}

async fn serve_connection(
    stream: TcpStream,
    handler: Arc<RpcHandler>,
    mut shutdown: ShutdownToken,
) -> Result<(), hyper::Error> {
    let io = TokioIo::new(stream);

    let service = service_fn(move |req: Request<Incoming>| {
        let handler = Arc::clone(&handler);
        async move { handler.handle(req).await }
    });

    let conn = http1::Builder::new().serve_connection(io, service);
    tokio::pin!(conn);

    tokio::select! {
        result = conn.as_mut() => result,
        _ = shutdown.wait() => {
            debug!("Connection closing due to shutdown");
            conn.as_mut().graceful_shutdown();
            conn.await
        }
    }
}
