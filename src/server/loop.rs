// Server loop module
// Accepts connections until shutdown is requested

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::{handle_connection, ConnectionConfig};
use super::routes::Routes;
use crate::config::Config;
use crate::logger;

/// Configuration for server loop behavior
#[derive(Debug, Clone, Copy)]
pub struct ServerLoopConfig {
    pub connection: ConnectionConfig,
    /// How long to wait for open connections after shutdown is requested
    pub drain_timeout: Duration,
}

impl ServerLoopConfig {
    pub fn from_config(config: &Config) -> Self {
        let perf = &config.performance;
        Self {
            connection: ConnectionConfig {
                keep_alive: perf.keep_alive_timeout > 0,
                timeout: Duration::from_secs(std::cmp::max(
                    perf.read_timeout,
                    perf.keep_alive_timeout,
                )),
            },
            drain_timeout: Duration::from_secs(perf.read_timeout),
        }
    }
}

/// Accept connections until `shutdown` resolves, then wait for open
/// connections to finish (bounded by `drain_timeout`).
pub async fn start_server_loop<S>(
    listener: TcpListener,
    routes: Arc<Routes>,
    config: ServerLoopConfig,
    shutdown: S,
) -> std::io::Result<()>
where
    S: std::future::Future<Output = ()>,
{
    let active_connections = Arc::new(AtomicUsize::new(0));
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, _peer_addr)) => {
                        handle_connection(
                            stream,
                            Arc::clone(&routes),
                            Arc::clone(&active_connections),
                            config.connection,
                        );
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            () = &mut shutdown => break,
        }
    }

    drop(listener);
    let deadline = tokio::time::Instant::now() + config.drain_timeout;
    while active_connections.load(Ordering::SeqCst) > 0 && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    Ok(())
}
