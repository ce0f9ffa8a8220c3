// Connection handling module
// Serves a single TCP connection on its own task

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::routes::Routes;
use crate::logger;

/// Per-connection settings
#[derive(Debug, Clone, Copy)]
pub struct ConnectionConfig {
    pub keep_alive: bool,
    /// Upper bound on the lifetime of one connection
    pub timeout: Duration,
}

/// Handle a single connection in a spawned task.
///
/// This function:
/// 1. Wraps the TCP stream in `TokioIo`
/// 2. Serves HTTP/1.1 with the route table
/// 3. Applies the connection timeout
/// 4. Decrements the active connection counter when done
pub fn handle_connection(
    stream: tokio::net::TcpStream,
    routes: Arc<Routes>,
    conn_counter: Arc<AtomicUsize>,
    config: ConnectionConfig,
) {
    conn_counter.fetch_add(1, Ordering::SeqCst);

    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let mut builder = http1::Builder::new();
        builder.keep_alive(config.keep_alive);

        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                let routes = Arc::clone(&routes);
                async move { Ok::<_, Infallible>(routes.handle(req).await) }
            }),
        );

        match tokio::time::timeout(config.timeout, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => {
                logger::log_warning(&format!(
                    "Connection timeout after {} seconds",
                    config.timeout.as_secs()
                ));
            }
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}
