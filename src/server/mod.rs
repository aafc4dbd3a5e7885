// Server module entry point
// Provides listener creation, the accept loop and per-connection handling

pub mod connection;
pub mod listener;

pub use listener::create_reusable_listener;

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::app::App;
use crate::error::ShellError;
use crate::logger;

/// Accept connections until the process exits.
///
/// Accept failures are logged and the loop continues; nothing at request
/// level can terminate the server.
pub async fn serve(listener: TcpListener, app: Arc<App>) -> Result<(), ShellError> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                connection::accept_connection(stream, peer_addr, &app, &active_connections);
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}
