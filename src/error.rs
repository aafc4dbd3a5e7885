//! Error types for the application shell.
//!
//! Startup failures are fatal and abort the process before the server accepts
//! connections. Errors escaping a route group at request time are collapsed to
//! a single 500 response at the shell boundary.

use thiserror::Error;

/// Fatal startup error.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid listen address '{addr}': {reason}")]
    InvalidAddr { addr: String, reason: String },

    #[error("route group already registered under '{0}'")]
    DuplicatePrefix(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Error escaping a route group while handling a request.
///
/// These never crash the process: the shell logs the failing request's
/// context and answers with a generic 500.
#[derive(Debug, Error)]
pub enum GroupError {
    #[error("no data endpoint registered for '{0}'")]
    UnknownDataEndpoint(String),

    #[error("failed to read '{path}'")]
    StaticRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
