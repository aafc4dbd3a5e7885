//! samui application server
//!
//! Process bootstrap: load configuration, attach the log sink, build the
//! application handle with its four route groups, bind the listener and
//! serve until the process exits. Any failure before the listener is
//! serving aborts startup.

use std::sync::Arc;

mod api;
mod app;
mod config;
mod error;
mod http;
mod logger;
mod server;
mod views;

use error::ShellError;

fn main() -> Result<(), ShellError> {
    let cfg = config::Config::load()?;

    // Size the runtime from configuration; default is one thread per core
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), ShellError> {
    // Attach the process-wide log sink exactly once, before serving
    logger::init(&cfg)?;

    let addr = cfg.get_socket_addr()?;
    let app = Arc::new(app::App::initialize(cfg)?);
    let listener = server::create_reusable_listener(addr)?;

    logger::log_server_start(&addr, &app.config);

    server::serve(listener, app).await
}
