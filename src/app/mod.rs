//! Application shell module
//!
//! Assembles the server process: builds the application handle from the
//! loaded configuration, registers the route groups under their fixed URL
//! prefixes, and dispatches inbound requests. Any error escaping a route
//! group is caught here, logged with the failing request's context, and
//! converted to a generic 500 — the last line of defense never panics.

mod context;

pub use context::RequestContext;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::api;
use crate::config::Config;
use crate::error::{GroupError, ShellError};
use crate::http;
use crate::logger;
use crate::views;

/// URL prefix for the views blueprint
pub const VIEWS_PREFIX: &str = "/";
/// URL prefix for the data API group
pub const DATA_PREFIX: &str = "/api/sa/data";
/// URL prefix for the rules API group
pub const RULES_PREFIX: &str = "/api/sa/rules";
/// URL prefix for the OAuth API group
pub const OAUTH_PREFIX: &str = "/api/sa/oauth";

/// Functional areas wired into the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGroup {
    Views,
    Data,
    Rules,
    Oauth,
}

struct Route {
    prefix: &'static str,
    group: RouteGroup,
}

/// Application handle
///
/// Owns the immutable configuration and the route-group registry. Exactly one
/// instance exists per process, shared across connections behind an `Arc`.
pub struct App {
    pub config: Config,
    routes: Vec<Route>,
}

impl App {
    /// Build the application and register the four route groups.
    ///
    /// Registration failure is fatal; the process must not start a partial
    /// server.
    pub fn initialize(config: Config) -> Result<Self, ShellError> {
        let mut app = Self {
            config,
            routes: Vec::new(),
        };

        app.register(VIEWS_PREFIX, RouteGroup::Views)?;
        app.register(DATA_PREFIX, RouteGroup::Data)?;
        app.register(RULES_PREFIX, RouteGroup::Rules)?;
        app.register(OAUTH_PREFIX, RouteGroup::Oauth)?;

        Ok(app)
    }

    /// Register a route group under a URL prefix
    fn register(&mut self, prefix: &'static str, group: RouteGroup) -> Result<(), ShellError> {
        if self.routes.iter().any(|r| r.prefix == prefix) {
            return Err(ShellError::DuplicatePrefix(prefix.to_string()));
        }
        self.routes.push(Route { prefix, group });
        Ok(())
    }

    /// Resolve a request path to its route group (longest prefix wins).
    ///
    /// The views blueprint is registered under `/` and therefore catches
    /// everything no API prefix claims.
    fn resolve(&self, path: &str) -> Option<(&'static str, RouteGroup)> {
        self.routes
            .iter()
            .filter(|r| prefix_matches(r.prefix, path))
            .max_by_key(|r| r.prefix.len())
            .map(|r| (r.prefix, r.group))
    }
}

/// Check whether a registered prefix claims a path.
///
/// `/api/sa/data` claims `/api/sa/data` and `/api/sa/data/...` but not
/// `/api/sa/datax`; the root prefix claims every path.
fn prefix_matches(prefix: &str, path: &str) -> bool {
    if prefix == "/" {
        return true;
    }
    path == prefix || path.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/'))
}

/// Main entry point for HTTP request handling
///
/// The body type is generic; the shell serves GET/HEAD only and never reads
/// request bodies.
pub async fn handle_request<B>(
    req: &Request<B>,
    app: &Arc<App>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = std::time::Instant::now();
    let ctx = RequestContext::from_request(req, remote_addr);

    // Method and body-size gates first, then dispatch to the owning route
    // group, funneling any escaped error into the generic 500.
    let gated = check_http_method(&ctx.method)
        .or_else(|| check_body_size(req, app.config.http.max_body_size));
    let response = match gated {
        Some(resp) => resp,
        None => match app.resolve(&ctx.path) {
            Some((prefix, group)) => match dispatch(group, prefix, &ctx, app).await {
                Ok(resp) => resp,
                Err(err) => error_response(&ctx, &err),
            },
            None => http::build_404_response(),
        },
    };

    if app.config.logging.access_log {
        let mut entry = logger::AccessLogEntry::new(
            ctx.remote_addr.ip().to_string(),
            ctx.method.to_string(),
            ctx.path.clone(),
        );
        entry.query = ctx.query.clone();
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        entry.user_agent = ctx.user_agent.clone();
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &app.config.logging.access_log_format);
    }

    Ok(response)
}

/// Dispatch a request to its route group
async fn dispatch(
    group: RouteGroup,
    prefix: &'static str,
    ctx: &RequestContext,
    app: &Arc<App>,
) -> Result<Response<Full<Bytes>>, GroupError> {
    let suffix = if prefix == "/" {
        ctx.path.as_str()
    } else {
        &ctx.path[prefix.len()..]
    };

    match group {
        RouteGroup::Views => views::handle(ctx, &app.config).await,
        RouteGroup::Data => api::data::handle(ctx, suffix),
        RouteGroup::Rules => Ok(api::rules::handle(ctx, suffix)),
        RouteGroup::Oauth => Ok(api::oauth::handle(ctx, suffix)),
    }
}

/// Convert an escaped route-group error into the generic 500 response.
///
/// Logs a single line with the client address, method, scheme and full path,
/// then answers with the fixed body. Infallible: the 500 builder falls back
/// rather than panicking.
fn error_response(ctx: &RequestContext, err: &GroupError) -> Response<Full<Bytes>> {
    let line = logger::unhandled_error_line(
        &ctx.remote_addr.to_string(),
        ctx.method.as_str(),
        ctx.scheme,
        &ctx.full_path(),
        err,
    );
    logger::log_unhandled_error(&line);
    http::build_500_response()
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    let size_str = content_length.to_str().ok()?;
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_error(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(http::build_413_response())
        }
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            None
        }
        _ => None,
    }
}
