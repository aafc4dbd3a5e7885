//! Request context module
//!
//! Transient, one per inbound HTTP request. Read by route groups and by the
//! catch-all error handler, never mutated.

use hyper::{Method, Request};
use std::net::SocketAddr;

/// Information extracted from an inbound request before dispatch
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Client socket address
    pub remote_addr: SocketAddr,
    /// HTTP method
    pub method: Method,
    /// Request scheme; no TLS terminator in scope, so always "http"
    pub scheme: &'static str,
    /// URI path
    pub path: String,
    /// Query string (without leading ?)
    pub query: Option<String>,
    /// Whether this is a HEAD request (body omitted, headers kept)
    pub is_head: bool,
    /// If-None-Match header for conditional static requests
    pub if_none_match: Option<String>,
    /// User-Agent header, for access logging
    pub user_agent: Option<String>,
}

impl RequestContext {
    pub fn from_request<B>(req: &Request<B>, remote_addr: SocketAddr) -> Self {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string)
        };

        Self {
            remote_addr,
            method: req.method().clone(),
            scheme: "http",
            path: req.uri().path().to_string(),
            query: req.uri().query().map(ToString::to_string),
            is_head: *req.method() == Method::HEAD,
            if_none_match: header("if-none-match"),
            user_agent: header("user-agent"),
        }
    }

    /// Full path as logged by the error handler: path plus query string
    pub fn full_path(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{}", self.path, q),
            None => self.path.clone(),
        }
    }

    /// Look up a single query parameter by name
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.as_deref()?.split('&').find_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            (k == name).then_some(v)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;
    use hyper::body::Bytes;

    fn request(uri: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header("user-agent", "test-agent")
            .body(Full::new(Bytes::new()))
            .unwrap()
    }

    #[test]
    fn test_full_path_includes_query() {
        let addr = "10.1.2.3:9999".parse().unwrap();
        let ctx = RequestContext::from_request(&request("/api/sa/data/x?y=1&z=2"), addr);
        assert_eq!(ctx.full_path(), "/api/sa/data/x?y=1&z=2");
        assert_eq!(ctx.scheme, "http");
        assert_eq!(ctx.user_agent.as_deref(), Some("test-agent"));
    }

    #[test]
    fn test_query_param() {
        let addr = "10.1.2.3:9999".parse().unwrap();
        let ctx = RequestContext::from_request(&request("/api/sa/oauth/redirect?code=abc&x=1"), addr);
        assert_eq!(ctx.query_param("code"), Some("abc"));
        assert_eq!(ctx.query_param("x"), Some("1"));
        assert_eq!(ctx.query_param("missing"), None);
    }
}
