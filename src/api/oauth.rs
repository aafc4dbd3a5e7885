//! OAuth API group
//!
//! Handles the OAuth redirect landing below `/api/sa/oauth`. Token exchange
//! against the identity provider is an external collaborator; the shell
//! validates the redirect shape and acknowledges it.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::{bad_request, json_response, not_found};
use crate::app::RequestContext;
use crate::logger;

/// Dispatch a request within the OAuth API group.
pub fn handle(ctx: &RequestContext, suffix: &str) -> Response<Full<Bytes>> {
    match suffix.trim_end_matches('/') {
        "/redirect" => match ctx.query_param("code") {
            Some(code) if !code.is_empty() => {
                logger::log_api_request(ctx.method.as_str(), &ctx.path, 200);
                json_response(StatusCode::OK, &serde_json::json!({ "status": "ok" }))
            }
            _ => {
                logger::log_api_request(ctx.method.as_str(), &ctx.path, 400);
                bad_request("missing code parameter")
            }
        },
        other => {
            logger::log_api_request(ctx.method.as_str(), &ctx.path, 404);
            not_found(&format!("no oauth endpoint '{other}'"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::{Method, Request};

    fn ctx(uri: &str) -> RequestContext {
        let req = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(())
            .unwrap();
        RequestContext::from_request(&req, "127.0.0.1:1000".parse().unwrap())
    }

    #[test]
    fn test_redirect_with_code() {
        let resp = handle(&ctx("/api/sa/oauth/redirect?code=abc"), "/redirect");
        assert_eq!(resp.status(), 200);
    }

    #[test]
    fn test_redirect_without_code() {
        let resp = handle(&ctx("/api/sa/oauth/redirect"), "/redirect");
        assert_eq!(resp.status(), 400);

        let resp = handle(&ctx("/api/sa/oauth/redirect?code="), "/redirect");
        assert_eq!(resp.status(), 400);
    }

    #[test]
    fn test_unknown_endpoint() {
        let resp = handle(&ctx("/api/sa/oauth/token"), "/token");
        assert_eq!(resp.status(), 404);
    }
}
