//! Rules API group
//!
//! Serves the alert/violation rule listing below `/api/sa/rules`. The rule
//! store itself is an external collaborator; the shell answers with an empty
//! rule set and JSON 404s for endpoints it does not know.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::{json_response, not_found};
use crate::app::RequestContext;
use crate::logger;

/// Dispatch a request within the rules API group.
pub fn handle(ctx: &RequestContext, suffix: &str) -> Response<Full<Bytes>> {
    match suffix.trim_end_matches('/') {
        "" => {
            logger::log_api_request(ctx.method.as_str(), &ctx.path, 200);
            json_response(StatusCode::OK, &serde_json::json!({ "rules": [] }))
        }
        other => {
            logger::log_api_request(ctx.method.as_str(), &ctx.path, 404);
            not_found(&format!("no rule endpoint '{other}'"))
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
    fn test_rule_listing_is_empty_set() {
        let resp = handle(&ctx("/api/sa/rules/"), "/");
        assert_eq!(resp.status(), 200);
    }

    #[test]
    fn test_unknown_endpoint_is_group_level_404() {
        let resp = handle(&ctx("/api/sa/rules/bogus"), "/bogus");
        assert_eq!(resp.status(), 404);
    }
}
