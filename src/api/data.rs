//! Data API group
//!
//! Serves query metadata below `/api/sa/data`. The backing warehouse
//! connection is an external collaborator; this shell answers with the query
//! registry it knows about. Unknown endpoints are propagated as errors rather
//! than handled here, so they surface through the shell's blanket handler
//! exactly like the rest of the collaborator's failures.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::json_response;
use crate::app::RequestContext;
use crate::error::GroupError;
use crate::logger;

/// Dispatch a request within the data API group.
///
/// `suffix` is the request path with the group prefix stripped.
pub fn handle(ctx: &RequestContext, suffix: &str) -> Result<Response<Full<Bytes>>, GroupError> {
    match suffix.trim_end_matches('/') {
        "/queries" => {
            logger::log_api_request(ctx.method.as_str(), &ctx.path, 200);
            Ok(json_response(
                StatusCode::OK,
                &serde_json::json!({ "queries": [], "connected": false }),
            ))
        }
        other => Err(GroupError::UnknownDataEndpoint(other.to_string())),
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
    fn test_queries_endpoint() {
        let resp = handle(&ctx("/api/sa/data/queries"), "/queries").unwrap();
        assert_eq!(resp.status(), 200);
    }

    #[test]
    fn test_unknown_endpoint_escapes_as_error() {
        let err = handle(&ctx("/api/sa/data/x"), "/x").unwrap_err();
        assert!(matches!(err, GroupError::UnknownDataEndpoint(_)));
    }
}
