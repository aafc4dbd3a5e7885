//! HTTP response building module
//!
//! Provides builders for various HTTP status code responses, decoupled from
//! specific business logic. Every builder falls back to a plain response on
//! construction failure so the shell's last line of defense never panics.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Fixed body for the catch-all error response
pub const INTERNAL_SERVER_ERROR_BODY: &str = "Internal Server Error";

/// Build 500 Internal Server Error response
///
/// Fixed status and body regardless of what failed; the details go to the
/// error log, never to the client.
pub fn build_500_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(INTERNAL_SERVER_ERROR_BODY)))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from(INTERNAL_SERVER_ERROR_BODY)))
        })
}

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str, cache_control: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(304)
        .header("ETag", etag)
        .header("Cache-Control", cache_control)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(413)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("413 Payload Too Large")))
        .unwrap_or_else(|e| {
            log_build_error("413", &e);
            Response::new(Full::new(Bytes::from("413 Payload Too Large")))
        })
}

/// Build generic HTML response
pub fn build_html_response(content: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build static asset response with `ETag` and explicit cache policy
pub fn build_static_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    cache_control: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("ETag", etag)
        .header("Cache-Control", cache_control)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_500_response_is_fixed() {
        let resp = build_500_response();
        assert_eq!(resp.status(), 500);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "text/plain"
        );
    }

    #[test]
    fn test_static_response_carries_cache_policy() {
        let resp = build_static_response(
            Bytes::from_static(b"body {}"),
            "text/css",
            "\"abc\"",
            "public, max-age=0, must-revalidate",
            false,
        );
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Cache-Control").unwrap(),
            "public, max-age=0, must-revalidate"
        );
        assert_eq!(resp.headers().get("ETag").unwrap(), "\"abc\"");
    }

    #[test]
    fn test_head_omits_body_but_keeps_length() {
        let resp = build_static_response(
            Bytes::from_static(b"1234"),
            "text/plain",
            "\"x\"",
            "public, max-age=3600",
            true,
        );
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "4");
    }

    #[test]
    fn test_304_response() {
        let resp = build_304_response("\"abc\"", "public, max-age=0, must-revalidate");
        assert_eq!(resp.status(), 304);
        assert_eq!(resp.headers().get("ETag").unwrap(), "\"abc\"");
    }
}
