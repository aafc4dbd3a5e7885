//! HTTP cache control module
//!
//! Provides the static-asset cache policy, `ETag` generation and conditional
//! request handling.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Cache lifetime in seconds for a static asset.
///
/// Everything that is not a JavaScript file (case-insensitive `.js` suffix)
/// gets a zero max-age so browsers revalidate it on every request; scripts
/// keep the configured default lifetime.
pub fn send_file_max_age(filename: &str, default_max_age: u64) -> u64 {
    if filename.to_ascii_lowercase().ends_with(".js") {
        default_max_age
    } else {
        0
    }
}

/// Render a max-age as a Cache-Control header value
pub fn cache_control_value(max_age: u64) -> String {
    if max_age == 0 {
        "public, max-age=0, must-revalidate".to_string()
    } else {
        format!("public, max-age={max_age}")
    }
}

/// Generate `ETag` using fast hashing
///
/// Returns a quoted `ETag` string, e.g., `"abc123def"`
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Check if client's `If-None-Match` header matches the server's `ETag`
///
/// Supports single `ETags`, comma-separated lists and the `*` wildcard.
/// Returns true if matched (should return 304), false otherwise.
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag
            .split(',')
            .any(|e| e.trim() == etag || e.trim() == "*")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: u64 = 3600;

    #[test]
    fn test_non_js_assets_always_revalidate() {
        assert_eq!(send_file_max_age("style.css", DEFAULT), 0);
        assert_eq!(send_file_max_age("style.CSS", DEFAULT), 0);
        assert_eq!(send_file_max_age("image.png", DEFAULT), 0);
        assert_eq!(send_file_max_age("index.html", DEFAULT), 0);
        assert_eq!(send_file_max_age("no-extension", DEFAULT), 0);
        // ".js" must be a suffix, not a substring
        assert_eq!(send_file_max_age("app.js.map", DEFAULT), 0);
    }

    #[test]
    fn test_js_assets_keep_default_lifetime() {
        assert_eq!(send_file_max_age("app.js", DEFAULT), DEFAULT);
        assert_eq!(send_file_max_age("APP.JS", DEFAULT), DEFAULT);
        assert_eq!(send_file_max_age("vendor.min.Js", DEFAULT), DEFAULT);
    }

    #[test]
    fn test_cache_control_value() {
        assert_eq!(cache_control_value(0), "public, max-age=0, must-revalidate");
        assert_eq!(cache_control_value(3600), "public, max-age=3600");
    }

    #[test]
    fn test_generate_etag() {
        let etag = generate_etag(b"hello world");
        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        assert!(etag.len() > 2);
    }

    #[test]
    fn test_etag_consistency() {
        assert_eq!(generate_etag(b"same content"), generate_etag(b"same content"));
        assert_ne!(generate_etag(b"content a"), generate_etag(b"content b"));
    }

    #[test]
    fn test_check_etag_match() {
        let etag = "\"abc123\"";
        assert!(check_etag_match(Some("\"abc123\""), etag));
        assert!(check_etag_match(Some("\"xyz\", \"abc123\""), etag));
        assert!(check_etag_match(Some("*"), etag));
        assert!(!check_etag_match(Some("\"different\""), etag));
        assert!(!check_etag_match(None, etag));
    }
}
