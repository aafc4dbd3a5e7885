//! Views blueprint
//!
//! Serves the frontend index page and `/static/*` assets from the configured
//! static root. Static responses carry the cache policy override: everything
//! except JavaScript is forced to revalidate on every request.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

use crate::app::RequestContext;
use crate::config::Config;
use crate::error::GroupError;
use crate::http::{self, cache, mime};
use crate::logger;

/// Dispatch a request within the views blueprint.
pub async fn handle(
    ctx: &RequestContext,
    config: &Config,
) -> Result<Response<Full<Bytes>>, GroupError> {
    if ctx.path == "/" {
        return Ok(serve_index(ctx, config).await);
    }
    if let Some(asset) = ctx.path.strip_prefix("/static/") {
        return serve_asset(ctx, config, asset).await;
    }
    Ok(http::build_404_response())
}

/// Serve the frontend index page, falling back to a built-in placeholder
/// when no frontend build is present in the static root.
async fn serve_index(ctx: &RequestContext, config: &Config) -> Response<Full<Bytes>> {
    let index_path = Path::new(&config.static_files.root).join(&config.static_files.index_file);
    let html = match fs::read(&index_path).await {
        Ok(content) => String::from_utf8_lossy(&content).to_string(),
        Err(_) => default_index_page(),
    };
    http::build_html_response(html, ctx.is_head)
}

/// Serve one static asset with ETag handling and the cache policy override.
///
/// A missing file is an ordinary 404; a file that exists but cannot be read
/// escapes as a `GroupError` and reaches the catch-all handler.
async fn serve_asset(
    ctx: &RequestContext,
    config: &Config,
    asset: &str,
) -> Result<Response<Full<Bytes>>, GroupError> {
    if !is_safe_asset_path(asset) {
        logger::log_warning(&format!("Path traversal attempt blocked: {}", ctx.path));
        return Ok(http::build_404_response());
    }

    let file_path = Path::new(&config.static_files.root).join(asset);
    let content = match fs::read(&file_path).await {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(http::build_404_response());
        }
        Err(e) => {
            return Err(GroupError::StaticRead {
                path: file_path.display().to_string(),
                source: e,
            });
        }
    };

    let max_age = cache::send_file_max_age(asset, config.static_files.default_max_age);
    let cache_control = cache::cache_control_value(max_age);
    let etag = cache::generate_etag(&content);

    if cache::check_etag_match(ctx.if_none_match.as_deref(), &etag) {
        return Ok(http::build_304_response(&etag, &cache_control));
    }

    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));
    Ok(http::build_static_response(
        Bytes::from(content),
        content_type,
        &etag,
        &cache_control,
        ctx.is_head,
    ))
}

/// Reject parent-directory components and absolute or backslashed paths
fn is_safe_asset_path(asset: &str) -> bool {
    !asset.is_empty()
        && !asset.starts_with('/')
        && !asset.contains('\\')
        && !asset.split('/').any(|component| component == "..")
}

fn default_index_page() -> String {
    String::from(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>samui</title>
</head>
<body>
    <h1>samui</h1>
    <p>No frontend build found in the static root.</p>
</body>
</html>"#,
    )
}
