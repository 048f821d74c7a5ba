//! Per-directive converters. Each reads the immutable annotation snapshot
//! and appends middlewares, warnings and status entries to the shared
//! result; none of them removes what another added.

pub mod auth_url;
pub mod basic_auth;
pub mod body_size;
pub mod configuration_snippet;
pub mod cors;
pub mod extra_annotations;
pub mod proxy_buffer_size;
pub mod proxy_buffering;
pub mod proxy_cookie_path;
pub mod proxy_redirect;
pub mod rate_limit;
pub mod rewrite_target;
pub mod server_snippet;
pub mod ssl_redirect;
pub mod underscores_in_headers;
pub mod upstream_vhost;

pub use auth_url::auth_url;
pub use basic_auth::basic_auth;
pub use body_size::body_size;
pub use configuration_snippet::configuration_snippet;
pub use cors::cors;
pub use extra_annotations::extra_annotations;
pub use proxy_buffer_size::proxy_buffer_size;
pub use proxy_buffering::proxy_buffering;
pub use proxy_cookie_path::proxy_cookie_path;
pub use proxy_redirect::proxy_redirect;
pub use rate_limit::rate_limit;
pub use rewrite_target::rewrite_target;
pub use server_snippet::server_snippet;
pub use ssl_redirect::ssl_redirect;
pub use underscores_in_headers::underscores_in_headers;
pub use upstream_vhost::upstream_vhost;

use std::collections::BTreeMap;

use serde::Serialize;
use traefikize_model::{Middleware, MiddlewareSpec, ANNOTATION_PREFIX};

use crate::context::ConvertContext;
use crate::error::ConvertError;

/// Configuration of the `rewriteResponseHeaders` Traefik plugin, used
/// where NGINX rewrites response headers (proxy-redirect, cookie paths).
#[derive(Debug, Clone, Serialize)]
pub(crate) struct RewriteResponseHeaders {
    pub rewrites: Vec<HeaderRewrite>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct HeaderRewrite {
    pub header: String,
    pub regex: String,
    pub replacement: String,
}

pub(crate) fn rewrite_response_headers_middleware(
    ctx: &ConvertContext,
    suffix: &str,
    header: &str,
    regex: String,
    replacement: String,
) -> Result<Middleware, ConvertError> {
    let config = RewriteResponseHeaders {
        rewrites: vec![HeaderRewrite {
            header: header.to_string(),
            regex,
            replacement,
        }],
    };

    let mut plugin = BTreeMap::new();
    plugin.insert("rewriteResponseHeaders".to_string(), plugin_payload(&config)?);

    Ok(Middleware::named(
        &ctx.middleware_name(suffix),
        &ctx.namespace,
        MiddlewareSpec {
            plugin: Some(plugin),
            ..Default::default()
        },
    ))
}

/// Parse an NGINX size value (`512`, `8k`, `10m`, `2g`) into bytes.
pub(crate) fn parse_size_bytes(value: &str) -> Result<i64, ConvertError> {
    let normalized = value.trim().to_lowercase();

    let (number, multiplier) = if let Some(number) = normalized.strip_suffix('k') {
        (number, 1024i64)
    } else if let Some(number) = normalized.strip_suffix('m') {
        (number, 1024 * 1024)
    } else if let Some(number) = normalized.strip_suffix('g') {
        (number, 1024 * 1024 * 1024)
    } else {
        (normalized.as_str(), 1)
    };

    let parsed: i64 = number.parse().map_err(|_| ConvertError::Parse(format!("invalid size value: {}", value)))?;
    Ok(parsed * multiplier)
}

/// Split a comma-separated annotation value into trimmed entries.
pub(crate) fn headers_list(value: &str) -> Vec<String> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
}

/// Serialize a plugin configuration payload for an opaque plugin-backed
/// middleware.
pub(crate) fn plugin_payload<T: Serialize>(config: &T) -> Result<serde_json::Value, ConvertError> {
    Ok(serde_json::to_value(config)?)
}

/// Final pass: flag annotation families that never convert safely so they
/// show up in the warnings listing even when no converter claimed them.
pub fn warnings_pass(ctx: &mut ConvertContext) {
    let flagged: Vec<String> = ctx
        .annotations
        .keys()
        .filter(|key| key.starts_with(ANNOTATION_PREFIX))
        .filter(|key| key.contains("auth-tls") || key.contains("snippet") || key.contains("proxy-read") || key.contains("proxy-send"))
        .map(|key| format!("{} is not safely convertible", key))
        .collect();
    ctx.result.warnings.extend(flagged);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_size_bytes() {
        assert_eq!(parse_size_bytes("10m").unwrap(), 10 * 1024 * 1024);
        assert_eq!(parse_size_bytes("2g").unwrap(), 2 * 1024 * 1024 * 1024);
        assert_eq!(parse_size_bytes("512").unwrap(), 512);
        assert_eq!(parse_size_bytes("8K").unwrap(), 8 * 1024);
        assert!(parse_size_bytes("10x").is_err());
        assert!(parse_size_bytes("").is_err());
    }

    #[test]
    fn test_headers_list_trims_entries() {
        assert_eq!(headers_list("GET, POST ,PUT"), vec!["GET", "POST", "PUT"]);
        assert_eq!(headers_list(" , "), Vec::<String>::new());
    }
}
