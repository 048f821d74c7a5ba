//! Annotation-to-resource conversion engine.
//!
//! One [`ConvertContext`] lives per Ingress; [`run`] walks the converters
//! in a fixed order against it, then builds routes if the resource calls
//! for them. Per-directive failures never abort the resource, and no
//! resource's failure leaks into another: errors degrade to warnings on
//! the resource they belong to.

#![warn(clippy::indexing_slicing, clippy::unwrap_used, clippy::dbg_macro, clippy::undocumented_unsafe_blocks)]

pub mod context;
pub mod error;
pub mod middleware;
pub mod report;
pub mod route;
pub mod scheme;
pub mod snippet;
pub mod tls;

pub use context::{ConvertContext, ConvertResult, Options};
pub use error::ConvertError;
pub use report::{AnnotationStatus, GlobalReport, IngressReport, StatusEntry, Summary, Verdict};

use k8s_openapi::api::networking::v1::Ingress;

/// Convert one Ingress. Converter order is fixed: middleware producers
/// first, then TLS, then the snippet converters, and route construction
/// last so the route can reference every accumulated middleware.
pub fn run(ctx: &mut ConvertContext, ingress: &Ingress, opts: &Options) {
    middleware::rewrite_target(ctx);
    middleware::ssl_redirect(ctx);
    middleware::basic_auth(ctx);
    middleware::auth_url(ctx);
    middleware::cors(ctx);

    if let Err(err) = middleware::rate_limit(ctx) {
        warn_local(ctx, "limit-rps", err);
    }
    if let Err(err) = middleware::body_size(ctx) {
        warn_local(ctx, "proxy-body-size", err);
    }

    middleware::extra_annotations(ctx);
    middleware::upstream_vhost(ctx);

    if let Err(err) = middleware::proxy_redirect(ctx, opts) {
        warn_local(ctx, "proxy-redirect", err);
    }
    if let Err(err) = middleware::proxy_cookie_path(ctx, opts) {
        warn_local(ctx, "proxy-cookie-path", err);
    }

    middleware::underscores_in_headers(ctx);
    middleware::server_snippet(ctx);
    middleware::proxy_buffering(ctx);
    tls::auth_tls_verify_client(ctx);

    if let Err(err) = middleware::configuration_snippet(ctx, opts) {
        warn_local(ctx, "configuration-snippet", err);
    }

    middleware::proxy_buffer_size(ctx, opts);

    if scheme::needs_ingress_route(&ctx.annotations) {
        if let Err(err) = route::build_ingress_route(ctx, ingress) {
            warn_local(ctx, "ingressroute", err);
        }
    }

    middleware::warnings_pass(ctx);
}

fn warn_local(ctx: &mut ConvertContext, converter: &str, err: ConvertError) {
    tracing::warn!(converter, error = %err, "converter failed; continuing with the next directive");
    ctx.warn(format!("{}: {}", converter, err));
}
