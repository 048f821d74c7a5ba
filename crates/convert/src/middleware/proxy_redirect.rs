use traefikize_model::Annotation;

use crate::context::{ConvertContext, Options};
use crate::error::ConvertError;
use crate::middleware::rewrite_response_headers_middleware;

/// `proxy-redirect-from`/`-to` become a plugin-backed middleware rewriting
/// the `Location` response header.
pub fn proxy_redirect(ctx: &mut ConvertContext, opts: &Options) -> Result<(), ConvertError> {
    tracing::debug!("running converter ProxyRedirect");

    let from = ctx.annotation(Annotation::ProxyRedirectFrom).map(str::to_string);
    let to = ctx.annotation(Annotation::ProxyRedirectTo).map(str::to_string);

    if from.is_none() && to.is_none() {
        return Ok(());
    }

    let skip_both = |ctx: &mut ConvertContext, message: &str| {
        ctx.warn(message);
        if ctx.has(Annotation::ProxyRedirectFrom) {
            ctx.report_skipped(Annotation::ProxyRedirectFrom, message);
        }
        if ctx.has(Annotation::ProxyRedirectTo) {
            ctx.report_skipped(Annotation::ProxyRedirectTo, message);
        }
    };

    let (Some(from), Some(to)) = (from, to) else {
        skip_both(ctx, "proxy-redirect requires both proxy-redirect-from and proxy-redirect-to");
        return Ok(());
    };

    if opts.disable_plugins {
        skip_both(ctx, "proxy-redirect has no native Traefik equivalent; requires a response header rewrite plugin");
        return Ok(());
    }

    let middleware = rewrite_response_headers_middleware(ctx, "proxy-redirect", "Location", from, to)?;
    ctx.result.middlewares.push(middleware);

    ctx.report_converted(Annotation::ProxyRedirectFrom);
    ctx.report_converted(Annotation::ProxyRedirectTo);

    Ok(())
}
