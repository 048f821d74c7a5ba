use traefikize_model::{Annotation, Headers, Middleware, MiddlewareSpec};

use crate::context::ConvertContext;

/// `upstream-vhost` becomes a headers middleware overriding the `Host`
/// request header.
pub fn upstream_vhost(ctx: &mut ConvertContext) {
    tracing::debug!("running converter UpstreamVhost");

    let Some(value) = ctx.annotation(Annotation::UpstreamVhost).map(str::to_string) else {
        return;
    };
    let vhost = value.trim().to_string();
    if vhost.is_empty() {
        ctx.report_ignored(Annotation::UpstreamVhost, "empty value");
        return;
    }

    let mut headers = Headers::default();
    headers.custom_request_headers.insert("Host".to_string(), vhost);

    let middleware = Middleware::named(
        &ctx.middleware_name("upstream-vhost"),
        &ctx.namespace,
        MiddlewareSpec {
            headers: Some(headers),
            ..Default::default()
        },
    );
    ctx.result.middlewares.push(middleware);

    ctx.report_converted(Annotation::UpstreamVhost);
}
