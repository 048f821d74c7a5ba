use traefikize_model::{Annotation, ForwardAuth, Middleware, MiddlewareSpec};

use crate::context::ConvertContext;

/// `auth-url` becomes a forwardAuth middleware pointing at the external
/// authentication endpoint.
pub fn auth_url(ctx: &mut ConvertContext) {
    tracing::debug!("running converter AuthUrl");

    let Some(value) = ctx.annotation(Annotation::AuthUrl).map(str::to_string) else {
        return;
    };

    let address = value.trim().to_string();
    if address.is_empty() {
        ctx.report_ignored(Annotation::AuthUrl, "empty value");
        return;
    }

    if !address.starts_with("http://") && !address.starts_with("https://") {
        let message = "auth-url must be an absolute URL (http:// or https://)";
        ctx.warn(message);
        ctx.report_skipped(Annotation::AuthUrl, message);
        return;
    }

    let middleware = Middleware::named(
        &ctx.middleware_name("auth-url"),
        &ctx.namespace,
        MiddlewareSpec {
            forward_auth: Some(ForwardAuth {
                address,
                trust_forward_header: true,
            }),
            ..Default::default()
        },
    );
    ctx.result.middlewares.push(middleware);

    ctx.warn("auth-url converted to Traefik ForwardAuth middleware; verify headers and auth behavior");
    ctx.report_converted(Annotation::AuthUrl);
}
