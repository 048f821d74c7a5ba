use traefikize_model::{Annotation, Middleware, MiddlewareSpec, RedirectScheme};

use crate::context::ConvertContext;

/// `ssl-redirect` / `force-ssl-redirect` become a single permanent
/// redirect-scheme middleware when either is enabled.
pub fn ssl_redirect(ctx: &mut ConvertContext) {
    tracing::debug!("running converter SslRedirect");

    let ssl = ctx.annotation(Annotation::SslRedirect).map(str::to_string);
    let force = ctx.annotation(Annotation::ForceSslRedirect).map(str::to_string);

    if ssl.is_none() && force.is_none() {
        return;
    }

    if ssl.as_deref() != Some("true") && force.as_deref() != Some("true") {
        if ssl.is_some() {
            ctx.report_skipped(Annotation::SslRedirect, format!("{} is not set to true", Annotation::SslRedirect));
        }
        if force.is_some() {
            ctx.report_skipped(Annotation::ForceSslRedirect, format!("{} is not set to true", Annotation::ForceSslRedirect));
        }
        return;
    }

    let middleware = Middleware::named(
        &ctx.middleware_name("https-redirect"),
        &ctx.namespace,
        MiddlewareSpec {
            redirect_scheme: Some(RedirectScheme {
                scheme: "https".to_string(),
                permanent: true,
            }),
            ..Default::default()
        },
    );
    ctx.result.middlewares.push(middleware);

    if ssl.is_some() {
        ctx.report_converted(Annotation::SslRedirect);
    }
    if force.is_some() {
        ctx.report_converted(Annotation::ForceSslRedirect);
    }
}
