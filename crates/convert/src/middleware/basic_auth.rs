use traefikize_model::{Annotation, BasicAuth, Middleware, MiddlewareSpec};

use crate::context::ConvertContext;

/// `auth-type: basic` plus its secret/realm companions become a basicAuth
/// middleware. Any other auth type has no Traefik equivalent here.
pub fn basic_auth(ctx: &mut ConvertContext) {
    tracing::debug!("running converter BasicAuth");

    let auth_type = ctx.annotation(Annotation::AuthType).map(str::to_string);
    match auth_type.as_deref() {
        None => return,
        Some("basic") => {}
        Some(other) => {
            ctx.report_skipped(Annotation::AuthType, format!("auth-type {:?} is not supported; only basic converts", other));
            return;
        }
    }

    let secret = ctx.annotation(Annotation::AuthSecret).unwrap_or_default().to_string();
    let realm = ctx.annotation(Annotation::AuthRealm).unwrap_or_default().to_string();

    let middleware = Middleware::named(
        &ctx.middleware_name("basicauth"),
        &ctx.namespace,
        MiddlewareSpec {
            basic_auth: Some(BasicAuth { secret, realm }),
            ..Default::default()
        },
    );
    ctx.result.middlewares.push(middleware);

    ctx.report_converted(Annotation::AuthType);
    if ctx.has(Annotation::AuthSecret) {
        ctx.report_converted(Annotation::AuthSecret);
    }
    if ctx.has(Annotation::AuthRealm) {
        ctx.report_converted(Annotation::AuthRealm);
    }
}
