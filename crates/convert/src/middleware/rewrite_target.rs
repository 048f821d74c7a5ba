use traefikize_model::{Annotation, Middleware, MiddlewareSpec, ReplacePathRegex};

use crate::context::ConvertContext;

/// `rewrite-target` becomes a replacePathRegex middleware that rewrites the
/// whole matched path.
pub fn rewrite_target(ctx: &mut ConvertContext) {
    tracing::debug!("running converter RewriteTarget");

    let Some(target) = ctx.annotation(Annotation::RewriteTarget).map(str::to_string) else {
        return;
    };

    let middleware = Middleware::named(
        &ctx.middleware_name("rewrite"),
        &ctx.namespace,
        MiddlewareSpec {
            replace_path_regex: Some(ReplacePathRegex {
                regex: "^(.*)".to_string(),
                replacement: target,
            }),
            ..Default::default()
        },
    );
    ctx.result.middlewares.push(middleware);

    ctx.report_converted(Annotation::RewriteTarget);
}
