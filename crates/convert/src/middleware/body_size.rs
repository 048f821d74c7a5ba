use traefikize_model::{Annotation, Buffering, Middleware, MiddlewareSpec};

use crate::context::ConvertContext;
use crate::error::ConvertError;
use crate::middleware::parse_size_bytes;

/// `proxy-body-size` becomes a buffering middleware capping the request
/// body.
pub fn body_size(ctx: &mut ConvertContext) -> Result<(), ConvertError> {
    tracing::debug!("running converter BodySize");

    let Some(value) = ctx.annotation(Annotation::ProxyBodySize).map(str::to_string) else {
        return Ok(());
    };

    let bytes = match parse_size_bytes(&value) {
        Ok(bytes) => bytes,
        Err(err) => {
            let message = format!("invalid proxy-body-size {:?}: {}", value, err);
            ctx.report_skipped(Annotation::ProxyBodySize, message.clone());
            return Err(ConvertError::Parse(message));
        }
    };

    let middleware = Middleware::named(
        &ctx.middleware_name("bodysize"),
        &ctx.namespace,
        MiddlewareSpec {
            buffering: Some(Buffering {
                max_request_body_bytes: Some(bytes),
                max_response_body_bytes: None,
            }),
            ..Default::default()
        },
    );
    ctx.result.middlewares.push(middleware);

    ctx.report_converted(Annotation::ProxyBodySize);

    Ok(())
}
