use traefikize_model::{Annotation, Buffering, Middleware, MiddlewareSpec};

use crate::context::{ConvertContext, Options};
use crate::middleware::parse_size_bytes;

/// `proxy-buffer-size` has no Traefik equivalent. With the heuristic
/// enabled it is mapped onto response buffering anyway, loudly.
pub fn proxy_buffer_size(ctx: &mut ConvertContext, opts: &Options) {
    tracing::debug!("running converter ProxyBufferSize");

    let Some(value) = ctx.annotation(Annotation::ProxyBufferSize).map(str::to_string) else {
        return;
    };

    if !opts.proxy_buffer_heuristic {
        let message = "proxy-buffer-size has no equivalent in Traefik and was ignored";
        ctx.warn(message);
        ctx.report_ignored(Annotation::ProxyBufferSize, message);
        return;
    }

    let bytes = match parse_size_bytes(&value) {
        Ok(bytes) => bytes,
        Err(_) => {
            let message = "proxy-buffer-size value could not be parsed and was ignored";
            ctx.warn(message);
            ctx.report_skipped(Annotation::ProxyBufferSize, message);
            return;
        }
    };

    let middleware = Middleware::named(
        &ctx.middleware_name("buffering-heuristic"),
        &ctx.namespace,
        MiddlewareSpec {
            buffering: Some(Buffering {
                max_request_body_bytes: None,
                max_response_body_bytes: Some(bytes),
            }),
            ..Default::default()
        },
    );
    ctx.result.middlewares.push(middleware);

    ctx.warn("proxy-buffer-size was heuristically mapped to Traefik buffering; this is NOT equivalent to NGINX behavior");
    ctx.warn("Traefik buffering affects response bodies, not headers; verify application behavior");
    ctx.report_warning(Annotation::ProxyBufferSize, "heuristically mapped to Traefik buffering; review the generated middleware");
}
