use traefikize_model::Annotation;

use crate::context::ConvertContext;

/// `proxy-buffering` has no per-route counterpart in Traefik; every value
/// ends up ignored with an explanation.
pub fn proxy_buffering(ctx: &mut ConvertContext) {
    tracing::debug!("running converter ProxyBuffering");

    let Some(value) = ctx.annotation(Annotation::ProxyBuffering).map(str::to_string) else {
        return;
    };

    let message = match value.trim().to_lowercase().as_str() {
        "on" => format!("{} is not supported in Traefik and was ignored", Annotation::ProxyBuffering),
        "off" => "proxy-buffering=off is default behavior in Traefik".to_string(),
        _ => format!("{} has unknown value {:?} and was ignored", Annotation::ProxyBuffering, value),
    };

    ctx.warn(message.clone());
    ctx.report_ignored(Annotation::ProxyBuffering, message);
}
