use traefikize_model::Annotation;

use crate::context::ConvertContext;

/// Traefik's HTTP parser accepts headers with underscores out of the box,
/// so this directive needs no counterpart.
pub fn underscores_in_headers(ctx: &mut ConvertContext) {
    tracing::debug!("running converter UnderscoresInHeaders");

    if !ctx.has(Annotation::UnderscoresInHeaders) {
        return;
    }

    ctx.report_ignored(
        Annotation::UnderscoresInHeaders,
        "Traefik accepts headers with underscores by default; no equivalent configuration is required",
    );
}
