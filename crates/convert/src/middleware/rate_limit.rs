use traefikize_model::{Annotation, Middleware, MiddlewareSpec, RateLimit};

use crate::context::ConvertContext;
use crate::error::ConvertError;

const DEFAULT_BURST_MULTIPLIER: i64 = 2;

/// `limit-rps` (optionally scaled by `limit-burst-multiplier`) becomes a
/// rateLimit middleware.
pub fn rate_limit(ctx: &mut ConvertContext) -> Result<(), ConvertError> {
    tracing::debug!("running converter RateLimit");

    let Some(rps) = ctx.annotation(Annotation::LimitRps).map(str::to_string) else {
        return Ok(());
    };

    let average: i64 = match rps.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            let message = format!("invalid limit-rps {:?}; expected requests per second", rps);
            ctx.report_skipped(Annotation::LimitRps, message.clone());
            return Err(ConvertError::Parse(message));
        }
    };

    let mut multiplier = DEFAULT_BURST_MULTIPLIER;
    if let Some(value) = ctx.annotation(Annotation::LimitBurstMultiplier).map(str::to_string) {
        match value.trim().parse::<i64>() {
            Ok(parsed) => {
                multiplier = parsed;
                ctx.report_converted(Annotation::LimitBurstMultiplier);
            }
            Err(_) => {
                ctx.report_warning(
                    Annotation::LimitBurstMultiplier,
                    format!("invalid limit-burst-multiplier {:?}; default {} used", value, DEFAULT_BURST_MULTIPLIER),
                );
            }
        }
    }

    let middleware = Middleware::named(
        &ctx.middleware_name("ratelimit"),
        &ctx.namespace,
        MiddlewareSpec {
            rate_limit: Some(RateLimit {
                average,
                burst: Some(average * multiplier),
            }),
            ..Default::default()
        },
    );
    ctx.result.middlewares.push(middleware);

    ctx.report_converted(Annotation::LimitRps);

    Ok(())
}
