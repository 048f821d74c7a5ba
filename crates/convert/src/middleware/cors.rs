use traefikize_model::{Annotation, Headers, Middleware, MiddlewareSpec};

use crate::context::ConvertContext;
use crate::middleware::headers_list;

/// The `enable-cors` family becomes a single headers middleware carrying
/// the declarative CORS policy.
pub fn cors(ctx: &mut ConvertContext) {
    tracing::debug!("running converter Cors");

    let Some(enabled) = ctx.annotation(Annotation::EnableCors).map(str::to_string) else {
        return;
    };
    if enabled != "true" {
        ctx.report_skipped(Annotation::EnableCors, format!("{} is not set to true", Annotation::EnableCors));
        return;
    }

    let allow_origin = ctx.annotation(Annotation::CorsAllowOrigin).map(str::to_string);
    let allow_methods = ctx.annotation(Annotation::CorsAllowMethods).map(str::to_string);
    let allow_headers = ctx.annotation(Annotation::CorsAllowHeaders).map(str::to_string);
    let allow_credentials = ctx.annotation(Annotation::CorsAllowCredentials).map(str::to_string);
    let max_age = ctx.annotation(Annotation::CorsMaxAge).map(str::to_string);
    let expose_headers = ctx.annotation(Annotation::CorsExposeHeaders).map(str::to_string);

    let mut headers = Headers::default();

    if let Some(value) = &allow_origin {
        headers.access_control_allow_origin_list = headers_list(value);
        ctx.report_converted(Annotation::CorsAllowOrigin);
    }
    if let Some(value) = &allow_methods {
        headers.access_control_allow_methods = headers_list(value);
        ctx.report_converted(Annotation::CorsAllowMethods);
    }
    if let Some(value) = &allow_headers {
        headers.access_control_allow_headers = headers_list(value);
        ctx.report_converted(Annotation::CorsAllowHeaders);
    }
    if let Some(value) = &allow_credentials {
        if value == "true" {
            headers.access_control_allow_credentials = true;
            ctx.report_converted(Annotation::CorsAllowCredentials);
        } else {
            ctx.report_ignored(
                Annotation::CorsAllowCredentials,
                format!("cors-allow-credentials={} leaves the Traefik default (disabled)", value),
            );
        }
    }
    if let Some(value) = &max_age {
        match value.parse::<i64>() {
            Ok(seconds) => {
                headers.access_control_max_age = Some(seconds);
                ctx.report_converted(Annotation::CorsMaxAge);
            }
            Err(_) => {
                let message = format!("invalid cors-max-age {:?}; expected seconds", value);
                ctx.warn(message.clone());
                ctx.report_skipped(Annotation::CorsMaxAge, message);
            }
        }
    }
    if let Some(value) = &expose_headers {
        headers.access_control_expose_headers = headers_list(value);
        ctx.report_converted(Annotation::CorsExposeHeaders);
    }

    let middleware = Middleware::named(
        &ctx.middleware_name("cors"),
        &ctx.namespace,
        MiddlewareSpec {
            headers: Some(headers),
            ..Default::default()
        },
    );
    ctx.result.middlewares.push(middleware);

    ctx.report_converted(Annotation::EnableCors);
}
