use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use traefikize_model::{Annotation, Headers, Middleware, MiddlewareSpec};

use crate::context::{ConvertContext, Options};
use crate::error::ConvertError;
use crate::middleware::plugin_payload;
use crate::snippet::{self, ConditionalReturnConfig, CorsSnippetConfig, GenericSnippet};

/// `configuration-snippet` carries free-text NGINX directives. A snippet
/// implementing pure conditional CORS logic becomes a CORS middleware
/// (plus, when present, a plugin-backed OPTIONS short-circuit); anything
/// else is treated as a flat directive list.
pub fn configuration_snippet(ctx: &mut ConvertContext, opts: &Options) -> Result<(), ConvertError> {
    tracing::debug!("running converter ConfigurationSnippet");

    let Some(value) = ctx.annotation(Annotation::ConfigurationSnippet).map(str::to_string) else {
        return Ok(());
    };

    let lines = snippet::split_lines(&value);
    if lines.is_empty() {
        ctx.report_ignored(Annotation::ConfigurationSnippet, "empty value");
        return Ok(());
    }

    if snippet::is_conditional_cors(&lines) {
        let config = match snippet::parse_conditional_cors(&lines) {
            Ok(config) => config,
            Err(err) => {
                ctx.warn("failed to parse conditional CORS snippet; skipped");
                ctx.report_skipped(Annotation::ConfigurationSnippet, err.to_string());
                return Ok(());
            }
        };

        emit_cors_middleware(ctx, &config);

        if let Some(conditional_return) = snippet::parse_conditional_return(&lines) {
            if opts.disable_plugins {
                ctx.warn("conditional OPTIONS short-circuit requires a plugin-backed middleware; skipped because plugins are disabled");
            } else {
                emit_conditional_return_plugin(ctx, &conditional_return)?;
            }
        }

        ctx.report_converted(Annotation::ConfigurationSnippet);
        return Ok(());
    }

    let GenericSnippet {
        request_headers,
        response_headers,
        warnings,
    } = snippet::parse_generic(&lines);
    ctx.result.warnings.extend(warnings);

    let headers = Headers {
        custom_request_headers: request_headers,
        custom_response_headers: response_headers,
        ..Default::default()
    };
    if headers.is_empty() {
        ctx.report_warning(Annotation::ConfigurationSnippet, "configuration-snippet contained no convertible directives");
        return Ok(());
    }

    let middleware = Middleware::named(
        &ctx.middleware_name("configuration-snippet"),
        &ctx.namespace,
        MiddlewareSpec {
            headers: Some(headers),
            ..Default::default()
        },
    );
    ctx.result.middlewares.push(middleware);

    ctx.report_converted(Annotation::ConfigurationSnippet);

    Ok(())
}

fn emit_cors_middleware(ctx: &mut ConvertContext, config: &CorsSnippetConfig) {
    let headers = Headers {
        access_control_allow_methods: config.allow_methods.clone(),
        access_control_allow_headers: config.allow_headers.clone(),
        access_control_allow_origin_list_regex: vec![config.origin_regex.clone()],
        access_control_allow_credentials: config.allow_credentials.unwrap_or_default(),
        access_control_max_age: (config.max_age > 0).then_some(config.max_age),
        ..Default::default()
    };

    let middleware = Middleware::named(
        &ctx.middleware_name("cors"),
        &ctx.namespace,
        MiddlewareSpec {
            headers: Some(headers),
            ..Default::default()
        },
    );
    ctx.result.middlewares.push(middleware);

    if config.allow_headers.is_empty() || config.allow_methods.is_empty() {
        ctx.warn("conditional CORS snippet was partially parsed; verify generated middleware");
    }
    ctx.warn("conditional NGINX CORS logic was converted to Traefik CORS middleware");
}

#[derive(Serialize)]
struct ConditionalReturnRule<'a> {
    method: &'a str,
    #[serde(rename = "statusCode")]
    status_code: u16,
    headers: &'a BTreeMap<String, Value>,
}

#[derive(Serialize)]
struct ConditionalReturnPayload<'a> {
    rules: Vec<ConditionalReturnRule<'a>>,
}

fn emit_conditional_return_plugin(ctx: &mut ConvertContext, config: &ConditionalReturnConfig) -> Result<(), ConvertError> {
    let payload = ConditionalReturnPayload {
        rules: vec![ConditionalReturnRule {
            method: &config.method,
            status_code: config.status_code,
            headers: &config.headers,
        }],
    };

    let mut plugin = BTreeMap::new();
    plugin.insert("conditionalReturn".to_string(), plugin_payload(&payload)?);

    let middleware = Middleware::named(
        &ctx.middleware_name("conditional-return"),
        &ctx.namespace,
        MiddlewareSpec {
            plugin: Some(plugin),
            ..Default::default()
        },
    );
    ctx.result.middlewares.push(middleware);

    Ok(())
}
