use std::collections::HashSet;

use k8s_openapi::api::networking::v1::{HTTPIngressPath, Ingress};
use regex::Regex;
use traefikize_model::{Annotation, IngressRoute, IngressRouteSpec, Middleware, MiddlewareRef, Route, RouteService, Scheme};

use crate::context::ConvertContext;
use crate::error::ConvertError;
use crate::scheme::resolve_scheme;
use crate::tls;

/// Dedup fingerprint of a generated route. Never outlives one Ingress's
/// conversion.
#[derive(Debug, PartialEq, Eq, Hash)]
struct RouteKey {
    host: String,
    path: String,
    path_type: String,
    use_regex: bool,
    service: String,
    port: i32,
    scheme: Scheme,
}

/// Build the IngressRoute for this Ingress: one route per unique
/// (host, path, service) combination, carrying the ordered references to
/// every middleware accumulated so far.
pub fn build_ingress_route(ctx: &mut ConvertContext, ingress: &Ingress) -> Result<(), ConvertError> {
    tracing::debug!("running converter IngressRoute");

    // resolve the backend protocol once, Ingress-wide
    let scheme = resolve_scheme(&ctx.annotations)?;
    let use_regex = ctx.annotation(Annotation::UseRegex).map(str::to_lowercase).as_deref() == Some("true");

    let mut routes = Vec::new();
    let mut seen: HashSet<RouteKey> = HashSet::new();
    let mut regex_fallback = false;

    let rules = ingress.spec.as_ref().and_then(|spec| spec.rules.as_ref()).map(Vec::as_slice).unwrap_or_default();

    for rule in rules {
        let Some(http) = rule.http.as_ref() else {
            continue;
        };

        let host = rule.host.clone().unwrap_or_default();
        let host_match = build_host_match(&host);

        for path in &http.paths {
            let Some(service) = path.backend.service.as_ref() else {
                continue;
            };

            let (path_match, regex_ok) = build_path_match(path, use_regex);
            if use_regex && !regex_ok {
                let message = format!(
                    "use-regex is set but path '{}' is not a valid regex for Traefik; fell back to PathPrefix",
                    path.path.as_deref().unwrap_or_default()
                );
                ctx.warn(message.clone());
                ctx.report_warning(Annotation::UseRegex, message);
                regex_fallback = true;
            }

            let port = service.port.as_ref().and_then(|port| port.number).unwrap_or_default();
            let key = RouteKey {
                host: host.clone(),
                path: path.path.clone().unwrap_or_default(),
                path_type: path.path_type.clone().unwrap_or_default(),
                use_regex,
                service: service.name.clone(),
                port,
                scheme,
            };
            if !seen.insert(key) {
                // duplicate rule/path in the source
                continue;
            }

            routes.push(Route {
                kind: "Rule".to_string(),
                match_rule: combine_match(&host_match, &path_match),
                services: vec![RouteService {
                    name: service.name.clone(),
                    port,
                    scheme: Some(scheme),
                }],
                middlewares: order_middleware_refs(&ctx.result.middlewares),
            });
        }
    }

    if routes.is_empty() {
        return Ok(());
    }

    let mut ingress_route = IngressRoute::named(
        &ctx.ingress_name,
        &ctx.namespace,
        IngressRouteSpec {
            entry_points: scheme.entry_points(),
            routes,
            tls: None,
        },
    );

    tls::apply_tls_option(&mut ingress_route, ctx, scheme);

    ctx.result.ingress_routes.push(ingress_route);

    if use_regex && !regex_fallback {
        ctx.report_converted(Annotation::UseRegex);
    }

    Ok(())
}

/// Middleware references are not emitted in arrival order: conditional
/// short-circuit responses come first, CORS/headers second, everything
/// else keeps its accumulation order. The stored middlewares themselves
/// are untouched.
pub fn order_middleware_refs(middlewares: &[Middleware]) -> Vec<MiddlewareRef> {
    let mut conditional = Vec::new();
    let mut cors = Vec::new();
    let mut rest = Vec::new();

    for middleware in middlewares {
        let name = middleware.metadata.name.clone().unwrap_or_default();
        if name.contains("conditional-return") {
            conditional.push(name);
        } else if name.contains("cors") || name.contains("headers") {
            cors.push(name);
        } else {
            rest.push(name);
        }
    }

    conditional.into_iter().chain(cors).chain(rest).map(|name| MiddlewareRef { name, namespace: None }).collect()
}

fn build_host_match(host: &str) -> String {
    if host.is_empty() {
        return String::new();
    }
    format!("Host(`{}`)", host)
}

/// Returns the match expression and whether the requested mode applied
/// cleanly (false means a regex fallback happened).
fn build_path_match(path: &HTTPIngressPath, use_regex: bool) -> (String, bool) {
    let mut value = path.path.as_deref().unwrap_or_default();
    if value.is_empty() {
        value = "/";
    }

    if use_regex {
        let anchored = if value.starts_with('^') { value.to_string() } else { format!("^{}", value) };
        if Regex::new(&anchored).is_ok() {
            return (format!("PathRegexp(`{}`)", anchored), true);
        }
        return (format!("PathPrefix(`{}`)", value), false);
    }

    match path.path_type.as_deref().unwrap_or_default() {
        "Exact" => (format!("Path(`{}`)", value), true),
        // ImplementationSpecific and anything unrecognized degrade to Prefix
        _ => (format!("PathPrefix(`{}`)", value), true),
    }
}

fn combine_match(host_match: &str, path_match: &str) -> String {
    match (host_match.is_empty(), path_match.is_empty()) {
        (false, false) => format!("{} && {}", host_match, path_match),
        (false, true) => host_match.to_string(),
        (true, false) => path_match.to_string(),
        (true, true) => "PathPrefix(`/`)".to_string(),
    }
}
