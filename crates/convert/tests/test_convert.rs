use k8s_openapi::api::networking::v1::{HTTPIngressPath, HTTPIngressRuleValue, Ingress, IngressBackend, IngressRule, IngressServiceBackend, IngressSpec, ServiceBackendPort};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use traefikize_convert::{run, AnnotationStatus, ConvertContext, Options};
use traefikize_model::Scheme;

fn backend(service: &str, port: i32) -> IngressBackend {
    IngressBackend {
        service: Some(IngressServiceBackend {
            name: service.to_string(),
            port: Some(ServiceBackendPort {
                number: Some(port),
                ..Default::default()
            }),
        }),
        ..Default::default()
    }
}

fn rule(host: &str, paths: Vec<HTTPIngressPath>) -> IngressRule {
    IngressRule {
        host: (!host.is_empty()).then(|| host.to_string()),
        http: Some(HTTPIngressRuleValue { paths }),
    }
}

fn path(value: &str, path_type: &str, service: &str, port: i32) -> HTTPIngressPath {
    HTTPIngressPath {
        backend: backend(service, port),
        path: Some(value.to_string()),
        path_type: Some(path_type.to_string()),
    }
}

fn ingress(name: &str, annotations: &[(&str, &str)], rules: Vec<IngressRule>) -> Ingress {
    Ingress {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some("default".to_string()),
            annotations: Some(annotations.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()),
            ..Default::default()
        },
        spec: Some(IngressSpec {
            rules: Some(rules),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn convert(ingress: &Ingress) -> ConvertContext {
    let mut ctx = ConvertContext::new(ingress);
    run(&mut ctx, ingress, &Options::default());
    ctx
}

#[test]
fn test_ssl_redirect_alone_yields_one_middleware_and_no_route() {
    let ingress = ingress(
        "demo",
        &[("nginx.ingress.kubernetes.io/ssl-redirect", "true")],
        vec![rule("example.com", vec![path("/", "Prefix", "svc", 80)])],
    );
    let ctx = convert(&ingress);

    assert_eq!(ctx.result.middlewares.len(), 1);
    let middleware = &ctx.result.middlewares[0];
    assert_eq!(middleware.metadata.name.as_deref(), Some("demo-https-redirect"));
    let redirect = middleware.spec.redirect_scheme.as_ref().unwrap();
    assert_eq!(redirect.scheme, "https");
    assert!(redirect.permanent);

    // no backend-protocol/grpc directive, so route generation is skipped entirely
    assert!(ctx.result.ingress_routes.is_empty());

    let entries = &ctx.result.report.entries;
    assert_eq!(entries.len(), 1, "{entries:?}");
    assert_eq!(entries[0].status, AnnotationStatus::Converted);
    assert_eq!(entries[0].annotation, "nginx.ingress.kubernetes.io/ssl-redirect");
}

#[test]
fn test_grpc_backend_protocol_yields_h2c_route() {
    let ingress = ingress(
        "demo",
        &[("nginx.ingress.kubernetes.io/backend-protocol", "GRPC")],
        vec![rule("example.com", vec![path("/", "Prefix", "svc", 80)])],
    );
    let ctx = convert(&ingress);

    assert_eq!(ctx.result.ingress_routes.len(), 1);
    let route = &ctx.result.ingress_routes[0];
    assert_eq!(route.metadata.name.as_deref(), Some("demo"));
    assert_eq!(route.spec.entry_points, vec!["web".to_string()]);
    assert_eq!(route.spec.routes.len(), 1);
    assert!(route.spec.routes[0].match_rule.starts_with("Host(`example.com`)"), "{}", route.spec.routes[0].match_rule);
    assert_eq!(route.spec.routes[0].services[0].scheme, Some(Scheme::H2c));
    assert_eq!(route.spec.routes[0].services[0].port, 80);
}

#[test]
fn test_https_backend_uses_websecure_and_tls_option() {
    let ingress = ingress(
        "demo",
        &[
            ("nginx.ingress.kubernetes.io/backend-protocol", "HTTPS"),
            ("nginx.ingress.kubernetes.io/auth-tls-verify-client", "on"),
            ("nginx.ingress.kubernetes.io/auth-tls-secret", "ca-secret"),
        ],
        vec![rule("example.com", vec![path("/", "Prefix", "svc", 443)])],
    );
    let ctx = convert(&ingress);

    assert_eq!(ctx.result.tls_options.len(), 1);
    assert_eq!(ctx.result.tls_options[0].metadata.name.as_deref(), Some("demo-mtls"));
    assert_eq!(ctx.result.tls_option_refs.get("demo"), Some(&"demo-mtls".to_string()));

    let route = &ctx.result.ingress_routes[0];
    assert_eq!(route.spec.entry_points, vec!["websecure".to_string()]);
    let tls = route.spec.tls.as_ref().unwrap();
    assert_eq!(tls.options.as_ref().unwrap().name, "demo-mtls");
}

#[test]
fn test_tls_option_not_attached_to_plain_http_route() {
    let ingress = ingress(
        "demo",
        &[
            ("nginx.ingress.kubernetes.io/backend-protocol", "HTTP"),
            ("nginx.ingress.kubernetes.io/auth-tls-verify-client", "on"),
            ("nginx.ingress.kubernetes.io/auth-tls-secret", "ca-secret"),
        ],
        vec![rule("example.com", vec![path("/", "Prefix", "svc", 80)])],
    );
    let ctx = convert(&ingress);

    assert_eq!(ctx.result.tls_options.len(), 1);
    assert!(ctx.result.ingress_routes[0].spec.tls.is_none());
}

#[test]
fn test_duplicate_rules_are_deduplicated() {
    let ingress = ingress(
        "demo",
        &[("nginx.ingress.kubernetes.io/backend-protocol", "HTTP")],
        vec![
            rule("example.com", vec![path("/api", "Prefix", "svc", 80), path("/api", "Prefix", "svc", 80)]),
            rule("example.com", vec![path("/api", "Prefix", "svc", 80)]),
        ],
    );
    let ctx = convert(&ingress);

    assert_eq!(ctx.result.ingress_routes.len(), 1);
    assert_eq!(ctx.result.ingress_routes[0].spec.routes.len(), 1, "duplicates must be silently dropped");
}

#[test]
fn test_distinct_ports_are_not_deduplicated() {
    let ingress = ingress(
        "demo",
        &[("nginx.ingress.kubernetes.io/backend-protocol", "HTTP")],
        vec![rule("example.com", vec![path("/api", "Prefix", "svc", 80), path("/api", "Prefix", "svc", 8080)])],
    );
    let ctx = convert(&ingress);

    assert_eq!(ctx.result.ingress_routes[0].spec.routes.len(), 2);
}

#[test]
fn test_bogus_backend_protocol_abandons_route_with_warning() {
    let ingress = ingress(
        "demo",
        &[("nginx.ingress.kubernetes.io/backend-protocol", "BOGUS")],
        vec![rule("example.com", vec![path("/", "Prefix", "svc", 80)])],
    );
    let ctx = convert(&ingress);

    assert!(ctx.result.ingress_routes.is_empty());
    assert!(ctx.result.warnings.iter().any(|w| w.contains("BOGUS")), "{:?}", ctx.result.warnings);
}

#[test]
fn test_conditional_cors_snippet_orders_middleware_refs() {
    let snippet = r#"
        if ($http_origin ~* (https://.*\.corp\.example$)) {
            add_header 'Access-Control-Allow-Methods' 'GET, OPTIONS' always;
            add_header 'Access-Control-Allow-Headers' 'Authorization' always;
        }
        if ($request_method = 'OPTIONS') {
            add_header 'Access-Control-Allow-Origin' "$http_origin";
            return 204;
        }
    "#;
    let ingress = ingress(
        "demo",
        &[
            ("nginx.ingress.kubernetes.io/backend-protocol", "HTTP"),
            ("nginx.ingress.kubernetes.io/configuration-snippet", snippet),
            ("nginx.ingress.kubernetes.io/limit-rps", "10"),
        ],
        vec![rule("example.com", vec![path("/", "Prefix", "svc", 80)])],
    );
    let ctx = convert(&ingress);

    let names: Vec<_> = ctx.result.middlewares.iter().map(|m| m.metadata.name.clone().unwrap()).collect();
    assert!(names.contains(&"demo-cors".to_string()), "{names:?}");
    assert!(names.contains(&"demo-conditional-return".to_string()), "{names:?}");
    assert!(names.contains(&"demo-ratelimit".to_string()), "{names:?}");

    let refs: Vec<_> = ctx.result.ingress_routes[0].spec.routes[0].middlewares.iter().map(|r| r.name.clone()).collect();
    assert_eq!(refs, vec!["demo-conditional-return".to_string(), "demo-cors".to_string(), "demo-ratelimit".to_string()]);
}

#[test]
fn test_generic_snippet_conversion_is_idempotent() {
    let snippet = "add_header X-Frame-Options DENY;\nproxy_set_header X-Forwarded-Proto https;";
    let make = || {
        let ingress = ingress("demo", &[("nginx.ingress.kubernetes.io/configuration-snippet", snippet)], vec![]);
        let ctx = convert(&ingress);
        serde_yaml::to_string(&ctx.result.middlewares).unwrap()
    };
    assert_eq!(make(), make());
}

#[test]
fn test_every_present_annotation_is_reported() {
    let ingress = ingress(
        "demo",
        &[
            ("nginx.ingress.kubernetes.io/rewrite-target", "/"),
            ("nginx.ingress.kubernetes.io/ssl-redirect", "false"),
            ("nginx.ingress.kubernetes.io/auth-type", "digest"),
            ("nginx.ingress.kubernetes.io/enable-cors", "true"),
            ("nginx.ingress.kubernetes.io/cors-allow-origin", "https://example.com"),
            ("nginx.ingress.kubernetes.io/limit-rps", "nope"),
            ("nginx.ingress.kubernetes.io/proxy-body-size", "10m"),
            ("nginx.ingress.kubernetes.io/proxy-buffering", "on"),
            ("nginx.ingress.kubernetes.io/service-upstream", "true"),
            ("nginx.ingress.kubernetes.io/upstream-vhost", "internal.svc"),
            ("nginx.ingress.kubernetes.io/enable-underscores-in-headers", "true"),
            ("nginx.ingress.kubernetes.io/server-snippet", "listen 8000;"),
            ("nginx.ingress.kubernetes.io/proxy-buffer-size", "8k"),
        ],
        vec![],
    );
    let ctx = convert(&ingress);

    for (key, _) in ingress.metadata.annotations.as_ref().unwrap().iter().map(|(k, v)| (k.clone(), v)) {
        assert!(
            ctx.result.report.entries.iter().any(|entry| entry.annotation == key),
            "no status entry for {key}: {:?}",
            ctx.result.report.entries
        );
    }
}

#[test]
fn test_invalid_body_size_is_local_failure() {
    let ingress = ingress(
        "demo",
        &[
            ("nginx.ingress.kubernetes.io/proxy-body-size", "10x"),
            ("nginx.ingress.kubernetes.io/ssl-redirect", "true"),
        ],
        vec![],
    );
    let ctx = convert(&ingress);

    // the bad directive is skipped, the good one still converts
    assert!(ctx.result.warnings.iter().any(|w| w.contains("proxy-body-size")), "{:?}", ctx.result.warnings);
    assert_eq!(ctx.result.middlewares.len(), 1);
    assert_eq!(ctx.result.middlewares[0].metadata.name.as_deref(), Some("demo-https-redirect"));
    assert!(ctx
        .result
        .report
        .entries
        .iter()
        .any(|e| e.annotation == "nginx.ingress.kubernetes.io/proxy-body-size" && e.status == AnnotationStatus::Skipped));
}

#[test]
fn test_unknown_annotations_are_never_reported() {
    let ingress = ingress(
        "demo",
        &[
            ("nginx.ingress.kubernetes.io/ssl-redirect", "true"),
            ("kubernetes.io/ingress.class", "nginx"),
            ("nginx.ingress.kubernetes.io/made-up-directive", "whatever"),
        ],
        vec![],
    );
    let ctx = convert(&ingress);

    assert_eq!(ctx.result.report.entries.len(), 1);
    assert_eq!(ctx.result.report.entries[0].annotation, "nginx.ingress.kubernetes.io/ssl-redirect");
}

#[test]
fn test_use_regex_builds_path_regexp_and_reports_once() {
    let ingress = ingress(
        "demo",
        &[
            ("nginx.ingress.kubernetes.io/backend-protocol", "HTTP"),
            ("nginx.ingress.kubernetes.io/use-regex", "true"),
        ],
        vec![rule("example.com", vec![path("/api/v[0-9]+", "ImplementationSpecific", "svc", 80)])],
    );
    let ctx = convert(&ingress);

    let route = &ctx.result.ingress_routes[0].spec.routes[0];
    assert_eq!(route.match_rule, "Host(`example.com`) && PathRegexp(`^/api/v[0-9]+`)");

    let use_regex_entries: Vec<_> = ctx.result.report.entries.iter().filter(|e| e.annotation.ends_with("use-regex")).collect();
    assert_eq!(use_regex_entries.len(), 1);
    assert_eq!(use_regex_entries[0].status, AnnotationStatus::Converted);
}

#[test]
fn test_use_regex_invalid_pattern_falls_back_with_warning() {
    let ingress = ingress(
        "demo",
        &[
            ("nginx.ingress.kubernetes.io/backend-protocol", "HTTP"),
            ("nginx.ingress.kubernetes.io/use-regex", "true"),
        ],
        vec![rule("example.com", vec![path("/api/v[", "Prefix", "svc", 80)])],
    );
    let ctx = convert(&ingress);

    let route = &ctx.result.ingress_routes[0].spec.routes[0];
    assert_eq!(route.match_rule, "Host(`example.com`) && PathPrefix(`/api/v[`)");
    assert!(ctx.result.warnings.iter().any(|w| w.contains("/api/v[")), "{:?}", ctx.result.warnings);
    assert!(ctx
        .result
        .report
        .entries
        .iter()
        .any(|e| e.annotation.ends_with("use-regex") && e.status == AnnotationStatus::Warned));
}
