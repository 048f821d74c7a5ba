use traefikize_model::Annotation;

use crate::context::ConvertContext;

/// Directives that only ever produce advisories: Traefik either already
/// behaves that way or needs the equivalent in its static configuration.
pub fn extra_annotations(ctx: &mut ConvertContext) {
    tracing::debug!("running converter ExtraAnnotations");

    if ctx.annotation(Annotation::ServiceUpstream) == Some("true") {
        let message = "service-upstream=true is default behavior in Traefik";
        ctx.warn(message);
        ctx.report_ignored(Annotation::ServiceUpstream, message);
    }

    if ctx.annotation(Annotation::EnableOpentracing) == Some("true") {
        let message = "enable-opentracing is global in Traefik and cannot be enabled per Ingress";
        ctx.warn(message);
        ctx.report_warning(Annotation::EnableOpentracing, message);
    }

    if ctx.annotation(Annotation::EnableOpentelemetry) == Some("true") {
        let message = "enable-opentelemetry must be configured globally in Traefik static config";
        ctx.warn(format!(
            "{}{}",
            message,
            r#"
tracing:
  otlp:
    grpc:
      endpoint: otel-collector:4317"#
        ));
        ctx.report_warning(Annotation::EnableOpentelemetry, message);
    }

    if ctx.annotation(Annotation::BackendProtocol).map(str::is_empty) == Some(false) {
        let message = "backend-protocol must be applied to IngressRoute service scheme, check for generated ingressroutes.yaml";
        ctx.warn(message);
        ctx.report_warning(Annotation::BackendProtocol, message);
    }

    if ctx.annotation(Annotation::GrpcBackend) == Some("true") {
        let message = "grpc-backend requires IngressRoute service scheme h2c or https+h2, check for generated ingressroutes.yaml";
        ctx.warn(message);
        ctx.report_warning(Annotation::GrpcBackend, message);
    }
}
