use std::collections::BTreeMap;

use k8s_openapi::api::networking::v1::Ingress;
use traefikize_model::{Annotation, IngressRoute, Middleware, TLSOption};

use crate::report::{AnnotationStatus, IngressReport, StatusEntry};

/// Toggles affecting how aggressive the conversion is allowed to be.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Map `proxy-buffer-size` onto Traefik buffering even though the two
    /// are not equivalent.
    pub proxy_buffer_heuristic: bool,
    /// Refuse to emit plugin-backed middlewares.
    pub disable_plugins: bool,
}

/// Per-Ingress conversion state: the immutable annotation snapshot plus the
/// exclusively-owned accumulator every converter appends to. Lives exactly
/// as long as one resource's conversion.
#[derive(Debug, Default)]
pub struct ConvertContext {
    pub ingress_name: String,
    pub namespace: String,
    pub annotations: BTreeMap<String, String>,
    pub result: ConvertResult,
}

/// Artifacts and diagnostics accumulated for one Ingress. Append-only
/// during conversion; no converter removes what another added.
#[derive(Debug, Default)]
pub struct ConvertResult {
    pub middlewares: Vec<Middleware>,
    pub ingress_routes: Vec<IngressRoute>,
    pub tls_options: Vec<TLSOption>,
    /// ingress name → TLS option name, at most one entry per ingress
    pub tls_option_refs: BTreeMap<String, String>,
    pub warnings: Vec<String>,
    pub report: IngressReport,
}

impl ConvertContext {
    pub fn new(ingress: &Ingress) -> Self {
        let name = ingress.metadata.name.clone().unwrap_or_default();
        let namespace = ingress.metadata.namespace.clone().unwrap_or_else(|| "default".to_string());
        let mut context = ConvertContext {
            ingress_name: name.clone(),
            namespace: namespace.clone(),
            annotations: ingress.metadata.annotations.clone().unwrap_or_default(),
            result: ConvertResult::default(),
        };
        context.result.report.name = name;
        context.result.report.namespace = namespace;
        context
    }

    /// Value of a recognized annotation, if present.
    pub fn annotation(&self, key: Annotation) -> Option<&str> {
        self.annotations.get(key.as_key()).map(String::as_str)
    }

    pub fn has(&self, key: Annotation) -> bool {
        self.annotations.contains_key(key.as_key())
    }

    /// Generated middleware names are `<ingress>-<suffix>`.
    pub fn middleware_name(&self, suffix: &str) -> String {
        format!("{}-{}", self.ingress_name, suffix)
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.result.warnings.push(message.into());
    }

    pub fn report_converted(&mut self, key: Annotation) {
        self.push_status(key, AnnotationStatus::Converted, None);
    }

    pub fn report_warning(&mut self, key: Annotation, message: impl Into<String>) {
        self.push_status(key, AnnotationStatus::Warned, Some(message.into()));
    }

    pub fn report_skipped(&mut self, key: Annotation, message: impl Into<String>) {
        self.push_status(key, AnnotationStatus::Skipped, Some(message.into()));
    }

    pub fn report_ignored(&mut self, key: Annotation, message: impl Into<String>) {
        self.push_status(key, AnnotationStatus::Ignored, Some(message.into()));
    }

    fn push_status(&mut self, key: Annotation, status: AnnotationStatus, message: Option<String>) {
        self.result.report.entries.push(StatusEntry {
            annotation: key.as_key().to_string(),
            status,
            message,
        });
    }
}
