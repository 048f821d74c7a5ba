use std::collections::BTreeMap;

use k8s_openapi::schemars::JsonSchema;
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dynamic::{BasicAuth, Buffering, ForwardAuth, Headers, RateLimit, RedirectScheme, ReplacePathRegex};

/// Traefik Middleware. Exactly one option block is set per generated
/// middleware; plugin-backed middlewares carry their configuration as an
/// opaque JSON blob keyed by plugin name.
#[derive(CustomResource, Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[kube(kind = "Middleware", group = "traefik.io", version = "v1alpha1", namespaced)]
pub struct MiddlewareSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_auth: Option<BasicAuth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_auth: Option<ForwardAuth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Headers>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffering: Option<Buffering>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<RateLimit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_scheme: Option<RedirectScheme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace_path_regex: Option<ReplacePathRegex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin: Option<BTreeMap<String, Value>>,
}

impl Middleware {
    /// Build a namespaced middleware with a single option block.
    pub fn named(name: &str, namespace: &str, spec: MiddlewareSpec) -> Self {
        let mut middleware = Middleware::new(name, spec);
        middleware.metadata.namespace = Some(namespace.to_string());
        middleware
    }
}
