use k8s_openapi::schemars::JsonSchema;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

use crate::scheme::Scheme;

/// Traefik IngressRoute. One is emitted per converted Ingress that carries
/// a backend-protocol or gRPC directive; entry points are derived from the
/// resolved backend [`Scheme`].
#[derive(CustomResource, Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[kube(kind = "IngressRoute", group = "traefik.io", version = "v1alpha1", namespaced)]
pub struct IngressRouteSpec {
    pub entry_points: Vec<String>,
    pub routes: Vec<Route>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<IngressRouteTls>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Always `Rule` for HTTP routes.
    pub kind: String,
    #[serde(rename = "match")]
    pub match_rule: String,
    pub services: Vec<RouteService>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub middlewares: Vec<MiddlewareRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteService {
    pub name: String,
    pub port: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<Scheme>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MiddlewareRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngressRouteTls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<TlsOptionRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TlsOptionRef {
    pub name: String,
}

impl IngressRoute {
    pub fn named(name: &str, namespace: &str, spec: IngressRouteSpec) -> Self {
        let mut route = IngressRoute::new(name, spec);
        route.metadata.namespace = Some(namespace.to_string());
        route
    }
}
