use k8s_openapi::schemars::JsonSchema;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// Traefik TLSOption carrying a client-certificate verification policy.
#[derive(CustomResource, Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[kube(kind = "TLSOption", group = "traefik.io", version = "v1alpha1", namespaced)]
pub struct TLSOptionSpec {
    pub client_auth: ClientAuth,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientAuth {
    pub client_auth_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secret_names: Vec<String>,
}

impl TLSOption {
    pub fn named(name: &str, namespace: &str, spec: TLSOptionSpec) -> Self {
        let mut option = TLSOption::new(name, spec);
        option.metadata.namespace = Some(namespace.to_string());
        option
    }
}
