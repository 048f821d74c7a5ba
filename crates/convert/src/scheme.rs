use std::collections::BTreeMap;

use traefikize_model::{Annotation, Scheme};

use crate::error::ConvertError;

/// Resolve the backend scheme from the protocol directives.
///
/// A gRPC backend without an explicit (non-HTTP) protocol is plaintext
/// HTTP/2; otherwise the explicit backend-protocol value decides,
/// case-insensitively. `GRPCS` rides on an HTTPS backend capable of h2.
pub fn resolve_scheme(annotations: &BTreeMap<String, String>) -> Result<Scheme, ConvertError> {
    let protocol = annotations.get(Annotation::BackendProtocol.as_key()).map(String::as_str).unwrap_or_default().to_uppercase();

    if annotations.get(Annotation::GrpcBackend.as_key()).map(String::as_str) == Some("true") && (protocol.is_empty() || protocol == "HTTP") {
        return Ok(Scheme::H2c);
    }

    match protocol.as_str() {
        "" | "HTTP" => Ok(Scheme::Http),
        "HTTPS" => Ok(Scheme::Https),
        "GRPC" => Ok(Scheme::H2c),
        "GRPCS" => Ok(Scheme::Https),
        other => Err(ConvertError::Scheme(other.to_string())),
    }
}

/// Whether this Ingress warrants an IngressRoute at all. Evaluated before
/// any route construction so annotation-only resources stay cheap.
pub fn needs_ingress_route(annotations: &BTreeMap<String, String>) -> bool {
    annotations.get(Annotation::GrpcBackend.as_key()).map(String::as_str) == Some("true") || annotations.contains_key(Annotation::BackendProtocol.as_key())
}
