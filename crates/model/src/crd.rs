//! Traefik CRD types (`traefik.io/v1alpha1`) emitted by the conversion.

pub mod ingress_route;
pub mod middleware;
pub mod tls_option;

pub use ingress_route::*;
pub use middleware::*;
pub use tls_option::*;
