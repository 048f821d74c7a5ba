//! Shared data model for the NGINX-Ingress → Traefik conversion.
//!
//! This crate carries the closed annotation registry, the backend [`Scheme`],
//! and the Traefik CRD types the converters emit. It holds no conversion
//! logic of its own.

pub mod annotation;
pub use annotation::*;

pub mod scheme;
pub use scheme::*;

pub mod crd;
pub use crd::*;

pub mod dynamic;
pub use dynamic::*;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
pub type BoxResult<T> = Result<T, BoxError>;
