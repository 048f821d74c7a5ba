use std::fmt::Display;

/// Errors raised while converting a single directive or building routes.
///
/// All of these stay local to the resource being converted: the
/// orchestrator downgrades them to warnings and carries on.
#[derive(Debug)]
pub enum ConvertError {
    /// Malformed directive value (size, rate, two-argument form, ...).
    Parse(String),
    /// Unsupported backend-protocol value; carries the offending value.
    Scheme(String),
    /// A structured plugin payload could not be encoded.
    Serialization(serde_json::Error),
}

impl Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::Parse(message) => write!(f, "{}", message),
            ConvertError::Scheme(value) => write!(f, "unsupported backend-protocol {:?}", value),
            ConvertError::Serialization(e) => write!(f, "failed to encode plugin configuration: {}", e),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(value: serde_json::Error) -> Self {
        ConvertError::Serialization(value)
    }
}
