use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Protocol used to reach a backend service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
    H2c,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
            Scheme::H2c => "h2c",
        }
    }

    /// Traefik entry points a route with this backend scheme must bind to.
    pub fn entry_points(&self) -> Vec<String> {
        match self {
            Scheme::Https => vec!["websecure".to_string()],
            _ => vec!["web".to_string()],
        }
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_entry_points() {
        assert_eq!(Scheme::Https.entry_points(), vec!["websecure".to_string()]);
        assert_eq!(Scheme::Http.entry_points(), vec!["web".to_string()]);
        assert_eq!(Scheme::H2c.entry_points(), vec!["web".to_string()]);
    }

    #[test]
    fn test_serialized_lowercase() {
        assert_eq!(serde_json::to_string(&Scheme::H2c).unwrap(), "\"h2c\"");
    }
}
