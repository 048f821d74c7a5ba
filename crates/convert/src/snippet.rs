//! Parser for the NGINX directive mini-language embedded in
//! `configuration-snippet` values.
//!
//! Everything here is a pure function from trimmed lines to a parse result
//! plus warnings; no state survives between calls.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::error::ConvertError;

lazy_static! {
    static ref ORIGIN_IF_RE: Regex = Regex::new(r"\$http_origin\s+~\*\s+\((.+?)\)\s*\)").expect("origin regex");
}

/// Declarative CORS policy recovered from a conditional snippet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorsSnippetConfig {
    pub origin_regex: String,
    pub allow_headers: Vec<String>,
    pub allow_methods: Vec<String>,
    pub allow_credentials: Option<bool>,
    pub max_age: i64,
}

/// A method-gated short-circuit response (`if ($request_method = OPTIONS) {
/// return 204; }`) recovered from a conditional snippet.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalReturnConfig {
    pub method: String,
    pub status_code: u16,
    pub headers: BTreeMap<String, Value>,
}

/// Headers extracted from a snippet that is just a list of independent
/// directives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenericSnippet {
    pub request_headers: BTreeMap<String, String>,
    pub response_headers: BTreeMap<String, String>,
    pub warnings: Vec<String>,
}

struct UnsupportedDirective {
    enterprise: bool,
    message: &'static str,
}

fn unsupported_directive(name: &str) -> Option<UnsupportedDirective> {
    match name {
        "gzip" => Some(UnsupportedDirective {
            enterprise: false,
            message: "gzip is only configurable via middleware in Traefik and was ignored",
        }),
        "gzip_comp_level" => Some(UnsupportedDirective {
            enterprise: false,
            message: "gzip_comp_level is not configurable in Traefik",
        }),
        "gzip_types" => Some(UnsupportedDirective {
            enterprise: false,
            message: "gzip_types is not configurable in Traefik",
        }),
        "proxy_buffer_size" => Some(UnsupportedDirective {
            enterprise: false,
            message: "proxy_buffer_size is not supported in Traefik",
        }),
        "proxy_cache" => Some(UnsupportedDirective {
            enterprise: true,
            message: "proxy_cache is not supported in Traefik OSS",
        }),
        _ => None,
    }
}

/// Split a snippet into trimmed, non-empty lines.
pub fn split_lines(snippet: &str) -> Vec<&str> {
    snippet.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}

/// NGINX `if` blocks are never converted, except when they implement pure
/// CORS logic: an origin-header test plus an allow-methods assignment, and
/// none of the directives that cannot be reduced to a declarative policy.
pub fn is_conditional_cors(lines: &[&str]) -> bool {
    let mut has_origin_if = false;
    let mut has_methods = false;

    for raw in lines {
        let line = raw.to_lowercase();

        if line.contains("if ($http_origin") {
            has_origin_if = true;
        }
        if line.contains("access-control-allow-methods") {
            has_methods = true;
        }
        if line.contains("rewrite") || line.contains("proxy_pass") || line.contains("fastcgi") || line.contains("lua_") || line.contains("set ") {
            return false;
        }
    }

    has_origin_if && has_methods
}

pub fn parse_conditional_cors(lines: &[&str]) -> Result<CorsSnippetConfig, ConvertError> {
    let mut config = CorsSnippetConfig {
        origin_regex: extract_origin_regex(lines).ok_or_else(|| ConvertError::Parse("no origin regex found".to_string()))?,
        ..Default::default()
    };

    for raw in lines {
        let line = raw.trim();
        let lower = line.to_lowercase();

        if lower.contains("access-control-allow-headers") {
            config.allow_headers = split_csv(&extract_quoted_value(line));
        } else if lower.contains("access-control-allow-methods") {
            config.allow_methods = split_csv(&extract_quoted_value(line));
        } else if lower.contains("access-control-allow-credentials") {
            match extract_quoted_value(line).to_lowercase().as_str() {
                "true" => config.allow_credentials = Some(true),
                "false" => config.allow_credentials = Some(false),
                _ => {}
            }
        } else if lower.contains("access-control-max-age") {
            let age = extract_trailing_int(line);
            if age > 0 {
                config.max_age = age;
            }
        }
    }

    if config.allow_methods.is_empty() {
        config.allow_methods = vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"].into_iter().map(String::from).collect();
    }

    Ok(config)
}

/// Scan for a `$request_method = OPTIONS` gate whose body carries a numeric
/// `return` and optional header assignments. Only the OPTIONS method is
/// recognized.
pub fn parse_conditional_return(lines: &[&str]) -> Option<ConditionalReturnConfig> {
    let mut in_if = false;
    let mut method = None;
    let mut status = 0u16;
    let mut headers = BTreeMap::new();

    for raw in lines {
        let line = raw.trim();
        let lower = line.to_lowercase();

        if lower.starts_with("if") && lower.contains("$request_method") && lower.contains("options") {
            method = Some("OPTIONS".to_string());
            in_if = true;
            continue;
        }

        if !in_if {
            continue;
        }

        if lower.starts_with("return") {
            if let Some(code) = lower.split_whitespace().nth(1) {
                if let Ok(parsed) = code.trim_end_matches(';').parse::<u16>() {
                    status = parsed;
                }
            }
            continue;
        }

        if let Some((key, value)) = parse_add_header_normalized(line) {
            // allow-headers / allow-methods carry CSV lists
            match key.to_lowercase().as_str() {
                "access-control-allow-headers" | "access-control-allow-methods" => {
                    let list = split_csv(&value);
                    if list.is_empty() {
                        headers.insert(key, Value::String(value));
                    } else {
                        headers.insert(key, Value::Array(list.into_iter().map(Value::String).collect()));
                    }
                }
                _ => {
                    headers.insert(key, Value::String(value));
                }
            }
            continue;
        }

        if line.starts_with('}') {
            in_if = false;
        }
    }

    match (method, status) {
        (Some(method), status) if status > 0 => Some(ConditionalReturnConfig {
            method,
            status_code: status,
            headers,
        }),
        _ => None,
    }
}

/// Treat the snippet as a flat list of independent directives, extracting
/// whatever maps onto a headers middleware and warning about the rest.
pub fn parse_generic(lines: &[&str]) -> GenericSnippet {
    let mut snippet = GenericSnippet::default();

    for raw in lines {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let lower = line.to_lowercase();
        match directive(&lower) {
            "add_header" | "more_set_headers" => {
                if let Some((key, value)) = parse_response_header(line) {
                    snippet.response_headers.insert(key, value);
                } else {
                    snippet.warnings.push(format!("failed to parse header directive: {}", line));
                }
            }
            "proxy_set_header" => {
                if let Some((key, value)) = parse_proxy_set_header(line) {
                    if value.contains('$') {
                        snippet.warnings.push("proxy_set_header uses NGINX variables which are not evaluated by Traefik".to_string());
                    }
                    snippet.request_headers.insert(key, value);
                }
            }
            name => match unsupported_directive(name) {
                Some(unsupported) => {
                    let mut message = unsupported.message.to_string();
                    if unsupported.enterprise {
                        message.push_str(". Traefik Enterprise provides an alternative, but it cannot be auto-converted.");
                    }
                    snippet.warnings.push(message);
                }
                None => {
                    snippet.warnings.push(format!("unsupported directive in configuration-snippet was ignored: {}", line));
                }
            },
        }
    }

    snippet
}

fn directive(line: &str) -> &str {
    line.split_whitespace().next().unwrap_or_default()
}

fn extract_origin_regex(lines: &[&str]) -> Option<String> {
    lines.iter().find_map(|line| ORIGIN_IF_RE.captures(line).and_then(|c| c.get(1)).map(|m| m.as_str().to_string()))
}

/// Last quoted substring on the line, searching both quote styles.
fn extract_quoted_value(line: &str) -> String {
    let mut values: Vec<&str> = Vec::new();

    for quote in ['"', '\''] {
        let mut rest = line;
        while let Some(start) = rest.find(quote) {
            let after = &rest[start + 1..];
            let Some(end) = after.find(quote) else {
                break;
            };
            values.push(&after[..end]);
            rest = &after[end + 1..];
        }
    }

    values.last().copied().unwrap_or_default().to_string()
}

fn split_csv(value: &str) -> Vec<String> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
}

fn extract_trailing_int(line: &str) -> i64 {
    line.split_whitespace().last().and_then(|field| field.trim_end_matches(';').parse::<i64>().ok()).unwrap_or_default()
}

/// Parse an `add_header`/`more_set_headers` line into a normalized
/// key/value pair, handling quoted and unquoted forms and stripping a
/// trailing `always`. Values referencing `$http_origin` become `*` since
/// the variable cannot be evaluated ahead of request time.
fn parse_add_header_normalized(line: &str) -> Option<(String, String)> {
    let line = line.trim().trim_end_matches(';').trim();
    let lower = line.to_lowercase();
    if !lower.starts_with("add_header") && !lower.starts_with("more_set_headers") {
        return None;
    }

    let mut fields = line.split_whitespace();
    let name = fields.next()?;
    if fields.count() < 2 {
        return None;
    }

    let rest = line[name.len()..].trim();
    let rest = rest.strip_suffix("always").map(str::trim).unwrap_or(rest);

    let (key, value) = if rest.starts_with('"') || rest.starts_with('\'') {
        let quote = if rest.starts_with('"') { '"' } else { '\'' };
        let inner = &rest[1..];
        let end = inner.find(quote)?;
        let key = &inner[..end];
        let after = inner[end + 1..].trim();

        let value = if after.starts_with('"') || after.starts_with('\'') {
            let quote = if after.starts_with('"') { '"' } else { '\'' };
            let inner = &after[1..];
            let end = inner.find(quote)?;
            &inner[..end]
        } else {
            after
        };
        (key.to_string(), value.trim().to_string())
    } else {
        let parts: Vec<&str> = rest.split_whitespace().collect();
        if parts.len() < 2 {
            return None;
        }
        let key = parts[0].trim_matches(|c| c == '"' || c == '\'');
        let joined = parts[1..].join(" ");
        (key.to_string(), joined.trim_matches(|c| c == '"' || c == '\'').to_string())
    };

    let key = key.trim().to_string();
    let mut value = value.trim().to_string();
    if key.is_empty() || value.is_empty() {
        return None;
    }

    if value.contains("$http_origin") {
        value = "*".to_string();
    }

    Some((key, value))
}

/// Response-header forms accepted in generic snippets: the quoted
/// `more_set_headers "Key: value"` form and the `add_header Key value` form.
fn parse_response_header(line: &str) -> Option<(String, String)> {
    let line = line.trim().trim_end_matches(';');

    if line.starts_with("more_set_headers") {
        let start = line.find('"')?;
        let end = line.rfind('"')?;
        if end <= start {
            return None;
        }
        let (key, value) = line[start + 1..end].split_once(':')?;
        return Some((key.trim().to_string(), value.trim().to_string()));
    }

    if line.starts_with("add_header") {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            return None;
        }
        let key = fields[1].trim_matches('"');
        let value = fields[2..].join(" ");
        return Some((key.to_string(), value.trim_matches('"').to_string()));
    }

    None
}

fn parse_proxy_set_header(line: &str) -> Option<(String, String)> {
    let line = line.trim_end_matches(';');
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return None;
    }

    let key = fields[1].trim_matches('"');
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), fields[2..].join(" ")))
}

#[cfg(test)]
mod test {
    use super::*;

    const CORS_SNIPPET: &str = r#"
        if ($http_origin ~* (https?://.*\.example\.com$)) {
            add_header 'Access-Control-Allow-Origin' "$http_origin" always;
            add_header 'Access-Control-Allow-Methods' 'GET, POST, OPTIONS' always;
            add_header 'Access-Control-Allow-Headers' 'Authorization, Content-Type' always;
            add_header 'Access-Control-Allow-Credentials' 'true' always;
            add_header 'Access-Control-Max-Age' 600;
        }
        if ($request_method = 'OPTIONS') {
            return 204;
        }
    "#;

    #[test]
    fn test_detects_conditional_cors() {
        let lines = split_lines(CORS_SNIPPET);
        assert!(is_conditional_cors(&lines));
    }

    #[test]
    fn test_disqualifier_forces_generic() {
        let mut tainted = CORS_SNIPPET.to_string();
        tainted.push_str("\nrewrite ^/old(.*)$ /new$1 break;");
        let lines = split_lines(&tainted);
        assert!(!is_conditional_cors(&lines), "rewrite must disqualify despite CORS markers");

        let mut tainted = CORS_SNIPPET.to_string();
        tainted.push_str("\nset $upstream http://backend;");
        assert!(!is_conditional_cors(&split_lines(&tainted)));
    }

    #[test]
    fn test_parse_conditional_cors() {
        let lines = split_lines(CORS_SNIPPET);
        let config = parse_conditional_cors(&lines).unwrap();
        assert_eq!(config.origin_regex, r"https?://.*\.example\.com$");
        assert_eq!(config.allow_methods, vec!["GET", "POST", "OPTIONS"]);
        assert_eq!(config.allow_headers, vec!["Authorization", "Content-Type"]);
        assert_eq!(config.allow_credentials, Some(true));
        assert_eq!(config.max_age, 600);
    }

    #[test]
    fn test_allow_methods_default_when_unspecified() {
        let snippet = r#"
            if ($http_origin ~* (.*)) {
                add_header Access-Control-Allow-Methods GET,POST;
            }
        "#;
        // only quoted values are extracted, so the methods list stays empty
        let lines = split_lines(snippet);
        let config = parse_conditional_cors(&lines).unwrap();
        assert_eq!(config.allow_methods, vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"]);
    }

    #[test]
    fn test_missing_origin_regex_is_parse_error() {
        let lines = vec!["add_header 'Access-Control-Allow-Methods' 'GET';"];
        assert!(parse_conditional_cors(&lines).is_err());
    }

    #[test]
    fn test_parse_conditional_return() {
        let lines = split_lines(
            r#"
            if ($request_method = 'OPTIONS') {
                add_header 'Access-Control-Allow-Origin' "$http_origin";
                add_header 'Access-Control-Allow-Methods' 'GET, POST';
                add_header 'Access-Control-Max-Age' 1728000;
                return 204;
            }
        "#,
        );
        let config = parse_conditional_return(&lines).unwrap();
        assert_eq!(config.method, "OPTIONS");
        assert_eq!(config.status_code, 204);
        assert_eq!(config.headers.get("Access-Control-Allow-Origin"), Some(&Value::String("*".to_string())));
        assert_eq!(
            config.headers.get("Access-Control-Allow-Methods"),
            Some(&Value::Array(vec![Value::String("GET".to_string()), Value::String("POST".to_string())]))
        );
        assert_eq!(config.headers.get("Access-Control-Max-Age"), Some(&Value::String("1728000".to_string())));
    }

    #[test]
    fn test_conditional_return_requires_status() {
        let lines = split_lines("if ($request_method = 'OPTIONS') {\n add_header X-Test 1;\n}");
        assert!(parse_conditional_return(&lines).is_none());
    }

    #[test]
    fn test_conditional_return_only_matches_options() {
        let lines = split_lines("if ($request_method = 'POST') {\n return 403;\n}");
        assert!(parse_conditional_return(&lines).is_none());
    }

    #[test]
    fn test_generic_header_forms() {
        let lines = split_lines(
            r#"
            add_header X-Frame-Options DENY;
            more_set_headers "X-Served-By: traefik";
            proxy_set_header X-Real-IP $remote_addr;
        "#,
        );
        let snippet = parse_generic(&lines);
        assert_eq!(snippet.response_headers.get("X-Frame-Options"), Some(&"DENY".to_string()));
        assert_eq!(snippet.response_headers.get("X-Served-By"), Some(&"traefik".to_string()));
        assert_eq!(snippet.request_headers.get("X-Real-IP"), Some(&"$remote_addr".to_string()));
        assert!(snippet.warnings.iter().any(|w| w.contains("NGINX variables")), "{:?}", snippet.warnings);
    }

    #[test]
    fn test_generic_unsupported_directives() {
        let lines = split_lines("gzip on;\nproxy_cache my_zone;\ntcp_nodelay on;");
        let snippet = parse_generic(&lines);
        assert!(snippet.request_headers.is_empty());
        assert!(snippet.response_headers.is_empty());
        assert!(snippet.warnings.iter().any(|w| w.contains("gzip is only configurable")));
        assert!(snippet.warnings.iter().any(|w| w.contains("Traefik Enterprise")));
        assert!(snippet.warnings.iter().any(|w| w.contains("unsupported directive") && w.contains("tcp_nodelay")));
    }

    #[test]
    fn test_generic_is_idempotent() {
        let lines = split_lines("add_header X-A 1;\nadd_header X-B 2;\nproxy_set_header Host upstream.local;");
        let first = parse_generic(&lines);
        let second = parse_generic(&lines);
        assert_eq!(first, second);
    }
}
