use traefikize_model::Annotation;

use crate::context::{ConvertContext, Options};
use crate::error::ConvertError;
use crate::middleware::rewrite_response_headers_middleware;

/// `proxy-cookie-path` becomes a plugin-backed middleware rewriting the
/// `Path=` attribute of `Set-Cookie` response headers.
pub fn proxy_cookie_path(ctx: &mut ConvertContext, opts: &Options) -> Result<(), ConvertError> {
    tracing::debug!("running converter ProxyCookiePath");

    let Some(value) = ctx.annotation(Annotation::ProxyCookiePath).map(str::to_string) else {
        return Ok(());
    };
    if value.trim().is_empty() {
        ctx.report_ignored(Annotation::ProxyCookiePath, "empty value");
        return Ok(());
    }

    // NGINX format: "<from> <to>", with quoting when values carry spaces
    let normalized = normalize_whitespace(&value);
    let Some((from, to)) = parse_two_args(&normalized) else {
        let message = "proxy-cookie-path has invalid format, expected: '<from> <to>' (quotes required if values contain spaces)";
        ctx.warn(message);
        ctx.report_skipped(Annotation::ProxyCookiePath, message);
        return Ok(());
    };

    if opts.disable_plugins {
        let message = "proxy-cookie-path has no native Traefik equivalent; requires a response header rewrite plugin or backend change";
        ctx.warn(message);
        ctx.report_skipped(Annotation::ProxyCookiePath, message);
        return Ok(());
    }

    // Example: (.*?)(Path=/backend)(.*)  ->  $1Path=/$3
    let regex = format!("(.*?)(Path={})(.*)", regex::escape(&from));
    let replacement = format!("$1Path={}$3", to);

    let middleware = rewrite_response_headers_middleware(ctx, "proxy-cookie-path", "Set-Cookie", regex, replacement)?;
    ctx.result.middlewares.push(middleware);

    ctx.report_converted(Annotation::ProxyCookiePath);

    Ok(())
}

fn normalize_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a two-argument NGINX directive value, honoring the quoting
/// combinations NGINX accepts.
fn parse_two_args(value: &str) -> Option<(String, String)> {
    let mut value = value.trim();

    // A fully wrapped value is unwrapped once: "\"/backend /\"" -> "/backend /"
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') && !value[1..value.len() - 1].contains('"') {
        value = value[1..value.len() - 1].trim();
    }

    // Both args quoted: "from" "to with spaces"
    if let Some(rest) = value.strip_prefix('"') {
        let index = rest.find('"')?;
        let from = &rest[..index];
        let rest = rest[index + 1..].trim();

        let rest = rest.strip_prefix('"')?;
        let end = rest.rfind('"')?;
        return Some((from.to_string(), rest[..end].to_string()));
    }

    // Unquoted first, quoted second: / "/platform/; HTTPOnly; Secure"
    if value.contains('"') {
        let index = value.find([' ', '\t'])?;
        let from = value[..index].trim();
        let rest = value[index..].trim();

        let to = rest.strip_prefix('"')?.strip_suffix('"')?;
        return Some((from.to_string(), to.to_string()));
    }

    // Plain space-separated: from to
    let parts: Vec<&str> = value.split_whitespace().collect();
    if parts.len() != 2 {
        return None;
    }
    Some((parts[0].to_string(), parts[1].to_string()))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_two_args_plain() {
        assert_eq!(parse_two_args("/backend /"), Some(("/backend".to_string(), "/".to_string())));
        assert_eq!(parse_two_args("/backend"), None);
        assert_eq!(parse_two_args("/a /b /c"), None);
    }

    #[test]
    fn test_parse_two_args_quoted_pair() {
        assert_eq!(
            parse_two_args(r#""/" "/platform/oauth/; HTTPOnly; Secure; Domain=my.test.com""#),
            Some(("/".to_string(), "/platform/oauth/; HTTPOnly; Secure; Domain=my.test.com".to_string()))
        );
    }

    #[test]
    fn test_parse_two_args_unquoted_then_quoted() {
        assert_eq!(
            parse_two_args(r#"/ "/platform/; HTTPOnly""#),
            Some(("/".to_string(), "/platform/; HTTPOnly".to_string()))
        );
    }

    #[test]
    fn test_parse_two_args_wrapped() {
        assert_eq!(parse_two_args(r#""/backend /""#), Some(("/backend".to_string(), "/".to_string())));
    }
}
