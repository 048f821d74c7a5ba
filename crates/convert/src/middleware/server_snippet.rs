use traefikize_model::Annotation;

use crate::context::ConvertContext;

/// `server-snippet` injects raw NGINX server-scope configuration and is
/// never converted; the advisory depends on what the snippet contains.
pub fn server_snippet(ctx: &mut ConvertContext) {
    tracing::debug!("running converter ServerSnippet");

    let Some(snippet) = ctx.annotation(Annotation::ServerSnippet).map(str::to_string) else {
        return;
    };
    if snippet.trim().is_empty() {
        ctx.report_ignored(Annotation::ServerSnippet, "empty value");
        return;
    }

    if is_only_add_header(&snippet) {
        let message = "server-snippet contains only add_header directives. These were not auto-converted because server-snippet applies at NGINX \
                       server scope. Consider moving them to nginx.ingress.kubernetes.io/configuration-snippet or converting them manually to a \
                       Traefik Headers middleware.";
        ctx.warn(message);
        ctx.report_skipped(Annotation::ServerSnippet, message);
        return;
    }

    if snippet.contains("client_header_buffer_size") || snippet.contains("large_client_header_buffers") {
        let message = "server-snippet configures request header buffer sizes. Traefik does not support per-route header buffer tuning. Equivalent \
                       settings must be configured globally on entryPoints (e.g. http.maxHeaderBytes) in Traefik static configuration.";
        ctx.warn(message);
        ctx.report_skipped(Annotation::ServerSnippet, message);
        return;
    }

    let message = "server-snippet injects raw NGINX server configuration which has no Traefik equivalent; skipped";
    ctx.warn(message);
    ctx.report_skipped(Annotation::ServerSnippet, message);
}

fn is_only_add_header(snippet: &str) -> bool {
    snippet.lines().map(str::trim).filter(|line| !line.is_empty()).all(|line| line.starts_with("add_header"))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_is_only_add_header() {
        assert!(is_only_add_header("add_header X-A 1;\n\nadd_header X-B 2;"));
        assert!(!is_only_add_header("add_header X-A 1;\nreturn 301;"));
    }
}
