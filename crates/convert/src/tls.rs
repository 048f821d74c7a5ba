use traefikize_model::{Annotation, ClientAuth, IngressRoute, IngressRouteTls, Scheme, TLSOption, TLSOptionSpec, TlsOptionRef};

use crate::context::ConvertContext;

/// `auth-tls-verify-client` + `auth-tls-secret` become a TLSOption with
/// mandatory client certificate verification, referenced from the
/// IngressRoute when one is generated.
pub fn auth_tls_verify_client(ctx: &mut ConvertContext) {
    tracing::debug!("running converter AuthTlsVerifyClient");

    let Some(verify) = ctx.annotation(Annotation::AuthTlsVerifyClient).map(str::to_string) else {
        return;
    };
    if verify != "on" && verify != "true" {
        ctx.report_ignored(
            Annotation::AuthTlsVerifyClient,
            format!("auth-tls-verify-client={} leaves client verification disabled", verify),
        );
        return;
    }

    let secret = ctx.annotation(Annotation::AuthTlsSecret).unwrap_or_default().to_string();
    if secret.is_empty() {
        ctx.warn("auth-tls-verify-client is enabled but auth-tls-secret is missing");
        ctx.report_skipped(Annotation::AuthTlsVerifyClient, "auth-tls-secret is missing");
        return;
    }

    emit_tls_option(ctx, &secret, "RequireAndVerifyClientCert");

    ctx.report_converted(Annotation::AuthTlsVerifyClient);
    ctx.report_converted(Annotation::AuthTlsSecret);
}

fn emit_tls_option(ctx: &mut ConvertContext, secret_name: &str, client_auth_type: &str) {
    let name = format!("{}-mtls", ctx.ingress_name);

    let option = TLSOption::named(
        &name,
        &ctx.namespace,
        TLSOptionSpec {
            client_auth: ClientAuth {
                client_auth_type: client_auth_type.to_string(),
                secret_names: vec![secret_name.to_string()],
            },
        },
    );

    ctx.result.tls_options.push(option);
    ctx.result.tls_option_refs.insert(ctx.ingress_name.clone(), name);

    ctx.warn("auth-tls-secret must contain CA certificates only; server cert secrets cannot be reused");
    ctx.warn("CA certificates must be mounted into Traefik via static configuration");
}

/// Attach the registered TLS option to the generated route, but only for
/// HTTPS backends.
pub fn apply_tls_option(ingress_route: &mut IngressRoute, ctx: &ConvertContext, scheme: Scheme) {
    if scheme != Scheme::Https {
        return;
    }

    if let Some(option) = ctx.result.tls_option_refs.get(&ctx.ingress_name) {
        ingress_route.spec.tls = Some(IngressRouteTls {
            options: Some(TlsOptionRef { name: option.clone() }),
        });
    }
}
