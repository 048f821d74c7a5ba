use std::fmt::Display;
use std::str::FromStr;

/// Common prefix of every recognized directive key.
pub const ANNOTATION_PREFIX: &str = "nginx.ingress.kubernetes.io/";

/// The closed set of NGINX Ingress annotations the converters understand.
///
/// Keys outside this set are never inspected or reported. Adding a new
/// directive means adding a variant here, which the compiler then forces
/// through [`Annotation::as_key`] and [`Annotation::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Annotation {
    AuthType,
    AuthSecret,
    AuthRealm,
    AuthUrl,
    ProxyBodySize,
    ConfigurationSnippet,
    EnableCors,
    CorsAllowOrigin,
    CorsAllowMethods,
    CorsAllowHeaders,
    CorsAllowCredentials,
    CorsMaxAge,
    CorsExposeHeaders,
    ProxyBuffering,
    ServiceUpstream,
    EnableOpentracing,
    EnableOpentelemetry,
    BackendProtocol,
    GrpcBackend,
    ProxyBufferSize,
    LimitRps,
    LimitBurstMultiplier,
    RewriteTarget,
    SslRedirect,
    ForceSslRedirect,
    UpstreamVhost,
    ProxyRedirectFrom,
    ProxyRedirectTo,
    ProxyCookiePath,
    ServerSnippet,
    UnderscoresInHeaders,
    UseRegex,
    AuthTlsVerifyClient,
    AuthTlsSecret,
}

impl Annotation {
    pub const ALL: [Annotation; 34] = [
        Annotation::AuthType,
        Annotation::AuthSecret,
        Annotation::AuthRealm,
        Annotation::AuthUrl,
        Annotation::ProxyBodySize,
        Annotation::ConfigurationSnippet,
        Annotation::EnableCors,
        Annotation::CorsAllowOrigin,
        Annotation::CorsAllowMethods,
        Annotation::CorsAllowHeaders,
        Annotation::CorsAllowCredentials,
        Annotation::CorsMaxAge,
        Annotation::CorsExposeHeaders,
        Annotation::ProxyBuffering,
        Annotation::ServiceUpstream,
        Annotation::EnableOpentracing,
        Annotation::EnableOpentelemetry,
        Annotation::BackendProtocol,
        Annotation::GrpcBackend,
        Annotation::ProxyBufferSize,
        Annotation::LimitRps,
        Annotation::LimitBurstMultiplier,
        Annotation::RewriteTarget,
        Annotation::SslRedirect,
        Annotation::ForceSslRedirect,
        Annotation::UpstreamVhost,
        Annotation::ProxyRedirectFrom,
        Annotation::ProxyRedirectTo,
        Annotation::ProxyCookiePath,
        Annotation::ServerSnippet,
        Annotation::UnderscoresInHeaders,
        Annotation::UseRegex,
        Annotation::AuthTlsVerifyClient,
        Annotation::AuthTlsSecret,
    ];

    /// Full annotation key, prefix included.
    pub fn as_key(&self) -> &'static str {
        match self {
            Annotation::AuthType => "nginx.ingress.kubernetes.io/auth-type",
            Annotation::AuthSecret => "nginx.ingress.kubernetes.io/auth-secret",
            Annotation::AuthRealm => "nginx.ingress.kubernetes.io/auth-realm",
            Annotation::AuthUrl => "nginx.ingress.kubernetes.io/auth-url",
            Annotation::ProxyBodySize => "nginx.ingress.kubernetes.io/proxy-body-size",
            Annotation::ConfigurationSnippet => "nginx.ingress.kubernetes.io/configuration-snippet",
            Annotation::EnableCors => "nginx.ingress.kubernetes.io/enable-cors",
            Annotation::CorsAllowOrigin => "nginx.ingress.kubernetes.io/cors-allow-origin",
            Annotation::CorsAllowMethods => "nginx.ingress.kubernetes.io/cors-allow-methods",
            Annotation::CorsAllowHeaders => "nginx.ingress.kubernetes.io/cors-allow-headers",
            Annotation::CorsAllowCredentials => "nginx.ingress.kubernetes.io/cors-allow-credentials",
            Annotation::CorsMaxAge => "nginx.ingress.kubernetes.io/cors-max-age",
            Annotation::CorsExposeHeaders => "nginx.ingress.kubernetes.io/cors-expose-headers",
            Annotation::ProxyBuffering => "nginx.ingress.kubernetes.io/proxy-buffering",
            Annotation::ServiceUpstream => "nginx.ingress.kubernetes.io/service-upstream",
            Annotation::EnableOpentracing => "nginx.ingress.kubernetes.io/enable-opentracing",
            Annotation::EnableOpentelemetry => "nginx.ingress.kubernetes.io/enable-opentelemetry",
            Annotation::BackendProtocol => "nginx.ingress.kubernetes.io/backend-protocol",
            Annotation::GrpcBackend => "nginx.ingress.kubernetes.io/grpc-backend",
            Annotation::ProxyBufferSize => "nginx.ingress.kubernetes.io/proxy-buffer-size",
            Annotation::LimitRps => "nginx.ingress.kubernetes.io/limit-rps",
            Annotation::LimitBurstMultiplier => "nginx.ingress.kubernetes.io/limit-burst-multiplier",
            Annotation::RewriteTarget => "nginx.ingress.kubernetes.io/rewrite-target",
            Annotation::SslRedirect => "nginx.ingress.kubernetes.io/ssl-redirect",
            Annotation::ForceSslRedirect => "nginx.ingress.kubernetes.io/force-ssl-redirect",
            Annotation::UpstreamVhost => "nginx.ingress.kubernetes.io/upstream-vhost",
            Annotation::ProxyRedirectFrom => "nginx.ingress.kubernetes.io/proxy-redirect-from",
            Annotation::ProxyRedirectTo => "nginx.ingress.kubernetes.io/proxy-redirect-to",
            Annotation::ProxyCookiePath => "nginx.ingress.kubernetes.io/proxy-cookie-path",
            Annotation::ServerSnippet => "nginx.ingress.kubernetes.io/server-snippet",
            Annotation::UnderscoresInHeaders => "nginx.ingress.kubernetes.io/enable-underscores-in-headers",
            Annotation::UseRegex => "nginx.ingress.kubernetes.io/use-regex",
            Annotation::AuthTlsVerifyClient => "nginx.ingress.kubernetes.io/auth-tls-verify-client",
            Annotation::AuthTlsSecret => "nginx.ingress.kubernetes.io/auth-tls-secret",
        }
    }
}

impl Display for Annotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

impl FromStr for Annotation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Annotation::ALL.iter().find(|a| a.as_key() == s).copied().ok_or_else(|| format!("unrecognized annotation: {}", s))
    }
}
