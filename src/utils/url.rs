//! URL utilities for consistent URL handling
//!
//! This module provides the URL manipulation used by the proxy layer:
//! resolving playlist references against the origin, and working out the
//! public base URL the addon advertises to clients.

use url::Url;

/// URL utilities for consistent URL handling
pub struct UrlUtils;

impl UrlUtils {
    /// Resolve a possibly-relative reference against the document it came from.
    ///
    /// Standard RFC 3986 resolution: `seg1.ts` under
    /// `https://cdn.example/path/index.m3u8` becomes
    /// `https://cdn.example/path/seg1.ts`, absolute references are kept.
    pub fn resolve(base: &Url, reference: &str) -> Result<Url, url::ParseError> {
        base.join(reference)
    }

    /// Whether a `Host` header value points at the local machine
    pub fn is_local_host(host: &str) -> bool {
        let name = host
            .rsplit_once(':')
            .filter(|(_, port)| port.chars().all(|c| c.is_ascii_digit()))
            .map(|(name, _)| name)
            .unwrap_or(host);
        matches!(name, "localhost" | "127.0.0.1" | "[::1]")
    }

    /// Public base URL for links handed back to clients.
    ///
    /// A reverse proxy announcing `X-Forwarded-Proto: https` wins; local
    /// development hosts keep plain http; everything else is forced to https.
    pub fn public_base_url(forwarded_proto: Option<&str>, host: &str) -> String {
        let host = host.trim_end_matches('/');
        match forwarded_proto.map(str::trim) {
            Some(proto) if proto.eq_ignore_ascii_case("https") => format!("https://{host}"),
            _ if Self::is_local_host(host) => format!("http://{host}"),
            _ => format!("https://{host}"),
        }
    }
}
