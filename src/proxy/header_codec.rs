//! Forward-header codec
//!
//! Headers the proxy must present to the origin travel inside our own URLs as
//! `header_<Name>=<Value>` query parameters, so a player that only knows how
//! to GET a URL still reaches the origin with the right Referer/User-Agent.

use indexmap::IndexMap;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;
use url::form_urlencoded;

use crate::config::UpstreamConfig;

const HEADER_PARAM_PREFIX: &str = "header_";

/// Ordered set of headers sent to the origin, keyed by canonical name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardHeaders {
    entries: IndexMap<String, String>,
}

impl ForwardHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Origin-impersonating defaults taken from the upstream config
    pub fn defaults(upstream: &UpstreamConfig) -> Self {
        let mut headers = Self::new();
        headers.insert("User-Agent", &upstream.user_agent);
        headers.insert("Referer", &upstream.referer);
        headers.insert("Origin", &upstream.origin);
        headers
    }

    /// Insert or replace a header; an existing entry keeps its position
    pub fn insert(&mut self, name: &str, value: &str) {
        self.entries
            .insert(canonical_header_name(name), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&canonical_header_name(name))
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `self` as the base with every header from `overrides` replacing same-named entries
    pub fn merged_with(&self, overrides: &ForwardHeaders) -> ForwardHeaders {
        let mut merged = self.clone();
        for (name, value) in overrides.iter() {
            merged.insert(name, value);
        }
        merged
    }

    /// Convert into a reqwest header map, dropping names or values HTTP cannot carry
    pub fn to_header_map(&self) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(self.entries.len());
        for (name, value) in self.iter() {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(n), Ok(v)) => {
                    map.insert(n, v);
                }
                _ => debug!(header = name, "Skipping header not representable in HTTP"),
            }
        }
        map
    }
}

/// Canonical `Title-Case` form of a header name ("user-agent" -> "User-Agent")
pub fn canonical_header_name(name: &str) -> String {
    name.trim()
        .split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Encodes forward headers into query fragments and back
pub struct HeaderCodec;

impl HeaderCodec {
    /// `header_<pct name>=<pct value>` pairs joined by `&`
    pub fn encode(headers: &ForwardHeaders) -> String {
        headers
            .iter()
            .map(|(name, value)| {
                format!(
                    "{HEADER_PARAM_PREFIX}{}={}",
                    urlencoding::encode(name),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Extract forward headers from a raw (still percent-encoded) query string.
    ///
    /// Keys match the prefix case-insensitively. Underscores in the decoded
    /// name become hyphens, so names that genuinely contain `_` do not survive.
    pub fn decode(raw_query: &str) -> ForwardHeaders {
        let mut headers = ForwardHeaders::new();
        for (key, value) in form_urlencoded::parse(raw_query.as_bytes()) {
            let Some(name) = strip_header_prefix(&key) else {
                continue;
            };
            let name = name.replace('_', "-");
            if name.trim().is_empty() {
                continue;
            }
            headers.insert(&name, value.trim());
        }
        headers
    }
}

fn strip_header_prefix(key: &str) -> Option<&str> {
    let prefix_len = HEADER_PARAM_PREFIX.len();
    if key.len() >= prefix_len
        && key.is_char_boundary(prefix_len)
        && key[..prefix_len].eq_ignore_ascii_case(HEADER_PARAM_PREFIX)
    {
        Some(&key[prefix_len..])
    } else {
        None
    }
}

/// First value of a plain (non-header) query parameter, percent-decoded
pub fn query_param(raw_query: &str, name: &str) -> Option<String> {
    form_urlencoded::parse(raw_query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
