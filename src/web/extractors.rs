//! Request extractors

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use std::convert::Infallible;

use super::AppState;
use crate::utils::url::UrlUtils;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Public base URL (scheme + host, no trailing slash) of the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicBaseUrl {
    pub base: String,
    pub host: String,
}

impl FromRequestParts<AppState> for PublicBaseUrl {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .or_else(|| parts.uri.authority().map(|a| a.to_string()))
            .unwrap_or_else(|| "localhost".to_string());

        if let Some(configured) = state.config.web.base_url.as_deref() {
            return Ok(Self {
                base: configured.trim_end_matches('/').to_string(),
                host,
            });
        }

        let proto = parts
            .headers
            .get(FORWARDED_PROTO)
            .and_then(|v| v.to_str().ok());

        Ok(Self {
            base: UrlUtils::public_base_url(proto, &host),
            host,
        })
    }
}
