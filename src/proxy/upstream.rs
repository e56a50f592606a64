//! Shared HTTP client for every request made to the origin

use reqwest::{Client, Response, redirect};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::header_codec::ForwardHeaders;
use crate::errors::{UpstreamError, UpstreamResult};

const MAX_REDIRECTS: usize = 10;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Thin wrapper around a pooled reqwest client.
///
/// Every call carries an explicit deadline and follows redirects; non-2xx
/// answers are turned into [`UpstreamError::Status`].
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
}

/// A successful text fetch together with where it finally came from
#[derive(Debug, Clone)]
pub struct FetchedText {
    pub final_url: Url,
    pub body: String,
}

impl UpstreamClient {
    pub fn new() -> UpstreamResult<Self> {
        let client = Client::builder()
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .connect_timeout(CONNECT_TIMEOUT)
            .pool_max_idle_per_host(8)
            .build()
            .map_err(|e| UpstreamError::RequestFailed {
                url: String::new(),
                message: format!("Failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }

    /// Issue a GET and return the response once the status line is in
    pub async fn get(
        &self,
        url: &str,
        headers: &ForwardHeaders,
        timeout: Duration,
    ) -> UpstreamResult<Response> {
        debug!(url = url, timeout_ms = timeout.as_millis() as u64, "Upstream GET");

        let response = self
            .client
            .get(url)
            .headers(headers.to_header_map())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upstream responded with error status {} for {}", status, url);
            return Err(UpstreamError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if response.url().as_str() != url {
            debug!(from = url, to = %response.url(), "Upstream redirected");
        }
        Ok(response)
    }

    /// GET a text document, remembering the post-redirect URL
    pub async fn get_text(
        &self,
        url: &str,
        headers: &ForwardHeaders,
        timeout: Duration,
    ) -> UpstreamResult<FetchedText> {
        let response = self.get(url, headers, timeout).await?;
        let final_url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::from_reqwest(url, e))?;
        Ok(FetchedText { final_url, body })
    }

    /// GET and deserialize a JSON document
    pub async fn get_json<T>(
        &self,
        url: &str,
        headers: &ForwardHeaders,
        timeout: Duration,
    ) -> UpstreamResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let fetched = self.get_text(url, headers, timeout).await?;
        serde_json::from_str(&fetched.body).map_err(|e| UpstreamError::malformed(e.to_string()))
    }
}
