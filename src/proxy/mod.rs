//! Streaming proxy layer
//!
//! Playlists and segments are fetched from the origin with the forward
//! headers merged over the configured defaults. Segmented manifests are
//! rewritten so their media segments come back through [`SEGMENT_PROXY_PATH`].

use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

pub mod chunked;
pub mod header_codec;
pub mod playlist;
pub mod relay_session;
pub mod upstream;

pub use header_codec::{ForwardHeaders, HeaderCodec};
pub use playlist::{PlaylistDocument, PlaylistKind, PlaylistLine};
pub use upstream::UpstreamClient;

use crate::config::UpstreamConfig;
use crate::errors::{AppError, AppResult};
use relay_session::RelaySession;

pub const PLAYLIST_PROXY_PATH: &str = "/proxy/m3u";
pub const SEGMENT_PROXY_PATH: &str = "/proxy/ts";
pub const SEGMENT_CONTENT_TYPE: &str = "video/mp2t";

/// Playlist ready to be returned to the client
#[derive(Debug, Clone)]
pub struct ProxiedPlaylist {
    pub kind: PlaylistKind,
    pub final_url: Url,
    pub body: String,
}

impl ProxiedPlaylist {
    pub fn content_type(&self) -> &'static str {
        self.kind.content_type()
    }
}

/// Open upstream segment body, re-framed and accounted for
pub struct SegmentRelay {
    pub content_length: Option<u64>,
    pub body: BoxStream<'static, Result<Bytes, reqwest::Error>>,
}

impl std::fmt::Debug for SegmentRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentRelay")
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Fetches playlists and segments from the origin on behalf of clients
#[derive(Debug, Clone)]
pub struct StreamProxy {
    client: UpstreamClient,
    default_headers: ForwardHeaders,
    playlist_timeout: Duration,
    segment_timeout: Duration,
    segment_chunk_size: usize,
}

impl StreamProxy {
    pub fn new(client: UpstreamClient, upstream: &UpstreamConfig) -> Self {
        Self {
            client,
            default_headers: ForwardHeaders::defaults(upstream),
            playlist_timeout: upstream.playlist_timeout,
            segment_timeout: upstream.segment_timeout,
            segment_chunk_size: upstream.segment_chunk_size,
        }
    }

    /// Defaults overridden by whatever the request carried
    pub fn forward_headers(&self, overrides: &ForwardHeaders) -> ForwardHeaders {
        self.default_headers.merged_with(overrides)
    }

    /// Fetch, classify and (for segmented manifests) rewrite a playlist
    pub async fn proxy_playlist(
        &self,
        url: &str,
        overrides: &ForwardHeaders,
    ) -> AppResult<ProxiedPlaylist> {
        let url = require_url(url)?;
        let headers = self.forward_headers(overrides);

        info!("Proxy m3u: fetching {}", url);
        let fetched = self
            .client
            .get_text(url, &headers, self.playlist_timeout)
            .await?;

        let kind = PlaylistKind::classify(&fetched.body);
        debug!(url = %fetched.final_url, kind = ?kind, "Playlist classified");

        let body = match kind {
            PlaylistKind::FlatMediaList => fetched.body,
            PlaylistKind::SegmentedManifest => {
                let headers_query = HeaderCodec::encode(&headers);
                let document = PlaylistDocument::parse(&fetched.body);
                let rewritten = playlist::rewrite_manifest(
                    &document,
                    &fetched.final_url,
                    SEGMENT_PROXY_PATH,
                    &headers_query,
                );
                info!(
                    "Proxy m3u: rewrote {} segments from {}",
                    document.segment_count(),
                    fetched.final_url
                );
                rewritten
            }
        };

        Ok(ProxiedPlaylist {
            kind,
            final_url: fetched.final_url,
            body,
        })
    }

    /// Open a segment on the origin and hand back its body as a chunked stream
    pub async fn relay_segment(
        &self,
        url: &str,
        overrides: &ForwardHeaders,
    ) -> AppResult<SegmentRelay> {
        let url = require_url(url)?;
        let headers = self.forward_headers(overrides);

        let response = self.client.get(url, &headers, self.segment_timeout).await?;
        let content_length = response.content_length();
        debug!(url = url, content_length = ?content_length, "Segment upstream accepted");

        let session = RelaySession::new(url, content_length);
        let chunks = chunked::fixed_size_chunks(response.bytes_stream(), self.segment_chunk_size);
        let body = relay_session::tracked(chunks, session).boxed();

        Ok(SegmentRelay {
            content_length,
            body,
        })
    }
}

fn require_url(url: &str) -> AppResult<&str> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(AppError::missing_parameter("url"));
    }
    Ok(trimmed)
}
