//! Playlist and segment proxy endpoints

use axum::{
    body::Body,
    extract::{RawQuery, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::errors::AppResult;
use crate::proxy::{HeaderCodec, SEGMENT_CONTENT_TYPE, header_codec::query_param};
use crate::web::AppState;

/// `GET /proxy/m3u?url=<enc>&header_<Name>=<enc>...`
pub async fn proxy_playlist(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> AppResult<Response> {
    let query = query.unwrap_or_default();
    let url = query_param(&query, "url").unwrap_or_default();
    let overrides = HeaderCodec::decode(&query);

    let playlist = state.proxy.proxy_playlist(&url, &overrides).await?;

    Ok((
        [
            (header::CONTENT_TYPE, playlist.content_type()),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        playlist.body,
    )
        .into_response())
}

/// `GET /proxy/ts?url=<enc>&header_<Name>=<enc>...`
pub async fn proxy_segment(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> AppResult<Response> {
    let query = query.unwrap_or_default();
    let url = query_param(&query, "url").unwrap_or_default();
    let overrides = HeaderCodec::decode(&query);

    let relay = state.proxy.relay_segment(&url, &overrides).await?;

    let mut response = (
        [(header::CONTENT_TYPE, SEGMENT_CONTENT_TYPE)],
        Body::from_stream(relay.body),
    )
        .into_response();
    if let Some(len) = relay.content_length {
        response
            .headers_mut()
            .insert(header::CONTENT_LENGTH, header::HeaderValue::from(len));
    }
    Ok(response)
}
