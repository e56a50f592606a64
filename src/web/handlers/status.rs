use axum::{Json, extract::State};
use serde::Serialize;

use crate::cache::{CachePayload, CacheStatus};
use crate::web::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub channels_count: usize,
    pub logos_count: usize,
    pub channels_cache_timestamp: f64,
    pub channels_cache_age_seconds: f64,
    pub logos_cache_timestamp: f64,
    pub logos_cache_age_seconds: f64,
    pub version: String,
}

fn unix_seconds(status: &CacheStatus) -> f64 {
    status
        .fetched_at
        .map(|t| t.timestamp_millis() as f64 / 1000.0)
        .unwrap_or(0.0)
}

/// Loads both caches (refreshing if stale) and reports their size and age
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let listing = state.channels.get().await;
    let logos = state.logos.table().await;
    let channels_status = state.channels.status().await;
    let logos_status = state.logos.status().await;

    Json(StatusResponse {
        status: "online",
        channels_count: listing.item_count(),
        logos_count: logos.len(),
        channels_cache_timestamp: unix_seconds(&channels_status),
        channels_cache_age_seconds: channels_status.age_seconds,
        logos_cache_timestamp: unix_seconds(&logos_status),
        logos_cache_age_seconds: logos_status.age_seconds,
        version: state.config.addon.version.clone(),
    })
}
