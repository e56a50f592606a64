//! Addon protocol handlers: manifest, catalog, meta and stream

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::Uri,
};
use tracing::{debug, info, warn};

use crate::addon::{
    CONTENT_TYPE_TV, CatalogResponse, Manifest, MetaResponse, StreamResponse,
};
use crate::catalog::{self, CatalogQuery};
use crate::web::{AppState, PublicBaseUrl};

/// `rai1.json` -> `rai1`; anything without the suffix is not a protocol path
fn json_stem(file: &str) -> Option<&str> {
    file.strip_suffix(".json")
}

pub async fn manifest(State(state): State<AppState>) -> Json<Manifest> {
    debug!("Manifest served");
    Json(state.addon.manifest())
}

pub async fn catalog(
    State(state): State<AppState>,
    Path((kind, file)): Path<(String, String)>,
    query: Result<Query<CatalogQuery>, QueryRejection>,
) -> Json<CatalogResponse> {
    let query = match query {
        Ok(Query(q)) => q,
        Err(e) => {
            debug!("Ignoring unparsable catalog query: {}", e);
            CatalogQuery::default()
        }
    };
    let id = json_stem(&file).unwrap_or_default();
    Json(catalog_response(&state, &kind, id, &query).await)
}

/// The extra segment is read from the raw URI: `Path` would decode `%26`
/// before the segment is split into parameters.
pub async fn catalog_with_extra(
    State(state): State<AppState>,
    Path((kind, id, _)): Path<(String, String, String)>,
    uri: Uri,
) -> Json<CatalogResponse> {
    let raw_extra = uri.path().rsplit('/').next().unwrap_or_default();
    let query = CatalogQuery::from_extra(raw_extra);
    Json(catalog_response(&state, &kind, &id, &query).await)
}

async fn catalog_response(
    state: &AppState,
    kind: &str,
    id: &str,
    query: &CatalogQuery,
) -> CatalogResponse {
    info!("Catalog request: {}/{}", kind, id);
    if kind != CONTENT_TYPE_TV || id != state.addon.catalog_id() {
        warn!("Unsupported catalog requested: {}/{}", kind, id);
        return CatalogResponse::default();
    }

    let listing = state.channels.get().await;
    let logos = state.logos.table().await;
    let page = catalog::run(listing.groups(), query, state.catalog_options);

    CatalogResponse {
        metas: page
            .into_iter()
            .map(|group| state.addon.meta_preview(group, &logos))
            .collect(),
    }
}

pub async fn meta(
    State(state): State<AppState>,
    Path((kind, file)): Path<(String, String)>,
) -> Json<MetaResponse> {
    let id = json_stem(&file).unwrap_or_default();
    info!("Meta request: {}/{}", kind, id);

    let raw_id = match state.addon.raw_id(id) {
        Some(raw) if kind == CONTENT_TYPE_TV => raw,
        _ => {
            warn!("Unsupported meta type or id prefix: {}/{}", kind, id);
            return Json(MetaResponse::default());
        }
    };

    let listing = state.channels.get().await;
    let Some(group) = listing.find(raw_id) else {
        warn!("Channel not found: {}", raw_id);
        return Json(MetaResponse::default());
    };

    let logos = state.logos.table().await;
    Json(MetaResponse {
        meta: Some(state.addon.meta_detail(raw_id, group, &logos)),
    })
}

pub async fn stream(
    State(state): State<AppState>,
    base_url: PublicBaseUrl,
    Path((kind, file)): Path<(String, String)>,
) -> Json<StreamResponse> {
    let id = json_stem(&file).unwrap_or_default();
    info!("Stream request: {}/{}", kind, id);

    let raw_id = match state.addon.raw_id(id) {
        Some(raw) if kind == CONTENT_TYPE_TV => raw,
        _ => {
            warn!("Unsupported stream type or id prefix: {}/{}", kind, id);
            return Json(StreamResponse::default());
        }
    };

    let listing = state.channels.get().await;
    let group = listing.find(raw_id);
    let streams = state.addon.streams(&base_url.base, raw_id, group);
    info!(
        "Stream served for channel {} ({} variants)",
        group.map(|g| g.display_name.as_str()).unwrap_or("unknown"),
        streams.len()
    );
    Json(StreamResponse { streams })
}
