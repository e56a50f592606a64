//! HTTP surface of the addon
//!
//! Handlers are thin. They pull a snapshot from the caches, pass it to the
//! catalog engine, addon builder or stream proxy, and serialize the result.

use anyhow::Result;
use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    addon::AddonBuilder,
    catalog::CatalogOptions,
    channels::{ChannelCache, VavooChannelSource},
    config::Config,
    errors::AppResult,
    logos::{LogoFileLoader, LogoResolver},
    proxy::{StreamProxy, UpstreamClient},
    utils::{Clock, SystemClock},
};

pub mod extractors;
pub mod handlers;
pub mod responses;

pub use extractors::PublicBaseUrl;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub channels: Arc<ChannelCache>,
    pub logos: Arc<LogoResolver>,
    pub proxy: StreamProxy,
    pub addon: Arc<AddonBuilder>,
    pub catalog_options: CatalogOptions,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        Self::with_clock(config, SystemClock::shared())
    }

    /// Wire caches, proxy and builders from configuration
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> AppResult<Self> {
        config.validate()?;
        let client = UpstreamClient::new()?;

        let source = VavooChannelSource::new(client.clone(), &config.upstream, &config.catalog);
        let channels = ChannelCache::new(Arc::new(source), config.cache.channel_ttl, clock.clone());

        let logos = LogoResolver::new(
            Arc::new(LogoFileLoader::new(config.logos.path.clone())),
            config.cache.logo_ttl,
            clock,
        );

        let proxy = StreamProxy::new(client, &config.upstream);
        let addon = AddonBuilder::new(
            config.addon.clone(),
            config.catalog.clone(),
            config.upstream.clone(),
        );

        Ok(Self {
            catalog_options: CatalogOptions::from(&config.catalog),
            config: Arc::new(config),
            channels: Arc::new(channels),
            logos: Arc::new(logos),
            proxy,
            addon: Arc::new(addon),
        })
    }
}

/// Bound address plus the router serving it
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: Config) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;
        let state = AppState::new(config)?;
        let app = Self::create_router(state);
        Ok(Self { app, addr })
    }

    /// Addon, proxy and status routes behind trace and CORS layers
    pub fn create_router(state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::install::root_redirect))
            .route("/install", get(handlers::install::install_page))
            .route("/manifest.json", get(handlers::addon::manifest))
            .route("/catalog/{kind}/{file}", get(handlers::addon::catalog))
            .route(
                "/catalog/{kind}/{id}/{extra}",
                get(handlers::addon::catalog_with_extra),
            )
            .route("/meta/{kind}/{file}", get(handlers::addon::meta))
            .route("/stream/{kind}/{file}", get(handlers::addon::stream))
            .route("/proxy/m3u", get(handlers::proxy::proxy_playlist))
            .route("/proxy/ts", get(handlers::proxy::proxy_segment))
            .route("/status.json", get(handlers::status::status))
            .fallback(handlers::install::fallback_redirect)
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        info!("Web server listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
