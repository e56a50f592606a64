//! Loads the channel list from the origin

use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, warn};

use super::ChannelListing;
use super::grouping::build_groups;
use super::models::Channel;
use crate::cache::CacheLoader;
use crate::config::{CatalogConfig, UpstreamConfig};
use crate::errors::{UpstreamError, UpstreamResult};
use crate::proxy::{ForwardHeaders, UpstreamClient};

/// Fetches the origin's full channel list, keeps one country and groups it
pub struct VavooChannelSource {
    client: UpstreamClient,
    headers: ForwardHeaders,
    channels_url: String,
    stream_url_template: String,
    country: String,
    timeout: Duration,
    grouping: bool,
}

impl VavooChannelSource {
    pub fn new(client: UpstreamClient, upstream: &UpstreamConfig, catalog: &CatalogConfig) -> Self {
        Self {
            client,
            headers: ForwardHeaders::defaults(upstream),
            channels_url: upstream.channels_url.clone(),
            stream_url_template: upstream.stream_url_template.clone(),
            country: upstream.country.clone(),
            timeout: upstream.channel_fetch_timeout,
            grouping: catalog.group_duplicates,
        }
    }

    fn listing_from(&self, channels: Vec<Channel>) -> UpstreamResult<ChannelListing> {
        let total = channels.len();
        let selected: Vec<Channel> = channels
            .into_iter()
            .filter(|c| c.is_from(&self.country))
            .collect();

        if selected.is_empty() {
            warn!("No {} channels among {} returned by origin", self.country, total);
            return Err(UpstreamError::empty(format!("{} channels", self.country)));
        }

        info!("{} channels loaded: {} of {}", self.country, selected.len(), total);
        let template = &self.stream_url_template;
        let groups = build_groups(selected, self.grouping, |id| template.replace("{id}", id));
        Ok(ChannelListing::new(groups))
    }
}

#[async_trait]
impl CacheLoader<ChannelListing> for VavooChannelSource {
    fn name(&self) -> &str {
        "channels"
    }

    async fn load(&self) -> UpstreamResult<ChannelListing> {
        info!("Requesting channel list from {}", self.channels_url);
        let channels: Vec<Channel> = self
            .client
            .get_json(&self.channels_url, &self.headers, self.timeout)
            .await?;
        self.listing_from(channels)
    }
}
