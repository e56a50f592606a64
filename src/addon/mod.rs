//! Media-addon protocol surface: manifest, catalog, meta and stream objects
//!
//! [`AddonBuilder`] turns cached channel groups into protocol objects. It
//! owns no state beyond configuration; callers pass in the listing snapshot,
//! the logo table and the public base URL of the current request.

pub mod descriptors;

pub use descriptors::*;

use crate::catalog::{all_genres, genre_of};
use crate::channels::ChannelGroup;
use crate::config::{AddonConfig, CatalogConfig, UpstreamConfig};
use crate::logos::{LogoTable, resolve_in};
use crate::proxy::{ForwardHeaders, HeaderCodec, PLAYLIST_PROXY_PATH};

const BACKGROUND_PLACEHOLDER_BASE: &str = "https://via.placeholder.com/1280x720/000080/FFFFFF";
const STREAM_PROVIDER_NAME: &str = "Vavoo.to";
const RELEASE_INFO: &str = "24/7 Live";
const UNKNOWN_CHANNEL_NAME: &str = "Unknown";

#[derive(Debug, Clone)]
pub struct AddonBuilder {
    addon: AddonConfig,
    catalog: CatalogConfig,
    upstream: UpstreamConfig,
    stream_headers: ForwardHeaders,
}

impl AddonBuilder {
    pub fn new(addon: AddonConfig, catalog: CatalogConfig, upstream: UpstreamConfig) -> Self {
        let stream_headers = ForwardHeaders::defaults(&upstream);
        Self {
            addon,
            catalog,
            upstream,
            stream_headers,
        }
    }

    pub fn catalog_id(&self) -> &str {
        &self.catalog.id
    }

    /// Raw channel id from a protocol id, when it carries our prefix
    pub fn raw_id<'a>(&self, id: &'a str) -> Option<&'a str> {
        id.strip_prefix(self.catalog.id_prefix.as_str())
            .filter(|raw| !raw.is_empty())
    }

    pub fn prefixed_id(&self, raw_id: &str) -> String {
        format!("{}{}", self.catalog.id_prefix, raw_id)
    }

    pub fn manifest(&self) -> Manifest {
        let scoped = |name: &str| ManifestResource::Scoped {
            name: name.to_string(),
            types: vec![CONTENT_TYPE_TV.to_string()],
            id_prefixes: vec![self.catalog.id_prefix.clone()],
        };
        let extra = ["search", "genre", "skip"]
            .iter()
            .map(|name| ExtraDescriptor {
                name: name.to_string(),
                is_required: false,
            })
            .collect();

        Manifest {
            id: self.addon.id.clone(),
            version: self.addon.version.clone(),
            name: self.addon.name.clone(),
            description: self.addon.description.clone(),
            resources: vec![
                ManifestResource::Name("catalog".to_string()),
                scoped("meta"),
                scoped("stream"),
            ],
            types: vec![CONTENT_TYPE_TV.to_string()],
            catalogs: vec![CatalogDescriptor {
                kind: CONTENT_TYPE_TV.to_string(),
                id: self.catalog.id.clone(),
                name: self.catalog.name.clone(),
                extra,
                genres: all_genres().iter().map(|g| g.to_string()).collect(),
            }],
            behavior_hints: BehaviorHints {
                configurable: false,
                configuration_required: false,
            },
            logo: self.addon.logo.clone(),
            background: self.addon.background.clone(),
            contact_email: self.addon.contact_email.clone(),
        }
    }

    pub fn meta_preview(&self, group: &ChannelGroup, logos: &LogoTable) -> MetaPreview {
        self.preview_for(group.id(), &group.display_name, logos)
    }

    /// Detail for `raw_id`, which may be any member of `group`
    pub fn meta_detail(&self, raw_id: &str, group: &ChannelGroup, logos: &LogoTable) -> MetaDetail {
        MetaDetail {
            preview: self.preview_for(raw_id, &group.display_name, logos),
            description: format!("Canale TV italiano: {}", group.display_name),
            release_info: RELEASE_INFO.to_string(),
        }
    }

    fn preview_for(&self, raw_id: &str, name: &str, logos: &LogoTable) -> MetaPreview {
        let logo = resolve_in(logos, name);
        MetaPreview {
            id: self.prefixed_id(raw_id),
            kind: CONTENT_TYPE_TV.to_string(),
            name: name.to_string(),
            genres: vec![genre_of(name).to_string()],
            poster: logo.clone(),
            poster_shape: "square".to_string(),
            background: format!(
                "{BACKGROUND_PLACEHOLDER_BASE}?text={}",
                urlencoding::encode(name)
            ),
            logo,
        }
    }

    /// Proxied playlist URL for an origin manifest, carrying the default headers
    pub fn proxied_playlist_url(&self, base_url: &str, origin_url: &str) -> String {
        format!(
            "{}{}?url={}&{}",
            base_url.trim_end_matches('/'),
            PLAYLIST_PROXY_PATH,
            urlencoding::encode(origin_url),
            HeaderCodec::encode(&self.stream_headers)
        )
    }

    /// One descriptor per stream of the group, or a single best-effort
    /// descriptor for the raw id when the channel is not (or no longer) listed
    pub fn streams(
        &self,
        base_url: &str,
        raw_id: &str,
        group: Option<&ChannelGroup>,
    ) -> Vec<StreamDescriptor> {
        let Some(group) = group else {
            return vec![StreamDescriptor {
                url: self.proxied_playlist_url(base_url, &self.upstream.stream_url_for(raw_id)),
                title: stream_title(UNKNOWN_CHANNEL_NAME, None),
                name: STREAM_PROVIDER_NAME.to_string(),
            }];
        };

        let numbered = group.streams.len() > 1;
        group
            .streams
            .iter()
            .enumerate()
            .map(|(index, stream)| StreamDescriptor {
                url: self.proxied_playlist_url(base_url, &stream.resolved_url),
                title: stream_title(&group.display_name, numbered.then_some(index + 1)),
                name: STREAM_PROVIDER_NAME.to_string(),
            })
            .collect()
    }
}

fn stream_title(name: &str, number: Option<usize>) -> String {
    match number {
        Some(n) => format!("{name} - Vavoo.to Stream ({n})"),
        None => format!("{name} - Vavoo.to Stream"),
    }
}
