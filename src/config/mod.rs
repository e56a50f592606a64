use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

pub mod defaults;
pub mod duration_serde;

use defaults::*;
use duration_serde::{duration, parse_default};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub logos: LogosConfig,
    #[serde(default)]
    pub addon: AddonConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public base URL; derived from request headers when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Origin endpoints, impersonation headers and fetch deadlines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_channels_url")]
    pub channels_url: String,
    /// `{id}` is replaced by the raw channel id
    #[serde(default = "default_stream_url_template")]
    pub stream_url_template: String,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_referer")]
    pub referer: String,
    #[serde(default = "default_origin")]
    pub origin: String,
    #[serde(default = "default_channel_fetch_timeout", with = "duration")]
    pub channel_fetch_timeout: Duration,
    #[serde(default = "default_playlist_timeout", with = "duration")]
    pub playlist_timeout: Duration,
    #[serde(default = "default_segment_timeout", with = "duration")]
    pub segment_timeout: Duration,
    #[serde(default = "default_segment_chunk_size")]
    pub segment_chunk_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_channel_ttl", with = "duration")]
    pub channel_ttl: Duration,
    #[serde(default = "default_logo_ttl", with = "duration")]
    pub logo_ttl: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_id")]
    pub id: String,
    #[serde(default = "default_catalog_name")]
    pub name: String,
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_sort_by_name")]
    pub sort_by_name: bool,
    /// Collapse "Name 2"-style duplicates into one multi-stream entry
    #[serde(default = "default_group_duplicates")]
    pub group_duplicates: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogosConfig {
    #[serde(default = "default_logos_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddonConfig {
    #[serde(default = "default_addon_id")]
    pub id: String,
    #[serde(default = "default_addon_version")]
    pub version: String,
    #[serde(default = "default_addon_name")]
    pub name: String,
    #[serde(default = "default_addon_description")]
    pub description: String,
    #[serde(default = "default_addon_logo")]
    pub logo: String,
    #[serde(default = "default_addon_background")]
    pub background: String,
    #[serde(default = "default_contact_email")]
    pub contact_email: String,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_channels_url() -> String {
    DEFAULT_CHANNELS_URL.to_string()
}

fn default_stream_url_template() -> String {
    DEFAULT_STREAM_URL_TEMPLATE.to_string()
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_referer() -> String {
    DEFAULT_REFERER.to_string()
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

fn default_channel_fetch_timeout() -> Duration {
    parse_default(DEFAULT_CHANNEL_FETCH_TIMEOUT)
}

fn default_playlist_timeout() -> Duration {
    parse_default(DEFAULT_PLAYLIST_TIMEOUT)
}

fn default_segment_timeout() -> Duration {
    parse_default(DEFAULT_SEGMENT_TIMEOUT)
}

fn default_segment_chunk_size() -> usize {
    DEFAULT_SEGMENT_CHUNK_SIZE
}

fn default_channel_ttl() -> Duration {
    parse_default(DEFAULT_CHANNEL_TTL)
}

fn default_logo_ttl() -> Duration {
    parse_default(DEFAULT_LOGO_TTL)
}

fn default_catalog_id() -> String {
    DEFAULT_CATALOG_ID.to_string()
}

fn default_catalog_name() -> String {
    DEFAULT_CATALOG_NAME.to_string()
}

fn default_id_prefix() -> String {
    DEFAULT_ID_PREFIX.to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_sort_by_name() -> bool {
    DEFAULT_SORT_BY_NAME
}

fn default_group_duplicates() -> bool {
    DEFAULT_GROUP_DUPLICATES
}

fn default_logos_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOGOS_PATH)
}

fn default_addon_id() -> String {
    DEFAULT_ADDON_ID.to_string()
}

fn default_addon_version() -> String {
    DEFAULT_ADDON_VERSION.to_string()
}

fn default_addon_name() -> String {
    DEFAULT_ADDON_NAME.to_string()
}

fn default_addon_description() -> String {
    DEFAULT_ADDON_DESCRIPTION.to_string()
}

fn default_addon_logo() -> String {
    DEFAULT_ADDON_LOGO.to_string()
}

fn default_addon_background() -> String {
    DEFAULT_ADDON_BACKGROUND.to_string()
}

fn default_contact_email() -> String {
    DEFAULT_CONTACT_EMAIL.to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            channels_url: default_channels_url(),
            stream_url_template: default_stream_url_template(),
            country: default_country(),
            user_agent: default_user_agent(),
            referer: default_referer(),
            origin: default_origin(),
            channel_fetch_timeout: default_channel_fetch_timeout(),
            playlist_timeout: default_playlist_timeout(),
            segment_timeout: default_segment_timeout(),
            segment_chunk_size: default_segment_chunk_size(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            channel_ttl: default_channel_ttl(),
            logo_ttl: default_logo_ttl(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            id: default_catalog_id(),
            name: default_catalog_name(),
            id_prefix: default_id_prefix(),
            page_size: default_page_size(),
            sort_by_name: default_sort_by_name(),
            group_duplicates: default_group_duplicates(),
        }
    }
}

impl Default for LogosConfig {
    fn default() -> Self {
        Self {
            path: default_logos_path(),
        }
    }
}

impl Default for AddonConfig {
    fn default() -> Self {
        Self {
            id: default_addon_id(),
            version: default_addon_version(),
            name: default_addon_name(),
            description: default_addon_description(),
            logo: default_addon_logo(),
            background: default_addon_background(),
            contact_email: default_contact_email(),
        }
    }
}

impl UpstreamConfig {
    /// Origin URL of the live manifest for a raw channel id
    pub fn stream_url_for(&self, raw_id: &str) -> String {
        self.stream_url_template.replace("{id}", raw_id)
    }
}

impl Config {
    /// Load the configuration, writing a default file when none exists yet
    pub fn load_from_file(config_file: &str) -> Result<Self> {
        if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            Ok(toml::from_str(&contents)?)
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
            Ok(default_config)
        }
    }

    /// Reject values that would make the service misbehave at runtime
    pub fn validate(&self) -> crate::errors::AppResult<()> {
        use crate::errors::AppError;

        if self.catalog.page_size == 0 {
            return Err(AppError::configuration("catalog.page_size must be greater than zero"));
        }
        if self.upstream.segment_chunk_size == 0 {
            return Err(AppError::configuration(
                "upstream.segment_chunk_size must be greater than zero",
            ));
        }
        if !self.upstream.stream_url_template.contains("{id}") {
            return Err(AppError::configuration(
                "upstream.stream_url_template must contain an {id} placeholder",
            ));
        }
        if url::Url::parse(&self.upstream.channels_url).is_err() {
            return Err(AppError::configuration(format!(
                "upstream.channels_url is not a valid URL: {}",
                self.upstream.channels_url
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.web.port, DEFAULT_PORT);
        assert_eq!(config.cache.channel_ttl, Duration::from_secs(600));
        assert_eq!(config.upstream.playlist_timeout, Duration::from_secs(30));
        assert_eq!(config.upstream.segment_timeout, Duration::from_secs(15));
        assert_eq!(config.catalog.page_size, 100);
        assert!(!config.catalog.group_duplicates);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: Config = toml::from_str(
            r#"
            [catalog]
            group_duplicates = true

            [cache]
            channel_ttl = "2m"
            "#,
        )
        .unwrap();
        assert!(config.catalog.group_duplicates);
        assert_eq!(config.catalog.id_prefix, "vavoo_");
        assert_eq!(config.cache.channel_ttl, Duration::from_secs(120));
        assert_eq!(config.cache.logo_ttl, Duration::from_secs(600));
    }

    #[test]
    fn stream_url_template_substitutes_id() {
        let upstream = UpstreamConfig::default();
        assert_eq!(
            upstream.stream_url_for("12345"),
            "https://vavoo.to/play/12345/index.m3u8"
        );
    }

    #[test]
    fn validate_rejects_zero_page_size() {
        let mut config = Config::default();
        config.catalog.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_file_is_written_and_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let path = path.to_str().unwrap();

        let created = Config::load_from_file(path).unwrap();
        assert!(std::path::Path::new(path).exists());

        let reloaded = Config::load_from_file(path).unwrap();
        assert_eq!(created.web.port, reloaded.web.port);
        assert_eq!(created.upstream.channels_url, reloaded.upstream.channels_url);
    }
}
