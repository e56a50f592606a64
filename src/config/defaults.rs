/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 10000;

// Origin defaults
pub const DEFAULT_CHANNELS_URL: &str = "https://vavoo.to/channels";
pub const DEFAULT_STREAM_URL_TEMPLATE: &str = "https://vavoo.to/play/{id}/index.m3u8";
pub const DEFAULT_COUNTRY: &str = "Italy";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 11; SM-G991B) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.120 Mobile Safari/537.36";
pub const DEFAULT_REFERER: &str = "https://vavoo.to/";
pub const DEFAULT_ORIGIN: &str = "https://vavoo.to";
pub const DEFAULT_CHANNEL_FETCH_TIMEOUT: &str = "15s";
pub const DEFAULT_PLAYLIST_TIMEOUT: &str = "30s";
pub const DEFAULT_SEGMENT_TIMEOUT: &str = "15s";
pub const DEFAULT_SEGMENT_CHUNK_SIZE: usize = 1024;

// Cache defaults
pub const DEFAULT_CHANNEL_TTL: &str = "10m";
pub const DEFAULT_LOGO_TTL: &str = "10m";

// Catalog defaults
pub const DEFAULT_CATALOG_ID: &str = "vavoo_italy";
pub const DEFAULT_CATALOG_NAME: &str = "Vavoo.to Italia";
pub const DEFAULT_ID_PREFIX: &str = "vavoo_";
pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const DEFAULT_SORT_BY_NAME: bool = true;
pub const DEFAULT_GROUP_DUPLICATES: bool = false;

// Logo defaults
pub const DEFAULT_LOGOS_PATH: &str = "canali_con_loghi_finale.json";

// Addon manifest defaults
pub const DEFAULT_ADDON_ID: &str = "com.stremio.vavoo.italy";
pub const DEFAULT_ADDON_VERSION: &str = "1.1.0";
pub const DEFAULT_ADDON_NAME: &str = "Vavoo.to Italy";
pub const DEFAULT_ADDON_DESCRIPTION: &str = "Canali italiani da vavoo.to";
pub const DEFAULT_ADDON_LOGO: &str = "https://vavoo.to/favicon.ico";
pub const DEFAULT_ADDON_BACKGROUND: &str =
    "https://via.placeholder.com/1280x720/000080/FFFFFF?text=Vavoo.to%20Italia";
pub const DEFAULT_CONTACT_EMAIL: &str = "example@example.com";
