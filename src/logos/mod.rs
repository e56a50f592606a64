//! Channel logo lookup backed by a static JSON table
//!
//! The table is a JSON array of `{"name": ..., "logo": ...}` objects. It is
//! reloaded through the same TTL cache as the channel list, independently of
//! it. Lookups never fail: a name with no entry gets a generated placeholder.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::cache::{CacheLoader, CachePayload, CacheStatus, TtlCache};
use crate::errors::{UpstreamError, UpstreamResult};
use crate::utils::{Clock, normalize_text};

const PLACEHOLDER_LOGO_BASE: &str = "https://placehold.co/300x300";

#[derive(Debug, Deserialize)]
struct LogoRecord {
    name: Option<String>,
    #[serde(default)]
    logo: Option<String>,
}

/// Exact and normalized name -> logo URL maps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogoTable {
    exact: HashMap<String, String>,
    normalized: HashMap<String, String>,
}

impl LogoTable {
    pub fn insert(&mut self, name: &str, logo: &str) {
        self.exact.insert(name.to_string(), logo.to_string());
        self.normalized
            .insert(normalize_text(name), logo.to_string());
    }

    /// Exact name first, then the accent/case-folded name
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.exact
            .get(name)
            .or_else(|| self.normalized.get(&normalize_text(name)))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.exact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }

    /// Parse the JSON array; records without a name are skipped
    pub fn from_json(contents: &str) -> UpstreamResult<Self> {
        let records: Vec<LogoRecord> =
            serde_json::from_str(contents).map_err(|e| UpstreamError::malformed(e.to_string()))?;

        let mut table = LogoTable::default();
        for record in records {
            if let Some(name) = record.name.as_deref().filter(|n| !n.is_empty()) {
                table.insert(name, record.logo.as_deref().unwrap_or_default());
            }
        }
        Ok(table)
    }
}

impl CachePayload for LogoTable {
    fn item_count(&self) -> usize {
        self.len()
    }
}

/// Placeholder image carrying the channel name
pub fn placeholder_logo(name: &str) -> String {
    format!("{PLACEHOLDER_LOGO_BASE}?text={}&.jpg", urlencoding::encode(name))
}

/// Reads the logo table from disk
pub struct LogoFileLoader {
    path: PathBuf,
}

impl LogoFileLoader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl CacheLoader<LogoTable> for LogoFileLoader {
    fn name(&self) -> &str {
        "logos"
    }

    async fn load(&self) -> UpstreamResult<LogoTable> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| UpstreamError::RequestFailed {
                url: self.path.display().to_string(),
                message: e.to_string(),
            })?;
        let table = LogoTable::from_json(&contents)?;
        if table.is_empty() {
            return Err(UpstreamError::empty("logos"));
        }
        info!("Logos loaded from {}: {}", self.path.display(), table.len());
        Ok(table)
    }
}

/// TTL-cached logo table; names are looked up with [`resolve_in`]
pub struct LogoResolver {
    cache: TtlCache<LogoTable>,
}

impl LogoResolver {
    pub fn new(
        loader: Arc<dyn CacheLoader<LogoTable>>,
        ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cache: TtlCache::new(loader, ttl, clock),
        }
    }

    /// Current table snapshot, for resolving many names at once
    pub async fn table(&self) -> Arc<LogoTable> {
        self.cache.get().await
    }

    pub async fn status(&self) -> CacheStatus {
        self.cache.status().await
    }
}

/// Resolve against an already fetched table
pub fn resolve_in(table: &LogoTable, name: &str) -> String {
    match table.lookup(name) {
        Some(logo) => logo.to_string(),
        None => {
            debug!("No logo for '{}', using placeholder", name);
            placeholder_logo(name)
        }
    }
}
