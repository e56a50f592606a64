//! Catalog request parameters, from a query string or a legacy path segment

use serde::Deserialize;

/// Filters and offset requested by a catalog call
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "lenient_skip")]
    pub skip: usize,
}

impl CatalogQuery {
    /// Parse a raw, still percent-encoded `<extra>` path segment
    /// (`search=rai`, `skip=100`, `genre=SPORT`, optionally joined by `&`).
    ///
    /// The segment is split on literal `&` before decoding, so an encoded
    /// `%26` stays inside its value.
    pub fn from_extra(extra: &str) -> Self {
        let extra = extra.strip_suffix(".json").unwrap_or(extra);

        let mut query = CatalogQuery::default();
        for part in extra.split('&') {
            let Some((key, value)) = part.split_once('=') else {
                continue;
            };
            let value = percent_decode(value);
            match percent_decode(key).as_str() {
                "search" => query.search = Some(value),
                "genre" => query.genre = Some(value),
                "skip" => query.skip = parse_skip(&value),
                _ => {}
            }
        }
        query
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn genre_name(&self) -> Option<&str> {
        self.genre.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Percent-decode one component; invalid UTF-8 leaves it as received
fn percent_decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

/// Negative or unparsable offsets count as zero
pub fn parse_skip(value: &str) -> usize {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0)
}

fn lenient_skip<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map(parse_skip).unwrap_or(0))
}
