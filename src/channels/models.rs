use serde::{Deserialize, Deserializer};

/// A channel as published by the origin, narrowed to the fields we use
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Channel {
    /// Provider-assigned id; sent as a number or a string, kept opaque
    #[serde(deserialize_with = "deserialize_opaque_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
}

impl Channel {
    pub fn new(id: &str, name: &str, country: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            country: Some(country.to_string()),
        }
    }

    pub fn is_from(&self, country: &str) -> bool {
        self.country.as_deref() == Some(country)
    }
}

/// One playable variant of a channel group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRef {
    pub id: String,
    pub name: String,
    pub resolved_url: String,
}

/// Near-duplicate channels presented as a single catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelGroup {
    pub display_name: String,
    pub representative: Channel,
    /// Never empty; the representative's stream is not necessarily first
    pub streams: Vec<StreamRef>,
}

impl ChannelGroup {
    pub fn id(&self) -> &str {
        &self.representative.id
    }

    pub fn contains(&self, raw_id: &str) -> bool {
        self.streams.iter().any(|s| s.id == raw_id)
    }
}

fn deserialize_opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OpaqueId {
        Number(serde_json::Number),
        Text(String),
    }

    match OpaqueId::deserialize(deserializer)? {
        OpaqueId::Number(n) => Ok(n.to_string()),
        OpaqueId::Text(s) => Ok(s),
    }
}
