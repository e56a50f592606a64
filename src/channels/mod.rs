//! Channel model, grouping and the origin-backed channel source

pub mod grouping;
pub mod models;
pub mod source;

pub use models::{Channel, ChannelGroup, StreamRef};
pub use source::VavooChannelSource;

use crate::cache::{CachePayload, TtlCache};

/// The cached channel catalog: filtered, optionally grouped, in origin order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelListing {
    groups: Vec<ChannelGroup>,
}

impl ChannelListing {
    pub fn new(groups: Vec<ChannelGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[ChannelGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group holding the stream with this raw (unprefixed) id
    pub fn find(&self, raw_id: &str) -> Option<&ChannelGroup> {
        self.groups.iter().find(|g| g.contains(raw_id))
    }
}

impl CachePayload for ChannelListing {
    fn item_count(&self) -> usize {
        self.groups.iter().map(|g| g.streams.len()).sum()
    }
}

pub type ChannelCache = TtlCache<ChannelListing>;
