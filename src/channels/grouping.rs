//! Collapsing of numbered duplicates ("RAI 1 2") into multi-stream groups

use indexmap::IndexMap;
use std::collections::HashSet;

use super::models::{Channel, ChannelGroup, StreamRef};

/// Drop one trailing whitespace-separated number: "Channel 2" -> "Channel".
///
/// Names without such a suffix (or made only of digits) are returned trimmed.
pub fn strip_numeric_suffix(name: &str) -> &str {
    let trimmed = name.trim();
    match trimmed.rsplit_once(char::is_whitespace) {
        Some((head, tail))
            if !tail.is_empty()
                && tail.chars().all(|c| c.is_ascii_digit())
                && !head.trim().is_empty() =>
        {
            head.trim_end()
        }
        _ => trimmed,
    }
}

/// Build catalog groups from an ordered channel list.
///
/// With grouping disabled every channel is its own group. With grouping
/// enabled a channel joins the group named by its suffix-stripped name only
/// when a channel with exactly that name exists in the list; otherwise its
/// own name is the key. Group order follows first occurrence.
pub fn build_groups<F>(channels: Vec<Channel>, grouping: bool, resolve_url: F) -> Vec<ChannelGroup>
where
    F: Fn(&str) -> String,
{
    let stream_of = |c: &Channel| StreamRef {
        id: c.id.clone(),
        name: c.name.clone(),
        resolved_url: resolve_url(&c.id),
    };

    if !grouping {
        return channels
            .into_iter()
            .map(|c| ChannelGroup {
                display_name: c.name.trim().to_string(),
                streams: vec![stream_of(&c)],
                representative: c,
            })
            .collect();
    }

    let names: HashSet<&str> = channels.iter().map(|c| c.name.trim()).collect();
    let mut members: IndexMap<String, Vec<&Channel>> = IndexMap::new();
    for channel in &channels {
        let full = channel.name.trim();
        let stripped = strip_numeric_suffix(full);
        let key = if stripped != full && names.contains(stripped) {
            stripped
        } else {
            full
        };
        members.entry(key.to_string()).or_default().push(channel);
    }

    members
        .into_iter()
        .map(|(key, group)| {
            let representative = group
                .iter()
                .find(|c| c.name.trim() == key)
                .or_else(|| group.first())
                .map(|c| (*c).clone())
                .unwrap_or_else(|| Channel::new("", &key, ""));
            ChannelGroup {
                streams: group.iter().map(|c| stream_of(*c)).collect(),
                display_name: key,
                representative,
            }
        })
        .collect()
}
