//! Playlist classification and segment-reference rewriting
//!
//! A fetched playlist is either a flat list of media entries (served back
//! untouched) or a segmented HLS manifest whose media lines are rewritten so
//! every segment is fetched through `/proxy/ts`.

use tracing::debug;
use url::Url;

use crate::utils::url::UrlUtils;

pub const MANIFEST_START_MARKER: &str = "#EXTM3U";
pub const SEGMENT_INFO_MARKER: &str = "#EXTINF";

pub const SEGMENTED_CONTENT_TYPE: &str = "application/vnd.apple.mpegurl";
pub const FLAT_CONTENT_TYPE: &str = "audio/x-mpegurl";

/// Shape of a fetched playlist document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistKind {
    /// Plain list of media entries, returned verbatim
    FlatMediaList,
    /// HLS manifest with `#EXTINF` segments that must be rewritten
    SegmentedManifest,
}

impl PlaylistKind {
    /// Classify by markers only. Segment count plays no part.
    pub fn classify(body: &str) -> Self {
        if body.contains(MANIFEST_START_MARKER) && body.contains(SEGMENT_INFO_MARKER) {
            PlaylistKind::SegmentedManifest
        } else {
            PlaylistKind::FlatMediaList
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            PlaylistKind::FlatMediaList => FLAT_CONTENT_TYPE,
            PlaylistKind::SegmentedManifest => SEGMENTED_CONTENT_TYPE,
        }
    }
}

/// One line of a segmented manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistLine<'a> {
    /// Tag, comment or blank line; emitted unchanged
    Directive(&'a str),
    /// Media reference, possibly relative to the manifest URL
    SegmentReference(&'a str),
}

/// Line-level view of a segmented manifest
#[derive(Debug, Clone)]
pub struct PlaylistDocument<'a> {
    lines: Vec<PlaylistLine<'a>>,
    trailing_newline: bool,
}

impl<'a> PlaylistDocument<'a> {
    pub fn parse(body: &'a str) -> Self {
        let lines = body
            .lines()
            .map(|line| {
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    PlaylistLine::Directive(line)
                } else {
                    PlaylistLine::SegmentReference(trimmed)
                }
            })
            .collect();

        Self {
            lines,
            trailing_newline: body.ends_with('\n'),
        }
    }

    pub fn segment_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, PlaylistLine::SegmentReference(_)))
            .count()
    }

    /// Emit the manifest with every segment reference replaced by `rewrite(absolute_url)`.
    ///
    /// References are resolved against `base` (the final URL after redirects).
    /// A reference that cannot be resolved is kept as-is.
    pub fn render_with<F>(&self, base: &Url, mut rewrite: F) -> String
    where
        F: FnMut(&Url) -> String,
    {
        let mut out = String::new();
        for (index, line) in self.lines.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            match line {
                PlaylistLine::Directive(text) => out.push_str(text),
                PlaylistLine::SegmentReference(reference) => {
                    match UrlUtils::resolve(base, reference) {
                        Ok(absolute) => out.push_str(&rewrite(&absolute)),
                        Err(e) => {
                            debug!("Leaving unresolvable segment reference '{}': {}", reference, e);
                            out.push_str(reference);
                        }
                    }
                }
            }
        }
        if self.trailing_newline && !self.lines.is_empty() {
            out.push('\n');
        }
        out
    }
}

/// Proxied segment URL carrying the absolute origin URL and the forward headers
pub fn proxied_segment_url(segment_path: &str, absolute: &Url, headers_query: &str) -> String {
    let mut proxied = format!(
        "{}?url={}",
        segment_path,
        urlencoding::encode(absolute.as_str())
    );
    if !headers_query.is_empty() {
        proxied.push('&');
        proxied.push_str(headers_query);
    }
    proxied
}

/// Rewrite a segmented manifest for delivery through the segment proxy
pub fn rewrite_manifest(
    document: &PlaylistDocument<'_>,
    base: &Url,
    segment_path: &str,
    headers_query: &str,
) -> String {
    document.render_with(base, |absolute| {
        proxied_segment_url(segment_path, absolute, headers_query)
    })
}
