//! Per-request statistics for relayed segments
//!
//! A [`RelaySession`] rides along with the response body. When the body is
//! dropped (finished, failed or abandoned by the client) the session logs a
//! one-line summary.

use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug)]
pub struct RelaySession {
    upstream_url: String,
    expected_bytes: Option<u64>,
    start_time: Instant,
    bytes_served: u64,
    chunks_served: u64,
    errors: u64,
}

impl RelaySession {
    pub fn new(upstream_url: &str, expected_bytes: Option<u64>) -> Self {
        Self {
            upstream_url: upstream_url.to_string(),
            expected_bytes,
            start_time: Instant::now(),
            bytes_served: 0,
            chunks_served: 0,
            errors: 0,
        }
    }

    pub fn update_bytes_served(&mut self, bytes: u64) {
        self.bytes_served += bytes;
        self.chunks_served += 1;
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    pub fn duration(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn average_bitrate_kbps(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs > 0.0 {
            (self.bytes_served as f64 * 8.0) / (duration_secs * 1000.0)
        } else {
            0.0
        }
    }

    /// Whether the client received everything the origin announced
    pub fn is_complete(&self) -> bool {
        match self.expected_bytes {
            Some(expected) => self.errors == 0 && self.bytes_served >= expected,
            None => self.errors == 0,
        }
    }
}

impl Drop for RelaySession {
    fn drop(&mut self) {
        let elapsed_ms = self.duration().as_millis() as u64;
        if self.is_complete() {
            debug!(
                url = %self.upstream_url,
                bytes = self.bytes_served,
                chunks = self.chunks_served,
                elapsed_ms,
                kbps = %format!("{:.1}", self.average_bitrate_kbps()),
                "Segment relay finished"
            );
        } else {
            info!(
                url = %self.upstream_url,
                bytes = self.bytes_served,
                expected = ?self.expected_bytes,
                errors = self.errors,
                elapsed_ms,
                "Segment relay ended early"
            );
        }
    }
}

/// Attach a session to a byte stream so every chunk is accounted for
pub fn tracked<S, E>(
    inner: S,
    mut session: RelaySession,
) -> impl Stream<Item = Result<Bytes, E>> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send,
{
    inner.map(move |chunk| {
        match &chunk {
            Ok(bytes) => session.update_bytes_served(bytes.len() as u64),
            Err(_) => session.record_error(),
        }
        chunk
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    #[test]
    fn completeness_follows_expected_length() {
        let mut session = RelaySession::new("https://cdn.example/a.ts", Some(10));
        session.update_bytes_served(4);
        assert!(!session.is_complete());
        session.update_bytes_served(6);
        assert!(session.is_complete());
        assert_eq!(session.bytes_served, 10);
    }

    #[test]
    fn errors_mark_session_incomplete() {
        let mut session = RelaySession::new("https://cdn.example/a.ts", None);
        assert!(session.is_complete());
        session.record_error();
        assert!(!session.is_complete());
    }

    #[tokio::test]
    async fn tracked_stream_passes_chunks_through() {
        let input = stream::iter(vec![
            Ok::<_, std::io::Error>(Bytes::from_static(b"abc")),
            Ok(Bytes::from_static(b"de")),
        ]);
        let out: Vec<_> = tracked(input, RelaySession::new("u", Some(5)))
            .map(|r| r.unwrap())
            .collect()
            .await;
        assert_eq!(out.concat(), b"abcde");
    }
}
