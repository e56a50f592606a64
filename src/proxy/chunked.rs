//! Re-framing of an upstream byte stream into fixed-size chunks

use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt, stream};
use std::pin::Pin;

struct ChunkState<E> {
    inner: Pin<Box<dyn Stream<Item = Result<Bytes, E>> + Send>>,
    buffer: BytesMut,
    finished: bool,
}

/// Emit exactly `chunk_size` bytes per item, except for a shorter final item.
///
/// Byte order and total length are preserved. An upstream error is forwarded
/// once and ends the stream; buffered bytes before it are discarded.
pub fn fixed_size_chunks<S, E>(
    inner: S,
    chunk_size: usize,
) -> impl Stream<Item = Result<Bytes, E>> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Send + 'static,
{
    let chunk_size = chunk_size.max(1);
    let state = ChunkState {
        inner: Box::pin(inner),
        buffer: BytesMut::with_capacity(chunk_size),
        finished: false,
    };

    stream::unfold(state, move |mut state| async move {
        loop {
            if state.buffer.len() >= chunk_size {
                let chunk = state.buffer.split_to(chunk_size).freeze();
                return Some((Ok(chunk), state));
            }
            if state.finished {
                if state.buffer.is_empty() {
                    return None;
                }
                let rest = state.buffer.split().freeze();
                return Some((Ok(rest), state));
            }
            match state.inner.next().await {
                Some(Ok(bytes)) => state.buffer.extend_from_slice(&bytes),
                Some(Err(e)) => {
                    state.finished = true;
                    state.buffer.clear();
                    return Some((Err(e), state));
                }
                None => state.finished = true,
            }
        }
    })
}
