//! Chunked passthrough body.
//!
//! [`RelayBody`] is pulled by the server only as fast as the caller's socket
//! accepts data, and only then is the upstream read. Upstream frames larger
//! than the chunk size are split with zero-copy slices; smaller frames are
//! forwarded as they arrive. Dropping the body (stream finished, caller gone)
//! drops the upstream stream and with it the upstream connection.

use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::Bytes;
use futures_util::{Stream, StreamExt};

use crate::observability::metrics;

type UpstreamStream<E> = Pin<Box<dyn Stream<Item = Result<Bytes, E>> + Send>>;

/// Lazy, finite, non-restartable sequence of byte chunks.
pub struct RelayBody<E> {
    upstream: UpstreamStream<E>,
    pending: Bytes,
    chunk_size: usize,
    bytes_sent: u64,
    polled: bool,
    finished: bool,
    request_id: String,
}

impl<E> RelayBody<E>
where
    E: std::fmt::Display,
{
    pub fn new<S>(upstream: S, chunk_size: usize, request_id: String) -> Self
    where
        S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    {
        Self {
            upstream: Box::pin(upstream),
            pending: Bytes::new(),
            chunk_size: chunk_size.max(1),
            bytes_sent: 0,
            polled: false,
            finished: false,
            request_id,
        }
    }

    /// Bytes handed to the server so far.
    pub fn bytes_sent(&self) -> u64 {
        self.bytes_sent
    }

    fn take_chunk(&mut self) -> Bytes {
        let len = self.pending.len().min(self.chunk_size);
        let chunk = self.pending.split_to(len);
        self.bytes_sent += chunk.len() as u64;
        chunk
    }
}

impl<E> Stream for RelayBody<E>
where
    E: std::fmt::Display,
{
    type Item = Result<Bytes, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        this.polled = true;

        if this.finished {
            return Poll::Ready(None);
        }

        loop {
            if !this.pending.is_empty() {
                return Poll::Ready(Some(Ok(this.take_chunk())));
            }

            match this.upstream.poll_next_unpin(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(Ok(frame))) => {
                    // Empty frames are skipped rather than forwarded.
                    this.pending = frame;
                }
                Poll::Ready(Some(Err(e))) => {
                    tracing::error!(
                        request_id = %this.request_id,
                        bytes = this.bytes_sent,
                        error = %e,
                        "Upstream read failed mid-stream"
                    );
                    this.finished = true;
                    metrics::record_stream_aborted("upstream");
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Ready(None) => {
                    this.finished = true;
                    tracing::debug!(
                        request_id = %this.request_id,
                        bytes = this.bytes_sent,
                        "Relay stream complete"
                    );
                    return Poll::Ready(None);
                }
            }
        }
    }
}

impl<E> RelayBody<E> {
    /// Streaming started and was cut off before the upstream finished. A body
    /// the server never polled (e.g. the response was discarded) is not an
    /// abort.
    fn aborted_by_caller(&self) -> bool {
        self.polled && !self.finished
    }
}

impl<E> Drop for RelayBody<E> {
    fn drop(&mut self) {
        metrics::record_bytes_relayed(self.bytes_sent);
        if self.aborted_by_caller() {
            tracing::info!(
                request_id = %self.request_id,
                bytes = self.bytes_sent,
                "Caller disconnected, closing upstream"
            );
            metrics::record_stream_aborted("caller");
        }
    }
}
