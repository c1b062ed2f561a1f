//! Outbound stream.

use std::sync::Arc;

use bytes::Bytes;
use futures::{Stream, StreamExt};

use super::{HandleState, StreamHandle};
use crate::error::StreamError;
use crate::host::{Direction, HostChannel, StreamDescriptor};

/// Stream of body chunks sent to the host.
///
/// Finish with [`close`](Self::close) to mark the body complete, or
/// [`abort`](Self::abort) to abandon it. Dropping an open write stream
/// releases it as aborted.
#[derive(Debug)]
pub struct WriteStream {
    handle: StreamHandle,
}

impl WriteStream {
    /// Take ownership of an outbound descriptor issued by `host`.
    pub fn from_descriptor(sd: StreamDescriptor, host: Arc<dyn HostChannel>) -> Self {
        Self {
            handle: StreamHandle::open(sd, Direction::Outbound, host),
        }
    }

    /// A write stream that owns no descriptor.
    pub fn uninitialized(host: Arc<dyn HostChannel>) -> Self {
        Self {
            handle: StreamHandle::uninitialized(Direction::Outbound, host),
        }
    }

    /// Reject chunks larger than `max` bytes locally, before the host sees
    /// them.
    pub fn with_chunk_limit(mut self, max: usize) -> Self {
        self.handle.set_chunk_limit(Some(max));
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.handle.is_initialized()
    }

    pub fn descriptor(&self) -> Option<StreamDescriptor> {
        self.handle.descriptor()
    }

    pub fn state(&self) -> HandleState {
        self.handle.state()
    }

    pub fn is_aborted(&self) -> bool {
        self.handle.state() == HandleState::Aborted
    }

    /// Give up the typed wrapper and keep the raw handle.
    pub fn into_handle(self) -> StreamHandle {
        self.handle
    }

    /// Write one chunk of text or binary data.
    ///
    /// Fails with [`StreamError::StreamClosed`] after close or abort, and with
    /// [`StreamError::ChunkTooLarge`] above the chunk limit, without reaching
    /// the host.
    pub async fn write_chunk(&mut self, chunk: impl Into<Bytes>) -> Result<(), StreamError> {
        self.handle.write_chunk(chunk.into()).await
    }

    /// Write a borrowed slice as one chunk.
    pub async fn write_slice(&mut self, chunk: &[u8]) -> Result<(), StreamError> {
        self.handle
            .write_chunk(Bytes::copy_from_slice(chunk))
            .await
    }

    /// Write every chunk of `chunks` in order. The stream stays open.
    pub async fn send_all<S>(&mut self, chunks: S) -> Result<u64, StreamError>
    where
        S: Stream<Item = Bytes> + Send,
    {
        let mut chunks = std::pin::pin!(chunks);
        let mut n = 0u64;
        while let Some(chunk) = chunks.next().await {
            n += chunk.len() as u64;
            self.write_chunk(chunk).await?;
        }
        Ok(n)
    }

    /// Close the stream, marking the body complete.
    pub async fn close(&mut self) -> Result<(), StreamError> {
        self.handle.close().await
    }

    /// Abandon the stream; the remote treats the body as incomplete.
    ///
    /// [`close`](Self::close) is rejected afterwards.
    pub async fn abort(&mut self) -> Result<(), StreamError> {
        self.handle.abort().await
    }
}
