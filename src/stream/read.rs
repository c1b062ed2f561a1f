//! Inbound stream.

use std::pin::Pin;
use std::sync::Arc;

use async_stream::stream;
use bytes::{Bytes, BytesMut};
use futures::Stream;

use super::{HandleState, StreamHandle, WriteStream};
use crate::error::StreamError;
use crate::host::{Direction, HostChannel, StreamDescriptor};

/// Stream of body chunks delivered by the host.
#[derive(Debug)]
pub struct ReadStream {
    handle: StreamHandle,
}

impl ReadStream {
    /// Take ownership of an inbound descriptor issued by `host`.
    pub fn from_descriptor(sd: StreamDescriptor, host: Arc<dyn HostChannel>) -> Self {
        Self {
            handle: StreamHandle::open(sd, Direction::Inbound, host),
        }
    }

    /// A read stream that owns no descriptor.
    pub fn uninitialized(host: Arc<dyn HostChannel>) -> Self {
        Self {
            handle: StreamHandle::uninitialized(Direction::Inbound, host),
        }
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

    /// Give up the typed wrapper and keep the raw handle.
    pub fn into_handle(self) -> StreamHandle {
        self.handle
    }

    /// Read the next chunk; `Ok(None)` once the body is exhausted.
    ///
    /// End of data is stable: reading again keeps returning `Ok(None)`.
    pub async fn read_chunk(&mut self) -> Result<Option<Bytes>, StreamError> {
        self.handle.read_chunk().await
    }

    /// Read every remaining chunk and concatenate them.
    ///
    /// The stream stays open; the caller still has to [`close`](Self::close) it.
    pub async fn read_all(&mut self) -> Result<Bytes, StreamError> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.read_chunk().await? {
            buf.extend_from_slice(&chunk);
        }
        Ok(buf.freeze())
    }

    /// Relay every chunk into `target`, then close both streams.
    ///
    /// Both streams are closed even if reading or writing fails part way; the
    /// first failure is reported.
    pub async fn pipe_to(mut self, mut target: WriteStream) -> Result<u64, StreamError> {
        let relayed = self.relay(&mut target).await;
        let target_closed = target.close().await;
        let source_closed = self.close().await;
        if let Err(e) = &relayed {
            tracing::debug!(error = %e, "pipe interrupted");
        }
        let n = relayed?;
        target_closed?;
        source_closed?;
        Ok(n)
    }

    async fn relay(&mut self, target: &mut WriteStream) -> Result<u64, StreamError> {
        let mut n = 0u64;
        while let Some(chunk) = self.read_chunk().await? {
            n += chunk.len() as u64;
            target.write_chunk(chunk).await?;
        }
        Ok(n)
    }

    pub async fn close(&mut self) -> Result<(), StreamError> {
        self.handle.close().await
    }

    /// Turn the stream into a `futures::Stream` of chunks.
    ///
    /// The handle is closed once the body is exhausted; the stream ends after
    /// the first failure.
    pub fn into_stream(mut self) -> Pin<Box<dyn Stream<Item = Result<Bytes, StreamError>> + Send>> {
        let s = stream! {
            loop {
                match self.read_chunk().await {
                    Ok(Some(chunk)) => yield Ok(chunk),
                    Ok(None) => {
                        if let Err(e) = self.close().await {
                            yield Err(e);
                        }
                        break;
                    }
                    Err(e) => {
                        yield Err(e);
                        break;
                    }
                }
            }
        };
        Box::pin(s)
    }
}
