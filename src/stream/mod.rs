//! Stream handles over host descriptors.
//!
//! [`StreamHandle`] is the raw, direction-tagged handle; [`ReadStream`] and
//! [`WriteStream`] expose only the operations valid for their direction.
//! Misuse is rejected locally, without a host round trip.
//!
//! Lifecycle:
//!
//! ```text
//! Uninitialized --open--> Open --close--> Closed
//!                         Open --end of data--> Drained --close--> Closed
//!                         Open --abort--> Aborted            (outbound only)
//! ```
//!
//! `Closed` and `Aborted` are terminal. A handle dropped while it still owns
//! a descriptor releases it through [`HostChannel::stream_release`].

mod read;
mod write;

pub use read::ReadStream;
pub use write::WriteStream;

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;

use crate::error::StreamError;
use crate::host::{Direction, HostChannel, StreamDescriptor};

/// Lifecycle state of a stream handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleState {
    /// No descriptor has been bound yet.
    Uninitialized,
    /// The handle owns a live descriptor.
    Open(StreamDescriptor),
    /// The host reported end of data; the descriptor still needs closing.
    Drained(StreamDescriptor),
    Closed,
    Aborted,
}

impl HandleState {
    pub fn descriptor(self) -> Option<StreamDescriptor> {
        match self {
            Self::Open(sd) | Self::Drained(sd) => Some(sd),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Closed | Self::Aborted)
    }
}

/// Owned handle to one directional host stream.
pub struct StreamHandle {
    state: HandleState,
    direction: Direction,
    chunk_limit: Option<usize>,
    host: Arc<dyn HostChannel>,
}

impl fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamHandle")
            .field("state", &self.state)
            .field("direction", &self.direction)
            .field("chunk_limit", &self.chunk_limit)
            .finish_non_exhaustive()
    }
}

impl StreamHandle {
    /// Create a handle that owns no descriptor.
    pub fn uninitialized(direction: Direction, host: Arc<dyn HostChannel>) -> Self {
        Self {
            state: HandleState::Uninitialized,
            direction,
            chunk_limit: None,
            host,
        }
    }

    /// Take ownership of a descriptor issued by `host`.
    pub fn open(sd: StreamDescriptor, direction: Direction, host: Arc<dyn HostChannel>) -> Self {
        tracing::debug!(%sd, ?direction, "stream opened");
        Self {
            state: HandleState::Open(sd),
            direction,
            chunk_limit: None,
            host,
        }
    }

    pub fn state(&self) -> HandleState {
        self.state
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// True while the handle owns a live descriptor.
    pub fn is_initialized(&self) -> bool {
        self.state.descriptor().is_some()
    }

    /// The owned descriptor, if the handle is initialized.
    pub fn descriptor(&self) -> Option<StreamDescriptor> {
        self.state.descriptor()
    }

    /// Largest chunk `write_chunk` hands to the host; `None` leaves the
    /// check to the host.
    pub fn set_chunk_limit(&mut self, limit: Option<usize>) {
        self.chunk_limit = limit;
    }

    pub fn chunk_limit(&self) -> Option<usize> {
        self.chunk_limit
    }

    /// Host this handle talks to.
    pub fn host(&self) -> &Arc<dyn HostChannel> {
        &self.host
    }

    /// Close the stream.
    ///
    /// For outbound streams this signals an orderly end of data. Closing a
    /// handle that is already closed or aborted is rejected without a host
    /// call. The descriptor is given up whatever the host reports.
    pub async fn close(&mut self) -> Result<(), StreamError> {
        let sd = match self.state {
            HandleState::Open(sd) | HandleState::Drained(sd) => sd,
            HandleState::Uninitialized => return Err(StreamError::StreamNotFound),
            HandleState::Closed | HandleState::Aborted => {
                tracing::warn!(state = ?self.state, "close rejected on terminated stream");
                return Err(StreamError::StreamClosed);
            }
        };
        self.state = HandleState::Closed;
        let outcome = self.host.stream_close(sd).await;
        tracing::debug!(%sd, ?outcome, "stream closed");
        outcome
    }

    /// Read the next chunk. `Ok(None)` means end of data.
    ///
    /// A zero-length chunk is intermediate data, not end of data. Once the
    /// host reported end of data, later reads return `Ok(None)` without a
    /// host call.
    pub async fn read_chunk(&mut self) -> Result<Option<Bytes>, StreamError> {
        if self.direction == Direction::Outbound {
            tracing::warn!(sd = ?self.descriptor(), "read rejected on write stream");
            return Err(StreamError::ReadOnWriteStream);
        }
        let sd = match self.state {
            HandleState::Open(sd) => sd,
            HandleState::Drained(_) => return Ok(None),
            HandleState::Uninitialized => return Err(StreamError::StreamNotFound),
            HandleState::Closed | HandleState::Aborted => return Err(StreamError::StreamClosed),
        };
        match self.host.stream_read(sd).await {
            Ok(chunk) => Ok(Some(chunk)),
            Err(StreamError::EndOfStream) => {
                tracing::debug!(%sd, "end of stream");
                self.state = HandleState::Drained(sd);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Write one chunk. Chunks reach the remote in call order.
    pub async fn write_chunk(&mut self, chunk: Bytes) -> Result<(), StreamError> {
        if self.direction == Direction::Inbound {
            tracing::warn!(sd = ?self.descriptor(), "write rejected on read stream");
            return Err(StreamError::WriteOnReadStream);
        }
        let sd = match self.state {
            HandleState::Open(sd) => sd,
            HandleState::Uninitialized => return Err(StreamError::StreamNotFound),
            HandleState::Drained(_) | HandleState::Closed | HandleState::Aborted => {
                return Err(StreamError::StreamClosed);
            }
        };
        if self.chunk_limit.is_some_and(|max| chunk.len() > max) {
            tracing::warn!(%sd, len = chunk.len(), "chunk exceeds the configured limit");
            return Err(StreamError::ChunkTooLarge);
        }
        self.host.stream_write(sd, chunk).await
    }

    /// Abandon an outbound stream without marking the body complete.
    ///
    /// Aborting an aborted stream is a no-op.
    pub async fn abort(&mut self) -> Result<(), StreamError> {
        if self.direction == Direction::Inbound {
            return Err(StreamError::WriteOnReadStream);
        }
        let sd = match self.state {
            HandleState::Open(sd) | HandleState::Drained(sd) => sd,
            HandleState::Aborted => return Ok(()),
            HandleState::Uninitialized => return Err(StreamError::StreamNotFound),
            HandleState::Closed => return Err(StreamError::StreamClosed),
        };
        self.state = HandleState::Aborted;
        let outcome = self.host.stream_abort(sd).await;
        tracing::debug!(%sd, ?outcome, "stream aborted");
        outcome
    }
}

impl Drop for StreamHandle {
    fn drop(&mut self) {
        if let Some(sd) = self.state.descriptor() {
            if self.direction == Direction::Outbound {
                tracing::warn!(%sd, "write stream dropped without close; releasing as aborted");
            } else {
                tracing::debug!(%sd, "read stream dropped; releasing");
            }
            self.host.stream_release(sd);
        }
    }
}
