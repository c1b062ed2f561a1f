//! Host channel implementations for Edge SDK.

mod memory;

pub use memory::{MemoryHost, MemoryHostBuilder, RecordedResponse, Termination, Upstream, UpstreamReply};

use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{HttpError, StorageError, StreamError};
use crate::fetch::HttpFetch;
use crate::http::{HttpHeaders, HttpStatusCode};
use crate::request::HttpRequest;
use crate::response::HttpResponse;
use crate::storage::FileAttributes;

/// Opaque identifier of one open channel on the host side.
///
/// Issued by the host; never reissued once released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StreamDescriptor(u32);

impl StreamDescriptor {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn as_raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for StreamDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sd#{}", self.0)
    }
}

/// Data direction of a stream, seen from the function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Data flows from the host to the function (read stream).
    Inbound,
    /// Data flows from the function to the host (write stream).
    Outbound,
}

/// Response metadata of a streaming fetch, as resolved by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchHead {
    pub status: HttpStatusCode,
    pub headers: HttpHeaders,
    /// Read stream carrying the response body.
    pub body: StreamDescriptor,
}

/// Response metadata of a storage operation.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageHead {
    pub headers: HttpHeaders,
    /// Read stream carrying the object, if the operation returns one.
    pub body: Option<StreamDescriptor>,
}

/// Abstract channel to the edge host.
///
/// Every call completes asynchronously on the host and reports one outcome of
/// the error taxonomy. Stream operations are keyed by descriptor; streaming
/// exchanges return the descriptor of the request body write stream, which
/// also keys the pending response of that exchange.
#[async_trait]
pub trait HostChannel: Send + Sync {
    /// Write one chunk to an outbound stream.
    async fn stream_write(&self, sd: StreamDescriptor, chunk: Bytes) -> Result<(), StreamError>;

    /// Read the next chunk of an inbound stream.
    ///
    /// Exhaustion is reported as [`StreamError::EndOfStream`].
    async fn stream_read(&self, sd: StreamDescriptor) -> Result<Bytes, StreamError>;

    /// Close a stream. For outbound streams this marks the body complete.
    async fn stream_close(&self, sd: StreamDescriptor) -> Result<(), StreamError>;

    /// Abort an outbound stream; the remote treats the body as incomplete.
    async fn stream_abort(&self, sd: StreamDescriptor) -> Result<(), StreamError>;

    /// Release a descriptor whose handle was dropped while still live.
    ///
    /// Outbound streams released this way count as aborted.
    fn stream_release(&self, sd: StreamDescriptor);

    /// Drop the pending response registered for `sd` without waiting for it.
    ///
    /// Called when an unresolved pending response is dropped. A response that
    /// already arrived is discarded together with its body stream.
    fn pending_release(&self, sd: StreamDescriptor);

    /// Start a fetch whose body is streamed; registers its pending response.
    async fn fetch_send_streaming(&self, request: &HttpFetch) -> Result<StreamDescriptor, HttpError>;

    /// Wait for the response of the fetch started on `sd`.
    async fn fetch_get_response(&self, sd: StreamDescriptor) -> Result<FetchHead, HttpError>;

    /// Start a streaming upload; registers its pending response.
    async fn storage_put_streaming(
        &self,
        bucket_id: &str,
        file_name: &str,
        properties: &str,
    ) -> Result<StreamDescriptor, StorageError>;

    /// Wait for the response of the upload started on `sd`.
    async fn storage_get_response(&self, sd: StreamDescriptor) -> Result<StorageHead, StorageError>;

    /// Open a stored object for streaming download.
    async fn storage_get_streaming(
        &self,
        bucket_id: &str,
        file_name: &str,
    ) -> Result<StorageHead, StorageError>;

    /// Delete a stored object.
    async fn storage_delete(
        &self,
        bucket_id: &str,
        file_name: &str,
    ) -> Result<StorageHead, StorageError>;

    /// Attributes of a stored object.
    async fn storage_get_attributes(
        &self,
        bucket_id: &str,
        file_name: &str,
    ) -> Result<FileAttributes, StorageError>;

    /// Replace the attributes of a stored object.
    async fn storage_set_attributes(
        &self,
        bucket_id: &str,
        file_name: &str,
        attributes: &FileAttributes,
    ) -> Result<StorageHead, StorageError>;

    /// Metadata of the client request that triggered the function.
    async fn request_head(&self) -> Result<HttpRequest, HttpError>;

    /// Open the body of the client request as an inbound stream.
    async fn request_open_read_stream(&self) -> Result<StreamDescriptor, HttpError>;

    /// Send the response head to the client and open its body stream.
    async fn response_send_streaming(
        &self,
        response: &HttpResponse,
    ) -> Result<StreamDescriptor, HttpError>;
}
