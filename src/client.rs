//! `EdgeClient` - streaming operations of a serverless edge function.

use std::fmt;
use std::sync::Arc;

use crate::body::Body;
use crate::error::{HttpError, StorageError};
use crate::fetch::HttpFetch;
use crate::host::{HostChannel, StorageHead, StreamDescriptor};
use crate::options::SdkOptions;
use crate::pending::{FetchResponsePending, PendingResponse, StorageResponsePending};
use crate::request::HttpRequest;
use crate::response::HttpResponse;
use crate::storage::{FileAttributes, StorageResponse, validate_location};
use crate::stream::{ReadStream, WriteStream};

/// Entry point for the streaming fetch, storage, request and response
/// operations of a function.
///
/// Request heads are validated against [`SdkOptions::limits`] before any
/// host call, and write streams it opens enforce the chunk limit locally. Every operation that opens a stream hands back an owned
/// handle; exchanges that also produce a response hand back a
/// [`PendingResponse`] correlated with the request body stream.
#[derive(Clone)]
pub struct EdgeClient {
    host: Arc<dyn HostChannel>,
    options: SdkOptions,
}

impl fmt::Debug for EdgeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeClient")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl EdgeClient {
    /// Create a client over `host`, with default options if `None`.
    pub fn new(host: Arc<dyn HostChannel>, options: Option<SdkOptions>) -> Self {
        Self {
            host,
            options: options.unwrap_or_default(),
        }
    }

    pub fn options(&self) -> &SdkOptions {
        &self.options
    }

    pub fn host(&self) -> &Arc<dyn HostChannel> {
        &self.host
    }

    /// Write stream over `sd`, with the configured chunk limit.
    fn write_stream(&self, sd: StreamDescriptor) -> WriteStream {
        WriteStream::from_descriptor(sd, Arc::clone(&self.host))
            .with_chunk_limit(self.options.limits.max_chunk_size)
    }

    fn storage_response(&self, head: StorageHead) -> StorageResponse {
        let body = match head.body {
            Some(sd) => Body::Stream(ReadStream::from_descriptor(sd, Arc::clone(&self.host))),
            None => Body::empty(),
        };
        StorageResponse {
            headers: head.headers,
            body,
        }
    }

    /// Head of the client request that triggered the function.
    pub async fn request(&self) -> Result<HttpRequest, HttpError> {
        self.host.request_head().await
    }

    /// Open the client request body as a read stream.
    pub async fn open_request_stream(&self) -> Result<ReadStream, HttpError> {
        let sd = self.host.request_open_read_stream().await?;
        Ok(ReadStream::from_descriptor(sd, Arc::clone(&self.host)))
    }

    /// Send `response` to the client and open its body for streaming.
    ///
    /// Close the returned stream to complete the response; aborting it
    /// leaves the client with an incomplete body.
    pub async fn send_response_streaming(
        &self,
        response: &HttpResponse,
    ) -> Result<WriteStream, HttpError> {
        if !self.options.skip_validation {
            response.validate(&self.options.limits)?;
        }
        let sd = self.host.response_send_streaming(response).await?;
        Ok(self.write_stream(sd))
    }

    /// Start a fetch whose body is streamed.
    ///
    /// Returns the request body stream and the pending response of the same
    /// exchange. The response may resolve before the body is complete.
    pub async fn fetch_streaming(
        &self,
        request: &HttpFetch,
    ) -> Result<(WriteStream, FetchResponsePending), HttpError> {
        if !self.options.skip_validation {
            request.validate(&self.options.limits)?;
        }
        let sd = self.host.fetch_send_streaming(request).await?;
        tracing::debug!(%sd, method = %request.method, uri = %request.uri, "fetch started");
        Ok((
            self.write_stream(sd),
            PendingResponse::new(sd, Arc::clone(&self.host)),
        ))
    }

    /// Start a streaming upload of `file_name` into `bucket_id`.
    pub async fn storage_put_streaming(
        &self,
        bucket_id: &str,
        file_name: &str,
        properties: &str,
    ) -> Result<(WriteStream, StorageResponsePending), StorageError> {
        validate_location(bucket_id, file_name)?;
        let sd = self
            .host
            .storage_put_streaming(bucket_id, file_name, properties)
            .await?;
        tracing::debug!(%sd, bucket_id, file_name, "upload started");
        Ok((
            self.write_stream(sd),
            PendingResponse::new(sd, Arc::clone(&self.host)),
        ))
    }

    /// Open a stored object for streaming download.
    pub async fn storage_get_streaming(
        &self,
        bucket_id: &str,
        file_name: &str,
    ) -> Result<StorageResponse, StorageError> {
        validate_location(bucket_id, file_name)?;
        let head = self.host.storage_get_streaming(bucket_id, file_name).await?;
        Ok(self.storage_response(head))
    }

    /// Delete a stored object.
    pub async fn storage_delete(
        &self,
        bucket_id: &str,
        file_name: &str,
    ) -> Result<StorageResponse, StorageError> {
        validate_location(bucket_id, file_name)?;
        let head = self.host.storage_delete(bucket_id, file_name).await?;
        tracing::debug!(bucket_id, file_name, "object deleted");
        Ok(self.storage_response(head))
    }

    /// Attributes of a stored object.
    pub async fn storage_get_attributes(
        &self,
        bucket_id: &str,
        file_name: &str,
    ) -> Result<FileAttributes, StorageError> {
        validate_location(bucket_id, file_name)?;
        self.host.storage_get_attributes(bucket_id, file_name).await
    }

    /// Replace the attributes of a stored object.
    ///
    /// Attributes that set nothing are rejected with
    /// [`StorageError::MissingAttributes`] before any host call.
    pub async fn storage_set_attributes(
        &self,
        bucket_id: &str,
        file_name: &str,
        attributes: &FileAttributes,
    ) -> Result<StorageResponse, StorageError> {
        validate_location(bucket_id, file_name)?;
        attributes.validate()?;
        let head = self
            .host
            .storage_set_attributes(bucket_id, file_name, attributes)
            .await?;
        Ok(self.storage_response(head))
    }
}
