//! Pending responses of streaming exchanges.
//!
//! A streaming exchange hands back its request body stream before the
//! response exists. The [`PendingResponse`] returned alongside it is a
//! single-use token: [`get_response`](PendingResponse::get_response) suspends
//! until the host has the response metadata, and can succeed at most once.
//! Dropping it unresolved tells the host to discard the response.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::body::Body;
use crate::error::{HttpError, StorageError};
use crate::fetch::FetchResponse;
use crate::host::{HostChannel, StreamDescriptor};
use crate::storage::StorageResponse;
use crate::stream::ReadStream;

/// Resolution state of a pending response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Unresolved,
    Resolved,
    Failed,
}

/// Kind of streaming exchange a [`PendingResponse`] resolves.
pub trait Exchange: Send + 'static {
    type Response: Send;
    type Error: std::error::Error + Copy + Send + 'static;

    /// Name used in logs.
    const KIND: &'static str;

    /// Error reported when the response was already consumed.
    fn consumed() -> Self::Error;

    /// Ask the host for the response of the exchange keyed by `sd`.
    fn resolve(
        host: Arc<dyn HostChannel>,
        sd: StreamDescriptor,
    ) -> BoxFuture<'static, Result<Self::Response, Self::Error>>;
}

/// Placeholder for the response of a streaming exchange.
pub struct PendingResponse<E: Exchange> {
    sd: StreamDescriptor,
    state: Resolution,
    host: Arc<dyn HostChannel>,
    _exchange: PhantomData<fn() -> E>,
}

impl<E: Exchange> fmt::Debug for PendingResponse<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingResponse")
            .field("kind", &E::KIND)
            .field("sd", &self.sd)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<E: Exchange> PendingResponse<E> {
    /// Correlate a pending response with the exchange started on `sd`.
    pub fn new(sd: StreamDescriptor, host: Arc<dyn HostChannel>) -> Self {
        Self {
            sd,
            state: Resolution::Unresolved,
            host,
            _exchange: PhantomData,
        }
    }

    /// Descriptor of the request body stream this response belongs to.
    pub fn descriptor(&self) -> StreamDescriptor {
        self.sd
    }

    pub fn resolution(&self) -> Resolution {
        self.state
    }

    /// Wait for the response.
    ///
    /// May be called before the request body is complete. A second call is
    /// rejected with the exchange's "response not found" error without
    /// reaching the host, whether the first call succeeded or failed.
    pub async fn get_response(&mut self) -> Result<E::Response, E::Error> {
        if self.state != Resolution::Unresolved {
            tracing::warn!(kind = E::KIND, sd = %self.sd, state = ?self.state, "response already consumed");
            return Err(E::consumed());
        }
        let outcome = E::resolve(Arc::clone(&self.host), self.sd).await;
        self.state = match &outcome {
            Ok(_) => Resolution::Resolved,
            Err(_) => Resolution::Failed,
        };
        tracing::debug!(kind = E::KIND, sd = %self.sd, state = ?self.state, "pending response settled");
        outcome
    }
}

impl<E: Exchange> Drop for PendingResponse<E> {
    fn drop(&mut self) {
        if self.state == Resolution::Unresolved {
            tracing::debug!(kind = E::KIND, sd = %self.sd, "pending response dropped unresolved");
            self.host.pending_release(self.sd);
        }
    }
}

/// Streaming fetch.
#[derive(Debug)]
pub enum FetchExchange {}

impl Exchange for FetchExchange {
    type Response = FetchResponse;
    type Error = HttpError;

    const KIND: &'static str = "fetch";

    fn consumed() -> HttpError {
        HttpError::FetchResponseNotFound
    }

    fn resolve(
        host: Arc<dyn HostChannel>,
        sd: StreamDescriptor,
    ) -> BoxFuture<'static, Result<FetchResponse, HttpError>> {
        Box::pin(async move {
            let head = host.fetch_get_response(sd).await?;
            if head.body == sd {
                tracing::warn!(%sd, "host reused the request descriptor for the response body");
                return Err(HttpError::SystemError);
            }
            Ok(FetchResponse {
                status: head.status,
                headers: head.headers,
                body: Body::Stream(ReadStream::from_descriptor(head.body, host)),
            })
        })
    }
}

/// Streaming object upload.
#[derive(Debug)]
pub enum StoragePutExchange {}

impl Exchange for StoragePutExchange {
    type Response = StorageResponse;
    type Error = StorageError;

    const KIND: &'static str = "storage-put";

    fn consumed() -> StorageError {
        StorageError::ResponseNotFound
    }

    fn resolve(
        host: Arc<dyn HostChannel>,
        sd: StreamDescriptor,
    ) -> BoxFuture<'static, Result<StorageResponse, StorageError>> {
        Box::pin(async move {
            let head = host.storage_get_response(sd).await?;
            let body = match head.body {
                Some(body) if body == sd => return Err(StorageError::SystemError),
                Some(body) => Body::Stream(ReadStream::from_descriptor(body, host)),
                None => Body::empty(),
            };
            Ok(StorageResponse {
                headers: head.headers,
                body,
            })
        })
    }
}

/// Pending response of [`EdgeClient::fetch_streaming`](crate::EdgeClient::fetch_streaming).
pub type FetchResponsePending = PendingResponse<FetchExchange>;

/// Pending response of [`EdgeClient::storage_put_streaming`](crate::EdgeClient::storage_put_streaming).
pub type StorageResponsePending = PendingResponse<StoragePutExchange>;
