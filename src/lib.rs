//! Edge SDK for Rust
//!
//! Streaming fetch, object storage, request and response bodies for
//! serverless edge functions. The function talks to its host through a
//! [`HostChannel`]; descriptors the host hands out are wrapped in owned
//! [`ReadStream`] and [`WriteStream`] handles that reject misuse locally.
//!
//! ```no_run
//! use edge_sdk::{EdgeClient, HttpFetch, HttpMethod, MemoryHost};
//!
//! # async fn run() -> edge_sdk::Result<()> {
//! let host = MemoryHost::new();
//! let client = EdgeClient::new(host.shared(), None);
//!
//! let (mut body, mut pending) = client
//!     .fetch_streaming(&HttpFetch::new("http://origin.test/upload", HttpMethod::Post))
//!     .await?;
//! body.write_chunk("ab").await?;
//! body.write_chunk("cd").await?;
//! body.close().await?;
//!
//! let response = pending.get_response().await?;
//! assert_eq!(response.into_bytes().await?, "abcd");
//! # Ok(())
//! # }
//! ```

pub mod body;
pub mod client;
pub mod error;
pub mod fetch;
pub mod host;
pub mod http;
pub mod options;
pub mod pending;
pub mod request;
pub mod response;
pub mod storage;
pub mod stream;

pub use body::Body;
pub use client::EdgeClient;
pub use error::{Error, HttpError, Result, StorageError, StreamError, storage_status_code};
pub use fetch::{FetchResponse, HttpFetch};
pub use host::{
    Direction, FetchHead, HostChannel, MemoryHost, MemoryHostBuilder, RecordedResponse,
    StorageHead, StreamDescriptor, Termination, Upstream, UpstreamReply,
};
pub use http::{HeaderName, HttpHeaders, HttpMethod, HttpStatusCode, HttpVersion, Uri};
pub use options::{Limits, SdkOptions, SdkOptionsBuilder};
pub use pending::{FetchResponsePending, PendingResponse, Resolution, StorageResponsePending};
pub use request::HttpRequest;
pub use response::HttpResponse;
pub use storage::{FileAttributes, StorageResponse};
pub use stream::{HandleState, ReadStream, StreamHandle, WriteStream};
