//! Shared test doubles.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use edge_sdk::{
    FetchHead, FileAttributes, HostChannel, HttpError, HttpFetch, HttpRequest, HttpResponse, StorageError,
    StorageHead, StreamDescriptor, StreamError,
};
use mockall::mock;

mock! {
    pub Host {}

    #[async_trait]
    impl HostChannel for Host {
        async fn stream_write(&self, sd: StreamDescriptor, chunk: Bytes) -> Result<(), StreamError>;
        async fn stream_read(&self, sd: StreamDescriptor) -> Result<Bytes, StreamError>;
        async fn stream_close(&self, sd: StreamDescriptor) -> Result<(), StreamError>;
        async fn stream_abort(&self, sd: StreamDescriptor) -> Result<(), StreamError>;
        fn stream_release(&self, sd: StreamDescriptor);
        fn pending_release(&self, sd: StreamDescriptor);
        async fn fetch_send_streaming(&self, request: &HttpFetch) -> Result<StreamDescriptor, HttpError>;
        async fn fetch_get_response(&self, sd: StreamDescriptor) -> Result<FetchHead, HttpError>;
        async fn storage_put_streaming(
            &self,
            bucket_id: &str,
            file_name: &str,
            properties: &str,
        ) -> Result<StreamDescriptor, StorageError>;
        async fn storage_get_response(&self, sd: StreamDescriptor) -> Result<StorageHead, StorageError>;
        async fn storage_get_streaming(
            &self,
            bucket_id: &str,
            file_name: &str,
        ) -> Result<StorageHead, StorageError>;
        async fn storage_delete(
            &self,
            bucket_id: &str,
            file_name: &str,
        ) -> Result<StorageHead, StorageError>;
        async fn storage_get_attributes(
            &self,
            bucket_id: &str,
            file_name: &str,
        ) -> Result<FileAttributes, StorageError>;
        async fn storage_set_attributes(
            &self,
            bucket_id: &str,
            file_name: &str,
            attributes: &FileAttributes,
        ) -> Result<StorageHead, StorageError>;
        async fn request_head(&self) -> Result<HttpRequest, HttpError>;
        async fn request_open_read_stream(&self) -> Result<StreamDescriptor, HttpError>;
        async fn response_send_streaming(
            &self,
            response: &HttpResponse,
        ) -> Result<StreamDescriptor, HttpError>;
    }
}

pub const SD: StreamDescriptor = StreamDescriptor::from_raw(7);

pub fn shared(host: MockHost) -> Arc<dyn HostChannel> {
    Arc::new(host)
}

/// A host whose reads deliver `chunks` in order, then end of data.
pub fn reading(chunks: &[&'static str]) -> MockHost {
    let mut host = MockHost::new();
    let mut seq = mockall::Sequence::new();
    for chunk in chunks {
        let chunk = Bytes::from_static(chunk.as_bytes());
        host.expect_stream_read()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(chunk.clone()));
    }
    host.expect_stream_read()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Err(StreamError::EndOfStream));
    host
}
