//! Pending response correlation tests.

mod common;

use bytes::Bytes;
use common::{MockHost, SD, shared};
use edge_sdk::{
    FetchHead, FetchResponsePending, HttpError, HttpHeaders, PendingResponse, Resolution,
    StorageError, StorageHead, StorageResponsePending, StreamDescriptor, StreamError,
};
use mockall::predicate::eq;

const BODY: StreamDescriptor = StreamDescriptor::from_raw(21);

fn fetch_head(body: StreamDescriptor) -> FetchHead {
    let mut headers = HttpHeaders::new();
    headers.set("content-type", "text/plain");
    FetchHead {
        status: 201,
        headers,
        body,
    }
}

#[tokio::test]
async fn test_should_resolve_fetch_response_once() {
    let mut host = MockHost::new();
    host.expect_fetch_get_response()
        .with(eq(SD))
        .times(1)
        .returning(|_| Ok(fetch_head(BODY)));
    let mut seq = mockall::Sequence::new();
    host.expect_stream_read()
        .with(eq(BODY))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(Bytes::from_static(b"created")));
    host.expect_stream_read()
        .with(eq(BODY))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Err(StreamError::EndOfStream));
    host.expect_stream_close().with(eq(BODY)).times(1).returning(|_| Ok(()));

    let mut pending: FetchResponsePending = PendingResponse::new(SD, shared(host));
    assert_eq!(pending.resolution(), Resolution::Unresolved);

    let response = pending.get_response().await.unwrap();
    assert_eq!(pending.resolution(), Resolution::Resolved);
    assert_eq!(response.status(), 201);
    assert_eq!(response.headers().get("Content-Type"), Some("text/plain"));
    assert_eq!(response.into_bytes().await.unwrap(), "created");

    // Second call never reaches the host.
    assert_eq!(
        pending.get_response().await.err(),
        Some(HttpError::FetchResponseNotFound)
    );
}

#[tokio::test]
async fn test_should_not_retry_after_failed_resolution() {
    let mut host = MockHost::new();
    host.expect_fetch_get_response()
        .times(1)
        .returning(|_| Err(HttpError::FetchRequestFailed));

    let mut pending: FetchResponsePending = PendingResponse::new(SD, shared(host));
    assert_eq!(
        pending.get_response().await.err(),
        Some(HttpError::FetchRequestFailed)
    );
    assert_eq!(pending.resolution(), Resolution::Failed);
    assert_eq!(
        pending.get_response().await.err(),
        Some(HttpError::FetchResponseNotFound)
    );
}

#[tokio::test]
async fn test_should_reject_response_body_on_request_descriptor() {
    let mut host = MockHost::new();
    host.expect_fetch_get_response()
        .times(1)
        .returning(|sd| Ok(fetch_head(sd)));

    let mut pending: FetchResponsePending = PendingResponse::new(SD, shared(host));
    assert_eq!(pending.get_response().await.err(), Some(HttpError::SystemError));
}

#[tokio::test]
async fn test_should_resolve_upload_without_body() {
    let mut host = MockHost::new();
    host.expect_storage_get_response()
        .with(eq(SD))
        .times(1)
        .returning(|_| {
            let mut headers = HttpHeaders::new();
            headers.set("content-length", "4");
            Ok(StorageHead {
                headers,
                body: None,
            })
        });

    let mut pending: StorageResponsePending = PendingResponse::new(SD, shared(host));
    let response = pending.get_response().await.unwrap();
    assert_eq!(response.headers().get("content-length"), Some("4"));
    assert!(!response.body.is_stream());
    assert_eq!(
        pending.get_response().await.err(),
        Some(StorageError::ResponseNotFound)
    );
}

#[tokio::test]
async fn test_should_report_upload_failure_from_host() {
    let mut host = MockHost::new();
    host.expect_storage_get_response()
        .times(1)
        .returning(|_| Err(StorageError::EmptyContent));

    let mut pending: StorageResponsePending = PendingResponse::new(SD, shared(host));
    let outcome = pending.get_response().await;
    assert_eq!(outcome.as_ref().err(), Some(&StorageError::EmptyContent));
    assert_eq!(edge_sdk::storage_status_code(&outcome), 400);
}

#[tokio::test]
async fn test_should_release_pending_response_dropped_unresolved() {
    let mut host = MockHost::new();
    host.expect_pending_release().with(eq(SD)).times(1).return_const(());
    host.expect_fetch_get_response().never();

    let pending: FetchResponsePending = PendingResponse::new(SD, shared(host));
    drop(pending);
}

#[tokio::test]
async fn test_should_not_release_settled_pending_response() {
    let mut host = MockHost::new();
    host.expect_pending_release().never();
    host.expect_storage_get_response()
        .times(1)
        .returning(|_| Err(StorageError::ChannelClosed));

    let mut pending: StorageResponsePending = PendingResponse::new(SD, shared(host));
    assert!(pending.get_response().await.is_err());
    drop(pending);
}
