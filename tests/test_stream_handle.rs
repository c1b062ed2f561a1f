//! Stream handle lifecycle tests.

mod common;

use bytes::Bytes;
use common::{MockHost, SD, reading, shared};
use edge_sdk::{
    Direction, HandleState, ReadStream, StreamDescriptor, StreamError, StreamHandle, WriteStream,
};
use futures::StreamExt;
use mockall::predicate::eq;

#[tokio::test]
async fn test_should_read_chunks_until_end_of_stream() {
    let mut host = reading(&["ab", "", "cd"]);
    host.expect_stream_close().with(eq(SD)).times(1).returning(|_| Ok(()));

    let mut stream = ReadStream::from_descriptor(SD, shared(host));
    assert_eq!(stream.read_chunk().await, Ok(Some(Bytes::from_static(b"ab"))));
    // Zero-length chunk is data, not end of stream.
    assert_eq!(stream.read_chunk().await, Ok(Some(Bytes::new())));
    assert_eq!(stream.read_chunk().await, Ok(Some(Bytes::from_static(b"cd"))));
    assert_eq!(stream.read_chunk().await, Ok(None));
    assert_eq!(stream.state(), HandleState::Drained(SD));
    stream.close().await.unwrap();
}

#[tokio::test]
async fn test_should_keep_reporting_end_of_stream_without_host_call() {
    let mut host = reading(&[]);
    host.expect_stream_release().times(1).return_const(());

    let mut stream = ReadStream::from_descriptor(SD, shared(host));
    assert_eq!(stream.read_chunk().await, Ok(None));
    assert_eq!(stream.read_chunk().await, Ok(None));
    assert_eq!(stream.read_chunk().await, Ok(None));
}

#[tokio::test]
async fn test_should_concatenate_chunks_in_read_all() {
    let mut host = reading(&["he", "ll", "o"]);
    host.expect_stream_close().times(1).returning(|_| Ok(()));

    let mut stream = ReadStream::from_descriptor(SD, shared(host));
    assert_eq!(stream.read_all().await.unwrap(), "hello");
    stream.close().await.unwrap();
}

#[tokio::test]
async fn test_should_surface_channel_failure_on_read() {
    let mut host = MockHost::new();
    host.expect_stream_read()
        .times(1)
        .returning(|_| Err(StreamError::ChannelClosed));
    host.expect_stream_release().times(1).return_const(());

    let mut stream = ReadStream::from_descriptor(SD, shared(host));
    assert_eq!(stream.read_chunk().await, Err(StreamError::ChannelClosed));
    assert_eq!(stream.state(), HandleState::Open(SD));
}

#[tokio::test]
async fn test_should_reject_close_twice_without_host_call() {
    let mut host = MockHost::new();
    host.expect_stream_close().times(1).returning(|_| Ok(()));

    let mut stream = WriteStream::from_descriptor(SD, shared(host));
    stream.close().await.unwrap();
    assert_eq!(stream.close().await, Err(StreamError::StreamClosed));
    assert!(!stream.is_initialized());
}

#[tokio::test]
async fn test_should_give_up_descriptor_when_host_close_fails() {
    let mut host = MockHost::new();
    host.expect_stream_close()
        .times(1)
        .returning(|_| Err(StreamError::ChannelClosed));

    let mut stream = WriteStream::from_descriptor(SD, shared(host));
    assert_eq!(stream.close().await, Err(StreamError::ChannelClosed));
    assert_eq!(stream.state(), HandleState::Closed);
}

#[tokio::test]
async fn test_should_reject_write_after_close_without_host_call() {
    let mut host = MockHost::new();
    host.expect_stream_write().times(1).returning(|_, _| Ok(()));
    host.expect_stream_close().times(1).returning(|_| Ok(()));

    let mut stream = WriteStream::from_descriptor(SD, shared(host));
    stream.write_chunk("first").await.unwrap();
    stream.close().await.unwrap();
    assert_eq!(stream.write_chunk("late").await, Err(StreamError::StreamClosed));
}

#[tokio::test]
async fn test_should_reject_close_and_write_after_abort() {
    let mut host = MockHost::new();
    host.expect_stream_abort().with(eq(SD)).times(1).returning(|_| Ok(()));

    let mut stream = WriteStream::from_descriptor(SD, shared(host));
    stream.abort().await.unwrap();
    assert!(stream.is_aborted());
    assert_eq!(stream.close().await, Err(StreamError::StreamClosed));
    assert_eq!(stream.write_chunk("x").await, Err(StreamError::StreamClosed));
    // A second abort is a no-op.
    assert_eq!(stream.abort().await, Ok(()));
}

#[tokio::test]
async fn test_should_reject_abort_after_close() {
    let mut host = MockHost::new();
    host.expect_stream_close().times(1).returning(|_| Ok(()));

    let mut stream = WriteStream::from_descriptor(SD, shared(host));
    stream.close().await.unwrap();
    assert_eq!(stream.abort().await, Err(StreamError::StreamClosed));
}

#[tokio::test]
async fn test_should_reject_direction_misuse_locally() {
    let mut host = MockHost::new();
    host.expect_stream_release().times(2).return_const(());
    let host = shared(host);

    let mut outbound = WriteStream::from_descriptor(SD, host.clone()).into_handle();
    assert_eq!(outbound.direction(), Direction::Outbound);
    assert_eq!(outbound.read_chunk().await, Err(StreamError::ReadOnWriteStream));

    let other = StreamDescriptor::from_raw(8);
    let mut inbound = ReadStream::from_descriptor(other, host).into_handle();
    assert_eq!(
        inbound.write_chunk(Bytes::from_static(b"x")).await,
        Err(StreamError::WriteOnReadStream)
    );
    assert_eq!(inbound.abort().await, Err(StreamError::WriteOnReadStream));
}

#[tokio::test]
async fn test_should_reject_operations_on_uninitialized_handle() {
    let host = shared(MockHost::new());

    let mut handle = StreamHandle::uninitialized(Direction::Inbound, host.clone());
    assert!(!handle.is_initialized());
    assert_eq!(handle.read_chunk().await, Err(StreamError::StreamNotFound));
    assert_eq!(handle.close().await, Err(StreamError::StreamNotFound));

    let mut write = WriteStream::uninitialized(host);
    assert_eq!(write.write_chunk("x").await, Err(StreamError::StreamNotFound));
    assert_eq!(write.abort().await, Err(StreamError::StreamNotFound));
}

#[tokio::test]
async fn test_should_release_live_descriptor_on_drop() {
    let mut host = MockHost::new();
    host.expect_stream_release().with(eq(SD)).times(1).return_const(());

    let stream = WriteStream::from_descriptor(SD, shared(host));
    drop(stream);
}

#[tokio::test]
async fn test_should_not_release_closed_descriptor_on_drop() {
    let mut host = MockHost::new();
    host.expect_stream_close().times(1).returning(|_| Ok(()));
    host.expect_stream_release().never();

    let mut stream = WriteStream::from_descriptor(SD, shared(host));
    stream.close().await.unwrap();
    drop(stream);
}

#[tokio::test]
async fn test_should_send_every_chunk_of_a_stream() {
    let mut host = MockHost::new();
    let mut seq = mockall::Sequence::new();
    for expected in ["a", "bc", "def"] {
        host.expect_stream_write()
            .withf(move |sd, chunk| *sd == SD && chunk == expected.as_bytes())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
    }
    host.expect_stream_close().times(1).returning(|_| Ok(()));

    let mut stream = WriteStream::from_descriptor(SD, shared(host));
    let chunks = tokio_stream::iter(["a", "bc", "def"].map(|s| Bytes::from_static(s.as_bytes())));
    assert_eq!(stream.send_all(chunks).await, Ok(6));
    stream.close().await.unwrap();
}

#[tokio::test]
async fn test_should_yield_chunks_and_close_when_used_as_stream() {
    let mut host = reading(&["x", "y"]);
    host.expect_stream_close().times(1).returning(|_| Ok(()));

    let chunks: Vec<_> = ReadStream::from_descriptor(SD, shared(host))
        .into_stream()
        .collect()
        .await;
    assert_eq!(
        chunks,
        vec![Ok(Bytes::from_static(b"x")), Ok(Bytes::from_static(b"y"))]
    );
}
