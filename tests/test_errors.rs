//! Tests for error types

use edge_sdk::{Error, HttpError, StorageError, StreamError, storage_status_code};

#[test]
fn test_stream_error_display() {
    assert_eq!(
        StreamError::StreamClosed.to_string(),
        "Stream: stream is closed"
    );
    assert!(StreamError::ChunkTooLarge.to_string().contains("too large"));
}

#[test]
fn test_error_codes_are_stable() {
    assert_eq!(StreamError::EndOfStream.code(), 1);
    assert_eq!(StreamError::ChunkTooLarge.code(), 9);
    assert_eq!(HttpError::FetchResponseNotFound.code(), 13);
    assert_eq!(StorageError::ResponseNotFound.code(), 13);
    for code in 1..=9 {
        assert_eq!(StreamError::try_from(code).map(StreamError::code), Ok(code));
    }
    for code in 1..=15 {
        assert_eq!(HttpError::try_from(code).map(HttpError::code), Ok(code));
    }
    for code in 1..=14 {
        assert_eq!(StorageError::try_from(code).map(StorageError::code), Ok(code));
    }
}

#[test]
fn test_storage_status_mapping() {
    assert_eq!(StorageError::MissingBucketId.status_code(), 400);
    assert_eq!(StorageError::Unauthorized.status_code(), 403);
    assert_eq!(StorageError::ContentNotFound.status_code(), 404);
    assert_eq!(StorageError::ResourceLimit.status_code(), 422);
    assert_eq!(StorageError::InternalError.status_code(), 500);
    assert_eq!(storage_status_code(&Ok::<(), StorageError>(())), 200);
}

#[test]
fn test_crate_error_wraps_taxonomies() {
    let error: Error = StorageError::ContentDeleted.into();
    assert_eq!(error.status_code(), 404);
    assert_eq!(error.to_string(), "Storage: content does not exist or was deleted");

    let error: Error = HttpError::FetchResponseNotFound.into();
    assert_eq!(error.status_code(), 404);

    let error: Error = StreamError::ChannelClosed.into();
    assert_eq!(error.status_code(), 500);
    assert!(matches!(error, Error::Stream(StreamError::ChannelClosed)));
}

#[test]
fn test_malformed_http_input_maps_to_bad_request() {
    for input in [
        HttpError::UriInvalid,
        HttpError::UriTooLarge,
        HttpError::InvalidMethod,
        HttpError::InvalidVersion,
        HttpError::HeaderInvalidName,
        HttpError::HeaderTooLargeValue,
    ] {
        assert_eq!(Error::from(input).status_code(), 400, "{input:?}");
    }
    assert_eq!(Error::from(HttpError::FetchRequestFailed).status_code(), 500);
    assert_eq!(Error::from(HttpError::InvalidStatusCode).status_code(), 500);
}

#[test]
fn test_json_decode_error() {
    let inner = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
    let error = Error::JsonDecode(inner);
    assert!(error.to_string().contains("JSON"));
    assert_eq!(error.status_code(), 500);
}

#[test]
fn test_question_mark_converts_into_crate_error() {
    fn upload() -> edge_sdk::Result<()> {
        let put: Result<(), StorageError> = Err(StorageError::EmptyContent);
        put?;
        Ok(())
    }
    assert!(matches!(upload(), Err(Error::Storage(StorageError::EmptyContent))));
}
