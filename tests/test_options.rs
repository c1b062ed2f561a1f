//! Options and builder tests

use edge_sdk::{Error, Limits, SdkOptions};
use tokio_test::{assert_err, assert_ok};

#[test]
fn test_default_options() {
    let options = SdkOptions::default();
    assert_eq!(options.limits, Limits::default());
    assert_eq!(options.limits.max_chunk_size, 1024 * 1024);
    assert!(!options.skip_validation);
}

#[test]
fn test_builder_sets_limits() {
    let options = SdkOptions::builder()
        .max_chunk_size(64)
        .max_uri_len(128)
        .skip_validation(true)
        .build()
        .unwrap();
    assert_eq!(options.limits.max_chunk_size, 64);
    assert_eq!(options.limits.max_uri_len, 128);
    assert!(options.skip_validation);
}

#[test]
fn test_builder_rejects_zero_limit() {
    let err = assert_err!(SdkOptions::builder().max_chunk_size(0).build());
    assert!(matches!(err, Error::InvalidOptions(ref msg) if msg.contains("max_chunk_size")));
}

#[test]
fn test_from_json_fills_defaults() {
    let options = assert_ok!(SdkOptions::from_json(
        r#"{"limits": {"max_chunk_size": 4096}}"#
    ));
    assert_eq!(options.limits.max_chunk_size, 4096);
    assert_eq!(options.limits.max_uri_len, Limits::default().max_uri_len);
    assert!(!options.skip_validation);
}

#[test]
fn test_from_json_rejects_bad_input() {
    assert!(matches!(
        SdkOptions::from_json("{not json"),
        Err(Error::JsonDecode(_))
    ));
    assert!(matches!(
        SdkOptions::from_json(r#"{"limits": {"max_header_name_len": 0}}"#),
        Err(Error::InvalidOptions(_))
    ));
}

#[test]
fn test_options_round_trip_through_json() {
    let options = SdkOptions::builder().max_chunk_size(10).build().unwrap();
    let json = serde_json::to_string(&options).unwrap();
    assert_eq!(SdkOptions::from_json(&json).unwrap(), options);
}
