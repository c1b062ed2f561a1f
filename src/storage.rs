//! Object store responses with streamed bodies.

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::error::StorageError;
use crate::http::HttpHeaders;

/// Response of a storage operation.
///
/// Uploads, deletes and attribute updates answer with metadata and an empty
/// body; downloads stream the object through a read stream.
#[derive(Debug)]
pub struct StorageResponse {
    pub headers: HttpHeaders,
    pub body: Body,
}

impl StorageResponse {
    pub fn headers(&self) -> &HttpHeaders {
        &self.headers
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Read the whole object, closing its stream.
    pub async fn into_bytes(self) -> Result<Bytes, StorageError> {
        self.body.into_bytes().await.map_err(StorageError::from)
    }
}

/// Reject empty bucket ids and file names before reaching the host.
pub fn validate_location(bucket_id: &str, file_name: &str) -> Result<(), StorageError> {
    if bucket_id.trim().is_empty() {
        return Err(StorageError::MissingBucketId);
    }
    if file_name.trim().is_empty() {
        return Err(StorageError::MissingFileName);
    }
    Ok(())
}

/// Attributes of a stored file.
///
/// `None` means the attribute is not set. Setting attributes replaces the
/// previous ones as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAttributes {
    pub properties: Option<BTreeMap<String, String>>,
    pub default_version: Option<String>,
}

impl FileAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_default_version(mut self, version: impl Into<String>) -> Self {
        self.default_version = Some(version.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_none() && self.default_version.is_none()
    }

    /// Reject attributes that set nothing or carry an empty property key.
    pub fn validate(&self) -> Result<(), StorageError> {
        if self.is_empty() {
            return Err(StorageError::MissingAttributes);
        }
        let bad_key = self
            .properties
            .iter()
            .flat_map(BTreeMap::keys)
            .any(|k| k.trim().is_empty() || k.contains([',', '=']));
        if bad_key {
            return Err(StorageError::InvalidAttributes);
        }
        Ok(())
    }
}

/// Parse upload properties written as comma-separated `key=value` pairs.
///
/// Blank segments are skipped; a segment without `=` or with an empty key is
/// [`StorageError::InvalidAttributes`].
pub fn parse_properties(properties: &str) -> Result<BTreeMap<String, String>, StorageError> {
    properties
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| match p.split_once('=') {
            Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.trim().to_string())),
            _ => Err(StorageError::InvalidAttributes),
        })
        .collect()
}

/// Inverse of [`parse_properties`], keys in order.
pub fn format_properties(properties: &BTreeMap<String, String>) -> String {
    properties
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(",")
}
