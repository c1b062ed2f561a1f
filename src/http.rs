//! HTTP value types shared by the fetch, request and response façades.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HttpError;
use crate::options::Limits;

/// HTTP status code (e.g. 200 means OK, 404 means Not Found).
pub type HttpStatusCode = u16;

/// Check that a status code is a three-digit value.
pub fn validate_status(status: HttpStatusCode) -> Result<HttpStatusCode, HttpError> {
    if (100..=999).contains(&status) {
        Ok(status)
    } else {
        Err(HttpError::InvalidStatusCode)
    }
}

/// HTTP protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HttpVersion {
    #[serde(rename = "HTTP/0.9")]
    Http09,
    #[serde(rename = "HTTP/1.0")]
    Http10,
    #[default]
    #[serde(rename = "HTTP/1.1")]
    Http11,
    #[serde(rename = "HTTP/2")]
    Http2,
    #[serde(rename = "HTTP/3")]
    Http3,
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http09 => write!(f, "HTTP/0.9"),
            Self::Http10 => write!(f, "HTTP/1.0"),
            Self::Http11 => write!(f, "HTTP/1.1"),
            Self::Http2 => write!(f, "HTTP/2"),
            Self::Http3 => write!(f, "HTTP/3"),
        }
    }
}

impl FromStr for HttpVersion {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self, HttpError> {
        match s {
            "HTTP/0.9" => Ok(Self::Http09),
            "HTTP/1.0" => Ok(Self::Http10),
            "HTTP/1.1" => Ok(Self::Http11),
            "HTTP/2" | "HTTP/2.0" => Ok(Self::Http2),
            "HTTP/3" | "HTTP/3.0" => Ok(Self::Http3),
            _ => Err(HttpError::InvalidVersion),
        }
    }
}

/// Common HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Head,
    Post,
    Put,
    Delete,
    Connect,
    Options,
    Trace,
    Patch,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Connect => "CONNECT",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
            Self::Patch => "PATCH",
        };
        f.write_str(s)
    }
}

impl FromStr for HttpMethod {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self, HttpError> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "HEAD" => Ok(Self::Head),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "CONNECT" => Ok(Self::Connect),
            "OPTIONS" => Ok(Self::Options),
            "TRACE" => Ok(Self::Trace),
            "PATCH" => Ok(Self::Patch),
            _ => Err(HttpError::InvalidMethod),
        }
    }
}

/// A URL in `scheme://host:port/path?query` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uri(String);

impl Uri {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate the URI against the configured limits.
    ///
    /// Only absolute URIs are accepted: a non-empty scheme followed by `://`
    /// and a non-empty authority, with no whitespace or control characters.
    pub fn validate(&self, limits: &Limits) -> Result<(), HttpError> {
        if self.0.len() > limits.max_uri_len {
            return Err(HttpError::UriTooLarge);
        }
        let (scheme, rest) = self.0.split_once("://").ok_or(HttpError::UriInvalid)?;
        let scheme_ok = scheme
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if !scheme_ok || rest.is_empty() || rest.starts_with('/') {
            return Err(HttpError::UriInvalid);
        }
        if self
            .0
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(HttpError::UriInvalid);
        }
        Ok(())
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Uri {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Uri {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Case-insensitive header name.
///
/// The name is lowercased on construction, so comparison, hashing and
/// ordering ignore case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HeaderName(String);

impl HeaderName {
    pub fn new(name: &str) -> Self {
        Self(name.to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check that the name is a non-empty RFC 7230 token within the limit.
    pub fn validate(&self, limits: &Limits) -> Result<(), HttpError> {
        if self.0.len() > limits.max_header_name_len {
            return Err(HttpError::HeaderTooLargeName);
        }
        if self.0.is_empty() || !self.0.bytes().all(is_token_byte) {
            return Err(HttpError::HeaderInvalidName);
        }
        Ok(())
    }
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

impl fmt::Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HeaderName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for HeaderName {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl Borrow<str> for HeaderName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Check a single header value against the configured limits.
pub fn validate_header_value(value: &str, limits: &Limits) -> Result<(), HttpError> {
    if value.len() > limits.max_header_value_len {
        return Err(HttpError::HeaderTooLargeValue);
    }
    if value.bytes().any(|b| matches!(b, b'\r' | b'\n' | 0)) {
        return Err(HttpError::HeaderInvalidValue);
    }
    Ok(())
}

/// Ordered map of case-insensitive header names to their values.
///
/// A header may carry several values; their order is kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HttpHeaders {
    entries: BTreeMap<HeaderName, Vec<String>>,
}

impl HttpHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all values of `name` with `value`.
    pub fn set(&mut self, name: impl Into<HeaderName>, value: impl Into<String>) -> &mut Self {
        self.entries.insert(name.into(), vec![value.into()]);
        self
    }

    /// Replace all values of `name` with `values`.
    pub fn set_all(
        &mut self,
        name: impl Into<HeaderName>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> &mut Self {
        self.entries
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Add `value` after any existing values of `name`.
    pub fn append(&mut self, name: impl Into<HeaderName>, value: impl Into<String>) -> &mut Self {
        self.entries
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    /// First value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name).first().map(String::as_str)
    }

    /// All values of `name`, in insertion order.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.entries
            .get(name.to_ascii_lowercase().as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .contains_key(name.to_ascii_lowercase().as_str())
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.entries.remove(name.to_ascii_lowercase().as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &[String])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Validate every name and value against the configured limits.
    pub fn validate(&self, limits: &Limits) -> Result<(), HttpError> {
        for (name, values) in &self.entries {
            name.validate(limits)?;
            for value in values {
                validate_header_value(value, limits)?;
            }
        }
        Ok(())
    }
}

impl<N, V> FromIterator<(N, V)> for HttpHeaders
where
    N: Into<HeaderName>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.append(name, value);
        }
        headers
    }
}
