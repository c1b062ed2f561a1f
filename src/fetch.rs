//! Outbound HTTP requests with streamed bodies.

use bytes::Bytes;

use crate::body::Body;
use crate::error::HttpError;
use crate::http::{HeaderName, HttpHeaders, HttpMethod, HttpStatusCode, HttpVersion, Uri};
use crate::options::Limits;

/// Head of an HTTP fetch request: URI, method, version and headers.
///
/// The body is written through the [`WriteStream`](crate::WriteStream)
/// returned by [`EdgeClient::fetch_streaming`](crate::EdgeClient::fetch_streaming).
#[derive(Debug, Clone, PartialEq)]
pub struct HttpFetch {
    pub version: HttpVersion,
    pub headers: HttpHeaders,
    pub uri: Uri,
    pub method: HttpMethod,
}

impl HttpFetch {
    /// Create a request with HTTP/1.1 and no headers.
    pub fn new(uri: impl Into<Uri>, method: HttpMethod) -> Self {
        Self {
            version: HttpVersion::Http11,
            headers: HttpHeaders::new(),
            uri: uri.into(),
            method,
        }
    }

    pub fn set_version(&mut self, version: HttpVersion) -> &mut Self {
        self.version = version;
        self
    }

    /// Set a header, discarding previous values.
    pub fn set_header(&mut self, name: impl Into<HeaderName>, value: impl Into<String>) -> &mut Self {
        self.headers.set(name, value);
        self
    }

    /// Append a header value, keeping previous values.
    pub fn append_header(
        &mut self,
        name: impl Into<HeaderName>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.headers.append(name, value);
        self
    }

    /// Replace all headers.
    pub fn set_headers(&mut self, headers: HttpHeaders) -> &mut Self {
        self.headers = headers;
        self
    }

    /// Check the head against the configured limits.
    ///
    /// HTTP/0.9 has no headers or methods other than GET, so it is not a
    /// valid fetch version.
    pub fn validate(&self, limits: &Limits) -> Result<(), HttpError> {
        if self.version == HttpVersion::Http09 {
            return Err(HttpError::InvalidVersion);
        }
        self.uri.validate(limits)?;
        self.headers.validate(limits)
    }
}

/// Response of a streaming fetch.
#[derive(Debug)]
pub struct FetchResponse {
    pub status: HttpStatusCode,
    pub headers: HttpHeaders,
    pub body: Body,
}

impl FetchResponse {
    pub fn status(&self) -> HttpStatusCode {
        self.status
    }

    pub fn headers(&self) -> &HttpHeaders {
        &self.headers
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Read the whole body, closing its stream.
    pub async fn into_bytes(self) -> Result<Bytes, HttpError> {
        self.body.into_bytes().await.map_err(HttpError::from)
    }
}
