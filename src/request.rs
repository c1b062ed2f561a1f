//! The client request that triggered the function.

use crate::http::{HttpHeaders, HttpMethod, HttpVersion, Uri};

/// Head of the incoming client request.
///
/// The body is read through the stream returned by
/// [`EdgeClient::open_request_stream`](crate::EdgeClient::open_request_stream).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HttpRequest {
    pub version: HttpVersion,
    pub method: HttpMethod,
    pub uri: Uri,
    pub headers: HttpHeaders,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, uri: impl Into<Uri>) -> Self {
        Self {
            version: HttpVersion::Http11,
            method,
            uri: uri.into(),
            headers: HttpHeaders::new(),
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn headers(&self) -> &HttpHeaders {
        &self.headers
    }
}
