//! The response sent back to the client.

use crate::error::HttpError;
use crate::http::{HeaderName, HttpHeaders, HttpStatusCode, HttpVersion, validate_status};
use crate::options::Limits;

/// Head of the response to the client.
///
/// Each invocation sends one response; its body is written through the
/// stream returned by
/// [`EdgeClient::send_response_streaming`](crate::EdgeClient::send_response_streaming).
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: HttpStatusCode,
    pub version: HttpVersion,
    pub headers: HttpHeaders,
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpResponse {
    /// `200 OK`, HTTP/1.1, no headers.
    pub fn new() -> Self {
        Self {
            status: 200,
            version: HttpVersion::Http11,
            headers: HttpHeaders::new(),
        }
    }

    pub fn set_status(&mut self, status: HttpStatusCode) -> &mut Self {
        self.status = status;
        self
    }

    pub fn set_version(&mut self, version: HttpVersion) -> &mut Self {
        self.version = version;
        self
    }

    pub fn set_header(&mut self, name: impl Into<HeaderName>, value: impl Into<String>) -> &mut Self {
        self.headers.set(name, value);
        self
    }

    pub fn append_header(
        &mut self,
        name: impl Into<HeaderName>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.headers.append(name, value);
        self
    }

    pub fn set_headers(&mut self, headers: HttpHeaders) -> &mut Self {
        self.headers = headers;
        self
    }

    pub fn validate(&self, limits: &Limits) -> Result<(), HttpError> {
        validate_status(self.status)?;
        self.headers.validate(limits)
    }
}
