//! Error taxonomy for Edge SDK.
//!
//! Every SDK operation reduces to one of three closed outcome sets:
//! [`StreamError`] for stream handles, [`HttpError`] for fetch, request and
//! response operations, and [`StorageError`] for the object store. Success is
//! expressed as `Ok(..)`; each enum still carries the numeric outcome code the
//! host uses on the wire, where `0` means success.

use thiserror::Error;

use crate::http::HttpStatusCode;

/// Outcome of a stream operation.
///
/// [`StreamError::EndOfStream`] is not a failure: it is the terminal signal of
/// a read stream. [`ReadStream::read_chunk`](crate::stream::ReadStream::read_chunk)
/// surfaces it as `Ok(None)`; host implementations report it with this variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum StreamError {
    #[error("Stream: end of stream")]
    EndOfStream,

    #[error("Stream: unknown error")]
    Unknown,

    #[error("Stream: system error")]
    SystemError,

    #[error("Stream: stream not found")]
    StreamNotFound,

    #[error("Stream: stream channel is closed")]
    ChannelClosed,

    #[error("Stream: read attempted on write stream")]
    ReadOnWriteStream,

    #[error("Stream: write attempted on read stream")]
    WriteOnReadStream,

    #[error("Stream: stream is closed")]
    StreamClosed,

    #[error("Stream: stream chunk is too large")]
    ChunkTooLarge,
}

impl StreamError {
    /// Numeric outcome code reported by the host.
    pub fn code(self) -> u32 {
        match self {
            Self::EndOfStream => 1,
            Self::Unknown => 2,
            Self::SystemError => 3,
            Self::StreamNotFound => 4,
            Self::ChannelClosed => 5,
            Self::ReadOnWriteStream => 6,
            Self::WriteOnReadStream => 7,
            Self::StreamClosed => 8,
            Self::ChunkTooLarge => 9,
        }
    }

    /// Channel failures mean the host-side resource is gone or the transport broke.
    pub fn is_channel_failure(self) -> bool {
        matches!(
            self,
            Self::Unknown | Self::SystemError | Self::StreamNotFound | Self::ChannelClosed
        )
    }

    /// Misuse failures are detected locally, before any host call.
    pub fn is_misuse(self) -> bool {
        matches!(
            self,
            Self::ReadOnWriteStream | Self::WriteOnReadStream | Self::StreamClosed
        )
    }
}

impl TryFrom<u32> for StreamError {
    type Error = u32;

    fn try_from(code: u32) -> std::result::Result<Self, u32> {
        Ok(match code {
            1 => Self::EndOfStream,
            2 => Self::Unknown,
            3 => Self::SystemError,
            4 => Self::StreamNotFound,
            5 => Self::ChannelClosed,
            6 => Self::ReadOnWriteStream,
            7 => Self::WriteOnReadStream,
            8 => Self::StreamClosed,
            9 => Self::ChunkTooLarge,
            other => return Err(other),
        })
    }
}

/// Outcome of an HTTP operation (fetch, client request, client response).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum HttpError {
    #[error("HTTP: error in SDK function")]
    SystemError,

    #[error("HTTP: unknown error")]
    UnknownError,

    #[error("HTTP: invalid header name")]
    HeaderInvalidName,

    #[error("HTTP: invalid header value")]
    HeaderInvalidValue,

    #[error("HTTP: header name length exceeds limit")]
    HeaderTooLargeName,

    #[error("HTTP: header value length exceeds limit")]
    HeaderTooLargeValue,

    #[error("HTTP: body too large")]
    BodyTooLarge,

    #[error("HTTP: invalid URI")]
    UriInvalid,

    #[error("HTTP: URI length exceeds limit")]
    UriTooLarge,

    #[error("HTTP: invalid method")]
    InvalidMethod,

    #[error("HTTP: invalid status code")]
    InvalidStatusCode,

    #[error("HTTP: invalid version")]
    InvalidVersion,

    #[error("Fetch: response not found")]
    FetchResponseNotFound,

    #[error("Fetch: request failed")]
    FetchRequestFailed,

    #[error("HTTP: channel closed")]
    ChannelClosed,
}

impl HttpError {
    /// Numeric outcome code reported by the host.
    pub fn code(self) -> u32 {
        match self {
            Self::SystemError => 1,
            Self::UnknownError => 2,
            Self::HeaderInvalidName => 3,
            Self::HeaderInvalidValue => 4,
            Self::HeaderTooLargeName => 5,
            Self::HeaderTooLargeValue => 6,
            Self::BodyTooLarge => 7,
            Self::UriInvalid => 8,
            Self::UriTooLarge => 9,
            Self::InvalidMethod => 10,
            Self::InvalidStatusCode => 11,
            Self::InvalidVersion => 12,
            Self::FetchResponseNotFound => 13,
            Self::FetchRequestFailed => 14,
            Self::ChannelClosed => 15,
        }
    }
}

impl TryFrom<u32> for HttpError {
    type Error = u32;

    fn try_from(code: u32) -> std::result::Result<Self, u32> {
        Ok(match code {
            1 => Self::SystemError,
            2 => Self::UnknownError,
            3 => Self::HeaderInvalidName,
            4 => Self::HeaderInvalidValue,
            5 => Self::HeaderTooLargeName,
            6 => Self::HeaderTooLargeValue,
            7 => Self::BodyTooLarge,
            8 => Self::UriInvalid,
            9 => Self::UriTooLarge,
            10 => Self::InvalidMethod,
            11 => Self::InvalidStatusCode,
            12 => Self::InvalidVersion,
            13 => Self::FetchResponseNotFound,
            14 => Self::FetchRequestFailed,
            15 => Self::ChannelClosed,
            other => return Err(other),
        })
    }
}

/// Stream failures inside an HTTP exchange, as reported by the owning façade.
impl From<StreamError> for HttpError {
    fn from(e: StreamError) -> Self {
        match e {
            StreamError::ChannelClosed | StreamError::StreamNotFound => Self::ChannelClosed,
            StreamError::ChunkTooLarge => Self::BodyTooLarge,
            StreamError::Unknown => Self::UnknownError,
            _ => Self::SystemError,
        }
    }
}

/// Outcome of an object store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum StorageError {
    #[error("Storage: error occurred in SDK library")]
    SystemError,

    #[error("Storage: empty content")]
    EmptyContent,

    #[error("Storage: missing file name")]
    MissingFileName,

    #[error("Storage: bucket is deleted")]
    DeletedBucketId,

    #[error("Storage: missing bucket id")]
    MissingBucketId,

    #[error("Storage: internal error")]
    InternalError,

    #[error("Storage: bucket or content not found")]
    ContentNotFound,

    #[error("Storage: unauthorized")]
    Unauthorized,

    #[error("Storage: missing attributes")]
    MissingAttributes,

    #[error("Storage: content does not exist or was deleted")]
    ContentDeleted,

    #[error("Storage: invalid attributes")]
    InvalidAttributes,

    #[error("Storage: resource limit exceeded")]
    ResourceLimit,

    #[error("Storage: response not found")]
    ResponseNotFound,

    #[error("Storage: channel closed")]
    ChannelClosed,
}

impl StorageError {
    /// Numeric outcome code reported by the host.
    pub fn code(self) -> u32 {
        match self {
            Self::SystemError => 1,
            Self::EmptyContent => 2,
            Self::MissingFileName => 3,
            Self::DeletedBucketId => 4,
            Self::MissingBucketId => 5,
            Self::InternalError => 6,
            Self::ContentNotFound => 7,
            Self::Unauthorized => 8,
            Self::MissingAttributes => 9,
            Self::ContentDeleted => 10,
            Self::InvalidAttributes => 11,
            Self::ResourceLimit => 12,
            Self::ResponseNotFound => 13,
            Self::ChannelClosed => 14,
        }
    }

    /// HTTP status code used when reporting this failure to a client.
    pub fn status_code(self) -> HttpStatusCode {
        match self {
            Self::EmptyContent
            | Self::MissingFileName
            | Self::MissingBucketId
            | Self::MissingAttributes
            | Self::InvalidAttributes => 400,
            Self::Unauthorized => 403,
            Self::ContentNotFound | Self::ContentDeleted | Self::ResponseNotFound => 404,
            Self::ResourceLimit => 422,
            Self::DeletedBucketId | Self::InternalError | Self::SystemError | Self::ChannelClosed => {
                500
            }
        }
    }
}

impl TryFrom<u32> for StorageError {
    type Error = u32;

    fn try_from(code: u32) -> std::result::Result<Self, u32> {
        Ok(match code {
            1 => Self::SystemError,
            2 => Self::EmptyContent,
            3 => Self::MissingFileName,
            4 => Self::DeletedBucketId,
            5 => Self::MissingBucketId,
            6 => Self::InternalError,
            7 => Self::ContentNotFound,
            8 => Self::Unauthorized,
            9 => Self::MissingAttributes,
            10 => Self::ContentDeleted,
            11 => Self::InvalidAttributes,
            12 => Self::ResourceLimit,
            13 => Self::ResponseNotFound,
            14 => Self::ChannelClosed,
            other => return Err(other),
        })
    }
}

impl From<StreamError> for StorageError {
    fn from(e: StreamError) -> Self {
        match e {
            StreamError::ChannelClosed | StreamError::StreamNotFound => Self::ChannelClosed,
            StreamError::ChunkTooLarge => Self::ResourceLimit,
            _ => Self::SystemError,
        }
    }
}

/// HTTP status code for the outcome of a storage operation (200 on success).
pub fn storage_status_code<T>(outcome: &std::result::Result<T, StorageError>) -> HttpStatusCode {
    match outcome {
        Ok(_) => 200,
        Err(e) => e.status_code(),
    }
}

/// Crate-level error for callers that handle every taxonomy in one place.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("JSON decode error: {0}")]
    JsonDecode(#[from] serde_json::Error),

    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

impl Error {
    /// HTTP status code for reporting this error to a client.
    ///
    /// Storage failures follow the storage mapping and malformed request
    /// heads are client errors; everything else is a server-side failure.
    pub fn status_code(&self) -> HttpStatusCode {
        match self {
            Self::Storage(e) => e.status_code(),
            Self::Http(
                HttpError::HeaderInvalidName
                | HttpError::HeaderInvalidValue
                | HttpError::HeaderTooLargeName
                | HttpError::HeaderTooLargeValue
                | HttpError::UriInvalid
                | HttpError::UriTooLarge
                | HttpError::InvalidMethod
                | HttpError::InvalidVersion,
            ) => 400,
            Self::Http(HttpError::FetchResponseNotFound) => 404,
            _ => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
