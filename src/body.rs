//! Response bodies: either fully buffered or streamed.

use bytes::Bytes;

use crate::error::StreamError;
use crate::stream::ReadStream;

/// Body of a fetch or storage response.
///
/// A response holds exactly one representation: the bytes themselves, or a
/// read stream that delivers them.
#[derive(Debug)]
pub enum Body {
    Bytes(Bytes),
    Stream(ReadStream),
}

impl Body {
    pub fn empty() -> Self {
        Self::Bytes(Bytes::new())
    }

    pub fn is_stream(&self) -> bool {
        matches!(self, Self::Stream(_))
    }

    /// Buffered bytes, if the body is not streamed.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Bytes(b) => Some(b),
            Self::Stream(_) => None,
        }
    }

    /// Read stream, if the body is streamed.
    pub fn as_stream_mut(&mut self) -> Option<&mut ReadStream> {
        match self {
            Self::Bytes(_) => None,
            Self::Stream(s) => Some(s),
        }
    }

    /// Number of bytes, when known without reading the stream.
    pub fn len_hint(&self) -> Option<usize> {
        self.as_bytes().map(Bytes::len)
    }

    pub fn into_stream(self) -> Option<ReadStream> {
        match self {
            Self::Bytes(_) => None,
            Self::Stream(s) => Some(s),
        }
    }

    /// Collect the whole body. A streamed body is read to the end and closed.
    pub async fn into_bytes(self) -> Result<Bytes, StreamError> {
        match self {
            Self::Bytes(b) => Ok(b),
            Self::Stream(mut s) => {
                let bytes = s.read_all().await;
                let closed = s.close().await;
                let bytes = bytes?;
                closed?;
                Ok(bytes)
            }
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Bytes> for Body {
    fn from(b: Bytes) -> Self {
        Self::Bytes(b)
    }
}

impl From<ReadStream> for Body {
    fn from(s: ReadStream) -> Self {
        Self::Stream(s)
    }
}
