//! SDK options and builder.
//!
//! [`SdkOptions`] configures an [`EdgeClient`](crate::client::EdgeClient) and
//! the in-memory host. Limits are checked locally before a request head or a
//! body chunk is handed to the host.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const DEFAULT_MAX_CHUNK_SIZE: usize = 1024 * 1024; // 1MB
const DEFAULT_MAX_HEADER_NAME_LEN: usize = 256;
const DEFAULT_MAX_HEADER_VALUE_LEN: usize = 8 * 1024;
const DEFAULT_MAX_URI_LEN: usize = 8 * 1024;

/// Size limits enforced by the SDK and the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Largest chunk accepted by a single `write_chunk`. Write streams opened
    /// by the client reject larger chunks before any host call.
    pub max_chunk_size: usize,
    pub max_header_name_len: usize,
    pub max_header_value_len: usize,
    pub max_uri_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            max_header_name_len: DEFAULT_MAX_HEADER_NAME_LEN,
            max_header_value_len: DEFAULT_MAX_HEADER_VALUE_LEN,
            max_uri_len: DEFAULT_MAX_URI_LEN,
        }
    }
}

/// Options for the SDK client.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SdkOptions {
    pub limits: Limits,
    /// Skip local validation of request heads and leave it to the host.
    pub skip_validation: bool,
}

impl SdkOptions {
    pub fn builder() -> SdkOptionsBuilder {
        SdkOptionsBuilder::new()
    }

    /// Parse options from a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.check()?;
        Ok(options)
    }

    fn check(&self) -> Result<()> {
        let l = &self.limits;
        let zero = [
            ("max_chunk_size", l.max_chunk_size),
            ("max_header_name_len", l.max_header_name_len),
            ("max_header_value_len", l.max_header_value_len),
            ("max_uri_len", l.max_uri_len),
        ]
        .into_iter()
        .find(|(_, v)| *v == 0);
        match zero {
            Some((name, _)) => Err(Error::InvalidOptions(format!("{name} must be > 0"))),
            None => Ok(()),
        }
    }
}

/// Builder for [`SdkOptions`].
pub struct SdkOptionsBuilder {
    options: SdkOptions,
}

impl SdkOptionsBuilder {
    pub fn new() -> Self {
        Self {
            options: SdkOptions::default(),
        }
    }

    pub fn limits(mut self, limits: Limits) -> Self {
        self.options.limits = limits;
        self
    }

    pub fn max_chunk_size(mut self, size: usize) -> Self {
        self.options.limits.max_chunk_size = size;
        self
    }

    pub fn max_header_name_len(mut self, len: usize) -> Self {
        self.options.limits.max_header_name_len = len;
        self
    }

    pub fn max_header_value_len(mut self, len: usize) -> Self {
        self.options.limits.max_header_value_len = len;
        self
    }

    pub fn max_uri_len(mut self, len: usize) -> Self {
        self.options.limits.max_uri_len = len;
        self
    }

    pub fn skip_validation(mut self, skip: bool) -> Self {
        self.options.skip_validation = skip;
        self
    }

    /// Finish the builder, rejecting zero limits.
    pub fn build(self) -> Result<SdkOptions> {
        self.options.check()?;
        Ok(self.options)
    }
}

impl Default for SdkOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
