//! Responses produced by backends.

use std::fmt;

use bytes::Bytes;

use crate::body::{self, Blob, Body};
use crate::enums::ResponseType;
use crate::error::Result;
use crate::headers::Headers;

/// Everything a backend knows when it assembles a `Response`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseOptions {
    pub body: Option<Body>,
    pub status: u16,
    pub status_text: String,
    pub headers: Headers,
    pub response_type: ResponseType,
    pub url: String,
    /// Progress counters, as far as the backend tracks them.
    pub bytes_loaded: usize,
    pub total_bytes: usize,
}

/// A response handed back through a `ResponseChannel`.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub response_type: ResponseType,
    pub ok: bool,
    pub url: String,
    pub status: u16,
    pub status_text: String,
    pub bytes_loaded: usize,
    pub total_bytes: usize,
    pub headers: Headers,
    body: Option<Body>,
}

impl Response {
    pub fn new(options: ResponseOptions) -> Self {
        Self {
            response_type: options.response_type,
            ok: (200..=299).contains(&options.status),
            url: options.url,
            status: options.status,
            status_text: options.status_text,
            bytes_loaded: options.bytes_loaded,
            total_bytes: options.total_bytes,
            headers: options.headers,
            body: options.body,
        }
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    pub fn text(&self) -> Result<String> {
        body::text(self.body.as_ref())
    }

    pub fn json(&self) -> Result<serde_json::Value> {
        body::json(self.body.as_ref())
    }

    pub fn array_buffer(&self) -> Result<Bytes> {
        body::array_buffer(self.body.as_ref())
    }

    pub fn blob(&self) -> Result<Blob> {
        body::blob(self.body.as_ref())
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Response with status: {} {} for URL: {}",
            self.status, self.status_text, self.url
        )
    }
}
