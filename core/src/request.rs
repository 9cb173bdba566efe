//! The request value object.
//!
//! # Design
//! A `Request` is immutable data once built: URL (with any query params
//! spliced on), method, its own copy of the headers, the body, and a
//! content-type classification derived at construction. The `content-type`
//! header wins over the body's shape; the shape is only consulted when the
//! header is absent or unrecognized.

use bytes::Bytes;

use serde_json::Value;

use crate::body::{self, Blob, Body};
use crate::enums::{ContentType, RequestMethod, ResponseContentType};
use crate::error::Result;
use crate::headers::Headers;
use crate::options::RequestOptionsArgs;

/// Whether the embedding platform can carry binary bodies.
///
/// Without it, blob and buffer bodies are never recognized by shape.
pub trait BinarySupport: Send + Sync {
    fn has_binary_support(&self) -> bool;
}

/// Static capability set supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformSupport {
    binary: bool,
}

impl PlatformSupport {
    pub fn without_binary() -> Self {
        Self { binary: false }
    }
}

impl Default for PlatformSupport {
    fn default() -> Self {
        Self { binary: true }
    }
}

impl BinarySupport for PlatformSupport {
    fn has_binary_support(&self) -> bool {
        self.binary
    }
}

/// A body dereferenced according to the request's content type.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    /// Multipart bodies are handed over untouched.
    Raw(Body),
    Blob(Blob),
    ArrayBuffer(Bytes),
}

/// An outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub url: String,
    pub method: RequestMethod,
    pub headers: Headers,
    pub with_credentials: Option<bool>,
    pub response_type: Option<ResponseContentType>,
    body: Option<Body>,
    content_type: ContentType,
}

impl Request {
    pub fn new(args: impl Into<RequestOptionsArgs>) -> Self {
        Self::with_support(args, &PlatformSupport::default())
    }

    pub fn with_support(args: impl Into<RequestOptionsArgs>, support: &dyn BinarySupport) -> Self {
        let args = args.into();
        let mut url = args.url.clone().unwrap_or_default();
        if let Some(params) = args.params_or_search() {
            append_query(&mut url, &params.to_query_string());
        }
        let headers = args
            .headers
            .as_ref()
            .map(Headers::copy_from)
            .unwrap_or_default();
        let content_type =
            detect_content_type(&headers, args.body.as_ref(), support.has_binary_support());
        Self {
            url,
            method: args.method.unwrap_or_default(),
            headers,
            with_credentials: args.with_credentials,
            response_type: args.response_type,
            body: args.body,
            content_type,
        }
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// The body in the form its content type calls for.
    pub fn get_body(&self) -> Result<Option<Payload>> {
        Ok(match self.content_type {
            ContentType::Json | ContentType::Form | ContentType::Text => {
                Some(Payload::Text(self.text()?))
            }
            ContentType::FormData => self.body.clone().map(Payload::Raw),
            ContentType::Blob => Some(Payload::Blob(self.blob()?)),
            ContentType::ArrayBuffer => Some(Payload::ArrayBuffer(self.array_buffer()?)),
            ContentType::None => None,
        })
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

/// Splice `query` onto `url` with `?`, `&`, or nothing when the URL already
/// ends in `&`.
fn append_query(url: &mut String, query: &str) {
    if query.is_empty() {
        return;
    }
    let prefix = if !url.contains('?') {
        "?"
    } else if url.ends_with('&') {
        ""
    } else {
        "&"
    };
    url.push_str(prefix);
    url.push_str(query);
}

fn detect_content_type(headers: &Headers, body: Option<&Body>, binary: bool) -> ContentType {
    match headers.get("content-type") {
        Some("application/json") => ContentType::Json,
        Some("application/x-www-form-urlencoded") => ContentType::Form,
        Some("multipart/form-data") => ContentType::FormData,
        Some("text/plain" | "text/html") => ContentType::Text,
        Some("application/octet-stream") => match body {
            Some(Body::ArrayBuffer(_)) if binary => ContentType::ArrayBuffer,
            _ => ContentType::Blob,
        },
        _ => detect_content_type_from_body(body, binary),
    }
}

/// Only structured JSON (objects and arrays) is `Json`; a JSON `null` counts
/// as no body and other scalars as text.
fn detect_content_type_from_body(body: Option<&Body>, binary: bool) -> ContentType {
    match body {
        None | Some(Body::Json(Value::Null)) => ContentType::None,
        Some(Body::Params(_)) => ContentType::Form,
        Some(Body::FormData(_)) => ContentType::FormData,
        Some(body) if body.is_binary() && !binary => ContentType::Text,
        Some(Body::Blob(_)) => ContentType::Blob,
        Some(Body::ArrayBuffer(_)) => ContentType::ArrayBuffer,
        Some(Body::Json(Value::Object(_) | Value::Array(_))) => ContentType::Json,
        Some(_) => ContentType::Text,
    }
}
