//! Request and response bodies.
//!
//! # Design
//! A body is one of a closed set of shapes. Absence is modeled as
//! `Option<Body>` on the owning request or response. The accessor functions
//! here read any shape as text, JSON, bytes or a blob, and are shared by
//! `Request` and `Response`.

use bytes::Bytes;

use crate::error::{HttpError, Result};
use crate::url_search_params::UrlSearchParams;

/// Binary data tagged with a MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Blob {
    bytes: Bytes,
    mime_type: String,
}

impl Blob {
    pub fn new(bytes: impl Into<Bytes>, mime_type: &str) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: mime_type.to_string(),
        }
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// A single multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormDataValue {
    Text(String),
    File { blob: Blob, filename: Option<String> },
}

/// Ordered multipart form payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormData {
    entries: Vec<(String, FormDataValue)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: &str, value: &str) {
        self.entries
            .push((name.to_string(), FormDataValue::Text(value.to_string())));
    }

    pub fn append_blob(&mut self, name: &str, blob: Blob, filename: Option<&str>) {
        self.entries.push((
            name.to_string(),
            FormDataValue::File {
                blob,
                filename: filename.map(str::to_string),
            },
        ));
    }

    pub fn get(&self, name: &str) -> Option<&FormDataValue> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormDataValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The shapes a body can take.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Text(String),
    Json(serde_json::Value),
    Params(UrlSearchParams),
    FormData(FormData),
    Blob(Blob),
    ArrayBuffer(Bytes),
}

impl Body {
    /// Whether the body needs binary support from the platform.
    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Blob(_) | Self::ArrayBuffer(_))
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl From<UrlSearchParams> for Body {
    fn from(params: UrlSearchParams) -> Self {
        Self::Params(params)
    }
}

impl From<FormData> for Body {
    fn from(form: FormData) -> Self {
        Self::FormData(form)
    }
}

impl From<Blob> for Body {
    fn from(blob: Blob) -> Self {
        Self::Blob(blob)
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Self::ArrayBuffer(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::ArrayBuffer(Bytes::from(bytes))
    }
}

/// Read the body as text.
pub(crate) fn text(body: Option<&Body>) -> Result<String> {
    let Some(body) = body else {
        return Ok(String::new());
    };
    Ok(match body {
        Body::Text(text) => text.clone(),
        Body::Json(serde_json::Value::Null) => String::new(),
        Body::Json(serde_json::Value::String(text)) => text.clone(),
        Body::Json(value @ (serde_json::Value::Object(_) | serde_json::Value::Array(_))) => {
            serde_json::to_string_pretty(value)?
        }
        Body::Json(scalar) => scalar.to_string(),
        Body::Params(params) => params.to_string(),
        Body::FormData(form) => form
            .iter()
            .map(|(name, value)| match value {
                FormDataValue::Text(text) => format!("{name}={text}"),
                FormDataValue::File { filename, .. } => {
                    format!("{name}={}", filename.as_deref().unwrap_or_default())
                }
            })
            .collect::<Vec<_>>()
            .join("&"),
        Body::Blob(blob) => String::from_utf8_lossy(blob.bytes()).into_owned(),
        Body::ArrayBuffer(bytes) => String::from_utf8_lossy(bytes).into_owned(),
    })
}

/// Read the body as JSON.
pub(crate) fn json(body: Option<&Body>) -> Result<serde_json::Value> {
    match body {
        Some(Body::Json(value)) => Ok(value.clone()),
        Some(Body::ArrayBuffer(bytes)) => Ok(serde_json::from_slice(bytes)?),
        Some(Body::Blob(blob)) => Ok(serde_json::from_slice(blob.bytes())?),
        other => Ok(serde_json::from_str(&text(other)?)?),
    }
}

/// Read the body as raw bytes.
pub(crate) fn array_buffer(body: Option<&Body>) -> Result<Bytes> {
    match body {
        Some(Body::ArrayBuffer(bytes)) => Ok(bytes.clone()),
        Some(Body::Blob(blob)) => Ok(blob.bytes().clone()),
        other => Ok(Bytes::from(text(other)?)),
    }
}

/// Read the body as a blob; only binary bodies qualify.
pub(crate) fn blob(body: Option<&Body>) -> Result<Blob> {
    match body {
        Some(Body::Blob(blob)) => Ok(blob.clone()),
        Some(Body::ArrayBuffer(bytes)) => Ok(Blob::new(bytes.clone(), "")),
        _ => Err(HttpError::InvalidBody(
            "The request body isn't either a blob or an array buffer".to_string(),
        )),
    }
}
