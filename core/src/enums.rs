//! Fixed constant sets shared by requests, responses and backends.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HttpError;

/// HTTP method for a request. Deserializes case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum RequestMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Options,
    Head,
    Patch,
}

impl RequestMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Head => "HEAD",
            Self::Patch => "PATCH",
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive method name normalization.
impl FromStr for RequestMethod {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "OPTIONS" => Ok(Self::Options),
            "HEAD" => Ok(Self::Head),
            "PATCH" => Ok(Self::Patch),
            _ => Err(HttpError::InvalidMethod(s.to_string())),
        }
    }
}

impl TryFrom<String> for RequestMethod {
    type Error = HttpError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

/// Classification of a request body, derived from the `content-type` header
/// or, failing that, from the body's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentType {
    #[default]
    None,
    Json,
    Form,
    FormData,
    Text,
    Blob,
    ArrayBuffer,
}

/// Hint telling the backend how to materialize the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseContentType {
    Text,
    Json,
    ArrayBuffer,
    Blob,
}

/// Lifecycle of a backend connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReadyState {
    #[default]
    Unsent,
    Open,
    HeadersReceived,
    Loading,
    Done,
    Cancelled,
}

/// Fetch-style response type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResponseType {
    Basic,
    Cors,
    #[default]
    Default,
    Error,
    Opaque,
}
