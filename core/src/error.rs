//! Error types for the HTTP facade.
//!
//! # Design
//! Every failure raised by this crate is immediate and synchronous: a bad
//! dispatch argument, a JSONP request with the wrong method, or a body that
//! cannot be materialized in the requested shape. Transport failures are
//! never produced here; a backend reports them through the response channel
//! as `Backend`.

use std::convert::Infallible;

use thiserror::Error;

/// Errors returned by the facade.
#[derive(Debug, Error)]
pub enum HttpError {
    /// `request()` was handed something that is neither a URL string nor a
    /// `Request`.
    #[error("First argument must be a url string or Request instance")]
    InvalidArgument,

    /// A JSONP dispatch was attempted with a method other than GET.
    #[error("JSONP requests must use GET request method")]
    InvalidOperation,

    /// The named operation is deliberately not supported.
    #[error("\"{0}\" method is not implemented on Headers class")]
    Unimplemented(&'static str),

    /// A method name that does not normalize to a `RequestMethod`.
    #[error("Invalid request method. The method \"{0}\" is not supported.")]
    InvalidMethod(String),

    /// The body cannot be read in the requested form.
    #[error("{0}")]
    InvalidBody(String),

    /// The body could not be encoded to or decoded from JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend failed to produce a response.
    #[error("backend error: {0}")]
    Backend(String),
}

impl From<Infallible> for HttpError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// A specialized Result type for facade operations.
pub type Result<T> = std::result::Result<T, HttpError>;
