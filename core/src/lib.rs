//! Fetch-style HTTP facade over a pluggable transport.
//!
//! # Overview
//! Models `Headers`, `UrlSearchParams`, `Request` and `Response` after their
//! Fetch API counterparts and offers `Http`/`Jsonp` dispatchers with one
//! method per verb. The facade never touches the network: every request is
//! handed to a host-supplied `ConnectionBackend`, and the backend's response
//! channel is returned to the caller as is.
//!
//! # Design
//! - `Headers` is a case-insensitive multi-value map that remembers the
//!   first spelling of each name.
//! - `UrlSearchParams` is an ordered multi-value query model with three
//!   merge flavors and a pluggable `QueryEncoder`.
//! - `Request` classifies its body from the `content-type` header first and
//!   the body's shape second.
//! - `Http` is stateless apart from its backend and defaults; `Jsonp` wraps
//!   it and only lets GET through.

pub mod backend;
pub mod body;
pub mod client;
pub mod encoding;
pub mod enums;
pub mod error;
pub mod headers;
pub mod options;
pub mod request;
pub mod response;
pub mod url_search_params;

pub use backend::{
    Connection, ConnectionBackend, CookieXsrfStrategy, ResponseChannel, ResponseSender,
    XsrfStrategy,
};
pub use body::{Blob, Body, FormData, FormDataValue};
pub use client::{Http, Jsonp, RequestTarget};
pub use encoding::{standard_encoding, QueryEncoder, StandardEncoder};
pub use enums::{ContentType, ReadyState, RequestMethod, ResponseContentType, ResponseType};
pub use error::{HttpError, Result};
pub use headers::{HeaderValues, Headers};
pub use options::{HttpConfig, ParamsArg, RequestOptions, RequestOptionsArgs};
pub use request::{BinarySupport, Payload, PlatformSupport, Request};
pub use response::{Response, ResponseOptions};
pub use url_search_params::UrlSearchParams;
