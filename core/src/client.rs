//! Stateless request dispatchers.
//!
//! # Design
//! `Http` holds only a backend, the injected default options and the
//! platform's binary capability. Each verb method merges the caller's
//! options over the defaults, builds a `Request`, and hands it to the
//! backend; the backend's response channel is returned untouched.
//!
//! `Jsonp` wraps an `Http` and reuses its request building, but refuses to
//! dispatch anything other than GET.

use std::sync::Arc;

use crate::backend::{ConnectionBackend, ResponseChannel};
use crate::body::Body;
use crate::enums::RequestMethod;
use crate::error::{HttpError, Result};
use crate::options::{RequestOptions, RequestOptionsArgs};
use crate::request::{BinarySupport, PlatformSupport, Request};

/// What `request()` accepts: a URL to build a GET from, or a built request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestTarget {
    Url(String),
    Request(Request),
}

impl From<&str> for RequestTarget {
    fn from(url: &str) -> Self {
        Self::Url(url.to_string())
    }
}

impl From<String> for RequestTarget {
    fn from(url: String) -> Self {
        Self::Url(url)
    }
}

impl From<Request> for RequestTarget {
    fn from(request: Request) -> Self {
        Self::Request(request)
    }
}

/// Untyped input, e.g. from a scripting layer. Only strings qualify.
impl TryFrom<serde_json::Value> for RequestTarget {
    type Error = HttpError;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::String(url) => Ok(Self::Url(url)),
            _ => Err(HttpError::InvalidArgument),
        }
    }
}

/// Dispatches requests through a `ConnectionBackend`.
#[derive(Clone)]
pub struct Http {
    backend: Arc<dyn ConnectionBackend>,
    default_options: RequestOptions,
    support: Arc<dyn BinarySupport>,
}

impl Http {
    pub fn new(backend: Arc<dyn ConnectionBackend>, default_options: RequestOptions) -> Self {
        Self {
            backend,
            default_options,
            support: Arc::new(PlatformSupport::default()),
        }
    }

    pub fn with_support(mut self, support: Arc<dyn BinarySupport>) -> Self {
        self.support = support;
        self
    }

    pub fn default_options(&self) -> &RequestOptions {
        &self.default_options
    }

    /// Dispatch a URL (as GET, with `options` merged over the defaults) or
    /// an already-built `Request` (as is).
    pub fn request<T, E>(&self, target: T, options: Option<RequestOptionsArgs>) -> Result<ResponseChannel>
    where
        T: TryInto<RequestTarget, Error = E>,
        E: Into<HttpError>,
    {
        let request = match target.try_into().map_err(Into::<HttpError>::into)? {
            RequestTarget::Url(url) => {
                self.build(&self.default_options, options, RequestMethod::Get, &url)
            }
            RequestTarget::Request(request) => request,
        };
        Ok(self.dispatch(request))
    }

    pub fn get(&self, url: &str, options: Option<RequestOptionsArgs>) -> Result<ResponseChannel> {
        self.request(self.build_verb(RequestMethod::Get, url, None, options), None)
    }

    pub fn post(
        &self,
        url: &str,
        body: impl Into<Body>,
        options: Option<RequestOptionsArgs>,
    ) -> Result<ResponseChannel> {
        let request = self.build_verb(RequestMethod::Post, url, Some(body.into()), options);
        self.request(request, None)
    }

    pub fn put(
        &self,
        url: &str,
        body: impl Into<Body>,
        options: Option<RequestOptionsArgs>,
    ) -> Result<ResponseChannel> {
        let request = self.build_verb(RequestMethod::Put, url, Some(body.into()), options);
        self.request(request, None)
    }

    pub fn delete(&self, url: &str, options: Option<RequestOptionsArgs>) -> Result<ResponseChannel> {
        self.request(self.build_verb(RequestMethod::Delete, url, None, options), None)
    }

    pub fn patch(
        &self,
        url: &str,
        body: impl Into<Body>,
        options: Option<RequestOptionsArgs>,
    ) -> Result<ResponseChannel> {
        let request = self.build_verb(RequestMethod::Patch, url, Some(body.into()), options);
        self.request(request, None)
    }

    pub fn head(&self, url: &str, options: Option<RequestOptionsArgs>) -> Result<ResponseChannel> {
        self.request(self.build_verb(RequestMethod::Head, url, None, options), None)
    }

    pub fn options(&self, url: &str, options: Option<RequestOptionsArgs>) -> Result<ResponseChannel> {
        self.request(self.build_verb(RequestMethod::Options, url, None, options), None)
    }

    /// Build a request for a verb method. A verb's body becomes a default
    /// the caller's own `body` option can still override.
    fn build_verb(
        &self,
        method: RequestMethod,
        url: &str,
        body: Option<Body>,
        options: Option<RequestOptionsArgs>,
    ) -> Request {
        match body {
            Some(body) => {
                let defaults = self.default_options.merge(RequestOptionsArgs::new().body(body));
                self.build(&defaults, options, method, url)
            }
            None => self.build(&self.default_options, options, method, url),
        }
    }

    fn build(
        &self,
        defaults: &RequestOptions,
        options: Option<RequestOptionsArgs>,
        method: RequestMethod,
        url: &str,
    ) -> Request {
        let merged = merge_options(defaults, options, method, url);
        Request::with_support(merged, self.support.as_ref())
    }

    fn dispatch(&self, request: Request) -> ResponseChannel {
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            content_type = ?request.content_type(),
            "dispatching request"
        );
        self.backend.create_connection(request).response
    }
}

/// Merge the caller's options over `defaults`, with `method` and `url`
/// filling in whatever the caller left unset.
fn merge_options(
    defaults: &RequestOptions,
    provided: Option<RequestOptionsArgs>,
    method: RequestMethod,
    url: &str,
) -> RequestOptions {
    let mut provided = provided.unwrap_or_default();
    provided.method = provided.method.or(Some(method));
    provided.url = provided
        .url
        .filter(|url| !url.is_empty())
        .or_else(|| Some(url.to_string()));
    defaults.merge(provided)
}

/// GET-only dispatcher for JSONP backends.
#[derive(Clone)]
pub struct Jsonp {
    http: Http,
}

impl Jsonp {
    pub fn new(backend: Arc<dyn ConnectionBackend>, default_options: RequestOptions) -> Self {
        Self::from_http(Http::new(backend, default_options))
    }

    pub fn from_http(http: Http) -> Self {
        Self { http }
    }

    /// Like `Http::request`, but fails with `InvalidOperation` for any
    /// method other than GET.
    pub fn request<T, E>(&self, target: T, options: Option<RequestOptionsArgs>) -> Result<ResponseChannel>
    where
        T: TryInto<RequestTarget, Error = E>,
        E: Into<HttpError>,
    {
        let request = match target.try_into().map_err(Into::<HttpError>::into)? {
            RequestTarget::Url(url) => {
                self.http
                    .build(&self.http.default_options, options, RequestMethod::Get, &url)
            }
            RequestTarget::Request(request) => request,
        };
        if request.method != RequestMethod::Get {
            tracing::warn!(method = %request.method, url = %request.url, "rejecting non-GET JSONP request");
            return Err(HttpError::InvalidOperation);
        }
        Ok(self.http.dispatch(request))
    }

    pub fn get(&self, url: &str, options: Option<RequestOptionsArgs>) -> Result<ResponseChannel> {
        self.request(self.http.build_verb(RequestMethod::Get, url, None, options), None)
    }

    pub fn post(
        &self,
        url: &str,
        body: impl Into<Body>,
        options: Option<RequestOptionsArgs>,
    ) -> Result<ResponseChannel> {
        let request = self
            .http
            .build_verb(RequestMethod::Post, url, Some(body.into()), options);
        self.request(request, None)
    }

    pub fn put(
        &self,
        url: &str,
        body: impl Into<Body>,
        options: Option<RequestOptionsArgs>,
    ) -> Result<ResponseChannel> {
        let request = self
            .http
            .build_verb(RequestMethod::Put, url, Some(body.into()), options);
        self.request(request, None)
    }

    pub fn delete(&self, url: &str, options: Option<RequestOptionsArgs>) -> Result<ResponseChannel> {
        self.request(self.http.build_verb(RequestMethod::Delete, url, None, options), None)
    }

    pub fn patch(
        &self,
        url: &str,
        body: impl Into<Body>,
        options: Option<RequestOptionsArgs>,
    ) -> Result<ResponseChannel> {
        let request = self
            .http
            .build_verb(RequestMethod::Patch, url, Some(body.into()), options);
        self.request(request, None)
    }

    pub fn head(&self, url: &str, options: Option<RequestOptionsArgs>) -> Result<ResponseChannel> {
        self.request(self.http.build_verb(RequestMethod::Head, url, None, options), None)
    }

    pub fn options(&self, url: &str, options: Option<RequestOptionsArgs>) -> Result<ResponseChannel> {
        self.request(self.http.build_verb(RequestMethod::Options, url, None, options), None)
    }
}
