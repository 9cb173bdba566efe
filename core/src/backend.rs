//! Boundary to the host environment: transport backends and XSRF handling.
//!
//! # Design
//! The facade never performs I/O. A `ConnectionBackend` receives a fully
//! built `Request` and returns a `Connection` whose `response` channel
//! eventually yields one `Response` or one error. The channel is a tokio
//! oneshot, so a backend may complete it from any thread, and the caller
//! may either `.await` it or block on it.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use percent_encoding::percent_decode_str;
use tokio::sync::oneshot;

use crate::enums::ReadyState;
use crate::error::{HttpError, Result};
use crate::request::Request;
use crate::response::Response;

/// Creates connections for outgoing requests.
pub trait ConnectionBackend: Send + Sync {
    fn create_connection(&self, request: Request) -> Connection;
}

/// A request in flight.
#[derive(Debug)]
pub struct Connection {
    pub ready_state: ReadyState,
    pub request: Request,
    pub response: ResponseChannel,
}

/// Receiving half of a single-response channel.
///
/// Resolves to `HttpError::Backend` if the sender is dropped without
/// sending.
#[derive(Debug)]
pub struct ResponseChannel {
    rx: oneshot::Receiver<Result<Response>>,
}

/// Sending half held by the backend.
#[derive(Debug)]
pub struct ResponseSender {
    tx: oneshot::Sender<Result<Response>>,
}

impl ResponseChannel {
    pub fn pair() -> (ResponseSender, ResponseChannel) {
        let (tx, rx) = oneshot::channel();
        (ResponseSender { tx }, ResponseChannel { rx })
    }

    /// A channel that is already complete.
    pub fn ready(result: Result<Response>) -> Self {
        let (tx, channel) = Self::pair();
        tx.send(result);
        channel
    }

    /// Block the current thread until the backend answers.
    ///
    /// Must not be called from within an async runtime.
    pub fn blocking_recv(self) -> Result<Response> {
        self.rx.blocking_recv().unwrap_or_else(|_| Err(closed()))
    }
}

impl Future for ResponseChannel {
    type Output = Result<Response>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or_else(|_| Err(closed())))
    }
}

impl ResponseSender {
    pub fn send(self, result: Result<Response>) {
        if self.tx.send(result).is_err() {
            tracing::debug!("response channel receiver dropped before completion");
        }
    }
}

fn closed() -> HttpError {
    HttpError::Backend("connection closed without a response".to_string())
}

/// Adds anti-forgery tokens to outgoing requests.
pub trait XsrfStrategy: Send + Sync {
    fn configure_request(&self, request: &mut Request);
}

/// Copies a cookie value into a request header.
pub struct CookieXsrfStrategy {
    cookie_name: String,
    header_name: String,
    cookies: Box<dyn Fn() -> String + Send + Sync>,
}

impl CookieXsrfStrategy {
    /// `XSRF-TOKEN` cookie into the `X-XSRF-TOKEN` header.
    ///
    /// `cookies` returns the host's raw `name=value; name=value` cookie
    /// string.
    pub fn new(cookies: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self::with_names("XSRF-TOKEN", "X-XSRF-TOKEN", cookies)
    }

    pub fn with_names(
        cookie_name: &str,
        header_name: &str,
        cookies: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            cookie_name: cookie_name.to_string(),
            header_name: header_name.to_string(),
            cookies: Box::new(cookies),
        }
    }
}

impl XsrfStrategy for CookieXsrfStrategy {
    fn configure_request(&self, request: &mut Request) {
        if let Some(token) = cookie_value(&(self.cookies)(), &self.cookie_name) {
            request.headers.set(&self.header_name, token);
        }
    }
}

impl fmt::Debug for CookieXsrfStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieXsrfStrategy")
            .field("cookie_name", &self.cookie_name)
            .field("header_name", &self.header_name)
            .finish_non_exhaustive()
    }
}

fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|cookie| {
        let (key, value) = cookie.trim().split_once('=')?;
        (key == name).then(|| percent_decode_str(value).decode_utf8_lossy().into_owned())
    })
}
