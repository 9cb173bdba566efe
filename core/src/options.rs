//! Caller-supplied request options, injected defaults, and how they merge.
//!
//! # Design
//! `RequestOptionsArgs` is what a caller hands to a verb method: every field
//! optional. `RequestOptions` is the injected default set. `merge` lets each
//! field the caller set win over the default; query params are replaced
//! wholesale rather than combined.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::body::Body;
use crate::enums::{RequestMethod, ResponseContentType};
use crate::error::Result;
use crate::headers::{HeaderValues, Headers};
use crate::url_search_params::UrlSearchParams;

/// Query parameters in any of the accepted forms.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamsArg {
    /// Used verbatim, without re-encoding.
    Raw(String),
    Params(UrlSearchParams),
    /// Every value of every name is appended, then encoded.
    Map(IndexMap<String, Vec<String>>),
}

impl ParamsArg {
    /// Render as the string spliced onto a request URL.
    pub fn to_query_string(&self) -> String {
        match self {
            Self::Raw(raw) => raw.clone(),
            Self::Params(params) => params.to_string(),
            Self::Map(map) => UrlSearchParams::from_pairs(map).to_string(),
        }
    }

    /// Convert into a standalone `UrlSearchParams`.
    pub fn to_params(&self) -> UrlSearchParams {
        match self {
            Self::Raw(raw) => UrlSearchParams::new(raw),
            Self::Params(params) => params.clone(),
            Self::Map(map) => UrlSearchParams::from_pairs(map),
        }
    }
}

impl From<&str> for ParamsArg {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_string())
    }
}

impl From<String> for ParamsArg {
    fn from(raw: String) -> Self {
        Self::Raw(raw)
    }
}

impl From<UrlSearchParams> for ParamsArg {
    fn from(params: UrlSearchParams) -> Self {
        Self::Params(params)
    }
}

impl From<IndexMap<String, Vec<String>>> for ParamsArg {
    fn from(map: IndexMap<String, Vec<String>>) -> Self {
        Self::Map(map)
    }
}

/// Options a caller may pass along with a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptionsArgs {
    pub url: Option<String>,
    pub method: Option<RequestMethod>,
    /// Legacy alias of `params`; `params` wins when both are set.
    pub search: Option<ParamsArg>,
    pub params: Option<ParamsArg>,
    pub headers: Option<Headers>,
    pub body: Option<Body>,
    pub with_credentials: Option<bool>,
    pub response_type: Option<ResponseContentType>,
}

impl RequestOptionsArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn method(mut self, method: RequestMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn search(mut self, search: impl Into<ParamsArg>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn params(mut self, params: impl Into<ParamsArg>) -> Self {
        self.params = Some(params.into());
        self
    }

    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_credentials(mut self, with_credentials: bool) -> Self {
        self.with_credentials = Some(with_credentials);
        self
    }

    pub fn response_type(mut self, response_type: ResponseContentType) -> Self {
        self.response_type = Some(response_type);
        self
    }

    /// `params`, falling back to `search`.
    pub(crate) fn params_or_search(&self) -> Option<&ParamsArg> {
        self.params.as_ref().or(self.search.as_ref())
    }
}

/// Default options injected into a dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub method: Option<RequestMethod>,
    pub headers: Option<Headers>,
    pub body: Option<Body>,
    pub url: Option<String>,
    pub params: UrlSearchParams,
    pub with_credentials: Option<bool>,
    pub response_type: Option<ResponseContentType>,
}

impl Default for RequestOptions {
    /// GET with empty headers.
    fn default() -> Self {
        Self {
            method: Some(RequestMethod::Get),
            headers: Some(Headers::new()),
            body: None,
            url: None,
            params: UrlSearchParams::default(),
            with_credentials: None,
            response_type: None,
        }
    }
}

impl RequestOptions {
    /// Legacy alias of `params`.
    pub fn search(&self) -> &UrlSearchParams {
        &self.params
    }

    /// A new option set where every field `args` sets overrides ours.
    pub fn merge(&self, args: RequestOptionsArgs) -> RequestOptions {
        let params = match args.params_or_search() {
            Some(arg) => arg.to_params(),
            None => self.params.clone(),
        };
        RequestOptions {
            method: args.method.or(self.method),
            headers: args.headers.or_else(|| self.headers.clone()),
            body: args.body.or_else(|| self.body.clone()),
            url: args.url.or_else(|| self.url.clone()),
            params,
            with_credentials: args.with_credentials.or(self.with_credentials),
            response_type: args.response_type.or(self.response_type),
        }
    }
}

impl From<RequestOptions> for RequestOptionsArgs {
    fn from(options: RequestOptions) -> Self {
        Self {
            url: options.url,
            method: options.method,
            search: None,
            params: Some(ParamsArg::Params(options.params)),
            headers: options.headers,
            body: options.body,
            with_credentials: options.with_credentials,
            response_type: options.response_type,
        }
    }
}

/// Dispatcher defaults as they appear in a JSON config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpConfig {
    pub method: Option<RequestMethod>,
    pub headers: IndexMap<String, HeaderValues>,
    pub search: String,
    pub with_credentials: Option<bool>,
    pub response_type: Option<ResponseContentType>,
}

impl HttpConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

impl From<HttpConfig> for RequestOptions {
    fn from(config: HttpConfig) -> Self {
        RequestOptions {
            method: config.method.or(Some(RequestMethod::Get)),
            headers: Some(Headers::from_map(config.headers)),
            params: UrlSearchParams::new(&config.search),
            with_credentials: config.with_credentials,
            response_type: config.response_type,
            ..RequestOptions::default()
        }
    }
}
