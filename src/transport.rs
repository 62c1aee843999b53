//! HTTP plumbing between the client and the backend.
//!
//! [`ApiClient`] builds requests against the REST surface and decodes the
//! JSON answers; the actual I/O goes through a [`Transport`], so tests can
//! swap the reqwest-backed [`HttpTransport`] for a scripted one.

use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::config;
use crate::error::{DmError, Result};
use crate::query_params::QueryParams;

// ---------------------------------------------------------------------------
// Request / response
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute path below the base URL, e.g. `/api/cards/0`.
    pub path: String,
    pub query: QueryParams,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Path plus encoded query, as it would appear after the host.
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query.encode())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decode the body of a successful response; any other status becomes
    /// the matching [`DmError`].
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        if !self.is_success() {
            return Err(DmError::from_status(self.status, self.body.clone()));
        }
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Fail with the matching [`DmError`] unless the status is a success.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(DmError::from_status(self.status, self.body))
        }
    }
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Executes requests against the backend.
pub trait Transport {
    /// Send `request` and return the raw response. Non-success statuses are
    /// returned as responses, not errors; only I/O failures are errors.
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse>;

    /// Current value of the named cookie, if the transport keeps cookies.
    fn cookie(&self, name: &str) -> Option<String>;
}

/// Pick `name` out of a `Cookie` header value (`a=1; XSRF-TOKEN=abc`).
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
        .map(str::to_string)
}

/// reqwest-backed transport with a cookie jar shared across requests.
pub struct HttpTransport {
    base_url: Url,
    client: Client,
    jar: Arc<Jar>,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .timeout(timeout)
            .cookie_provider(jar.clone())
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            base_url,
            client,
            jar,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, request: &ApiRequest) -> Result<Url> {
        let mut url = self.base_url.join(&request.path)?;
        if !request.query.is_empty() {
            url.set_query(Some(&request.query.encode()));
        }
        Ok(url)
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = self.url_for(request)?;
        let mut builder = self.client.request(request.method.clone(), url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let response = builder.send()?;
        let status = response.status();
        let body = response.text()?;
        Ok(ApiResponse { status, body })
    }

    fn cookie(&self, name: &str) -> Option<String> {
        let header = self.jar.cookies(&self.base_url)?;
        cookie_value(header.to_str().ok()?, name)
    }
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// Thin request builder over a [`Transport`].
///
/// Mutating requests carry the `X-XSRF-TOKEN` header mirrored from the
/// `XSRF-TOKEN` cookie. A missing cookie sends an empty token; rejecting it
/// is up to the server.
pub struct ApiClient {
    transport: Box<dyn Transport + Send>,
}

impl ApiClient {
    pub fn new(transport: Box<dyn Transport + Send>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Token to mirror into the anti-forgery header.
    pub fn xsrf_token(&self) -> String {
        self.transport
            .cookie(config::XSRF_COOKIE)
            .unwrap_or_default()
    }

    /// Send a request, attaching the anti-forgery header to anything that
    /// is not a GET.
    pub fn send(&self, mut request: ApiRequest) -> Result<ApiResponse> {
        if request.method != Method::GET {
            request
                .headers
                .push((config::XSRF_HEADER.to_string(), self.xsrf_token()));
        }
        if request.body.is_some() {
            request
                .headers
                .push((CONTENT_TYPE.as_str().to_string(), "application/json".to_string()));
        }
        debug!(method = %request.method, path = %request.path_and_query(), "sending request");
        let response = self.transport.execute(&request)?;
        debug!(status = %response.status, path = %request.path, "received response");
        Ok(response)
    }

    pub fn get(&self, path: &str) -> Result<ApiResponse> {
        self.send(ApiRequest::new(Method::GET, path))
    }

    pub fn get_with_query(&self, path: &str, query: QueryParams) -> Result<ApiResponse> {
        let mut request = ApiRequest::new(Method::GET, path);
        request.query = query;
        self.send(request)
    }

    pub fn post<B: Serialize>(&self, path: &str, body: Option<&B>) -> Result<ApiResponse> {
        self.with_body(Method::POST, path, body)
    }

    pub fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        self.with_body(Method::PUT, path, Some(body))
    }

    pub fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.send(ApiRequest::new(Method::DELETE, path))
    }

    /// GET and decode, mapping non-success statuses to errors.
    pub fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get(path)?.json()
    }

    fn with_body<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<ApiResponse> {
        let mut request = ApiRequest::new(method, path);
        request.body = body.map(serde_json::to_value).transpose()?;
        self.send(request)
    }
}
