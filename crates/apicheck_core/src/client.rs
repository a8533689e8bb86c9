//! Blocking HTTP request wrapper.
//!
//! Every call goes through [`ApiClient::request`], which never panics and
//! never returns an unstructured transport error: the outcome is either a
//! JSON object body or a [`RequestError`].

use crate::config::ServerConfig;
use crate::error::{excerpt, ApiCheckError, ErrorKind, RequestError, Result};
use crate::session::Session;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::Url;
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, error, info, warn};

/// HTTP methods the harness issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Upper-case verb as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Whether a JSON payload is sent with this method.
    pub fn carries_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location of an endpoint relative to the base URL.
///
/// Segments and query values are stored raw and percent-encoded only when
/// joined onto the base, so record ids and tenant ids containing `&`, `#`,
/// `/` or spaces cannot change the shape of the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiPath {
    segments: Vec<String>,
    query: Vec<(String, String)>,
}

impl ApiPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one path segment.
    pub fn segment(mut self, segment: impl fmt::Display) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    /// Appends one query parameter.
    pub fn query(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Resolves this path against `base`, keeping any path prefix of the base.
    pub fn join(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(&self.segments);
        }
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        url
    }
}

/// Splits a fixed route such as `/api/auth/login` into segments.
impl From<&str> for ApiPath {
    fn from(route: &str) -> Self {
        route
            .split('/')
            .filter(|s| !s.is_empty())
            .fold(Self::new(), |path, segment| path.segment(segment))
    }
}

/// Unencoded form, for log lines.
impl fmt::Display for ApiPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments.join("/"))?;
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{key}={value}")?;
        }
        Ok(())
    }
}

/// A response whose body parsed as a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Parsed body.
    pub body: Map<String, Value>,
}

impl ApiResponse {
    /// Looks up a top-level body field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }
}

/// Outcome of a single call.
pub type RequestResult = std::result::Result<ApiResponse, RequestError>;

/// Connection context shared by every call of one run.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    client: Client,
}

impl ApiClient {
    /// Builds a client with the configured timeout and default headers.
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| ApiCheckError::ClientBuild("invalid user agent".to_string()))?;
        headers.insert(USER_AGENT, agent);

        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| ApiCheckError::ClientBuild(e.to_string()))?;

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ApiCheckError::ConfigError(format!("invalid base URL {}: {e}", config.base_url))
        })?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Performs one call against `path` joined onto the base URL.
    ///
    /// A status other than `expected_status` is only logged; the body decides
    /// pass/fail. A body carrying an `error` field becomes an
    /// [`ErrorKind::Application`] failure.
    pub fn request(
        &self,
        session: Option<&Session>,
        method: Method,
        path: &ApiPath,
        payload: Option<&Value>,
        expected_status: u16,
    ) -> RequestResult {
        let url = path.join(&self.base_url);

        let mut builder = self.builder(method, &url, payload);
        if let Some(session) = session {
            match HeaderValue::from_str(&format!("Bearer {}", session.token())) {
                Ok(value) => builder = builder.header(AUTHORIZATION, value),
                Err(_) => {
                    error!("{} {} -> no response", method, path);
                    return Err(RequestError::new(
                        ErrorKind::Other,
                        "bearer token is not a valid header value",
                    ));
                }
            }
        }

        let response = match builder.send() {
            Ok(response) => response,
            Err(err) => {
                info!("{} {} -> no response", method, path);
                return Err(classify_transport(&url, &err));
            }
        };

        let status = response.status().as_u16();
        info!("{} {} -> {}", method, path, status);

        let text = match response.text() {
            Ok(text) => text,
            Err(err) => {
                error!("failed to read response body: {}", err);
                return Err(classify_transport(&url, &err).with_status(status));
            }
        };

        let body = match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(body)) => body,
            _ => {
                error!("JSON 응답 파싱 실패: {}", excerpt(&text, 100));
                return Err(RequestError::new(ErrorKind::InvalidJson, "Invalid JSON response")
                    .with_status(status)
                    .with_raw(&text));
            }
        };

        if status != expected_status {
            warn!(
                "예상 상태코드({})와 다름: {}",
                expected_status,
                describe_error(&body)
            );
        }

        if let Some(reason) = body.get("error") {
            debug!(status, "application error in body");
            return Err(
                RequestError::new(ErrorKind::Application, value_text(reason)).with_status(status)
            );
        }

        Ok(ApiResponse { status, body })
    }

    /// Performs a call and returns only the status and raw body, without
    /// classifying the body. Used by guard checks and health probes that need
    /// to look at rejection bodies themselves.
    pub fn probe(
        &self,
        method: Method,
        path: &ApiPath,
        payload: Option<&Value>,
    ) -> std::result::Result<(u16, Option<Map<String, Value>>), RequestError> {
        let url = path.join(&self.base_url);
        let response = match self.builder(method, &url, payload).send() {
            Ok(response) => response,
            Err(err) => {
                info!("{} {} -> no response", method, path);
                return Err(classify_transport(&url, &err));
            }
        };
        let status = response.status().as_u16();
        info!("{} {} -> {}", method, path, status);

        let body = response
            .text()
            .ok()
            .and_then(|text| match serde_json::from_str::<Value>(&text) {
                Ok(Value::Object(body)) => Some(body),
                _ => None,
            });
        Ok((status, body))
    }

    fn builder(&self, method: Method, url: &Url, payload: Option<&Value>) -> RequestBuilder {
        let url = url.clone();
        let builder = match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Delete => self.client.delete(url),
        };
        match payload {
            Some(payload) if method.carries_body() => builder.json(payload),
            _ => builder,
        }
    }
}

/// Maps a reqwest failure onto the harness taxonomy and logs it.
fn classify_transport(url: &Url, err: &reqwest::Error) -> RequestError {
    if err.is_timeout() {
        error!("요청 타임아웃: {}", url);
        RequestError::new(ErrorKind::Timeout, "Request timeout")
    } else if err.is_connect() {
        error!("연결 실패: {}", url);
        RequestError::new(ErrorKind::Connection, "Connection failed")
    } else {
        error!("요청 실패: {}", err);
        RequestError::new(ErrorKind::Other, err.to_string())
    }
}

/// Picks the most useful reason out of a JSON body.
pub fn describe_error(body: &Map<String, Value>) -> String {
    body.get("error")
        .or_else(|| body.get("message"))
        .map(value_text)
        .unwrap_or_else(|| "Unknown error".to_string())
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
