//! The API client: single choke point for outbound HTTP.
//!
//! # Design
//! `ApiClient` holds the base URL and the injected `SessionProvider`. Every
//! request goes through `build`, which joins the path, attaches the bearer
//! token and JSON headers, and serializes the body. Responses go through
//! `parse_payload`, which maps non-2xx statuses to `ApiError` and unwraps the
//! `{"data": ...}` envelope some endpoints use.
//!
//! Each operation comes in two forms:
//! - split: `build_*` returns an `HttpRequest`, the host executes it, and
//!   `parse` interprets the `HttpResponse`;
//! - combined: `get` / `post` / `put` / `delete` run one round trip through
//!   a `Transport` and return an `ApiResponse` carrying either `data` or an
//!   `error` string, never both.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::session::SessionProvider;

/// Keys allowed next to `data` in a response envelope.
const ENVELOPE_KEYS: [&str; 6] = ["data", "success", "message", "status", "count", "total"];

/// Result of a combined call: exactly one of `data` / `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> Result<T, String> {
        match (self.data, self.error) {
            (_, Some(error)) => Err(error),
            (Some(data), None) => Ok(data),
            (None, None) => Err("empty response".to_string()),
        }
    }
}

impl<T> From<Result<T, ApiError>> for ApiResponse<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => ApiResponse::ok(data),
            Err(e) => ApiResponse::err(e.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    session: Arc<SessionProvider>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: Arc<SessionProvider>) -> Self {
        Self {
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            session,
        }
    }

    /// A client with its own in-memory session.
    pub fn with_base_url(base_url: &str) -> Self {
        Self::new(
            &ClientConfig::new(base_url),
            Arc::new(SessionProvider::in_memory()),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionProvider> {
        &self.session
    }

    /// Absolute URL for `path`, joined with exactly one `/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Absolute URL for `path` with a url-encoded query string. Pairs with an
    /// empty value are skipped.
    pub fn url_with_query(&self, path: &str, query: &[(&str, &str)]) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        let mut any = false;
        for (key, value) in query {
            let value = value.trim();
            if !value.is_empty() {
                serializer.append_pair(key, value);
                any = true;
            }
        }
        let url = self.url(path);
        if any {
            format!("{url}?{}", serializer.finish())
        } else {
            url
        }
    }

    /// Build a request against an already-resolved absolute URL.
    pub fn build_absolute<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        url: String,
        body: Option<&B>,
    ) -> Result<HttpRequest, ApiError> {
        let body = body
            .map(|b| serde_json::to_string(b).map_err(|e| ApiError::Serialization(e.to_string())))
            .transpose()?;
        Ok(self.assemble(method, url, body))
    }

    pub fn build<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
    ) -> Result<HttpRequest, ApiError> {
        self.build_absolute(method, self.url(path), body)
    }

    pub fn build_get(&self, path: &str) -> HttpRequest {
        self.bodyless(HttpMethod::Get, self.url(path))
    }

    pub fn build_get_with_query(&self, path: &str, query: &[(&str, &str)]) -> HttpRequest {
        self.bodyless(HttpMethod::Get, self.url_with_query(path, query))
    }

    pub fn build_post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<HttpRequest, ApiError> {
        self.build(HttpMethod::Post, path, Some(body))
    }

    pub fn build_put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<HttpRequest, ApiError> {
        self.build(HttpMethod::Put, path, Some(body))
    }

    pub fn build_delete(&self, path: &str) -> HttpRequest {
        self.bodyless(HttpMethod::Delete, self.url(path))
    }

    fn bodyless(&self, method: HttpMethod, url: String) -> HttpRequest {
        self.assemble(method, url, None)
    }

    /// Every request carries JSON `accept` and `content-type`, plus the
    /// bearer token while a session is established.
    fn assemble(&self, method: HttpMethod, url: String, body: Option<String>) -> HttpRequest {
        let mut headers = vec![
            ("accept".to_string(), "application/json".to_string()),
            ("content-type".to_string(), "application/json".to_string()),
        ];
        if let Some(token) = self.session.token() {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }
        debug!(%method, %url, "built request");
        HttpRequest {
            method,
            url,
            headers,
            body,
        }
    }

    /// Check the status and return the JSON payload, unwrapped from a
    /// `{"data": ...}` envelope when present. An empty 2xx body is `null`.
    pub fn parse_payload(&self, response: HttpResponse) -> Result<Value, ApiError> {
        check_status(&response)?;
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        let value: Value = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        Ok(unwrap_envelope(value))
    }

    pub fn parse<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        let payload = self.parse_payload(response)?;
        serde_json::from_value(payload).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Execute `request` once through `transport`.
    pub fn send(
        &self,
        transport: &dyn Transport,
        request: HttpRequest,
    ) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        let response = transport.execute(request)?;
        debug!(%method, %url, status = response.status, "response received");
        Ok(response)
    }

    pub fn get<T: DeserializeOwned>(&self, transport: &dyn Transport, path: &str) -> ApiResponse<T> {
        let request = self.build_get(path);
        self.call(transport, Ok(request)).into()
    }

    pub fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        transport: &dyn Transport,
        path: &str,
        body: &B,
    ) -> ApiResponse<T> {
        self.call(transport, self.build_post(path, body)).into()
    }

    pub fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        transport: &dyn Transport,
        path: &str,
        body: &B,
    ) -> ApiResponse<T> {
        self.call(transport, self.build_put(path, body)).into()
    }

    pub fn delete(&self, transport: &dyn Transport, path: &str) -> ApiResponse<()> {
        let result = self
            .send(transport, self.build_delete(path))
            .and_then(|response| self.parse_payload(response).map(|_| ()));
        result.into()
    }

    fn call<T: DeserializeOwned>(
        &self,
        transport: &dyn Transport,
        request: Result<HttpRequest, ApiError>,
    ) -> Result<T, ApiError> {
        let response = self.send(transport, request?)?;
        self.parse(response)
    }
}

fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map)
            if map.contains_key("data") && map.keys().all(|k| ENVELOPE_KEYS.contains(&k.as_str())) =>
        {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Map non-2xx responses to the matching `ApiError`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    match response.status {
        401 => Err(ApiError::Unauthorized),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::Http {
            status,
            message: error_message(response),
        }),
    }
}

/// The body's `message` / `error` field, else the raw body, else the status.
fn error_message(response: &HttpResponse) -> String {
    let body = response.body.trim();
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(Value::String(msg)) = map.get(key) {
                if !msg.trim().is_empty() {
                    return msg.clone();
                }
            }
        }
    }
    if body.is_empty() {
        format!("HTTP {}", response.status)
    } else {
        body.to_string()
    }
}
