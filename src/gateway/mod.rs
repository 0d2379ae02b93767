//! HTTP transport wrapper for the story-generation backend.
//!
//! Two calling styles are offered. The plain verbs (`get`, `post`, `put`,
//! `delete`, `upload_photo`) never fail at the type level: they return an
//! [`ApiResponse`] carrying either the payload or a user-facing error
//! string. The `*_with_error` variants propagate the full
//! [`ClassifiedError`] for callers that prefer `?`-style flow.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::GatewayConfig;
use crate::error::{classify, ClassifiedError, Result};

/// Fixed endpoint for photo uploads.
const UPLOAD_PATH: &str = "/upload_photo";

/// Per-request overrides for the non-throwing verbs.
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Fallback error message when the error body has no `detail`,
    /// `message`, or `error` field.
    pub error_message: Option<String>,
    /// Overrides the gateway-wide timeout for this request.
    pub timeout: Option<Duration>,
}

/// Outcome of a non-throwing gateway call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    Success { data: T },
    Failure { error: String },
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn data(self) -> Option<T> {
        match self {
            Self::Success { data } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }

    fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::Success { data },
            Err(e) => Self::Failure {
                error: e.message().to_string(),
            },
        }
    }
}

/// Thin transport wrapper: base URL, timeout, error translation, logging.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl HttpGateway {
    /// Build a gateway from config. Fails only if the underlying client
    /// cannot be constructed (e.g. TLS backend initialization).
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClassifiedError::from_transport)?;
        Ok(Self { client, config })
    }

    /// Gateway configured from the environment.
    pub fn from_env() -> Result<Self> {
        Self::new(GatewayConfig::from_env())
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        config: Option<&RequestConfig>,
    ) -> ApiResponse<T> {
        ApiResponse::from_result(self.request(Method::GET, path, None::<&()>, config).await)
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        config: Option<&RequestConfig>,
    ) -> ApiResponse<T> {
        ApiResponse::from_result(self.request(Method::POST, path, Some(body), config).await)
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        config: Option<&RequestConfig>,
    ) -> ApiResponse<T> {
        ApiResponse::from_result(self.request(Method::PUT, path, Some(body), config).await)
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        config: Option<&RequestConfig>,
    ) -> ApiResponse<T> {
        ApiResponse::from_result(self.request(Method::DELETE, path, None::<&()>, config).await)
    }

    /// GET that propagates the classified error instead of flattening it.
    pub async fn get_with_error<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None::<&()>, None).await
    }

    /// POST that propagates the classified error instead of flattening it.
    pub async fn post_with_error<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.request(Method::POST, path, Some(body), None).await
    }

    /// Upload a single file as multipart form data to the fixed upload
    /// endpoint. Success returns the server's JSON body verbatim; a non-OK
    /// response surfaces the body's `detail` field as the error message.
    pub async fn upload_photo(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ApiResponse<serde_json::Value> {
        ApiResponse::from_result(self.upload_photo_inner(file_name, bytes).await)
    }

    async fn upload_photo_inner(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<serde_json::Value> {
        let url = self.url(UPLOAD_PATH);
        tracing::debug!(method = "POST", path = UPLOAD_PATH, file_name, "request");

        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(method = "POST", path = UPLOAD_PATH, error = %e, "request failed");
                ClassifiedError::from_transport(e)
            })?;

        let status = response.status();
        tracing::debug!(
            method = "POST",
            path = UPLOAD_PATH,
            status = status.as_u16(),
            "response"
        );

        if status.is_success() {
            return response.json().await.map_err(ClassifiedError::from_transport);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string));
        tracing::error!(
            method = "POST",
            path = UPLOAD_PATH,
            status = status.as_u16(),
            "upload failed"
        );
        Err(ClassifiedError::upload(detail))
    }

    /// Probe backend reachability. Any response, whatever the status,
    /// counts as reachable; only a transport failure counts as down.
    pub async fn health_check(&self) -> bool {
        let url = self.url("/");
        match self.client.get(&url).send().await {
            Ok(response) => {
                tracing::debug!(
                    method = "GET",
                    path = "/",
                    status = response.status().as_u16(),
                    "health check"
                );
                true
            }
            Err(e) => {
                tracing::error!(method = "GET", path = "/", error = %e, "health check failed");
                false
            }
        }
    }

    async fn request<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        config: Option<&RequestConfig>,
    ) -> Result<T> {
        let url = self.url(path);
        tracing::debug!(method = %method, path, "request");

        let mut builder: RequestBuilder = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        if let Some(timeout) = config.and_then(|c| c.timeout) {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(method = %method, path, error = %e, "request failed");
            ClassifiedError::from_transport(e)
        })?;

        let status = response.status();
        tracing::debug!(method = %method, path, status = status.as_u16(), "response");

        if status.is_success() {
            return response.json().await.map_err(ClassifiedError::from_transport);
        }

        let fallback = config
            .and_then(|c| c.error_message.as_deref())
            .unwrap_or(classify::API_MESSAGE);
        let body = response.text().await.unwrap_or_default();
        let body_message = extract_error_message(&body);
        let message = body_message.as_deref().unwrap_or(fallback);
        tracing::error!(
            method = %method,
            path,
            status = status.as_u16(),
            error = %message,
            "request failed"
        );
        let mut error = ClassifiedError::from_status(status.as_u16(), message);
        // Only text that actually came from the server becomes `detail`.
        if let Some(detail) = body_message {
            error = error.with_detail(detail);
        }
        Err(error)
    }
}

/// Pull a human-readable message out of an error body: `detail`, then
/// `message`, then `error`. `None` when the body has no usable text.
fn extract_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["detail", "message", "error"]
                .iter()
                .find_map(|key| v.get(key).and_then(|m| m.as_str()).map(str::to_string))
        })
}
