//! # HTTP Client Utilities
//!
//! Thin wrapper over `reqwest` for the REST store.
//!
//! This module provides:
//! - Configurable timeouts
//! - Default headers for credentials
//! - JSON serialization/deserialization
//! - Status-to-error mapping
//!
//! # Examples
//!
//! ```ignore
//! use settlement_risk::infrastructure::rest::http_client::HttpClient;
//!
//! let client = HttpClient::new(5000)?;
//! let rows: Vec<serde_json::Value> = client.get_with_params(url, &[("select", "*")]).await?;
//! ```

use crate::infrastructure::rest::error::{StoreError, StoreResult};
use reqwest::header::HeaderMap;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client wrapper for the REST store.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client.
    client: Client,
    /// Request timeout in milliseconds.
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with the specified timeout.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Internal` if the client cannot be created.
    pub fn new(timeout_ms: u64) -> StoreResult<Self> {
        Self::with_headers(timeout_ms, HeaderMap::new())
    }

    /// Creates a new HTTP client sending `default_headers` on every request.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Internal` if the client cannot be created.
    pub fn with_headers(timeout_ms: u64, default_headers: HeaderMap) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .default_headers(default_headers)
            .build()
            .map_err(|e| StoreError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, timeout_ms })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Makes a GET request with query parameters and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connection` or `StoreError::Timeout` if the request fails,
    /// a status-specific error for non-2xx answers, and
    /// `StoreError::Protocol` if the response cannot be parsed.
    pub async fn get_with_params<T: DeserializeOwned, P: Serialize + ?Sized>(
        &self,
        url: &str,
        params: &P,
    ) -> StoreResult<T> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        handle_json(response).await
    }

    /// Makes a POST request with a JSON body and extra headers, ignoring the
    /// response body.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connection` or `StoreError::Timeout` if the request fails,
    /// or a status-specific error for non-2xx answers.
    pub async fn post_with_headers<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        headers: HeaderMap,
    ) -> StoreResult<()> {
        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let error_body = response.text().await.unwrap_or_default();
            Err(map_status_error(status, &error_body))
        }
    }

    /// Makes a simple health check GET request.
    ///
    /// Returns `true` if the request succeeds with a 2xx status code.
    pub async fn health_check(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

/// Checks the status and deserializes the JSON body.
async fn handle_json<T: DeserializeOwned>(response: Response) -> StoreResult<T> {
    let status = response.status();

    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::protocol(format!("Failed to parse response: {e}")))
    } else {
        let error_body = response.text().await.unwrap_or_default();
        Err(map_status_error(status, &error_body))
    }
}

/// Maps a reqwest error to a `StoreError`.
fn map_reqwest_error(error: reqwest::Error) -> StoreError {
    if error.is_timeout() {
        StoreError::timeout("Request timed out")
    } else if error.is_connect() {
        StoreError::connection(format!("Connection failed: {error}"))
    } else {
        StoreError::connection(format!("HTTP request failed: {error}"))
    }
}

/// Maps an HTTP status code to a `StoreError`.
fn map_status_error(status: StatusCode, body: &str) -> StoreError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::CONFLICT => {
            StoreError::invalid_request(format!("Rejected ({status}): {body}"))
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            StoreError::authentication(format!("Authentication failed: {body}"))
        }
        StatusCode::TOO_MANY_REQUESTS => StoreError::rate_limited("Rate limit exceeded"),
        StatusCode::INTERNAL_SERVER_ERROR
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT => {
            StoreError::connection(format!("Server error ({status}): {body}"))
        }
        _ => StoreError::protocol(format!("HTTP error ({status}): {body}")),
    }
}
