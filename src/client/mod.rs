//! HTTP session against the API under test.
//!
//! One `ApiClient` lives for the whole run. Its cookie store carries the auth
//! cookie set by login, so switching identity is just another login call.

mod error;

pub use error::{ApiError, MAX_BODY_IN_ERROR};

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, warn};

use crate::config::RunConfig;
use crate::utils::{one_line, truncate};

const USER_AGENT: &str = concat!("roomcheck/", env!("CARGO_PKG_VERSION"));

pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create the session client with cookie persistence and the configured timeouts.
    pub fn new(config: &RunConfig) -> Result<Self> {
        let http = Client::builder()
            .cookie_store(true)
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint such as `/rooms/{id}/join`.
    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    pub fn get(&self, endpoint: impl Into<String>) -> Call<'_> {
        Call::new(self, Method::GET, endpoint.into())
    }

    pub fn post(&self, endpoint: impl Into<String>) -> Call<'_> {
        Call::new(self, Method::POST, endpoint.into())
    }

    pub fn delete(&self, endpoint: impl Into<String>) -> Call<'_> {
        Call::new(self, Method::DELETE, endpoint.into())
    }
}

/// A single request with the status it is expected to produce.
///
/// The default expectation is `200 OK`. Negative checks pass a different
/// status (401, 400) and treat receiving it as success.
pub struct Call<'a> {
    client: &'a ApiClient,
    method: Method,
    endpoint: String,
    body: Option<Result<Value, serde_json::Error>>,
    expected: StatusCode,
}

impl<'a> Call<'a> {
    fn new(client: &'a ApiClient, method: Method, endpoint: String) -> Self {
        Self {
            client,
            method,
            endpoint,
            body: None,
            expected: StatusCode::OK,
        }
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        self.body = Some(serde_json::to_value(body));
        self
    }

    pub fn expect(mut self, status: StatusCode) -> Self {
        self.expected = status;
        self
    }

    pub fn send(self) -> Result<ApiResponse, ApiError> {
        let method = self.method.to_string();
        let url = self.client.url(&self.endpoint);

        let mut request = self.client.http.request(self.method.clone(), &url);
        if let Some(body) = self.body {
            let body = body.map_err(|source| ApiError::Encode {
                method: method.clone(),
                endpoint: self.endpoint.clone(),
                source,
            })?;
            request = request.json(&body);
        }

        let started = Instant::now();
        let transport = |source| ApiError::Transport {
            method: method.clone(),
            endpoint: self.endpoint.clone(),
            source,
        };
        let response = request.send().map_err(transport)?;
        let status = response.status();
        let body = response.text().map_err(transport)?;

        debug!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "api call"
        );

        if status != self.expected {
            warn!(
                method = %method,
                endpoint = %self.endpoint,
                expected = self.expected.as_u16(),
                actual = status.as_u16(),
                body = %truncate(&one_line(&body), MAX_BODY_IN_ERROR),
                "unexpected status"
            );
            return Err(ApiError::UnexpectedStatus {
                method,
                endpoint: self.endpoint,
                expected: self.expected.as_u16(),
                actual: status.as_u16(),
                body,
            });
        }

        Ok(ApiResponse {
            method,
            endpoint: self.endpoint,
            body,
        })
    }
}

/// A response whose status matched the expectation.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    method: String,
    endpoint: String,
    body: String,
}

impl ApiResponse {
    /// Decode the body into a typed payload.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|source| ApiError::Decode {
            method: self.method.clone(),
            endpoint: self.endpoint.clone(),
            source,
        })
    }
}
