//! mail-cannon-theseus
//!
//! [`OrderClient`] implementation that creates warehouse orders through the
//! Theseus HTTP API (`POST {base_url}/api/v1/warehouse_orders`).
#![warn(missing_docs)]

use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use mail_cannon_core::{Config, ConfigError, OrderClient, OrderError, OrderPayload};
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use serde_json::{Value, json};
use url::Url;

/// Order-creation endpoint, relative to the configured base URL.
pub const ORDERS_PATH: &str = "/api/v1/warehouse_orders";

/// Upper bound on a single request, connect through body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("mail-cannon/", env!("CARGO_PKG_VERSION"));

/// Theseus API client. One instance is reused for every row of a run.
#[derive(Clone)]
pub struct TheseusClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl std::fmt::Debug for TheseusClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TheseusClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl TheseusClient {
    /// Build a client with the fixed timeout and user agent.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidBaseUrl`] if the endpoint cannot be formed
    /// from `base_url`, or [`ConfigError::HttpClient`] if the HTTP client fails
    /// to initialize.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Self::with_client(http, base_url, api_key)
    }

    /// Build a client from a loaded [`Config`].
    ///
    /// # Errors
    /// See [`TheseusClient::new`].
    pub fn from_config(cfg: &Config) -> Result<Self, ConfigError> {
        Self::new(&cfg.base_url, cfg.api_key.clone())
    }

    /// Build from a caller-supplied `reqwest::Client`.
    ///
    /// The caller is responsible for its timeout and user agent.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidBaseUrl`] if the endpoint cannot be formed.
    pub fn with_client(
        http: reqwest::Client,
        base_url: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            http,
            endpoint: orders_endpoint(base_url)?,
            api_key: api_key.into(),
        })
    }

    /// Full URL orders are posted to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn orders_endpoint(base_url: &str) -> Result<Url, ConfigError> {
    let raw = format!("{}{ORDERS_PATH}", base_url.trim_end_matches('/'));
    Url::parse(&raw).map_err(|e| ConfigError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

fn map_reqwest_err(e: &reqwest::Error) -> OrderError {
    if e.is_timeout() {
        return OrderError::transport(format!(
            "request timed out after {}s",
            REQUEST_TIMEOUT.as_secs()
        ));
    }
    // reqwest's own message is generic; the useful part (DNS, refused, ...) is
    // further down the source chain.
    let mut reason = e.to_string();
    let mut source = e.source();
    while let Some(inner) = source {
        reason.push_str(": ");
        reason.push_str(&inner.to_string());
        source = inner.source();
    }
    OrderError::transport(reason)
}

fn decode_success(text: &str) -> Value {
    if text.trim().is_empty() {
        return json!({});
    }
    serde_json::from_str(text).unwrap_or_else(|_| json!({ "raw": text }))
}

fn decode_error(status: StatusCode, text: &str) -> Value {
    if text.trim().is_empty() {
        let reason = status.canonical_reason().unwrap_or("");
        return json!({ "raw": format!("HTTP Error {}: {reason}", status.as_u16()) });
    }
    serde_json::from_str(text).unwrap_or_else(|_| json!({ "raw": text }))
}

#[async_trait]
impl OrderClient for TheseusClient {
    fn name(&self) -> &'static str {
        "theseus"
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "mail_cannon_theseus::create_order",
            skip(self, payload),
            fields(email = %payload.warehouse_order.recipient_email),
        )
    )]
    async fn create_order(&self, payload: &OrderPayload) -> Result<Value, OrderError> {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!("POST {}", self.endpoint);
            tracing::debug!(
                "Request body: {}",
                serde_json::to_string_pretty(payload).unwrap_or_default()
            );
        }

        let resp = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| map_reqwest_err(&e))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| map_reqwest_err(&e))?;

        #[cfg(feature = "tracing")]
        tracing::debug!("Response status: {}", status.as_u16());

        if status.is_success() {
            let body = decode_success(&text);
            #[cfg(feature = "tracing")]
            tracing::debug!(
                "Response body: {}",
                serde_json::to_string_pretty(&body).unwrap_or_default()
            );
            Ok(body)
        } else {
            Err(OrderError::http(status.as_u16(), decode_error(status, &text)))
        }
    }
}
