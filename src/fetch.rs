use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::{ApiConfig, MAX_RETRY_DELAY_MS};
use crate::error::{FixtureError, Result};

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, mode: &str) -> Result<Value>;
}

/// GETs the configured endpoint with reqwest
pub struct HttpFetcher {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    retries: u32,
    retry_delay_ms: u64,
}

fn is_placeholder(key: &str) -> bool {
    let t = key.trim();
    t.is_empty()
        || t.contains("${")
        || t.eq_ignore_ascii_case("your-api-key-here")
        || t.eq_ignore_ascii_case("changeme")
}

impl HttpFetcher {
    pub fn new(api: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(api.timeout_ms))
            .user_agent(format!("fixture-app/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: api.endpoint.clone(),
            api_key: Some(api.api_key.clone()).filter(|k| !is_placeholder(k)),
            retries: api.retries,
            retry_delay_ms: api.retry_delay_ms,
        })
    }

    async fn fetch_once(&self) -> Result<Value> {
        let mut request = self
            .client
            .get(&self.endpoint)
            .header("Accept", "application/json");
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(FixtureError::Http {
                message: format!("HTTP {}: {}", status, error_text),
            });
        }

        let body = response.text().await?;
        Ok(parse_body(&body))
    }
}

/// Exponential backoff for attempt `i`, saturating and capped at `MAX_RETRY_DELAY_MS`
pub fn backoff_delay_ms(base_ms: u64, attempt: u32) -> u64 {
    base_ms
        .saturating_mul(1u64 << attempt.min(16))
        .min(MAX_RETRY_DELAY_MS)
}

/// JSON bodies decode to their value; anything else is kept as a string.
pub fn parse_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, mode: &str) -> Result<Value> {
        debug!("GET {} (mode={})", self.endpoint, mode);

        let attempts = self.retries.saturating_add(1);
        let mut last_err: Option<FixtureError> = None;
        for i in 0..attempts {
            match self.fetch_once().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    if i + 1 < attempts {
                        let delay_ms = backoff_delay_ms(self.retry_delay_ms, i);
                        warn!(
                            "Fetch attempt {}/{} failed: {}; retrying in {}ms",
                            i + 1,
                            attempts,
                            e,
                            delay_ms
                        );
                        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    }
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| FixtureError::Internal {
            message: "Unknown fetch error".to_string(),
        }))
    }
}
