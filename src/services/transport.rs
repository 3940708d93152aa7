// src/services/transport.rs

//! HTTP transport with a single bounded retry.
//!
//! Every call gets at most [`MAX_ATTEMPTS`] tries separated by a fixed delay.
//! Failures never escape as errors: GET yields `None` and POST yields `false`,
//! leaving the caller to decide what a missing response means.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::Result;
use crate::models::TransportConfig;
use crate::utils::http::create_async_client;

/// Initial attempt plus one retry.
pub const MAX_ATTEMPTS: usize = 2;

/// Outbound HTTP used by feed processors and the notifier.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch and decode a JSON document.
    async fn get_json(&self, url: &str) -> Option<Value>;

    /// POST a JSON payload, reporting whether the server accepted it.
    async fn post_json(&self, url: &str, payload: &Value) -> bool;
}

/// `reqwest`-backed transport.
pub struct HttpTransport {
    client: Client,
    retry_delay: Duration,
}

impl HttpTransport {
    /// Create a transport from configuration.
    pub fn new(config: &TransportConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
            retry_delay: Duration::from_secs(config.retry_delay_secs),
        })
    }

    /// Override the pause between attempts.
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    async fn try_get(&self, url: &str) -> Result<Value> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        log::trace!("{}", body);
        Ok(serde_json::from_str(&body)?)
    }

    async fn try_post(&self, url: &str, payload: &Value) -> Result<()> {
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        log::trace!("{}", response.text().await.unwrap_or_default());
        Ok(())
    }

    /// Run `op` until it succeeds or attempts are exhausted.
    async fn with_retry<T, F, Fut>(&self, method: &str, url: &str, mut op: F) -> Option<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        for attempt in 1..=MAX_ATTEMPTS {
            match op().await {
                Ok(value) => return Some(value),
                Err(e) if attempt < MAX_ATTEMPTS => {
                    log::debug!(
                        "{} {} failed, {}... Retry in {}s",
                        method,
                        url,
                        e,
                        self.retry_delay.as_secs()
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                // Upstream timeouts are routine
                Err(e) if e.is_timeout() => log::debug!("{} {} failed, {}", method, url, e),
                Err(e) => log::error!("{} {} failed, {}", method, url, e),
            }
        }
        None
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &str) -> Option<Value> {
        log::debug!("GET {}", url);
        self.with_retry("GET", url, || self.try_get(url)).await
    }

    async fn post_json(&self, url: &str, payload: &Value) -> bool {
        log::debug!("POST {}", url);
        self.with_retry("POST", url, || self.try_post(url, payload))
            .await
            .is_some()
    }
}
