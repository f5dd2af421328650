use std::time::Duration;

use anyhow::{Context, Error};
use reqwest::Response;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::de::DeserializeOwned;
use thiserror::Error as ThisError;
use url::Url;

#[derive(ThisError, Debug)]
pub enum HttpClientError {
    #[error(transparent)]
    ResponseError(#[from] Error),
    #[error("httpBuilderError {0}")]
    HTTPBuilderError(String),
}

#[derive(Debug, Clone, Copy)]
pub struct HttpClientConfig {
    /// Upper bound for a single attempt, connection included.
    pub timeout: Duration,
    /// Transient failures (connect errors, 5xx, 429) are retried with exponential backoff.
    pub max_retries: u32,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            max_retries: 3,
        }
    }
}

#[derive(Clone)]
pub struct HttpClient {
    client: ClientWithMiddleware,
}

impl HttpClient {
    pub fn new(config: HttpClientConfig) -> Result<Self, HttpClientError> {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| HttpClientError::HTTPBuilderError(err.to_string()))?;
        let client = ClientBuilder::new(inner)
            // Retry failed requests.
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .with(TracingMiddleware::default())
            .build();
        Ok(Self { client })
    }

    async fn get(&self, url: Url) -> anyhow::Result<Response> {
        self.client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch request from {url}"))?
            .error_for_status()
            .with_context(|| format!("Unexpected response status from {url}"))
    }

    pub async fn get_json<DTO: DeserializeOwned>(&self, url: Url) -> Result<DTO, HttpClientError> {
        let response = self.get(url.clone()).await?;
        response
            .json::<DTO>()
            .await
            .with_context(|| format!("Failed to deserialize response from {url}"))
            .map_err(HttpClientError::ResponseError)
    }
}
