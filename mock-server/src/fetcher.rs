//! Executes the plain-data requests built by `WeatherClient`.
//!
//! `WeatherFetcher` is the I/O seam: the server ships `ReqwestFetcher` and
//! tests substitute canned responses.

use std::time::Duration;

use async_trait::async_trait;
use records_core::{HttpMethod, HttpRequest, HttpResponse, WeatherError};

#[async_trait]
pub trait WeatherFetcher: Send + Sync {
    /// Run one round-trip. Non-2xx statuses are returned as data; only
    /// transport failures are errors.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, WeatherError>;
}

/// `WeatherFetcher` backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(timeout: Duration) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WeatherError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl WeatherFetcher for ReqwestFetcher {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, WeatherError> {
        let builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
        };

        let response = builder
            .query(&request.query)
            .send()
            .await
            .map_err(|e| WeatherError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::Transport(e.to_string()))?;

        Ok(HttpResponse::new(status, body))
    }
}
