use crate::domain::monitor::{HealthReport, HealthState};
use async_trait::async_trait;
use std::time::{Duration, Instant};

#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Probe `url` once. Never fails: problems are reported in the result.
    async fn check(&self, url: &str) -> HealthReport;
}

/// GET-based probe; 200 is healthy, any other answer unhealthy
pub struct HttpHealthProbe {
    http_client: reqwest::Client,
}

impl HttpHealthProbe {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http_client: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }
}

#[async_trait]
impl HealthProbe for HttpHealthProbe {
    async fn check(&self, url: &str) -> HealthReport {
        let start = Instant::now();

        match self.http_client.get(url).send().await {
            Ok(response) => {
                let elapsed = start.elapsed().as_millis() as u64;
                HealthReport::responded(response.status().as_u16(), elapsed)
            }
            Err(e) if e.is_timeout() => HealthReport::failed(HealthState::Timeout, "Request timeout"),
            Err(e) if e.is_connect() => {
                HealthReport::failed(HealthState::Down, "Connection refused")
            }
            Err(e) => {
                tracing::debug!(url = url, error = %e, "Health probe failed");
                HealthReport::failed(HealthState::Error, e.to_string())
            }
        }
    }
}
