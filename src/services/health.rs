//! Backend health probe.

use std::time::Instant;

use crate::api::dto::HealthResponse;
use crate::api::{ApiClient, ClientResult};

#[derive(Debug, Clone)]
pub struct HealthService {
    client: ApiClient,
}

/// Outcome of a health probe
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub response: HealthResponse,
    pub latency_ms: u64,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        matches!(self.response.status.as_str(), "healthy" | "ok")
    }
}

impl HealthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn check(&self) -> ClientResult<HealthReport> {
        let start = Instant::now();
        let response: HealthResponse = self.client.get("/health").await?;
        Ok(HealthReport {
            response,
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}
