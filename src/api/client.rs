//! Backend HTTP Client
//!
//! Thin JSON wrapper over reqwest with uniform error handling. Every
//! service in [`crate::services`] goes through this type.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::borrow::Cow;
use std::time::{Duration, Instant};

use super::error::{ClientError, ClientResult};
use crate::config::ApiConfig;

/// JSON client bound to one backend base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client from the API configuration
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path (`/api/...`)
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path);
        self.send("GET", &url, self.client.get(&url)).await
    }

    /// GET with a serialized query string
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path);
        self.send("GET", &url, self.client.get(&url).query(query))
            .await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        self.send("POST", &url, self.client.post(&url).json(body))
            .await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        self.send("PUT", &url, self.client.put(&url).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path);
        self.send("DELETE", &url, self.client.delete(&url)).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: &'static str,
        url: &str,
        request: RequestBuilder,
    ) -> ClientResult<T> {
        let start = Instant::now();

        let response = request
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ClientError::from_transport(e, &self.base_url))?;

        let status = response.status();
        tracing::debug!(
            method,
            url,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Backend request completed"
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ClientError::from_response(status, &body);
            tracing::warn!(method, url, status = status.as_u16(), error = %err, "Backend returned error");
            return Err(err);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::from_transport(e, &self.base_url))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(method, url, error = %e, "Undecodable backend response");
            ClientError::Decode(e.to_string())
        })
    }
}

/// Percent-encode a value interpolated into a URL path
pub fn encode_segment(segment: &str) -> Cow<'_, str> {
    urlencoding::encode(segment)
}
