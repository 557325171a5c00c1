//! Available model listing.

use crate::api::dto::{ModelInfo, ModelsResponse};
use crate::api::{ApiClient, ClientResult};

#[derive(Debug, Clone)]
pub struct ModelService {
    client: ApiClient,
}

impl ModelService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Models the backend can pick for battles
    pub async fn list_models(&self) -> ClientResult<Vec<ModelInfo>> {
        let response: ModelsResponse = self.client.get("/api/models").await?;
        Ok(response.models)
    }
}
