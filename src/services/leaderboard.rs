//! Leaderboard service.

use async_trait::async_trait;

use super::LeaderboardSource;
use crate::api::dto::{LeaderboardQuery, LeaderboardResponse, SortBy, SortOrder};
use crate::api::{ApiClient, ClientResult};

/// HTTP implementation of [`LeaderboardSource`]
#[derive(Debug, Clone)]
pub struct LeaderboardService {
    client: ApiClient,
}

impl LeaderboardService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LeaderboardSource for LeaderboardService {
    async fn get_leaderboard(
        &self,
        sort_by: SortBy,
        order: SortOrder,
    ) -> ClientResult<LeaderboardResponse> {
        let query = LeaderboardQuery { sort_by, order };
        self.client.get_with_query("/api/leaderboard", &query).await
    }
}
