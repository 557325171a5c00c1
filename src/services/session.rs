//! Session service: history listing and session detail.

use async_trait::async_trait;
use serde::Serialize;

use super::SessionSource;
use crate::api::dto::{SessionBattlesResponse, SessionListResponse};
use crate::api::{encode_segment, ApiClient, ClientResult};
use crate::identity::UserId;

/// Page size used when the caller has no preference
pub const DEFAULT_PAGE_SIZE: u32 = 50;

#[derive(Debug, Serialize)]
struct SessionListQuery<'a> {
    user_id: &'a str,
    limit: u32,
    offset: u32,
}

/// HTTP implementation of [`SessionSource`]
#[derive(Debug, Clone)]
pub struct SessionService {
    client: ApiClient,
}

impl SessionService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SessionSource for SessionService {
    async fn list_sessions(
        &self,
        user_id: &UserId,
        limit: u32,
        offset: u32,
    ) -> ClientResult<SessionListResponse> {
        let query = SessionListQuery {
            user_id: user_id.as_str(),
            limit,
            offset,
        };
        self.client.get_with_query("/api/sessions", &query).await
    }

    async fn session_battles(&self, session_id: &str) -> ClientResult<SessionBattlesResponse> {
        let path = format!("/api/sessions/{}/battles", encode_segment(session_id));
        self.client.get(&path).await
    }
}
