//! Battle service: session creation, follow-ups and votes.

use async_trait::async_trait;

use super::BattleBackend;
use crate::api::dto::{
    BattleCreated, FollowUpResponse, PromptRequest, SessionCreated, Vote, VoteRequest,
    VoteResponse,
};
use crate::api::{encode_segment, ApiClient, ClientResult};

/// HTTP implementation of [`BattleBackend`]
#[derive(Debug, Clone)]
pub struct BattleService {
    client: ApiClient,
}

impl BattleService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BattleBackend for BattleService {
    async fn create_session(&self, prompt: &str) -> ClientResult<SessionCreated> {
        let created: SessionCreated = self
            .client
            .post("/api/sessions", &PromptRequest { prompt })
            .await?;

        tracing::info!(
            session_id = %created.session_id,
            battle_id = %created.battle_id,
            "Session created"
        );
        Ok(created)
    }

    async fn create_battle(&self, session_id: &str, prompt: &str) -> ClientResult<BattleCreated> {
        let path = format!("/api/sessions/{}/battles", encode_segment(session_id));
        let created: BattleCreated = self.client.post(&path, &PromptRequest { prompt }).await?;

        tracing::info!(session_id, battle_id = %created.battle_id, "Battle created");
        Ok(created)
    }

    async fn send_follow_up(
        &self,
        battle_id: &str,
        prompt: &str,
    ) -> ClientResult<FollowUpResponse> {
        let path = format!("/api/battles/{}/messages", encode_segment(battle_id));
        let response: FollowUpResponse =
            self.client.post(&path, &PromptRequest { prompt }).await?;

        tracing::debug!(
            battle_id,
            message_count = response.message_count,
            "Follow-up answered"
        );
        Ok(response)
    }

    async fn submit_vote(&self, battle_id: &str, vote: Vote) -> ClientResult<VoteResponse> {
        let path = format!("/api/battles/{}/vote", encode_segment(battle_id));
        let response: VoteResponse = self.client.post(&path, &VoteRequest { vote }).await?;

        tracing::info!(battle_id, vote = %vote, "Vote recorded");
        Ok(response)
    }
}
