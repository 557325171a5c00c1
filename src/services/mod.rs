//! Domain Services
//!
//! Typed wrappers that turn user intents into backend calls:
//! - Battles (start session, new battle, follow-up, vote)
//! - Sessions (history list, session detail)
//! - Leaderboard (ranked table)
//! - Models and health
//!
//! The view-state types depend on the traits below rather than on the
//! HTTP services directly, so they can be driven by in-memory fakes.

mod battle;
mod health;
mod leaderboard;
mod models;
mod session;

pub use battle::BattleService;
pub use health::{HealthReport, HealthService};
pub use leaderboard::LeaderboardService;
pub use models::ModelService;
pub use session::{SessionService, DEFAULT_PAGE_SIZE};

use async_trait::async_trait;

use crate::api::dto::{
    BattleCreated, FollowUpResponse, LeaderboardResponse, SessionBattlesResponse,
    SessionCreated, SessionListResponse, SortBy, SortOrder, Vote, VoteResponse,
};
use crate::api::ClientResult;
use crate::identity::UserId;

/// Backend operations behind the battle state machine
#[async_trait]
pub trait BattleBackend: Send + Sync {
    /// Start a session with its first battle
    async fn create_session(&self, prompt: &str) -> ClientResult<SessionCreated>;

    /// Start another battle in an existing session
    async fn create_battle(&self, session_id: &str, prompt: &str) -> ClientResult<BattleCreated>;

    /// Continue the conversation of a battle
    async fn send_follow_up(&self, battle_id: &str, prompt: &str)
        -> ClientResult<FollowUpResponse>;

    /// Vote on a battle, revealing its models
    async fn submit_vote(&self, battle_id: &str, vote: Vote) -> ClientResult<VoteResponse>;
}

/// Source of persisted sessions
#[async_trait]
pub trait SessionSource: Send + Sync {
    async fn list_sessions(
        &self,
        user_id: &UserId,
        limit: u32,
        offset: u32,
    ) -> ClientResult<SessionListResponse>;

    async fn session_battles(&self, session_id: &str) -> ClientResult<SessionBattlesResponse>;
}

/// Source of the ranked leaderboard
#[async_trait]
pub trait LeaderboardSource: Send + Sync {
    async fn get_leaderboard(
        &self,
        sort_by: SortBy,
        order: SortOrder,
    ) -> ClientResult<LeaderboardResponse>;
}
