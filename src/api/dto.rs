//! Data Transfer Objects
//!
//! Request and response bodies exchanged with the battle backend.
//! Closed vocabularies (position, vote, status, sort options) are tagged
//! enums so malformed payloads fail at decode time instead of leaking
//! through as free-form strings.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================
// SHARED VOCABULARY
// ============================================

/// Anonymized slot of a model within a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
    Right,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Left => "left",
            Position::Right => "right",
        }
    }

    /// Display label used while the model is still anonymous
    pub fn label(&self) -> &'static str {
        match self {
            Position::Left => "Assistant A",
            Position::Right => "Assistant B",
        }
    }
}

/// Verdict a user can cast on a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vote {
    LeftBetter,
    RightBetter,
    Tie,
    BothBad,
}

impl Vote {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vote::LeftBetter => "left_better",
            Vote::RightBetter => "right_better",
            Vote::Tie => "tie",
            Vote::BothBad => "both_bad",
        }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vote {
    type Err = String;

    /// Accepts the wire names plus the short forms typed at the prompt
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left_better" | "left" | "a" => Ok(Vote::LeftBetter),
            "right_better" | "right" | "b" => Ok(Vote::RightBetter),
            "tie" => Ok(Vote::Tie),
            "both_bad" | "bad" => Ok(Vote::BothBad),
            other => Err(format!(
                "Invalid vote: {}. Use: left, right, tie, bad",
                other
            )),
        }
    }
}

/// Lifecycle of a battle as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleStatus {
    Ongoing,
    Voted,
    Abandoned,
}

// ============================================
// BATTLE DTOs
// ============================================

/// Body of every prompt-carrying request
#[derive(Debug, Serialize)]
pub struct PromptRequest<'a> {
    pub prompt: &'a str,
}

/// Body of a vote request
#[derive(Debug, Serialize)]
pub struct VoteRequest {
    pub vote: Vote,
}

/// One anonymized model reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResponse {
    pub position: Position,
    pub text: String,
    pub latency_ms: u64,
}

/// `POST /api/sessions` response
#[derive(Debug, Clone, Deserialize)]
pub struct SessionCreated {
    pub session_id: String,
    pub battle_id: String,
    pub message_id: String,
    pub responses: Vec<ModelResponse>,
}

/// `POST /api/sessions/{id}/battles` response
///
/// Some backend versions omit `session_id` here since the caller already
/// knows it.
#[derive(Debug, Clone, Deserialize)]
pub struct BattleCreated {
    #[serde(default)]
    pub session_id: Option<String>,
    pub battle_id: String,
    pub message_id: String,
    pub responses: Vec<ModelResponse>,
}

/// `POST /api/battles/{id}/messages` response
#[derive(Debug, Clone, Deserialize)]
pub struct FollowUpResponse {
    pub battle_id: String,
    pub message_id: String,
    pub responses: Vec<ModelResponse>,
    /// User turns in the battle so far, including this one
    pub message_count: u32,
    #[serde(default)]
    pub max_messages: Option<u32>,
}

/// Model identities disclosed after a vote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedModels {
    pub left: String,
    pub right: String,
}

impl RevealedModels {
    pub fn get(&self, position: Position) -> &str {
        match position {
            Position::Left => &self.left,
            Position::Right => &self.right,
        }
    }
}

/// `POST /api/battles/{id}/vote` response
#[derive(Debug, Clone, Deserialize)]
pub struct VoteResponse {
    pub battle_id: String,
    pub vote: Vote,
    pub revealed_models: RevealedModels,
}

// ============================================
// SESSION DTOs
// ============================================

/// Entry of the session list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub title: String,
    pub created_at: String,
    pub last_active_at: String,
}

impl SessionSummary {
    pub fn last_active(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.last_active_at)
    }
}

/// `GET /api/sessions` response
#[derive(Debug, Clone, Deserialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionSummary>,
    pub total: u64,
}

/// A turn as stored by the backend inside a battle
///
/// Assistant turns must carry their position; anything else is rejected.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum PersistedTurn {
    User {
        content: String,
    },
    Assistant {
        position: Position,
        content: String,
    },
}

/// Battle as returned by the session detail endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct BattleRecord {
    pub battle_id: String,
    pub left_model_id: String,
    pub right_model_id: String,
    pub conversation: Vec<PersistedTurn>,
    pub status: BattleStatus,
    #[serde(default)]
    pub vote: Option<Vote>,
    pub created_at: String,
}

/// `GET /api/sessions/{id}/battles` response
#[derive(Debug, Clone, Deserialize)]
pub struct SessionBattlesResponse {
    pub session_id: String,
    pub battles: Vec<BattleRecord>,
}

// ============================================
// LEADERBOARD DTOs
// ============================================

/// Field the backend ranks the leaderboard by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    EloScore,
    VoteCount,
    Organization,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::EloScore => "elo_score",
            SortBy::VoteCount => "vote_count",
            SortBy::Organization => "organization",
        }
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "elo_score" | "elo" => Ok(SortBy::EloScore),
            "vote_count" | "votes" => Ok(SortBy::VoteCount),
            "organization" | "org" => Ok(SortBy::Organization),
            other => Err(format!(
                "Invalid sort field: {}. Use: elo_score, vote_count, organization",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("Invalid sort order: {}. Use: asc, desc", other)),
        }
    }
}

/// Query string of `GET /api/leaderboard`
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LeaderboardQuery {
    pub sort_by: SortBy,
    pub order: SortOrder,
}

/// One ranked model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub model_id: String,
    pub model_name: String,
    pub elo_score: f64,
    /// 95% confidence interval half-width
    pub elo_ci: f64,
    pub vote_count: u64,
    pub win_rate: f64,
    pub organization: String,
    pub license: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardMetadata {
    pub total_models: u64,
    pub total_votes: u64,
    pub last_updated: String,
}

impl LeaderboardMetadata {
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.last_updated)
    }
}

/// `GET /api/leaderboard` response
#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub metadata: LeaderboardMetadata,
}

// ============================================
// MODELS / HEALTH DTOs
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelStatus {
    Active,
    Inactive,
}

/// Model available for battles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_id: String,
    pub name: String,
    pub provider: String,
    pub status: ModelStatus,
}

/// `GET /api/models` response
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelInfo>,
}

/// `GET /health` response
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

/// Parse a backend timestamp.
///
/// Accepts RFC 3339 and the naive ISO form some backends emit for UTC
/// columns.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_wire_names() {
        let body = serde_json::to_string(&VoteRequest { vote: Vote::BothBad }).unwrap();
        assert_eq!(body, r#"{"vote":"both_bad"}"#);

        let vote: Vote = serde_json::from_str(r#""left_better""#).unwrap();
        assert_eq!(vote, Vote::LeftBetter);
    }

    #[test]
    fn test_vote_short_forms() {
        assert_eq!("left".parse::<Vote>().unwrap(), Vote::LeftBetter);
        assert_eq!("B".parse::<Vote>().unwrap(), Vote::RightBetter);
        assert_eq!("bad".parse::<Vote>().unwrap(), Vote::BothBad);
        assert!("maybe".parse::<Vote>().is_err());
    }

    #[test]
    fn test_unknown_position_rejected() {
        let json = r#"{"position": "center", "text": "hi", "latency_ms": 10}"#;
        assert!(serde_json::from_str::<ModelResponse>(json).is_err());
    }

    #[test]
    fn test_persisted_turns() {
        let json = r#"[
            {"role": "user", "content": "Hi", "timestamp": "2025-01-01T00:00:00Z"},
            {"role": "assistant", "position": "left", "content": "A", "model_id": "gpt-x", "latency_ms": 12}
        ]"#;
        let turns: Vec<PersistedTurn> = serde_json::from_str(json).unwrap();
        assert_eq!(
            turns,
            vec![
                PersistedTurn::User { content: "Hi".to_string() },
                PersistedTurn::Assistant {
                    position: Position::Left,
                    content: "A".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_assistant_turn_without_position_rejected() {
        let json = r#"{"role": "assistant", "content": "A"}"#;
        assert!(serde_json::from_str::<PersistedTurn>(json).is_err());

        let json = r#"{"role": "system", "content": "A"}"#;
        assert!(serde_json::from_str::<PersistedTurn>(json).is_err());
    }

    #[test]
    fn test_follow_up_without_max_messages() {
        let json = r#"{"battle_id": "b1", "message_id": "msg_2", "responses": [], "message_count": 2}"#;
        let resp: FollowUpResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.message_count, 2);
        assert_eq!(resp.max_messages, None);
    }

    #[test]
    fn test_leaderboard_query_string_values() {
        let query = LeaderboardQuery {
            sort_by: SortBy::VoteCount,
            order: SortOrder::Asc,
        };
        let value = serde_json::to_value(query).unwrap();
        assert_eq!(value["sort_by"], "vote_count");
        assert_eq!(value["order"], "asc");
    }

    #[test]
    fn test_leaderboard_accepts_integer_elo() {
        let json = r#"{
            "rank": 1, "model_id": "m", "model_name": "M", "elo_score": 1532,
            "elo_ci": 12.5, "vote_count": 40, "win_rate": 0.61,
            "organization": "Org", "license": "MIT"
        }"#;
        let entry: LeaderboardEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.elo_score, 1532.0);
    }

    #[test]
    fn test_parse_timestamp_forms() {
        assert!(parse_timestamp("2025-03-01T10:00:00+00:00").is_some());
        assert!(parse_timestamp("2025-03-01T10:00:00.123456").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
