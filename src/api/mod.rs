//! Battle Backend API
//!
//! HTTP client layer for the battle backend.
//!
//! # Endpoints consumed
//!
//! ## Battles
//! - `POST /api/sessions` - Start a session with its first battle
//! - `POST /api/sessions/:id/battles` - New battle in an existing session
//! - `POST /api/battles/:id/messages` - Follow-up prompt
//! - `POST /api/battles/:id/vote` - Vote and reveal models
//!
//! ## Sessions
//! - `GET /api/sessions?user_id&limit&offset` - Session list
//! - `GET /api/sessions/:id/battles` - Battles of a session
//!
//! ## Leaderboard
//! - `GET /api/leaderboard?sort_by&order` - ELO ranking
//!
//! ## Misc
//! - `GET /api/models` - Models available for battles
//! - `GET /health` - Backend health
//!
//! # Example
//!
//! ```rust,no_run
//! use battler::api::ApiClient;
//! use battler::config::ApiConfig;
//! use battler::services::{LeaderboardService, LeaderboardSource};
//! use battler::api::dto::{SortBy, SortOrder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(&ApiConfig::default())?;
//!     let leaderboard = LeaderboardService::new(client)
//!         .get_leaderboard(SortBy::EloScore, SortOrder::Desc)
//!         .await?;
//!
//!     println!("{} models ranked", leaderboard.metadata.total_models);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod dto;
pub mod error;

pub use client::{encode_segment, ApiClient};
pub use error::{extract_message, ClientError, ClientResult};
