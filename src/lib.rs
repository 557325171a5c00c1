//! # Battler
//!
//! Client for an anonymous model-battle arena: send one prompt to two
//! hidden models, compare the replies side by side, vote, and see which
//! models you were judging. Votes feed a backend-computed ELO leaderboard.
//!
//! ## Modules
//!
//! - [`api`]: HTTP client, wire types and error mapping
//! - [`services`]: typed backend operations behind small traits
//! - [`battle`]: battle state machine and its controller
//! - [`leaderboard`]: sortable, searchable leaderboard view
//! - [`history`]: past sessions of the anonymous user
//! - [`identity`]: persistent anonymous user id
//! - [`render`]: plain-text views for the terminal
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use battler::{ApiClient, BattleController, BattleService, Config, Vote};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let client = ApiClient::new(&config.api)?;
//!     let controller = BattleController::new(BattleService::new(client));
//!
//!     controller.submit_prompt("Explain recursion").await;
//!     controller.submit_vote(Vote::Tie).await;
//!
//!     let state = controller.state().await;
//!     println!("{}", battler::render::transcript(&state));
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod battle;
pub mod config;
pub mod history;
pub mod identity;
pub mod leaderboard;
pub mod render;
pub mod services;

pub use api::dto::{Position, SortBy, SortOrder, Vote};
pub use api::{ApiClient, ClientError, ClientResult};

pub use battle::{
    Action, BattleController, BattleError, BattleState, ConversationMessage, Status, Transition,
};

pub use config::{Config, ConfigError, LoggingConfig};

pub use history::SessionHistory;

pub use identity::{IdentityError, IdentityStore, UserId};

pub use leaderboard::LeaderboardView;

pub use services::{
    BattleBackend, BattleService, HealthService, LeaderboardService, LeaderboardSource,
    ModelService, SessionService, SessionSource,
};
