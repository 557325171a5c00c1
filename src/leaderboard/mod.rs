//! ELO Leaderboard
//!
//! Read-only projection of backend-computed rankings. The client only
//! sorts and filters what it fetched.

mod view;

pub use view::{filter_entries, sort_entries, LeaderboardView};
