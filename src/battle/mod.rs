//! Battle Mode
//!
//! Blind two-model comparison flow: prompt, anonymous replies, optional
//! follow-ups, vote, reveal.
//!
//! ## Architecture
//!
//! - **State**: pure reducer over explicit events
//! - **Controller**: validates actions, talks to the backend, dispatches
//!   the resulting events

mod controller;
mod state;

pub use controller::BattleController;
pub use state::{
    Action, BattleError, BattleState, ConversationMessage, Event, Status, Ticket, Transition,
    Turn,
};
