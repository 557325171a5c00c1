//! Battle Controller
//!
//! Drives [`BattleState`] from user actions: validates locally, stamps a
//! ticket, calls the backend and feeds the outcome back as an event.
//! State sits behind an `RwLock` so a front end can snapshot it while a
//! request is still in flight.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::state::{Action, BattleState, Event, Ticket, Transition};
use crate::api::dto::{BattleRecord, Vote};
use crate::api::ClientError;
use crate::services::{BattleBackend, SessionSource};

/// Owns the battle view state for one front end
pub struct BattleController<B> {
    backend: Arc<B>,
    state: Arc<RwLock<BattleState>>,
    tickets: AtomicU64,
}

impl<B: BattleBackend> BattleController<B> {
    pub fn new(backend: B) -> Self {
        Self::with_backend(Arc::new(backend))
    }

    pub fn with_backend(backend: Arc<B>) -> Self {
        Self {
            backend,
            state: Arc::new(RwLock::new(BattleState::new())),
            tickets: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> BattleState {
        self.state.read().await.clone()
    }

    /// Shared handle for readers that outlive a single call
    pub fn state_handle(&self) -> Arc<RwLock<BattleState>> {
        Arc::clone(&self.state)
    }

    pub async fn start_session(&self, prompt: impl Into<String>) -> Transition {
        self.dispatch(Action::StartSession {
            prompt: prompt.into(),
        })
        .await
    }

    pub async fn start_new_battle(&self, prompt: impl Into<String>) -> Transition {
        self.dispatch(Action::StartNewBattle {
            prompt: prompt.into(),
        })
        .await
    }

    pub async fn send_follow_up(&self, prompt: impl Into<String>) -> Transition {
        self.dispatch(Action::SendFollowUp {
            prompt: prompt.into(),
        })
        .await
    }

    pub async fn submit_vote(&self, vote: Vote) -> Transition {
        self.dispatch(Action::SubmitVote { vote }).await
    }

    /// Start, continue or open the next battle depending on where the
    /// session stands
    pub async fn submit_prompt(&self, prompt: impl Into<String>) -> Transition {
        let action = self.state.read().await.route_prompt(prompt);
        self.dispatch(action).await
    }

    /// Run one action through validation, the backend and the reducer
    pub async fn dispatch(&self, action: Action) -> Transition {
        let (ticket, session_id, battle_id) = {
            let mut state = self.state.write().await;

            if let Err(error) = state.check(&action) {
                tracing::warn!(action = action.name(), error = %error, "Action rejected");
                return state.apply(Event::Rejected { error });
            }

            let ticket = self.next_ticket();
            state.apply(Event::Started { ticket });
            (ticket, state.session_id.clone(), state.battle_id.clone())
        };

        tracing::debug!(action = action.name(), ticket, "Dispatching action");

        // Preconditions above guarantee the ids each arm needs
        let session_id = session_id.unwrap_or_default();
        let battle_id = battle_id.unwrap_or_default();

        let event = match action {
            Action::StartSession { prompt } => match self.backend.create_session(&prompt).await {
                Ok(response) => Event::SessionStarted {
                    ticket,
                    prompt,
                    response,
                },
                Err(e) => failed(ticket, "start_session", e),
            },
            Action::StartNewBattle { prompt } => {
                match self.backend.create_battle(&session_id, &prompt).await {
                    Ok(response) => Event::BattleStarted {
                        ticket,
                        prompt,
                        response,
                    },
                    Err(e) => failed(ticket, "start_new_battle", e),
                }
            }
            Action::SendFollowUp { prompt } => {
                match self.backend.send_follow_up(&battle_id, &prompt).await {
                    Ok(response) => Event::FollowUpReceived {
                        ticket,
                        prompt,
                        response,
                    },
                    Err(e) => failed(ticket, "send_follow_up", e),
                }
            }
            Action::SubmitVote { vote } => match self.backend.submit_vote(&battle_id, vote).await {
                Ok(response) => Event::VoteRecorded { ticket, response },
                Err(e) => failed(ticket, "submit_vote", e),
            },
        };

        self.complete(ticket, event).await
    }

    /// Rehydrate from persisted battles of a session
    pub async fn load_session(
        &self,
        session_id: impl Into<String>,
        battles: Vec<BattleRecord>,
    ) -> Transition {
        let ticket = self.next_ticket();
        let mut state = self.state.write().await;
        state.apply(Event::Started { ticket });
        state.apply(Event::SessionLoaded {
            ticket,
            session_id: session_id.into(),
            battles,
        })
    }

    /// Fetch a session's battles and rehydrate from them
    pub async fn resume_session<S: SessionSource + ?Sized>(
        &self,
        sessions: &S,
        session_id: &str,
    ) -> Transition {
        let ticket = self.next_ticket();
        self.state.write().await.apply(Event::Started { ticket });

        let event = match sessions.session_battles(session_id).await {
            Ok(response) => Event::SessionLoaded {
                ticket,
                session_id: response.session_id,
                battles: response.battles,
            },
            Err(e) => {
                tracing::error!(session_id, error = %e, "Failed to fetch session battles");
                Event::Failed {
                    ticket,
                    message: format!("Failed to load session: {}", e),
                }
            }
        };

        self.complete(ticket, event).await
    }

    /// Back to the initial state; in-flight completions are discarded
    pub async fn reset(&self) {
        self.state.write().await.apply(Event::Reset);
    }

    async fn complete(&self, ticket: Ticket, event: Event) -> Transition {
        let mut state = self.state.write().await;
        let transition = state.apply(event);

        if transition == Transition::Stale {
            tracing::debug!(ticket, "Dropped completion of superseded request");
        } else {
            tracing::debug!(
                ticket,
                status = ?state.status,
                battle_id = state.battle_id.as_deref().unwrap_or("-"),
                "Battle state updated"
            );
        }
        transition
    }

    fn next_ticket(&self) -> Ticket {
        self.tickets.fetch_add(1, Ordering::SeqCst) + 1
    }
}

fn failed(ticket: Ticket, action: &'static str, error: ClientError) -> Event {
    tracing::error!(action, error = %error, "Backend call failed");
    Event::Failed {
        ticket,
        message: error.to_string(),
    }
}
