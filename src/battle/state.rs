//! Battle session state machine
//!
//! Pure reducer over [`Event`]s. States are `NoSession`, `Ongoing`,
//! `Voted` and `Closed`:
//!
//! ```text
//! NoSession --SessionStarted--> Ongoing
//! Ongoing   --FollowUpReceived--> Ongoing   (transcript grows)
//! Ongoing   --VoteRecorded--> Voted         (one-way)
//! Voted     --BattleStarted--> Ongoing      (same session, fresh transcript)
//! Closed    --BattleStarted--> Ongoing
//! ```
//!
//! `Closed` only comes from loading a session whose last battle was
//! abandoned on the backend.
//!
//! Errors are a flag on the state, never a machine state, and never move
//! `status`. Only one action may be in flight at a time; a second one is
//! rejected locally. Every round trip is still stamped with a [`Ticket`]
//! so that a completion outlived by `Reset` or a session load is dropped.

use serde::Serialize;
use thiserror::Error;

use crate::api::dto::{
    BattleCreated, BattleRecord, BattleStatus, FollowUpResponse, ModelResponse, PersistedTurn,
    Position, RevealedModels, SessionCreated, Vote, VoteResponse,
};

/// Sequence number of an issued request
pub type Ticket = u64;

/// Machine state of the battle view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    NoSession,
    Ongoing,
    Voted,
    /// Abandoned battle: no follow-ups, no vote, no reveal
    Closed,
}

/// One entry of the transcript, in chat order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ConversationMessage {
    User { text: String },
    Assistant { position: Position, text: String },
}

impl ConversationMessage {
    pub fn user(text: impl Into<String>) -> Self {
        ConversationMessage::User { text: text.into() }
    }

    pub fn assistant(position: Position, text: impl Into<String>) -> Self {
        ConversationMessage::Assistant {
            position,
            text: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            ConversationMessage::User { text } | ConversationMessage::Assistant { text, .. } => {
                text
            }
        }
    }

    /// Position of an assistant reply, `None` for user turns
    pub fn position(&self) -> Option<Position> {
        match self {
            ConversationMessage::User { .. } => None,
            ConversationMessage::Assistant { position, .. } => Some(*position),
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, ConversationMessage::User { .. })
    }
}

impl From<&ModelResponse> for ConversationMessage {
    fn from(response: &ModelResponse) -> Self {
        ConversationMessage::assistant(response.position, response.text.clone())
    }
}

impl From<PersistedTurn> for ConversationMessage {
    fn from(turn: PersistedTurn) -> Self {
        match turn {
            PersistedTurn::User { content } => ConversationMessage::user(content),
            PersistedTurn::Assistant { position, content } => {
                ConversationMessage::assistant(position, content)
            }
        }
    }
}

/// A user prompt with the replies it produced, for side-by-side display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn<'a> {
    pub prompt: &'a str,
    pub left: Option<&'a str>,
    pub right: Option<&'a str>,
}

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    StartSession { prompt: String },
    StartNewBattle { prompt: String },
    SendFollowUp { prompt: String },
    SubmitVote { vote: Vote },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::StartSession { .. } => "start_session",
            Action::StartNewBattle { .. } => "start_new_battle",
            Action::SendFollowUp { .. } => "send_follow_up",
            Action::SubmitVote { .. } => "submit_vote",
        }
    }
}

/// Actions refused before any request is made
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    #[error("Prompt cannot be empty")]
    EmptyPrompt,

    #[error("No active session")]
    NoSession,

    #[error("No active battle")]
    NoBattle,

    #[error("Battle already voted")]
    AlreadyVoted,

    #[error("Message limit reached ({0} messages)")]
    MessageLimit(u32),

    #[error("Battle is no longer active")]
    BattleClosed,

    #[error("Request already in progress")]
    RequestInFlight,

    #[error("Session has no battles")]
    EmptySession,
}

/// Inputs to the reducer
#[derive(Debug, Clone)]
pub enum Event {
    /// A request was issued
    Started { ticket: Ticket },
    /// An action failed validation; nothing was sent
    Rejected { error: BattleError },
    /// A request failed
    Failed { ticket: Ticket, message: String },
    SessionStarted {
        ticket: Ticket,
        prompt: String,
        response: SessionCreated,
    },
    BattleStarted {
        ticket: Ticket,
        prompt: String,
        response: BattleCreated,
    },
    FollowUpReceived {
        ticket: Ticket,
        prompt: String,
        response: FollowUpResponse,
    },
    VoteRecorded { ticket: Ticket, response: VoteResponse },
    SessionLoaded {
        ticket: Ticket,
        session_id: String,
        battles: Vec<BattleRecord>,
    },
    Reset,
}

impl Event {
    fn ticket(&self) -> Option<Ticket> {
        match self {
            Event::Failed { ticket, .. }
            | Event::SessionStarted { ticket, .. }
            | Event::BattleStarted { ticket, .. }
            | Event::FollowUpReceived { ticket, .. }
            | Event::VoteRecorded { ticket, .. }
            | Event::SessionLoaded { ticket, .. } => Some(*ticket),
            Event::Started { .. } | Event::Rejected { .. } | Event::Reset => None,
        }
    }
}

/// Result of feeding an event to the reducer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    /// Completion of a superseded request, dropped
    Stale,
}

/// Client-local view of the current battle
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BattleState {
    pub session_id: Option<String>,
    pub battle_id: Option<String>,
    pub status: Status,
    pub conversation: Vec<ConversationMessage>,
    /// `None` until the current battle has been voted on
    pub revealed_models: Option<RevealedModels>,
    /// User turns in the current battle
    pub message_count: u32,
    pub max_messages: Option<u32>,
    pub is_loading: bool,
    pub error: Option<String>,
    #[serde(skip)]
    latest_ticket: Ticket,
}

impl BattleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check an action against the current state
    pub fn check(&self, action: &Action) -> Result<(), BattleError> {
        if self.is_loading {
            return Err(BattleError::RequestInFlight);
        }

        match action {
            Action::StartSession { prompt } => require_prompt(prompt),
            Action::StartNewBattle { prompt } => {
                if self.session_id.is_none() {
                    return Err(BattleError::NoSession);
                }
                require_prompt(prompt)
            }
            Action::SendFollowUp { prompt } => {
                if self.battle_id.is_none() {
                    return Err(BattleError::NoBattle);
                }
                match self.status {
                    Status::Voted => return Err(BattleError::AlreadyVoted),
                    Status::Closed => return Err(BattleError::BattleClosed),
                    Status::NoSession | Status::Ongoing => {}
                }
                if let Some(max) = self.max_messages {
                    if self.message_count >= max {
                        return Err(BattleError::MessageLimit(max));
                    }
                }
                require_prompt(prompt)
            }
            Action::SubmitVote { .. } => {
                if self.battle_id.is_none() {
                    return Err(BattleError::NoBattle);
                }
                match self.status {
                    Status::Voted => Err(BattleError::AlreadyVoted),
                    Status::Closed => Err(BattleError::BattleClosed),
                    Status::NoSession | Status::Ongoing => Ok(()),
                }
            }
        }
    }

    /// Route free text the way the prompt box does: start, continue, or
    /// open the next battle after a vote.
    pub fn route_prompt(&self, prompt: impl Into<String>) -> Action {
        let prompt = prompt.into();
        match self.status {
            _ if self.session_id.is_none() => Action::StartSession { prompt },
            Status::Voted | Status::Closed => Action::StartNewBattle { prompt },
            Status::NoSession | Status::Ongoing => Action::SendFollowUp { prompt },
        }
    }

    /// Feed one event through the machine
    pub fn apply(&mut self, event: Event) -> Transition {
        if let Some(ticket) = event.ticket() {
            if ticket != self.latest_ticket {
                return Transition::Stale;
            }
        }

        match event {
            Event::Started { ticket } => {
                self.latest_ticket = self.latest_ticket.max(ticket);
                self.is_loading = true;
                self.error = None;
            }
            Event::Rejected { error } => {
                self.error = Some(error.to_string());
            }
            Event::Failed { message, .. } => {
                self.is_loading = false;
                self.error = Some(message);
            }
            Event::SessionStarted {
                prompt, response, ..
            } => {
                let latest_ticket = self.latest_ticket;
                *self = BattleState {
                    session_id: Some(response.session_id),
                    battle_id: Some(response.battle_id),
                    status: Status::Ongoing,
                    conversation: opening_transcript(prompt, &response.responses),
                    message_count: 1,
                    latest_ticket,
                    ..BattleState::default()
                };
            }
            Event::BattleStarted {
                prompt, response, ..
            } => {
                if self.session_id.is_none() {
                    self.session_id = response.session_id;
                }
                self.battle_id = Some(response.battle_id);
                self.status = Status::Ongoing;
                self.conversation = opening_transcript(prompt, &response.responses);
                self.revealed_models = None;
                self.message_count = 1;
                self.max_messages = None;
                self.finish();
            }
            Event::FollowUpReceived {
                prompt, response, ..
            } => {
                self.conversation.push(ConversationMessage::user(prompt));
                self.conversation
                    .extend(response.responses.iter().map(ConversationMessage::from));
                self.message_count = response.message_count;
                self.max_messages = response.max_messages.or(self.max_messages);
                self.finish();
            }
            Event::VoteRecorded { response, .. } => {
                self.status = Status::Voted;
                self.revealed_models = Some(response.revealed_models);
                self.finish();
            }
            Event::SessionLoaded {
                session_id,
                battles,
                ..
            } => self.load(session_id, battles),
            Event::Reset => *self = BattleState::default(),
        }

        Transition::Applied
    }

    fn load(&mut self, session_id: String, battles: Vec<BattleRecord>) {
        let latest = match battles.last() {
            Some(battle) => battle,
            None => {
                self.is_loading = false;
                self.error = Some(BattleError::EmptySession.to_string());
                return;
            }
        };

        let status = match latest.status {
            BattleStatus::Voted => Status::Voted,
            BattleStatus::Ongoing => Status::Ongoing,
            BattleStatus::Abandoned => Status::Closed,
        };
        let revealed_models = (status == Status::Voted).then(|| RevealedModels {
            left: latest.left_model_id.clone(),
            right: latest.right_model_id.clone(),
        });
        let battle_id = latest.battle_id.clone();
        let message_count = latest
            .conversation
            .iter()
            .filter(|turn| matches!(turn, PersistedTurn::User { .. }))
            .count() as u32;

        let conversation = battles
            .into_iter()
            .flat_map(|battle| battle.conversation)
            .map(ConversationMessage::from)
            .collect();

        let latest_ticket = self.latest_ticket;
        *self = BattleState {
            session_id: Some(session_id),
            battle_id: Some(battle_id),
            status,
            conversation,
            revealed_models,
            message_count,
            latest_ticket,
            ..BattleState::default()
        };
    }

    fn finish(&mut self) {
        self.is_loading = false;
        self.error = None;
    }

    /// Group the transcript into prompt/reply rows.
    ///
    /// Replies are paired with the nearest preceding user turn.
    pub fn turns(&self) -> Vec<Turn<'_>> {
        let mut turns: Vec<Turn<'_>> = Vec::new();
        for message in &self.conversation {
            match message {
                ConversationMessage::User { text } => turns.push(Turn {
                    prompt: text,
                    left: None,
                    right: None,
                }),
                ConversationMessage::Assistant { position, text } => {
                    if let Some(turn) = turns.last_mut() {
                        match position {
                            Position::Left => turn.left = Some(text),
                            Position::Right => turn.right = Some(text),
                        }
                    }
                }
            }
        }
        turns
    }

    /// Model name for a slot, only once revealed
    pub fn revealed(&self, position: Position) -> Option<&str> {
        self.revealed_models.as_ref().map(|models| models.get(position))
    }
}

fn require_prompt(prompt: &str) -> Result<(), BattleError> {
    if prompt.trim().is_empty() {
        Err(BattleError::EmptyPrompt)
    } else {
        Ok(())
    }
}

fn opening_transcript(prompt: String, responses: &[ModelResponse]) -> Vec<ConversationMessage> {
    std::iter::once(ConversationMessage::user(prompt))
        .chain(responses.iter().map(ConversationMessage::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(position: Position, text: &str) -> ModelResponse {
        ModelResponse {
            position,
            text: text.to_string(),
            latency_ms: 100,
        }
    }

    fn session_created() -> SessionCreated {
        SessionCreated {
            session_id: "s1".to_string(),
            battle_id: "b1".to_string(),
            message_id: "m1".to_string(),
            responses: vec![
                ModelResponse {
                    position: Position::Left,
                    text: "A".to_string(),
                    latency_ms: 120,
                },
                ModelResponse {
                    position: Position::Right,
                    text: "B".to_string(),
                    latency_ms: 140,
                },
            ],
        }
    }

    fn started(state: &mut BattleState, ticket: Ticket) {
        assert_eq!(state.apply(Event::Started { ticket }), Transition::Applied);
        assert!(state.is_loading);
    }

    fn ongoing() -> BattleState {
        let mut state = BattleState::new();
        started(&mut state, 1);
        state.apply(Event::SessionStarted {
            ticket: 1,
            prompt: "Explain recursion".to_string(),
            response: session_created(),
        });
        state
    }

    fn voted() -> BattleState {
        let mut state = ongoing();
        started(&mut state, 2);
        state.apply(Event::VoteRecorded {
            ticket: 2,
            response: VoteResponse {
                battle_id: "b1".to_string(),
                vote: Vote::Tie,
                revealed_models: RevealedModels {
                    left: "model-x".to_string(),
                    right: "model-y".to_string(),
                },
            },
        });
        state
    }

    fn record(id: &str, status: BattleStatus, turns: Vec<PersistedTurn>) -> BattleRecord {
        BattleRecord {
            battle_id: id.to_string(),
            left_model_id: format!("{}-left", id),
            right_model_id: format!("{}-right", id),
            conversation: turns,
            status,
            vote: None,
            created_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    fn user_turn(text: &str) -> PersistedTurn {
        PersistedTurn::User {
            content: text.to_string(),
        }
    }

    fn assistant_turn(position: Position, text: &str) -> PersistedTurn {
        PersistedTurn::Assistant {
            position,
            content: text.to_string(),
        }
    }

    #[test]
    fn test_session_started_seeds_transcript() {
        let state = ongoing();

        assert_eq!(state.status, Status::Ongoing);
        assert_eq!(state.session_id.as_deref(), Some("s1"));
        assert_eq!(state.battle_id.as_deref(), Some("b1"));
        assert_eq!(
            state.conversation,
            vec![
                ConversationMessage::user("Explain recursion"),
                ConversationMessage::assistant(Position::Left, "A"),
                ConversationMessage::assistant(Position::Right, "B"),
            ]
        );
        assert!(state.revealed_models.is_none());
        assert!(!state.is_loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_follow_up_appends() {
        let mut state = ongoing();
        let before = state.conversation.clone();

        started(&mut state, 2);
        state.apply(Event::FollowUpReceived {
            ticket: 2,
            prompt: "Shorter please".to_string(),
            response: FollowUpResponse {
                battle_id: "b1".to_string(),
                message_id: "msg_2".to_string(),
                responses: vec![reply(Position::Left, "A2"), reply(Position::Right, "B2")],
                message_count: 2,
                max_messages: Some(6),
            },
        });

        assert_eq!(state.conversation.len(), before.len() + 3);
        assert_eq!(&state.conversation[..before.len()], &before[..]);
        assert_eq!(state.conversation[3], ConversationMessage::user("Shorter please"));
        assert_eq!(state.message_count, 2);
        assert_eq!(state.max_messages, Some(6));
        assert_eq!(state.status, Status::Ongoing);
    }

    #[test]
    fn test_vote_reveals_models() {
        let state = voted();
        assert_eq!(state.status, Status::Voted);
        assert_eq!(state.revealed(Position::Left), Some("model-x"));
        assert_eq!(state.revealed(Position::Right), Some("model-y"));
    }

    #[test]
    fn test_new_battle_resets_transcript_and_reveal() {
        let mut state = voted();

        started(&mut state, 3);
        state.apply(Event::BattleStarted {
            ticket: 3,
            prompt: "Next".to_string(),
            response: BattleCreated {
                session_id: None,
                battle_id: "b2".to_string(),
                message_id: "m1".to_string(),
                responses: vec![reply(Position::Left, "L"), reply(Position::Right, "R")],
            },
        });

        assert_eq!(state.session_id.as_deref(), Some("s1"));
        assert_eq!(state.battle_id.as_deref(), Some("b2"));
        assert_eq!(state.status, Status::Ongoing);
        assert_eq!(state.conversation.len(), 3);
        assert!(state.revealed_models.is_none());
        assert_eq!(state.message_count, 1);
    }

    #[test]
    fn test_failure_keeps_status() {
        let mut state = ongoing();
        let conversation = state.conversation.clone();

        started(&mut state, 2);
        state.apply(Event::Failed {
            ticket: 2,
            message: "Battle not found: b1".to_string(),
        });

        assert_eq!(state.status, Status::Ongoing);
        assert_eq!(state.conversation, conversation);
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("Battle not found: b1"));
    }

    #[test]
    fn test_stale_completion_dropped() {
        let mut state = ongoing();

        started(&mut state, 2);
        started(&mut state, 3);

        let stale = state.apply(Event::Failed {
            ticket: 2,
            message: "late".to_string(),
        });
        assert_eq!(stale, Transition::Stale);
        assert!(state.error.is_none());
        assert!(state.is_loading);

        let fresh = state.apply(Event::Failed {
            ticket: 3,
            message: "current".to_string(),
        });
        assert_eq!(fresh, Transition::Applied);
        assert_eq!(state.error.as_deref(), Some("current"));
    }

    #[test]
    fn test_started_clears_previous_error() {
        let mut state = BattleState::new();
        state.apply(Event::Rejected {
            error: BattleError::NoSession,
        });
        assert_eq!(state.error.as_deref(), Some("No active session"));

        started(&mut state, 1);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_check_preconditions() {
        let empty = BattleState::new();
        let prompt = |p: &str| p.to_string();

        assert_eq!(
            empty.check(&Action::StartSession { prompt: prompt("   ") }),
            Err(BattleError::EmptyPrompt)
        );
        assert_eq!(
            empty.check(&Action::StartNewBattle { prompt: prompt("x") }),
            Err(BattleError::NoSession)
        );
        assert_eq!(
            empty.check(&Action::SendFollowUp { prompt: prompt("x") }),
            Err(BattleError::NoBattle)
        );
        assert_eq!(
            empty.check(&Action::SubmitVote { vote: Vote::Tie }),
            Err(BattleError::NoBattle)
        );

        let voted = voted();
        assert_eq!(
            voted.check(&Action::SubmitVote { vote: Vote::LeftBetter }),
            Err(BattleError::AlreadyVoted)
        );
        assert_eq!(
            voted.check(&Action::SendFollowUp { prompt: prompt("x") }),
            Err(BattleError::AlreadyVoted)
        );
        assert_eq!(voted.check(&Action::StartNewBattle { prompt: prompt("x") }), Ok(()));
    }

    #[test]
    fn test_message_limit() {
        let mut state = ongoing();
        state.message_count = 6;
        state.max_messages = Some(6);

        assert_eq!(
            state.check(&Action::SendFollowUp {
                prompt: "one more".to_string()
            }),
            Err(BattleError::MessageLimit(6))
        );
        assert_eq!(state.check(&Action::SubmitVote { vote: Vote::Tie }), Ok(()));
    }

    #[test]
    fn test_check_refuses_while_loading() {
        let mut state = ongoing();
        started(&mut state, 4);

        assert_eq!(
            state.check(&Action::SubmitVote { vote: Vote::Tie }),
            Err(BattleError::RequestInFlight)
        );
        assert_eq!(
            state.check(&Action::SendFollowUp {
                prompt: "more".to_string()
            }),
            Err(BattleError::RequestInFlight)
        );
        assert_eq!(
            state.check(&Action::StartNewBattle {
                prompt: "next".to_string()
            }),
            Err(BattleError::RequestInFlight)
        );
    }

    #[test]
    fn test_session_loaded_abandoned_is_closed() {
        let mut state = BattleState::new();
        started(&mut state, 1);
        state.apply(Event::SessionLoaded {
            ticket: 1,
            session_id: "s1".to_string(),
            battles: vec![record(
                "b1",
                BattleStatus::Abandoned,
                vec![user_turn("q"), assistant_turn(Position::Left, "L")],
            )],
        });

        assert_eq!(state.status, Status::Closed);
        assert!(state.revealed_models.is_none());
        assert_eq!(
            state.check(&Action::SendFollowUp {
                prompt: "more".to_string()
            }),
            Err(BattleError::BattleClosed)
        );
        assert_eq!(
            state.check(&Action::SubmitVote { vote: Vote::Tie }),
            Err(BattleError::BattleClosed)
        );
        assert!(matches!(
            state.route_prompt("next"),
            Action::StartNewBattle { .. }
        ));
        assert_eq!(
            state.check(&Action::StartNewBattle {
                prompt: "next".to_string()
            }),
            Ok(())
        );
    }

    #[test]
    fn test_route_prompt() {
        assert!(matches!(
            BattleState::new().route_prompt("hi"),
            Action::StartSession { .. }
        ));
        assert!(matches!(ongoing().route_prompt("hi"), Action::SendFollowUp { .. }));
        assert!(matches!(voted().route_prompt("hi"), Action::StartNewBattle { .. }));
    }

    #[test]
    fn test_session_loaded_flattens_in_order() {
        let mut state = BattleState::new();
        started(&mut state, 1);
        state.apply(Event::SessionLoaded {
            ticket: 1,
            session_id: "s1".to_string(),
            battles: vec![
                record(
                    "b1",
                    BattleStatus::Voted,
                    vec![
                        user_turn("first"),
                        assistant_turn(Position::Left, "1L"),
                        assistant_turn(Position::Right, "1R"),
                    ],
                ),
                record(
                    "b2",
                    BattleStatus::Ongoing,
                    vec![
                        user_turn("second"),
                        assistant_turn(Position::Left, "2L"),
                        assistant_turn(Position::Right, "2R"),
                        user_turn("third"),
                        assistant_turn(Position::Left, "3L"),
                        assistant_turn(Position::Right, "3R"),
                    ],
                ),
            ],
        });

        assert_eq!(state.battle_id.as_deref(), Some("b2"));
        assert_eq!(state.status, Status::Ongoing);
        assert!(state.revealed_models.is_none());
        assert_eq!(state.message_count, 2);

        let texts: Vec<&str> = state.conversation.iter().map(|m| m.text()).collect();
        assert_eq!(
            texts,
            vec!["first", "1L", "1R", "second", "2L", "2R", "third", "3L", "3R"]
        );
        assert!(!state.is_loading);
    }

    #[test]
    fn test_session_loaded_voted_reveals_latest() {
        let mut state = BattleState::new();
        started(&mut state, 1);
        state.apply(Event::SessionLoaded {
            ticket: 1,
            session_id: "s1".to_string(),
            battles: vec![record("b1", BattleStatus::Voted, vec![user_turn("q")])],
        });

        assert_eq!(state.status, Status::Voted);
        assert_eq!(state.revealed(Position::Left), Some("b1-left"));
    }

    #[test]
    fn test_session_loaded_empty() {
        let mut state = ongoing();
        started(&mut state, 2);
        state.apply(Event::SessionLoaded {
            ticket: 2,
            session_id: "s9".to_string(),
            battles: vec![],
        });

        assert_eq!(state.session_id.as_deref(), Some("s1"));
        assert_eq!(state.error.as_deref(), Some("Session has no battles"));
        assert!(!state.is_loading);
    }

    #[test]
    fn test_turns_pairing() {
        let state = ongoing();
        let turns = state.turns();
        assert_eq!(
            turns,
            vec![Turn {
                prompt: "Explain recursion",
                left: Some("A"),
                right: Some("B"),
            }]
        );
    }

    #[test]
    fn test_reset() {
        let mut state = voted();
        state.apply(Event::Reset);
        assert_eq!(state.status, Status::NoSession);
        assert!(state.conversation.is_empty());
        assert!(state.session_id.is_none());
    }
}
