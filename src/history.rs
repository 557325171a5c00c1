//! Session History
//!
//! The user's past sessions and the battles of the one currently
//! selected. Listing is scoped to the anonymous user id.

use crate::api::dto::{BattleRecord, SessionSummary};
use crate::identity::UserId;
use crate::services::{SessionSource, DEFAULT_PAGE_SIZE};

/// Paged session list plus the detail of the selected session
pub struct SessionHistory<S> {
    source: S,
    user_id: UserId,
    limit: u32,
    offset: u32,
    sessions: Vec<SessionSummary>,
    total: u64,
    loading: bool,
    error: Option<String>,
    active_session_id: Option<String>,
    battles: Vec<BattleRecord>,
    detail_error: Option<String>,
}

impl<S: SessionSource> SessionHistory<S> {
    pub fn new(source: S, user_id: UserId) -> Self {
        Self {
            source,
            user_id,
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
            sessions: Vec::new(),
            total: 0,
            loading: false,
            error: None,
            active_session_id: None,
            battles: Vec::new(),
            detail_error: None,
        }
    }

    pub fn with_page(mut self, limit: u32, offset: u32) -> Self {
        self.limit = limit.max(1);
        self.offset = offset;
        self
    }

    /// Fetch the current page of sessions
    pub async fn refetch(&mut self) {
        self.loading = true;
        self.error = None;

        match self
            .source
            .list_sessions(&self.user_id, self.limit, self.offset)
            .await
        {
            Ok(response) => {
                tracing::debug!(
                    count = response.sessions.len(),
                    total = response.total,
                    "Sessions fetched"
                );
                self.sessions = response.sessions;
                self.total = response.total;
            }
            Err(e) => {
                tracing::error!(user_id = %self.user_id, error = %e, "Failed to fetch sessions");
                self.error = Some(format!("Failed to load sessions: {}", e));
            }
        }

        self.loading = false;
    }

    /// Advance to the next page if there is one
    pub async fn next_page(&mut self) -> bool {
        if !self.has_more() {
            return false;
        }
        self.offset += self.limit;
        self.refetch().await;
        true
    }

    pub fn has_more(&self) -> bool {
        (self.offset as u64) + (self.sessions.len() as u64) < self.total
    }

    /// Mark a session as active; its detail is dropped until reloaded
    pub fn select(&mut self, session_id: Option<String>) {
        if self.active_session_id != session_id {
            self.battles.clear();
            self.detail_error = None;
        }
        self.active_session_id = session_id;
    }

    /// Fetch battles of the active session
    pub async fn load_detail(&mut self) {
        let session_id = match &self.active_session_id {
            Some(id) => id.clone(),
            None => {
                self.battles.clear();
                self.detail_error = None;
                return;
            }
        };

        self.loading = true;
        self.detail_error = None;

        match self.source.session_battles(&session_id).await {
            Ok(response) => self.battles = response.battles,
            Err(e) => {
                tracing::error!(session_id = %session_id, error = %e, "Failed to fetch session battles");
                self.battles.clear();
                self.detail_error = Some(format!("Failed to load session: {}", e));
            }
        }

        self.loading = false;
    }

    pub fn sessions(&self) -> &[SessionSummary] {
        &self.sessions
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn active_session_id(&self) -> Option<&str> {
        self.active_session_id.as_deref()
    }

    pub fn battles(&self) -> &[BattleRecord] {
        &self.battles
    }

    pub fn detail_error(&self) -> Option<&str> {
        self.detail_error.as_deref()
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}
