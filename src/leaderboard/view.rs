//! Leaderboard view state
//!
//! Fetches the ranked table whenever the sort changes and filters it
//! client-side by a search query.

use crate::api::dto::{LeaderboardEntry, LeaderboardMetadata, SortBy, SortOrder};
use crate::services::LeaderboardSource;

/// Leaderboard table plus its sort/filter controls
pub struct LeaderboardView<S> {
    source: S,
    entries: Vec<LeaderboardEntry>,
    metadata: Option<LeaderboardMetadata>,
    is_loading: bool,
    error: Option<String>,
    sort_by: SortBy,
    sort_order: SortOrder,
    search_query: String,
}

impl<S: LeaderboardSource> LeaderboardView<S> {
    /// Create an empty view; nothing is fetched until [`refetch`](Self::refetch)
    pub fn new(source: S, sort_by: SortBy, sort_order: SortOrder) -> Self {
        Self {
            source,
            entries: Vec::new(),
            metadata: None,
            is_loading: false,
            error: None,
            sort_by,
            sort_order,
            search_query: String::new(),
        }
    }

    /// Create and fetch immediately
    pub async fn load(source: S, sort_by: SortBy, sort_order: SortOrder) -> Self {
        let mut view = Self::new(source, sort_by, sort_order);
        view.refetch().await;
        view
    }

    /// Fetch the table for the current sort
    pub async fn refetch(&mut self) {
        self.is_loading = true;
        self.error = None;

        match self
            .source
            .get_leaderboard(self.sort_by, self.sort_order)
            .await
        {
            Ok(response) => {
                tracing::debug!(
                    entries = response.leaderboard.len(),
                    total_votes = response.metadata.total_votes,
                    "Leaderboard fetched"
                );
                self.entries = response.leaderboard;
                sort_entries(&mut self.entries, self.sort_by, self.sort_order);
                self.metadata = Some(response.metadata);
            }
            Err(e) if e.is_unreachable() => {
                // A backend that is simply not running shows as an empty board
                tracing::warn!(error = %e, "Backend not reachable, showing empty leaderboard");
                self.entries.clear();
                self.metadata = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch leaderboard");
                self.entries.clear();
                self.metadata = None;
                self.error = Some(e.to_string());
            }
        }

        self.is_loading = false;
    }

    /// Change the sort field, refetching when it differs
    pub async fn set_sort_by(&mut self, sort_by: SortBy) {
        if self.sort_by != sort_by {
            self.sort_by = sort_by;
            self.refetch().await;
        }
    }

    /// Change the sort order, refetching when it differs
    pub async fn set_sort_order(&mut self, sort_order: SortOrder) {
        if self.sort_order != sort_order {
            self.sort_order = sort_order;
            self.refetch().await;
        }
    }

    /// Update the search filter; never hits the network
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Entries matching the search query, in sort order
    pub fn entries(&self) -> Vec<&LeaderboardEntry> {
        filter_entries(&self.entries, &self.search_query)
    }

    /// Everything fetched, ignoring the search query
    pub fn all_entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn metadata(&self) -> Option<&LeaderboardMetadata> {
        self.metadata.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn sort_by(&self) -> SortBy {
        self.sort_by
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }
}

/// Case-insensitive substring match on name, id or organization.
///
/// An empty query matches everything.
pub fn filter_entries<'a>(entries: &'a [LeaderboardEntry], query: &str) -> Vec<&'a LeaderboardEntry> {
    if query.is_empty() {
        return entries.iter().collect();
    }

    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|entry| matches_query(entry, &needle))
        .collect()
}

fn matches_query(entry: &LeaderboardEntry, needle: &str) -> bool {
    [&entry.model_name, &entry.model_id, &entry.organization]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Order entries by the chosen field; ties fall back to backend rank
pub fn sort_entries(entries: &mut [LeaderboardEntry], sort_by: SortBy, order: SortOrder) {
    entries.sort_by(|a, b| {
        let primary = match sort_by {
            SortBy::EloScore => a.elo_score.total_cmp(&b.elo_score),
            SortBy::VoteCount => a.vote_count.cmp(&b.vote_count),
            SortBy::Organization => a
                .organization
                .to_lowercase()
                .cmp(&b.organization.to_lowercase()),
        };
        let primary = match order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        primary.then_with(|| a.rank.cmp(&b.rank))
    });
}
