//! Terminal Rendering
//!
//! Plain-text views of battle, leaderboard, session and model state.
//! Functions return strings so the CLI decides where they go.

use crate::api::dto::{
    BattleRecord, BattleStatus, LeaderboardEntry, LeaderboardMetadata, ModelInfo, ModelStatus,
    PersistedTurn, Position, SessionSummary,
};
use crate::battle::{BattleState, Status};

/// Side-by-side transcript of the current battle, one block per prompt
pub fn transcript(state: &BattleState) -> String {
    let mut lines = Vec::new();

    if let Some(battle_id) = &state.battle_id {
        let status = match state.status {
            Status::NoSession => "no session",
            Status::Ongoing => "ongoing",
            Status::Voted => "voted",
            Status::Closed => "closed",
        };
        let limit = state
            .max_messages
            .map(|max| format!(", {}/{} messages", state.message_count, max))
            .unwrap_or_default();
        lines.push(format!("== Battle {} ({}{}) ==", battle_id, status, limit));
    }

    for turn in state.turns() {
        lines.push(String::new());
        lines.push(format!("You: {}", turn.prompt));
        for (position, reply) in [(Position::Left, turn.left), (Position::Right, turn.right)] {
            if let Some(text) = reply {
                lines.push(String::new());
                lines.push(format!("{}:", slot_label(state, position)));
                lines.extend(indented(text));
            }
        }
    }

    if let Some(models) = &state.revealed_models {
        lines.push(String::new());
        lines.push(format!(
            "Revealed: Assistant A = {}, Assistant B = {}",
            models.left, models.right
        ));
    }

    if let Some(error) = &state.error {
        lines.push(String::new());
        lines.push(format!("Error: {}", error));
    }

    join_lines(lines)
}

/// "Assistant A", plus the model name once revealed
fn slot_label(state: &BattleState, position: Position) -> String {
    match state.revealed(position) {
        Some(model) => format!("{} ({})", position.label(), model),
        None => position.label().to_string(),
    }
}

/// Hint for what typing a line will do next
pub fn prompt_hint(state: &BattleState) -> &'static str {
    match state.status {
        _ if state.session_id.is_none() => "Enter a prompt to start a battle",
        Status::Voted => "Enter a prompt for the next battle, /reset to start over",
        Status::Closed => "This battle was abandoned. Enter a prompt for the next battle",
        Status::NoSession | Status::Ongoing => "Follow up, or /vote left|right|tie|bad",
    }
}

/// A stored battle of a past session.
///
/// Model ids stay hidden unless the battle was voted on.
pub fn battle_record(record: &BattleRecord) -> String {
    let status = match record.status {
        BattleStatus::Ongoing => "ongoing",
        BattleStatus::Voted => "voted",
        BattleStatus::Abandoned => "abandoned",
    };
    let vote = record
        .vote
        .map(|v| format!(", vote: {}", v))
        .unwrap_or_default();
    let mut lines = vec![format!(
        "== Battle {} ({}{}) ==",
        record.battle_id, status, vote
    )];

    let voted = record.status == BattleStatus::Voted;
    for turn in &record.conversation {
        lines.push(String::new());
        match turn {
            PersistedTurn::User { content } => lines.push(format!("You: {}", content)),
            PersistedTurn::Assistant { position, content } => {
                let model = match position {
                    Position::Left => &record.left_model_id,
                    Position::Right => &record.right_model_id,
                };
                if voted {
                    lines.push(format!("{} ({}):", position.label(), model));
                } else {
                    lines.push(format!("{}:", position.label()));
                }
                lines.extend(indented(content));
            }
        }
    }

    join_lines(lines)
}

/// Ranked table of models
pub fn leaderboard_table(
    entries: &[&LeaderboardEntry],
    metadata: Option<&LeaderboardMetadata>,
) -> String {
    if entries.is_empty() {
        return join_lines(vec!["No models ranked yet.".to_string()]);
    }

    let mut lines = vec![
        format!(
            "{:<5} {:<28} {:<16} {:>12} {:>7} {:>6}  {}",
            "Rank", "Model", "Organization", "ELO", "Votes", "Win%", "License"
        ),
        "-".repeat(92),
    ];

    lines.extend(entries.iter().map(|entry| {
        format!(
            "{:<5} {:<28} {:<16} {:>12} {:>7} {:>5.1}%  {}",
            entry.rank,
            truncate(&entry.model_name, 28),
            truncate(&entry.organization, 16),
            format!("{:.0} ±{:.0}", entry.elo_score, entry.elo_ci),
            entry.vote_count,
            entry.win_rate * 100.0,
            entry.license
        )
    }));

    if let Some(meta) = metadata {
        let updated = meta
            .last_updated_at()
            .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| meta.last_updated.clone());
        lines.push(String::new());
        lines.push(format!(
            "{} models, {} votes, updated {}",
            meta.total_models, meta.total_votes, updated
        ));
    }

    join_lines(lines)
}

/// Session history list; the active session is marked with `*`
pub fn session_list(sessions: &[SessionSummary], active: Option<&str>) -> String {
    if sessions.is_empty() {
        return join_lines(vec!["No sessions yet".to_string()]);
    }

    let mut lines = vec![
        format!("  {:<24} {:<18} {}", "Session", "Last active", "Title"),
        "-".repeat(80),
    ];

    lines.extend(sessions.iter().map(|session| {
        let marker = if Some(session.session_id.as_str()) == active {
            "*"
        } else {
            " "
        };
        let last_active = session
            .last_active()
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "{} {:<24} {:<18} {}",
            marker,
            truncate(&session.session_id, 24),
            last_active,
            truncate(&session.title, 34)
        )
    }));

    join_lines(lines)
}

/// Models available to battles
pub fn model_list(models: &[ModelInfo]) -> String {
    if models.is_empty() {
        return join_lines(vec!["No models configured.".to_string()]);
    }

    let mut lines = vec![
        format!("{:<28} {:<28} {:<14} {}", "ID", "Name", "Provider", "Status"),
        "-".repeat(80),
    ];
    lines.extend(models.iter().map(|model| {
        let status = match model.status {
            ModelStatus::Active => "active",
            ModelStatus::Inactive => "inactive",
        };
        format!(
            "{:<28} {:<28} {:<14} {}",
            truncate(&model.model_id, 28),
            truncate(&model.name, 28),
            truncate(&model.provider, 14),
            status
        )
    }));

    join_lines(lines)
}

fn indented(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines().map(|line| format!("  {}", line))
}

/// One line per entry, each newline-terminated
fn join_lines(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

/// Cut to `width` characters, marking the cut with `…`
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut cut: String = s.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
