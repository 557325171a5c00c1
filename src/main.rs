//! Battler CLI
//!
//! Terminal front end for the model arena:
//! - Run blind battles and vote
//! - Browse the ELO leaderboard
//! - Revisit past sessions
//! - Check backend status

use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use battler::api::dto::{SortBy, SortOrder, Vote};
use battler::config::{generate_default_config, Config, LoggingConfig};
use battler::services::{
    BattleService, HealthService, LeaderboardService, ModelService, SessionService,
    DEFAULT_PAGE_SIZE,
};
use battler::{render, ApiClient, BattleController, IdentityStore, LeaderboardView, SessionHistory, UserId};

#[derive(Parser)]
#[command(name = "battler")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Blind side-by-side model battles and an ELO leaderboard")]
#[command(long_about = "Battler sends your prompt to two anonymous models.\nCompare the answers, vote, and find out who you were talking to.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend URL (overrides config file and BATTLER_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive battle
    Battle {
        /// First prompt (otherwise read from the terminal)
        prompt: Option<String>,
        /// Resume an existing session
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Show the leaderboard
    Leaderboard {
        /// Sort field (elo_score, vote_count, organization)
        #[arg(long)]
        sort_by: Option<SortBy>,
        /// Sort order (asc, desc)
        #[arg(long)]
        order: Option<SortOrder>,
        /// Filter by model name, id or organization
        #[arg(short, long)]
        search: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List your past sessions
    Sessions {
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },

    /// Show the battles of one session
    Session {
        /// Session id
        id: String,
    },

    /// List models available for battles
    Models,

    /// Show backend status
    Status,

    /// Show the anonymous user id
    Whoami {
        /// Forget the current id and generate a new one
        #[arg(long)]
        reset: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_default();
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    init_logging(&config.logging);
    tracing::debug!(api_url = %config.api.base_url, "Battler v{}", env!("CARGO_PKG_VERSION"));

    let client = ApiClient::new(&config.api).context("Failed to build HTTP client")?;

    match cli.command {
        Commands::Battle { prompt, session } => run_battle(client, prompt, session).await?,

        Commands::Leaderboard {
            sort_by,
            order,
            search,
            format,
        } => {
            let sort_by = sort_by.unwrap_or(config.leaderboard.sort_by);
            let order = order.unwrap_or(config.leaderboard.order);
            let mut view = LeaderboardView::load(LeaderboardService::new(client), sort_by, order).await;
            if let Some(query) = search {
                view.set_search_query(query);
            }
            if let Some(error) = view.error() {
                bail!("{}", error);
            }

            match format {
                OutputFormat::Table => {
                    print!("{}", render::leaderboard_table(&view.entries(), view.metadata()))
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&view.entries())?)
                }
            }
        }

        Commands::Sessions { limit, offset } => {
            let user_id = resolve_user_id(&IdentityStore::from_config(&config.identity));
            let mut history =
                SessionHistory::new(SessionService::new(client), user_id).with_page(limit, offset);
            history.refetch().await;
            if let Some(error) = history.error() {
                bail!("{}", error);
            }

            print!("{}", render::session_list(history.sessions(), None));
            if history.has_more() {
                println!();
                println!(
                    "Showing {}-{} of {}. Next page: --offset {}",
                    history.offset() + 1,
                    history.offset() as usize + history.sessions().len(),
                    history.total(),
                    history.offset() + limit
                );
            }
        }

        Commands::Session { id } => {
            let user_id = resolve_user_id(&IdentityStore::from_config(&config.identity));
            let mut history = SessionHistory::new(SessionService::new(client), user_id);
            history.select(Some(id));
            history.load_detail().await;
            if let Some(error) = history.detail_error() {
                bail!("{}", error);
            }

            if history.battles().is_empty() {
                println!("Session has no battles");
            }
            for (i, battle) in history.battles().iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print!("{}", render::battle_record(battle));
            }
        }

        Commands::Models => {
            let models = ModelService::new(client)
                .list_models()
                .await
                .context("Failed to list models")?;
            print!("{}", render::model_list(&models));
        }

        Commands::Status => {
            println!("Battler v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("API: {}", config.api.base_url);

            match HealthService::new(client).check().await {
                Ok(report) => {
                    println!(
                        "Status: {} ({} ms)",
                        report.response.status, report.latency_ms
                    );
                    if let Some(service) = &report.response.service {
                        println!("Service: {}", service);
                    }
                    if !report.is_healthy() {
                        std::process::exit(1);
                    }
                }
                Err(e) => {
                    println!("Status: unavailable ({})", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Whoami { reset } => {
            let store = IdentityStore::from_config(&config.identity);
            if reset {
                store.clear().context("Failed to clear anonymous id")?;
            }
            let user_id = resolve_user_id(&store);

            println!("User: {}", user_id);
            match store.path() {
                Some(path) => println!("Stored in: {}", path.display()),
                None => println!("Stored in: memory (not persisted)"),
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so table and JSON output stay clean
fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("battler={}", config.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn resolve_user_id(store: &IdentityStore) -> UserId {
    store.get_or_create().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Identity storage unavailable, using a temporary id");
        UserId::generate()
    })
}

/// One line typed during a battle
#[derive(Debug, PartialEq)]
enum Input {
    Empty,
    Prompt(String),
    NewBattle(String),
    Vote(Vote),
    Reset,
    Quit,
    Invalid(String),
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }

    let Some(command) = line.strip_prefix('/') else {
        return Input::Prompt(line.to_string());
    };

    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };

    match name {
        "vote" => match rest.parse::<Vote>() {
            Ok(vote) => Input::Vote(vote),
            Err(_) => Input::Invalid("Usage: /vote left|right|tie|bad".to_string()),
        },
        "new" if !rest.is_empty() => Input::NewBattle(rest.to_string()),
        "new" => Input::Invalid("Usage: /new PROMPT".to_string()),
        "reset" => Input::Reset,
        "quit" | "exit" => Input::Quit,
        other => Input::Invalid(format!(
            "Unknown command: /{}. Use /vote, /new, /reset or /quit",
            other
        )),
    }
}

async fn run_battle(
    client: ApiClient,
    prompt: Option<String>,
    session: Option<String>,
) -> anyhow::Result<()> {
    let controller = BattleController::new(BattleService::new(client.clone()));

    if let Some(session_id) = session {
        controller
            .resume_session(&SessionService::new(client), &session_id)
            .await;
        print!("{}", render::transcript(&controller.state().await));
    }

    if let Some(prompt) = prompt {
        eprintln!("Waiting for both models...");
        controller.submit_prompt(prompt).await;
        print!("{}", render::transcript(&controller.state().await));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let state = controller.state().await;
        println!();
        println!("{}", render::prompt_hint(&state));
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_input(&line) {
            Input::Empty => continue,
            Input::Quit => break,
            Input::Invalid(message) => {
                eprintln!("{}", message);
                continue;
            }
            Input::Reset => {
                controller.reset().await;
                println!("Started over.");
                continue;
            }
            Input::Vote(vote) => {
                controller.submit_vote(vote).await;
            }
            Input::NewBattle(prompt) => {
                eprintln!("Waiting for both models...");
                controller.start_new_battle(prompt).await;
            }
            Input::Prompt(prompt) => {
                eprintln!("Waiting for both models...");
                controller.submit_prompt(prompt).await;
            }
        }

        print!("{}", render::transcript(&controller.state().await));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("   "), Input::Empty);
        assert_eq!(
            parse_input(" Explain recursion "),
            Input::Prompt("Explain recursion".to_string())
        );
        assert_eq!(parse_input("/vote left"), Input::Vote(Vote::LeftBetter));
        assert_eq!(parse_input("/vote  b"), Input::Vote(Vote::RightBetter));
        assert_eq!(parse_input("/vote bad"), Input::Vote(Vote::BothBad));
        assert_eq!(
            parse_input("/new Write a haiku"),
            Input::NewBattle("Write a haiku".to_string())
        );
        assert_eq!(parse_input("/reset"), Input::Reset);
        assert_eq!(parse_input("/quit"), Input::Quit);
    }

    #[test]
    fn test_parse_input_errors() {
        assert!(matches!(parse_input("/vote"), Input::Invalid(_)));
        assert!(matches!(parse_input("/vote maybe"), Input::Invalid(_)));
        assert!(matches!(parse_input("/new"), Input::Invalid(_)));
        assert!(matches!(parse_input("/dance"), Input::Invalid(_)));
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "battler",
            "leaderboard",
            "--sort-by",
            "vote_count",
            "--order",
            "asc",
            "--search",
            "meta",
        ])
        .unwrap();
        match cli.command {
            Commands::Leaderboard {
                sort_by, order, search, ..
            } => {
                assert_eq!(sort_by, Some(SortBy::VoteCount));
                assert_eq!(order, Some(SortOrder::Asc));
                assert_eq!(search.as_deref(), Some("meta"));
            }
            _ => panic!("expected leaderboard command"),
        }
    }
}
