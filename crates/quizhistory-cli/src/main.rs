//! quizhistory - view quiz attempt history from the terminal.
//!
//! Reads the on-device attempt cache and falls back to the scoring service
//! when the cache is empty. `--record <score>` saves a new score for the
//! signed-in user.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use quizhistory_core::{
    AttemptRecord, Config, ErrorReporter, HistoryError, HistoryLoader, HistoryPager,
    LocalAttemptStore, ScoreRecorder, ScoringClient, Session, TracingReporter,
};

/// Directory for an additional log file, if set
const ENV_LOG_DIR: &str = "QUIZHISTORY_LOG_DIR";

const LOG_FILE_NAME: &str = "quizhistory.log";

const EMPTY_HISTORY_MESSAGE: &str = "You have not given any quiz yet!";

enum Command {
    Show { page: usize },
    Record { score: u32 },
}

/// Initialize the tracing subscriber for logging.
/// Returns the file writer guard, which must live until exit.
fn init_tracing() -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match std::env::var(ENV_LOG_DIR) {
        Ok(dir) if !dir.trim().is_empty() => {
            let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

fn parse_args(args: &[String]) -> Result<Command> {
    match args {
        [] => Ok(Command::Show { page: 1 }),
        [flag, value] if flag == "--page" => {
            let page = value
                .parse()
                .with_context(|| format!("Invalid page number: {}", value))?;
            Ok(Command::Show { page })
        }
        [flag, value] if flag == "--record" => {
            let score = value
                .parse()
                .with_context(|| format!("Invalid score: {}", value))?;
            Ok(Command::Record { score })
        }
        _ => bail!("Usage: quizhistory [--page N | --record SCORE]"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let _log_guard = init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args)?;

    let mut config = Config::load()?;
    config.apply_env_overrides();
    let cache_dir = config.cache_dir().unwrap_or_else(|_| PathBuf::from("./cache"));
    debug!(cache_dir = %cache_dir.display(), base_url = %config.base_url, "Loaded configuration");

    let mut session = Session::new(cache_dir.clone());
    if let Err(e) = session.load() {
        warn!(error = %e, "Ignoring unreadable session");
    }

    let mut client = ScoringClient::new(&config.base_url, config.request_timeout())?;
    if let Some(token) = session.token() {
        client.set_token(token.to_string());
    }

    match command {
        Command::Show { page } => show_history(&config, &cache_dir, client, page).await,
        Command::Record { score } => record_score(&session, client, score).await,
    }
}

async fn show_history(
    config: &Config,
    cache_dir: &std::path::Path,
    client: ScoringClient,
    page: usize,
) -> Result<()> {
    let reporter: Arc<dyn ErrorReporter> = Arc::new(TracingReporter);
    let store = LocalAttemptStore::initialize(cache_dir, reporter.clone());

    let loader = HistoryLoader::new(store, client, reporter)
        .with_write_back(config.write_back_remote);
    let loaded = loader.load().await;
    info!(source = ?loaded.source, count = loaded.attempts.len(), "Loaded attempt history");

    let mut pager = HistoryPager::new(loaded.attempts);
    pager.go_to(page);

    if pager.current_slice().is_empty() {
        println!("{}", EMPTY_HISTORY_MESSAGE);
    }
    for attempt in pager.current_slice() {
        println!("{}", attempt_line(attempt));
    }

    if pager.shows_controls() {
        println!();
        println!("{}", pager.page_label());
    }
    Ok(())
}

fn attempt_line(attempt: &AttemptRecord) -> String {
    format!(
        "Attempt on {} - Score: {}",
        attempt.display_date(),
        attempt.display_score()
    )
}

async fn record_score(session: &Session, client: ScoringClient, score: u32) -> Result<()> {
    let recorder = ScoreRecorder::new(client);
    match recorder.record(session, score).await {
        Ok(saved) => {
            println!(
                "Saved score {} ({}) at {}",
                saved.score,
                saved.id,
                saved.created_at.to_rfc3339()
            );
            Ok(())
        }
        Err(HistoryError::Unauthorized) => bail!("Not signed in - score was not saved"),
        Err(e) => Err(e).context("Failed to save score"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_defaults_to_first_page() {
        assert!(matches!(parse_args(&[]).unwrap(), Command::Show { page: 1 }));
    }

    #[test]
    fn test_parse_args_page_and_record() {
        assert!(matches!(
            parse_args(&args(&["--page", "3"])).unwrap(),
            Command::Show { page: 3 }
        ));
        assert!(matches!(
            parse_args(&args(&["--record", "8"])).unwrap(),
            Command::Record { score: 8 }
        ));
    }

    #[test]
    fn test_attempt_line_shows_date_and_score() {
        let date = chrono::DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let line = attempt_line(&AttemptRecord::new(date, 8, 10));
        assert!(line.starts_with("Attempt on "));
        assert!(line.ends_with(" - Score: 8 / 10"));
    }

    #[test]
    fn test_parse_args_rejects_bad_input() {
        assert!(parse_args(&args(&["--record", "-2"])).is_err());
        assert!(parse_args(&args(&["--bogus"])).is_err());
    }
}
