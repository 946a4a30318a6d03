//! coderev — AI code review from the command line.
//!
//! Thin front end over `coderev-core`: argument parsing, config loading,
//! and plain-text rendering. All review logic, the service contract, and
//! the bounded history cache live in the core crate.
//!
//! History is kept per working directory in `.coderev/history.db`, so
//! reviews stay scoped to the project they were run in. A store that fails
//! to open degrades to an in-memory one — history problems never block a
//! review.

mod config;
mod render;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use coderev_core::app::ReviewApp;
use coderev_core::client::ReviewClient;
use coderev_core::history::HistoryStore;
use coderev_core::storage::{MemoryStorage, SqliteStorage, Storage};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "coderev", version, about = "AI code review for source snippets")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Review a source file, or stdin when no file is given.
    Review {
        /// Path to the file to review.
        file: Option<PathBuf>,
        /// Language of the snippet; inferred from the file extension when
        /// omitted.
        #[arg(short, long)]
        language: Option<String>,
    },
    /// List cached reviews, most recent first.
    History,
    /// Re-display a past review by id or 1-based history index.
    Show { entry: String },
    /// Drop all cached reviews.
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Review { file, language } => review(file, language).await,
        Command::History => {
            render::history(open_history().items());
            Ok(())
        }
        Command::Show { entry } => show(&entry),
        Command::Clear => {
            open_history().clear();
            println!("review history cleared");
            Ok(())
        }
    }
}

async fn review(file: Option<PathBuf>, language: Option<String>) -> anyhow::Result<()> {
    let code = match &file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    // Guard before the network call — the service is not asked to review
    // blank input.
    if code.trim().is_empty() {
        bail!("nothing to review: input is blank");
    }

    let language = match language {
        Some(language) => language,
        None => file
            .as_deref()
            .and_then(language_from_extension)
            .context("cannot infer the language; pass --language")?,
    };

    let config = Config::load();
    let api_key = config.api_key().context(
        "no API key configured: set GEMINI_API_KEY or api_key in the config file",
    )?;
    let client = ReviewClient::new(api_key)
        .with_base_url(config.base_url)
        .with_model(config.model)
        .with_temperature(config.temperature);

    let mut app = ReviewApp::new(client, open_history());
    let result = app.submit(&code, &language).await?;
    render::result(&result);
    Ok(())
}

fn show(entry: &str) -> anyhow::Result<()> {
    let history = open_history();
    let items = history.items();

    let item = match entry.parse::<usize>() {
        Ok(index) if index >= 1 => items.get(index - 1),
        _ => items.iter().find(|item| item.id == entry),
    };
    match item {
        Some(item) => {
            render::history_item(item);
            Ok(())
        }
        None => bail!("no history entry matching '{entry}'"),
    }
}

/// Opens the per-directory history store, falling back to an in-memory one
/// when the database cannot be opened. Never fails.
fn open_history() -> HistoryStore {
    let storage: Box<dyn Storage> = match std::fs::create_dir_all(".coderev")
        .map_err(|e| e.to_string())
        .and_then(|_| SqliteStorage::open(".coderev/history.db").map_err(|e| e.to_string()))
    {
        Ok(storage) => Box::new(storage),
        Err(error) => {
            tracing::warn!(%error, "history database unavailable, using in-memory history");
            Box::new(MemoryStorage::new())
        }
    };
    HistoryStore::open(storage)
}

/// Maps a file extension to the language name embedded in the prompt.
fn language_from_extension(path: &Path) -> Option<String> {
    let language = match path.extension()?.to_str()? {
        "rs" => "rust",
        "py" => "python",
        "js" | "mjs" => "javascript",
        "ts" | "tsx" => "typescript",
        "go" => "go",
        "java" => "java",
        "c" | "h" => "c",
        "cc" | "cpp" | "hpp" => "cpp",
        "cs" => "csharp",
        "rb" => "ruby",
        "php" => "php",
        "swift" => "swift",
        "kt" => "kotlin",
        "sh" => "bash",
        "sql" => "sql",
        _ => return None,
    };
    Some(language.to_owned())
}
