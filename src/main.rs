mod app;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{stdin, stdout};
use std::path::PathBuf;
use word_repetition::{CardManager, Config, SqliteCardStore, SystemClock, logging};

#[derive(Subcommand)]
enum Command {
    /// Save a word with its definition
    Add { word: String, definition: String },
    /// Review all due words
    Review,
    /// Forget a word
    Delete { word: String },
    /// Tell whether a word is saved
    Exists { word: String },
    /// Print the saved definition of a word
    Definition { word: String },
    /// Count saved and due words
    Stats,
    /// Write all words to a JSON file
    Export { path: PathBuf },
    /// Load words from a JSON export
    Import { path: PathBuf },
}

/// Spaced-repetition vocabulary trainer.
#[derive(Parser)]
struct Cli {
    /// Card database (defaults to $WORDREP_DB or ./wordrep.sqlite3)
    #[arg(long)]
    db: Option<PathBuf>,
    /// Learner the command acts for
    #[arg(long, short, default_value_t = 0)]
    learner: i64,
    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    logging::init_tracing(&config.log_level);

    let store = SqliteCardStore::open(&config.db_path)
        .with_context(|| format!("opening card database {:?}", config.db_path))?;
    let manager = CardManager::new(store, SystemClock, config.scheduler)?;
    let learner = cli.learner;

    let mut out = stdout().lock();
    match cli.command {
        Command::Add { word, definition } => {
            app::add(&manager, learner, &word, &definition, &mut out)
        }
        Command::Review => app::review(&manager, learner, &mut stdin().lock(), &mut out),
        Command::Delete { word } => app::delete(&manager, learner, &word, &mut out),
        Command::Exists { word } => app::exists(&manager, learner, &word, &mut out),
        Command::Definition { word } => app::definition(&manager, learner, &word, &mut out),
        Command::Stats => app::stats(&manager, learner, &mut out),
        Command::Export { path } => app::export(&manager, learner, &path, &mut out),
        Command::Import { path } => app::import(&manager, &path, &mut out),
    }
}
