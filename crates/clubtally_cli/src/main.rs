//! Club Tally command-line front-end.
//!
//! # Responsibility
//! - Dispatch one roster command per invocation against the core service.
//! - Keep output stable for scripting (`--json`) and readable otherwise.

use clap::{Parser, Subcommand};
use clubtally_core::{init_logging, RuntimeConfig};
use std::path::PathBuf;

mod commands;
mod context;
mod output;

use commands::{award, event, history, member, rank, reset};

#[derive(Parser)]
#[command(name = "clubtally")]
#[command(about = "Track club member points across recurring events")]
#[command(version)]
struct Cli {
    /// Roster database file (default: $CLUBTALLY_DB_PATH or a temp-dir file)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage members
    Member {
        #[command(subcommand)]
        action: member::MemberAction,
    },
    /// Manage point-earning events
    Event {
        #[command(subcommand)]
        action: event::EventAction,
    },
    /// Award an event's points to a member
    Award {
        /// Member id (or unique id prefix)
        member: String,
        /// Event id (or unique id prefix); defaults to the first event
        #[arg(long)]
        event: Option<String>,
    },
    /// Show or edit a member's point history
    History {
        #[command(subcommand)]
        action: history::HistoryAction,
    },
    /// Clear every member's points and history
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
    /// Print the leaderboard
    Rank {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the leaderboard to a CSV file and print its path
    Export {
        /// Target directory (default: $CLUBTALLY_EXPORT_DIR or the temp dir)
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Header row: legacy (Sira,Isim,Toplam Puan) or english
        #[arg(long, default_value = "legacy")]
        header: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let mut config = RuntimeConfig::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("Warning: logging disabled: {err}");
    }

    let result = match cli.command {
        Commands::Member { action } => member::run(&config, action),
        Commands::Event { action } => event::run(&config, action),
        Commands::Award { member, event } => award::run(&config, &member, event.as_deref()),
        Commands::History { action } => history::run(&config, action),
        Commands::Reset { yes } => reset::run(&config, yes),
        Commands::Rank { json } => rank::run(&config, json),
        Commands::Export { dir, header } => rank::export(&config, dir, &header),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
