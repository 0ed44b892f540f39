//! CLI frontend for the Yingzai divination engine.

mod commands;

use std::path::PathBuf;
use std::process;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::Options;

#[derive(Parser)]
#[command(
    name = "yz",
    about = "Yingzai: I Ching divination with interpretive enrichment",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Date the cast is seeded with (YYYY-MM-DD, default: today)
    #[arg(long, global = true)]
    date: Option<NaiveDate>,

    /// Do not call any text provider; use templates and the knowledge base
    #[arg(long, global = true)]
    offline: bool,

    /// Load the hexagram catalog from a JSON file
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Load the knowledge base from a JSONL file
    #[arg(long, global = true)]
    knowledge: Option<PathBuf>,

    /// How the transformed hexagram is derived: changing, random
    #[arg(long, global = true, default_value = "changing")]
    transform: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Toss six lines of three coins and read the result
    Cast {
        /// The question to ask
        question: String,

        /// Print the session snapshot as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Pick a hexagram from a positive number
    Number {
        /// The number (1 selects the first hexagram)
        n: u64,

        /// The question to ask
        question: String,

        /// Print the session snapshot as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the hexagram catalog
    Catalog {
        /// Only show hexagrams whose name contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Start an interactive divination session
    Session,

    /// Ask a question of the knowledge base
    Ask {
        /// The question
        question: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let env_filter = EnvFilter::try_from_env("YZ_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let options = Options {
        date: cli.date,
        offline: cli.offline,
        catalog: cli.catalog,
        knowledge: cli.knowledge,
        transform: cli.transform,
    };

    let result = match cli.command {
        Commands::Cast { question, json } => commands::cast::run(&options, &question, json),
        Commands::Number { n, question, json } => {
            commands::number::run(&options, n, &question, json)
        }
        Commands::Catalog { filter } => commands::catalog::run(&options, filter.as_deref()),
        Commands::Session => commands::session::run(&options),
        Commands::Ask { question } => commands::ask::run(&options, &question),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
