//! CLI interface for soul-loop

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::affect::AffectState;
use crate::config::SoulConfig;
use crate::memory::{Record, RecordStore};
use crate::soul::{NoopPolicy, SoulLoop};

#[derive(Parser)]
#[command(name = "soul-loop")]
#[command(about = "Persisted memory, affect, and reflection stores driven by a cycle loop", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the memory JSON file
    #[arg(long)]
    memory_path: Option<PathBuf>,

    /// Path to the emotions JSON file
    #[arg(long)]
    emotions_path: Option<PathBuf>,

    /// Path to the reflections JSON file
    #[arg(long)]
    reflections_path: Option<PathBuf>,

    /// Fail instead of resetting when a state file is malformed
    #[arg(long)]
    strict_load: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the soul loop (default when no command given)
    Run {
        /// Number of cycles to execute
        #[arg(short, long)]
        iterations: Option<u32>,
    },
    /// Show store summaries and the dominant emotion
    Status,
    /// Append an entry to the memory store
    Remember {
        /// Event text to record
        text: String,
    },
    /// Search memory entries (case-insensitive substring)
    Search {
        /// Search query
        query: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SoulConfig::from_file(path)?,
        None => SoulConfig::load_default()?,
    };
    if let Some(path) = cli.memory_path {
        config.memory_path = path;
    }
    if let Some(path) = cli.emotions_path {
        config.emotions_path = path;
    }
    if let Some(path) = cli.reflections_path {
        config.reflections_path = path;
    }
    if cli.strict_load {
        config.strict_load = true;
    }

    match cli.command.unwrap_or(Commands::Run { iterations: None }) {
        Commands::Run { iterations } => {
            let iterations = iterations.unwrap_or(config.iterations);
            let (memories, affect, reflections) = open_stores(&config)?;
            let mut soul = SoulLoop::new(memories, affect, reflections, Box::new(NoopPolicy));
            soul.run(iterations)?;
            println!("{}", soul.status());
        }
        Commands::Status => {
            let (memories, affect, reflections) = open_stores(&config)?;
            let soul = SoulLoop::new(memories, affect, reflections, Box::new(NoopPolicy));
            println!("{}", soul.status());
        }
        Commands::Remember { text } => {
            let mut memories = memory_store(&config);
            memories.load()?;
            let mut record = Record::new();
            record.insert("event".to_string(), serde_json::Value::String(text));
            memories.add(record);
            memories.save()?;
            println!("{}", memories.summarize());
        }
        Commands::Search { query } => {
            let mut memories = memory_store(&config);
            memories.load()?;
            let hits = memories.search(&query);
            for record in &hits {
                println!("{}", serde_json::to_string(record)?);
            }
            eprintln!("{} matches", hits.len());
        }
    }

    Ok(())
}

/// Construct and load all three stores per the config.
fn open_stores(config: &SoulConfig) -> Result<(RecordStore, AffectState, RecordStore)> {
    let mode = config.load_mode();

    let mut memories = RecordStore::with_load_mode(&config.memory_path, "memories", mode);
    memories.load()?;

    let mut affect = AffectState::with_load_mode(&config.emotions_path, mode);
    affect.load()?;

    let mut reflections =
        RecordStore::with_load_mode(&config.reflections_path, "reflections", mode);
    reflections.load()?;

    Ok((memories, affect, reflections))
}

fn memory_store(config: &SoulConfig) -> RecordStore {
    RecordStore::with_load_mode(&config.memory_path, "memories", config.load_mode())
}
