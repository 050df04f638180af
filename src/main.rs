// src/main.rs
mod document;
mod extractors;
mod llm;
mod pipeline;
mod server;
mod storage;
mod utils;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use llm::GeminiClient;
use pipeline::{MeetingAnalyzer, MeetingSecretary};
use storage::StorageManager;
use utils::config::Settings;
use utils::debug_dump::DebugDump;
use utils::AppError;

/// Turn meeting transcripts into formatted .docx meeting notes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a meeting note from a transcript file
    Generate {
        /// UTF-8 transcript file
        #[arg(short, long)]
        transcript: PathBuf,
    },

    /// Serve the upload / download / delete HTTP API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8000")]
        bind: SocketAddr,
    },

    /// Delete the generated meeting note
    Delete,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Pick up a .env file before clap reads the environment
    let _ = dotenvy::dotenv();

    // 2. Parse CLI Arguments
    let cli = Cli::parse();

    // 3. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(cli.settings.debug);
    tracing::info!("Starting with settings: {:?}", cli.settings);

    // 4. Initialize storage for the output artifact
    let storage = StorageManager::new(&cli.settings.output)?;

    match cli.command {
        Command::Delete => {
            if storage.delete()? {
                println!("Deleted {}", storage.output_path().display());
            } else {
                println!("File not found: {}", storage.output_path().display());
            }
        }
        Command::Generate { transcript } => {
            tracing::info!("Reading transcript from {}", transcript.display());
            let text = std::fs::read_to_string(&transcript)?;

            let analyzer = build_analyzer(&cli.settings, storage)?;
            let path = analyzer.complete(&text).await?;
            println!("{}", path.display());
        }
        Command::Serve { bind } => {
            let analyzer = build_analyzer(&cli.settings, storage)?;
            server::serve(bind, Arc::new(server::AppState::new(analyzer))).await?;
        }
    }

    Ok(())
}

/// Wires the generation client, orchestrator and storage together.
fn build_analyzer(settings: &Settings, storage: StorageManager) -> Result<MeetingAnalyzer, AppError> {
    settings.require_api_key()?;
    let client = GeminiClient::from_settings(settings)?;
    tracing::info!("Using model {} with {} worker(s)", settings.model, settings.worker_count());

    let mut secretary = MeetingSecretary::new(Arc::new(client), settings.sections())
        .with_workers(settings.worker_count());

    if settings.debug {
        let dump = DebugDump::new(settings.debug_dir());
        tracing::info!("Debug mode: saving raw model responses to {}", dump.dir().display());
        secretary = secretary.with_debug_dump(dump);
    }

    Ok(MeetingAnalyzer::new(secretary, storage))
}
