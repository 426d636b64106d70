// Clip Vault CLI binary

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use clip_vault::catalog::HttpCatalogClient;
use clip_vault::config::Config;
use clip_vault::constants::CONFIG_FILENAME;
use clip_vault::ingest::{Disposition, IngestPipeline};
use clip_vault::store::HttpObjectStore;
use clip_vault::watch::PollWatcher;

#[derive(Parser)]
#[command(name = "clipvault")]
#[command(about = "Clip Vault - archives unique video footage from an inbox directory", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file path (defaults to clipvault.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the inbox for new files until interrupted
    Watch {
        /// Override the watched directory
        path: Option<PathBuf>,
    },

    /// Run a single file through the pipeline
    Ingest {
        /// File to ingest
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config)?;

    // Bare invocation watches the configured inbox
    match cli.command.unwrap_or(Commands::Watch { path: None }) {
        Commands::Watch { path } => cmd_watch(config, path),
        Commands::Ingest { path } => cmd_ingest(config, path),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(p) => Ok(Config::load(&p)?),
        None => {
            let default_path = PathBuf::from(CONFIG_FILENAME);
            if default_path.exists() {
                Ok(Config::load(&default_path)?)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn build_pipeline(config: &Config) -> IngestPipeline {
    let catalog = Arc::new(HttpCatalogClient::new(&config.catalog));
    let store = Arc::new(HttpObjectStore::new(&config.store));
    IngestPipeline::new(config, catalog, store)
}

fn cmd_watch(mut config: Config, path: Option<PathBuf>) -> Result<()> {
    if let Some(p) = path {
        config.inbox_dir = p;
    }
    if !config.inbox_dir.is_dir() {
        anyhow::bail!("Inbox directory does not exist: {}", config.inbox_dir.display());
    }

    let pipeline = build_pipeline(&config);

    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = stop.clone();
    ctrlc::set_handler(move || stop_flag.store(true, Ordering::SeqCst))?;

    let mut watcher = PollWatcher::new(
        &config.inbox_dir,
        Duration::from_secs(config.poll_interval_secs),
    );
    watcher.run(&pipeline, &stop);

    Ok(())
}

fn cmd_ingest(config: Config, path: PathBuf) -> Result<()> {
    let source = path
        .canonicalize()
        .map_err(|_| anyhow::anyhow!("File does not exist: {}", path.display()))?;
    if !source.is_file() {
        anyhow::bail!("Not a file: {}", source.display());
    }

    let pipeline = build_pipeline(&config);
    match pipeline.process(&source)? {
        Disposition::Archive {
            new_path,
            registered_id,
        } => {
            println!("Archived as {} (catalog id {})", new_path.display(), registered_id);
        }
        Disposition::Duplicate { target_dir } => {
            println!("Duplicate content, moved to {}", target_dir.display());
        }
        Disposition::Reject { target_dir } => {
            println!("Not a video, moved to {}", target_dir.display());
        }
    }

    Ok(())
}
