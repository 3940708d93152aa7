//! Broadcast CLI
//!
//! Runs one pass over the franchise feed. Intended to be scheduled externally
//! (cron, systemd timer, CI schedule).

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use broadcast::{
    error::Result,
    models::Config,
    pipeline,
    services::{HttpTransport, LogRelay, RelayLogger},
    storage::{HistoryStore, LocalStorage},
    utils::log::{critical, success},
};
use clap::{Parser, Subcommand};
use log::LevelFilter;

/// Broadcast - Call of Duty feed watcher
#[derive(Parser, Debug)]
#[command(
    name = "broadcast",
    version,
    about = "Reports new Call of Duty blog posts and notices to Discord"
)]

struct Cli {
    /// Directory holding config.toml and history.json
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Configuration file (default: {storage_dir}/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Never save history, regardless of config
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Default)]
enum Command {
    /// Fetch the feed and notify new items (default)
    #[default]
    Run,

    /// Validate configuration
    Validate,

    /// Show recorded history
    Info,
}

/// Console output covers this crate only; dependency logs need `RUST_LOG`.
const CONSOLE_FILTER: &str = "broadcast=trace";

fn console_logger(env: env_logger::Env<'_>) -> env_logger::Logger {
    env_logger::Builder::from_env(env.default_filter_or(CONSOLE_FILTER))
        .format_timestamp_secs()
        .build()
}

/// Install the console logger behind the webhook relay. Severity is
/// narrowed once the config is known.
fn init_logging() -> Arc<LogRelay> {
    let relay = Arc::new(LogRelay::new());
    let logger = RelayLogger::new(
        console_logger(env_logger::Env::default()),
        Arc::clone(&relay),
    );
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
    relay
}

/// Read configuration and apply logging settings.
fn load_config(cli: &Cli, relay: &LogRelay) -> Result<Config> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.storage_dir.join("config.toml"));
    let mut config = Config::load(&config_path)?;

    let console = if cli.verbose {
        LevelFilter::Debug
    } else {
        config.logging.level_filter().unwrap_or(LevelFilter::Info)
    };
    relay.configure(console, config.logging.discord.level_filter());
    log::debug!("Loaded configuration from {}", config_path.display());
    if config.logging.discord.webhook().is_some() {
        success(&format!(
            "Enabled logging to Discord with severity {}",
            config.logging.discord.severity.to_uppercase()
        ));
    }

    if cli.dry_run {
        config.debug = true;
    }
    Ok(config)
}

async fn run(cli: Cli, config: &Config, transport: &HttpTransport) -> Result<()> {
    let storage = LocalStorage::new(&cli.storage_dir);

    match cli.command.unwrap_or_default() {
        Command::Run => {
            config.validate()?;
            pipeline::run_broadcast(config, &storage, transport).await?;
        }

        Command::Validate => pipeline::run_validate(config)?,

        Command::Info => {
            log::info!("Storage directory: {}", storage.root().display());
            let loaded = storage.load().await?;
            if loaded.created {
                log::info!("No history recorded yet.");
            } else {
                log::info!("Blog: {} tracked", loaded.state.blog.len());
                log::info!("MOTD: {} tracked", loaded.state.motd.len());
            }
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let relay = init_logging();

    let config = match load_config(&cli, &relay) {
        Ok(config) => config,
        Err(e) => {
            critical(&e.to_string());
            return ExitCode::FAILURE;
        }
    };
    let transport = match HttpTransport::new(&config.transport) {
        Ok(transport) => transport,
        Err(e) => {
            critical(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    let code = match run(cli, &config, &transport).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            critical(&e.to_string());
            ExitCode::FAILURE
        }
    };

    if let Some(webhook) = config.logging.discord.webhook() {
        relay.flush(&transport, webhook).await;
    }
    code
}
