mod report_cmd;
mod status_cmd;
mod terminal_output;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use prestigebot_channels::{ChannelAdapter, DiscordAdapter};
use prestigebot_commands::{build_default_dispatcher, AppContext};
use prestigebot_config::{load_and_prepare, redact, resolve_config_path, BotConfig, MissingEnvVarError};
use prestigebot_gateway::spawn_keep_alive;

#[derive(Parser)]
#[command(name = "prestigebot")]
#[command(about = "Prestige tracker Discord bot")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./prestigebot.yaml or $PRESTIGEBOT_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Discord and serve slash commands (default)
    Serve,
    /// Show the stored history and keep-alive health
    Status,
    /// Render the current report to a PNG file without connecting to Discord
    Report {
        /// Output image path
        #[arg(short, long, default_value = "prestige_graph.png")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let path = resolve_config_path(cli.config.as_deref());
    let command = cli.command.unwrap_or(Commands::Serve);

    let require_credentials = matches!(command, Commands::Serve);
    let prepared = match load_and_prepare(&path, require_credentials).await {
        Ok(prepared) => prepared,
        Err(e) => {
            report_config_error(&path, &e);
            std::process::exit(1);
        }
    };

    let config = prepared.config;
    let _log_guard = logging::init_logger(config.logging.dir.as_deref().map(Path::new), &config.logging.level);
    for warning in &prepared.warnings {
        warn!(path = %warning.path, "Config warning: {}", warning.message);
    }
    match serde_json::to_value(&config) {
        Ok(value) => debug!(config = %redact(&value), "Effective config"),
        Err(e) => warn!("Could not render config for logging: {}", e),
    }

    let result = match command {
        Commands::Serve => run_bot(config).await,
        Commands::Status => status_cmd::run(&path, &config).await,
        Commands::Report { out } => report_cmd::run(&config, &out).await,
    };

    if let Err(e) = result {
        terminal_output::note_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn report_config_error(path: &Path, e: &anyhow::Error) {
    if let Some(missing) = e.downcast_ref::<MissingEnvVarError>() {
        terminal_output::note_error(&format!(
            "Environment variable {} is not set (needed for {}). Set it or put the value in {}.",
            missing.var_name,
            missing.config_path,
            path.display()
        ));
    } else {
        terminal_output::note_error(&format!("Invalid configuration in {}: {e:#}", path.display()));
    }
}

async fn run_bot(config: BotConfig) -> Result<()> {
    info!(
        store = %config.tracker.store_path,
        ocr = ?config.ocr.provider,
        "Starting prestige bot"
    );

    let _keep_alive = spawn_keep_alive(&config.keep_alive);

    let app = Arc::new(AppContext::from_config(&config)?);
    let dispatcher = Arc::new(build_default_dispatcher(app));

    let token = config
        .discord
        .token
        .clone()
        .context("discord.token is not configured")?;
    let adapter = DiscordAdapter::new(token, dispatcher);
    info!("Registered {} channel adapter", adapter.name());

    adapter.start().await
}
