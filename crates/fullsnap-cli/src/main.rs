use std::fs::{self, File};
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fullsnap_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "fullsnap")]
#[command(author, version, about = "Full-viewport page snapping in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the paged terminal view
    Run {
        /// Number of pages (overrides ui.page_count)
        #[arg(short = 'p', long)]
        pages: Option<usize>,
        /// Jump to this page through the page handle after startup
        #[arg(short = 'g', long)]
        goto: Option<i64>,
        /// Delay before the --goto jump, in milliseconds
        #[arg(long, default_value_t = 1000)]
        delay_ms: u64,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Print the configuration file path
    Path,
}

fn env_filter(config: &AppConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.general.log_level))
}

/// The terminal UI owns stdout, so its logs go to a file
fn init_file_logging(config: &AppConfig) -> Result<()> {
    fs::create_dir_all(config.data_dir())?;
    let file = File::create(config.log_path())?;
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Arc::new(file)),
        )
        .init();
    Ok(())
}

fn init_stderr_logging(config: &AppConfig) {
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    match cli.command {
        Some(Commands::Run {
            pages,
            goto,
            delay_ms,
        }) => {
            init_file_logging(&config)?;
            let options = commands::run::RunOptions {
                pages,
                goto,
                delay_ms,
            };
            commands::run::run(config, options).await
        }
        None => {
            init_file_logging(&config)?;
            commands::run::run(config, commands::run::RunOptions::default()).await
        }
        Some(Commands::Config { action }) => {
            init_stderr_logging(&config);
            match action {
                ConfigAction::Show => commands::config::show(&config),
                ConfigAction::Init { force } => commands::config::init(force),
                ConfigAction::Path => commands::config::path(),
            }
        }
    }
}
