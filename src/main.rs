use clap::{Parser, Subcommand};
use tracing::error;

mod cli;
mod config;
mod core;
mod error;
mod utils;

use cli::{clean, cloud, interactive};
use config::Config;
use error::{LyricloudError, Result};

#[derive(Parser)]
#[command(name = "lyricloud")]
#[command(about = "Fetch song lyrics, clean them up and turn them into a word cloud")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file path (optional)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch lyrics for one song and render its word cloud
    Cloud(cloud::CloudArgs),

    /// Prompt for song titles until an empty line or `quit`
    Interactive(interactive::InteractiveArgs),

    /// Strip section tags and blank lines from lyrics text
    Clean(clean::CleanArgs),

    /// Show configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    utils::logging::init_logging(cli.verbose).map_err(LyricloudError::Internal)?;

    let config = Config::load(cli.config.as_deref()).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    match cli.command {
        Commands::Cloud(args) => cloud::execute(args, &config).await,
        Commands::Interactive(args) => interactive::execute(args, &config).await,
        Commands::Config(args) => cli::config::execute(args, &config).await,
        Commands::Clean(args) => clean::execute(args).await,
    }
}
