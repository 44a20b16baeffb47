//! Model Registry CLI
//!
//! Syncs the OpenRouter model catalog and answers alias and capability
//! questions against the configured providers.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use modelreg_registry::{Config, ProviderType};
use std::path::PathBuf;
use tracing::Level;

mod commands;

#[derive(Parser)]
#[command(name = "modelreg")]
#[command(about = "Curated LLM model registry: catalog sync, alias resolution and capabilities")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML configuration file (environment variables still override it)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the OpenRouter catalog and regenerate the model config
    Sync {
        /// Output path for the generated config
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
        /// Keep curated aliases and intelligence scores from the existing config
        #[arg(long)]
        keep_aliases: bool,
        /// Add OpenRouter frontier models even when the API does not list them
        #[arg(long)]
        include_frontier: bool,
    },
    /// Resolve a model name or alias to its canonical model
    Resolve {
        /// Model name or alias
        name: String,
        #[command(flatten)]
        target: ProviderArgs,
    },
    /// Print the capability descriptor of a model as JSON
    Capabilities {
        /// Model name or alias
        name: String,
        #[command(flatten)]
        target: ProviderArgs,
    },
    /// List canonical models, highest intelligence score first
    List {
        #[command(flatten)]
        target: ProviderArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProviderArgs {
    /// Only consult this provider (xai, openrouter)
    #[arg(short, long)]
    pub provider: Option<ProviderType>,
    /// OpenRouter model config to load instead of the configured one
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,
}

fn init_tracing(config: &Config, verbose: bool) {
    let level = if verbose {
        Level::DEBUG
    } else {
        config.logging.level.parse().unwrap_or(Level::INFO)
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    init_tracing(&config, cli.verbose);

    match cli.command {
        Commands::Sync {
            output,
            keep_aliases,
            include_frontier,
        } => commands::sync::run(config, output, keep_aliases, include_frontier).await,
        Commands::Resolve { name, target } => commands::resolve::run(&config, &name, &target),
        Commands::Capabilities { name, target } => {
            commands::capabilities::run(&config, &name, &target)
        }
        Commands::List { target } => commands::list::run(&config, &target),
    }
}
