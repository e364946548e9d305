//! catalog - command line client for the catalog containers API
//!
//! Browses containers, manages followers, and inspects profiler output,
//! sample data and custom metrics over the REST API.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use catalog_cli::cli::{
    ContainerCommands, CustomMetricCommands, FollowerCommands, OutputFormat, ProfilerCommands,
    SampleDataCommands,
};
use catalog_cli::config::{self, CatalogConfig, ConfigOverrides};
use catalog_cli::ReqwestTransport;
use catalog_shared::ContainerClient;

#[derive(Parser, Debug)]
#[command(name = "catalog")]
#[command(author = "Catalog Team")]
#[command(version)]
#[command(about = "Command line client for the catalog containers API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog API URL (e.g. http://localhost:8585/api/v1)
    #[arg(long, env = "CATALOG_URL", global = true)]
    url: Option<String>,

    /// Path to the config file (defaults to ~/.catalog/config.toml)
    #[arg(long, env = "CATALOG_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, env = "CATALOG_TIMEOUT", global = true)]
    timeout: Option<u64>,

    /// Bearer token for the catalog API
    #[arg(long, env = "CATALOG_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Browse and edit containers
    Containers {
        #[command(subcommand)]
        command: ContainerCommands,
    },

    /// Manage container followers
    Followers {
        #[command(subcommand)]
        command: FollowerCommands,
    },

    /// Profiler config and profiles
    Profiler {
        #[command(subcommand)]
        command: ProfilerCommands,
    },

    /// Sample rows
    SampleData {
        #[command(subcommand)]
        command: SampleDataCommands,
    },

    /// Custom metrics
    CustomMetric {
        #[command(subcommand)]
        command: CustomMetricCommands,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let file = config::load_file(cli.config.as_deref())?;
    let config = CatalogConfig::resolve(
        file,
        ConfigOverrides {
            server_url: cli.url.clone(),
            timeout_secs: cli.timeout,
            token: cli.token.clone(),
        },
    );
    debug!("Using catalog API at {}", config.server_url);

    let client = ContainerClient::new(ReqwestTransport::from_config(&config)?);
    let format = cli.format;

    match cli.command {
        Commands::Containers { command } => command.execute(&client, format).await?,
        Commands::Followers { command } => command.execute(&client, format).await?,
        Commands::Profiler { command } => command.execute(&client, format).await?,
        Commands::SampleData { command } => command.execute(&client, format).await?,
        Commands::CustomMetric { command } => command.execute(&client, format).await?,
        Commands::Version => {
            println!("catalog {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
