use anyhow::Result;
use clap::{Parser, Subcommand};

/// receptterkep - regional recipe map service
#[derive(Parser)]
#[command(name = "receptterkep")]
#[command(about = "Filter and aggregate geotagged recipes", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = receptterkep::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    receptterkep::observability::init_observability(
        "receptterkep",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => serve_command(config, host, port).await,
        Commands::Migrate => receptterkep::migrate::migrate(&config).await,
        Commands::Reset => receptterkep::migrate::reset(&config).await,
    }
}

#[tracing::instrument(skip(config))]
async fn serve_command(
    config: receptterkep::Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    receptterkep::server::serve(config, host_override, port_override).await
}
