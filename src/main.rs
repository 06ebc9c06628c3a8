use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{QueryParams, ServeParams};

#[derive(Parser)]
#[command(
    name = "trendwire",
    version,
    about = "Serve Google Trends interest-over-time as a simple JSON time series",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the config file
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Disable CORS headers
        #[arg(long, default_value = "false")]
        no_cors: bool,
    },

    /// Fetch one series and print the JSON payload
    Query {
        /// Search keyword
        #[arg(short, long)]
        keyword: Option<String>,

        /// Timeframe expression, e.g. "now 7-d" or "today 3-m"
        #[arg(short, long)]
        timeframe: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = commands::load_config(cli.config.as_deref())?;
    if let Some(format) = cli.log_format {
        config.logging.format = format;
        config.validate()?;
    }

    setup_tracing(&config.logging.format, &config.logging.level, cli.verbose)?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            no_cors,
        } => {
            tracing::info!(
                host = ?host,
                port = ?port,
                no_cors = %no_cors,
                "Starting serve command"
            );
            commands::serve(
                config,
                ServeParams {
                    host,
                    port,
                    enable_cors: !no_cors,
                },
            )
            .await?;
        }

        Commands::Query { keyword, timeframe } => {
            tracing::debug!(keyword = ?keyword, timeframe = ?timeframe, "Starting query command");
            commands::query(config, QueryParams { keyword, timeframe }).await?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("trendwire=debug,tower_http=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new(format!("trendwire={level},warn"))
        })
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
