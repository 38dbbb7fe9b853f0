mod commands;
mod routes;

use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use coursecal_core::RewriteConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PORT: u16 = 4097;

#[derive(Parser)]
#[command(name = "coursecal")]
#[command(version)]
#[command(about = "Rewrite TimeEdit course calendar feeds into readable, cohort-filtered calendars")]
struct Cli {
    /// Configuration file (defaults to ~/.config/coursecal/config.toml)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short = 'v', long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite a calendar feed once
    Rewrite {
        /// TimeEdit .ics URL (may be percent-encoded)
        url: String,

        /// Write the feed to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Serve rewritten feeds for calendar apps to subscribe to
    Serve {
        /// Listening IP address
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: IpAddr,

        /// Listening port
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Show where the config file lives, or create it
    Config {
        /// Write a config file holding the defaults
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Feeds go to stdout, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("coursecal={0},coursecal_core={0}", cli.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Rewrite { url, output } => {
            let config = RewriteConfig::load(cli.config.as_deref())?;
            commands::rewrite::run(&config, &url, output.as_deref()).await
        }
        Commands::Serve { host, port } => {
            let config = RewriteConfig::load(cli.config.as_deref())?;
            commands::serve::run(config, host, port).await
        }
        Commands::Config { init } => commands::config::run(cli.config.as_deref(), init),
    }
}
