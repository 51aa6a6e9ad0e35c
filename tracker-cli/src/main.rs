//! Tracker CLI
//!
//! Inspects pipeline run records offline: which commit they refer to,
//! which provider driver would post their status, and what would be posted.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tracker")]
#[command(about = "Commit status tracker CLI", long_about = None)]
struct Cli {
    /// Annotation holding the source repository URL
    #[arg(
        long,
        global = true,
        env = "TRACKER_SOURCE_URL_ANNOTATION",
        default_value = tracker_core::config::SOURCE_URL_ANNOTATION
    )]
    source_url_annotation: String,

    /// Annotation holding the source revision
    #[arg(
        long,
        global = true,
        env = "TRACKER_SOURCE_SHA_ANNOTATION",
        default_value = tracker_core::config::SOURCE_SHA_ANNOTATION
    )]
    source_sha_annotation: String,

    /// Extra provider hosts as DOMAIN=DRIVER (e.g. git.corp.example=gitlab)
    #[arg(
        long = "host",
        global = true,
        env = "TRACKER_EXTRA_HOSTS",
        value_delimiter = ',',
        value_parser = config::parse_host_mapping
    )]
    hosts: Vec<(String, tracker_core::Driver)>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tracker=info,tracker_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::new(
        cli.source_url_annotation,
        cli.source_sha_annotation,
        cli.hosts,
        cli.json,
    );
    config.validate()?;

    handle_command(cli.command, &config)
}
