mod commands;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hostcal_core::config::HostcalConfig;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hostcal")]
#[command(about = "Build Airbnb-style hosting calendars and read reservations from calendar feeds")]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a reservation or blocked stay
    Add {
        /// Check-in (e.g. "2025-11-26T14:00", or "2025-11-26" for 14:00)
        #[arg(short, long)]
        start: String,

        /// Check-out (e.g. "2025-11-28T11:00", or "2025-11-28" for 11:00)
        #[arg(short, long)]
        end: String,

        /// "reserved" or "blocked" (prompted when omitted)
        #[arg(long)]
        status: Option<String>,
    },
    /// List current bookings
    List,
    /// Remove the booking at INDEX (as shown by `list`)
    Remove { index: usize },
    /// Write bookings to an .ics file
    Export {
        /// Output file, or "-" for stdout
        #[arg(short, long, default_value = commands::export::DEFAULT_EXPORT_FILE)]
        output: String,
    },
    /// Download a calendar feed and print its guest reservations
    Fetch {
        /// Feed URL (http, https or webcal)
        url: String,

        /// Print reservations as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show configuration paths and settings
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = HostcalConfig::load()?;
    debug!(bookings = %config.bookings_path().display(), "Loaded configuration");

    match cli.command {
        Commands::Add { start, end, status } => {
            commands::add::run(&config, &start, &end, status.as_deref())
        }
        Commands::List => commands::list::run(&config),
        Commands::Remove { index } => commands::remove::run(&config, index),
        Commands::Export { output } => commands::export::run(&config, &output),
        Commands::Fetch { url, json } => commands::fetch::run(&config, &url, json).await,
        Commands::Config => commands::config::run(&config),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "hostcal=debug,hostcal_core=debug"
    } else {
        "hostcal_core=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
