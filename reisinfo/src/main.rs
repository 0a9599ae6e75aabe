use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use reisinfo::api::{ClientConfig, NsClient};
use reisinfo::config::Settings;
use reisinfo::delays::DelayReporter;
use reisinfo::stations::{DEFAULT_SNAPSHOT_PATH, StationStore};

#[derive(Parser)]
#[command(author, version, about = "NS travel information from the command line")]
struct Cli {
    /// Where the station snapshot is stored
    #[arg(long, global = true, default_value = DEFAULT_SNAPSHOT_PATH)]
    stations_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the departure board of a station
    Departures {
        /// Station to get departure information of
        #[arg(long, default_value = "UT")]
        station: String,
    },
    /// Fetch all stations and store them locally
    Stations,
    /// Count active disruptions per type
    Disruptions,
    /// Show the next delay per route from an origin
    Delay {
        /// Origin of the route
        #[arg(long, default_value = "UT")]
        origin: String,
        /// Destination of the route
        #[arg(long, default_value = "LEDN")]
        destination: String,
        /// Only print the delay of the next departure, in seconds
        #[arg(long)]
        short: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the environment may already be set.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Fail fast on a bad key, before any request is made
    let settings = Settings::from_env().context("invalid configuration")?;
    let client = NsClient::new(ClientConfig::from_settings(&settings))
        .context("failed to create NS client")?;
    let store = StationStore::new(cli.stations_file);

    match cli.command {
        Commands::Departures { station } => {
            let reporter = DelayReporter::new(client, store);
            for departure in reporter.departure_info(&station).await? {
                println!("{departure}");
            }
        }
        Commands::Stations => {
            let directory = store.refresh(&client).await?;
            println!(
                "Stored {} stations in {}",
                directory.len(),
                store.path().display()
            );
        }
        Commands::Disruptions => {
            let disruptions = client.disruptions().await?;
            for (kind, count) in disruptions.counts() {
                println!("{kind}: {count}");
            }
        }
        Commands::Delay {
            origin,
            destination,
            short,
        } => {
            let reporter = DelayReporter::new(client, store);
            let delays = reporter.delay_info(&origin, Some(&destination)).await?;

            if short {
                let Some(next) = delays.first() else {
                    bail!("no departures from {origin} to {destination}");
                };
                println!("{}", next.delay_seconds());
                return Ok(());
            }

            for delay in &delays {
                println!("{delay}");
            }
        }
    }

    Ok(())
}
