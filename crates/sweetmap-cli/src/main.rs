mod discover;
mod rules;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sweetmap")]
#[command(about = "Discover dessert venues near a point")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search nearby venues for each keyword and print the ranked list
    Discover {
        /// Latitude of the search center
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Longitude of the search center
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        /// Search radius in meters (defaults to `SWEETMAP_DEFAULT_RADIUS_METERS`)
        #[arg(long)]
        radius: Option<u32>,
        /// Search keyword; repeat for several (defaults to `SWEETMAP_DEFAULT_KEYWORDS`)
        #[arg(long = "keyword", short = 'k')]
        keywords: Vec<String>,
        /// Print `{venues, partial_failures}` as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Load and validate an exclusion rules file
    Rules {
        /// Rules file to check
        #[arg(
            long,
            env = "SWEETMAP_EXCLUSIONS_PATH",
            default_value = "./config/exclusions.yaml"
        )]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Discover {
            lat,
            lng,
            radius,
            keywords,
            json,
        } => {
            let config = sweetmap_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            discover::run_discover(
                &config,
                &discover::DiscoverArgs {
                    lat,
                    lng,
                    radius,
                    keywords,
                    json,
                },
            )
            .await
        }
        Commands::Rules { path } => {
            init_tracing("info")?;
            rules::run_rules(&path)
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `fallback`.
fn init_tracing(fallback: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
