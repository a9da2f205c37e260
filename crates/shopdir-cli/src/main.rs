mod distance;
mod nearby;
mod search;
mod source;
mod status;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use shopdir_core::TimeContext;
use tracing_subscriber::EnvFilter;

use crate::nearby::NearbyOptions;
use crate::source::ShopSource;

#[derive(Debug, Parser)]
#[command(name = "shopdir")]
#[command(about = "Local shop directory: nearby search and opening hours")]
struct Cli {
    /// Read shops from a local JSON or YAML catalog instead of the shop API
    #[arg(long, global = true, value_name = "PATH")]
    shops_file: Option<PathBuf>,

    /// Time zone for opening-hours status: `local`, `utc`, or `+HH:MM`
    #[arg(long, global = true, value_name = "TZ")]
    tz: Option<TimeContext>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List shops near a point, nearest first
    Nearby {
        /// Latitude of the search point
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Longitude of the search point
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        /// Search radius in kilometres (defaults to SHOPDIR_DEFAULT_RADIUS_KM)
        #[arg(long, allow_negative_numbers = true)]
        radius_km: Option<f64>,
        /// Only shops whose category matches (e.g., cafe)
        #[arg(long)]
        category: Option<String>,
        /// Ignore the radius and list every located shop
        #[arg(long)]
        unbounded: bool,
        /// Maximum number of shops to show (defaults to SHOPDIR_NEARBY_LIMIT)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show whether shops are open
    Status {
        /// Shop id; every shop when omitted
        #[arg(long)]
        shop: Option<String>,
        /// Evaluate at this RFC 3339 instant instead of now
        #[arg(long, value_parser = parse_instant)]
        at: Option<DateTime<Utc>>,
    },
    /// Show a shop's weekly opening hours
    Hours {
        /// Shop id
        #[arg(long)]
        shop: String,
    },
    /// Great-circle distance between two points
    Distance {
        #[arg(long, allow_negative_numbers = true)]
        from_lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        from_lng: f64,
        #[arg(long, allow_negative_numbers = true)]
        to_lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        to_lng: f64,
    },
    /// Search shops by name, description or address
    Search {
        /// Text to look for; empty matches every shop
        query: String,
        /// Only show shops marked as approved
        #[arg(long)]
        approved_only: bool,
    },
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp (e.g. 2024-01-01T10:00:00Z): {e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = shopdir_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let ctx = cli.tz.unwrap_or(config.timezone);
    let now = Utc::now();

    let open_source = || ShopSource::from_args(cli.shops_file.as_deref(), &config);

    match cli.command {
        Commands::Nearby {
            lat,
            lng,
            radius_km,
            category,
            unbounded,
            limit,
        } => {
            let options = NearbyOptions {
                lat,
                lng,
                radius_km: radius_km.unwrap_or(config.default_radius_km),
                category,
                unbounded,
                limit: limit.unwrap_or(config.nearby_limit),
            };
            nearby::run_nearby_command(&open_source()?, &options, now, ctx).await?;
        }
        Commands::Status { shop, at } => {
            status::run_status(&open_source()?, shop.as_deref(), at.unwrap_or(now), ctx).await?;
        }
        Commands::Hours { shop } => status::run_hours(&open_source()?, &shop, now, ctx).await?,
        Commands::Distance {
            from_lat,
            from_lng,
            to_lat,
            to_lng,
        } => distance::run_distance(from_lat, from_lng, to_lat, to_lng)?,
        Commands::Search {
            query,
            approved_only,
        } => search::run_search(&open_source()?, &query, approved_only).await?,
    }

    Ok(())
}
