//! Manual-verification entry point: run the price lookup core against
//! literal coordinates and print the structured result as JSON.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mandi_core::AppConfig;
use mandi_geo::{GeoPoint, LocationResolver, ReverseGeocoder};
use mandi_retrieval::{prices_for_location, select_latest, EngineConfig, RetrievalEngine};
use mandi_scraper::AgmarknetClient;

#[derive(Debug, Parser)]
#[command(name = "mandi")]
#[command(about = "Location-based commodity price lookup")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up the latest price for one commodity at a coordinate.
    Price {
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lon: f64,
        #[arg(long)]
        commodity: String,
        /// Narrow the latest-price pick to one variety.
        #[arg(long)]
        variety: Option<String>,
    },
    /// Look up several commodities in one run.
    Prices {
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lon: f64,
        /// Comma-separated commodity names; defaults to Rice,Wheat.
        #[arg(long, value_delimiter = ',')]
        commodities: Vec<String>,
    },
    /// Show how a coordinate resolves to (state, district, markets).
    Resolve {
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lon: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = mandi_core::load_app_config_from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let resolver = build_resolver(&config)?;

    match cli.command {
        Commands::Price {
            lat,
            lon,
            commodity,
            variety,
        } => {
            let engine = build_engine(&config);
            let mut result = engine
                .price_for_location(&resolver, GeoPoint::new(lat, lon), &commodity)
                .await;
            if let Some(variety) = variety {
                result.latest = select_latest(&result.records, Some(&variety));
                if result.latest.is_none() && !result.records.is_empty() {
                    tracing::warn!(%variety, "no record matches the requested variety");
                }
            }
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Prices {
            lat,
            lon,
            commodities,
        } => {
            let engine = build_engine(&config);
            let results = prices_for_location(
                &engine,
                &resolver,
                GeoPoint::new(lat, lon),
                &commodities,
                config.max_concurrent_commodities,
            )
            .await;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Commands::Resolve { lat, lon } => {
            let resolved = resolver.resolve(GeoPoint::new(lat, lon)).await;
            println!("{}", serde_json::to_string_pretty(&resolved)?);
        }
    }

    Ok(())
}

fn build_resolver(config: &AppConfig) -> anyhow::Result<LocationResolver> {
    let mut resolver = LocationResolver::from_files(&config.districts_path, &config.markets_path);
    if let Some(base_url) = &config.geocoder_base_url {
        let geocoder = ReverseGeocoder::new(
            base_url,
            config.scraper_request_timeout_secs,
            &config.scraper_user_agent,
        )?;
        resolver = resolver.with_geocoder(geocoder);
    }
    Ok(resolver)
}

fn build_engine(config: &AppConfig) -> RetrievalEngine<AgmarknetClient> {
    let client = AgmarknetClient::new(
        &config.portal_base_url,
        config.scraper_request_timeout_secs,
        config.scraper_wait_timeout_secs,
        &config.scraper_user_agent,
        config.scraper_submit_retries,
    );
    RetrievalEngine::with_config(
        client,
        EngineConfig {
            window_days: config.price_window_days,
            ..EngineConfig::default()
        },
    )
}
