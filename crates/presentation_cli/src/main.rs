//! RailScout CLI
//!
//! Plans train routes between two named cities: direct connections inside
//! the covered region, gateway approximation everywhere else.

#![allow(clippy::print_stdout)]

mod prompt;

use std::io;
use std::sync::Arc;

use anyhow::Context;
use application::ports::{BlacklistPort, CityStorePort, GeocodingPort, TransitPort};
use application::services::{
    ConnectionService, GeoResolver, ReachabilityCheck, RouteApproximator, RouteError, RoutePlan,
    RoutePlanner, schedule,
};
use clap::{Parser, Subcommand};
use domain::value_objects::CityName;
use infrastructure::config::AppConfig;
use infrastructure::persistence::{
    SqliteBlacklistStore, SqliteCityStore, SqliteCompanyStore, create_pool,
};
use infrastructure::{GeocodingAdapter, TransitAdapter, seed_database};
use integration_transit::{NominatimGeocodingClient, OpendataTransitClient};
use tracing::info;

/// RailScout CLI
#[derive(Parser)]
#[command(name = "railscout")]
#[command(author, version, about = "Train route helper for cross-Europe trips", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a route between two cities
    ///
    /// City names omitted on the command line are prompted for
    /// interactively, with up to three attempts each.
    Route {
        /// Start city
        from: Option<String>,

        /// Destination city
        to: Option<String>,
    },

    /// Populate the database with seed cities and train companies
    Seed,

    /// Check how many stored cities are directly reachable from an origin
    Check {
        /// Origin city
        #[arg(short, long, default_value = "Zurich")]
        from: String,

        /// Minimum number of reachable cities expected
        #[arg(short, long, default_value_t = 30)]
        min_required: usize,
    },
}

/// Everything the subcommands need, wired once at startup
struct Services {
    city_store: Arc<dyn CityStorePort>,
    transit: Arc<dyn TransitPort>,
    resolver: GeoResolver,
    planner: RoutePlanner,
    companies: SqliteCompanyStore,
}

fn build_services(config: &AppConfig) -> anyhow::Result<Services> {
    let pool = Arc::new(create_pool(&config.database).context("opening database")?);

    let city_store: Arc<dyn CityStorePort> = Arc::new(SqliteCityStore::new(Arc::clone(&pool)));
    let blacklist: Arc<dyn BlacklistPort> = Arc::new(SqliteBlacklistStore::new(Arc::clone(&pool)));
    let companies = SqliteCompanyStore::new(Arc::clone(&pool));

    let transit_client =
        OpendataTransitClient::new(&config.transit).context("building transit client")?;
    let geocoding_client =
        NominatimGeocodingClient::new(&config.geocoding).context("building geocoding client")?;

    let transit: Arc<dyn TransitPort> = Arc::new(TransitAdapter::new(transit_client));
    let geocoder: Arc<dyn GeocodingPort> = Arc::new(GeocodingAdapter::new(geocoding_client));

    let coverage = config.routing.coverage_set();
    let resolver = GeoResolver::new(
        Arc::clone(&city_store),
        Arc::clone(&transit),
        geocoder,
        coverage.clone(),
    );
    let connections = ConnectionService::new(Arc::clone(&transit), blacklist);
    let approximator = RouteApproximator::new(Arc::clone(&city_store));

    let planner = RoutePlanner::new(
        resolver.clone(),
        connections,
        approximator,
        Arc::new(companies.clone()),
        coverage,
        config.routing.destination_hints.clone(),
    );

    Ok(Services {
        city_store,
        transit,
        resolver,
        planner,
        companies,
    })
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = AppConfig::load().context("loading configuration")?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    let services = build_services(&config)?;

    match cli.command {
        Commands::Route { from, to } => run_route(&services, from, to).await,
        Commands::Seed => run_seed(&services).await,
        Commands::Check { from, min_required } => {
            run_check(&services, &from, min_required).await
        },
    }
}

/// Take a city from the arguments, or prompt for one
fn city_argument(provided: Option<String>, prompt_text: &str) -> anyhow::Result<Option<CityName>> {
    provided.map_or_else(
        || {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut output = io::stdout();
            prompt::read_city_name(&mut input, &mut output, prompt_text).map_err(Into::into)
        },
        |raw| match CityName::parse(&raw) {
            Ok(name) => Ok(Some(name)),
            Err(e) => {
                println!("{e}");
                Ok(None)
            },
        },
    )
}

async fn run_route(
    services: &Services,
    from: Option<String>,
    to: Option<String>,
) -> anyhow::Result<()> {
    println!("Enter the city names of your planned journey.");

    let Some(from) = city_argument(from, "Enter the start city: ")? else {
        return Ok(());
    };
    let Some(to) = city_argument(to, "Enter the final city: ")? else {
        return Ok(());
    };

    info!(%from, %to, "User query");

    match services.planner.plan(&from, &to).await {
        Ok(RoutePlan::Direct {
            from,
            to,
            connections,
        }) => {
            if connections.is_empty() {
                println!("Could not fetch connections from {from} to {to}.");
            } else {
                println!("\nConnections from {from} to {to}:");
                println!("{}", schedule::format_schedule(&connections));
            }
        },
        Ok(RoutePlan::Approximated {
            from,
            to,
            gateway,
            coverage_percent,
            destination_country,
            operator_url,
        }) => {
            println!("\nConnections from {from} to {to}:");
            match operator_url {
                Some(url) => println!("Train company for {destination_country}: {url}"),
                None => {
                    println!("Train company information not found for {destination_country}.");
                },
            }
            println!(
                "Nearest city within line of sight: {} ({})",
                gateway.name,
                gateway.label()
            );
            if let Some(covered) = coverage_percent {
                println!(
                    "Percentage of trip covered to {}: {covered:.2}%",
                    gateway.name
                );
            }
        },
        Err(
            e @ (RouteError::CountryUnresolved
            | RouteError::CoordinatesUnresolved
            | RouteError::NoGatewayFound),
        ) => {
            // Clean terminal states, not process failures
            println!("{e}");
        },
        Err(RouteError::Application(e)) => return Err(e.into()),
    }

    Ok(())
}

async fn run_seed(services: &Services) -> anyhow::Result<()> {
    println!("Initializing database...");
    let summary = seed_database(&services.resolver, &services.companies).await;
    println!(
        "Database initialization complete: {} cities stored ({} unresolved), {} company entries.",
        summary.cities_resolved, summary.cities_failed, summary.company_variants
    );
    Ok(())
}

async fn run_check(services: &Services, from: &str, min_required: usize) -> anyhow::Result<()> {
    let check = ReachabilityCheck::new(
        Arc::clone(&services.city_store),
        Arc::clone(&services.transit),
    );
    let reachable = check.count_reachable(from, min_required).await?;

    println!("Total reachable cities from {from}: {reachable}");
    if reachable < min_required {
        println!(
            "Less than {min_required} cities are reachable. Consider adding more key stations."
        );
    } else {
        println!("At least {min_required} cities are reachable.");
    }
    Ok(())
}
