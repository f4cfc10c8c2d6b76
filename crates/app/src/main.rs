use chrono::Utc;
use clap::{Parser, Subcommand};
use restaurant_finder_core::presentation::listing_views;
use restaurant_finder_core::{
    CatalogRestaurantSource, Event, FilterCriteria, FinderOptions, HttpRestaurantSource, Location,
    RenderInstruction, RestaurantSource, Session, DEFAULT_API_URL,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "restaurant-finder", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Restaurant search endpoint; the postcode is appended as a path segment.
    #[arg(long, env = "RESTAURANT_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Serve searches from a local JSON catalog instead of the HTTP backend.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// HTTP request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Maximum number of restaurants to show.
    #[arg(long, default_value = "10")]
    limit: usize,
}

#[derive(Subcommand)]
enum Command {
    /// Rank restaurants near a postcode.
    Search {
        /// UK postcode, e.g. "EC4M 7RF".
        #[arg(long)]
        postcode: String,
        /// Map center latitude for the postcode.
        #[arg(long, requires = "longitude")]
        latitude: Option<f64>,
        /// Map center longitude for the postcode.
        #[arg(long, requires = "latitude")]
        longitude: Option<f64>,
        /// Maximum distance in miles.
        #[arg(long)]
        distance: Option<f64>,
        /// Cuisine name, or several joined with '|'.
        #[arg(long)]
        cuisine: Option<String>,
        /// Minimum star rating.
        #[arg(long)]
        min_rating: Option<f64>,
        /// Print the selection as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List the cuisines offered near a postcode.
    Cuisines {
        #[arg(long)]
        postcode: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();
    let options = FinderOptions {
        api_url: cli.api_url.clone(),
        result_limit: cli.limit,
        request_timeout: cli.timeout_secs.map(Duration::from_secs),
        ..FinderOptions::default()
    };

    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        "restaurant-finder boot"
    );

    match &cli.catalog {
        Some(path) => {
            let source = CatalogRestaurantSource::from_json_file(path).await?;
            info!(catalog = %path.display(), restaurants = source.len(), "catalog loaded");
            run(Session::new(source, options), cli.command).await
        }
        None => {
            let source = match options.request_timeout {
                Some(timeout) => HttpRestaurantSource::with_timeout(&options.api_url, timeout)?,
                None => HttpRestaurantSource::new(&options.api_url)?,
            };
            run(Session::new(source, options), cli.command).await
        }
    }
}

async fn run<S>(mut session: Session<S>, command: Command) -> anyhow::Result<()>
where
    S: RestaurantSource + Send + Sync,
{
    match command {
        Command::Search {
            postcode,
            latitude,
            longitude,
            distance,
            cuisine,
            min_rating,
            json,
        } => {
            let default_center = session.controller().options().default_center;
            let center = match (latitude, longitude) {
                (Some(latitude), Some(longitude)) => Location::new(latitude, longitude),
                _ => default_center,
            };

            search(&mut session, &postcode, center).await?;

            let criteria = FilterCriteria {
                distance,
                cuisine,
                min_rating,
            };
            if !criteria.normalized().is_empty() {
                let rendered = session.dispatch(Event::FiltersApplied(criteria)).await?;
                if !replaced_listings(&rendered) {
                    warn!("filtered search failed, showing unfiltered results");
                }
            }

            let state = session.state();
            if json {
                println!("{}", serde_json::to_string_pretty(&state.selection)?);
                return Ok(());
            }

            println!(
                "postcode: {} ({} fetched, {} shown)",
                state.last_postcode.as_deref().unwrap_or_default(),
                state.working_set.len(),
                state.selection.len()
            );
            let placeholder = session.controller().options().placeholder_logo.as_str();
            for listing in listing_views(&state.selection, placeholder) {
                println!("[{}] {} {}", listing.index + 1, listing.name, listing.rating_label);
                println!("  {}, {}", listing.address_lines[0], listing.address_lines[1]);
                if !listing.cuisines_label.is_empty() {
                    println!("  cuisines: {}", listing.cuisines_label);
                }
            }
        }
        Command::Cuisines { postcode } => {
            let center = session.controller().options().default_center;
            search(&mut session, &postcode, center).await?;

            for instruction in session.dispatch(Event::FilterPanelOpened).await? {
                if let RenderInstruction::PopulateCuisines(options) = instruction {
                    for option in options {
                        println!("{}\t{}", option.value, option.label);
                    }
                }
            }
        }
    }

    Ok(())
}

async fn search<S>(session: &mut Session<S>, postcode: &str, center: Location) -> anyhow::Result<()>
where
    S: RestaurantSource + Send + Sync,
{
    let rendered = session
        .dispatch(Event::PostcodeSelected {
            place_name: postcode.to_string(),
            center,
        })
        .await?;

    if !replaced_listings(&rendered) {
        anyhow::bail!("restaurant search for {postcode} failed, see logs for details");
    }
    Ok(())
}

fn replaced_listings(rendered: &[RenderInstruction]) -> bool {
    rendered
        .iter()
        .any(|instruction| matches!(instruction, RenderInstruction::ReplaceListings(_)))
}
