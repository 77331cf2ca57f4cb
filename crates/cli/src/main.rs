//! # quake-cli
//!
//! Command-line tools for the quake forecast crates: training-label
//! generation, feature inspection and offline scoring.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{Datelike, Utc};
use clap::{Parser, Subcommand};
use quake_facade::{
    compute_features, country_forecast, generate_samples, regional_forecast, sort_chronologically,
    BoundingBox, CountryProfile, Event, EventSource, FeatureCollection, LabelingConfig,
    RegionalProfile, ServiceConfig, TrainingRow, TreeEnsemble, UsgsClient,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "quake")]
#[command(about = "Earthquake magnitude forecasting CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a training CSV from a historical catalog
    Samples {
        /// Catalog file (GeoJSON or CSV); fetched from USGS when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// First calendar year to fetch
        #[arg(long, default_value = "1998")]
        start_year: i32,

        /// Last calendar year to fetch (default: current year)
        #[arg(long)]
        end_year: Option<i32>,

        /// Catalog magnitude floor
        #[arg(long, default_value = "4.0")]
        min_magnitude: f64,

        /// Query the whole globe instead of the Asia box
        #[arg(long)]
        global: bool,

        /// Pause between yearly requests in milliseconds
        #[arg(long, default_value = "1000")]
        pause_ms: u64,

        /// Trailing feature window in days
        #[arg(long, default_value = "30")]
        past_days: i64,

        /// Forward label window in days
        #[arg(long, default_value = "7")]
        future_days: i64,

        /// Minimum trailing events per sample
        #[arg(long, default_value = "10")]
        min_past: usize,
    },

    /// Print the feature vector of the current regional window
    Features {
        /// Catalog file (GeoJSON or CSV); fetched from USGS when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Reference time in ms since the epoch (default: now)
        #[arg(long)]
        reference_ms: Option<i64>,
    },

    /// Score a catalog with a model artifact
    Predict {
        /// Model artifact (JSON tree ensemble)
        #[arg(short, long)]
        model: PathBuf,

        /// Catalog file (GeoJSON or CSV); fetched from USGS when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Forecast for one country instead of the region
        #[arg(short, long)]
        country: Option<String>,

        /// Reference time in ms since the epoch (default: now)
        #[arg(long)]
        reference_ms: Option<i64>,

        /// Output file (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start the REST API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

/// Load events from a CSV file with `Event` columns
fn load_csv_events(path: &Path) -> CliResult<Vec<Event>> {
    let file = File::open(path).map_err(|e| format!("Failed to open file: {}", e))?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    reader
        .deserialize()
        .map(|record| record.map_err(|e| format!("Failed to read record: {}", e)))
        .collect()
}

/// Load events from a GeoJSON FeatureCollection
fn load_geojson_events(path: &Path) -> CliResult<Vec<Event>> {
    let file = File::open(path).map_err(|e| format!("Failed to open file: {}", e))?;
    let collection: FeatureCollection = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| format!("Failed to parse GeoJSON: {}", e))?;
    Ok(collection.events())
}

/// Load and sort a catalog file
fn load_events(path: &Path) -> CliResult<Vec<Event>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut events = match ext.as_str() {
        "csv" => load_csv_events(path)?,
        _ => load_geojson_events(path)?,
    };
    if events.is_empty() {
        return Err(format!("No events found in {:?}", path));
    }

    sort_chronologically(&mut events);
    println!(
        "Loaded {} events from {:?}",
        events.len(),
        path.file_name().unwrap_or_default()
    );
    Ok(events)
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().map_err(|e| format!("Failed to start runtime: {}", e))
}

fn catalog_client() -> CliResult<UsgsClient> {
    let config = ServiceConfig::from_env().map_err(|e| e.to_string())?;
    UsgsClient::with_base_url(
        config.usgs_api_url,
        Duration::from_secs(config.http_timeout_secs),
    )
    .map_err(|e| e.to_string())
}

/// Events for a live query, from a file when one is given
fn current_events(input: Option<&Path>, query: quake_facade::EventQuery) -> CliResult<Vec<Event>> {
    if let Some(path) = input {
        return load_events(path);
    }

    let client = catalog_client()?;
    let mut events = runtime()?
        .block_on(client.fetch_events(&query))
        .map_err(|e| e.to_string())?;
    sort_chronologically(&mut events);
    println!("Fetched {} events from {}", events.len(), client.base_url());
    Ok(events)
}

fn write_json(value: &serde_json::Value, output: Option<&PathBuf>) -> CliResult<()> {
    let pretty =
        serde_json::to_string_pretty(value).map_err(|e| format!("Failed to encode JSON: {}", e))?;

    if let Some(path) = output {
        std::fs::write(path, pretty).map_err(|e| format!("Failed to write output: {}", e))?;
        println!("Results written to {:?}", path);
    } else {
        println!("{}", pretty);
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_samples(
    input: Option<PathBuf>,
    output: PathBuf,
    start_year: i32,
    end_year: Option<i32>,
    min_magnitude: f64,
    global: bool,
    pause_ms: u64,
    config: LabelingConfig,
) -> CliResult<()> {
    let events = match input {
        Some(path) => load_events(&path)?,
        None => {
            let end_year = end_year.unwrap_or_else(|| Utc::now().year());
            let bbox = (!global).then_some(BoundingBox::ASIA);
            println!("Fetching catalog {}..={} (M>={})", start_year, end_year, min_magnitude);

            let client = catalog_client()?;
            runtime()?
                .block_on(client.fetch_history(
                    start_year,
                    end_year,
                    min_magnitude,
                    bbox,
                    Duration::from_millis(pause_ms),
                ))
                .map_err(|e| e.to_string())?
        }
    };

    let set = generate_samples(&events, &config).map_err(|e| e.to_string())?;

    let mut writer =
        csv::Writer::from_path(&output).map_err(|e| format!("Failed to create output: {}", e))?;
    for sample in &set.samples {
        writer
            .serialize(TrainingRow::from(sample))
            .map_err(|e| format!("Failed to write CSV: {}", e))?;
    }
    writer
        .flush()
        .map_err(|e| format!("Failed to write CSV: {}", e))?;

    println!("Events scanned:     {}", set.summary.events_scanned);
    println!("Samples written:    {}", set.summary.samples);
    println!("Skipped (sparse):   {}", set.summary.sparse_past);
    println!("Skipped (no label): {}", set.summary.empty_future);
    println!("Samples written to {:?}", output);

    Ok(())
}

fn run_features(input: Option<PathBuf>, reference_ms: Option<i64>) -> CliResult<()> {
    let profile = RegionalProfile::default();
    let now = Utc::now();
    let events = current_events(input.as_deref(), profile.query(now))?;

    let reference = reference_ms.unwrap_or_else(|| now.timestamp_millis());
    let features =
        compute_features(&events, reference, profile.min_events).map_err(|e| e.to_string())?;

    let json = serde_json::to_value(features).map_err(|e| e.to_string())?;
    write_json(&json, None)
}

fn run_predict(
    model: PathBuf,
    input: Option<PathBuf>,
    country: Option<String>,
    reference_ms: Option<i64>,
    output: Option<PathBuf>,
) -> CliResult<()> {
    let model = TreeEnsemble::from_path(&model).map_err(|e| e.to_string())?;
    let now = Utc::now();
    let reference = reference_ms.unwrap_or_else(|| now.timestamp_millis());

    let json = match country {
        Some(country) => {
            let profile = CountryProfile::default();
            let events = current_events(input.as_deref(), profile.query(now))?;
            let forecast = country_forecast(&events, &country, reference, &model, &profile)
                .map_err(|e| format!("{} ({})", e, country))?;
            serde_json::to_value(forecast)
        }
        None => {
            let profile = RegionalProfile::default();
            let events = current_events(input.as_deref(), profile.query(now))?;
            let forecast =
                regional_forecast(&events, reference, &model, &profile).map_err(|e| e.to_string())?;
            serde_json::to_value(forecast)
        }
    }
    .map_err(|e| e.to_string())?;

    write_json(&json, output.as_ref())
}

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quake_core=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Samples {
            input,
            output,
            start_year,
            end_year,
            min_magnitude,
            global,
            pause_ms,
            past_days,
            future_days,
            min_past,
        } => run_samples(
            input,
            output,
            start_year,
            end_year,
            min_magnitude,
            global,
            pause_ms,
            LabelingConfig {
                past_window_days: past_days,
                future_window_days: future_days,
                min_past_events: min_past,
            },
        ),

        Commands::Features {
            input,
            reference_ms,
        } => run_features(input, reference_ms),

        Commands::Predict {
            model,
            input,
            country,
            reference_ms,
            output,
        } => run_predict(model, input, country, reference_ms, output),

        Commands::Serve { port, host } => {
            println!("Starting server on {}:{}", host, port);
            println!("Use the quake-server binary (HOST={} PORT={}) to serve the API", host, port);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
