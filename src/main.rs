mod cli;

use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};

use cli::{Cli, Command};
use common::types::dataset::Dataset;
use common::types::errors::DatasetError;
use common::util::logging;
use engine::errors::QueryError;
use engine::TimeSurface;

#[tokio::main]
async fn main() {
    let _ = run()
        .await
        .inspect_err(|err| error!(target: "main", "{}", err));
}

async fn run() -> Result<(), ReachmapError> {
    let cli = Cli::parse();

    logging::init(cli.log_level.clone().into());

    match cli.command {
        Command::Query { query, output } => {
            let dataset = load_dataset(&cli.dataset_file)?;
            let config = query.config();

            let times = logging::run_with_spinner_async("query", "Computing travel times", || {
                engine::travel_times(&dataset, query.origin(), &config)
            })
            .await;

            let geojson = engine::to_geojson(&times, &config);
            fs::write(&output, serde_json::to_string(&geojson)?)?;
            info!(target: "main", "Wrote {} features to {}", times.stops.len(), output.display());
        }
        Command::Isochrone { query, span_deg, step_deg, thresholds_mins, output } => {
            let dataset = load_dataset(&cli.dataset_file)?;
            let config = query.config();

            let times = logging::run_with_spinner_async("query", "Computing travel times", || {
                engine::travel_times(&dataset, query.origin(), &config)
            })
            .await;

            let bounds = query.bounds(span_deg, step_deg);
            let thresholds: Vec<chrono::Duration> =
                thresholds_mins.iter().map(|mins| chrono::Duration::minutes(*mins)).collect();

            let bands = logging::run_with_spinner("isochrone", "Scanning grid", || {
                let surface = TimeSurface::build(&times);
                let index = surface.index()?;
                engine::classify(&index, &bounds, &thresholds, &config)
            })?;

            fs::write(&output, serde_json::to_string(&bands)?)?;
            info!(target: "main", "Wrote {} bands to {}", bands.len(), output.display());
        }
        Command::Serve { address } => {
            let dataset = Arc::new(load_dataset(&cli.dataset_file)?);
            let (listener, app) = server::build(Some(dataset), &address).await?;
            server::serve(listener, app).await?;
        }
    }

    Ok(())
}

fn load_dataset(path: &Path) -> Result<Dataset, ReachmapError> {
    let dataset = logging::run_with_spinner("dataset", "Loading dataset", || Dataset::load(path))?;
    info!(target: "dataset",
        "Loaded {} routes, {} stops",
        dataset.routes.len(), dataset.stops.len()
    );
    Ok(dataset)
}

#[derive(thiserror::Error, Debug)]
pub enum ReachmapError {
    Dataset(#[from] DatasetError),
    Query(#[from] QueryError),
    Json(#[from] serde_json::Error),
    IO(#[from] std::io::Error),
    Server(#[from] server::ServerError),
}

impl Display for ReachmapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let err: &dyn Display = match self {
            ReachmapError::Dataset(err) => err,
            ReachmapError::Query(err) => err,
            ReachmapError::Json(err) => err,
            ReachmapError::IO(err) => err,
            ReachmapError::Server(err) => err,
        };
        let prefix = match self {
            ReachmapError::Dataset(_) => "Loading dataset",
            ReachmapError::Query(_) => "Running query",
            ReachmapError::Json(_) => "Serializing output",
            ReachmapError::IO(_) => "Error during IO",
            ReachmapError::Server(_) => "Error in server",
        };
        write!(f, "{}: {}", prefix, err)
    }
}
