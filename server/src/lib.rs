mod api;

use axum::routing::get;
use axum::Router;
use common::types::config::QueryConfig;
use common::types::dataset::Dataset;
use engine::TimeSurface;
use log::info;
use std::fmt::Display;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;

struct AppData {
    /// `None` while the dataset is still loading; queries answer
    /// neutrally instead of failing.
    dataset: RwLock<Option<Arc<Dataset>>>,
    last_result: RwLock<Option<LastResult>>,
}

/// Surface of the most recent query, built once per origin so point
/// resolution only pays for index construction and lookups.
#[derive(Clone)]
struct LastResult {
    surface: Arc<TimeSurface>,
    config: QueryConfig,
}

pub async fn build(
    dataset: Option<Arc<Dataset>>,
    address: &str,
) -> Result<(TcpListener, Router), ServerError> {
    let app_data = Arc::new(AppData {
        dataset: RwLock::new(dataset),
        last_result: RwLock::new(None),
    });

    let app = Router::new()
        .route("/api/v1/travel-times", get(api::v1::travel_times::endpoint))
        .route("/api/v1/resolve", get(api::v1::resolve::endpoint))
        .with_state(app_data);

    let listener = TcpListener::bind(address).await?;

    Ok((listener, app))
}

pub async fn serve(listener: TcpListener, app: Router) -> Result<(), ServerError> {
    info!(target: "server", "listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    Io(#[from] std::io::Error),
}

impl Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
