use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use common::types::dataset::Location;
use engine::{TimeSurface, TravelTimes};

use crate::api::v1::params::TravelTimesParams;
use crate::{AppData, LastResult};

/// Run one travel-time query. Answers `null` while the dataset is still
/// loading; the result is cached as the surface source for `resolve`.
pub(crate) async fn endpoint(
    State(app_data): State<Arc<AppData>>,
    Query(params): Query<TravelTimesParams>,
) -> Json<Option<Arc<TravelTimes>>> {
    let Some(dataset) = app_data.dataset.read().await.clone() else {
        return Json(None);
    };

    let config = params.config();
    let origin = Location { lat: params.lat, lng: params.lng };
    let times = Arc::new(engine::travel_times(&dataset, origin, &config).await);

    // The surface is immutable for this origin; build it once here so
    // every subsequent resolve only pays for the lookup.
    let surface = Arc::new(TimeSurface::build(&times));
    *app_data.last_result.write().await = Some(LastResult { surface, config });

    Json(Some(times))
}
