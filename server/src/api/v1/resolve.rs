use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use common::types::dataset::Location;
use engine::errors::QueryError;
use engine::ResolvedPoint;

use crate::api::v1::params::ResolveParams;
use crate::AppData;

/// Resolve one coordinate against the last computed travel-time result.
/// Answers `null` when no query has run yet or the coordinate is out of
/// walking reach of every surface point.
pub(crate) async fn endpoint(
    State(app_data): State<Arc<AppData>>,
    Query(params): Query<ResolveParams>,
) -> Result<Json<Option<ResolvedPoint>>, (StatusCode, String)> {
    let Some(last) = app_data.last_result.read().await.clone() else {
        return Ok(Json(None));
    };

    let target = Location { lat: params.lat, lng: params.lng };
    let resolved = tokio::task::spawn_blocking(move || {
        let index = last.surface.index()?;
        index.resolve(target, &last.config)
    })
    .await
    .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?
    .map_err(convert_error)?;

    Ok(Json(resolved))
}

fn convert_error(err: QueryError) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}
