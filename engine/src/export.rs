use chrono::Duration;
use itertools::Itertools;
use serde_json::{json, Value};

use common::types::config::QueryConfig;

use crate::query::TravelTimes;

/// Display intensity for a travel time: 1.0 at the origin, falling
/// linearly to 0.0 at `max_travel_time` and clamped there.
pub fn intensity(time: Duration, max_travel_time: Duration) -> f64 {
    let minutes = time.num_milliseconds() as f64 / 60_000.0;
    let max_minutes = max_travel_time.num_milliseconds() as f64 / 60_000.0;
    (1.0 - minutes / max_minutes).max(0.0)
}

/// Render a query result as a GeoJSON FeatureCollection of Point
/// features, one per reached stop, ordered by stop id. Coordinates are
/// GeoJSON order, longitude first.
pub fn to_geojson(times: &TravelTimes, config: &QueryConfig) -> Value {
    let features: Vec<Value> = times
        .stops
        .iter()
        .sorted_by(|a, b| a.0.cmp(b.0))
        .map(|(stop, reached)| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [reached.lng, reached.lat],
                },
                "properties": {
                    "intensity": intensity(reached.time, config.max_travel_time),
                    "travelTime": reached.time.num_seconds(),
                    "path": reached.path,
                    "stopId": stop,
                },
            })
        })
        .collect();

    json!({ "type": "FeatureCollection", "features": features })
}
