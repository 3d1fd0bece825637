use log::info;
use serde::Serialize;

use common::types::config::QueryConfig;
use common::types::dataset::{Dataset, Location};

use crate::propagate::{self, FrontierEntry};
use crate::radius::stops_within_radius;
use crate::result::{merge, PathStep, Reached, ResultMap};

/// Result of one travel-time query: minimum travel time and itinerary
/// for every stop reachable within the interchange budget.
#[derive(Debug, Clone, Serialize)]
pub struct TravelTimes {
    pub origin: Location,
    pub stops: ResultMap,
}

/// Compute travel times from (or, for arriving-at queries, towards) the
/// origin coordinate.
///
/// Stops inside walking range seed both the walk-only baseline and the
/// first expansion round, ordered nearest-first so round-one boarding
/// prefers the shortest access walk. The propagation result is merged
/// over the baseline, so a direct walk survives wherever it beats every
/// ride.
pub async fn travel_times(
    dataset: &Dataset,
    origin: Location,
    config: &QueryConfig,
) -> TravelTimes {
    let walkable =
        stops_within_radius(dataset, origin.point(), config.walkable_distance_km, config);

    let mut walk_reached = ResultMap::new();
    let mut start = Vec::with_capacity(walkable.len());
    for nearby in &walkable {
        let time = config.walking_speed.travel_time(nearby.distance_km);
        let path = vec![PathStep::walk(nearby.id.clone())];
        walk_reached.insert(
            nearby.id.clone(),
            Reached {
                lat: nearby.location.lat,
                lng: nearby.location.lng,
                time,
                path: path.clone(),
            },
        );
        start.push((nearby.id.clone(), FrontierEntry { time, interchanges: 0, path }));
    }

    let reached = propagate::run(dataset, config, start).await;
    let stops = merge(walk_reached, reached);

    info!(target: "query",
        "resolved {} stops from ({}, {}), {} within walking range",
        stops.len(), origin.lat, origin.lng, walkable.len()
    );

    TravelTimes { origin, stops }
}
