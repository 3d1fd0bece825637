use geo::Point;
use itertools::Itertools;
use ordered_float::OrderedFloat;

use common::types::config::QueryConfig;
use common::types::dataset::{Dataset, Location};
use common::types::StopId;
use common::util::distance::haversine_km;

#[derive(Debug, Clone)]
pub struct NearbyStop {
    pub id: StopId,
    pub location: Location,
    pub distance_km: f64,
}

/// All stops serving an enabled mode within `radius_km` of `origin`,
/// ascending by distance. An empty result is a valid answer (isolated
/// origin). Pure; no side effects.
pub fn stops_within_radius(
    dataset: &Dataset,
    origin: Point<f64>,
    radius_km: f64,
    config: &QueryConfig,
) -> Vec<NearbyStop> {
    dataset
        .stops
        .iter()
        .filter(|(_, stop)| stop.modes.iter().any(|mode| config.mode_enabled(mode)))
        .filter_map(|(id, stop)| {
            let distance_km = haversine_km(origin, stop.location.point());
            (distance_km <= radius_km).then(|| NearbyStop {
                id: id.clone(),
                location: stop.location,
                distance_km,
            })
        })
        .sorted_by_key(|stop| OrderedFloat(stop.distance_km))
        .collect()
}
