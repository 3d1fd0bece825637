use chrono::Duration;
use geo::{point, Distance, Haversine};
use itertools::Itertools;
use linfa::Float;
use linfa_nn::{BallTreeIndex, NearestNeighbourIndex};
use ndarray::{arr1, Array2, ArrayView, Dimension};
use serde::Serialize;
use serde_with::serde_as;

use common::types::config::QueryConfig;
use common::types::dataset::Location;
use common::types::StopId;

use crate::errors::QueryResult;
use crate::query::TravelTimes;
use crate::result::PathStep;

#[derive(Debug, Clone, PartialEq, Eq)]
struct HaversineDist;

/// Great-circle metric over [lng, lat] rows, in meters.
impl<F: Float> linfa_nn::distance::Distance<F> for HaversineDist {
    fn distance<D: Dimension>(&self, a: ArrayView<F, D>, b: ArrayView<F, D>) -> F {
        let mut a_iter = a.into_iter();
        let mut b_iter = b.into_iter();
        let point_a = point!(x: *a_iter.next().unwrap(), y: *a_iter.next().unwrap());
        let point_b = point!(x: *b_iter.next().unwrap(), y: *b_iter.next().unwrap());
        let distance = Haversine::distance(point_a, point_b);
        F::from(distance).unwrap()
    }
}

#[derive(Debug, Clone)]
struct SurfacePoint {
    stop: Option<StopId>,
    time: Duration,
    path: Vec<PathStep>,
}

/// A query result flattened into coordinate rows, ready for spatial
/// indexing. Row 0 is always the query origin itself at time zero, so a
/// surface is never empty and points near the origin resolve to their
/// plain walking time.
#[derive(Debug, Clone)]
pub struct TimeSurface {
    coords: Array2<f64>,
    points: Vec<SurfacePoint>,
}

impl TimeSurface {
    pub fn build(times: &TravelTimes) -> Self {
        let mut points = vec![SurfacePoint {
            stop: None,
            time: Duration::zero(),
            path: vec![PathStep::origin()],
        }];
        let mut locations = vec![times.origin];

        // Stable row order keeps index construction reproducible
        for (stop, reached) in times.stops.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
            points.push(SurfacePoint {
                stop: Some(stop.clone()),
                time: reached.time,
                path: reached.path.clone(),
            });
            locations.push(Location { lat: reached.lat, lng: reached.lng });
        }

        let mut coords = Array2::zeros((locations.len(), 2));
        for (row, location) in locations.iter().enumerate() {
            coords[[row, 0]] = location.lng;
            coords[[row, 1]] = location.lat;
        }

        Self { coords, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn index(&self) -> QueryResult<SurfaceIndex<'_>> {
        let index = BallTreeIndex::new(&self.coords, 4, HaversineDist)?;
        Ok(SurfaceIndex { surface: self, index })
    }
}

/// Ball-tree over a [`TimeSurface`], borrowed for the lifetime of the
/// surface it indexes.
pub struct SurfaceIndex<'a> {
    surface: &'a TimeSurface,
    index: BallTreeIndex<'a, f64, HaversineDist>,
}

/// Travel time to an arbitrary coordinate, resolved through the nearest
/// surface points plus the final walk.
#[serde_as]
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedPoint {
    /// Surface point the walk starts from; `None` when it is the origin
    pub stop: Option<StopId>,
    #[serde_as(as = "serde_with::DurationSeconds<i64>")]
    pub time: Duration,
    #[serde_as(as = "serde_with::DurationSeconds<i64>")]
    pub walk_time: Duration,
    /// Itinerary of the winning surface point
    pub path: Vec<PathStep>,
}

impl SurfaceIndex<'_> {
    /// Resolve the travel time to `target`: among the k nearest surface
    /// points within walking distance, the minimum of point time plus
    /// walk time. `None` means the coordinate is out of walking reach
    /// of every considered point.
    pub fn resolve(
        &self,
        target: Location,
        config: &QueryConfig,
    ) -> QueryResult<Option<ResolvedPoint>> {
        let k = config.nearest_neighbours.clamp(1, self.surface.len());
        let query = arr1(&[target.lng, target.lat]);
        let neighbours = self.index.k_nearest(query.view(), k)?;

        let mut best: Option<ResolvedPoint> = None;
        for (coords, row) in neighbours {
            let neighbour = point!(x: coords[0], y: coords[1]);
            let walk_km = Haversine::distance(neighbour, target.point()) / 1_000.0;
            if walk_km > config.walkable_distance_km {
                continue;
            }

            let point = &self.surface.points[row];
            let walk_time = config.walking_speed.travel_time(walk_km);
            let time = point.time + walk_time;
            if best.as_ref().is_none_or(|current| time < current.time) {
                best = Some(ResolvedPoint {
                    stop: point.stop.clone(),
                    time,
                    walk_time,
                    path: point.path.clone(),
                });
            }
        }

        Ok(best)
    }
}
