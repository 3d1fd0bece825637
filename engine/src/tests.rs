//! Hand-built fixture datasets shared across the engine tests.

use std::collections::HashMap;

use common::types::dataset::{Dataset, JourneyTime, Location, Route, Stop};
use common::types::{Mode, RouteId, StopId};

// One degree of latitude is ~111.195 km on the haversine sphere, so
// 0.0044966 degrees is ~0.5 km.
pub(crate) const HALF_KM_LAT: f64 = 0.0044966;

pub(crate) fn stop(lat: f64, lng: f64, modes: &[&str], nearby: &[&str]) -> Stop {
    Stop {
        name: HashMap::from([("en".to_string(), "Stop".to_string())]),
        location: Location { lat, lng },
        modes: modes.iter().map(|mode| Mode::from(*mode)).collect(),
        nearby: nearby.iter().map(|id| StopId::from(*id)).collect(),
    }
}

pub(crate) fn route(name: &str, mode: &str, stops: &[&str]) -> Route {
    Route {
        name: name.to_string(),
        modes: vec![Mode::from(mode)],
        stops: HashMap::from([(
            Mode::from(mode),
            stops.iter().map(|id| StopId::from(*id)).collect(),
        )]),
    }
}

pub(crate) fn flat_times(
    edges: &[(&str, &str, f64)],
) -> HashMap<StopId, HashMap<StopId, JourneyTime>> {
    let mut times: HashMap<StopId, HashMap<StopId, JourneyTime>> = HashMap::new();
    for (from, to, seconds) in edges {
        times
            .entry(StopId::from(*from))
            .or_default()
            .insert(StopId::from(*to), JourneyTime::Flat(*seconds));
    }
    times
}

/// Two stops north of the origin along one bus route:
/// - A at ~0.5 km, B at ~1.0 km (both directly walkable)
/// - route R rides A -> B in 300 s
/// At 5 km/h the walks take ~360 s and ~720 s, so riding to B via A
/// (~660 s) beats walking there directly.
pub(crate) mod harbour {
    use super::*;

    pub(crate) fn origin() -> Location {
        Location { lat: 22.30, lng: 114.16 }
    }

    pub(crate) fn dataset() -> Dataset {
        Dataset {
            routes: HashMap::from([(RouteId::from("R+kmb"), route("R", "kmb", &["A", "B"]))]),
            stops: HashMap::from([
                (StopId::from("A"), stop(22.30 + HALF_KM_LAT, 114.16, &["kmb"], &[])),
                (StopId::from("B"), stop(22.30 + 2.0 * HALF_KM_LAT, 114.16, &["kmb"], &[])),
            ]),
            journey_times: flat_times(&[("A", "B", 300.0)]),
        }
    }
}

/// A two-route chain that needs an interchange:
/// - route R1 rides A -> B (300 s), route R2 rides C -> D (200 s)
/// - B and C are interchange-walk neighbors ("nearby")
/// Reaching D therefore takes one non-rail interchange.
pub(crate) mod chain {
    use super::*;

    pub(crate) fn dataset() -> Dataset {
        Dataset {
            routes: HashMap::from([
                (RouteId::from("R1+kmb"), route("R1", "kmb", &["A", "B"])),
                (RouteId::from("R2+kmb"), route("R2", "kmb", &["C", "D"])),
            ]),
            stops: HashMap::from([
                (StopId::from("A"), stop(22.30, 114.16, &["kmb"], &[])),
                (StopId::from("B"), stop(22.32, 114.16, &["kmb"], &["C"])),
                (StopId::from("C"), stop(22.321, 114.16, &["kmb"], &["B"])),
                (StopId::from("D"), stop(22.34, 114.16, &["kmb"], &[])),
            ]),
            journey_times: flat_times(&[("A", "B", 300.0), ("C", "D", 200.0)]),
        }
    }
}

/// Same chain as above, but entirely rail-operated: continuing through
/// the B -> C interchange costs the shorter rail penalty and no
/// interchange from the budget.
pub(crate) mod rail_chain {
    use super::*;

    pub(crate) fn dataset() -> Dataset {
        Dataset {
            routes: HashMap::from([
                (RouteId::from("M1+mtr"), route("M1", "mtr", &["A", "B"])),
                (RouteId::from("M2+mtr"), route("M2", "mtr", &["C", "D"])),
            ]),
            stops: HashMap::from([
                (StopId::from("A"), stop(22.30, 114.16, &["mtr"], &[])),
                (StopId::from("B"), stop(22.32, 114.16, &["mtr"], &["C"])),
                (StopId::from("C"), stop(22.321, 114.16, &["mtr"], &["B"])),
                (StopId::from("D"), stop(22.34, 114.16, &["mtr"], &[])),
            ]),
            journey_times: flat_times(&[("A", "B", 300.0), ("C", "D", 200.0)]),
        }
    }
}

/// Two routes arriving at the same stop X within one round. Route keys
/// sort "r1" before "r2", and routes are expanded in key order, so the
/// r2 arrival is written last.
pub(crate) mod twin {
    use super::*;

    pub(crate) fn dataset() -> Dataset {
        Dataset {
            routes: HashMap::from([
                (RouteId::from("r1+kmb"), route("T1", "kmb", &["A", "X"])),
                (RouteId::from("r2+kmb"), route("T2", "kmb", &["B", "X"])),
            ]),
            stops: HashMap::from([
                (StopId::from("A"), stop(22.30, 114.16, &["kmb"], &[])),
                (StopId::from("B"), stop(22.31, 114.16, &["kmb"], &[])),
                (StopId::from("X"), stop(22.32, 114.16, &["kmb"], &[])),
            ]),
            journey_times: flat_times(&[("A", "X", 100.0), ("B", "X", 500.0)]),
        }
    }
}
