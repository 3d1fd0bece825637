use chrono::Duration;
use hashbrown::{HashMap, HashSet};
use itertools::Itertools;
use log::debug;
use tokio::task::yield_now;

use common::types::config::{Direction, QueryConfig};
use common::types::dataset::Dataset;
use common::types::{Mode, RouteId, StopId};

use crate::result::{merge, PathStep, Reached, ResultMap};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone)]
pub struct FrontierEntry {
    pub time: Duration,
    pub interchanges: u32,
    pub path: Vec<PathStep>,
}

/// The stops the next round of route expansion boards from, with their
/// known time / interchange / path state. Within one round a re-reached
/// stop replaces its entry outright (last write wins); reconciliation
/// across rounds happens in the result merge, not here.
pub type Frontier = HashMap<StopId, FrontierEntry>;

/// A route sliced from its boarding point to its end, ready to ride
struct ActiveSequence {
    stops: Vec<StopId>,
    mode: Mode,
    label: String,
}

#[derive(Debug, Clone)]
struct TouchedStop {
    lat: f64,
    lng: f64,
    time: Duration,
    interchanges: u32,
    path: Vec<PathStep>,
}

/// Multi-round expansion of the route graph from a set of start stops.
/// `start` is ordered: in the first round, routes board at the first
/// start stop that appears on them (only board where the walker can
/// actually get to), while later rounds board at the furthest-forward
/// frontier stop (continue riding from anywhere already reached).
///
/// Each round must fully complete before the next begins; the awaits at
/// round boundaries are the computation's only suspension points.
pub async fn run(
    dataset: &Dataset,
    config: &QueryConfig,
    start: Vec<(StopId, FrontierEntry)>,
) -> ResultMap {
    let boarding_order: Vec<StopId> = start.iter().map(|(stop, _)| stop.clone()).collect();
    let mut frontier: Frontier = start.into_iter().collect();
    let mut seen_routes: HashSet<RouteId> = HashSet::new();
    let mut accumulated = ResultMap::new();
    let mut round = 0usize;

    while !frontier.is_empty() {
        round += 1;
        let subset = (round == 1).then_some(boarding_order.as_slice());

        let (sequences, newly_seen) =
            select_routes(dataset, config, &frontier, &seen_routes, subset);
        // A route is expanded from its frontier at most once per
        // computation; this is what guarantees termination.
        seen_routes.extend(newly_seen);
        if sequences.is_empty() {
            break;
        }

        let touched = ride_sequences(dataset, config, &frontier, &sequences);
        frontier = next_frontier(dataset, config, &sequences, &touched);

        debug!(target: "propagate",
            "round {}: {} sequences ridden, {} stops touched, {} next frontier entries",
            round, sequences.len(), touched.len(), frontier.len()
        );

        // Earlier rounds win ties; otherwise the strictly lower time wins
        accumulated = merge(accumulated, round_results(touched));

        yield_now().await;
    }

    accumulated
}

/// Pick the boarding point on every not-yet-seen route whose mode is
/// enabled, and slice the route from there to its end. Returns the
/// active sequences and the route ids to mark as seen.
fn select_routes(
    dataset: &Dataset,
    config: &QueryConfig,
    frontier: &Frontier,
    seen_routes: &HashSet<RouteId>,
    first_round_subset: Option<&[StopId]>,
) -> (Vec<ActiveSequence>, Vec<RouteId>) {
    let mut sequences = Vec::new();
    let mut newly_seen = Vec::new();

    // Stable expansion order keeps the round-local last-write-wins rule
    // reproducible across runs.
    for (route_id, route) in dataset.routes.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
        if seen_routes.contains(route_id) {
            continue;
        }
        let mut matched = false;

        for mode in &route.modes {
            if !config.mode_enabled(mode) {
                continue;
            }
            let Some(stops) = route.stops.get(mode) else { continue };

            let directed: Vec<StopId> = match config.direction {
                Direction::Departing => stops.clone(),
                Direction::Arriving => stops.iter().rev().cloned().collect(),
            };

            let boarding_idx = match first_round_subset {
                Some(subset) => subset
                    .iter()
                    .find_map(|stop| directed.iter().position(|s| s == stop)),
                None => frontier
                    .keys()
                    .filter_map(|stop| directed.iter().position(|s| s == stop))
                    .max(),
            };

            if let Some(idx) = boarding_idx {
                sequences.push(ActiveSequence {
                    stops: directed[idx..].to_vec(),
                    mode: mode.clone(),
                    label: format!("{} {}", mode, route.name),
                });
                matched = true;
            }
        }

        if matched {
            newly_seen.push(route_id.clone());
        }
    }

    (sequences, newly_seen)
}

fn edge_time(
    dataset: &Dataset,
    config: &QueryConfig,
    previous: &StopId,
    current: &StopId,
) -> Option<Duration> {
    match config.direction {
        Direction::Departing => dataset.journey_time(previous, current, config.time_slice),
        // Sequences are reversed for arriving-at queries, so the rider
        // actually travels current -> previous; swap the lookup.
        Direction::Arriving => dataset.journey_time(current, previous, config.time_slice),
    }
}

/// Ride every active sequence from its boarding stop, accumulating
/// pairwise journey times and extending paths. Returns the stops that
/// received a time this round.
fn ride_sequences(
    dataset: &Dataset,
    config: &QueryConfig,
    frontier: &Frontier,
    sequences: &[ActiveSequence],
) -> HashMap<StopId, TouchedStop> {
    let mut touched: HashMap<StopId, TouchedStop> = HashMap::new();

    for sequence in sequences {
        let Some(boarding) = sequence.stops.first().and_then(|stop| frontier.get(stop)) else {
            continue;
        };
        let mut time = boarding.time;
        let mut path = boarding.path.clone();
        let interchanges = boarding.interchanges;

        for (previous, current) in sequence.stops.iter().tuple_windows() {
            // A missing journey-time entry makes the rest of this
            // sequence unreachable; prune it instead of riding on with
            // an infinity sentinel.
            let Some(edge) = edge_time(dataset, config, previous, current) else {
                break;
            };
            time = time + edge;
            path.push(PathStep { stop: Some(current.clone()), label: sequence.label.clone() });

            let Some(stop) = dataset.stops.get(current) else { continue };

            let mut recorded_path = path.clone();
            if let Some(previous_label) = touched
                .get(current)
                .and_then(|touch| touch.path.last())
                .map(|step| step.label.clone())
            {
                // A second arrival in the same round keeps both labels
                // for display; the later time and path win outright.
                if !previous_label.split('/').any(|label| label == sequence.label) {
                    if let Some(last) = recorded_path.last_mut() {
                        last.label = format!("{}/{}", previous_label, sequence.label);
                    }
                }
            }

            touched.insert(
                current.clone(),
                TouchedStop {
                    lat: stop.location.lat,
                    lng: stop.location.lng,
                    time,
                    interchanges,
                    path: recorded_path,
                },
            );
        }
    }

    touched
}

/// Propose every touched stop and each of its "nearby" neighbors as a
/// next-round boarding point, with the rail or non-rail interchange
/// penalty applied. Proposals that exhaust the interchange budget are
/// dropped.
fn next_frontier(
    dataset: &Dataset,
    config: &QueryConfig,
    sequences: &[ActiveSequence],
    touched: &HashMap<StopId, TouchedStop>,
) -> Frontier {
    let mut next = Frontier::new();

    for sequence in sequences {
        let sequence_is_rail = config.is_rail(&sequence.mode);

        for stop_id in &sequence.stops {
            let Some(touch) = touched.get(stop_id) else { continue };
            let Some(stop) = dataset.stops.get(stop_id) else { continue };

            for nearby_id in &stop.nearby {
                let Some(nearby) = dataset.stops.get(nearby_id) else { continue };
                let rail =
                    sequence_is_rail || nearby.modes.iter().any(|mode| config.is_rail(mode));
                propose(&mut next, config, nearby_id, touch, rail, Some(PathStep::walk(nearby_id.clone())));
            }

            // Self-transfer: change to another route at the same stop
            let rail = sequence_is_rail || stop.modes.iter().any(|mode| config.is_rail(mode));
            propose(&mut next, config, stop_id, touch, rail, None);
        }
    }

    next
}

fn propose(
    next: &mut Frontier,
    config: &QueryConfig,
    stop: &StopId,
    touch: &TouchedStop,
    rail: bool,
    step: Option<PathStep>,
) {
    let (penalty, increment) = if rail {
        (config.rail_interchange_penalty, 0)
    } else {
        (config.interchange_penalty, 1)
    };
    let interchanges = touch.interchanges + increment;
    if interchanges >= config.max_interchanges {
        return;
    }

    let mut path = touch.path.clone();
    if let Some(step) = step {
        path.push(step);
    }
    next.insert(
        stop.clone(),
        FrontierEntry { time: touch.time + penalty, interchanges, path },
    );
}

fn round_results(touched: HashMap<StopId, TouchedStop>) -> ResultMap {
    touched
        .into_iter()
        .map(|(stop, touch)| {
            (
                stop,
                Reached {
                    lat: touch.lat,
                    lng: touch.lng,
                    time: touch.time,
                    path: touch.path,
                },
            )
        })
        .collect()
}
