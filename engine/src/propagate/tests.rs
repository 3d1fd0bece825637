use std::collections::HashMap as StdHashMap;

use super::*;
use crate::tests::{chain, flat_times, harbour, rail_chain, route, stop, twin};
use common::types::dataset::Dataset;

fn walk_start(id: &str, seconds: i64) -> (StopId, FrontierEntry) {
    let stop = StopId::from(id);
    (
        stop.clone(),
        FrontierEntry {
            time: Duration::seconds(seconds),
            interchanges: 0,
            path: vec![PathStep::walk(stop)],
        },
    )
}

#[tokio::test]
async fn test_single_route_ride() {
    let dataset = harbour::dataset();
    let config = QueryConfig::default();

    let result = run(&dataset, &config, vec![walk_start("A", 360)]).await;

    let b = &result[&StopId::from("B")];
    assert_eq!(b.time, Duration::seconds(660));
    assert_eq!(
        b.path.iter().map(|step| step.label.as_str()).collect::<Vec<_>>(),
        vec!["walk", "kmb R"]
    );
    assert_eq!(b.path[1].stop, Some(StopId::from("B")));
}

#[tokio::test]
async fn test_empty_start_yields_empty_result() {
    let dataset = harbour::dataset();
    let config = QueryConfig::default();

    let result = run(&dataset, &config, vec![]).await;
    assert!(result.is_empty());
}

#[test]
fn test_route_expanded_at_most_once() {
    let dataset = harbour::dataset();
    let config = QueryConfig::default();
    let frontier: Frontier = vec![walk_start("A", 360)].into_iter().collect();
    let mut seen_routes = HashSet::new();

    let (sequences, newly_seen) =
        select_routes(&dataset, &config, &frontier, &seen_routes, None);
    assert_eq!(sequences.len(), 1);
    assert_eq!(newly_seen, vec![RouteId::from("R+kmb")]);

    seen_routes.extend(newly_seen);
    let (sequences, newly_seen) =
        select_routes(&dataset, &config, &frontier, &seen_routes, None);
    assert!(sequences.is_empty());
    assert!(newly_seen.is_empty());
}

#[test]
fn test_boarding_point_selection() {
    let dataset = Dataset {
        routes: StdHashMap::from([(RouteId::from("L+kmb"), route("L", "kmb", &["A", "B", "C"]))]),
        stops: StdHashMap::from([
            (StopId::from("A"), stop(22.30, 114.16, &["kmb"], &[])),
            (StopId::from("B"), stop(22.31, 114.16, &["kmb"], &[])),
            (StopId::from("C"), stop(22.32, 114.16, &["kmb"], &[])),
        ]),
        journey_times: flat_times(&[("A", "B", 100.0), ("B", "C", 100.0)]),
    };
    let config = QueryConfig::default();
    let frontier: Frontier = vec![walk_start("B", 0), walk_start("C", 0)].into_iter().collect();

    // First round with a designated subset: board at the first subset
    // member found on the route, even if a later one is also there.
    let subset = [StopId::from("B"), StopId::from("C")];
    let (sequences, _) =
        select_routes(&dataset, &config, &frontier, &HashSet::new(), Some(&subset));
    assert_eq!(sequences[0].stops.first(), Some(&StopId::from("B")));

    // Later rounds: board at the furthest-forward frontier stop.
    let (sequences, _) = select_routes(&dataset, &config, &frontier, &HashSet::new(), None);
    assert_eq!(sequences[0].stops.first(), Some(&StopId::from("C")));
}

#[tokio::test]
async fn test_missing_edge_prunes_downstream() {
    let dataset = Dataset {
        routes: StdHashMap::from([(RouteId::from("L+kmb"), route("L", "kmb", &["A", "B", "C"]))]),
        stops: StdHashMap::from([
            (StopId::from("A"), stop(22.30, 114.16, &["kmb"], &[])),
            (StopId::from("B"), stop(22.31, 114.16, &["kmb"], &[])),
            (StopId::from("C"), stop(22.32, 114.16, &["kmb"], &[])),
        ]),
        // No B -> C entry: everything past B on this route is unreachable
        journey_times: flat_times(&[("A", "B", 100.0)]),
    };
    let config = QueryConfig::default();

    let result = run(&dataset, &config, vec![walk_start("A", 0)]).await;

    assert_eq!(result[&StopId::from("B")].time, Duration::seconds(100));
    assert!(!result.contains_key(&StopId::from("C")));
}

#[tokio::test]
async fn test_last_write_wins_within_round() {
    let dataset = twin::dataset();
    let config = QueryConfig::default();

    let result = run(
        &dataset,
        &config,
        vec![walk_start("A", 0), walk_start("B", 0)],
    )
    .await;

    // Both routes reach X in round one. Route keys expand in sorted
    // order, so the slower r2 arrival is written last and wins, with
    // both route labels preserved on the final step.
    let x = &result[&StopId::from("X")];
    assert_eq!(x.time, Duration::seconds(500));
    assert_eq!(x.path.last().map(|step| step.label.as_str()), Some("kmb T1/kmb T2"));
}

#[tokio::test]
async fn test_interchange_cap() {
    let dataset = chain::dataset();

    // Cap of 1: the B -> C interchange would bring the count to 1,
    // which is not strictly below the cap, so D stays unreachable.
    let config = QueryConfig { max_interchanges: 1, ..QueryConfig::default() };
    let result = run(&dataset, &config, vec![walk_start("A", 360)]).await;
    assert!(result.contains_key(&StopId::from("B")));
    assert!(!result.contains_key(&StopId::from("D")));

    // Cap of 2: walk 360 + ride 300 + interchange 900 + ride 200
    let config = QueryConfig { max_interchanges: 2, ..QueryConfig::default() };
    let result = run(&dataset, &config, vec![walk_start("A", 360)]).await;
    assert_eq!(result[&StopId::from("D")].time, Duration::seconds(1760));
}

#[tokio::test]
async fn test_rail_interchange_spends_no_budget() {
    let dataset = rail_chain::dataset();
    let config = QueryConfig { max_interchanges: 1, ..QueryConfig::default() };

    let result = run(&dataset, &config, vec![walk_start("A", 360)]).await;

    // Rail-to-rail continuity: shorter penalty, interchange count stays 0
    let d = &result[&StopId::from("D")];
    assert_eq!(d.time, Duration::seconds(360 + 300 + 90 + 200));
}

#[tokio::test]
async fn test_larger_cap_never_worse() {
    let dataset = chain::dataset();
    let small = QueryConfig { max_interchanges: 2, ..QueryConfig::default() };
    let large = QueryConfig { max_interchanges: 4, ..QueryConfig::default() };

    let small_result = run(&dataset, &small, vec![walk_start("A", 360)]).await;
    let large_result = run(&dataset, &large, vec![walk_start("A", 360)]).await;

    for (stop, reached) in &small_result {
        let with_larger_cap = &large_result[stop];
        assert!(
            with_larger_cap.time <= reached.time,
            "{stop} got worse with a larger cap: {:?} > {:?}",
            with_larger_cap.time,
            reached.time
        );
    }
}

#[tokio::test]
async fn test_direction_symmetry() {
    let dataset = harbour::dataset();

    let departing = QueryConfig { direction: Direction::Departing, ..QueryConfig::default() };
    let result = run(&dataset, &departing, vec![walk_start("A", 0)]).await;
    let forward = result[&StopId::from("B")].time;

    // Same route, arriving-at: the sequence is reversed and the lookup
    // order swapped, so riding B -> A reuses the A -> B journey time.
    let arriving = QueryConfig { direction: Direction::Arriving, ..QueryConfig::default() };
    let result = run(&dataset, &arriving, vec![walk_start("B", 0)]).await;
    let backward = result[&StopId::from("A")].time;

    assert_eq!(forward, backward);
    assert_eq!(forward, Duration::seconds(300));
}

#[tokio::test]
async fn test_path_respects_interchange_bound() {
    let dataset = chain::dataset();
    let config = QueryConfig { max_interchanges: 2, ..QueryConfig::default() };

    let result = run(&dataset, &config, vec![walk_start("A", 360)]).await;

    let d = &result[&StopId::from("D")];
    // Walk steps after the initial access walk are non-rail transfers
    let transfers = d.path.iter().skip(1).filter(|step| step.label == "walk").count();
    assert!((transfers as u32) < config.max_interchanges);
    assert_eq!(
        d.path.iter().map(|step| step.label.as_str()).collect::<Vec<_>>(),
        vec!["walk", "kmb R1", "walk", "kmb R2"]
    );
}
