use chrono::Duration;
use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use common::types::StopId;

/// Label used for path steps that are covered on foot (the initial walk
/// to a stop and interchange walks between nearby stops).
pub const WALK_LABEL: &str = "walk";

/// One step of an itinerary. `stop: None` is the walk-origin sentinel:
/// the step starts at the query coordinate rather than at a stop.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PathStep {
    pub stop: Option<StopId>,
    pub label: String,
}

impl PathStep {
    pub fn walk(stop: StopId) -> Self {
        Self { stop: Some(stop), label: WALK_LABEL.to_string() }
    }

    pub fn origin() -> Self {
        Self { stop: None, label: WALK_LABEL.to_string() }
    }
}

/// A stop reached by the propagation, with the minimum travel time seen
/// so far and the itinerary that produced it.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reached {
    pub lat: f64,
    pub lng: f64,
    #[serde_as(as = "serde_with::DurationSeconds<i64>")]
    pub time: Duration,
    pub path: Vec<PathStep>,
}

pub type ResultMap = HashMap<StopId, Reached>;

/// Merge two result maps, keeping the entry with the strictly lower
/// time per stop. Ties keep the entry from `a`.
pub fn merge(a: ResultMap, b: ResultMap) -> ResultMap {
    let mut merged = a;
    for (stop, reached) in b {
        match merged.entry(stop) {
            Entry::Occupied(mut existing) => {
                if reached.time < existing.get().time {
                    existing.insert(reached);
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(reached);
            }
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reached(secs: i64, label: &str) -> Reached {
        Reached {
            lat: 22.3,
            lng: 114.1,
            time: Duration::seconds(secs),
            path: vec![PathStep { stop: Some(StopId::from("X")), label: label.to_string() }],
        }
    }

    #[test]
    fn test_merge_keeps_minimum_per_key() {
        let a = ResultMap::from([
            (StopId::from("A"), reached(100, "a")),
            (StopId::from("B"), reached(500, "a")),
        ]);
        let b = ResultMap::from([
            (StopId::from("B"), reached(300, "b")),
            (StopId::from("C"), reached(700, "b")),
        ]);

        let merged = merge(a.clone(), b.clone());

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[&StopId::from("A")].time, Duration::seconds(100));
        assert_eq!(merged[&StopId::from("B")].time, Duration::seconds(300));
        assert_eq!(merged[&StopId::from("C")].time, Duration::seconds(700));

        // Commutative on times (tie-breaking aside)
        let flipped = merge(b, a);
        for (stop, entry) in &merged {
            assert_eq!(entry.time, flipped[stop].time);
        }
    }

    #[test]
    fn test_merge_tie_favors_first_argument() {
        let a = ResultMap::from([(StopId::from("A"), reached(100, "first"))]);
        let b = ResultMap::from([(StopId::from("A"), reached(100, "second"))]);

        let merged = merge(a, b);
        assert_eq!(merged[&StopId::from("A")].path[0].label, "first");
    }

    #[test]
    fn test_merge_idempotent() {
        let a = ResultMap::from([(StopId::from("A"), reached(100, "a"))]);
        let merged = merge(a.clone(), a.clone());
        assert_eq!(merged, a);
    }
}
