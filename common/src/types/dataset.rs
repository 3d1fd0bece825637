use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{Duration, TimeDelta};
use geo::{point, Point};
use serde::{Deserialize, Serialize};

use crate::types::errors::DatasetError;
use crate::types::{Mode, RouteId, StopId};

/// The pre-merged route/time dataset, one JSON document shaped like
/// `routeTimeList.min.json`. It is validated upstream and treated as
/// immutable for the whole process lifetime.
#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    #[serde(rename = "routeList")]
    pub routes: HashMap<RouteId, Route>,
    #[serde(rename = "stopList")]
    pub stops: HashMap<StopId, Stop>,
    #[serde(rename = "journeyTimes")]
    pub journey_times: HashMap<StopId, HashMap<StopId, JourneyTime>>,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let file = File::open(path)?;
        let dataset = serde_json::from_reader(BufReader::new(file))?;
        Ok(dataset)
    }

    /// Scheduled travel time from `from` to its immediate successor `to`
    /// on some route. `None` means the edge is unreachable for this
    /// slice.
    pub fn journey_time(
        &self,
        from: &StopId,
        to: &StopId,
        slice: Option<TimeSlice>,
    ) -> Option<Duration> {
        let seconds = self.journey_times.get(from)?.get(to)?.seconds(slice)?;
        Some(TimeDelta::milliseconds((seconds * 1_000.0) as i64))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Stop {
    /// Display name per language code ("en", "zh", ...)
    pub name: HashMap<String, String>,
    pub location: Location,
    #[serde(rename = "co")]
    pub modes: Vec<Mode>,
    /// Stops reachable by a short interchange walk
    #[serde(default)]
    pub nearby: Vec<StopId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn point(&self) -> Point<f64> {
        point!(x: self.lng, y: self.lat)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    /// Public-facing route name, e.g. "1A"
    #[serde(rename = "route")]
    pub name: String,
    #[serde(rename = "co")]
    pub modes: Vec<Mode>,
    /// One ordered stop sequence per cooperating operator. Jointly
    /// operated routes have several sequences that may differ.
    pub stops: HashMap<Mode, Vec<StopId>>,
}

/// Travel time between two adjacent stops: either a flat "normal"
/// value in seconds, or a table keyed by weekday category and hour.
#[serde_with::serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum JourneyTime {
    Flat(f64),
    Scheduled(
        #[serde_as(as = "HashMap<_, HashMap<serde_with::DisplayFromStr, _>>")]
        HashMap<WeekdayCategory, HashMap<u8, f64>>,
    ),
}

impl JourneyTime {
    pub fn seconds(&self, slice: Option<TimeSlice>) -> Option<f64> {
        match (self, slice) {
            (JourneyTime::Flat(seconds), _) => Some(*seconds),
            (JourneyTime::Scheduled(table), Some(slice)) => {
                table.get(&slice.weekday)?.get(&slice.hour).copied()
            }
            // A scheduled-only entry without a time-of-day filter has no
            // "normal" value to fall back to, so the edge is a miss.
            (JourneyTime::Scheduled(_), None) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekdayCategory {
    Weekday,
    Saturday,
    Holiday,
}

/// Optional weekday + hour-of-day selector for a query. Absent means
/// the flat "normal" times apply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSlice {
    pub weekday: WeekdayCategory,
    pub hour: u8,
}
