use chrono::Duration;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::types::dataset::TimeSlice;
use crate::types::Mode;
use crate::util::speed::{Speed, DEFAULT_WALKING_SPEED};

/// Immutable per-query configuration. Built once per request and never
/// mutated mid-computation; concurrent queries each carry their own copy.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Enabled transport modes. An empty set means "all modes".
    #[serde(default)]
    pub modes: HashSet<Mode>,
    /// Modes with rail-like interchange behavior (shorter penalty, no
    /// interchange counted when continuing on rail).
    #[serde(default = "default_rail_modes")]
    pub rail_modes: HashSet<Mode>,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub time_slice: Option<TimeSlice>,
    #[serde(default = "default_max_interchanges")]
    pub max_interchanges: u32,
    #[serde(default = "default_walking_speed")]
    pub walking_speed: Speed,
    /// Maximum distance in km considered walkable, both for the initial
    /// radius search and for nearest-point resolution.
    #[serde(default = "default_walkable_distance_km")]
    pub walkable_distance_km: f64,
    /// Fixed penalty for a non-rail interchange
    #[serde_as(as = "serde_with::DurationSeconds<i64>")]
    #[serde(default = "default_interchange_penalty")]
    pub interchange_penalty: Duration,
    /// Fixed penalty when either side of the interchange is rail-like
    #[serde_as(as = "serde_with::DurationSeconds<i64>")]
    #[serde(default = "default_rail_interchange_penalty")]
    pub rail_interchange_penalty: Duration,
    /// k for nearest-neighbour resolution
    #[serde(default = "default_nearest_neighbours")]
    pub nearest_neighbours: usize,
    /// Travel time at which display intensity reaches zero
    #[serde_as(as = "serde_with::DurationSeconds<i64>")]
    #[serde(default = "default_max_travel_time")]
    pub max_travel_time: Duration,
}

impl QueryConfig {
    pub fn mode_enabled(&self, mode: &Mode) -> bool {
        self.modes.is_empty() || self.modes.contains(mode)
    }

    pub fn is_rail(&self, mode: &Mode) -> bool {
        self.rail_modes.contains(mode)
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            modes: HashSet::new(),
            rail_modes: default_rail_modes(),
            direction: Direction::default(),
            time_slice: None,
            max_interchanges: default_max_interchanges(),
            walking_speed: default_walking_speed(),
            walkable_distance_km: default_walkable_distance_km(),
            interchange_penalty: default_interchange_penalty(),
            rail_interchange_penalty: default_rail_interchange_penalty(),
            nearest_neighbours: default_nearest_neighbours(),
            max_travel_time: default_max_travel_time(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Times from the origin outwards (stop sequences ridden forward)
    #[default]
    Departing,
    /// Times towards the origin (stop sequences logically reversed,
    /// journey-time lookups swapped)
    Arriving,
}

fn default_rail_modes() -> HashSet<Mode> {
    HashSet::from([Mode::from("mtr"), Mode::from("lightRail")])
}

fn default_max_interchanges() -> u32 {
    1
}

fn default_walking_speed() -> Speed {
    DEFAULT_WALKING_SPEED
}

fn default_walkable_distance_km() -> f64 {
    1.5
}

fn default_interchange_penalty() -> Duration {
    Duration::seconds(900)
}

fn default_rail_interchange_penalty() -> Duration {
    Duration::seconds(90)
}

fn default_nearest_neighbours() -> usize {
    10
}

fn default_max_travel_time() -> Duration {
    Duration::minutes(90)
}
