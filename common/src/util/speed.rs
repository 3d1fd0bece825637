use chrono::{Duration, TimeDelta};
use serde::{Deserialize, Serialize};

/// Speed in km/h
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Speed(pub f64);

pub const DEFAULT_WALKING_SPEED: Speed = Speed(5.1);

impl Speed {
    pub fn travel_time(&self, kilometers: f64) -> Duration {
        let hours = kilometers / self.0;
        TimeDelta::milliseconds((hours * 60.0 * 60.0 * 1_000.0) as i64)
    }
}
