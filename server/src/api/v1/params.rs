use chrono::Duration;
use common::types::config::{Direction, QueryConfig};
use common::types::dataset::{TimeSlice, WeekdayCategory};
use common::types::Mode;
use serde::Deserialize;

/// Query-string parameters for a travel-time query. Everything beyond
/// the coordinate is optional and falls back to the configuration
/// defaults.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TravelTimesParams {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub max_interchanges: Option<u32>,
    /// Comma-separated mode codes, e.g. `modes=kmb,mtr`
    #[serde(default)]
    pub modes: Option<String>,
    #[serde(default)]
    pub weekday: Option<WeekdayCategory>,
    #[serde(default)]
    pub hour: Option<u8>,
    #[serde(default)]
    pub walkable_distance_km: Option<f64>,
    #[serde(default)]
    pub max_travel_time_mins: Option<i64>,
}

impl TravelTimesParams {
    pub(crate) fn config(&self) -> QueryConfig {
        let mut config = QueryConfig::default();
        if let Some(modes) = &self.modes {
            config.modes = modes
                .split(',')
                .filter(|mode| !mode.is_empty())
                .map(Mode::from)
                .collect();
        }
        if let Some(direction) = self.direction {
            config.direction = direction;
        }
        if let Some(max_interchanges) = self.max_interchanges {
            config.max_interchanges = max_interchanges;
        }
        // A time slice needs both halves; a lone weekday or hour is ignored
        if let (Some(weekday), Some(hour)) = (self.weekday, self.hour) {
            config.time_slice = Some(TimeSlice { weekday, hour });
        }
        if let Some(walkable_distance_km) = self.walkable_distance_km {
            config.walkable_distance_km = walkable_distance_km;
        }
        if let Some(minutes) = self.max_travel_time_mins {
            config.max_travel_time = Duration::minutes(minutes);
        }
        config
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct ResolveParams {
    pub lat: f64,
    pub lng: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_params_use_defaults() {
        let params: TravelTimesParams =
            serde_json::from_value(json!({ "lat": 22.3, "lng": 114.16 })).unwrap();
        let config = params.config();

        let defaults = QueryConfig::default();
        assert!(config.modes.is_empty());
        assert_eq!(config.direction, Direction::Departing);
        assert_eq!(config.max_interchanges, defaults.max_interchanges);
        assert_eq!(config.time_slice, None);
    }

    #[test]
    fn test_overrides_apply() {
        let params: TravelTimesParams = serde_json::from_value(json!({
            "lat": 22.3,
            "lng": 114.16,
            "modes": "kmb,mtr",
            "direction": "arriving",
            "max_interchanges": 3,
            "weekday": "saturday",
            "hour": 9,
            "max_travel_time_mins": 60,
        }))
        .unwrap();
        let config = params.config();

        assert_eq!(config.modes.len(), 2);
        assert!(config.mode_enabled(&Mode::from("mtr")));
        assert!(!config.mode_enabled(&Mode::from("ferry")));
        assert_eq!(config.direction, Direction::Arriving);
        assert_eq!(config.max_interchanges, 3);
        assert_eq!(
            config.time_slice,
            Some(TimeSlice { weekday: WeekdayCategory::Saturday, hour: 9 })
        );
        assert_eq!(config.max_travel_time, Duration::minutes(60));
    }

    #[test]
    fn test_half_a_time_slice_is_ignored() {
        let params: TravelTimesParams =
            serde_json::from_value(json!({ "lat": 22.3, "lng": 114.16, "hour": 9 }))
                .unwrap();
        assert_eq!(params.config().time_slice, None);
    }
}
