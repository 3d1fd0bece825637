use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use common::types::config::{Direction, QueryConfig};
use common::types::dataset::{Location, TimeSlice, WeekdayCategory};
use common::types::Mode;
use engine::GridBounds;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[clap(short('d'), long("dataset"), env("REACHMAP_DATASET"), default_value_os = "routeTimeList.min.json")]
    pub dataset_file: PathBuf,
    #[clap(short('l'), long("log-level"), env("REACHMAP_LOG_LEVEL"), default_value_t, value_enum)]
    pub log_level: LogLevel,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute travel times from an origin and write them as GeoJSON
    Query {
        #[command(flatten)]
        query: QueryArgs,
        #[clap(short('o'), long("output"), default_value_os = "travel-times.geojson")]
        output: PathBuf,
    },
    /// Scan a grid around the origin into cumulative time bands
    Isochrone {
        #[command(flatten)]
        query: QueryArgs,
        /// Half-width of the scanned box, in degrees
        #[clap(long, default_value_t = 0.25)]
        span_deg: f64,
        #[clap(long, default_value_t = 0.005)]
        step_deg: f64,
        /// Band thresholds in minutes
        #[clap(long, value_delimiter = ',', default_value = "15,30,45,60")]
        thresholds_mins: Vec<i64>,
        #[clap(short('o'), long("output"), default_value_os = "isochrones.json")]
        output: PathBuf,
    },
    /// Serve the HTTP API
    Serve {
        #[clap(short('a'), long("address"), env("REACHMAP_ADDRESS"), default_value = "0.0.0.0:8080")]
        address: String,
    },
}

#[derive(Args, Clone)]
pub struct QueryArgs {
    #[clap(long)]
    pub lat: f64,
    #[clap(long)]
    pub lng: f64,
    #[clap(long, default_value_t, value_enum)]
    pub direction: DirectionArg,
    #[clap(long)]
    pub max_interchanges: Option<u32>,
    /// Restrict to these mode codes; all modes when omitted
    #[clap(long, value_delimiter = ',')]
    pub modes: Vec<String>,
    #[clap(long, value_enum)]
    pub weekday: Option<WeekdayArg>,
    #[clap(long)]
    pub hour: Option<u8>,
    #[clap(long)]
    pub walkable_distance_km: Option<f64>,
}

impl QueryArgs {
    pub fn origin(&self) -> Location {
        Location { lat: self.lat, lng: self.lng }
    }

    pub fn config(&self) -> QueryConfig {
        let mut config = QueryConfig::default();
        config.modes = self.modes.iter().map(|mode| Mode::from(mode.as_str())).collect();
        config.direction = self.direction.into();
        if let Some(max_interchanges) = self.max_interchanges {
            config.max_interchanges = max_interchanges;
        }
        if let (Some(weekday), Some(hour)) = (self.weekday, self.hour) {
            config.time_slice = Some(TimeSlice { weekday: weekday.into(), hour });
        }
        if let Some(walkable_distance_km) = self.walkable_distance_km {
            config.walkable_distance_km = walkable_distance_km;
        }
        config
    }

    pub fn bounds(&self, span_deg: f64, step_deg: f64) -> GridBounds {
        GridBounds {
            min_lat: self.lat - span_deg,
            max_lat: self.lat + span_deg,
            min_lng: self.lng - span_deg,
            max_lng: self.lng + span_deg,
            step_deg,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Default)]
pub enum DirectionArg {
    #[default]
    Departing,
    Arriving,
}

impl From<DirectionArg> for Direction {
    fn from(value: DirectionArg) -> Self {
        match value {
            DirectionArg::Departing => Self::Departing,
            DirectionArg::Arriving => Self::Arriving,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy)]
pub enum WeekdayArg {
    Weekday,
    Saturday,
    Holiday,
}

impl From<WeekdayArg> for WeekdayCategory {
    fn from(value: WeekdayArg) -> Self {
        match value {
            WeekdayArg::Weekday => Self::Weekday,
            WeekdayArg::Saturday => Self::Saturday,
            WeekdayArg::Holiday => Self::Holiday,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Default)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}
