use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub mod config;
pub mod dataset;
pub mod errors;

// Stop identifiers come straight from the dataset and are opaque strings
// (e.g. "18492043A8761647"). They are never synthesized by the engine.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopId(pub String);

impl Display for StopId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StopId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(pub String);

impl Display for RouteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RouteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

// An operator / transport-mode code ("kmb", "mtr", "lightRail", ...).
// The set is open: which codes count as rail-like is decided by the
// query configuration, not hardcoded here.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mode(pub String);

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Mode {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
