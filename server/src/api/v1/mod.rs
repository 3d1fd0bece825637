pub(crate) mod params;
pub(crate) mod resolve;
pub(crate) mod travel_times;
