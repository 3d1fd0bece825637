pub mod errors;
pub mod export;
pub mod isochrone;
pub mod propagate;
pub mod query;
pub mod radius;
pub mod result;
pub mod spatial;
#[cfg(test)]
mod tests;

pub use export::to_geojson;
pub use isochrone::{classify, GridBounds, IsochroneBand};
pub use query::{travel_times, TravelTimes};
pub use result::{merge, PathStep, Reached, ResultMap};
pub use spatial::{ResolvedPoint, SurfaceIndex, TimeSurface};
