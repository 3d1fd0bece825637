use chrono::Duration;
use log::info;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use common::types::config::QueryConfig;
use common::types::dataset::Location;

use crate::errors::QueryResult;
use crate::spatial::SurfaceIndex;

/// Rectangular scan area with a uniform step, both in degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GridBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
    pub step_deg: f64,
}

impl GridBounds {
    /// True when the box encloses no area to scan
    fn is_degenerate(&self) -> bool {
        self.step_deg <= 0.0 || self.max_lat < self.min_lat || self.max_lng < self.min_lng
    }

    fn rows(&self) -> usize {
        steps_between(self.min_lat, self.max_lat, self.step_deg)
    }

    fn cols(&self) -> usize {
        steps_between(self.min_lng, self.max_lng, self.step_deg)
    }

    fn cell(&self, row: usize, col: usize) -> Location {
        Location {
            lat: self.min_lat + row as f64 * self.step_deg,
            lng: self.min_lng + col as f64 * self.step_deg,
        }
    }
}

fn steps_between(low: f64, high: f64, step: f64) -> usize {
    if high <= low || step <= 0.0 {
        return 0;
    }
    ((high - low) / step).floor() as usize
}

/// All grid cells reachable within `threshold`. Bands are cumulative: a
/// cell inside the 20-minute band is also inside every larger one.
#[serde_as]
#[derive(Debug, Clone, Serialize)]
pub struct IsochroneBand {
    #[serde_as(as = "serde_with::DurationSeconds<i64>")]
    pub threshold: Duration,
    pub points: Vec<Location>,
}

/// Scan the grid, resolve every cell against the surface and classify
/// it into cumulative time bands. Cells out of walking reach of every
/// surface point are left out entirely. The per-band point sets feed an
/// external hull or smoothing stage.
///
/// Synchronous; a server caller should wrap it in `spawn_blocking`.
pub fn classify(
    index: &SurfaceIndex<'_>,
    bounds: &GridBounds,
    thresholds: &[Duration],
    config: &QueryConfig,
) -> QueryResult<Vec<IsochroneBand>> {
    let mut sorted = thresholds.to_vec();
    sorted.sort();
    let mut bands: Vec<IsochroneBand> = sorted
        .into_iter()
        .map(|threshold| IsochroneBand { threshold, points: Vec::new() })
        .collect();

    // Inverted or zero-step bounds would still scan the min corner
    // through the inclusive ranges below; return empty bands instead
    if bounds.is_degenerate() {
        return Ok(bands);
    }

    let mut resolved_cells = 0usize;
    for row in 0..=bounds.rows() {
        for col in 0..=bounds.cols() {
            let cell = bounds.cell(row, col);
            let Some(resolved) = index.resolve(cell, config)? else {
                continue;
            };
            resolved_cells += 1;
            for band in &mut bands {
                if resolved.time <= band.threshold {
                    band.points.push(cell);
                }
            }
        }
    }

    info!(target: "isochrone",
        "classified {} of {} cells into {} bands",
        resolved_cells,
        (bounds.rows() + 1) * (bounds.cols() + 1),
        bands.len()
    );

    Ok(bands)
}
