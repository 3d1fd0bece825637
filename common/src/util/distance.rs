use geo::{Distance, Haversine, Point};

/// Great-circle distance in kilometers. Points are (x = lng, y = lat).
pub fn haversine_km(a: Point<f64>, b: Point<f64>) -> f64 {
    Haversine::distance(a, b) / 1_000.0
}
