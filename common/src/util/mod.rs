pub mod distance;
pub mod logging;
pub mod speed;
