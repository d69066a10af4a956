//! Walking routes and device location

pub mod client;
pub mod format;
pub mod location;
pub mod orchestrator;

use geo_types::LineString;

/// A fetched walking route. Path coordinates are `x = lng`, `y = lat`.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub path: LineString<f64>,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}
