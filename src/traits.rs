//! Collaborator abstractions
//!
//! The overlay and route components talk to the outside world only through
//! these traits. HTTP-backed implementations live next to the code that
//! consumes them; tests substitute scripted fakes.

use crate::core::geo::LatLng;
use crate::routing::{
    location::{GeolocationError, WatchOptions},
    orchestrator::RouteType,
    Route,
};
use crate::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Turns a coordinate into a display address
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse_geocode(&self, position: LatLng) -> Result<String>;
}

/// Fetches a walking route between two points
#[async_trait]
pub trait RouteProvider: Send + Sync {
    async fn fetch_route(&self, start: LatLng, goal: LatLng, route_type: RouteType)
        -> Result<Route>;
}

/// Device positioning
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// One-shot fix
    async fn current_position(&self) -> std::result::Result<LatLng, GeolocationError>;

    /// Continuous updates. Dropping the stream ends the subscription.
    fn watch_position(
        &self,
        options: WatchOptions,
    ) -> BoxStream<'static, std::result::Result<LatLng, GeolocationError>>;
}

/// User-facing alerts
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Notifier that only logs, for hosts without a UI
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, message: &str) {
        log::warn!("{message}");
    }
}
