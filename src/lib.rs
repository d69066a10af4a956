//! # SafeWalk
//!
//! Overlay lifecycle and route orchestration for a pedestrian safety map.
//!
//! The crate sits between a map rendering SDK (abstracted by [`sdk::MapSdk`])
//! and the network collaborators that feed it: it toggles per-category
//! point-of-interest markers, keeps a single info-window open map-wide,
//! enriches info-windows with reverse-geocoded addresses and keeps the
//! current location and walking route on the map consistent.

pub mod background;
pub mod core;
pub mod layers;
pub mod prelude;
pub mod routing;
pub mod runtime;
pub mod sdk;
pub mod traits;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    category::{Category, Place},
    config::SafeWalkConfig,
    geo::{GeoPoint, LatLng, LatLngBounds},
};

pub use layers::{
    manager::{OverlayManager, ToggleState},
    registry::OverlayRegistry,
};

pub use routing::{
    orchestrator::{RouteInfo, RouteOrchestrator, RouteType},
    location::{GeolocationError, WatchOptions},
};

pub use sdk::{headless::HeadlessMap, InfoWindowId, MapSdk, MarkerId, PolylineId};

pub use ui::popup::{InfoWindowContent, InfoWindowExclusivity};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[cfg(feature = "http")]
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("Routing error: {0}")]
    Routing(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0} was cancelled before it ran")]
    Cancelled(&'static str),
}

/// Error type alias for convenience
pub type Error = MapError;
